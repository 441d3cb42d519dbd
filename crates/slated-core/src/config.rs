//! Interpreter tunables. Only two knobs exist: the conversation timeout and
//! how many available options a prompt lists before truncating.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONVERSATION_TIMEOUT_SECS: i64 = 300;
pub const DEFAULT_MAX_SHOWN_OPTIONS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Seconds an unanswered dialogue stays alive before lazy pruning.
    pub conversation_timeout_secs: i64,
    /// Maximum number of category/course names listed in a prompt.
    pub max_shown_options: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            conversation_timeout_secs: DEFAULT_CONVERSATION_TIMEOUT_SECS,
            max_shown_options: DEFAULT_MAX_SHOWN_OPTIONS,
        }
    }
}

impl InterpreterConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn conversation_timeout(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.conversation_timeout_secs)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
