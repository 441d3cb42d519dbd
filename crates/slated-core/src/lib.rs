//! Deterministic interpreter for one-line natural-language commands.
//!
//! Free text goes in, a structured [`ParseOutcome`] comes out: a calendar
//! event, a recurring schedule item, a grade entry, or a clarification
//! question carrying a [`SlotContext`] that a later [`Interpreter::parse_follow_up`]
//! call resumes from. Everything is regex and keyword driven; identical
//! input with an identical clock always produces an identical outcome.

pub mod config;
pub mod conversation;
pub mod extract;
pub mod title;

mod classify;
mod followup;
mod prompts;
mod router;

pub use slated_schema::{
    Category, Course, EventContext, GradeContext, ParseOutcome, ParsedEvent, ParsedGrade,
    ParsedScheduleItem, ReminderLead, ScheduleContext, SlotContext, TimeOfDay, Weekday,
};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::config::InterpreterConfig;
use crate::conversation::ConversationStore;

/// One parse attempt's worth of shared state, threaded through the router,
/// classifiers, and follow-up resolver.
pub(crate) struct ParseRequest<'a> {
    pub raw: &'a str,
    pub lower: &'a str,
    pub categories: &'a [Category],
    pub courses: &'a [Course],
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
    pub conversations: &'a ConversationStore,
    pub config: &'a InterpreterConfig,
}

/// The interpreter itself. Cheap to construct, internally synchronized;
/// share one behind an `Arc` when parsing from several threads.
pub struct Interpreter {
    config: InterpreterConfig,
    conversations: ConversationStore,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Interpreter {
            config,
            conversations: ConversationStore::new(),
        }
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Interpret one line of input against the wall clock.
    pub fn parse(&self, input: &str, categories: &[Category], courses: &[Course]) -> ParseOutcome {
        self.parse_at(input, categories, courses, Utc::now())
    }

    /// Interpret one line of input at an explicit instant. `now` fixes both
    /// the date that relative references resolve against and the cutoff for
    /// expiring pending clarifications.
    pub fn parse_at(
        &self,
        input: &str,
        categories: &[Category],
        courses: &[Course],
        now: DateTime<Utc>,
    ) -> ParseOutcome {
        self.conversations.prune(now, self.config.conversation_timeout());
        let raw = input.trim();
        if raw.is_empty() {
            return ParseOutcome::NotAttempted;
        }
        let lower = raw.to_lowercase();
        tracing::debug!(input = raw, "parsing");
        let req = ParseRequest {
            raw,
            lower: &lower,
            categories,
            courses,
            today: now.date_naive(),
            now,
            conversations: &self.conversations,
            config: &self.config,
        };
        router::route(&req)
    }

    /// Resolve a clarification reply against the context from a previous
    /// `NeedsMoreInfo` outcome.
    pub fn parse_follow_up(
        &self,
        input: &str,
        context: SlotContext,
        conversation_id: Option<Uuid>,
        categories: &[Category],
        courses: &[Course],
    ) -> ParseOutcome {
        self.parse_follow_up_at(input, context, conversation_id, categories, courses, Utc::now())
    }

    pub fn parse_follow_up_at(
        &self,
        input: &str,
        context: SlotContext,
        conversation_id: Option<Uuid>,
        categories: &[Category],
        courses: &[Course],
        now: DateTime<Utc>,
    ) -> ParseOutcome {
        self.conversations.prune(now, self.config.conversation_timeout());
        let raw = input.trim();
        if raw.is_empty() {
            return ParseOutcome::NotAttempted;
        }
        // The context the caller hands back is self-contained, so a reply
        // arriving after its conversation expired is still honored.
        if let Some(id) = conversation_id {
            if !self.conversations.contains(&id) {
                tracing::debug!(conversation_id = %id, "follow-up for expired conversation");
            }
        }
        let lower = raw.to_lowercase();
        tracing::debug!(input = raw, "resolving follow-up");
        let req = ParseRequest {
            raw,
            lower: &lower,
            categories,
            courses,
            today: now.date_naive(),
            now,
            conversations: &self.conversations,
            config: &self.config,
        };
        followup::resolve(&req, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn blank_input_is_not_attempted() {
        let interp = Interpreter::new();
        let outcome = interp.parse_at("   ", &[], &[], noon(2026, 9, 2));
        assert!(matches!(outcome, ParseOutcome::NotAttempted));
    }

    #[test]
    fn pending_conversations_expire() {
        let interp = Interpreter::new();
        let start = noon(2026, 9, 2);
        let outcome = interp.parse_at("dentist tomorrow", &[], &[], start);
        assert!(matches!(outcome, ParseOutcome::NeedsMoreInfo { .. }));
        assert_eq!(interp.conversations().len(), 1);

        // A later parse past the timeout sweeps the stale entry.
        let later = start + Duration::minutes(10);
        interp.parse_at("lunch friday at noon", &[], &[], later);
        assert_eq!(interp.conversations().len(), 1);
    }

    #[test]
    fn cancellation_abandons_the_dialogue() {
        let interp = Interpreter::new();
        let now = noon(2026, 9, 2);
        let outcome = interp.parse_at("dentist tomorrow at 3pm", &[], &[], now);
        let ParseOutcome::NeedsMoreInfo {
            context: Some(context),
            conversation_id,
            ..
        } = outcome
        else {
            panic!("expected a clarification");
        };
        let outcome =
            interp.parse_follow_up_at("nevermind", context, conversation_id, &[], &[], now);
        match outcome {
            ParseOutcome::Unrecognized { original_input } => {
                assert_eq!(original_input, "Cancelled");
            }
            other => panic!("expected cancellation, got {other:?}"),
        }
    }
}
