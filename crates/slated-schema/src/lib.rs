//! Shared data types for the slated interpreter: the parsed-action union,
//! the slot-filling contexts carried across dialogue turns, and the small
//! value types (weekday, time-of-day, reminder lead) they are built from.
//!
//! Everything here is plain serde-serializable data so a host UI can hold a
//! context between turns, persist it, or ship it over a wire unchanged.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A calendar category known to the host application. Supplied fresh on
/// every call; the interpreter only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A course known to the host application's grade book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
}

impl Course {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Day of week for recurring schedule items. Ordered Monday-first so day
/// sets render deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Days since Monday, matching `chrono::Weekday::num_days_from_monday`.
    pub fn num_days_from_monday(&self) -> u32 {
        *self as u32
    }

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A wall-clock time with no date attached. Constructed only through
/// [`TimeOfDay::new`], which rejects out-of-range values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// The fixed enumeration of reminder lead times. `None` is an explicit
/// "no reminder" answer, distinct from the field never having been asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderLead {
    None,
    Minutes5,
    Minutes15,
    Minutes30,
    Hour1,
    Hours2,
    Day1,
    Days2,
    Week1,
}

impl ReminderLead {
    /// Lead time in minutes; `None` for the explicit no-reminder answer.
    pub fn minutes(&self) -> Option<u32> {
        match self {
            ReminderLead::None => None,
            ReminderLead::Minutes5 => Some(5),
            ReminderLead::Minutes15 => Some(15),
            ReminderLead::Minutes30 => Some(30),
            ReminderLead::Hour1 => Some(60),
            ReminderLead::Hours2 => Some(120),
            ReminderLead::Day1 => Some(1440),
            ReminderLead::Days2 => Some(2880),
            ReminderLead::Week1 => Some(10080),
        }
    }
}

/// A one-off calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub title: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<TimeOfDay>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub reminder: Option<ReminderLead>,
}

/// A recurring weekly schedule item (a class, shift, practice, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedScheduleItem {
    pub title: String,
    pub days: BTreeSet<Weekday>,
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    /// Length in seconds, used when no end time was given.
    #[serde(default)]
    pub duration_secs: Option<u32>,
    #[serde(default)]
    pub reminder: Option<ReminderLead>,
    #[serde(default)]
    pub color_hex: Option<String>,
}

/// A grade entry for an assignment in a course. The grade is kept in its
/// surface form ("92%", "A-", "18/20" normalized to "90%").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedGrade {
    pub course_name: String,
    pub assignment_name: String,
    pub grade: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Outcome of one interpreter call. Exactly one variant per call;
/// `NeedsMoreInfo` is the only non-terminal variant — callers must feed its
/// context back into the follow-up call rather than treat it as final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParseOutcome {
    Event(ParsedEvent),
    Schedule(ParsedScheduleItem),
    Grade(ParsedGrade),
    NeedsMoreInfo {
        prompt: String,
        original_input: String,
        #[serde(default)]
        context: Option<SlotContext>,
        #[serde(default)]
        conversation_id: Option<Uuid>,
    },
    Unrecognized {
        original_input: String,
    },
    NotAttempted,
}

/// The typed "slot still missing" state carried across dialogue turns,
/// partitioned by intent. A context's fields are exactly the slots already
/// resolved; advancing to the next context carries every one forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum SlotContext {
    Grade(GradeContext),
    Event(EventContext),
    Schedule(ScheduleContext),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "missing", rename_all = "snake_case")]
pub enum GradeContext {
    /// Grade evidence was present but no usable value; course/assignment
    /// hold whatever could already be inferred from the first utterance.
    NeedsGrade {
        #[serde(default)]
        course: Option<String>,
        #[serde(default)]
        assignment: Option<String>,
    },
    NeedsCourse {
        #[serde(default)]
        assignment: Option<String>,
        grade: String,
    },
    NeedsAssignmentName {
        course: String,
        grade: String,
    },
    NeedsWeight {
        course: String,
        assignment: String,
        grade: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "missing", rename_all = "snake_case")]
pub enum EventContext {
    NeedsDate {
        title: String,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        reminder: Option<ReminderLead>,
    },
    NeedsTime {
        title: String,
        date: NaiveDate,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        reminder: Option<ReminderLead>,
    },
    NeedsCategory {
        title: String,
        date: NaiveDate,
        #[serde(default)]
        time: Option<TimeOfDay>,
        #[serde(default)]
        reminder: Option<ReminderLead>,
    },
    NeedsReminder {
        title: String,
        date: NaiveDate,
        #[serde(default)]
        time: Option<TimeOfDay>,
        #[serde(default)]
        category: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "missing", rename_all = "snake_case")]
pub enum ScheduleContext {
    NeedsDays {
        title: String,
        #[serde(default)]
        start: Option<TimeOfDay>,
        #[serde(default)]
        end: Option<TimeOfDay>,
        #[serde(default)]
        duration_secs: Option<u32>,
    },
    NeedsStartTime {
        title: String,
        days: BTreeSet<Weekday>,
    },
    NeedsEndTime {
        title: String,
        days: BTreeSet<Weekday>,
        start: TimeOfDay,
    },
    NeedsReminder {
        title: String,
        days: BTreeSet<Weekday>,
        #[serde(default)]
        start: Option<TimeOfDay>,
        #[serde(default)]
        end: Option<TimeOfDay>,
        #[serde(default)]
        duration_secs: Option<u32>,
    },
    NeedsColor {
        title: String,
        days: BTreeSet<Weekday>,
        #[serde(default)]
        start: Option<TimeOfDay>,
        #[serde(default)]
        end: Option<TimeOfDay>,
        #[serde(default)]
        duration_secs: Option<u32>,
        reminder: ReminderLead,
    },
}
