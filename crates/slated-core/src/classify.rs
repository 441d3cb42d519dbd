//! Intent classifiers. Each one either declines (returns `None`, letting the
//! router try its next rule) or commits and walks a linear slot-filling
//! chain: it pulls every field it can from the initial input and returns a
//! `NeedsMoreInfo` for the first still-missing required field, or the
//! finished action when nothing is missing.
//!
//! The `*_next` chain functions are shared with the follow-up resolver so a
//! slot filled on any turn advances through exactly the same order.

use slated_schema::{
    Category, Course, EventContext, GradeContext, ParseOutcome, ParsedEvent, ParsedGrade,
    ReminderLead, ScheduleContext, SlotContext, TimeOfDay, Weekday,
};

use crate::extract;
use crate::prompts;
use crate::title::{self, TitleKind};
use crate::ParseRequest;

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// How eagerly the grade classifier commits. The router uses `Confident`
/// when an unambiguous grade pattern was detected and `Conservative` as a
/// late fallback rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GradeConfidence {
    Confident,
    Conservative,
}

/// Evidence that an utterance is about a one-off event at all; without a
/// date/time reference or one of these, the event classifier declines.
const EVENT_KEYWORDS: &[&str] = &[
    "remind", "meeting", "appointment", "due", "deadline", "submit", "attend", "visit",
    "call", "email", "buy", "pay", "study", "review", "interview", "party", "dinner",
    "lunch", "doctor", "dentist", "event", "essay", "homework",
];

const SCHEDULE_KEYWORDS: &[&str] = &[
    "class", "course", "lecture", "weekly", "recurring", "schedule",
];

/// Keyword→category inference used only when the caller supplied no
/// category list to match against.
const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("class", "Academics"),
    ("exam", "Academics"),
    ("test", "Academics"),
    ("quiz", "Academics"),
    ("homework", "Academics"),
    ("essay", "Academics"),
    ("study", "Academics"),
    ("lecture", "Academics"),
    ("assignment", "Academics"),
    ("gym", "Fitness"),
    ("workout", "Fitness"),
    ("practice", "Fitness"),
    ("training", "Fitness"),
    ("doctor", "Health"),
    ("dentist", "Health"),
    ("checkup", "Health"),
    ("pay", "Finance"),
    ("bank", "Finance"),
    ("rent", "Finance"),
    ("bill", "Finance"),
    ("buy", "Errands"),
    ("groceries", "Errands"),
    ("errand", "Errands"),
    ("meeting", "Work"),
    ("shift", "Work"),
    ("interview", "Work"),
];

pub(crate) fn category_names(categories: &[Category]) -> Vec<String> {
    categories.iter().map(|c| c.name.clone()).collect()
}

pub(crate) fn course_names(courses: &[Course]) -> Vec<String> {
    courses.iter().map(|c| c.name.clone()).collect()
}

fn infer_category(lower: &str) -> Option<String> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| extract::contains_word(lower, keyword))
        .map(|(_, category)| (*category).to_string())
}

/// Mint a conversation and wrap a prompt+context into `NeedsMoreInfo`.
pub(crate) fn needs_more_info(
    req: &ParseRequest,
    prompt: String,
    context: SlotContext,
) -> ParseOutcome {
    let id = req.conversations.begin(req.now);
    ParseOutcome::NeedsMoreInfo {
        prompt,
        original_input: req.raw.to_string(),
        context: Some(context),
        conversation_id: Some(id),
    }
}

pub(crate) fn try_event(req: &ParseRequest) -> Option<ParseOutcome> {
    let lower = req.lower;
    let has_ref = extract::has_datetime_reference(lower);
    if !has_ref && !EVENT_KEYWORDS.iter().any(|w| extract::contains_word(lower, w)) {
        return None;
    }
    tracing::debug!("event classifier committed");

    let title = title::extract(req.raw, TitleKind::Event);
    let names = category_names(req.categories);
    let category = extract::best_match(lower, &names)
        .or_else(|| req.categories.is_empty().then(|| infer_category(lower)).flatten());
    let reminder = extract::reminder(lower, false);

    let Some(date) = extract::date(lower, req.today) else {
        let prompt = prompts::ask_event_date(&title);
        return Some(needs_more_info(
            req,
            prompt,
            SlotContext::Event(EventContext::NeedsDate {
                title,
                category,
                reminder,
            }),
        ));
    };

    let time = extract::time(lower);
    let all_day = lower.contains("all day");
    Some(event_next(req, title, date, time, all_day, category, reminder))
}

/// The event chain after a date is known: time → category → reminder →
/// done. Shared between the initial pass and the follow-up resolver.
pub(crate) fn event_next(
    req: &ParseRequest,
    title: String,
    date: NaiveDate,
    time: Option<TimeOfDay>,
    all_day: bool,
    category: Option<String>,
    reminder: Option<ReminderLead>,
) -> ParseOutcome {
    if time.is_none() && !all_day {
        let prompt = prompts::ask_event_time(&title);
        return needs_more_info(
            req,
            prompt,
            SlotContext::Event(EventContext::NeedsTime {
                title,
                date,
                category,
                reminder,
            }),
        );
    }
    if category.is_none() && !req.categories.is_empty() {
        let names = category_names(req.categories);
        let prompt = prompts::ask_event_category(&title, &names, req.config.max_shown_options);
        return needs_more_info(
            req,
            prompt,
            SlotContext::Event(EventContext::NeedsCategory {
                title,
                date,
                time,
                reminder,
            }),
        );
    }
    if reminder.is_none() {
        let prompt = prompts::ask_event_reminder(&title);
        return needs_more_info(
            req,
            prompt,
            SlotContext::Event(EventContext::NeedsReminder {
                title,
                date,
                time,
                category,
            }),
        );
    }
    ParseOutcome::Event(ParsedEvent {
        title,
        date: Some(date),
        time,
        all_day,
        category_name: category,
        reminder,
    })
}

pub(crate) fn try_schedule(req: &ParseRequest) -> Option<ParseOutcome> {
    let lower = req.lower;
    let has_every = extract::contains_word(lower, "every");
    let has_keyword = SCHEDULE_KEYWORDS.iter().any(|w| extract::contains_word(lower, w));
    let range = extract::time_range(lower);
    let days = extract::days(lower);
    if !has_every && !has_keyword && !(days.is_some() && range.is_some()) {
        return None;
    }
    tracing::debug!("schedule classifier committed");

    let title = title::extract(req.raw, TitleKind::Schedule);
    let (start, end) = match range {
        Some((start, end)) => (Some(start), Some(end)),
        None => (extract::time(lower), None),
    };
    let duration_secs = extract::duration(lower, false);

    let Some(days) = days else {
        let prompt = prompts::ask_days(&title);
        return Some(needs_more_info(
            req,
            prompt,
            SlotContext::Schedule(ScheduleContext::NeedsDays {
                title,
                start,
                end,
                duration_secs,
            }),
        ));
    };
    Some(schedule_next(req, title, days, start, end, duration_secs))
}

/// The schedule chain after days are known: start → end-or-duration →
/// reminder. The reminder question is always asked, even when a lead was
/// already extractable, because color is only reachable after it.
pub(crate) fn schedule_next(
    req: &ParseRequest,
    title: String,
    days: BTreeSet<Weekday>,
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
    duration_secs: Option<u32>,
) -> ParseOutcome {
    let Some(start) = start else {
        let prompt = prompts::ask_start_time(&title);
        return needs_more_info(
            req,
            prompt,
            SlotContext::Schedule(ScheduleContext::NeedsStartTime { title, days }),
        );
    };
    if end.is_none() && duration_secs.is_none() {
        let prompt = prompts::ask_end_time(&title);
        return needs_more_info(
            req,
            prompt,
            SlotContext::Schedule(ScheduleContext::NeedsEndTime { title, days, start }),
        );
    }
    let prompt = prompts::ask_schedule_reminder(&title);
    needs_more_info(
        req,
        prompt,
        SlotContext::Schedule(ScheduleContext::NeedsReminder {
            title,
            days,
            start: Some(start),
            end,
            duration_secs,
        }),
    )
}

pub(crate) fn try_grade(req: &ParseRequest, confidence: GradeConfidence) -> Option<ParseOutcome> {
    let lower = req.lower;
    let pattern = extract::has_grade_pattern(req.raw);
    let keyword = extract::has_grade_keyword(lower);
    let confident = confidence == GradeConfidence::Confident;
    if !pattern && !keyword && !confident {
        return None;
    }
    // In conservative mode a date reference without an actual grade pattern
    // reads as something else (an event); leave it to the other rules.
    if !confident && !pattern && extract::has_datetime_reference(lower) {
        return None;
    }
    tracing::debug!(confident, "grade classifier committed");

    let names = course_names(req.courses);
    let course = extract::best_match(lower, &names);
    let assignment = extract::assignment(lower);

    let Some(grade) = extract::grade(req.raw, false) else {
        return Some(needs_more_info(
            req,
            prompts::ask_grade_value(),
            SlotContext::Grade(GradeContext::NeedsGrade { course, assignment }),
        ));
    };
    let weight = extract::weight(lower, false);
    Some(grade_next(req, course, assignment, grade, weight))
}

/// The grade chain after the value is known: course → assignment → weight.
pub(crate) fn grade_next(
    req: &ParseRequest,
    course: Option<String>,
    assignment: Option<String>,
    grade: String,
    weight: Option<f64>,
) -> ParseOutcome {
    let Some(course) = course else {
        let names = course_names(req.courses);
        let prompt = prompts::ask_course(&names, req.config.max_shown_options);
        return needs_more_info(
            req,
            prompt,
            SlotContext::Grade(GradeContext::NeedsCourse { assignment, grade }),
        );
    };
    let Some(assignment) = assignment else {
        return needs_more_info(
            req,
            prompts::ask_assignment(),
            SlotContext::Grade(GradeContext::NeedsAssignmentName { course, grade }),
        );
    };
    match weight {
        Some(weight) => ParseOutcome::Grade(ParsedGrade {
            course_name: course,
            assignment_name: assignment,
            grade,
            weight: Some(weight),
        }),
        None => needs_more_info(
            req,
            prompts::ask_weight(),
            SlotContext::Grade(GradeContext::NeedsWeight {
                course,
                assignment,
                grade,
            }),
        ),
    }
}
