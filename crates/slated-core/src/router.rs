//! Ordered rule cascade over the intent classifiers. Signals are computed
//! once per input; each rule's predicate gates whether its classifier is
//! even attempted, and the first classifier to commit wins.

use slated_schema::ParseOutcome;

use crate::classify::{self, GradeConfidence};
use crate::extract;
use crate::ParseRequest;

/// Cheap whole-input features the rule predicates branch on.
pub(crate) struct Signals {
    pub has_every: bool,
    pub grade_pattern: bool,
    pub datetime_ref: bool,
}

impl Signals {
    pub(crate) fn compute(raw: &str, lower: &str) -> Self {
        Signals {
            has_every: extract::contains_word(lower, "every"),
            grade_pattern: extract::has_grade_pattern(raw),
            datetime_ref: extract::has_datetime_reference(lower),
        }
    }
}

struct Rule {
    name: &'static str,
    applies: fn(&Signals) -> bool,
    run: fn(&ParseRequest) -> Option<ParseOutcome>,
}

fn run_schedule(req: &ParseRequest) -> Option<ParseOutcome> {
    classify::try_schedule(req)
}

fn run_grade_confident(req: &ParseRequest) -> Option<ParseOutcome> {
    classify::try_grade(req, GradeConfidence::Confident)
}

fn run_grade_conservative(req: &ParseRequest) -> Option<ParseOutcome> {
    classify::try_grade(req, GradeConfidence::Conservative)
}

fn run_event(req: &ParseRequest) -> Option<ParseOutcome> {
    classify::try_event(req)
}

fn run_event_then_schedule(req: &ParseRequest) -> Option<ParseOutcome> {
    classify::try_event(req).or_else(|| classify::try_schedule(req))
}

const RULES: &[Rule] = &[
    Rule {
        name: "recurring_schedule",
        applies: |s| s.has_every,
        run: run_schedule,
    },
    Rule {
        name: "grade_confident",
        applies: |s| s.grade_pattern,
        run: run_grade_confident,
    },
    Rule {
        name: "dated_event",
        applies: |s| s.datetime_ref && !s.has_every,
        run: run_event,
    },
    Rule {
        name: "dated_event_or_schedule",
        applies: |s| s.datetime_ref && !s.has_every,
        run: run_event_then_schedule,
    },
    Rule {
        name: "grade_conservative",
        applies: |s| !s.has_every,
        run: run_grade_conservative,
    },
    Rule {
        name: "undated_event_or_schedule",
        applies: |s| !s.has_every && !s.datetime_ref,
        run: run_event_then_schedule,
    },
];

pub(crate) fn route(req: &ParseRequest) -> ParseOutcome {
    let signals = Signals::compute(req.raw, req.lower);
    for rule in RULES {
        if !(rule.applies)(&signals) {
            continue;
        }
        if let Some(outcome) = (rule.run)(req) {
            tracing::debug!(rule = rule.name, "rule matched");
            return outcome;
        }
        tracing::debug!(rule = rule.name, "classifier declined");
    }
    tracing::debug!("no rule matched");
    ParseOutcome::Unrecognized {
        original_input: req.raw.to_string(),
    }
}
