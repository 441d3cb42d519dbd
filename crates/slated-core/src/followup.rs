//! Resolves a clarification reply against the slot context carried in the
//! previous `NeedsMoreInfo`. Replies are interpreted more leniently than
//! fresh input (a standalone number answers a weight question, a bare hour
//! answers a time question) because the question fixes what the words mean.
//! Extraction failures re-ask the same question with a short apology.

use slated_schema::{
    EventContext, GradeContext, ParseOutcome, ParsedGrade, ParsedScheduleItem, ScheduleContext,
    SlotContext, TimeOfDay,
};

use crate::classify;
use crate::extract;
use crate::prompts;
use crate::title;
use crate::ParseRequest;

/// Replies that decline an optional slot (weight, color).
const SKIP_WORDS: &[&str] = &["skip", "none", "no", "no weight", "no color"];

fn is_skip(lower: &str) -> bool {
    let trimmed = lower.trim();
    SKIP_WORDS.iter().any(|w| *w == trimmed)
}

fn is_cancellation(lower: &str) -> bool {
    lower.contains("cancel") || lower.contains("nevermind") || lower.contains("never mind")
}

/// A reply to a time question may be a bare hour ("9"), which would never
/// parse as a time in free text.
fn direct_time(lower: &str) -> Option<TimeOfDay> {
    extract::time(lower)
        .or_else(|| lower.trim().parse::<u8>().ok().and_then(|h| TimeOfDay::new(h, 0)))
}

fn retry(req: &ParseRequest, prompt: String, context: SlotContext) -> ParseOutcome {
    classify::needs_more_info(req, prompts::clarify(&prompt), context)
}

pub(crate) fn resolve(req: &ParseRequest, context: SlotContext) -> ParseOutcome {
    if is_cancellation(req.lower) {
        tracing::debug!("clarification cancelled");
        return ParseOutcome::Unrecognized {
            original_input: "Cancelled".to_string(),
        };
    }
    match context {
        SlotContext::Grade(ctx) => resolve_grade(req, ctx),
        SlotContext::Event(ctx) => resolve_event(req, ctx),
        SlotContext::Schedule(ctx) => resolve_schedule(req, ctx),
    }
}

fn resolve_grade(req: &ParseRequest, ctx: GradeContext) -> ParseOutcome {
    match ctx {
        GradeContext::NeedsGrade { course, assignment } => {
            match extract::grade(req.raw, true) {
                Some(grade) => {
                    let course = course
                        .or_else(|| extract::best_match(req.lower, &classify::course_names(req.courses)));
                    let assignment = assignment.or_else(|| extract::assignment(req.lower));
                    let weight = extract::weight(req.lower, false);
                    classify::grade_next(req, course, assignment, grade, weight)
                }
                None => retry(
                    req,
                    prompts::ask_grade_value(),
                    SlotContext::Grade(GradeContext::NeedsGrade { course, assignment }),
                ),
            }
        }
        GradeContext::NeedsCourse { assignment, grade } => {
            let names = classify::course_names(req.courses);
            let mut course = extract::best_match(req.lower, &names);
            // With no course list to match against, take the reply verbatim.
            if course.is_none() && names.is_empty() {
                let reply = req.raw.trim();
                if !reply.is_empty() {
                    course = Some(title::title_case(reply));
                }
            }
            match course {
                Some(course) => {
                    let assignment = assignment.or_else(|| extract::assignment(req.lower));
                    let weight = extract::weight(req.lower, false);
                    classify::grade_next(req, Some(course), assignment, grade, weight)
                }
                None => {
                    let prompt = prompts::ask_course(&names, req.config.max_shown_options);
                    retry(
                        req,
                        prompt,
                        SlotContext::Grade(GradeContext::NeedsCourse { assignment, grade }),
                    )
                }
            }
        }
        GradeContext::NeedsAssignmentName { course, grade } => {
            let reply = req.raw.trim();
            let assignment = extract::assignment(req.lower)
                .or_else(|| (!reply.is_empty()).then(|| title::title_case(reply)));
            match assignment {
                Some(assignment) => {
                    let weight = extract::weight(req.lower, false);
                    classify::grade_next(req, Some(course), Some(assignment), grade, weight)
                }
                None => retry(
                    req,
                    prompts::ask_assignment(),
                    SlotContext::Grade(GradeContext::NeedsAssignmentName { course, grade }),
                ),
            }
        }
        GradeContext::NeedsWeight {
            course,
            assignment,
            grade,
        } => {
            if is_skip(req.lower) {
                return ParseOutcome::Grade(ParsedGrade {
                    course_name: course,
                    assignment_name: assignment,
                    grade,
                    weight: None,
                });
            }
            match extract::weight(req.lower, true) {
                Some(weight) => ParseOutcome::Grade(ParsedGrade {
                    course_name: course,
                    assignment_name: assignment,
                    grade,
                    weight: Some(weight),
                }),
                None => retry(
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
    }
}

fn resolve_event(req: &ParseRequest, ctx: EventContext) -> ParseOutcome {
    match ctx {
        EventContext::NeedsDate {
            title,
            category,
            reminder,
        } => match extract::date(req.lower, req.today) {
            Some(date) => {
                let time = extract::time(req.lower);
                let all_day = req.lower.contains("all day");
                let reminder = reminder.or_else(|| extract::reminder(req.lower, false));
                classify::event_next(req, title, date, time, all_day, category, reminder)
            }
            None => {
                let prompt = prompts::ask_event_date(&title);
                retry(
                    req,
                    prompt,
                    SlotContext::Event(EventContext::NeedsDate {
                        title,
                        category,
                        reminder,
                    }),
                )
            }
        },
        EventContext::NeedsTime {
            title,
            date,
            category,
            reminder,
        } => {
            if req.lower.contains("all day") {
                return classify::event_next(req, title, date, None, true, category, reminder);
            }
            match direct_time(req.lower) {
                Some(time) => {
                    classify::event_next(req, title, date, Some(time), false, category, reminder)
                }
                None => {
                    let prompt = prompts::ask_event_time(&title);
                    retry(
                        req,
                        prompt,
                        SlotContext::Event(EventContext::NeedsTime {
                            title,
                            date,
                            category,
                            reminder,
                        }),
                    )
                }
            }
        }
        EventContext::NeedsCategory {
            title,
            date,
            time,
            reminder,
        } => {
            let names = classify::category_names(req.categories);
            match extract::best_match(req.lower, &names) {
                Some(category) => {
                    // A missing time here means the event was all-day.
                    let all_day = time.is_none();
                    classify::event_next(req, title, date, time, all_day, Some(category), reminder)
                }
                None => {
                    let prompt =
                        prompts::ask_event_category(&title, &names, req.config.max_shown_options);
                    retry(
                        req,
                        prompt,
                        SlotContext::Event(EventContext::NeedsCategory {
                            title,
                            date,
                            time,
                            reminder,
                        }),
                    )
                }
            }
        }
        EventContext::NeedsReminder {
            title,
            date,
            time,
            category,
        } => match extract::reminder(req.lower, true) {
            Some(reminder) => {
                let all_day = time.is_none();
                classify::event_next(req, title, date, time, all_day, category, Some(reminder))
            }
            None => {
                let prompt = prompts::ask_event_reminder(&title);
                retry(
                    req,
                    prompt,
                    SlotContext::Event(EventContext::NeedsReminder {
                        title,
                        date,
                        time,
                        category,
                    }),
                )
            }
        },
    }
}

fn resolve_schedule(req: &ParseRequest, ctx: ScheduleContext) -> ParseOutcome {
    match ctx {
        ScheduleContext::NeedsDays {
            title,
            start,
            end,
            duration_secs,
        } => match extract::days(req.lower) {
            Some(days) => {
                let (start, end) = match extract::time_range(req.lower) {
                    Some((s, e)) => (Some(s), Some(e)),
                    None => (start.or_else(|| extract::time(req.lower)), end),
                };
                let duration_secs = duration_secs.or_else(|| extract::duration(req.lower, false));
                classify::schedule_next(req, title, days, start, end, duration_secs)
            }
            None => {
                let prompt = prompts::ask_days(&title);
                retry(
                    req,
                    prompt,
                    SlotContext::Schedule(ScheduleContext::NeedsDays {
                        title,
                        start,
                        end,
                        duration_secs,
                    }),
                )
            }
        },
        ScheduleContext::NeedsStartTime { title, days } => {
            if let Some((start, end)) = extract::time_range(req.lower) {
                return classify::schedule_next(req, title, days, Some(start), Some(end), None);
            }
            match direct_time(req.lower) {
                Some(start) => {
                    let duration_secs = extract::duration(req.lower, false);
                    classify::schedule_next(req, title, days, Some(start), None, duration_secs)
                }
                None => {
                    let prompt = prompts::ask_start_time(&title);
                    retry(
                        req,
                        prompt,
                        SlotContext::Schedule(ScheduleContext::NeedsStartTime { title, days }),
                    )
                }
            }
        }
        ScheduleContext::NeedsEndTime { title, days, start } => {
            let end = direct_time(req.lower);
            let duration_secs = extract::duration(req.lower, true);
            if end.is_none() && duration_secs.is_none() {
                let prompt = prompts::ask_end_time(&title);
                return retry(
                    req,
                    prompt,
                    SlotContext::Schedule(ScheduleContext::NeedsEndTime { title, days, start }),
                );
            }
            classify::schedule_next(req, title, days, Some(start), end, duration_secs)
        }
        ScheduleContext::NeedsReminder {
            title,
            days,
            start,
            end,
            duration_secs,
        } => match extract::reminder(req.lower, true) {
            Some(reminder) => {
                let prompt = prompts::ask_color(&title);
                classify::needs_more_info(
                    req,
                    prompt,
                    SlotContext::Schedule(ScheduleContext::NeedsColor {
                        title,
                        days,
                        start,
                        end,
                        duration_secs,
                        reminder,
                    }),
                )
            }
            None => {
                let prompt = prompts::ask_schedule_reminder(&title);
                retry(
                    req,
                    prompt,
                    SlotContext::Schedule(ScheduleContext::NeedsReminder {
                        title,
                        days,
                        start,
                        end,
                        duration_secs,
                    }),
                )
            }
        },
        ScheduleContext::NeedsColor {
            title,
            days,
            start,
            end,
            duration_secs,
            reminder,
        } => {
            if is_skip(req.lower) {
                return ParseOutcome::Schedule(ParsedScheduleItem {
                    title,
                    days,
                    start_time: start,
                    end_time: end,
                    duration_secs,
                    reminder: Some(reminder),
                    color_hex: None,
                });
            }
            match extract::color(req.lower) {
                Some(color) => ParseOutcome::Schedule(ParsedScheduleItem {
                    title,
                    days,
                    start_time: start,
                    end_time: end,
                    duration_secs,
                    reminder: Some(reminder),
                    color_hex: Some(color),
                }),
                None => {
                    let prompt = prompts::ask_color(&title);
                    retry(
                        req,
                        prompt,
                        SlotContext::Schedule(ScheduleContext::NeedsColor {
                            title,
                            days,
                            start,
                            end,
                            duration_secs,
                            reminder,
                        }),
                    )
                }
            }
        }
    }
}
