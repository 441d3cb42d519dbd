//! End-to-end multi-turn dialogues: one line of free text in, follow-up
//! replies until a finished event, schedule item, or grade comes out.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use slated_core::{
    Category, Course, Interpreter, ParseOutcome, ReminderLead, SlotContext, TimeOfDay, Weekday,
};
use uuid::Uuid;

// 2026-09-02 is a Wednesday.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 2, 12, 0, 0).unwrap()
}

fn needs_more_info(outcome: ParseOutcome) -> (String, SlotContext, Option<Uuid>) {
    match outcome {
        ParseOutcome::NeedsMoreInfo {
            prompt,
            context: Some(context),
            conversation_id,
            ..
        } => (prompt, context, conversation_id),
        other => panic!("expected a clarification, got {other:?}"),
    }
}

#[test]
fn one_shot_event_with_inferred_category() {
    let interp = Interpreter::new();
    let outcome = interp.parse_at("remind me to submit essay tomorrow at 3pm", &[], &[], now());
    match outcome {
        ParseOutcome::Event(event) => {
            assert_eq!(event.title, "Submit Essay");
            assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 9, 3));
            assert_eq!(event.time, TimeOfDay::new(15, 0));
            assert!(!event.all_day);
            assert_eq!(event.category_name.as_deref(), Some("Academics"));
            assert_eq!(event.reminder, Some(ReminderLead::Minutes15));
        }
        other => panic!("expected a finished event, got {other:?}"),
    }
}

#[test]
fn event_asks_for_category_when_a_list_is_supplied() {
    let interp = Interpreter::new();
    let categories = [Category::new("School"), Category::new("Personal")];
    let outcome = interp.parse_at(
        "remind me to submit essay tomorrow at 3pm",
        &categories,
        &[],
        now(),
    );
    let (prompt, context, id) = needs_more_info(outcome);
    assert!(prompt.contains("School"));
    assert!(matches!(context, SlotContext::Event(_)));

    let outcome = interp.parse_follow_up_at("school", context, id, &categories, &[], now());
    match outcome {
        ParseOutcome::Event(event) => {
            assert_eq!(event.title, "Submit Essay");
            assert_eq!(event.category_name.as_deref(), Some("School"));
            assert_eq!(event.reminder, Some(ReminderLead::Minutes15));
        }
        other => panic!("expected a finished event, got {other:?}"),
    }
}

#[test]
fn all_day_event_dialogue() {
    let interp = Interpreter::new();
    let outcome = interp.parse_at("dentist appointment tomorrow", &[], &[], now());
    let (_, context, id) = needs_more_info(outcome);

    let outcome = interp.parse_follow_up_at("all day", context, id, &[], &[], now());
    let (_, context, id) = needs_more_info(outcome);

    let outcome = interp.parse_follow_up_at("no", context, id, &[], &[], now());
    match outcome {
        ParseOutcome::Event(event) => {
            assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 9, 3));
            assert!(event.all_day);
            assert_eq!(event.time, None);
            assert_eq!(event.category_name.as_deref(), Some("Health"));
            assert_eq!(event.reminder, Some(ReminderLead::None));
        }
        other => panic!("expected a finished event, got {other:?}"),
    }
}

#[test]
fn grade_resolves_course_abbreviation_then_asks_for_weight() {
    let interp = Interpreter::new();
    let courses = [Course::new("Calculus I")];
    let outcome = interp.parse_at("got 92% on calc midterm", &[], &courses, now());
    let (prompt, context, id) = needs_more_info(outcome);
    assert!(prompt.to_lowercase().contains("weight"));

    let outcome = interp.parse_follow_up_at("skip", context, id, &[], &courses, now());
    match outcome {
        ParseOutcome::Grade(grade) => {
            assert_eq!(grade.course_name, "Calculus I");
            assert_eq!(grade.assignment_name, "Midterm");
            assert_eq!(grade.grade, "92%");
            assert_eq!(grade.weight, None);
        }
        other => panic!("expected a finished grade, got {other:?}"),
    }
}

#[test]
fn grade_chain_fills_every_slot_in_order() {
    let interp = Interpreter::new();
    let outcome = interp.parse_at("got a 92 on the bio quiz", &[], &[], now());
    let (prompt, context, id) = needs_more_info(outcome);
    assert!(prompt.to_lowercase().contains("course"));

    // No course list was supplied, so the reply is taken verbatim.
    let outcome = interp.parse_follow_up_at("biology", context, id, &[], &[], now());
    let (_, context, id) = needs_more_info(outcome);

    let outcome = interp.parse_follow_up_at("20%", context, id, &[], &[], now());
    match outcome {
        ParseOutcome::Grade(grade) => {
            assert_eq!(grade.course_name, "Biology");
            assert_eq!(grade.assignment_name, "Quiz");
            assert_eq!(grade.grade, "92%");
            assert_eq!(grade.weight, Some(20.0));
        }
        other => panic!("expected a finished grade, got {other:?}"),
    }
}

#[test]
fn schedule_dialogue_ends_with_reminder_and_color() {
    let interp = Interpreter::new();
    let outcome = interp.parse_at("math class every mwf from 9am to 10:15am", &[], &[], now());
    let (prompt, context, id) = needs_more_info(outcome);
    assert!(prompt.to_lowercase().contains("remind"));
    match &context {
        SlotContext::Schedule(_) => {}
        other => panic!("expected a schedule context, got {other:?}"),
    }

    let outcome = interp.parse_follow_up_at("15 minutes before", context, id, &[], &[], now());
    let (prompt, context, id) = needs_more_info(outcome);
    assert!(prompt.to_lowercase().contains("color"));

    let outcome = interp.parse_follow_up_at("blue", context, id, &[], &[], now());
    match outcome {
        ParseOutcome::Schedule(item) => {
            assert_eq!(item.title, "Math");
            let days: Vec<Weekday> = item.days.iter().copied().collect();
            assert_eq!(
                days,
                vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
            );
            assert_eq!(item.start_time, TimeOfDay::new(9, 0));
            assert_eq!(item.end_time, TimeOfDay::new(10, 15));
            assert_eq!(item.duration_secs, None);
            assert_eq!(item.reminder, Some(ReminderLead::Minutes15));
            assert_eq!(item.color_hex.as_deref(), Some("#007AFF"));
        }
        other => panic!("expected a finished schedule item, got {other:?}"),
    }
}

#[test]
fn schedule_accepts_duration_instead_of_end_time() {
    let interp = Interpreter::new();
    let outcome = interp.parse_at("gym every tuesday and thursday at 6pm", &[], &[], now());
    let (prompt, context, id) = needs_more_info(outcome);
    assert!(prompt.to_lowercase().contains("end"));

    let outcome = interp.parse_follow_up_at("1 hour", context, id, &[], &[], now());
    let (_, context, id) = needs_more_info(outcome);

    let outcome = interp.parse_follow_up_at("none", context, id, &[], &[], now());
    let (_, context, id) = needs_more_info(outcome);

    let outcome = interp.parse_follow_up_at("skip", context, id, &[], &[], now());
    match outcome {
        ParseOutcome::Schedule(item) => {
            assert_eq!(item.title, "Gym");
            let days: Vec<Weekday> = item.days.iter().copied().collect();
            assert_eq!(days, vec![Weekday::Tuesday, Weekday::Thursday]);
            assert_eq!(item.start_time, TimeOfDay::new(18, 0));
            assert_eq!(item.end_time, None);
            assert_eq!(item.duration_secs, Some(3600));
            assert_eq!(item.reminder, Some(ReminderLead::None));
            assert_eq!(item.color_hex, None);
        }
        other => panic!("expected a finished schedule item, got {other:?}"),
    }
}

#[test]
fn unparseable_reply_reasks_the_same_question() {
    let interp = Interpreter::new();
    let outcome = interp.parse_at("study group friday", &[], &[], now());
    let (first_prompt, context, id) = needs_more_info(outcome);

    let outcome = interp.parse_follow_up_at("hmm not sure", context, id, &[], &[], now());
    let (retry_prompt, _, _) = needs_more_info(outcome);
    assert!(retry_prompt.starts_with("Sorry, I didn't catch that."));
    assert!(retry_prompt.contains(&first_prompt));
}

#[test]
fn empty_input_is_not_attempted() {
    let interp = Interpreter::new();
    assert!(matches!(
        interp.parse_at("", &[], &[], now()),
        ParseOutcome::NotAttempted
    ));
}
