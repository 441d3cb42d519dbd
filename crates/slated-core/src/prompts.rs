//! Fixed prompt templates for `NeedsMoreInfo`, plus the option-list
//! truncation applied when a prompt enumerates stored names.

/// "A, B, C, D, E, ..." with at most `max` names shown.
pub(crate) fn list_options(names: &[String], max: usize) -> String {
    let shown: Vec<&str> = names.iter().take(max).map(String::as_str).collect();
    let mut out = shown.join(", ");
    if names.len() > max {
        out.push_str(", ...");
    }
    out
}

/// Re-prompt wrapper used when a follow-up answer failed to extract.
pub(crate) fn clarify(prompt: &str) -> String {
    format!("Sorry, I didn't catch that. {prompt}")
}

pub(crate) fn ask_event_date(title: &str) -> String {
    format!("When is \"{title}\"? (e.g. tomorrow, friday, march 5)")
}

pub(crate) fn ask_event_time(title: &str) -> String {
    format!("What time is \"{title}\"? Say a time like 3pm, or \"all day\".")
}

pub(crate) fn ask_event_category(title: &str, categories: &[String], max: usize) -> String {
    format!(
        "Which category should \"{title}\" go in? Available: {}",
        list_options(categories, max)
    )
}

pub(crate) fn ask_event_reminder(title: &str) -> String {
    format!("Do you want a reminder for \"{title}\"? (e.g. 15 minutes before, or \"no\")")
}

pub(crate) fn ask_grade_value() -> String {
    "What grade did you get? (e.g. 92%, A-, 18/20)".to_string()
}

pub(crate) fn ask_course(courses: &[String], max: usize) -> String {
    if courses.is_empty() {
        "Which course is this grade for?".to_string()
    } else {
        format!(
            "Which course is this grade for? Available: {}",
            list_options(courses, max)
        )
    }
}

pub(crate) fn ask_assignment() -> String {
    "What's the assignment called? (e.g. Midterm, Quiz 3)".to_string()
}

pub(crate) fn ask_weight() -> String {
    "What's the weight of this grade? Say a percent, or \"skip\".".to_string()
}

pub(crate) fn ask_days(title: &str) -> String {
    format!("Which days does \"{title}\" repeat? (e.g. mwf, tth, monday and thursday)")
}

pub(crate) fn ask_start_time(title: &str) -> String {
    format!("What time does \"{title}\" start?")
}

pub(crate) fn ask_end_time(title: &str) -> String {
    format!("When does \"{title}\" end? Say an end time or a length like \"90 minutes\".")
}

pub(crate) fn ask_schedule_reminder(title: &str) -> String {
    format!("Do you want a reminder before \"{title}\"? (e.g. 15 minutes, or \"no\")")
}

pub(crate) fn ask_color(title: &str) -> String {
    format!("What color should \"{title}\" be? A name like blue, a hex code, or \"skip\".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_list_truncates_at_max() {
        let names: Vec<String> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(list_options(&names, 5), "A, B, C, D, E, ...");
        assert_eq!(list_options(&names[..3], 5), "A, B, C");
    }

    #[test]
    fn clarify_prefixes_the_prompt() {
        let prompt = ask_weight();
        let again = clarify(&prompt);
        assert!(again.starts_with("Sorry, I didn't catch that."));
        assert!(again.contains(&prompt));
    }
}
