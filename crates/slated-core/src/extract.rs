//! Field extractors: stateless functions that scan normalized input text and
//! return an optional typed value. Each one returns `None` on malformed input
//! rather than erroring, and none of them share state.
//!
//! Unless noted otherwise the functions expect the lower-cased, trimmed copy
//! of the user's input. [`grade`] takes the raw input because letter grades
//! are only recognized in upper case.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use slated_schema::{ReminderLead, TimeOfDay, Weekday};

pub(crate) const WEEKDAY_TOKENS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Monday),
    ("mon", Weekday::Monday),
    ("tuesday", Weekday::Tuesday),
    ("tues", Weekday::Tuesday),
    ("tue", Weekday::Tuesday),
    ("wednesday", Weekday::Wednesday),
    ("wed", Weekday::Wednesday),
    ("thursday", Weekday::Thursday),
    ("thurs", Weekday::Thursday),
    ("thur", Weekday::Thursday),
    ("thu", Weekday::Thursday),
    ("friday", Weekday::Friday),
    ("fri", Weekday::Friday),
    ("saturday", Weekday::Saturday),
    ("sat", Weekday::Saturday),
    ("sunday", Weekday::Sunday),
    ("sun", Weekday::Sunday),
];

pub(crate) const MONTH_TOKENS: &[&str] = &[
    "january", "jan", "february", "feb", "march", "mar", "april", "apr", "may", "june",
    "jun", "july", "jul", "august", "aug", "september", "sept", "sep", "october", "oct",
    "november", "nov", "december", "dec",
];

const RELATIVE_DATE_TOKENS: &[&str] = &[
    "today", "tdy", "tonight", "tomorrow", "tmrw", "tmr", "noon", "midnight",
];

const GRADE_KEYWORDS: &[&str] = &[
    "test", "quiz", "exam", "assignment", "grade", "score", "got", "received",
];

const ASSIGNMENT_KEYWORDS: &[&str] = &[
    "midterm", "final", "exam", "quiz", "test", "project", "presentation", "report",
    "paper", "portfolio", "lab", "essay", "homework", "hw", "assignment",
];

/// Course-abbreviation table for the best-match fallback: if the input
/// contains one of these tokens, a stored name containing it matches.
const COURSE_ABBREVIATIONS: &[&str] = &[
    "math", "calc", "calculus", "algebra", "geometry", "physics", "phys", "chem",
    "bio", "econ", "psych", "stat", "hist", "comp", "cs", "eng", "lit", "philo",
    "soc", "anthro", "astro",
];

const COLOR_TABLE: &[(&str, &str)] = &[
    ("red", "#FF3B30"),
    ("orange", "#FF9500"),
    ("yellow", "#FFCC00"),
    ("green", "#34C759"),
    ("teal", "#30B0C7"),
    ("blue", "#007AFF"),
    ("indigo", "#5856D6"),
    ("purple", "#AF52DE"),
    ("pink", "#FF2D55"),
    ("brown", "#A2845E"),
    ("gray", "#8E8E93"),
    ("grey", "#8E8E93"),
    ("black", "#000000"),
    ("white", "#FFFFFF"),
];

fn clock_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2}):(\d{2})\s*(am|pm)?\b").expect("clock regex must compile")
    })
}

fn hour_meridiem_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2})\s*(am|pm)\b").expect("hour regex must compile")
    })
}

fn month_day_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\s+(\d{1,2})(?:st|nd|rd|th)?\b",
        )
        .expect("month-day regex must compile")
    })
}

fn numeric_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b|\b\d{4}-\d{2}-\d{2}\b")
            .expect("numeric date regex must compile")
    })
}

fn time_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:from\s+)?(noon|midnight|\d{1,2}(?::\d{2})?\s*(?:am|pm)?)\s*(?:to|until|till|-)\s*(noon|midnight|\d{1,2}(?::\d{2})?\s*(?:am|pm)?)",
        )
        .expect("time range regex must compile")
    })
}

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"for\s+(\d+)\s*(hours?|hrs?|minutes?|mins?)\b")
            .expect("duration regex must compile")
    })
}

fn bare_duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+)\s*(hours?|hrs?|minutes?|mins?)\b")
            .expect("bare duration regex must compile")
    })
}

fn percent_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,3}(?:\.\d+)?)\s*percent\b").expect("percent regex must compile")
    })
}

fn percent_sign_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,3}(?:\.\d+)?)\s*%").expect("percent sign regex must compile")
    })
}

fn letter_grade_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:^|[^A-Za-z0-9])([ABCDF])([+-])?(?:$|[^A-Za-z0-9+-])")
            .expect("letter grade regex must compile")
    })
}

fn slash_fraction_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,3}(?:\.\d+)?)\s*/\s*(\d{1,3}(?:\.\d+)?)")
            .expect("fraction regex must compile")
    })
}

fn worded_fraction_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,3}(?:\.\d+)?)\s+(?:out\s+of|over)\s+(\d{1,3}(?:\.\d+)?)")
            .expect("worded fraction regex must compile")
    })
}

fn bare_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,3})\b").expect("bare number regex must compile"))
}

fn reminder_lead_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+)\s*(minutes?|mins?|min|hours?|hrs?|hr|days?|weeks?)\b")
            .expect("reminder lead regex must compile")
    })
}

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"#([0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{3})\b")
            .expect("hex color regex must compile")
    })
}

/// Word-boundary containment check over ASCII word characters.
pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(pos) = text[start..].find(word) {
        let at = start + pos;
        let end = at + word.len();
        let before_ok = at == 0 || !bytes[at - 1].is_ascii_alphanumeric();
        let after_ok = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
        start = at + 1;
    }
    false
}

fn first_word_position(text: &str, word: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(pos) = text[start..].find(word) {
        let at = start + pos;
        let end = at + word.len();
        let before_ok = at == 0 || !bytes[at - 1].is_ascii_alphanumeric();
        let after_ok = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return Some(at);
        }
        start = at + 1;
    }
    None
}

/// Resolve a date from relative words ("today", "tomorrow"), a weekday name
/// (soonest future occurrence, rolling a full week when the named day is
/// today), or "<month> <day>" (rolling to next year once passed).
pub fn date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if ["today", "tdy", "tonight"].iter().any(|w| contains_word(text, w)) {
        return Some(today);
    }
    if ["tomorrow", "tmrw", "tmr"].iter().any(|w| contains_word(text, w)) {
        return today.succ_opt();
    }
    if let Some(d) = month_day(text, today) {
        return Some(d);
    }
    first_weekday(text).map(|day| next_occurrence(day, today))
}

fn month_day(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = month_day_regex().captures(text)?;
    let month = month_number(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if this_year < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(this_year)
    }
}

fn month_number(name: &str) -> Option<u32> {
    let num = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(num)
}

fn first_weekday(text: &str) -> Option<Weekday> {
    let mut best: Option<(usize, Weekday)> = None;
    for (token, day) in WEEKDAY_TOKENS {
        if let Some(pos) = first_word_position(text, token) {
            if best.map(|(p, _)| pos < p).unwrap_or(true) {
                best = Some((pos, *day));
            }
        }
    }
    best.map(|(_, day)| day)
}

fn next_occurrence(day: Weekday, today: NaiveDate) -> NaiveDate {
    let target = day.num_days_from_monday() as i64;
    let current = today.weekday().num_days_from_monday() as i64;
    let mut ahead = (target - current).rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    today + Duration::days(ahead)
}

/// Recognizes `noon`, `midnight`, `H:MM am/pm`, `H am/pm`, and bare 24-hour
/// `H:MM`. Out-of-range values are rejected outright, never clamped.
pub fn time(text: &str) -> Option<TimeOfDay> {
    if contains_word(text, "noon") {
        return TimeOfDay::new(12, 0);
    }
    if contains_word(text, "midnight") {
        return TimeOfDay::new(0, 0);
    }
    if let Some(caps) = clock_regex().captures(text) {
        let hour: u8 = caps[1].parse().ok()?;
        let minute: u8 = caps[2].parse().ok()?;
        return match caps.get(3) {
            Some(meridiem) => twelve_hour(hour, minute, meridiem.as_str()),
            None => TimeOfDay::new(hour, minute),
        };
    }
    let caps = hour_meridiem_regex().captures(text)?;
    let hour: u8 = caps[1].parse().ok()?;
    twelve_hour(hour, 0, &caps[2])
}

fn twelve_hour(hour: u8, minute: u8, meridiem: &str) -> Option<TimeOfDay> {
    if hour == 0 || hour > 12 {
        return None;
    }
    let hour24 = match (hour, meridiem) {
        (12, "am") => 0,
        (12, "pm") => 12,
        (h, "pm") => h + 12,
        (h, _) => h,
    };
    TimeOfDay::new(hour24, minute)
}

/// A `from <start> to <end>` (or dashed) time range. Bare hours inside a
/// range are read as 24-hour times.
pub fn time_range(text: &str) -> Option<(TimeOfDay, TimeOfDay)> {
    let caps = time_range_regex().captures(text)?;
    let start = time_token(&caps[1])?;
    let end = time_token(&caps[2])?;
    Some((start, end))
}

fn time_token(token: &str) -> Option<TimeOfDay> {
    let token = token.trim();
    if let Some(t) = time(token) {
        return Some(t);
    }
    token.parse::<u8>().ok().and_then(|h| TimeOfDay::new(h, 0))
}

/// Duration in seconds from `for N hours/minutes`. With `direct_answer` the
/// leading "for" may be omitted (a reply to "how long?").
pub fn duration(text: &str, direct_answer: bool) -> Option<u32> {
    let caps = duration_regex()
        .captures(text)
        .or_else(|| direct_answer.then(|| bare_duration_regex().captures(text)).flatten())?;
    let amount: u32 = caps[1].parse().ok()?;
    let seconds = if caps[2].starts_with('h') {
        amount.checked_mul(3600)?
    } else {
        amount.checked_mul(60)?
    };
    Some(seconds)
}

/// Weekday set: the literal tokens `mwf`, `tth`/`tr`, `weekdays`, `weekend`
/// short-circuit; otherwise individual day names accumulate into one set.
pub fn days(text: &str) -> Option<BTreeSet<Weekday>> {
    use Weekday::*;
    if contains_word(text, "mwf") {
        return Some(BTreeSet::from([Monday, Wednesday, Friday]));
    }
    if contains_word(text, "tth") || contains_word(text, "tr") {
        return Some(BTreeSet::from([Tuesday, Thursday]));
    }
    if contains_word(text, "weekdays") {
        return Some(BTreeSet::from([Monday, Tuesday, Wednesday, Thursday, Friday]));
    }
    if contains_word(text, "weekend") || contains_word(text, "weekends") {
        return Some(BTreeSet::from([Saturday, Sunday]));
    }
    let mut set = BTreeSet::new();
    for (token, day) in WEEKDAY_TOKENS {
        if contains_word(text, token) {
            set.insert(*day);
        }
    }
    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

/// Grade value in surface form: "92%", "A-", fractions normalized to a
/// rounded percentage. Operates on the raw input (letter grades are
/// upper-case only). A bare 1-3 digit number counts only when a grade
/// keyword is present elsewhere, or when the text is a direct answer to
/// "what did you get?".
pub fn grade(raw: &str, direct_answer: bool) -> Option<String> {
    let lower = raw.to_lowercase();
    if let Some(caps) = percent_word_regex().captures(&lower) {
        return Some(format!("{}%", &caps[1]));
    }
    if let Some(caps) = percent_sign_regex().captures(&lower) {
        return Some(format!("{}%", &caps[1]));
    }
    if let Some(caps) = letter_grade_regex().captures(raw) {
        let mut out = caps[1].to_string();
        if let Some(sign) = caps.get(2) {
            out.push_str(sign.as_str());
        }
        return Some(out);
    }
    if let Some(pct) = fraction_percent(&lower) {
        return Some(pct);
    }
    if direct_answer || GRADE_KEYWORDS.iter().any(|w| contains_word(&lower, w)) {
        if let Some(caps) = bare_number_regex().captures(&lower) {
            return Some(format!("{}%", &caps[1]));
        }
    }
    None
}

fn fraction_percent(lower: &str) -> Option<String> {
    for caps in slash_fraction_regex().captures_iter(lower) {
        // skip numeric dates like 3/14/26
        let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
        if lower[end..].trim_start().starts_with('/') {
            continue;
        }
        if let Some(pct) = ratio_to_percent(&caps[1], &caps[2]) {
            return Some(pct);
        }
    }
    let caps = worded_fraction_regex().captures(lower)?;
    ratio_to_percent(&caps[1], &caps[2])
}

fn ratio_to_percent(numerator: &str, denominator: &str) -> Option<String> {
    let n: f64 = numerator.parse().ok()?;
    let d: f64 = denominator.parse().ok()?;
    if d <= 0.0 {
        return None;
    }
    Some(format!("{}%", (n / d * 100.0).round() as i64))
}

/// True when the text carries an unambiguous grade pattern: a percent, a
/// letter grade, a fraction, or "pass/fail". Used by the router to pick the
/// confident grade rule.
pub fn has_grade_pattern(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    lower.contains('%')
        || percent_word_regex().is_match(&lower)
        || letter_grade_regex().is_match(raw)
        || worded_fraction_regex().is_match(&lower)
        || lower.contains("pass/fail")
        || slash_fraction_regex()
            .captures_iter(&lower)
            .any(|caps| {
                let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
                !lower[end..].trim_start().starts_with('/')
            })
}

pub fn has_grade_keyword(text: &str) -> bool {
    GRADE_KEYWORDS.iter().any(|w| contains_word(text, w))
}

/// Assignment name from a fixed keyword list, title-cased ("Midterm").
pub fn assignment(text: &str) -> Option<String> {
    let mut best: Option<(usize, &str)> = None;
    for token in ASSIGNMENT_KEYWORDS {
        if let Some(pos) = first_word_position(text, token) {
            if best.map(|(p, _)| pos < p).unwrap_or(true) {
                best = Some((pos, token));
            }
        }
    }
    best.map(|(_, token)| {
        let mut chars = token.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    })
}

/// Weight percentage from `worth N%`, `weighted N`, `N% weight`,
/// `weight ... N`. With `direct_answer` a standalone number or `N percent`
/// is also accepted (the whole reply is the answer).
pub fn weight(text: &str, direct_answer: bool) -> Option<f64> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"worth\s+(\d{1,3}(?:\.\d+)?)\s*%?",
            r"weighted\s+(?:at\s+)?(\d{1,3}(?:\.\d+)?)\s*%?",
            r"(\d{1,3}(?:\.\d+)?)\s*%\s*weight",
            r"weight\D{0,16}?(\d{1,3}(?:\.\d+)?)\s*%?",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("weight regex must compile"))
        .collect()
    });
    for re in patterns {
        if let Some(caps) = re.captures(text) {
            return caps[1].parse().ok();
        }
    }
    if direct_answer {
        if let Some(caps) = percent_word_regex().captures(text) {
            return caps[1].parse().ok();
        }
        static WHOLE: OnceLock<Regex> = OnceLock::new();
        let whole = WHOLE.get_or_init(|| {
            Regex::new(r"^\s*(\d{1,3}(?:\.\d+)?)\s*%?\s*$")
                .expect("whole weight regex must compile")
        });
        if let Some(caps) = whole.captures(text) {
            return caps[1].parse().ok();
        }
    }
    None
}

/// Reminder lead time. "no reminder" maps to the explicit
/// [`ReminderLead::None`]; numeric leads map onto the fixed enumeration;
/// a bare "remind"/"before" defaults to 15 minutes; no signal at all
/// returns `None` so the caller asks.
pub fn reminder(text: &str, direct_answer: bool) -> Option<ReminderLead> {
    let trimmed = text.trim();
    if direct_answer && matches!(trimmed, "no" | "none" | "nope" | "skip") {
        return Some(ReminderLead::None);
    }
    if text.contains("no reminder")
        || text.contains("without a reminder")
        || text.contains("without reminder")
        || text.contains("don't remind")
        || text.contains("dont remind")
    {
        return Some(ReminderLead::None);
    }
    let has_signal = text.contains("remind") || contains_word(text, "before");
    if !direct_answer && !has_signal {
        return None;
    }
    if let Some(caps) = reminder_lead_regex().captures(text) {
        let amount: u32 = caps[1].parse().ok()?;
        let unit = &caps[2];
        let lead = if unit.starts_with('m') {
            match amount {
                5 => ReminderLead::Minutes5,
                30 => ReminderLead::Minutes30,
                _ => ReminderLead::Minutes15,
            }
        } else if unit.starts_with('h') {
            if amount >= 2 {
                ReminderLead::Hours2
            } else {
                ReminderLead::Hour1
            }
        } else if unit.starts_with('d') {
            if amount >= 2 {
                ReminderLead::Days2
            } else {
                ReminderLead::Day1
            }
        } else {
            ReminderLead::Week1
        };
        return Some(lead);
    }
    if text.contains("an hour before") || text.contains("one hour before") {
        return Some(ReminderLead::Hour1);
    }
    if text.contains("a day before") || text.contains("day before") {
        return Some(ReminderLead::Day1);
    }
    if text.contains("a week before") || text.contains("week before") {
        return Some(ReminderLead::Week1);
    }
    if has_signal {
        return Some(ReminderLead::Minutes15);
    }
    None
}

/// Hex code (3/6/8 digits, `#` required) or a fixed color-name table.
/// Names are matched on word boundaries so "red" never matches "credit".
pub fn color(text: &str) -> Option<String> {
    if let Some(caps) = hex_color_regex().captures(text) {
        return Some(format!("#{}", caps[1].to_uppercase()));
    }
    for (name, hex) in COLOR_TABLE {
        if contains_word(text, name) {
            return Some((*hex).to_string());
        }
    }
    None
}

/// Best-effort match of the input against caller-supplied names: literal
/// case-insensitive containment of the full stored name first, then the
/// abbreviation table ("calc" finds "Calculus I").
pub fn best_match(text: &str, names: &[String]) -> Option<String> {
    for name in names {
        if !name.is_empty() && text.contains(&name.to_lowercase()) {
            return Some(name.clone());
        }
    }
    for abbr in COURSE_ABBREVIATIONS {
        if !contains_word(text, abbr) {
            continue;
        }
        if let Some(name) = names.iter().find(|n| n.to_lowercase().contains(abbr)) {
            return Some(name.clone());
        }
    }
    None
}

/// Router-level check: does the text mention any date or time at all?
/// A bare 1-2 digit number is not enough on its own; it needs `:MM` or an
/// am/pm suffix to read as a time.
pub fn has_datetime_reference(text: &str) -> bool {
    if RELATIVE_DATE_TOKENS.iter().any(|w| contains_word(text, w)) {
        return true;
    }
    if WEEKDAY_TOKENS.iter().any(|(w, _)| contains_word(text, w)) {
        return true;
    }
    if MONTH_TOKENS.iter().any(|w| contains_word(text, w)) {
        return true;
    }
    clock_regex().is_match(text)
        || hour_meridiem_regex().is_match(text)
        || numeric_date_regex().is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wednesday() -> NaiveDate {
        // 2026-09-02 is a Wednesday.
        NaiveDate::from_ymd_opt(2026, 9, 2).unwrap()
    }

    #[test]
    fn date_relative_words() {
        let today = wednesday();
        assert_eq!(date("do it today", today), Some(today));
        assert_eq!(date("essay due tmrw", today), today.succ_opt());
        assert_eq!(date("party tonight", today), Some(today));
    }

    #[test]
    fn date_weekday_rolls_forward() {
        let today = wednesday();
        // Friday is two days out.
        assert_eq!(
            date("quiz on friday", today),
            Some(NaiveDate::from_ymd_opt(2026, 9, 4).unwrap())
        );
        // Monday already passed this week: next Monday.
        assert_eq!(
            date("meeting monday", today),
            Some(NaiveDate::from_ymd_opt(2026, 9, 7).unwrap())
        );
        // Naming today's weekday rolls a full week.
        assert_eq!(
            date("next wednesday", today),
            Some(NaiveDate::from_ymd_opt(2026, 9, 9).unwrap())
        );
    }

    #[test]
    fn date_weekday_always_in_coming_week() {
        let today = wednesday();
        for (token, _) in WEEKDAY_TOKENS {
            let got = date(&format!("thing on {token}"), today).unwrap();
            assert!(got > today, "{token} produced a non-future date");
            assert!(got <= today + Duration::days(7), "{token} beyond one week");
        }
    }

    #[test]
    fn date_month_day() {
        let today = wednesday();
        assert_eq!(
            date("exam on sept 20", today),
            Some(NaiveDate::from_ymd_opt(2026, 9, 20).unwrap())
        );
        // Already passed this year: rolls to next year.
        assert_eq!(
            date("due march 5", today),
            Some(NaiveDate::from_ymd_opt(2027, 3, 5).unwrap())
        );
        // Invalid calendar day finds nothing.
        assert_eq!(date("feb 30 party", today), None);
    }

    #[test]
    fn date_ignores_lookalike_words() {
        let today = wednesday();
        // "mon" must not match inside "month".
        assert_eq!(date("later this month probably", today), None);
    }

    #[test]
    fn time_formats() {
        assert_eq!(time("at 3pm"), TimeOfDay::new(15, 0));
        assert_eq!(time("at 3:45 pm"), TimeOfDay::new(15, 45));
        assert_eq!(time("at 12am"), TimeOfDay::new(0, 0));
        assert_eq!(time("at 12pm"), TimeOfDay::new(12, 0));
        assert_eq!(time("at 14:30"), TimeOfDay::new(14, 30));
        assert_eq!(time("noon works"), TimeOfDay::new(12, 0));
        assert_eq!(time("by midnight"), TimeOfDay::new(0, 0));
    }

    #[test]
    fn time_rejects_out_of_range() {
        assert_eq!(time("at 25:00"), None);
        assert_eq!(time("at 9:75"), None);
        assert_eq!(time("at 13pm"), None);
        assert_eq!(time("nothing here"), None);
        // A bare number is not a time.
        assert_eq!(time("room 12"), None);
    }

    #[test]
    fn time_range_parses_both_ends() {
        assert_eq!(
            time_range("from 9am to 10:15am"),
            Some((TimeOfDay::new(9, 0).unwrap(), TimeOfDay::new(10, 15).unwrap()))
        );
        assert_eq!(
            time_range("14:00-15:30"),
            Some((TimeOfDay::new(14, 0).unwrap(), TimeOfDay::new(15, 30).unwrap()))
        );
        assert_eq!(
            time_range("from noon to 2pm"),
            Some((TimeOfDay::new(12, 0).unwrap(), TimeOfDay::new(14, 0).unwrap()))
        );
        assert_eq!(time_range("no range here"), None);
    }

    #[test]
    fn duration_needs_for_unless_direct() {
        assert_eq!(duration("study for 2 hours", false), Some(7200));
        assert_eq!(duration("gym for 45 mins", false), Some(2700));
        assert_eq!(duration("90 minutes", false), None);
        assert_eq!(duration("90 minutes", true), Some(5400));
    }

    #[test]
    fn days_literals_short_circuit() {
        use Weekday::*;
        assert_eq!(
            days("every mwf morning"),
            Some(BTreeSet::from([Monday, Wednesday, Friday]))
        );
        assert_eq!(days("tth lab"), Some(BTreeSet::from([Tuesday, Thursday])));
        assert_eq!(
            days("on weekdays"),
            Some(BTreeSet::from([Monday, Tuesday, Wednesday, Thursday, Friday]))
        );
        assert_eq!(days("the weekend"), Some(BTreeSet::from([Saturday, Sunday])));
    }

    #[test]
    fn days_accumulate_individual_names() {
        use Weekday::*;
        assert_eq!(
            days("monday and thursday"),
            Some(BTreeSet::from([Monday, Thursday]))
        );
        assert_eq!(days("tues wed fri"), Some(BTreeSet::from([Tuesday, Wednesday, Friday])));
        assert_eq!(days("sometime next month"), None);
    }

    #[test]
    fn grade_percent_forms() {
        assert_eq!(grade("got 92 percent", false), Some("92%".to_string()));
        assert_eq!(grade("scored 88.5% today", false), Some("88.5%".to_string()));
    }

    #[test]
    fn grade_letter() {
        assert_eq!(grade("I got an A- on the quiz", false), Some("A-".to_string()));
        assert_eq!(grade("B+ on the final", false), Some("B+".to_string()));
        // Lowercase letters are not grades.
        assert_eq!(grade("a walk in the park", false), None);
    }

    #[test]
    fn grade_fractions_round() {
        assert_eq!(grade("18/20 on the lab", false), Some("90%".to_string()));
        assert_eq!(grade("got 17 out of 19", false), Some("89%".to_string()));
        assert_eq!(grade("23 over 25 on hw", false), Some("92%".to_string()));
        // Zero denominator finds nothing usable.
        assert_eq!(grade("5/0 nonsense", false), None);
    }

    #[test]
    fn grade_bare_number_needs_keyword() {
        assert_eq!(grade("put down 92", false), None);
        assert_eq!(grade("got a 92 on the test", false), Some("92%".to_string()));
        assert_eq!(grade("92", true), Some("92%".to_string()));
    }

    #[test]
    fn grade_pattern_skips_numeric_dates() {
        assert!(!has_grade_pattern("dentist on 3/14/26"));
        assert!(has_grade_pattern("18/20 on the lab"));
        assert!(has_grade_pattern("the class is pass/fail"));
        assert!(has_grade_pattern("got an A"));
        assert!(!has_grade_pattern("lunch at noon"));
    }

    #[test]
    fn weight_phrases() {
        assert_eq!(weight("midterm worth 30%", false), Some(30.0));
        assert_eq!(weight("weighted at 25", false), Some(25.0));
        assert_eq!(weight("it has 15% weight", false), Some(15.0));
        assert_eq!(weight("the weight is 40%", false), Some(40.0));
        assert_eq!(weight("nothing relevant", false), None);
    }

    #[test]
    fn weight_direct_answers() {
        assert_eq!(weight("20", true), Some(20.0));
        assert_eq!(weight("20%", true), Some(20.0));
        assert_eq!(weight("12.5 percent", true), Some(12.5));
        assert_eq!(weight("20", false), None);
    }

    #[test]
    fn reminder_signals() {
        assert_eq!(reminder("no reminder please", false), Some(ReminderLead::None));
        assert_eq!(
            reminder("remind me 30 min before", false),
            Some(ReminderLead::Minutes30)
        );
        assert_eq!(reminder("remind me 2 hours ahead", false), Some(ReminderLead::Hours2));
        assert_eq!(reminder("remind me a day before", false), Some(ReminderLead::Day1));
        assert_eq!(reminder("remind me about it", false), Some(ReminderLead::Minutes15));
        assert_eq!(reminder("just a plain event", false), None);
    }

    #[test]
    fn reminder_direct_answers() {
        assert_eq!(reminder("no", true), Some(ReminderLead::None));
        assert_eq!(reminder("15 minutes", true), Some(ReminderLead::Minutes15));
        assert_eq!(reminder("1 week", true), Some(ReminderLead::Week1));
        assert_eq!(reminder("whatever", true), None);
    }

    #[test]
    fn color_hex_and_names() {
        assert_eq!(color("#ff3b30"), Some("#FF3B30".to_string()));
        assert_eq!(color("#abc"), Some("#ABC".to_string()));
        assert_eq!(color("make it blue"), Some("#007AFF".to_string()));
        assert_eq!(color("grey works"), Some("#8E8E93".to_string()));
        // Word boundary: "red" must not match inside "credit".
        assert_eq!(color("extra credit"), None);
        assert_eq!(color("no color words"), None);
    }

    #[test]
    fn best_match_containment_then_abbreviation() {
        let names = vec!["Calculus I".to_string(), "World History".to_string()];
        assert_eq!(
            best_match("grade in world history", &names),
            Some("World History".to_string())
        );
        assert_eq!(best_match("my calc midterm", &names), Some("Calculus I".to_string()));
        assert_eq!(best_match("my biology quiz", &names), None);
        assert_eq!(best_match("anything", &[]), None);
    }

    #[test]
    fn datetime_reference_detection() {
        assert!(has_datetime_reference("see you tomorrow"));
        assert!(has_datetime_reference("fri works"));
        assert!(has_datetime_reference("due sept 20"));
        assert!(has_datetime_reference("at 3pm"));
        assert!(has_datetime_reference("at 14:30"));
        assert!(has_datetime_reference("on 3/14"));
        assert!(has_datetime_reference("on 2026-09-02"));
        // A bare number alone is not a date/time reference.
        assert!(!has_datetime_reference("got a 92"));
        assert!(!has_datetime_reference("hello there"));
    }
}
