//! Title extraction: derives a human-readable subject from the input by
//! dropping everything up to the last lead-in anchor, truncating at the
//! earliest trailing detail marker, and title-casing what remains.
//!
//! The two passes are position scans over a lower-cased copy; the anchor and
//! marker lists are ordered data, and the ordering (longest lead-in end wins,
//! earliest marker wins) is what makes the result deterministic.

use crate::extract::{MONTH_TOKENS, WEEKDAY_TOKENS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKind {
    Event,
    Schedule,
}

impl TitleKind {
    fn default_title(&self) -> &'static str {
        match self {
            TitleKind::Event => "Event",
            TitleKind::Schedule => "Class",
        }
    }
}

/// Lead-in phrases. The rightmost match wins; everything through it is
/// dropped.
const LEAD_INS: &[&str] = &[
    "remind me to ",
    "remind me ",
    "i need to ",
    "i have to ",
    "i have a ",
    "i have an ",
    "i have ",
    "i've got a ",
    "ive got a ",
    "there is a ",
    "there's a ",
    "don't forget to ",
    "dont forget to ",
    "add a ",
    "add an ",
    "add ",
    "create a ",
    "create an ",
    "create ",
    "schedule a ",
    "schedule an ",
    "schedule ",
    "set up a ",
    "go to ",
    "attend ",
    "my ",
    "our ",
    "a ",
    "an ",
    "the ",
];

/// Trailing detail markers. The earliest match wins; the title is cut just
/// before it. Weekday and month names are appended dynamically. Markers are
/// matched at word starts only.
const TRAILING_MARKERS: &[&str] = &[
    "today",
    "tdy",
    "tonight",
    "tomorrow",
    "tmrw",
    "tmr",
    "noon",
    "midnight",
    "on ",
    "at ",
    "from ",
    "for ",
    "by ",
    "every",
    "next ",
    "this ",
    "worth ",
    "weighted ",
    "reminder",
    "remind",
    "no reminder",
    "all day",
    "in the morning",
    "in the evening",
    "class",
    "course",
    "lecture",
    "category",
];

/// Words dropped when falling back to the first significant words of the
/// input.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "i", "to", "my", "me", "we", "is", "at", "on", "in", "for", "of",
    "and", "every", "remind", "reminder", "please", "have", "got", "need", "schedule",
    "add", "create", "set", "up", "today", "tdy", "tonight", "tomorrow", "tmrw", "tmr",
    "next", "this", "week", "am", "pm", "noon", "midnight",
];

/// Function words kept lower-case when they are not the first word.
const LOWERCASE_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "in", "of", "on", "or", "the",
    "to", "with",
];

pub fn extract(raw: &str, kind: TitleKind) -> String {
    let lower = raw.trim().to_lowercase();

    let start = last_lead_in_end(&lower);
    let remainder = &lower[start..];
    let cut = earliest_marker(remainder).unwrap_or(remainder.len());
    let candidate = remainder[..cut].trim();
    if !candidate.is_empty() {
        return title_case(candidate);
    }

    let fallback: Vec<&str> = lower
        .split_whitespace()
        .filter(|w| {
            let cleaned = w.trim_matches(|c: char| !c.is_alphanumeric());
            !cleaned.is_empty() && !STOP_WORDS.iter().any(|s| *s == cleaned)
        })
        .take(4)
        .collect();
    if !fallback.is_empty() {
        return title_case(&fallback.join(" "));
    }

    kind.default_title().to_string()
}

fn last_lead_in_end(lower: &str) -> usize {
    let bytes = lower.as_bytes();
    let mut best = 0;
    for phrase in LEAD_INS {
        let mut search = 0;
        while let Some(pos) = lower[search..].find(phrase) {
            let at = search + pos;
            if at == 0 || bytes[at - 1] == b' ' {
                let end = at + phrase.len();
                if end > best {
                    best = end;
                }
            }
            search = at + 1;
        }
    }
    best
}

fn earliest_marker(remainder: &str) -> Option<usize> {
    let mut best: Option<usize> = None;
    let consider = |pos: Option<usize>, best: &mut Option<usize>| {
        if let Some(p) = pos {
            if best.map(|b| p < b).unwrap_or(true) {
                *best = Some(p);
            }
        }
    };
    for marker in TRAILING_MARKERS {
        consider(find_marker(remainder, marker), &mut best);
    }
    for (token, _) in WEEKDAY_TOKENS {
        consider(find_marker(remainder, token), &mut best);
    }
    for token in MONTH_TOKENS {
        consider(find_marker(remainder, token), &mut best);
    }
    best
}

/// Position of the first word-aligned occurrence of `marker`: it must start
/// at the beginning of a word, and unless it ends with a space, end at a
/// word boundary too.
fn find_marker(text: &str, marker: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut search = 0;
    while let Some(pos) = text[search..].find(marker) {
        let at = search + pos;
        let end = at + marker.len();
        let starts_word = at == 0 || bytes[at - 1] == b' ';
        let bounded = marker.ends_with(' ')
            || end >= bytes.len()
            || !bytes[end].is_ascii_alphanumeric();
        if starts_word && bounded {
            return Some(at);
        }
        search = at + 1;
    }
    None
}

pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && LOWERCASE_WORDS.iter().any(|w| *w == lower) {
                lower
            } else {
                capitalize(&lower)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
