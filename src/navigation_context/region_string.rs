use std::sync::OnceLock;

use regex::Regex;

/// A syntactically valid, unresolved 1-based, closed range, possibly spanning features.
#[derive(Debug, Eq, PartialEq)]
pub(super) struct Range<'s> {
    pub start_name: &'s str,
    pub start: usize,
    pub end_name: &'s str,
    pub end: usize,
}

// Names may contain `:` and `-` but not whitespace. The tail follows the start name's `:`. The end
// name, when present, runs to the last `:`, since positions never contain one.
const TAIL_PATTERN: &str = r"^([\d,]+)-(?:(\S+):)?([\d,]+)$";
const NAME_PATTERN: &str = r"^\S+$";

fn tail_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(TAIL_PATTERN).expect("invalid tail pattern"))
}

fn name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(NAME_PATTERN).expect("invalid name pattern"))
}

pub(super) fn is_name(s: &str) -> bool {
    name_regex().is_match(s)
}

/// Returns every reading of `s` as `NAME:START-END` or `NAME1:START-NAME2:END`.
///
/// A name containing `:` makes the split ambiguous, so each `:` that can end the start name
/// yields a candidate, shortest start name first. Thousands separators (`,`) in positions are
/// ignored.
pub(super) fn parse_ranges(s: &str) -> Vec<Range<'_>> {
    const NAME_DELIMITER: char = ':';

    s.match_indices(NAME_DELIMITER)
        .filter_map(|(i, _)| {
            let start_name = &s[..i];

            if !is_name(start_name) {
                return None;
            }

            let captures = tail_regex().captures(&s[i + 1..])?;
            let start = parse_position(captures.get(1)?.as_str())?;
            let end_name = captures.get(2).map(|m| m.as_str()).unwrap_or(start_name);
            let end = parse_position(captures.get(3)?.as_str())?;

            Some(Range {
                start_name,
                start,
                end_name,
                end,
            })
        })
        .collect()
}

fn parse_position(s: &str) -> Option<usize> {
    const THOUSANDS_SEPARATOR: char = ',';

    let digits: String = s.chars().filter(|&c| c != THOUSANDS_SEPARATOR).collect();

    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
