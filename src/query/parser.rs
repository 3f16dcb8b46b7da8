//! The query parser: temporal, genre, and person extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::query::genres::extract_genres;
use crate::query::ParsedQuery;

lazy_static! {
    /// "early 2000s", "late 90s", "late 90's".
    static ref EARLY_LATE_RE: Regex =
        Regex::new(r"(?i)\b(early|late)\s+(\d{4}|\d{2})'?s\b").expect("valid regex");
    /// "80s", "1980s", "80's", "1980's".
    static ref DECADE_RE: Regex = Regex::new(r"(?i)\b(\d{4}|\d{2})'?s\b").expect("valid regex");
    /// "2005-2010", "2005 to 2010".
    static ref YEAR_RANGE_RE: Regex =
        Regex::new(r"(?i)\b(\d{4})\s*(?:-|to)\s*(\d{4})\b").expect("valid regex");
    /// A single explicit year, 1900-2099.
    static ref YEAR_RE: Regex = Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("valid regex");
    /// Connector phrases that introduce a person name.
    static ref PERSON_ANCHOR_RE: Regex =
        Regex::new(r"(?i)\b(?:starring|featuring|directed\s+by|with)\s+").expect("valid regex");
    /// Where a person capture ends: punctuation or another connector.
    static ref CLAUSE_BOUNDARY_RE: Regex =
        Regex::new(r"(?i)[,.;:!?]|\b(?:starring|featuring|directed|with)\b").expect("valid regex");
}

/// Parses free-text queries into [`ParsedQuery`] constraint sets.
///
/// Stateless; one instance serves every query.
///
/// # Examples
///
/// ```
/// use marquee::query::QueryParser;
///
/// let parsed = QueryParser::new().parse("comedy films in the 80s starring Eddie Murphy");
/// assert_eq!(parsed.year_range, Some((1980, 1989)));
/// assert_eq!(parsed.genres, vec!["comedy"]);
/// assert_eq!(parsed.people, vec!["Eddie Murphy"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParser;

impl QueryParser {
    /// Create a new query parser.
    pub fn new() -> Self {
        QueryParser
    }

    /// Parse a raw query. Pure and total: any input produces a
    /// [`ParsedQuery`], possibly with no constraints at all.
    pub fn parse(&self, raw: &str) -> ParsedQuery {
        ParsedQuery {
            year_range: extract_year_range(raw),
            genres: extract_genres(raw),
            people: extract_people(raw),
            residual_text: raw.to_string(),
        }
    }
}

/// Resolve a two- or four-digit decade token to its starting year.
/// Two-digit decades resolve into the 1900s ("80s" is 1980).
fn decade_start(token: &str) -> i32 {
    let value: i32 = token.parse().unwrap_or(0);
    if value < 100 { 1900 + value } else { value }
}

/// Extract the inclusive year range, if any temporal phrase is present.
///
/// Fixed first-match precedence: early/late decade, then plain decade, then
/// explicit range, then single year. With several temporal phrases in one
/// query the earliest-checked pattern wins; there is no range merging.
fn extract_year_range(query: &str) -> Option<(i32, i32)> {
    if let Some(caps) = EARLY_LATE_RE.captures(query) {
        let start = decade_start(&caps[2]);
        return Some(if caps[1].eq_ignore_ascii_case("early") {
            (start, start + 4)
        } else {
            (start + 5, start + 9)
        });
    }

    if let Some(caps) = DECADE_RE.captures(query) {
        let start = decade_start(&caps[1]);
        return Some((start, start + 9));
    }

    if let Some(caps) = YEAR_RANGE_RE.captures(query) {
        let a: i32 = caps[1].parse().unwrap_or(0);
        let b: i32 = caps[2].parse().unwrap_or(0);
        return Some(if a <= b { (a, b) } else { (b, a) });
    }

    if let Some(caps) = YEAR_RE.captures(query) {
        let year: i32 = caps[1].parse().unwrap_or(0);
        return Some((year, year));
    }

    None
}

/// Extract person names introduced by connector phrases.
///
/// For each anchor ("starring X", "with X", "featuring X", "directed by X")
/// the capture runs to the next clause boundary (punctuation, another
/// connector word, or end of string) and the first contiguous run of
/// title-cased tokens inside it is the candidate name.
fn extract_people(query: &str) -> Vec<String> {
    let mut people = Vec::new();
    for anchor in PERSON_ANCHOR_RE.find_iter(query) {
        let tail = &query[anchor.end()..];
        let end = CLAUSE_BOUNDARY_RE
            .find(tail)
            .map(|b| b.start())
            .unwrap_or(tail.len());
        if let Some(name) = leading_titlecase_run(&tail[..end]) {
            if !people.contains(&name) {
                people.push(name);
            }
        }
    }
    people
}

/// The first contiguous run of title-cased tokens in a segment.
fn leading_titlecase_run(segment: &str) -> Option<String> {
    let mut run: Vec<&str> = Vec::new();
    for token in segment.split_whitespace() {
        let title_cased = token
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() && c.is_uppercase());
        if title_cased {
            run.push(token);
        } else if !run.is_empty() {
            break;
        }
    }
    if run.is_empty() {
        None
    } else {
        Some(run.join(" "))
    }
}
