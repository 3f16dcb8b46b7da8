//! Candidate filtering: boolean AND mask over the corpus.

use crate::corpus::MovieRecord;
use crate::query::ParsedQuery;

/// Apply the parsed constraints to the corpus, returning surviving row
/// indices in corpus order.
///
/// AND semantics across the constraints that are present; an absent
/// constraint passes everything. Total function: an empty result is a valid
/// outcome, not an error.
pub fn filter(records: &[MovieRecord], query: &ParsedQuery) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| survives(record, query))
        .map(|(row, _)| row)
        .collect()
}

fn survives(record: &MovieRecord, query: &ParsedQuery) -> bool {
    if let Some((from, to)) = query.year_range {
        // Unknown year excludes rather than includes.
        match record.year {
            Some(year) if year >= from && year <= to => {}
            _ => return false,
        }
    }

    if !query.genres.is_empty() && !genre_matches(record, &query.genres) {
        return false;
    }

    if !query.people.is_empty() && !person_matches(record, &query.people) {
        return false;
    }

    true
}

/// Whether any queried genre is among the record's genres
/// (case-insensitive).
pub(crate) fn genre_matches(record: &MovieRecord, genres: &[String]) -> bool {
    genres.iter().any(|wanted| {
        record
            .genres
            .iter()
            .any(|have| have.eq_ignore_ascii_case(wanted))
    })
}

/// Whether any queried name appears in any of the record's people
/// (case-insensitive substring match on the name).
pub(crate) fn person_matches(record: &MovieRecord, people: &[String]) -> bool {
    people.iter().any(|wanted| {
        let wanted = wanted.to_lowercase();
        record
            .people()
            .iter()
            .any(|have| have.to_lowercase().contains(&wanted))
    })
}
