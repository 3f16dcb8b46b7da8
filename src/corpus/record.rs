//! Movie record type and the derived indexing text.

use serde::{Deserialize, Serialize};

/// How many times each field is repeated in [`MovieRecord::combined_text`].
///
/// Term frequency then reflects field importance directly, so no per-field
/// score blending is needed at query time.
const TITLE_REPEATS: usize = 3;
const GENRE_REPEATS: usize = 2;
const DIRECTOR_REPEATS: usize = 2;
const CAST_REPEATS: usize = 1;
const SYNOPSIS_REPEATS: usize = 1;

/// A single catalog entry. Immutable once an index has been built over it.
///
/// `genres` holds canonical lowercase names ("science fiction", not
/// "Sci-Fi"). `director` and `cast` are kept separate so the indexer can
/// weight them differently; everything downstream of indexing (filtering,
/// scoring, API output) sees them merged through [`MovieRecord::people`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Unique, stable identifier.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Release year, if known.
    #[serde(default)]
    pub year: Option<i32>,
    /// Canonical genre names.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Director name, if known.
    #[serde(default)]
    pub director: Option<String>,
    /// Cast member names.
    #[serde(default)]
    pub cast: Vec<String>,
    /// Free-text plot synopsis.
    #[serde(default)]
    pub synopsis: String,
    /// Quality rating in [0, 10], if known.
    #[serde(default)]
    pub quality: Option<f32>,
}

impl MovieRecord {
    /// All people attached to the record: cast plus director.
    ///
    /// This is the set the filter engine, the metadata boost, and the search
    /// API expose.
    pub fn people(&self) -> Vec<&str> {
        let mut people: Vec<&str> = self.cast.iter().map(String::as_str).collect();
        if let Some(director) = &self.director {
            people.push(director.as_str());
        }
        people
    }

    /// The weighted concatenation the text indexer tokenizes.
    ///
    /// Deterministic given the record fields: title x3, genres x2, director
    /// x2, cast x1, synopsis x1, space-joined in that order.
    pub fn combined_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for _ in 0..TITLE_REPEATS {
            parts.push(&self.title);
        }
        for _ in 0..GENRE_REPEATS {
            for genre in &self.genres {
                parts.push(genre);
            }
        }
        if let Some(director) = &self.director {
            for _ in 0..DIRECTOR_REPEATS {
                parts.push(director);
            }
        }
        for _ in 0..CAST_REPEATS {
            for name in &self.cast {
                parts.push(name);
            }
        }
        for _ in 0..SYNOPSIS_REPEATS {
            parts.push(&self.synopsis);
        }
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }
}
