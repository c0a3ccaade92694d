//! OMDb API response types.

use serde::{Deserialize, Deserializer};

/// Flat movie record returned by the OMDb title lookup.
///
/// Every field is kept as the raw text the API sends. Missing fields
/// and JSON `null` both decode to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MovieRecord {
    /// Movie title. Empty when the lookup found nothing.
    #[serde(rename = "Title", deserialize_with = "nullable_string")]
    pub title: String,
    /// Release year (e.g. `"1999"`, `"2005–2011"`).
    #[serde(rename = "Year", deserialize_with = "nullable_string")]
    pub year: String,
    /// Audience rating on a 0.0-10.0 scale (e.g. `"8.7"`, `"N/A"`).
    #[serde(rename = "imdbRating", deserialize_with = "nullable_string")]
    pub imdb_rating: String,
    /// Critic aggregate score on a 0-100 scale (e.g. `"73"`, `"N/A"`).
    #[serde(rename = "Metascore", deserialize_with = "nullable_string")]
    pub metascore: String,
    /// Runtime (e.g. `"136 min"`).
    #[serde(rename = "Runtime", deserialize_with = "nullable_string")]
    pub runtime: String,
    /// Comma-separated genres.
    #[serde(rename = "Genre", deserialize_with = "nullable_string")]
    pub genre: String,
    /// Director(s).
    #[serde(rename = "Director", deserialize_with = "nullable_string")]
    pub director: String,
    /// Comma-separated writers.
    #[serde(rename = "Writer", deserialize_with = "nullable_string")]
    pub writer: String,
    /// Comma-separated principal cast.
    #[serde(rename = "Actors", deserialize_with = "nullable_string")]
    pub actors: String,
    /// Short plot summary.
    #[serde(rename = "Plot", deserialize_with = "nullable_string")]
    pub plot: String,
    /// In-band status flag (`"True"` / `"False"`).
    #[serde(rename = "Response", deserialize_with = "nullable_string")]
    pub response: String,
    /// In-band error message, set when `response` is `"False"`.
    #[serde(rename = "Error", deserialize_with = "nullable_string")]
    pub error: String,
}

impl MovieRecord {
    /// Returns `true` if the record describes a movie.
    ///
    /// OMDb signals "no match" with an empty title, whatever the HTTP status.
    #[must_use]
    pub fn is_found(&self) -> bool {
        !self.title.is_empty()
    }

    /// Returns the upstream error message, if any.
    #[must_use]
    pub fn upstream_error(&self) -> Option<&str> {
        if self.error.is_empty() {
            None
        } else {
            Some(self.error.as_str())
        }
    }
}

/// Decodes a string field, mapping JSON `null` to an empty string.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
