//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::OmdbError;
use super::params::TitleQuery;
use super::types::MovieRecord;

/// OMDb API trait.
///
/// Abstracts the lookup for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Looks up a single movie by title.
    ///
    /// A lookup that matches nothing still succeeds; the returned record
    /// has an empty title.
    ///
    /// # Errors
    ///
    /// Returns [`OmdbError::Transport`] if the HTTP request fails and
    /// [`OmdbError::Decode`] if the body is not a JSON movie record.
    async fn lookup_title(&self, query: &TitleQuery) -> Result<MovieRecord, OmdbError>;
}
