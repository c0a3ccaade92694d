//! OMDb API client module.
//!
//! Looks up a single movie by title and decodes the flat JSON record
//! returned by the OMDb endpoint.

mod api;
mod client;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{BuildError, DEFAULT_BASE_URL, OmdbClient, OmdbClientBuilder, build_request_url};
#[allow(clippy::module_name_repetitions)]
pub use error::OmdbError;
pub use params::TitleQuery;
pub use types::MovieRecord;
