//! movinfo - look up a movie on OMDb and print a colored summary.
#![allow(clippy::future_not_send)]

/// Application configuration (TOML).
mod config;
/// Terminal rendering of movie records.
mod presenter;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use crate::presenter::{render_movie, render_not_found};
use movinfo_api::omdb::{LocalOmdbApi, MovieRecord, OmdbClient, TitleQuery};

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "movinfo", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Movie title words (e.g. `the big lebowski`).
    ///
    /// Everything from the first word on is part of the title, including
    /// words that start with `-`.
    #[arg(value_name = "TITLE", trailing_var_arg = true, allow_hyphen_values = true)]
    title: Vec<String>,
}

/// Loads the config file, falling back to defaults when no path can be resolved.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    match resolve_config_path(dir) {
        Ok(path) => AppConfig::load(&path).context("failed to load config"),
        Err(e) => {
            tracing::debug!("No config path ({e:#}), using defaults");
            Ok(AppConfig::default())
        }
    }
}

/// Builds an `OmdbClient` from config.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(config: &AppConfig) -> Result<OmdbClient> {
    let mut builder = OmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = config.omdb.base_url()? {
        builder = builder.base_url(base_url);
    }
    if let Some(ref api_key) = config.omdb.api_key {
        builder = builder.api_key(api_key.clone());
    }
    builder.build().context("failed to build OMDb client")
}

/// Logs the upstream reason for a lookup that found nothing.
fn note_missing(record: &MovieRecord) {
    if let Some(message) = record.upstream_error() {
        tracing::debug!("OMDb reported: {message}");
    }
}

/// Looks up `query` and writes either the summary or a not-found message.
///
/// # Errors
///
/// Returns an error if the lookup fails (transport or decode) or writing fails.
#[instrument(skip_all)]
async fn run_lookup<C, W>(client: &C, query: &TitleQuery, out: &mut W) -> Result<()>
where
    C: LocalOmdbApi,
    W: Write,
{
    let record = client
        .lookup_title(query)
        .await
        .context("movie lookup failed")?;

    if !record.is_found() {
        note_missing(&record);
        render_not_found(out, &query.joined()).context("failed to write output")?;
        return Ok(());
    }

    render_movie(out, &record).context("failed to write output")?;
    out.flush().context("failed to write output")
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if config loading, the lookup, or output fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
            )
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let config = load_config(cli.dir.as_ref())?;
    let client = build_omdb_client(&config)?;
    let query = TitleQuery::from_words(cli.title);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_lookup(&client, &query, &mut out).await
}
