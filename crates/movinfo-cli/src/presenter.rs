//! Terminal rendering of a movie record.
//!
//! Text fields are printed as right-aligned `label : value` lines in cyan.
//! The two ratings are drawn as 100-column bars colored by score band.

use std::io::{self, Write};

use crossterm::style::{Attribute, Attributes, Color, ContentStyle, Stylize};
use movinfo_api::omdb::MovieRecord;

/// Width labels are padded to.
const LABEL_WIDTH: usize = 11;

/// Number of columns between the bar brackets.
const BAR_WIDTH: u32 = 100;

/// Precision the audience percentage is rounded to.
const PERCENT_SNAP: f64 = 1e6;

/// Color of field labels and values.
const FIELD_COLOR: Color = Color::DarkCyan;

/// Color of the not-found message.
const NOT_FOUND_COLOR: Color = Color::DarkRed;

/// Plain foreground style.
fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

/// Bold foreground style.
fn bold(color: Color) -> ContentStyle {
    ContentStyle {
        attributes: Attributes::from(Attribute::Bold),
        ..fg(color)
    }
}

/// Maps a percentage to its band color.
///
/// Below 50 is red, 50 to 69 is yellow, 70 and above is green.
#[must_use]
pub fn rating_color(percent: f64) -> Color {
    if percent < 50.0 {
        Color::DarkRed
    } else if percent < 70.0 {
        Color::DarkYellow
    } else {
        Color::DarkGreen
    }
}

/// Returns the `(line, emphasis)` styles for a percentage.
#[must_use]
pub fn rating_styles(percent: f64) -> (ContentStyle, ContentStyle) {
    let color = rating_color(percent);
    (fg(color), bold(color))
}

/// Converts an audience rating (0.0-10.0) to a percentage.
///
/// Unparseable input, or input that is not finite once scaled, counts as zero.
#[must_use]
pub fn audience_percent(rating: &str) -> f64 {
    rating
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        // Snap away float error from the x10 scaling so 5.7 fills 57 columns.
        .map(|value| (value * 10.0 * PERCENT_SNAP).round() / PERCENT_SNAP)
        .filter(|percent| percent.is_finite())
        .unwrap_or(0.0)
}

/// Converts a critic score (0-100 integer) to a percentage.
///
/// Unparseable input counts as zero.
#[must_use]
pub fn critic_percent(score: &str) -> f64 {
    score.parse::<i32>().map_or(0.0, f64::from)
}

/// Draws a bracketed bar with `floor(percent)` filled columns.
///
/// The percentage is clamped to `0..=100`; NaN draws an empty bar.
#[must_use]
pub fn rating_bar(percent: f64) -> String {
    let filled = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, f64::from(BAR_WIDTH)).floor()
    };

    // Columns plus both brackets.
    let capacity = usize::try_from(BAR_WIDTH).map_or(0, |width| width.saturating_add(2));
    let mut bar = String::with_capacity(capacity);
    bar.push('[');
    for column in 0..BAR_WIDTH {
        bar.push(if f64::from(column) < filled { '=' } else { ' ' });
    }
    bar.push(']');
    bar
}

/// Writes one `label : value` line.
fn write_field<W: Write>(out: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}{}",
        bold(FIELD_COLOR).apply(format!("{label:>LABEL_WIDTH$} : ")),
        value.with(FIELD_COLOR),
    )
}

/// Writes one rating line: numeric label followed by the bar.
fn write_rating<W: Write>(out: &mut W, label: &str, percent: f64) -> io::Result<()> {
    let (line, emphasis) = rating_styles(percent);
    writeln!(
        out,
        "{}{}",
        emphasis.apply(format!("{label:<LABEL_WIDTH$} : {percent:.0}% ")),
        line.apply(rating_bar(percent)),
    )
}

/// Writes the full movie summary.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn render_movie<W: Write>(out: &mut W, movie: &MovieRecord) -> io::Result<()> {
    write_field(out, "Title", &movie.title)?;
    write_field(out, "Director", &movie.director)?;
    write_field(out, "Year", &movie.year)?;
    write_field(out, "Runtime", &movie.runtime)?;
    write_field(out, "Genre", &movie.genre)?;
    write_field(out, "Actors", &movie.actors)?;
    write_field(out, "Writer(s)", &movie.writer)?;

    write_rating(out, "IMDB Rating", audience_percent(&movie.imdb_rating))?;
    write_rating(out, "Metascore", critic_percent(&movie.metascore))?;

    writeln!(out, "\n {}", movie.plot)
}

/// Writes the "could not find" message for a query.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn render_not_found<W: Write>(out: &mut W, query: &str) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("Could not find movie titled : {query}").with(NOT_FOUND_COLOR)
    )
}
