//! Terminal rendering of one table page.

use pagesel_core::{Artwork, LoadState, PageProvider, TableSession};
use std::io::{self, Write};

const TITLE_WIDTH: usize = 36;
const ARTIST_WIDTH: usize = 28;
const ORIGIN_WIDTH: usize = 14;

/// Writes the header, current page rows with checkbox markers and the
/// paginator line.
pub fn render_page<P, W>(session: &TableSession<P>, out: &mut W) -> io::Result<()>
where
    P: PageProvider<Record = Artwork>,
    W: Write,
{
    writeln!(out, "Artworks ({})", session.selection_summary())?;

    match session.load_state() {
        LoadState::Idle => writeln!(out, "No page loaded.")?,
        LoadState::Loading { page } => writeln!(out, "Loading page {page}...")?,
        LoadState::Failed { message } => writeln!(out, "Error: {message}")?,
        LoadState::Ready if session.records().is_empty() => writeln!(out, "No records.")?,
        LoadState::Ready => {
            for artwork in session.records() {
                writeln!(out, "{}", render_row(artwork, session.is_checked(&artwork.id)))?;
            }
        }
    }

    writeln!(out, "{}", paginator_line(session))
}

/// One table row, e.g. `[x] 27992  A Sunday on La Grande Jatte | ...`.
pub fn render_row(artwork: &Artwork, checked: bool) -> String {
    let marker = if checked { "[x]" } else { "[ ]" };
    let dates = match (artwork.date_start, artwork.date_end) {
        (Some(start), Some(end)) if start != end => format!("{start}-{end}"),
        (Some(start), _) => start.to_string(),
        (None, Some(end)) => end.to_string(),
        (None, None) => "-".to_string(),
    };
    format!(
        "{marker} {:>7}  {:<title$} | {:<artist$} | {:<origin$} | {dates}",
        artwork.id,
        clip(artwork.title.as_deref(), TITLE_WIDTH),
        clip(artwork.artist_display.as_deref(), ARTIST_WIDTH),
        clip(artwork.place_of_origin.as_deref(), ORIGIN_WIDTH),
        title = TITLE_WIDTH,
        artist = ARTIST_WIDTH,
        origin = ORIGIN_WIDTH,
    )
}

fn paginator_line<P: PageProvider>(session: &TableSession<P>) -> String {
    let page = session.current_page();
    let total_pages = session.total_pages();
    let shown = session.records().len() as u64;
    if shown == 0 {
        return format!("Page {page} of {total_pages}");
    }
    let first = session.first_index() + 1;
    format!(
        "Page {page} of {total_pages} (rows {first}-{} of {})",
        first + shown - 1,
        session.total_count()
    )
}

/// First line of `value`, cut to `width` chars with a trailing `~`.
fn clip(value: Option<&str>, width: usize) -> String {
    let line = value.unwrap_or("").lines().next().unwrap_or("").trim();
    if line.chars().count() <= width {
        return line.to_string();
    }
    let mut clipped: String = line.chars().take(width.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}
