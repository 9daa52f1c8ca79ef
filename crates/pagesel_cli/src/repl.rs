//! Interactive browse loop.
//!
//! Reads one command per line, applies it to the table session and re-renders
//! the current page after every state change.

use crate::render::render_page;
use pagesel_core::{Artwork, ArtworkId, PageNumber, PageProvider, TableSession};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  page N          load page N (1-based)
  next | prev     move one page
  check ID...     set the checked rows of this page (no ids unchecks all)
  select ID       select one record
  deselect ID     deselect one record
  bulk N          select N records starting at the first row of this page
  clear           drop every selection
  show            render the current page
  state           print selection state as JSON
  help            show this help
  quit            leave";

/// One parsed browse command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Page(u32),
    Next,
    Prev,
    Check(Vec<ArtworkId>),
    Select(ArtworkId),
    Deselect(ArtworkId),
    Bulk(Option<String>),
    Clear,
    Show,
    State,
    Help,
    Quit,
}

/// Parses one input line; `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "page" | "p" => ReplCommand::Page(single_arg(&args, "page")?),
        "next" | "n" => ReplCommand::Next,
        "prev" | "previous" => ReplCommand::Prev,
        "check" => ReplCommand::Check(
            args.iter()
                .map(|arg| parse_id(arg))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        "select" | "s" => ReplCommand::Select(single_arg(&args, "select")?),
        "deselect" | "d" => ReplCommand::Deselect(single_arg(&args, "deselect")?),
        "bulk" | "b" => ReplCommand::Bulk(args.first().map(|arg| arg.to_string())),
        "clear" => ReplCommand::Clear,
        "show" | "ls" => ReplCommand::Show,
        "state" => ReplCommand::State,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

fn single_arg<T: std::str::FromStr>(args: &[&str], verb: &str) -> Result<T, String> {
    match args {
        [value] => value
            .parse()
            .map_err(|_| format!("`{verb}` expects a number, got `{value}`")),
        _ => Err(format!("`{verb}` expects exactly one number")),
    }
}

fn parse_id(value: &str) -> Result<ArtworkId, String> {
    value
        .trim_matches(',')
        .parse()
        .map_err(|_| format!("`{value}` is not a record id"))
}

/// Runs the loop until `quit` or end of input.
pub fn run<P, R, W>(session: &mut TableSession<P>, input: R, out: &mut W) -> io::Result<()>
where
    P: PageProvider<Record = Artwork>,
    R: BufRead,
    W: Write,
{
    render_page(session, out)?;
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "error: {message}")?;
                continue;
            }
        };
        if command == ReplCommand::Quit {
            break;
        }
        execute(session, command, out)?;
        out.flush()?;
    }
    Ok(())
}

fn execute<P, W>(session: &mut TableSession<P>, command: ReplCommand, out: &mut W) -> io::Result<()>
where
    P: PageProvider<Record = Artwork>,
    W: Write,
{
    match command {
        ReplCommand::Page(number) => {
            let Some(page) = PageNumber::new(number) else {
                return writeln!(out, "error: page numbers start at 1");
            };
            if session.total_count() > 0 && u64::from(page.get()) > session.total_pages() {
                return writeln!(
                    out,
                    "error: page {page} is beyond the last page {}",
                    session.total_pages()
                );
            }
            if let Err(err) = session.load_page(page) {
                log::warn!("event=cli_page module=cli status=error error={err}");
            }
            render_page(session, out)
        }
        ReplCommand::Next => match session.next_page() {
            Ok(true) => render_page(session, out),
            Ok(false) => writeln!(out, "already on the last page"),
            Err(_) => render_page(session, out),
        },
        ReplCommand::Prev => match session.previous_page() {
            Ok(true) => render_page(session, out),
            Ok(false) => writeln!(out, "already on the first page"),
            Err(_) => render_page(session, out),
        },
        ReplCommand::Check(ids) => {
            let toggles = session.apply_selection_change(ids);
            writeln!(out, "{} row(s) changed", toggles.len())?;
            render_page(session, out)
        }
        ReplCommand::Select(id) => {
            session.toggle_row(id, true);
            render_page(session, out)
        }
        ReplCommand::Deselect(id) => {
            session.toggle_row(id, false);
            render_page(session, out)
        }
        ReplCommand::Bulk(value) => match session.submit_bulk_input(value.as_deref()) {
            Ok(count) => {
                writeln!(
                    out,
                    "selected {count} rows starting at page {}",
                    session.current_page()
                )?;
                render_page(session, out)
            }
            Err(err) => writeln!(out, "error: {}", err.user_message()),
        },
        ReplCommand::Clear => {
            session.clear_selection();
            render_page(session, out)
        }
        ReplCommand::Show => render_page(session, out),
        ReplCommand::State => {
            let snapshot = session.store().snapshot();
            let json = serde_json::to_string_pretty(&snapshot)
                .map_err(io::Error::other)?;
            writeln!(out, "{json}")
        }
        ReplCommand::Help => writeln!(out, "{HELP}"),
        ReplCommand::Quit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, run, ReplCommand};
    use pagesel_core::{Artwork, MemoryPageProvider, PageNumber, PageSize, TableSession};

    fn session(failing: Option<u32>) -> TableSession<MemoryPageProvider<Artwork>> {
        let artworks: Vec<Artwork> = (1..=30)
            .map(|id| Artwork::new(id, format!("Work {id}")))
            .collect();
        let mut provider = MemoryPageProvider::new(artworks);
        if let Some(page) = failing {
            provider = provider.failing_on(PageNumber::new(page).unwrap());
        }
        TableSession::open(provider, PageSize::new(12).unwrap()).unwrap()
    }

    fn run_script(session: &mut TableSession<MemoryPageProvider<Artwork>>, script: &str) -> String {
        let mut out = Vec::new();
        run(session, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("page 3"), Ok(Some(ReplCommand::Page(3))));
        assert_eq!(
            parse_command("check 1, 2 5"),
            Ok(Some(ReplCommand::Check(vec![1, 2, 5])))
        );
        assert_eq!(parse_command("bulk"), Ok(Some(ReplCommand::Bulk(None))));
        assert_eq!(
            parse_command("BULK 50"),
            Ok(Some(ReplCommand::Bulk(Some("50".to_string()))))
        );
        assert!(parse_command("page").is_err());
        assert!(parse_command("select x").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn bulk_then_navigate_keeps_selection() {
        let mut session = session(None);
        let output = run_script(&mut session, "bulk 14\nnext\nquit\nselect 1\n");

        assert!(output.contains("selected 14 rows starting at page 1"));
        assert!(output.contains("Artworks (Selected: 14 rows)"));
        assert!(output.contains("[x]      14  Work 14"));
        assert!(output.contains("[ ]      15  Work 15"));
        assert_eq!(session.current_page().get(), 2);
        assert_eq!(session.store().override_for(&1), None);
    }

    #[test]
    fn invalid_bulk_reports_validation_message() {
        let mut session = session(None);
        let output = run_script(&mut session, "bulk 0\nbulk\n");

        assert_eq!(
            output
                .matches("error: Please enter a valid number greater than 0.")
                .count(),
            2
        );
        assert!(session.store().is_empty());
    }

    #[test]
    fn failed_page_shows_error_and_keeps_selection() {
        let mut session = session(Some(2));
        let output = run_script(&mut session, "select 3\nnext\n");

        assert!(output.contains("Error: Failed to load data. Please check the network."));
        assert_eq!(session.selected_count(), 1);
    }

    #[test]
    fn state_prints_json_snapshot() {
        let mut session = session(None);
        let output = run_script(&mut session, "select 5\nstate\n");
        assert!(output.contains("\"selected_ids\": [\n    5\n  ]"));
    }

    #[test]
    fn page_beyond_last_is_rejected() {
        let mut session = session(None);
        let output = run_script(&mut session, "page 9\npage 0\n");
        assert!(output.contains("error: page 9 is beyond the last page 3"));
        assert!(output.contains("error: page numbers start at 1"));
        assert_eq!(session.current_page().get(), 1);
    }
}
