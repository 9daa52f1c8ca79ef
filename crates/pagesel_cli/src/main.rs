//! `pagesel` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from environment and flags.
//! - Wire a page provider into a table session and drive the browse loop.
//! - Seed the local SQLite listing for offline browsing.

mod error;
mod render;
mod repl;

use clap::{Parser, Subcommand, ValueEnum};
use error::CliError;
use pagesel_core::config::{parse_base_url, parse_page_size};
use pagesel_core::db::open_db;
use pagesel_core::logging::normalize_level;
use pagesel_core::{
    core_version, init_logging, seed_synthetic_artworks, Artwork, ConfigError, HttpPageProvider,
    PageNumber, PageProvider, RepositoryPageProvider, SessionConfig, SqliteArtworkRepository,
    TableSession,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_DB_FILE: &str = "pagesel.sqlite3";

#[derive(Parser)]
#[command(name = "pagesel", version)]
#[command(about = "Browse a paginated listing and keep row selection across pages")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Browse pages interactively
    Browse {
        /// Where pages come from
        #[arg(long, value_enum, default_value_t = Source::Http)]
        source: Source,

        /// SQLite file used by `--source sqlite`
        #[arg(long, default_value = DEFAULT_DB_FILE)]
        db: PathBuf,

        /// Records per page
        #[arg(long)]
        page_size: Option<String>,

        /// Listing endpoint used by `--source http`
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Write synthetic artworks into a SQLite file
    Seed {
        #[arg(long, default_value = DEFAULT_DB_FILE)]
        db: PathBuf,

        /// Number of records to write
        #[arg(long, default_value_t = 500)]
        count: u32,
    },

    /// Print the core version
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    Http,
    Sqlite,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = SessionConfig::from_env()?;
    if let Some(level) = cli.log_level.as_deref() {
        config.log_level = normalize_level(level).map_err(|message| ConfigError {
            key: "--log-level",
            message,
        })?;
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }
    if let Some(dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, absolute(dir)?)?;
    }

    match cli.command {
        Command::Browse {
            source,
            db,
            page_size,
            api_url,
        } => {
            if let Some(value) = page_size.as_deref() {
                config.page_size = parse_page_size(value)?;
            }
            if let Some(value) = api_url.as_deref() {
                config.api_base_url = parse_base_url(value)?;
            }
            browse(&config, source, &db)
        }
        Command::Seed { db, count } => {
            let written = seed(&db, count)?;
            println!("wrote {written} artworks to {}", db.display());
            Ok(())
        }
        Command::Version => {
            println!("pagesel_core version={}", core_version());
            Ok(())
        }
    }
}

fn seed(db: &Path, count: u32) -> Result<usize, CliError> {
    let conn = open_db(db)?;
    Ok(seed_synthetic_artworks(&SqliteArtworkRepository::new(&conn), count)?)
}

fn browse(config: &SessionConfig, source: Source, db: &Path) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    browse_with(config, source, db, stdin.lock(), &mut stdout)
}

fn browse_with<R: BufRead, W: Write>(
    config: &SessionConfig,
    source: Source,
    db: &Path,
    input: R,
    out: &mut W,
) -> Result<(), CliError> {
    match source {
        Source::Http => {
            let provider = HttpPageProvider::new(&config.api_base_url, config.request_timeout)?;
            drive(provider, config, input, out)
        }
        Source::Sqlite => {
            let conn = open_db(db)?;
            let provider = RepositoryPageProvider::new(SqliteArtworkRepository::new(&conn));
            drive(provider, config, input, out)
        }
    }
}

fn drive<P, R, W>(
    provider: P,
    config: &SessionConfig,
    input: R,
    out: &mut W,
) -> Result<(), CliError>
where
    P: PageProvider<Record = Artwork>,
    R: BufRead,
    W: Write,
{
    let mut session = TableSession::new(provider, config.page_size);
    if let Err(err) = session.load_page(PageNumber::FIRST) {
        log::warn!(
            "event=cli_open module=cli status=error error_code={} error={err}",
            err.code()
        );
    }

    repl::run(&mut session, input, out)?;
    Ok(())
}

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::{browse_with, seed, Source};
    use pagesel_core::SessionConfig;

    #[test]
    fn seeded_database_is_browsable_offline() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("listing.sqlite3");
        assert_eq!(seed(&db, 30).unwrap(), 30);

        let mut out = Vec::new();
        browse_with(
            &SessionConfig::default(),
            Source::Sqlite,
            &db,
            "bulk 14\nnext\nquit\n".as_bytes(),
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Page 1 of 3 (rows 1-12 of 30)"));
        assert!(text.contains("Page 2 of 3 (rows 13-24 of 30)"));
        assert!(text.contains("[x]      14  Untitled No. 14"));
        assert!(text.contains("[ ]      15  Untitled No. 15"));
        assert!(text.contains("Artworks (Selected: 14 rows)"));
    }

    #[test]
    fn reseeding_replaces_rows_instead_of_duplicating() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("listing.sqlite3");
        seed(&db, 20).unwrap();
        seed(&db, 20).unwrap();

        let mut out = Vec::new();
        browse_with(
            &SessionConfig::default(),
            Source::Sqlite,
            &db,
            "quit\n".as_bytes(),
            &mut out,
        )
        .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("of 20)"));
    }
}
