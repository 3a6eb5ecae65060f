//! lsapi CLI binary entry point.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use lsapi::error::LsapiError;
use lsapi::filter::NameFilter;
use lsapi::graph::ObjectGraph;
use lsapi::style::{Palette, TreeStyle};
use lsapi::walk::{WalkOptions, Walker};

/// Recursively list the names exposed by a loaded package, formatted as
/// a readable tree.
#[derive(Parser)]
#[command(name = "lsapi")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Reflection snapshot file (JSON dump of the loaded object graph)
    snapshot: PathBuf,

    /// Package (or sub-package) to inspect
    package: String,

    /// Include private names
    #[arg(short = 'p', long)]
    private: bool,

    /// Include magic names
    #[arg(short = 'm', long)]
    magic: bool,

    /// Include all names (equivalent to `-pm')
    #[arg(short = 'a', long)]
    all: bool,

    /// Try to display names under the namespace where they are defined
    #[arg(short = 'c', long)]
    canonical: bool,

    /// Show names exposed by packages that are not under the given root package
    #[arg(short = 'x', long)]
    external: bool,

    /// Display signatures for callables (functions, methods, classes)
    #[arg(short = 's', long)]
    signatures: bool,

    /// Use basic ASCII for tree drawing (for terminal emulators with
    /// spotty unicode support)
    #[arg(short = 'u', long)]
    ugly: bool,

    /// Do not draw trees
    #[arg(short = 'U', long)]
    no_tree: bool,

    /// Do not colorize output
    #[arg(short = 'C', long)]
    no_color: bool,

    /// Do not show names nested beyond this depth from the given root
    /// package (which has depth 0)
    #[arg(short = 'D', long)]
    max_depth: Option<u32>,

    /// Log level for tracing output
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lsapi: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), LsapiError> {
    // Everything fallible happens before the first output line.
    let graph = ObjectGraph::load(&cli.snapshot)?;
    let root = graph
        .resolve(&cli.package)
        .ok_or_else(|| LsapiError::RootNotFound {
            name: cli.package.clone(),
        })?;

    let style = if cli.no_tree {
        TreeStyle::BLANK
    } else if cli.ugly {
        TreeStyle::ASCII
    } else {
        TreeStyle::UNICODE
    };
    let palette = if cli.no_color {
        Palette::plain()
    } else {
        Palette::colored()
    };
    let opts = WalkOptions {
        filter: NameFilter {
            private: cli.private,
            magic: cli.magic,
            all: cli.all,
        },
        canonical: cli.canonical,
        external: cli.external,
        signatures: cli.signatures,
        max_depth: cli.max_depth,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut walker = Walker::new(&graph, root, opts, style, palette, &mut out);
    walker.render(&cli.package)?;
    out.flush()?;
    Ok(())
}

/// Initialize tracing subscriber writing to stderr.
///
/// `RUST_LOG` overrides the flag when set.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn default_log_level_is_warn() {
        let cli = parse(&["lsapi", "snap.json", "pkg"]);
        assert!(matches!(cli.log_level, LogLevel::Warn));
    }

    #[test]
    fn parse_log_level_debug() {
        let cli = parse(&["lsapi", "snap.json", "pkg", "--log-level", "debug"]);
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert_eq!(cli.log_level.to_tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn log_levels_map_to_tracing_levels() {
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Info.to_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}
