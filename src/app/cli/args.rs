//! Command line argument definitions
//!
//! Every option that can also come from the configuration file is an `Option` (or a
//! flag pair) so that "not given on the command line" stays distinguishable from an
//! explicit value when the two sources are merged.

use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::core::styles::palette_to_clap;
use crate::core::version;

/// Log levels accepted by `--log-level` and the `[logging]` config section
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "vecscan")]
#[command(about = "Find vector3(...) and vector4(...) literals below a directory")]
#[command(version = version::version(), long_version = version::long_version())]
pub struct Args {
    /// Directory to scan
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Result output format
    #[arg(long = "format", value_name = "FORMAT", value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Follow symbolic links (loops are detected and skipped)
    #[arg(
        long = "follow-symlinks",
        action = ArgAction::SetTrue,
        overrides_with = "no_follow_symlinks"
    )]
    pub follow_symlinks: bool,

    /// Do not follow symbolic links (the default)
    #[arg(
        long = "no-follow-symlinks",
        action = ArgAction::SetTrue,
        overrides_with = "follow_symlinks"
    )]
    pub no_follow_symlinks: bool,

    /// Visit directory entries sorted by name (the default)
    #[arg(
        long = "sort",
        action = ArgAction::SetTrue,
        overrides_with = "no_sort"
    )]
    pub sort: bool,

    /// Visit directory entries in listing order instead of sorted by name
    #[arg(
        long = "no-sort",
        action = ArgAction::SetTrue,
        overrides_with = "sort"
    )]
    pub no_sort: bool,

    /// Maximum directory depth below ROOT
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Write logs to FILE instead of stderr
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue)]
    pub no_color: bool,
}

impl Args {
    /// Parse the process arguments, styling help and errors when `styled` is set
    ///
    /// Usage errors print clap's message and exit with status 2.
    pub fn parse_styled(styled: bool) -> Self {
        Self::parse_styled_from(std::env::args_os(), styled).unwrap_or_else(|e| e.exit())
    }

    /// Parse an explicit argument list (first item is the program name)
    pub fn parse_styled_from<I, T>(args: I, styled: bool) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command()
            .styles(palette_to_clap(styled))
            .try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// Colour choice given on the command line, if any
    pub fn color_override(&self) -> Option<bool> {
        flag_pair(self.color, self.no_color)
    }

    /// `--follow-symlinks` / `--no-follow-symlinks`, if either was given
    pub fn follow_symlinks_override(&self) -> Option<bool> {
        flag_pair(self.follow_symlinks, self.no_follow_symlinks)
    }

    /// `--sort` / `--no-sort`, if either was given
    pub fn sort_override(&self) -> Option<bool> {
        flag_pair(self.sort, self.no_sort)
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
