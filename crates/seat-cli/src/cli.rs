//! CLI argument definitions for the seating planner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use seat_model::SeatingMode;

#[derive(Parser)]
#[command(
    name = "seatplan",
    version,
    about = "Exam seating planner - allocate students to rooms for every timetable slot",
    long_about = "Allocate examination seats slot by slot.\n\n\
                  Reads the timetable, course rolls, roll names and room capacities from a\n\
                  folder of CSV sheet exports, detects same-session clashes, packs students\n\
                  into rooms largest-first and writes per-slot reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Also write logs to a file (always at debug level or finer).
    #[arg(long = "log-file", alias = "log", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Allocate seats for every slot and write the reports.
    Allocate(AllocateArgs),

    /// Show room capacities in fill order.
    Rooms(RoomsArgs),

    /// Convert a JSON allocation in any tolerated shape to canonical form.
    Normalize(NormalizeArgs),
}

#[derive(Parser)]
pub struct AllocateArgs {
    /// Input workbook (.xlsx) or folder of sheet exports (in_timetable.csv, ...).
    #[arg(long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Output root; reports go to <DIR>/<date>/<session>/.
    #[arg(long = "output", value_name = "DIR")]
    pub output: PathBuf,

    /// Folder with student photos named <roll>.jpg.
    #[arg(long = "photos", value_name = "DIR")]
    pub photos: Option<PathBuf>,

    /// Seats held back in every room.
    #[arg(long = "buffer", value_name = "N", default_value_t = 0)]
    pub buffer: u32,

    /// Seating density.
    #[arg(long = "mode", value_enum, default_value = "dense")]
    pub mode: ModeArg,

    /// Skip the per-slot zip archive.
    #[arg(long = "no-archive")]
    pub no_archive: bool,
}

#[derive(Parser)]
pub struct RoomsArgs {
    /// Input workbook (.xlsx) or folder of sheet exports.
    #[arg(long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Seats held back in every room.
    #[arg(long = "buffer", value_name = "N", default_value_t = 0)]
    pub buffer: u32,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// JSON file holding an allocation.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Seating modes offered on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Dense,
    Sparse,
}

impl From<ModeArg> for SeatingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Dense => SeatingMode::Dense,
            ModeArg::Sparse => SeatingMode::Sparse,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
