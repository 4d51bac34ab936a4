use std::path::PathBuf;

use structopt::StructOpt;

use crate::model::{parse_iso_time, Timestamp};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "omtext",
    about = "Render JSON metric definitions as OpenMetrics text"
)]
pub struct CliOpt {
    /// Read definitions from this file instead of stdin.
    #[structopt(long = "input", short = "i", parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Timestamp for definitions without one (RFC 3339 or "now").
    #[structopt(long = "timestamp", short = "t", parse(try_from_str = parse_iso_time))]
    pub timestamp: Option<Timestamp>,

    /// Terminate the output with "# EOF".
    #[structopt(long = "eof")]
    pub eof: bool,

    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,
}
