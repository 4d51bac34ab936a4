use std::fs::File;
use std::io::{self, BufRead, BufReader};

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use openmetrics_text::cliopt::CliOpt;
use openmetrics_text::input::{JsonDecoder, LineReader};
use openmetrics_text::output::{LineWriter, OpenMetricsEncoder};
use openmetrics_text::runner::Runner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = CliOpt::from_args();

    let default_level = if opt.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let input: Box<dyn BufRead> = match &opt.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut runner = Runner::new(
        Box::new(LineReader::new(input)),
        Box::new(JsonDecoder::new(opt.timestamp)),
        Box::new(OpenMetricsEncoder::with_eof(opt.eof)),
        Box::new(LineWriter::new(io::stdout())),
    );
    runner.run()?;

    Ok(())
}
