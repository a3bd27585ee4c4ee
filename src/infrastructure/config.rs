use std::path::PathBuf;

use clap::Parser;

/// Command-line options. This is the only configuration source; nothing is
/// read from the environment or from disk.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "twobytwo", version, about = "Terminal 2x2 matrix editor")]
pub struct Config {
    /// File that receives diagnostic logs
    #[arg(long, default_value = "twobytwo.log")]
    pub log_file: PathBuf,

    /// Log filter directive, e.g. `debug` or `twobytwo=trace`
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the final matrix as JSON after the terminal is restored
    #[arg(long)]
    pub print_on_exit: bool,
}
