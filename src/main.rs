use clap::Parser;
use quantdash::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
