use clap::Parser;
use stockdash::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    stockdash::logging::init_logging(cli.verbose);
    run(cli)
}
