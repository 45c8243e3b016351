use clap::Parser;
use drawdown::cli::{init_tracing, run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
