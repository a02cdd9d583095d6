use batch_matching_engine::cli::{init_logging, run, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => {
            println!(
                "Processing completed. Results saved in {}",
                cli.output.display()
            );
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        },
    }
}
