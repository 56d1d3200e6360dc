use std::env;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use index_images::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.has_required_paths() {
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    }

    enable_error_backtraces();
    index_images::init(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err}");
            println!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

/// Capture a backtrace on every error unless the user chose a backtrace setting.
fn enable_error_backtraces() {
    if env::var_os("RUST_LIB_BACKTRACE").is_none() && env::var_os("RUST_BACKTRACE").is_none() {
        // SAFETY: called from `main` before any other thread is spawned.
        unsafe { env::set_var("RUST_LIB_BACKTRACE", "1") };
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let options = cli
        .run_options(&config)
        .ok_or_else(|| anyhow::anyhow!("missing required positional arguments"))?;
    index_images::app::pipeline::run(&options)?;
    Ok(())
}
