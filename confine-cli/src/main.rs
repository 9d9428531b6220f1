//! Main entry point for the confine CLI.
//!
//! Compiles a least-privilege sandbox profile for the given project root
//! and prints it to standard output. Diagnostics go to stderr; on any
//! failure the process exits non-zero without emitting partial output.

mod cli;
mod error;

use clap::Parser;

use cli::Cli;
use confine::{
    compile_profile, CompileOptions, Environment, GoToolchain, Logger, PathTemplate, Policy,
};
use error::CliError;

fn main() {
    // A missing ROOT is a usage error: clap prints usage to stderr and
    // exits 2 before anything else runs
    let cli = Cli::parse();

    let logger = confine::init_logger(cli.verbose, cli.quiet);

    match run(&cli, &logger) {
        Ok(rendered) => {
            // Printed only after the whole profile compiled; failures
            // never leave partial output behind
            print!("{rendered}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli, logger: &Logger) -> Result<String, CliError> {
    let environment = Environment::from_process()?;
    logger.info(&format!(
        "home directory: {}",
        environment.home().display()
    ));

    let provider = GoToolchain::new();
    let options = CompileOptions {
        root: cli.root.clone(),
        extra_write: cli
            .extra_write
            .iter()
            .cloned()
            .map(PathTemplate::from)
            .collect(),
    };

    let profile = compile_profile(&environment, &Policy::base(), &provider, &options)?;
    logger.info(&format!(
        "compiled profile: {} read grants, {} write grants, {} traversal literals",
        profile.policy().read_allow().len(),
        profile.policy().write_allow().len(),
        profile.traversal().len(),
    ));

    Ok(profile.render())
}
