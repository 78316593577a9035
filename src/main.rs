use std::process::ExitCode;

use clap::Parser;

mod api;
mod archive;
mod cli;
mod config;
mod download;
mod error;
mod library;
mod progress;
mod runtime;

#[cfg(test)]
mod test_support;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();

    runtime::run(args)
}
