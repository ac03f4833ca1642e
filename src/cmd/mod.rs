//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`init`], [`validate`], [`lookup`], or
//! [`health`]. Each handler lives in its own submodule.

pub mod health;
pub mod init;
pub mod lookup;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::ExtdirError;

pub async fn dispatch(cli: Cli) -> Result<(), ExtdirError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Lookup(ref args)) => lookup::execute(args),
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  extdir v{version} \u{2014} PBX extension tenant directory\n\n  \
         No command provided. To get started:\n\n    \
         extdir init                   Generate a starter tenants file\n    \
         extdir run                    Serve the directory (auto-detects ./extdir.yaml)\n    \
         extdir lookup 4033            Resolve one extension locally\n    \
         extdir --help                 See all commands and options\n"
    );
}
