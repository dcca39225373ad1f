//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`init`], [`validate`], or [`health`].
//! Each handler lives in its own submodule.

pub mod health;
pub mod init;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::MailSwitchError;

pub async fn dispatch(cli: Cli) -> Result<(), MailSwitchError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
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
        "\n  mailswitch v{version}: failover dispatcher for transactional email\n\n  \
         No command provided. To get started:\n\n    \
         mailswitch init                    Generate ./providers.json\n    \
         mailswitch validate                Check the providers file\n    \
         mailswitch run                     Start the server (needs ROOT_API_KEY)\n    \
         mailswitch --help                  See all commands and options\n"
    );
}
