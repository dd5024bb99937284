use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod discover;
mod highlight;
mod normalize;

#[derive(Parser)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: DocfixCommand,
}

#[derive(Parser)]
struct FixCodeBlocksArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "docfix.yaml")]
    config_file: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(short, long, default_value = "false")]
    dry_run: bool,
}

#[derive(Parser)]
struct RegisterLanguagesArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "docfix.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum DocfixCommand {
    /// Rewrite code-block markup in markdown files to HonKit's templating form
    FixCodeBlocks(FixCodeBlocksArgs),

    /// Ensure custom highlighter languages are registered with the generator
    RegisterLanguages(RegisterLanguagesArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        DocfixCommand::FixCodeBlocks(args) => {
            commands::fix_code_blocks::run(&args).await?;
        }
        DocfixCommand::RegisterLanguages(args) => {
            commands::register_languages::run(&args).await?;
        }
    }

    Ok(())
}
