use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::env::CompleteEnv;

use gh_buddy::cli::{Cli, Commands};
use gh_buddy::color::ColorMode;
use gh_buddy::commands;
use gh_buddy::config::Config;
use gh_buddy::integrations::git::repo_root;
use gh_buddy::service::Options;

fn main() -> Result<()> {
    // Handle dynamic completion via COMPLETE environment variable
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();

    // Resolve color mode from CLI flag and environment variables
    let color_mode = ColorMode::resolve(cli.color);

    match cli.command {
        Commands::CreateBranch(args) => {
            let options = load_options(cli.yes, color_mode)?;
            commands::create_branch::cmd_create_branch(&args, options)
        }
        Commands::CreatePr(args) => {
            let options = load_options(cli.yes, color_mode)?;
            commands::create_pr::cmd_create_pr(&args, options)
        }
        Commands::Init {
            global,
            local,
            force,
        } => commands::init::cmd_init(global, local, force, color_mode),
        Commands::Completion { shell } => commands::completion::cmd_completion(&shell),
    }
}

/// Config is looked up from the repository top level when there is one
fn load_options(assume_yes: bool, color_mode: ColorMode) -> Result<Options> {
    let config = Config::load(repo_root().ok().as_deref())?;
    Ok(Options {
        assume_yes,
        color_mode,
        config,
    })
}
