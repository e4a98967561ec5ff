use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config = Config::load_from(&cli.config)?;

    match cli.command {
        Commands::Generate {
            base_url,
            collection_name,
            build_number,
            output_dir,
            profile,
        } => handlers::generate::handle(
            &config.collection,
            handlers::generate::Overrides {
                base_url,
                collection_name,
                build_number,
                output_dir,
                profile: profile.map(Into::into),
            },
            cli.format,
        ),

        Commands::Tree {
            input,
            print,
            expand_all,
        } => handlers::tree::handle(input.as_deref(), config.view, print, expand_all),
    }
}
