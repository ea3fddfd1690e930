mod cli;
mod events;

use anyhow::Result;
use tracing_subscriber::{registry::Registry, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

use crate::cli::CLI;

fn main() -> Result<()> {
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(HierarchicalLayer::new(2));
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = CLI::init()?;
    // The reporter is dropped before exiting so its last frame gets written
    let failed = {
        let mut reporter = cli.get_reporter()?;
        events::replay(cli.get_events()?, &mut reporter)?
    };

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
