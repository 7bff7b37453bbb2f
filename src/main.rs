// framedump: post-mortem browser for captured stack frames

use anyhow::Context;
use clap::Parser;
use tracing::info;

use framedump::cli::{self, Cli};
use framedump::dump;
use framedump::logging;
use framedump::session::Session;
use framedump::shell;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    if !cli.assume_yes && !cli::confirm_load() {
        println!("Exiting.");
        return Ok(());
    }

    let store = dump::load(&cli.load)
        .with_context(|| format!("could not load dump '{}'", cli.load.display()))?;

    let config = cli.session_config();
    let mut session = Session::new(&store, &config);

    let mut shell = shell::spawn(config.shell);
    info!(shell = shell.name(), frames = store.len(), "starting session");
    shell.run(&mut session)
}
