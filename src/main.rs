use anyhow::Result;
use clap::Parser;
use rsp_questions::cli::{Cli, run};
use rsp_questions::logging::init_logging;
use tracing::info;

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    info!(?cli, "Parsed CLI arguments");

    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())?;

    info!("rsp-questions finished");
    Ok(())
}
