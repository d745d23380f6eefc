use anyhow::Result;
use clap::Parser;
use relcycle_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    relcycle_cli::run(cli)?;
    Ok(())
}
