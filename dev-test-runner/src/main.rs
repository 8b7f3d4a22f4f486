mod catalog;
mod cli;
mod fixture;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let command_line_interface = cli::CommandLineInterface::load();
    let summary = command_line_interface.run()?;
    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
