//! bfp - plan routes and flight plans from the command line.

use anyhow::Result;
use bfp_cli::{commands, Cli, Config};
use bfp_core::SystemClock;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bfp_core=info".parse()?)
                .add_directive("bfp_cli=info".parse()?),
        )
        .init();

    let config = Config::from_env().with_chart_override(cli.chart);
    let chart = config.load_chart()?;

    let output = commands::run(cli.command, chart, &SystemClock)?;
    print!("{output}");

    Ok(())
}
