use anyhow::Context;
use clap::Parser;
use srcstage::Stager;

mod cli;

fn main() -> anyhow::Result<()> {
    let app = cli::App::parse();

    tracing_subscriber::fmt()
        .with_max_level(app.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = app.stage_config()?;
    let report = Stager::new(config)
        .stage()
        .context("staging source archive failed")?;

    tracing::debug!(
        source_root = %report.source_root.display(),
        unwrapped = report.unwrapped,
        entries = report.archive.entry_count,
        "done"
    );
    Ok(())
}
