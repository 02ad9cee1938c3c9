use anyhow::Context;
use clap::Parser;

use occam_cf::{
    cli::Cli,
    config::Config,
    data::{load_catalog, load_interaction_matrix},
    services::{run_evaluation, TextReport},
    telemetry::{self, RunId},
};

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();
    let config = cli.apply(Config::from_env()?);
    config.validate()?;

    let run_id = RunId::new();
    let span = telemetry::make_run_span(&run_id, config.user_index);
    let _guard = span.enter();

    let matrix = load_interaction_matrix(&config.matrix_path).with_context(|| {
        format!(
            "Failed to load interaction matrix from {}",
            config.matrix_path.display()
        )
    })?;
    let catalog = load_catalog(config.catalog_path.as_deref());

    let report = run_evaluation(run_id, &matrix, catalog.as_ref(), &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", TextReport(&report));
    }

    Ok(())
}
