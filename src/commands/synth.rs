//! Synth command: build the model and write the resource graph.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::app::App;
use crate::config::SpecConfig;
use crate::ui;

pub fn execute(config_path: &Path, output: &Path) -> Result<()> {
    let config = SpecConfig::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    info!(config = %config_path.display(), "configuration loaded");

    let app = App::from_config(&config).context("constructing the deployment model")?;
    let written = app
        .synthesize(output)
        .with_context(|| format!("synthesizing into {}", output.display()))?;

    for path in &written {
        ui::print_info(&format!("wrote {}", path.display()));
    }
    ui::print_success(&format!(
        "Synthesized {} targets and a {}-stage pipeline",
        app.targets().len(),
        app.pipeline().stages.len()
    ));
    Ok(())
}
