//! Check command: validate configuration and print the topology summary.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::app::App;
use crate::config::SpecConfig;
use crate::pipeline::PipelineAction;
use crate::ui;

pub fn execute(config_path: &Path) -> Result<()> {
    let config = SpecConfig::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let app = App::from_config(&config).context("constructing the deployment model")?;

    ui::print_header("Deployment targets");
    for target in app.targets() {
        println!(
            "  {} ({}) -> GET / on {}",
            target.stack_name().bold(),
            target.environment().long_name(),
            target.api().api_name
        );
        println!("    export {} = {}", target.export_name(), target.endpoint_url());
    }

    ui::print_header("Pipeline");
    for stage in &app.pipeline().stages {
        println!("  {}", stage.name.bold());
        for action in &stage.actions {
            let kind = match action {
                PipelineAction::Source(_) => "source",
                PipelineAction::Build(_) => "build",
                PipelineAction::Deploy(_) => "deploy",
                PipelineAction::Approval(_) => "approval",
            };
            println!("    [{}] {} (run order {})", kind, action.name(), action.run_order());
        }
    }

    ui::print_success("Specification is valid");
    Ok(())
}
