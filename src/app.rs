//! Whole-specification assembly.
//!
//! Builds both deployment targets, hands their code placeholders and
//! endpoint URLs to the pipeline builder, and writes the synthesized
//! resource graph to disk. This is the single construction pass; nothing
//! here runs again after synthesis.

use chrono::Utc;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::SpecConfig;
use crate::error::{AnvilError, SynthError};
use crate::model::Environment;
use crate::pipeline::{Pipeline, PipelineBuilder, TargetHandle};
use crate::target::DeploymentTarget;

/// File name of the synthesized pipeline definition
pub const PIPELINE_FILE: &str = "pipeline.json";

/// File name of the synthesis manifest
pub const MANIFEST_FILE: &str = "manifest.json";

/// The fully-constructed specification: two targets and the pipeline
pub struct App {
    targets: Vec<DeploymentTarget>,
    pipeline: Pipeline,
}

impl App {
    /// Construct and validate the whole model from configuration
    pub fn from_config(config: &SpecConfig) -> Result<Self, AnvilError> {
        config.validate()?;

        let preproduction = DeploymentTarget::new(Environment::Preproduction, &config.stack);
        let production = DeploymentTarget::new(Environment::Production, &config.stack);

        let pipeline = PipelineBuilder::new(
            config,
            TargetHandle::from_target(&preproduction),
            TargetHandle::from_target(&production),
        )
        .build()?;

        Ok(Self {
            targets: vec![preproduction, production],
            pipeline,
        })
    }

    pub fn targets(&self) -> &[DeploymentTarget] {
        &self.targets
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Write the resource graph: one template per target, the pipeline
    /// definition, and a manifest listing what was written.
    pub fn synthesize(&self, out_dir: &Path) -> Result<Vec<PathBuf>, AnvilError> {
        fs::create_dir_all(out_dir).map_err(|e| SynthError::OutputDir {
            path: out_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut written = Vec::new();
        for target in &self.targets {
            let path = out_dir.join(target.template_file_name());
            write_json(&path, &target.synthesize())?;
            debug!(stack = target.stack_name(), "wrote template");
            written.push(path);
        }

        let pipeline_path = out_dir.join(PIPELINE_FILE);
        write_json(&pipeline_path, &self.pipeline.synthesize())?;
        written.push(pipeline_path);

        let manifest = json!({
            "tool": "anvil",
            "version": env!("CARGO_PKG_VERSION"),
            "synthesized_at": Utc::now().to_rfc3339(),
            "files": written
                .iter()
                .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
                .collect::<Vec<_>>(),
        });
        let manifest_path = out_dir.join(MANIFEST_FILE);
        write_json(&manifest_path, &manifest)?;
        written.push(manifest_path);

        Ok(written)
    }
}

fn write_json(path: &Path, value: &Value) -> Result<(), SynthError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| SynthError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    fs::write(path, rendered).map_err(|e| SynthError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SpecConfig {
        let mut config = SpecConfig::default();
        config.sources.connection_arn =
            Some("arn:aws:codestar-connections:us-east-1:1:connection/x".to_string());
        config
    }

    #[test]
    fn test_app_builds_two_targets_and_five_stages() {
        let app = App::from_config(&config()).unwrap();
        assert_eq!(app.targets().len(), 2);
        assert_eq!(
            app.targets()[0].environment(),
            Environment::Preproduction
        );
        assert_eq!(app.targets()[1].environment(), Environment::Production);
        assert_eq!(app.pipeline().stages.len(), 5);
        assert_eq!(app.pipeline().total_actions(), 9);
    }

    #[test]
    fn test_synthesize_writes_templates_pipeline_and_manifest() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = App::from_config(&config()).unwrap();
        let written = app.synthesize(dir.path()).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "BackendStackPPD.template.json",
                "BackendStackPRD.template.json",
                "pipeline.json",
                "manifest.json",
            ]
        );
        for path in &written {
            assert!(path.exists(), "{} was not written", path.display());
        }

        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap())
                .unwrap();
        assert_eq!(manifest["tool"], "anvil");
        assert_eq!(manifest["files"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_synthesized_template_parses_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = App::from_config(&config()).unwrap();
        app.synthesize(dir.path()).unwrap();
        let template: Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("BackendStackPPD.template.json")).unwrap(),
        )
        .unwrap();
        assert!(template["Resources"]["TestBackendHandlerPPD"].is_object());
    }

    #[test]
    fn test_unwritable_output_dir_reports_cause() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("dist");
        fs::write(&blocker, "not a directory").unwrap();

        let app = App::from_config(&config()).unwrap();
        match app.synthesize(&blocker) {
            Err(AnvilError::Synth(SynthError::OutputDir { path, message })) => {
                assert_eq!(path, blocker.display().to_string());
                assert!(!message.is_empty(), "OS error cause was dropped");
            }
            other => panic!("expected OutputDir error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_fails_before_writing() {
        let app = App::from_config(&SpecConfig::default());
        assert!(app.is_err());
    }
}
