//! Widget policy evaluation command

use super::{emit, read_input, OutputFormat};
use crate::config::PolicyConfig;
use crate::policy::{
    EnvironmentContext, ExecutionMode, HttpManifestConfig, HttpManifestSource, ManifestDocument,
    ManifestSource, PolicyEngine, PolicyEvaluationContext, StaticManifestSource,
};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Widget id
    #[arg(long)]
    pub widget: String,

    /// Action being attempted
    #[arg(long)]
    pub action: String,

    /// Action input as key=value; values are parsed as JSON when possible
    #[arg(long = "input", value_parser = parse_input)]
    pub inputs: Vec<(String, Value)>,

    /// Evaluate as live trading regardless of configuration
    #[arg(long)]
    pub live: bool,

    /// Use a local manifest file instead of the manifest service
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

fn parse_input(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty input key in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

impl EvaluateArgs {
    pub async fn execute(&self, config: &PolicyConfig) -> anyhow::Result<()> {
        let source = self.manifest_source(config)?;
        let engine = PolicyEngine::new(source).with_fetch_timeout(config.fetch_timeout());

        let mode = if self.live {
            ExecutionMode::Live
        } else {
            config.environment
        };
        let mut context = PolicyEvaluationContext::new(&self.widget, &self.action)
            .with_environment(EnvironmentContext {
                mode,
                ..EnvironmentContext::default()
            });
        for (key, value) in &self.inputs {
            context = context.with_input(key.clone(), value.clone());
        }

        let result = engine.evaluate(&context).await?;
        tracing::info!(
            widget_id = %result.widget_id,
            decision = %result.decision,
            "Evaluation complete"
        );
        emit(self.format, &result, |r| r.format_table())
    }

    fn manifest_source(&self, config: &PolicyConfig) -> anyhow::Result<Box<dyn ManifestSource>> {
        if let Some(path) = &self.manifest {
            let document = ManifestDocument::from_json(&read_input(path)?)?;
            let source = StaticManifestSource::new().with_manifest(self.widget.clone(), document);
            return Ok(Box::new(source));
        }

        match &config.manifest_base_url {
            Some(base_url) => {
                let http = HttpManifestConfig {
                    base_url: base_url.clone(),
                    timeout: config.fetch_timeout(),
                };
                Ok(Box::new(HttpManifestSource::new(http)?))
            }
            None => {
                tracing::debug!("No manifest service configured");
                Ok(Box::new(StaticManifestSource::new()))
            }
        }
    }
}
