//! Build pipeline
//!
//! A build parses the token source, selects theme sets and loads the base
//! registry once. Any failure up to that point is fatal and nothing is
//! written. Each (theme, target) pair then runs on its own task: build the
//! theme, resolve it, emit and write. A failed pair is recorded in the report
//! and never stops its siblings.

use crate::config::{BuildConfig, ConfigError};
use crate::error::{PipelineError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use token_core::{resolve, Registry, Theme, TokenDocument, TokenError};
use token_emit::{PlatformTarget, TargetCatalog};
use token_output::{ArtifactSink, FsWriter};

/// Theme id used when the source has no theme sets
pub const DEFAULT_THEME: &str = "default";

// =============================================================================
// Report
// =============================================================================

/// A written artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Theme id
    pub theme: String,
    /// Target id
    pub target: String,
    /// Destination path
    pub path: PathBuf,
    /// Bytes written
    pub bytes: usize,
}

/// A (theme, target) pair that failed
#[derive(Debug)]
pub struct PairFailure {
    /// Theme id
    pub theme: String,
    /// Target id
    pub target: String,
    /// What went wrong
    pub error: PipelineError,
}

/// Outcome of a build
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Written artifacts sorted by (theme, target)
    pub artifacts: Vec<Artifact>,
    /// Failed pairs sorted by (theme, target)
    pub failures: Vec<PairFailure>,
}

impl BuildReport {
    /// Whether every pair succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn sort(&mut self) {
        self.artifacts
            .sort_by(|a, b| (&a.theme, &a.target).cmp(&(&b.theme, &b.target)));
        self.failures
            .sort_by(|a, b| (&a.theme, &a.target).cmp(&(&b.theme, &b.target)));
    }
}

/// A theme to build and the set holding its overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePlan {
    /// Theme id
    pub id: String,
    /// Theme set key, `None` for a theme without overrides
    pub set: Option<String>,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Drives a full build
pub struct Pipeline {
    config: BuildConfig,
    catalog: TargetCatalog,
    sink: Arc<dyn ArtifactSink>,
}

impl Pipeline {
    /// Create a pipeline
    pub fn new(config: BuildConfig, catalog: TargetCatalog, sink: Arc<dyn ArtifactSink>) -> Self {
        Self {
            config,
            catalog,
            sink,
        }
    }

    /// Pipeline with the standard catalog writing under the configured build path
    pub fn from_config(config: BuildConfig) -> Self {
        let catalog = TargetCatalog::standard(&config.emit_options());
        let sink = Arc::new(FsWriter::new(config.output_config()));
        Self::new(config, catalog, sink)
    }

    /// Read the configured input file and build it
    pub async fn run_from_config(&self) -> Result<BuildReport> {
        let path = &self.config.input_file;
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PipelineError::Source {
                path: path.clone(),
                source,
            })?;

        tracing::info!("Reading token source from {}", path.display());
        self.run(&raw).await
    }

    /// Build every (theme, target) pair from raw source text
    pub async fn run(&self, raw: &str) -> Result<BuildReport> {
        self.config.validate()?;
        let targets = self.catalog.select(&self.config.platforms)?;

        let doc = TokenDocument::parse(raw)?;
        let theme_sets = self.config.selection().select(&doc, &self.config.base_set)?;

        let base = doc
            .set(&self.config.base_set)
            .ok_or_else(|| TokenError::Selection(format!("Base set '{}' not found", self.config.base_set)))?;
        let registry = Arc::new(Registry::load(base)?);

        let plans = self.plan_themes(&theme_sets)?;

        tracing::info!(
            "Building {} theme(s) x {} target(s) from {} base tokens",
            plans.len(),
            targets.len(),
            registry.len()
        );

        let doc = Arc::new(doc);
        let mut handles = Vec::with_capacity(plans.len() * targets.len());

        for plan in &plans {
            for target in &targets {
                let task = build_pair(
                    Arc::clone(&doc),
                    Arc::clone(&registry),
                    plan.clone(),
                    target.clone(),
                    Arc::clone(&self.sink),
                );
                handles.push((plan.id.clone(), target.id.clone(), tokio::spawn(task)));
            }
        }

        let mut report = BuildReport::default();
        for (theme, target, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(PipelineError::Task(e.to_string())),
            };

            match outcome {
                Ok(artifact) => report.artifacts.push(artifact),
                Err(error) => {
                    tracing::error!("Failed to build {} for theme '{}': {}", target, theme, error);
                    report.failures.push(PairFailure {
                        theme,
                        target,
                        error,
                    });
                }
            }
        }

        report.sort();
        tracing::info!(
            "Build finished: {} artifact(s) written, {} failure(s)",
            report.artifacts.len(),
            report.failures.len()
        );

        Ok(report)
    }

    /// Decide which themes to build
    ///
    /// Selected theme sets map to their bound id, or to the set key with `/`
    /// replaced by `_`. Without theme sets a single `default` theme is built.
    pub fn plan_themes(&self, theme_sets: &[&str]) -> Result<Vec<ThemePlan>> {
        let mut plans: Vec<ThemePlan> = if theme_sets.is_empty() {
            vec![ThemePlan {
                id: DEFAULT_THEME.to_string(),
                set: None,
            }]
        } else {
            theme_sets
                .iter()
                .map(|set| ThemePlan {
                    id: self
                        .config
                        .binding_for(set)
                        .map(str::to_string)
                        .unwrap_or_else(|| set.replace('/', "_")),
                    set: Some(set.to_string()),
                })
                .collect()
        };

        for binding in &self.config.themes {
            if !theme_sets.contains(&binding.set.as_str()) {
                tracing::warn!(
                    "Theme '{}' is bound to set '{}', which is not selected",
                    binding.id,
                    binding.set
                );
            }
        }

        for (i, plan) in plans.iter().enumerate() {
            if plans[..i].iter().any(|p| p.id == plan.id) {
                return Err(ConfigError::Invalid(format!("Theme id '{}' is produced twice", plan.id)).into());
            }
        }

        let only = &self.config.only_themes;
        if !only.is_empty() {
            if let Some(unknown) = only.iter().find(|id| !plans.iter().any(|p| &p.id == *id)) {
                return Err(ConfigError::Invalid(format!("Unknown theme '{}'", unknown)).into());
            }
            plans.retain(|p| only.contains(&p.id));
        }

        Ok(plans)
    }
}

async fn build_pair(
    doc: Arc<TokenDocument>,
    registry: Arc<Registry>,
    plan: ThemePlan,
    target: PlatformTarget,
    sink: Arc<dyn ArtifactSink>,
) -> Result<Artifact> {
    let theme = match &plan.set {
        Some(key) => {
            let set = doc
                .set(key)
                .ok_or_else(|| TokenError::Selection(format!("Theme set '{}' not found", key)))?;
            Theme::from_set(&plan.id, set)?
        }
        None => Theme::new(&plan.id),
    };

    let resolved = resolve(&registry, &theme)?;
    let text = token_emit::emit(&resolved, &target)?;
    let written = sink.write(&plan.id, &target, &text).await?;

    Ok(Artifact {
        theme: plan.id,
        target: target.id,
        path: written.path,
        bytes: written.bytes,
    })
}
