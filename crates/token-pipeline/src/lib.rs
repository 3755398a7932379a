//! Build orchestration for the design token pipeline
//!
//! Ties the token model, the emitters and the writer together: load the
//! configuration, build the registry once, then fan out one task per
//! (theme, target) pair.
//!
//! # Modules
//!
//! - [`config`] - `token-config.json` loading and validation
//! - [`pipeline`] - Theme planning, per-pair tasks and the build report
//! - [`error`] - Pipeline error type
//!
//! # Example
//!
//! ```rust,no_run
//! use token_pipeline::{BuildConfig, Pipeline};
//!
//! # async fn example() -> token_pipeline::Result<()> {
//! let config = BuildConfig::load("token-config.json").await?;
//! let report = Pipeline::from_config(config).run_from_config().await?;
//!
//! for failure in &report.failures {
//!     eprintln!("{} / {}: {}", failure.theme, failure.target, failure.error);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{BuildConfig, ConfigError, ThemeBinding, CONFIG_FILE};
pub use error::{PipelineError, Result};
pub use pipeline::{Artifact, BuildReport, PairFailure, Pipeline, ThemePlan, DEFAULT_THEME};
