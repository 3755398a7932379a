//! Artifact output for the design token pipeline
//!
//! Generated files land at `<root>/<theme>/<directory>/<file_name>`. Files are
//! overwritten wholesale and never read back. With atomic writes enabled a
//! reader sees either the previous file or the complete new one.
//!
//! # Example
//!
//! ```rust,no_run
//! use token_output::{ArtifactSink, FsWriter, OutputConfig};
//! # use token_emit::{EmitOptions, TargetCatalog};
//!
//! # async fn example() -> token_output::Result<()> {
//! let writer = FsWriter::new(OutputConfig::new("build"));
//! # let catalog = TargetCatalog::standard(&EmitOptions::default());
//! # let target = catalog.get("css/variables").unwrap();
//! let artifact = writer.write("dxn-default", target, ":root {}\n").await?;
//! println!("wrote {} bytes to {}", artifact.bytes, artifact.path.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod writer;

pub use writer::{ArtifactSink, FsWriter, OutputConfig, OutputError, Result, WrittenArtifact};
