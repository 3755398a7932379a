//! Platform emitters for resolved design tokens
//!
//! Each emitter is a pure function from a resolved token set to the text of
//! one artifact. Emitters never see aliases and share no mutable state, so a
//! single catalog can be used from many tasks at once.
//!
//! # Modules
//!
//! - [`catalog`] - Platform targets and the standard target catalog
//! - [`format`] - Headers, number/color formatting, naming and identifier rules
//! - [`ios`] - Objective-C macros, color enum header and lookup implementation
//! - [`swift`] - Swift color enum and token struct
//! - [`compose`] - Jetpack Compose color object
//! - [`css`] - CSS custom properties and SCSS variables
//! - [`js`] - TypeScript ES6 constants
//! - [`json`] - Flat JSON map
//!
//! # Example
//!
//! ```rust
//! use token_core::{Category, PrimitiveValue, ResolvedToken, ResolvedTokenSet, Rgba};
//! use token_emit::{emit, EmitOptions, TargetCatalog};
//!
//! let set = ResolvedTokenSet::new("default", vec![
//!     ResolvedToken::new("NeutralsBlack", Category::Color, PrimitiveValue::Color(Rgba::BLACK)),
//! ]);
//!
//! let catalog = TargetCatalog::standard(&EmitOptions::default());
//! let target = catalog.get("ios/macros").unwrap();
//! let text = emit(&set, target).unwrap();
//! assert!(text.contains("#define NeutralsBlack"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod compose;
pub mod css;
pub mod error;
pub mod format;
pub mod ios;
pub mod js;
pub mod json;
pub mod swift;

pub use catalog::{EmitOptions, PlatformTarget, TargetCatalog};
pub use error::{EmitError, Result};

use token_core::ResolvedTokenSet;

/// Formatter for one artifact type
pub trait Emitter: Send + Sync {
    /// Format name, e.g. `ios/macros`
    fn format(&self) -> &str;

    /// Produce the artifact text for a resolved set
    fn emit(&self, set: &ResolvedTokenSet) -> Result<String>;
}

/// Emit one target's artifact for a resolved set
pub fn emit(set: &ResolvedTokenSet, target: &PlatformTarget) -> Result<String> {
    let text = target.emit(set)?;
    tracing::debug!(
        "Emitted {} for theme '{}' ({} bytes)",
        target.id,
        set.theme(),
        text.len()
    );
    Ok(text)
}
