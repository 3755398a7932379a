//! Token model for the design token pipeline
//!
//! This crate turns an authoring document into a validated, alias-free
//! token graph and flattens it per theme.
//!
//! # Modules
//!
//! - [`source`] - Authoring document parsing and set selection
//! - [`token`] - Token, category and primitive value types
//! - [`color`] - Color parsing and channel conversion
//! - [`gradient`] - Gradient values and their validation
//! - [`registry`] - Base token registry and alias resolution
//! - [`theme`] - Theme overrides and resolved token sets
//!
//! # Example
//!
//! ```rust
//! use token_core::{resolve, Registry, Theme, TokenDocument};
//!
//! let doc = TokenDocument::parse(r##"{
//!     "global": {
//!         "Neutrals": {
//!             "$type": "color",
//!             "Black": { "$value": "#000000" },
//!             "Text": { "$value": "{Neutrals.Black}" }
//!         }
//!     }
//! }"##).unwrap();
//!
//! let registry = Registry::load(doc.set("global").unwrap()).unwrap();
//! let resolved = resolve(&registry, &Theme::new("default")).unwrap();
//! assert_eq!(resolved.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod color;
pub mod error;
pub mod gradient;
pub mod registry;
pub mod source;
pub mod theme;
pub mod token;

pub use color::Rgba;
pub use error::{Result, TokenError};
pub use gradient::{Gradient, GradientKind, GradientStop};
pub use registry::{resolve_in, Registry, TokenLookup};
pub use source::{flatten_set, RawNode, SetSelection, TokenDocument};
pub use theme::{resolve, ResolvedToken, ResolvedTokenSet, Theme};
pub use token::{token_name, Category, PrimitiveValue, Token, TokenValue, ValueKind};
