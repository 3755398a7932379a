//! Target catalog
//!
//! A target couples an emitter with the place its artifact is written. The
//! standard catalog groups targets by platform; configuration selects
//! platforms, each expanding to one or more targets.

use crate::compose::ComposeObjectEmitter;
use crate::css::{CssVariablesEmitter, ScssVariablesEmitter};
use crate::error::{EmitError, Result};
use crate::ios::{ColorHeaderEmitter, ColorImplEmitter, MacrosEmitter};
use crate::js::TypeScriptEs6Emitter;
use crate::json::JsonFlatEmitter;
use crate::swift::{SwiftEnumEmitter, SwiftStructEmitter};
use crate::Emitter;
use std::fmt;
use std::sync::Arc;
use token_core::ResolvedTokenSet;

/// Class name shared by the color lookup targets
pub const COLOR_CLASS: &str = "StyleDictionaryColor";

/// Emission options shared by the standard targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitOptions {
    /// Pixel size of `1rem` for web targets
    pub base_px_font_size: f64,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            base_px_font_size: 16.0,
        }
    }
}

/// One output file of one platform
#[derive(Clone)]
pub struct PlatformTarget {
    /// Unique target id, e.g. `ios/macros`
    pub id: String,
    /// Platform the target belongs to, e.g. `ios`
    pub platform: String,
    /// Directory under the theme's build directory
    pub directory: String,
    /// File name of the artifact
    pub file_name: String,
    /// Formatter producing the artifact
    pub emitter: Arc<dyn Emitter>,
}

impl PlatformTarget {
    /// Create a target whose directory is the platform name
    pub fn new(
        id: impl Into<String>,
        platform: impl Into<String>,
        file_name: impl Into<String>,
        emitter: Arc<dyn Emitter>,
    ) -> Self {
        let platform = platform.into();
        Self {
            id: id.into(),
            directory: platform.clone(),
            platform,
            file_name: file_name.into(),
            emitter,
        }
    }

    /// Override the output directory
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Emit this target's artifact for a resolved set
    pub fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        self.emitter.emit(set)
    }
}

impl fmt::Debug for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformTarget")
            .field("id", &self.id)
            .field("platform", &self.platform)
            .field("directory", &self.directory)
            .field("file_name", &self.file_name)
            .field("format", &self.emitter.format())
            .finish()
    }
}

/// Registered targets in registration order
#[derive(Debug, Clone, Default)]
pub struct TargetCatalog {
    targets: Vec<PlatformTarget>,
}

impl TargetCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every built-in target
    pub fn standard(options: &EmitOptions) -> Self {
        let targets = vec![
            PlatformTarget::new("ios/macros", "ios", "tokens.h", Arc::new(MacrosEmitter::new("tokens.h"))),
            PlatformTarget::new(
                "ios/colors.h",
                "ios",
                "StyleDictionaryColor.h",
                Arc::new(ColorHeaderEmitter::new("StyleDictionaryColor.h", COLOR_CLASS)),
            ),
            PlatformTarget::new(
                "ios/colors.m",
                "ios",
                "StyleDictionaryColor.m",
                Arc::new(ColorImplEmitter::new("StyleDictionaryColor.m", COLOR_CLASS)),
            ),
            PlatformTarget::new(
                "ios-swift/enum.swift",
                "ios-swift",
                "StyleDictionaryColor.swift",
                Arc::new(SwiftEnumEmitter::new("StyleDictionaryColor.swift", COLOR_CLASS)),
            ),
            PlatformTarget::new(
                "ios-swift/struct.swift",
                "ios-swift",
                "StyleDictionary+Struct.swift",
                Arc::new(SwiftStructEmitter::new(
                    "StyleDictionary+Struct.swift",
                    "StyleDictionaryStruct",
                )),
            ),
            PlatformTarget::new(
                "compose/object",
                "compose",
                "StyleDictionaryColor.kt",
                Arc::new(ComposeObjectEmitter::new(COLOR_CLASS, COLOR_CLASS)),
            ),
            PlatformTarget::new(
                "css/variables",
                "css",
                "tokens.css",
                Arc::new(CssVariablesEmitter::new(options.base_px_font_size)),
            ),
            PlatformTarget::new(
                "js/es6",
                "js",
                "tokens.ts",
                Arc::new(TypeScriptEs6Emitter::new(options.base_px_font_size)),
            ),
            PlatformTarget::new("json/flat", "json", "tokens.json", Arc::new(JsonFlatEmitter::new())),
            PlatformTarget::new("web/scss", "web", "tokens.scss", Arc::new(ScssVariablesEmitter::new())),
        ];

        Self { targets }
    }

    /// Register a target
    pub fn register(&mut self, target: PlatformTarget) -> Result<()> {
        if self.get(&target.id).is_some() {
            return Err(EmitError::DuplicateTarget(target.id));
        }
        self.targets.push(target);
        Ok(())
    }

    /// Get a target by id
    pub fn get(&self, id: &str) -> Option<&PlatformTarget> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Known platforms in registration order
    pub fn platforms(&self) -> Vec<&str> {
        let mut platforms: Vec<&str> = Vec::new();
        for target in &self.targets {
            if !platforms.contains(&target.platform.as_str()) {
                platforms.push(&target.platform);
            }
        }
        platforms
    }

    /// Targets of one platform
    pub fn targets_for(&self, platform: &str) -> Vec<&PlatformTarget> {
        self.targets.iter().filter(|t| t.platform == platform).collect()
    }

    /// Expand platform names into targets
    ///
    /// Repeated platforms are expanded once. Fails on the first unknown platform.
    pub fn select<S: AsRef<str>>(&self, platforms: &[S]) -> Result<Vec<PlatformTarget>> {
        let mut seen: Vec<&str> = Vec::new();
        let mut selected = Vec::new();

        for platform in platforms {
            let platform = platform.as_ref();
            if seen.contains(&platform) {
                continue;
            }
            seen.push(platform);

            let targets = self.targets_for(platform);
            if targets.is_empty() {
                tracing::debug!("Known platforms: {}", self.platforms().join(", "));
                return Err(EmitError::UnknownPlatform(platform.to_string()));
            }
            selected.extend(targets.into_iter().cloned());
        }

        Ok(selected)
    }

    /// Number of registered targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no targets are registered
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
