//! Theme overrides and resolution
//!
//! A theme is a set of overrides keyed by token name. Resolving a theme walks
//! the registry in declaration order and substitutes overrides, so aliases in
//! the base set see the overridden targets.

use crate::color::Rgba;
use crate::error::{Result, TokenError};
use crate::registry::{resolve_in, Registry, TokenLookup};
use crate::source::{flatten_set, RawNode};
use crate::token::{Category, PrimitiveValue, Token, TokenValue};
use indexmap::map::Entry;
use indexmap::IndexMap;

// =============================================================================
// Theme
// =============================================================================

/// A named set of token overrides
#[derive(Debug, Clone, Default)]
pub struct Theme {
    id: String,
    overrides: IndexMap<String, Token>,
}

impl Theme {
    /// Create a theme with no overrides
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            overrides: IndexMap::new(),
        }
    }

    /// Build a theme from a theme set of the authoring document
    pub fn from_set(id: impl Into<String>, set: &RawNode) -> Result<Self> {
        Self::new(id).with_overrides(flatten_set(set)?)
    }

    /// Add overrides, failing on duplicate names
    pub fn with_overrides(mut self, tokens: Vec<Token>) -> Result<Self> {
        for token in tokens {
            match self.overrides.entry(token.name.clone()) {
                Entry::Occupied(_) => return Err(TokenError::DuplicateName { name: token.name }),
                Entry::Vacant(slot) => {
                    slot.insert(token);
                }
            }
        }
        Ok(self)
    }

    /// Theme id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Overrides in declaration order
    pub fn overrides(&self) -> impl Iterator<Item = &Token> {
        self.overrides.values()
    }

    /// Number of overrides
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Override for a name, if any
    pub fn override_for(&self, name: &str) -> Option<&Token> {
        self.overrides.get(name)
    }
}

/// Registry with a theme's overrides layered on top
struct ThemeView<'a> {
    registry: &'a Registry,
    theme: &'a Theme,
}

impl TokenLookup for ThemeView<'_> {
    fn lookup(&self, name: &str) -> Option<&Token> {
        self.theme
            .override_for(name)
            .or_else(|| self.registry.get(name))
    }
}

// =============================================================================
// Resolved set
// =============================================================================

/// A token with its alias chain resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    /// Token name
    pub name: String,
    /// Category of the base token
    pub category: Category,
    /// Terminal value
    pub value: PrimitiveValue,
    /// Description of the effective token
    pub description: Option<String>,
}

impl ResolvedToken {
    /// Create a resolved token without a description
    pub fn new(name: impl Into<String>, category: Category, value: PrimitiveValue) -> Self {
        Self {
            name: name.into(),
            category,
            value,
            description: None,
        }
    }
}

/// The flat, alias-free token list of one theme
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTokenSet {
    theme: String,
    tokens: IndexMap<String, ResolvedToken>,
}

impl ResolvedTokenSet {
    /// Create a resolved set from tokens in declaration order
    ///
    /// A later token with an already used name replaces the earlier one in
    /// place.
    pub fn new(theme: impl Into<String>, tokens: Vec<ResolvedToken>) -> Self {
        Self {
            theme: theme.into(),
            tokens: tokens.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    /// Theme id
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedToken> {
        self.tokens.values()
    }

    /// Token names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.tokens.keys().map(String::as_str).collect()
    }

    /// Get a token by name
    pub fn get(&self, name: &str) -> Option<&ResolvedToken> {
        self.tokens.get(name)
    }

    /// Color-valued tokens in declaration order
    pub fn colors(&self) -> impl Iterator<Item = (&ResolvedToken, &Rgba)> {
        self.tokens
            .values()
            .filter_map(|t| t.value.as_color().map(|c| (t, c)))
    }
}

/// Resolve a theme against the registry
///
/// The result lists every base token in base declaration order, with the
/// theme's overrides applied.
pub fn resolve(registry: &Registry, theme: &Theme) -> Result<ResolvedTokenSet> {
    for token in theme.overrides() {
        if let TokenValue::Primitive(value) = &token.value {
            value
                .check()
                .map_err(|message| TokenError::validation(&token.name, message))?;
        }

        let base = registry
            .get(&token.name)
            .ok_or_else(|| TokenError::UnknownOverride {
                theme: theme.id().to_string(),
                name: token.name.clone(),
            })?;

        if base.category.value_kind() != token.category.value_kind() {
            return Err(TokenError::validation(
                &token.name,
                format!(
                    "theme '{}' overrides a {} token with a {} value",
                    theme.id(),
                    base.category,
                    token.category
                ),
            ));
        }
    }

    let view = ThemeView { registry, theme };
    let tokens = registry
        .iter()
        .map(|base| {
            let effective = theme.override_for(&base.name).unwrap_or(base);
            Ok(ResolvedToken {
                name: base.name.clone(),
                category: base.category,
                value: resolve_in(&view, &base.name)?,
                description: effective
                    .description
                    .clone()
                    .or_else(|| base.description.clone()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "Resolved theme '{}' ({} tokens, {} overrides)",
        theme.id(),
        tokens.len(),
        theme.override_count()
    );

    Ok(ResolvedTokenSet::new(theme.id(), tokens))
}
