//! Token registry and alias resolution
//!
//! The registry holds the base token set keyed by name in declaration order.
//! Alias chains are followed iteratively with an explicit
//! resolution path, so a cycle is reported instead of recursing forever.
//!
//! # Example
//!
//! ```rust
//! use token_core::{Category, PrimitiveValue, Registry, Token};
//!
//! let registry = Registry::from_tokens(vec![
//!     Token::primitive("Primary07", Category::Color, PrimitiveValue::Number(0.0)),
//! ]);
//! assert!(registry.is_err());
//!
//! let registry = Registry::from_tokens(vec![
//!     Token::primitive("Radius", Category::Radius, PrimitiveValue::Number(6.0)),
//!     Token::alias("Button", Category::Radius, "Radius"),
//! ])
//! .unwrap();
//! assert_eq!(registry.resolve("Button").unwrap(), PrimitiveValue::Number(6.0));
//! ```

use crate::error::{Result, TokenError};
use crate::source::{flatten_set, RawNode};
use crate::token::{PrimitiveValue, Token, TokenValue};
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Name-based token lookup used by alias resolution
///
/// Implemented by the registry itself and by theme views that layer
/// overrides on top of it.
pub trait TokenLookup {
    /// Find a token by name
    fn lookup(&self, name: &str) -> Option<&Token>;
}

/// Resolve a token to its terminal primitive
///
/// Every hop must stay in the starting token's category family; the terminal
/// primitive must have the family's value kind.
pub fn resolve_in<L>(lookup: &L, name: &str) -> Result<PrimitiveValue>
where
    L: TokenLookup + ?Sized,
{
    let start = lookup
        .lookup(name)
        .ok_or_else(|| TokenError::UnknownToken(name.to_string()))?;
    let kind = start.category.value_kind();

    let mut path = vec![start.name.clone()];
    let mut current = start;

    loop {
        match &current.value {
            TokenValue::Primitive(value) => {
                if value.kind() != kind {
                    return Err(TokenError::validation(
                        &start.name,
                        format!("expected a {} value, found a {} value", kind, value.kind()),
                    ));
                }
                return Ok(value.clone());
            }
            TokenValue::Alias(target) => {
                if path.iter().any(|visited| visited == target) {
                    path.push(target.clone());
                    return Err(TokenError::CyclicAlias { cycle: path });
                }

                let next = lookup
                    .lookup(target)
                    .ok_or_else(|| TokenError::UnresolvedAlias {
                        token: current.name.clone(),
                        target: target.clone(),
                    })?;

                if next.category.value_kind() != kind {
                    return Err(TokenError::validation(
                        &start.name,
                        format!(
                            "alias '{}' points at {} token '{}'",
                            current.name, next.category, next.name
                        ),
                    ));
                }

                path.push(target.clone());
                current = next;
            }
        }
    }
}

/// Validated base token set
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Tokens keyed by name, in declaration order
    tokens: IndexMap<String, Token>,
}

impl Registry {
    /// Load the registry from the base set of an authoring document
    pub fn load(base: &RawNode) -> Result<Self> {
        Self::from_tokens(flatten_set(base)?)
    }

    /// Build a registry from tokens
    ///
    /// Fails on duplicate names, on out-of-range primitives and on any token
    /// that does not resolve.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(tokens.len());
        for token in tokens {
            match map.entry(token.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(TokenError::DuplicateName { name: token.name });
                }
                Entry::Vacant(slot) => {
                    slot.insert(token);
                }
            }
        }

        let registry = Self { tokens: map };
        registry.validate()?;

        tracing::debug!("Loaded token registry with {} tokens", registry.len());
        Ok(registry)
    }

    /// Check every primitive and resolve every token, failing on the first
    /// broken one
    pub fn validate(&self) -> Result<()> {
        for token in self.tokens.values() {
            if let TokenValue::Primitive(value) = &token.value {
                value
                    .check()
                    .map_err(|message| TokenError::validation(&token.name, message))?;
            }
        }
        for name in self.tokens.keys() {
            resolve_in(self, name)?;
        }
        Ok(())
    }

    /// Resolve a token to its primitive value
    pub fn resolve(&self, name: &str) -> Result<PrimitiveValue> {
        resolve_in(self, name)
    }

    /// Get a token by name
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.tokens.get(name)
    }

    /// Check if a token is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    /// Token names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.tokens.keys().map(String::as_str).collect()
    }
}

impl TokenLookup for Registry {
    fn lookup(&self, name: &str) -> Option<&Token> {
        self.get(name)
    }
}
