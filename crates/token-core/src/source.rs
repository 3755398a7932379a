//! Authoring document parsing
//!
//! The authoring source is a DTCG-style JSON document. Its top-level keys are
//! token sets (`global`, `Themes/DXN`, ...); metadata keys start with `$`.
//! Inside a set, groups nest arbitrarily and a token is any object carrying a
//! `$value`. `$type` may be declared on a group and is inherited.
//!
//! Parsing keeps declaration order and duplicate keys so the registry can
//! report duplicates instead of silently keeping the last one.

use crate::error::{Result, TokenError};
use crate::token::{parse_value, token_name, Category, Token};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

// =============================================================================
// Raw tree
// =============================================================================

/// A group or token as written in the authoring document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNode {
    /// `$type`, if declared on this node
    pub kind: Option<String>,
    /// `$value`; present only on tokens
    pub value: Option<Value>,
    /// `$description`
    pub description: Option<String>,
    /// Child groups and tokens in declaration order
    pub children: Vec<(String, RawNode)>,
}

impl RawNode {
    /// First child with the given key
    pub fn child(&self, key: &str) -> Option<&RawNode> {
        self.children.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawNodeVisitor;

        impl<'de> Visitor<'de> for RawNodeVisitor {
            type Value = RawNode;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a token group or a token object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut node = RawNode::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "$value" => node.value = Some(map.next_value()?),
                        "$type" => node.kind = Some(map.next_value()?),
                        "$description" => node.description = map.next_value()?,
                        k if k.starts_with('$') => {
                            map.next_value::<IgnoredAny>()?;
                        }
                        _ => {
                            let child = map.next_value::<RawNode>()?;
                            node.children.push((key, child));
                        }
                    }
                }

                if node.value.is_some() && !node.children.is_empty() {
                    return Err(de::Error::custom("a token cannot contain nested groups"));
                }

                Ok(node)
            }
        }

        deserializer.deserialize_map(RawNodeVisitor)
    }
}

// =============================================================================
// Document
// =============================================================================

/// A parsed authoring document
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    root: RawNode,
}

impl TokenDocument {
    /// Parse the document from JSON text
    pub fn parse(raw: &str) -> Result<Self> {
        let root: RawNode = serde_json::from_str(raw)?;
        Ok(Self { root })
    }

    /// Top-level set keys in declaration order, metadata excluded
    pub fn set_keys(&self) -> Vec<&str> {
        self.root.children.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Get a set by key
    pub fn set(&self, key: &str) -> Option<&RawNode> {
        self.root.child(key)
    }
}

/// Flatten a token set into tokens in declaration order
pub fn flatten_set(set: &RawNode) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut path = Vec::new();
    flatten_node(set, None, &mut path, &mut tokens)?;
    Ok(tokens)
}

fn flatten_node(
    node: &RawNode,
    inherited: Option<&str>,
    path: &mut Vec<String>,
    out: &mut Vec<Token>,
) -> Result<()> {
    let kind = node.kind.as_deref().or(inherited);

    if let Some(raw) = &node.value {
        let name = token_name(path.as_slice());
        if name.is_empty() {
            return Err(TokenError::validation(path.join("."), "token has an empty name"));
        }

        let kind = kind.ok_or_else(|| TokenError::validation(&name, "missing $type"))?;
        let category = Category::from_dtcg_type(kind)
            .ok_or_else(|| TokenError::validation(&name, format!("unsupported $type '{}'", kind)))?;
        let value = parse_value(category, raw).map_err(|message| TokenError::validation(&name, message))?;

        out.push(Token {
            name,
            path: path.clone(),
            category,
            value,
            description: node.description.clone(),
        });
        return Ok(());
    }

    for (key, child) in &node.children {
        path.push(key.clone());
        flatten_node(child, kind, path, out)?;
        path.pop();
    }

    Ok(())
}

// =============================================================================
// Set selection
// =============================================================================

/// Chooses which top-level sets are treated as themes
///
/// At most one of `include_keys` and `exclude_keys` may be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetSelection {
    /// Only these sets are processed
    pub include_keys: Vec<String>,
    /// Every set except these is processed
    pub exclude_keys: Vec<String>,
}

impl SetSelection {
    /// Create a selection
    pub fn new(include_keys: Vec<String>, exclude_keys: Vec<String>) -> Self {
        Self { include_keys, exclude_keys }
    }

    /// Fail unless at most one of the key lists is given
    pub fn check(&self) -> Result<()> {
        if !self.include_keys.is_empty() && !self.exclude_keys.is_empty() {
            return Err(TokenError::Selection(
                "Cannot specify both includeKeys and excludeKeys. Choose one approach.".to_string(),
            ));
        }
        Ok(())
    }

    /// Select theme set keys from the document
    ///
    /// The base set must exist and is never selected as a theme.
    pub fn select<'a>(&self, doc: &'a TokenDocument, base_set: &str) -> Result<Vec<&'a str>> {
        self.check()?;

        let keys = doc.set_keys();
        if !keys.contains(&base_set) {
            return Err(TokenError::Selection(format!(
                "Base set '{}' not found in the token source",
                base_set
            )));
        }

        let mut seen = Vec::new();
        for key in &keys {
            if seen.contains(key) {
                return Err(TokenError::Selection(format!("Set '{}' is declared twice", key)));
            }
            seen.push(*key);
        }

        let candidates: Vec<&str> = keys.into_iter().filter(|k| *k != base_set).collect();

        if !self.include_keys.is_empty() {
            let missing: Vec<&str> = self
                .include_keys
                .iter()
                .map(String::as_str)
                .filter(|k| *k != base_set && !candidates.contains(k))
                .collect();
            if !missing.is_empty() {
                tracing::warn!(
                    "The following requested keys do not exist in the tokens file: {}",
                    missing.join(", ")
                );
            }

            let selected: Vec<&str> = candidates
                .into_iter()
                .filter(|k| self.include_keys.iter().any(|i| i == k))
                .collect();
            if selected.is_empty() {
                return Err(TokenError::Selection(
                    "None of the requested include keys exist in the tokens file.".to_string(),
                ));
            }
            return Ok(selected);
        }

        if !self.exclude_keys.is_empty() {
            let remaining: Vec<&str> = candidates
                .into_iter()
                .filter(|k| !self.exclude_keys.iter().any(|e| e == k))
                .collect();
            if remaining.is_empty() {
                return Err(TokenError::Selection(
                    "All top-level keys would be excluded by the current excludeKeys configuration."
                        .to_string(),
                ));
            }
            return Ok(remaining);
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{PrimitiveValue, TokenValue};

    const DOC: &str = r##"{
        "$metadata": { "tokenSetOrder": ["global", "Themes/DXN"] },
        "$themes": [],
        "global": {
            "Neutrals": {
                "$type": "color",
                "Black": { "$value": "#000000", "$description": "Pure black" },
                "Light Grey": { "$value": "#fbfbfb" }
            },
            "Corners": {
                "Corner Radius": {
                    "S": { "$type": "borderRadius", "$value": "6" }
                }
            }
        },
        "Themes/DXN": {
            "Neutrals": { "Black": { "$type": "color", "$value": "#111111" } }
        },
        "Themes/ZRH": {}
    }"##;

    #[test]
    fn test_parse_document_set_keys() {
        let doc = TokenDocument::parse(DOC).unwrap();
        assert_eq!(doc.set_keys(), vec!["global", "Themes/DXN", "Themes/ZRH"]);
        assert!(doc.set("global").is_some());
        assert!(doc.set("$themes").is_none());
    }

    #[test]
    fn test_flatten_set_preserves_order_and_inherits_type() {
        let doc = TokenDocument::parse(DOC).unwrap();
        let tokens = flatten_set(doc.set("global").unwrap()).unwrap();

        let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["NeutralsBlack", "NeutralsLightGrey", "CornersCornerRadiusS"]);

        assert_eq!(tokens[0].category, Category::Color);
        assert_eq!(tokens[0].description.as_deref(), Some("Pure black"));
        assert_eq!(tokens[0].path, vec!["Neutrals".to_string(), "Black".to_string()]);
        assert_eq!(tokens[2].category, Category::Radius);
        assert_eq!(tokens[2].value, TokenValue::Primitive(PrimitiveValue::Number(6.0)));
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let doc = TokenDocument::parse(
            r##"{ "global": { "$type": "color",
                "Primary01": { "$value": "#cc0000" },
                "Primary01": { "$value": "#0a0a82" } } }"##,
        )
        .unwrap();
        let tokens = flatten_set(doc.set("global").unwrap()).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].name, tokens[1].name);
    }

    #[test]
    fn test_missing_type_is_validation_error() {
        let doc = TokenDocument::parse(r##"{ "global": { "Black": { "$value": "#000" } } }"##).unwrap();
        let result = flatten_set(doc.set("global").unwrap());
        assert!(matches!(result, Err(TokenError::Validation { token, .. }) if token == "Black"));
    }

    #[test]
    fn test_token_with_children_is_rejected() {
        let result = TokenDocument::parse(
            r##"{ "global": { "Black": { "$type": "color", "$value": "#000", "Nested": {} } } }"##,
        );
        assert!(matches!(result, Err(TokenError::Parse(_))));
    }

    #[test]
    fn test_scalar_group_member_is_rejected() {
        let result = TokenDocument::parse(r##"{ "global": { "Black": 3 } }"##);
        assert!(matches!(result, Err(TokenError::Parse(_))));
    }

    #[test]
    fn test_select_all_candidates() {
        let doc = TokenDocument::parse(DOC).unwrap();
        let selected = SetSelection::default().select(&doc, "global").unwrap();
        assert_eq!(selected, vec!["Themes/DXN", "Themes/ZRH"]);
    }

    #[test]
    fn test_select_include_keys() {
        let doc = TokenDocument::parse(DOC).unwrap();
        let selection = SetSelection::new(vec!["Themes/ZRH".into(), "Themes/AMS".into()], vec![]);
        assert_eq!(selection.select(&doc, "global").unwrap(), vec!["Themes/ZRH"]);

        let selection = SetSelection::new(vec!["Themes/AMS".into()], vec![]);
        assert!(matches!(
            selection.select(&doc, "global"),
            Err(TokenError::Selection(_))
        ));
    }

    #[test]
    fn test_select_exclude_keys() {
        let doc = TokenDocument::parse(DOC).unwrap();
        let selection = SetSelection::new(vec![], vec!["Themes/DXN".into()]);
        assert_eq!(selection.select(&doc, "global").unwrap(), vec!["Themes/ZRH"]);

        let selection = SetSelection::new(vec![], vec!["Themes/DXN".into(), "Themes/ZRH".into()]);
        assert!(selection.select(&doc, "global").is_err());
    }

    #[test]
    fn test_select_rejects_both_patterns() {
        let doc = TokenDocument::parse(DOC).unwrap();
        let selection = SetSelection::new(vec!["Themes/DXN".into()], vec!["Themes/ZRH".into()]);
        assert!(matches!(
            selection.select(&doc, "global"),
            Err(TokenError::Selection(_))
        ));
    }

    #[test]
    fn test_select_requires_base_set() {
        let doc = TokenDocument::parse(DOC).unwrap();
        assert!(SetSelection::default().select(&doc, "core").is_err());
    }
}
