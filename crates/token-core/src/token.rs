//! Token types
//!
//! A token is a named design value. Its name is the PascalCase concatenation
//! of its group path, so `Corners / Corner Radius / S` becomes
//! `CornersCornerRadiusS`.

use crate::color::{parse_color, Rgba};
use crate::gradient::{parse_gradient, Gradient};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Category
// =============================================================================

/// Token category, derived from the DTCG `$type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Solid colors
    Color,
    /// Font families and other string identifiers
    Typography,
    /// Spacing and sizing dimensions
    Spacing,
    /// Corner radii
    Radius,
    /// Shadow and glow effects, carried as their color
    Effect,
    /// Color gradients
    Gradient,
    /// Animation durations
    Duration,
}

impl Category {
    /// Map a DTCG / Tokens Studio `$type` onto a category
    pub fn from_dtcg_type(kind: &str) -> Option<Self> {
        match kind {
            "color" => Some(Self::Color),
            "spacing" | "dimension" | "sizing" => Some(Self::Spacing),
            "borderRadius" | "radius" => Some(Self::Radius),
            "boxShadow" | "shadow" | "effect" => Some(Self::Effect),
            "gradient" => Some(Self::Gradient),
            "duration" => Some(Self::Duration),
            "fontFamilies" | "fontFamily" | "fontWeights" | "typography" | "text" | "string"
            | "other" => Some(Self::Typography),
            _ => None,
        }
    }

    /// The kind of primitive tokens of this category resolve to
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::Color | Self::Effect => ValueKind::Color,
            Self::Spacing | Self::Radius => ValueKind::Number,
            Self::Typography => ValueKind::Identifier,
            Self::Gradient => ValueKind::Gradient,
            Self::Duration => ValueKind::Duration,
        }
    }

    /// Whether tokens of this category carry a color
    pub fn is_color_valued(&self) -> bool {
        self.value_kind() == ValueKind::Color
    }

    /// Lowercase category name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Typography => "typography",
            Self::Spacing => "spacing",
            Self::Radius => "radius",
            Self::Effect => "effect",
            Self::Gradient => "gradient",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Values
// =============================================================================

/// Shape of a primitive value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Four-channel color
    Color,
    /// Non-negative number
    Number,
    /// String identifier
    Identifier,
    /// Color gradient
    Gradient,
    /// Duration in milliseconds
    Duration,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => write!(f, "color"),
            Self::Number => write!(f, "number"),
            Self::Identifier => write!(f, "identifier"),
            Self::Gradient => write!(f, "gradient"),
            Self::Duration => write!(f, "duration"),
        }
    }
}

/// A fully resolved leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    /// Color with normalized channels
    Color(Rgba),
    /// Dimension in points/pixels
    Number(f64),
    /// Bare identifier such as a font family name
    Identifier(String),
    /// Color gradient
    Gradient(Gradient),
    /// Duration in milliseconds
    Duration(f64),
}

impl PrimitiveValue {
    /// Shape of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Color(_) => ValueKind::Color,
            Self::Number(_) => ValueKind::Number,
            Self::Identifier(_) => ValueKind::Identifier,
            Self::Gradient(_) => ValueKind::Gradient,
            Self::Duration(_) => ValueKind::Duration,
        }
    }

    /// Check that the value is safe to emit
    ///
    /// Colors must be normalized, numbers finite and non-negative, and
    /// identifiers non-empty and free of control characters.
    pub fn check(&self) -> Result<(), String> {
        match self {
            Self::Color(color) if !color.is_normalized() => {
                Err("color channels must lie in [0, 1]".to_string())
            }
            Self::Number(n) | Self::Duration(n) if !(n.is_finite() && *n >= 0.0) => Err(format!(
                "{} must be non-negative and finite, got {}",
                self.kind(),
                n
            )),
            Self::Identifier(id) if id.is_empty() => Err("identifier cannot be empty".to_string()),
            Self::Identifier(id) if id.chars().any(char::is_control) => {
                Err(format!("identifier cannot contain control characters: {:?}", id))
            }
            Self::Gradient(gradient) => gradient.check(),
            _ => Ok(()),
        }
    }

    /// The color, if this is a color value
    pub fn as_color(&self) -> Option<&Rgba> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }
}

/// A token's declared value: either a primitive or a reference to another token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Literal value
    Primitive(PrimitiveValue),
    /// Name of the referenced token
    Alias(String),
}

// =============================================================================
// Token
// =============================================================================

/// A named design value
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Unique PascalCase name
    pub name: String,
    /// Group path the name was derived from
    pub path: Vec<String>,
    /// Token category
    pub category: Category,
    /// Declared value
    pub value: TokenValue,
    /// Optional `$description`
    pub description: Option<String>,
}

impl Token {
    /// Create a token whose path is its name
    pub fn new(name: impl Into<String>, category: Category, value: TokenValue) -> Self {
        let name = name.into();
        Self {
            path: vec![name.clone()],
            name,
            category,
            value,
            description: None,
        }
    }

    /// Create a token with a primitive value
    pub fn primitive(name: impl Into<String>, category: Category, value: PrimitiveValue) -> Self {
        Self::new(name, category, TokenValue::Primitive(value))
    }

    /// Create an alias token
    pub fn alias(name: impl Into<String>, category: Category, target: impl Into<String>) -> Self {
        Self::new(name, category, TokenValue::Alias(target.into()))
    }
}

// =============================================================================
// Naming
// =============================================================================

/// Build a token name from its group path
///
/// Each segment is split on non-alphanumeric characters and every word is
/// capitalized, so `["Neutrals", "Light Grey"]` becomes `NeutralsLightGrey`.
pub fn token_name<S: AsRef<str>>(path: &[S]) -> String {
    let mut name = String::new();
    for segment in path {
        for word in segment.as_ref().split(|c: char| !c.is_alphanumeric()) {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                name.extend(first.to_uppercase());
                name.push_str(chars.as_str());
            }
        }
    }
    name
}

/// Parse an alias reference of the form `{Group.Token}` into the target name
pub fn parse_alias(raw: &str) -> Option<String> {
    let inner = raw.trim().strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() || inner.contains(|c| c == '{' || c == '}') {
        return None;
    }
    let path: Vec<&str> = inner.split('.').collect();
    if path.iter().any(|p| p.trim().is_empty()) {
        return None;
    }
    Some(token_name(&path))
}

/// Parse a raw `$value` for the given category
///
/// The error string describes what is wrong; callers attach the token name.
pub fn parse_value(category: Category, raw: &Value) -> Result<TokenValue, String> {
    if let Some(target) = raw.as_str().and_then(parse_alias) {
        return Ok(TokenValue::Alias(target));
    }

    // Shadow objects contribute their color, which may itself be an alias
    if category == Category::Effect {
        if let Value::Object(map) = raw {
            return match map.get("color") {
                Some(color) => parse_value(Category::Color, color),
                None => Err("shadow value has no color".to_string()),
            };
        }
    }

    let primitive = match category.value_kind() {
        ValueKind::Color => parse_color_value(raw)?,
        ValueKind::Number => parse_number_value(raw),
        ValueKind::Identifier => parse_identifier_value(raw)?,
        ValueKind::Gradient => Some(PrimitiveValue::Gradient(parse_gradient(raw)?)),
        ValueKind::Duration => parse_duration_value(raw),
    };

    match primitive {
        Some(value) => {
            value.check()?;
            Ok(TokenValue::Primitive(value))
        }
        None => Err(format!("unsupported {} value: {}", category, raw)),
    }
}

fn parse_color_value(raw: &Value) -> Result<Option<PrimitiveValue>, String> {
    match raw {
        Value::String(s) => parse_color(s)
            .map(|c| Some(PrimitiveValue::Color(c)))
            .ok_or_else(|| format!("invalid color: {}", s)),
        _ => Ok(None),
    }
}

fn parse_number_value(raw: &Value) -> Option<PrimitiveValue> {
    let number = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches("px").trim().parse::<f64>().ok(),
        _ => None,
    };
    number.map(PrimitiveValue::Number)
}

/// `200`, `"200ms"` and `"0.2s"` all mean 200 milliseconds
fn parse_duration_value(raw: &Value) -> Option<PrimitiveValue> {
    let millis = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if let Some(ms) = s.strip_suffix("ms") {
                ms.trim().parse::<f64>().ok()
            } else if let Some(secs) = s.strip_suffix('s') {
                secs.trim().parse::<f64>().ok().map(|v| v * 1000.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    millis.map(PrimitiveValue::Duration)
}

fn parse_identifier_value(raw: &Value) -> Result<Option<PrimitiveValue>, String> {
    match raw {
        Value::String(s) => Ok(Some(PrimitiveValue::Identifier(s.trim().to_string()))),
        Value::Number(n) => Ok(Some(PrimitiveValue::Identifier(n.to_string()))),
        Value::Object(_) => Err("composite typography values are not supported".to_string()),
        _ => Ok(None),
    }
}
