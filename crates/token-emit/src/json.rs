//! Flat JSON map of token name to value

use crate::error::Result;
use crate::format::{css_color, css_gradient};
use crate::Emitter;
use serde_json::{Map, Number, Value};
use token_core::{PrimitiveValue, ResolvedTokenSet};

/// `{ "Name": value }` with keys in sorted order
#[derive(Debug, Clone, Default)]
pub struct JsonFlatEmitter;

impl JsonFlatEmitter {
    /// Format name
    pub const FORMAT: &'static str = "json/flat";

    /// Create the emitter
    pub fn new() -> Self {
        Self
    }
}

fn json_number(n: f64) -> Value {
    if n.fract() == 0.0 && n <= u64::MAX as f64 {
        return Value::from(n as u64);
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

fn json_value(value: &PrimitiveValue) -> Value {
    match value {
        PrimitiveValue::Color(color) => Value::String(css_color(color)),
        // Durations stay in milliseconds
        PrimitiveValue::Number(n) | PrimitiveValue::Duration(n) => json_number(*n),
        PrimitiveValue::Identifier(id) => Value::String(id.clone()),
        PrimitiveValue::Gradient(gradient) => Value::String(css_gradient(gradient)),
    }
}

impl Emitter for JsonFlatEmitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let map: Map<String, Value> = set
            .iter()
            .map(|token| (token.name.clone(), json_value(&token.value)))
            .collect();

        let mut out = serde_json::to_string_pretty(&Value::Object(map))?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_core::{Category, Gradient, GradientKind, GradientStop, ResolvedToken, Rgba};

    #[test]
    fn test_flat_json() {
        let set = ResolvedTokenSet::new(
            "zrh-default",
            vec![
                ResolvedToken::new("Primary01", Category::Color, PrimitiveValue::Color(Rgba::from_rgba8(0xcc, 0, 0, 255))),
                ResolvedToken::new("CornersCornerRadiusM", Category::Radius, PrimitiveValue::Number(12.0)),
                ResolvedToken::new("SpacingHalf", Category::Spacing, PrimitiveValue::Number(0.5)),
                ResolvedToken::new(
                    "SystemVariantSwitcher",
                    Category::Typography,
                    PrimitiveValue::Identifier("ZRH".into()),
                ),
            ],
        );

        let text = JsonFlatEmitter::new().emit(&set).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed["Primary01"], "#cc0000");
        assert_eq!(parsed["CornersCornerRadiusM"], 12);
        assert_eq!(parsed["SpacingHalf"], 0.5);
        assert_eq!(parsed["SystemVariantSwitcher"], "ZRH");
        assert!(text.contains("\"CornersCornerRadiusM\": 12,"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_gradient_and_duration_values() {
        let set = ResolvedTokenSet::new(
            "default",
            vec![
                ResolvedToken::new(
                    "GradientsBrand",
                    Category::Gradient,
                    PrimitiveValue::Gradient(Gradient {
                        kind: GradientKind::Radial,
                        angle: 0.0,
                        stops: vec![GradientStop { color: Rgba::BLACK, position: None }],
                    }),
                ),
                ResolvedToken::new("MotionFast", Category::Duration, PrimitiveValue::Duration(200.0)),
            ],
        );

        let parsed: Value = serde_json::from_str(&JsonFlatEmitter::new().emit(&set).unwrap()).unwrap();
        assert_eq!(parsed["GradientsBrand"], "radial-gradient(0deg, rgb(0, 0, 0))");
        assert_eq!(parsed["MotionFast"], 200);
    }
}
