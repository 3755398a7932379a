//! Gradient values
//!
//! A gradient token's `$value` is an object:
//!
//! ```json
//! {
//!   "type": "linear",
//!   "angle": 90,
//!   "stops": [
//!     { "color": "#1415fa", "position": "0%" },
//!     { "color": "#cc0000", "alpha": 0.5, "position": "100%" }
//!   ]
//! }
//! ```
//!
//! `type` defaults to `linear`. `alpha` replaces the stop color's alpha.

use crate::color::{parse_color, Rgba};
use serde_json::Value;
use std::fmt;

/// Gradient shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientKind {
    /// `linear-gradient`
    Linear,
    /// `radial-gradient`
    Radial,
    /// `angular-gradient`
    Angular,
    /// `conic-gradient`
    Conic,
}

impl GradientKind {
    /// Lowercase name used as the CSS function prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Radial => "radial",
            Self::Angular => "angular",
            Self::Conic => "conic",
        }
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One color stop
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Stop color, alpha already applied
    pub color: Rgba,
    /// Position as written, e.g. `50%`
    pub position: Option<String>,
}

/// A resolved gradient
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// Gradient shape
    pub kind: GradientKind,
    /// Angle in degrees
    pub angle: f64,
    /// Color stops in declaration order
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Check channel ranges, the angle and stop positions
    pub fn check(&self) -> Result<(), String> {
        if !self.angle.is_finite() {
            return Err(format!("gradient angle must be finite, got {}", self.angle));
        }
        if self.stops.is_empty() {
            return Err("gradient needs at least one stop".to_string());
        }
        for stop in &self.stops {
            if !stop.color.is_normalized() {
                return Err("gradient stop color channels must lie in [0, 1]".to_string());
            }
            if let Some(position) = &stop.position {
                check_position(position)?;
            }
        }
        Ok(())
    }
}

// Positions are pasted into generated code; keep them to a CSS length or percentage
fn check_position(position: &str) -> Result<(), String> {
    let valid = !position.is_empty()
        && position
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '%' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(format!("invalid gradient stop position: {:?}", position))
    }
}

/// JavaScript `typeof` of a JSON value, used in error messages
fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) => "object",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
    }
}

/// Parse a gradient object
///
/// The error string describes what is wrong; callers attach the token name.
pub fn parse_gradient(raw: &Value) -> Result<Gradient, String> {
    let Value::Object(map) = raw else {
        return Err(format!("unsupported gradient value: {}", raw));
    };

    let kind = match map.get("type") {
        None => GradientKind::Linear,
        Some(Value::String(s)) if s == "linear" => GradientKind::Linear,
        Some(Value::String(s)) if s == "radial" => GradientKind::Radial,
        Some(Value::String(s)) if s == "angular" => GradientKind::Angular,
        Some(Value::String(s)) if s == "conic" => GradientKind::Conic,
        Some(other) => {
            let shown = other.as_str().map(str::to_string).unwrap_or_else(|| other.to_string());
            return Err(format!(
                "Invalid gradient type: {}. It should be either 'linear' or 'radial' or 'angular' or 'conic'.",
                shown
            ));
        }
    };

    let angle = match map.get("angle") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        other => {
            return Err(format!(
                "Invalid gradient angle type: {}. It should be a number.",
                type_name(other)
            ))
        }
    };

    let stops = match map.get("stops") {
        Some(Value::Array(stops)) => stops.iter().map(parse_stop).collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(format!(
                "Invalid gradient stops type: {}. It should be an array.",
                type_name(other)
            ))
        }
    };

    let gradient = Gradient { kind, angle, stops };
    gradient.check()?;
    Ok(gradient)
}

fn parse_stop(raw: &Value) -> Result<GradientStop, String> {
    let Value::Object(map) = raw else {
        return Err(format!("gradient stop must be an object, got {}", raw));
    };

    let mut color = match map.get("color") {
        Some(Value::String(s)) if s.trim().starts_with('{') => {
            return Err(format!("gradient stop color must be a literal color, got {}", s));
        }
        Some(Value::String(s)) => {
            parse_color(s).ok_or_else(|| format!("invalid gradient stop color: {}", s))?
        }
        other => {
            return Err(format!(
                "Invalid gradient color type: {}. It should be a string.",
                type_name(other)
            ))
        }
    };

    match map.get("alpha") {
        None => {}
        Some(Value::Number(n)) => {
            let alpha = n.as_f64().unwrap_or(f64::NAN);
            if !(0.0..=1.0).contains(&alpha) {
                return Err(format!("gradient alpha must lie in [0, 1], got {}", alpha));
            }
            color.a = alpha;
        }
        other => {
            return Err(format!(
                "Invalid gradient alpha type: {}. It should be a number.",
                type_name(other)
            ))
        }
    }

    let position = match map.get("position") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(other) => return Err(format!("invalid gradient stop position: {}", other)),
    };

    Ok(GradientStop { color, position })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_linear_gradient() {
        let gradient = parse_gradient(&json!({
            "angle": 90,
            "stops": [
                { "color": "#1415fa", "position": "0%" },
                { "color": "#cc0000", "alpha": 0.5, "position": 100 }
            ]
        }))
        .unwrap();

        assert_eq!(gradient.kind, GradientKind::Linear);
        assert_eq!(gradient.angle, 90.0);
        assert_eq!(gradient.stops.len(), 2);
        assert_eq!(gradient.stops[0].position.as_deref(), Some("0%"));
        assert_eq!(gradient.stops[1].color.a, 0.5);
        assert_eq!(gradient.stops[1].position.as_deref(), Some("100"));
    }

    #[test]
    fn test_gradient_type_is_checked() {
        let err = parse_gradient(&json!({ "type": "diamond", "angle": 0, "stops": [] })).unwrap_err();
        assert_eq!(
            err,
            "Invalid gradient type: diamond. It should be either 'linear' or 'radial' or 'angular' or 'conic'."
        );
    }

    #[test]
    fn test_gradient_angle_must_be_number() {
        let err = parse_gradient(&json!({ "type": "conic", "angle": "90deg", "stops": [] })).unwrap_err();
        assert_eq!(err, "Invalid gradient angle type: string. It should be a number.");

        let err = parse_gradient(&json!({ "stops": [] })).unwrap_err();
        assert_eq!(err, "Invalid gradient angle type: undefined. It should be a number.");
    }

    #[test]
    fn test_gradient_alpha_must_be_number() {
        let err = parse_gradient(&json!({
            "angle": 0,
            "stops": [{ "color": "#000", "alpha": "half", "position": "0%" }]
        }))
        .unwrap_err();
        assert_eq!(err, "Invalid gradient alpha type: string. It should be a number.");
    }

    #[test]
    fn test_gradient_stop_validation() {
        assert!(parse_gradient(&json!({ "angle": 0, "stops": [] })).is_err());
        assert!(parse_gradient(&json!({
            "angle": 0,
            "stops": [{ "color": "{Primary.01}", "position": "0%" }]
        }))
        .is_err());
        assert!(parse_gradient(&json!({
            "angle": 0,
            "stops": [{ "color": "#000", "position": "0%); }" }]
        }))
        .is_err());
    }
}
