//! Shared formatting helpers
//!
//! Everything here is locale-free and deterministic: fixed precision for
//! color channels, shortest round-trip for free-form floats, `\n` endings.

use crate::error::{EmitError, Result};
use token_core::{Gradient, PrimitiveValue, ResolvedToken, ResolvedTokenSet, Rgba};

/// Notice placed at the top of every generated file
pub const DO_NOT_EDIT: &str = "Do not edit directly, this file was auto-generated.";

// =============================================================================
// Headers
// =============================================================================

/// Line-comment header used by Objective-C and Swift files
pub fn file_header(file_name: &str) -> String {
    format!("\n//\n// {}\n//\n\n// {}\n\n\n", file_name, DO_NOT_EDIT)
}

/// Block-comment header used by CSS and TypeScript files
pub fn block_header() -> String {
    format!("/**\n * {}\n */\n\n", DO_NOT_EDIT)
}

// =============================================================================
// Values
// =============================================================================

/// Format a number with the shortest representation, whole numbers without a fraction
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Avoids "-0"
        return "0".to_string();
    }
    format!("{}", n)
}

/// CSS color notation: hex when opaque, `rgba()` with a two-decimal alpha otherwise
pub fn css_color(color: &Rgba) -> String {
    if color.is_opaque() {
        return color.to_hex();
    }
    let [r, g, b, _] = color.to_rgba8();
    let alpha = (color.a * 100.0).round() / 100.0;
    format!("rgba({}, {}, {}, {})", r, g, b, format_number(alpha))
}

/// `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` with a two-decimal alpha otherwise
pub fn rgb_string(color: &Rgba) -> String {
    let [r, g, b, _] = color.to_rgba8();
    if color.is_opaque() {
        return format!("rgb({}, {}, {})", r, g, b);
    }
    let alpha = (color.a * 100.0).round() / 100.0;
    format!("rgba({}, {}, {}, {})", r, g, b, format_number(alpha))
}

/// CSS gradient function, e.g. `linear-gradient(90deg, rgb(20, 21, 250) 0%, ...)`
pub fn css_gradient(gradient: &Gradient) -> String {
    let mut out = format!("{}-gradient({}deg", gradient.kind, format_number(gradient.angle));
    for stop in &gradient.stops {
        out.push_str(", ");
        out.push_str(&rgb_string(&stop.color));
        if let Some(position) = &stop.position {
            out.push(' ');
            out.push_str(position);
        }
    }
    out.push(')');
    out
}

/// Milliseconds as CSS seconds with two decimals: `200` -> `0.20s`
pub fn css_seconds(millis: f64) -> String {
    format!("{:.2}s", millis / 1000.0)
}

/// Milliseconds as a bare number of seconds: `200` -> `0.2`
pub fn seconds(millis: f64) -> String {
    format_number(millis / 1000.0)
}

/// Convert a pixel dimension to `rem`
pub fn px_to_rem(px: f64, base_px_font_size: f64) -> String {
    if px == 0.0 {
        return "0".to_string();
    }
    format!("{}rem", format_number(px / base_px_font_size))
}

/// Tokens sorted by their camelCase name
pub fn sorted_by_camel_name(set: &ResolvedTokenSet) -> Vec<(String, &ResolvedToken)> {
    let mut tokens: Vec<(String, &ResolvedToken)> =
        set.iter().map(|t| (camel_case(&t.name), t)).collect();
    tokens.sort_by(|a, b| a.0.cmp(&b.0));
    tokens
}

/// Whether a resolved token is color-valued
pub fn is_color(token: &ResolvedToken) -> bool {
    matches!(token.value, PrimitiveValue::Color(_))
}

/// Fail with `InvalidValue` when an identifier would break out of the
/// surrounding syntax
///
/// Control characters are never allowed. `forbidden` lists further characters
/// the target cannot hold inside a value.
pub fn check_identifier_value(token: &ResolvedToken, target: &str, forbidden: &[char]) -> Result<()> {
    let PrimitiveValue::Identifier(id) = &token.value else {
        return Ok(());
    };
    if let Some(c) = id.chars().find(|c| c.is_control() || forbidden.contains(c)) {
        return Err(EmitError::invalid_value(
            &token.name,
            target,
            format!("identifier {:?} contains {:?}", id, c),
        ));
    }
    Ok(())
}

// =============================================================================
// Names
// =============================================================================

/// `NeutralsLightGrey` -> `neutralsLightGrey`
pub fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `NeutralsLightGrey` -> `neutrals-light-grey`, `Primary01` -> `primary-01`
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if let Some(p) = prev {
            let boundary = (c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()))
                || (c.is_ascii_digit() && p.is_alphabetic())
                || (c.is_alphabetic() && p.is_ascii_digit());
            if boundary {
                out.push('-');
            }
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }

    out
}

// =============================================================================
// Identifier validation
// =============================================================================

/// Identifier rules of a target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// C and Objective-C
    ObjectiveC,
    /// Swift
    Swift,
    /// Kotlin
    Kotlin,
    /// TypeScript / ES6
    TypeScript,
    /// CSS custom property name, without the leading `--`
    CssProperty,
}

const OBJC_RESERVED: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "id", "self", "super", "nil", "Nil", "YES",
    "NO", "BOOL", "SEL", "Class", "IMP",
];

const SWIFT_RESERVED: &[&str] = &[
    "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func", "import",
    "init", "inout", "internal", "let", "open", "operator", "private", "protocol", "public",
    "rethrows", "static", "struct", "subscript", "typealias", "var", "break", "case", "continue",
    "default", "defer", "do", "else", "fallthrough", "for", "guard", "if", "in", "repeat",
    "return", "switch", "where", "while", "as", "Any", "catch", "false", "is", "nil", "super",
    "self", "Self", "throw", "throws", "true", "try",
];

const KOTLIN_RESERVED: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

const TYPESCRIPT_RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "let", "static", "yield", "await",
    "implements", "interface", "package", "private", "protected", "public",
];

impl Syntax {
    fn reserved(&self) -> &'static [&'static str] {
        match self {
            Self::ObjectiveC => OBJC_RESERVED,
            Self::Swift => SWIFT_RESERVED,
            Self::Kotlin => KOTLIN_RESERVED,
            Self::TypeScript => TYPESCRIPT_RESERVED,
            Self::CssProperty => &[],
        }
    }

    /// Whether `name` is usable as an identifier
    pub fn is_valid(&self, name: &str) -> bool {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return false;
        };

        let shape_ok = match self {
            Self::CssProperty => name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            Self::TypeScript => {
                (first.is_ascii_alphabetic() || first == '_' || first == '$')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            }
            _ => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
        };

        shape_ok && !self.reserved().contains(&name)
    }

    /// Fail with `InvalidIdentifier` unless `name` is usable
    pub fn check(&self, name: &str, target: &str) -> Result<()> {
        if self.is_valid(name) {
            Ok(())
        } else {
            Err(EmitError::invalid_identifier(name, target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_core::{GradientKind, GradientStop};

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("NeutralsLightGrey"), "neutralsLightGrey");
        assert_eq!(camel_case("Primary01"), "primary01");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("NeutralsLightGrey"), "neutrals-light-grey");
        assert_eq!(kebab_case("Primary01"), "primary-01");
        assert_eq!(
            kebab_case("EffectsShadowGlobalColor16"),
            "effects-shadow-global-color-16"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(6.0), "6");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(77.0 / 255.0), "0.30196078431372547");
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(&Rgba::BLACK), "#000000");
        assert_eq!(
            css_color(&Rgba::from_rgba8(10, 10, 130, 77)),
            "rgba(10, 10, 130, 0.3)"
        );
    }

    #[test]
    fn test_css_gradient() {
        let gradient = Gradient {
            kind: GradientKind::Linear,
            angle: 90.0,
            stops: vec![
                GradientStop {
                    color: Rgba::from_rgba8(0x14, 0x15, 0xfa, 255),
                    position: Some("0%".to_string()),
                },
                GradientStop {
                    color: Rgba::new(0.8, 0.0, 0.0, 0.5),
                    position: Some("100%".to_string()),
                },
            ],
        };
        assert_eq!(
            css_gradient(&gradient),
            "linear-gradient(90deg, rgb(20, 21, 250) 0%, rgba(204, 0, 0, 0.5) 100%)"
        );
    }

    #[test]
    fn test_durations() {
        assert_eq!(css_seconds(200.0), "0.20s");
        assert_eq!(css_seconds(1500.0), "1.50s");
        assert_eq!(seconds(200.0), "0.2");
    }

    #[test]
    fn test_identifier_value_check() {
        let token = |id: &str| {
            ResolvedToken::new(
                "TypographyFontFamily",
                token_core::Category::Typography,
                PrimitiveValue::Identifier(id.to_string()),
            )
        };

        assert!(check_identifier_value(&token("Inter"), "css/variables", &[';']).is_ok());
        assert!(matches!(
            check_identifier_value(&token("Inter\n#error"), "ios/macros", &[]),
            Err(EmitError::InvalidValue { target, .. }) if target == "ios/macros"
        ));
        assert!(check_identifier_value(&token("Inter; color: red"), "css/variables", &[';']).is_err());
    }

    #[test]
    fn test_px_to_rem() {
        assert_eq!(px_to_rem(6.0, 16.0), "0.375rem");
        assert_eq!(px_to_rem(24.0, 16.0), "1.5rem");
        assert_eq!(px_to_rem(0.0, 16.0), "0");
    }

    #[test]
    fn test_identifier_validation() {
        assert!(Syntax::ObjectiveC.is_valid("NeutralsBlack"));
        assert!(!Syntax::ObjectiveC.is_valid("01Primary"));
        assert!(!Syntax::ObjectiveC.is_valid("Class"));
        assert!(!Syntax::Swift.is_valid("default"));
        assert!(!Syntax::Kotlin.is_valid("object"));
        assert!(Syntax::TypeScript.is_valid("$primary"));
        assert!(!Syntax::TypeScript.is_valid("export"));
        assert!(Syntax::CssProperty.is_valid("primary-01"));
        assert!(!Syntax::CssProperty.is_valid("primary 01"));
        assert!(!Syntax::Swift.is_valid(""));
    }

    #[test]
    fn test_check_reports_target() {
        let err = Syntax::Swift.check("in", "ios-swift/enum.swift").unwrap_err();
        assert!(matches!(
            err,
            EmitError::InvalidIdentifier { name, target } if name == "in" && target == "ios-swift/enum.swift"
        ));
    }

    #[test]
    fn test_file_header() {
        assert_eq!(
            file_header("tokens.h"),
            "\n//\n// tokens.h\n//\n\n// Do not edit directly, this file was auto-generated.\n\n\n"
        );
    }
}
