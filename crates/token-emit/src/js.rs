//! TypeScript ES6 constants
//!
//! Every token becomes `export const name = 'value'` with a camelCase name.
//! A token description is carried over as a JSDoc comment.

use crate::error::Result;
use crate::format::{
    block_header, camel_case, check_identifier_value, css_color, css_gradient, css_seconds,
    px_to_rem, Syntax,
};
use crate::Emitter;
use token_core::{PrimitiveValue, ResolvedTokenSet};

/// `typescript/es6` format
#[derive(Debug, Clone)]
pub struct TypeScriptEs6Emitter {
    base_px_font_size: f64,
}

impl TypeScriptEs6Emitter {
    /// Format name
    pub const FORMAT: &'static str = "js/es6";

    /// Create the emitter
    pub fn new(base_px_font_size: f64) -> Self {
        Self { base_px_font_size }
    }

    fn value(&self, value: &PrimitiveValue) -> String {
        match value {
            PrimitiveValue::Color(color) => css_color(color),
            PrimitiveValue::Number(n) => px_to_rem(*n, self.base_px_font_size),
            PrimitiveValue::Identifier(id) => id.clone(),
            PrimitiveValue::Gradient(gradient) => css_gradient(gradient),
            PrimitiveValue::Duration(ms) => css_seconds(*ms),
        }
    }
}

fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

impl Emitter for TypeScriptEs6Emitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let entries = set
            .iter()
            .map(|token| {
                let name = camel_case(&token.name);
                Syntax::TypeScript.check(&name, Self::FORMAT)?;
                check_identifier_value(token, Self::FORMAT, &[])?;

                let mut entry = String::new();
                if let Some(description) = &token.description {
                    entry.push_str(&format!("/** {} */\n", description.replace("*/", "* /")));
                }
                entry.push_str(&format!(
                    "export const {} = '{}'",
                    name,
                    escape_single_quoted(&self.value(&token.value))
                ));
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut out = block_header();
        out.push_str(&entries.join("\n"));
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_core::{Category, ResolvedToken, Rgba};

    #[test]
    fn test_typescript_constants() {
        let mut black = ResolvedToken::new("NeutralsBlack", Category::Color, PrimitiveValue::Color(Rgba::BLACK));
        black.description = Some("Body text".to_string());

        let set = ResolvedTokenSet::new(
            "dxn-default",
            vec![
                black,
                ResolvedToken::new("CornersCornerRadiusS", Category::Radius, PrimitiveValue::Number(6.0)),
                ResolvedToken::new(
                    "TypographyFontFamily",
                    Category::Typography,
                    PrimitiveValue::Identifier("Inter".into()),
                ),
            ],
        );

        let text = TypeScriptEs6Emitter::new(16.0).emit(&set).unwrap();
        assert_eq!(
            text,
            "/**\n * Do not edit directly, this file was auto-generated.\n */\n\n\
             /** Body text */\n\
             export const neutralsBlack = '#000000'\n\
             export const cornersCornerRadiusS = '0.375rem'\n\
             export const typographyFontFamily = 'Inter'\n"
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        let set = ResolvedTokenSet::new(
            "default",
            vec![ResolvedToken::new(
                "TypographyBrand",
                Category::Typography,
                PrimitiveValue::Identifier("O'Brien".into()),
            )],
        );
        let text = TypeScriptEs6Emitter::new(16.0).emit(&set).unwrap();
        assert!(text.contains("export const typographyBrand = 'O\\'Brien'"));
    }

    #[test]
    fn test_string_literal_cannot_be_split() {
        let set = ResolvedTokenSet::new(
            "default",
            vec![ResolvedToken::new(
                "Font",
                Category::Typography,
                PrimitiveValue::Identifier("Inter\n#error injected".into()),
            )],
        );
        assert!(matches!(
            TypeScriptEs6Emitter::new(16.0).emit(&set),
            Err(crate::EmitError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_duration_in_seconds() {
        let set = ResolvedTokenSet::new(
            "default",
            vec![ResolvedToken::new("MotionFast", Category::Duration, PrimitiveValue::Duration(250.0))],
        );
        let text = TypeScriptEs6Emitter::new(16.0).emit(&set).unwrap();
        assert!(text.contains("export const motionFast = '0.25s'\n"));
    }
}
