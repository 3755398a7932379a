//! CSS custom properties and SCSS variables
//!
//! Names are kebab-cased and colors use hex or `rgba()`. CSS converts
//! dimensions from px to rem and durations to seconds; SCSS keeps px and ms.
//! Identifiers containing whitespace are quoted.

use crate::error::Result;
use crate::format::{
    block_header, check_identifier_value, css_color, css_gradient, css_seconds, format_number,
    kebab_case, px_to_rem, Syntax, DO_NOT_EDIT,
};
use crate::Emitter;
use token_core::{PrimitiveValue, ResolvedTokenSet};

/// Characters that would end a declaration or block early
const DECLARATION_BREAKERS: &[char] = &[';', '{', '}'];

fn identifier_value(id: &str) -> String {
    if id.chars().any(char::is_whitespace) {
        format!("'{}'", id.replace('\\', "\\\\").replace('\'', "\\'"))
    } else {
        id.to_string()
    }
}

/// `:root` block of custom properties in declaration order
#[derive(Debug, Clone)]
pub struct CssVariablesEmitter {
    base_px_font_size: f64,
}

impl CssVariablesEmitter {
    /// Format name
    pub const FORMAT: &'static str = "css/variables";

    /// Create the emitter
    pub fn new(base_px_font_size: f64) -> Self {
        Self { base_px_font_size }
    }

    fn value(&self, value: &PrimitiveValue) -> String {
        match value {
            PrimitiveValue::Color(color) => css_color(color),
            PrimitiveValue::Number(n) => px_to_rem(*n, self.base_px_font_size),
            PrimitiveValue::Identifier(id) => identifier_value(id),
            PrimitiveValue::Gradient(gradient) => css_gradient(gradient),
            PrimitiveValue::Duration(ms) => css_seconds(*ms),
        }
    }
}

impl Emitter for CssVariablesEmitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let mut out = block_header();
        out.push_str(":root {\n");

        for token in set.iter() {
            let name = kebab_case(&token.name);
            Syntax::CssProperty.check(&name, Self::FORMAT)?;
            check_identifier_value(token, Self::FORMAT, DECLARATION_BREAKERS)?;
            out.push_str(&format!("  --{}: {};\n", name, self.value(&token.value)));
        }

        out.push_str("}\n");
        Ok(out)
    }
}

/// `$name: value;` lines in declaration order
#[derive(Debug, Clone, Default)]
pub struct ScssVariablesEmitter;

impl ScssVariablesEmitter {
    /// Format name
    pub const FORMAT: &'static str = "web/scss";

    /// Create the emitter
    pub fn new() -> Self {
        Self
    }

    fn value(&self, value: &PrimitiveValue) -> String {
        match value {
            PrimitiveValue::Color(color) => css_color(color),
            PrimitiveValue::Number(n) if *n == 0.0 => "0".to_string(),
            PrimitiveValue::Number(n) => format!("{}px", format_number(*n)),
            PrimitiveValue::Identifier(id) => identifier_value(id),
            PrimitiveValue::Gradient(gradient) => css_gradient(gradient),
            PrimitiveValue::Duration(ms) => format!("{}ms", format_number(*ms)),
        }
    }
}

impl Emitter for ScssVariablesEmitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let mut out = format!("\n// {}\n\n", DO_NOT_EDIT);

        for token in set.iter() {
            let name = kebab_case(&token.name);
            Syntax::CssProperty.check(&name, Self::FORMAT)?;
            check_identifier_value(token, Self::FORMAT, DECLARATION_BREAKERS)?;
            out.push_str(&format!("${}: {};\n", name, self.value(&token.value)));
        }

        Ok(out)
    }
}
