//! Jetpack Compose color object

use crate::error::Result;
use crate::format::{is_color, sorted_by_camel_name, Syntax, DO_NOT_EDIT};
use crate::Emitter;
use token_core::{PrimitiveValue, ResolvedTokenSet, Rgba};

/// `Color(0xAARRGGBB)` with lowercase hex digits
pub fn compose_color(color: &Rgba) -> String {
    let [r, g, b, a] = color.to_rgba8();
    format!("Color(0x{:02x}{:02x}{:02x}{:02x})", a, r, g, b)
}

/// Kotlin `object` of color constants sorted by camelCase name
#[derive(Debug, Clone)]
pub struct ComposeObjectEmitter {
    class_name: String,
    package_name: String,
}

impl ComposeObjectEmitter {
    /// Format name
    pub const FORMAT: &'static str = "compose/object";

    /// Create the emitter
    pub fn new(class_name: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            package_name: package_name.into(),
        }
    }
}

impl Emitter for ComposeObjectEmitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let mut out = format!("\n\n// {}\n\n\n\n", DO_NOT_EDIT);
        out.push_str(&format!("package {}\n\n", self.package_name));
        out.push_str("import androidx.compose.ui.graphics.Color\n");
        out.push_str("import androidx.compose.ui.unit.*\n\n");
        out.push_str(&format!("object {} {{\n", self.class_name));

        for (name, token) in sorted_by_camel_name(set).into_iter().filter(|(_, t)| is_color(t)) {
            Syntax::Kotlin.check(&name, Self::FORMAT)?;
            if let PrimitiveValue::Color(color) = &token.value {
                out.push_str(&format!("  val {} = {}\n", name, compose_color(color)));
            }
        }

        out.push_str("}\n");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_core::{Category, ResolvedToken};

    #[test]
    fn test_compose_color() {
        assert_eq!(compose_color(&Rgba::BLACK), "Color(0xff000000)");
        assert_eq!(
            compose_color(&Rgba::from_rgba8(0xe9, 0x7a, 0x48, 77)),
            "Color(0x4de97a48)"
        );
    }

    #[test]
    fn test_object_layout() {
        let set = ResolvedTokenSet::new(
            "zrh-default",
            vec![
                ResolvedToken::new("NeutralsWhite", Category::Color, PrimitiveValue::Color(Rgba::new(1.0, 1.0, 1.0, 1.0))),
                ResolvedToken::new("NeutralsBlack", Category::Color, PrimitiveValue::Color(Rgba::BLACK)),
                ResolvedToken::new("CornersCornerRadiusS", Category::Radius, PrimitiveValue::Number(6.0)),
            ],
        );

        let text = ComposeObjectEmitter::new("StyleDictionaryColor", "StyleDictionaryColor")
            .emit(&set)
            .unwrap();

        assert_eq!(
            text,
            "\n\n// Do not edit directly, this file was auto-generated.\n\n\n\n\
             package StyleDictionaryColor\n\n\
             import androidx.compose.ui.graphics.Color\n\
             import androidx.compose.ui.unit.*\n\n\
             object StyleDictionaryColor {\n\
             \x20 val neutralsBlack = Color(0xff000000)\n\
             \x20 val neutralsWhite = Color(0xffffffff)\n\
             }\n"
        );
    }
}
