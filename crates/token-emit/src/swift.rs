//! Swift targets
//!
//! Both targets list members sorted by their camelCase name. Color channels
//! use three decimals; alpha is printed in shortest round-trip form so fully
//! opaque colors read `alpha: 1`.

use crate::error::Result;
use crate::format::{
    check_identifier_value, css_gradient, file_header, format_number, is_color, seconds,
    sorted_by_camel_name, Syntax,
};
use crate::Emitter;
use token_core::{PrimitiveValue, ResolvedTokenSet, Rgba};

/// `UIColor(red:green:blue:alpha:)` initializer
pub fn uicolor_initializer(color: &Rgba) -> String {
    format!(
        "UIColor(red: {:.3}, green: {:.3}, blue: {:.3}, alpha: {})",
        color.r,
        color.g,
        color.b,
        format_number(color.a)
    )
}

fn swift_value(value: &PrimitiveValue) -> String {
    match value {
        PrimitiveValue::Color(color) => uicolor_initializer(color),
        PrimitiveValue::Number(n) => format_number(*n),
        PrimitiveValue::Identifier(id) => id.clone(),
        PrimitiveValue::Gradient(gradient) => format!("\"{}\"", css_gradient(gradient)),
        PrimitiveValue::Duration(ms) => seconds(*ms),
    }
}

/// `public enum` of color constants
#[derive(Debug, Clone)]
pub struct SwiftEnumEmitter {
    file_name: String,
    class_name: String,
}

impl SwiftEnumEmitter {
    /// Format name
    pub const FORMAT: &'static str = "ios-swift/enum.swift";

    /// Create the emitter
    pub fn new(file_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            class_name: class_name.into(),
        }
    }
}

impl Emitter for SwiftEnumEmitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let mut out = file_header(&self.file_name);
        out.push_str("import UIKit\n\n");
        out.push_str(&format!("public enum {} {{\n", self.class_name));

        for (name, token) in sorted_by_camel_name(set).into_iter().filter(|(_, t)| is_color(t)) {
            Syntax::Swift.check(&name, Self::FORMAT)?;
            out.push_str(&format!(
                "    public static let {} = {}\n",
                name,
                swift_value(&token.value)
            ));
        }

        out.push('}');
        Ok(out)
    }
}

/// `internal struct` holding every token
#[derive(Debug, Clone)]
pub struct SwiftStructEmitter {
    file_name: String,
    class_name: String,
}

impl SwiftStructEmitter {
    /// Format name
    pub const FORMAT: &'static str = "ios-swift/struct.swift";

    /// Create the emitter
    pub fn new(file_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            class_name: class_name.into(),
        }
    }
}

impl Emitter for SwiftStructEmitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let mut out = file_header(&self.file_name);
        out.push_str("import UIKit\n\n");
        out.push_str(&format!("internal struct {} {{\n", self.class_name));

        for (name, token) in sorted_by_camel_name(set) {
            Syntax::Swift.check(&name, Self::FORMAT)?;
            check_identifier_value(token, Self::FORMAT, &[])?;
            out.push_str(&format!(
                "    internal static let {} = {}\n",
                name,
                swift_value(&token.value)
            ));
        }

        out.push('}');
        Ok(out)
    }
}
