//! Objective-C targets
//!
//! - `ios/macros`: every token as a `#define`; gradients become CSS string
//!   literals and durations seconds
//! - `ios/colors.h`: `NS_ENUM` of color names plus the lookup interface
//! - `ios/colors.m`: lookup implementation backed by a `values` array
//!
//! The enum and the `values` array both follow declaration order, so an enum
//! case indexes its own color.

use crate::error::Result;
use crate::format::{check_identifier_value, css_gradient, file_header, format_number, seconds, Syntax};
use crate::Emitter;
use token_core::{PrimitiveValue, ResolvedTokenSet, Rgba};

/// `[UIColor colorWithRed:...]` literal with three-decimal channels
pub fn uicolor_literal(color: &Rgba) -> String {
    format!(
        "[UIColor colorWithRed:{:.3}f green:{:.3}f blue:{:.3}f alpha:{:.3}f]",
        color.r, color.g, color.b, color.a
    )
}

// =============================================================================
// Macros
// =============================================================================

/// `tokens.h`: one `#define` per token
#[derive(Debug, Clone)]
pub struct MacrosEmitter {
    file_name: String,
}

impl MacrosEmitter {
    /// Format name
    pub const FORMAT: &'static str = "ios/macros";

    /// Create the emitter
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl Emitter for MacrosEmitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let mut out = file_header(&self.file_name);
        out.push_str("#import <Foundation/Foundation.h>\n#import <UIKit/UIKit.h>\n\n");

        for token in set.iter() {
            Syntax::ObjectiveC.check(&token.name, Self::FORMAT)?;
            check_identifier_value(token, Self::FORMAT, &[])?;
            let value = match &token.value {
                PrimitiveValue::Color(color) => uicolor_literal(color),
                PrimitiveValue::Number(n) => format_number(*n),
                // Identifiers are emitted bare
                PrimitiveValue::Identifier(id) => id.clone(),
                PrimitiveValue::Gradient(gradient) => format!("@\"{}\"", css_gradient(gradient)),
                PrimitiveValue::Duration(ms) => seconds(*ms),
            };
            out.push_str(&format!("#define {} {}\n", token.name, value));
        }

        Ok(out)
    }
}

// =============================================================================
// Color enum header
// =============================================================================

/// `StyleDictionaryColor.h`: color enum and lookup interface
#[derive(Debug, Clone)]
pub struct ColorHeaderEmitter {
    file_name: String,
    class_name: String,
}

impl ColorHeaderEmitter {
    /// Format name
    pub const FORMAT: &'static str = "ios/colors.h";

    /// Create the emitter; the enum type is `<class_name>Name`
    pub fn new(file_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            class_name: class_name.into(),
        }
    }
}

impl Emitter for ColorHeaderEmitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let names = set
            .colors()
            .map(|(token, _)| {
                Syntax::ObjectiveC.check(&token.name, Self::FORMAT)?;
                Ok(token.name.as_str())
            })
            .collect::<Result<Vec<_>>>()?;

        let class = &self.class_name;
        let mut out = file_header(&self.file_name);
        out.push_str("#import <UIKit/UIKit.h>\n\n");
        out.push_str(&format!("typedef NS_ENUM(NSInteger, {}Name) {{\n", class));
        out.push_str(&names.join(",\n"));
        out.push_str("\n};\n\n");
        out.push_str(&format!("@interface {} : NSObject\n", class));
        out.push_str("+ (NSArray *)values;\n");
        out.push_str(&format!("+ (UIColor *)color:({}Name)color;\n", class));
        out.push_str("@end");

        Ok(out)
    }
}

// =============================================================================
// Color lookup implementation
// =============================================================================

/// `StyleDictionaryColor.m`: `values` array and `color:` lookup
#[derive(Debug, Clone)]
pub struct ColorImplEmitter {
    file_name: String,
    class_name: String,
}

impl ColorImplEmitter {
    /// Format name
    pub const FORMAT: &'static str = "ios/colors.m";

    /// Create the emitter
    pub fn new(file_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            class_name: class_name.into(),
        }
    }
}

impl Emitter for ColorImplEmitter {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn emit(&self, set: &ResolvedTokenSet) -> Result<String> {
        let class = &self.class_name;
        let values: Vec<String> = set.colors().map(|(_, color)| uicolor_literal(color)).collect();

        let mut out = file_header(&self.file_name);
        out.push_str(&format!("#import \"{}.h\"\n\n", class));
        out.push_str(&format!("@implementation {}\n\n", class));
        out.push_str(&format!("+ (UIColor *)color:({}Name)colorEnum{{\n", class));
        out.push_str("  return [[self values] objectAtIndex:colorEnum];\n}\n\n");
        out.push_str("+ (NSArray *)values {\n");
        out.push_str("  static NSArray* colorArray;\n");
        out.push_str("  static dispatch_once_t onceToken;\n\n");
        out.push_str("  dispatch_once(&onceToken, ^{\n");
        out.push_str("    colorArray = @[\n");
        out.push_str(&values.join(",\n"));
        out.push_str("\n    ];\n");
        out.push_str("  });\n\n");
        out.push_str("  return colorArray;\n}\n\n");
        out.push_str("@end\n");

        Ok(out)
    }
}
