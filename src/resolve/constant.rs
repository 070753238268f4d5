//! Projection of literal values into CSS-ready tokens

use crate::config::{DEFAULT_ROOT_ELEMENT_SIZE, ExportConfig};
use crate::variables::{Literal, ResolvedType, VariableScope, format_number};

/// Project a literal into the token written after `--name:`.
///
/// - COLOR: `"R G B"` with 0-255 channels (alpha only when `preserve_alpha` is set)
/// - FLOAT in an OPACITY or TEXT_CONTENT scope: the raw number
/// - FLOAT otherwise: `rem` (value / 16) or `px` depending on `use_rem_unit`
/// - STRING / BOOLEAN: the plain text
pub fn resolve_constant(
    value: &Literal,
    resolved_type: ResolvedType,
    scopes: &[VariableScope],
    config: &ExportConfig,
) -> String {
    match value {
        Literal::Color(color) => color.to_channels(config.preserve_alpha),
        Literal::Number(number) if resolved_type == ResolvedType::Float => {
            if scopes.iter().any(|scope| scope.is_unitless()) {
                format_number(*number)
            } else if config.use_rem_unit {
                format!("{}rem", format_number(number / DEFAULT_ROOT_ELEMENT_SIZE))
            } else {
                format!("{}px", format_number(*number))
            }
        }
        Literal::Number(number) => format_number(*number),
        Literal::Boolean(flag) => flag.to_string(),
        Literal::String(text) => text.clone(),
    }
}
