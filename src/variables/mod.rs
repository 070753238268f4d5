//! Value model of the design tool's variables
//!
//! These types mirror the JSON the host hands over: variables grouped into
//! collections, one stored value per mode, where a value is either a literal or an
//! alias to another variable.

pub mod color;
pub mod store;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use color::Rgba;
pub use store::{ExportDocument, VariableStore};

/// Type every value of a variable resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
}

/// Usage-scope tag of a variable. Only a few of them change how values are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableScope {
    AllScopes,
    TextContent,
    CornerRadius,
    WidthHeight,
    Gap,
    AllFills,
    FrameFill,
    ShapeFill,
    TextFill,
    StrokeColor,
    StrokeFloat,
    EffectFloat,
    EffectColor,
    Opacity,
    FontFamily,
    FontStyle,
    FontWeight,
    FontSize,
    LineHeight,
    LetterSpacing,
    ParagraphSpacing,
    ParagraphIndent,
    #[serde(other)]
    Other,
}

impl VariableScope {
    /// FLOAT values in these scopes are unitless
    pub fn is_unitless(self) -> bool {
        matches!(self, VariableScope::Opacity | VariableScope::TextContent)
    }
}

/// Marker for the `type` field of an alias object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasKind {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// Pointer from a value to another variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub kind: AliasKind,
    pub id: String,
}

impl VariableAlias {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            kind: AliasKind::VariableAlias,
            id: id.into(),
        }
    }
}

/// A terminal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Color(Rgba),
    Number(f64),
    Boolean(bool),
    String(String),
}

impl Literal {
    /// Short human readable form, used for diagnostics and graph labels
    pub fn display(&self) -> String {
        match self {
            Literal::Color(color) if color.is_opaque() => color.to_hex(),
            Literal::Color(color) => color.to_hex_with_alpha(),
            Literal::Number(number) => format_number(*number),
            Literal::Boolean(flag) => flag.to_string(),
            Literal::String(text) => text.clone(),
        }
    }
}

/// Value stored for one mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Alias(VariableAlias),
    Literal(Literal),
}

impl VariableValue {
    pub fn alias(id: impl Into<String>) -> Self {
        VariableValue::Alias(VariableAlias::new(id))
    }
}

impl From<Literal> for VariableValue {
    fn from(literal: Literal) -> Self {
        VariableValue::Literal(literal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    /// Slash-delimited path, e.g. `colors/brand/primary`
    pub name: String,
    pub resolved_type: ResolvedType,
    pub variable_collection_id: String,
    #[serde(default)]
    pub scopes: Vec<VariableScope>,
    #[serde(default)]
    pub values_by_mode: IndexMap<String, VariableValue>,
}

impl Variable {
    pub fn value_for_mode(&self, mode_id: &str) -> Option<&VariableValue> {
        self.values_by_mode.get(mode_id)
    }

    /// Name minus its last path segment: `colors/gray/500` -> `colors/gray`
    pub fn group_prefix(&self) -> &str {
        match self.name.rfind('/') {
            Some(index) => &self.name[..index],
            None => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    pub mode_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    /// Order is kept for deterministic output
    pub modes: Vec<VariableMode>,
    pub default_mode_id: String,
    #[serde(default)]
    pub variable_ids: Vec<String>,
}

/// Format a number the way the design tool prints it: no trailing `.0`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_alias_and_literals() {
        let json = r#"{
            "id": "VariableID:1:2",
            "name": "colors/brand/primary",
            "resolvedType": "COLOR",
            "variableCollectionId": "VariableCollectionId:1:0",
            "scopes": ["ALL_FILLS", "SOMETHING_NEW"],
            "valuesByMode": {
                "1:0": { "r": 1, "g": 0.5, "b": 0, "a": 1 },
                "1:1": { "type": "VARIABLE_ALIAS", "id": "VariableID:9:9" }
            }
        }"#;
        let variable: Variable = serde_json::from_str(json).unwrap();

        assert_eq!(variable.resolved_type, ResolvedType::Color);
        assert_eq!(variable.scopes, vec![VariableScope::AllFills, VariableScope::Other]);
        assert!(matches!(
            variable.value_for_mode("1:0"),
            Some(VariableValue::Literal(Literal::Color(_)))
        ));
        assert_eq!(
            variable.value_for_mode("1:1"),
            Some(&VariableValue::alias("VariableID:9:9"))
        );
    }

    #[test]
    fn test_deserialize_scalar_literals() {
        let number: VariableValue = serde_json::from_str("12.5").unwrap();
        let flag: VariableValue = serde_json::from_str("true").unwrap();
        let text: VariableValue = serde_json::from_str("\"Inter\"").unwrap();

        assert_eq!(number, VariableValue::Literal(Literal::Number(12.5)));
        assert_eq!(flag, VariableValue::Literal(Literal::Boolean(true)));
        assert_eq!(text, VariableValue::Literal(Literal::String("Inter".to_string())));
    }

    #[test]
    fn test_group_prefix() {
        let json = r#"{"id":"1","name":"colors/gray/500","resolvedType":"COLOR","variableCollectionId":"c"}"#;
        let variable: Variable = serde_json::from_str(json).unwrap();
        assert_eq!(variable.group_prefix(), "colors/gray");

        let json = r#"{"id":"2","name":"flat","resolvedType":"FLOAT","variableCollectionId":"c"}"#;
        let variable: Variable = serde_json::from_str(json).unwrap();
        assert_eq!(variable.group_prefix(), "");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(0.875), "0.875");
        assert_eq!(format_number(-2.0), "-2");
    }
}
