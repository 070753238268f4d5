//! Tree-sitter node kinds and selector constants
//!
//! Centralizing these helps prevent typos in the many `kind()` comparisons.

// Structural nodes
/// Root node of the syntax tree
pub const NODE_STYLESHEET: &str = "stylesheet";
/// A CSS rule containing selectors and a declaration block
pub const NODE_RULE_SET: &str = "rule_set";
/// A block of declarations enclosed in curly braces
pub const NODE_BLOCK: &str = "block";
/// A single property-value pair (e.g., `--a: var(--b);`)
pub const NODE_DECLARATION: &str = "declaration";
/// Container for one or more selectors
pub const NODE_SELECTORS: &str = "selectors";

// Declaration parts
/// Property name, custom properties included (e.g., `--colors-brand`)
pub const NODE_PROPERTY_NAME: &str = "property_name";
/// `!important` flag
pub const NODE_IMPORTANT: &str = "important";

// Punctuation
/// Colon separator between property and value
pub const NODE_COLON: &str = ":";
/// Semicolon terminator for declarations
pub const NODE_SEMICOLON: &str = ";";
/// Opening brace of a block
pub const NODE_OPEN_BRACE: &str = "{";
/// Closing brace of a block
pub const NODE_CLOSE_BRACE: &str = "}";

/// Prefix of custom property names
pub const CUSTOM_PROPERTY_PREFIX: &str = "--";

/// Selector of the document root scope
pub const ROOT_SELECTOR: &str = ":root";

/// Selectors containing this are applied inline and count as root scopes
pub const INLINE_MARKER: &str = "inline";

/// Indentation used when a rule is rendered from the model
pub const INDENT: &str = "  ";
