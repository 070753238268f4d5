//! Custom-property stylesheets
//!
//! - tree-sitter-css for parsing
//! - an owned rule model that writes untouched text back byte for byte
//! - generation from the value model, and the scope repair pass over the result

pub mod constants;
pub mod generate;
pub mod parser;
pub mod scope_repair;
pub mod stylesheet;

pub use generate::{generate_stylesheet, mode_selectors};
pub use scope_repair::repair_scopes;
pub use stylesheet::{BlockItem, Declaration, DeclarationBuilder, RuleSet, Stylesheet};
