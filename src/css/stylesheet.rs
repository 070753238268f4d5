//! Owned model of a custom-property stylesheet
//!
//! Only top-level rule sets are modelled. Everything else (comments, at-rules, the
//! whitespace between rules) stays in the source text and is written back untouched.
//! A rule that was mutated is rendered from its model; an untouched rule is copied
//! byte for byte.
//!
//! Declarations are constructed in two tiers: [`DeclarationBuilder`] validates the
//! parts directly, and [`Declaration::parse`] runs a declaration string through the
//! parser when the builder refuses it. [`Declaration::build_or_parse`] chains both.

use std::ops::Range;

use log::debug;
use tree_sitter::Node;

use crate::error::{ExportError, ExportResult};
use crate::resolve::is_custom_property_name;

use super::constants::*;
use super::parser::CssParser;

/// A single `property: value` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn is_custom_property(&self) -> bool {
        self.property.starts_with(CUSTOM_PROPERTY_PREFIX)
    }

    /// Text without the trailing semicolon
    pub fn to_css(&self) -> String {
        if self.important {
            format!("{}: {} !important", self.property, self.value)
        } else {
            format!("{}: {}", self.property, self.value)
        }
    }

    /// Parse one declaration, e.g. `--font: "A;B";`, by running it through the CSS
    /// parser inside a throwaway rule
    pub fn parse(text: &str) -> ExportResult<Self> {
        let text = text.trim();
        let terminated = if text.ends_with(NODE_SEMICOLON) {
            text.to_string()
        } else {
            format!("{};", text)
        };
        let wrapped = format!("{} {{ {} }}", ROOT_SELECTOR, terminated);

        let invalid = |message: &str| ExportError::InvalidDeclaration {
            property: text.to_string(),
            message: message.to_string(),
        };

        let mut parser = CssParser::new()?;
        let tree = parser.parse(&wrapped).ok_or_else(|| invalid("parser returned no tree"))?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(invalid("declaration does not parse"));
        }

        // Anything that escaped the throwaway rule shows up as extra rules or items
        let mut stylesheet = Stylesheet::from_tree(root, &wrapped);
        if stylesheet.rules.len() != 1 {
            return Err(invalid("declaration leaks out of its block"));
        }
        let mut items = stylesheet.rules.remove(0).items;
        match (items.pop(), items.is_empty()) {
            (Some(BlockItem::Declaration(declaration)), true) => Ok(declaration),
            (None, _) => Err(invalid("no declaration found")),
            _ => Err(invalid("expected exactly one declaration")),
        }
    }

    /// Two-tier construction: the builder first, the parser when the builder refuses
    pub fn build_or_parse(property: &str, value: &str, important: bool) -> ExportResult<Self> {
        let built = DeclarationBuilder::new(property)
            .value(value)
            .important(important)
            .build();
        match built {
            Ok(declaration) => Ok(declaration),
            Err(e) => {
                debug!("Builder rejected '{}: {}' ({}), parsing instead", property, value, e);
                let text = Declaration {
                    property: property.to_string(),
                    value: value.to_string(),
                    important,
                }
                .to_css();
                Declaration::parse(&text)
            }
        }
    }
}

/// Structured constructor for custom property declarations.
///
/// Deliberately strict: anything that would need the parser to be understood (`;`,
/// braces, `!`, comments, unbalanced parentheses or quotes) is refused.
#[derive(Debug, Clone, Default)]
pub struct DeclarationBuilder {
    property: String,
    value: Option<String>,
    important: bool,
}

impl DeclarationBuilder {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            ..Self::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    pub fn build(self) -> ExportResult<Declaration> {
        let invalid = |message: &str| ExportError::InvalidDeclaration {
            property: self.property.clone(),
            message: message.to_string(),
        };

        if !self.property.starts_with(CUSTOM_PROPERTY_PREFIX) {
            return Err(invalid("not a custom property"));
        }
        // Only names the parser reads back as one identifier
        if !is_custom_property_name(&self.property) {
            return Err(invalid("invalid property name"));
        }

        let value = self.value.as_deref().map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(invalid("empty value"));
        }
        if value.contains(['{', '}', ';', '!']) || value.contains("/*") {
            return Err(invalid("value needs the parser"));
        }
        if !is_balanced(value) {
            return Err(invalid("unbalanced parentheses or quotes"));
        }

        Ok(Declaration {
            property: self.property.clone(),
            value: value.to_string(),
            important: self.important,
        })
    }
}

fn is_balanced(value: &str) -> bool {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    for ch in value.chars() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0 && quote.is_none()
}

/// Entry of a rule's block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockItem {
    Declaration(Declaration),
    /// Anything else in the block (comments, nested rules), kept verbatim
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// Selector text with whitespace collapsed
    pub selector: String,
    pub items: Vec<BlockItem>,
    /// Byte range in the source, `None` for rules created from the model
    span: Option<Range<usize>>,
    modified: bool,
}

impl RuleSet {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            items: Vec::new(),
            span: None,
            modified: true,
        }
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.items.iter().filter_map(|item| match item {
            BlockItem::Declaration(declaration) => Some(declaration),
            BlockItem::Raw(_) => None,
        })
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.items.push(BlockItem::Declaration(declaration));
        self.modified = true;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_css(&self) -> String {
        let mut css = format!("{} {{\n", self.selector);
        for item in &self.items {
            match item {
                BlockItem::Declaration(declaration) => {
                    css.push_str(INDENT);
                    css.push_str(&declaration.to_css());
                    css.push_str(";\n");
                }
                BlockItem::Raw(text) => {
                    css.push_str(INDENT);
                    css.push_str(text);
                    css.push('\n');
                }
            }
        }
        css.push('}');
        css
    }

    fn from_node(node: Node, content: &str) -> Option<Self> {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();

        let selectors = children.iter().find(|child| child.kind() == NODE_SELECTORS)?;
        let block = children.iter().find(|child| child.kind() == NODE_BLOCK)?;
        let selector = collapse_whitespace(node_text(*selectors, content));

        let mut items = Vec::new();
        let mut block_cursor = block.walk();
        for child in block.children(&mut block_cursor) {
            match child.kind() {
                NODE_OPEN_BRACE | NODE_CLOSE_BRACE => {}
                NODE_DECLARATION => match declaration_from_node(child, content) {
                    Some(declaration) => items.push(BlockItem::Declaration(declaration)),
                    None => items.push(BlockItem::Raw(node_text(child, content).to_string())),
                },
                _ => items.push(BlockItem::Raw(node_text(child, content).to_string())),
            }
        }

        Some(Self {
            selector,
            items,
            span: Some(node.start_byte()..node.end_byte()),
            modified: false,
        })
    }
}

fn declaration_from_node(node: Node, content: &str) -> Option<Declaration> {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();

    let property = children
        .iter()
        .find(|child| child.kind() == NODE_PROPERTY_NAME)
        .map(|child| node_text(*child, content).to_string())?;
    let colon = children.iter().position(|child| child.kind() == NODE_COLON)?;
    let important = children.iter().any(|child| child.kind() == NODE_IMPORTANT);

    let value_nodes: Vec<&Node> = children[colon + 1..]
        .iter()
        .filter(|child| child.kind() != NODE_SEMICOLON && child.kind() != NODE_IMPORTANT)
        .collect();
    let (first, last) = (value_nodes.first()?, value_nodes.last()?);
    let value = content[first.start_byte()..last.end_byte()].trim().to_string();

    Some(Declaration {
        property,
        value,
        important,
    })
}

fn node_text<'a>(node: Node, content: &'a str) -> &'a str {
    &content[node.start_byte()..node.end_byte()]
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parsed stylesheet plus the text it came from
#[derive(Debug, Clone)]
pub struct Stylesheet {
    source: String,
    pub rules: Vec<RuleSet>,
}

impl Stylesheet {
    /// Parse `content`. Any syntax error fails the whole parse.
    pub fn parse(content: &str) -> ExportResult<Self> {
        let mut parser = CssParser::new()?;
        let tree = parser.parse(content).ok_or_else(|| ExportError::CssParse {
            message: "parser returned no tree".to_string(),
        })?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(ExportError::CssParse {
                message: format!("syntax error near byte {}", first_error_offset(root)),
            });
        }
        Ok(Self::from_tree(root, content))
    }

    fn from_tree(root: Node, content: &str) -> Self {
        let mut cursor = root.walk();
        let rules = root
            .children(&mut cursor)
            .filter(|child| child.kind() == NODE_RULE_SET)
            .filter_map(|child| RuleSet::from_node(child, content))
            .collect();
        Self {
            source: content.to_string(),
            rules,
        }
    }

    /// Build a stylesheet from rules only; rendering joins them with blank lines
    pub fn from_rules(rules: Vec<RuleSet>) -> Self {
        Self {
            source: String::new(),
            rules,
        }
    }

    /// Last rule with exactly this selector, the one where appended declarations win
    pub fn rule_mut(&mut self, selector: &str) -> Option<&mut RuleSet> {
        self.rules.iter_mut().rev().find(|rule| rule.selector == selector)
    }

    pub fn is_modified(&self) -> bool {
        self.rules.iter().any(|rule| rule.modified)
    }

    /// Write the stylesheet back. Untouched rules and everything between rules come
    /// straight from the source.
    pub fn to_css(&self) -> String {
        let mut css = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for rule in &self.rules {
            match &rule.span {
                Some(span) if !rule.modified => {
                    css.push_str(&self.source[cursor..span.end]);
                    cursor = span.end;
                }
                Some(span) => {
                    css.push_str(&self.source[cursor..span.start]);
                    css.push_str(&rule.to_css());
                    cursor = span.end;
                }
                None => {
                    if !css.is_empty() {
                        css.push_str("\n\n");
                    }
                    css.push_str(&rule.to_css());
                }
            }
        }
        css.push_str(&self.source[cursor..]);
        css
    }
}

fn first_error_offset(node: Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_byte();
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find(|child| child.has_error())
        .map(first_error_offset)
        .unwrap_or_else(|| node.start_byte())
}
