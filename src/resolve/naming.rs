//! Naming conventions shared by the stylesheet, the theme config and the graph
//!
//! Generated names must stay inside the identifier set tree-sitter-css accepts
//! (`[a-zA-Z0-9_-]` plus `\xA0-\xFF`), otherwise the scope repairer cannot re-read the
//! stylesheet. Characters outside that set are mapped or encoded by [`kebab`].

/// Last path segment that the style framework treats as the bare group name
pub const DEFAULT_SEGMENT: &str = "DEFAULT";

/// Prefix of class selectors for modes whose name does not give a usable class
pub const MODE_CLASS_FALLBACK_PREFIX: &str = "mode-";

/// Whether `ch` may appear in an identifier after its first character
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ('\u{A0}'..='\u{FF}').contains(&ch)
}

/// Turn a slash-delimited variable name into a CSS identifier fragment.
///
/// `/`, whitespace and ASCII punctuation become `-`, dots become `_`, `%` becomes
/// `pct`, runs of dashes collapse. Characters past `\xFF` are written as `u<hex>`
/// (`颜色` -> `u989cu8272`). Case is kept because `DEFAULT` segments are matched
/// case-sensitively.
pub fn kebab(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '.' => result.push('_'),
            '%' => result.push_str("pct"),
            '-' => push_separator(&mut result),
            c if c.is_whitespace() => push_separator(&mut result),
            c if is_identifier_char(c) => result.push(c),
            c if c.is_ascii() => push_separator(&mut result),
            c => result.push_str(&format!("u{:x}", c as u32)),
        }
    }
    while result.ends_with('-') {
        result.pop();
    }
    result
}

fn push_separator(result: &mut String) {
    if !result.is_empty() && !result.ends_with('-') {
        result.push('-');
    }
}

/// Custom property name for a variable, `--colors-brand-primary`.
///
/// A trailing `DEFAULT` segment is dropped: `spacing/card/DEFAULT` -> `--spacing-card`.
pub fn css_var_name(name: &str) -> String {
    let kebab_name = kebab(name);
    let suffix = format!("-{}", DEFAULT_SEGMENT);
    let trimmed = kebab_name.strip_suffix(&suffix).unwrap_or(&kebab_name);
    format!("--{}", trimmed)
}

/// `--` followed by at least one identifier character
pub fn is_custom_property_name(name: &str) -> bool {
    match name.strip_prefix("--") {
        Some(rest) => !rest.is_empty() && rest.chars().all(is_identifier_char),
        None => false,
    }
}

/// Identifier usable as a class name: no leading digit, nothing outside the
/// identifier set
pub fn is_class_name(name: &str) -> bool {
    let body = name.strip_prefix('-').unwrap_or(name);
    let mut chars = body.chars();
    match chars.next() {
        Some(first) if is_identifier_char(first) && !first.is_ascii_digit() && first != '-' => {
            chars.all(is_identifier_char)
        }
        _ => false,
    }
}

/// Class name for a mode, `Dark Blue` -> `dark-blue`. `None` when the name does not
/// produce a valid class (`2x`, `50%`, empty).
pub fn mode_class(mode_name: &str) -> Option<String> {
    let class = kebab(mode_name).to_lowercase();
    is_class_name(&class).then_some(class)
}

/// Class name derived from a mode id, always valid: `1:0` -> `mode-1-0`
pub fn mode_id_class(mode_id: &str) -> String {
    format!("{}{}", MODE_CLASS_FALLBACK_PREFIX, kebab(mode_id).to_lowercase())
}

/// Graph node key: slashes become dashes, nothing else changes
pub fn node_key(name: &str) -> String {
    name.replace('/', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab() {
        assert_eq!(kebab("colors/brand/primary"), "colors-brand-primary");
        assert_eq!(kebab("Font Size/Body Large"), "Font-Size-Body-Large");
        assert_eq!(kebab("spacing/0.5"), "spacing-0_5");
        assert_eq!(kebab("/leading//trailing/"), "leading-trailing");
    }

    #[test]
    fn test_kebab_maps_punctuation_and_encodes_wide_characters() {
        assert_eq!(kebab("spacing/50%"), "spacing-50pct");
        assert_eq!(kebab("radius/(sm)"), "radius-sm");
        assert_eq!(kebab("Dark (HC)"), "Dark-HC");
        assert_eq!(kebab("颜色/主色"), "u989cu8272-u4e3bu8272");
        assert_eq!(kebab("café"), "café");
    }

    #[test]
    fn test_generated_names_are_identifiers() {
        for name in ["颜色/主色", "spacing/50%", "radius/(sm)", "a+b/c#d", "ü/ß"] {
            let css_name = css_var_name(name);
            assert!(is_custom_property_name(&css_name), "{} -> {}", name, css_name);
        }
        assert!(!is_custom_property_name("--"));
        assert!(!is_custom_property_name("--颜色"));
        assert!(!is_custom_property_name("color"));
    }

    #[test]
    fn test_css_var_name_strips_default() {
        assert_eq!(css_var_name("spacing/card/DEFAULT"), "--spacing-card");
        assert_eq!(css_var_name("colors/gray/500"), "--colors-gray-500");
        assert_eq!(css_var_name("DEFAULT"), "--DEFAULT");
        assert_eq!(css_var_name("colors/default"), "--colors-default");
    }

    #[test]
    fn test_mode_class() {
        assert_eq!(mode_class("Dark Blue"), Some("dark-blue".to_string()));
        assert_eq!(mode_class("Dark (HC)"), Some("dark-hc".to_string()));
        assert_eq!(mode_class("深色"), Some("u6df1u8272".to_string()));
        assert_eq!(mode_class("2x"), None);
        assert_eq!(mode_class("50%"), None);
        assert_eq!(mode_class("()"), None);
        assert_eq!(mode_id_class("1:0"), "mode-1-0");
    }

    #[test]
    fn test_node_key() {
        assert_eq!(node_key("colors/brand primary"), "colors-brand primary");
    }
}
