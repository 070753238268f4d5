//! Keeps selector-scoped overrides consistent with the variables that read them
//!
//! A custom property is computed where it is declared. When `:root` declares
//! `--a: var(--b)` and `.dark` only overrides `--b`, elements under `.dark` still see
//! the `--a` computed at the root. The repair re-declares such dependents inside the
//! overriding scope:
//!
//! ```css
//! :root { --a: var(--b); --b: 1; }
//! .dark { --b: 2; --a: var(--b); }
//! ```
//!
//! The pass is best effort. Any failure leaves the input untouched.

use std::collections::{HashSet, VecDeque};
use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use regex::Regex;

use crate::config::ExportConfig;
use crate::error::ExportResult;

use super::constants::{INLINE_MARKER, ROOT_SELECTOR};
use super::stylesheet::{Declaration, Stylesheet};

static VAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"var\(\s*(--[A-Za-z0-9_\x{A0}-\x{FF}-]+)").expect("Failed to compile var() regex")
});

/// Names of the custom properties read through `var()` in `value`
pub fn var_references(value: &str) -> Vec<String> {
    VAR_REFERENCE
        .captures_iter(value)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Whether declarations under `selector` apply everywhere rather than to one override
pub fn is_root_scope(selector: &str, theme_marker: &str) -> bool {
    selector == ROOT_SELECTOR
        || (!theme_marker.is_empty() && selector == theme_marker)
        || selector.contains(INLINE_MARKER)
}

/// Dependency maps collected in one pass over the stylesheet
#[derive(Debug, Default)]
pub struct ReferenceMaps {
    /// Variable -> variables its value reads
    pub direct_refs: IndexMap<String, IndexSet<String>>,
    /// Variable -> variables whose values read it
    pub reverse_refs: IndexMap<String, IndexSet<String>>,
    /// Selector -> variables it declares
    pub selector_vars: IndexMap<String, IndexSet<String>>,
    /// Variables declared in a root scope
    pub root_vars: IndexSet<String>,
    /// First root-scope declaration of every root variable
    root_declarations: IndexMap<String, Declaration>,
}

impl ReferenceMaps {
    pub fn index(stylesheet: &Stylesheet, theme_marker: &str) -> Self {
        let mut maps = Self::default();
        for rule in &stylesheet.rules {
            let is_root = is_root_scope(&rule.selector, theme_marker);
            for declaration in rule.declarations().filter(|d| d.is_custom_property()) {
                let name = &declaration.property;
                maps.selector_vars
                    .entry(rule.selector.clone())
                    .or_default()
                    .insert(name.clone());

                for referenced in var_references(&declaration.value) {
                    maps.reverse_refs
                        .entry(referenced.clone())
                        .or_default()
                        .insert(name.clone());
                    maps.direct_refs
                        .entry(name.clone())
                        .or_default()
                        .insert(referenced);
                }

                if is_root {
                    maps.root_vars.insert(name.clone());
                    maps.root_declarations
                        .entry(name.clone())
                        .or_insert_with(|| declaration.clone());
                }
            }
        }
        maps
    }

    /// Every variable that reads `var`, directly or through other variables
    pub fn complete_chain(&self, var: &str) -> IndexSet<String> {
        let mut chain = IndexSet::new();
        let mut queue = VecDeque::from([var.to_string()]);
        while let Some(current) = queue.pop_front() {
            let Some(readers) = self.reverse_refs.get(&current) else {
                continue;
            };
            for reader in readers {
                if reader != var && chain.insert(reader.clone()) {
                    queue.push_back(reader.clone());
                }
            }
        }
        chain
    }

    /// Dependency path `from -> ... -> to` along `direct_refs`, both ends included
    pub fn find_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let mut visited = HashSet::new();
        let mut path = vec![from.to_string()];
        if self.find_path_inner(from, to, &mut visited, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    fn find_path_inner(
        &self,
        current: &str,
        to: &str,
        visited: &mut HashSet<String>,
        path: &mut Vec<String>,
    ) -> bool {
        if !visited.insert(current.to_string()) {
            return false;
        }
        let Some(dependencies) = self.direct_refs.get(current) else {
            return false;
        };
        for dependency in dependencies {
            path.push(dependency.clone());
            if dependency == to || self.find_path_inner(dependency, to, visited, path) {
                return true;
            }
            path.pop();
        }
        false
    }
}

/// A declaration to add to one scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// Root variable re-declared in the scope
    pub variable: String,
    /// Value copied from the root scope
    pub value: String,
    /// `!important` flag copied from the root scope
    pub important: bool,
    /// Next variable on the path from `variable` to the overridden one
    pub via: String,
}

/// Work out which root variables every override scope has to re-declare
pub fn plan_injections(maps: &ReferenceMaps, theme_marker: &str) -> IndexMap<String, Vec<Injection>> {
    let mut plan: IndexMap<String, Vec<Injection>> = IndexMap::new();

    for (selector, declared) in &maps.selector_vars {
        if is_root_scope(selector, theme_marker) {
            continue;
        }
        for overridden in declared {
            if !maps.reverse_refs.contains_key(overridden) {
                continue;
            }
            for upstream in maps.complete_chain(overridden) {
                if !maps.root_vars.contains(&upstream) || declared.contains(&upstream) {
                    continue;
                }
                let pending = plan.entry(selector.clone()).or_default();
                if pending.iter().any(|injection| injection.variable == upstream) {
                    continue;
                }
                let Some(path) = maps.find_path(&upstream, overridden) else {
                    debug!("No dependency path from {} to {} in {}", upstream, overridden, selector);
                    continue;
                };
                let via = path[1].clone();
                let (value, important) = match maps.root_declarations.get(&upstream) {
                    Some(root) => (root.value.clone(), root.important),
                    None => (format!("var({})", via), false),
                };
                pending.push(Injection {
                    variable: upstream,
                    value,
                    important,
                    via,
                });
            }
        }
    }

    plan.retain(|_, injections| !injections.is_empty());
    plan
}

/// Apply `plan` to the stylesheet. Returns how many declarations were added.
///
/// A declaration that neither the builder nor the textual fallback can construct is
/// skipped; it never aborts the rest of the pass.
pub fn apply_injections(stylesheet: &mut Stylesheet, plan: &IndexMap<String, Vec<Injection>>) -> usize {
    let mut applied = 0;
    for (selector, injections) in plan {
        let Some(rule) = stylesheet.rule_mut(selector) else {
            debug!("Selector {} disappeared, skipping", selector);
            continue;
        };
        for injection in injections {
            match Declaration::build_or_parse(
                &injection.variable,
                &injection.value,
                injection.important,
            ) {
                Ok(declaration) => {
                    debug!(
                        "Injecting {} into {} (reaches the override through {})",
                        injection.variable, selector, injection.via
                    );
                    rule.push(declaration);
                    applied += 1;
                }
                Err(e) => warn!(
                    "Skipping injection of {} into {}: {}",
                    injection.variable, selector, e
                ),
            }
        }
    }
    applied
}

fn try_repair(css: &str, theme_marker: &str) -> ExportResult<Option<String>> {
    let mut stylesheet = Stylesheet::parse(css)?;
    let maps = ReferenceMaps::index(&stylesheet, theme_marker);
    let plan = plan_injections(&maps, theme_marker);
    if plan.is_empty() {
        return Ok(None);
    }
    if apply_injections(&mut stylesheet, &plan) == 0 {
        return Ok(None);
    }
    Ok(Some(stylesheet.to_css()))
}

/// Repair `css` so override scopes keep the root variables that depend on them
/// consistent. Returns the input unchanged when nothing needs repair or when the
/// stylesheet cannot be processed.
pub fn repair_scopes(css: &str, config: &ExportConfig) -> String {
    match try_repair(css, &config.theme_marker) {
        Ok(Some(repaired)) => repaired,
        Ok(None) => css.to_string(),
        Err(e) => {
            warn!("Scope repair skipped: {}", e);
            css.to_string()
        }
    }
}

