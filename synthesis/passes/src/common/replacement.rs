// Copyright (C) 2019-2025 Provable Inc.
// This file is part of the Espalier library.

// The Espalier library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Espalier library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Espalier library. If not, see <https://www.gnu.org/licenses/>.

//! Enumeration of the strings a tree can yield once occurrences of a
//! nonterminal are substituted.
//!
//! The functions here are pure: they produce candidate strings containing
//! the [`REPLACE_SENTINEL`] placeholder, which callers substitute with
//! concrete replacer strings before probing the oracle.

use espalier_ast::{ParseNode, fixup_terminal};

use indexmap::IndexSet;

/// The placeholder spliced into a yield wherever an occurrence was chosen
/// for substitution.
pub const REPLACE_SENTINEL: &str = "[[:REPLACEME]]";

/// All strings derivable from `tree` where each occurrence of `nt` is
/// independently either kept (contributing its own yield) or replaced by
/// the sentinel. The no-replacement combination is included; the result is
/// deduplicated in a deterministic order.
///
/// The result can have up to `2^k` entries for `k` occurrences of `nt`.
pub fn replacement_templates(tree: &ParseNode, nt: &str) -> Vec<String> {
    match tree {
        ParseNode::Terminal(lexeme) => vec![fixup_terminal(lexeme).to_string()],
        ParseNode::Nonterminal(name, children) => {
            let mut templates = IndexSet::new();
            if name == nt {
                templates.insert(REPLACE_SENTINEL.to_string());
            }
            templates.extend(cross_product(
                children.iter().map(|child| replacement_templates(child, nt)),
            ));
            templates.into_iter().collect()
        }
    }
}

/// All strings derivable from `tree` where, at each subtree that is exactly
/// an application of `body` under `rule_start`, the child at `position` is
/// independently either kept or replaced by the sentinel.
///
/// A subtree qualifies only when its payload equals `rule_start` *and* its
/// direct children's payloads (after terminal fixup) equal `body` exactly.
pub fn rule_replacement_templates(
    tree: &ParseNode,
    rule_start: &str,
    body: &[String],
    position: usize,
) -> Vec<String> {
    let body: Vec<&str> = body.iter().map(|symbol| fixup_terminal(symbol)).collect();
    rule_templates_at(tree, rule_start, &body, position)
}

fn rule_templates_at(
    tree: &ParseNode,
    rule_start: &str,
    body: &[&str],
    position: usize,
) -> Vec<String> {
    match tree {
        ParseNode::Terminal(lexeme) => vec![fixup_terminal(lexeme).to_string()],
        ParseNode::Nonterminal(name, children) => {
            let mut per_child: Vec<Vec<String>> = children
                .iter()
                .map(|child| rule_templates_at(child, rule_start, body, position))
                .collect();
            if name == rule_start {
                let tree_body: Vec<&str> =
                    children.iter().map(|child| fixup_terminal(child.payload())).collect();
                if tree_body == body {
                    per_child[position].push(REPLACE_SENTINEL.to_string());
                }
            }
            let mut templates: IndexSet<String> = IndexSet::new();
            templates.extend(cross_product(per_child));
            templates.into_iter().collect()
        }
    }
}

/// Every concrete candidate obtained by substituting each of `replacers`
/// for the sentinel in every template of `tree` with respect to `nt`.
pub fn strings_with_replacement(tree: &ParseNode, nt: &str, replacers: &[String]) -> Vec<String> {
    let templates = replacement_templates(tree, nt);
    let mut candidates = IndexSet::new();
    for replacer in replacers {
        for template in &templates {
            candidates.insert(template.replace(REPLACE_SENTINEL, replacer));
        }
    }
    candidates.into_iter().collect()
}

/// The yield of `tree` with *every* occurrence of `nt` replaced by
/// `replacement`. Occurrences nested under a replaced occurrence are
/// subsumed by it.
pub fn replace_every_occurrence(tree: &ParseNode, nt: &str, replacement: &str) -> String {
    match tree {
        ParseNode::Terminal(lexeme) => fixup_terminal(lexeme).to_string(),
        ParseNode::Nonterminal(name, children) => {
            if name == nt {
                replacement.to_string()
            } else {
                children
                    .iter()
                    .map(|child| replace_every_occurrence(child, nt, replacement))
                    .collect()
            }
        }
    }
}

/// The distinct strings derived by subtrees labelled `nt` anywhere in
/// `trees`, in first-encountered order.
pub fn derivable_strings(trees: &[ParseNode], nt: &str) -> Vec<String> {
    let mut strings = IndexSet::new();
    for tree in trees {
        tree.walk(&mut |node| {
            if !node.is_terminal() && node.payload() == nt {
                strings.insert(node.derived_string());
            }
        });
    }
    strings.into_iter().collect()
}

/// Concatenates one choice per child into every possible prefix string.
fn cross_product(per_child: impl IntoIterator<Item = Vec<String>>) -> Vec<String> {
    let mut prefixes = vec![String::new()];
    for child_strings in per_child {
        prefixes = prefixes
            .iter()
            .flat_map(|prefix| {
                child_strings.iter().map(move |suffix| format!("{prefix}{suffix}"))
            })
            .collect();
    }
    prefixes
}
