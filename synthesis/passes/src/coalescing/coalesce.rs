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

use crate::{Pass, SynthesisState, derivable_strings, replace_every_occurrence};

use espalier_ast::{Grammar, NtAllocator, ParseNode, Rule, START, UnionFind};
use espalier_errors::Result;
use espalier_oracle::CachingOracle;

use indexmap::IndexMap;
use itertools::Itertools;

/// Full coalescing as a pipeline pass. The input optionally restricts the
/// pair enumeration to a single target nonterminal.
pub struct Coalesce;

impl Pass for Coalesce {
    type Input = Option<String>;
    type Output = bool;

    const NAME: &str = "coalescing";

    fn do_pass(target: Self::Input, state: &mut SynthesisState<'_>) -> Result<bool> {
        Ok(coalesce(
            &mut state.grammar,
            &mut state.trees,
            state.oracle,
            state.allocator,
            target.as_deref(),
        ))
    }
}

/// Merges every set of nonterminals that are mutually replaceable in all
/// contexts the oracle accepts. Returns whether anything was merged.
///
/// Two nonterminals merge when every string derivable from each can stand
/// in for every occurrence of the other, in every tree, without the oracle
/// rejecting. With a `target`, only pairs involving the target are tested.
pub fn coalesce(
    grammar: &mut Grammar,
    trees: &mut Vec<ParseNode>,
    oracle: &mut CachingOracle,
    allocator: &NtAllocator,
    target: Option<&str>,
) -> bool {
    let nonterminals: Vec<String> =
        grammar.keys().filter(|name| *name != START).cloned().collect();

    let pairs: Vec<(String, String)> = match target {
        Some(target) => nonterminals
            .iter()
            .filter(|name| *name != target)
            .map(|name| (target.to_string(), name.clone()))
            .collect(),
        None => nonterminals.iter().cloned().tuple_combinations().collect(),
    };

    let mut classes = UnionFind::new(nonterminals.iter().cloned());
    let mut derivable: IndexMap<String, Vec<String>> = IndexMap::new();
    for (a, b) in &pairs {
        if classes.is_connected(a, b) {
            continue;
        }
        if mutually_replaceable(trees, oracle, &mut derivable, a, b) {
            tracing::debug!(%a, %b, "nonterminals are mutually replaceable");
            classes.connect(a, b);
        }
    }

    let mut did_coalesce = false;
    for (_, members) in classes.classes() {
        if members.len() < 2 {
            continue;
        }
        did_coalesce = true;
        let class_nt = if members.iter().any(|member| member == START) {
            START.to_string()
        } else {
            allocator.next_nt()
        };

        // Point every body at the class nonterminal, then fold the member
        // rules into one, dropping the self-unit bodies this introduces.
        for member in &members {
            grammar.rename_symbol(member, &class_nt);
        }
        let mut class_rule = Rule::new(class_nt.clone());
        for member in &members {
            if let Some(rule) = grammar.remove_rule(member) {
                for body in rule.bodies {
                    let self_unit = body.len() == 1 && body[0] == class_nt;
                    if !self_unit && !class_rule.contains_body(&body) {
                        class_rule.add_body(body);
                    }
                }
            }
        }
        grammar.add_rule(class_rule);

        for tree in trees.iter_mut() {
            for member in &members {
                tree.rename_nonterminal(member, &class_nt);
            }
            flatten_indirection(tree);
        }
    }

    did_coalesce
}

/// Checks replaceability in both directions.
fn mutually_replaceable(
    trees: &[ParseNode],
    oracle: &mut CachingOracle,
    derivable: &mut IndexMap<String, Vec<String>>,
    a: &str,
    b: &str,
) -> bool {
    replaceable(trees, oracle, derivable, a, b) && replaceable(trees, oracle, derivable, b, a)
}

/// Checks that `a` can be replaced by `b` everywhere: every string
/// derivable from `b`, substituted for every occurrence of `a` in every
/// tree, is accepted. A nonterminal with no derivations offers no
/// evidence, so the check fails conservatively.
fn replaceable(
    trees: &[ParseNode],
    oracle: &mut CachingOracle,
    derivable: &mut IndexMap<String, Vec<String>>,
    a: &str,
    b: &str,
) -> bool {
    let b_strings = derivable
        .entry(b.to_string())
        .or_insert_with(|| derivable_strings(trees, b))
        .clone();
    if b_strings.is_empty() {
        return false;
    }
    b_strings.iter().all(|replacement| {
        trees
            .iter()
            .all(|tree| oracle.accepts(&replace_every_occurrence(tree, a, replacement)))
    })
}

/// Collapses chains `X -> X -> ...` left behind by class renaming: while a
/// node has exactly one child with the same payload, the child is spliced
/// out.
fn flatten_indirection(node: &mut ParseNode) {
    if let ParseNode::Nonterminal(name, children) = node {
        while children.len() == 1
            && !children[0].is_terminal()
            && children[0].payload() == name
        {
            let ParseNode::Nonterminal(_, grandchildren) = children.remove(0) else {
                unreachable!("non-terminal check above")
            };
            *children = grandchildren;
        }
        for child in children.iter_mut() {
            flatten_indirection(child);
        }
    }
}
