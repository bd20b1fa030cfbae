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

use crate::{Pass, SynthesisState};

use espalier_ast::{Grammar, ParseNode, START};
use espalier_errors::Result;

use indexmap::IndexMap;

/// Minimisation as a pipeline pass.
pub struct Minimize;

impl Pass for Minimize {
    type Input = ();
    type Output = ();

    const NAME: &str = "minimisation";

    fn do_pass(_input: (), state: &mut SynthesisState<'_>) -> Result<()> {
        minimize(&mut state.grammar, &mut state.trees);
        Ok(())
    }
}

/// Removes duplicate bodies and degenerate indirection from the grammar,
/// keeping the trees in step. Idempotent: a second run changes nothing.
///
/// Two inlining rewrites run to fixed point. A nonterminal whose only body
/// is a single terminal (directly, or after earlier inlining) is
/// substituted into its uses; a nonterminal with one body and exactly one
/// use elsewhere is spliced into that use. START is never inlined.
pub fn minimize(grammar: &mut Grammar, trees: &mut [ParseNode]) {
    dedup_bodies(grammar);
    inline_unit_chains(grammar, trees);
    inline_single_uses(grammar, trees);
    dedup_bodies(grammar);
}

fn dedup_bodies(grammar: &mut Grammar) {
    for rule in grammar.rules_mut() {
        rule.dedup_bodies();
    }
}

/// Inlines nonterminals whose single body is one terminal symbol. Chains
/// `a -> b -> "x"` resolve bottom-up: once `b` is inlined, `a`'s body is a
/// terminal and the next round picks it up.
fn inline_unit_chains(grammar: &mut Grammar, trees: &mut [ParseNode]) {
    loop {
        let unit = grammar.rules().find(|rule| {
            rule.start != START
                && rule.bodies.len() == 1
                && rule.bodies[0].len() == 1
                && !grammar.contains(&rule.bodies[0][0])
        });
        let Some(rule) = unit else {
            return;
        };
        let name = rule.start.clone();
        let symbol = rule.bodies[0][0].clone();
        tracing::debug!(%name, %symbol, "inlining unit nonterminal");

        grammar.rename_symbol(&name, &symbol);
        grammar.remove_rule(&name);
        for tree in trees.iter_mut() {
            splice_out(tree, &name);
        }
    }
}

/// Inlines nonterminals with a single body and a single use.
fn inline_single_uses(grammar: &mut Grammar, trees: &mut [ParseNode]) {
    loop {
        let mut uses: IndexMap<String, usize> = IndexMap::new();
        for rule in grammar.rules() {
            for body in &rule.bodies {
                for symbol in body {
                    if grammar.contains(symbol) {
                        *uses.entry(symbol.clone()).or_insert(0) += 1;
                    }
                }
            }
        }

        let candidate = grammar.rules().find(|rule| {
            rule.start != START
                && rule.bodies.len() == 1
                && uses.get(&rule.start).copied().unwrap_or(0) == 1
                // A self-reference would make the single use its own body.
                && !rule.bodies[0].contains(&rule.start)
        });
        let Some(rule) = candidate else {
            return;
        };
        let name = rule.start.clone();
        let inlined = rule.bodies[0].clone();
        tracing::debug!(%name, "inlining single-use nonterminal");

        grammar.remove_rule(&name);
        for rule in grammar.rules_mut() {
            for body in &mut rule.bodies {
                if let Some(position) = body.iter().position(|symbol| symbol == &name) {
                    body.splice(position..position + 1, inlined.iter().cloned());
                }
            }
        }
        for tree in trees.iter_mut() {
            splice_out(tree, &name);
        }
    }
}

/// Replaces every tree node labelled `name` by its children, so the trees
/// keep matching the inlined grammar.
fn splice_out(node: &mut ParseNode, name: &str) {
    if let ParseNode::Nonterminal(_, children) = node {
        for child in children.iter_mut() {
            splice_out(child, name);
        }
        let mut index = 0;
        while index < children.len() {
            if !children[index].is_terminal() && children[index].payload() == name {
                let ParseNode::Nonterminal(_, grandchildren) = children.remove(index) else {
                    unreachable!("non-terminal check above")
                };
                let count = grandchildren.len();
                children.splice(index..index, grandchildren);
                index += count;
            } else {
                index += 1;
            }
        }
    }
}
