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

use crate::{Pass, SynthesisState, build_grammar};

use espalier_ast::{ParseNode, START, UnionFind, fixup_terminal};
use espalier_errors::{Result, SynthesisError};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

/// Partitions the input terminals into equivalence classes by pairwise
/// replaceability under the oracle, and builds the initial parse trees.
///
/// Two terminals land in the same class when swapping all occurrences of
/// one for the other, in every example and in both directions, never makes
/// the oracle reject. Each class receives a fresh nonterminal, and every
/// example becomes a tree of shape START -> example-nonterminal ->
/// class-nonterminal -> leaf.
pub struct DeriveClasses;

impl Pass for DeriveClasses {
    type Input = Vec<Vec<ParseNode>>;
    type Output = ();

    const NAME: &str = "class-derivation";

    fn do_pass(examples: Self::Input, state: &mut SynthesisState<'_>) -> Result<()> {
        if examples.is_empty() {
            return Err(SynthesisError::NoExamples.into());
        }

        // Token payloads per example, in input order.
        let mut tokenised: Vec<Vec<String>> = Vec::with_capacity(examples.len());
        for (index, example) in examples.iter().enumerate() {
            if example.is_empty() {
                return Err(SynthesisError::EmptyExample { index }.into());
            }
            tokenised.push(example.iter().map(|token| token.payload().to_string()).collect());
        }

        // Sanity check: the guide examples themselves must be accepted.
        // This is the degenerate replacement of "" by "".
        for tokens in &tokenised {
            let example = join_with_swap(tokens, None);
            if !state.oracle.accepts(&example) {
                return Err(SynthesisError::GuideExamplesRejected { example }.into());
            }
        }

        let terminals: IndexSet<String> = tokenised.iter().flatten().cloned().collect();
        let mut classes = UnionFind::new(terminals.iter().cloned());

        let pairs: Vec<(String, String)> = terminals.iter().cloned().tuple_combinations().collect();
        for (a, b) in &pairs {
            if classes.is_connected(a, b) {
                continue;
            }
            if replaces(state, &tokenised, a, b) && replaces(state, &tokenised, b, a) {
                tracing::debug!(%a, %b, "terminals are interchangeable");
                classes.connect(a, b);
            }
        }

        // One fresh nonterminal per class, then one per example.
        let mut class_nts: IndexMap<String, String> = IndexMap::new();
        for (_, members) in classes.classes() {
            let class_nt = state.allocator.next_nt();
            for member in members {
                class_nts.insert(member, class_nt.clone());
            }
        }
        tracing::info!(
            terminals = terminals.len(),
            classes = class_nts.values().collect::<IndexSet<_>>().len(),
            "derived terminal classes"
        );

        let allocator = state.allocator;
        state.trees = examples
            .into_iter()
            .map(|example| {
                let children = example
                    .into_iter()
                    .map(|token| {
                        let class_nt = class_nts[token.payload()].clone();
                        ParseNode::nonterminal(class_nt, vec![token])
                    })
                    .collect();
                let example_nt = allocator.next_nt();
                ParseNode::nonterminal(START, vec![ParseNode::nonterminal(example_nt, children)])
            })
            .collect();
        state.grammar = build_grammar(&state.trees);

        Ok(())
    }
}

/// Probes whether every example still parses once all occurrences of
/// `from` are swapped to `to`.
fn replaces(
    state: &mut SynthesisState<'_>,
    tokenised: &[Vec<String>],
    from: &str,
    to: &str,
) -> bool {
    tokenised
        .iter()
        .all(|tokens| state.oracle.accepts(&join_with_swap(tokens, Some((from, to)))))
}

/// Concatenates an example's fixup'd token payloads, optionally swapping
/// every occurrence of one token for another.
fn join_with_swap(tokens: &[String], swap: Option<(&str, &str)>) -> String {
    tokens
        .iter()
        .map(|token| {
            let payload = match swap {
                Some((from, to)) if token == from => to,
                _ => token,
            };
            fixup_terminal(payload)
        })
        .collect()
}
