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

use crate::{
    Pass, SynthesisState, apply_grouping, build_grammar, coalesce, coalesce_partial,
    enumerate_groupings,
};

use espalier_errors::Result;

/// The main tree-construction loop: a greedy hill climb over groupings.
///
/// Each iteration enumerates the candidate groupings of the current trees
/// and tries them in order. A grouping is accepted when, after wrapping its
/// occurrences, the fresh nonterminal coalesces fully with an existing one,
/// or partially coalesces into some rule position, or the rebuilt grammar
/// got strictly smaller. Any acceptance restarts the climb; a full pass
/// with no acceptance terminates it.
pub struct BuildTrees;

impl Pass for BuildTrees {
    type Input = ();
    type Output = ();

    const NAME: &str = "tree-building";

    fn do_pass(_input: (), state: &mut SynthesisState<'_>) -> Result<()> {
        let mut best_size = state.grammar.size();
        let mut rounds = 0usize;

        'climb: loop {
            rounds += 1;
            let groupings = enumerate_groupings(&state.trees, state.allocator);
            for grouping in &groupings {
                let mut trees = state.trees.clone();
                if !apply_grouping(&mut trees, grouping) {
                    continue;
                }
                let mut grammar = build_grammar(&trees);

                let coalesced = coalesce(
                    &mut grammar,
                    &mut trees,
                    state.oracle,
                    state.allocator,
                    Some(grouping.fresh_nt.as_str()),
                );
                let partial = if coalesced {
                    false
                } else {
                    !coalesce_partial(
                        &mut grammar,
                        &mut trees,
                        state.oracle,
                        state.allocator,
                        Some(grouping.fresh_nt.as_str()),
                    )
                    .is_empty()
                };

                let size = grammar.size();
                if coalesced || partial || size < best_size {
                    tracing::debug!(
                        key = %grouping.key,
                        nt = %grouping.fresh_nt,
                        coalesced,
                        partial,
                        size,
                        "accepted grouping"
                    );
                    state.trees = trees;
                    state.grammar = grammar;
                    best_size = state.grammar.size();
                    continue 'climb;
                }
            }
            break;
        }

        tracing::info!(rounds, size = state.grammar.size(), "tree building finished");
        Ok(())
    }
}
