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

use crate::SynthesisOptions;

use espalier_ast::{Grammar, NtAllocator, ParseNode};
use espalier_errors::Result;
use espalier_oracle::CachingOracle;
use espalier_passes::{
    BuildTrees, Coalesce, CoalescePartial, DeriveClasses, ExpandConfig, ExpandTokens, Minimize,
    Pass, SynthesisState,
};

/// The primary entry point of the Espalier synthesiser.
///
/// Drives the passes in their required order: class derivation seeds the
/// trees, bubbling grows them, a final full-then-partial coalescing round
/// merges what the bubble-local rounds missed, minimisation cleans up, and
/// token expansion generalises digit literals.
pub struct Synthesizer<'a> {
    /// The caching oracle probes go through.
    oracle: &'a mut CachingOracle,
    /// Options for the run.
    options: SynthesisOptions,
}

impl<'a> Synthesizer<'a> {
    /// Returns a new synthesiser over `oracle`.
    pub fn new(oracle: &'a mut CachingOracle, options: SynthesisOptions) -> Self {
        Self { oracle, options }
    }

    /// Infers a grammar from the tokenised positive `examples`.
    ///
    /// Every example must be accepted by the oracle; the inferred grammar
    /// derives at least the example strings, generalised as far as the
    /// oracle permitted.
    pub fn synthesize(&mut self, examples: Vec<Vec<ParseNode>>) -> Result<Grammar> {
        let allocator = NtAllocator::default();
        let mut state = SynthesisState::new(self.oracle, &allocator);

        DeriveClasses::do_pass(examples, &mut state)?;
        BuildTrees::do_pass((), &mut state)?;

        let coalesced = Coalesce::do_pass(None, &mut state)?;
        let partials = CoalescePartial::do_pass(None, &mut state)?;
        tracing::info!(coalesced, partials = partials.len(), "final coalescing done");

        Minimize::do_pass((), &mut state)?;

        if self.options.expand_tokens {
            let config =
                ExpandConfig { seed: self.options.seed, max_samples: self.options.max_samples };
            ExpandTokens::do_pass(config, &mut state)?;
        }

        tracing::info!(
            rules = state.grammar.len(),
            size = state.grammar.size(),
            probes = state.oracle.parse_calls(),
            oracle_calls = state.oracle.real_calls(),
            "synthesis finished"
        );
        Ok(state.grammar)
    }
}
