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

use espalier_ast::{Grammar, NtAllocator, ParseNode};
use espalier_errors::Result;
use espalier_oracle::CachingOracle;

/// The state every pass reads and rewrites.
///
/// The trees and grammar describe the same derivations at all times; the
/// oracle and allocator are owned by the driver and borrowed here for the
/// lifetime of the pipeline.
pub struct SynthesisState<'a> {
    /// One parse tree per positive example.
    pub trees: Vec<ParseNode>,
    /// The grammar those trees currently induce.
    pub grammar: Grammar,
    /// The caching membership oracle all probes go through.
    pub oracle: &'a mut CachingOracle,
    /// The fresh-nonterminal allocator for the run.
    pub allocator: &'a NtAllocator,
}

impl<'a> SynthesisState<'a> {
    /// Creates an empty state over the given oracle and allocator.
    pub fn new(oracle: &'a mut CachingOracle, allocator: &'a NtAllocator) -> Self {
        Self { trees: Vec::new(), grammar: Grammar::new(), oracle, allocator }
    }
}

/// A synthesis pass.
///
/// Every pass has access to the whole [`SynthesisState`], and may also
/// specify an `Input` and `Output`.
pub trait Pass {
    type Input;
    type Output;

    const NAME: &str;

    /// Runs the pass.
    fn do_pass(input: Self::Input, state: &mut SynthesisState<'_>) -> Result<Self::Output>;
}
