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

use espalier_passes::MAX_SAMPLES;

/// Synthesiser options.
#[derive(Clone, Copy, Debug)]
pub struct SynthesisOptions {
    /// Whether to run token expansion after minimisation.
    pub expand_tokens: bool,
    /// Seed for the token-expansion sampler.
    pub seed: u64,
    /// Probe strings sampled per numeric schema.
    pub max_samples: usize,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self { expand_tokens: true, seed: 0, max_samples: MAX_SAMPLES }
    }
}
