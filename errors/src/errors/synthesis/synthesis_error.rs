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

use thiserror::Error;

/// SynthesisError enum that represents all the errors of the synthesis
/// pipeline. Oracle rejections are control flow, not errors, and do not
/// appear here.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// A guide example was rejected by the oracle itself, so no grammar can
    /// be inferred from it.
    #[error("guide examples do not compile: the oracle rejected `{example}`")]
    GuideExamplesRejected {
        /// The concatenated example string the oracle refused.
        example: String,
    },

    /// Synthesis was started without any positive examples.
    #[error("no guide examples were provided")]
    NoExamples,

    /// A guide example contains no tokens.
    #[error("guide example {index} has no tokens")]
    EmptyExample {
        /// Zero-based index of the offending example.
        index: usize,
    },
}
