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

pub mod cli;
pub use self::cli::*;

pub mod synthesis;
pub use self::synthesis::*;

use thiserror::Error;

/// The umbrella error for all Espalier crates.
#[derive(Debug, Error)]
pub enum EspalierError {
    /// An error in the synthesis pipeline.
    #[error(transparent)]
    SynthesisError(#[from] SynthesisError),
    /// An error at the command-line boundary.
    #[error(transparent)]
    CliError(#[from] CliError),
}
