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

use std::path::PathBuf;

use thiserror::Error;

/// CliError enum that represents all the errors of the command-line
/// boundary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The tokenised-examples file could not be read.
    #[error("failed to read examples file `{}`: {source}", path.display())]
    ExamplesFileRead {
        /// The path that was given on the command line.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The inferred grammar could not be serialised for output.
    #[error("failed to serialise the grammar: {0}")]
    GrammarSerialisation(String),
}
