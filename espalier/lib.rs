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

//! Espalier infers a context-free grammar for a black-box language from a
//! membership oracle and a set of positive example strings.

#![forbid(unsafe_code)]

pub use espalier_ast as ast;
pub use espalier_errors as errors;
pub use espalier_oracle as oracle;
pub use espalier_passes as passes;
pub use espalier_synthesis as synthesis;
