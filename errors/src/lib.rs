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

//! The error types for the Espalier grammar synthesiser.
//!
//! Oracle rejections are *not* errors: they are folded into booleans at the
//! oracle wrapper and never surface here. The enums below cover fatal setup
//! problems and invariant violations only.

#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod errors;
pub use self::errors::*;

/// A result type whose error defaults to the umbrella [`EspalierError`].
pub type Result<T, E = EspalierError> = core::result::Result<T, E>;
