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

//! The membership-oracle seam of the Espalier grammar synthesiser.
//!
//! An oracle answers one question about a candidate string: does it belong
//! to the target language? The pipeline only ever observes a boolean per
//! candidate; rejection is control flow, never an error. All probes go
//! through [`CachingOracle`], which guarantees that each unique candidate
//! reaches the backend at most once.

#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod cache;
pub use self::cache::*;

pub mod external;
pub use self::external::*;

pub mod oracle;
pub use self::oracle::*;
