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

//! The inference passes of the Espalier grammar synthesiser.
//!
//! Each stage of the pipeline is a [`Pass`] over a shared
//! [`SynthesisState`]: character-class derivation builds the initial trees,
//! bubbling grows them under oracle guidance, coalescing merges
//! interchangeable nonterminals, minimisation removes dead indirection, and
//! token expansion generalises digit literals.

#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod bubbling;
pub use self::bubbling::*;

pub mod class_derivation;
pub use self::class_derivation::*;

pub mod coalescing;
pub use self::coalescing::*;

pub mod common;
pub use self::common::*;

pub mod minimization;
pub use self::minimization::*;

pub mod pass;
pub use self::pass::*;

pub mod token_expansion;
pub use self::token_expansion::*;
