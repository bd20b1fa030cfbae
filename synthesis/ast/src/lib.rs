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

//! The data model of the Espalier grammar synthesiser.
//!
//! This crate defines the labelled rose tree ([`ParseNode`]) that the
//! pipeline rewrites, the ordered [`Grammar`] that is its product, and the
//! small supporting structures ([`UnionFind`], [`NtAllocator`]) that the
//! passes share.

#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod grammar;
pub use self::grammar::*;

pub mod nt_allocator;
pub use self::nt_allocator::*;

pub mod parse_node;
pub use self::parse_node::*;

pub mod symbol;
pub use self::symbol::*;

pub mod union_find;
pub use self::union_find::*;
