// Copyright (C) 2019-2025 Aleo Systems Inc.
// This file is part of the Radian library.

// The Radian library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Radian library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Radian library. If not, see <https://www.gnu.org/licenses/>.

//! Defines the [`Span`] type, a half-open range of bytes within the
//! session's [`SourceMap`](crate::SourceMap).

use serde::{Deserialize, Serialize};
use std::{fmt, ops::Add};

/// Convert between a small unit type and `u32`/`usize`.
pub trait Pos {
    fn from_usize(n: usize) -> Self;
    fn to_usize(&self) -> usize;
    fn from_u32(n: u32) -> Self;
    fn to_u32(&self) -> u32;
}

/// A byte offset into the source map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BytePos(pub u32);

impl Pos for BytePos {
    fn from_usize(n: usize) -> Self {
        BytePos(n as u32)
    }

    fn to_usize(&self) -> usize {
        self.0 as usize
    }

    fn from_u32(n: u32) -> Self {
        BytePos(n)
    }

    fn to_u32(&self) -> u32 {
        self.0
    }
}

impl Add for BytePos {
    type Output = BytePos;

    fn add(self, rhs: BytePos) -> BytePos {
        BytePos(self.0 + rhs.0)
    }
}

/// The span between two byte positions, `lo` inclusive and `hi` exclusive.
///
/// Spans are meaningless outside the session that produced them; they are
/// resolved to file / line / column positions through the session source map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// The start position of the span.
    pub lo: BytePos,
    /// The end position of the span.
    pub hi: BytePos,
}

impl Span {
    /// Generate a new span from the `lo` and `hi` positions.
    pub fn new(lo: BytePos, hi: BytePos) -> Self {
        Self { lo, hi }
    }

    /// An empty span at the zero position, used for generated nodes
    /// which have no position in any source file.
    pub fn dummy() -> Self {
        Self::default()
    }

    /// Is the span the dummy span?
    pub fn is_dummy(&self) -> bool {
        self == &Self::dummy()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        crate::with_session_globals(|s| match s.source_map.span_to_location(*self) {
            Some(loc) => loc.fmt(f),
            None => write!(f, "<no location>"),
        })
    }
}

impl Add<&Span> for &Span {
    type Output = Span;

    fn add(self, other: &Span) -> Span {
        Span::new(self.lo.min(other.lo), self.hi.max(other.hi))
    }
}

impl Add for Span {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        // Joining with the dummy span must not drag the result to position zero.
        if self.is_dummy() {
            other
        } else if other.is_dummy() {
            self
        } else {
            &self + &other
        }
    }
}
