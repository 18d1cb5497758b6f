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

pub mod semantic_errors;
pub use self::semantic_errors::*;
