// RovSim: AS-level routing simulator with Route Origin Validation
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Collaborators around the core
//!
//! Input parsing (relationship records, origin announcements, the ROV
//! deployment list) and the final RIB serialisation. A record that fails to
//! parse is logged and skipped; only an unopenable file aborts the run.

mod relationships;
mod ribs;
mod rov;
mod seeds;

pub use relationships::read_relationships;
pub use ribs::write_ribs;
pub use rov::read_rov_asns;
pub use seeds::read_seeds;

use crate::types::SimError;

use std::{fs::File, path::Path};

/// Open an input file, naming the path in the error.
fn open_input(path: &Path) -> Result<File, SimError> {
    File::open(path).map_err(|source| SimError::InputOpen {
        path: path.to_path_buf(),
        source,
    })
}
