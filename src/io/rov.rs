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

//! Loading of the ROV deployment list.

use super::open_input;
use crate::types::{Asn, SimError};

use log::{debug, info};

use std::{
    collections::BTreeSet,
    io::{BufRead, BufReader},
    path::Path,
};

/// Read the set of ROV-adopting ASNs from `path`, one per line.
///
/// Lines that are not a bare decimal number (such as an optional header) are
/// skipped.
pub fn read_rov_asns(path: &Path) -> Result<BTreeSet<Asn>, SimError> {
    let mut set = BTreeSet::new();
    for line in BufReader::new(open_input(path)?).lines() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.parse::<u32>() {
            Ok(asn) => {
                set.insert(Asn(asn));
            }
            Err(_) => debug!("skipping non-numeric ROV line: {entry}"),
        }
    }
    info!("loaded {} ROV-adopting ASes", set.len());
    Ok(set)
}
