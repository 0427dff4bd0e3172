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

//! Seeding of origin announcements from the announcement CSV file.

use super::open_input;
use crate::{
    announcement::Announcement,
    graph::AsGraph,
    types::{Asn, SimError},
};

use log::{info, warn};
use serde::Deserialize;

use std::path::Path;

/// One row of the announcement input file.
#[derive(Debug, Deserialize)]
struct SeedRecord {
    seed_asn: u32,
    prefix: String,
    #[serde(deserialize_with = "bool_from_flag")]
    rov_invalid: bool,
}

/// Accept `true`/`True`/`1` and `false`/`False`/`0`.
fn bool_from_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.as_str() {
        "true" | "True" | "1" => Ok(true),
        "false" | "False" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!("not a boolean: {other}"))),
    }
}

/// Seed every announcement listed in the CSV file at `path` into the graph.
///
/// The file carries a header line `seed_asn,prefix,rov_invalid`. Rows that
/// fail to parse are skipped with a warning. Returns the number of seeded
/// announcements.
pub fn read_seeds(path: &Path, graph: &mut AsGraph) -> Result<usize, SimError> {
    let mut reader = csv::Reader::from_reader(open_input(path)?);
    let mut seeded = 0usize;
    for row in reader.deserialize::<SeedRecord>() {
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed announcement row: {e}");
                continue;
            }
        };
        let asn = Asn(record.seed_asn);
        let ann = Announcement::origin(asn, record.prefix.as_str(), record.rov_invalid);
        match graph.seed(asn, ann) {
            Ok(()) => seeded += 1,
            Err(e) => warn!("skipping announcement row: {e}"),
        }
    }
    info!("seeded {seeded} origin announcements");
    Ok(seeded)
}
