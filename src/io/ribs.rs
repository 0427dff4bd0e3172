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

//! Serialisation of the final RIBs.

use crate::{
    graph::AsGraph,
    types::{Asn, SimError},
};

use itertools::Itertools;
use log::info;
use serde::Serialize;

use std::{fs::File, path::Path};

/// One output row.
#[derive(Debug, Serialize)]
struct RibRecord<'a> {
    asn: u32,
    prefix: &'a str,
    as_path: String,
}

/// Render an AS path as a parenthesised tuple.
///
/// A single-element path keeps a trailing comma, `(64501,)`; longer paths
/// read `(64501, 64502, 64503)` with the receiver first and the origin last.
/// Every rendering contains a comma, so the CSV writer always quotes the
/// field.
fn fmt_as_path(path: &[Asn]) -> String {
    match path {
        [origin] => format!("({},)", origin.0),
        _ => format!("({})", path.iter().map(|asn| asn.0).join(", ")),
    }
}

/// Write every installed RIB entry to `path` as CSV.
///
/// The header is `asn,prefix,as_path`; rows are sorted by `(asn, prefix)` so
/// that repeated runs are diffable.
pub fn write_ribs(path: &Path, graph: &AsGraph) -> Result<(), SimError> {
    let file = File::create(path).map_err(|source| SimError::OutputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    let mut rows = 0usize;
    for (asn, ann) in graph.ribs() {
        writer.serialize(RibRecord {
            asn: asn.0,
            prefix: ann.prefix.as_str(),
            as_path: fmt_as_path(&ann.as_path),
        })?;
        rows += 1;
    }
    if rows == 0 {
        // a run that learned no routes still gets the header line
        writer.write_record(["asn", "prefix", "as_path"])?;
    }
    writer.flush()?;
    info!("wrote {rows} RIB entries to {}", path.display());
    Ok(())
}
