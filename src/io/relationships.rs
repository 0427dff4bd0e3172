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

//! Parsing of CAIDA serial-2 `as-rel2` relationship files.

use super::open_input;
use crate::{
    graph::AsGraph,
    types::{Asn, SimError},
};

use bzip2::read::MultiBzDecoder;
use log::{info, warn};

use std::{
    ffi::OsStr,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Read a CAIDA serial-2 relationship file into `graph`.
///
/// Lines starting with `#` are comments. Every data line holds at least
/// three `|`-separated fields, `<as1>|<as2>|<rel>`; trailing fields (such as
/// the inference source) are ignored. Files ending in `.bz2` are
/// decompressed on the fly. A line that does not parse is skipped with a
/// warning.
pub fn read_relationships(path: &Path, graph: &mut AsGraph) -> Result<(), SimError> {
    let file = open_input(path)?;
    let reader: Box<dyn Read> = if path.extension() == Some(OsStr::new("bz2")) {
        Box::new(MultiBzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut records = 0usize;
    for line in BufReader::new(reader).lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_record(&line) {
            Some((as1, as2, rel)) => {
                graph.add_relationship(as1, as2, rel);
                records += 1;
            }
            None => warn!("skipping malformed relationship record: {line}"),
        }
    }
    info!(
        "parsed {records} relationship records into {} ASes",
        graph.node_count()
    );
    Ok(())
}

/// Split one `<as1>|<as2>|<rel>` record. Trailing fields are ignored.
fn parse_record(line: &str) -> Option<(Asn, Asn, i8)> {
    let mut fields = line.split('|');
    let as1 = fields.next()?.trim().parse::<u32>().ok()?;
    let as2 = fields.next()?.trim().parse::<u32>().ok()?;
    let rel = fields.next()?.trim().parse::<i8>().ok()?;
    Some((Asn(as1), Asn(as2), rel))
}
