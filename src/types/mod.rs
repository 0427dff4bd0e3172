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

//! Module containing all type definitions

use petgraph::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::{io, path::PathBuf};

mod prefix;
pub use prefix::Prefix;

pub(crate) type IndexType = u32;
/// Identifier of an AS inside the graph arena (and index into it).
pub type NodeId = NodeIndex<IndexType>;

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asn(pub u32);

impl std::fmt::Display for Asn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl From<u32> for Asn {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

/// Simulation Errors
#[derive(Error, Debug)]
pub enum SimError {
    /// The customer-provider hierarchy contains a cycle. Rank assignment and
    /// valley-free propagation are undefined on such a topology.
    #[error("provider cycle detected involving {0}")]
    ProviderCycle(Asn),
    /// An input file could not be opened.
    #[error("cannot open input file {path}: {source}")]
    InputOpen {
        /// Path of the file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// An output file could not be created.
    #[error("cannot create output file {path}: {source}")]
    OutputOpen {
        /// Path of the file that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// A seeded announcement violates the origin invariants.
    #[error("invalid seed announcement at {asn}: {reason}")]
    InvalidSeed {
        /// The AS at which the announcement was seeded.
        asn: Asn,
        /// Why the announcement was rejected.
        reason: &'static str,
    },
    /// An I/O error occurred while reading or writing a stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A CSV stream could not be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
