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

#![deny(missing_docs, missing_debug_implementations)]

//! # RovSim
//!
//! This is a library for simulating inter-domain routing at the granularity
//! of entire autonomous systems, under the Gao-Rexford valley-free export
//! model with optional Route Origin Validation.
//!
//! ## Main Concepts
//!
//! The [`graph::AsGraph`] is the main datastructure to operate on. It owns
//! every AS, holds the customer-provider hierarchy and the peering links, and
//! is built from CAIDA serial-2 relationship records. Origin announcements
//! are seeded directly into the local RIBs of their origin ASes, and
//! [`propagation::propagate`] floods them through the topology in a single
//! rank-ordered UP / ACROSS / DOWN sweep. Afterwards, every AS exposes the
//! best route it installed for every prefix it learned.
//!
//! ASes adopting Route Origin Validation (see [`policy::PolicyKind`]) drop
//! announcements flagged as ROV-invalid when they receive them.
//!
//! The [`io`] module contains the collaborators around the core: parsers for
//! the relationship, announcement, and ROV deployment files, and the CSV
//! serialiser for the final RIBs.
//!
//! ## Example usage
//!
//! ```
//! use rovsim::prelude::*;
//!
//! fn main() -> Result<(), SimError> {
//!     let mut net = AsGraph::new();
//!
//!     // AS 1 provides transit to AS 2, which provides transit to AS 3.
//!     net.add_relationship(Asn(1), Asn(2), -1);
//!     net.add_relationship(Asn(2), Asn(3), -1);
//!
//!     // AS 1 originates a prefix.
//!     net.seed(Asn(1), Announcement::origin(Asn(1), "1.2.0.0/16", false))?;
//!
//!     propagate(&mut net)?;
//!
//!     let prefix: Prefix = "1.2.0.0/16".into();
//!     let as3 = net.node(Asn(3)).unwrap();
//!     assert_eq!(
//!         as3.rib_entry(&prefix).unwrap().as_path,
//!         vec![Asn(3), Asn(2), Asn(1)]
//!     );
//!     Ok(())
//! }
//! ```

pub mod announcement;
pub mod graph;
pub mod io;
pub mod policy;
pub mod prelude;
pub mod propagation;
pub mod types;

#[cfg(test)]
mod test;
