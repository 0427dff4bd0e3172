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

//! Module defining announcements and how they are compared.

use crate::types::{Asn, Prefix};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use std::cmp::Ordering;

/// The neighbor class over which an announcement was received.
///
/// `Origin` is the special case of an announcement seeded at the AS itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    /// Received from a provider (sent downwards).
    Provider,
    /// Received from a peer.
    Peer,
    /// Received from a customer (sent upwards).
    Customer,
    /// Seeded locally at the origin AS.
    Origin,
}

impl Relationship {
    /// Local preference of a route, determined by the class it was received
    /// from: `Origin > Customer > Peer > Provider`.
    pub(crate) fn local_pref(&self) -> u8 {
        match self {
            Relationship::Origin => 3,
            Relationship::Customer => 2,
            Relationship::Peer => 1,
            Relationship::Provider => 0,
        }
    }

    /// Whether a route of this class may be exported to providers and peers.
    /// Routes learned from peers or providers only ever travel downwards.
    pub(crate) fn exportable_upwards(&self) -> bool {
        matches!(self, Relationship::Origin | Relationship::Customer)
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relationship::Provider => write!(f, "provider"),
            Relationship::Peer => write!(f, "peer"),
            Relationship::Customer => write!(f, "customer"),
            Relationship::Origin => write!(f, "origin"),
        }
    }
}

/// A single route announcement for one prefix.
///
/// The following BGP attributes are omitted: LOCAL-PREF is implied by
/// [`Relationship`], and MED, communities and originator information have no
/// meaning at the AS level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// The announced prefix.
    pub prefix: Prefix,
    /// AS path, where the origin of the route is last, and the number of a
    /// new AS is prepended.
    pub as_path: Vec<Asn>,
    /// The AS that last (re-)sent this announcement. Overwritten by the
    /// sender on every forward.
    pub next_hop: Asn,
    /// The neighbor class over which this announcement arrived.
    pub received_from: Relationship,
    /// Whether the announcement fails route origin validation.
    pub rov_invalid: bool,
}

impl Announcement {
    /// The canonical announcement seeded at the origin AS itself.
    pub fn origin(asn: Asn, prefix: impl Into<Prefix>, rov_invalid: bool) -> Self {
        Self {
            prefix: prefix.into(),
            as_path: vec![asn],
            next_hop: asn,
            received_from: Relationship::Origin,
            rov_invalid,
        }
    }

    /// The origin AS of this announcement (the rightmost path element), or
    /// `None` for a malformed empty path.
    pub fn origin_asn(&self) -> Option<Asn> {
        self.as_path.last().copied()
    }

    /// Compare two candidate announcements for the same prefix by the best
    /// path selection rules, in order:
    ///
    /// 1. local preference of the receiving relationship,
    /// 2. shortest AS path,
    /// 3. lowest next hop.
    ///
    /// `Ordering::Greater` means that `self` is preferred. An incumbent RIB
    /// entry is only ever replaced on `Greater`, so a full tie keeps the
    /// installed route.
    pub fn compare(&self, other: &Self) -> Ordering {
        match self
            .received_from
            .local_pref()
            .cmp(&other.received_from.local_pref())
        {
            Ordering::Equal => {}
            o => return o,
        }

        match self.as_path.len().cmp(&other.as_path.len()) {
            Ordering::Equal => {}
            Ordering::Greater => return Ordering::Less,
            Ordering::Less => return Ordering::Greater,
        }

        match self.next_hop.cmp(&other.next_hop) {
            Ordering::Equal => Ordering::Equal,
            Ordering::Greater => Ordering::Less,
            Ordering::Less => Ordering::Greater,
        }
    }

    /// Returns `true` if `self` wins best path selection against `other`.
    pub fn better_than(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Greater
    }
}

impl std::fmt::Display for Announcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} via [{}] from {}",
            self.prefix,
            self.as_path.iter().join(", "),
            self.received_from,
        )
    }
}
