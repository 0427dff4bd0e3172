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

//! Ingress policy applied by an AS to every incoming announcement.

use crate::announcement::Announcement;

use serde::{Deserialize, Serialize};

/// The routing policy of a single AS.
///
/// The policy is consulted for every announcement taken out of the receive
/// queue, before loop detection and best path selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    /// Plain BGP: accept every announcement.
    #[default]
    Bgp,
    /// Route Origin Validation: drop announcements flagged as invalid.
    Rov,
}

/// The verdict of an ingress policy for one announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyVerdict {
    /// Hand the announcement to loop detection and best path selection.
    Accept,
    /// Discard the announcement. This is an ordinary outcome, not an error.
    Drop,
}

impl PolicyKind {
    /// Apply the policy to an incoming announcement.
    pub fn on_receive(&self, ann: &Announcement) -> PolicyVerdict {
        match self {
            PolicyKind::Bgp => PolicyVerdict::Accept,
            PolicyKind::Rov if ann.rov_invalid => PolicyVerdict::Drop,
            PolicyKind::Rov => PolicyVerdict::Accept,
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyKind::Bgp => write!(f, "BGP"),
            PolicyKind::Rov => write!(f, "ROV"),
        }
    }
}
