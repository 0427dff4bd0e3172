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

use crate::{
    announcement::Relationship,
    graph::AsGraph,
    policy::PolicyKind,
    types::{Asn, Prefix},
};

use itertools::Itertools;

/// Check every structural property that must hold after propagation: drained
/// receive queues, consistent ranks, mutually inverse adjacency, loop-free
/// paths starting at the owning AS, ROV-clean RIBs, and the absence of
/// valley paths.
fn assert_converged(net: &AsGraph) {
    for id in net.hierarchy.node_indices() {
        let node = net.node_at(id);
        let asn = node.asn();

        assert!(
            node.received_queue.is_empty(),
            "{asn} still has queued announcements"
        );

        for customer in net.customers(id) {
            assert!(
                node.rank() > net.node_at(customer).rank(),
                "{asn} does not rank above its customer {}",
                net.node_at(customer).asn()
            );
        }
        for provider in net.providers(id) {
            assert!(net.customers(provider).any(|c| c == id));
        }
        for customer in net.customers(id) {
            assert!(net.providers(customer).any(|p| p == id));
        }
        for peer in net.peers(id) {
            assert!(net.peers(peer).any(|p| p == id));
        }

        for (prefix, ann) in node.rib() {
            assert_eq!(&ann.prefix, prefix);
            assert_eq!(ann.as_path.first(), Some(&asn));
            assert!(ann.as_path.iter().all_unique(), "{asn}: looped path");
            if node.policy() == PolicyKind::Rov {
                assert!(!ann.rov_invalid, "{asn} adopts ROV but installed an invalid route");
            }
            // a route learned sideways or from upstream must never have
            // reached a peer or provider through this AS
            if matches!(ann.received_from, Relationship::Peer | Relationship::Provider) {
                for neighbor in net.peers(id).chain(net.providers(id)) {
                    if let Some(entry) = net.node_at(neighbor).rib_entry(prefix) {
                        assert!(
                            entry.next_hop != asn,
                            "{} learned {prefix} through {asn}, which forms a valley",
                            net.node_at(neighbor).asn()
                        );
                    }
                }
            }
        }
    }
}

/// The installed AS path at one AS as raw numbers, or `None`.
fn rib_path(net: &AsGraph, asn: u32, prefix: &str) -> Option<Vec<u32>> {
    let prefix: Prefix = prefix.into();
    net.node(Asn(asn))
        .and_then(|node| node.rib_entry(&prefix))
        .map(|ann| ann.as_path.iter().map(|asn| asn.0).collect())
}

macro_rules! assert_path {
    ($net:expr, $asn:expr, $prefix:expr, $($hop:expr),+) => {
        pretty_assertions::assert_eq!(
            crate::test::rib_path(&$net, $asn, $prefix),
            Some(vec![$($hop),+]),
            "unexpected path at AS{} for {}", $asn, $prefix
        )
    };
}

macro_rules! assert_no_path {
    ($net:expr, $asn:expr, $prefix:expr) => {
        pretty_assertions::assert_eq!(
            crate::test::rib_path(&$net, $asn, $prefix),
            None,
            "AS{} should not have a route for {}", $asn, $prefix
        )
    };
}

mod test_io;
