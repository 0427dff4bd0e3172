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

//! # The propagation engine
//!
//! Valley-free export in three phases over the ranked graph:
//!
//! 1. **UP** (rank 0 upward): every layer first drains its receive queues,
//!    then exports its customer and origin routes to its providers.
//! 2. **ACROSS**: every AS exports its customer and origin routes to its
//!    peers, then every AS drains its queue. Peer routes travel one hop.
//! 3. **DOWN** (top rank downward): every layer drains its queues, then
//!    exports its entire RIB to its customers.
//!
//! The export restriction of Gao-Rexford (routes learned from a peer or a
//! provider are never re-exported to another peer or provider) is not
//! checked against a table; it falls out of the phase structure and the
//! eligibility filter on upward and sideways sends.
//!
//! Within a phase, all processing at one rank completes before any send from
//! that rank starts. This guarantees that a provider only exports upwards
//! after all of its customers' routes have reached it.
//!
//! One UP / ACROSS / DOWN sweep reaches convergence: a valley-free path has
//! at most one upward leg, one peering hop, and one downward leg, so no
//! fixed-point iteration is run.

use crate::{
    announcement::{Announcement, Relationship},
    graph::AsGraph,
    policy::PolicyVerdict,
    types::{NodeId, SimError},
};

use log::{debug, trace};

use std::collections::hash_map::Entry;

/// Where a send step exports to, and how the receiver will see the route.
#[derive(Debug, Clone, Copy)]
enum Export {
    /// Send customer and origin routes upward; received as [`Relationship::Customer`].
    ToProviders,
    /// Send customer and origin routes sideways; received as [`Relationship::Peer`].
    ToPeers,
    /// Send the whole RIB downward; received as [`Relationship::Provider`].
    ToCustomers,
}

/// Run one complete UP / ACROSS / DOWN sweep over the graph.
///
/// Ranks are assigned first; a cycle in the provider hierarchy aborts before
/// any announcement moves. Propagation itself cannot fail. After the sweep
/// returns, every receive queue is empty and every local RIB holds the
/// converged best route per prefix.
pub fn propagate(net: &mut AsGraph) -> Result<(), SimError> {
    let layers = net.assign_ranks()?;
    propagate_up(net, &layers);
    propagate_across(net);
    propagate_down(net, &layers);
    Ok(())
}

/// Phase UP: from customers to providers, layer by layer.
fn propagate_up(net: &mut AsGraph, layers: &[Vec<NodeId>]) {
    debug!("propagating up through {} layers", layers.len());
    for layer in layers {
        for &id in layer {
            process(net, id);
        }
        for &id in layer {
            send(net, id, Export::ToProviders);
        }
    }
}

/// Phase ACROSS: one hop over every peering link.
fn propagate_across(net: &mut AsGraph) {
    debug!("propagating across peering links");
    let ids: Vec<NodeId> = net.hierarchy.node_indices().collect();
    for &id in &ids {
        send(net, id, Export::ToPeers);
    }
    for &id in &ids {
        process(net, id);
    }
}

/// Phase DOWN: from providers to customers, layer by layer.
fn propagate_down(net: &mut AsGraph, layers: &[Vec<NodeId>]) {
    debug!("propagating down through {} layers", layers.len());
    for layer in layers.iter().rev() {
        for &id in layer {
            process(net, id);
        }
        for &id in layer {
            send(net, id, Export::ToCustomers);
        }
    }
}

/// Drain the receive queue of one AS.
///
/// Every queued announcement runs through the ingress policy, then AS-path
/// loop detection, and finally best path selection against the installed RIB
/// entry. Accepted routes carry the AS's own number prepended exactly once.
fn process(net: &mut AsGraph, id: NodeId) {
    let node = &mut net.hierarchy[id];
    if node.received_queue.is_empty() {
        return;
    }
    let asn = node.asn();
    let queue = std::mem::take(&mut node.received_queue);
    for (prefix, anns) in queue {
        for mut ann in anns {
            if node.policy.on_receive(&ann) == PolicyVerdict::Drop {
                trace!("{asn} drops {ann} by policy");
                continue;
            }
            if ann.as_path.contains(&asn) {
                trace!("{asn} drops {ann} to avoid an AS path loop");
                continue;
            }
            ann.as_path.insert(0, asn);
            match node.local_rib.entry(prefix.clone()) {
                Entry::Vacant(e) => {
                    e.insert(ann);
                }
                Entry::Occupied(mut e) => {
                    if ann.better_than(e.get()) {
                        e.insert(ann);
                    }
                }
            }
        }
    }
}

/// Export the eligible RIB entries of one AS to one neighbor class.
///
/// The sender stamps itself as the next hop and re-tags the route with the
/// relationship under which the receiver sees it. Upward and sideways sends
/// are restricted to origin and customer routes; downward sends export
/// everything.
fn send(net: &mut AsGraph, id: NodeId, export: Export) {
    let receivers: Vec<NodeId> = match export {
        Export::ToProviders => net.providers(id).collect(),
        Export::ToPeers => net.peers(id).collect(),
        Export::ToCustomers => net.customers(id).collect(),
    };
    if receivers.is_empty() {
        return;
    }

    let node = &net.hierarchy[id];
    let sender = node.asn();
    let tag = match export {
        Export::ToProviders => Relationship::Customer,
        Export::ToPeers => Relationship::Peer,
        Export::ToCustomers => Relationship::Provider,
    };
    let exports: Vec<Announcement> = node
        .rib()
        .values()
        .filter(|ann| {
            matches!(export, Export::ToCustomers) || ann.received_from.exportable_upwards()
        })
        .map(|ann| {
            let mut fwd = ann.clone();
            fwd.next_hop = sender;
            fwd.received_from = tag;
            fwd
        })
        .collect();
    if exports.is_empty() {
        return;
    }

    trace!(
        "{sender} exports {} routes to {} neighbors ({export:?})",
        exports.len(),
        receivers.len()
    );
    for receiver in receivers {
        let queue = &mut net.hierarchy[receiver].received_queue;
        for ann in &exports {
            queue
                .entry(ann.prefix.clone())
                .or_default()
                .push(ann.clone());
        }
    }
}
