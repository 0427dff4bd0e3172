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

//! # The AS-level topology
//!
//! The [`AsGraph`] owns every AS in a contiguous arena and expresses all
//! adjacency through small integer node indices ([`NodeId`]). The
//! customer-provider hierarchy is stored as directed edges from customer to
//! provider, which makes cycle detection and rank assignment a topological
//! sort over the arena. Peering links carry no rank information and live as
//! index sets on the nodes themselves.

use crate::{
    announcement::Announcement,
    policy::{PolicyKind, PolicyVerdict},
    types::{Asn, IndexType, NodeId, Prefix, SimError},
};

use itertools::Itertools;
use log::{debug, trace, warn};
use petgraph::{algo::toposort, prelude::*};

use std::collections::{hash_map::Entry, BTreeSet, HashMap};

/// Relationship code of a serial-2 record stating that `as1` is a provider
/// of `as2`.
pub const REL_PROVIDER: i8 = -1;
/// Relationship code of a serial-2 record stating that `as1` and `as2` are
/// peers.
pub const REL_PEER: i8 = 0;

/// A single autonomous system.
///
/// Provider and customer adjacency is stored on the graph (see [`AsGraph`]);
/// the node itself only keeps its peering links. The receive queue and the
/// local RIB are mutated exclusively by the propagation engine, policy and
/// adjacency only during graph construction.
#[derive(Debug, Clone)]
pub struct AsNode {
    asn: Asn,
    pub(crate) peers: BTreeSet<NodeId>,
    pub(crate) policy: PolicyKind,
    pub(crate) rank: usize,
    pub(crate) received_queue: HashMap<Prefix, Vec<Announcement>>,
    pub(crate) local_rib: HashMap<Prefix, Announcement>,
}

impl AsNode {
    fn new(asn: Asn) -> Self {
        Self {
            asn,
            peers: BTreeSet::new(),
            policy: PolicyKind::default(),
            rank: 0,
            received_queue: HashMap::new(),
            local_rib: HashMap::new(),
        }
    }

    /// The AS number of this node.
    pub fn asn(&self) -> Asn {
        self.asn
    }

    /// The ingress policy of this AS.
    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    /// The propagation rank: 0 for an AS without customers, and one above
    /// the highest-ranked customer otherwise. Only meaningful after
    /// [`AsGraph::assign_ranks`] has run.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The local RIB: the best installed route per prefix.
    pub fn rib(&self) -> &HashMap<Prefix, Announcement> {
        &self.local_rib
    }

    /// The installed route for a single prefix.
    pub fn rib_entry(&self, prefix: &Prefix) -> Option<&Announcement> {
        self.local_rib.get(prefix)
    }
}

/// The AS-level topology and the owner of every [`AsNode`].
///
/// Nodes materialise lazily on first mention in a relationship record, a
/// seeded announcement, or a policy assignment. The graph lives for the whole
/// simulation; every index handed out stays valid for its lifetime.
#[derive(Debug, Clone, Default)]
pub struct AsGraph {
    /// Node arena with the customer→provider hierarchy as edges.
    pub(crate) hierarchy: DiGraph<AsNode, (), IndexType>,
    /// Lookup table from AS number to arena index.
    lookup: HashMap<Asn, NodeId>,
}

impl AsGraph {
    /// Generate an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ASes in the graph.
    pub fn node_count(&self) -> usize {
        self.hierarchy.node_count()
    }

    /// Look up an AS by its number.
    pub fn node(&self, asn: Asn) -> Option<&AsNode> {
        self.lookup.get(&asn).map(|id| &self.hierarchy[*id])
    }

    /// Look up the arena index of an AS.
    pub fn node_id(&self, asn: Asn) -> Option<NodeId> {
        self.lookup.get(&asn).copied()
    }

    /// Access an AS by its arena index.
    pub fn node_at(&self, id: NodeId) -> &AsNode {
        &self.hierarchy[id]
    }

    /// Iterate over all ASes in the graph, in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = &AsNode> {
        self.hierarchy.node_weights()
    }

    /// The providers of `id`: the ASes that `id` pays for transit.
    pub fn providers(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.hierarchy.neighbors_directed(id, Outgoing)
    }

    /// The customers of `id`: the ASes that pay `id` for transit.
    pub fn customers(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.hierarchy.neighbors_directed(id, Incoming)
    }

    /// The peers of `id`.
    pub fn peers(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.hierarchy[id].peers.iter().copied()
    }

    /// Retrieve the index of an AS, materialising the node if necessary.
    pub(crate) fn get_or_insert(&mut self, asn: Asn) -> NodeId {
        if let Some(&id) = self.lookup.get(&asn) {
            return id;
        }
        let id = self.hierarchy.add_node(AsNode::new(asn));
        self.lookup.insert(asn, id);
        id
    }

    /// Insert one relationship record.
    ///
    /// `rel_code` follows the serial-2 encoding: [`REL_PROVIDER`] (-1) makes
    /// `as1` a provider of `as2`, [`REL_PEER`] (0) makes the two ASes peers.
    /// Any other code is ignored. Duplicate records collapse into a single
    /// link; a record that contradicts the class of an existing link is
    /// skipped with a warning.
    pub fn add_relationship(&mut self, as1: Asn, as2: Asn, rel_code: i8) {
        if as1 == as2 {
            warn!("skipping self-relationship record for {as1}");
            return;
        }
        let u = self.get_or_insert(as1);
        let v = self.get_or_insert(as2);
        match rel_code {
            REL_PROVIDER => {
                if self.hierarchy[u].peers.contains(&v) {
                    warn!("skipping provider record {as1}|{as2}: ASes already peer");
                    return;
                }
                self.hierarchy.update_edge(v, u, ());
            }
            REL_PEER => {
                if self.hierarchy.contains_edge(u, v) || self.hierarchy.contains_edge(v, u) {
                    warn!(
                        "skipping peer record {as1}|{as2}: ASes already in a transit relationship"
                    );
                    return;
                }
                self.hierarchy[u].peers.insert(v);
                self.hierarchy[v].peers.insert(u);
            }
            other => debug!("ignoring relationship record {as1}|{as2} with code {other}"),
        }
    }

    /// Set the ingress policy of an AS, materialising the node if it was
    /// never mentioned before.
    pub fn set_policy(&mut self, asn: Asn, policy: PolicyKind) {
        let id = self.get_or_insert(asn);
        self.hierarchy[id].policy = policy;
    }

    /// Seed an origin announcement at `asn`, materialising the node if
    /// necessary.
    ///
    /// The announcement must carry a non-empty AS path ending in `asn`
    /// itself; anything else is rejected before it can corrupt the
    /// simulation. Seeds pass through the ingress policy of the seeding AS
    /// (an ROV adopter will not originate a route it would filter) and
    /// through best path selection, so two seeds for the same prefix keep
    /// the better one.
    pub fn seed(&mut self, asn: Asn, ann: Announcement) -> Result<(), SimError> {
        if ann.as_path.is_empty() {
            return Err(SimError::InvalidSeed {
                asn,
                reason: "empty AS path",
            });
        }
        if ann.origin_asn() != Some(asn) {
            return Err(SimError::InvalidSeed {
                asn,
                reason: "AS path does not end in the seeding AS",
            });
        }
        let id = self.get_or_insert(asn);
        let node = &mut self.hierarchy[id];
        if node.policy.on_receive(&ann) == PolicyVerdict::Drop {
            trace!("{asn} drops seed for {} by policy", ann.prefix);
            return Ok(());
        }
        match node.local_rib.entry(ann.prefix.clone()) {
            Entry::Vacant(e) => {
                e.insert(ann);
            }
            Entry::Occupied(mut e) => {
                if ann.better_than(e.get()) {
                    e.insert(ann);
                }
            }
        }
        Ok(())
    }

    /// Check the provider hierarchy for cycles and assign propagation ranks.
    ///
    /// Fails with [`SimError::ProviderCycle`] if the customer-provider
    /// relation is not a DAG. On success, every AS without customers sits at
    /// rank 0 and every other AS one above its highest-ranked customer; the
    /// returned layers group the arena indices by rank, so that `layers[r]`
    /// holds exactly the ASes of rank `r`.
    pub fn assign_ranks(&mut self) -> Result<Vec<Vec<NodeId>>, SimError> {
        let order = toposort(&self.hierarchy, None)
            .map_err(|cycle| SimError::ProviderCycle(self.hierarchy[cycle.node_id()].asn))?;

        for &id in &order {
            self.hierarchy[id].rank = 0;
        }
        // The topological order lists every customer before its providers, so
        // a single forward sweep computes the longest upward path.
        let mut max_rank = 0;
        for &id in &order {
            let rank = self.hierarchy[id].rank;
            let providers: Vec<NodeId> = self.providers(id).collect();
            for provider in providers {
                let r = &mut self.hierarchy[provider].rank;
                *r = (*r).max(rank + 1);
                max_rank = max_rank.max(*r);
            }
        }

        let mut layers = vec![Vec::new(); max_rank + 1];
        for id in self.hierarchy.node_indices() {
            layers[self.hierarchy[id].rank].push(id);
        }
        debug!(
            "assigned ranks to {} ASes across {} layers",
            self.node_count(),
            layers.len()
        );
        Ok(layers)
    }

    /// Iterate over every installed RIB entry in the graph, sorted by
    /// `(asn, prefix)` so that repeated runs produce identical output.
    pub fn ribs(&self) -> impl Iterator<Item = (Asn, &Announcement)> {
        self.hierarchy
            .node_weights()
            .sorted_by_key(|node| node.asn)
            .flat_map(|node| {
                node.local_rib
                    .values()
                    .sorted_by(|a, b| a.prefix.cmp(&b.prefix))
                    .map(move |ann| (node.asn, ann))
            })
    }
}
