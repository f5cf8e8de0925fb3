// Copyright  (C) 2022, Hove and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Hove (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

use super::GraphBuilder;
use crate::graph::{BitfieldIdx, EdgeRef, PlatformNodeIdx, RouteNodeIdx};
use crate::input;

impl GraphBuilder {
    /// Fill the reverse adjacency lists : every forward edge is recorded on
    /// its target node.
    pub(crate) fn connect_reverse(&mut self) {
        let mut incoming: Vec<(RouteNodeIdx, EdgeRef)> = Vec::new();
        for (node_idx, route_node) in self.sched.route_nodes.iter().enumerate() {
            for (edge_idx, edge) in route_node.edges.iter().enumerate() {
                incoming.push((
                    edge.to,
                    EdgeRef {
                        node: RouteNodeIdx::new(node_idx),
                        edge: edge_idx as u32,
                    },
                ));
            }
        }
        for (to, edge_ref) in incoming {
            self.sched.route_nodes[to.get()].incoming.push(edge_ref);
        }

        let mut enter: Vec<(RouteNodeIdx, PlatformNodeIdx)> = Vec::new();
        for (platform_idx, platform_node) in self.sched.platform_nodes.iter().enumerate() {
            for (route_node, _) in &platform_node.enter_edges {
                enter.push((*route_node, PlatformNodeIdx::new(platform_idx)));
            }
        }
        for (route_node, platform_node) in enter {
            self.sched.route_nodes[route_node.get()]
                .incoming_enter_edges
                .push(platform_node);
        }

        let mut exit: Vec<(PlatformNodeIdx, RouteNodeIdx)> = Vec::new();
        for (node_idx, route_node) in self.sched.route_nodes.iter().enumerate() {
            for (platform_node, _) in &route_node.exit_edges {
                exit.push((*platform_node, RouteNodeIdx::new(node_idx)));
            }
        }
        for (platform_node, route_node) in exit {
            self.sched.platform_nodes[platform_node.get()]
                .incoming_exit_edges
                .push(route_node);
        }
    }

    /// Deduplicate the bitfield store and rewrite every reachable bitfield
    /// index to its canonical copy : route edge connections, track table
    /// entries, and connection-info attributes.
    pub(crate) fn dedup_bitfields(&mut self) {
        if self.sched.bitfields.is_empty() {
            return;
        }
        let map = self.sched.bitfields.dedup();

        for route_node in &mut self.sched.route_nodes {
            for edge in &mut route_node.edges {
                for connection in &mut edge.conns {
                    connection.traffic_days =
                        BitfieldIdx::new(map[connection.traffic_days.get()] as usize);
                }
            }
        }

        for track in &mut self.sched.tracks {
            for (traffic_days, _) in &mut track.entries {
                *traffic_days = BitfieldIdx::new(map[traffic_days.get()] as usize);
            }
        }

        for con_info in &mut self.sched.connection_infos {
            for attribute in &mut con_info.attributes {
                attribute.traffic_days =
                    BitfieldIdx::new(map[attribute.traffic_days.get()] as usize);
            }
        }
    }

    pub(crate) fn sort_trips(&mut self) {
        self.sched.trips.sort_unstable_by_key(|(primary, _)| *primary);
    }

    /// Fold the feed content hashes and the dataset prefixes into a stable
    /// hash of the whole input.
    pub(crate) fn compute_hash(&mut self, schedules: &[input::Schedule]) {
        let mut hash = FNV_OFFSET_BASIS;
        for schedule in schedules {
            hash = hash_combine(hash, schedule.content_hash);
        }
        for prefix in &self.sched.prefixes {
            hash = hash_combine(hash, fnv1a(prefix.as_bytes()));
        }
        self.sched.hash = hash;
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn hash_combine(seed: u64, value: u64) -> u64 {
    let mut hash = seed;
    for byte in &value.to_le_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
