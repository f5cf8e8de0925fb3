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

use super::{LightConnection, PlatformNodeIdx, RouteIdx, RouteNodeIdx, StationIdx};
use crate::time::Timezone;
use serde::{Deserialize, Serialize};

/// A physical stop, with everything the builder needs to place services
/// through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Identifier, prefixed with the feed prefix when several feeds are
    /// loaded.
    pub id: String,
    pub name: String,
    pub index: StationIdx,
    /// The feed this station came from.
    pub source_schedule: usize,
    pub lat: f64,
    pub lng: f64,
    /// Minutes needed to change vehicles within the station.
    pub transfer_time: i32,
    /// Minutes needed to leave or reach a platform.
    pub platform_transfer_time: i32,
    pub timez: Timezone,
    /// Stations at the same physical location, published by other feeds.
    pub equivalent: Vec<StationIdx>,
    /// Track name to platform number, when platform data was loaded.
    pub track_to_platform: Vec<(String, u16)>,
    /// Classified as local transport (used by the local-transport filter).
    pub local: bool,
}

impl Station {
    pub fn platform_of_track(&self, track_name: &str) -> Option<u16> {
        self.track_to_platform
            .iter()
            .find(|(name, _)| name == track_name)
            .map(|(_, platform)| *platform)
    }
}

/// The graph vertex anchoring a station : it owns the route nodes of the
/// routes calling here, the platform nodes, and the outgoing foot edges
/// (filled by the footpath builder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StationNode {
    pub route_nodes: Vec<RouteNodeIdx>,
    pub platform_nodes: Vec<(u16, PlatformNodeIdx)>,
    pub foot_edges: Vec<FootEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootEdge {
    pub to: StationIdx,
    pub duration: i32,
}

/// The presence of one route at one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    pub route: RouteIdx,
    pub station: StationIdx,
    pub in_allowed: bool,
    pub out_allowed: bool,
    /// Outgoing route edges. A plain (non rule-merged) route has exactly
    /// one, except at its last stop.
    pub edges: Vec<RouteEdge>,
    /// Route edges arriving here, filled by the reverse-adjacency pass.
    pub incoming: Vec<EdgeRef>,
    /// Platform-exit edges, weighted in minutes.
    pub exit_edges: Vec<(PlatformNodeIdx, i32)>,
    /// Platform nodes with an enter edge to this node, filled by the
    /// reverse-adjacency pass.
    pub incoming_enter_edges: Vec<PlatformNodeIdx>,
}

/// A directed edge between two route nodes of the same route at adjacent
/// stops.
///
/// `conns` is sorted by `(d_time, a_time)`. Connection `k` of this edge and
/// connection `k` of the next edge of the route belong to the same service
/// instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEdge {
    pub from: RouteNodeIdx,
    pub to: RouteNodeIdx,
    pub conns: Vec<LightConnection>,
}

/// Address of a route edge : the `edge`-th outgoing edge of `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    pub node: RouteNodeIdx,
    pub edge: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformNode {
    pub station: StationIdx,
    pub platform: u16,
    /// Platform-enter edges towards route nodes, weighted in minutes.
    pub enter_edges: Vec<(RouteNodeIdx, i32)>,
    /// Route nodes with an exit edge to this platform, filled by the
    /// reverse-adjacency pass.
    pub incoming_exit_edges: Vec<RouteNodeIdx>,
}
