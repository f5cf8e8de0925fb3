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

use super::{
    Attribute, Category, ConnectionInfo, Direction, EdgeRef, FullConnection, PlatformNode,
    PlatformNodeIdx, PrimaryTripId, Provider, RouteEdge, RouteIdx, RouteNode, RouteNodeIdx,
    Station, StationIdx, StationNode, TrackInfo, TripEdgesIdx, TripIdx, TripInfo,
};
use super::{
    AttributeIdx, CategoryIdx, ConInfoIdx, DirectionIdx, FullConIdx, MergedTripsIdx, ProviderIdx,
    StringIdx, TrackIdx,
};
use crate::bitfields::BitfieldStore;
use crate::classes::ServiceClass;
use crate::error::BuildError;
use crate::time::Calendar;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The sealed output of the graph builder. Owns every interned entity; the
/// typed indices handed out during construction resolve here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub names: Vec<String>,
    pub prefixes: Vec<String>,
    /// Start of the internal timeline : the first schedule day at 00:00,
    /// minus the horizon left-padding.
    pub schedule_begin: NaiveDateTime,
    pub schedule_end: NaiveDateTime,
    pub calendar: Calendar,

    pub stations: Vec<Station>,
    pub station_nodes: Vec<StationNode>,
    pub route_nodes: Vec<RouteNode>,
    pub platform_nodes: Vec<PlatformNode>,
    pub route_index_to_first_route_node: Vec<RouteNodeIdx>,
    pub route_count: u32,

    pub strings: Vec<String>,
    pub directions: Vec<Direction>,
    pub providers: Vec<Provider>,
    pub categories: Vec<Category>,
    pub attributes: Vec<Attribute>,
    pub connection_infos: Vec<ConnectionInfo>,
    pub full_connections: Vec<FullConnection>,
    pub tracks: Vec<TrackInfo>,
    pub bitfields: BitfieldStore,
    pub classes: HashMap<String, ServiceClass>,

    pub merged_trips: Vec<Vec<TripIdx>>,
    pub trip_mem: Vec<TripInfo>,
    pub trip_edges: Vec<Vec<EdgeRef>>,
    /// The trip index : `(primary id, trip)`, sorted by primary id once
    /// construction has finished.
    pub trips: Vec<(PrimaryTripId, TripIdx)>,
    /// Concrete trips grouped by route, when trip expansion was requested.
    pub expanded_trips: Vec<Vec<TripIdx>>,
    pub gtfs_trip_ids: HashMap<String, TripIdx>,

    pub hash: u64,
}

impl Schedule {
    pub fn station(&self, idx: StationIdx) -> &Station {
        &self.stations[idx.get()]
    }

    pub fn station_node(&self, idx: StationIdx) -> &StationNode {
        &self.station_nodes[idx.get()]
    }

    pub fn route_node(&self, idx: RouteNodeIdx) -> &RouteNode {
        &self.route_nodes[idx.get()]
    }

    pub fn platform_node(&self, idx: PlatformNodeIdx) -> &PlatformNode {
        &self.platform_nodes[idx.get()]
    }

    pub fn route_edge(&self, edge_ref: EdgeRef) -> &RouteEdge {
        &self.route_nodes[edge_ref.node.get()].edges[edge_ref.edge as usize]
    }

    pub fn first_route_node(&self, route: RouteIdx) -> &RouteNode {
        self.route_node(self.route_index_to_first_route_node[route.get()])
    }

    pub fn string(&self, idx: StringIdx) -> &str {
        &self.strings[idx.get()]
    }

    pub fn direction(&self, idx: DirectionIdx) -> &Direction {
        &self.directions[idx.get()]
    }

    /// Display text of a direction : either the referenced station name or
    /// the interned literal.
    pub fn direction_text(&self, idx: DirectionIdx) -> &str {
        match self.direction(idx) {
            Direction::Station(station) => &self.station(*station).name,
            Direction::Text(text) => self.string(*text),
        }
    }

    pub fn provider(&self, idx: ProviderIdx) -> &Provider {
        &self.providers[idx.get()]
    }

    pub fn category(&self, idx: CategoryIdx) -> &Category {
        &self.categories[idx.get()]
    }

    pub fn attribute(&self, idx: AttributeIdx) -> &Attribute {
        &self.attributes[idx.get()]
    }

    pub fn connection_info(&self, idx: ConInfoIdx) -> &ConnectionInfo {
        &self.connection_infos[idx.get()]
    }

    pub fn full_connection(&self, idx: FullConIdx) -> &FullConnection {
        &self.full_connections[idx.get()]
    }

    pub fn track(&self, idx: TrackIdx) -> &TrackInfo {
        &self.tracks[idx.get()]
    }

    pub fn merged_trips_of(&self, idx: MergedTripsIdx) -> &[TripIdx] {
        &self.merged_trips[idx.get()]
    }

    pub fn trip(&self, idx: TripIdx) -> &TripInfo {
        &self.trip_mem[idx.get()]
    }

    pub fn trip_edges_of(&self, idx: TripEdgesIdx) -> &[EdgeRef] {
        &self.trip_edges[idx.get()]
    }

    pub fn nb_of_trips(&self) -> usize {
        self.trip_mem.len()
    }

    /// Look up a trip by its primary id. The trip index is sorted, so this
    /// is a binary search; with several trips under the same primary, any
    /// of them is returned.
    pub fn find_trip(&self, primary: &PrimaryTripId) -> Option<TripIdx> {
        self.trips
            .binary_search_by(|(candidate, _)| candidate.cmp(primary))
            .ok()
            .map(|pos| self.trips[pos].1)
    }

    /// Every registered trip must have been attached to the edges of a
    /// sealed route.
    pub fn validate(&self) -> Result<(), BuildError> {
        let nb_of_detached_trips = self
            .trip_mem
            .iter()
            .filter(|trip| trip.edges.is_none())
            .count();
        if nb_of_detached_trips > 0 {
            return Err(BuildError::MissingTripEdges {
                nb_of_trips: nb_of_detached_trips,
            });
        }
        Ok(())
    }
}
