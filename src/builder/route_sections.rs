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

use super::route_packing::RouteT;
use super::GraphBuilder;
use crate::graph::{
    EdgeRef, LightConnection, PlatformNode, PlatformNodeIdx, RouteEdge, RouteIdx, RouteNode,
    RouteNodeIdx, StationIdx, TrackIdx,
};
use crate::input;

impl GraphBuilder {
    /// Materialize one packed alternate route : route nodes chained along
    /// the stop sequence, one route edge per section carrying the packed
    /// connections, and platform enter/exit edges where tracks resolve to
    /// platforms.
    pub(crate) fn create_route(
        &mut self,
        route_path: &input::RoutePath,
        route: &RouteT,
        route_index: RouteIdx,
    ) -> Vec<EdgeRef> {
        debug_assert!(route.nb_of_sections() == route_path.stations.len() - 1);

        let stations: Vec<StationIdx> = route_path
            .stations
            .iter()
            .map(|station| self.station_idx(*station))
            .collect();

        let mut sections = Vec::with_capacity(stations.len() - 1);
        let mut prev_to_route_node: Option<RouteNodeIdx> = None;
        for section_idx in 0..stations.len() - 1 {
            let from = section_idx;
            let to = section_idx + 1;

            // the i-th connection of every pattern string
            let section_lcons: Vec<LightConnection> = route
                .lcon_strings
                .iter()
                .map(|lcon_string| lcon_string[section_idx])
                .collect();

            let section = self.add_route_section(
                route_index,
                section_lcons,
                stations[from],
                route_path.in_allowed[from],
                route_path.out_allowed[from],
                stations[to],
                route_path.in_allowed[to],
                route_path.out_allowed[to],
                prev_to_route_node,
            );
            prev_to_route_node = Some(self.sched.route_edge(section).to);
            sections.push(section);
        }
        sections
    }

    #[allow(clippy::too_many_arguments)]
    fn add_route_section(
        &mut self,
        route_index: RouteIdx,
        conns: Vec<LightConnection>,
        from_station: StationIdx,
        from_in_allowed: bool,
        from_out_allowed: bool,
        to_station: StationIdx,
        to_in_allowed: bool,
        to_out_allowed: bool,
        from_route_node: Option<RouteNodeIdx>,
    ) -> EdgeRef {
        debug_assert!(conns.windows(2).all(|pair| {
            pair[0].d_time <= pair[1].d_time && pair[0].a_time <= pair[1].a_time
        }));

        let from_route_node = from_route_node.unwrap_or_else(|| {
            self.build_route_node(route_index, from_station, from_in_allowed, from_out_allowed)
        });
        let d_track = self.sched.full_connections[conns[0].full_con.get()].d_track;
        if from_in_allowed {
            if let Some(platform) = self.platform_of_track(from_station, d_track) {
                self.add_platform_enter_edge(from_route_node, from_station, platform);
            }
        }

        let to_route_node =
            self.build_route_node(route_index, to_station, to_in_allowed, to_out_allowed);
        let a_track = self.sched.full_connections[conns[0].full_con.get()].a_track;
        if to_out_allowed {
            if let Some(platform) = self.platform_of_track(to_station, a_track) {
                self.add_platform_exit_edge(to_route_node, to_station, platform);
            }
        }

        let edge = EdgeRef {
            node: from_route_node,
            edge: self.sched.route_nodes[from_route_node.get()].edges.len() as u32,
        };
        self.sched.route_nodes[from_route_node.get()]
            .edges
            .push(RouteEdge {
                from: from_route_node,
                to: to_route_node,
                conns,
            });
        edge
    }

    fn build_route_node(
        &mut self,
        route_index: RouteIdx,
        station: StationIdx,
        in_allowed: bool,
        out_allowed: bool,
    ) -> RouteNodeIdx {
        let idx = RouteNodeIdx::new(self.sched.route_nodes.len());
        self.sched.route_nodes.push(RouteNode {
            route: route_index,
            station,
            in_allowed,
            out_allowed,
            edges: Vec::new(),
            incoming: Vec::new(),
            exit_edges: Vec::new(),
            incoming_enter_edges: Vec::new(),
        });
        self.sched.station_nodes[station.get()].route_nodes.push(idx);
        idx
    }

    /// Resolve the track table of a connection to a platform of the
    /// station : the first entry whose track name the station knows wins.
    fn platform_of_track(&self, station: StationIdx, track: TrackIdx) -> Option<u16> {
        if track.get() == 0 {
            return None;
        }
        let station = &self.sched.stations[station.get()];
        self.sched.tracks[track.get()]
            .entries
            .iter()
            .find_map(|(_, name)| station.platform_of_track(&self.sched.strings[name.get()]))
    }

    fn add_platform_enter_edge(
        &mut self,
        route_node: RouteNodeIdx,
        station: StationIdx,
        platform: u16,
    ) {
        let duration = self.sched.stations[station.get()].platform_transfer_time;
        let platform_node = self.get_or_create_platform_node(station, platform);
        self.sched.platform_nodes[platform_node.get()]
            .enter_edges
            .push((route_node, duration));
    }

    fn add_platform_exit_edge(
        &mut self,
        route_node: RouteNodeIdx,
        station: StationIdx,
        platform: u16,
    ) {
        let duration = self.sched.stations[station.get()].platform_transfer_time;
        let platform_node = self.get_or_create_platform_node(station, platform);
        self.sched.route_nodes[route_node.get()]
            .exit_edges
            .push((platform_node, duration));
    }

    fn get_or_create_platform_node(
        &mut self,
        station: StationIdx,
        platform: u16,
    ) -> PlatformNodeIdx {
        let existing = self.sched.station_nodes[station.get()]
            .platform_nodes
            .iter()
            .find(|(candidate, _)| *candidate == platform)
            .map(|(_, idx)| *idx);
        if let Some(idx) = existing {
            return idx;
        }
        let idx = PlatformNodeIdx::new(self.sched.platform_nodes.len());
        self.sched.platform_nodes.push(PlatformNode {
            station,
            platform,
            enter_edges: Vec::new(),
            incoming_exit_edges: Vec::new(),
        });
        self.sched.station_nodes[station.get()]
            .platform_nodes
            .push((platform, idx));
        idx
    }

    pub(crate) fn index_first_route_node(&mut self, route_index: RouteIdx, node: RouteNodeIdx) {
        if self.sched.route_index_to_first_route_node.len() <= route_index.get() {
            self.sched
                .route_index_to_first_route_node
                .resize(route_index.get() + 1, node);
        }
        self.sched.route_index_to_first_route_node[route_index.get()] = node;
    }
}
