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
use crate::graph::{StationIdx, TripIdx};
use crate::input;
use crate::time::Time;

/// Per-section `(departure, arrival)` minutes of a pattern, folded the way
/// light connections store them : both relative to the departure day of the
/// section.
pub(crate) fn folded_section_times(rel_utc_times: &[Time]) -> Vec<(u16, u16)> {
    (0..rel_utc_times.len() / 2)
        .map(|section_idx| {
            let dep = rel_utc_times[section_idx * 2];
            let arr = rel_utc_times[section_idx * 2 + 1];
            let d_time = dep.mam();
            let a_time = d_time + (arr - dep).total_minutes();
            (d_time as u16, a_time as u16)
        })
        .collect()
}

impl GraphBuilder {
    /// Does an equivalent trip from another feed already run these section
    /// times? Feeds covering the same region publish the same physical
    /// trips; only the first copy is kept.
    pub(crate) fn has_duplicate(
        &self,
        route_path: &input::RoutePath,
        folded_times: &[(u16, u16)],
    ) -> bool {
        let stations: Vec<StationIdx> = route_path
            .stations
            .iter()
            .map(|station| self.station_idx(*station))
            .collect();

        let first_station = &self.sched.stations[stations[0].get()];
        for equivalent in &first_station.equivalent {
            if self.sched.stations[equivalent.get()].source_schedule
                == first_station.source_schedule
            {
                // duplicates are only detected across feeds
                continue;
            }

            for route_node in &self.sched.station_nodes[equivalent.get()].route_nodes {
                for edge in &self.sched.route_nodes[route_node.get()].edges {
                    for connection in &edge.conns {
                        for trip in &self.sched.merged_trips[connection.trips.get()] {
                            if self.are_duplicates(&stations, folded_times, *trip) {
                                return true;
                            }
                        }
                    }
                }
            }
        }
        false
    }

    fn are_duplicates(
        &self,
        stations: &[StationIdx],
        folded_times: &[(u16, u16)],
        candidate: TripIdx,
    ) -> bool {
        let trip = &self.sched.trip_mem[candidate.get()];
        let edges_idx = match trip.edges {
            Some(edges_idx) => edges_idx,
            None => return false,
        };
        let edges = &self.sched.trip_edges[edges_idx.get()];
        if stations.len() != edges.len() + 1 {
            return false;
        }

        let lcon_idx = trip.lcon_idx as usize;
        let last_stop = stations.len() - 1;

        let last_edge = self.sched.route_edge(edges[last_stop - 1]);
        let last_station = self.sched.route_nodes[last_edge.to.get()].station;
        if folded_times[last_stop - 1].1 != last_edge.conns[lcon_idx].a_time
            || !self.stations_are_equivalent(stations[last_stop], last_station)
        {
            return false;
        }

        for stop_idx in 1..last_stop {
            let arrival_edge = self.sched.route_edge(edges[stop_idx - 1]);
            let departure_edge = self.sched.route_edge(edges[stop_idx]);
            let station = self.sched.route_nodes[departure_edge.from.get()].station;
            if folded_times[stop_idx - 1].1 != arrival_edge.conns[lcon_idx].a_time
                || folded_times[stop_idx].0 != departure_edge.conns[lcon_idx].d_time
                || !self.stations_are_equivalent(stations[stop_idx], station)
            {
                return false;
            }
        }
        true
    }

    fn stations_are_equivalent(&self, lhs: StationIdx, rhs: StationIdx) -> bool {
        let lhs_station = &self.sched.stations[lhs.get()];
        let rhs_station = &self.sched.stations[rhs.get()];
        lhs_station.source_schedule != rhs_station.source_schedule
            && lhs_station.equivalent.contains(&rhs)
    }
}
