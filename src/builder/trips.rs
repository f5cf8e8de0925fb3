// Copyright  (C) 2021, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
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

use super::section::day_offsets;
use super::GraphBuilder;
use crate::graph::{
    EdgeRef, FullTripId, MergedTripsIdx, PrimaryTripId, SecondaryTripId, TripDebug, TripEdgesIdx,
    TripIdx, TripInfo,
};
use crate::input;
use crate::time::{Time, MINUTES_A_DAY};
use log::warn;

impl GraphBuilder {
    /// Register one service instance and wrap it into a fresh merged-trips
    /// entry (rule-based merges append further trips to such entries).
    pub(crate) fn create_merged_trips(
        &mut self,
        service: &input::Service,
        route_path: &input::RoutePath,
        rel_utc_times: &[Time],
    ) -> MergedTripsIdx {
        let trip = self.register_service(service, route_path, rel_utc_times);
        self.sched.merged_trips.push(vec![trip]);
        MergedTripsIdx::new(self.sched.merged_trips.len() - 1)
    }

    /// Create the `trip_info` of a service instance and insert its primary
    /// ids into the trip index : the nominal one, one alias per mid-trip
    /// train-number change, and one for a diverging announced number.
    fn register_service(
        &mut self,
        service: &input::Service,
        route_path: &input::RoutePath,
        rel_utc_times: &[Time],
    ) -> TripIdx {
        let id = self.full_trip_id(service, route_path, rel_utc_times, 0);
        let debug = self.trip_debug(service);

        let trip_idx = TripIdx::new(self.sched.trip_mem.len());
        let primary = id.primary;
        self.sched.trip_mem.push(TripInfo {
            id,
            edges: None,
            lcon_idx: 0,
            day_offsets: day_offsets(rel_utc_times),
            debug,
        });
        self.sched.trips.push((primary, trip_idx));

        if let Some(trip_id) = &service.trip_id {
            if self.sched.gtfs_trip_ids.contains_key(trip_id) {
                warn!("duplicate trip id {}", trip_id);
            } else {
                self.sched
                    .gtfs_trip_ids
                    .insert(trip_id.clone(), trip_idx);
            }
        }

        for section_idx in 1..service.sections.len() {
            let current = &service.sections[section_idx];
            let previous = &service.sections[section_idx - 1];
            if current.train_nr != previous.train_nr {
                let alias = self
                    .full_trip_id(service, route_path, rel_utc_times, section_idx)
                    .primary;
                self.sched.trips.push((alias, trip_idx));
            }
        }

        if service.initial_train_nr != primary.train_nr {
            let mut alias = primary;
            alias.train_nr = service.initial_train_nr;
            self.sched.trips.push((alias, trip_idx));
        }

        trip_idx
    }

    fn full_trip_id(
        &self,
        service: &input::Service,
        route_path: &input::RoutePath,
        rel_utc_times: &[Time],
        section_idx: usize,
    ) -> FullTripId {
        let first_station = self.station_idx(route_path.stations[section_idx]);
        let last_station =
            self.station_idx(route_path.stations[route_path.stations.len() - 1]);
        let train_nr = service.sections[section_idx].train_nr;
        let line_id = service.sections[0].line_id.clone();

        FullTripId {
            primary: PrimaryTripId {
                station: first_station,
                train_nr,
                first_departure_mam: rel_utc_times[section_idx * 2].mam() as u16,
            },
            secondary: SecondaryTripId {
                target_station: last_station,
                last_arrival_mam: rel_utc_times[rel_utc_times.len() - 1].mam() as u16,
                line_id,
            },
        }
    }

    fn trip_debug(&mut self, service: &input::Service) -> TripDebug {
        match &service.debug {
            None => TripDebug {
                seq_numbers: service.seq_numbers.clone(),
                ..TripDebug::default()
            },
            Some(debug) => TripDebug {
                file: Some(self.get_or_create_string(&debug.file)),
                line_from: debug.line_from,
                line_to: debug.line_to,
                seq_numbers: service.seq_numbers.clone(),
            },
        }
    }

    /// Attach the freshly sealed route to its trips : every connection `k`
    /// of the route's first edge belongs to the trip registered for
    /// pattern `k`.
    pub(crate) fn write_trip_edges(&mut self, sections: &[EdgeRef]) {
        let edges_idx = TripEdgesIdx::new(self.sched.trip_edges.len());
        self.sched.trip_edges.push(sections.to_vec());

        let first = sections[0];
        let nb_of_conns =
            self.sched.route_nodes[first.node.get()].edges[first.edge as usize].conns.len();
        for lcon_idx in 0..nb_of_conns {
            let trips = self.sched.route_nodes[first.node.get()].edges[first.edge as usize].conns
                [lcon_idx]
                .trips;
            let trip = self.sched.merged_trips[trips.get()][0];
            let trip_info = &mut self.sched.trip_mem[trip.get()];
            trip_info.edges = Some(edges_idx);
            trip_info.lcon_idx = lcon_idx as u32;
        }
    }

    /// Register the route's consistent trips in the expanded index; broken
    /// ones are counted and left out.
    pub(crate) fn add_expanded_trips(&mut self, sections: &[EdgeRef]) {
        let first = sections[0];
        let conns: Vec<MergedTripsIdx> = self.sched.route_nodes[first.node.get()].edges
            [first.edge as usize]
            .conns
            .iter()
            .map(|connection| connection.trips)
            .collect();

        let mut expanded = Vec::new();
        for trips in conns {
            let trip = self.sched.merged_trips[trips.get()][0];
            if self.check_trip(trip) {
                expanded.push(trip);
            } else {
                self.broken_trips += 1;
            }
        }
        if !expanded.is_empty() {
            self.sched.expanded_trips.push(expanded);
        }
    }

    /// A trip is consistent when every section departs before it arrives
    /// and no section departs before the previous one arrived.
    fn check_trip(&self, trip: TripIdx) -> bool {
        let trip_info = &self.sched.trip_mem[trip.get()];
        let edges_idx = match trip_info.edges {
            Some(edges_idx) => edges_idx,
            None => return false,
        };

        let mut last_time = 0i32;
        for (section_idx, edge_ref) in self.sched.trip_edges[edges_idx.get()].iter().enumerate() {
            let connection = &self.sched.route_nodes[edge_ref.node.get()].edges
                [edge_ref.edge as usize]
                .conns[trip_info.lcon_idx as usize];
            // events are day-relative; the day offsets make them comparable
            // across sections
            let base = trip_info.day_offsets[section_idx] * MINUTES_A_DAY;
            let departure = base + i32::from(connection.d_time);
            let arrival = base + i32::from(connection.a_time);
            if departure > arrival || last_time > departure {
                return false;
            }
            last_time = arrival;
        }
        true
    }
}
