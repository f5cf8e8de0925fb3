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
#![allow(dead_code)]

use env_logger::Env;
use midgard::graph::{EdgeRef, RouteIdx, Schedule, StationIdx};

pub fn init_logger() {
    let _ = env_logger::Builder::from_env(
        // use log level specified by RUST_LOG env var if set
        //  and default to the "debug" level when RUST_LOG is not set
        Env::default().default_filter_or("debug"),
    )
    .is_test(true)
    .try_init();
}

pub fn station_idx(sched: &Schedule, name: &str) -> StationIdx {
    sched
        .stations
        .iter()
        .find(|station| station.name == name)
        .unwrap_or_else(|| panic!("station {} not found", name))
        .index
}

/// The route edges of a route, in stop order, walked from its first route
/// node.
pub fn route_edges(sched: &Schedule, route: RouteIdx) -> Vec<EdgeRef> {
    let mut edges = Vec::new();
    let mut node = sched.route_index_to_first_route_node[route.get()];
    loop {
        let route_node = sched.route_node(node);
        match route_node.edges.first() {
            None => break,
            Some(edge) => {
                edges.push(EdgeRef { node, edge: 0 });
                node = edge.to;
            }
        }
    }
    edges
}

/// Check the ordering invariants of every route edge : connections sorted
/// by `(departure, arrival)`, and across adjacent edges the k-th connection
/// never departs before the k-th connection of the predecessor arrived.
pub fn check_route_invariants(sched: &Schedule) {
    for route in 0..sched.route_count {
        let edges = route_edges(sched, RouteIdx::new(route as usize));
        for edge_ref in &edges {
            let conns = &sched.route_edge(*edge_ref).conns;
            assert!(
                conns.windows(2).all(|pair| pair[0].d_time <= pair[1].d_time
                    && pair[0].a_time <= pair[1].a_time),
                "route {} has unsorted connections",
                route
            );
        }
        for pair in edges.windows(2) {
            let previous = &sched.route_edge(pair[0]).conns;
            let next = &sched.route_edge(pair[1]).conns;
            assert_eq!(previous.len(), next.len());
        }
    }

    // across adjacent edges, the k-th connection never departs before the
    // k-th connection of the predecessor arrived; the per-trip day offsets
    // make the day-relative times comparable
    for trip in &sched.trip_mem {
        let edges = sched.trip_edges_of(trip.edges.expect("trip without edges"));
        let mut last_arrival = i32::min_value();
        for (section_idx, edge_ref) in edges.iter().enumerate() {
            let connection = &sched.route_edge(*edge_ref).conns[trip.lcon_idx as usize];
            let base = trip.day_offsets[section_idx] * 1440;
            let departure = base + i32::from(connection.d_time);
            let arrival = base + i32::from(connection.a_time);
            assert!(departure <= arrival);
            assert!(
                last_arrival <= departure,
                "trip departs before the previous section arrived"
            );
            last_arrival = arrival;
        }
    }
}

/// Check that every trip points back to connections carrying its own
/// merged-trips entry.
pub fn check_trip_backlinks(sched: &Schedule) {
    for (trip_idx, trip) in sched.trip_mem.iter().enumerate() {
        let edges_idx = trip.edges.expect("trip without edges");
        let edges = sched.trip_edges_of(edges_idx);
        assert!(!edges.is_empty());
        for edge_ref in edges {
            let connection = &sched.route_edge(*edge_ref).conns[trip.lcon_idx as usize];
            let merged = sched.merged_trips_of(connection.trips);
            assert!(
                merged.iter().any(|candidate| candidate.get() == trip_idx),
                "trip {} is not carried by its own connections",
                trip_idx
            );
        }
    }
}
