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

mod utils;

use failure::Error;
use midgard::graph::RouteIdx;
use midgard::modelbuilder::{platform, ScheduleBuilder};
use midgard::{build_graph, LoaderOptions, SCHEDULE_OFFSET_DAYS};

#[test]
fn single_service_three_stops() -> Result<(), Error> {
    utils::init_logger();

    let schedule = ScheduleBuilder::new("simple", "2020-01-01", "2020-01-07")
        .service(|service| {
            service
                .st("A", 600, 600)
                .st("B", 660, 720)
                .st("C", 780, 780)
                .train_nr(77)
                .days("1");
        })
        .build();

    let options = LoaderOptions {
        num_days: 7,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    assert_eq!(sched.route_count, 1);
    let edges = utils::route_edges(&sched, RouteIdx::new(0));
    assert_eq!(edges.len(), 2);

    let first_node = sched.first_route_node(RouteIdx::new(0));
    assert_eq!(first_node.station, utils::station_idx(&sched, "A"));

    let first = &sched.route_edge(edges[0]).conns;
    let second = &sched.route_edge(edges[1]).conns;
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!((first[0].d_time, first[0].a_time), (600, 660));
    assert_eq!((second[0].d_time, second[0].a_time), (720, 780));

    // traffic day 0 of the feed is day SCHEDULE_OFFSET_DAYS of the padded
    // horizon
    let traffic_days = sched.bitfields.get(first[0].traffic_days);
    assert!(traffic_days.test(SCHEDULE_OFFSET_DAYS as usize));
    assert_eq!(traffic_days.count(), 1);

    assert_eq!(sched.nb_of_trips(), 1);
    let (primary, trip_idx) = sched.trips[0];
    assert_eq!(primary.station, utils::station_idx(&sched, "A"));
    assert_eq!(primary.train_nr, 77);
    assert_eq!(primary.first_departure_mam, 600);
    let trip = sched.trip(trip_idx);
    assert_eq!(trip.id.secondary.target_station, utils::station_idx(&sched, "C"));
    assert_eq!(trip.id.secondary.last_arrival_mam, 780);
    assert_eq!(trip.day_offsets, vec![0, 0]);

    utils::check_route_invariants(&sched);
    utils::check_trip_backlinks(&sched);
    Ok(())
}

#[test]
fn platform_edges_are_attached() -> Result<(), Error> {
    utils::init_logger();

    let schedule = ScheduleBuilder::new("platforms", "2020-01-01", "2020-01-07")
        .station("A", |station| {
            station.platforms = vec![platform("1", &["1a", "1b"])];
        })
        .station("B", |station| {
            station.platforms = vec![platform("4", &["4"])];
        })
        .service(|service| {
            service
                .st("A", 600, 600)
                .st("B", 660, 660)
                .dep_track(0, "1a", "1")
                .arr_track(1, "4", "1")
                .days("1");
        })
        .build();

    let options = LoaderOptions {
        num_days: 7,
        use_platforms: true,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    assert_eq!(sched.platform_nodes.len(), 2);

    // enter edge : platform of A towards the route node boarding there
    let station_a = utils::station_idx(&sched, "A");
    let node_a = sched.station_node(station_a);
    assert_eq!(node_a.platform_nodes.len(), 1);
    let platform_a = sched.platform_node(node_a.platform_nodes[0].1);
    assert_eq!(platform_a.enter_edges.len(), 1);
    let (route_node, duration) = platform_a.enter_edges[0];
    assert_eq!(sched.route_node(route_node).station, station_a);
    assert_eq!(duration, sched.station(station_a).platform_transfer_time);

    // exit edge : route node of B towards its platform
    let station_b = utils::station_idx(&sched, "B");
    let node_b = sched.station_node(station_b);
    assert_eq!(node_b.platform_nodes.len(), 1);
    let edges = utils::route_edges(&sched, RouteIdx::new(0));
    let last_route_node = sched.route_edge(edges[0]).to;
    assert_eq!(sched.route_node(last_route_node).exit_edges.len(), 1);

    // the track tables on the full connection resolve to those platforms
    let full_con = sched.full_connection(sched.route_edge(edges[0]).conns[0].full_con);
    assert_ne!(full_con.d_track.get(), 0);
    assert_ne!(full_con.a_track.get(), 0);
    Ok(())
}

#[test]
fn reverse_adjacency_is_filled() -> Result<(), Error> {
    utils::init_logger();

    let schedule = ScheduleBuilder::new("reverse", "2020-01-01", "2020-01-07")
        .service(|service| {
            service.st("A", 600, 600).st("B", 660, 665).st("C", 720, 720);
        })
        .build();

    let options = LoaderOptions {
        num_days: 7,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    let edges = utils::route_edges(&sched, RouteIdx::new(0));
    for edge_ref in &edges {
        let to = sched.route_edge(*edge_ref).to;
        assert!(sched
            .route_node(to)
            .incoming
            .iter()
            .any(|incoming| incoming == edge_ref));
    }
    Ok(())
}
