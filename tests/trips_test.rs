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

mod utils;

use failure::Error;
use midgard::graph::PrimaryTripId;
use midgard::modelbuilder::ScheduleBuilder;
use midgard::{build_graph, LoaderOptions};

#[test]
fn train_number_change_registers_an_alias() -> Result<(), Error> {
    utils::init_logger();

    // three sections, renumbered from 1 to 2 on the last one
    let schedule = ScheduleBuilder::new("renumbered", "2020-01-01", "2020-01-07")
        .service(|service| {
            service
                .st("A", 600, 600)
                .st("B", 650, 655)
                .st("C", 700, 705)
                .st("D", 750, 750)
                .train_nr(1)
                .section_train_nr(2, 2)
                .days("1");
        })
        .build();

    let options = LoaderOptions {
        num_days: 7,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    assert_eq!(sched.nb_of_trips(), 1);
    assert_eq!(sched.trips.len(), 2);

    let nominal = PrimaryTripId {
        station: utils::station_idx(&sched, "A"),
        train_nr: 1,
        first_departure_mam: 600,
    };
    let alias = PrimaryTripId {
        station: utils::station_idx(&sched, "C"),
        train_nr: 2,
        first_departure_mam: 705,
    };
    let nominal_trip = sched.find_trip(&nominal).expect("nominal primary missing");
    let alias_trip = sched.find_trip(&alias).expect("alias primary missing");
    assert_eq!(nominal_trip, alias_trip);

    utils::check_trip_backlinks(&sched);
    Ok(())
}

#[test]
fn announced_train_number_registers_an_alias() -> Result<(), Error> {
    utils::init_logger();

    let schedule = ScheduleBuilder::new("announced", "2020-01-01", "2020-01-07")
        .service(|service| {
            service
                .st("A", 600, 600)
                .st("B", 660, 660)
                .train_nr(4711)
                .initial_train_nr(4000)
                .days("1");
        })
        .build();

    let options = LoaderOptions {
        num_days: 7,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    assert_eq!(sched.nb_of_trips(), 1);
    assert_eq!(sched.trips.len(), 2);
    let station = utils::station_idx(&sched, "A");
    for train_nr in &[4711u32, 4000u32] {
        let primary = PrimaryTripId {
            station,
            train_nr: *train_nr,
            first_departure_mam: 600,
        };
        assert!(sched.find_trip(&primary).is_some());
    }
    Ok(())
}

#[test]
fn duplicate_source_trip_ids_keep_the_first() -> Result<(), Error> {
    utils::init_logger();

    let schedule = ScheduleBuilder::new("trip-ids", "2020-01-01", "2020-01-07")
        .service(|service| {
            service
                .st("A", 600, 600)
                .st("B", 660, 660)
                .trip_id("trip-1")
                .days("1");
        })
        .service(|service| {
            service
                .st("A", 700, 700)
                .st("B", 760, 760)
                .trip_id("trip-1")
                .days("1");
        })
        .build();

    let options = LoaderOptions {
        num_days: 7,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    assert_eq!(sched.nb_of_trips(), 2);
    assert_eq!(sched.gtfs_trip_ids.len(), 1);
    let kept = sched.gtfs_trip_ids["trip-1"];
    assert_eq!(sched.trip(kept).id.primary.first_departure_mam, 600);
    Ok(())
}

#[test]
fn expanded_trips_are_grouped_by_route() -> Result<(), Error> {
    utils::init_logger();

    let schedule = ScheduleBuilder::new("expanded", "2020-01-01", "2020-01-07")
        .service(|service| {
            service.st("A", 600, 600).st("B", 660, 665).st("C", 720, 720).days("1");
        })
        .service(|service| {
            service.st("A", 610, 610).st("B", 670, 675).st("C", 730, 730).days("1");
        })
        .build();

    let options = LoaderOptions {
        num_days: 7,
        expand_trips: true,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    assert_eq!(sched.expanded_trips.len(), 1);
    assert_eq!(sched.expanded_trips[0].len(), 2);
    Ok(())
}

#[test]
fn day_offsets_follow_overnight_sections() -> Result<(), Error> {
    utils::init_logger();

    // departure at 23:30, arrival 00:30, onward leg the next morning
    let schedule = ScheduleBuilder::new("overnight", "2020-01-01", "2020-01-07")
        .service(|service| {
            service
                .st("A", 1410, 1410)
                .st("B", 1470, 1500)
                .st("C", 1560, 1560)
                .days("1");
        })
        .build();

    let options = LoaderOptions {
        num_days: 7,
        expand_trips: true,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    assert_eq!(sched.nb_of_trips(), 1);
    let trip = sched.trip(sched.trips[0].1);
    // first section departs on the base day, the second after midnight
    assert_eq!(trip.day_offsets, vec![0, 1]);

    // the overnight trip is still consistent for the expanded index
    assert_eq!(sched.expanded_trips.len(), 1);

    utils::check_route_invariants(&sched);
    Ok(())
}
