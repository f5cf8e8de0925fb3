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
use midgard::input::Schedule;
use midgard::modelbuilder::ScheduleBuilder;
use midgard::{build_graph, BuildError, LoaderOptions};

fn feed(name: &str, departure: i32) -> Schedule {
    ScheduleBuilder::new(name, "2020-01-01", "2020-01-07")
        .service(|service| {
            service
                .st("X", departure, departure)
                .st("Y", departure + 60, departure + 65)
                .st("Z", departure + 120, departure + 120)
                .days("1");
        })
        .build()
}

#[test]
fn cross_feed_duplicate_is_suppressed() -> Result<(), Error> {
    utils::init_logger();

    let options = LoaderOptions {
        num_days: 7,
        dataset_prefix: vec!["a".to_string(), "b".to_string()],
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[feed("first", 600), feed("second", 600)], &options, None)?;

    // both feeds publish the same physical trip at equivalent stations :
    // only the first copy survives
    assert_eq!(sched.route_count, 1);
    assert_eq!(sched.nb_of_trips(), 1);

    // the equivalence linking goes both ways
    let x_a = utils::station_idx(&sched, "X");
    let x_of_b = sched
        .stations
        .iter()
        .find(|station| station.name == "X" && station.source_schedule == 1)
        .unwrap();
    assert!(sched.station(x_a).equivalent.contains(&x_of_b.index));
    assert!(x_of_b.equivalent.contains(&x_a));

    utils::check_route_invariants(&sched);
    utils::check_trip_backlinks(&sched);
    Ok(())
}

#[test]
fn different_times_are_no_duplicates() -> Result<(), Error> {
    utils::init_logger();

    let options = LoaderOptions {
        num_days: 7,
        dataset_prefix: vec!["a".to_string(), "b".to_string()],
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[feed("first", 600), feed("second", 615)], &options, None)?;

    assert_eq!(sched.route_count, 2);
    assert_eq!(sched.nb_of_trips(), 2);
    Ok(())
}

#[test]
fn several_feeds_need_distinct_prefixes() {
    utils::init_logger();

    let options = LoaderOptions {
        num_days: 7,
        dataset_prefix: vec!["a".to_string(), "a".to_string()],
        ..LoaderOptions::default()
    };
    let result = build_graph(&[feed("first", 600), feed("second", 600)], &options, None);
    assert_eq!(result.unwrap_err(), BuildError::NonUniquePrefixes);
}

#[test]
fn no_schedule_is_an_error() {
    utils::init_logger();

    let result = build_graph(&[], &LoaderOptions::default(), None);
    assert_eq!(result.unwrap_err(), BuildError::NoSchedules);
}
