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
use midgard::input::{SeasonSpec, TimezoneSpec};
use midgard::modelbuilder::ScheduleBuilder;
use midgard::{build_graph, LoaderOptions, SCHEDULE_OFFSET_DAYS};
use rstest::rstest;

fn plus_one_with_season() -> TimezoneSpec {
    // +01:00 standard; clocks jump to +02:00 on day 10 at 02:00 standard
    // time, and fall back on day 29 at 03:00 daylight time
    TimezoneSpec {
        general_offset: 60,
        season: Some(SeasonSpec {
            offset: 120,
            first_day: 10,
            last_day: 29,
            begin_minute: 120,
            end_minute: 180,
        }),
    }
}

#[test]
fn spring_forward_day_is_repaired_with_fix_offset() -> Result<(), Error> {
    utils::init_logger();

    // a service at 02:30 local every day : that instant does not exist on
    // the spring-forward day, the feed means 03:30 daylight time
    let schedule = ScheduleBuilder::new("dst", "2020-10-01", "2020-10-30")
        .station("A", |station| {
            station.timezone = Some(plus_one_with_season());
        })
        .station("B", |station| {
            station.timezone = Some(plus_one_with_season());
        })
        .service(|service| {
            service
                .st("A", 150, 150)
                .st("B", 210, 210)
                .days(&"1".repeat(30));
        })
        .build();

    let options = LoaderOptions {
        schedule_begin: "2020-10-01".parse().unwrap(),
        num_days: 30,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    // the days before the switch and the repaired switch day share one
    // time pattern (02:30 standard and 03:30 daylight are the same UTC
    // instant); the days after the switch form a second, earlier pattern
    assert_eq!(sched.route_count, 1);
    let edges = utils::route_edges(&sched, RouteIdx::new(0));
    assert_eq!(edges.len(), 1);
    let conns = &sched.route_edge(edges[0]).conns;
    assert_eq!(conns.len(), 2);

    // in-season days : 02:30 daylight local is 00:30 UTC
    assert_eq!((conns[0].d_time, conns[0].a_time), (30, 90));
    // standard days, and the repaired switch day at 03:30 daylight local :
    // 01:30 UTC
    assert_eq!((conns[1].d_time, conns[1].a_time), (90, 150));

    let offset = SCHEDULE_OFFSET_DAYS as usize;
    let standard_days = sched.bitfields.get(conns[1].traffic_days);
    let season_days = sched.bitfields.get(conns[0].traffic_days);

    // days 0..=9 plus the spring-forward day 10
    assert_eq!(standard_days.count(), 11);
    assert!(standard_days.test(offset + 9));
    assert!(standard_days.test(offset + 10));
    assert!(!standard_days.test(offset + 11));

    // days 11..=29
    assert_eq!(season_days.count(), 19);
    assert!(!season_days.test(offset + 10));
    assert!(season_days.test(offset + 11));
    assert!(season_days.test(offset + 29));

    // one trip per pattern
    assert_eq!(sched.nb_of_trips(), 2);

    utils::check_route_invariants(&sched);
    utils::check_trip_backlinks(&sched);
    Ok(())
}

#[rstest]
#[case(0, 600)]
#[case(60, 540)]
#[case(120, 480)]
#[case(-120, 720)]
fn fixed_offset_zone_shifts_every_day_alike(
    #[case] general_offset: i32,
    #[case] expected_departure: u16,
) -> Result<(), Error> {
    utils::init_logger();

    let schedule = ScheduleBuilder::new("fixed", "2020-10-01", "2020-10-30")
        .station("A", |station| {
            station.timezone = Some(TimezoneSpec {
                general_offset,
                season: None,
            });
        })
        .station("B", |station| {
            station.timezone = Some(TimezoneSpec {
                general_offset,
                season: None,
            });
        })
        .service(|service| {
            service
                .st("A", 600, 600)
                .st("B", 660, 660)
                .days(&"1".repeat(30));
        })
        .build();

    let options = LoaderOptions {
        schedule_begin: "2020-10-01".parse().unwrap(),
        num_days: 30,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    // every day folds to the same UTC pattern : a single connection
    let edges = utils::route_edges(&sched, RouteIdx::new(0));
    let conns = &sched.route_edge(edges[0]).conns;
    assert_eq!(conns.len(), 1);
    assert_eq!(conns[0].d_time, expected_departure);
    assert_eq!(conns[0].a_time, expected_departure + 60);
    assert_eq!(sched.bitfields.get(conns[0].traffic_days).count(), 30);
    assert_eq!(sched.nb_of_trips(), 1);
    Ok(())
}

#[test]
fn midnight_fold_shifts_to_the_previous_day() -> Result<(), Error> {
    utils::init_logger();

    // 00:30 local in a +01:00 zone is 23:30 UTC of the previous day
    let schedule = ScheduleBuilder::new("fold", "2020-10-01", "2020-10-30")
        .station("A", |station| {
            station.timezone = Some(TimezoneSpec {
                general_offset: 60,
                season: None,
            });
        })
        .station("B", |station| {
            station.timezone = Some(TimezoneSpec {
                general_offset: 60,
                season: None,
            });
        })
        .service(|service| {
            service.st("A", 30, 30).st("B", 90, 90).days("1");
        })
        .build();

    let options = LoaderOptions {
        schedule_begin: "2020-10-01".parse().unwrap(),
        num_days: 30,
        ..LoaderOptions::default()
    };
    let sched = build_graph(&[schedule], &options, None)?;

    let edges = utils::route_edges(&sched, RouteIdx::new(0));
    let conns = &sched.route_edge(edges[0]).conns;
    assert_eq!(conns.len(), 1);
    assert_eq!((conns[0].d_time, conns[0].a_time), (1410, 1470));

    // the operating day moved one slot into the horizon padding
    let traffic_days = sched.bitfields.get(conns[0].traffic_days);
    assert!(traffic_days.test(SCHEDULE_OFFSET_DAYS as usize - 1));
    assert_eq!(traffic_days.count(), 1);
    Ok(())
}
