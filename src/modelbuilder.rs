// Copyright (C) 2021 Kisio Digital and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

//! Provides an easy way to create an [`crate::input::Schedule`]
//!
//! ```
//! use midgard::modelbuilder::ScheduleBuilder;
//!
//! let schedule = ScheduleBuilder::new("demo", "2020-01-01", "2020-01-31")
//!     .service(|service| {
//!         service
//!             .st("A", 600, 600)
//!             .st("B", 660, 665)
//!             .st("C", 720, 720);
//!     })
//!     .service(|service| {
//!         service.st("A", 610, 610).st("D", 700, 700);
//!     })
//!     .build();
//! assert_eq!(schedule.services.len(), 2);
//! ```

use crate::input::{
    AttributeSpec, CategorySpec, DirectionSpec, Platform, ProviderSpec, RoutePath, RuleService,
    Schedule, Section, Service, ServiceDebug, Station, StopTracks, TimezoneSpec, TrackRule,
    ValidityPeriod,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use typed_index_collection::{Collection, CollectionWithId, Idx, WithId};

impl WithId for Station {
    fn with_id(id: &str) -> Self {
        Station {
            id: id.to_string(),
            name: id.to_string(),
            ..Station::default()
        }
    }
}

/// Builder used to easily create an input [`Schedule`].
/// Stations are created on first use with default penalties and no
/// timezone; customize them with [`ScheduleBuilder::station`].
pub struct ScheduleBuilder {
    name: String,
    validity_period: ValidityPeriod,
    stations: CollectionWithId<Station>,
    route_paths: Collection<RoutePath>,
    route_path_index: HashMap<(Vec<String>, Vec<bool>, Vec<bool>), Idx<RoutePath>>,
    services: Collection<Service>,
    rule_services: Vec<RuleService>,
}

impl ScheduleBuilder {
    pub fn new(name: &str, start_date: &str, end_date: &str) -> Self {
        let start_date: NaiveDate = start_date.parse().expect("bad start date");
        let end_date: NaiveDate = end_date.parse().expect("bad end date");
        assert!(start_date <= end_date);
        Self {
            name: name.to_string(),
            validity_period: ValidityPeriod {
                start_date,
                end_date,
            },
            stations: CollectionWithId::default(),
            route_paths: Collection::default(),
            route_path_index: HashMap::new(),
            services: Collection::default(),
            rule_services: Vec::new(),
        }
    }

    /// Create or customize a station.
    ///
    /// ```
    /// # use midgard::modelbuilder::ScheduleBuilder;
    /// let schedule = ScheduleBuilder::new("demo", "2020-01-01", "2020-01-31")
    ///     .station("A", |station| {
    ///         station.transfer_time = 5;
    ///     })
    ///     .service(|service| {
    ///         service.st("A", 600, 600).st("B", 660, 660);
    ///     })
    ///     .build();
    /// # assert_eq!(schedule.stations.len(), 2);
    /// ```
    pub fn station<F>(mut self, id: &str, mut station_initer: F) -> Self
    where
        F: FnMut(&mut Station),
    {
        {
            let mut station = self.stations.get_or_create(id);
            station_initer(&mut station);
        }
        self
    }

    /// Add a new service. Stops, times and metadata are described through
    /// the [`ServiceBuilder`] handed to the closure.
    pub fn service<F>(mut self, service_initer: F) -> Self
    where
        F: FnOnce(&mut ServiceBuilder),
    {
        let mut builder = ServiceBuilder::default();
        service_initer(&mut builder);
        self.commit_service(builder);
        self
    }

    fn commit_service(&mut self, builder: ServiceBuilder) {
        assert!(
            builder.stops.len() >= 2,
            "a service needs at least two stops"
        );

        let mut station_idxs = Vec::with_capacity(builder.stops.len());
        for stop in &builder.stops {
            self.stations.get_or_create(&stop.station);
            station_idxs.push(self.stations.get_idx(&stop.station).unwrap());
        }

        let key = (
            builder
                .stops
                .iter()
                .map(|stop| stop.station.clone())
                .collect::<Vec<_>>(),
            builder.stops.iter().map(|stop| stop.in_allowed).collect::<Vec<_>>(),
            builder.stops.iter().map(|stop| stop.out_allowed).collect::<Vec<_>>(),
        );
        let route_path = match self.route_path_index.get(&key) {
            Some(idx) => *idx,
            None => {
                let idx = self.route_paths.push(RoutePath {
                    stations: station_idxs,
                    in_allowed: key.1.clone(),
                    out_allowed: key.2.clone(),
                });
                self.route_path_index.insert(key, idx);
                idx
            }
        };

        let times = builder
            .stops
            .iter()
            .flat_map(|stop| vec![stop.arrival, stop.departure])
            .collect();

        let nb_of_sections = builder.stops.len() - 1;
        let sections = (0..nb_of_sections)
            .map(|section_idx| Section {
                train_nr: *builder
                    .section_train_nrs
                    .get(&section_idx)
                    .unwrap_or(&builder.train_nr),
                line_id: builder.line_id.clone(),
                category: builder.category.clone(),
                direction: builder.direction.clone(),
                provider: builder.provider.clone(),
                attributes: builder.attributes.clone(),
            })
            .collect();

        let initial_train_nr = builder.initial_train_nr.unwrap_or_else(|| {
            *builder.section_train_nrs.get(&0).unwrap_or(&builder.train_nr)
        });

        let tracks = if builder.tracks.is_empty() {
            Vec::new()
        } else {
            let mut tracks = vec![StopTracks::default(); builder.stops.len()];
            for (stop_idx, stop_tracks) in &builder.tracks {
                tracks[*stop_idx] = stop_tracks.clone();
            }
            tracks
        };

        self.services.push(Service {
            route_path,
            sections,
            times,
            traffic_days: builder.traffic_days,
            tracks,
            trip_id: builder.trip_id,
            debug: builder.debug,
            seq_numbers: builder.seq_numbers,
            initial_train_nr,
            rule_participant: builder.rule_participant,
        });
    }

    pub fn build(self) -> Schedule {
        let content_hash = self
            .name
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325u64, |hash, byte| {
                (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
            });
        Schedule {
            name: self.name,
            validity_period: self.validity_period,
            stations: self.stations,
            route_paths: self.route_paths,
            services: self.services,
            rule_services: self.rule_services,
            content_hash,
        }
    }
}

struct StopSpec {
    station: String,
    arrival: i32,
    departure: i32,
    in_allowed: bool,
    out_allowed: bool,
}

/// Describes one service to add : stops with local minutes, operating
/// days, and the per-section metadata.
pub struct ServiceBuilder {
    stops: Vec<StopSpec>,
    traffic_days: String,
    train_nr: u32,
    line_id: String,
    category: CategorySpec,
    direction: Option<DirectionSpec>,
    provider: Option<ProviderSpec>,
    attributes: Vec<AttributeSpec>,
    tracks: Vec<(usize, StopTracks)>,
    trip_id: Option<String>,
    debug: Option<ServiceDebug>,
    seq_numbers: Vec<u32>,
    initial_train_nr: Option<u32>,
    section_train_nrs: HashMap<usize, u32>,
    rule_participant: bool,
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self {
            stops: Vec::new(),
            traffic_days: "1".to_string(),
            train_nr: 1,
            line_id: String::new(),
            category: CategorySpec::default(),
            direction: None,
            provider: None,
            attributes: Vec::new(),
            tracks: Vec::new(),
            trip_id: None,
            debug: None,
            seq_numbers: Vec::new(),
            initial_train_nr: None,
            section_train_nrs: HashMap::new(),
            rule_participant: false,
        }
    }
}

impl ServiceBuilder {
    /// Append a stop where boarding and alighting are both allowed.
    /// `arrival` and `departure` are local minutes relative to the
    /// service's base day.
    pub fn st(&mut self, station: &str, arrival: i32, departure: i32) -> &mut Self {
        self.stop(station, arrival, departure, true, true)
    }

    pub fn stop(
        &mut self,
        station: &str,
        arrival: i32,
        departure: i32,
        in_allowed: bool,
        out_allowed: bool,
    ) -> &mut Self {
        self.stops.push(StopSpec {
            station: station.to_string(),
            arrival,
            departure,
            in_allowed,
            out_allowed,
        });
        self
    }

    /// Serialized operating days : character `d` is `'1'` iff the service
    /// runs on the `d`-th day of the feed validity period.
    pub fn days(&mut self, traffic_days: &str) -> &mut Self {
        self.traffic_days = traffic_days.to_string();
        self
    }

    pub fn train_nr(&mut self, train_nr: u32) -> &mut Self {
        self.train_nr = train_nr;
        self
    }

    /// Override the train number of one section, for services renumbered
    /// along the way.
    pub fn section_train_nr(&mut self, section_idx: usize, train_nr: u32) -> &mut Self {
        self.section_train_nrs.insert(section_idx, train_nr);
        self
    }

    pub fn initial_train_nr(&mut self, train_nr: u32) -> &mut Self {
        self.initial_train_nr = Some(train_nr);
        self
    }

    pub fn line(&mut self, line_id: &str) -> &mut Self {
        self.line_id = line_id.to_string();
        self
    }

    pub fn category(&mut self, name: &str) -> &mut Self {
        self.category = CategorySpec {
            name: name.to_string(),
            output_rule: 0,
        };
        self
    }

    pub fn direction_text(&mut self, text: &str) -> &mut Self {
        self.direction = Some(DirectionSpec::Text(text.to_string()));
        self
    }

    pub fn provider(&mut self, short_name: &str, long_name: &str, full_name: &str) -> &mut Self {
        self.provider = Some(ProviderSpec {
            short_name: short_name.to_string(),
            long_name: long_name.to_string(),
            full_name: full_name.to_string(),
        });
        self
    }

    pub fn attribute(&mut self, code: &str, text: &str, traffic_days: &str) -> &mut Self {
        self.attributes.push(AttributeSpec {
            code: code.to_string(),
            text: text.to_string(),
            traffic_days: traffic_days.to_string(),
        });
        self
    }

    pub fn dep_track(&mut self, stop_idx: usize, name: &str, traffic_days: &str) -> &mut Self {
        self.stop_tracks(stop_idx).dep_tracks.push(TrackRule {
            traffic_days: traffic_days.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn arr_track(&mut self, stop_idx: usize, name: &str, traffic_days: &str) -> &mut Self {
        self.stop_tracks(stop_idx).arr_tracks.push(TrackRule {
            traffic_days: traffic_days.to_string(),
            name: name.to_string(),
        });
        self
    }

    fn stop_tracks(&mut self, stop_idx: usize) -> &mut StopTracks {
        if let Some(position) = self
            .tracks
            .iter()
            .position(|(existing, _)| *existing == stop_idx)
        {
            return &mut self.tracks[position].1;
        }
        self.tracks.push((stop_idx, StopTracks::default()));
        &mut self.tracks.last_mut().unwrap().1
    }

    pub fn trip_id(&mut self, trip_id: &str) -> &mut Self {
        self.trip_id = Some(trip_id.to_string());
        self
    }

    pub fn debug(&mut self, file: &str, line_from: u32, line_to: u32) -> &mut Self {
        self.debug = Some(ServiceDebug {
            file: file.to_string(),
            line_from,
            line_to,
        });
        self
    }

    pub fn seq_numbers(&mut self, seq_numbers: Vec<u32>) -> &mut Self {
        self.seq_numbers = seq_numbers;
        self
    }

    pub fn rule_participant(&mut self) -> &mut Self {
        self.rule_participant = true;
        self
    }
}

/// Helpers to describe stations from tests.
pub fn timezone(general_offset: i32) -> TimezoneSpec {
    TimezoneSpec {
        general_offset,
        season: None,
    }
}

pub fn platform(name: &str, tracks: &[&str]) -> Platform {
    Platform {
        name: name.to_string(),
        tracks: tracks.iter().map(|track| (*track).to_string()).collect(),
    }
}
