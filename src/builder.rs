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

mod duplicates;
mod finalize;
mod route_packing;
mod route_sections;
mod section;
mod stations;
mod trips;
mod utc_times;

use crate::bitfields::{Bitfield, BitfieldStore};
use crate::classes::class_mapping;
use crate::config::{LoaderOptions, ProgressObserver};
use crate::error::BuildError;
use crate::graph::{
    AttributeIdx, BitfieldIdx, CategoryIdx, ConInfoIdx, ConnectionInfo, Direction, DirectionIdx,
    FullConIdx, FullConnection, ProviderIdx, RouteIdx, Schedule, StationIdx, StringIdx, TrackIdx,
    TrackInfo,
};
use crate::input;
use crate::input::TrackRule;
use crate::time::{Calendar, DayIdx, MAX_DAYS, SCHEDULE_OFFSET_MINUTES};
use log::{info, warn};
use route_packing::{add_to_routes, RouteT};
use section::Participant;
use std::collections::{HashMap, HashSet};
use typed_index_collection::Idx;

/// Builds the journey graph from the parsed feeds, then finalizes and
/// returns the sealed [`Schedule`].
pub fn build_graph(
    schedules: &[input::Schedule],
    options: &LoaderOptions,
    observer: Option<&mut dyn ProgressObserver>,
) -> Result<Schedule, BuildError> {
    let mut observer = observer;

    if schedules.is_empty() {
        return Err(BuildError::NoSchedules);
    }
    if options.num_days == 0 || options.num_days > MAX_DAYS {
        return Err(BuildError::TooManyDays {
            nb_of_days: options.num_days,
        });
    }
    for schedule in schedules {
        info!("schedule: {}", schedule.name);
    }

    let (first_date, last_date) = options.interval();
    let calendar = Calendar::new(first_date, last_date);
    let prefixes = check_prefixes(schedules, options)?;

    let mut builder = GraphBuilder::new(schedules, options, calendar, prefixes);

    if let Some(observer) = observer.as_mut() {
        observer.status("Add Stations");
    }
    builder.build_stations(schedules);

    for (feed_idx, schedule) in schedules.iter().enumerate() {
        let has_days = builder.sched.calendar.first_last_days(
            &schedule.validity_period.start_date,
            &schedule.validity_period.end_date,
        );
        let (first_day, last_day) = match has_days {
            Some(days) => days,
            None => {
                warn!(
                    "Skipping schedule {} because its validity period is \
                     outside the horizon.",
                    schedule.name
                );
                continue;
            }
        };
        builder.current_feed = feed_idx;
        builder.first_day = first_day;
        builder.last_day = last_day;
        if let Some(observer) = observer.as_mut() {
            observer.status(&format!("Add Services {}", schedule.name));
        }
        builder.add_services(schedule, &mut observer)?;
        // services participating in rule-based merges are handled by the
        // rule-service builder, which runs after us per feed
    }

    if let Some(observer) = observer.as_mut() {
        observer.status("Connect Reverse");
    }
    builder.connect_reverse();

    if let Some(observer) = observer.as_mut() {
        observer.status("Dedup Bitfields");
    }
    builder.dedup_bitfields();

    if let Some(observer) = observer.as_mut() {
        observer.status("Sort Trips");
    }
    builder.sort_trips();

    builder.compute_hash(schedules);
    builder.sched.route_count = builder.next_route_index;
    builder.sched.schedule_begin = builder.sched.schedule_begin
        - chrono::Duration::minutes(i64::from(SCHEDULE_OFFSET_MINUTES));

    info!("{} connection infos", builder.sched.connection_infos.len());
    info!("{} light connections", builder.lcon_count);
    info!("{} routes", builder.next_route_index);
    info!("{} trips", builder.sched.trip_mem.len());
    if builder.expand_trips {
        info!("{} expanded routes", builder.sched.expanded_trips.len());
        info!("{} broken trips ignored", builder.broken_trips);
    }

    builder.sched.validate()?;
    Ok(builder.sched)
}

fn check_prefixes(
    schedules: &[input::Schedule],
    options: &LoaderOptions,
) -> Result<Vec<String>, BuildError> {
    if schedules.len() == 1 && options.dataset_prefix.is_empty() {
        // don't force a prefix for a single feed
        return Ok(vec![String::new()]);
    }
    let distinct: HashSet<&String> = options.dataset_prefix.iter().collect();
    if options.dataset_prefix.len() != schedules.len() || distinct.len() != schedules.len() {
        return Err(BuildError::NonUniquePrefixes);
    }
    Ok(options
        .dataset_prefix
        .iter()
        .map(|prefix| {
            if prefix.is_empty() {
                prefix.clone()
            } else {
                format!("{}_", prefix)
            }
        })
        .collect())
}

pub(crate) struct GraphBuilder {
    pub(crate) sched: Schedule,

    apply_rules: bool,
    expand_trips: bool,
    no_local_transport: bool,
    use_platforms: bool,
    skip_invalid: bool,

    // state of the feed currently being absorbed
    pub(crate) current_feed: usize,
    pub(crate) first_day: DayIdx,
    pub(crate) last_day: DayIdx,

    // scratch interning tables, dropped when construction ends
    strings: HashMap<String, StringIdx>,
    directions: HashMap<Direction, DirectionIdx>,
    providers: HashMap<(String, String, String), ProviderIdx>,
    categories: HashMap<(String, u8), CategoryIdx>,
    attributes: HashMap<(String, String), AttributeIdx>,
    con_infos: HashMap<ConnectionInfo, ConInfoIdx>,
    full_connections: HashMap<FullConnection, FullConIdx>,
    bitfield_memo: HashMap<(String, DayIdx), Bitfield>,
    station_translations: Vec<HashMap<Idx<input::Station>, StationIdx>>,

    next_route_index: u32,
    lcon_count: usize,
    broken_trips: u32,
}

impl GraphBuilder {
    fn new(
        schedules: &[input::Schedule],
        options: &LoaderOptions,
        calendar: Calendar,
        prefixes: Vec<String>,
    ) -> Self {
        let names = schedules
            .iter()
            .enumerate()
            .map(|(idx, schedule)| {
                if schedule.name.is_empty() {
                    format!("unknown-{}", idx)
                } else {
                    schedule.name.clone()
                }
            })
            .collect();

        let mut bitfields = BitfieldStore::new();
        bitfields.store(Bitfield::empty());

        let schedule_begin = calendar.first_date().and_hms(0, 0, 0);
        let schedule_end =
            (*calendar.last_date() + chrono::Duration::days(1)).and_hms(0, 0, 0);

        let sched = Schedule {
            names,
            prefixes,
            schedule_begin,
            schedule_end,
            calendar,
            stations: Vec::new(),
            station_nodes: Vec::new(),
            route_nodes: Vec::new(),
            platform_nodes: Vec::new(),
            route_index_to_first_route_node: Vec::new(),
            route_count: 0,
            strings: Vec::new(),
            directions: Vec::new(),
            providers: Vec::new(),
            categories: Vec::new(),
            attributes: Vec::new(),
            connection_infos: Vec::new(),
            full_connections: Vec::new(),
            tracks: vec![TrackInfo::default()],
            bitfields,
            classes: class_mapping(),
            merged_trips: Vec::new(),
            trip_mem: Vec::new(),
            trip_edges: Vec::new(),
            trips: Vec::new(),
            expanded_trips: Vec::new(),
            gtfs_trip_ids: HashMap::new(),
            hash: 0,
        };

        Self {
            sched,
            apply_rules: options.apply_rules,
            expand_trips: options.expand_trips,
            no_local_transport: options.no_local_transport,
            use_platforms: options.use_platforms,
            skip_invalid: options.skip_invalid,
            current_feed: 0,
            first_day: 0,
            last_day: 0,
            strings: HashMap::new(),
            directions: HashMap::new(),
            providers: HashMap::new(),
            categories: HashMap::new(),
            attributes: HashMap::new(),
            con_infos: HashMap::new(),
            full_connections: HashMap::new(),
            bitfield_memo: HashMap::new(),
            station_translations: Vec::new(),
            next_route_index: 0,
            lcon_count: 0,
            broken_trips: 0,
        }
    }

    /// Absorb one feed's services, grouped by their physical stop sequence.
    /// The stable sort keeps the feed's relative order within each group,
    /// which makes alternate-route assignment deterministic.
    fn add_services(
        &mut self,
        schedule: &input::Schedule,
        observer: &mut Option<&mut dyn ProgressObserver>,
    ) -> Result<(), BuildError> {
        let mut sorted: Vec<&input::Service> = schedule.services.values().collect();
        sorted.sort_by_key(|service| service.route_path.get());
        let total = sorted.len();

        let mut index = 0;
        while index < sorted.len() {
            let route_path_idx = sorted[index].route_path;
            let mut route_services: Vec<&input::Service> = Vec::new();
            while index < sorted.len() && sorted[index].route_path == route_path_idx {
                let service = sorted[index];
                if !self.apply_rules || !service.rule_participant {
                    route_services.push(service);
                }
                index += 1;
            }

            let route_path = &schedule.route_paths[route_path_idx];
            if !route_services.is_empty() && !self.skip_route(schedule, route_path) {
                let with_traffic_days: Vec<(&input::Service, Bitfield)> = route_services
                    .iter()
                    .map(|service| {
                        (*service, self.get_or_create_bitfield(&service.traffic_days, 0))
                    })
                    .collect();
                self.add_route_services(&with_traffic_days, route_path)?;
            }

            if let Some(observer) = observer.as_mut() {
                observer.update(index, total);
            }
        }
        Ok(())
    }

    /// Turn the services sharing one stop sequence into one or more
    /// alternate routes, then materialize each of them.
    fn add_route_services(
        &mut self,
        services: &[(&input::Service, Bitfield)],
        route_path: &input::RoutePath,
    ) -> Result<(), BuildError> {
        let mut alt_routes: Vec<RouteT> = Vec::new();

        for (service, traffic_days) in services {
            let has_patterns = self.service_times_to_utc(traffic_days, route_path, service);
            let patterns = match has_patterns {
                Some(patterns) => patterns,
                None => continue, // no service within the horizon
            };

            for (rel_utc_times, traffic) in &patterns {
                if rel_utc_times.is_empty() {
                    // diagnostic bucket of irreparable days, carries no
                    // connections
                    continue;
                }
                let folded = duplicates::folded_section_times(rel_utc_times);
                if self.has_duplicate(route_path, &folded) {
                    continue;
                }

                let trips_idx = self.create_merged_trips(service, route_path, rel_utc_times);
                let mut lcon_string = Vec::with_capacity(service.sections.len());
                for section_idx in 0..service.sections.len() {
                    let connection = self.section_to_connection(
                        &[Participant::new(service, rel_utc_times, section_idx)],
                        &traffic.horizon_days,
                        trips_idx,
                        route_path,
                    )?;
                    lcon_string.push(connection);
                }
                self.lcon_count += lcon_string.len();
                add_to_routes(&mut alt_routes, lcon_string);
            }
        }

        for route in &alt_routes {
            if route.is_empty() {
                continue;
            }
            let route_index = RouteIdx::new(self.next_route_index as usize);
            self.next_route_index += 1;

            let sections = self.create_route(route_path, route, route_index);
            self.index_first_route_node(route_index, sections[0].node);
            self.write_trip_edges(&sections);
            if self.expand_trips {
                self.add_expanded_trips(&sections);
            }
        }
        Ok(())
    }

    fn skip_route(&self, schedule: &input::Schedule, route_path: &input::RoutePath) -> bool {
        self.no_local_transport
            && route_path
                .stations
                .iter()
                .any(|station| schedule.stations[*station].local)
    }

    pub(crate) fn station_idx(&self, station: Idx<input::Station>) -> StationIdx {
        self.station_translations[self.current_feed][&station]
    }

    pub(crate) fn get_or_create_string(&mut self, text: &str) -> StringIdx {
        if let Some(idx) = self.strings.get(text) {
            return *idx;
        }
        let idx = StringIdx::new(self.sched.strings.len());
        self.sched.strings.push(text.to_string());
        self.strings.insert(text.to_string(), idx);
        idx
    }

    pub(crate) fn get_or_create_direction(
        &mut self,
        spec: &input::DirectionSpec,
    ) -> DirectionIdx {
        let direction = match spec {
            input::DirectionSpec::Station(station) => {
                Direction::Station(self.station_idx(*station))
            }
            input::DirectionSpec::Text(text) => Direction::Text(self.get_or_create_string(text)),
        };
        if let Some(idx) = self.directions.get(&direction) {
            return *idx;
        }
        let idx = DirectionIdx::new(self.sched.directions.len());
        self.sched.directions.push(direction);
        self.directions.insert(direction, idx);
        idx
    }

    pub(crate) fn get_or_create_provider(&mut self, spec: &input::ProviderSpec) -> ProviderIdx {
        let key = (
            spec.short_name.clone(),
            spec.long_name.clone(),
            spec.full_name.clone(),
        );
        if let Some(idx) = self.providers.get(&key) {
            return *idx;
        }
        let idx = ProviderIdx::new(self.sched.providers.len());
        self.sched.providers.push(crate::graph::Provider {
            short_name: spec.short_name.clone(),
            long_name: spec.long_name.clone(),
            full_name: spec.full_name.clone(),
        });
        self.providers.insert(key, idx);
        idx
    }

    pub(crate) fn get_or_create_category(&mut self, spec: &input::CategorySpec) -> CategoryIdx {
        let key = (spec.name.clone(), spec.output_rule);
        if let Some(idx) = self.categories.get(&key) {
            return *idx;
        }
        let idx = CategoryIdx::new(self.sched.categories.len());
        self.sched.categories.push(crate::graph::Category {
            name: spec.name.clone(),
            output_rule: spec.output_rule,
        });
        self.categories.insert(key, idx);
        idx
    }

    pub(crate) fn get_or_create_attribute(&mut self, code: &str, text: &str) -> AttributeIdx {
        let key = (code.to_string(), text.to_string());
        if let Some(idx) = self.attributes.get(&key) {
            return *idx;
        }
        let idx = AttributeIdx::new(self.sched.attributes.len());
        self.sched.attributes.push(crate::graph::Attribute {
            code: code.to_string(),
            text: text.to_string(),
        });
        self.attributes.insert(key, idx);
        idx
    }

    /// The scratch-then-intern entry point for connection infos : the
    /// caller builds a candidate, we either hand back the canonical index
    /// or move the candidate into the pool.
    pub(crate) fn set_get_or_create_con_info(&mut self, con_info: ConnectionInfo) -> ConInfoIdx {
        if let Some(idx) = self.con_infos.get(&con_info) {
            return *idx;
        }
        let idx = ConInfoIdx::new(self.sched.connection_infos.len());
        self.sched.connection_infos.push(con_info.clone());
        self.con_infos.insert(con_info, idx);
        idx
    }

    pub(crate) fn set_get_or_create_full_connection(
        &mut self,
        connection: FullConnection,
    ) -> FullConIdx {
        if let Some(idx) = self.full_connections.get(&connection) {
            return *idx;
        }
        let idx = FullConIdx::new(self.sched.full_connections.len());
        self.sched.full_connections.push(connection.clone());
        self.full_connections.insert(connection, idx);
        idx
    }

    pub(crate) fn store_bitfield(&mut self, bitfield: Bitfield) -> BitfieldIdx {
        self.sched.bitfields.store(bitfield)
    }

    /// Decode a serialized bitmap and shift it onto the horizon. Memoized :
    /// feeds reuse the same serialized bitmaps for many services.
    pub(crate) fn get_or_create_bitfield(&mut self, serialized: &str, shift: DayIdx) -> Bitfield {
        debug_assert!(shift >= 0);
        let key = (serialized.to_string(), shift);
        if let Some(bitfield) = self.bitfield_memo.get(&key) {
            return *bitfield;
        }
        let bitfield = Bitfield::from_serialized(serialized).shifted_right(shift as usize);
        self.bitfield_memo.insert(key, bitfield);
        bitfield
    }

    pub(crate) fn get_or_create_bitfield_idx(
        &mut self,
        serialized: &str,
        shift: DayIdx,
    ) -> BitfieldIdx {
        let bitfield = self.get_or_create_bitfield(serialized, shift);
        self.store_bitfield(bitfield)
    }

    /// Build a track table from per-day track rules; 0 is the shared empty
    /// table.
    pub(crate) fn get_or_create_track(
        &mut self,
        rules: &[TrackRule],
        shift: DayIdx,
    ) -> TrackIdx {
        if rules.is_empty() {
            return TrackIdx::new(0);
        }
        let entries = rules
            .iter()
            .map(|rule| {
                let traffic_days = self.get_or_create_bitfield_idx(&rule.traffic_days, shift);
                let name = self.get_or_create_string(&rule.name);
                (traffic_days, name)
            })
            .collect();
        self.sched.tracks.push(TrackInfo { entries });
        TrackIdx::new(self.sched.tracks.len() - 1)
    }
}
