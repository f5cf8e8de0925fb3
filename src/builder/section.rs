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
use crate::bitfields::Bitfield;
use crate::classes::{price_per_km, ServiceClass};
use crate::error::BuildError;
use crate::geometry::{distance_in_km, Coord};
use crate::graph::{ConInfoIdx, ConnectionInfo, FullConnection, LightConnection, MergedTripsIdx};
use crate::graph::TrafficDayAttribute;
use crate::input;
use crate::time::{DayIdx, Time, MINUTES_A_DAY, SCHEDULE_OFFSET_DAYS};

/// One service contributing to a section. Rule-based merges hand in several
/// participants per section; the plain path always hands in exactly one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Participant<'a> {
    pub(crate) service: &'a input::Service,
    pub(crate) utc_times: &'a [Time],
    pub(crate) section_idx: usize,
}

impl<'a> Participant<'a> {
    pub(crate) fn new(
        service: &'a input::Service,
        utc_times: &'a [Time],
        section_idx: usize,
    ) -> Self {
        Self {
            service,
            utc_times,
            section_idx,
        }
    }
}

impl GraphBuilder {
    /// Emit the light connection of one section on one time pattern : fold
    /// the relative-UTC events to minutes of the departure day, intern the
    /// metadata, and shift the pattern's operating days by the section's
    /// day offset.
    pub(crate) fn section_to_connection(
        &mut self,
        participants: &[Participant<'_>],
        traffic_days: &Bitfield,
        trips_idx: MergedTripsIdx,
        route_path: &input::RoutePath,
    ) -> Result<LightConnection, BuildError> {
        let reference = &participants[0];
        let section_idx = reference.section_idx;
        let service = reference.service;

        let rel_utc_dep = reference.utc_times[section_idx * 2];
        let rel_utc_arr = reference.utc_times[section_idx * 2 + 1];

        let day_offset = rel_utc_dep.day();
        let utc_mam_dep = rel_utc_dep.mam();
        let utc_mam_arr = utc_mam_dep + (rel_utc_arr - rel_utc_dep).total_minutes();

        if utc_mam_dep > utc_mam_arr {
            return Err(BuildError::DepartureAfterArrival {
                departure: utc_mam_dep as u16,
                arrival: utc_mam_arr as u16,
            });
        }

        let section = &service.sections[section_idx];

        let clasz = self
            .sched
            .classes
            .get(&section.category.name)
            .copied()
            .unwrap_or(ServiceClass::Other);

        let (from_coord, to_coord) = {
            let from =
                &self.sched.stations[self.station_idx(route_path.stations[section_idx]).get()];
            let to = &self.sched.stations
                [self.station_idx(route_path.stations[section_idx + 1]).get()];
            (
                Coord {
                    lat: from.lat,
                    lng: from.lng,
                },
                Coord {
                    lat: to.lat,
                    lng: to.lng,
                },
            )
        };
        let price =
            (distance_in_km(&from_coord, &to_coord) * f64::from(price_per_km(clasz))) as u16;

        let track_day_base = std::cmp::max(0, self.first_day - SCHEDULE_OFFSET_DAYS);
        let (d_track, a_track) = if service.tracks.is_empty() {
            (crate::graph::TrackIdx::new(0), crate::graph::TrackIdx::new(0))
        } else {
            let dep_shift =
                track_day_base + service.times[section_idx * 2 + 1] / MINUTES_A_DAY;
            let arr_shift =
                track_day_base + service.times[section_idx * 2 + 2] / MINUTES_A_DAY;
            (
                self.get_or_create_track(&service.tracks[section_idx].dep_tracks, dep_shift),
                self.get_or_create_track(&service.tracks[section_idx + 1].arr_tracks, arr_shift),
            )
        };

        let con_info = self.get_or_create_connection_info(participants);

        let full_con = self.set_get_or_create_full_connection(FullConnection {
            clasz,
            price,
            d_track,
            a_track,
            con_info,
        });

        let traffic_days_idx =
            self.store_bitfield(traffic_days.shifted_left(day_offset as usize));

        Ok(LightConnection {
            d_time: utc_mam_dep as u16,
            a_time: utc_mam_arr as u16,
            full_con,
            traffic_days: traffic_days_idx,
            trips: trips_idx,
        })
    }

    /// Intern the connection infos of all participants of a section,
    /// chained from last to first through `merged_with`.
    fn get_or_create_connection_info(
        &mut self,
        participants: &[Participant<'_>],
    ) -> ConInfoIdx {
        let mut prev_con_info: Option<ConInfoIdx> = None;
        for participant in participants.iter().rev() {
            let section = &participant.service.sections[participant.section_idx];
            prev_con_info = Some(self.section_connection_info(section, prev_con_info));
        }
        // participants is never empty
        prev_con_info.expect("section without participants")
    }

    fn section_connection_info(
        &mut self,
        section: &input::Section,
        merged_with: Option<ConInfoIdx>,
    ) -> ConInfoIdx {
        let category = self.get_or_create_category(&section.category);
        let dir = section
            .direction
            .as_ref()
            .map(|direction| self.get_or_create_direction(direction));
        let provider = section
            .provider
            .as_ref()
            .map(|provider| self.get_or_create_provider(provider));
        let attributes = section
            .attributes
            .iter()
            .map(|attribute| TrafficDayAttribute {
                traffic_days: self.get_or_create_bitfield_idx(&attribute.traffic_days, 0),
                attribute: self.get_or_create_attribute(&attribute.code, &attribute.text),
            })
            .collect();

        self.set_get_or_create_con_info(ConnectionInfo {
            line_id: section.line_id.clone(),
            train_nr: section.train_nr,
            category,
            dir,
            provider,
            merged_with,
            attributes,
        })
    }
}

/// Per-section departure day offsets of a normalized time pattern.
pub(crate) fn day_offsets(rel_utc_times: &[Time]) -> Vec<DayIdx> {
    (0..rel_utc_times.len() / 2)
        .map(|section_idx| rel_utc_times[section_idx * 2].day())
        .collect()
}
