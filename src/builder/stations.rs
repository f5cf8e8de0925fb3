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
use crate::graph::{Station, StationIdx, StationNode};
use crate::input;
use crate::time::Timezone;
use std::collections::HashMap;

impl GraphBuilder {
    /// Create one graph station (and its station node) per input station
    /// of every feed, and link cross-feed equivalences : two stations are
    /// equivalent when they share their raw identifier but come from
    /// different feeds.
    pub(crate) fn build_stations(&mut self, schedules: &[input::Schedule]) {
        let nb_of_days = self.sched.calendar.nb_of_days();

        // raw (unprefixed) identifier to the stations already built for it
        let mut by_raw_id: HashMap<String, Vec<StationIdx>> = HashMap::new();

        for (feed_idx, schedule) in schedules.iter().enumerate() {
            let prefix = self.sched.prefixes[feed_idx].clone();
            let mut translation = HashMap::new();

            for (input_idx, input_station) in schedule.stations.iter() {
                let index = StationIdx::new(self.sched.stations.len());

                let timez = input_station
                    .timezone
                    .as_ref()
                    .map(|spec| Timezone::from_spec(spec, nb_of_days))
                    .unwrap_or_default();

                let track_to_platform = if self.use_platforms {
                    track_to_platform(&input_station.platforms)
                } else {
                    Vec::new()
                };

                self.sched.stations.push(Station {
                    id: format!("{}{}", prefix, input_station.id),
                    name: input_station.name.clone(),
                    index,
                    source_schedule: feed_idx,
                    lat: input_station.lat,
                    lng: input_station.lng,
                    transfer_time: input_station.transfer_time,
                    platform_transfer_time: input_station.platform_transfer_time,
                    timez,
                    equivalent: Vec::new(),
                    track_to_platform,
                    local: input_station.local,
                });
                self.sched.station_nodes.push(StationNode::default());
                translation.insert(input_idx, index);

                let siblings = by_raw_id
                    .entry(input_station.id.clone())
                    .or_insert_with(Vec::new);
                for sibling in siblings.iter() {
                    self.sched.stations[sibling.get()].equivalent.push(index);
                    self.sched.stations[index.get()].equivalent.push(*sibling);
                }
                siblings.push(index);
            }

            self.station_translations.push(translation);
        }
    }
}

fn track_to_platform(platforms: &[input::Platform]) -> Vec<(String, u16)> {
    let mut result = Vec::new();
    for (platform_idx, platform) in platforms.iter().enumerate() {
        for track in &platform.tracks {
            result.push((track.clone(), (platform_idx + 1) as u16));
        }
    }
    result
}
