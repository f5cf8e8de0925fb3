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
use crate::graph::StationIdx;
use crate::input;
use crate::time::{DayIdx, Time, MAX_DAYS, MINUTES_A_DAY, SCHEDULE_OFFSET_DAYS};
use log::warn;
use std::cmp;
use std::collections::BTreeMap;

/// Certain feeds encode the daylight-saving switch by writing ambiguous
/// local times that only become valid one hour later; each retry shifts the
/// whole day by +60 minutes, at most this many times.
const MAX_FIX_OFFSET_RETRIES: u32 = 24;

/// The operating days that produced one relative-UTC time pattern.
#[derive(Debug, Clone)]
pub(crate) struct PatternTrafficDays {
    /// Day shift of the first departure relative to the operating day.
    pub(crate) shift: DayIdx,
    /// Operating days in feed-local day indexing.
    pub(crate) local_days: Bitfield,
    /// First-departure days in padded-horizon day indexing.
    pub(crate) horizon_days: Bitfield,
}

impl GraphBuilder {
    /// Fold a service's local times through the station timezones, once per
    /// operating day within the horizon. Days whose resulting relative-UTC
    /// sequence coincides are grouped into a single pattern.
    ///
    /// Returns `None` when the service never runs within the horizon. An
    /// irreparable day is skipped, or kept under the empty pattern when
    /// diagnostics are requested.
    pub(crate) fn service_times_to_utc(
        &self,
        traffic_days: &Bitfield,
        route_path: &input::RoutePath,
        service: &input::Service,
    ) -> Option<BTreeMap<Vec<Time>, PatternTrafficDays>> {
        let times = &service.times;
        debug_assert!(times.len() == 2 * route_path.stations.len());

        let day_offset = times[times.len() - 2] / MINUTES_A_DAY;
        let start_idx = cmp::max(0, self.first_day - day_offset);
        let end_idx = cmp::min(DayIdx::from(MAX_DAYS) - 1, self.last_day);

        if !has_traffic_within_timespan(traffic_days, start_idx, end_idx) {
            return None;
        }

        let stations: Vec<StationIdx> = route_path
            .stations
            .iter()
            .map(|station| self.station_idx(*station))
            .collect();

        let mut utc_times: BTreeMap<Vec<Time>, PatternTrafficDays> = BTreeMap::new();
        for day_idx in start_idx..=end_idx {
            if !traffic_days.test(day_idx as usize) {
                continue;
            }
            match self.utc_times_of_day(&stations, times, day_idx) {
                Ok((rel_utc_times, initial_day, initial_shift)) => {
                    let traffic = utc_times
                        .entry(rel_utc_times)
                        .or_insert_with(|| PatternTrafficDays {
                            shift: initial_shift,
                            local_days: Bitfield::empty(),
                            horizon_days: Bitfield::empty(),
                        });
                    traffic.shift = initial_shift;
                    traffic.horizon_days.set(initial_day as usize);
                    traffic.local_days.set(day_idx as usize);
                }
                Err((initial_day, initial_shift)) => {
                    warn!(
                        "service {} has an invalid local time sequence on day {} \
                         that could not be repaired",
                        describe(service),
                        day_idx
                    );
                    if self.skip_invalid {
                        continue;
                    }
                    // diagnostic mode : keep the day under the empty pattern
                    let traffic = utc_times
                        .entry(Vec::new())
                        .or_insert_with(|| PatternTrafficDays {
                            shift: initial_shift,
                            local_days: Bitfield::empty(),
                            horizon_days: Bitfield::empty(),
                        });
                    traffic.shift = initial_shift;
                    if initial_day >= 0 {
                        traffic.horizon_days.set(initial_day as usize);
                    }
                    traffic.local_days.set(day_idx as usize);
                }
            }
        }
        Some(utc_times)
    }

    /// Normalize one operating day. On success, returns the relative-UTC
    /// event sequence together with the padded-horizon day and shift of the
    /// first departure.
    fn utc_times_of_day(
        &self,
        stations: &[StationIdx],
        times: &[i32],
        day_idx: DayIdx,
    ) -> Result<(Vec<Time>, DayIdx, DayIdx), (DayIdx, DayIdx)> {
        let mut fix_offset = 0;
        let mut initial_day: DayIdx = 0;
        let mut initial_shift: DayIdx = 0;

        'retry: for _ in 0..=MAX_FIX_OFFSET_RETRIES {
            let mut rel_utc_times: Vec<Time> = Vec::with_capacity(times.len() - 2);
            initial_day = 0;
            initial_shift = 0;

            // the service's outer phantom events are skipped
            for i in 1..times.len() - 1 {
                let station = &self.sched.stations[stations[i / 2].get()];

                let time_with_fix = times[i] + fix_offset;
                let local_minute = time_with_fix.rem_euclid(MINUTES_A_DAY);
                let day_offset = time_with_fix.div_euclid(MINUTES_A_DAY);
                let mut shift = day_offset - self.first_day + SCHEDULE_OFFSET_DAYS;
                let mut adj_day_idx = day_idx + shift;

                let (offset, is_season) = station.timez.offset_at(adj_day_idx, local_minute);
                let mut utc_minute = local_minute - offset;
                if utc_minute < 0 {
                    utc_minute += MINUTES_A_DAY;
                    adj_day_idx -= 1;
                    shift -= 1;
                }

                if i == 1 {
                    initial_shift = shift;
                    initial_day = adj_day_idx;
                }

                let abs_utc = Time::new(adj_day_idx, utc_minute);
                let rel_utc = abs_utc - Time::new(initial_day, 0);

                let sort_ok = i == 1 || rel_utc_times[i - 2] <= rel_utc;
                let impossible_time = is_season
                    && station
                        .timez
                        .season
                        .as_ref()
                        .map_or(false, |season| abs_utc < season.begin);
                if !sort_ok || impossible_time {
                    log::debug!(
                        "invalid local time sequence: stop_idx={}, sort_ok={}, \
                         impossible_time={}, retrying with offset={}",
                        i / 2,
                        sort_ok,
                        impossible_time,
                        fix_offset + 60
                    );
                    fix_offset += 60;
                    continue 'retry;
                }

                rel_utc_times.push(rel_utc);
            }
            return Ok((rel_utc_times, initial_day, initial_shift));
        }
        Err((initial_day, initial_shift))
    }
}

fn has_traffic_within_timespan(
    traffic_days: &Bitfield,
    start_idx: DayIdx,
    end_idx: DayIdx,
) -> bool {
    (start_idx..=end_idx).any(|day_idx| traffic_days.test(day_idx as usize))
}

fn describe(service: &input::Service) -> String {
    match &service.debug {
        Some(debug) => format!("{}:{}", debug.file, debug.line_from),
        None => "?".to_string(),
    }
}
