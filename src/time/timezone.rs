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

use super::{DayIdx, Time, MAX_DAYS, SCHEDULE_OFFSET_DAYS};
use crate::input::{SeasonSpec, TimezoneSpec};
use serde::{Deserialize, Serialize};

/// A station timezone : a fixed offset to UTC, plus at most one
/// daylight-saving season within the schedule horizon.
/// Offsets are minutes east of UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timezone {
    pub general_offset: i32,
    pub season: Option<Season>,
}

/// `begin` and `end` are absolute times on the internal UTC timeline :
/// `begin` is the instant the clocks jump forward, `end` the instant they
/// fall back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub offset: i32,
    pub begin: Time,
    pub end: Time,
}

impl Default for Timezone {
    fn default() -> Self {
        Self {
            general_offset: 0,
            season: None,
        }
    }
}

impl Timezone {
    /// Materialize a feed timezone description for a given horizon length.
    /// A season that does not intersect the horizon is dropped. Season
    /// boundaries are given as local minutes after midnight : the begin
    /// minute is read on the standard clock, the end minute on the
    /// daylight-saving clock.
    pub fn from_spec(spec: &TimezoneSpec, nb_of_days: u16) -> Self {
        let season = spec
            .season
            .as_ref()
            .and_then(|season| Self::build_season(season, spec.general_offset, nb_of_days));
        Self {
            general_offset: spec.general_offset,
            season,
        }
    }

    fn build_season(spec: &SeasonSpec, general_offset: i32, nb_of_days: u16) -> Option<Season> {
        if spec.last_day < 0 || spec.first_day >= i32::from(nb_of_days) {
            return None;
        }
        let begin = if spec.first_day >= 0 {
            Time::new(
                SCHEDULE_OFFSET_DAYS + spec.first_day,
                spec.begin_minute - general_offset,
            )
        } else {
            Time::new(0, 0)
        };
        let end = if spec.last_day < i32::from(nb_of_days) {
            Time::new(
                SCHEDULE_OFFSET_DAYS + spec.last_day,
                spec.end_minute - spec.offset,
            )
        } else {
            // open-ended : farther than any representable event
            Time::new(2 * DayIdx::from(MAX_DAYS), 0)
        };
        Some(Season {
            offset: spec.offset,
            begin,
            end,
        })
    }

    /// The offset to subtract from a local time at `(day, minute)`, and
    /// whether the daylight-saving season applies there.
    pub fn offset_at(&self, day: DayIdx, local_minute: i32) -> (i32, bool) {
        match &self.season {
            Some(season) => {
                let local_time = Time::new(day, local_minute);
                let in_season = season.begin + Duration(self.general_offset) <= local_time
                    && local_time <= season.end + Duration(season.offset);
                if in_season {
                    (season.offset, true)
                } else {
                    (self.general_offset, false)
                }
            }
            None => (self.general_offset, false),
        }
    }
}

// local helper so that season bounds can be compared in local clock terms
struct Duration(i32);

impl std::ops::Add<Duration> for Time {
    type Output = Time;

    fn add(self, rhs: Duration) -> Time {
        Time::from_minutes(self.total_minutes() + rhs.0)
    }
}
