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

use super::{DayIdx, MAX_DAYS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// The day horizon of a schedule : a contiguous range of dates, addressed by
/// their offset to `first_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    first_date: NaiveDate, // first date which may be allowed
    last_date: NaiveDate,  // last date (included) which may be allowed
    nb_of_days: u16,       // == (last_date - first_date).num_days() + 1
}

impl Calendar {
    pub fn new(first_date: NaiveDate, last_date: NaiveDate) -> Self {
        assert!(first_date <= last_date);
        let nb_of_days_i64: i64 = (last_date - first_date).num_days() + 1;
        assert!(
            nb_of_days_i64 <= MAX_DAYS as i64,
            "Trying to construct a calendar with {:#} days \
            which is more than the maximum allowed of {:#} days",
            nb_of_days_i64,
            MAX_DAYS
        );

        // unwrap here is safe because :
        // - nb_of_days_i64 >= 1 since we asserted above that first_date <= last_date
        // - nb_of_days_i64 <= MAX_DAYS < u16::MAX
        let nb_of_days: u16 = TryFrom::try_from(nb_of_days_i64).unwrap();

        Self {
            first_date,
            last_date,
            nb_of_days,
        }
    }

    pub fn nb_of_days(&self) -> u16 {
        self.nb_of_days
    }

    pub fn first_date(&self) -> &NaiveDate {
        &self.first_date
    }

    pub fn last_date(&self) -> &NaiveDate {
        &self.last_date
    }

    pub fn contains_date(&self, date: &NaiveDate) -> bool {
        self.first_date <= *date && *date <= self.last_date
    }

    pub fn to_naive_date(&self, day: DayIdx) -> NaiveDate {
        self.first_date + chrono::Duration::days(i64::from(day))
    }

    pub fn date_to_offset(&self, date: &NaiveDate) -> Option<u16> {
        if *date < self.first_date || *date > self.last_date {
            None
        } else {
            let offset_64: i64 = (*date - self.first_date).num_days();
            // should be safe because :
            //  - we check that offset_64 is positive above when testing if date < self.first_date
            //  - we check that offset_64 is smaller than u16::MAX because at construction
            //    we ensure that (last_date - first_date).num_days() < u16::MAX
            //    and we check above that date <= self.last_date
            let offset = offset_64 as u16;
            Some(offset)
        }
    }

    /// Clip a feed validity period onto this calendar.
    /// Returns the first and last day (inclusive) on which the feed may
    /// contribute, or `None` if the two periods are disjoint.
    pub fn first_last_days(
        &self,
        start_date: &NaiveDate,
        end_date: &NaiveDate,
    ) -> Option<(DayIdx, DayIdx)> {
        if *end_date < self.first_date || *start_date > self.last_date {
            return None;
        }
        let first = std::cmp::max(0, (*start_date - self.first_date).num_days()) as DayIdx;
        let last = std::cmp::min(
            i64::from(self.nb_of_days) - 1,
            (*end_date - self.first_date).num_days(),
        ) as DayIdx;
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn offsets_roundtrip() {
        let calendar = Calendar::new(date("2020-01-01"), date("2020-01-31"));
        assert_eq!(calendar.nb_of_days(), 31);
        assert_eq!(calendar.date_to_offset(&date("2020-01-05")), Some(4));
        assert_eq!(calendar.to_naive_date(4), date("2020-01-05"));
        assert_eq!(calendar.date_to_offset(&date("2020-02-01")), None);
    }

    #[test]
    fn feed_period_is_clipped() {
        let calendar = Calendar::new(date("2020-01-10"), date("2020-01-20"));
        assert_eq!(
            calendar.first_last_days(&date("2020-01-01"), &date("2020-01-15")),
            Some((0, 5))
        );
        assert_eq!(
            calendar.first_last_days(&date("2020-01-12"), &date("2020-02-15")),
            Some((2, 10))
        );
        assert_eq!(
            calendar.first_last_days(&date("2020-02-01"), &date("2020-02-15")),
            None
        );
    }
}
