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

use super::{StationIdx, StringIdx, TripEdgesIdx};
use crate::time::DayIdx;
use serde::{Deserialize, Serialize};

/// The key under which a trip can be looked up. Several primaries may point
/// to the same trip when its train number changes along the way.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PrimaryTripId {
    pub station: StationIdx,
    pub train_nr: u32,
    /// First departure, minutes after midnight UTC.
    pub first_departure_mam: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryTripId {
    pub target_station: StationIdx,
    /// Last arrival, minutes after midnight UTC on the departure day.
    pub last_arrival_mam: u16,
    pub line_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTripId {
    pub primary: PrimaryTripId,
    pub secondary: SecondaryTripId,
}

/// One registered service instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripInfo {
    pub id: FullTripId,
    /// The route edges this trip runs on, backfilled once its route is
    /// sealed.
    pub edges: Option<TripEdgesIdx>,
    /// The position of this trip inside the connection vector of each of
    /// its route edges.
    pub lcon_idx: u32,
    /// For each section, the day offset of its departure relative to the
    /// trip's first departure day.
    pub day_offsets: Vec<DayIdx>,
    pub debug: TripDebug,
}

/// Where the trip came from in the source feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TripDebug {
    pub file: Option<StringIdx>,
    pub line_from: u32,
    pub line_to: u32,
    pub seq_numbers: Vec<u32>,
}
