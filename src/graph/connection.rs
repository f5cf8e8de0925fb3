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

use super::{
    AttributeIdx, BitfieldIdx, CategoryIdx, ConInfoIdx, DirectionIdx, FullConIdx, MergedTripsIdx,
    ProviderIdx, StationIdx, StringIdx, TrackIdx,
};
use crate::classes::ServiceClass;
use serde::{Deserialize, Serialize};

/// The compact per-section record stored on a route edge.
///
/// Departure and arrival are minutes after midnight UTC on the day of the
/// departure; an arrival past midnight simply exceeds 1440. The operating
/// days are carried entirely by the referenced bitfield, whose bit `d` is
/// set iff this connection departs on day `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightConnection {
    pub d_time: u16,
    pub a_time: u16,
    pub full_con: FullConIdx,
    pub traffic_days: BitfieldIdx,
    pub trips: MergedTripsIdx,
}

/// Metadata shared by many light connections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FullConnection {
    pub clasz: ServiceClass,
    pub price: u16,
    pub d_track: TrackIdx,
    pub a_track: TrackIdx,
    pub con_info: ConInfoIdx,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub line_id: String,
    pub train_nr: u32,
    pub category: CategoryIdx,
    pub dir: Option<DirectionIdx>,
    pub provider: Option<ProviderIdx>,
    /// Next info in the chain of services merged onto this section.
    pub merged_with: Option<ConInfoIdx>,
    pub attributes: Vec<TrafficDayAttribute>,
}

/// An attribute valid on a subset of the operating days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrafficDayAttribute {
    pub traffic_days: BitfieldIdx,
    pub attribute: AttributeIdx,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub code: String,
    pub text: String,
}

/// Where a service is headed, for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Station(StationIdx),
    Text(StringIdx),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provider {
    pub short_name: String,
    pub long_name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub output_rule: u8,
}

/// Per-day track assignments for one event of one section : each entry
/// names the track used on the days of its bitfield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrackInfo {
    pub entries: Vec<(BitfieldIdx, StringIdx)>,
}
