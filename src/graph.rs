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

//! The sealed journey graph : station nodes, route nodes and route edges
//! carrying light connections, plus the interned pools they reference.
//! Everything is addressed by typed indices into the owning [`Schedule`]
//! aggregate; no entity is mutated once construction has finished.

pub mod connection;
pub mod nodes;
pub mod schedule;
pub mod trip;

pub use connection::{
    Attribute, Category, ConnectionInfo, Direction, FullConnection, LightConnection, Provider,
    TrackInfo, TrafficDayAttribute,
};
pub use nodes::{EdgeRef, FootEdge, PlatformNode, RouteEdge, RouteNode, Station, StationNode};
pub use schedule::Schedule;
pub use trip::{FullTripId, PrimaryTripId, SecondaryTripId, TripDebug, TripInfo};

use serde::{Deserialize, Serialize};

macro_rules! index_types {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
                Serialize, Deserialize,
            )]
            pub struct $name(u32);

            impl $name {
                pub fn new(idx: usize) -> Self {
                    Self(idx as u32)
                }

                pub fn get(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

index_types!(
    /// Index into [`Schedule::stations`] (and the parallel `station_nodes`).
    StationIdx,
    /// Index into [`Schedule::route_nodes`].
    RouteNodeIdx,
    /// Index into [`Schedule::platform_nodes`].
    PlatformNodeIdx,
    /// A route, in order of creation. Indexes
    /// [`Schedule::route_index_to_first_route_node`].
    RouteIdx,
    /// Index into the interned string pool [`Schedule::strings`].
    StringIdx,
    /// Index into [`Schedule::directions`].
    DirectionIdx,
    /// Index into [`Schedule::providers`].
    ProviderIdx,
    /// Index into [`Schedule::categories`].
    CategoryIdx,
    /// Index into [`Schedule::attributes`].
    AttributeIdx,
    /// Index into [`Schedule::connection_infos`].
    ConInfoIdx,
    /// Index into [`Schedule::full_connections`].
    FullConIdx,
    /// Index into the bitfield store.
    BitfieldIdx,
    /// Index into the track tables [`Schedule::tracks`]; 0 is "no track".
    TrackIdx,
    /// Index into [`Schedule::merged_trips`].
    MergedTripsIdx,
    /// Index into [`Schedule::trip_mem`].
    TripIdx,
    /// Index into [`Schedule::trip_edges`].
    TripEdgesIdx,
);
