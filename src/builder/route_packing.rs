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

use crate::graph::LightConnection;

/// The aggregation state of one alternate route : per packed service
/// pattern, the stop-aligned string of light connections (one per section).
///
/// Inserting keeps every section's connection vector ordered by
/// `(departure, arrival)`, and keeps the strings parallel : column `j`
/// across all sections belongs to one service pattern.
#[derive(Debug)]
pub(crate) struct RouteT {
    pub(crate) lcon_strings: Vec<Vec<LightConnection>>,
}

impl RouteT {
    pub(crate) fn new(lcons: Vec<LightConnection>) -> Self {
        Self {
            lcon_strings: vec![lcons],
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lcon_strings.is_empty() || self.lcon_strings[0].is_empty()
    }

    pub(crate) fn nb_of_sections(&self) -> usize {
        self.lcon_strings.first().map_or(0, Vec::len)
    }

    /// Try to insert a new service pattern. The insertion position is
    /// derived from the first section; the insertion succeeds only if that
    /// position preserves the `(departure, arrival)` order on every
    /// section. Returns `false` when the pattern cannot be packed here.
    pub(crate) fn add_service(&mut self, lcons: &[LightConnection]) -> bool {
        debug_assert!(lcons.len() == self.nb_of_sections());

        let nb_of_patterns = self.lcon_strings.len();
        let insert_idx = self
            .lcon_strings
            .iter()
            .position(|existing| !departs_and_arrives_before(&existing[0], &lcons[0]))
            .unwrap_or(nb_of_patterns);

        for section_idx in 0..lcons.len() {
            if insert_idx > 0
                && !departs_and_arrives_before(
                    &self.lcon_strings[insert_idx - 1][section_idx],
                    &lcons[section_idx],
                )
            {
                return false;
            }
            if insert_idx < nb_of_patterns
                && !departs_and_arrives_before(
                    &lcons[section_idx],
                    &self.lcon_strings[insert_idx][section_idx],
                )
            {
                return false;
            }
        }

        self.lcon_strings.insert(insert_idx, lcons.to_vec());
        true
    }
}

/// Pack a pattern onto the first alternate route that accepts it, opening a
/// new alternate when none does.
pub(crate) fn add_to_routes(alt_routes: &mut Vec<RouteT>, lcons: Vec<LightConnection>) {
    for route in alt_routes.iter_mut() {
        if route.add_service(&lcons) {
            return;
        }
    }
    alt_routes.push(RouteT::new(lcons));
}

/// Componentwise comparison : `lhs` neither departs nor arrives after
/// `rhs`. Two connections may be incomparable (one overtakes the other).
fn departs_and_arrives_before(lhs: &LightConnection, rhs: &LightConnection) -> bool {
    lhs.d_time <= rhs.d_time && lhs.a_time <= rhs.a_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BitfieldIdx, FullConIdx, MergedTripsIdx};

    fn lcon(d_time: u16, a_time: u16) -> LightConnection {
        LightConnection {
            d_time,
            a_time,
            full_con: FullConIdx::new(0),
            traffic_days: BitfieldIdx::new(0),
            trips: MergedTripsIdx::new(0),
        }
    }

    #[test]
    fn later_pattern_is_appended() {
        let mut route = RouteT::new(vec![lcon(600, 660), lcon(720, 780)]);
        assert!(route.add_service(&[lcon(610, 670), lcon(730, 790)]));
        assert_eq!(route.lcon_strings.len(), 2);
        assert_eq!(route.lcon_strings[0][0].d_time, 600);
        assert_eq!(route.lcon_strings[1][0].d_time, 610);
    }

    #[test]
    fn earlier_pattern_is_prepended() {
        let mut route = RouteT::new(vec![lcon(600, 660), lcon(720, 780)]);
        assert!(route.add_service(&[lcon(590, 650), lcon(710, 770)]));
        assert_eq!(route.lcon_strings[0][0].d_time, 590);
    }

    #[test]
    fn overtaking_pattern_is_rejected() {
        // departs later on the first section but arrives earlier on the
        // second : no insertion position preserves both orders
        let mut route = RouteT::new(vec![lcon(600, 650), lcon(655, 700)]);
        assert!(!route.add_service(&[lcon(605, 640), lcon(645, 695)]));
        assert_eq!(route.lcon_strings.len(), 1);
    }

    #[test]
    fn new_alternate_opens_on_rejection() {
        let mut alt_routes = Vec::new();
        add_to_routes(&mut alt_routes, vec![lcon(600, 650), lcon(655, 700)]);
        add_to_routes(&mut alt_routes, vec![lcon(605, 640), lcon(645, 695)]);
        assert_eq!(alt_routes.len(), 2);
    }
}
