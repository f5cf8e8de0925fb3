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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Travel class of a connection, ordered roughly from fastest to slowest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ServiceClass {
    Air,
    HighSpeed,
    LongDistance,
    Coach,
    Night,
    RegionalExpress,
    Regional,
    Suburban,
    Subway,
    Tram,
    Bus,
    Ship,
    Other,
}

/// Category name to travel class. Unknown categories fall back to
/// [`ServiceClass::Other`] at lookup time.
pub fn class_mapping() -> HashMap<String, ServiceClass> {
    use ServiceClass::*;
    let entries: &[(&str, ServiceClass)] = &[
        ("Flug", Air),
        ("Air", Air),
        ("ICE", HighSpeed),
        ("TGV", HighSpeed),
        ("THA", HighSpeed),
        ("RJ", HighSpeed),
        ("RJX", HighSpeed),
        ("IC", LongDistance),
        ("EC", LongDistance),
        ("IR", LongDistance),
        ("D", LongDistance),
        ("Coach", Coach),
        ("EXB", Coach),
        ("FLX", Coach),
        ("N", Night),
        ("NJ", Night),
        ("CNL", Night),
        ("RE", RegionalExpress),
        ("REX", RegionalExpress),
        ("IRE", RegionalExpress),
        ("RB", Regional),
        ("R", Regional),
        ("DPN", Regional),
        ("S", Suburban),
        ("RER", Suburban),
        ("U", Subway),
        ("M", Subway),
        ("STR", Tram),
        ("Str", Tram),
        ("T", Tram),
        ("Bus", Bus),
        ("BUS", Bus),
        ("RUF", Bus),
        ("AST", Bus),
        ("Schiff", Ship),
        ("Fähre", Ship),
        ("F", Ship),
    ];
    entries
        .iter()
        .map(|(name, clasz)| ((*name).to_string(), *clasz))
        .collect()
}

/// Fare estimate per travelled kilometer, in cents.
pub fn price_per_km(clasz: ServiceClass) -> u32 {
    use ServiceClass::*;
    match clasz {
        Air => 75,
        HighSpeed => 27,
        LongDistance => 23,
        Coach => 10,
        Night => 25,
        RegionalExpress | Regional => 15,
        Suburban | Subway | Tram => 12,
        Bus => 10,
        Ship => 30,
        Other => 15,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_resolve() {
        let classes = class_mapping();
        assert_eq!(classes.get("ICE"), Some(&ServiceClass::HighSpeed));
        assert_eq!(classes.get("Bus"), Some(&ServiceClass::Bus));
        assert_eq!(classes.get("XYZ"), None);
    }
}
