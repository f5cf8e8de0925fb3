//! The normalized schedule handed over by the feed adapters (hrd, gtfs,
//! ...). This is the input contract of the graph builder : adapters fill
//! these collections, the builder consumes them read-only.
//!
//! Conventions :
//! - `times` of a service holds `2 * nb_of_stops` local minutes relative to
//!   the service's base day : `times[2k]` is the arrival at stop `k`,
//!   `times[2k + 1]` the departure; the very first arrival and the very
//!   last departure are phantoms and ignored.
//! - serialized traffic-day bitmaps are strings of `'0'`/`'1'`; character
//!   `d` covers the `d`-th day of the feed's validity period.
//! - timezone season days are counted from the first day of the schedule
//!   horizon.

use chrono::NaiveDate;
use typed_index_collection::{Collection, CollectionWithId, Id, Idx};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One parsed feed.
#[derive(Debug)]
pub struct Schedule {
    pub name: String,
    pub validity_period: ValidityPeriod,
    pub stations: CollectionWithId<Station>,
    pub route_paths: Collection<RoutePath>,
    pub services: Collection<Service>,
    pub rule_services: Vec<RuleService>,
    pub content_hash: u64,
}

#[derive(Debug, Clone)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Minutes needed to change vehicles within the station.
    pub transfer_time: i32,
    /// Minutes needed to leave or reach a platform.
    pub platform_transfer_time: i32,
    pub timezone: Option<TimezoneSpec>,
    pub platforms: Vec<Platform>,
    /// Classified as local transport.
    pub local: bool,
}

impl Id<Station> for Station {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Default for Station {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            lat: 0.0,
            lng: 0.0,
            transfer_time: 2,
            platform_transfer_time: 1,
            timezone: None,
            platforms: Vec::new(),
            local: false,
        }
    }
}

/// A named platform and the track names belonging to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub name: String,
    pub tracks: Vec<String>,
}

/// Offsets are minutes east of UTC. Season boundary minutes are local :
/// `begin_minute` on the standard clock, `end_minute` on the
/// daylight-saving clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneSpec {
    pub general_offset: i32,
    pub season: Option<SeasonSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonSpec {
    pub offset: i32,
    pub first_day: i32,
    pub last_day: i32,
    pub begin_minute: i32,
    pub end_minute: i32,
}

/// A physical stop sequence shared by one or more services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    pub stations: Vec<Idx<Station>>,
    pub in_allowed: Vec<bool>,
    pub out_allowed: Vec<bool>,
}

#[derive(Debug, Clone)]
pub struct Service {
    pub route_path: Idx<RoutePath>,
    /// One entry per pair of adjacent stops.
    pub sections: Vec<Section>,
    /// Local event minutes, see the module documentation.
    pub times: Vec<i32>,
    /// Serialized operating-day bitmap.
    pub traffic_days: String,
    /// Per-stop track assignments; empty when the feed has none.
    pub tracks: Vec<StopTracks>,
    pub trip_id: Option<String>,
    pub debug: Option<ServiceDebug>,
    pub seq_numbers: Vec<u32>,
    /// Train number under which the service was announced, when it differs
    /// from the first section's.
    pub initial_train_nr: u32,
    /// Participates in a rule-based merge; handled by the rule-service
    /// builder when rules are applied.
    pub rule_participant: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Section {
    pub train_nr: u32,
    pub line_id: String,
    pub category: CategorySpec,
    pub direction: Option<DirectionSpec>,
    pub provider: Option<ProviderSpec>,
    pub attributes: Vec<AttributeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub name: String,
    pub output_rule: u8,
}

impl Default for CategorySpec {
    fn default() -> Self {
        Self {
            name: "RB".to_string(),
            output_rule: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionSpec {
    Station(Idx<Station>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    pub short_name: String,
    pub long_name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    pub code: String,
    pub text: String,
    /// Days on which the attribute applies, serialized.
    pub traffic_days: String,
}

/// Track assignments around one stop : the tracks a service departs from
/// and the tracks it arrives at, each valid on the days of its bitmap.
#[derive(Debug, Clone, Default)]
pub struct StopTracks {
    pub dep_tracks: Vec<TrackRule>,
    pub arr_tracks: Vec<TrackRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRule {
    pub traffic_days: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDebug {
    pub file: String,
    pub line_from: u32,
    pub line_to: u32,
}

/// A rule-based grouping of services (through-services, merged wings...).
/// Consumed by the rule-service builder, opaque here.
#[derive(Debug, Clone)]
pub struct RuleService {
    pub services: Vec<Idx<Service>>,
}
