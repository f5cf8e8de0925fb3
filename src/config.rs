use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use structopt::StructOpt;

/// Options honored by the graph builder.
#[derive(Debug, Clone, Serialize, Deserialize, StructOpt)]
#[structopt(rename_all = "snake_case")]
pub struct LoaderOptions {
    /// first day of the schedule horizon (iso date)
    #[structopt(long, default_value = "2020-01-01")]
    pub schedule_begin: NaiveDate,

    /// number of days in the schedule horizon
    #[structopt(long, default_value = "365")]
    #[serde(default = "default_num_days")]
    pub num_days: u16,

    /// leave rule-participating services to the rule-service builder
    #[structopt(long)]
    #[serde(default)]
    pub apply_rules: bool,

    /// additionally register every concrete trip in a per-route index
    #[structopt(long)]
    #[serde(default)]
    pub expand_trips: bool,

    /// drop routes calling at stations classified as local transport
    #[structopt(long)]
    #[serde(default)]
    pub no_local_transport: bool,

    /// build track-to-platform tables and platform enter/exit edges
    #[structopt(long)]
    #[serde(default)]
    pub use_platforms: bool,

    /// skip operating days whose local times cannot be repaired; when
    /// false, such days are kept under an empty diagnostic pattern instead
    #[structopt(long, parse(try_from_str), default_value = "true")]
    #[serde(default = "default_skip_invalid")]
    pub skip_invalid: bool,

    /// per-feed prefix prepended to identifiers; required and pairwise
    /// distinct when several feeds are loaded
    #[structopt(long)]
    #[serde(default)]
    pub dataset_prefix: Vec<String>,
}

pub fn default_num_days() -> u16 {
    365
}

pub fn default_skip_invalid() -> bool {
    true
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            schedule_begin: NaiveDate::from_ymd(2020, 1, 1),
            num_days: default_num_days(),
            apply_rules: false,
            expand_trips: false,
            no_local_transport: false,
            use_platforms: false,
            skip_invalid: default_skip_invalid(),
            dataset_prefix: Vec::new(),
        }
    }
}

impl LoaderOptions {
    /// The horizon `[first_date, last_date]`, both included.
    pub fn interval(&self) -> (NaiveDate, NaiveDate) {
        let last =
            self.schedule_begin + chrono::Duration::days(i64::from(self.num_days.max(1)) - 1);
        (self.schedule_begin, last)
    }
}

/// Receives coarse progress updates from the orchestrator. Updates are
/// idempotent : the same state may be reported twice.
pub trait ProgressObserver {
    fn status(&mut self, _stage: &str) {}
    fn update(&mut self, _done: usize, _total: usize) {}
}

/// The default observer : reports nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}
