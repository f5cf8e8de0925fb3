pub mod bitfields;
pub mod classes;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod input;
pub mod modelbuilder;
pub mod time;

mod builder;

pub use builder::build_graph;
pub use config::{LoaderOptions, NoProgress, ProgressObserver};
pub use error::BuildError;
pub use graph::Schedule;
pub use time::{Time, MAX_DAYS, MINUTES_A_DAY, SCHEDULE_OFFSET_DAYS, SCHEDULE_OFFSET_MINUTES};

pub use chrono;
pub use log;
pub use typed_index_collection;
