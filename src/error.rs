use std::fmt::{Display, Formatter};

/// Conditions that abort construction. Per-service and per-day problems are
/// not listed here : those are logged and recovered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No input schedule was supplied.
    NoSchedules,
    /// Several feeds were supplied but their dataset prefixes are missing
    /// or not pairwise distinct.
    NonUniquePrefixes,
    /// The requested horizon does not fit the bitfield width.
    TooManyDays { nb_of_days: u16 },
    /// A just-built connection departs after it arrives.
    DepartureAfterArrival { departure: u16, arrival: u16 },
    /// After construction, some trips were never attached to route edges.
    MissingTripEdges { nb_of_trips: usize },
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::NoSchedules => write!(f, "no schedule to build a graph from"),
            BuildError::NonUniquePrefixes => {
                write!(f, "some dataset prefixes are missing or non-unique")
            }
            BuildError::TooManyDays { nb_of_days } => write!(
                f,
                "the horizon spans {} days which is more than the maximum allowed",
                nb_of_days
            ),
            BuildError::DepartureAfterArrival { departure, arrival } => write!(
                f,
                "departure ({}) must be before arrival ({})",
                departure, arrival
            ),
            BuildError::MissingTripEdges { nb_of_trips } => {
                write!(f, "{} trips have no route edges", nb_of_trips)
            }
        }
    }
}

impl std::error::Error for BuildError {}
