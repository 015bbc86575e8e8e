pub mod error;
pub mod logger;
pub mod network;
pub mod search;
pub mod server;
pub mod trips;

pub use error::{NetworkError, TripError};
pub use network::{Minutes, Network, Station, StationId, TotalMinutes};
pub use search::{Mode, Path, Route, TimedPath, fastest_route, fewest_stops};
pub use trips::{Demand, TripRecord, generate_trips};
