use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("No such station {0:?}")]
    UnknownStation(String),

    #[error("Invalid travel time {minutes} between {from:?} and {to:?}, expected a positive number of minutes")]
    InvalidWeight {
        from: String,
        to: String,
        minutes: i64,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripError {
    #[error("Demand table references unknown station {0:?}")]
    UnknownStation(String),

    #[error("Demand table needs at least two stations with a positive weight, found {0}")]
    InsufficientDemand(usize),

    #[error(transparent)]
    Weights(#[from] rand::distributions::WeightedError),
}
