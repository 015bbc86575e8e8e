pub mod json;

use crate::network::StationId;

#[derive(Clone, Debug)]
pub struct StationRecord {
    pub id: StationId,
    pub name: String,
    pub line: String,
}

#[derive(Clone, Debug)]
pub struct ConnectionRecord {
    pub from: StationId,
    pub to: StationId,
    pub minutes: i64,
}

pub trait NetworkAdapter {
    type Error;

    /// Returns stations grouped by line, each line in travel order.
    fn stations(&self) -> Result<Vec<StationRecord>, Self::Error>;

    /// Returns consecutive same-line pairs, line by line, in travel order.
    fn connections(&self) -> Result<Vec<ConnectionRecord>, Self::Error>;

    /// Returns interchange links between stations on different lines.
    fn transfers(&self) -> Result<Vec<ConnectionRecord>, Self::Error>;
}
