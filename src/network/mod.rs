use std::{borrow::Borrow, collections::HashMap, fmt, time::Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{error::NetworkError, network::adapters::NetworkAdapter};

pub mod adapters;

pub type Minutes = u32;

/// Cumulative travel time along a path. Wider than [`Minutes`] so sums of
/// large connection times cannot overflow.
pub type TotalMinutes = u64;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighbour {
    pub station: StationId,
    pub minutes: Minutes,
}

#[derive(Clone, Debug)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub line: String,
    neighbours: Vec<Neighbour>,
}

impl Station {
    fn new(id: StationId, name: String, line: String) -> Self {
        Self {
            id,
            name,
            line,
            neighbours: vec![],
        }
    }

    /// Adjacent stations in the order their connections were added.
    pub fn neighbours(&self) -> &[Neighbour] {
        &self.neighbours
    }
}

/// An undirected edge exactly as it was passed to [`Network::add_connection`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from: StationId,
    pub to: StationId,
    pub minutes: Minutes,
}

#[derive(Clone, Debug)]
pub struct Line {
    pub name: String,
    pub stations: Vec<StationId>,
}

/// Stations, lines and the connections between them.
///
/// Built once through [`Network::add_station`] and [`Network::add_connection`]
/// (or [`Network::from_adapter`]) and only read afterwards, so a finished
/// network can be shared freely between concurrent queries.
#[derive(Clone, Debug, Default)]
pub struct Network {
    stations: HashMap<StationId, Station>,
    registration_order: Vec<StationId>,
    lines: Vec<Line>,
    line_index: HashMap<String, usize>,
    connections: Vec<Connection>,
}

impl Network {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_adapter<A>(adapter: &A) -> Result<Self, A::Error>
    where
        A: NetworkAdapter,
        A::Error: From<NetworkError>,
    {
        let now = Instant::now();
        let mut network = Self::new();

        for s in adapter.stations()? {
            network.add_station(s.id, s.name, s.line);
        }

        // line order first, then transfers, so same-line neighbours win ties
        for c in adapter.connections()?.into_iter().chain(adapter.transfers()?) {
            network.add_connection(c.from.as_str(), c.to.as_str(), c.minutes)?;
        }

        info!(
            stations = network.stations.len(),
            lines = network.lines.len(),
            connections = network.connections.len(),
            "Built network in {:?}",
            now.elapsed()
        );

        Ok(network)
    }

    /// Registers a station. Re-adding a known id is a no-op and keeps the
    /// original name and line.
    pub fn add_station(
        &mut self,
        id: impl Into<StationId>,
        name: impl Into<String>,
        line: impl Into<String>,
    ) {
        let id = id.into();
        if self.stations.contains_key(&id) {
            debug!(%id, "Station already registered, ignoring");
            return;
        }

        let line = line.into();
        let idx = match self.line_index.get(&line) {
            Some(&idx) => idx,
            None => {
                self.lines.push(Line {
                    name: line.clone(),
                    stations: vec![],
                });
                self.line_index.insert(line.clone(), self.lines.len() - 1);
                self.lines.len() - 1
            }
        };

        self.lines[idx].stations.push(id.clone());
        self.registration_order.push(id.clone());
        self.stations.insert(id.clone(), Station::new(id, name.into(), line));
    }

    pub fn add_connection(
        &mut self,
        from: &str,
        to: &str,
        minutes: i64,
    ) -> Result<(), NetworkError> {
        let from_id = self.station(from)?.id.clone();
        let to_id = self.station(to)?.id.clone();

        let weight = Minutes::try_from(minutes)
            .ok()
            .filter(|&m| m > 0)
            .ok_or_else(|| NetworkError::InvalidWeight {
                from: from.to_owned(),
                to: to.to_owned(),
                minutes,
            })?;

        self.station_mut(&from_id).neighbours.push(Neighbour {
            station: to_id.clone(),
            minutes: weight,
        });
        self.station_mut(&to_id).neighbours.push(Neighbour {
            station: from_id.clone(),
            minutes: weight,
        });

        self.connections.push(Connection {
            from: from_id,
            to: to_id,
            minutes: weight,
        });

        Ok(())
    }

    pub fn station(&self, id: &str) -> Result<&Station, NetworkError> {
        self.get(id)
            .ok_or_else(|| NetworkError::UnknownStation(id.to_owned()))
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stations.contains_key(id)
    }

    /// First registered station carrying `name`. Interchanges appear once per
    /// line, so use [`Network::stations_named`] to see all of them.
    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        self.stations().find(|s| s.name == name)
    }

    pub fn stations_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Station> {
        self.stations().filter(move |s| s.name == name)
    }

    /// Looks `query` up as a station id first and as a display name second.
    pub fn resolve(&self, query: &str) -> Result<&Station, NetworkError> {
        self.get(query)
            .or_else(|| self.station_by_name(query))
            .ok_or_else(|| NetworkError::UnknownStation(query.to_owned()))
    }

    /// All stations in registration order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.registration_order.iter().map(|id| &self.stations[id])
    }

    /// Every undirected edge once, in the order it was added.
    pub fn edges(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn line(&self, name: &str) -> Option<&Line> {
        self.line_index.get(name).map(|&idx| &self.lines[idx])
    }

    pub fn neighbours(&self, id: &str) -> &[Neighbour] {
        match self.stations.get(id) {
            Some(station) => station.neighbours(),
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    fn station_mut(&mut self, id: &StationId) -> &mut Station {
        self.stations
            .get_mut(id)
            .expect("Station ids are checked before mutation")
    }
}
