use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, bail};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::network::{
    StationId,
    adapters::{ConnectionRecord, NetworkAdapter, StationRecord},
};

const REFERENCE_NETWORK: &str = include_str!("../../../data/ankara.json");

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDefinition {
    pub lines: Vec<LineDefinition>,
    #[serde(default)]
    pub transfers: Vec<TransferDefinition>,
    #[serde(default)]
    pub demand: Vec<DemandWeight>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDefinition {
    pub name: String,
    pub stations: Vec<StationDefinition>,
    /// Minutes between consecutive stations, one fewer than `stations`.
    pub travel_times: Vec<i64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StationDefinition {
    pub id: StationId,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TransferDefinition {
    pub from: StationId,
    pub to: StationId,
    pub minutes: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DemandWeight {
    pub station: StationId,
    pub weight: u32,
}

pub struct JsonAdapter {
    definition: NetworkDefinition,
}

impl JsonAdapter {
    pub fn new(definition: NetworkDefinition) -> Result<Self> {
        for line in &definition.lines {
            let expected = line.stations.len().saturating_sub(1);
            if line.travel_times.len() != expected {
                bail!(
                    "line {:?} has {} stations but {} travel times, expected {expected}",
                    line.name,
                    line.stations.len(),
                    line.travel_times.len(),
                );
            }
        }

        Ok(Self { definition })
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open network definition {}", path.display()))?;
        let definition: NetworkDefinition = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid network definition {}", path.display()))?;
        info!(path = %path.display(), lines = definition.lines.len(), "Read network definition");

        Self::new(definition)
    }

    /// The five-line Ankara network shipped with the binary.
    pub fn reference() -> Result<Self> {
        let definition: NetworkDefinition = serde_json::from_str(REFERENCE_NETWORK)
            .context("embedded reference network is not valid JSON")?;

        Self::new(definition)
    }

    pub fn demand(&self) -> Vec<(StationId, u32)> {
        self.definition
            .demand
            .iter()
            .map(|d| (d.station.clone(), d.weight))
            .collect()
    }
}

impl NetworkAdapter for JsonAdapter {
    type Error = anyhow::Error;

    fn stations(&self) -> Result<Vec<StationRecord>> {
        Ok(self
            .definition
            .lines
            .iter()
            .flat_map(|line| {
                line.stations.iter().map(|s| StationRecord {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    line: line.name.clone(),
                })
            })
            .collect())
    }

    fn connections(&self) -> Result<Vec<ConnectionRecord>> {
        let mut connections = vec![];

        for line in &self.definition.lines {
            for ((from, to), &minutes) in line
                .stations
                .iter()
                .tuple_windows()
                .zip(&line.travel_times)
            {
                connections.push(ConnectionRecord {
                    from: from.id.clone(),
                    to: to.id.clone(),
                    minutes,
                });
            }
        }

        Ok(connections)
    }

    fn transfers(&self) -> Result<Vec<ConnectionRecord>> {
        Ok(self
            .definition
            .transfers
            .iter()
            .map(|t| ConnectionRecord {
                from: t.from.clone(),
                to: t.to.clone(),
                minutes: t.minutes,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::NetworkError, network::Network};

    fn definition(json: &str) -> NetworkDefinition {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn reference_network_builds() {
        let adapter = JsonAdapter::reference().unwrap();
        let network = Network::from_adapter(&adapter).unwrap();

        assert_eq!(network.len(), 50);
        assert_eq!(network.lines().count(), 5);
        assert_eq!(network.edges().count(), 5 * 9 + 17);
        assert_eq!(adapter.demand().len(), 50);
        assert_eq!(network.station("K1").unwrap().name, "Kızılay");
        assert_eq!(network.line("Sarı Hat").unwrap().stations.len(), 10);
    }

    #[test]
    fn same_line_neighbours_precede_transfers() {
        let network = Network::from_adapter(&JsonAdapter::reference().unwrap()).unwrap();
        let k1: Vec<_> = network
            .neighbours("K1")
            .iter()
            .map(|n| n.station.as_str())
            .collect();
        assert_eq!(k1, ["K2", "Y1", "S10"]);
    }

    #[test]
    fn mismatched_travel_times_are_rejected() {
        let def = definition(
            r#"{"lines": [{"name": "A", "stations": [{"id": "A1", "name": "One"}, {"id": "A2", "name": "Two"}], "travelTimes": []}]}"#,
        );
        assert!(JsonAdapter::new(def).is_err());
    }

    #[test]
    fn transfer_to_unknown_station_aborts_build() {
        let def = definition(
            r#"{
                "lines": [{"name": "A", "stations": [{"id": "A1", "name": "One"}, {"id": "A2", "name": "Two"}], "travelTimes": [3]}],
                "transfers": [{"from": "A1", "to": "B1", "minutes": 2}]
            }"#,
        );
        let err = Network::from_adapter(&JsonAdapter::new(def).unwrap()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<NetworkError>(),
            Some(&NetworkError::UnknownStation("B1".to_owned()))
        );
    }

    #[test]
    fn zero_travel_time_aborts_build() {
        let def = definition(
            r#"{"lines": [{"name": "A", "stations": [{"id": "A1", "name": "One"}, {"id": "A2", "name": "Two"}], "travelTimes": [0]}]}"#,
        );
        let err = Network::from_adapter(&JsonAdapter::new(def).unwrap()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NetworkError>(),
            Some(NetworkError::InvalidWeight { minutes: 0, .. })
        ));
    }
}
