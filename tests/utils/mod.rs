#![allow(dead_code)]

use std::collections::HashSet;

use metro_router::{
    Network, Path, StationId, logger,
    network::{Minutes, TotalMinutes, adapters::json::JsonAdapter},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Default)]
pub struct NetworkBuilder {
    network: Network,
}

impl NetworkBuilder {
    /// Registers `ids` on `name` and connects consecutive stations.
    pub fn line(mut self, name: &str, ids: &[&str], minutes: &[i64]) -> Self {
        assert_eq!(ids.len(), minutes.len() + 1, "one travel time per hop");
        for id in ids {
            self.network.add_station(*id, *id, name);
        }
        for (pair, &m) in ids.windows(2).zip(minutes) {
            self.network.add_connection(pair[0], pair[1], m).unwrap();
        }
        self
    }

    pub fn transfer(mut self, from: &str, to: &str, minutes: i64) -> Self {
        self.network.add_connection(from, to, minutes).unwrap();
        self
    }

    pub fn build(self) -> Network {
        self.network
    }
}

pub fn reference_network() -> (Network, JsonAdapter) {
    logger::init_test_logger();
    let adapter = JsonAdapter::reference().unwrap();
    let network = Network::from_adapter(&adapter).unwrap();
    (network, adapter)
}

pub fn ids(path: &Path) -> Vec<&str> {
    path.stations().iter().map(StationId::as_str).collect()
}

/// Station `N{i}` for every node, with each pair connected with probability
/// `density` and a travel time between 1 and 9 minutes.
pub fn random_network(seed: u64, nodes: usize, density: f64) -> Network {
    logger::init_test_logger();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut network = Network::new();
    let names: Vec<String> = (0..nodes).map(|i| format!("N{i}")).collect();

    for name in &names {
        network.add_station(name.as_str(), name.as_str(), "random");
    }
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            if rng.gen_bool(density) {
                network
                    .add_connection(a, b, rng.gen_range(1..10))
                    .unwrap();
            }
        }
    }

    network
}

/// Cheapest connection between two adjacent stations.
pub fn hop_minutes(network: &Network, from: &StationId, to: &StationId) -> Option<Minutes> {
    network
        .neighbours(from.as_str())
        .iter()
        .filter(|n| &n.station == to)
        .map(|n| n.minutes)
        .min()
}

pub fn path_minutes(network: &Network, path: &Path) -> TotalMinutes {
    path.stations()
        .windows(2)
        .map(|pair| hop_minutes(network, &pair[0], &pair[1]).expect("consecutive stations are adjacent"))
        .map(TotalMinutes::from)
        .sum()
}

/// Every simple path from `from` to `to` as `(hops, minutes)`, found by
/// exhaustive depth-first enumeration.
pub fn all_simple_paths(network: &Network, from: &str, to: &str) -> Vec<(usize, TotalMinutes)> {
    fn walk<'a>(
        network: &'a Network,
        current: &'a StationId,
        to: &str,
        seen: &mut HashSet<&'a StationId>,
        hops: usize,
        minutes: TotalMinutes,
        found: &mut Vec<(usize, TotalMinutes)>,
    ) {
        if current.as_str() == to {
            found.push((hops, minutes));
            return;
        }
        for n in network.neighbours(current.as_str()) {
            if seen.insert(&n.station) {
                let minutes = minutes + TotalMinutes::from(n.minutes);
                walk(network, &n.station, to, seen, hops + 1, minutes, found);
                seen.remove(&n.station);
            }
        }
    }

    let mut found = vec![];
    if let Some(start) = network.get(from) {
        let mut seen = HashSet::from([&start.id]);
        walk(network, &start.id, to, &mut seen, 0, 0, &mut found);
    }
    found
}
