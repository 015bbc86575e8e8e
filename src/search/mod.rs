use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::network::{Network, StationId, TotalMinutes};

mod fastest_route;
mod fewest_stops;

pub use fastest_route::fastest_route;
pub use fewest_stops::fewest_stops;

pub const NO_ROUTE: &str = "No route found";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Fewest stations passed, regardless of travel time
    FewestStops,
    /// Lowest total travel time
    Fastest,
}

/// Stations from origin to destination, both included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<StationId>);

impl Path {
    pub(crate) fn from_refs(stations: Vec<&StationId>) -> Self {
        Self(stations.into_iter().cloned().collect())
    }

    pub fn stations(&self) -> &[StationId] {
        &self.0
    }

    /// Number of connections travelled, one fewer than the number of stations.
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Option<&StationId> {
        self.0.first()
    }

    pub fn destination(&self) -> Option<&StationId> {
        self.0.last()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedPath {
    pub path: Path,
    pub minutes: TotalMinutes,
}

/// Result of either search. `minutes` is only set for [`Mode::Fastest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub mode: Mode,
    pub path: Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<TotalMinutes>,
}

impl From<Path> for Route {
    fn from(path: Path) -> Self {
        Self {
            mode: Mode::FewestStops,
            path,
            minutes: None,
        }
    }
}

impl From<TimedPath> for Route {
    fn from(timed: TimedPath) -> Self {
        Self {
            mode: Mode::Fastest,
            path: timed.path,
            minutes: Some(timed.minutes),
        }
    }
}

pub fn find_route(
    network: &Network,
    mode: Mode,
    origin: &str,
    destination: &str,
) -> Option<Route> {
    match mode {
        Mode::FewestStops => fewest_stops(network, origin, destination).map(Route::from),
        Mode::Fastest => fastest_route(network, origin, destination).map(Route::from),
    }
}

/// Station names joined by arrows, e.g. `Kızılay -> Ulus`.
pub fn describe_path(network: &Network, path: &Path) -> String {
    path.stations()
        .iter()
        .map(|id| network.get(id.as_str()).map_or(id.as_str(), |s| s.name.as_str()))
        .join(" -> ")
}

pub fn describe_route(network: &Network, route: &Route) -> String {
    let path = describe_path(network, &route.path);
    match route.minutes {
        Some(minutes) => format!("{path} (Duration: {minutes} min)"),
        None => path,
    }
}

pub fn describe_outcome(network: &Network, route: Option<&Route>) -> String {
    route.map_or_else(|| NO_ROUTE.to_owned(), |r| describe_route(network, r))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> Network {
        let mut network = Network::new();
        network.add_station("X1", "Alpha", "X Line");
        network.add_station("X2", "Beta", "X Line");
        network.add_station("X3", "Gamma", "X Line");
        network.add_connection("X1", "X2", 2).unwrap();
        network.add_connection("X2", "X3", 3).unwrap();
        network
    }

    #[test]
    fn describes_both_modes() {
        let network = network();

        let route = find_route(&network, Mode::FewestStops, "X1", "X3").unwrap();
        assert_eq!(describe_route(&network, &route), "Alpha -> Beta -> Gamma");

        let route = find_route(&network, Mode::Fastest, "X1", "X3").unwrap();
        assert_eq!(
            describe_route(&network, &route),
            "Alpha -> Beta -> Gamma (Duration: 5 min)"
        );
    }

    #[test]
    fn missing_route_is_described() {
        let network = network();
        let route = find_route(&network, Mode::Fastest, "X1", "Nowhere");
        assert_eq!(describe_outcome(&network, route.as_ref()), NO_ROUTE);
    }

    #[test]
    fn path_hops() {
        let network = network();
        let path = fewest_stops(&network, "X1", "X3").unwrap();
        assert_eq!(path.hops(), 2);
        assert_eq!(path.origin().map(StationId::as_str), Some("X1"));
        assert_eq!(path.destination().map(StationId::as_str), Some("X3"));
    }
}
