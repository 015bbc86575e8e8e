use std::{collections::HashMap, time::Instant};

use itertools::Itertools;
use rand::{Rng, distributions::Distribution, distributions::WeightedIndex};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::TripError,
    network::{Network, StationId},
    search::{Mode, Route, describe_outcome, find_route},
};

/// How often each station is picked as a trip end, proportional to its weight.
#[derive(Clone, Debug)]
pub struct Demand {
    stations: Vec<StationId>,
    distribution: WeightedIndex<u32>,
}

impl Demand {
    pub fn new<I>(network: &Network, weights: I) -> Result<Self, TripError>
    where
        I: IntoIterator<Item = (StationId, u32)>,
    {
        let (stations, weights): (Vec<_>, Vec<_>) = weights.into_iter().unzip();

        if let Some(unknown) = stations.iter().find(|id| !network.contains(id.as_str())) {
            return Err(TripError::UnknownStation(unknown.to_string()));
        }

        // the destination is redrawn until it differs from the origin
        let drawable = stations
            .iter()
            .zip(&weights)
            .filter(|&(_, &w)| w > 0)
            .map(|(id, _)| id)
            .unique()
            .count();
        if drawable < 2 {
            return Err(TripError::InsufficientDemand(drawable));
        }

        let distribution = WeightedIndex::new(&weights)?;

        Ok(Self {
            stations,
            distribution,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &StationId {
        &self.stations[self.distribution.sample(rng)]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub label: String,
    pub origin: StationId,
    pub destination: StationId,
    pub mode: Mode,
    /// `null` when the destination cannot be reached.
    pub route: Option<Route>,
    pub outcome: String,
}

impl TripRecord {
    /// `origin -> destination: outcome`, as listed per passenger.
    pub fn summary(&self) -> String {
        format!("{} -> {}: {}", self.origin, self.destination, self.outcome)
    }
}

/// Simulates `count` independent passengers, each travelling between two
/// distinct stations drawn from `demand` with a randomly chosen search mode.
pub fn generate_trips<R: Rng + ?Sized>(
    network: &Network,
    demand: &Demand,
    count: usize,
    rng: &mut R,
) -> Vec<TripRecord> {
    let now = Instant::now();

    let trips: Vec<_> = (1..=count)
        .map(|passenger| {
            let origin = demand.sample(rng);
            let destination = loop {
                let candidate = demand.sample(rng);
                if candidate != origin {
                    break candidate;
                }
            };

            let mode = if rng.gen_bool(0.5) {
                Mode::FewestStops
            } else {
                Mode::Fastest
            };

            let route = find_route(network, mode, origin.as_str(), destination.as_str());
            let outcome = describe_outcome(network, route.as_ref());
            debug!(passenger, %origin, %destination, ?mode, "{outcome}");

            TripRecord {
                label: format!("Passenger {passenger}"),
                origin: origin.clone(),
                destination: destination.clone(),
                mode,
                route,
                outcome,
            }
        })
        .collect();

    let unroutable = trips.iter().filter(|t| t.route.is_none()).count();
    info!(count, unroutable, "Generated trips in {:?}", now.elapsed());

    trips
}

/// Groups trip summaries under their passenger label.
pub fn trips_by_label(trips: &[TripRecord]) -> HashMap<String, Vec<String>> {
    trips
        .iter()
        .map(|t| (t.label.clone(), t.summary()))
        .into_group_map()
}
