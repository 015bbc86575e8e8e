use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashSet},
};

use tracing::debug;

use crate::{
    network::{Network, StationId, TotalMinutes},
    search::{Path, TimedPath},
};

/// Frontier entry. Field order is the heap order: cumulative time first, then
/// station id, then the path itself so equal entries still compare totally.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Pending<'a> {
    minutes: TotalMinutes,
    station: &'a StationId,
    path: Vec<&'a StationId>,
}

/// Dijkstra search for the path with the lowest total travel time.
///
/// Stations are settled when popped. Stale entries for settled stations stay
/// in the heap and are skipped when they surface.
pub fn fastest_route(network: &Network, origin: &str, destination: &str) -> Option<TimedPath> {
    let origin = &network.get(origin)?.id;
    let destination = &network.get(destination)?.id;

    let mut heap = BinaryHeap::from([Reverse(Pending {
        minutes: 0,
        station: origin,
        path: vec![origin],
    })]);
    let mut settled = HashSet::new();

    while let Some(Reverse(Pending {
        minutes,
        station,
        path,
    })) = heap.pop()
    {
        if station == destination {
            debug!(%origin, %destination, minutes, "Found fastest route");
            return Some(TimedPath {
                path: Path::from_refs(path),
                minutes,
            });
        }

        if !settled.insert(station) {
            continue;
        }

        for neighbour in network.neighbours(station.as_str()) {
            if settled.contains(&neighbour.station) {
                continue;
            }

            let mut next = path.clone();
            next.push(&neighbour.station);
            heap.push(Reverse(Pending {
                minutes: minutes + TotalMinutes::from(neighbour.minutes),
                station: &neighbour.station,
                path: next,
            }));
        }
    }

    debug!(%origin, %destination, "No route");
    None
}
