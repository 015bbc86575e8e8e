use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::{network::Network, search::Path};

/// Breadth-first search for the path with the fewest connections.
///
/// Every hop counts, including same-line ones, so this minimises stops rather
/// than line changes. Stations are marked visited when they are expanded, which
/// lets several pending entries for the same station sit in the queue; the
/// first one popped wins. Ties go to the neighbour whose connection was added
/// first.
pub fn fewest_stops(network: &Network, origin: &str, destination: &str) -> Option<Path> {
    let origin = &network.get(origin)?.id;
    let destination = &network.get(destination)?.id;

    let mut queue = VecDeque::from([(origin, vec![origin])]);
    let mut visited = HashSet::new();

    while let Some((current, path)) = queue.pop_front() {
        if current == destination {
            debug!(%origin, %destination, hops = path.len() - 1, "Found fewest-stops path");
            return Some(Path::from_refs(path));
        }

        if !visited.insert(current) {
            continue;
        }

        for neighbour in network.neighbours(current.as_str()) {
            if visited.contains(&neighbour.station) {
                continue;
            }

            let mut next = path.clone();
            next.push(&neighbour.station);
            queue.push_back((&neighbour.station, next));
        }
    }

    debug!(%origin, %destination, "No path");
    None
}
