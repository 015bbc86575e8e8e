use std::{net::SocketAddr, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use metro_router::{
    Demand, Mode, Network,
    network::adapters::json::JsonAdapter,
    search::{self, describe_outcome, find_route},
    server::{self, AppState},
    trips::generate_trips,
};

const SCENARIOS: [(&str, &str); 3] = [("K1", "S10"), ("Y1", "T10"), ("M1", "K10")];

#[derive(Parser)]
#[command(name = "metro_router", about = "Route planning over a multi-line metro network")]
struct Cli {
    /// JSON network definition, defaults to the built-in Ankara network
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// More log output, repeat for trace level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List stations grouped by line
    Stations,
    /// List every connection with its travel time
    Edges,
    /// Find a route between two stations, given by id or name
    Route {
        from: String,
        to: String,
        #[arg(long, value_enum, default_value = "fastest")]
        mode: Mode,
    },
    /// Simulate passengers travelling between weighted random stations
    Trips {
        #[arg(long, default_value_t = 10)]
        count: usize,
        /// Seed for the random generator, random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the demonstration queries with both search modes
    Scenarios,
    /// Serve the network over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    metro_router::logger::init_logger(cli.verbose);

    let now = Instant::now();
    let adapter = match &cli.network {
        Some(path) => JsonAdapter::read(path)?,
        None => JsonAdapter::reference()?,
    };
    let network = Network::from_adapter(&adapter).context("failed to build network")?;
    info!("Loaded network in {:?}", now.elapsed());

    match cli.command {
        Command::Stations => {
            for line in network.lines() {
                println!("{}", line.name);
                for station in line.stations.iter().filter_map(|id| network.get(id.as_str())) {
                    println!("  {:<4} {}", station.id, station.name);
                }
            }
        }
        Command::Edges => {
            for edge in network.edges() {
                println!("{} -- {} : {} min", edge.from, edge.to, edge.minutes);
            }
        }
        Command::Route { from, to, mode } => {
            let from = network.resolve(&from)?;
            let to = network.resolve(&to)?;
            let route = find_route(&network, mode, from.id.as_str(), to.id.as_str());
            println!("{}", describe_outcome(&network, route.as_ref()));
        }
        Command::Trips { count, seed } => {
            let demand = Demand::new(&network, adapter.demand())?;
            let seed = seed.unwrap_or_else(rand::random);
            info!(seed, "Generating {count} trips");

            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for trip in generate_trips(&network, &demand, count, &mut rng) {
                println!("{}: {}", trip.label, trip.summary());
            }
        }
        Command::Scenarios => {
            for (i, (from, to)) in SCENARIOS.into_iter().enumerate() {
                println!("\n{}. {from} to {to}:", i + 1);

                match search::fewest_stops(&network, from, to) {
                    Some(path) => println!("Fewest stops: {}", labelled(&network, path.stations())),
                    None => println!("Fewest stops: {}", search::NO_ROUTE),
                }
                match search::fastest_route(&network, from, to) {
                    Some(route) => println!(
                        "Fastest ({} min): {}",
                        route.minutes,
                        labelled(&network, route.path.stations())
                    ),
                    None => println!("Fastest: {}", search::NO_ROUTE),
                }
            }
        }
        Command::Serve { addr } => {
            let demand = Demand::new(&network, adapter.demand())?;
            server::serve(addr, AppState::new(network, demand)).await?;
        }
    }

    Ok(())
}

/// `Name (ID) -> Name (ID)`, used where interchanges need telling apart.
fn labelled(network: &Network, stations: &[metro_router::StationId]) -> String {
    stations
        .iter()
        .filter_map(|id| network.get(id.as_str()))
        .map(|s| format!("{} ({})", s.name, s.id))
        .join(" -> ")
}
