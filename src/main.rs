use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use transit_planner::planner::{
    adjust_for_emergency, design_network, find_path, optimize_maintenance, optimize_signal,
    sample_car_counts, sample_maintenance_candidates, sample_network, sample_transit_lines,
    schedule_transit, DesignCriteria, Direction, NetworkData, PathOutcome, PathStrategy,
    TransportGraph, WeightSelector,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Query {
    Path,
    Design,
    Maintenance,
    Transit,
    Signal,
    All,
}

#[derive(Parser)]
#[command(name = "transit_planner")]
#[command(about = "Route, network design and allocation queries over a city transport network")]
struct Cli {
    /// Which query to run
    #[arg(long, value_enum, default_value = "all")]
    query: Query,

    /// JSON file with neighborhoods, facilities, roads and traffic patterns
    /// (uses the built-in Cairo sample when omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Route start node id
    #[arg(long, default_value = "1")]
    from: String,

    /// Route end node id
    #[arg(long, default_value = "F1")]
    to: String,

    /// Search strategy: dijkstra, astar, greedy or time_dependent
    #[arg(long, default_value = "dijkstra")]
    algorithm: String,

    /// Edge weight: distance or travel_time
    #[arg(long, default_value = "distance")]
    weight: String,

    /// Hour of day for the time-dependent search
    #[arg(long, default_value = "8")]
    hour: u32,

    /// Network design criteria: distance, travel_time or congestion
    #[arg(long, default_value = "distance")]
    criteria: String,

    /// Skip the facility connection pass when designing the network
    #[arg(long)]
    no_facilities: bool,

    /// Maintenance budget
    #[arg(long, default_value = "1000")]
    budget: i64,

    /// Buses available to the transit scheduler
    #[arg(long, default_value = "30")]
    buses: usize,

    /// Approach with an emergency vehicle
    #[arg(long, default_value = "east")]
    emergency: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,transit_planner=info"),
    )
    .init();

    let cli = Cli::parse();

    let data = match &cli.data {
        Some(path) => load_network_data(path)?,
        None => sample_network(),
    };
    let graph = TransportGraph::from_data(&data).context("Failed to build transport graph")?;
    log::info!(
        "Loaded network: {} nodes, {} roads",
        graph.node_count(),
        graph.road_count()
    );

    let run = |query: Query| cli.query == Query::All || cli.query == query;

    if run(Query::Path) {
        run_path(&cli, &graph)?;
    }
    if run(Query::Design) {
        run_design(&cli, &graph);
    }
    if run(Query::Maintenance) {
        run_maintenance(&cli)?;
    }
    if run(Query::Transit) {
        run_transit(&cli)?;
    }
    if run(Query::Signal) {
        run_signal(&cli)?;
    }

    Ok(())
}

fn load_network_data(path: &Path) -> Result<NetworkData> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Couldn't read network data from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Couldn't parse network data in {}", path.display()))
}

fn run_path(cli: &Cli, graph: &TransportGraph) -> Result<()> {
    let selector: WeightSelector = cli.weight.parse()?;
    let strategy = PathStrategy::from_name(&cli.algorithm, cli.hour)?;
    let outcome = find_path(graph, strategy, cli.from.as_str(), cli.to.as_str(), selector)?;

    println!("=== Route {} -> {} ({:?}, {}) ===", cli.from, cli.to, strategy, selector);
    match &outcome {
        PathOutcome::Found { path, cost } => {
            let names: Vec<&str> = path
                .iter()
                .filter_map(|id| graph.node(id).map(|node| node.name.as_str()))
                .collect();
            println!("{}", names.join(" -> "));
            println!("Total {}: {:.2}", selector, cost);
        }
        PathOutcome::NotFound => println!("No available path"),
    }
    println!();
    Ok(())
}

fn run_design(cli: &Cli, graph: &TransportGraph) {
    let criteria = DesignCriteria::parse_lenient(&cli.criteria);
    let network = design_network(graph, criteria, !cli.no_facilities);

    println!("=== Network design ({:?}) ===", criteria);
    for road in network.graph.roads() {
        println!("{} - {} ({:.1} km)", road.from, road.to, road.distance);
    }
    println!(
        "{} roads, adjusted cost {:.3}, {} spliced",
        network.graph.road_count(),
        network.total_adjusted_cost,
        network.spliced_edge_count
    );
    for warning in &network.warnings {
        println!("Warning: {:?}", warning);
    }
    println!();
}

fn run_maintenance(cli: &Cli) -> Result<()> {
    let allocation = optimize_maintenance(&sample_maintenance_candidates(), cli.budget)?;

    println!("=== Road maintenance (budget {}) ===", cli.budget);
    for candidate in &allocation.selected {
        println!(
            "{} (cost {}, urgency {})",
            candidate.road_id, candidate.repair_cost, candidate.urgency
        );
    }
    println!("Total urgency: {}", allocation.total);
    println!();
    Ok(())
}

fn run_transit(cli: &Cli) -> Result<()> {
    let allocation = schedule_transit(&sample_transit_lines(), cli.buses)?;

    println!("=== Transit schedule ({} buses) ===", cli.buses);
    for line in &allocation.selected {
        println!(
            "{} ({}:00-{}:00, {} passengers)",
            line.line_id, line.start_time, line.end_time, line.passenger_demand
        );
    }
    println!("Total passengers: {}", allocation.total);
    println!();
    Ok(())
}

fn run_signal(cli: &Cli) -> Result<()> {
    let counts = sample_car_counts();
    let emergency: Direction = cli.emergency.parse()?;

    println!("=== Signal timing ===");
    for (direction, share) in optimize_signal(&counts) {
        println!("{}: {:.2}%", direction, share);
    }
    println!("--- Emergency vehicle from {} ---", emergency);
    for (direction, share) in adjust_for_emergency(&counts, emergency)? {
        println!("{}: {:.2}%", direction, share);
    }
    println!();
    Ok(())
}
