use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use roadpath::{Dijkstra, Frontier, Graph, HeapFrontier, LinearFrontier, NodeIndex, Route};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] roadpath::osm::Error);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FrontierKind {
    /// Binary heap, suitable for graphs of any size
    Heap,

    /// Linear scan over all nodes
    Linear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Unknown,
    Xml,
    XmlGz,
    XmlBz2,
}

impl From<Format> for roadpath::osm::FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Unknown => Self::Unknown,
            Format::Xml => Self::Xml,
            Format::XmlGz => Self::XmlGz,
            Format::XmlBz2 => Self::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the OSM file
    osm_file: PathBuf,

    /// Latitude of the start point
    start_lat: f32,

    /// Longitude of the start point
    start_lon: f32,

    /// Latitude of the end point
    end_lat: f32,

    /// Longitude of the end point
    end_lon: f32,

    /// Data structure holding not-yet-finalized nodes
    #[arg(long, value_enum, default_value_t = FrontierKind::Heap)]
    frontier: FrontierKind,

    /// Format of the OSM file
    #[arg(long, value_enum, default_value_t = Format::Unknown)]
    format: Format,

    /// Log debugging information to stderr
    #[arg(short, long)]
    verbose: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    colog::default_builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let g = load_graph(&cli.osm_file, cli.format)?;

    let start = g
        .find_nearest_node(cli.start_lat, cli.start_lon)
        .ok_or("no node corresponding to the given start position")?;

    let end = g
        .find_nearest_node(cli.end_lat, cli.end_lon)
        .ok_or("no node corresponding to the given end position")?;

    let route = match cli.frontier {
        FrontierKind::Heap => compute(&g, HeapFrontier::new(), start, end)?,
        FrontierKind::Linear => compute(&g, LinearFrontier::new(), start, end)?,
    };

    print_geojson(&g, &route);
    Ok(())
}

fn compute<F: Frontier>(
    g: &Graph,
    frontier: F,
    start: NodeIndex,
    end: NodeIndex,
) -> Result<Route, roadpath::RoutingError> {
    Dijkstra::with_frontier(g, frontier).compute_shortest_path(start, end)
}

fn print_geojson(g: &Graph, route: &Route) {
    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{\"cost\": {}}},", route.cost());

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut nodes = route
        .nodes()
        .iter()
        .filter_map(|&idx| g.get_node(idx))
        .peekable();
    while let Some(node) = nodes.next() {
        let suffix = if nodes.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", node.lon, node.lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");
}

fn load_graph<P: AsRef<Path>>(path: P, format: Format) -> Result<Graph, GraphLoadError> {
    let mut g = Graph::default();
    let options = roadpath::osm::Options {
        file_format: format.into(),
        ..Default::default()
    };
    match roadpath::osm::add_features_from_file(&mut g, &options, path.as_ref()) {
        Ok(()) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
