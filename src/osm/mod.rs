// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading road networks from [OpenStreetMap](https://www.openstreetmap.org/) data.
//!
//! Ways tagged with a drivable `highway=*` value become [Edges](crate::Edge) between their
//! consecutive nodes, with costs equal to the [great-circle distance](crate::earth_distance)
//! in meters. One-way streets (`oneway=*`, motorways and roundabouts) only get edges in
//! their direction of travel. Relations (and thus turn restrictions) are not interpreted.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use graph_builder::GraphBuilder;

use crate::{Graph, GraphError};

mod graph_builder;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    Unknown,

    /// Force uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format from the leading bytes of a file.
    /// Anything without a recognized compression header is assumed to be plain XML.
    pub fn detect(header: &[u8]) -> Self {
        if header.starts_with(&[0x1F, 0x8B]) {
            Self::XmlGz
        } else if header.starts_with(b"BZh") {
            Self::XmlBz2
        } else {
            Self::Xml
        }
    }
}

/// Additional controls for interpreting OSM data as a routing [Graph].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// Filter features by a specific bounding box. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat). Ignored if all values are set to zero, or at least one
    /// of them is not finite.
    pub bbox: [f32; 4],
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file_format: FileFormat::Unknown,
            bbox: [0.0; 4],
        }
    }
}

/// Error which can occur when loading OSM data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("graph: {0}")]
    Graph(#[from] GraphError),
}

/// Parse OSM features from a reader into a [Graph] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn add_features_from_io<R: io::Read>(
    g: &mut Graph,
    options: &Options,
    reader: R,
) -> Result<(), Error> {
    let mut b = io::BufReader::new(reader);

    let file_format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        f => f,
    };

    match file_format {
        FileFormat::Unknown | FileFormat::Xml => add_xml_features(g, options, b),

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            add_xml_features(g, options, io::BufReader::new(d))
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            add_xml_features(g, options, io::BufReader::new(d))
        }
    }
}

/// Parse OSM features from a file at the provided path into a [Graph] as per the provided [Options].
pub fn add_features_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    options: &Options,
    path: P,
) -> Result<(), Error> {
    let f = File::open(path)?;
    add_features_from_io(g, options, f)
}

/// Parse OSM features from a static buffer into a [Graph] as per the provided [Options].
pub fn add_features_from_buffer(g: &mut Graph, options: &Options, data: &[u8]) -> Result<(), Error> {
    add_features_from_io(g, options, data)
}

fn add_xml_features<R: BufRead>(g: &mut Graph, options: &Options, reader: R) -> Result<(), Error> {
    GraphBuilder::new(g, options).add_features(xml::Reader::new(reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{find_route, NodeIndex};

    const GRID: &[u8] = include_bytes!("test_fixtures/grid.osm");
    const GRID_GZ: &[u8] = include_bytes!("test_fixtures/grid.osm.gz");
    const GRID_BZ2: &[u8] = include_bytes!("test_fixtures/grid.osm.bz2");

    macro_rules! assert_edge {
        ($graph:expr, $from:expr, $to:expr) => {
            assert!($graph.get_edge(node(&$graph, $from), node(&$graph, $to)).is_finite());
        };
    }

    macro_rules! assert_no_edge {
        ($graph:expr, $from:expr, $to:expr) => {
            assert!($graph.get_edge(node(&$graph, $from), node(&$graph, $to)).is_infinite());
        };
    }

    fn node(g: &Graph, id: i64) -> NodeIndex {
        g.find_node(id).unwrap()
    }

    fn load(data: &[u8], options: Options) -> Graph {
        let mut g = Graph::default();
        add_features_from_buffer(&mut g, &options, data).unwrap();
        g
    }

    fn route_ids(g: &Graph, from: i64, to: i64) -> Vec<i64> {
        find_route(g, node(g, from), node(g, to))
            .unwrap()
            .nodes()
            .iter()
            .map(|&idx| g.get_node(idx).unwrap().id)
            .collect()
    }

    fn check_grid_graph(g: &Graph) {
        // 4 ── 5 ── 6
        // │   ↑     ↑
        // 1 ── 2 ── 3 ── (999)

        // Nodes off the road network (7, 8) and unknown references (999) are skipped
        assert_eq!(g.len(), 6);
        assert_eq!(g.find_node(7), None);
        assert_eq!(g.find_node(8), None);
        assert_eq!(g.find_node(999), None);

        // Two-way streets
        assert_edge!(g, 1, 2);
        assert_edge!(g, 2, 1);
        assert_edge!(g, 1, 4);
        assert_edge!(g, 4, 1);

        // One-way streets
        assert_edge!(g, 3, 6);
        assert_no_edge!(g, 6, 3);
        assert_edge!(g, 2, 5);
        assert_no_edge!(g, 5, 2);

        // Costs are distances in meters
        let cost = g.get_edge(node(g, 1), node(g, 4));
        assert!((cost - 111.2).abs() < 0.5, "got {}", cost);
        assert_eq!(cost, g.get_edge(node(g, 4), node(g, 1)));
    }

    #[test]
    fn load_xml() {
        let g = load(
            GRID,
            Options {
                file_format: FileFormat::Xml,
                ..Options::default()
            },
        );
        check_grid_graph(&g);
    }

    #[test]
    fn load_gz() {
        let g = load(
            GRID_GZ,
            Options {
                file_format: FileFormat::XmlGz,
                ..Options::default()
            },
        );
        check_grid_graph(&g);
    }

    #[test]
    fn load_detected_formats() {
        for data in [GRID, GRID_GZ, GRID_BZ2] {
            check_grid_graph(&load(data, Options::default()));
        }
    }

    #[test]
    fn detect_file_format() {
        assert_eq!(FileFormat::detect(&GRID_GZ[..4]), FileFormat::XmlGz);
        assert_eq!(FileFormat::detect(&GRID_BZ2[..4]), FileFormat::XmlBz2);
        assert_eq!(FileFormat::detect(&GRID[..4]), FileFormat::Xml);
        assert_eq!(FileFormat::detect(b""), FileFormat::Xml);
    }

    #[test]
    fn load_with_bbox() {
        let g = load(
            GRID,
            Options {
                file_format: FileFormat::Xml,
                bbox: [18.99, 49.99, 19.0015, 50.01],
            },
        );

        assert_eq!(g.len(), 4);
        assert_eq!(g.find_node(3), None);
        assert_eq!(g.find_node(6), None);
        assert_edge!(g, 1, 2);
        assert_edge!(g, 2, 5);
    }

    #[test]
    fn route_respects_oneway_streets() {
        let g = load(GRID, Options::default());

        assert_eq!(route_ids(&g, 1, 3), vec![1, 2, 3]);
        assert_eq!(route_ids(&g, 6, 1), vec![6, 5, 4, 1]);
        assert_eq!(route_ids(&g, 5, 3), vec![5, 4, 1, 2, 3]);
    }

    #[test]
    fn load_malformed_xml() {
        let mut g = Graph::default();
        let result = add_features_from_buffer(&mut g, &Options::default(), b"<osm><way id=\"1\"></osm>");
        assert!(matches!(result, Err(Error::Xml(_))));
    }
}
