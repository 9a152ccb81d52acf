// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use log::{debug, warn};

use super::xml::{Feature, Way};
use super::{Error, Options};
use crate::{earth_distance, Graph, Node, NodeIndex};

/// Values of the `highway` tag which mark ways usable by motor vehicles.
const ROUTABLE_HIGHWAYS: &[&str] = &[
    "motorway",
    "motorway_link",
    "trunk",
    "trunk_link",
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "tertiary_link",
    "unclassified",
    "residential",
    "living_street",
    "service",
    "road",
];

/// Helper object used for storing state related to converting [OSM features](Feature)
/// into a [Graph].
///
/// Node positions are buffered until a routable way references them, so only nodes
/// lying on the road network end up in the graph.
pub(super) struct GraphBuilder<'a> {
    g: &'a mut Graph,
    positions: HashMap<i64, Node>,
    bbox: Option<[f32; 4]>,
    ways: usize,
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(g: &'a mut Graph, options: &Options) -> Self {
        let ignore_bbox =
            options.bbox.iter().all(|&x| x == 0.0) || options.bbox.iter().any(|x| !x.is_finite());
        if ignore_bbox && options.bbox.iter().any(|&x| x != 0.0) {
            warn!("ignoring invalid bounding box {:?}", options.bbox);
        }

        Self {
            g,
            positions: HashMap::default(),
            bbox: if ignore_bbox { None } else { Some(options.bbox) },
            ways: 0,
        }
    }

    /// Add all features from the provided iterator.
    pub(super) fn add_features<I>(&mut self, features: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Result<Feature, quick_xml::Error>>,
    {
        let nodes_before = self.g.len();

        for f in features {
            match f? {
                Feature::Node(n) => self.add_node(n),
                Feature::Way(w) => self.add_way(&w)?,
            }
        }

        debug!(
            "loaded {} routable ways, {} new nodes",
            self.ways,
            self.g.len() - nodes_before
        );
        Ok(())
    }

    fn add_node(&mut self, n: Node) {
        if self.is_in_bbox(n.lat, n.lon) {
            self.positions.insert(n.id, n);
        }
    }

    fn add_way(&mut self, w: &Way) -> Result<(), Error> {
        let is_routable = w
            .tags
            .get("highway")
            .is_some_and(|h| ROUTABLE_HIGHWAYS.contains(&h.as_str()));
        if !is_routable {
            return Ok(());
        }

        let (forward, backward) = way_direction(&w.tags);
        let mut nodes = Vec::with_capacity(w.nodes.len());
        for &node_id in &w.nodes {
            nodes.push(self.get_or_add_node(w.id, node_id)?);
        }

        // Missing nodes split the way - only connect consecutive known nodes
        for pair in nodes.windows(2) {
            if let &[Some(a), Some(b)] = pair {
                let cost = self.edge_cost(a, b);
                if forward {
                    self.g.add_edge(a, b, cost)?;
                }
                if backward {
                    self.g.add_edge(b, a, cost)?;
                }
            }
        }

        self.ways += 1;
        Ok(())
    }

    fn get_or_add_node(&mut self, way_id: i64, id: i64) -> Result<Option<NodeIndex>, Error> {
        if let Some(idx) = self.g.find_node(id) {
            return Ok(Some(idx));
        }

        match self.positions.get(&id) {
            Some(&n) => Ok(Some(self.g.add_node(n)?)),
            None => {
                warn!("way {} references unknown node {}", way_id, id);
                Ok(None)
            }
        }
    }

    fn edge_cost(&self, a: NodeIndex, b: NodeIndex) -> f64 {
        match (self.g.get_node(a), self.g.get_node(b)) {
            (Some(a), Some(b)) => earth_distance(a.lat, a.lon, b.lat, b.lon),
            _ => f64::INFINITY,
        }
    }

    fn is_in_bbox(&self, lat: f32, lon: f32) -> bool {
        match self.bbox {
            None => true,
            Some([min_lon, min_lat, max_lon, max_lat]) => {
                lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
            }
        }
    }
}

/// Checks if a way is traversable forward (first return value) and
/// backwards (second return value).
///
/// Motorways and roundabouts default to being one-way,
/// unless overridden by the `oneway` tag.
fn way_direction(tags: &HashMap<String, String>) -> (bool, bool) {
    let mut backward = !matches!(
        tags.get("highway").map(String::as_str),
        Some("motorway" | "motorway_link")
    ) && !matches!(
        tags.get("junction").map(String::as_str),
        Some("roundabout" | "circular")
    );
    let mut forward = true;

    match tags.get("oneway").map(String::as_str) {
        Some("yes" | "true" | "1") => backward = false,
        Some("-1" | "reverse") => {
            forward = false;
            backward = true;
        }
        Some("no") => backward = true,
        _ => {}
    }

    (forward, backward)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn way_direction_defaults() {
        assert_eq!(way_direction(&tags(&[("highway", "primary")])), (true, true));
        assert_eq!(way_direction(&tags(&[("highway", "motorway")])), (true, false));
        assert_eq!(
            way_direction(&tags(&[("highway", "primary"), ("junction", "roundabout")])),
            (true, false)
        );
    }

    #[test]
    fn way_direction_oneway_tag() {
        assert_eq!(
            way_direction(&tags(&[("highway", "primary"), ("oneway", "yes")])),
            (true, false)
        );
        assert_eq!(
            way_direction(&tags(&[("highway", "primary"), ("oneway", "-1")])),
            (false, true)
        );
        assert_eq!(
            way_direction(&tags(&[("highway", "motorway"), ("oneway", "no")])),
            (true, true)
        );
    }
}
