// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Mean radius of Earth, in meters.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Calculates the great-circle distance between two lat-lon positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in meters, which is the unit of edge costs produced by
/// the [osm](crate::osm) loader.
pub fn earth_distance(lat1: f32, lon1: f32, lat2: f32, lon2: f32) -> f64 {
    let (lat1, lon1) = ((lat1 as f64).to_radians(), (lon1 as f64).to_radians());
    let (lat2, lon2) = ((lat2 as f64).to_radians(), (lon2 as f64).to_radians());

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1) * 0.5).sin();
    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
