//! Nearest-neighbour selection for connector lines
//!
//! Distances are planar (degrees treated as x/y) rather than geodesic: the
//! lines only need a plausible "closest first" ordering within the window the
//! user is looking at.

use crate::core::geo::{LatLng, LatLngBounds};
use crate::data::projection::GeoPoint;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How many neighbours receive a connector line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineSelection {
    /// The `k` closest visible points
    Nearest(usize),
    /// Every visible point
    AllVisible,
}

impl LineSelection {
    fn limit(&self, available: usize) -> usize {
        match self {
            Self::Nearest(k) => (*k).min(available),
            Self::AllVisible => available,
        }
    }
}

/// A candidate point with its distance to the reference point
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPoint {
    pub point: GeoPoint,
    pub distance: f64,
}

fn compare_by_distance(a: &RankedPoint, b: &RankedPoint) -> Ordering {
    a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal)
}

/// Ranks points by distance to `reference`, closest first.
///
/// The sort is stable: equal distances keep their input order.
pub fn sort_by_distance(points: &[GeoPoint], reference: &LatLng) -> Vec<RankedPoint> {
    let mut ranked: Vec<RankedPoint> = points
        .iter()
        .map(|point| RankedPoint {
            point: point.clone(),
            distance: point.position.euclidean_distance(reference),
        })
        .collect();
    ranked.sort_by(compare_by_distance);
    ranked
}

/// Points inside `bounds`, excluding any at exactly the target's position
pub fn visible_candidates(
    points: &[GeoPoint],
    target: &LatLng,
    bounds: &LatLngBounds,
) -> Vec<GeoPoint> {
    points
        .iter()
        .filter(|point| !point.position.same_position(target))
        .filter(|point| bounds.contains(&point.position))
        .cloned()
        .collect()
}

/// The neighbours that get a connector line from `target`
pub fn select_neighbors(
    points: &[GeoPoint],
    target: &LatLng,
    bounds: &LatLngBounds,
    selection: LineSelection,
) -> Vec<RankedPoint> {
    let candidates = visible_candidates(points, target, bounds);
    let mut ranked = sort_by_distance(&candidates, target);
    ranked.truncate(selection.limit(ranked.len()));
    ranked
}
