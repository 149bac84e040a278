//! Traits defining BSP tree operations and splitting-plane selection

use crate::float_types::Real;
use crate::solid::bsp::node::Node;
use crate::solid::plane::{BACK, COPLANAR, FRONT, Plane};
use crate::solid::polygon::Polygon;

/// Core BSP operations trait - implements algorithms on BSP nodes
pub trait BspOps<S: Clone + Send + Sync> {
    /// Invert the solid a tree represents: flip every polygon and plane and
    /// swap the front/back children, for the whole subtree.
    fn invert(&self, node: &mut Node<S>);

    /// Return the parts of `polygons` that lie outside the solid of `node`.
    fn clip_polygons(&self, node: &Node<S>, polygons: &[Polygon<S>]) -> Vec<Polygon<S>>;

    /// Remove all polygons in `node`'s tree that are inside the `other` tree.
    fn clip_to(&self, node: &mut Node<S>, other: &Node<S>);

    /// Insert `polygons` into the tree rooted at `node`.
    fn build(&self, node: &mut Node<S>, polygons: &[Polygon<S>]);

    /// Pre-order list of every polygon in the tree: own, front, back.
    fn all_polygons(&self, node: &Node<S>) -> Vec<Polygon<S>>;
}

/// Trait for picking the splitting plane of an empty node
pub trait SplittingPlaneStrategy<S: Clone> {
    /// Pick a splitting plane from a non-empty set of polygons
    fn pick_splitting_plane(&self, polygons: &[Polygon<S>]) -> Plane;
}

/// Adopt the plane of the first polygon. Deterministic, no balancing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstPolygonStrategy;

impl<S: Clone> SplittingPlaneStrategy<S> for FirstPolygonStrategy {
    fn pick_splitting_plane(&self, polygons: &[Polygon<S>]) -> Plane {
        polygons[0].plane.clone()
    }
}

/// Score the planes of the first 20 polygons by how many polygons they
/// would split and how unevenly they divide the rest; keep the cheapest.
#[derive(Debug, Clone, Copy)]
pub struct BalancedSplittingStrategy {
    pub span_weight: Real,
    pub balance_weight: Real,
}

impl Default for BalancedSplittingStrategy {
    fn default() -> Self {
        Self {
            span_weight: 8.0,
            balance_weight: 1.0,
        }
    }
}

impl<S: Clone> SplittingPlaneStrategy<S> for BalancedSplittingStrategy {
    fn pick_splitting_plane(&self, polygons: &[Polygon<S>]) -> Plane {
        let mut best_plane = &polygons[0].plane;
        let mut best_score = Real::MAX;

        for candidate in polygons.iter().take(20).map(|p| &p.plane) {
            let (num_front, num_back, num_spanning) = polygons
                .iter()
                .map(|poly| match candidate.classify_polygon(poly) {
                    COPLANAR => (0, 0, 0),
                    FRONT => (1, 0, 0),
                    BACK => (0, 1, 0),
                    _ => (0, 0, 1),
                })
                .fold((0i64, 0i64, 0i64), |acc, x| (acc.0 + x.0, acc.1 + x.1, acc.2 + x.2));

            let score = self.span_weight * num_spanning as Real
                + self.balance_weight * ((num_front - num_back) as Real).abs();

            if score < best_score {
                best_score = score;
                best_plane = candidate;
            }
        }

        best_plane.clone()
    }
}
