//! BSP tree node data structure

use crate::solid::plane::Plane;
use crate::solid::polygon::Polygon;
use std::fmt::Debug;

/// A BSP tree node, containing polygons plus optional front/back subtrees.
///
/// A node without a plane is empty: it has no polygons and no children.
/// A missing `back` child stands for solid interior, a missing `front` child
/// for open space.
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    /// Splitting plane for this node *or* **None** for an empty node.
    pub plane: Option<Plane>,

    /// Subtree for the half-space the plane normal points into.
    pub front: Option<Box<Node<S>>>,

    /// Subtree for the half-space behind the plane.
    pub back: Option<Box<Node<S>>>,

    /// Polygons that lie on `plane` (within `EPSILON`), facing either way.
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone + Send + Sync + Debug> Default for Node<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Node<S> {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// `true` until the node has adopted a splitting plane.
    pub const fn is_empty(&self) -> bool {
        self.plane.is_none()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }
        count
    }

    /// Length of the longest root-to-leaf path; `0` for an empty node.
    pub fn depth(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, d)) = stack.pop() {
            deepest = deepest.max(d);
            for child in [node.front.as_deref(), node.back.as_deref()].into_iter().flatten() {
                stack.push((child, d + 1));
            }
        }
        deepest
    }
}
