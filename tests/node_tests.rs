mod support;

use csgbsp::{
    float_types::EPSILON,
    solid::{
        bsp::{BalancedSplittingStrategy, BspOps, Node, SerialBspOps},
        plane::Plane,
        polygon::Polygon,
        vertex::Vertex,
    },
};
use nalgebra::{Point3, Vector3};

use crate::support::{approx_eq, make_polygon_3d, unit_cube};

#[test]
fn new_and_build() {
    let p: Polygon<()> = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let node: Node<()> = Node::from_polygons(&[p.clone()]);

    assert_eq!(node.plane.as_ref(), Some(&p.plane));
    assert_eq!(node.polygons, vec![p]);
    assert!(node.front.is_none());
    assert!(node.back.is_none());
}

#[test]
fn from_no_polygons_is_empty() {
    let node: Node<()> = Node::from_polygons(&[]);
    assert!(node.is_empty());
    assert!(node.polygons.is_empty());
    assert!(node.front.is_none() && node.back.is_none());
}

#[test]
fn invert() {
    let p: Polygon<()> = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let mut node: Node<()> = Node::from_polygons(&[p]);
    let original_normal = node.plane.as_ref().unwrap().normal();

    node.invert();
    let flipped_normal = node.plane.as_ref().unwrap().normal();
    assert!(approx_eq(flipped_normal.z, -original_normal.z, EPSILON));
    assert_eq!(node.polygons.len(), 1);
    assert_eq!(node.polygons[0].plane.normal(), flipped_normal);
}

#[test]
fn invert_swaps_children() {
    let cube = unit_cube(0.0, 0.0, 0.0);
    let mut node = Node::from_polygons(&cube.polygons);

    // a convex solid builds a chain of back children
    assert!(node.front.is_none());
    assert!(node.back.is_some());
    assert_eq!(node.node_count(), 6);
    assert_eq!(node.depth(), 6);

    node.invert();
    assert!(node.front.is_some());
    assert!(node.back.is_none());
    assert_eq!(node.all_polygons().len(), 6);
}

#[test]
fn clip_polygons_against_hand_built_node() {
    // A node with a single plane normal to +Z, passing through z=0
    let plane = Plane::from_normal(Vector3::z(), 0.0);
    let node: Node<()> = Node {
        plane: Some(plane),
        front: None,
        back: None,
        polygons: Vec::new(),
    };

    let above = make_polygon_3d(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);
    let below = make_polygon_3d(&[[0.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 1.0, -1.0]]);

    let clipped = node.clip_polygons(&[above.clone(), below]);
    assert_eq!(clipped, vec![above]);
}

#[test]
fn clip_polygons_on_empty_node_returns_input() {
    let node: Node<()> = Node::new();
    let poly = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    assert_eq!(node.clip_polygons(std::slice::from_ref(&poly)), vec![poly]);
}

#[test]
fn clip_to_removes_geometry_inside_other() {
    let cube = unit_cube(0.0, 0.0, 0.0);
    let cube_tree = Node::from_polygons(&cube.polygons);

    // a square slab crossing the cube at z = 0.25, twice as wide as the cube
    let slab = make_polygon_3d(&[
        [-1.0, -1.0, 0.25],
        [1.0, -1.0, 0.25],
        [1.0, 1.0, 0.25],
        [-1.0, 1.0, 0.25],
    ]);
    let mut slab_tree = Node::from_polygons(&[slab]);
    slab_tree.clip_to(&cube_tree);

    let remaining: f64 = slab_tree.all_polygons().iter().map(Polygon::area).sum();
    assert!(approx_eq(remaining, 4.0 - 1.0, 1e-9));
    for poly in slab_tree.all_polygons() {
        let c = poly.centroid();
        assert!(c.x.abs() >= 0.5 - EPSILON || c.y.abs() >= 0.5 - EPSILON);
    }
}

#[test]
fn build_is_additive() {
    let first = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let above = make_polygon_3d(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);

    let mut node = Node::from_polygons(std::slice::from_ref(&first));
    node.build(std::slice::from_ref(&above));

    // the root keeps its plane and polygon; the new one lands in a front child
    assert_eq!(node.plane.as_ref(), Some(&first.plane));
    assert_eq!(node.polygons, vec![first.clone()]);
    assert_eq!(node.front.as_ref().map(|f| f.polygons.clone()), Some(vec![above.clone()]));
    assert_eq!(node.all_polygons(), vec![first, above]);
}

#[test]
fn all_polygons_is_pre_order() {
    let level = |z: f64, tag: u8| {
        Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, z), Vector3::z()),
                Vertex::new(Point3::new(1.0, 0.0, z), Vector3::z()),
                Vertex::new(Point3::new(0.0, 1.0, z), Vector3::z()),
            ],
            Some(tag),
        )
        .unwrap()
    };
    let node = Node::from_polygons(&[level(0.0, 0), level(-1.0, 1), level(2.0, 2), level(1.0, 3)]);

    // root, then front subtree (2 with its back child 3), then back subtree (1)
    let order: Vec<u8> = node.all_polygons().iter().filter_map(|p| p.metadata().copied()).collect();
    assert_eq!(order, vec![0, 2, 3, 1]);
}

#[test]
fn serial_ops_with_balanced_strategy_build_equivalent_tree() {
    let cube = unit_cube(0.0, 0.0, 0.0);
    let ops = SerialBspOps::with_strategy(BalancedSplittingStrategy::default());
    let mut node = Node::new();
    ops.build(&mut node, &cube.polygons);

    assert_eq!(ops.all_polygons(&node).len(), 6);
    let inside = Point3::new(0.1, 0.2, 0.3);
    let inner = make_polygon_3d(&[
        [inside.x, inside.y, inside.z],
        [inside.x + 0.1, inside.y, inside.z],
        [inside.x, inside.y + 0.1, inside.z],
    ]);
    assert!(ops.clip_polygons(&node, &[inner]).is_empty());
}
