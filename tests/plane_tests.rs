mod support;

use csgbsp::{
    float_types::EPSILON,
    solid::{
        plane::{BACK, COPLANAR, FRONT, Plane, SPANNING},
        polygon::Polygon,
        vertex::Vertex,
    },
};
use nalgebra::{Point3, Vector2, Vector3};

use crate::support::make_polygon_3d;

#[test]
fn flip() {
    let mut plane = Plane::from_normal(Vector3::y(), 2.0);
    plane.flip();
    assert_eq!(plane.normal(), Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(plane.offset(), -2.0);
    assert_eq!(plane.flipped(), Plane::from_normal(Vector3::y(), 2.0));
}

#[test]
fn from_points_follows_right_hand_rule() {
    let plane = Plane::from_points(
        Point3::new(0.0, 0.0, 3.0),
        Point3::new(1.0, 0.0, 3.0),
        Point3::new(0.0, 1.0, 3.0),
    )
    .unwrap();
    assert_eq!(plane.normal(), Vector3::z());
    assert_eq!(plane.offset(), 3.0);
}

#[test]
fn from_normal_normalises() {
    let plane = Plane::from_normal(Vector3::new(0.0, 0.0, 2.0), 4.0);
    assert_eq!(plane.normal(), Vector3::z());
    assert_eq!(plane.offset(), 2.0);
}

#[test]
fn classify_polygon_ors_vertex_classes() {
    let plane = Plane::from_normal(Vector3::z(), 0.0);
    let above = make_polygon_3d(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);
    let below = make_polygon_3d(&[[0.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 1.0, -1.0]]);
    let on = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let touching = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    let across = make_polygon_3d(&[[0.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 0.0, 1.0]]);

    assert_eq!(plane.classify_polygon(&above), FRONT);
    assert_eq!(plane.classify_polygon(&below), BACK);
    assert_eq!(plane.classify_polygon(&on), COPLANAR);
    assert_eq!(plane.classify_polygon(&touching), FRONT);
    assert_eq!(plane.classify_polygon(&across), SPANNING);
}

#[test]
fn split_polygon() {
    // Define a plane that splits the XY plane at y=0
    let plane = Plane::from_normal(Vector3::new(0.0, 1.0, 0.0), 0.0);

    // A polygon that crosses y=0 line: a square from ( -1, -1 ) to (1, 1 )
    let poly = make_polygon_3d(&[
        [-1.0, -1.0, 0.0],
        [1.0, -1.0, 0.0],
        [1.0, 1.0, 0.0],
        [-1.0, 1.0, 0.0],
    ]);

    let (cf, cb, f, b) = plane.split_polygon(&poly);
    assert_eq!(cf.len(), 0);
    assert_eq!(cb.len(), 0);
    assert_eq!(f.len(), 1);
    assert_eq!(b.len(), 1);

    let front_poly = &f[0];
    let back_poly = &b[0];
    assert_eq!(front_poly.vertices.len(), 4);
    assert_eq!(back_poly.vertices.len(), 4);
    assert!(front_poly.vertices.iter().all(|v| v.pos.y >= -EPSILON));
    assert!(back_poly.vertices.iter().all(|v| v.pos.y <= EPSILON));

    // fragments keep the parent's plane and the halves add back up
    assert_eq!(front_poly.plane, poly.plane);
    assert_eq!(back_poly.plane, poly.plane);
    assert!((front_poly.area() + back_poly.area() - poly.area()).abs() < 1e-12);
}

#[test]
fn split_interpolates_all_attributes() {
    let plane = Plane::from_normal(Vector3::x(), 0.5);
    let tri: Polygon<()> = Polygon::new(
        vec![
            Vertex::with_uv(Point3::new(0.0, 0.0, 0.0), Vector3::z(), Vector2::new(0.0, 0.0)),
            Vertex::with_uv(Point3::new(1.0, 0.0, 0.0), Vector3::z(), Vector2::new(1.0, 0.0)),
            Vertex::with_uv(Point3::new(0.0, 1.0, 0.0), Vector3::z(), Vector2::new(0.0, 1.0)),
        ],
        None,
    )
    .unwrap();

    let (_, _, front, back) = plane.split_polygon(&tri);
    assert_eq!(front.len(), 1);
    assert_eq!(back.len(), 1);
    assert_eq!(front[0].vertices.len(), 3);
    assert_eq!(back[0].vertices.len(), 4);

    let crossing = front[0]
        .vertices
        .iter()
        .find(|v| (v.pos.x - 0.5).abs() < 1e-12 && v.pos.y.abs() < 1e-12)
        .unwrap();
    assert!((crossing.uv - Vector2::new(0.5, 0.0)).norm() < 1e-12);
}

#[test]
fn split_keeps_touching_vertex_in_both_fragments() {
    // the plane passes through one vertex and crosses the opposite edge
    let plane = Plane::from_normal(Vector3::x(), 0.0);
    let tri = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [-1.0, 1.0, 0.0]]);

    let (_, _, front, back) = plane.split_polygon(&tri);
    assert_eq!(front.len(), 1);
    assert_eq!(back.len(), 1);
    assert_eq!(front[0].vertices.len(), 3);
    assert_eq!(back[0].vertices.len(), 3);
    assert!(front[0].vertices.iter().any(|v| v.pos == Point3::origin()));
    assert!(back[0].vertices.iter().any(|v| v.pos == Point3::origin()));
}

#[test]
fn coplanar_routing_uses_orientation_not_position() {
    let plane = Plane::from_normal(Vector3::z(), 0.0);
    let up = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let mut down = up.clone();
    down.flip();

    let (cf, cb, f, b) = plane.split_polygon(&up);
    assert_eq!((cf.len(), cb.len(), f.len(), b.len()), (1, 0, 0, 0));

    let (cf, cb, f, b) = plane.split_polygon(&down);
    assert_eq!((cf.len(), cb.len(), f.len(), b.len()), (0, 1, 0, 0));
}

#[test]
fn near_plane_vertices_count_as_coplanar() {
    let plane = Plane::from_normal(Vector3::z(), 0.0);
    let h = 0.5 * EPSILON;
    let tri = make_polygon_3d(&[[0.0, 0.0, h], [1.0, 0.0, h], [0.0, 1.0, h]]);
    let (cf, _, f, _) = plane.split_polygon(&tri);
    assert_eq!(cf.len(), 1);
    assert!(f.is_empty());
}
