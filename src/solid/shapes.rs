//! 3D Shapes as `Solid`s

use crate::errors::ValidationError;
use crate::float_types::{PI, Real, TAU};
use crate::solid::Solid;
use crate::solid::polygon::Polygon;
use crate::solid::vertex::Vertex;
use nalgebra::{Point3, Vector2, Vector3};
use std::fmt::Debug;

/// Cube faces: corner indices, outward normal. Bit 0 of a corner index picks
/// +x, bit 1 picks +y, bit 2 picks +z.
const CUBE_FACES: [([usize; 4], [Real; 3]); 6] = [
    ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
    ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
    ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
    ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
    ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
    ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
];

/// Texture coordinates of the four corners of every cube face.
const CUBE_UVS: [[Real; 2]; 4] = [[1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

fn positive(name: &str, value: Real) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::Other(
            format!("{name} must be positive and finite, got {value}"),
            None,
        ))
    }
}

fn at_least(name: &str, value: usize, min: usize) -> Result<(), ValidationError> {
    if value >= min {
        Ok(())
    } else {
        Err(ValidationError::Other(
            format!("{name} must be at least {min}, got {value}"),
            None,
        ))
    }
}

impl<S: Clone + Debug + Send + Sync> Solid<S> {
    /// Axis-aligned cube with half-extent `radius` around `center`.
    /// A radius of 0.5 gives a unit cube.
    pub fn cube(
        radius: Real,
        center: Point3<Real>,
        metadata: Option<S>,
    ) -> Result<Solid<S>, ValidationError> {
        Self::cuboid(Vector3::repeat(2.0 * radius), center, metadata)
    }

    /// Axis-aligned box with edge lengths `size` around `center`.
    ///
    /// ```text
    ///       6-------7
    ///      /|      /|
    ///     4-------5 |
    ///     | 2-----|-3
    ///     |/      |/        y  z
    ///     0-------1         | /
    ///                       +--x
    /// ```
    pub fn cuboid(
        size: Vector3<Real>,
        center: Point3<Real>,
        metadata: Option<S>,
    ) -> Result<Solid<S>, ValidationError> {
        positive("cuboid width", size.x)?;
        positive("cuboid height", size.y)?;
        positive("cuboid depth", size.z)?;

        let half = size * 0.5;
        let corner = |i: usize| {
            let sign = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
            center + Vector3::new(sign(1) * half.x, sign(2) * half.y, sign(4) * half.z)
        };

        let polygons = CUBE_FACES
            .iter()
            .map(|(corners, normal)| {
                let normal = Vector3::from(*normal);
                let vertices = corners
                    .iter()
                    .zip(CUBE_UVS.iter())
                    .map(|(&i, uv)| Vertex::with_uv(corner(i), normal, Vector2::from(*uv)))
                    .collect();
                Polygon::new(vertices, metadata.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Solid::from_polygons(&polygons))
    }

    /// UV sphere centred on the origin with the poles on the Y axis.
    ///
    /// `slices` divide the azimuth, `stacks` the polar angle. The first and
    /// last stacks are triangle fans around the poles; every other cell is a
    /// planar quad.
    pub fn sphere(
        radius: Real,
        slices: usize,
        stacks: usize,
        metadata: Option<S>,
    ) -> Result<Solid<S>, ValidationError> {
        positive("sphere radius", radius)?;
        at_least("sphere slices", slices, 3)?;
        at_least("sphere stacks", stacks, 2)?;

        let vertex = |i: usize, j: usize| {
            let theta = i as Real / slices as Real * TAU;
            let phi = j as Real / stacks as Real * PI;
            let dir = Vector3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            Vertex::with_uv(
                Point3::from(dir * radius),
                dir,
                Vector2::new(i as Real / slices as Real, j as Real / stacks as Real),
            )
        };

        let mut polygons = Vec::with_capacity(slices * stacks);
        for i in 0..slices {
            for j in 0..stacks {
                let mut vertices = vec![vertex(i, j)];
                if j > 0 {
                    vertices.push(vertex(i + 1, j));
                }
                if j < stacks - 1 {
                    vertices.push(vertex(i + 1, j + 1));
                }
                vertices.push(vertex(i, j + 1));
                polygons.push(Polygon::new(vertices, metadata.clone())?);
            }
        }

        Ok(Solid::from_polygons(&polygons))
    }

    /// Cylinder along the Y axis, centred on the origin, spanning
    /// `y ∈ [-height/2, height/2]`.
    pub fn cylinder(
        radius: Real,
        height: Real,
        slices: usize,
        metadata: Option<S>,
    ) -> Result<Solid<S>, ValidationError> {
        Self::frustum(radius, radius, height, slices, metadata)
    }

    /// Cone along the Y axis: base of `radius` at `y = -height/2`, apex at
    /// `y = height/2`.
    pub fn cone(
        radius: Real,
        height: Real,
        slices: usize,
        metadata: Option<S>,
    ) -> Result<Solid<S>, ValidationError> {
        Self::frustum(radius, 0.0, height, slices, metadata)
    }

    /// Shared body of [`Solid::cylinder`] and [`Solid::cone`]. A zero top
    /// radius collapses the top ring into an apex.
    fn frustum(
        bottom_radius: Real,
        top_radius: Real,
        height: Real,
        slices: usize,
        metadata: Option<S>,
    ) -> Result<Solid<S>, ValidationError> {
        positive("radius", bottom_radius)?;
        positive("height", height)?;
        at_least("slices", slices, 3)?;

        let half = height * 0.5;
        let bottom_center = Vertex::new(Point3::new(0.0, -half, 0.0), -Vector3::y());
        let top_center = Vertex::new(Point3::new(0.0, half, 0.0), Vector3::y());

        // (-sin, 0, cos) keeps the rings counter-clockwise seen from +y
        let out = |t: Real| {
            let angle = t * TAU;
            Vector3::new(-angle.sin(), 0.0, angle.cos())
        };
        let ring = |t: Real, y: Real, r: Real, normal: Vector3<Real>| {
            Vertex::new(Point3::from(out(t) * r + Vector3::new(0.0, y, 0.0)), normal)
        };

        let mut polygons = Vec::with_capacity(3 * slices);
        for i in 0..slices {
            let t0 = i as Real / slices as Real;
            let t1 = (i + 1) as Real / slices as Real;

            polygons.push(Polygon::new(
                vec![
                    bottom_center,
                    ring(t0, -half, bottom_radius, -Vector3::y()),
                    ring(t1, -half, bottom_radius, -Vector3::y()),
                ],
                metadata.clone(),
            )?);

            if top_radius > 0.0 {
                polygons.push(Polygon::new(
                    vec![
                        ring(t1, -half, bottom_radius, out(t1)),
                        ring(t0, -half, bottom_radius, out(t0)),
                        ring(t0, half, top_radius, out(t0)),
                        ring(t1, half, top_radius, out(t1)),
                    ],
                    metadata.clone(),
                )?);
                polygons.push(Polygon::new(
                    vec![
                        top_center,
                        ring(t1, half, top_radius, Vector3::y()),
                        ring(t0, half, top_radius, Vector3::y()),
                    ],
                    metadata.clone(),
                )?);
            } else {
                polygons.push(Polygon::new(
                    vec![
                        top_center,
                        ring(t1, -half, bottom_radius, out(t1)),
                        ring(t0, -half, bottom_radius, out(t0)),
                    ],
                    metadata.clone(),
                )?);
            }
        }

        Ok(Solid::from_polygons(&polygons))
    }

    /// Regular icosahedron centred on the origin with circumradius `radius`.
    pub fn icosahedron(radius: Real, metadata: Option<S>) -> Result<Solid<S>, ValidationError> {
        positive("icosahedron radius", radius)?;

        let t = (1.0 + (5.0 as Real).sqrt()) * 0.5;
        let corners: [Vector3<Real>; 12] = [
            Vector3::new(-1.0, t, 0.0),
            Vector3::new(1.0, t, 0.0),
            Vector3::new(-1.0, -t, 0.0),
            Vector3::new(1.0, -t, 0.0),
            Vector3::new(0.0, -1.0, t),
            Vector3::new(0.0, 1.0, t),
            Vector3::new(0.0, -1.0, -t),
            Vector3::new(0.0, 1.0, -t),
            Vector3::new(t, 0.0, -1.0),
            Vector3::new(t, 0.0, 1.0),
            Vector3::new(-t, 0.0, -1.0),
            Vector3::new(-t, 0.0, 1.0),
        ];
        // counter-clockwise seen from outside
        const FACES: [[usize; 3]; 20] = [
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        FACES
            .iter()
            .map(|face| {
                let vertices = face
                    .iter()
                    .map(|&i| {
                        let dir = corners[i].normalize();
                        Vertex::new(Point3::from(dir * radius), dir)
                    })
                    .collect();
                let mut poly = Polygon::new(vertices, metadata.clone())?;
                poly.set_new_normal();
                Ok(poly)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|polygons| Solid::from_polygons(&polygons))
    }

    /// Ring torus around the Z axis, centred on the origin.
    ///
    /// * `major_radius` – distance from the origin to the centre of the tube
    /// * `minor_radius` – tube radius, strictly less than `major_radius`
    /// * `segments_major` – quads around the Z axis
    /// * `segments_minor` – quads around the tube
    ///
    /// Each cell spans two neighbouring tube circles and is an isosceles
    /// trapezoid, so every face is a planar convex quad.
    pub fn torus(
        major_radius: Real,
        minor_radius: Real,
        segments_major: usize,
        segments_minor: usize,
        metadata: Option<S>,
    ) -> Result<Solid<S>, ValidationError> {
        positive("torus major radius", major_radius)?;
        positive("torus minor radius", minor_radius)?;
        at_least("torus major segments", segments_major, 3)?;
        at_least("torus minor segments", segments_minor, 3)?;
        if minor_radius >= major_radius {
            return Err(ValidationError::Other(
                format!(
                    "torus minor radius {minor_radius} must be less than major radius {major_radius}"
                ),
                None,
            ));
        }

        let vertex = |i: usize, j: usize| {
            let u = i as Real / segments_major as Real;
            let v = j as Real / segments_minor as Real;
            let (theta, phi) = (u * TAU, v * TAU);
            let radial = Vector3::new(theta.cos(), theta.sin(), 0.0);
            let normal = radial * phi.cos() + Vector3::z() * phi.sin();
            Vertex::with_uv(
                Point3::from(radial * major_radius + normal * minor_radius),
                normal,
                Vector2::new(v, u),
            )
        };

        let mut polygons = Vec::with_capacity(segments_major * segments_minor);
        for i in 0..segments_major {
            for j in 0..segments_minor {
                polygons.push(Polygon::new(
                    vec![vertex(i, j), vertex(i + 1, j), vertex(i + 1, j + 1), vertex(i, j + 1)],
                    metadata.clone(),
                )?);
            }
        }

        Ok(Solid::from_polygons(&polygons))
    }

    /// A single `width` x `height` rectangle in the XY plane, centred on the
    /// origin and facing +Z. Not closed; useful as an extrusion profile.
    pub fn quad(width: Real, height: Real, metadata: Option<S>) -> Result<Solid<S>, ValidationError> {
        positive("quad width", width)?;
        positive("quad height", height)?;

        let (hw, hh) = (width * 0.5, height * 0.5);
        let corners = [
            (Point3::new(-hw, -hh, 0.0), Vector2::new(0.0, 0.0)),
            (Point3::new(hw, -hh, 0.0), Vector2::new(1.0, 0.0)),
            (Point3::new(hw, hh, 0.0), Vector2::new(1.0, 1.0)),
            (Point3::new(-hw, hh, 0.0), Vector2::new(0.0, 1.0)),
        ];
        let vertices = corners
            .iter()
            .map(|&(pos, uv)| Vertex::with_uv(pos, Vector3::z(), uv))
            .collect();

        Ok(Solid::from_polygons(&[Polygon::new(vertices, metadata)?]))
    }
}
