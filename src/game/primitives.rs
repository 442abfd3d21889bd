//=========================================================================
// Primitive Geometry
//=========================================================================
//
// CPU-side vertex generation for the built-in shapes.
//
// Generated once per shape by the `PrimitiveFactory` and shared between
// every actor drawn with it. Unit-sized, centred on the origin.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::{Color, Vec3};

//=== ShapeType ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    WireframeLine,
    WireframeOrigin,
    ColoredQuad,
    TexturedQuad,
    TexturedCube,
    Billboard,
    NormalCube,
}

impl ShapeType {
    pub const ALL: [ShapeType; 7] = [
        Self::WireframeLine,
        Self::WireframeOrigin,
        Self::ColoredQuad,
        Self::TexturedQuad,
        Self::TexturedCube,
        Self::Billboard,
        Self::NormalCube,
    ];
}

//=== PrimitiveType =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveType {
    LineList,
    #[default]
    TriangleList,
    TriangleStrip,
}

//=== Vertex ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Color,
    pub uv: (f32, f32),
    pub normal: Vec3,
}

impl Vertex {
    fn colored(position: Vec3, color: Color) -> Self {
        Self { position, color, uv: (0.0, 0.0), normal: Vec3::ZERO }
    }

    fn textured(position: Vec3, uv: (f32, f32)) -> Self {
        Self { position, color: Color::WHITE, uv, normal: Vec3::ZERO }
    }
}

//=== VertexData ==========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexData {
    pub vertices: Vec<Vertex>,
    pub indices: Option<Vec<u16>>,
    pub primitive_type: PrimitiveType,
    pub primitive_count: usize,
    /// Billboards turn to face the active camera when drawn.
    pub billboard: bool,
}

impl VertexData {
    fn new(vertices: Vec<Vertex>, primitive_type: PrimitiveType, primitive_count: usize) -> Self {
        Self {
            vertices,
            indices: None,
            primitive_type,
            primitive_count,
            billboard: false,
        }
    }

    /// Number of vertices submitted when drawing (indices if indexed).
    pub fn draw_count(&self) -> usize {
        self.indices.as_ref().map_or(self.vertices.len(), Vec::len)
    }

    /// Builds the vertex data for `shape`. `color` tints coloured shapes.
    pub fn generate(shape: ShapeType, color: Color) -> Self {
        match shape {
            ShapeType::WireframeLine => Self::new(
                vec![
                    Vertex::colored(Vec3::new(-0.5, 0.0, 0.0), color),
                    Vertex::colored(Vec3::new(0.5, 0.0, 0.0), color),
                ],
                PrimitiveType::LineList,
                1,
            ),
            ShapeType::WireframeOrigin => Self::new(
                vec![
                    Vertex::colored(Vec3::ZERO, Color::RED),
                    Vertex::colored(Vec3::UNIT_X, Color::RED),
                    Vertex::colored(Vec3::ZERO, Color::GREEN),
                    Vertex::colored(Vec3::UNIT_Y, Color::GREEN),
                    Vertex::colored(Vec3::ZERO, Color::BLUE),
                    Vertex::colored(Vec3::UNIT_Z, Color::BLUE),
                ],
                PrimitiveType::LineList,
                3,
            ),
            ShapeType::ColoredQuad => Self::new(
                quad_corners()
                    .into_iter()
                    .map(|(position, _)| Vertex::colored(position, color))
                    .collect(),
                PrimitiveType::TriangleStrip,
                2,
            ),
            ShapeType::TexturedQuad => Self::new(
                quad_corners()
                    .into_iter()
                    .map(|(position, uv)| Vertex::textured(position, uv))
                    .collect(),
                PrimitiveType::TriangleStrip,
                2,
            ),
            ShapeType::Billboard => Self {
                billboard: true,
                ..Self::generate(ShapeType::TexturedQuad, color)
            },
            ShapeType::TexturedCube => {
                let vertices = cube_triangles()
                    .into_iter()
                    .map(|v| Vertex { normal: Vec3::ZERO, ..v })
                    .collect();
                Self::new(vertices, PrimitiveType::TriangleList, 12)
            }
            ShapeType::NormalCube => {
                let (vertices, indices) = index_vertices(&cube_triangles());
                Self {
                    indices: Some(indices),
                    ..Self::new(vertices, PrimitiveType::TriangleList, 12)
                }
            }
        }
    }
}

//=== Generators ==========================================================

/// Strip order: top-left, top-right, bottom-left, bottom-right.
fn quad_corners() -> [(Vec3, (f32, f32)); 4] {
    [
        (Vec3::new(-0.5, 0.5, 0.0), (0.0, 0.0)),
        (Vec3::new(0.5, 0.5, 0.0), (1.0, 0.0)),
        (Vec3::new(-0.5, -0.5, 0.0), (0.0, 1.0)),
        (Vec3::new(0.5, -0.5, 0.0), (1.0, 1.0)),
    ]
}

/// 36 textured, lit vertices; counter-clockwise seen from outside.
fn cube_triangles() -> Vec<Vertex> {
    // (normal, u axis, v axis) with u × v == normal
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
    ];

    let mut vertices = Vec::with_capacity(36);
    for (normal, u, v) in FACES {
        let centre = normal * 0.5;
        let corner = |su: f32, sv: f32, uv: (f32, f32)| Vertex {
            position: centre + u * (0.5 * su) + v * (0.5 * sv),
            color: Color::WHITE,
            uv,
            normal,
        };
        let a = corner(-1.0, -1.0, (0.0, 1.0));
        let b = corner(1.0, -1.0, (1.0, 1.0));
        let c = corner(1.0, 1.0, (1.0, 0.0));
        let d = corner(-1.0, 1.0, (0.0, 0.0));
        vertices.extend_from_slice(&[a, b, c, a, c, d]);
    }
    vertices
}

/// Collapses identical vertices and returns the unique set plus indices.
fn index_vertices(source: &[Vertex]) -> (Vec<Vertex>, Vec<u16>) {
    let mut unique: Vec<Vertex> = Vec::new();
    let mut indices = Vec::with_capacity(source.len());

    for vertex in source {
        let index = match unique.iter().position(|u| u == vertex) {
            Some(found) => found,
            None => {
                unique.push(*vertex);
                unique.len() - 1
            }
        };
        indices.push(index as u16);
    }

    (unique, indices)
}

//=========================================================================
// Unit Tests
//=========================================================================
