//=========================================================================
// Primitive Factory
//=========================================================================
//
// Memoised archetypes, one per shape type.
//
// ```text
//   archetype(shape) ──miss──► VertexData::generate ─► Arc<PrimitiveObject>
//          │                                               (cached)
//          └──hit──► same Arc
// ```
//
// Callers instantiate an archetype by cloning it (or via
// `Actor::from_archetype`); the vertex data stays shared.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::game::actor::{EffectParameters, Transform3D};
use crate::game::primitives::{ShapeType, VertexData};

//=== PrimitiveObject =====================================================

/// Drawable template.
///
/// `Clone` deep-copies `transform` and `effect` and shares `vertex_data`,
/// so tinting or moving a clone never alters the archetype.
#[derive(Debug, Clone)]
pub struct PrimitiveObject {
    pub name: String,
    pub shape: ShapeType,
    pub transform: Transform3D,
    pub effect: EffectParameters,
    pub vertex_data: Arc<VertexData>,
}

impl PrimitiveObject {
    /// Clone renamed `"clone - <name>"`.
    pub fn clone_named(&self) -> Self {
        Self {
            name: format!("clone - {}", self.name),
            ..self.clone()
        }
    }
}

//=== PrimitiveFactory ====================================================

#[derive(Debug, Default)]
pub struct PrimitiveFactory {
    archetypes: HashMap<ShapeType, Arc<PrimitiveObject>>,
}

impl PrimitiveFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the archetype for `shape`, building it on first request.
    ///
    /// `effect` is used only when the archetype is built; later calls
    /// return the cached instance unchanged.
    pub fn archetype(&mut self, shape: ShapeType, effect: &EffectParameters) -> Arc<PrimitiveObject> {
        let entry = self.archetypes.entry(shape).or_insert_with(|| {
            debug!(target: "game", "Building archetype for {:?}", shape);
            Arc::new(PrimitiveObject {
                name: format!("Archetype - {:?}", shape),
                shape,
                transform: Transform3D::default(),
                effect: effect.clone(),
                vertex_data: Arc::new(VertexData::generate(shape, effect.diffuse_color)),
            })
        });
        Arc::clone(entry)
    }

    pub fn contains(&self, shape: ShapeType) -> bool {
        self.archetypes.contains_key(&shape)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::{Color, Vec3};

    #[test]
    fn first_request_builds_and_caches() {
        let mut factory = PrimitiveFactory::new();
        assert!(!factory.contains(ShapeType::TexturedCube));

        let cube = factory.archetype(ShapeType::TexturedCube, &EffectParameters::default());

        assert!(factory.contains(ShapeType::TexturedCube));
        assert_eq!(factory.len(), 1);
        assert_eq!(cube.name, "Archetype - TexturedCube");
    }

    #[test]
    fn repeated_requests_return_same_instance() {
        let mut factory = PrimitiveFactory::new();
        let a = factory.archetype(ShapeType::TexturedCube, &EffectParameters::default());
        let b = factory.archetype(ShapeType::TexturedCube, &EffectParameters::colored(Color::RED));

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(b.effect.diffuse_color, Color::WHITE);
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn distinct_shapes_are_distinct_archetypes() {
        let mut factory = PrimitiveFactory::new();
        for shape in ShapeType::ALL {
            factory.archetype(shape, &EffectParameters::default());
        }
        assert_eq!(factory.len(), ShapeType::ALL.len());
    }

    #[test]
    fn mutating_a_clone_leaves_archetype_untouched() {
        let mut factory = PrimitiveFactory::new();
        let archetype = factory.archetype(ShapeType::TexturedCube, &EffectParameters::textured("crate1"));

        let mut clone = archetype.clone_named();
        clone.transform.translate_by(Vec3::new(5.0, 0.0, 0.0));
        clone.effect.diffuse_color = Color::YELLOW;

        assert_eq!(clone.name, "clone - Archetype - TexturedCube");
        assert_eq!(archetype.transform.translation, Vec3::ZERO);
        assert_eq!(archetype.effect.diffuse_color, Color::WHITE);
        assert!(Arc::ptr_eq(&clone.vertex_data, &archetype.vertex_data));
    }
}
