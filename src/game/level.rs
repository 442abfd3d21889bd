//=========================================================================
// Level Loader
//=========================================================================
//
// Places actors from a colour-coded image: each mapped pixel becomes a
// clone of the prototype registered for its colour.
//
//   pixel (x, z) ─► prototype[colour].clone() at (x·sx, y, z·sz) + offset
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::math::{Color, Vec3};
use crate::game::actor::{Actor, ActorId};

//=== LevelError ==========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// Pixel buffer length differs from `width * height`.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "Level image needs {} pixels, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for LevelError {}

//=== LevelImage ==========================================================

/// Row-major colour grid; rows run along Z, columns along X.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelImage {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl LevelImage {
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self, LevelError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(LevelError::SizeMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    /// Image filled with `background` except where `paint` returns a colour.
    pub fn from_fn(
        width: usize,
        height: usize,
        background: Color,
        paint: impl Fn(usize, usize) -> Option<Color>,
    ) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for z in 0..height {
            for x in 0..width {
                pixels.push(paint(x, z).unwrap_or(background));
            }
        }
        Self { width, height, pixels }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, z: usize) -> Option<Color> {
        if x >= self.width || z >= self.height {
            return None;
        }
        self.pixels.get(z * self.width + x).copied()
    }
}

//=== Placement ===========================================================

/// World mapping of image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Units per pixel along X and Z.
    pub scale: (f32, f32),
    pub height: f32,
    pub offset: Vec3,
}

//=== LevelLoader =========================================================

#[derive(Debug, Default)]
pub struct LevelLoader {
    prototypes: HashMap<Color, Actor>,
}

impl LevelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `color` to `prototype`. Replaces any previous mapping.
    pub fn add_prototype(&mut self, color: Color, prototype: Actor) {
        self.prototypes.insert(color, prototype);
    }

    pub fn prototype_count(&self) -> usize {
        self.prototypes.len()
    }

    /// Instantiates every mapped pixel. Unmapped colours are skipped.
    ///
    /// `next_id` supplies ids in scan order (row by row).
    pub fn process(
        &self,
        image: &LevelImage,
        placement: Placement,
        mut next_id: impl FnMut() -> ActorId,
    ) -> Vec<Actor> {
        let mut actors = Vec::new();

        for z in 0..image.height() {
            for x in 0..image.width() {
                let Some(prototype) = image.pixel(x, z).and_then(|c| self.prototypes.get(&c)) else {
                    continue;
                };

                let mut actor = prototype.clone();
                actor.id = next_id();
                actor.name = format!("{} {}-{}", prototype.name, x, z);
                actor.transform.translation = Vec3::new(
                    x as f32 * placement.scale.0,
                    placement.height,
                    z as f32 * placement.scale.1,
                ) + placement.offset;
                actors.push(actor);
            }
        }

        debug!(target: "game", "Level image produced {} actors", actors.len());
        actors
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::actor::{ActorKind, Transform3D};

    fn prototype(name: &str) -> Actor {
        Actor::new(ActorId(0), name, ActorKind::Decorator, Transform3D::default())
    }

    fn counter() -> impl FnMut() -> ActorId {
        let mut next = 100;
        move || {
            next += 1;
            ActorId(next)
        }
    }

    #[test]
    fn new_rejects_wrong_pixel_count() {
        let err = LevelImage::new(2, 2, vec![Color::BLACK; 3]);
        assert_eq!(err, Err(LevelError::SizeMismatch { expected: 4, actual: 3 }));
    }

    #[test]
    fn mapped_pixels_become_placed_clones() {
        let image = LevelImage::new(
            2,
            2,
            vec![Color::RED, Color::BLACK, Color::BLACK, Color::RED],
        )
        .unwrap();
        let mut loader = LevelLoader::new();
        loader.add_prototype(Color::RED, prototype("crate"));

        let placement = Placement {
            scale: (2.0, 10.0),
            height: 1.0,
            offset: Vec3::new(-1.0, 0.0, 5.0),
        };
        let actors = loader.process(&image, placement, counter());

        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].transform.translation, Vec3::new(-1.0, 1.0, 5.0));
        assert_eq!(actors[1].transform.translation, Vec3::new(1.0, 1.0, 15.0));
        assert_eq!(actors[0].id, ActorId(101));
        assert_eq!(actors[1].name, "crate 1-1");
    }

    #[test]
    fn unmapped_colours_are_skipped() {
        let image = LevelImage::from_fn(3, 1, Color::BLACK, |_, _| None);
        let loader = LevelLoader::new();
        let actors = loader.process(
            &image,
            Placement { scale: (1.0, 1.0), height: 0.0, offset: Vec3::ZERO },
            counter(),
        );
        assert!(actors.is_empty());
    }

    #[test]
    fn from_fn_paints_selected_pixels() {
        let image = LevelImage::from_fn(3, 2, Color::BLACK, |x, _| (x == 1).then_some(Color::BLUE));
        assert_eq!(image.pixel(1, 0), Some(Color::BLUE));
        assert_eq!(image.pixel(1, 1), Some(Color::BLUE));
        assert_eq!(image.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(image.pixel(3, 0), None);
    }
}
