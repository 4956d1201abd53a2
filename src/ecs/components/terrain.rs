//! Terrain component.

use crate::terrain::HeightField;

/// Marks an entity as collidable terrain. The entity's `Transform`
/// position is the world origin of the height field.
#[derive(Debug, Clone)]
pub struct Terrain(pub HeightField);

impl Terrain {
    pub fn field(&self) -> &HeightField {
        &self.0
    }
}

impl From<HeightField> for Terrain {
    fn from(field: HeightField) -> Self {
        Self(field)
    }
}
