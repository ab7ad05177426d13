use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Material {
    Metal,
    Plastic,
    Wood,
}

/// A purchasable part from the read-only catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub part_number: String,
    pub description: String,
    pub material: Material,
}

impl Item {
    pub fn new(
        part_number: impl Into<String>,
        description: impl Into<String>,
        material: Material,
    ) -> Self {
        Self {
            part_number: part_number.into(),
            description: description.into(),
            material,
        }
    }

    pub fn is_metal(&self) -> bool {
        self.material == Material::Metal
    }
}
