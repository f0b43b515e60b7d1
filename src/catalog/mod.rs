//! Static game data: monsters, elements and classes.

pub mod data;

use crate::character::types::CharacterClass;
use crate::combat::element::Element;
use crate::combat::types::MonsterTemplate;
use crate::error::{RepositoryError, Result};
use crate::store::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    monsters: Vec<MonsterTemplate>,
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default)]
    classes: Vec<CharacterClass>,
}

/// Catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    monsters: Vec<MonsterTemplate>,
    elements: HashMap<u32, Element>,
    classes: HashMap<u32, CharacterClass>,
}

impl StaticCatalog {
    pub fn new(
        monsters: Vec<MonsterTemplate>,
        elements: Vec<Element>,
        classes: Vec<CharacterClass>,
    ) -> Self {
        Self {
            monsters,
            elements: elements.into_iter().map(|e| (e.id, e)).collect(),
            classes: classes.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// The built-in data set.
    pub fn builtin() -> Self {
        Self::new(
            data::default_monsters(),
            data::default_elements(),
            data::default_classes(),
        )
    }

    /// Parses `{"monsters": [...], "elements": [...], "classes": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(Self::new(file.monsters, file.elements, file.classes))
    }
}

impl Catalog for StaticCatalog {
    fn monsters(&self) -> &[MonsterTemplate] {
        &self.monsters
    }

    fn element(&self, id: u32) -> Option<&Element> {
        self.elements.get(&id)
    }

    fn class(&self, id: u32) -> Option<&CharacterClass> {
        self.classes.get(&id)
    }
}
