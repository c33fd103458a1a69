use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::SpriteId;

#[derive(Clone, Debug)]
pub struct Sprite {
    pub id: SpriteId,
    pub key: String,
    pub texture_candidates: Vec<PathBuf>,
}

/// Catalog of atlas sprites keyed by name. Index 0 is a reserved empty
/// sentinel so `SpriteId::EMPTY` never aliases a real sprite.
#[derive(Default, Clone, Debug)]
pub struct SpriteCatalog {
    pub sprites: Vec<Sprite>,
    pub by_key: HashMap<String, SpriteId>,
}

impl SpriteCatalog {
    pub fn new() -> Self {
        let mut cat = Self {
            sprites: Vec::new(),
            by_key: HashMap::new(),
        };
        cat.sprites.push(Sprite {
            id: SpriteId::EMPTY,
            key: String::new(),
            texture_candidates: Vec::new(),
        });
        cat
    }

    pub fn get_id(&self, key: &str) -> Option<SpriteId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0 as usize)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: SpritesConfig = toml::from_str(toml_str)?;
        let mut catalog = SpriteCatalog::new();
        let mut entries: Vec<(String, Vec<String>)> = cfg.sprites.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so SpriteId assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, paths) in entries {
            let id = SpriteId(catalog.sprites.len() as u16);
            catalog.by_key.insert(key.clone(), id);
            catalog.sprites.push(Sprite {
                id,
                key,
                texture_candidates: paths.into_iter().map(PathBuf::from).collect(),
            });
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct SpritesConfig {
    // sprite key -> atlas texture path candidates
    pub sprites: HashMap<String, Vec<String>>,
}
