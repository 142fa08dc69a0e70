//! Asset loading: map, textures and sprites, from disk or built in.
//!
//! An asset directory looks like:
//!
//! ```text
//! <dir>/maps/<name>.txt        digit grid (required)
//! <dir>/maps/<name>.sprites    JSON sprite list (optional)
//! <dir>/wall_textures/*.txt    digit grids, sorted by file name
//! <dir>/sprite_textures/*.txt  ASCII art, sorted by file name
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::map::Map;
use crate::sprite::{Sprite, SpriteRecord};
use crate::texture::{SpriteTexture, WallTexture};

const EMBEDDED_WALL_TEXTURES: [&str; 4] = [
    include_str!("../../../assets/wall_textures/1_brick.txt"),
    include_str!("../../../assets/wall_textures/2_stone.txt"),
    include_str!("../../../assets/wall_textures/3_wood.txt"),
    include_str!("../../../assets/wall_textures/4_moss.txt"),
];

const EMBEDDED_SPRITE_TEXTURES: [&str; 2] = [
    include_str!("../../../assets/sprite_textures/1_tree.txt"),
    include_str!("../../../assets/sprite_textures/2_lamp.txt"),
];

const EMBEDDED_SPRITES: &str = include_str!("../../../assets/maps/dungeon.sprites");

/// Failure to load or validate an asset. Aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{what} is empty")]
    Empty { what: &'static str },

    #[error("{what} line {line} has {found} cells, expected {expected}")]
    Ragged {
        what: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{what} line {line} column {column}: {ch:?} is not a digit")]
    InvalidDigit {
        what: &'static str,
        line: usize,
        column: usize,
        ch: char,
    },

    #[error("invalid sprite list: {0}")]
    Sprites(#[from] serde_json::Error),

    #[error("map uses wall texture {id} but only {available} wall textures are loaded")]
    MissingWallTexture { id: u8, available: usize },

    #[error("sprite at ({x}, {y}) uses sprite texture {index} but only {available} are loaded")]
    MissingSpriteTexture {
        x: f64,
        y: f64,
        index: usize,
        available: usize,
    },
}

/// Everything the renderer needs besides the player.
#[derive(Debug, Clone)]
pub struct World {
    pub map: Map,
    pub wall_textures: Vec<WallTexture>,
    pub sprite_textures: Vec<SpriteTexture>,
    pub sprites: Vec<Sprite>,
}

impl World {
    /// A world with geometry only: flat shading, no sprites.
    pub fn from_map(map: Map) -> Self {
        Self {
            map,
            wall_textures: Vec::new(),
            sprite_textures: Vec::new(),
            sprites: Vec::new(),
        }
    }

    /// The built-in dungeon.
    pub fn embedded() -> Result<Self, AssetError> {
        let world = Self {
            map: Map::embedded()?,
            wall_textures: EMBEDDED_WALL_TEXTURES
                .iter()
                .map(|t| WallTexture::parse(t))
                .collect::<Result<_, _>>()?,
            sprite_textures: EMBEDDED_SPRITE_TEXTURES
                .iter()
                .map(|t| SpriteTexture::parse(t))
                .collect::<Result<_, _>>()?,
            sprites: parse_sprites(EMBEDDED_SPRITES)?,
        };
        world.validate()?;
        Ok(world)
    }

    /// Load map `name` and all textures from an asset directory.
    pub fn load(dir: &Path, name: &str) -> Result<Self, AssetError> {
        let maps = dir.join("maps");
        let map = Map::parse(&read(&maps.join(format!("{name}.txt")))?)?;

        let sprites_path = maps.join(format!("{name}.sprites"));
        let sprites = if sprites_path.is_file() {
            parse_sprites(&read(&sprites_path)?)?
        } else {
            Vec::new()
        };

        let wall_textures = text_files(&dir.join("wall_textures"))?
            .iter()
            .map(|p| read(p).and_then(|t| WallTexture::parse(&t)))
            .collect::<Result<Vec<_>, _>>()?;
        let sprite_textures = text_files(&dir.join("sprite_textures"))?
            .iter()
            .map(|p| read(p).and_then(|t| SpriteTexture::parse(&t)))
            .collect::<Result<Vec<_>, _>>()?;

        let world = Self {
            map,
            wall_textures,
            sprite_textures,
            sprites,
        };
        world.validate()?;

        info!(
            dir = %dir.display(),
            map = name,
            width = world.map.width(),
            height = world.map.height(),
            wall_textures = world.wall_textures.len(),
            sprite_textures = world.sprite_textures.len(),
            sprites = world.sprites.len(),
            "assets loaded"
        );
        Ok(world)
    }

    /// Check that every texture reference resolves.
    ///
    /// A world without wall textures is valid (it renders flat); once any are
    /// loaded, every id on the map must have one.
    pub fn validate(&self) -> Result<(), AssetError> {
        let max_id = self.map.max_texture_id();
        if !self.wall_textures.is_empty() && max_id as usize > self.wall_textures.len() {
            return Err(AssetError::MissingWallTexture {
                id: max_id,
                available: self.wall_textures.len(),
            });
        }
        for sprite in &self.sprites {
            if sprite.texture >= self.sprite_textures.len() {
                return Err(AssetError::MissingSpriteTexture {
                    x: sprite.pos.x,
                    y: sprite.pos.y,
                    index: sprite.texture,
                    available: self.sprite_textures.len(),
                });
            }
        }
        Ok(())
    }

    pub fn has_wall_textures(&self) -> bool {
        !self.wall_textures.is_empty()
    }
}

/// Parse a JSON sprite list.
pub fn parse_sprites(text: &str) -> Result<Vec<Sprite>, AssetError> {
    let records: Vec<SpriteRecord> = serde_json::from_str(text)?;
    Ok(records.into_iter().map(Sprite::from).collect())
}

fn read(path: &Path) -> Result<String, AssetError> {
    debug!(path = %path.display(), "reading asset");
    fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `*.txt` files in `dir`, sorted by name. A missing directory yields none.
fn text_files(dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(AssetError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| AssetError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_world_is_consistent() {
        let world = World::embedded().unwrap();
        assert!(world.has_wall_textures());
        assert!(world.map.max_texture_id() as usize <= world.wall_textures.len());
        assert!(!world.sprites.is_empty());
        for sprite in &world.sprites {
            assert!(!world.map.is_wall_at(sprite.pos));
        }
    }

    #[test]
    fn flat_world_needs_no_textures() {
        let world = World::from_map(Map::bordered(5, 5, 7));
        assert!(world.validate().is_ok());
        assert!(!world.has_wall_textures());
    }

    #[test]
    fn missing_wall_texture_is_reported() {
        let mut world = World::from_map(Map::bordered(5, 5, 3));
        world.wall_textures.push(WallTexture::parse("5").unwrap());
        assert!(matches!(
            world.validate(),
            Err(AssetError::MissingWallTexture { id: 3, available: 1 })
        ));
    }

    #[test]
    fn sprite_with_unknown_texture_is_reported() {
        let mut world = World::from_map(Map::bordered(5, 5, 1));
        world.sprites = parse_sprites(r#"[{"pos": [2.5, 2.5], "texture_index": 0}]"#).unwrap();
        assert!(matches!(
            world.validate(),
            Err(AssetError::MissingSpriteTexture { index: 0, .. })
        ));
    }

    #[test]
    fn malformed_sprite_json_is_an_asset_error() {
        assert!(matches!(
            parse_sprites(r#"[{"pos": [1.0]}]"#),
            Err(AssetError::Sprites(_))
        ));
    }
}
