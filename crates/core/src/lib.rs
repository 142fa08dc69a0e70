//! Core world model - pure, deterministic, and testable
//!
//! This module contains the map, the player camera, the raycaster and the
//! movement rules. Apart from the asset loader it does no I/O, making it:
//!
//! - **Deterministic**: The same map, player and input produce the same rays
//! - **Testable**: Geometry and collision are checked without a terminal
//! - **Portable**: Can feed any renderer (terminal, image, headless)
//! - **Fast**: Ray buffers are reused, so casting a frame does not allocate
//!
//! # Module Structure
//!
//! - [`map`]: Static tile grid; everything outside it is wall
//! - [`player`]: Position, facing direction, camera plane and jump arc
//! - [`raycast`]: DDA traversal producing per-column [`RayHit`]s
//! - [`movement`]: Input intents and per-axis sliding collision
//! - [`sprite`]: Billboards and their camera projection
//! - [`texture`]: Wall brightness grids and sprite ASCII art
//! - [`assets`]: Built-in and on-disk asset loading
//!
//! # Example
//!
//! ```
//! use term_dungeon_core::{Map, Player, Raycaster};
//! use term_dungeon_types::Vec2;
//!
//! // 10x10 room, player in the middle looking east.
//! let map = Map::bordered(10, 10, 1);
//! let player = Player::new(Vec2::new(5.0, 5.0), 0.0, 0.66);
//!
//! let mut raycaster = Raycaster::new();
//! let hits = raycaster.cast(&map, &player, 80);
//!
//! // The centre column looks straight at the inner face of the east wall.
//! let centre = hits[40].unwrap();
//! assert!((centre.distance - 4.0).abs() < 1e-9);
//! ```

pub mod assets;
pub mod map;
pub mod movement;
pub mod player;
pub mod raycast;
pub mod sprite;
pub mod texture;

pub use term_dungeon_types as types;

// Re-export commonly used types for convenience
pub use assets::{parse_sprites, AssetError, World};
pub use map::{Cell, Map};
pub use movement::{apply_intent, slide, Intent, MovementTuning};
pub use player::Player;
pub use raycast::{cast_ray, RayHit, Raycaster};
pub use sprite::{project, Sprite, SpriteProjection};
pub use texture::{SpriteTexture, WallTexture, NEUTRAL_TEXEL, TRANSPARENT};
