use std::fs;
use std::path::Path;

use clap::Parser;
use serde_json::json;
use tempfile::TempDir;

use term_dungeon::cli::Args;
use term_dungeon::core::{AssetError, World};
use term_dungeon::types::Vec2;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn asset_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "maps/arena.txt", "11111\n10001\n10201\n10001\n11111\n");
    let sprites = json!([
        {"pos": [1.5, 1.5], "texture_index": 1},
        {"pos": [3.5, 3.5], "texture_index": 0},
    ]);
    write(root, "maps/arena.sprites", &sprites.to_string());
    // Sorted by file name: 1_light before 2_dark.
    write(root, "wall_textures/2_dark.txt", "11\n11\n");
    write(root, "wall_textures/1_light.txt", "99\n99\n");
    write(root, "wall_textures/notes.md", "not a texture");
    write(root, "sprite_textures/1_ghost.txt", " o \n/|\\\n");
    write(root, "sprite_textures/2_coin.txt", "$\n");
    dir
}

#[test]
fn loads_map_textures_and_sprites_from_directory() {
    let dir = asset_dir();
    let world = World::load(dir.path(), "arena").unwrap();

    assert_eq!((world.map.width(), world.map.height()), (5, 5));
    assert_eq!(world.wall_textures.len(), 2);
    assert_eq!(world.wall_textures[0].sample(0.0, 0.0), 9);
    assert_eq!(world.wall_textures[1].sample(0.0, 0.0), 1);
    assert_eq!(world.sprite_textures.len(), 2);
    assert_eq!(world.sprite_textures[1].sample(0.5, 0.5), Some('$'));
    assert_eq!(world.sprites.len(), 2);
    assert_eq!(world.sprites[0].pos, Vec2::new(1.5, 1.5));
    assert_eq!(world.sprites[0].texture, 1);
}

#[test]
fn sprites_and_texture_dirs_are_optional() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "maps/bare.txt", "111\n101\n111\n");
    let world = World::load(dir.path(), "bare").unwrap();
    assert!(world.sprites.is_empty());
    assert!(!world.has_wall_textures());
}

#[test]
fn missing_map_is_an_io_error_naming_the_file() {
    let dir = asset_dir();
    let err = World::load(dir.path(), "nowhere").unwrap_err();
    assert!(matches!(err, AssetError::Io { .. }));
    assert!(err.to_string().contains("nowhere.txt"));
}

#[test]
fn ragged_map_is_rejected() {
    let dir = asset_dir();
    write(dir.path(), "maps/arena.txt", "11111\n1001\n11111\n");
    assert!(matches!(
        World::load(dir.path(), "arena"),
        Err(AssetError::Ragged {
            line: 2,
            expected: 5,
            found: 4,
            ..
        })
    ));
}

#[test]
fn map_with_a_blank_line_is_rejected() {
    let dir = asset_dir();
    write(dir.path(), "maps/arena.txt", "11111\n10001\n\n10001\n11111\n");
    assert!(matches!(
        World::load(dir.path(), "arena"),
        Err(AssetError::Ragged {
            line: 3,
            expected: 5,
            found: 0,
            ..
        })
    ));
}

#[test]
fn bad_digit_is_rejected_with_position() {
    let dir = asset_dir();
    write(dir.path(), "maps/arena.txt", "111\n1x1\n111\n");
    assert!(matches!(
        World::load(dir.path(), "arena"),
        Err(AssetError::InvalidDigit {
            line: 2,
            column: 2,
            ch: 'x',
            ..
        })
    ));
}

#[test]
fn unknown_texture_indices_are_rejected() {
    let dir = asset_dir();
    write(dir.path(), "maps/arena.txt", "111\n131\n111\n");
    assert!(matches!(
        World::load(dir.path(), "arena"),
        Err(AssetError::MissingWallTexture { id: 3, available: 2 })
    ));

    let dir = asset_dir();
    let sprites = json!([{"pos": [2.5, 1.5], "texture_index": 5}]);
    write(dir.path(), "maps/arena.sprites", &sprites.to_string());
    assert!(matches!(
        World::load(dir.path(), "arena"),
        Err(AssetError::MissingSpriteTexture { index: 5, .. })
    ));
}

#[test]
fn cli_loads_named_map_from_assets_flag() {
    let dir = asset_dir();
    let args = Args::try_parse_from([
        "term-dungeon",
        "--assets",
        dir.path().to_str().unwrap(),
        "--map",
        "arena",
    ])
    .unwrap();
    let world = args.load_world().unwrap();
    assert_eq!(world.map.width(), 5);

    let args = Args::try_parse_from([
        "term-dungeon",
        "--assets",
        dir.path().to_str().unwrap(),
        "--map",
        "missing",
    ])
    .unwrap();
    let err = args.load_world().unwrap_err();
    assert!(format!("{err:#}").contains("missing"));
}
