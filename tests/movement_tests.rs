use proptest::prelude::*;

use term_dungeon::core::{apply_intent, slide, Intent, Map, MovementTuning, Player};
use term_dungeon::types::{Control, ControlSet, Vec2};

fn pillars() -> Map {
    Map::parse(
        "1111111111\n\
         1000000001\n\
         1020030001\n\
         1000000001\n\
         1000440001\n\
         1000000001\n\
         1030000201\n\
         1000000001\n\
         1111111111",
    )
    .unwrap()
}

#[test]
fn sliding_along_a_wall_keeps_the_free_axis() {
    let map = Map::bordered(10, 10, 1);
    // Pressed against the east wall, pushing north-east.
    let from = Vec2::new(8.9, 5.0);
    let to = slide(&map, from, Vec2::new(0.4, -0.4));
    assert_eq!(to.x, from.x);
    assert!((to.y - 4.6).abs() < 1e-9);
}

#[test]
fn corner_blocks_both_axes() {
    let map = Map::bordered(10, 10, 1);
    let from = Vec2::new(8.9, 8.9);
    assert_eq!(slide(&map, from, Vec2::new(0.5, 0.5)), from);
}

#[test]
fn y_move_is_checked_against_committed_x() {
    // x moves into the open column, then y may use it.
    let map = Map::parse("1111\n1001\n1101\n1111").unwrap();
    let to = slide(&map, Vec2::new(1.5, 1.5), Vec2::new(1.0, 1.0));
    assert_eq!(to, Vec2::new(2.5, 2.5));
}

#[test]
fn turning_rotates_by_turn_speed() {
    let map = Map::bordered(10, 10, 1);
    let mut player = Player::new(Vec2::new(5.0, 5.0), 0.0, 0.66);
    let held: ControlSet = [Control::TurnRight].into_iter().collect();
    let tuning = MovementTuning {
        move_speed: 5.0,
        turn_speed: 1.0,
    };
    apply_intent(&mut player, &map, Intent::from_controls(held), tuning, 0.5);
    assert!((player.theta() - 0.5).abs() < 1e-9);
    assert!((player.plane().length() - 0.66).abs() < 1e-9);
    assert!((player.plane() - player.dir().perp() * 0.66).length() < 1e-9);
}

#[test]
fn turning_alone_does_not_move() {
    let map = Map::bordered(10, 10, 1);
    let mut player = Player::new(Vec2::new(5.25, 4.75), 0.0, 0.66);
    let held: ControlSet = [Control::TurnLeft, Control::Forward, Control::Backward]
        .into_iter()
        .collect();
    let intent = Intent::from_controls(held);
    assert!(!intent.translates());
    apply_intent(&mut player, &map, intent, MovementTuning::default(), 0.1);
    assert_eq!(player.pos(), Vec2::new(5.25, 4.75));
    assert!(player.theta() < 0.0);
}

proptest! {
    #[test]
    fn slide_never_enters_a_wall(
        x in 1.0f64..9.0,
        y in 1.0f64..8.0,
        dx in -2.0f64..2.0,
        dy in -2.0f64..2.0,
    ) {
        let map = pillars();
        let from = Vec2::new(x, y);
        prop_assume!(!map.is_wall_at(from));

        let to = slide(&map, from, Vec2::new(dx, dy));
        prop_assert!(!map.is_wall_at(to));

        // A blocked axis keeps its value exactly.
        if map.is_wall_at(Vec2::new(x + dx, y)) {
            prop_assert_eq!(to.x, x);
        }
        // Each axis either moved fully or not at all.
        prop_assert!(to.x == x || to.x == x + dx);
        prop_assert!(to.y == y || to.y == y + dy);
    }

    #[test]
    fn diagonal_moves_are_never_faster(theta in -3.2f64..3.2, dt in 0.001f64..0.1) {
        let map = Map::bordered(40, 40, 1);
        let start = Vec2::new(20.0, 20.0);
        let tuning = MovementTuning::default();
        let mut player = Player::new(start, theta, 0.66);
        let held: ControlSet = [Control::Forward, Control::StrafeRight].into_iter().collect();

        apply_intent(&mut player, &map, Intent::from_controls(held), tuning, dt);
        let travelled = (player.pos() - start).length();
        prop_assert!((travelled - tuning.move_speed * dt).abs() < 1e-9);
    }
}
