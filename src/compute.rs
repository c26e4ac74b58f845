/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current state
/// (and, where needed, an RNG handle) and returns a brand-new value.
/// Side effects are limited to the injected RNG and log output.

use log::debug;
use rand::Rng;

use crate::entities::{
    BoundaryState, Direction, Enemy, Player, World, ENEMY_SPAWN_X, PLAYER_START_X,
    PLAYER_START_Y,
};

// ── Grid & lane tables ───────────────────────────────────────────────────────

pub const STEP_X: f32 = 100.0;
pub const STEP_Y: f32 = 90.0;

pub const LEFT_EDGE_X: f32 = 0.0;
pub const RIGHT_EDGE_X: f32 = 400.0;
pub const BOTTOM_ROW_Y: f32 = 400.0;
/// Top row; pressing up here counts as a crossing.
pub const GOAL_ROW_Y: f32 = 40.0;

/// Enemies past this x wrap back to `ENEMY_SPAWN_X`.
pub const ENEMY_WRAP_X: f32 = 550.0;
/// Half-size of the enemy's collision box on both axes.
pub const COLLISION_PADDING: f32 = 60.0;

pub const ENEMY_COUNT: usize = 3;
pub const FIRST_LANE_Y: f32 = 60.0;
pub const LANE_SPACING: f32 = 80.0;

const SPEED_UNIT: f32 = 80.0;
const SPEED_STEPS: u32 = 10;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Draw an enemy speed: 80, 160, … 800, all equally likely.
pub fn random_speed(rng: &mut impl Rng) -> f32 {
    SPEED_UNIT * rng.gen_range(1..=SPEED_STEPS) as f32
}

/// Build the start-of-game world: one enemy per lane, all parked off-screen.
pub fn init_world(rng: &mut impl Rng) -> World {
    let enemies = (0..ENEMY_COUNT)
        .map(|i| {
            let y = FIRST_LANE_Y + LANE_SPACING * i as f32;
            Enemy::new(ENEMY_SPAWN_X, y, random_speed(rng))
        })
        .collect();

    World {
        enemies,
        player: Player::new(),
        crossings: 0,
        collisions: 0,
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

/// Integrate one frame of horizontal motion, wrapping past the right edge.
pub fn advance_enemy(enemy: &Enemy, dt: f32, rng: &mut impl Rng) -> Enemy {
    let x = enemy.x + enemy.speed * dt;
    if x > ENEMY_WRAP_X {
        let speed = random_speed(rng);
        debug!("enemy in lane y={} wrapped, new speed {}", enemy.y, speed);
        return Enemy {
            x: ENEMY_SPAWN_X,
            speed,
            ..enemy.clone()
        };
    }
    Enemy { x, ..enemy.clone() }
}

/// True when the player's point lies strictly inside the enemy's padded box.
pub fn collides_with(enemy: &Enemy, player: &Player) -> bool {
    player.x > enemy.x - COLLISION_PADDING
        && player.x < enemy.x + COLLISION_PADDING
        && player.y > enemy.y - COLLISION_PADDING
        && player.y < enemy.y + COLLISION_PADDING
}

/// Advance `enemy` and test it against the player at its new position.
///
/// Returns the moved enemy and whether the player was caught.  The enemy
/// never touches the player itself; the caller applies `reset_player`.
pub fn update_enemy(
    enemy: &Enemy,
    player: &Player,
    dt: f32,
    rng: &mut impl Rng,
) -> (Enemy, bool) {
    let moved = advance_enemy(enemy, dt, rng);
    let caught = collides_with(&moved, player);
    (moved, caught)
}

// ── Player ───────────────────────────────────────────────────────────────────

pub fn reset_player(player: &Player) -> Player {
    Player {
        x: PLAYER_START_X,
        y: PLAYER_START_Y,
        boundary: BoundaryState::at_start(),
        ..player.clone()
    }
}

/// Recompute the boundary flags from the current position.
pub fn check_for_boundary(player: &Player) -> Player {
    let (left, right) = if player.x == LEFT_EDGE_X {
        (true, false)
    } else if player.x == RIGHT_EDGE_X {
        (false, true)
    } else {
        (false, false)
    };
    Player {
        boundary: BoundaryState {
            left,
            right,
            bottom: player.y == BOTTOM_ROW_Y,
        },
        ..player.clone()
    }
}

/// Apply one directional input.  `None` (an unmapped key) moves nothing.
pub fn handle_input(player: &Player, direction: Option<Direction>) -> Player {
    let player = check_for_boundary(player);
    let b = player.boundary;

    match direction {
        Some(Direction::Up) if player.y == GOAL_ROW_Y => reset_player(&player),
        Some(Direction::Up) => Player {
            y: player.y - STEP_Y,
            ..player
        },
        Some(Direction::Down) if !b.bottom => Player {
            y: player.y + STEP_Y,
            ..player
        },
        Some(Direction::Left) if !b.left => Player {
            x: player.x - STEP_X,
            ..player
        },
        Some(Direction::Right) if !b.right => Player {
            x: player.x + STEP_X,
            ..player
        },
        _ => player,
    }
}

/// The player has no autonomous per-frame behaviour.
pub fn update_player(player: &Player, _dt: f32) -> Player {
    player.clone()
}

// ── World ────────────────────────────────────────────────────────────────────

/// Apply one input event to the world, counting goal crossings.
pub fn apply_input(world: &World, direction: Option<Direction>) -> World {
    let crossed = direction == Some(Direction::Up) && world.player.y == GOAL_ROW_Y;
    if crossed {
        debug!("player crossed at x={}", world.player.x);
    }
    World {
        player: handle_input(&world.player, direction),
        crossings: world.crossings + crossed as u32,
        ..world.clone()
    }
}

/// Advance the simulation by one frame of `dt` seconds.  All randomness
/// comes through `rng` so callers control determinism.
///
/// Enemies update in order; each one sees the player as left by the
/// previous enemy, so a reset earlier in the frame is visible to later ones.
pub fn tick(world: &World, dt: f32, rng: &mut impl Rng) -> World {
    let mut player = world.player.clone();
    let mut collisions = world.collisions;

    let enemies: Vec<Enemy> = world
        .enemies
        .iter()
        .map(|enemy| {
            let (moved, caught) = update_enemy(enemy, &player, dt, rng);
            if caught {
                debug!(
                    "enemy at ({}, {}) caught player at ({}, {})",
                    moved.x, moved.y, player.x, player.y
                );
                player = reset_player(&player);
                collisions += 1;
            }
            moved
        })
        .collect();

    World {
        enemies,
        player: update_player(&player, dt),
        collisions,
        ..world.clone()
    }
}
