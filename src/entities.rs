/// All game entity types. Pure data plus constructors; logic lives in `compute`.

// ── Sprite ids (resolved to glyphs by the host) ──────────────────────────────

pub const ENEMY_SPRITE: &str = "images/enemy-bug.png";
pub const PLAYER_SPRITE: &str = "images/char-boy.png";

// ── Fixed positions ──────────────────────────────────────────────────────────

pub const PLAYER_START_X: f32 = 200.0;
pub const PLAYER_START_Y: f32 = 400.0;

/// Off-screen x every enemy spawns at and wraps back to.
pub const ENEMY_SPAWN_X: f32 = -120.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Maps DOM `keyCode` values for the arrow keys (37–40) to a direction.
    ///
    /// This is the key-code form of the input contract, for hosts that
    /// receive raw numeric codes.  The terminal host gets crossterm
    /// `KeyCode`s instead and maps those directly.  Anything else is
    /// unmapped and must be ignored by the caller.
    pub fn from_key_code(code: u16) -> Option<Direction> {
        match code {
            37 => Some(Direction::Left),
            38 => Some(Direction::Up),
            39 => Some(Direction::Right),
            40 => Some(Direction::Down),
            _ => None,
        }
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

/// Which grid edges the player currently sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryState {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
}

impl BoundaryState {
    /// State of a player standing on the start cell.
    pub fn at_start() -> BoundaryState {
        BoundaryState {
            left: false,
            right: false,
            bottom: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub sprite: &'static str,
    pub boundary: BoundaryState,
}

impl Player {
    pub fn new() -> Player {
        Player {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            sprite: PLAYER_SPRITE,
            boundary: BoundaryState::at_start(),
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Centre point, world units.
    pub x: f32,
    pub y: f32,
    /// Horizontal units per second.
    pub speed: f32,
    pub sprite: &'static str,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32) -> Enemy {
        Enemy {
            x,
            y,
            speed,
            sprite: ENEMY_SPRITE,
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub enemies: Vec<Enemy>,
    pub player: Player,
    /// Times the player reached the goal row this session.
    pub crossings: u32,
    /// Times an enemy caught the player this session.
    pub collisions: u32,
}
