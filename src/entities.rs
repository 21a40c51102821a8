/// Entity records for one run: the player, the bullet pool and the enemy
/// grid, plus the `World` value that owns them.
///
/// Types here are plain data.  The only behaviour is construction from a
/// `GameConfig`; all per-frame logic lives in `compute` and `collision`.

use crate::config::{ArenaConfig, BulletConfig, EnemyConfig, GameConfig, PlayerConfig};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in arena coordinates (origin top-left, y grows down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Velocity for the current frame, re-derived from intents every frame.
    pub dx: f32,
    pub speed: f32,
}

impl Player {
    /// Centred horizontally, `bottom_margin` above the arena floor.
    pub fn spawn(arena: &ArenaConfig, cfg: &PlayerConfig) -> Self {
        Self {
            x: arena.width / 2.0 - cfg.width / 2.0,
            y: arena.height - cfg.bottom_margin,
            width: cfg.width,
            height: cfg.height,
            dx: 0.0,
            speed: cfg.speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

/// One pool slot.  `x`/`y` carry no meaning while `active` is false.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub active: bool,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

/// Fixed-capacity bullet pool.  Slots are reused by flipping `active`;
/// the boxed slice cannot grow or shrink after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct BulletPool {
    pub slots: Box<[Bullet]>,
}

impl BulletPool {
    pub fn new(cfg: &BulletConfig) -> Self {
        let slot = Bullet {
            x: 0.0,
            y: 0.0,
            width: cfg.width,
            height: cfg.height,
            speed: cfg.speed,
            active: false,
        };
        Self { slots: vec![slot; cfg.pool_size].into_boxed_slice() }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|b| b.active).count()
    }

    /// Index of the first inactive slot, scanning in index order.
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|b| !b.active)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Cleared permanently when hit; enemies never respawn within a run.
    pub active: bool,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

/// Lay out `rows × cols` active enemies, row-major, starting at the offset.
pub fn enemy_grid(cfg: &EnemyConfig) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(cfg.rows * cfg.cols);
    for row in 0..cfg.rows {
        for col in 0..cfg.cols {
            enemies.push(Enemy {
                x: cfg.offset_x + col as f32 * (cfg.width + cfg.padding),
                y: cfg.offset_y + row as f32 * (cfg.height + cfg.padding),
                width: cfg.width,
                height: cfg.height,
                active: true,
            });
        }
    }
    enemies
}

// ── Formation ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Movement shared by the whole enemy grid.  Only the edge-bounce rule
/// changes it, so every active enemy always moves by the same amount.
#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    pub direction: Direction,
    pub speed: f32,
    pub descent_step: f32,
    pub edge_nudge: f32,
}

impl Formation {
    pub fn new(cfg: &EnemyConfig) -> Self {
        Self {
            direction: Direction::Right,
            speed: cfg.speed,
            descent_step: cfg.descent_step,
            edge_nudge: cfg.edge_nudge,
        }
    }

    /// Horizontal displacement for one frame.
    pub fn step(&self) -> f32 {
        self.speed * self.direction.sign()
    }
}

// ── Intents ───────────────────────────────────────────────────────────────────

/// Level-triggered input, sampled once per frame.  The core reads these and
/// never writes them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Everything one run owns.  A fresh `World` is built on every (re)start so
/// nothing carries over between runs.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub player: Player,
    pub bullets: BulletPool,
    pub enemies: Vec<Enemy>,
    pub formation: Formation,
    /// Timestamp of the last shot that actually left the pool.
    pub last_fire_ms: Option<u64>,
    pub cooldown_ms: u64,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl World {
    /// Build a fresh world.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails validation; bad geometry here is a
    /// programming error, not something to recover from.
    pub fn new(config: &GameConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid game config: {err}");
        }
        Self {
            player: Player::spawn(&config.arena, &config.player),
            bullets: BulletPool::new(&config.bullets),
            enemies: enemy_grid(&config.enemies),
            formation: Formation::new(&config.enemies),
            last_fire_ms: None,
            cooldown_ms: config.bullets.cooldown_ms,
            frame: 0,
            width: config.arena.width,
            height: config.arena.height,
        }
    }

    pub fn active_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.active)
    }

    pub fn active_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.slots.iter().filter(|b| b.active)
    }
}
