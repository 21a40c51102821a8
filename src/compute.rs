/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `World` and returns a brand-new `World`.  Time is injected as a
/// millisecond timestamp, so a frame is fully determined by its inputs.

use log::{debug, trace};

use crate::collision::{self, Resolution};
use crate::entities::{Intents, World};

/// What a fire intent did this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireOutcome {
    /// No fire intent was held.
    Idle,
    /// A bullet left the pool from this slot.
    Fired(usize),
    /// Dropped: the previous shot was too recent.
    CoolingDown,
    /// Dropped: every slot is already in flight.
    PoolExhausted,
}

/// Everything `tick` observed besides the new world.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub fire: FireOutcome,
    pub resolution: Resolution,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Derive the player's velocity from the held intents.  Left wins when both
/// directions are held.
pub fn steer_player(world: &World, intents: &Intents) -> World {
    let mut next = world.clone();
    next.player.dx = if intents.move_left {
        -world.player.speed
    } else if intents.move_right {
        world.player.speed
    } else {
        0.0
    };
    next
}

/// Apply `dx` and keep the player fully inside the arena.
pub fn move_player(world: &World) -> World {
    let mut next = world.clone();
    let max_x = world.width - world.player.width;
    next.player.x = (world.player.x + world.player.dx).clamp(0.0, max_x);
    next
}

// ── Bullet pool ───────────────────────────────────────────────────────────────

/// Try to launch one bullet from the player's top edge.
///
/// Requests inside the cooldown window or against an exhausted pool are
/// dropped without error.  The cooldown clock only restarts on a shot that
/// actually fires.
pub fn try_fire(world: &World, now_ms: u64) -> (World, FireOutcome) {
    if let Some(last) = world.last_fire_ms {
        if now_ms.saturating_sub(last) < world.cooldown_ms {
            return (world.clone(), FireOutcome::CoolingDown);
        }
    }

    let Some(slot) = world.bullets.first_free() else {
        debug!("no available bullets in the pool ({} in flight)", world.bullets.capacity());
        return (world.clone(), FireOutcome::PoolExhausted);
    };

    let mut next = world.clone();
    let player = &world.player;
    let bullet = &mut next.bullets.slots[slot];
    bullet.x = player.x + player.width / 2.0 - bullet.width / 2.0;
    bullet.y = player.y;
    bullet.active = true;
    next.last_fire_ms = Some(now_ms);
    (next, FireOutcome::Fired(slot))
}

/// Move every active bullet up; a bullet whose bottom edge has left the top
/// of the arena goes back to the pool.
pub fn advance_bullets(world: &World) -> World {
    let mut next = world.clone();
    for bullet in next.bullets.slots.iter_mut().filter(|b| b.active) {
        bullet.y -= bullet.speed;
        if bullet.y + bullet.height < 0.0 {
            bullet.active = false;
        }
    }
    next
}

// ── Enemy formation ───────────────────────────────────────────────────────────

/// Move the grid as one body.  If any active enemy touches a wall after the
/// move, the shared direction flips once, every active enemy is nudged off
/// the wall and the whole grid drops by `descent_step`.
pub fn sweep_formation(world: &World) -> World {
    let mut next = world.clone();
    let step = next.formation.step();
    for enemy in next.enemies.iter_mut().filter(|e| e.active) {
        enemy.x += step;
    }

    let width = next.width;
    let at_edge = next
        .enemies
        .iter()
        .any(|e| e.active && (e.x + e.width >= width || e.x <= 0.0));
    if !at_edge {
        return next;
    }

    let formation = &mut next.formation;
    formation.direction = formation.direction.flipped();
    let nudge = formation.edge_nudge * formation.direction.sign();
    let drop = formation.descent_step;
    trace!("formation bounced, now heading {:?}", formation.direction);

    for enemy in next.enemies.iter_mut().filter(|e| e.active) {
        enemy.x += nudge;
        enemy.y += drop;
    }
    next
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame: intents, player, bullets, enemies,
/// then collisions.  The caller decides what the resolution means for the
/// run state.
pub fn tick(world: &World, intents: &Intents, now_ms: u64) -> (World, TickOutcome) {
    let mut next = steer_player(world, intents);

    let mut fire = FireOutcome::Idle;
    if intents.fire {
        let (fired, outcome) = try_fire(&next, now_ms);
        next = fired;
        fire = outcome;
    }

    let next = move_player(&next);
    let next = advance_bullets(&next);
    let next = sweep_formation(&next);
    let (mut next, resolution) = collision::resolve(&next);
    next.frame = world.frame + 1;

    (next, TickOutcome { fire, resolution })
}
