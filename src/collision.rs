/// Collision resolution for one frame.

use crate::entities::World;

/// What the collision pass found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// `(bullet slot, enemy index)` for every hit, in resolution order.
    pub hits: Vec<(usize, usize)>,
    /// An enemy alive at the start of the pass had its bottom edge on or
    /// below the player's top edge.
    pub enemy_reached_player: bool,
    /// No enemy is left active.
    pub all_cleared: bool,
}

/// Resolve bullet×enemy hits and check the enemy line against the player.
///
/// A bullet is spent on its first hit and is not tested against the
/// remaining enemies in the same pass.  The player line is checked against
/// every enemy that entered the frame alive, so an enemy shot on the line
/// still counts as reaching it.
pub fn resolve(world: &World) -> (World, Resolution) {
    let mut next = world.clone();
    let mut resolution = Resolution::default();

    let line = world.player.y;
    resolution.enemy_reached_player = world.active_enemies().any(|e| e.y + e.height >= line);

    for (bi, bullet) in next.bullets.slots.iter_mut().enumerate() {
        if !bullet.active {
            continue;
        }
        let shot = bullet.rect();
        let target = next
            .enemies
            .iter()
            .position(|e| e.active && shot.overlaps(&e.rect()));
        if let Some(ei) = target {
            bullet.active = false;
            next.enemies[ei].active = false;
            resolution.hits.push((bi, ei));
        }
    }

    resolution.all_cleared = next.active_enemies().next().is_none();

    (next, resolution)
}
