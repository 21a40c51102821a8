/// The drawing seam between the core and whatever shows the frame.
///
/// The core only ever clears, fills rectangles and prints text; a surface
/// is free to map arena coordinates onto pixels, terminal cells or a log.

use crate::entities::{Rect, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Yellow,
    Red,
}

pub const PLAYER_COLOR: Color = Color::White;
pub const BULLET_COLOR: Color = Color::Yellow;
pub const ENEMY_COLOR: Color = Color::Red;
pub const TEXT_COLOR: Color = Color::White;

pub trait Surface {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error>;
    /// Print `text` horizontally centred on `x`, with its baseline row at `y`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color) -> Result<(), Self::Error>;
}

/// Draw the player, then every active bullet, then every active enemy.
pub fn draw_world<S: Surface>(surface: &mut S, world: &World) -> Result<(), S::Error> {
    surface.fill_rect(world.player.rect(), PLAYER_COLOR)?;
    for bullet in world.active_bullets() {
        surface.fill_rect(bullet.rect(), BULLET_COLOR)?;
    }
    for enemy in world.active_enemies() {
        surface.fill_rect(enemy.rect(), ENEMY_COLOR)?;
    }
    Ok(())
}

/// Centre a banner line in the arena.
pub fn draw_banner<S: Surface>(surface: &mut S, world: &World, text: &str) -> Result<(), S::Error> {
    surface.draw_text(world.width / 2.0, world.height / 2.0, text, TEXT_COLOR)
}
