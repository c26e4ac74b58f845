/// Entity rendering against an abstract drawing surface.
///
/// The game never talks to a terminal directly; the host supplies a
/// `Surface` that knows how to resolve sprite ids and place them.

use crate::entities::{Enemy, Player, World};
use crate::error::Result;

/// Anything that can draw a sprite at a world position.
pub trait Surface {
    fn draw_image(&mut self, sprite: &str, x: f32, y: f32) -> Result<()>;
}

pub fn render_enemy<S: Surface>(surface: &mut S, enemy: &Enemy) -> Result<()> {
    surface.draw_image(enemy.sprite, enemy.x, enemy.y)
}

pub fn render_player<S: Surface>(surface: &mut S, player: &Player) -> Result<()> {
    surface.draw_image(player.sprite, player.x, player.y)
}

/// Draw every enemy, then the player on top.
pub fn render_world<S: Surface>(surface: &mut S, world: &World) -> Result<()> {
    for enemy in &world.enemies {
        render_enemy(surface, enemy)?;
    }
    render_player(surface, &world.player)
}
