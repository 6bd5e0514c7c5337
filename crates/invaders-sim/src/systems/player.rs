//! Player ship: horizontal steering and firing from the input source.

use glam::DVec2;
use log::debug;

use invaders_core::constants::{PLAYER_PROJECTILE_SPEED, PLAYER_STEP};
use invaders_core::enums::Key;
use invaders_core::events::AudioEvent;
use invaders_core::types::EntityId;

use crate::entity::Entity;
use crate::input::InputSource;

/// Advance one player ship by one frame.
///
/// Left wins over right when both are held. While fire is held a projectile
/// is spawned every frame, each one restarting the shoot cue.
pub fn update(
    player: &mut Entity,
    input: &dyn InputSource,
    next_entity_id: &mut u64,
    spawn_buffer: &mut Vec<Entity>,
    audio_events: &mut Vec<AudioEvent>,
) {
    if input.is_down(Key::Left) {
        player.body.center.x -= PLAYER_STEP;
    } else if input.is_down(Key::Right) {
        player.body.center.x += PLAYER_STEP;
    }

    if input.is_down(Key::Fire) {
        let muzzle = DVec2::new(
            player.body.center.x,
            player.body.center.y - player.body.size.x / 2.0,
        );
        let id = EntityId::allocate(next_entity_id);

        debug!("{} fired {} from {}", player.id, id, muzzle);
        spawn_buffer.push(Entity::projectile(
            id,
            muzzle,
            DVec2::new(0.0, PLAYER_PROJECTILE_SPEED),
        ));
        audio_events.push(AudioEvent::Shoot { projectile: id });
    }
}
