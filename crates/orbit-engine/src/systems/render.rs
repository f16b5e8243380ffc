use crate::components::entity::Entity;
use crate::components::sprite::DrawStyle;
use crate::renderer::instance::{BodyInstance, DrawBuffer};

/// Build the draw list from a set of entities.
/// Outlined entities come first, then textured ones; `outline_split` marks
/// the boundary. Entities past the buffer capacity are dropped.
pub fn build_draw_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut DrawBuffer) {
    buffer.clear();

    let mut outlined: Vec<BodyInstance> = Vec::new();
    let mut textured: Vec<BodyInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }

        let sprite = match &entity.sprite {
            Some(s) => s,
            None => continue,
        };

        let instance = BodyInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            radius: entity.radius,
            rotation: entity.rotation,
            texture: sprite.texture,
            alpha: sprite.alpha,
            outline: sprite.style.as_f32(),
            role: sprite.role,
        };

        match sprite.style {
            DrawStyle::Outline => outlined.push(instance),
            DrawStyle::Sprite => textured.push(instance),
        }
    }

    for inst in outlined {
        buffer.push(inst);
    }
    buffer.set_outline_split(buffer.instance_count());
    for inst in textured {
        if !buffer.push(inst) {
            log::warn!("draw buffer full at {} instances", buffer.capacity());
            break;
        }
    }
}
