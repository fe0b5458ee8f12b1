//! Pixel collision engine — the hit-testing and damage protocol
//! between missiles and everything else.
//!
//! Broad phase: symmetric AABB overlap of the two sprite rectangles.
//! Narrow phase: per-pixel alpha comparison over the clipped
//! intersection only, so no pixel lookup can escape either image.
//! The colliding-pixel count is then fed to the target's per-variant
//! `HitResponse` policy. Same-side pairs never interact, and a ship
//! is never harmed by its own outstanding shot.

use hecs::{Entity, World};

use invaders_core::components::{Allegiance, Graphic, Health, HitResponse, Launcher, MissileBody};
use invaders_core::enums::Side;
use invaders_core::sprite::Sprite;
use invaders_core::types::Position;

/// Integer pixel-space intersection of two sprite rectangles.
/// Half-open on both axes: `x0..x1`, `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelClip {
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
}

/// Broad phase: intersect the two sprite rectangles in integer pixel
/// space. Returns `None` when they are disjoint, in which case no
/// pixel is ever scanned.
pub fn overlap_clip(
    a_pos: &Position,
    a: &Sprite,
    b_pos: &Position,
    b: &Sprite,
) -> Option<PixelClip> {
    let (ax, ay) = (a_pos.0.x as i32, a_pos.0.y as i32);
    let (bx, by) = (b_pos.0.x as i32, b_pos.0.y as i32);

    let x0 = ax.max(bx);
    let x1 = (ax + a.width() as i32).min(bx + b.width() as i32);
    let y0 = ay.max(by);
    let y1 = (ay + a.height() as i32).min(by + b.height() as i32);

    if x0 < x1 && y0 < y1 {
        Some(PixelClip { x0, x1, y0, y1 })
    } else {
        None
    }
}

/// Run the collision pass: every live missile is tested against every
/// other collidable entity on a stable snapshot of this tick's world.
pub fn run(world: &mut World) {
    let missiles: Vec<Entity> = {
        let mut query = world.query::<&MissileBody>();
        query.iter().map(|(entity, _)| entity).collect()
    };
    let targets: Vec<Entity> = {
        let mut query = world.query::<(&Health, &Graphic, &Allegiance, &HitResponse)>();
        query.iter().map(|(entity, _)| entity).collect()
    };

    for &missile in &missiles {
        for &target in &targets {
            if target == missile {
                continue;
            }
            collide(world, target, missile);
        }
    }
}

/// Test one target/missile pair and apply the target's hit policy.
fn collide(world: &mut World, target: Entity, missile: Entity) {
    let (m_pos, m_side, m_id, m_lives) = {
        let Ok(body) = world.get::<&MissileBody>(missile) else {
            return;
        };
        let Ok(pos) = world.get::<&Position>(missile) else {
            return;
        };
        let Ok(side) = world.get::<&Allegiance>(missile) else {
            return;
        };
        let Ok(health) = world.get::<&Health>(missile) else {
            return;
        };
        (*pos, side.0, body.missile_id, health.lives)
    };
    // Spent missiles stop dealing damage; the sweep collects them.
    if m_lives <= 0 {
        return;
    }

    let (t_pos, t_side, t_lives, response) = {
        let Ok(pos) = world.get::<&Position>(target) else {
            return;
        };
        let Ok(side) = world.get::<&Allegiance>(target) else {
            return;
        };
        let Ok(health) = world.get::<&Health>(target) else {
            return;
        };
        let Ok(response) = world.get::<&HitResponse>(target) else {
            return;
        };
        (*pos, side.0, health.lives, *response)
    };
    if t_lives <= 0 {
        return;
    }
    // Same-side fire passes through. Neutral collides with both.
    if same_side(t_side, m_side) {
        return;
    }
    // A ship's own outstanding shot never harms it.
    if let Ok(launcher) = world.get::<&Launcher>(target) {
        if launcher.outstanding == Some(m_id) {
            return;
        }
    }

    let pixels = match response {
        HitResponse::Absorb => {
            // Bunkers erase each struck pixel while counting.
            let Ok(m_gfx) = world.get::<&Graphic>(missile) else {
                return;
            };
            let Ok(mut t_gfx) = world.get::<&mut Graphic>(target) else {
                return;
            };
            let Some(clip) = overlap_clip(&t_pos, &t_gfx.sprite, &m_pos, &m_gfx.sprite) else {
                return;
            };
            count_and_erase(&mut t_gfx.sprite, &t_pos, &m_gfx.sprite, &m_pos, clip)
        }
        HitResponse::Annihilate | HitResponse::Trade => {
            let Ok(m_gfx) = world.get::<&Graphic>(missile) else {
                return;
            };
            let Ok(t_gfx) = world.get::<&Graphic>(target) else {
                return;
            };
            let Some(clip) = overlap_clip(&t_pos, &t_gfx.sprite, &m_pos, &m_gfx.sprite) else {
                return;
            };
            count_overlap(&t_gfx.sprite, &t_pos, &m_gfx.sprite, &m_pos, clip)
        }
    };
    if pixels == 0 {
        return;
    }

    match response {
        HitResponse::Absorb => {
            debit(world, target, pixels);
            debit(world, missile, pixels);
        }
        HitResponse::Annihilate => {
            kill(world, target);
            kill(world, missile);
        }
        HitResponse::Trade => {
            let traded = t_lives.min(m_lives);
            debit(world, target, traded);
            debit(world, missile, traded);
        }
    }
}

fn same_side(a: Side, b: Side) -> bool {
    a == b
}

fn debit(world: &mut World, entity: Entity, amount: i32) {
    if let Ok(mut health) = world.get::<&mut Health>(entity) {
        health.debit(amount);
    }
}

fn kill(world: &mut World, entity: Entity) {
    if let Ok(mut health) = world.get::<&mut Health>(entity) {
        health.lives = 0;
    }
}

/// Narrow phase: count pixels opaque in both sprites over the clip.
fn count_overlap(
    t_sprite: &Sprite,
    t_pos: &Position,
    m_sprite: &Sprite,
    m_pos: &Position,
    clip: PixelClip,
) -> i32 {
    let (tx0, ty0) = (t_pos.0.x as i32, t_pos.0.y as i32);
    let (mx0, my0) = (m_pos.0.x as i32, m_pos.0.y as i32);
    let mut count = 0;
    for y in clip.y0..clip.y1 {
        for x in clip.x0..clip.x1 {
            let (tx, ty) = ((x - tx0) as u32, (y - ty0) as u32);
            let (mx, my) = ((x - mx0) as u32, (y - my0) as u32);
            if t_sprite.is_opaque(tx, ty) && m_sprite.is_opaque(mx, my) {
                count += 1;
            }
        }
    }
    count
}

/// Narrow phase for bunkers: as `count_overlap`, but each colliding
/// pixel is erased from the target image as a side effect.
fn count_and_erase(
    t_sprite: &mut Sprite,
    t_pos: &Position,
    m_sprite: &Sprite,
    m_pos: &Position,
    clip: PixelClip,
) -> i32 {
    let (tx0, ty0) = (t_pos.0.x as i32, t_pos.0.y as i32);
    let (mx0, my0) = (m_pos.0.x as i32, m_pos.0.y as i32);
    let mut count = 0;
    for y in clip.y0..clip.y1 {
        for x in clip.x0..clip.x1 {
            let (tx, ty) = ((x - tx0) as u32, (y - ty0) as u32);
            let (mx, my) = ((x - mx0) as u32, (y - my0) as u32);
            if t_sprite.is_opaque(tx, ty) && m_sprite.is_opaque(mx, my) {
                t_sprite.clear_pixel(tx, ty);
                count += 1;
            }
        }
    }
    count
}
