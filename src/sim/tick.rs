//! Fixed timestep physics tick
//!
//! Advances every dynamic body by one step: gravity, integration in
//! substeps, then contact resolution against static bodies. Restitution is
//! zero, so riders stick to the track instead of bouncing off it.

use glam::Vec2;

use super::body::Body;
use super::collision::{CollisionResult, circle_overlaps_aabb, circle_polygon_collision};
use super::world::World;
use crate::consts::*;

/// A resolved contact against a static surface
#[derive(Debug, Clone)]
struct Contact {
    hit: CollisionResult,
    friction: f32,
}

/// Snapshot of one static body used during contact search
struct StaticShape {
    group: i32,
    bounds: (Vec2, Vec2),
    loops: Vec<Vec<Vec2>>,
    friction: f32,
}

/// Advance the world by `dt` seconds
pub fn tick(world: &mut World, dt: f32) {
    let gravity = world.gravity();

    // Statics never move during a tick, so snapshot their geometry once
    let statics: Vec<StaticShape> = world
        .bodies()
        .iter()
        .filter(|b| b.is_static)
        .map(|b| StaticShape {
            group: b.group,
            bounds: b.aabb(),
            loops: b.world_loops(),
            friction: b.material.friction,
        })
        .collect();

    for body in world.bodies_mut().iter_mut().filter(|b| !b.is_static) {
        body.velocity += gravity * dt;
        body.velocity = body.velocity.clamp_length_max(MAX_BODY_SPEED);

        // Substep so a fast body cannot skip over a thin track
        let min_radius = body
            .colliders
            .iter()
            .map(|c| c.radius)
            .fold(f32::MAX, f32::min)
            .min(TRACK_THICKNESS * 2.0);
        let move_dist = body.velocity.length() * dt;
        let num_steps =
            ((move_dist / (min_radius * 0.5)).ceil() as u32).clamp(1, MAX_CONTACT_SUBSTEPS);
        let step_dt = dt / num_steps as f32;

        for _ in 0..num_steps {
            body.position += body.velocity * step_dt;
            body.angle = crate::normalize_angle(body.angle + body.angular_velocity * step_dt);

            for contact in find_contacts(body, &statics) {
                resolve_contact(body, &contact);
            }
        }
    }
}

/// Every contact between `body`'s colliders and the static shapes
fn find_contacts(body: &Body, statics: &[StaticShape]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for (center, radius) in body.world_colliders() {
        for shape in statics {
            // Shared negative group: never collide
            if body.group < 0 && shape.group == body.group {
                continue;
            }
            if !circle_overlaps_aabb(center, radius, shape.bounds) {
                continue;
            }
            for loop_ in &shape.loops {
                let hit = circle_polygon_collision(center, radius, loop_);
                if hit.hit {
                    contacts.push(Contact {
                        hit,
                        friction: shape.friction,
                    });
                }
            }
        }
    }
    contacts
}

/// Push the body out of the surface and apply normal plus friction impulses
fn resolve_contact(body: &mut Body, contact: &Contact) {
    let n = contact.hit.normal;
    body.position += n * contact.hit.penetration * POSITION_CORRECTION;

    let r = contact.hit.point - body.position;
    let vn = body.velocity_at(r).dot(n);
    if vn >= 0.0 {
        // Already separating
        return;
    }

    let rn = r.perp_dot(n);
    let k_n = body.inv_mass + rn * rn * body.inv_inertia;
    if k_n <= 0.0 {
        return;
    }
    let jn = -(1.0 + RESTITUTION) * vn / k_n;
    body.apply_impulse(n * jn, r);

    let t = n.perp();
    let vt = body.velocity_at(r).dot(t);
    let rt = r.perp_dot(t);
    let k_t = body.inv_mass + rt * rt * body.inv_inertia;

    let jt = if contact.friction >= 0.0 {
        // Coulomb: cancel sliding up to mu * normal impulse
        let limit = contact.friction * jn;
        (-vt / k_t).clamp(-limit, limit)
    } else if vt.abs() > 1e-3 {
        // Boost: push along the current direction of travel
        -contact.friction * jn * vt.signum()
    } else {
        0.0
    };
    body.apply_impulse(t * jt, r);
}
