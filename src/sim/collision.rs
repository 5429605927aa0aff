//! Stone-on-stone collision detection and resolution
//!
//! Detection is a pairwise sphere-overlap sweep over the full stone set —
//! O(n²), and a sheet holds at most 16 stones. Resolution reduces the
//! two-moving-body case to "a moving stone strikes one at rest" and conserves
//! the velocity sum by construction (equal implicit masses, no spin, an
//! empirical restitution coefficient instead of an energy model).

use crate::consts::RESTITUTION;

use super::state::Stone;

/// Two stones collide iff their centers are within the sum of their radii.
/// Purely geometric; velocities are not consulted.
#[inline]
pub fn stones_colliding(a: &Stone, b: &Stone) -> bool {
    a.position.distance(b.position) <= a.radius + b.radius
}

/// Examine every unordered stone pair exactly once and resolve each overlap.
/// Simultaneous contacts are resolved independently, in detection order; there
/// is no global multi-body solve.
pub fn check_collisions(stones: &mut [Stone]) {
    for i in 0..stones.len() {
        for j in (i + 1)..stones.len() {
            if stones_colliding(&stones[i], &stones[j]) {
                let (head, tail) = stones.split_at_mut(j);
                resolve_collision(&mut head[i], &mut tail[0]);
            }
        }
    }
}

/// Resolve one colliding pair.
///
/// The velocity sum before the impact equals the velocity sum after it; the
/// struck stone's share is set empirically and the striker keeps the rest.
pub fn resolve_collision(a: &mut Stone, b: &mut Stone) {
    // Both stones abandon any curve; impacts are handled in free slide.
    a.set_free_fall();
    b.set_free_fall();

    // Treat the slower stone as stationary. On equal speeds the second
    // operand counts as the faster one.
    let (fastest, slowest) = if a.velocity.length() > b.velocity.length() {
        (a, b)
    } else {
        (b, a)
    };

    // Undo the step that produced the overlap, so the pair separates instead
    // of re-colliding every tick. The "stationary" stone stays put.
    fastest.cancel_last_movement();

    // Equal masses: the conserved momentum is the plain velocity sum.
    let total = fastest.velocity + slowest.velocity;

    // The struck stone leaves along the center line at a fraction of the
    // striker's speed.
    let dir = (slowest.position - fastest.position).normalize_or_zero();
    slowest.velocity = dir * (fastest.velocity.length() * RESTITUTION);

    // The striker keeps the remainder, so the sum is conserved exactly.
    fastest.velocity = total - slowest.velocity;
}
