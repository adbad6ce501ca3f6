//! The rain drop data entity.
//!
//! A [`Raindrop`] is plain data: the simulation loop owns every live drop
//! and mutates only `x`, `y`, and `speed`. The visual parameters are
//! frozen at spawn time; rendering may scale them for perspective, but the
//! stored base values never change.

/// One simulated falling streak.
///
/// Created by [`SpawnContext::spawn`](crate::spawn::SpawnContext::spawn)
/// and destroyed once it leaves the visible region (see
/// [`culling::expired`](crate::culling::expired)).
#[derive(Clone, Debug, PartialEq)]
pub struct Raindrop {
    /// Horizontal position in surface coordinates.
    pub x: f32,
    /// Vertical position in surface coordinates. Starts negative so the
    /// drop appears to originate off-screen above the top edge.
    pub y: f32,
    /// Current downward velocity, in units per 16 ms reference frame.
    /// Only increases while gravity is non-negative.
    pub speed: f32,
    /// Base streak length. Fixed at spawn.
    pub length: f32,
    /// Base stroke width. Fixed at spawn.
    pub width: f32,
    /// Per-drop alpha in `[0.5, 1.0]`. Fixed at spawn.
    pub opacity: f32,
    /// Horizontal oscillation amplitude in `[-0.1, 0.1]`. Fixed at spawn.
    pub sway: f32,
    /// Oscillation phase offset in `[0, 2π)`. Fixed at spawn.
    pub phase: f32,
}
