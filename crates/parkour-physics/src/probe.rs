//! Geometry probe: line traces and capsule sweeps against the world

use glam::Vec3;
use rapier3d::prelude::{ColliderHandle, QueryFilter};
use tracing::trace;

use crate::PhysicsWorld;

/// Result of a single trace or sweep, consumed the tick it is taken
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TraceResult {
    /// Whether anything blocked the trace
    pub hit: bool,
    /// Impact point in world space
    pub point: Vec3,
    /// Surface normal at the impact point
    pub normal: Vec3,
    /// Distance travelled before the impact
    pub distance: f32,
}

impl TraceResult {
    /// A trace that found nothing
    pub fn miss() -> Self {
        Self::default()
    }

    /// A blocking hit
    pub fn hit(point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            hit: true,
            point,
            normal,
            distance,
        }
    }
}

/// Synchronous collision queries used by the traversal controllers
pub trait WorldProbe {
    /// Trace a line from `start` to `end`
    fn line_trace(&self, start: Vec3, end: Vec3) -> TraceResult;

    /// Sweep an upright capsule from `start` to `end`
    fn capsule_sweep(&self, start: Vec3, end: Vec3, radius: f32, half_height: f32) -> TraceResult;
}

/// Probe over a [`PhysicsWorld`] that ignores one collider, usually the character itself
#[derive(Clone, Copy)]
pub struct Probe<'a> {
    world: &'a PhysicsWorld,
    exclude: Option<ColliderHandle>,
}

impl<'a> Probe<'a> {
    pub fn new(world: &'a PhysicsWorld, exclude: Option<ColliderHandle>) -> Self {
        Self { world, exclude }
    }

    fn filter(&self) -> QueryFilter<'static> {
        match self.exclude {
            Some(handle) => QueryFilter::default().exclude_collider(handle),
            None => QueryFilter::default(),
        }
    }
}

impl WorldProbe for Probe<'_> {
    fn line_trace(&self, start: Vec3, end: Vec3) -> TraceResult {
        let result = self.world.line_trace(start, end, self.filter());
        trace!(?start, ?end, hit = result.hit, distance = result.distance, "line trace");
        result
    }

    fn capsule_sweep(&self, start: Vec3, end: Vec3, radius: f32, half_height: f32) -> TraceResult {
        let result = self
            .world
            .capsule_sweep(start, end, radius, half_height, self.filter());
        trace!(?start, ?end, hit = result.hit, distance = result.distance, "capsule sweep");
        result
    }
}
