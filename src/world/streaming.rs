//! Chunk residency around a moving viewer.
//!
//! The world keeps a window of generated chunks keyed by `(p, q)` chunk
//! coordinates on the X/Z plane. Each streaming pass recenters on the
//! viewer, evicts chunks that drifted too far, then fills whatever the
//! creation window is missing.

use std::collections::hash_map::Entry;

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::constants::CHUNK_SIZE;
use crate::core::chunk::Chunk;
use crate::utils::settings::StreamingSettings;
use crate::world::generator::ChunkGenerator;

/// When a resident chunk is far enough from the center to evict.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionRule {
    /// Evict only when both axis distances reach the delete radius. Leaves
    /// a cross of stale chunks along the center's axes.
    #[default]
    BothAxes,
    /// Evict when either axis distance reaches the delete radius.
    EitherAxis,
}

/// Where the creation window sits.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationAnchor {
    /// A fixed window around chunk `(0, 0)`, wherever the viewer is.
    #[default]
    Origin,
    /// The window follows the viewer's chunk.
    Viewer,
}

/// What one streaming pass changed. `evicted` is also the signal to free
/// any renderer-side buffers for those chunks this same tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub center: (i32, i32),
    pub created: Vec<(i32, i32)>,
    pub evicted: Vec<(i32, i32)>,
}

/// Chunk coordinate containing one world-space axis value, halves rounded
/// away from zero.
pub fn chunk_coord(v: f32) -> i32 {
    let scaled = v / CHUNK_SIZE as f32;
    if scaled < 0.0 {
        (scaled - 0.5) as i32
    } else {
        (scaled + 0.5) as i32
    }
}

/// Streaming center for a viewer position. Only X and Z matter, height
/// never moves the window.
pub fn center_for(viewer: Vec3) -> (i32, i32) {
    (chunk_coord(viewer.x), chunk_coord(viewer.z))
}

pub struct World {
    chunks: FxHashMap<(i32, i32), Chunk>,
    center: (i32, i32),
    settings: StreamingSettings,
}

impl World {
    pub fn new(settings: StreamingSettings) -> Self {
        World {
            chunks: FxHashMap::default(),
            center: (0, 0),
            settings,
        }
    }

    pub fn settings(&self) -> &StreamingSettings {
        &self.settings
    }

    pub fn center(&self) -> (i32, i32) {
        self.center
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn contains(&self, p: i32, q: i32) -> bool {
        self.chunks.contains_key(&(p, q))
    }

    pub fn chunk(&self, p: i32, q: i32) -> Option<&Chunk> {
        self.chunks.get(&(p, q))
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Resident chunks inside the render window around the current center.
    pub fn visible(&self) -> impl Iterator<Item = &Chunk> {
        let (cp, cq) = self.center;
        let radius = self.settings.render_radius;
        self.chunks
            .values()
            .filter(move |chunk| (chunk.p() - cp).abs() <= radius && (chunk.q() - cq).abs() <= radius)
    }

    pub fn visible_faces(&self) -> u64 {
        self.visible().map(|chunk| chunk.faces() as u64).sum()
    }

    /// Moves the streaming center to the viewer's chunk.
    pub fn retarget(&mut self, viewer: Vec3) -> (i32, i32) {
        self.center = center_for(viewer);
        self.center
    }

    /// Creation-window coordinates with no resident chunk, in scan order.
    pub fn missing_coords(&self) -> Vec<(i32, i32)> {
        let radius = self.settings.render_radius;
        let (ap, aq) = match self.settings.anchor {
            CreationAnchor::Origin => (0, 0),
            CreationAnchor::Viewer => self.center,
        };
        let mut missing = Vec::new();
        for i in -radius..=radius {
            for j in -radius..=radius {
                let coord = (ap + i, aq + j);
                if !self.chunks.contains_key(&coord) {
                    missing.push(coord);
                }
            }
        }
        missing
    }

    /// Drops every chunk the eviction rule puts out of range of the current
    /// center. Returns the dropped coordinates.
    pub fn evict_out_of_range(&mut self) -> Vec<(i32, i32)> {
        let (cp, cq) = self.center;
        let delete = self.settings.delete_radius;
        let rule = self.settings.eviction;
        let evicted: Vec<(i32, i32)> = self
            .chunks
            .keys()
            .copied()
            .filter(|&(p, q)| {
                let dp = (p - cp).abs();
                let dq = (q - cq).abs();
                match rule {
                    EvictionRule::BothAxes => dp >= delete && dq >= delete,
                    EvictionRule::EitherAxis => dp >= delete || dq >= delete,
                }
            })
            .collect();
        for coord in &evicted {
            self.chunks.remove(coord);
        }
        if !evicted.is_empty() {
            tracing::debug!("Evicted {} chunks around {:?}", evicted.len(), self.center);
        }
        evicted
    }

    /// Installs a finished chunk in one step. Returns `false` when that
    /// coordinate is already occupied; the newcomer is dropped.
    pub fn publish(&mut self, chunk: Chunk) -> bool {
        match self.chunks.entry(chunk.coords()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(chunk);
                true
            }
        }
    }

    /// One synchronous streaming pass: recenter on the viewer, evict, then
    /// generate every chunk the creation window is missing.
    pub fn update(&mut self, viewer: Vec3, generator: &ChunkGenerator) -> TickReport {
        let center = self.retarget(viewer);
        let evicted = self.evict_out_of_range();
        let mut created = Vec::new();
        for (p, q) in self.missing_coords() {
            if self.publish(generator.generate_chunk(p, q)) {
                created.push((p, q));
            }
        }
        TickReport {
            center,
            created,
            evicted,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        World::new(StreamingSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings() -> StreamingSettings {
        StreamingSettings {
            render_radius: 1,
            delete_radius: 3,
            eviction: EvictionRule::BothAxes,
            anchor: CreationAnchor::Origin,
        }
    }

    #[test]
    fn chunk_coord_rounds_halves_away_from_zero() {
        assert_eq!(chunk_coord(0.0), 0);
        assert_eq!(chunk_coord(7.9), 0);
        assert_eq!(chunk_coord(8.0), 1);
        assert_eq!(chunk_coord(24.0), 2);
        assert_eq!(chunk_coord(-7.9), 0);
        assert_eq!(chunk_coord(-8.0), -1);
        assert_eq!(chunk_coord(-24.0), -2);
    }

    #[test]
    fn center_ignores_viewer_height() {
        let center = center_for(Vec3::new(40.0, 500.0, -40.0));
        assert_eq!(center, (3, -3));
    }

    #[test]
    fn first_pass_fills_the_creation_window() {
        let generator = ChunkGenerator::default();
        let mut world = World::new(small_settings());
        let report = world.update(Vec3::ZERO, &generator);

        assert_eq!(report.center, (0, 0));
        assert_eq!(report.created.len(), 9);
        assert!(report.evicted.is_empty());
        assert_eq!(world.chunk_count(), 9);
        for p in -1..=1 {
            for q in -1..=1 {
                assert!(world.contains(p, q));
            }
        }
    }

    #[test]
    fn repeat_passes_change_nothing() {
        let generator = ChunkGenerator::default();
        let mut world = World::new(small_settings());
        world.update(Vec3::ZERO, &generator);
        let report = world.update(Vec3::ZERO, &generator);

        assert!(report.created.is_empty());
        assert!(report.evicted.is_empty());
        assert_eq!(world.chunk_count(), 9);
    }

    #[test]
    fn both_axes_rule_keeps_chunks_aligned_with_the_center() {
        let generator = ChunkGenerator::default();
        let mut world = World::new(small_settings());
        world.update(Vec3::ZERO, &generator);

        // center (20, 0): every resident chunk still shares the q band
        let report = world.update(Vec3::new(320.0, 0.0, 0.0), &generator);
        assert_eq!(report.center, (20, 0));
        assert!(report.evicted.is_empty());
        assert_eq!(world.chunk_count(), 9);
    }

    #[test]
    fn both_axes_rule_evicts_on_diagonal_moves() {
        let generator = ChunkGenerator::default();
        let mut world = World::new(small_settings());
        world.update(Vec3::ZERO, &generator);

        let report = world.update(Vec3::new(320.0, 0.0, 320.0), &generator);
        assert_eq!(report.center, (20, 20));
        assert_eq!(report.evicted.len(), 9);
        // origin-anchored window refills immediately
        assert_eq!(report.created.len(), 9);
        assert_eq!(world.visible().count(), 0);
    }

    #[test]
    fn either_axis_rule_evicts_on_straight_moves() {
        let generator = ChunkGenerator::default();
        let mut settings = small_settings();
        settings.eviction = EvictionRule::EitherAxis;
        let mut world = World::new(settings);
        world.update(Vec3::ZERO, &generator);

        let report = world.update(Vec3::new(320.0, 0.0, 0.0), &generator);
        assert_eq!(report.evicted.len(), 9);
    }

    #[test]
    fn viewer_anchor_moves_the_creation_window() {
        let generator = ChunkGenerator::default();
        let mut settings = small_settings();
        settings.anchor = CreationAnchor::Viewer;
        let mut world = World::new(settings);

        world.update(Vec3::new(320.0, 0.0, 320.0), &generator);
        assert!(world.contains(20, 20));
        assert!(world.contains(19, 21));
        assert!(!world.contains(0, 0));
        assert_eq!(world.visible().count(), 9);
    }

    #[test]
    fn visible_window_tracks_the_center() {
        let generator = ChunkGenerator::default();
        let mut settings = small_settings();
        settings.render_radius = 2;
        settings.delete_radius = 9;
        let mut world = World::new(settings);

        world.update(Vec3::ZERO, &generator);
        assert_eq!(world.visible().count(), 25);

        // center (3, 0): only the p in {1, 2} columns of the origin window remain visible
        world.update(Vec3::new(48.0, 0.0, 0.0), &generator);
        assert_eq!(world.visible().count(), 10);
        assert_eq!(world.chunk_count(), 25);
    }

    #[test]
    fn default_radii_evict_only_fully_diagonal_chunks() {
        let mut world = World::new(StreamingSettings::default());
        world.publish(Chunk::new(0, 0));
        world.publish(Chunk::new(20, 0));
        world.publish(Chunk::new(20, 20));
        world.retarget(Vec3::ZERO);

        let evicted = world.evict_out_of_range();
        assert_eq!(evicted, vec![(20, 20)]);
        assert!(world.contains(0, 0));
        // one axis inside the delete radius keeps the chunk resident
        assert!(world.contains(20, 0));
    }

    #[test]
    fn origin_anchor_ignores_a_distant_viewer() {
        let generator = ChunkGenerator::default();
        let mut settings = small_settings();
        settings.delete_radius = 200;
        let mut world = World::new(settings);

        world.update(Vec3::new(1600.0, 0.0, 1600.0), &generator);
        assert!(world.contains(0, 0));
        assert!(world.contains(-1, 1));
        assert!(!world.contains(100, 100));
    }

    #[test]
    fn publish_keeps_the_first_chunk_at_a_coordinate() {
        let mut world = World::new(small_settings());
        assert!(world.publish(Chunk::new(2, 2)));
        assert!(!world.publish(Chunk::new(2, 2)));
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn missing_coords_skips_resident_chunks() {
        let mut world = World::new(small_settings());
        world.publish(Chunk::new(0, 0));
        let missing = world.missing_coords();
        assert_eq!(missing.len(), 8);
        assert!(!missing.contains(&(0, 0)));
    }

    #[test]
    fn eviction_frees_coordinates_for_recreation() {
        let generator = ChunkGenerator::default();
        let mut settings = small_settings();
        settings.anchor = CreationAnchor::Viewer;
        settings.eviction = EvictionRule::EitherAxis;
        let mut world = World::new(settings);

        world.update(Vec3::ZERO, &generator);
        world.update(Vec3::new(320.0, 0.0, 0.0), &generator);
        let report = world.update(Vec3::ZERO, &generator);
        assert_eq!(report.created.len(), 9);
        assert!(world.contains(0, 0));
    }
}
