//! Sliding window of generated corridor segments and their hinged doors.

use std::collections::{BTreeMap, VecDeque};

use lastbell_core::constants::{DOOR_APPROACH_RATE, DOOR_OPEN_ANGLE, DOOR_SNAP_EPSILON};
use lastbell_core::state::DoorView;
use lastbell_core::types::{Aabb, DoorId, InteractableId, SegmentId};
use lastbell_procgen::segment::DoorSpec;

use crate::interaction::InteractionRegistry;

/// One live segment of the map.
#[derive(Debug, Clone)]
pub struct Segment {
    pub id: SegmentId,
    pub start_z: f32,
    pub safe: bool,
    /// Static collision and occlusion boxes.
    pub solids: Vec<Aabb>,
    pub interactables: Vec<InteractableId>,
    pub doors: Vec<DoorId>,
    pub has_elevator: bool,
    pub has_light: bool,
}

/// Active segments ordered from oldest (nearest +Z) to newest.
#[derive(Debug, Clone)]
pub struct LevelWindow {
    segments: VecDeque<Segment>,
    /// Far edge of the newest segment. Only ever decreases within a floor.
    frontier_z: f32,
    next_segment_id: u32,
    max_segments: usize,
}

impl LevelWindow {
    pub fn new(max_segments: usize) -> Self {
        Self {
            segments: VecDeque::with_capacity(max_segments + 1),
            frontier_z: 0.0,
            next_segment_id: 0,
            max_segments,
        }
    }

    pub fn frontier_z(&self) -> f32 {
        self.frontier_z
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Whether the player is close enough to the frontier to need more map.
    pub fn needs_extension(&self, player_z: f32, lookahead: f32) -> bool {
        player_z - self.frontier_z < lookahead
    }

    /// Reserve an id for the next segment. Ids are never reused.
    pub fn allocate_id(&mut self) -> SegmentId {
        let id = SegmentId(self.next_segment_id);
        self.next_segment_id += 1;
        id
    }

    /// Append a segment and advance the frontier. Returns the evicted
    /// oldest segment when the window overflows.
    pub fn push(&mut self, segment: Segment, segment_length: f32) -> Option<Segment> {
        self.frontier_z = segment.start_z - segment_length;
        self.segments.push_back(segment);
        if self.segments.len() > self.max_segments {
            self.segments.pop_front()
        } else {
            None
        }
    }

    pub fn remove_interactable(&mut self, id: InteractableId) {
        for segment in self.segments.iter_mut() {
            segment.interactables.retain(|i| *i != id);
        }
    }

    /// Drop every segment and reset the frontier to the origin.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.frontier_z = 0.0;
    }

    pub fn solids(&self) -> impl Iterator<Item = &Aabb> {
        self.segments.iter().flat_map(|s| s.solids.iter())
    }
}

/// A hinged classroom door.
#[derive(Debug, Clone)]
pub struct Door {
    pub id: DoorId,
    pub segment: SegmentId,
    pub object: InteractableId,
    pub spec: DoorSpec,
    pub angle: f32,
    pub target: f32,
    pub open: bool,
}

impl Door {
    pub fn new(id: DoorId, segment: SegmentId, object: InteractableId, spec: DoorSpec) -> Self {
        Self {
            id,
            segment,
            object,
            spec,
            angle: 0.0,
            target: 0.0,
            open: false,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.target = if self.open { DOOR_OPEN_ANGLE } else { 0.0 };
        self.open
    }

    /// Move the hinge toward its target. Snaps once within epsilon.
    pub fn step(&mut self, dt: f32) {
        let diff = self.target - self.angle;
        if diff.abs() < DOOR_SNAP_EPSILON {
            self.angle = self.target;
        } else {
            self.angle += diff * (DOOR_APPROACH_RATE * dt).min(1.0);
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.spec.bounds_at(self.angle)
    }

    pub fn view(&self) -> DoorView {
        DoorView {
            id: self.id,
            pivot: self.spec.pivot,
            angle: self.angle,
            open: self.open,
        }
    }
}

/// Everything generated for the current floor: segments, their
/// interactables and their doors.
#[derive(Debug, Clone)]
pub struct Level {
    pub window: LevelWindow,
    pub registry: InteractionRegistry,
    pub doors: BTreeMap<DoorId, Door>,
    pub next_door_id: u32,
}

impl Level {
    pub fn new(max_segments: usize) -> Self {
        Self {
            window: LevelWindow::new(max_segments),
            registry: InteractionRegistry::new(),
            doors: BTreeMap::new(),
            next_door_id: 0,
        }
    }

    /// Static walls plus every door box at its current angle.
    pub fn occluders(&self) -> Vec<Aabb> {
        self.window
            .solids()
            .copied()
            .chain(self.doors.values().map(Door::bounds))
            .collect()
    }

    /// Remove a consumed interactable from the registry and its segment.
    pub fn remove_interactable(&mut self, id: InteractableId) -> bool {
        self.window.remove_interactable(id);
        self.registry.remove(id).is_some()
    }

    /// Drop an evicted segment's interactables and doors.
    pub fn release(&mut self, segment: &Segment) {
        let removed = self.registry.remove_segment(segment.id);
        self.doors.retain(|_, door| door.segment != segment.id);
        log::debug!(
            "released segment {:?} at z={:.1} ({} interactables)",
            segment.id,
            segment.start_z,
            removed
        );
    }

    /// Forget the whole floor. Id counters keep running.
    pub fn clear(&mut self) {
        self.window.clear();
        self.registry.clear();
        self.doors.clear();
    }
}
