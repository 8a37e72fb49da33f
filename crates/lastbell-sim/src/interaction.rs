//! Registry of world objects the player can act on.

use std::collections::BTreeMap;

use glam::Vec3;

use lastbell_core::constants::OCCLUSION_EPSILON;
use lastbell_core::enums::ItemKind;
use lastbell_core::types::{Aabb, DoorId, InteractableId, SegmentId};

/// What activating an interactable does, with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractableKind {
    Pickup(ItemKind),
    Door(DoorId),
    Locker { hide_at: Vec3 },
    Note(String),
    Flavor(String),
    Puzzle,
    Computer,
    ElevatorCall,
}

#[derive(Debug, Clone)]
pub struct Interactable {
    pub id: InteractableId,
    pub segment: SegmentId,
    pub kind: InteractableKind,
    pub hover_text: String,
    pub bounds: Aabb,
}

/// Flat id-keyed collection. Ids are allocated monotonically and never reused.
#[derive(Debug, Clone, Default)]
pub struct InteractionRegistry {
    items: BTreeMap<InteractableId, Interactable>,
    next_id: u32,
}

impl InteractionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        segment: SegmentId,
        kind: InteractableKind,
        hover_text: String,
        bounds: Aabb,
    ) -> InteractableId {
        let id = InteractableId(self.next_id);
        self.next_id += 1;
        self.items.insert(
            id,
            Interactable {
                id,
                segment,
                kind,
                hover_text,
                bounds,
            },
        );
        id
    }

    pub fn get(&self, id: InteractableId) -> Option<&Interactable> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        self.items.get_mut(&id)
    }

    pub fn remove(&mut self, id: InteractableId) -> Option<Interactable> {
        self.items.remove(&id)
    }

    /// Drop everything a segment owned.
    pub fn remove_segment(&mut self, segment: SegmentId) -> usize {
        let before = self.items.len();
        self.items.retain(|_, item| item.segment != segment);
        before - self.items.len()
    }

    /// Forget every entry. The id counter keeps running.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interactable> {
        self.items.values()
    }

    /// Nearest interactable the aim ray hits among those whose center lies
    /// within `range` of `origin`. Returns `None` when an occluder is hit
    /// strictly before the target.
    pub fn query<'a>(
        &self,
        origin: Vec3,
        dir: Vec3,
        range: f32,
        occluders: impl IntoIterator<Item = &'a Aabb>,
    ) -> Option<InteractableId> {
        let mut best: Option<(f32, InteractableId)> = None;
        for item in self.items.values() {
            if item.bounds.center.distance(origin) >= range {
                continue;
            }
            if let Some(t) = item.bounds.ray_hit(origin, dir, f32::MAX) {
                if best.map_or(true, |(bt, _)| t < bt) {
                    best = Some((t, item.id));
                }
            }
        }

        let (t, id) = best?;
        let blocked = occluders
            .into_iter()
            .filter_map(|wall| wall.ray_hit(origin, dir, t))
            .any(|wt| wt < t - OCCLUSION_EPSILON);
        if blocked {
            None
        } else {
            Some(id)
        }
    }
}
