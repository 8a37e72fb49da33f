//! Corridor segment synthesis.
//!
//! A segment spans `segment_length` meters from `start_z` toward −Z. The
//! corridor is 6 m wide (x in [−3, 3]) and 4 m tall; a classroom, when
//! present, opens off the left wall. Everything is emitted as plain data in
//! world space; the simulation assigns ids and registers it.

use glam::{Quat, Vec3};
use lastbell_core::config::GameConfig;
use lastbell_core::constants::*;
use lastbell_core::content::ContentTables;
use lastbell_core::enums::{ItemKind, MaterialClass, ShapeClass};
use lastbell_core::types::Aabb;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{roll_item, WallProp, PROPS};

/// Generation knobs for one segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentParams {
    pub start_z: f32,
    pub segment_length: f32,
    pub safe: bool,
    pub classroom_chance: f32,
    pub desk_chance: f32,
    pub desk_knocked_chance: f32,
    pub elevator_chance: f32,
    pub light_chance: f32,
}

impl SegmentParams {
    pub fn from_config(config: &GameConfig, start_z: f32, safe: bool) -> Self {
        Self {
            start_z,
            segment_length: config.segment_length,
            safe,
            classroom_chance: config.classroom_chance,
            desk_chance: config.desk_chance,
            desk_knocked_chance: config.desk_knocked_chance,
            elevator_chance: config.elevator_chance,
            light_chance: config.light_chance,
        }
    }
}

/// What activating a generated object does.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Pickup(ItemKind),
    /// Index into [`SegmentBlueprint::doors`].
    Door { door: usize },
    Locker { hide_at: Vec3 },
    Note(String),
    Flavor(String),
    Puzzle,
    Computer,
    ElevatorCall,
}

#[derive(Debug, Clone)]
pub struct ObjectSpec {
    pub kind: ObjectKind,
    pub hover_text: String,
    pub bounds: Aabb,
}

/// Renderer placement for one piece of geometry.
#[derive(Debug, Clone)]
pub struct GeometrySpec {
    pub shape: ShapeClass,
    pub material: MaterialClass,
    pub center: Vec3,
    pub half_extents: Vec3,
    pub yaw: f32,
    /// Index into [`SegmentBlueprint::objects`] when this is interactable.
    pub object: Option<usize>,
}

/// A hinged classroom door. Its box swings with the hinge angle.
#[derive(Debug, Clone, Copy)]
pub struct DoorSpec {
    pub pivot: Vec3,
    /// Box center relative to the pivot at angle zero.
    pub local_center: Vec3,
    pub half_extents: Vec3,
    /// Index into [`SegmentBlueprint::objects`].
    pub object: usize,
}

impl DoorSpec {
    /// World-space bounding box at the given hinge angle.
    pub fn bounds_at(&self, angle: f32) -> Aabb {
        let center = self.pivot + Quat::from_rotation_y(angle) * self.local_center;
        Aabb::new(center, rotated_half_extents(self.half_extents, angle))
    }
}

/// Output of segment synthesis.
#[derive(Debug, Clone, Default)]
pub struct SegmentBlueprint {
    pub start_z: f32,
    pub safe: bool,
    /// Static collision and occlusion boxes.
    pub solids: Vec<Aabb>,
    pub geometry: Vec<GeometrySpec>,
    pub objects: Vec<ObjectSpec>,
    pub doors: Vec<DoorSpec>,
    pub lights: Vec<Vec3>,
    pub has_classroom: bool,
    pub has_elevator: bool,
}

impl SegmentBlueprint {
    fn decor(&mut self, shape: ShapeClass, material: MaterialClass, center: Vec3, half: Vec3, yaw: f32) {
        self.geometry.push(GeometrySpec {
            shape,
            material,
            center,
            half_extents: half,
            yaw,
            object: None,
        });
    }

    fn solid(&mut self, shape: ShapeClass, material: MaterialClass, center: Vec3, half: Vec3, yaw: f32) {
        self.solids.push(Aabb::new(center, half));
        self.decor(shape, material, center, half, yaw);
    }

    #[allow(clippy::too_many_arguments)]
    fn object(
        &mut self,
        kind: ObjectKind,
        hover_text: impl Into<String>,
        shape: ShapeClass,
        material: MaterialClass,
        center: Vec3,
        half: Vec3,
        yaw: f32,
    ) -> usize {
        let index = self.objects.len();
        self.objects.push(ObjectSpec {
            kind,
            hover_text: hover_text.into(),
            bounds: Aabb::new(center, half),
        });
        self.geometry.push(GeometrySpec {
            shape,
            material,
            center,
            half_extents: half,
            yaw,
            object: Some(index),
        });
        index
    }
}

/// Half extents of the axis-aligned box enclosing a box rotated about Y.
pub fn rotated_half_extents(half: Vec3, yaw: f32) -> Vec3 {
    let (s, c) = yaw.sin_cos();
    let (s, c) = (s.abs(), c.abs());
    Vec3::new(c * half.x + s * half.z, half.y, s * half.x + c * half.z)
}

/// Probability that a freshly generated segment spawns a hostile ghost.
/// Low sanity raises it linearly up to `base + 0.4`, never above `cap`.
pub fn ghost_spawn_chance(base: f32, cap: f32, sanity: f32) -> f32 {
    let bonus = if sanity < SPAWN_SANITY_THRESHOLD {
        (SPAWN_SANITY_THRESHOLD - sanity) / SPAWN_SANITY_THRESHOLD * 0.4
    } else {
        0.0
    };
    (base + bonus).min(cap)
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[String]) -> String {
    pool.choose(rng).cloned().unwrap_or_default()
}

/// Build one segment.
pub fn synthesize_segment<R: Rng + ?Sized>(
    rng: &mut R,
    params: &SegmentParams,
    content: &ContentTables,
) -> SegmentBlueprint {
    let len = params.segment_length;
    let z0 = params.start_z;
    let mid = z0 - len / 2.0;
    let mut bp = SegmentBlueprint {
        start_z: z0,
        safe: params.safe,
        ..Default::default()
    };

    // Floor and ceiling
    let floor_text = pick(rng, &content.floor_flavor);
    bp.object(
        ObjectKind::Flavor(floor_text),
        "Examine floor",
        ShapeClass::Floor,
        MaterialClass::CorridorFloor,
        Vec3::new(0.0, 0.0, mid),
        Vec3::new(CORRIDOR_HALF_WIDTH, 0.01, len / 2.0),
        0.0,
    );
    bp.decor(
        ShapeClass::Ceiling,
        MaterialClass::Ceiling,
        Vec3::new(0.0, CEILING_HEIGHT, mid),
        Vec3::new(CORRIDOR_HALF_WIDTH, 0.01, len / 2.0),
        0.0,
    );

    // Right wall is always solid
    bp.solid(
        ShapeClass::Wall,
        MaterialClass::CorridorWall,
        Vec3::new(CORRIDOR_HALF_WIDTH, CEILING_HEIGHT / 2.0, mid),
        Vec3::new(0.1, CEILING_HEIGHT / 2.0, len / 2.0),
        -std::f32::consts::FRAC_PI_2,
    );
    decorate_wall(rng, &mut bp, 1.0, mid, len);

    bp.has_classroom = !params.safe && rng.gen::<f32>() < params.classroom_chance;
    if bp.has_classroom {
        build_classroom(rng, &mut bp, params, content, mid);
    } else {
        bp.solid(
            ShapeClass::Wall,
            MaterialClass::CorridorWall,
            Vec3::new(-CORRIDOR_HALF_WIDTH, CEILING_HEIGHT / 2.0, mid),
            Vec3::new(0.1, CEILING_HEIGHT / 2.0, len / 2.0),
            std::f32::consts::FRAC_PI_2,
        );
        decorate_wall(rng, &mut bp, -1.0, mid, len);
    }

    scatter_debris(rng, &mut bp, content, z0, len);

    bp.has_elevator = !params.safe && rng.gen::<f32>() < params.elevator_chance;
    if bp.has_elevator {
        build_elevator(&mut bp, z0 - len + 1.0);
    }

    if rng.gen::<f32>() < params.light_chance {
        bp.lights.push(Vec3::new(0.0, CEILING_HEIGHT - 0.2, mid));
    }

    log::debug!(
        "synthesized segment at z={:.1} safe={} classroom={} elevator={} objects={}",
        z0,
        params.safe,
        bp.has_classroom,
        bp.has_elevator,
        bp.objects.len()
    );
    bp
}

/// Place the survival guide and its table just ahead of the spawn point.
pub fn add_tutorial_note(bp: &mut SegmentBlueprint, content: &ContentTables) {
    bp.solid(
        ShapeClass::Table,
        MaterialClass::Wood,
        Vec3::new(0.0, 0.5, -3.0),
        Vec3::new(0.5, 0.5, 0.5),
        0.0,
    );
    bp.object(
        ObjectKind::Note(content.tutorial_note.clone()),
        "Read survival guide",
        ShapeClass::Note,
        MaterialClass::Paper,
        Vec3::new(0.0, 1.01, -3.0),
        Vec3::new(0.15, 0.01, 0.2),
        0.0,
    );
}

/// Mount 0–4 props on the wall on `side` (+1 right, −1 left).
fn decorate_wall<R: Rng + ?Sized>(rng: &mut R, bp: &mut SegmentBlueprint, side: f32, mid: f32, len: f32) {
    let count = rng.gen_range(0..=MAX_WALL_PROPS);
    let wall_x = side * (CORRIDOR_HALF_WIDTH - 0.1);
    let yaw = -side * std::f32::consts::FRAC_PI_2;
    for _ in 0..count {
        let z = mid + rng.gen_range(-0.45..0.45) * len;
        let Some(prop) = WallProp::roll(rng.gen()) else {
            continue;
        };
        let center = Vec3::new(wall_x - side * prop.inset(), prop.height(), z);
        let kind = ObjectKind::Flavor(prop.flavor().to_string());
        let hover = format!("Examine {}", prop.name());
        if prop == WallProp::VendingMachine {
            bp.solids.push(Aabb::new(center, prop.half_extents()));
        }
        bp.object(
            kind,
            hover,
            ShapeClass::WallProp,
            prop.material(),
            center,
            prop.half_extents(),
            yaw,
        );
    }
}

fn build_classroom<R: Rng + ?Sized>(
    rng: &mut R,
    bp: &mut SegmentBlueprint,
    params: &SegmentParams,
    content: &ContentTables,
    zc: f32,
) {
    let half_h = CEILING_HEIGHT / 2.0;
    let x_wall = -CORRIDOR_HALF_WIDTH;
    let half_len = params.segment_length / 2.0;
    let side_len = (half_len - 2.0) / 2.0;

    // Left corridor wall split around a 4 m doorway with a lintel
    for sign in [1.0_f32, -1.0] {
        bp.solid(
            ShapeClass::Wall,
            MaterialClass::CorridorWall,
            Vec3::new(x_wall, half_h, zc + sign * (2.0 + side_len)),
            Vec3::new(0.1, half_h, side_len),
            std::f32::consts::FRAC_PI_2,
        );
    }
    bp.solid(
        ShapeClass::Wall,
        MaterialClass::CorridorWall,
        Vec3::new(x_wall, 3.5, zc),
        Vec3::new(0.1, 0.5, 2.0),
        std::f32::consts::FRAC_PI_2,
    );

    // Room shell: 10 m deep, 12 m long
    bp.decor(
        ShapeClass::Floor,
        MaterialClass::RoomFloor,
        Vec3::new(-8.0, 0.02, zc),
        Vec3::new(5.0, 0.01, 6.0),
        0.0,
    );
    bp.decor(
        ShapeClass::Ceiling,
        MaterialClass::Ceiling,
        Vec3::new(-8.0, CEILING_HEIGHT, zc),
        Vec3::new(5.0, 0.01, 6.0),
        0.0,
    );
    let back_text = pick(rng, &content.wall_flavor);
    let back_center = Vec3::new(-13.0, half_h, zc);
    let back_half = Vec3::new(0.1, half_h, 6.0);
    bp.solids.push(Aabb::new(back_center, back_half));
    bp.object(
        ObjectKind::Flavor(back_text),
        "Examine wall",
        ShapeClass::Wall,
        MaterialClass::RoomWall,
        back_center,
        back_half,
        std::f32::consts::FRAC_PI_2,
    );
    for sign in [-1.0_f32, 1.0] {
        bp.solid(
            ShapeClass::Wall,
            MaterialClass::RoomWall,
            Vec3::new(-8.0, half_h, zc + sign * 6.0),
            Vec3::new(5.0, half_h, 0.1),
            0.0,
        );
    }

    // Door hinged at the far edge of the doorway, swinging into the room
    let door_object = bp.objects.len();
    let door = DoorSpec {
        pivot: Vec3::new(x_wall, 0.0, zc - 2.0),
        local_center: Vec3::new(0.0, 1.75, 1.9),
        half_extents: Vec3::new(0.05, 1.75, 1.9),
        object: door_object,
    };
    let closed = door.bounds_at(0.0);
    let door_index = bp.doors.len();
    bp.doors.push(door);
    bp.object(
        ObjectKind::Door { door: door_index },
        "Open / close door",
        ShapeClass::Door,
        MaterialClass::Wood,
        closed.center,
        closed.half_extents,
        0.0,
    );

    bp.object(
        ObjectKind::Puzzle,
        "Examine blackboard puzzle",
        ShapeClass::Blackboard,
        MaterialClass::Chalkboard,
        Vec3::new(-12.85, 2.0, zc),
        Vec3::new(0.05, 1.0, 3.0),
        std::f32::consts::FRAC_PI_2,
    );

    // Front desk with the terminal on top
    bp.solid(
        ShapeClass::Desk,
        MaterialClass::Wood,
        Vec3::new(-10.0, 0.5, zc - 3.0),
        Vec3::new(0.75, 0.5, 1.5),
        0.0,
    );
    bp.object(
        ObjectKind::Computer,
        "Terminal [hack required]",
        ShapeClass::Terminal,
        MaterialClass::Emissive,
        Vec3::new(-10.0, 1.2, zc - 3.0),
        Vec3::new(0.25, 0.2, 0.3),
        0.0,
    );

    // Locker with its door facing into the room
    let locker_at = Vec3::new(-12.0, 0.0, zc + 4.5);
    bp.solid(
        ShapeClass::Locker,
        MaterialClass::Metal,
        locker_at + Vec3::new(0.0, 1.75, 0.0),
        Vec3::new(0.5, 1.75, 0.5),
        0.0,
    );
    bp.object(
        ObjectKind::Locker {
            hide_at: Vec3::new(locker_at.x, HIDING_EYE_HEIGHT, locker_at.z),
        },
        "Hide",
        ShapeClass::Locker,
        MaterialClass::Metal,
        locker_at + Vec3::new(0.55, 1.75, 0.0),
        Vec3::new(0.05, 1.7, 0.45),
        0.0,
    );

    // Student desks, 2 rows of 3
    for row in 0..2 {
        for col in 0..3 {
            if rng.gen::<f32>() >= params.desk_chance {
                continue;
            }
            let yaw = rng.gen::<f32>() - 0.5;
            let knocked = rng.gen::<f32>() < params.desk_knocked_chance;
            let (center_y, half) = if knocked {
                (0.5, Vec3::new(0.4, 0.5, 0.75))
            } else {
                (0.4, Vec3::new(0.5, 0.4, 0.75))
            };
            let center = Vec3::new(-6.0 - row as f32 * 2.5, center_y, zc - 2.0 + col as f32 * 2.0);
            let half = rotated_half_extents(half, yaw);
            bp.solids.push(Aabb::new(center, half));
            if knocked {
                bp.decor(ShapeClass::Desk, MaterialClass::Wood, center, half, yaw);
            } else {
                let text = pick(rng, &content.object_flavor);
                bp.object(
                    ObjectKind::Flavor(text),
                    "Examine desk",
                    ShapeClass::Desk,
                    MaterialClass::Wood,
                    center,
                    half,
                    yaw,
                );
            }
        }
    }
}

/// Scatter 0–11 debris entries across the corridor floor.
fn scatter_debris<R: Rng + ?Sized>(
    rng: &mut R,
    bp: &mut SegmentBlueprint,
    content: &ContentTables,
    z0: f32,
    len: f32,
) {
    let count = rng.gen_range(0..=MAX_DEBRIS);
    for _ in 0..count {
        let x = rng.gen_range(-2.0..2.0);
        let z = z0 - rng.gen::<f32>() * len;
        let r: f32 = rng.gen();

        if r < 0.7 {
            let Some(prop) = PROPS.choose(rng) else {
                continue;
            };
            let text = match prop.flavor.choose(rng) {
                Some(line) => line.to_string(),
                None => pick(rng, &content.object_flavor),
            };
            let yaw = rng.gen_range(0.0..3.0);
            let half = rotated_half_extents(prop.half_extents, yaw);
            bp.object(
                ObjectKind::Flavor(text),
                format!("Examine {}", prop.name),
                ShapeClass::Prop,
                prop.material,
                Vec3::new(x, half.y.max(0.1), z),
                half,
                yaw,
            );
        } else if r < 0.8 {
            let note = pick(rng, &content.lore_notes);
            bp.object(
                ObjectKind::Note(note),
                "Read note",
                ShapeClass::Note,
                MaterialClass::Paper,
                Vec3::new(x, 0.02, z),
                Vec3::new(0.15, 0.01, 0.2),
                rng.gen_range(0.0..std::f32::consts::PI),
            );
        } else if r < 0.9 {
            let item = roll_item(rng.gen());
            bp.object(
                ObjectKind::Pickup(item),
                format!("Pick up {}", item.display_name()),
                ShapeClass::Pickup,
                MaterialClass::Emissive,
                Vec3::new(x, 0.2, z),
                Vec3::new(0.15, 0.15, 0.15),
                0.0,
            );
        }
    }
}

/// Elevator call panel with closed doors in front of it.
fn build_elevator(bp: &mut SegmentBlueprint, z: f32) {
    for sign in [-1.0_f32, 1.0] {
        bp.solid(
            ShapeClass::ElevatorDoor,
            MaterialClass::Metal,
            Vec3::new(sign * 0.75, 1.75, z + 0.4),
            Vec3::new(0.75, 1.75, 0.1),
            0.0,
        );
    }
    bp.object(
        ObjectKind::ElevatorCall,
        "Call elevator",
        ShapeClass::ElevatorFrame,
        MaterialClass::Metal,
        Vec3::new(0.0, 2.0, z),
        Vec3::new(2.0, 2.0, 0.5),
        0.0,
    );
}
