//! Mesh2d rendering for ship, enemies, lasers and background tiles.
//!
//! Gameplay code only spawns logical entities with a [`BodySize`]; the
//! systems here attach a filled `Mesh2d` the frame after each one appears.
//! Nothing in this module runs in headless tests.
//!
//! | Entity            | Shape                          |
//! |-------------------|--------------------------------|
//! | [`Ship`]          | upward arrowhead               |
//! | `Enemy` Dart      | downward arrowhead             |
//! | `Enemy` Saucer    | hexagon                        |
//! | [`Laser`]         | rectangle                      |
//! | [`BackgroundTile`]| sparse star field              |

use crate::background::BackgroundTile;
use crate::scene::BodySize;
use crate::ship::{Laser, Ship};
use crate::spawner::{Enemy, EnemyKind};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_ship_mesh_system,
                attach_enemy_mesh_system,
                attach_laser_mesh_system,
                attach_background_mesh_system,
            ),
        );
    }
}

// ── Spawn-time mesh attachment ────────────────────────────────────────────────

pub fn attach_ship_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &BodySize), Added<Ship>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, size) in query.iter() {
        let outline = arrowhead(size.0, 1.0);
        commands.entity(entity).insert((
            Mesh2d(meshes.add(filled_polygon_mesh(&outline))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.45, 0.75, 1.0)))),
        ));
    }
}

pub fn attach_enemy_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &Enemy, &BodySize), Added<Enemy>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, enemy, size) in query.iter() {
        let (outline, color) = match enemy.kind {
            EnemyKind::Dart => (arrowhead(size.0, -1.0), Color::srgb(1.0, 0.35, 0.30)),
            EnemyKind::Saucer => (
                regular_polygon(6, size.0.x / 2.0),
                Color::srgb(0.85, 0.45, 1.0),
            ),
        };
        commands.entity(entity).insert((
            Mesh2d(meshes.add(filled_polygon_mesh(&outline))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(color))),
        ));
    }
}

pub fn attach_laser_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &BodySize), Added<Laser>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, size) in query.iter() {
        commands.entity(entity).insert((
            Mesh2d(meshes.add(filled_polygon_mesh(&rectangle(size.0)))),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(1.0, 0.95, 0.4)))),
        ));
    }
}

/// Each tile gets a handful of small star quads as children.  Star layout is
/// seeded by layer so both tiles of a layer match and the seam is invisible.
pub fn attach_background_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &BackgroundTile, &BodySize), Added<BackgroundTile>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, tile, size) in query.iter() {
        let star_size = 1.0 + tile.layer as f32;
        let brightness = 0.35 + 0.2 * tile.layer as f32;
        let mesh = meshes.add(filled_polygon_mesh(&rectangle(Vec2::splat(star_size))));
        let material = materials.add(ColorMaterial::from_color(Color::srgb(
            brightness, brightness, brightness,
        )));

        commands.entity(entity).with_children(|parent| {
            for i in 0..STARS_PER_TILE {
                let offset = star_offset(tile.layer as u32, i, size.0);
                parent.spawn((
                    Mesh2d(mesh.clone()),
                    MeshMaterial2d(material.clone()),
                    Transform::from_translation(offset.extend(0.0)),
                ));
            }
        });
    }
}

const STARS_PER_TILE: u32 = 40;

/// Deterministic star position inside a tile of `size`, centred on the tile.
fn star_offset(layer: u32, index: u32, size: Vec2) -> Vec2 {
    let h = (layer.wrapping_mul(7919) ^ index)
        .wrapping_mul(2_654_435_761)
        .wrapping_add(0xDEAD_BEEF);
    let u = (h & 0xFFFF) as f32 / 65_535.0;
    let v = (h >> 16) as f32 / 65_535.0;
    Vec2::new((u - 0.5) * size.x, (v - 0.5) * size.y)
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Three-point arrowhead filling `size`; `dir` is `1.0` for up, `-1.0` for down.
fn arrowhead(size: Vec2, dir: f32) -> Vec<Vec2> {
    let half = size / 2.0;
    vec![
        Vec2::new(0.0, half.y * dir),
        Vec2::new(-half.x, -half.y * dir),
        Vec2::new(half.x, -half.y * dir),
    ]
}

fn rectangle(size: Vec2) -> Vec<Vec2> {
    let half = size / 2.0;
    vec![
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
}

fn regular_polygon(sides: usize, radius: f32) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / sides as f32;
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Fan-triangulate a convex polygon into a renderable [`Mesh`].
///
/// Triangle fan from vertex 0: triangles `(0, i, i+1)` for `i ∈ 1..n-2`.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n];
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [(v.x / 100.0) + 0.5, (v.y / 100.0) + 0.5])
        .collect();

    let mut indices: Vec<u32> = Vec::with_capacity(n.saturating_sub(2) * 3);
    for i in 1..(n as u32).saturating_sub(1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
