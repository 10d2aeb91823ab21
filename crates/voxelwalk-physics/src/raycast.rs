//! Voxel grid ray traversal.

use glam::{IVec3, Vec3};
use voxelwalk_core::math::Ray;
use voxelwalk_core::{BlockKind, BlockPos, BlockSource};

/// Result of a raycast against voxels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Point where the ray enters the hit block, on the block's surface.
    pub position: Vec3,
    /// Outward normal of the entered face.
    pub normal: IVec3,
    /// Distance from the ray origin to `position`.
    pub distance: f32,
    /// The solid block that was hit.
    pub block: BlockPos,
    /// Kind of the hit block.
    pub kind: BlockKind,
}

/// Time until the ray first crosses a cell boundary along one axis.
fn first_crossing(origin: f32, cell: i32, direction: f32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let cell = cell as f32;
    if direction > 0.0 {
        (cell + 1.0 - origin) / direction
    } else if direction < 0.0 {
        (origin - cell) / -direction
    } else {
        f32::INFINITY
    }
}

fn step_of(direction: f32) -> i32 {
    if direction > 0.0 {
        1
    } else if direction < 0.0 {
        -1
    } else {
        0
    }
}

/// Walk the cells along `ray` and return the first solid one within `max_distance`.
///
/// Uses the Amanatides-Woo grid traversal. The cell containing the ray origin
/// is never reported, so a ray cast from inside a block finds the next solid
/// face beyond it.
pub fn raycast<S: BlockSource + ?Sized>(grid: &S, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
    let dir = ray.direction;
    if dir == Vec3::ZERO {
        return None;
    }

    let mut cell = BlockPos::from_vec3(ray.origin);
    let step = IVec3::new(step_of(dir.x), step_of(dir.y), step_of(dir.z));
    let t_delta = dir.abs().recip();
    let mut t_max = Vec3::new(
        first_crossing(ray.origin.x, cell.x, dir.x),
        first_crossing(ray.origin.y, cell.y, dir.y),
        first_crossing(ray.origin.z, cell.z, dir.z),
    );

    loop {
        let (t, normal) = if t_max.x < t_max.y && t_max.x < t_max.z {
            let t = t_max.x;
            cell.x += step.x;
            t_max.x += t_delta.x;
            (t, IVec3::new(-step.x, 0, 0))
        } else if t_max.y < t_max.z {
            let t = t_max.y;
            cell.y += step.y;
            t_max.y += t_delta.y;
            (t, IVec3::new(0, -step.y, 0))
        } else {
            let t = t_max.z;
            cell.z += step.z;
            t_max.z += t_delta.z;
            (t, IVec3::new(0, 0, -step.z))
        };

        if t > max_distance {
            return None;
        }

        let kind = grid.block_at(cell);
        if kind.is_solid() {
            return Some(RaycastHit {
                position: ray.at(t),
                normal,
                distance: t,
                block: cell,
                kind,
            });
        }
    }
}
