//! Orthonormal frames for orienting tube meshes along foam edges.
//!
//! A frame is stored as three columns `[right, up, forward]`. `forward` is the
//! unit direction from an edge's start point to its end point; `right` and `up`
//! complete a right-handed basis (`right × up = forward`).
//!
//! ```ignore
//! let mut frame = EdgeFrame::IDENTITY;
//! edge_rotation(begin, end, &mut frame);
//! renderer.mult_matrix(&frame.to_gl_matrix(begin));
//! ```

use serde::Serialize;

use super::{Point3, Tolerance, Vec3};

/// Right-handed orthonormal basis with the edge direction as third column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeFrame {
    columns: [Vec3; 3],
}

impl EdgeFrame {
    /// The unset frame: world axes.
    pub const IDENTITY: Self = Self {
        columns: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// Build a frame whose forward axis points from `begin` to `end`.
    ///
    /// Returns `None` when the two points coincide exactly.
    #[must_use]
    pub fn from_axis(begin: Point3, end: Point3) -> Option<Self> {
        Self::from_direction(end - begin)
    }

    /// Build a frame whose forward axis is `direction` normalized.
    ///
    /// Returns `None` for the zero vector and for directions whose length is
    /// not finite.
    #[must_use]
    pub fn from_direction(direction: Vec3) -> Option<Self> {
        if direction.is_exact_zero() {
            return None;
        }
        // Rescale by the largest component so huge or subnormal edges normalize.
        let a = direction.abs();
        let largest = a.x.max(a.y).max(a.z);
        let forward = direction.div_scalar(largest).normalized()?;
        let right = least_aligned_axis(forward).cross(forward).normalized()?;
        let up = forward.cross(right);
        Some(Self {
            columns: [right, up, forward],
        })
    }

    #[must_use]
    pub const fn right(&self) -> Vec3 {
        self.columns[0]
    }

    #[must_use]
    pub const fn up(&self) -> Vec3 {
        self.columns[1]
    }

    #[must_use]
    pub const fn forward(&self) -> Vec3 {
        self.columns[2]
    }

    /// Column `index` of the frame, `None` past the third column.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<Vec3> {
        self.columns.get(index).copied()
    }

    /// Row-major 3x3 rotation matrix with the frame axes as columns.
    #[must_use]
    pub fn as_matrix(&self) -> [[f64; 3]; 3] {
        let [r, u, f] = self.columns;
        [[r.x, u.x, f.x], [r.y, u.y, f.y], [r.z, u.z, f.z]]
    }

    /// Column-major 4x4 matrix placing the frame at `origin`, in the layout
    /// consumed by `glMultMatrixd`.
    #[must_use]
    pub fn to_gl_matrix(&self, origin: Point3) -> [f64; 16] {
        let [r, u, f] = self.columns;
        [
            r.x, r.y, r.z, 0.0, //
            u.x, u.y, u.z, 0.0, //
            f.x, f.y, f.z, 0.0, //
            origin.x, origin.y, origin.z, 1.0,
        ]
    }

    /// Map a vector expressed in frame coordinates into world space.
    #[must_use]
    pub fn apply_vec(&self, local: Vec3) -> Vec3 {
        let [r, u, f] = self.columns;
        r * local.x + u * local.y + f * local.z
    }

    /// Unit columns, pairwise perpendicular, and `right × up = forward`.
    #[must_use]
    pub fn is_orthonormal(&self, tol: Tolerance) -> bool {
        let [r, u, f] = self.columns;
        self.columns
            .iter()
            .all(|c| tol.approx_eq_f64(c.length(), 1.0))
            && tol.approx_zero_f64(r.dot(u))
            && tol.approx_zero_f64(u.dot(f))
            && tol.approx_zero_f64(f.dot(r))
            && tol.approx_eq_vec3(r.cross(u), f)
    }
}

impl Default for EdgeFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Orient `frame` along the edge from `begin` to `end`.
///
/// When the two endpoints coincide the frame is left exactly as it was; callers
/// drawing zero-length edges must tolerate whatever frame they passed in.
pub fn edge_rotation(begin: Point3, end: Point3, frame: &mut EdgeFrame) {
    match EdgeFrame::from_axis(begin, end) {
        Some(computed) => *frame = computed,
        None => {
            if !(end - begin).is_exact_zero() {
                log::warn!("edge direction {begin:?} -> {end:?} cannot be normalized; frame unchanged");
            }
        }
    }
}

/// World axis most perpendicular to `dir`; ties resolve towards X, then Y.
fn least_aligned_axis(dir: Vec3) -> Vec3 {
    let a = dir.abs();
    if a.x <= a.y && a.x <= a.z {
        Vec3::X
    } else if a.y <= a.z {
        Vec3::Y
    } else {
        Vec3::Z
    }
}
