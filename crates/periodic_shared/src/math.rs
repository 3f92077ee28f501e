//! Mathematical types shared by layouts, transitions and render sinks.
//!
//! Orientation is stored as XYZ Euler angles because transitions interpolate
//! each angle independently. `Quaternion` is provided for render layers that
//! want one.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Squared length below which a cross product is treated as degenerate.
const DEGENERATE_LENGTH_SQUARED: f32 = 1e-12;

/// Offset applied to a forward axis that is parallel to the up axis.
const PARALLEL_NUDGE: f32 = 1e-4;

/// Cosine threshold above which the Euler decomposition is gimbal locked.
const GIMBAL_LOCK_THRESHOLD: f32 = 0.999_999_9;

/// 3D Vector - position, direction
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Point on a sphere of `radius`, `phi` measured from +Y and `theta`
    /// around the Y axis starting at +Z.
    #[must_use]
    pub fn from_spherical(radius: f32, phi: f32, theta: f32) -> Self {
        let sin_phi_radius = phi.sin() * radius;
        Self::new(
            sin_phi_radius * theta.sin(),
            phi.cos() * radius,
            sin_phi_radius * theta.cos(),
        )
    }

    /// Point on a cylinder of `radius` around the Y axis, at angle `theta`
    /// from +Z and height `y`.
    #[must_use]
    pub fn from_cylindrical(radius: f32, theta: f32, y: f32) -> Self {
        Self::new(radius * theta.sin(), y, radius * theta.cos())
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    #[must_use]
    pub fn normalize(self) -> Self {
        let length = self.length();
        if length == 0.0 {
            self
        } else {
            self * (1.0 / length)
        }
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Euler angles in radians, applied in X, then Y, then Z order.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about X
    pub x: f32,
    /// Rotation about Y
    pub y: f32,
    /// Rotation about Z
    pub z: f32,
}

impl EulerAngles {
    /// Creates new Euler angles
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// No rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    /// Per-angle linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// Converts to a quaternion.
    #[must_use]
    pub fn to_quaternion(self) -> Quaternion {
        let (s1, c1) = (self.x * 0.5).sin_cos();
        let (s2, c2) = (self.y * 0.5).sin_cos();
        let (s3, c3) = (self.z * 0.5).sin_cos();

        Quaternion::new(
            s1 * c2 * c3 + c1 * s2 * s3,
            c1 * s2 * c3 - s1 * c2 * s3,
            c1 * c2 * s3 + s1 * s2 * c3,
            c1 * c2 * c3 - s1 * s2 * s3,
        )
    }
}

/// Quaternion for rotations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Quaternion {
    /// Creates a new quaternion
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Dot product, used to compare rotations up to sign.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Orthonormal basis of a rotated object: the columns of its rotation matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationBasis {
    /// Local +X axis
    pub right: Vec3,
    /// Local +Y axis
    pub up: Vec3,
    /// Local +Z axis
    pub forward: Vec3,
}

impl RotationBasis {
    /// Basis whose +Z axis points from `eye` towards `target`, keeping +X
    /// perpendicular to `up`.
    ///
    /// When the viewing direction is parallel to `up` the forward axis is
    /// nudged so the basis stays well defined.
    #[must_use]
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut forward = target - eye;
        if forward.length_squared() == 0.0 {
            forward = Vec3::Z;
        }
        forward = forward.normalize();

        let mut right = up.cross(forward);
        if right.length_squared() < DEGENERATE_LENGTH_SQUARED {
            if up.z.abs() == 1.0 {
                forward.x += PARALLEL_NUDGE;
            } else {
                forward.z += PARALLEL_NUDGE;
            }
            forward = forward.normalize();
            right = up.cross(forward);
        }
        let right = right.normalize();
        let up = forward.cross(right);

        Self { right, up, forward }
    }

    /// Decomposes the basis into XYZ Euler angles.
    #[must_use]
    pub fn to_euler(self) -> EulerAngles {
        let m11 = self.right.x;
        let m12 = self.up.x;
        let m13 = self.forward.x;
        let m22 = self.up.y;
        let m23 = self.forward.y;
        let m32 = self.up.z;
        let m33 = self.forward.z;

        let y = m13.clamp(-1.0, 1.0).asin();
        if m13.abs() < GIMBAL_LOCK_THRESHOLD {
            EulerAngles::new((-m23).atan2(m33), y, (-m12).atan2(m11))
        } else {
            EulerAngles::new(m32.atan2(m22), y, 0.0)
        }
    }

    /// Converts the basis to a unit quaternion.
    #[must_use]
    pub fn to_quaternion(self) -> Quaternion {
        let (m11, m12, m13) = (self.right.x, self.up.x, self.forward.x);
        let (m21, m22, m23) = (self.right.y, self.up.y, self.forward.y);
        let (m31, m32, m33) = (self.right.z, self.up.z, self.forward.z);

        let trace = m11 + m22 + m33;
        if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Quaternion::new((m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s)
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            Quaternion::new(0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s)
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            Quaternion::new((m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s)
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            Quaternion::new((m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s)
        }
    }
}

/// Transform - position + orientation
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Transform {
    /// Position
    pub position: Vec3,
    /// Orientation
    pub orientation: EulerAngles,
}

impl Transform {
    /// Creates a new transform
    #[must_use]
    pub const fn new(position: Vec3, orientation: EulerAngles) -> Self {
        Self { position, orientation }
    }

    /// Unrotated transform at `position`.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, EulerAngles::IDENTITY)
    }

    /// Transform at `position` whose +Z axis faces `target`, with +Y as up.
    #[must_use]
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let basis = RotationBasis::look_at(position, target, Vec3::Y);
        Self::new(position, basis.to_euler())
    }

    /// Identity transform
    pub const IDENTITY: Self = Self::at(Vec3::ZERO);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!(a.distance(b) < 1e-4, "{a:?} != {b:?}");
    }

    /// Rotates `v` by the XYZ Euler angles (R = Rx * Ry * Rz).
    fn rotate(e: EulerAngles, v: Vec3) -> Vec3 {
        let (sz, cz) = e.z.sin_cos();
        let v = Vec3::new(cz * v.x - sz * v.y, sz * v.x + cz * v.y, v.z);
        let (sy, cy) = e.y.sin_cos();
        let v = Vec3::new(cy * v.x + sy * v.z, v.y, -sy * v.x + cy * v.z);
        let (sx, cx) = e.x.sin_cos();
        Vec3::new(v.x, cx * v.y - sx * v.z, sx * v.y + cx * v.z)
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        let sum = a + b;
        assert_eq!(sum.x, 5.0);
        assert_eq!(sum.y, 7.0);
        assert_eq!(sum.z, 9.0);

        let dot = a.dot(b);
        assert_eq!(dot, 32.0); // 1*4 + 2*5 + 3*6

        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_vec3_bytemuck() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 12); // 3 * 4 bytes

        let t = Transform::IDENTITY;
        assert_eq!(bytemuck::bytes_of(&t).len(), 24);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_spherical_poles() {
        let north = Vec3::from_spherical(800.0, 0.0, 1.3);
        assert_vec_close(north, Vec3::new(0.0, 800.0, 0.0));

        let equator = Vec3::from_spherical(800.0, std::f32::consts::FRAC_PI_2, 0.0);
        assert_vec_close(equator, Vec3::new(0.0, 0.0, 800.0));
    }

    #[test]
    fn test_cylindrical() {
        let p = Vec3::from_cylindrical(10.0, std::f32::consts::FRAC_PI_2, 5.0);
        assert_vec_close(p, Vec3::new(10.0, 5.0, 0.0));
    }

    #[test]
    fn test_look_at_forward_axis_faces_target() {
        let eye = Vec3::new(300.0, -200.0, 500.0);
        let target = eye * 2.0;
        let transform = Transform::looking_at(eye, target);

        let forward = rotate(transform.orientation, Vec3::Z);
        assert_vec_close(forward, (target - eye).normalize());
    }

    #[test]
    fn test_look_at_along_z_is_identity() {
        let transform = Transform::looking_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        assert_vec_close(
            Vec3::new(transform.orientation.x, transform.orientation.y, transform.orientation.z),
            Vec3::ZERO,
        );
    }

    #[test]
    fn test_look_at_straight_down_is_finite() {
        let basis = RotationBasis::look_at(Vec3::new(0.0, -800.0, 0.0), Vec3::new(0.0, -1600.0, 0.0), Vec3::Y);
        let euler = basis.to_euler();
        assert!(euler.x.is_finite() && euler.y.is_finite() && euler.z.is_finite());
        assert!((basis.right.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_basis_quaternion_matches_euler_quaternion() {
        let basis = RotationBasis::look_at(Vec3::new(120.0, 40.0, -700.0), Vec3::new(240.0, 80.0, -1400.0), Vec3::Y);
        let a = basis.to_quaternion();
        let b = basis.to_euler().to_quaternion();
        // q and -q describe the same rotation
        assert!((a.dot(b).abs() - 1.0).abs() < 1e-4);
    }
}
