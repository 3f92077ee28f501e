//! # Layout Property Tests
//!
//! Length, determinism and anchor-point guarantees of every layout,
//! checked over a spread of entity counts.

use periodic_layout::{LayoutGenerator, LayoutName, LayoutSet};
use periodic_shared::{Transform, Vec3, GRID_CAPACITY};

const COUNTS: [usize; 8] = [0, 1, 2, 19, 20, 199, 200, 517];

fn assert_close(a: &[Transform], b: &[Transform]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert!(x.position.distance(y.position) < 1e-4);
        assert!((x.orientation.x - y.orientation.x).abs() < 1e-5);
        assert!((x.orientation.y - y.orientation.y).abs() < 1e-5);
        assert!((x.orientation.z - y.orientation.z).abs() < 1e-5);
    }
}

/// Test: every layout has the documented length.
#[test]
fn test_layout_lengths() {
    let generator = LayoutGenerator::new();

    for n in COUNTS {
        assert_eq!(generator.table(n).len(), n);
        assert_eq!(generator.sphere(n).len(), n);
        assert_eq!(generator.helix(n).len(), 2 * n);
        assert_eq!(generator.grid(n).len(), n.min(GRID_CAPACITY));
    }
}

/// Test: zero entities means zero targets everywhere.
#[test]
fn test_empty_layouts() {
    let set = LayoutSet::generate(0);
    for name in LayoutName::ALL {
        assert!(set.targets(name).is_empty(), "{name} should be empty");
    }
}

/// Test: repeated generation is identical.
#[test]
fn test_layouts_are_deterministic() {
    let generator = LayoutGenerator::new();

    for n in COUNTS {
        assert_eq!(generator.table(n), generator.table(n));
        assert_eq!(generator.grid(n), generator.grid(n));
        assert_close(&generator.sphere(n), &generator.sphere(n));
        assert_close(&generator.helix(n), &generator.helix(n));
    }
}

/// Test: anchor points of the table and grid.
#[test]
fn test_anchor_points() {
    let generator = LayoutGenerator::new();

    for n in [1, 50, 400] {
        assert_eq!(generator.table(n)[0].position, Vec3::new(-1260.0, -540.0, 0.0));
        assert_eq!(generator.grid(n)[0].position, Vec3::new(-1000.0, -800.0, -5000.0));
    }
}

/// Test: a prefix of a larger table is the smaller table.
#[test]
fn test_table_prefix_stability() {
    let generator = LayoutGenerator::new();
    let small = generator.table(37);
    let large = generator.table(120);
    assert_eq!(small[..], large[..37]);
}

/// Test: sphere cards face away from the origin.
#[test]
fn test_sphere_faces_outwards() {
    for target in LayoutGenerator::new().sphere(90).iter().skip(1) {
        let q = target.orientation.to_quaternion();
        // Rotate +Z by q: v' = v + 2w(u x v) + 2u x (u x v)
        let u = Vec3::new(q.x, q.y, q.z);
        let t = u.cross(Vec3::Z) * 2.0;
        let forward = Vec3::Z + t * q.w + u.cross(t);

        let radial = target.position.normalize();
        assert!(forward.dot(radial) > 0.999, "card at {:?} not facing out", target.position);
    }
}
