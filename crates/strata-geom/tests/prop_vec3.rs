use proptest::prelude::*;
use strata_geom::Vec3;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    -1.0e4f32..=1.0e4
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // a + b == b + a element-wise
    #[test]
    fn add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-3));
    }

    // (a - b) + b recovers a
    #[test]
    fn sub_add_roundtrip(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox((a - b) + b, a, 1e-2));
    }

    // a·(a×b) = 0 within scaled tolerance
    #[test]
    fn cross_orthogonal(a in arb_vec3(), b in arb_vec3()) {
        let c = a.cross(b);
        let scale = a.length() * c.length();
        prop_assert!(c.dot(a).abs() <= 1e-2 + 1e-4 * scale);
    }

    // |a·b| <= |a||b|
    #[test]
    fn cauchy_schwarz(a in arb_vec3(), b in arb_vec3()) {
        let lhs = a.dot(b).abs();
        let rhs = a.length() * b.length();
        prop_assert!(lhs <= rhs + 1e-2 + 1e-4 * rhs);
    }

    // += matches +
    #[test]
    fn add_assign_matches_add(a in arb_vec3(), b in arb_vec3()) {
        let mut m = a;
        m += b;
        prop_assert!(vapprox(m, a + b, 1e-6));
    }
}
