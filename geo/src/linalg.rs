use crate::vec2::{v2, Vec2};
use crate::vec3::Vec3;

/// Solve the overdetermined 3-equation, 2-unknown system `a*u + c*v = b` in
/// the least-squares sense, where `a` and `c` are the two columns of the 3x2
/// coefficient matrix and `b` is the right-hand side.
///
/// This is the normal-equations form of the problem: minimizing
/// `|| [a|c] * [u,v]^T - b ||^2` is equivalent to solving the 2x2 system
/// `(AtA) * [u,v]^T = Atb`, which is cheap to solve directly without a full
/// QR decomposition. Returns `None` when `[a|c]` is rank-deficient, i.e. the
/// 2x2 Gram matrix `AtA` is singular.
pub fn solve_3x2(a: Vec3, c: Vec3, b: Vec3) -> Option<Vec2> {
    let aa = a.dot(a);
    let ac = a.dot(c);
    let cc = c.dot(c);

    let det = aa * cc - ac * ac;
    if det.abs() < 1e-12 {
        return None;
    }

    let ab = a.dot(b);
    let cb = c.dot(b);

    let u = (cc * ab - ac * cb) / det;
    let v = (aa * cb - ac * ab) / det;

    Some(v2(u, v))
}
