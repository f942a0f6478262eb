//! Deterministic 2-D vector algebra built on [`FP`].

use crate::fp::FP;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A pair of [`FP`] components. No invariants beyond its two fields;
/// `ZERO`/`ONE`/axis constants are compile-time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct FPVec2 {
    pub x: FP,
    pub y: FP,
}

impl FPVec2 {
    pub const ZERO: FPVec2 = FPVec2 { x: FP::ZERO, y: FP::ZERO };
    pub const ONE: FPVec2 = FPVec2 { x: FP::ONE, y: FP::ONE };
    pub const UNIT_X: FPVec2 = FPVec2 { x: FP::ONE, y: FP::ZERO };
    pub const UNIT_Y: FPVec2 = FPVec2 { x: FP::ZERO, y: FP::ONE };

    #[inline]
    pub const fn new(x: FP, y: FP) -> Self {
        FPVec2 { x, y }
    }

    #[inline]
    pub fn add(self, other: FPVec2) -> FPVec2 {
        FPVec2::new(self.x.add(other.x), self.y.add(other.y))
    }

    #[inline]
    pub fn sub(self, other: FPVec2) -> FPVec2 {
        FPVec2::new(self.x.sub(other.x), self.y.sub(other.y))
    }

    #[inline]
    pub fn neg(self) -> FPVec2 {
        FPVec2::new(self.x.neg(), self.y.neg())
    }

    #[inline]
    pub fn scale(self, s: FP) -> FPVec2 {
        FPVec2::new(self.x.mul(s), self.y.mul(s))
    }

    #[inline]
    pub fn mul_components(self, other: FPVec2) -> FPVec2 {
        FPVec2::new(self.x.mul(other.x), self.y.mul(other.y))
    }

    #[inline]
    pub fn dot(self, other: FPVec2) -> FP {
        self.x.mul(other.x).add(self.y.mul(other.y))
    }

    /// 2-D scalar cross product (`x1*y2 - y1*x2`).
    #[inline]
    pub fn cross(self, other: FPVec2) -> FP {
        self.x.mul(other.y).sub(self.y.mul(other.x))
    }

    #[inline]
    pub fn length_squared(self) -> FP {
        self.dot(self)
    }

    /// `length_squared` is never negative, so `sqrt` never fails here.
    #[inline]
    pub fn length(self) -> FP {
        self.length_squared()
            .sqrt()
            .expect("length_squared of a vector is never negative")
    }

    /// Returns `ZERO` on zero-magnitude input; never fails.
    pub fn normalize(self) -> FPVec2 {
        let len_sq = self.length_squared();
        if len_sq.raw() == 0 {
            return FPVec2::ZERO;
        }
        let inv_len = len_sq
            .rsqrt()
            .expect("len_sq is strictly positive, checked above");
        self.scale(inv_len)
    }

    /// Rotates by `angle` radians using a single `sin`/`cos` pair.
    pub fn rotate(self, angle: FP) -> FPVec2 {
        self.rotate_with_sin_cos(angle.sin(), angle.cos())
    }

    /// Applies a rotation given precomputed `sin`/`cos`, avoiding
    /// recomputation in hot loops that rotate many vectors by the same
    /// angle.
    #[inline]
    pub fn rotate_with_sin_cos(self, s: FP, c: FP) -> FPVec2 {
        FPVec2::new(
            self.x.mul(c).sub(self.y.mul(s)),
            self.x.mul(s).add(self.y.mul(c)),
        )
    }

    /// Coordinate swap, no trig: rotates 90 degrees counter-clockwise.
    #[inline]
    pub fn rotate_left(self) -> FPVec2 {
        FPVec2::new(self.y.neg(), self.x)
    }

    /// Coordinate swap, no trig: rotates 90 degrees clockwise.
    #[inline]
    pub fn rotate_right(self) -> FPVec2 {
        FPVec2::new(self.y, self.x.neg())
    }

    #[inline]
    pub fn perpendicular(self) -> FPVec2 {
        self.rotate_left()
    }

    /// Unsigned angle between `a` and `b`, in `[0, pi]`.
    pub fn angle(a: FPVec2, b: FPVec2) -> FP {
        let denom = a.length().mul(b.length());
        if denom.raw() == 0 {
            return FP::ZERO;
        }
        let cos_theta = (a.dot(b) / denom).clamp(FP::NEG_ONE, FP::ONE);
        cos_theta
            .acos()
            .expect("cos_theta is clamped into [-1, 1] above")
    }

    /// Signed angle from `a` to `b`, sign disambiguated by the 2-D
    /// cross product.
    pub fn signed_angle(a: FPVec2, b: FPVec2) -> FP {
        let unsigned = FPVec2::angle(a, b);
        if a.cross(b).raw() < 0 {
            unsigned.neg()
        } else {
            unsigned
        }
    }

    /// Moves `current` toward `target` by at most `max_delta`; returns
    /// `target` exactly once within reach.
    pub fn move_towards(current: FPVec2, target: FPVec2, max_delta: FP) -> FPVec2 {
        let delta = target.sub(current);
        let dist = delta.length();
        if dist.raw() <= max_delta.raw() || dist.raw() == 0 {
            return target;
        }
        current.add(delta.scale(max_delta / dist))
    }

    /// `v - 2*(v.n)*n`. Caller must supply a unit normal `n`.
    pub fn reflect(v: FPVec2, n: FPVec2) -> FPVec2 {
        let d = v.dot(n);
        v.sub(n.scale(FP::TWO.mul(d)))
    }

    pub fn lerp(a: FPVec2, b: FPVec2, t: FP) -> FPVec2 {
        FPVec2::new(FP::lerp(a.x, b.x, t), FP::lerp(a.y, b.y, t))
    }
}

impl Add for FPVec2 {
    type Output = FPVec2;
    #[inline]
    fn add(self, rhs: FPVec2) -> FPVec2 {
        FPVec2::add(self, rhs)
    }
}

impl Sub for FPVec2 {
    type Output = FPVec2;
    #[inline]
    fn sub(self, rhs: FPVec2) -> FPVec2 {
        FPVec2::sub(self, rhs)
    }
}

impl Neg for FPVec2 {
    type Output = FPVec2;
    #[inline]
    fn neg(self) -> FPVec2 {
        FPVec2::neg(self)
    }
}

impl Mul<FP> for FPVec2 {
    type Output = FPVec2;
    #[inline]
    fn mul(self, rhs: FP) -> FPVec2 {
        self.scale(rhs)
    }
}

impl Div<FP> for FPVec2 {
    type Output = FPVec2;
    #[inline]
    fn div(self, rhs: FP) -> FPVec2 {
        FPVec2::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(FP, FP)> for FPVec2 {
    #[inline]
    fn from(pair: (FP, FP)) -> Self {
        FPVec2::new(pair.0, pair.1)
    }
}

impl From<FPVec2> for (FP, FP) {
    #[inline]
    fn from(v: FPVec2) -> Self {
        (v.x, v.y)
    }
}
