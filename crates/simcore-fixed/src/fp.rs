//! Q47.16 deterministic fixed-point scalar.
//!
//! A value is a signed 64-bit integer `raw` interpreted as `raw / 2^16`.
//! Every operation here is a pure function of its inputs: no RNG, no
//! platform float hardware, no NaN/infinity. The same input sequence
//! produces the same `raw` sequence on any conforming two's-complement
//! 64-bit target — that is the entire point of this type (I6).

use crate::error::FpError;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// Number of fractional bits (the ".16" in Q47.16).
pub const FRAC_BITS: u32 = 16;

const ONE_RAW: i64 = 1 << FRAC_BITS;
const HALF_RAW: i64 = ONE_RAW / 2;
const PI_RAW: i64 = 205_887;
const HALF_PI_RAW: i64 = 102_944;
const TAU_RAW: i64 = 411_775;
const LN2_RAW: i64 = 45_426;
const LN10_RAW: i64 = 150_902;
const ASIN_SPLIT_RAW: i64 = 55_706; // 0.85

/// A deterministic Q47.16 fixed-point value.
///
/// Multiplications widen to `i128` so the product of two `i64` raw
/// values never overflows before the `2^16` scale-down; callers are
/// responsible for keeping operands inside the "useable range" (§3) so
/// the *result* of arithmetic fits back in `i64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct FP {
    raw: i64,
}

impl FP {
    /// Largest raw magnitude guaranteed representable without widening
    /// concerns for a single multiplication: `i32::MIN`/`i32::MAX`
    /// scaled by `2^16` (§3 useable range).
    pub const USEABLE_MIN: FP = FP::from_raw((i32::MIN as i64) * ONE_RAW);
    pub const USEABLE_MAX: FP = FP::from_raw((i32::MAX as i64) * ONE_RAW);

    pub const ZERO: FP = FP::from_raw(0);
    pub const ONE: FP = FP::from_raw(ONE_RAW);
    pub const TWO: FP = FP::from_raw(2 * ONE_RAW);
    pub const NEG_ONE: FP = FP::from_raw(-ONE_RAW);
    pub const HALF: FP = FP::from_raw(HALF_RAW);
    pub const PI: FP = FP::from_raw(PI_RAW);
    pub const HALF_PI: FP = FP::from_raw(HALF_PI_RAW);
    pub const TAU: FP = FP::from_raw(TAU_RAW);
    pub const LN2: FP = FP::from_raw(LN2_RAW);
    pub const LN10: FP = FP::from_raw(LN10_RAW);

    /// Wraps a raw `Q47.16` integer with no scaling. `raw = 0` is zero.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        FP { raw }
    }

    /// Returns the underlying raw `Q47.16` integer.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Exact construction from an integer: `from_int(5)` is `5.0`.
    #[inline]
    pub const fn from_int(v: i32) -> Self {
        FP::from_raw((v as i64) * ONE_RAW)
    }

    /// Truncates toward the nearest lower integer (see [`FP::floor`])
    /// and returns it. Exact for values with no fractional part.
    #[inline]
    pub const fn as_int(self) -> i32 {
        (self.raw >> FRAC_BITS) as i32
    }

    /// Constructs an `FP` from a runtime `f64`. Named and marked
    /// `unsafe` per the determinism contract: in-simulation constants
    /// must be construction-time, never parsed from a runtime float,
    /// so any caller reaching for this must say so explicitly at the
    /// call site.
    ///
    /// # Safety
    /// Not memory-unsafe; the `unsafe` marker exists purely to gate
    /// this escape hatch syntactically. Only call this outside
    /// simulation state mutation (asset loading, debug tooling,
    /// authoring-time constant derivation).
    #[inline]
    pub unsafe fn from_f64_runtime(v: f64) -> Self {
        FP::from_raw((v * ONE_RAW as f64).round() as i64)
    }

    /// See [`FP::from_f64_runtime`].
    ///
    /// # Safety
    /// Same contract as [`FP::from_f64_runtime`].
    #[inline]
    pub unsafe fn from_f32_runtime(v: f32) -> Self {
        FP::from_f64_runtime(v as f64)
    }

    /// Lossy conversion for diagnostics/rendering only — never feed
    /// this back into simulation state.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.raw as f64 / ONE_RAW as f64
    }

    /// See [`FP::to_f64`].
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    // ---- core arithmetic -------------------------------------------

    /// Wrapping add. Overflow wraps; callers keep operands in the
    /// useable range.
    #[inline]
    pub const fn add(self, other: FP) -> FP {
        FP::from_raw(self.raw.wrapping_add(other.raw))
    }

    /// Wrapping sub. Overflow wraps; callers keep operands in the
    /// useable range.
    #[inline]
    pub const fn sub(self, other: FP) -> FP {
        FP::from_raw(self.raw.wrapping_sub(other.raw))
    }

    #[inline]
    pub const fn neg(self) -> FP {
        FP::from_raw(self.raw.wrapping_neg())
    }

    /// `(a*b + 2^15) >> 16`, widened through `i128`. Unconditional
    /// round-half-up on the magnitude (§9: a conscious choice, not a
    /// bug — round-half-to-even would break cross-target determinism
    /// with implementations that chose this rounding).
    #[inline]
    pub const fn mul(self, other: FP) -> FP {
        let prod = (self.raw as i128) * (other.raw as i128);
        let rounded = (prod + (1i128 << (FRAC_BITS - 1))) >> FRAC_BITS;
        FP::from_raw(rounded as i64)
    }

    /// Like [`FP::mul`] but truncates instead of rounding.
    #[inline]
    pub const fn mul_truncate(self, other: FP) -> FP {
        let prod = (self.raw as i128) * (other.raw as i128);
        FP::from_raw((prod >> FRAC_BITS) as i64)
    }

    /// `(a << 16) / b`, truncating toward zero. Fails with
    /// [`FpError::DivideByZero`] instead of panicking (§7: errors are
    /// values, never unwinds) — the `/` operator is the panicking
    /// convenience for callers that want primitive-integer behavior.
    #[inline]
    pub const fn div(self, other: FP) -> Result<FP, FpError> {
        if other.raw == 0 {
            return Err(FpError::DivideByZero);
        }
        let numerator = (self.raw as i128) << FRAC_BITS;
        Ok(FP::from_raw((numerator / other.raw as i128) as i64))
    }

    /// Signed remainder consistent with [`FP::div`]'s truncation. Fails
    /// with [`FpError::DivideByZero`] instead of panicking.
    #[inline]
    pub const fn rem(self, other: FP) -> Result<FP, FpError> {
        if other.raw == 0 {
            return Err(FpError::DivideByZero);
        }
        Ok(FP::from_raw(self.raw % other.raw))
    }

    #[inline]
    pub const fn abs(self) -> FP {
        FP::from_raw(self.raw.wrapping_abs())
    }

    #[inline]
    pub const fn signum_raw(self) -> i64 {
        if self.raw > 0 {
            1
        } else if self.raw < 0 {
            -1
        } else {
            0
        }
    }

    #[inline]
    pub fn saturating_add(self, other: FP) -> FP {
        FP::from_raw(self.raw.saturating_add(other.raw))
    }

    #[inline]
    pub fn saturating_sub(self, other: FP) -> FP {
        FP::from_raw(self.raw.saturating_sub(other.raw))
    }

    #[inline]
    pub fn min(self, other: FP) -> FP {
        if self.raw <= other.raw {
            self
        } else {
            other
        }
    }

    #[inline]
    pub fn max(self, other: FP) -> FP {
        if self.raw >= other.raw {
            self
        } else {
            other
        }
    }

    #[inline]
    pub fn clamp(self, lo: FP, hi: FP) -> FP {
        self.max(lo).min(hi)
    }

    // ---- rounding ----------------------------------------------------

    /// Masks off the fractional bits. Arithmetic right-shift on the
    /// two's-complement `raw` already rounds toward negative infinity,
    /// so shifting back left after it gives an exact floor.
    #[inline]
    pub const fn floor(self) -> FP {
        FP::from_raw((self.raw >> FRAC_BITS) << FRAC_BITS)
    }

    /// Adds one unit above `floor` iff any fractional bit is set.
    #[inline]
    pub const fn ceil(self) -> FP {
        let floored = self.floor();
        if floored.raw == self.raw {
            floored
        } else {
            floored.add(FP::ONE)
        }
    }

    /// Rounds to the nearest integer; ties round to the nearest even
    /// integer (banker's rounding), applied only to the exact-half
    /// case.
    #[inline]
    pub const fn round(self) -> FP {
        let floored = self.floor();
        let frac = self.raw - floored.raw;
        if frac < HALF_RAW {
            floored
        } else if frac > HALF_RAW {
            floored.add(FP::ONE)
        } else {
            let int_part = floored.raw >> FRAC_BITS;
            if int_part & 1 == 0 {
                floored
            } else {
                floored.add(FP::ONE)
            }
        }
    }

    // ---- sqrt / rsqrt --------------------------------------------------

    /// 8 Newton-Raphson iterations seeded from a count-leading-zeros
    /// initial guess. Fails with [`FpError::DomainError`] for negative
    /// input.
    #[inline]
    pub fn sqrt(self) -> Result<FP, FpError> {
        self.sqrt_iters(8)
    }

    /// 2-iteration variant for hot loops that can tolerate reduced
    /// precision (e.g. LOD distance checks).
    #[inline]
    pub fn sqrt_fast(self) -> Result<FP, FpError> {
        self.sqrt_iters(2)
    }

    fn sqrt_iters(self, iterations: u32) -> Result<FP, FpError> {
        if self.raw < 0 {
            return Err(FpError::DomainError);
        }
        if self.raw == 0 {
            return Ok(FP::ZERO);
        }
        let scaled = (self.raw as i128) << FRAC_BITS;
        Ok(FP::from_raw(isqrt_newton(scaled, iterations) as i64))
    }

    /// `1/sqrt(self)`, used by [`crate::FPVec2::normalize`].
    #[inline]
    pub fn rsqrt(self) -> Result<FP, FpError> {
        FP::ONE.div(self.sqrt()?)
    }

    #[inline]
    pub fn rsqrt_fast(self) -> Result<FP, FpError> {
        FP::ONE.div(self.sqrt_fast()?)
    }

    // ---- trigonometry --------------------------------------------------

    /// Reduces into `(-PI, PI]` via integer modulo against `TAU`, then
    /// sums a 9th-order Taylor expansion (coefficients beyond `x^7`
    /// round to zero at this fixed-point precision, so the `x^9` term
    /// is present but numerically inert — see `DESIGN.md`).
    pub fn sin(self) -> FP {
        let r = reduce_angle(self.raw);
        sin_taylor(FP::from_raw(r))
    }

    /// `cos(x) = sin(x + PI/2)`.
    pub fn cos(self) -> FP {
        self.add(FP::HALF_PI).sin()
    }

    /// Fails with [`FpError::DivideByZero`] where `cos(self) == 0`.
    pub fn tan(self) -> Result<FP, FpError> {
        self.sin().div(self.cos())
    }

    /// `|x| <= 0.85` uses a Taylor expansion; larger magnitudes use
    /// `pi/2 - sqrt(2(1-|x|))*(1 + (1-|x|)/6)`, mirrored by sign.
    /// Domain error outside `[-1, 1]`.
    pub fn asin(self) -> Result<FP, FpError> {
        if self.raw.abs() > ONE_RAW {
            return Err(FpError::DomainError);
        }
        let sign = self.signum_raw();
        if sign == 0 {
            return Ok(FP::ZERO);
        }
        let ax = FP::from_raw(self.raw.abs());
        let magnitude = if ax.raw <= ASIN_SPLIT_RAW {
            asin_taylor(ax)
        } else {
            let one_minus_x = FP::ONE.sub(ax);
            let sq = FP::TWO.mul(one_minus_x).sqrt()?;
            let poly = FP::ONE.add(one_minus_x.div(FP::from_int(6))?);
            FP::HALF_PI.sub(sq.mul(poly))
        };
        Ok(FP::from_raw(sign * magnitude.raw))
    }

    pub fn acos(self) -> Result<FP, FpError> {
        Ok(FP::HALF_PI.sub(self.asin()?))
    }

    /// Taylor expansion for `|x| <= 1`; `pi/2 - atan(1/x)` (mirrored
    /// by sign) otherwise. Infallible: `self == 0` takes the Taylor
    /// branch directly, so the reciprocal branch is only reached for
    /// `|self| > 1`, which is always nonzero.
    pub fn atan(self) -> FP {
        if self.raw.abs() <= ONE_RAW {
            atan_taylor(self)
        } else {
            let sign = self.signum_raw();
            let recip = FP::ONE.div(self).expect("unreachable: |self| > 1 implies self != 0");
            let half_pi_signed = FP::from_raw(sign * HALF_PI_RAW);
            half_pi_signed.sub(atan_taylor(recip))
        }
    }

    /// Quadrant-aware two-argument arctangent. `atan2(0, 0) = 0` by
    /// convention. Infallible: every `y.div(x)` call is guarded by a
    /// preceding `x.raw != 0` branch.
    pub fn atan2(self, x: FP) -> FP {
        let y = self;
        if x.raw > 0 {
            y.div(x).expect("unreachable: guarded by x.raw > 0").atan()
        } else if x.raw < 0 {
            let ratio = y.div(x).expect("unreachable: guarded by x.raw < 0").atan();
            if y.raw >= 0 {
                ratio.add(FP::PI)
            } else {
                ratio.sub(FP::PI)
            }
        } else if y.raw > 0 {
            FP::HALF_PI
        } else if y.raw < 0 {
            FP::HALF_PI.neg()
        } else {
            FP::ZERO
        }
    }

    // ---- exp / ln --------------------------------------------------

    /// Domain clamped to `(-10, 10]`. Range-reduces by repeated
    /// halving until the remaining argument has magnitude `<= 1`,
    /// evaluates a 6-term Taylor expansion there, then undoes the
    /// reduction by squaring the result once per halving step. Values
    /// at or below `-10` return `0`; values above `10` fail with
    /// [`FpError::OverflowError`].
    pub fn exp(self) -> Result<FP, FpError> {
        const EXP_MIN_RAW: i64 = -10 * ONE_RAW;
        const EXP_MAX_RAW: i64 = 10 * ONE_RAW;
        if self.raw > EXP_MAX_RAW {
            return Err(FpError::OverflowError);
        }
        if self.raw <= EXP_MIN_RAW {
            return Ok(FP::ZERO);
        }
        let mut reduced = self.raw;
        let mut halvings = 0u32;
        while reduced.abs() > ONE_RAW {
            reduced /= 2;
            halvings += 1;
        }
        let mut result = exp_taylor(FP::from_raw(reduced));
        for _ in 0..halvings {
            result = result.mul(result);
        }
        Ok(result)
    }

    /// Taylor expansion of `ln(1+u)` when `|u| < 0.5`; for larger
    /// arguments, repeated halving/doubling toward `[0.5, 1.5)` with
    /// `ln2` accumulated per step before the Taylor tail. Domain error
    /// for non-positive input.
    pub fn ln(self) -> Result<FP, FpError> {
        if self.raw <= 0 {
            return Err(FpError::DomainError);
        }
        const ONE_HALF_RAW: i64 = ONE_RAW + ONE_RAW / 2;
        let mut x = self.raw;
        let mut acc: i64 = 0;
        while x < HALF_RAW {
            x *= 2;
            acc -= LN2_RAW;
        }
        while x >= ONE_HALF_RAW {
            x /= 2;
            acc += LN2_RAW;
        }
        let u = FP::from_raw(x - ONE_RAW);
        Ok(FP::from_raw(acc).add(ln_taylor(u)))
    }

    pub fn log2(self) -> Result<FP, FpError> {
        self.ln()?.div(FP::LN2)
    }

    pub fn log10(self) -> Result<FP, FpError> {
        self.ln()?.div(FP::LN10)
    }

    /// `exp(y*ln(x))` for `x > 0`; `0` when `x == 0` and `y > 0`;
    /// domain error otherwise.
    pub fn pow(self, y: FP) -> Result<FP, FpError> {
        if self.raw > 0 {
            y.mul(self.ln()?).exp()
        } else if self.raw == 0 && y.raw > 0 {
            Ok(FP::ZERO)
        } else {
            Err(FpError::DomainError)
        }
    }

    /// Exponentiation by squaring; negative `n` uses the reciprocal.
    pub fn pow_i(self, n: i32) -> Result<FP, FpError> {
        if n < 0 {
            let positive = self.pow_i(n.checked_neg().unwrap_or(i32::MAX))?;
            return FP::ONE.div(positive);
        }
        let mut result = FP::ONE;
        let mut base = self;
        let mut exponent = n as u32;
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.mul(base);
            }
            base = base.mul(base);
            exponent >>= 1;
        }
        Ok(result)
    }

    // ---- interpolation --------------------------------------------------

    /// Linear interpolation with `t` clamped to `[0, 1]`.
    pub fn lerp(a: FP, b: FP, t: FP) -> FP {
        FP::lerp_unclamped(a, b, t.clamp(FP::ZERO, FP::ONE))
    }

    /// Linear interpolation without clamping `t`.
    pub fn lerp_unclamped(a: FP, b: FP, t: FP) -> FP {
        a.add(b.sub(a).mul(t))
    }

    /// `3t^2 - 2t^3`, `t` clamped to `[0, 1]`.
    pub fn smoothstep(t: FP) -> FP {
        let t = t.clamp(FP::ZERO, FP::ONE);
        let t2 = t.mul(t);
        let t3 = t2.mul(t);
        FP::from_int(3).mul(t2).sub(FP::TWO.mul(t3))
    }

    /// `6t^5 - 15t^4 + 10t^3`, `t` clamped to `[0, 1]`.
    pub fn smootherstep(t: FP) -> FP {
        let t = t.clamp(FP::ZERO, FP::ONE);
        let t2 = t.mul(t);
        let t3 = t2.mul(t);
        let t4 = t3.mul(t);
        let t5 = t4.mul(t);
        FP::from_int(6)
            .mul(t5)
            .sub(FP::from_int(15).mul(t4))
            .add(FP::from_int(10).mul(t3))
    }

    /// Cubic Hermite interpolation between `p0` (tangent `m0`) and
    /// `p1` (tangent `m1`).
    pub fn hermite(p0: FP, m0: FP, p1: FP, m1: FP, t: FP) -> FP {
        let t2 = t.mul(t);
        let t3 = t2.mul(t);
        let two_t3 = FP::TWO.mul(t3);
        let three_t2 = FP::from_int(3).mul(t2);
        let h00 = two_t3.sub(three_t2).add(FP::ONE);
        let h10 = t3.sub(FP::TWO.mul(t2)).add(t);
        let h01 = three_t2.sub(two_t3);
        let h11 = t3.sub(t2);
        h00.mul(p0).add(h10.mul(m0)).add(h01.mul(p1)).add(h11.mul(m1))
    }

    /// Catmull-Rom through `p1..p2` using `p0`/`p3` as neighbors;
    /// tangents are `(p_{n+1} - p_{n-1}) / 2`.
    pub fn catmull_rom(p0: FP, p1: FP, p2: FP, p3: FP, t: FP) -> FP {
        let m1 = p2.sub(p0).mul(FP::HALF);
        let m2 = p3.sub(p1).mul(FP::HALF);
        FP::hermite(p1, m1, p2, m2, t)
    }

    /// Cubic Bezier through control points `p0..p3`.
    pub fn cubic_bezier(p0: FP, p1: FP, p2: FP, p3: FP, t: FP) -> FP {
        let one_minus_t = FP::ONE.sub(t);
        let a = one_minus_t.mul(one_minus_t).mul(one_minus_t).mul(p0);
        let b = FP::from_int(3)
            .mul(one_minus_t)
            .mul(one_minus_t)
            .mul(t)
            .mul(p1);
        let c = FP::from_int(3).mul(one_minus_t).mul(t).mul(t).mul(p2);
        let d = t.mul(t).mul(t).mul(p3);
        a.add(b).add(c).add(d)
    }

    /// Weighted sum `a*u + b*v + c*w` for barycentric coordinates that
    /// sum to one.
    pub fn barycentric(a: FP, b: FP, c: FP, u: FP, v: FP, w: FP) -> FP {
        a.mul(u).add(b.mul(v)).add(c.mul(w))
    }

    /// Exponential decay toward `b` at rate `decay` over `dt`:
    /// `b + (a-b) * exp(-decay*dt)`. Fails with [`FpError::OverflowError`]
    /// where `-decay*dt` is outside `exp`'s domain.
    pub fn exp_decay(a: FP, b: FP, decay: FP, dt: FP) -> Result<FP, FpError> {
        let factor = decay.mul(dt).neg().exp()?;
        Ok(b.add(a.sub(b).mul(factor)))
    }
}

/// Integer square root via Newton-Raphson, seeded from a
/// count-leading-zeros initial guess (§4.1).
fn isqrt_newton(n: i128, iterations: u32) -> i128 {
    if n <= 0 {
        return 0;
    }
    let bits = 128 - n.leading_zeros() as i32;
    let mut guess: i128 = 1i128 << ((bits / 2) + 1);
    for _ in 0..iterations {
        if guess == 0 {
            break;
        }
        guess = (guess + n / guess) / 2;
    }
    guess
}

/// Reduces a raw angle into `(-PI, PI]`.
fn reduce_angle(raw: i64) -> i64 {
    let mut r = raw % TAU_RAW;
    if r > PI_RAW {
        r -= TAU_RAW;
    } else if r <= -PI_RAW {
        r += TAU_RAW;
    }
    r
}

/// `sin(x) = x - x^3/3! + x^5/5! - x^7/7! + x^9/9!` (the final term
/// rounds to zero raw at this precision and is kept only for
/// documentation of the series order).
fn sin_taylor(x: FP) -> FP {
    const C3: i64 = 10_923; // 1/3!
    const C5: i64 = 546; // 1/5!
    const C7: i64 = 13; // 1/7!
    const C9: i64 = 0; // 1/9! underflows to zero raw

    let x2 = x.mul(x);
    let x3 = x2.mul(x);
    let x5 = x3.mul(x2);
    let x7 = x5.mul(x2);
    let x9 = x7.mul(x2);

    x.sub(x3.mul(FP::from_raw(C3)))
        .add(x5.mul(FP::from_raw(C5)))
        .sub(x7.mul(FP::from_raw(C7)))
        .add(x9.mul(FP::from_raw(C9)))
}

/// `asin(x) = x + x^3/6 + 3x^5/40 + 15x^7/336` for `|x| <= 0.85`.
fn asin_taylor(x: FP) -> FP {
    const C3_NUM: i64 = 1;
    const C3_DEN: i64 = 6;
    const C5_NUM: i64 = 3;
    const C5_DEN: i64 = 40;
    const C7_NUM: i64 = 15;
    const C7_DEN: i64 = 336;

    let x2 = x.mul(x);
    let x3 = x2.mul(x);
    let x5 = x3.mul(x2);
    let x7 = x5.mul(x2);

    let c3 = FP::from_int(C3_NUM as i32) / FP::from_int(C3_DEN as i32);
    let c5 = FP::from_int(C5_NUM as i32) / FP::from_int(C5_DEN as i32);
    let c7 = FP::from_int(C7_NUM as i32) / FP::from_int(C7_DEN as i32);

    x.add(x3.mul(c3)).add(x5.mul(c5)).add(x7.mul(c7))
}

/// `atan(x) = x - x^3/3 + x^5/5 - x^7/7 + x^9/9` for `|x| <= 1`.
fn atan_taylor(x: FP) -> FP {
    let x2 = x.mul(x);
    let x3 = x2.mul(x);
    let x5 = x3.mul(x2);
    let x7 = x5.mul(x2);
    let x9 = x7.mul(x2);

    let c3 = FP::ONE / FP::from_int(3);
    let c5 = FP::ONE / FP::from_int(5);
    let c7 = FP::ONE / FP::from_int(7);
    let c9 = FP::ONE / FP::from_int(9);

    x.sub(x3.mul(c3)).add(x5.mul(c5)).sub(x7.mul(c7)).add(x9.mul(c9))
}

/// `exp(x) = 1 + x + x^2/2! + x^3/3! + x^4/4! + x^5/5!` for `|x| <= 1`.
fn exp_taylor(x: FP) -> FP {
    const C2: i64 = 32_768; // 1/2!
    const C3: i64 = 10_923; // 1/3!
    const C4: i64 = 2_731; // 1/4!
    const C5: i64 = 546; // 1/5!

    let x2 = x.mul(x);
    let x3 = x2.mul(x);
    let x4 = x3.mul(x);
    let x5 = x4.mul(x);

    FP::ONE
        .add(x)
        .add(x2.mul(FP::from_raw(C2)))
        .add(x3.mul(FP::from_raw(C3)))
        .add(x4.mul(FP::from_raw(C4)))
        .add(x5.mul(FP::from_raw(C5)))
}

/// `ln(1+u) = u - u^2/2 + u^3/3 - u^4/4 + u^5/5 - u^6/6` for `|u| < 0.5`.
fn ln_taylor(u: FP) -> FP {
    let u2 = u.mul(u);
    let u3 = u2.mul(u);
    let u4 = u3.mul(u);
    let u5 = u4.mul(u);
    let u6 = u5.mul(u);

    let c2 = FP::ONE / FP::TWO;
    let c3 = FP::ONE / FP::from_int(3);
    let c4 = FP::ONE / FP::from_int(4);
    let c5 = FP::ONE / FP::from_int(5);
    let c6 = FP::ONE / FP::from_int(6);

    u.sub(u2.mul(c2))
        .add(u3.mul(c3))
        .sub(u4.mul(c4))
        .add(u5.mul(c5))
        .sub(u6.mul(c6))
}

impl Add for FP {
    type Output = FP;
    #[inline]
    fn add(self, rhs: FP) -> FP {
        FP::add(self, rhs)
    }
}

impl Sub for FP {
    type Output = FP;
    #[inline]
    fn sub(self, rhs: FP) -> FP {
        FP::sub(self, rhs)
    }
}

impl Mul for FP {
    type Output = FP;
    #[inline]
    fn mul(self, rhs: FP) -> FP {
        FP::mul(self, rhs)
    }
}

/// Panics on division by zero, matching the behavior of the primitive
/// integer types this is built from; use [`FP::div`] to handle that
/// case as a value instead of a panic.
impl Div for FP {
    type Output = FP;
    #[inline]
    fn div(self, rhs: FP) -> FP {
        FP::div(self, rhs).expect("FP division by zero")
    }
}

/// Panics on division by zero; see [`FP::rem`].
impl Rem for FP {
    type Output = FP;
    #[inline]
    fn rem(self, rhs: FP) -> FP {
        FP::rem(self, rhs).expect("FP remainder by zero")
    }
}

impl Neg for FP {
    type Output = FP;
    #[inline]
    fn neg(self) -> FP {
        FP::neg(self)
    }
}

impl PartialOrd for FP {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FP {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl fmt::Debug for FP {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FP({:.6})", self.to_f64())
    }
}

impl fmt::Display for FP {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn raw_round_trip() {
        for raw in [0i64, 1, -1, 32768, -32768, 123_456_789, -123_456_789] {
            assert_eq!(FP::from_raw(raw).raw(), raw);
        }
    }

    #[test]
    fn fp_half_raw_is_32768() {
        let half = unsafe { FP::from_f64_runtime(0.5) };
        assert_eq!(half.raw(), 32768);
    }

    #[test]
    fn add_then_sub_matches_int_arithmetic() {
        let a = FP::from_int(-10);
        let b = FP::from_int(3);
        assert_eq!(a.add(b).as_int(), -7);
    }

    #[test]
    fn add_sub_is_identity() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2000 {
            let a = FP::from_raw(rng.gen_range(-1_000_000_000..1_000_000_000));
            let b = FP::from_raw(rng.gen_range(-1_000_000_000..1_000_000_000));
            assert_eq!(a.add(b).sub(b), a);
        }
    }

    #[test]
    fn lerp_endpoints() {
        let a = FP::from_int(2);
        let b = FP::from_int(8);
        assert_eq!(FP::lerp(a, b, FP::ZERO), a);
        assert_eq!(FP::lerp(a, b, FP::ONE), b);
    }

    #[test]
    fn mul_associativity_within_one_raw_unit() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let a = FP::from_raw(rng.gen_range(-500_000..500_000));
            let b = FP::from_raw(rng.gen_range(-500_000..500_000));
            let c = FP::from_raw(rng.gen_range(-500_000..500_000));
            let left = a.mul(b).mul(c);
            let right = a.mul(b.mul(c));
            assert!((left.raw() - right.raw()).abs() <= 1);
        }
    }

    #[test]
    fn sqrt_of_perfect_squares() {
        for n in [0i32, 1, 4, 9, 16, 100, 10_000] {
            let got = FP::from_int(n).sqrt().unwrap();
            let want = (n as f64).sqrt();
            assert!((got.to_f64() - want).abs() < 0.01, "sqrt({n}) = {got}");
        }
    }

    #[test]
    fn sqrt_of_negative_is_domain_error() {
        assert_eq!(FP::from_int(-1).sqrt(), Err(FpError::DomainError));
    }

    #[test]
    fn div_by_zero_is_an_error() {
        assert_eq!(FP::ONE.div(FP::ZERO), Err(FpError::DivideByZero));
    }

    #[test]
    fn sin_squared_plus_cos_squared_is_one() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let x = unsafe { FP::from_f64_runtime(rng.gen_range(-6.28..6.28)) };
            let s = x.sin();
            let c = x.cos();
            let sum = s.mul(s).add(c.mul(c));
            assert!((sum.to_f64() - 1.0).abs() < 1e-3, "x={x} sum={sum}");
        }
    }

    #[test]
    fn exp_matches_f64_within_tolerance() {
        for x in [-5.0, -1.0, 0.0, 1.0, 3.0, 9.9] {
            let fx = unsafe { FP::from_f64_runtime(x) };
            let got = fx.exp().unwrap().to_f64();
            let want = x.exp();
            assert!((got - want).abs() < 0.05 * want.max(1.0), "exp({x}) got {got} want {want}");
        }
    }

    #[test]
    fn exp_below_min_is_zero() {
        let x = FP::from_int(-11);
        assert_eq!(x.exp().unwrap(), FP::ZERO);
    }

    #[test]
    fn exp_above_max_overflows() {
        let x = FP::from_int(11);
        assert_eq!(x.exp(), Err(FpError::OverflowError));
    }

    #[test]
    fn ln_exp_round_trip() {
        for x in [0.5, 1.0, 2.0, 5.0, 50.0] {
            let fx = unsafe { FP::from_f64_runtime(x) };
            let got = fx.ln().unwrap().to_f64();
            let want = x.ln();
            assert!((got - want).abs() < 0.01, "ln({x}) got {got} want {want}");
        }
    }

    #[test]
    fn ln_of_non_positive_is_domain_error() {
        assert_eq!(FP::ZERO.ln(), Err(FpError::DomainError));
        assert_eq!(FP::from_int(-3).ln(), Err(FpError::DomainError));
    }

    #[test]
    fn pow_i_matches_repeated_multiplication() {
        let base = FP::from_int(2);
        assert_eq!(base.pow_i(10).unwrap().to_f64(), 1024.0);
        let recip = base.pow_i(-2).unwrap();
        assert!((recip.to_f64() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn floor_ceil_round_on_exact_half() {
        let x = FP::from_raw(ONE_RAW + HALF_RAW); // 1.5
        assert_eq!(x.floor(), FP::from_int(1));
        assert_eq!(x.ceil(), FP::from_int(2));
        assert_eq!(x.round(), FP::from_int(2)); // nearest even

        let y = FP::from_raw(2 * ONE_RAW + HALF_RAW); // 2.5
        assert_eq!(y.round(), FP::from_int(2)); // nearest even
    }

    #[test]
    fn asin_outside_domain_is_an_error() {
        assert_eq!(FP::from_int(2).asin(), Err(FpError::DomainError));
        assert!(FP::ONE.asin().is_ok());
    }

    #[test]
    fn pow_of_zero_base_with_positive_exponent_is_zero() {
        assert_eq!(FP::ZERO.pow(FP::ONE), Ok(FP::ZERO));
        assert_eq!(FP::ZERO.pow(FP::ZERO), Err(FpError::DomainError));
    }

    #[test]
    fn log2_and_log10_agree_with_ln_over_the_respective_base() {
        let x = FP::from_int(8);
        let log2 = x.log2().unwrap();
        assert!((log2.to_f64() - 3.0).abs() < 0.01, "log2(8) = {log2}");
    }

    #[test]
    fn atan2_zero_zero_is_zero() {
        assert_eq!(FP::ZERO.atan2(FP::ZERO), FP::ZERO);
    }

    #[test]
    fn atan2_quadrants_match_f64_within_tolerance() {
        let cases = [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0), (0.0, 5.0), (0.0, -5.0)];
        for (y, x) in cases {
            let fy = unsafe { FP::from_f64_runtime(y) };
            let fx = unsafe { FP::from_f64_runtime(x) };
            let got = fy.atan2(fx).to_f64();
            let want = y.atan2(x);
            assert!((got - want).abs() < 0.01, "atan2({y},{x}) got {got} want {want}");
        }
    }
}
