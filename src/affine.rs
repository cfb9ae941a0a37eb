//! The 2D affine transformation matrix.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};
use crate::params::TransformParams;
use crate::style::JsNumber;

/// Degrees to radians.
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// An affine transformation matrix for 2D points.
///
/// The six components are laid out as:
/// ```text
/// | a c tx |
/// | b d ty |
/// | 0 0 1  |
/// ```
///
/// Every transform operation mutates the matrix in place and returns `&mut Self`, so calls can
/// be chained without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

/// JavaScript-style truthiness: zero and NaN are false.
#[inline]
fn is_set(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

impl AffineMatrix {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Overwrite all six components.
    pub fn set(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        *self = Self::new(a, b, c, d, tx, ty);
        self
    }

    /// Reset to the identity matrix.
    pub fn identity(&mut self) -> &mut Self {
        log::trace!(target: "matrix", "identity");
        *self = Self::IDENTITY;
        self
    }

    /// Exact comparison against the identity components; no epsilon is applied.
    pub fn is_identity(&self) -> bool {
        self.a == 1.0
            && self.b == 0.0
            && self.c == 0.0
            && self.d == 1.0
            && self.tx == 0.0
            && self.ty == 0.0
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_invertible(&self) -> bool {
        let n = self.determinant();
        n != 0.0 && n.is_finite()
    }

    /// Applies this transform to a 2D point.
    #[inline]
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    /// Computes `self = self * N`, where `N` is built from the given components.
    ///
    /// The incoming transform is applied in local space, before this matrix.
    pub fn append(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        log::trace!(target: "matrix", "append {} {} {} {} {} {}", a, b, c, d, tx, ty);
        let Self {
            a: a0,
            b: b0,
            c: c0,
            d: d0,
            ..
        } = *self;

        if a != 1.0 || b != 0.0 || c != 0.0 || d != 1.0 {
            self.a = a0 * a + c0 * b;
            self.b = b0 * a + d0 * b;
            self.c = a0 * c + c0 * d;
            self.d = b0 * c + d0 * d;
        }
        self.tx += a0 * tx + c0 * ty;
        self.ty += b0 * tx + d0 * ty;
        self
    }

    /// Computes `self = N * self`, so the incoming transform becomes the outer one.
    pub fn prepend(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        log::trace!(target: "matrix", "prepend {} {} {} {} {} {}", a, b, c, d, tx, ty);
        let m = *self;

        self.a = a * m.a + c * m.b;
        self.b = b * m.a + d * m.b;
        self.c = a * m.c + c * m.d;
        self.d = b * m.c + d * m.d;
        self.tx = a * m.tx + c * m.ty + tx;
        self.ty = b * m.tx + d * m.ty + ty;
        self
    }

    pub fn append_matrix(&mut self, other: &AffineMatrix) -> &mut Self {
        self.append(other.a, other.b, other.c, other.d, other.tx, other.ty)
    }

    pub fn prepend_matrix(&mut self, other: &AffineMatrix) -> &mut Self {
        self.prepend(other.a, other.b, other.c, other.d, other.tx, other.ty)
    }

    /// Translate in the matrix's own (possibly rotated or scaled) coordinate space.
    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        log::trace!(target: "matrix", "translate {} {}", tx, ty);
        self.tx += self.a * tx + self.c * ty;
        self.ty += self.b * tx + self.d * ty;
        self
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        log::trace!(target: "matrix", "scale {} {}", sx, sy);
        self.a *= sx;
        self.b *= sx;
        self.c *= sy;
        self.d *= sy;
        self
    }

    /// Clockwise rotation by `angle` degrees (y axis pointing down).
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        log::trace!(target: "matrix", "rotate {}", angle);
        let (sin, cos) = (angle * DEG_TO_RAD).sin_cos();
        let Self { a, b, c, d, .. } = *self;

        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = -a * sin + c * cos;
        self.d = -b * sin + d * cos;
        self
    }

    /// Skew by `skew_x` and `skew_y` degrees.
    pub fn skew(&mut self, skew_x: f64, skew_y: f64) -> &mut Self {
        log::trace!(target: "matrix", "skew {} {}", skew_x, skew_y);
        let (sin_x, cos_x) = (skew_x * DEG_TO_RAD).sin_cos();
        let (sin_y, cos_y) = (skew_y * DEG_TO_RAD).sin_cos();
        self.append(cos_y, sin_y, -sin_x, cos_x, 0.0, 0.0)
    }

    /// Appends a full display transform: position, scale, rotation and skew about the
    /// registration point `(reg_x, reg_y)`.
    pub fn append_transform(&mut self, params: &TransformParams) -> &mut Self {
        let TransformParams {
            x,
            y,
            scale_x,
            scale_y,
            rotation,
            skew_x,
            skew_y,
            reg_x,
            reg_y,
        } = *params;
        log::trace!(target: "matrix", "appendTransform {:?}", params);

        // Whole turns skip the trig entirely.
        let (sin, cos) = if is_set(rotation % 360.0) {
            (rotation * DEG_TO_RAD).sin_cos()
        } else {
            (0.0, 1.0)
        };

        if is_set(skew_x) || is_set(skew_y) {
            let (sin_x, cos_x) = (skew_x * DEG_TO_RAD).sin_cos();
            let (sin_y, cos_y) = (skew_y * DEG_TO_RAD).sin_cos();
            self.append(cos_y, sin_y, -sin_x, cos_x, x, y);
            self.append(cos * scale_x, sin * scale_x, -sin * scale_y, cos * scale_y, 0.0, 0.0);
        } else {
            self.append(cos * scale_x, sin * scale_x, -sin * scale_y, cos * scale_y, x, y);
        }

        if is_set(reg_x) || is_set(reg_y) {
            self.tx -= reg_x * self.a + reg_y * self.c;
            self.ty -= reg_x * self.b + reg_y * self.d;
        }
        self
    }

    /// Invert in place.
    ///
    /// Fails with [`MatrixError::NonInvertible`] when the determinant is zero or not finite; the
    /// matrix is left untouched in that case.
    pub fn invert(&mut self) -> Result<&mut Self> {
        let n = self.determinant();
        if n == 0.0 || !n.is_finite() {
            log::warn!(target: "matrix", "invert: singular matrix {:?}", self);
            return Err(MatrixError::NonInvertible { determinant: n });
        }
        log::trace!(target: "matrix", "invert");

        let Self { a, b, c, d, tx, ty } = *self;
        self.a = d / n;
        self.b = -b / n;
        self.c = -c / n;
        self.d = a / n;
        self.tx = (c * ty - d * tx) / n;
        self.ty = -(a * ty - b * tx) / n;
        Ok(self)
    }

    /// Returns the inverse as a new matrix, leaving `self` unchanged.
    pub fn inverted(&self) -> Result<Self> {
        let mut out = *self;
        out.invert()?;
        Ok(out)
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f64; 6]> for AffineMatrix {
    fn from([a, b, c, d, tx, ty]: [f64; 6]) -> Self {
        Self::new(a, b, c, d, tx, ty)
    }
}

impl From<AffineMatrix> for [f64; 6] {
    fn from(m: AffineMatrix) -> Self {
        m.to_array()
    }
}

impl TryFrom<&[f64]> for AffineMatrix {
    type Error = MatrixError;

    fn try_from(values: &[f64]) -> Result<Self> {
        let components: [f64; 6] = values.try_into().map_err(|_| MatrixError::InvalidLength {
            expected: 6,
            found: values.len(),
        })?;
        Ok(components.into())
    }
}

/// Renders the CSS descriptor `matrix(a, b, c, d, tx, ty)`.
impl fmt::Display for AffineMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({}, {}, {}, {}, {}, {})",
            JsNumber(self.a),
            JsNumber(self.b),
            JsNumber(self.c),
            JsNumber(self.d),
            JsNumber(self.tx),
            JsNumber(self.ty)
        )
    }
}
