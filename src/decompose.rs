//! Recovering position, scale, rotation and skew from a matrix.

use serde::{Deserialize, Serialize};

use crate::affine::{AffineMatrix, DEG_TO_RAD};
use crate::params::TransformParams;

/// Skew angles closer than this (relative) are treated as a pure rotation.
pub const DECOMPOSE_SKEW_EPSILON: f64 = 0.00001;

/// The human-meaningful parameters of an [`AffineMatrix`]. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecomposedTransform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl DecomposedTransform {
    /// Parameters that rebuild the decomposed matrix when appended to an identity matrix.
    pub fn to_params(&self) -> TransformParams {
        TransformParams::default()
            .position(self.x, self.y)
            .scale(self.scale_x, self.scale_y)
            .rotation(self.rotation)
            .skew(self.skew_x, self.skew_y)
    }
}

impl From<DecomposedTransform> for TransformParams {
    fn from(decomposed: DecomposedTransform) -> Self {
        decomposed.to_params()
    }
}

impl AffineMatrix {
    /// Decompose into translation, scale, rotation and skew without modifying the matrix.
    ///
    /// When the two skew angles agree the matrix is reported as a rotation with zero skew.
    /// Otherwise rotation is zero and both skew angles are reported independently. A zero
    /// `skew_y` never compares as agreeing (the ratio is NaN or infinite), so it always takes the
    /// skew branch.
    pub fn decompose(&self) -> DecomposedTransform {
        let scale_x = (self.a * self.a + self.b * self.b).sqrt();
        let scale_y = (self.c * self.c + self.d * self.d).sqrt();
        let mut rotation = 0.0;
        let mut skew_x = (-self.c).atan2(self.d);
        let mut skew_y = self.b.atan2(self.a);

        let delta = (1.0 - skew_x / skew_y).abs();
        if delta < DECOMPOSE_SKEW_EPSILON {
            rotation = skew_y / DEG_TO_RAD;
            // atan2 quadrant ambiguity
            if self.a < 0.0 && self.d >= 0.0 {
                rotation += if rotation <= 0.0 { 180.0 } else { -180.0 };
            }
            skew_x = 0.0;
            skew_y = 0.0;
        } else {
            skew_x /= DEG_TO_RAD;
            skew_y /= DEG_TO_RAD;
        }

        DecomposedTransform {
            x: self.tx,
            y: self.ty,
            scale_x,
            scale_y,
            rotation,
            skew_x,
            skew_y,
        }
    }

    /// Re-applies a decomposition's rotation then scale to this matrix.
    pub fn apply_decomposition(&mut self, decomposed: &DecomposedTransform) -> &mut Self {
        self.rotate(decomposed.rotation)
            .scale(decomposed.scale_x, decomposed.scale_y)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rotation_and_scale() {
        let mut m = AffineMatrix::default();
        m.append_transform(
            &TransformParams::default()
                .position(7.0, -3.0)
                .scale(2.0, 3.0)
                .rotation(30.0),
        );
        let before = m;

        let decomposed = m.decompose();
        assert!(close(decomposed.scale_x, 2.0));
        assert!(close(decomposed.scale_y, 3.0));
        assert!(close(decomposed.rotation, 30.0));
        assert_eq!((decomposed.skew_x, decomposed.skew_y), (0.0, 0.0));
        assert_eq!((decomposed.x, decomposed.y), (7.0, -3.0));
        assert_eq!(m, before);
    }

    #[test]
    fn genuine_skew() {
        let mut m = AffineMatrix::default();
        m.skew(20.0, 10.0);
        let decomposed = m.decompose();
        assert_eq!(decomposed.rotation, 0.0);
        assert!(close(decomposed.skew_x, 20.0));
        assert!(close(decomposed.skew_y, 10.0));
    }

    #[test]
    fn zero_skew_y_takes_skew_branch() {
        let m = AffineMatrix::new(1.0, 0.0, -1.0, 1.0, 0.0, 0.0);
        let decomposed = m.decompose();
        assert_eq!(decomposed.rotation, 0.0);
        assert!(close(decomposed.skew_x, 45.0));
        assert_eq!(decomposed.skew_y, 0.0);

        let identity = AffineMatrix::IDENTITY.decompose();
        assert_eq!(identity.rotation, 0.0);
        assert_eq!((identity.skew_x, identity.skew_y), (0.0, 0.0));
        assert_eq!((identity.scale_x, identity.scale_y), (1.0, 1.0));
    }

    #[test]
    fn half_turn() {
        let mut m = AffineMatrix::default();
        m.rotate(180.0);
        let decomposed = m.decompose();
        assert!(close(decomposed.rotation.abs(), 180.0));
        assert_eq!((decomposed.skew_x, decomposed.skew_y), (0.0, 0.0));
    }

    #[test]
    fn quadrant_correction() {
        let m = AffineMatrix::new(-1e-12, 1.0, -1.0, 0.0, 0.0, 0.0);
        let decomposed = m.decompose();
        assert!((decomposed.rotation + 90.0).abs() < 1e-6);
    }

    #[test]
    fn params_rebuild_matrix() {
        let mut source = AffineMatrix::default();
        source.translate(5.0, 6.0).skew(25.0, -10.0).scale(1.5, 0.5);

        let mut rebuilt = AffineMatrix::default();
        rebuilt.append_transform(&source.decompose().into());
        for (got, want) in rebuilt.to_array().iter().zip(source.to_array()) {
            assert!(close(*got, want), "{rebuilt:?} != {source:?}");
        }
    }

    #[test]
    fn apply_decomposition_reapplies_rotation_and_scale() {
        let mut m = AffineMatrix::default();
        m.rotate(30.0).scale(2.0, 2.0);
        let decomposed = m.decompose();
        m.apply_decomposition(&decomposed);

        let again = m.decompose();
        assert!(close(again.rotation, 60.0));
        assert!(close(again.scale_x, 4.0));
    }
}
