use serde::{Deserialize, Serialize};

/// Arguments to [`AffineMatrix::append_transform`](crate::AffineMatrix::append_transform).
///
/// Angles are in degrees. The default places an object at the origin with unit scale and no
/// rotation, skew or registration offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    /// Local anchor point that scale, rotation and skew are applied about.
    pub reg_x: f64,
    pub reg_y: f64,
}

impl TransformParams {
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn skew(mut self, skew_x: f64, skew_y: f64) -> Self {
        self.skew_x = skew_x;
        self.skew_y = skew_y;
        self
    }

    pub fn registration(mut self, reg_x: f64, reg_y: f64) -> Self {
        self.reg_x = reg_x;
        self.reg_y = reg_y;
        self
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            reg_x: 0.0,
            reg_y: 0.0,
        }
    }
}
