//! Handing a matrix off to whatever owns the visual element.

use std::fmt;

use crate::affine::AffineMatrix;
use crate::decompose::DecomposedTransform;

/// A styling surface that accepts a CSS transform value such as `matrix(1, 0, 0, 1, 5, 6)`.
pub trait StyleTarget {
    fn set_transform_style(&mut self, value: &str);
}

/// Keeps the last written value.
impl StyleTarget for String {
    fn set_transform_style(&mut self, value: &str) {
        self.clear();
        self.push_str(value);
    }
}

impl AffineMatrix {
    /// Decompose the matrix and write its CSS descriptor to `target`.
    ///
    /// Does nothing and returns `None` when there is no target yet. The matrix itself is not
    /// modified; see [`decompose_style_in_place`](Self::decompose_style_in_place) for that.
    pub fn decompose_style<T: StyleTarget>(
        &self,
        target: Option<&mut T>,
    ) -> Option<DecomposedTransform> {
        let target = target?;
        let decomposed = self.decompose();
        write_style(self, target);
        Some(decomposed)
    }

    /// Like [`decompose_style`](Self::decompose_style), but first re-applies the decomposed
    /// rotation and scale to the matrix and writes the result.
    pub fn decompose_style_in_place<T: StyleTarget>(
        &mut self,
        target: Option<&mut T>,
    ) -> Option<DecomposedTransform> {
        let target = target?;
        let decomposed = self.decompose();
        self.apply_decomposition(&decomposed);
        write_style(self, target);
        Some(decomposed)
    }
}

fn write_style<T: StyleTarget>(matrix: &AffineMatrix, target: &mut T) {
    let value = matrix.to_string();
    log::debug!(target: "matrix", "transform style {}", value);
    target.set_transform_style(&value);
}

/// Formats an `f64` the way ECMAScript's `Number#toString` does.
pub(crate) struct JsNumber(pub f64);

impl fmt::Display for JsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            f.write_str("NaN")
        } else if v.is_infinite() {
            f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
        } else if v == 0.0 {
            // Covers -0 as well.
            f.write_str("0")
        } else if v.abs() >= 1e21 || v.abs() < 1e-6 {
            let s = format!("{v:e}");
            match s.split_once('e') {
                Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
                _ => f.write_str(&s),
            }
        } else {
            write!(f, "{v}")
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Default)]
    struct Element {
        transform: Option<String>,
        writes: usize,
    }

    impl StyleTarget for Element {
        fn set_transform_style(&mut self, value: &str) {
            self.transform = Some(value.to_string());
            self.writes += 1;
        }
    }

    #[test]
    fn writes_matrix_descriptor() {
        let m = AffineMatrix::new(1.0, 0.0, 0.0, 1.0, 5.0, 6.0);
        let mut element = Element::default();
        m.decompose_style(Some(&mut element));
        assert_eq!(element.transform.as_deref(), Some("matrix(1, 0, 0, 1, 5, 6)"));
        assert_eq!(element.writes, 1);
    }

    #[test]
    fn missing_target_is_noop() {
        let mut m = AffineMatrix::new(2.0, 0.0, 0.0, 2.0, 1.0, 1.0);
        assert!(m.decompose_style::<Element>(None).is_none());
        assert!(m.decompose_style_in_place::<String>(None).is_none());
        assert_eq!(m.to_array(), [2.0, 0.0, 0.0, 2.0, 1.0, 1.0]);
    }

    #[test]
    fn string_sink_keeps_last_value() {
        let mut sink = String::from("stale");
        AffineMatrix::new(0.5, 0.0, 0.0, 0.5, -1.5, 2.0).decompose_style(Some(&mut sink));
        assert_eq!(sink, "matrix(0.5, 0, 0, 0.5, -1.5, 2)");
    }

    #[test]
    fn in_place_normalizes_before_writing() {
        let mut m = AffineMatrix::new(2.0, 0.0, 0.0, 3.0, 0.0, 0.0);
        let mut sink = String::new();
        let decomposed = m.decompose_style_in_place(Some(&mut sink)).unwrap();
        assert_eq!((decomposed.scale_x, decomposed.scale_y), (2.0, 3.0));
        assert_eq!(m.to_array(), [4.0, 0.0, 0.0, 9.0, 0.0, 0.0]);
        assert_eq!(sink, "matrix(4, 0, 0, 9, 0, 0)");
    }

    #[test]
    fn js_number_text() {
        assert_eq!(JsNumber(1.0).to_string(), "1");
        assert_eq!(JsNumber(-0.0).to_string(), "0");
        assert_eq!(JsNumber(0.1).to_string(), "0.1");
        assert_eq!(JsNumber(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(JsNumber(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(JsNumber(2e21).to_string(), "2e+21");
        assert_eq!(JsNumber(123456.75).to_string(), "123456.75");
    }
}
