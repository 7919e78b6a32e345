//! Membership shapes and the `FuzzySet` that carries a degree of membership.

use std::fmt;

/// Membership function of a set.
///
/// `left` and `right` are offsets from the peak (or midpoint), never
/// absolute positions, and are expected to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// 0 at `mid - left` and `mid + right`, 1 at `mid`, linear in between.
    Triangle { mid: f64, left: f64, right: f64 },
    /// 1 for `x <= peak`, falling linearly to 0 at `peak + right`.
    LeftShoulder { peak: f64, left: f64, right: f64 },
    /// 1 for `x >= peak`, rising linearly from 0 at `peak - left`.
    RightShoulder { peak: f64, left: f64, right: f64 },
    /// 1 on `[mid - left, mid + right]`, 0 elsewhere.
    Singleton { mid: f64, left: f64, right: f64 },
}

impl Shape {
    /// Degree of membership of `x`, in `[0, 1]`.  Pure.
    pub fn membership(&self, x: f64) -> f64 {
        match *self {
            Shape::Triangle { mid, left, right } => {
                if x == mid {
                    return 1.0;
                }
                if x < mid && x >= mid - left && left > 0.0 {
                    (x - (mid - left)) / left
                } else if x > mid && x < mid + right && right > 0.0 {
                    1.0 - (x - mid) / right
                } else {
                    0.0
                }
            }
            Shape::LeftShoulder { peak, right, .. } => {
                if x <= peak {
                    1.0
                } else if x < peak + right && right > 0.0 {
                    1.0 - (x - peak) / right
                } else {
                    0.0
                }
            }
            Shape::RightShoulder { peak, left, .. } => {
                if x >= peak {
                    1.0
                } else if x > peak - left && left > 0.0 {
                    (x - (peak - left)) / left
                } else {
                    0.0
                }
            }
            Shape::Singleton { mid, left, right } => {
                if x >= mid - left && x <= mid + right { 1.0 } else { 0.0 }
            }
        }
    }

    /// Crisp value standing in for the whole set during MaxAv
    /// defuzzification.
    pub fn representative(&self) -> f64 {
        match *self {
            Shape::Triangle { mid, .. } | Shape::Singleton { mid, .. } => mid,
            Shape::LeftShoulder { peak, left, .. } => peak - left / 2.0,
            Shape::RightShoulder { peak, right, .. } => peak + right / 2.0,
        }
    }

    /// Lowest and highest `x` the shape is defined over.
    pub fn extent(&self) -> (f64, f64) {
        match *self {
            Shape::Triangle { mid, left, right } | Shape::Singleton { mid, left, right } => {
                (mid - left, mid + right)
            }
            Shape::LeftShoulder { peak, left, right } | Shape::RightShoulder { peak, left, right } => {
                (peak - left, peak + right)
            }
        }
    }
}

/// A shape plus the degree of membership left by the last fuzzify or rule
/// evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySet {
    shape: Shape,
    dom: f64,
}

impl FuzzySet {
    pub fn new(shape: Shape) -> Self {
        Self { shape, dom: 0.0 }
    }

    pub fn triangle(mid: f64, left: f64, right: f64) -> Self {
        Self::new(Shape::Triangle { mid, left, right })
    }

    pub fn left_shoulder(peak: f64, left: f64, right: f64) -> Self {
        Self::new(Shape::LeftShoulder { peak, left, right })
    }

    pub fn right_shoulder(peak: f64, left: f64, right: f64) -> Self {
        Self::new(Shape::RightShoulder { peak, left, right })
    }

    pub fn singleton(mid: f64, left: f64, right: f64) -> Self {
        Self::new(Shape::Singleton { mid, left, right })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Membership of `x` without touching the stored DOM.
    #[inline]
    pub fn calculate_dom(&self, x: f64) -> f64 {
        self.shape.membership(x)
    }

    #[inline]
    pub fn representative(&self) -> f64 {
        self.shape.representative()
    }

    #[inline]
    pub fn dom(&self) -> f64 {
        self.dom
    }

    /// Store `v`, clamped to `[0, 1]`.  NaN is stored as 0.
    pub fn set_dom(&mut self, v: f64) {
        self.dom = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    }

    pub fn clear_dom(&mut self) {
        self.dom = 0.0;
    }

    /// `dom = max(dom, v)`.
    pub fn or_with_dom(&mut self, v: f64) {
        if v > self.dom {
            self.set_dom(v);
        }
    }
}

impl fmt::Display for FuzzySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.dom)
    }
}
