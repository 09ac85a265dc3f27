//! Operating lines for a saturated-liquid feed.
//!
//! The rectifying line follows the top-section mass balance
//! `y = R/(R+1) x + xD/(R+1)`. The stripping line joins `(xB, xB)` to the
//! point where the rectifying line crosses `x = xF`.

use crate::tower::TowerSpec;
use serde::{Deserialize, Serialize};

/// Column section an operating-line lookup resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Rectifying,
    Stripping,
    /// Neither section applies; the lookup fell back to `y = x`.
    Diagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub slope: f64,
    pub intercept: f64,
}

impl LineSegment {
    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingLine {
    pub rectifying: LineSegment,
    pub stripping: LineSegment,
    bottoms: f64,
    feed: f64,
    distillate: f64,
}

impl OperatingLine {
    pub fn from_spec(spec: &TowerSpec) -> Self {
        let r = spec.reflux_ratio();
        let (xb, xf, xd) = (spec.bottoms(), spec.feed(), spec.distillate());

        let rectifying = LineSegment {
            slope: r / (r + 1.0),
            intercept: xd / (r + 1.0),
        };
        let y_feed = rectifying.at(xf);
        let slope = (y_feed - xb) / (xf - xb);
        let stripping = LineSegment {
            slope,
            intercept: xb * (1.0 - slope),
        };

        Self {
            rectifying,
            stripping,
            bottoms: xb,
            feed: xf,
            distillate: xd,
        }
    }

    pub fn bottoms(&self) -> f64 {
        self.bottoms
    }

    pub fn feed(&self) -> f64 {
        self.feed
    }

    pub fn distillate(&self) -> f64 {
        self.distillate
    }

    /// Slopes as `[rectifying, stripping]`.
    pub fn slopes(&self) -> [f64; 2] {
        [self.rectifying.slope, self.stripping.slope]
    }

    /// Intercepts as `[rectifying, stripping]`.
    pub fn intercepts(&self) -> [f64; 2] {
        [self.rectifying.intercept, self.stripping.intercept]
    }

    /// Operating-line vapor fraction at liquid fraction `x`.
    pub fn evaluate(&self, x: f64) -> (f64, Section) {
        if x < self.feed {
            (self.stripping.at(x), Section::Stripping)
        } else if self.bottoms < x {
            (self.rectifying.at(x), Section::Rectifying)
        } else {
            (x, Section::Diagonal)
        }
    }

    /// Operating value with the section chosen by `x > xF`, as used for the
    /// efficiency correction.
    pub fn value_for_efficiency(&self, x: f64) -> f64 {
        if self.feed < x {
            self.rectifying.at(x)
        } else {
            self.stripping.at(x)
        }
    }

    /// Vertices `(xB, xB)`, `(xF, yF)`, `(xD, xD)` of the two-segment line.
    pub fn polyline(&self) -> [(f64, f64); 3] {
        [
            (self.bottoms, self.bottoms),
            (self.feed, self.rectifying.at(self.feed)),
            (self.distillate, self.distillate),
        ]
    }
}
