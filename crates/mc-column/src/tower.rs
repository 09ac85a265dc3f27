//! Tower specification: reflux ratio, product compositions and stage efficiency.
//!
//! All compositions are mole fractions of the light component. A valid spec
//! always satisfies `0 < bottoms < feed < distillate <= 1`, `reflux_ratio > 0`
//! and `0 < murphree <= 1`; every constructor and `with_*` update re-checks
//! this and hands back an error instead of a partially updated spec.

use crate::error::{ColumnError, ColumnResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTowerSpec")]
pub struct TowerSpec {
    reflux_ratio: f64,
    bottoms: f64,
    feed: f64,
    distillate: f64,
    murphree: f64,
}

/// Unchecked field set, used for deserialization.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawTowerSpec {
    reflux_ratio: f64,
    bottoms: f64,
    feed: f64,
    distillate: f64,
    #[serde(default = "ideal_efficiency")]
    murphree: f64,
}

fn ideal_efficiency() -> f64 {
    1.0
}

impl TryFrom<RawTowerSpec> for TowerSpec {
    type Error = ColumnError;

    fn try_from(raw: RawTowerSpec) -> ColumnResult<Self> {
        TowerSpec::new(
            raw.reflux_ratio,
            raw.bottoms,
            raw.feed,
            raw.distillate,
            raw.murphree,
        )
    }
}

impl TowerSpec {
    pub fn new(
        reflux_ratio: f64,
        bottoms: f64,
        feed: f64,
        distillate: f64,
        murphree: f64,
    ) -> ColumnResult<Self> {
        check_reflux(reflux_ratio)?;
        check_fraction("bottoms", bottoms)?;
        check_fraction("feed", feed)?;
        check_fraction("distillate", distillate)?;
        check_fraction("murphree", murphree)?;
        if feed <= bottoms {
            return Err(invalid("feed", feed, "must exceed the bottoms fraction"));
        }
        if distillate <= feed {
            return Err(invalid("distillate", distillate, "must exceed the feed fraction"));
        }

        Ok(Self {
            reflux_ratio,
            bottoms,
            feed,
            distillate,
            murphree,
        })
    }

    /// Spec with ideal stages (Murphree efficiency of 1).
    pub fn ideal(reflux_ratio: f64, bottoms: f64, feed: f64, distillate: f64) -> ColumnResult<Self> {
        Self::new(reflux_ratio, bottoms, feed, distillate, 1.0)
    }

    pub fn reflux_ratio(&self) -> f64 {
        self.reflux_ratio
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

    pub fn murphree(&self) -> f64 {
        self.murphree
    }

    /// True when no efficiency correction applies.
    pub fn is_ideal(&self) -> bool {
        self.murphree == 1.0
    }

    pub fn with_reflux_ratio(self, reflux_ratio: f64) -> ColumnResult<Self> {
        check_reflux(reflux_ratio)?;
        Ok(Self {
            reflux_ratio,
            ..self
        })
    }

    pub fn with_bottoms(self, bottoms: f64) -> ColumnResult<Self> {
        check_fraction("bottoms", bottoms)?;
        if bottoms >= self.feed {
            return Err(invalid("bottoms", bottoms, "must be below the feed fraction"));
        }
        Ok(Self { bottoms, ..self })
    }

    pub fn with_feed(self, feed: f64) -> ColumnResult<Self> {
        check_fraction("feed", feed)?;
        if feed <= self.bottoms {
            return Err(invalid("feed", feed, "must exceed the bottoms fraction"));
        }
        if feed >= self.distillate {
            return Err(invalid("feed", feed, "must be below the distillate fraction"));
        }
        Ok(Self { feed, ..self })
    }

    pub fn with_distillate(self, distillate: f64) -> ColumnResult<Self> {
        check_fraction("distillate", distillate)?;
        if distillate <= self.feed {
            return Err(invalid("distillate", distillate, "must exceed the feed fraction"));
        }
        Ok(Self { distillate, ..self })
    }

    pub fn with_murphree(self, murphree: f64) -> ColumnResult<Self> {
        check_fraction("murphree", murphree)?;
        Ok(Self { murphree, ..self })
    }
}

/// Parse a user-entered numeric field.
pub fn parse_field(field: &'static str, input: &str) -> ColumnResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| ColumnError::Parse {
            field,
            input: input.to_string(),
        })
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> ColumnError {
    ColumnError::InvalidSpec {
        field,
        value,
        reason,
    }
}

fn check_reflux(value: f64) -> ColumnResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("reflux_ratio", value, "must be positive and finite"));
    }
    Ok(())
}

fn check_fraction(field: &'static str, value: f64) -> ColumnResult<()> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(invalid(field, value, "must lie in (0, 1]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> TowerSpec {
        TowerSpec::new(2.5, 0.1, 0.4, 0.95, 0.95).unwrap()
    }

    #[test]
    fn valid_spec_round_trips_accessors() {
        let spec = base();
        assert_eq!(spec.reflux_ratio(), 2.5);
        assert_eq!(spec.bottoms(), 0.1);
        assert_eq!(spec.feed(), 0.4);
        assert_eq!(spec.distillate(), 0.95);
        assert_eq!(spec.murphree(), 0.95);
        assert!(!spec.is_ideal());
        assert!(TowerSpec::ideal(1.0, 0.1, 0.4, 0.9).unwrap().is_ideal());
    }

    #[test]
    fn ordering_is_enforced_at_construction() {
        assert!(TowerSpec::new(1.0, 0.4, 0.4, 0.9, 1.0).is_err());
        assert!(TowerSpec::new(1.0, 0.1, 0.9, 0.9, 1.0).is_err());
        assert!(TowerSpec::new(1.0, 0.0, 0.4, 0.9, 1.0).is_err());
        assert!(TowerSpec::new(1.0, 0.1, 0.4, 1.2, 1.0).is_err());
        assert!(TowerSpec::new(0.0, 0.1, 0.4, 0.9, 1.0).is_err());
        assert!(TowerSpec::new(1.0, 0.1, 0.4, 0.9, 0.0).is_err());
        assert!(TowerSpec::new(f64::NAN, 0.1, 0.4, 0.9, 1.0).is_err());
        assert!(TowerSpec::new(1.0, 0.1, 0.4, 1.0, 1.0).is_ok());
    }

    #[test]
    fn rejected_update_leaves_original_untouched() {
        let spec = base();
        let err = spec.with_feed(0.05).unwrap_err();
        assert!(matches!(err, ColumnError::InvalidSpec { field: "feed", .. }));
        assert_eq!(spec.feed(), 0.4);

        assert!(spec.with_bottoms(0.4).is_err());
        assert!(spec.with_distillate(0.3).is_err());
        assert!(spec.with_murphree(1.5).is_err());
        assert!(spec.with_reflux_ratio(-1.0).is_err());
    }

    #[test]
    fn accepted_update_changes_one_field() {
        let spec = base().with_feed(0.5).unwrap();
        assert_eq!(spec.feed(), 0.5);
        assert_eq!(spec.bottoms(), 0.1);
        assert_eq!(spec.distillate(), 0.95);

        let spec = spec.with_reflux_ratio(4.0).unwrap();
        assert_eq!(spec.reflux_ratio(), 4.0);
    }

    #[test]
    fn parse_field_rejects_text() {
        assert_eq!(parse_field("feed", " 0.45 ").unwrap(), 0.45);
        let err = parse_field("feed", "forty").unwrap_err();
        assert!(matches!(err, ColumnError::Parse { field: "feed", .. }));
    }
}
