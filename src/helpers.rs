//! Shared numeric helpers for scoring.
//!
//! - `clamp`: NaN-tolerant bound clamp used by every sub-score
//! - `to_percent`: [0,1] score → integer percent
//! - `finite_in`: domain filter turning out-of-range readings into `None`
//! - `json_number` / `Reading`: tolerant number extraction from provider JSON

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike `f64::clamp` this never panics on inverted bounds; NaN passes
/// through so callers can detect it.
pub(crate) fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Clamp into the unit interval.
pub(crate) fn clamp01(v: f64) -> f64 {
    clamp(v, 0.0, 1.0)
}

/// Convert a raw score to an integer percent: clamp to [0,1], ×100, round.
pub(crate) fn to_percent(v: f64) -> u8 {
    (clamp01(v) * 100.0).round() as u8
}

/// Keep a reading only if it is finite and inside `[lo, hi]`.
pub(crate) fn finite_in(v: Option<f64>, lo: f64, hi: f64) -> Option<f64> {
    v.filter(|x| x.is_finite() && *x >= lo && *x <= hi)
}

/// Extract a finite number from a JSON value, `None` for null or non-numeric.
pub(crate) fn json_number(v: &serde_json::Value) -> Option<f64> {
    v.as_f64().filter(|x| x.is_finite())
}

/// One provider sample. Deserializes from any JSON value; null, strings and
/// other non-numbers become `None` instead of failing the whole response.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Reading(pub(crate) Option<f64>);

impl<'de> serde::Deserialize<'de> for Reading {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Reading(json_number(&value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside() {
        assert_eq!(clamp(0.3, 0.0, 1.0), 0.3);
    }

    #[test]
    fn test_clamp_saturates() {
        assert_eq!(clamp(-2.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(7.5, 0.0, 4.0), 4.0);
    }

    #[test]
    fn test_clamp_keeps_nan() {
        assert!(clamp(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_to_percent_rounds_half_up() {
        assert_eq!(to_percent(0.505), 51);
        assert_eq!(to_percent(0.494), 49);
    }

    #[test]
    fn test_to_percent_never_exceeds_bounds() {
        assert_eq!(to_percent(3.0), 100);
        assert_eq!(to_percent(-0.4), 0);
    }

    #[test]
    fn test_finite_in_rejects_out_of_domain() {
        assert_eq!(finite_in(Some(81.0), -80.0, 80.0), None);
        assert_eq!(finite_in(Some(f64::NAN), -80.0, 80.0), None);
        assert_eq!(finite_in(Some(-12.0), -80.0, 80.0), Some(-12.0));
        assert_eq!(finite_in(None, -80.0, 80.0), None);
    }

    #[test]
    fn test_json_number() {
        assert_eq!(json_number(&serde_json::json!(3.5)), Some(3.5));
        assert_eq!(json_number(&serde_json::json!(12)), Some(12.0));
        assert_eq!(json_number(&serde_json::Value::Null), None);
        assert_eq!(json_number(&serde_json::json!("4.0")), None);
    }

    #[test]
    fn test_reading_tolerates_non_numbers() {
        let readings: Vec<Reading> =
            serde_json::from_value(serde_json::json!([1.5, null, "n/a", {}, 7])).unwrap();
        assert_eq!(
            readings,
            vec![
                Reading(Some(1.5)),
                Reading(None),
                Reading(None),
                Reading(None),
                Reading(Some(7.0))
            ]
        );
    }
}
