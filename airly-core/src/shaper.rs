use serde::{Deserialize, Serialize};

use crate::{MeasurementValue, ShapedMeasurement};

/// Measurement names charted by [`FilterPolicy::Names`], in no particular order.
pub const RECOGNIZED_NAMES: [&str; 3] = ["PM1", "PM25", "PM10"];

/// Number of trailing fields [`FilterPolicy::Trailing`] drops.
pub const TRAILING_FIELDS: usize = 3;

/// How raw measurement values are narrowed down to chart input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Keep only [`RECOGNIZED_NAMES`], in upstream order.
    #[default]
    Names,
    /// Drop the last [`TRAILING_FIELDS`] entries.
    ///
    /// Only correct while the upstream schema appends exactly three
    /// non-particulate fields (pressure, humidity, temperature).
    Trailing,
}

impl FilterPolicy {
    pub fn shape(&self, raw: &[MeasurementValue]) -> Vec<ShapedMeasurement> {
        let shaped: Vec<ShapedMeasurement> = match self {
            FilterPolicy::Names => raw
                .iter()
                .filter(|m| RECOGNIZED_NAMES.contains(&m.name.as_str()))
                .map(ShapedMeasurement::from)
                .collect(),
            FilterPolicy::Trailing => {
                let keep = raw.len().saturating_sub(TRAILING_FIELDS);
                raw[..keep].iter().map(ShapedMeasurement::from).collect()
            }
        };

        if shaped.is_empty() {
            tracing::warn!(policy = ?self, raw = raw.len(), "no measurements left to chart");
        } else {
            tracing::debug!(policy = ?self, raw = raw.len(), kept = shaped.len(), "shaped measurements");
        }

        shaped
    }
}

impl std::str::FromStr for FilterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "names" => Ok(FilterPolicy::Names),
            "trailing" => Ok(FilterPolicy::Trailing),
            _ => Err(format!("Unknown filter '{s}'. Valid options: names, trailing")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(name: &str, value: f64) -> MeasurementValue {
        MeasurementValue { name: name.into(), value }
    }

    fn sample() -> Vec<MeasurementValue> {
        vec![
            m("PM1", 5.0),
            m("PM25", 8.0),
            m("PM10", 12.0),
            m("x", 1.0),
            m("y", 2.0),
            m("z", 3.0),
        ]
    }

    fn pairs(shaped: &[ShapedMeasurement]) -> Vec<(&str, f64)> {
        shaped.iter().map(|s| (s.key.as_str(), s.value)).collect()
    }

    #[test]
    fn names_policy_keeps_particulates() {
        let shaped = FilterPolicy::Names.shape(&sample());
        assert_eq!(pairs(&shaped), vec![("PM1", 5.0), ("PM25", 8.0), ("PM10", 12.0)]);
    }

    #[test]
    fn names_policy_preserves_relative_order_when_interleaved() {
        let raw = vec![
            m("PRESSURE", 1012.0),
            m("PM10", 30.0),
            m("HUMIDITY", 60.0),
            m("PM1", 9.0),
            m("TEMPERATURE", 4.5),
            m("PM25", 14.0),
        ];

        let shaped = FilterPolicy::Names.shape(&raw);
        assert_eq!(pairs(&shaped), vec![("PM10", 30.0), ("PM1", 9.0), ("PM25", 14.0)]);
    }

    #[test]
    fn names_policy_is_case_sensitive_and_may_be_empty() {
        let raw = vec![m("pm1", 1.0), m("TEMPERATURE", 4.0)];
        assert!(FilterPolicy::Names.shape(&raw).is_empty());
    }

    #[test]
    fn trailing_policy_drops_last_three() {
        let raw = sample();
        let shaped = FilterPolicy::Trailing.shape(&raw);

        assert_eq!(shaped.len(), raw.len() - 3);
        assert_eq!(pairs(&shaped), vec![("PM1", 5.0), ("PM25", 8.0), ("PM10", 12.0)]);
    }

    #[test]
    fn trailing_policy_on_short_input_is_empty() {
        assert!(FilterPolicy::Trailing.shape(&[m("PM1", 1.0), m("PM25", 2.0)]).is_empty());
        assert!(FilterPolicy::Trailing.shape(&[]).is_empty());
    }

    #[test]
    fn key_mirrors_name() {
        for s in FilterPolicy::Trailing.shape(&sample()) {
            assert_eq!(s.key, s.name);
        }
    }

    #[test]
    fn shaping_is_deterministic() {
        let raw = sample();
        for policy in [FilterPolicy::Names, FilterPolicy::Trailing] {
            assert_eq!(policy.shape(&raw), policy.shape(&raw));
        }
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("Names".parse::<FilterPolicy>(), Ok(FilterPolicy::Names));
        assert_eq!("trailing".parse::<FilterPolicy>(), Ok(FilterPolicy::Trailing));
        assert!("last3".parse::<FilterPolicy>().is_err());
    }
}
