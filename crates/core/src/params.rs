//! Statistic parameters.
//!
//! Contains StatParams for controlling how collections key and track values.

/// Parameters for statistic collection.
///
/// Controls float-key bucketing and contributor bookkeeping for every counter
/// created by a collection or statistician.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatParams {
    /// Float values are rounded to the nearest multiple of this resolution
    /// before being used as counter keys. None keys on raw float equality, so
    /// 10.0 and 10.0001 are distinct keys.
    pub key_resolution: Option<f64>,

    /// If collection counters should record which elements contributed each
    /// key. When disabled, `elements_with_*` lookups are always empty.
    pub track_contributors: bool,
}

impl Default for StatParams {
    fn default() -> Self {
        Self {
            key_resolution: None,
            track_contributors: true,
        }
    }
}

impl StatParams {
    /// Creates new statistic parameters with the specified values.
    ///
    /// # Panics
    /// Panics if key_resolution is Some and not a positive finite number.
    pub fn new(key_resolution: Option<f64>, track_contributors: bool) -> Self {
        if let Some(res) = key_resolution {
            assert!(
                res.is_finite() && res > 0.0,
                "key_resolution should be None, or a positive finite number"
            );
        }

        Self {
            key_resolution,
            track_contributors,
        }
    }

    /// Maps a raw float to the value used as its counter key.
    #[inline]
    pub fn quantize(&self, value: f64) -> f64 {
        match self.key_resolution {
            Some(res) if value.is_finite() => (value / res).round() * res,
            _ => value,
        }
    }
}
