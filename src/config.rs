use crate::constants::{
    DEFAULT_MIN_QUALITY, DEFAULT_QUALITY_STEP, MAX_QUALITY, MIN_QUALITY, START_QUALITY,
};
use crate::error::{CompressionError, Result};

/// Tunables shared by every reducer call.
///
/// Built once from CLI flags (or by library callers) and passed by reference;
/// a call never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducerConfig {
    /// First JPEG quality tried by the quality reducer.
    pub start_quality: u8,
    /// Amount subtracted from the quality after each oversize attempt.
    pub quality_step: u8,
    /// Lowest quality the quality reducer may use.
    pub min_quality: u8,
    pub delete_source_after: bool,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            start_quality: START_QUALITY,
            quality_step: DEFAULT_QUALITY_STEP,
            min_quality: DEFAULT_MIN_QUALITY,
            delete_source_after: false,
        }
    }
}

impl ReducerConfig {
    pub fn new(
        quality_step: Option<u8>,
        min_quality: Option<u8>,
        delete_source_after: bool,
    ) -> Result<Self> {
        let quality_step = quality_step.unwrap_or(DEFAULT_QUALITY_STEP);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality_step) {
            return Err(CompressionError::InvalidQuality(quality_step));
        }

        let min_quality = min_quality.unwrap_or(DEFAULT_MIN_QUALITY);
        if !(MIN_QUALITY..=START_QUALITY).contains(&min_quality) {
            return Err(CompressionError::InvalidQuality(min_quality));
        }

        Ok(Self {
            start_quality: START_QUALITY,
            quality_step,
            min_quality,
            delete_source_after,
        })
    }

    /// Qualities the reducer will try, highest first, ending at the floor.
    pub fn quality_ladder(&self) -> Vec<u8> {
        let mut ladder = Vec::new();
        let mut quality = self.start_quality;
        loop {
            ladder.push(quality);
            if quality <= self.min_quality {
                break;
            }
            quality = quality
                .saturating_sub(self.quality_step)
                .max(self.min_quality);
        }
        ladder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reducer_config_default() {
        let config = ReducerConfig::new(None, None, false).unwrap();
        assert_eq!(config, ReducerConfig::default());
        assert_eq!(config.start_quality, 100);
        assert_eq!(config.quality_step, 10);
        assert_eq!(config.min_quality, 10);
    }

    #[test]
    fn test_reducer_config_invalid_step() {
        let result = ReducerConfig::new(Some(0), None, false);
        assert!(matches!(result, Err(CompressionError::InvalidQuality(0))));

        let result = ReducerConfig::new(Some(101), None, false);
        assert!(matches!(result, Err(CompressionError::InvalidQuality(101))));
    }

    #[test]
    fn test_reducer_config_invalid_floor() {
        let result = ReducerConfig::new(None, Some(0), false);
        assert!(matches!(result, Err(CompressionError::InvalidQuality(0))));
    }

    #[test]
    fn test_quality_ladder_step_ten() {
        let config = ReducerConfig::default();
        assert_eq!(
            config.quality_ladder(),
            vec![100, 90, 80, 70, 60, 50, 40, 30, 20, 10]
        );
    }

    #[test]
    fn test_quality_ladder_clamps_to_floor() {
        let config = ReducerConfig::new(Some(30), Some(15), false).unwrap();
        assert_eq!(config.quality_ladder(), vec![100, 70, 40, 15]);
    }

    #[test]
    fn test_quality_ladder_floor_at_start() {
        let config = ReducerConfig::new(Some(5), Some(100), false).unwrap();
        assert_eq!(config.quality_ladder(), vec![100]);
    }
}
