//! Construction parameters of [`super::BackyardCuckoo`].
use backyard_core::BackyardError;

/// Dimensions of all the structures of a [`super::BackyardCuckoo`].
///
/// All of them are fixed for the lifetime of the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of first-level bins.
    pub num_bins: usize,
    /// Number of slots per bin, `0` turns the dictionary into plain cuckoo hashing.
    pub bin_capacity: usize,
    /// Number of slots in each of the two cuckoo tables.
    pub cuckoo_table_size: usize,
    /// Size of each sub-array of the queue.
    pub queue_n: usize,
    /// Number of sub-arrays (probes per item) of the queue.
    pub queue_k: usize,
    /// Maximum number of `(item, table)` pairs a single eviction chain may record.
    pub detector_elements: usize,
    /// Size of each sub-array of the cycle detector.
    pub detector_n: usize,
    /// Number of sub-arrays (probes per item) of the cycle detector.
    pub detector_k: usize,
    /// Maximum number of placement steps performed by a single insertion.
    pub insert_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_bins: 5,
            bin_capacity: 2,
            cuckoo_table_size: 4,
            queue_n: 5,
            queue_k: 3,
            detector_elements: 10,
            detector_n: 5,
            detector_k: 3,
            insert_iterations: 5,
        }
    }
}

impl Config {
    /// Check that the dimensions describe a usable dictionary.
    ///
    /// # Errors
    ///
    /// - [`BackyardError::InvalidConfig`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), BackyardError> {
        let non_zero = [
            (self.num_bins, "\"num_bins\" must be greater than 0"),
            (
                self.cuckoo_table_size,
                "\"cuckoo_table_size\" must be greater than 0",
            ),
            (self.queue_n, "\"queue_n\" must be greater than 0"),
            (self.queue_k, "\"queue_k\" must be greater than 0"),
            (
                self.detector_elements,
                "\"detector_elements\" must be greater than 0",
            ),
            (self.detector_n, "\"detector_n\" must be greater than 0"),
            (self.detector_k, "\"detector_k\" must be greater than 0"),
            (
                self.insert_iterations,
                "\"insert_iterations\" must be greater than 0",
            ),
        ];
        if let Some((_, reason)) = non_zero.iter().find(|(value, _)| *value == 0) {
            return Err(BackyardError::InvalidConfig(*reason));
        }
        if self.detector_elements > self.detector_n * self.detector_k {
            return Err(BackyardError::InvalidConfig(
                "\"detector_elements\" must not exceed \"detector_n * detector_k\"",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let config = Config {
            queue_k: 0,
            ..Config::default()
        };

        assert_eq!(
            config.validate(),
            Err(BackyardError::InvalidConfig(
                "\"queue_k\" must be greater than 0"
            )),
        );
    }

    #[test]
    fn test_zero_bin_capacity_is_allowed() {
        let config = Config {
            bin_capacity: 0,
            ..Config::default()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_detector_is_rejected() {
        let config = Config {
            detector_elements: 16,
            ..Config::default()
        };

        assert!(matches!(
            config.validate(),
            Err(BackyardError::InvalidConfig(_))
        ));
    }
}
