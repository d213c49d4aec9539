use serde::{Deserialize, Serialize};

/// The configuration for creating a [step decay schedule](StepDecaySchedule).
///
/// The schedule keeps the learning rate at `initial_lr` for `step_size`
/// epochs, then multiplies it by `decay` once per further `step_size` epochs.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StepDecayScheduleConfig {
    /// The learning rate at epoch 0.
    initial_lr: f64,
    /// Number of epochs between decays.
    step_size: usize,
    /// The factor by which the learning rate is multiplied at each decay.
    /// Default: 0.1.
    #[serde(default = "default_decay")]
    decay: f64,
}

fn default_decay() -> f64 {
    0.1
}

impl StepDecayScheduleConfig {
    /// Creates a configuration with the default decay factor.
    pub fn new(initial_lr: f64, step_size: usize) -> Self {
        Self {
            initial_lr,
            step_size,
            decay: default_decay(),
        }
    }

    /// Sets the decay factor.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Initializes a [step decay schedule](StepDecaySchedule).
    ///
    /// # Errors
    ///
    /// An error is returned if `step_size` is zero.
    pub fn init(&self) -> Result<StepDecaySchedule, String> {
        // `initial_lr` and `decay` are left unchecked; atypical values such as
        // zero can be useful when debugging.
        if self.step_size == 0 {
            return Err("Step size must be greater than 0".into());
        }

        Ok(StepDecaySchedule {
            initial_lr: self.initial_lr,
            step_size: self.step_size,
            decay: self.decay,
        })
    }
}

/// Step decay learning rate schedule.
///
/// A pure function of the epoch: `initial_lr * decay^(epoch / step_size)`
/// with integer division, so the rate is constant within each step window.
#[derive(Clone, Debug)]
pub struct StepDecaySchedule {
    initial_lr: f64,
    step_size: usize,
    decay: f64,
}

impl StepDecaySchedule {
    /// Returns the learning rate for the given 0-based epoch.
    pub fn learning_rate(&self, epoch: usize) -> f64 {
        self.initial_lr * self.decay.powi((epoch / self.step_size) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_step_size_zero_fails() {
        assert!(StepDecayScheduleConfig::new(1.0, 0).init().is_err());
    }

    #[test]
    fn config_step_size_nonzero_succeeds() {
        assert!(StepDecayScheduleConfig::new(1.0, 1).init().is_ok());
    }

    #[test]
    fn rate_decays_per_step_window() {
        let schedule = StepDecayScheduleConfig::new(0.5, 3)
            .with_decay(0.1)
            .init()
            .unwrap();

        let rates: Vec<f64> = (0..9).map(|epoch| schedule.learning_rate(epoch)).collect();
        let expected = [0.5, 0.5, 0.5, 0.05, 0.05, 0.05, 0.005, 0.005, 0.005];
        for (rate, expected) in rates.iter().zip(expected) {
            assert!((rate - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn rate_is_pure_in_the_epoch() {
        let schedule = StepDecayScheduleConfig::new(0.01, 80).init().unwrap();

        assert_eq!(schedule.learning_rate(79), 0.01);
        assert_eq!(schedule.learning_rate(160), schedule.learning_rate(161));
        assert!((schedule.learning_rate(80) - 0.001).abs() < 1e-12);
    }

    #[test]
    fn unit_decay_keeps_rate_constant() {
        let schedule = StepDecayScheduleConfig::new(3.1, 1)
            .with_decay(1.0)
            .init()
            .unwrap();

        assert_eq!(schedule.learning_rate(0), 3.1);
        assert_eq!(schedule.learning_rate(100), 3.1);
    }
}
