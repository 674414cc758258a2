use serde::Serialize;

use super::ParamError;

/// Hoogte van de histogramweergave, relatief aan de hoogste bin in de data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramHeight {
    max_value: f64,
    height: f64,
    log_scale: bool,
}

impl HistogramHeight {
    /// Start met de hoogte gelijk aan de hoogste bin.
    pub fn new(max_value: f64) -> Result<Self, ParamError> {
        validate("max_value", max_value)?;
        Ok(Self {
            max_value,
            height: max_value,
            log_scale: false,
        })
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) -> Result<(), ParamError> {
        validate("height", height)?;
        self.height = height;
        Ok(())
    }

    /// Zet de hoogte terug naar de hoogste bin.
    pub fn reset(&mut self) {
        self.height = self.max_value;
    }

    #[must_use]
    pub fn is_log_scale(&self) -> bool {
        self.log_scale
    }

    pub fn set_log_scale(&mut self, log_scale: bool) {
        self.log_scale = log_scale;
    }

    /// Hoogte zoals getekend: `log10(1 + h)` bij logaritmische schaal.
    #[must_use]
    pub fn effective_height(&self) -> f64 {
        if self.log_scale {
            self.height.ln_1p() / std::f64::consts::LN_10
        } else {
            self.height
        }
    }
}

fn validate(field: &'static str, value: f64) -> Result<(), ParamError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParamError::InvalidValue { field, value })
    }
}
