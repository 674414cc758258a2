//! Affiene plaatsing van een schuimstructuur: x-offset, y-offset en hoek.

use serde::Serialize;

use super::ParamError;
use crate::geom::{Point2, Transform2};
use crate::parse::dmp::{DmpParameters, ParseResult};

/// Aantal slots; vast, er wordt nooit geresized.
pub const SLOT_COUNT: usize = 3;
pub const SLOT_X: usize = 0;
pub const SLOT_Y: usize = 1;
pub const SLOT_ANGLE: usize = 2;

/// Drie benoemde waarden (x, y, hoek) met de labels waaronder ze in het
/// DMP-bestand staan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AffineParameters {
    names: [String; SLOT_COUNT],
    values: [f64; SLOT_COUNT],
}

impl AffineParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maakt een set met labels en nulwaarden.
    #[must_use]
    pub fn with_labels(x: impl Into<String>, y: impl Into<String>, angle: impl Into<String>) -> Self {
        Self {
            names: [x.into(), y.into(), angle.into()],
            values: [0.0; SLOT_COUNT],
        }
    }

    pub fn name(&self, index: usize) -> Result<&str, ParamError> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(ParamError::IndexOutOfRange { index, len: SLOT_COUNT })
    }

    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), ParamError> {
        let slot = self
            .names
            .get_mut(index)
            .ok_or(ParamError::IndexOutOfRange { index, len: SLOT_COUNT })?;
        *slot = name.into();
        Ok(())
    }

    pub fn value(&self, index: usize) -> Result<f64, ParamError> {
        self.values
            .get(index)
            .copied()
            .ok_or(ParamError::IndexOutOfRange { index, len: SLOT_COUNT })
    }

    pub fn set_value(&mut self, index: usize, value: f64) -> Result<(), ParamError> {
        let slot = self
            .values
            .get_mut(index)
            .ok_or(ParamError::IndexOutOfRange { index, len: SLOT_COUNT })?;
        *slot = value;
        Ok(())
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.values[SLOT_X]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.values[SLOT_Y]
    }

    /// Hoek in radialen; leest het hoekslot (index 2).
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.values[SLOT_ANGLE]
    }

    #[must_use]
    pub fn names(&self) -> &[String; SLOT_COUNT] {
        &self.names
    }

    #[must_use]
    pub fn values(&self) -> [f64; SLOT_COUNT] {
        self.values
    }

    /// Waar zolang er geen x-label is ingesteld.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names[SLOT_X].is_empty()
    }

    /// Vult de waarden in vanuit de parameters van een DMP-bestand.
    ///
    /// Slots met een leeg label worden overgeslagen. Bij een ontbrekende
    /// parameter blijven alle waarden ongewijzigd.
    pub fn resolve(&mut self, parameters: &DmpParameters) -> ParseResult<()> {
        let mut resolved = self.values;
        for (slot, name) in resolved.iter_mut().zip(&self.names) {
            if !name.is_empty() {
                *slot = parameters.require(name)?;
            }
        }
        self.values = resolved;
        Ok(())
    }

    /// Rotatie om de oorsprong gevolgd door verschuiving over (x, y).
    #[must_use]
    pub fn to_transform(&self) -> Transform2 {
        Transform2::translate(self.x(), self.y())
            * Transform2::rotate_about(Point2::ORIGIN, self.angle())
    }
}
