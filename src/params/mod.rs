//! Waardecontainers voor parameters die uit een DMP-bestand worden gelezen.

mod affine;
mod histogram;
mod rotation;

pub use affine::{AffineParameters, SLOT_ANGLE, SLOT_COUNT, SLOT_X, SLOT_Y};
pub use histogram::HistogramHeight;
pub use rotation::RotationConstraint;

use thiserror::Error;

/// Fouten bij het lezen of schrijven van parameterwaarden.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Een slotindex buiten het vaste bereik.
    #[error("index {index} valt buiten het bereik 0..{len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// Een waarde die de validatie niet doorstaat.
    #[error("ongeldige waarde voor {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}
