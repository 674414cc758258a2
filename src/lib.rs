#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod params;
pub mod parse;

use std::fmt;

use geom::{EdgeFrame, Point2, Point3};
use params::{AffineParameters, RotationConstraint};
use parse::dmp::{self, DmpParameters, ParseResult};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Oriëntatie van een edge als kolom-major 4x4 matrix voor de renderer.
///
/// Geeft `null` terug wanneer begin- en eindpunt samenvallen; de aanroeper
/// tekent dan met de frame die hij al had.
#[wasm_bindgen]
pub fn edge_frame(begin: &[f64], end: &[f64]) -> Result<Option<Vec<f64>>, JsValue> {
    let begin = point_from_slice(begin).ok_or_else(|| js_error("begin moet drie coördinaten hebben"))?;
    let end = point_from_slice(end).ok_or_else(|| js_error("end moet drie coördinaten hebben"))?;

    let frame = EdgeFrame::from_axis(begin, end);
    if frame.is_none() {
        debug_log!("edge {:?} -> {:?} heeft lengte nul", begin, end);
    }
    Ok(frame.map(|frame| frame.to_gl_matrix(begin).to_vec()))
}

fn point_from_slice(coords: &[f64]) -> Option<Point3> {
    match coords {
        [x, y, z] => Some(Point3::new(*x, *y, *z)),
        _ => None,
    }
}

/// Houdt de parameters van één geladen DMP-document vast.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct FoamEngine {
    loaded: bool,
    parameters: DmpParameters,
}

#[wasm_bindgen]
impl FoamEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FoamEngine {
        FoamEngine::default()
    }

    /// Geeft terug of er een DMP-bestand geladen is.
    #[wasm_bindgen]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Laad een DMP-bestand; bij een fout blijft het vorige document actief.
    #[wasm_bindgen]
    pub fn load_dmp(&mut self, text: &str) -> Result<(), JsValue> {
        let parameters = dmp::parse_parameters(text).map_err(to_js_error)?;
        log::debug!("DMP geladen met {} parameters", parameters.len());
        self.parameters = parameters;
        self.loaded = true;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    #[wasm_bindgen]
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name)
    }

    /// Affiene parameters voor de opgegeven labels, als `{ names, values }`.
    #[wasm_bindgen]
    pub fn affine_parameters(&self, x_name: &str, y_name: &str, angle_name: &str) -> Result<JsValue, JsValue> {
        self.ensure_loaded()?;
        let affine = self
            .resolve_affine(x_name, y_name, angle_name)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&affine).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Rotatieconstraint `index` met middelpunt en hoek uit de opgegeven labels.
    #[wasm_bindgen]
    pub fn rotation_constraint(
        &self,
        index: usize,
        center_x_name: &str,
        center_y_name: &str,
        angle_name: &str,
    ) -> Result<JsValue, JsValue> {
        self.ensure_loaded()?;
        let constraint = self
            .resolve_rotation(index, center_x_name, center_y_name, angle_name)
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&constraint).map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl FoamEngine {
    #[must_use]
    pub fn parameters(&self) -> &DmpParameters {
        &self.parameters
    }

    pub fn resolve_affine(&self, x_name: &str, y_name: &str, angle_name: &str) -> ParseResult<AffineParameters> {
        let mut affine = AffineParameters::with_labels(x_name, y_name, angle_name);
        affine.resolve(&self.parameters)?;
        Ok(affine)
    }

    pub fn resolve_rotation(
        &self,
        index: usize,
        center_x_name: &str,
        center_y_name: &str,
        angle_name: &str,
    ) -> ParseResult<RotationConstraint> {
        let mut constraint = RotationConstraint::new(Point2::ORIGIN, 0.0, index).with_labels(
            center_x_name,
            center_y_name,
            angle_name,
        );
        constraint.resolve(&self.parameters)?;
        Ok(constraint)
    }

    fn ensure_loaded(&self) -> Result<(), JsValue> {
        if self.loaded {
            Ok(())
        } else {
            Err(js_error("er is geen DMP-bestand geladen"))
        }
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::warn!("{message}");
        JsValue::NULL
    }
}
