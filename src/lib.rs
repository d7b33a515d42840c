#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod parse;
pub mod sigil;

use std::fmt;

use geom::{BBox, Point2, Point3};
use serde::Serialize;
use sigil::{Recognizer, RecognizerConfig, SigilRegistry};
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

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not initialize the rayon thread pool: {err}")))
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

#[derive(Debug, Serialize)]
struct BoundsExport {
    min: [f64; 2],
    max: [f64; 2],
    size: [f64; 2],
    center: [f64; 2],
}

impl From<BBox> for BoundsExport {
    fn from(bbox: BBox) -> Self {
        let size = bbox.size();
        let center = bbox.center();
        Self {
            min: [bbox.min.x, bbox.min.y],
            max: [bbox.max.x, bbox.max.y],
            size: [size.x, size.y],
            center: [center.x, center.y],
        }
    }
}

#[derive(Debug, Serialize)]
struct SigilPointsExport<'a> {
    name: &'a str,
    step: f64,
    points: &'a [Point2],
}

/// Browser-facing entry point: register sigil outlines and match drawn strokes.
#[wasm_bindgen]
pub struct SigilEngine {
    registry: SigilRegistry,
}

#[wasm_bindgen]
impl SigilEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SigilEngine {
        SigilEngine {
            registry: SigilRegistry::default(),
        }
    }

    /// Engine with a recognizer configured from a JS object. Missing fields
    /// keep their defaults.
    #[wasm_bindgen]
    pub fn with_config(config: JsValue) -> Result<SigilEngine, JsValue> {
        let config: RecognizerConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|err| JsError::new(&err.to_string()))?;
        Self::from_config(config).map_err(to_js_error)
    }

    /// Register one path-data string. Returns the computed signature.
    #[wasm_bindgen]
    pub fn register_path(&mut self, name: &str, path_data: &str) -> Result<String, JsValue> {
        let sigil = self
            .registry
            .register(name, path_data)
            .map_err(to_js_error)?;
        debug_log!("registered {} as [{}]", sigil.name(), sigil.signature());
        Ok(sigil.signature().to_string())
    }

    /// Register every `<path>` of an SVG document as one sigil.
    #[wasm_bindgen]
    pub fn register_svg(&mut self, name: &str, svg: &str) -> Result<String, JsValue> {
        let sigil = self.registry.register_svg(name, svg).map_err(to_js_error)?;
        debug_log!("registered {} as [{}]", sigil.name(), sigil.signature());
        Ok(sigil.signature().to_string())
    }

    #[wasm_bindgen]
    pub fn sigil_count(&self) -> usize {
        self.registry.len()
    }

    #[wasm_bindgen]
    pub fn signature_of(&self, name: &str) -> Option<String> {
        self.registry
            .get(name)
            .map(|sigil| sigil.signature().to_string())
    }

    /// Signature of flat `[x0, y0, x1, y1, ...]` coordinates.
    #[wasm_bindgen]
    pub fn recognize_points(&self, coords: &[f64]) -> Result<String, JsValue> {
        let points = points_2d(coords).map_err(|err| js_error(&err))?;
        Ok(self.registry.recognizer().recognize(&points).to_string())
    }

    /// Name of the sigil matching flat 2D coordinates, if any.
    #[wasm_bindgen]
    pub fn match_points(&self, coords: &[f64]) -> Result<Option<String>, JsValue> {
        let points = points_2d(coords).map_err(|err| js_error(&err))?;
        Ok(self
            .registry
            .match_points(&points)
            .map(|sigil| sigil.name().to_owned()))
    }

    /// Name of the sigil matching a freehand stroke of flat `[x, y, z, ...]`
    /// coordinates, if any.
    #[wasm_bindgen]
    pub fn match_stroke(&self, coords: &[f64]) -> Result<Option<String>, JsValue> {
        let points = points_3d(coords).map_err(|err| js_error(&err))?;
        let matched = self.registry.match_stroke(&points).map_err(to_js_error)?;
        debug_log!("stroke of {} points matched {:?}", points.len(), matched.map(|s| s.name()));
        Ok(matched.map(|sigil| sigil.name().to_owned()))
    }

    /// Resampled outline of a registered sigil for redrawing.
    #[wasm_bindgen]
    pub fn sigil_points(&self, name: &str, step: f64) -> Result<JsValue, JsValue> {
        let Some(sigil) = self.registry.get(name) else {
            return Err(js_error(&format!("unknown sigil `{name}`")));
        };
        let points = sigil.points(step).map_err(to_js_error)?;
        let export = SigilPointsExport {
            name: sigil.name(),
            step,
            points: &points,
        };
        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Bounding box of flat 2D coordinates.
    #[wasm_bindgen]
    pub fn bounds(coords: &[f64]) -> Result<JsValue, JsValue> {
        let points = points_2d(coords).map_err(|err| js_error(&err))?;
        let Some(bbox) = BBox::from_points2(&points) else {
            return Err(js_error("cannot compute bounds of an empty point list"));
        };
        serde_wasm_bindgen::to_value(&BoundsExport::from(bbox))
            .map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl SigilEngine {
    /// Engine with a validated recognizer configuration.
    ///
    /// # Errors
    /// Fails when `config` is out of range.
    pub fn from_config(config: RecognizerConfig) -> Result<Self, sigil::RecognizerError> {
        Ok(Self {
            registry: SigilRegistry::new(Recognizer::new(config)?),
        })
    }

    #[must_use]
    pub fn registry(&self) -> &SigilRegistry {
        &self.registry
    }
}

impl Default for SigilEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn points_2d(coords: &[f64]) -> Result<Vec<Point2>, String> {
    if coords.len() % 2 != 0 {
        return Err(format!(
            "expected x/y pairs, got {} coordinates",
            coords.len()
        ));
    }
    Ok(coords
        .chunks_exact(2)
        .map(|pair| Point2::new(pair[0], pair[1]))
        .collect())
}

fn points_3d(coords: &[f64]) -> Result<Vec<Point3>, String> {
    if coords.len() % 3 != 0 {
        return Err(format!(
            "expected x/y/z triples, got {} coordinates",
            coords.len()
        ));
    }
    Ok(coords
        .chunks_exact(3)
        .map(|triple| Point3::new(triple[0], triple[1], triple[2]))
        .collect())
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
        let _ = message;
        JsValue::NULL
    }
}
