use std::sync::{Mutex, PoisonError};

use super::SigilError;
use super::feature::Signature;
use super::recognizer::Recognizer;
use crate::geom::{PointCache, PointCacheStats, Shape, ShapeError, SharedPoints};
use crate::parse::{SvgDocumentError, collect_path_data, parse_path_data};

/// Step distance used to sample a sigil outline for its signature.
pub const SIGNATURE_RESOLUTION: f64 = 0.05;

/// A named outline with its precomputed signature.
#[derive(Debug)]
pub struct Sigil {
    name: String,
    description: String,
    rank: u32,
    path_data: Vec<String>,
    shape: Shape,
    signature: Signature,
    points: Mutex<PointCache>,
}

impl Sigil {
    /// Builds a sigil from one path-data string.
    ///
    /// # Errors
    /// Parse errors, and shape errors for outlines without extent or length.
    pub fn from_path_data(
        name: impl Into<String>,
        path_data: &str,
        recognizer: &Recognizer,
    ) -> Result<Self, SigilError> {
        Self::from_sources(name, vec![path_data.to_owned()], recognizer)
    }

    /// Builds a sigil from every `<path>` in an SVG document.
    ///
    /// # Errors
    /// See [`Sigil::from_path_data`]; also fails for documents without paths.
    pub fn from_svg(
        name: impl Into<String>,
        svg: &str,
        recognizer: &Recognizer,
    ) -> Result<Self, SigilError> {
        let sources = collect_path_data(svg)?;
        if sources.is_empty() {
            return Err(SvgDocumentError::NoPaths.into());
        }
        Self::from_sources(name, sources, recognizer)
    }

    /// Builds a sigil from several path-data strings drawn in order.
    ///
    /// # Errors
    /// See [`Sigil::from_path_data`].
    pub fn from_sources(
        name: impl Into<String>,
        path_data: Vec<String>,
        recognizer: &Recognizer,
    ) -> Result<Self, SigilError> {
        let name = name.into();
        let paths = path_data
            .iter()
            .map(|data| parse_path_data(data))
            .collect::<Result<Vec<_>, _>>()?;
        let shape = Shape::new(paths).normalized()?;
        let mut cache = PointCache::new();
        let samples = cache.get_or_try_insert(SIGNATURE_RESOLUTION, || {
            shape.resample(SIGNATURE_RESOLUTION)
        })?;
        let signature = recognizer.recognize(&samples);
        log::debug!("registered sigil `{name}` with signature [{signature}]");

        Ok(Self {
            name,
            description: String::new(),
            rank: 0,
            path_data,
            shape,
            signature,
            points: Mutex::new(cache),
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn rank(&self) -> u32 {
        self.rank
    }

    #[must_use]
    pub fn path_data(&self) -> &[String] {
        &self.path_data
    }

    /// The outline normalized into the unit box.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Normalized outline sampled every `step` units, cached per resolution.
    ///
    /// # Errors
    /// [`ShapeError::InvalidStep`] for non-positive steps.
    pub fn points(&self, step: f64) -> Result<SharedPoints, ShapeError> {
        let mut cache = self.points.lock().unwrap_or_else(PoisonError::into_inner);
        cache.get_or_try_insert(step, || self.shape.resample(step))
    }

    #[must_use]
    pub fn cache_stats(&self) -> PointCacheStats {
        self.points
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }
}
