//! Gesture recognition and the sigil registry.

mod entity;
mod feature;
mod recognizer;
mod registry;
mod stroke;

use thiserror::Error;

use crate::geom::{PlaneFitError, ShapeError};
use crate::parse::{ParseError, SvgDocumentError};

pub use entity::{SIGNATURE_RESOLUTION, Sigil};
pub use feature::{Feature, SIGNATURE_DELIMITER, Signature};
pub use recognizer::{
    NON_CARDINAL_DIRECTIONS, Recognizer, RecognizerConfig, RecognizerError, cardinal_direction,
    direction_bucket,
};
pub use registry::{SigilRegistry, SigilSource};
pub use stroke::{fit_to_unit_box, flatten_stroke};

/// Errors that abort a sigil pipeline.
#[derive(Debug, Error)]
pub enum SigilError {
    #[error("path data: {0}")]
    Parse(#[from] ParseError),
    #[error("svg document: {0}")]
    SvgDocument(#[from] SvgDocumentError),
    #[error("shape: {0}")]
    Shape(#[from] ShapeError),
    #[error("plane fit: {0}")]
    PlaneFit(#[from] PlaneFitError),
    #[error("recognizer: {0}")]
    Recognizer(#[from] RecognizerError),
    #[error("a sigil named `{0}` is already registered")]
    DuplicateName(String),
}
