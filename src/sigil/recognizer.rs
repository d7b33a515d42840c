//! Stroke recognizer.
//!
//! Turns a 2D point sequence into a [`Signature`] in three passes: exponential
//! smoothing, distance thinning, and feature extraction. Feature extraction
//! emits a cardinal direction whenever it changes and inserts a `Corner` where
//! two stable runs of quantized direction meet at a sharp angle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::feature::{Feature, Signature};
use crate::geom::{Point2, Vec2};

/// Number of angular buckets used to detect corners.
pub const NON_CARDINAL_DIRECTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RecognizerError {
    #[error("smoothing must lie in [0, 1), got {0}")]
    Smoothing(f64),
    #[error("thinning distance must be positive and finite, got {0}")]
    ThinningDistance(f64),
    #[error("corner angle must be finite, got {0}")]
    CornerAngle(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Weight of the previous smoothed point.
    pub smoothing: f64,
    /// Minimum spacing between retained points.
    pub thinning_distance: f64,
    /// Turn angle above which a direction change counts as a corner.
    pub corner_angle_degrees: f64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.25,
            thinning_distance: 0.05,
            corner_angle_degrees: 65.0,
        }
    }
}

impl RecognizerConfig {
    /// # Errors
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<(), RecognizerError> {
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(RecognizerError::Smoothing(self.smoothing));
        }
        if !self.thinning_distance.is_finite() || self.thinning_distance <= 0.0 {
            return Err(RecognizerError::ThinningDistance(self.thinning_distance));
        }
        if !self.corner_angle_degrees.is_finite() {
            return Err(RecognizerError::CornerAngle(self.corner_angle_degrees));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Recognizer {
    config: RecognizerConfig,
}

impl Recognizer {
    /// # Errors
    /// Fails when `config` does not validate.
    pub fn new(config: RecognizerConfig) -> Result<Self, RecognizerError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Runs the full pipeline and joins the features into a signature.
    #[must_use]
    pub fn recognize(&self, points: &[Point2]) -> Signature {
        Signature::from_features(&self.features(points))
    }

    /// Smooths and thins `points`, then extracts their features.
    #[must_use]
    pub fn features(&self, points: &[Point2]) -> Vec<Feature> {
        let smoothed = self.smooth(points);
        let thinned = self.thin(&smoothed);
        self.extract_features(&thinned)
    }

    /// Exponential moving average seeded with the first point.
    #[must_use]
    pub fn smooth(&self, points: &[Point2]) -> Vec<Point2> {
        let s = self.config.smoothing;
        let mut out: Vec<Point2> = Vec::with_capacity(points.len());
        for &p in points {
            let next = match out.last() {
                Some(prev) => Point2::new(
                    s * prev.x + (1.0 - s) * p.x,
                    s * prev.y + (1.0 - s) * p.y,
                ),
                None => p,
            };
            out.push(next);
        }
        out
    }

    /// Keeps the first point and every point strictly farther than the
    /// thinning distance from the last kept one.
    #[must_use]
    pub fn thin(&self, points: &[Point2]) -> Vec<Point2> {
        let threshold = self.config.thinning_distance * self.config.thinning_distance;
        let mut out: Vec<Point2> = Vec::with_capacity(points.len());
        for &p in points {
            match out.last() {
                Some(last) if last.distance_squared_to(p) <= threshold => {}
                _ => out.push(p),
            }
        }
        out
    }

    /// Feature extraction over already smoothed and thinned points.
    #[must_use]
    pub fn extract_features(&self, points: &[Point2]) -> Vec<Feature> {
        if points.len() < 2 {
            return Vec::new();
        }
        let steps: Vec<Vec2> = points.windows(2).map(|w| w[1] - w[0]).collect();
        let buckets: Vec<usize> = steps.iter().map(|step| direction_bucket(*step)).collect();

        let mut features = Vec::new();
        let mut last_cardinal: Option<Feature> = None;

        // Only steps with two neighbours on either side can start a corner.
        for i in 1..points.len() {
            if i >= 2
                && i < buckets.len().saturating_sub(2)
                && self.is_corner(&steps, &buckets, i)
            {
                features.push(Feature::Corner);
            }

            let cardinal = cardinal_direction(steps[i - 1]);
            if last_cardinal != Some(cardinal) {
                features.push(cardinal);
                last_cardinal = Some(cardinal);
            }
        }
        features
    }

    /// Stable bucket run `[i-2, i-1]` meets a different stable run `[i, i+1]`
    /// with a turn sharper than the corner angle.
    fn is_corner(&self, steps: &[Vec2], buckets: &[usize], i: usize) -> bool {
        let last = buckets[i - 2];
        let current = buckets[i - 1];
        let next = buckets[i];
        let after = buckets[i + 1];
        if last != current || next != after || next == current {
            return false;
        }
        steps[i - 1].angle_to_degrees(steps[i]) > self.config.corner_angle_degrees
    }
}

/// Up/Down/Left/Right by dominant axis; ties go horizontal, zero counts as positive.
#[must_use]
pub fn cardinal_direction(step: Vec2) -> Feature {
    if step.x.abs() >= step.y.abs() {
        if step.x >= 0.0 { Feature::Right } else { Feature::Left }
    } else if step.y >= 0.0 {
        Feature::Up
    } else {
        Feature::Down
    }
}

/// Quantizes a step into [`NON_CARDINAL_DIRECTIONS`] buckets centered on the
/// axes, bucket 0 around +X and counting counter-clockwise.
#[must_use]
pub fn direction_bucket(step: Vec2) -> usize {
    let width = 360.0 / NON_CARDINAL_DIRECTIONS as f64;
    let shifted = (step.heading_degrees() + width * 0.5) % 360.0;
    ((shifted / width).floor() as usize).min(NON_CARDINAL_DIRECTIONS - 1)
}
