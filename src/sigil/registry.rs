//! Sigil registry: exact signature lookup over registered outlines.

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::SigilError;
use super::entity::Sigil;
use super::feature::Signature;
use super::recognizer::Recognizer;
use super::stroke::flatten_stroke;
use crate::geom::{PlaneFitError, Point2, Point3};

/// Unparsed sigil definition, as loaded from content files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigilSource {
    pub name: String,
    pub path_data: Vec<String>,
}

impl SigilSource {
    #[must_use]
    pub fn new(name: impl Into<String>, path_data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path_data: vec![path_data.into()],
        }
    }
}

/// Registered sigils, looked up by name or by exact signature.
#[derive(Debug, Default)]
pub struct SigilRegistry {
    recognizer: Recognizer,
    sigils: Vec<Sigil>,
    by_name: HashMap<String, usize>,
    by_signature: HashMap<Signature, usize>,
}

impl SigilRegistry {
    #[must_use]
    pub fn new(recognizer: Recognizer) -> Self {
        Self {
            recognizer,
            sigils: Vec::new(),
            by_name: HashMap::new(),
            by_signature: HashMap::new(),
        }
    }

    /// Builds every source and registers them in input order.
    ///
    /// # Errors
    /// The first build error in input order, or a duplicate name.
    pub fn from_sources(
        recognizer: Recognizer,
        sources: Vec<SigilSource>,
    ) -> Result<Self, SigilError> {
        let built = build_sigils(&recognizer, sources);
        let mut registry = Self::new(recognizer);
        for sigil in built {
            registry.insert(sigil?)?;
        }
        Ok(registry)
    }

    #[must_use]
    pub const fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    /// Parses `path_data` and registers it as `name`.
    ///
    /// # Errors
    /// Build errors, or [`SigilError::DuplicateName`].
    pub fn register(&mut self, name: &str, path_data: &str) -> Result<&Sigil, SigilError> {
        let sigil = Sigil::from_path_data(name, path_data, &self.recognizer)?;
        self.insert(sigil)
    }

    /// Registers every `<path>` of an SVG document as one sigil.
    ///
    /// # Errors
    /// Build errors, or [`SigilError::DuplicateName`].
    pub fn register_svg(&mut self, name: &str, svg: &str) -> Result<&Sigil, SigilError> {
        let sigil = Sigil::from_svg(name, svg, &self.recognizer)?;
        self.insert(sigil)
    }

    /// Registers an already built sigil.
    ///
    /// # Errors
    /// [`SigilError::DuplicateName`] when the name is taken.
    pub fn insert(&mut self, sigil: Sigil) -> Result<&Sigil, SigilError> {
        let key = normalize_name(sigil.name());
        if self.by_name.contains_key(&key) {
            return Err(SigilError::DuplicateName(sigil.name().to_owned()));
        }

        let index = self.sigils.len();
        match self.by_signature.get(sigil.signature()) {
            Some(&existing) => log::warn!(
                "sigil `{}` shares signature [{}] with `{}`; lookups keep the first",
                sigil.name(),
                sigil.signature(),
                self.sigils[existing].name()
            ),
            None => {
                self.by_signature.insert(sigil.signature().clone(), index);
            }
        }
        self.by_name.insert(key, index);
        self.sigils.push(sigil);
        Ok(&self.sigils[index])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sigils.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sigils.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sigil> {
        self.sigils.iter()
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sigil> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&index| &self.sigils[index])
    }

    /// Exact signature lookup; the earliest registration wins on collisions.
    #[must_use]
    pub fn find_by_signature(&self, signature: &Signature) -> Option<&Sigil> {
        self.by_signature
            .get(signature)
            .map(|&index| &self.sigils[index])
    }

    /// Recognizes a 2D point sequence and looks up its signature.
    #[must_use]
    pub fn match_points(&self, points: &[Point2]) -> Option<&Sigil> {
        let signature = self.recognizer.recognize(points);
        log::debug!("matching signature [{signature}]");
        self.find_by_signature(&signature)
    }

    /// Flattens a freehand 3D stroke and looks up its signature.
    ///
    /// # Errors
    /// [`PlaneFitError`] when the stroke does not span a plane.
    pub fn match_stroke(&self, points: &[Point3]) -> Result<Option<&Sigil>, PlaneFitError> {
        let flat = flatten_stroke(points)?;
        Ok(self.match_points(&flat))
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn build_sigil(recognizer: &Recognizer, source: SigilSource) -> Result<Sigil, SigilError> {
    Sigil::from_sources(source.name, source.path_data, recognizer)
}

#[cfg(feature = "parallel")]
fn build_sigils(
    recognizer: &Recognizer,
    sources: Vec<SigilSource>,
) -> Vec<Result<Sigil, SigilError>> {
    sources
        .into_par_iter()
        .map(|source| build_sigil(recognizer, source))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn build_sigils(
    recognizer: &Recognizer,
    sources: Vec<SigilSource>,
) -> Vec<Result<Sigil, SigilError>> {
    sources
        .into_iter()
        .map(|source| build_sigil(recognizer, source))
        .collect()
}
