use std::fmt;

use serde::Serialize;

/// Delimiter between feature names in a [`Signature`].
pub const SIGNATURE_DELIMITER: &str = ", ";

/// A single token of a recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Feature {
    Up,
    Down,
    Left,
    Right,
    Corner,
}

impl Feature {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Corner => "Corner",
        }
    }

    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        !matches!(self, Self::Corner)
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Up" => Some(Self::Up),
            "Down" => Some(Self::Down),
            "Left" => Some(Self::Left),
            "Right" => Some(Self::Right),
            "Corner" => Some(Self::Corner),
            _ => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical, delimiter-joined feature sequence used as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    #[must_use]
    pub fn from_features(features: &[Feature]) -> Self {
        Self(
            features
                .iter()
                .map(|feature| feature.name())
                .collect::<Vec<_>>()
                .join(SIGNATURE_DELIMITER),
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits the signature back into features; `None` for unknown names.
    #[must_use]
    pub fn features(&self) -> Option<Vec<Feature>> {
        if self.0.is_empty() {
            return Some(Vec::new());
        }
        self.0.split(SIGNATURE_DELIMITER).map(Feature::from_name).collect()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Signature {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Signature {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Signature> for String {
    fn from(value: Signature) -> Self {
        value.0
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
