//! # Validation Modes
//!
//! Modes are independent flags; several may run against one document.
//! [`ModeSet::ordered`] yields them in the fixed precedence order
//! HOMEGROWN, RECURSIVE, CORE, EXTENSIONS, CUSTOM.

use std::fmt;

use serde::{Serialize, Serializer};

/// One way of validating a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Version-keyed override schemas for legacy documents.
    Homegrown,
    /// Walk child and item links, checking every reachable object.
    Recursive,
    /// The core schema for the object's kind and version.
    Core,
    /// The core schema plus every declared extension schema.
    Extensions,
    /// A caller-supplied schema (URL or path).
    Custom(String),
}

impl ValidationMode {
    /// Report name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Homegrown => "homegrown",
            Self::Recursive => "recursive",
            Self::Core => "core",
            Self::Extensions => "extensions",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ValidationMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// The set of modes requested for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeSet {
    pub homegrown: bool,
    pub recursive: bool,
    pub core: bool,
    pub extensions: bool,
    pub custom: Option<String>,
}

impl ModeSet {
    /// No mode requested.
    pub fn is_empty(&self) -> bool {
        self.ordered().is_empty()
    }

    /// Requested modes in precedence order.
    pub fn ordered(&self) -> Vec<ValidationMode> {
        let mut modes = Vec::new();
        if self.homegrown {
            modes.push(ValidationMode::Homegrown);
        }
        if self.recursive {
            modes.push(ValidationMode::Recursive);
        }
        if self.core {
            modes.push(ValidationMode::Core);
        }
        if self.extensions {
            modes.push(ValidationMode::Extensions);
        }
        if let Some(uri) = &self.custom {
            modes.push(ValidationMode::Custom(uri.clone()));
        }
        modes
    }
}
