//! Compile and validation errors

use merx_core::{CompileTimeId, DamageType, FormatError, RoleType};
use thiserror::Error;

/// Errors that stop an artifact from being produced
#[derive(Debug, Error)]
pub enum CompileError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A hitbox has no backing object
    #[error("Hitbox {index} has no backing object")]
    MissingReference { index: usize },
    /// The author declined to continue without hitboxes
    #[error("Compilation declined: no hitboxes configured")]
    Declined,
    /// Encoding error
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}

/// Errors loading an export configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A configuration problem fixed up before writing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("Damage type {0:?} is ignored more than once")]
    DuplicateDamageType(DamageType),

    #[error("Role {0:?} is ignored more than once")]
    DuplicateRole(RoleType),

    #[error("Hitbox {index} references {object}, which is not a collidable primitive")]
    NonCollidableHitbox { index: usize, object: CompileTimeId },
}

/// Issues found by one validation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Whether nothing had to be fixed
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Log every issue at warn level
    pub fn log(&self, schematic_name: &str) {
        for issue in &self.issues {
            log::warn!("[{}] {}", schematic_name, issue);
        }
    }
}
