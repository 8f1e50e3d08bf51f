//! CV Data - typed CV content and the built-in profile registry
//!
//! This crate provides:
//! - The CV data model (personal info, headline, summary, ordered skills, experience)
//! - A registry of the built-in profiles, validated when it is constructed
//! - Text helpers shared by the renderers (category labels, file name slugs)
//!
//! # Example
//!
//! ```ignore
//! use cv_data::{ProfileKey, ProfileRegistry};
//!
//! let registry = ProfileRegistry::builtin()?;
//! let cv = registry.get("sdet".parse::<ProfileKey>()?);
//! println!("{} - {}", cv.personal_info.name, cv.headline);
//! ```

mod model;
mod profile;
pub mod text;

pub use model::{Contact, CvData, Experience, PersonalInfo, Role, SkillCategory, Skills};
pub use profile::{ProfileKey, ProfileRegistry};

use thiserror::Error;

/// Errors raised while loading or validating CV data
#[derive(Debug, Error)]
pub enum CvError {
    #[error("Unknown profile: {0:?}")]
    UnknownProfile(String),

    #[error("No data for profile {0}")]
    MissingProfile(ProfileKey),

    #[error("Profile {0} is defined more than once")]
    DuplicateProfile(ProfileKey),

    #[error("Invalid data for profile {key}: {source}")]
    InvalidProfile {
        key: ProfileKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for CV data operations
pub type Result<T> = std::result::Result<T, CvError>;
