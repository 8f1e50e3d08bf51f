//! Profile keys and the registry of profile data

use crate::{CvData, CvError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::info;

const FRONTEND_JSON: &str = include_str!("../data/cv-frontend.json");
const SDET_JSON: &str = include_str!("../data/cv-sdet.json");

/// Identifier of a selectable profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileKey {
    #[default]
    Frontend,
    Sdet,
}

impl ProfileKey {
    /// All keys in selector order
    pub const ALL: [ProfileKey; 2] = [ProfileKey::Frontend, ProfileKey::Sdet];

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKey::Frontend => "frontend",
            ProfileKey::Sdet => "sdet",
        }
    }

    /// Label shown in the profile selector
    pub fn label(self) -> &'static str {
        match self {
            ProfileKey::Frontend => "Frontend Engineer",
            ProfileKey::Sdet => "Senior SDET / Full-Stack",
        }
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKey {
    type Err = CvError;

    fn from_str(s: &str) -> Result<Self> {
        ProfileKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CvError::UnknownProfile(s.to_string()))
    }
}

/// Validated CV data for every [`ProfileKey`]
///
/// Construction fails unless each key has exactly one record that parses and
/// validates, so lookups afterwards cannot fail.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    frontend: CvData,
    sdet: CvData,
}

impl ProfileRegistry {
    /// Registry of the profiles compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_sources(&[
            (ProfileKey::Frontend, FRONTEND_JSON),
            (ProfileKey::Sdet, SDET_JSON),
        ])
    }

    /// Build a registry from `(key, json)` pairs
    pub fn from_sources(sources: &[(ProfileKey, &str)]) -> Result<Self> {
        let mut parsed: BTreeMap<ProfileKey, CvData> = BTreeMap::new();

        for (key, json) in sources {
            if parsed.contains_key(key) {
                return Err(CvError::DuplicateProfile(*key));
            }
            let cv: CvData = serde_json::from_str(json)
                .map_err(|source| CvError::InvalidProfile { key: *key, source })?;
            cv.validate()?;
            parsed.insert(*key, cv);
        }

        let mut take = |key: ProfileKey| parsed.remove(&key).ok_or(CvError::MissingProfile(key));
        let registry = Self {
            frontend: take(ProfileKey::Frontend)?,
            sdet: take(ProfileKey::Sdet)?,
        };

        info!(profiles = ProfileKey::ALL.len(), "loaded CV profiles");
        Ok(registry)
    }

    /// Data for a profile
    pub fn get(&self, key: ProfileKey) -> &CvData {
        match key {
            ProfileKey::Frontend => &self.frontend,
            ProfileKey::Sdet => &self.sdet,
        }
    }

    /// Profiles in selector order
    pub fn iter(&self) -> impl Iterator<Item = (ProfileKey, &CvData)> {
        ProfileKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}
