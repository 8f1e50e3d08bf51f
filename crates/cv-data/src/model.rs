//! CV data model

use crate::{CvError, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One complete CV profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CvData {
    /// Profile title (e.g. "Frontend Engineer"); also selects the theme
    pub profile: String,
    pub personal_info: PersonalInfo,
    pub headline: String,
    pub summary: String,
    /// Skill categories in display order
    pub skills: Skills,
    /// Employers in display order
    pub experience: Vec<Experience>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonalInfo {
    pub name: String,
    pub location: String,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    /// Profile URL; an empty string hides the link
    pub linkedin: String,
}

/// An employer with one or more roles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Experience {
    pub company: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tenure: Option<String>,
    pub roles: Vec<Role>,
}

impl Experience {
    /// Tenure to display, if any (blank values count as absent)
    pub fn tenure(&self) -> Option<&str> {
        self.total_tenure
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Role {
    pub title: String,
    pub duration: String,
    pub responsibilities: Vec<String>,
}

/// A named group of skills
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCategory {
    /// Raw category key as written in the data (e.g. "soft_skills")
    pub name: String,
    pub items: Vec<String>,
}

/// Skill categories keyed by name, in the order they were written
///
/// Serialized as a JSON object. Deserialization keeps the object's key order
/// and rejects duplicate keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skills(Vec<SkillCategory>);

impl Skills {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category; fails if the name is already present
    pub fn insert(&mut self, name: impl Into<String>, items: Vec<String>) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(CvError::Validation(format!(
                "duplicate skill category `{name}`"
            )));
        }
        self.0.push(SkillCategory { name, items });
        Ok(())
    }

    /// Items of a category by its raw name
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.items.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SkillCategory> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Skills {
    type Item = &'a SkillCategory;
    type IntoIter = std::slice::Iter<'a, SkillCategory>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Skills {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(&category.name, &category.items)?;
        }
        map.end()
    }
}

struct SkillsVisitor;

impl<'de> Visitor<'de> for SkillsVisitor {
    type Value = Skills;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of skill category to a list of skills")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Skills, A::Error> {
        let mut skills = Skills(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((name, items)) = access.next_entry::<String, Vec<String>>()? {
            if skills.get(&name).is_some() {
                return Err(de::Error::custom(format!(
                    "duplicate skill category `{name}`"
                )));
            }
            skills.0.push(SkillCategory { name, items });
        }
        Ok(skills)
    }
}

impl<'de> Deserialize<'de> for Skills {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SkillsVisitor)
    }
}

impl CvData {
    /// Check the invariants serde cannot express
    ///
    /// Name and profile must not be blank and every role needs a title.
    pub fn validate(&self) -> Result<()> {
        if self.personal_info.name.trim().is_empty() {
            return Err(CvError::Validation("personalInfo.name is blank".into()));
        }
        if self.profile.trim().is_empty() {
            return Err(CvError::Validation("profile is blank".into()));
        }
        for (i, exp) in self.experience.iter().enumerate() {
            for (j, role) in exp.roles.iter().enumerate() {
                if role.title.trim().is_empty() {
                    return Err(CvError::Validation(format!(
                        "experience[{i}].roles[{j}] ({}) has no title",
                        exp.company
                    )));
                }
            }
        }
        Ok(())
    }
}
