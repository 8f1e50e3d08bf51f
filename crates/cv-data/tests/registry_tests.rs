//! Integration tests for the profile registry

use cv_data::{CvError, ProfileKey, ProfileRegistry};
use pretty_assertions::assert_eq;

fn profile_json(profile: &str, name: &str) -> String {
    format!(
        r#"{{
            "profile": "{profile}",
            "personalInfo": {{
                "name": "{name}",
                "location": "Remote",
                "contact": {{ "phone": "1", "email": "a@example.com", "linkedin": "" }}
            }},
            "headline": "Headline",
            "summary": "Summary",
            "skills": {{ "languages": ["Go", "Rust"] }},
            "experience": []
        }}"#
    )
}

#[test]
fn test_from_sources() {
    let frontend = profile_json("Frontend Engineer", "Front Person");
    let sdet = profile_json("Senior SDET", "Test Person");

    let registry = ProfileRegistry::from_sources(&[
        (ProfileKey::Sdet, sdet.as_str()),
        (ProfileKey::Frontend, frontend.as_str()),
    ])
    .unwrap();

    assert_eq!(registry.get(ProfileKey::Frontend).personal_info.name, "Front Person");
    assert_eq!(registry.get(ProfileKey::Sdet).personal_info.name, "Test Person");
}

#[test]
fn test_missing_profile() {
    let frontend = profile_json("Frontend Engineer", "Front Person");
    let result = ProfileRegistry::from_sources(&[(ProfileKey::Frontend, frontend.as_str())]);
    assert!(matches!(result, Err(CvError::MissingProfile(ProfileKey::Sdet))));
}

#[test]
fn test_duplicate_profile() {
    let frontend = profile_json("Frontend Engineer", "Front Person");
    let result = ProfileRegistry::from_sources(&[
        (ProfileKey::Frontend, frontend.as_str()),
        (ProfileKey::Frontend, frontend.as_str()),
    ]);
    assert!(matches!(result, Err(CvError::DuplicateProfile(ProfileKey::Frontend))));
}

#[test]
fn test_invalid_json_names_the_profile() {
    let frontend = profile_json("Frontend Engineer", "Front Person");
    let result = ProfileRegistry::from_sources(&[
        (ProfileKey::Frontend, frontend.as_str()),
        (ProfileKey::Sdet, "{ \"profile\": "),
    ]);

    let err = result.unwrap_err();
    assert!(matches!(err, CvError::InvalidProfile { key: ProfileKey::Sdet, .. }));
    assert!(err.to_string().starts_with("Invalid data for profile sdet"));
}

#[test]
fn test_validation_runs_on_load() {
    let frontend = profile_json("Frontend Engineer", " ");
    let sdet = profile_json("Senior SDET", "Test Person");
    let result = ProfileRegistry::from_sources(&[
        (ProfileKey::Frontend, frontend.as_str()),
        (ProfileKey::Sdet, sdet.as_str()),
    ]);
    assert!(matches!(result, Err(CvError::Validation(_))));
}

#[test]
fn test_builtin_data_shape() {
    let registry = ProfileRegistry::builtin().unwrap();

    for (key, cv) in registry.iter() {
        assert!(!cv.skills.is_empty(), "{key} has skills");
        assert!(!cv.experience.is_empty(), "{key} has experience");
        assert!(cv.experience.iter().all(|e| !e.roles.is_empty()));
    }

    assert_eq!(registry.get(ProfileKey::Frontend).profile, "Frontend Engineer");
    assert_eq!(registry.get(ProfileKey::Sdet).profile, "Senior SDET / Full-Stack");
}
