//! Profile data model

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// One configured account for a remote Lens service.
///
/// Decoding is forgiving: unknown keys in a stored document are ignored,
/// and `access_token`, `logged_in` and `user` fall back to their defaults
/// when absent. The remaining fields are required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub lens_url: String,
    pub api_url: String,
    pub email: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_logged_in")]
    pub logged_in: bool,
    #[serde(default)]
    pub user: Map<String, Value>,
}

fn default_logged_in() -> bool {
    true
}

impl Profile {
    /// Create a new profile with the given name and service endpoints
    pub fn new(name: String, lens_url: String, api_url: String, email: String) -> Result<Self> {
        let profile = Self {
            name,
            lens_url,
            api_url,
            email,
            access_token: String::new(),
            logged_in: true,
            user: Map::new(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Validate the profile data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(
                "Profile name cannot be empty".to_string(),
            ));
        }

        // Name doubles as the directory name (alphanumeric, underscore,
        // hyphen only)
        if !self
            .name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::Validation(
                "Profile name must contain only alphanumeric characters, underscores, and hyphens"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Ordering used for deterministic listing: by name, with the
    /// remaining scalar fields as tie-breakers.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.lens_url.cmp(&other.lens_url))
            .then_with(|| self.api_url.cmp(&other.api_url))
            .then_with(|| self.email.cmp(&other.email))
            .then_with(|| self.access_token.cmp(&other.access_token))
            .then_with(|| self.logged_in.cmp(&other.logged_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile() {
        let profile = Profile::new(
            "work".to_string(),
            "https://lens.example.com".to_string(),
            "https://api.example.com".to_string(),
            "me@example.com".to_string(),
        )
        .unwrap();
        assert_eq!(profile.name, "work");
        assert_eq!(profile.access_token, "");
        assert!(profile.logged_in);
        assert!(profile.user.is_empty());
    }

    #[test]
    fn test_profile_validation_empty_name() {
        let result = Profile::new(
            "".to_string(),
            "https://lens".to_string(),
            "https://api".to_string(),
            "a@x.com".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_validation_invalid_name() {
        for name in ["has space", "a/b", "..", "dot.dot", "semi;colon"] {
            let result = Profile::new(
                name.to_string(),
                "https://lens".to_string(),
                "https://api".to_string(),
                "a@x.com".to_string(),
            );
            assert!(result.is_err(), "expected '{}' to be rejected", name);
        }
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"{
            "name": "alice",
            "lens_url": "https://lens",
            "api_url": "https://api",
            "email": "a@x.com",
            "foo": 123
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "alice");
    }

    #[test]
    fn test_decode_defaults_missing_optional_fields() {
        let json = r#"{
            "name": "alice",
            "lens_url": "https://lens",
            "api_url": "https://api",
            "email": "a@x.com"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.access_token, "");
        assert!(profile.logged_in);
        assert!(profile.user.is_empty());
    }

    #[test]
    fn test_decode_missing_required_field_fails() {
        let json = r#"{
            "name": "alice",
            "lens_url": "https://lens",
            "api_url": "https://api"
        }"#;
        let result: std::result::Result<Profile, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip() {
        let mut profile = Profile::new(
            "alice".to_string(),
            "https://lens".to_string(),
            "https://api".to_string(),
            "a@x.com".to_string(),
        )
        .unwrap();
        profile.access_token = "tok".to_string();
        profile.logged_in = false;
        profile.user.insert("id".to_string(), Value::from(42));

        let json = serde_json::to_string_pretty(&profile).unwrap();
        let decoded: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn test_cmp_by_name() {
        let a = Profile::new(
            "alice".to_string(),
            "https://lens".to_string(),
            "https://api".to_string(),
            "a@x.com".to_string(),
        )
        .unwrap();
        let b = Profile::new(
            "bob".to_string(),
            "https://lens".to_string(),
            "https://api".to_string(),
            "b@x.com".to_string(),
        )
        .unwrap();
        assert_eq!(a.cmp_by_name(&b), Ordering::Less);
        assert_eq!(b.cmp_by_name(&a), Ordering::Greater);
        assert_eq!(a.cmp_by_name(&a.clone()), Ordering::Equal);
    }
}
