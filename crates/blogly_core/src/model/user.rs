//! User domain model.
//!
//! # Responsibility
//! - Define the `User` read model and its write-side companions
//!   (`NewUser`, `UserPatch`).
//! - Normalize and validate name/date fields before persistence.
//!
//! # Invariants
//! - `first_name`/`last_name` are stored lower-cased; display casing is a
//!   presentation concern handled by `full_name`.
//! - `(first_name, last_name)` is unique across all users.

use crate::model::{check_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable integer surrogate key for users.
pub type UserId = i64;

pub const NAME_MAX_CHARS: usize = 20;
pub const IMAGE_URL_MAX_CHARS: usize = 255;

const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

/// Persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Surrogate key assigned by storage, immutable.
    pub id: UserId,
    /// Lower-cased given name.
    pub first_name: String,
    /// Lower-cased family name.
    pub last_name: String,
    /// Calendar date of birth.
    pub birthdate: NaiveDate,
    /// Optional avatar/profile image location.
    pub image_url: Option<String>,
}

impl User {
    /// Returns the display name with both parts capitalized, e.g. "Ann Lee".
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            capitalize(&self.first_name),
            capitalize(&self.last_name)
        )
    }
}

/// Normalized input for user creation. Build via [`NewUser::new`] so name
/// casing and blank `image_url` handling stay consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub image_url: Option<String>,
}

impl NewUser {
    /// Normalizes raw form values: names are trimmed and lower-cased, a
    /// blank `image_url` becomes `None`.
    pub fn new(
        first_name: &str,
        last_name: &str,
        birthdate: NaiveDate,
        image_url: Option<&str>,
    ) -> Self {
        Self {
            first_name: normalize_name(first_name),
            last_name: normalize_name(last_name),
            birthdate,
            image_url: image_url.and_then(normalize_optional_text),
        }
    }

    /// Checks blank/length rules. Write paths must call this before SQL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("user", "first_name", &self.first_name, NAME_MAX_CHARS)?;
        check_text("user", "last_name", &self.last_name, NAME_MAX_CHARS)?;
        if let Some(url) = &self.image_url {
            check_text("user", "image_url", url, IMAGE_URL_MAX_CHARS)?;
        }
        Ok(())
    }
}

/// Partial-update payload: only `Some` fields are applied, everything else
/// is left untouched by `UpdateUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub image_url: Option<String>,
}

impl UserPatch {
    /// Builds a patch from string-typed form fields.
    ///
    /// Blank or absent values are treated as "unchanged". Names are
    /// lower-cased. A present but unparseable `birthdate` is a
    /// [`ValidationError`], not a skip.
    pub fn from_form(
        first_name: Option<&str>,
        last_name: Option<&str>,
        birthdate: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let birthdate = match birthdate.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => Some(parse_birthdate(raw)?),
            None => None,
        };
        Ok(Self {
            first_name: first_name
                .and_then(normalize_optional_text)
                .map(|v| v.to_lowercase()),
            last_name: last_name
                .and_then(normalize_optional_text)
                .map(|v| v.to_lowercase()),
            birthdate,
            image_url: image_url.and_then(normalize_optional_text),
        })
    }

    /// True when no field is present; applying such a patch is a no-op.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.birthdate.is_none()
            && self.image_url.is_none()
    }

    /// Checks blank/length rules on the present fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(value) = &self.first_name {
            check_text("user", "first_name", value, NAME_MAX_CHARS)?;
        }
        if let Some(value) = &self.last_name {
            check_text("user", "last_name", value, NAME_MAX_CHARS)?;
        }
        if let Some(value) = &self.image_url {
            check_text("user", "image_url", value, IMAGE_URL_MAX_CHARS)?;
        }
        Ok(())
    }
}

/// Parses a `YYYY-MM-DD` form value into a calendar date.
pub fn parse_birthdate(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), BIRTHDATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field: "birthdate",
            value: value.to_string(),
        }
    })
}

fn normalize_name(value: &str) -> String {
    value.trim().to_lowercase()
}

fn normalize_optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_birthdate, NewUser, User, UserPatch};
    use chrono::NaiveDate;

    fn birthdate() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date")
    }

    #[test]
    fn new_user_lowercases_names_and_drops_blank_image_url() {
        let user = NewUser::new("  Ann ", "LEE", birthdate(), Some("   "));
        assert_eq!(user.first_name, "ann");
        assert_eq!(user.last_name, "lee");
        assert_eq!(user.image_url, None);
    }

    #[test]
    fn full_name_capitalizes_stored_lowercase_parts() {
        let user = User {
            id: 1,
            first_name: "ann".to_string(),
            last_name: "lee".to_string(),
            birthdate: birthdate(),
            image_url: None,
        };
        assert_eq!(user.full_name(), "Ann Lee");
    }

    #[test]
    fn patch_from_form_skips_blank_fields() {
        let patch = UserPatch::from_form(Some("Bea"), Some(""), None, Some("  "))
            .expect("patch should build");
        assert_eq!(patch.first_name.as_deref(), Some("bea"));
        assert_eq!(patch.last_name, None);
        assert_eq!(patch.birthdate, None);
        assert_eq!(patch.image_url, None);
    }

    #[test]
    fn patch_from_form_rejects_unparseable_birthdate() {
        let err = UserPatch::from_form(None, None, Some("01/01/1990"), None)
            .expect_err("bad date must fail");
        assert!(err.to_string().contains("calendar date"));
    }

    #[test]
    fn parse_birthdate_accepts_iso_dates_only() {
        assert_eq!(parse_birthdate("1990-01-01"), Ok(birthdate()));
        assert!(parse_birthdate("1990-13-01").is_err());
        assert!(parse_birthdate("yesterday").is_err());
    }

    #[test]
    fn user_serializes_birthdate_as_iso_text() {
        let user = User {
            id: 7,
            first_name: "ann".to_string(),
            last_name: "lee".to_string(),
            birthdate: birthdate(),
            image_url: Some("https://example.com/a.png".to_string()),
        };
        let json = serde_json::to_value(&user).expect("user should serialize");
        assert_eq!(json["birthdate"], "1990-01-01");
    }
}
