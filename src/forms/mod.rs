// forms/mod.rs - Submitted form state shared by handlers and templates

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::validator::{self, Validator};

const TITLE_MAX_CHARS: usize = 100;
const PERMITTED_EXPIRY_DAYS: [i32; 3] = [1, 7, 365];
pub const DEFAULT_EXPIRY_DAYS: i32 = 365;

/// Submitted values of the create form plus their validation errors.
///
/// Fields missing from the body, and an empty `expires`, decode as empty/zero
/// and are then caught by validation; a value that cannot be decoded at all
/// rejects the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    #[serde(deserialize_with = "empty_as_zero")]
    pub expires: i32,
    #[serde(skip_deserializing)]
    pub validator: Validator,
}

impl SnippetCreateForm {
    /// Empty form with the default expiry selected
    pub fn blank() -> Self {
        Self {
            expires: DEFAULT_EXPIRY_DAYS,
            ..Default::default()
        }
    }

    pub fn validate(&mut self) {
        self.validator.check_field(
            validator::not_blank(&self.title),
            "title",
            "This field cannot be blank",
        );
        self.validator.check_field(
            validator::max_chars(&self.title, TITLE_MAX_CHARS),
            "title",
            "This field cannot be more than 100 characters long",
        );
        self.validator.check_field(
            validator::not_blank(&self.content),
            "content",
            "This field cannot be blank",
        );
        self.validator.check_field(
            validator::permitted_value(&self.expires, &PERMITTED_EXPIRY_DAYS),
            "expires",
            "This field must equal 1, 7 or 365",
        );
    }

    pub fn valid(&self) -> bool {
        self.validator.valid()
    }
}

fn empty_as_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::value::{Error as ValueError, StrDeserializer};
    use serde::de::IntoDeserializer;

    fn form(title: &str, content: &str, expires: i32) -> SnippetCreateForm {
        SnippetCreateForm {
            title: title.to_string(),
            content: content.to_string(),
            expires,
            ..Default::default()
        }
    }

    fn decode_expires(raw: &str) -> Result<i32, ValueError> {
        let deserializer: StrDeserializer<'_, ValueError> = raw.into_deserializer();
        empty_as_zero(deserializer)
    }

    #[test]
    fn blank_form_defaults_to_a_year() {
        let f = SnippetCreateForm::blank();
        assert_eq!(f.expires, 365);
        assert!(f.title.is_empty());
    }

    #[test]
    fn expires_decoding() {
        assert_eq!(decode_expires("7").unwrap(), 7);
        assert_eq!(decode_expires("").unwrap(), 0);
        assert!(decode_expires("soon").is_err());
        assert!(decode_expires("1.5").is_err());
    }

    #[test]
    fn accepts_valid_submission() {
        let mut f = form("Valid", "Valid", 7);
        f.validate();
        assert!(f.valid());
    }

    #[test]
    fn blank_title_reports_blank_not_length() {
        let mut f = form("   ", "content", 1);
        f.validate();
        assert_eq!(f.validator.field_errors["title"], "This field cannot be blank");
        assert_eq!(f.validator.field_errors.len(), 1);
    }

    #[test]
    fn overlong_title_is_rejected() {
        let mut f = form(&"x".repeat(101), "content", 365);
        f.validate();
        assert_eq!(
            f.validator.field_errors["title"],
            "This field cannot be more than 100 characters long"
        );

        let mut f = form(&"é".repeat(100), "content", 365);
        f.validate();
        assert!(f.valid());
    }

    #[test]
    fn expiry_must_be_on_the_allow_list() {
        let mut f = form("t", "c", 5);
        f.validate();
        assert_eq!(f.validator.field_errors["expires"], "This field must equal 1, 7 or 365");
    }

    #[test]
    fn every_field_can_fail_at_once() {
        let mut f = SnippetCreateForm::default();
        f.validate();
        assert_eq!(f.validator.field_errors.len(), 3);
    }
}
