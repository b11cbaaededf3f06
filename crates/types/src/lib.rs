//! Validated value types shared across MediAssist crates.
//!
//! These types carry their invariants in the type system so that services and API layers can
//! accept them without re-checking: a [`NonEmptyText`] is never blank, a [`SymptomDescription`]
//! always has content, and a [`Role`] is always one of the three known user roles.

use std::fmt;
use std::str::FromStr;

/// Minimum length (in characters) the symptom form asks for.
pub const MIN_FORM_SYMPTOM_CHARS: usize = 10;

/// Maximum length (in characters) the symptom form accepts.
pub const MAX_FORM_SYMPTOM_CHARS: usize = 1000;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    #[error("Text is too short: {actual} characters (minimum {min})")]
    TooShort { min: usize, actual: usize },
    #[error("Text is too long: {actual} characters (maximum {max})")]
    TooLong { max: usize, actual: usize },
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Free-text description of a patient's reported symptoms.
///
/// Unlike [`NonEmptyText`], the text is kept exactly as supplied so that it can be interpolated
/// verbatim into a prompt. The only invariant is that it contains at least one non-whitespace
/// character.
///
/// The symptom form additionally applies a length policy, available through
/// [`SymptomDescription::for_form`]. The suggestion service itself does not require it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomDescription(String);

impl SymptomDescription {
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let text = input.into();
        if text.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(text))
    }

    /// Validates input against the symptom form's length policy
    /// (`MIN_FORM_SYMPTOM_CHARS..=MAX_FORM_SYMPTOM_CHARS` characters).
    pub fn for_form(input: impl Into<String>) -> Result<Self, TextError> {
        let description = Self::new(input)?;
        let actual = description.0.chars().count();
        if actual < MIN_FORM_SYMPTOM_CHARS {
            return Err(TextError::TooShort {
                min: MIN_FORM_SYMPTOM_CHARS,
                actual,
            });
        }
        if actual > MAX_FORM_SYMPTOM_CHARS {
            return Err(TextError::TooLong {
                max: MAX_FORM_SYMPTOM_CHARS,
                actual,
            });
        }
        Ok(description)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the description.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for SymptomDescription {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The role a (mock) user signs in with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Admin,
    Pharmacy,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Admin => "admin",
            Role::Pharmacy => "pharmacy",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "admin" => Ok(Role::Admin),
            "pharmacy" => Ok(Role::Pharmacy),
            other => Err(TextError::UnknownRole(other.to_string())),
        }
    }
}
