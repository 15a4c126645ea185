//! Identifiers for the subject → stage → week hierarchy.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid hierarchy identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
    value: String,
}

impl ParseIdError {
    /// Returns the rejected input.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{} id cannot be empty", self.kind)
        } else {
            write!(
                f,
                "invalid {} id '{}': ids must contain only alphanumeric characters, hyphens, and underscores",
                self.kind, self.value
            )
        }
    }
}

impl std::error::Error for ParseIdError {}

fn validate(kind: &'static str, s: &str) -> Result<String, ParseIdError> {
    let trimmed = s.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(ParseIdError {
            kind,
            value: trimmed.to_string(),
        })
    }
}

// Catalog entries are `static`, so the ids borrow their text when built from
// literals and own it when parsed from user input or storage.
macro_rules! hierarchy_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Parses and validates an identifier.
            pub fn new(s: &str) -> Result<Self, ParseIdError> {
                validate($kind, s).map(|v| Self(Cow::Owned(v)))
            }

            /// Wraps a literal without validation. Reserved for catalog constants.
            pub(crate) const fn from_static(s: &'static str) -> Self {
                Self(Cow::Borrowed(s))
            }

            /// Wraps generated text known to be valid.
            pub(crate) fn from_owned(s: String) -> Self {
                Self(Cow::Owned(s))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "(\"{}\")"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

hierarchy_id!(
    /// Identifier of a subject, e.g. `stat`.
    SubjectId,
    "subject"
);

hierarchy_id!(
    /// Identifier of a program stage, e.g. `stage2`.
    StageId,
    "stage"
);

hierarchy_id!(
    /// Identifier of a week within a stage, e.g. `week3`.
    WeekId,
    "week"
);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn parsed_and_static_ids_compare_equal() {
        let parsed = SubjectId::new("stat").unwrap();
        let constant = SubjectId::from_static("stat");
        assert_eq!(parsed, constant);

        let mut set = HashSet::new();
        set.insert(constant);
        assert!(set.contains(&parsed));
    }

    #[test]
    fn new_trims_whitespace() {
        assert_eq!(StageId::new("  stage1 ").unwrap().as_str(), "stage1");
    }

    #[test]
    fn ids_are_case_sensitive() {
        assert_ne!(WeekId::new("week1").unwrap(), WeekId::new("Week1").unwrap());
    }

    #[test]
    fn rejects_empty() {
        let err = WeekId::new("   ").unwrap_err();
        assert_eq!(err.to_string(), "week id cannot be empty");
    }

    #[test]
    fn rejects_invalid_characters() {
        let err = SubjectId::new("data science").unwrap_err();
        assert_eq!(err.invalid_value(), "data science");
        assert!(err.to_string().contains("invalid subject id"));
        assert!(StageId::new("stage/1").is_err());
    }

    #[test]
    fn debug_names_the_type() {
        assert_eq!(
            format!("{:?}", StageId::from_static("stage3")),
            "StageId(\"stage3\")"
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: SubjectId = serde_json::from_str("\"ai\"").unwrap();
        assert_eq!(ok.as_str(), "ai");
        assert!(serde_json::from_str::<SubjectId>("\"\"").is_err());
    }
}
