use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::ValidationError;

macro_rules! document_number {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

document_number!(
    InvoiceNumber,
    "Printed invoice number, `INV-` followed by four digits and four uppercase alphanumerics.",
    r"^INV-\d{4}-[A-Z0-9]{4}$"
);
document_number!(
    ReceiptNumber,
    "Printed receipt number, `RCP-` followed by eight digits.",
    r"^RCP-\d{8}$"
);
document_number!(
    AccountNumber,
    "UK-style eight-digit account number.",
    r"^\d{8}$"
);
document_number!(
    SortCode,
    "UK-style sort code, three hyphen-separated digit pairs.",
    r"^\d{2}-\d{2}-\d{2}$"
);

/// Stable 128-bit document identifier.
///
/// Content-independent and globally unique for practical purposes (random
/// v4 UUID; collisions are treated as negligible and not checked). The id
/// keys every downstream artifact: rendered pages, rasterized images, and
/// ground-truth rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Builds an id from 16 caller-supplied random bytes.
    ///
    /// The bytes are stamped with the v4 version and RFC 4122 variant, so
    /// ids drawn from a seeded stream reproduce exactly under replay.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Draws an id from ambient entropy.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an id from its hyphenated string form.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ValidationError::PatternMismatch {
                field: "DocumentId",
                value: value.to_string(),
            })
    }

    /// Underlying UUID value.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
