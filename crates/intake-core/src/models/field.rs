use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs of the registration form, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    GivenName,
    FamilyName,
    Email,
    Phone,
    Address,
    Cv,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::GivenName,
        Field::FamilyName,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::Cv,
    ];

    /// Text inputs, i.e. everything but the CV attachment
    pub const TEXT: [Field; 5] = [
        Field::GivenName,
        Field::FamilyName,
        Field::Email,
        Field::Phone,
        Field::Address,
    ];

    /// Key the form submits the value under
    pub fn key(&self) -> &'static str {
        match self {
            Field::GivenName => "givenName",
            Field::FamilyName => "familyName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Cv => "cv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::GivenName => "First Name",
            Field::FamilyName => "Last Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Address => "Address",
            Field::Cv => "CV File",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Address)
    }

    /// Resolve a submitted key. Accepts both the form's camelCase keys and
    /// the snake_case names used by the typed record.
    pub fn from_key(key: &str) -> Option<Field> {
        match key {
            "givenName" | "given_name" => Some(Field::GivenName),
            "familyName" | "family_name" => Some(Field::FamilyName),
            "email" => Some(Field::Email),
            "phone" => Some(Field::Phone),
            "address" => Some(Field::Address),
            "cv" => Some(Field::Cv),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
