//! Typed views of the sidecar metadata
//!
//! The dump stores case metadata as loosely shaped JSON: most fields may be
//! null and the initiator is one of three sub-objects. Deserialization goes
//! through a raw mirror of the JSON and is then folded into [`CaseMetadata`],
//! so the rest of the crate never looks at a null.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Case metadata (`<entry>_case.meta`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawCaseMetadata")]
pub struct CaseMetadata {
    /// `registratiedatum`, copied verbatim
    pub registration_date: String,

    /// `toelichting`, if present and non-null
    pub explanation: Option<String>,

    pub initiator: Initiator,
}

/// Who initiated the case
///
/// The employee and organization variants keep any person details recorded
/// next to the marker, so that name fields are never dropped when a dump
/// carries both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Initiator {
    #[default]
    None,
    Person(Person),
    Employee { person: Option<Person> },
    Organization { person: Option<Person> },
}

impl Initiator {
    /// Person details, whatever the variant
    pub fn person(&self) -> Option<&Person> {
        match self {
            Initiator::None => None,
            Initiator::Person(person) => Some(person),
            Initiator::Employee { person } | Initiator::Organization { person } => person.as_ref(),
        }
    }
}

/// Natural person initiating a case; absent fields are empty strings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Person {
    pub first_names: String,
    pub name_prefix: String,
    pub last_name: String,
    pub citizen_number: String,
}

/// Payload metadata (`<stem>.meta`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayloadMetadata {
    /// `bestandsnaam`: the filename the payload had before export
    #[serde(rename = "bestandsnaam")]
    pub original_filename: String,
}

impl PayloadMetadata {
    /// Extension to restore on the payload
    ///
    /// Always the last three characters of the original filename, so
    /// `photo.jpeg` yields `peg` and a name without extension yields its tail.
    /// Names shorter than three characters are returned whole.
    pub fn true_extension(&self) -> &str {
        let name = self.original_filename.as_str();
        match name.char_indices().rev().nth(2) {
            Some((start, _)) => &name[start..],
            None => name,
        }
    }
}

#[derive(Deserialize)]
struct RawCaseMetadata {
    registratiedatum: String,
    #[serde(default)]
    toelichting: Option<String>,
    #[serde(default)]
    initiator: Option<RawInitiator>,
}

#[derive(Deserialize)]
struct RawInitiator {
    #[serde(default)]
    person: Option<RawPerson>,
    #[serde(default)]
    employee: Option<Value>,
    #[serde(default)]
    organization: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPerson {
    #[serde(default, deserialize_with = "lenient_text")]
    first_names: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    last_name_prefix: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    citizen_number: Option<String>,
}

impl From<RawCaseMetadata> for CaseMetadata {
    fn from(raw: RawCaseMetadata) -> Self {
        Self {
            registration_date: raw.registratiedatum,
            explanation: raw.toelichting,
            initiator: raw.initiator.map(Initiator::from).unwrap_or_default(),
        }
    }
}

impl From<RawInitiator> for Initiator {
    fn from(raw: RawInitiator) -> Self {
        let person = raw.person.map(Person::from);
        // A null marker counts as absent
        let employee = raw.employee.is_some_and(|v| !v.is_null());
        let organization = raw.organization.is_some_and(|v| !v.is_null());

        match (employee, organization, person) {
            (true, _, person) => Initiator::Employee { person },
            (false, true, person) => Initiator::Organization { person },
            (false, false, Some(person)) => Initiator::Person(person),
            (false, false, None) => Initiator::None,
        }
    }
}

impl From<RawPerson> for Person {
    fn from(raw: RawPerson) -> Self {
        Self {
            first_names: raw.first_names.unwrap_or_default(),
            name_prefix: raw.last_name_prefix.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            citizen_number: raw.citizen_number.unwrap_or_default(),
        }
    }
}

/// Accept a string, a number or null for a text field
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}
