//! Index fields derived from case metadata

use crate::model::{CaseMetadata, Initiator};

/// Suffix appended to the explanation when an employee initiated the case
pub const EMPLOYEE_SUFFIX: &str = " (medewerker)";

/// Suffix appended to the explanation when an organization initiated the case
pub const ORGANIZATION_SUFFIX: &str = " (organization)";

/// The five composed columns of an index row; every field defaults to ""
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedName {
    pub explanation: String,
    pub citizen_number: String,
    pub first_names: String,
    pub name_prefix: String,
    pub last_name: String,
}

impl ComposedName {
    /// Readable name for progress output: the person's name, else the explanation
    pub fn display_name(&self) -> String {
        let name = [
            self.first_names.as_str(),
            self.name_prefix.as_str(),
            self.last_name.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

        if name.is_empty() {
            self.explanation.clone()
        } else {
            name
        }
    }
}

/// Compose the index fields of a case. Never fails.
pub fn compose(metadata: &CaseMetadata) -> ComposedName {
    let mut composed = ComposedName {
        explanation: metadata.explanation.clone().unwrap_or_default(),
        ..ComposedName::default()
    };

    if let Some(person) = metadata.initiator.person() {
        composed.first_names = person.first_names.clone();
        composed.name_prefix = person.name_prefix.clone();
        composed.last_name = person.last_name.clone();
        composed.citizen_number = person.citizen_number.clone();
    }

    match metadata.initiator {
        Initiator::Employee { .. } => composed.explanation.push_str(EMPLOYEE_SUFFIX),
        Initiator::Organization { .. } => composed.explanation.push_str(ORGANIZATION_SUFFIX),
        Initiator::Person(_) | Initiator::None => {}
    }

    composed
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compose_json(value: serde_json::Value) -> ComposedName {
        compose(&serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_null_initiator_uses_explanation() {
        let composed = compose_json(json!({
            "registratiedatum": "2019-05-01",
            "toelichting": "klacht",
            "initiator": null
        }));
        assert_eq!(
            composed,
            ComposedName {
                explanation: "klacht".into(),
                ..ComposedName::default()
            }
        );
    }

    #[test]
    fn test_everything_absent_is_empty() {
        let composed = compose_json(json!({
            "registratiedatum": "2019-05-01",
            "toelichting": null,
            "initiator": null
        }));
        assert_eq!(composed, ComposedName::default());
        assert_eq!(composed.display_name(), "");
    }

    #[test]
    fn test_person_fields() {
        let composed = compose_json(json!({
            "registratiedatum": "2019-05-01",
            "toelichting": "bezwaar",
            "initiator": {
                "person": {
                    "firstNames": "Anna Maria",
                    "lastNamePrefix": "van der",
                    "lastName": "Berg",
                    "citizenNumber": "111222333"
                }
            }
        }));
        assert_eq!(composed.explanation, "bezwaar");
        assert_eq!(composed.first_names, "Anna Maria");
        assert_eq!(composed.name_prefix, "van der");
        assert_eq!(composed.last_name, "Berg");
        assert_eq!(composed.citizen_number, "111222333");
        assert_eq!(composed.display_name(), "Anna Maria van der Berg");
    }

    #[test]
    fn test_null_prefix_is_empty_not_null() {
        let composed = compose_json(json!({
            "registratiedatum": "2019-05-01",
            "initiator": {
                "person": {
                    "firstNames": "Jan",
                    "lastNamePrefix": null,
                    "lastName": "Jansen",
                    "citizenNumber": "999"
                }
            }
        }));
        assert_eq!(composed.name_prefix, "");
        assert_eq!(composed.display_name(), "Jan Jansen");
    }

    #[test]
    fn test_employee_suffix() {
        let composed = compose_json(json!({
            "registratiedatum": "2019-05-01",
            "toelichting": "melding",
            "initiator": { "employee": { "id": "e-12" } }
        }));
        assert_eq!(composed.explanation, "melding (medewerker)");
        assert!(composed.explanation.ends_with(EMPLOYEE_SUFFIX));
        assert_eq!(composed.first_names, "");
    }

    #[test]
    fn test_employee_suffix_without_explanation() {
        let composed = compose_json(json!({
            "registratiedatum": "2019-05-01",
            "initiator": { "employee": {} }
        }));
        assert_eq!(composed.explanation, " (medewerker)");
    }

    #[test]
    fn test_organization_suffix() {
        let composed = compose_json(json!({
            "registratiedatum": "2019-05-01",
            "toelichting": "aanvraag",
            "initiator": { "organization": { "kvk": "1234" } }
        }));
        assert_eq!(composed.explanation, "aanvraag (organization)");
    }

    #[test]
    fn test_person_and_employee_are_independent() {
        let composed = compose_json(json!({
            "registratiedatum": "2019-05-01",
            "toelichting": "intern",
            "initiator": {
                "person": { "firstNames": "Kees", "lastName": "Smit", "citizenNumber": null },
                "employee": { "id": 3 }
            }
        }));
        assert_eq!(composed.explanation, "intern (medewerker)");
        assert_eq!(composed.first_names, "Kees");
        assert_eq!(composed.last_name, "Smit");
        assert_eq!(composed.citizen_number, "");
    }

    #[test]
    fn test_empty_initiator_object() {
        let composed = compose_json(json!({
            "registratiedatum": "2019-05-01",
            "toelichting": "leeg",
            "initiator": {}
        }));
        assert_eq!(composed.explanation, "leeg");
        assert_eq!(composed.last_name, "");
    }
}
