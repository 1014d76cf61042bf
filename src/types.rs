use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-assigned check identifier. Zero means "not yet created".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CheckId(pub i64);

impl CheckId {
    pub fn is_persisted(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminator selecting which type-specific fields apply to a check.
///
/// Wire values are the exact uppercase strings the server stores. Anything
/// else (including the empty string) is the valid "no type selected" state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CheckType {
    Job,
    Service,
    Program,
    Ssis,
    Url,
}

impl CheckType {
    pub const ALL: [CheckType; 5] = [
        CheckType::Job,
        CheckType::Service,
        CheckType::Program,
        CheckType::Ssis,
        CheckType::Url,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckType::Job => "JOB",
            CheckType::Service => "SERVICE",
            CheckType::Program => "PROGRAM",
            CheckType::Ssis => "SSIS",
            CheckType::Url => "URL",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "JOB" => Some(CheckType::Job),
            "SERVICE" => Some(CheckType::Service),
            "PROGRAM" => Some(CheckType::Program),
            "SSIS" => Some(CheckType::Ssis),
            "URL" => Some(CheckType::Url),
            _ => None,
        }
    }
}

/// Known values for the job object-type selector.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ObjectType {
    Nothing,
    Report,
    Codeunit,
}

impl ObjectType {
    pub const ALL: [ObjectType; 3] = [ObjectType::Nothing, ObjectType::Report, ObjectType::Codeunit];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Nothing => "NOTHING",
            ObjectType::Report => "REPORT",
            ObjectType::Codeunit => "CODEUNIT",
        }
    }
}

/// A form field whose text could not be interpreted as the type the flow
/// needs. Malformed text is reported instead of passed through.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FieldParseError {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for FieldParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field `{}` does not hold an integer: \"{}\"",
            self.field, self.value
        )
    }
}

impl std::error::Error for FieldParseError {}

/// The form's backing record: every field as raw text, in wire order.
///
/// Serialization is total and lossless. All sixteen fields are submitted on
/// every save, hidden or not, with their exact current text. Hidden fields may
/// carry stale values; the server treats them as non-authoritative.
#[derive(Debug, Clone, Default, Serialize, Eq, PartialEq)]
pub struct CheckDraft {
    pub id: String,
    pub name: String,
    pub server: String,
    #[serde(rename = "checkType")]
    pub check_type: String,
    #[serde(rename = "checkCategory")]
    pub check_category: String,
    pub service: String,
    pub url: String,
    pub program: String,
    #[serde(rename = "instanceCount")]
    pub instance_count: String,
    pub database: String,
    pub company: String,
    #[serde(rename = "businessUnit")]
    pub business_unit: String,
    pub system: String,
    #[serde(rename = "jobID")]
    pub job_id: String,
    #[serde(rename = "objectType")]
    pub object_type: String,
    #[serde(rename = "objectID")]
    pub object_id: String,
}

impl CheckDraft {
    /// Field values for a check not yet created. Numeric fields start at zero
    /// and the scope fields at "all", matching the server's defaults.
    pub fn blank() -> Self {
        Self {
            id: "0".to_string(),
            instance_count: "0".to_string(),
            object_type: ObjectType::Nothing.as_str().to_string(),
            object_id: "0".to_string(),
            business_unit: "all".to_string(),
            system: "all".to_string(),
            ..Self::default()
        }
    }

    /// The one place the id text is interpreted as a number.
    pub fn parsed_id(&self) -> Result<CheckId, FieldParseError> {
        self.id
            .trim()
            .parse::<i64>()
            .map(CheckId)
            .map_err(|_| FieldParseError {
                field: "id",
                value: self.id.clone(),
            })
    }

    /// The check type the visibility machine sees: recognized wire text or
    /// nothing. Unrecognized text is valid and maps to "no type".
    pub fn selected_type(&self) -> Option<CheckType> {
        CheckType::from_wire(&self.check_type)
    }

    /// Builds a draft from a server JSON object, stringifying whatever scalar
    /// the server sent for each wire key. Missing keys become empty text.
    pub fn from_wire(value: &Value) -> Self {
        Self {
            id: wire_text(value, "id"),
            name: wire_text(value, "name"),
            server: wire_text(value, "server"),
            check_type: wire_text(value, "checkType"),
            check_category: wire_text(value, "checkCategory"),
            service: wire_text(value, "service"),
            url: wire_text(value, "url"),
            program: wire_text(value, "program"),
            instance_count: wire_text(value, "instanceCount"),
            database: wire_text(value, "database"),
            company: wire_text(value, "company"),
            business_unit: wire_text(value, "businessUnit"),
            system: wire_text(value, "system"),
            job_id: wire_text(value, "jobID"),
            object_type: wire_text(value, "objectType"),
            object_id: wire_text(value, "objectID"),
        }
    }
}

fn wire_text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// One row of the list page table.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct CheckSummary {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub server: String,
    #[serde(default, rename = "checkType")]
    pub check_type: String,
    #[serde(default, rename = "checkCategory")]
    pub check_category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_type_round_trips_wire_values() {
        for check_type in CheckType::ALL {
            assert_eq!(CheckType::from_wire(check_type.as_str()), Some(check_type));
        }
    }

    #[test]
    fn check_type_rejects_unrecognized_values() {
        assert_eq!(CheckType::from_wire(""), None);
        assert_eq!(CheckType::from_wire("job"), None);
        assert_eq!(CheckType::from_wire("DISK"), None);
    }

    #[test]
    fn parsed_id_accepts_integers() {
        let mut draft = CheckDraft::blank();
        assert_eq!(draft.parsed_id(), Ok(CheckId(0)));

        draft.id = " 42 ".to_string();
        assert_eq!(draft.parsed_id(), Ok(CheckId(42)));
    }

    #[test]
    fn parsed_id_reports_malformed_text() {
        let mut draft = CheckDraft::blank();
        draft.id = "seven".to_string();

        let error = draft.parsed_id().expect_err("malformed id should not parse");
        assert_eq!(error.field, "id");
        assert_eq!(error.value, "seven");
    }

    #[test]
    fn serialization_is_total_and_lossless() {
        let mut draft = CheckDraft::blank();
        draft.id = "7".to_string();
        draft.name = "  padded name ".to_string();
        draft.check_type = "SERVICE".to_string();
        draft.service = "MSSQLSERVER".to_string();
        draft.instance_count = "not-a-number".to_string();
        draft.program = "stale hidden value".to_string();

        let value = serde_json::to_value(&draft).expect("draft should serialize");
        let object = value.as_object().expect("draft should serialize as object");

        let expected_keys = [
            "id",
            "name",
            "server",
            "checkType",
            "checkCategory",
            "service",
            "url",
            "program",
            "instanceCount",
            "database",
            "company",
            "businessUnit",
            "system",
            "jobID",
            "objectType",
            "objectID",
        ];
        assert_eq!(object.len(), expected_keys.len());
        for key in expected_keys {
            assert!(object.contains_key(key), "missing wire key {key}");
        }

        // Raw text passes through untouched, including hidden-field leftovers.
        assert_eq!(object["name"], "  padded name ");
        assert_eq!(object["instanceCount"], "not-a-number");
        assert_eq!(object["program"], "stale hidden value");
    }

    #[test]
    fn from_wire_stringifies_scalars() {
        let draft = CheckDraft::from_wire(&json!({
            "id": 12,
            "name": "nightly job",
            "checkType": "JOB",
            "instanceCount": 3,
            "objectID": "50001"
        }));

        assert_eq!(draft.id, "12");
        assert_eq!(draft.name, "nightly job");
        assert_eq!(draft.check_type, "JOB");
        assert_eq!(draft.instance_count, "3");
        assert_eq!(draft.object_id, "50001");
        assert_eq!(draft.service, "");
    }

    #[test]
    fn blank_draft_carries_server_defaults() {
        let draft = CheckDraft::blank();
        assert_eq!(draft.id, "0");
        assert_eq!(draft.instance_count, "0");
        assert_eq!(draft.object_id, "0");
        assert_eq!(draft.object_type, "NOTHING");
        assert_eq!(draft.business_unit, "all");
        assert_eq!(draft.system, "all");
        assert_eq!(draft.selected_type(), None);
    }
}
