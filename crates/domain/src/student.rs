//! Student records served by the directory.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Unique integer identifier of a student.
///
/// Also addresses the student's image through the image URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StudentId(pub u64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StudentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for StudentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The service has been seen to send ids both as numbers and as strings.
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_u64()
                .map(Self)
                .ok_or_else(|| D::Error::custom(format!("invalid student id: {n}"))),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| D::Error::custom(format!("invalid student id: {s:?}"))),
            other => Err(D::Error::custom(format!("invalid student id: {other}"))),
        }
    }
}

/// A flat student record as returned by the directory service.
///
/// Only `id` is guaranteed. Attributes that the service sends as either
/// strings or numbers are normalised to strings, and attributes this client
/// does not know about are kept in `extra` so nothing is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Primary key.
    pub id: StudentId,
    /// Full name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Father's name.
    #[serde(rename = "FatherName", default, deserialize_with = "lenient_string")]
    pub father_name: Option<String>,
    /// Mother's name.
    #[serde(rename = "MotherName", default, deserialize_with = "lenient_string")]
    pub mother_name: Option<String>,
    /// Postal address.
    #[serde(rename = "ADDRESS", default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    /// Mobile phone number.
    #[serde(rename = "MOBILE", default, deserialize_with = "lenient_string")]
    pub mobile: Option<String>,
    /// Email address.
    #[serde(rename = "EMAIL", default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    /// Date of birth, as formatted by the service.
    #[serde(default, deserialize_with = "lenient_string")]
    pub dob: Option<String>,
    /// Gender.
    #[serde(rename = "GENDER", default, deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    /// Class section.
    #[serde(rename = "Section", default, deserialize_with = "lenient_string")]
    pub section: Option<String>,
    /// Branch of study.
    #[serde(rename = "BRANCH", default, deserialize_with = "lenient_string")]
    pub branch: Option<String>,
    /// University roll number.
    #[serde(rename = "RollNo", default, deserialize_with = "lenient_string")]
    pub roll_no: Option<String>,
    /// Aggregate percentage.
    #[serde(rename = "PERCENTAGE", default, deserialize_with = "lenient_string")]
    pub percentage: Option<String>,
    /// Attributes not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl StudentRecord {
    /// Creates a record with only the identifier and name set.
    #[must_use]
    pub fn new(id: impl Into<StudentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            father_name: None,
            mother_name: None,
            address: None,
            mobile: None,
            email: None,
            dob: None,
            gender: None,
            section: None,
            branch: None,
            roll_no: None,
            percentage: None,
            extra: BTreeMap::new(),
        }
    }

    /// Name for list rows, falling back to the identifier.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map_or_else(|| format!("Student {}", self.id), str::to_string)
    }

    /// Labelled attributes in the order the detail view shows them, led by
    /// the identifier.
    #[must_use]
    pub fn detail_fields(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        let fields: [(&'static str, &Option<String>); 12] = [
            ("Name", &self.name),
            ("Father's Name", &self.father_name),
            ("Mother's Name", &self.mother_name),
            ("Address", &self.address),
            ("Mobile", &self.mobile),
            ("Email", &self.email),
            ("Date of Birth", &self.dob),
            ("Gender", &self.gender),
            ("Section", &self.section),
            ("Branch", &self.branch),
            ("Roll Number", &self.roll_no),
            ("Percentage", &self.percentage),
        ];
        std::iter::once(("ID", Cow::Owned(self.id.to_string())))
            .chain(fields.into_iter().map(|(label, value)| {
                (label, Cow::Borrowed(value.as_deref().unwrap_or("-")))
            }))
            .collect()
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": 2201640100123_u64,
            "name": "Asha Verma",
            "FatherName": "R. Verma",
            "MotherName": "S. Verma",
            "ADDRESS": "12 Civil Lines, Kanpur",
            "MOBILE": 9876543210_u64,
            "EMAIL": "asha@example.com",
            "dob": "2004-03-17",
            "GENDER": "F",
            "Section": "CS-2A",
            "BRANCH": "CSE",
            "RollNo": "2201640100123",
            "PERCENTAGE": 87.5,
            "hostel": "Block C"
        })
    }

    #[test]
    fn test_decode_service_record() {
        let record: StudentRecord = serde_json::from_value(sample()).unwrap();
        assert_eq!(record.id, StudentId(2_201_640_100_123));
        assert_eq!(record.mobile.as_deref(), Some("9876543210"));
        assert_eq!(record.percentage.as_deref(), Some("87.5"));
        assert_eq!(record.extra.get("hostel"), Some(&json!("Block C")));
    }

    #[test]
    fn test_missing_attributes_default_to_none() {
        let record: StudentRecord = serde_json::from_value(json!({"id": "42"})).unwrap();
        assert_eq!(record.id, StudentId(42));
        assert_eq!(record.name, None);
        assert_eq!(record.display_name(), "Student 42");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_invalid_id_rejected() {
        let result: Result<StudentRecord, _> = serde_json::from_value(json!({"id": "abc"}));
        assert!(result.is_err());
        let result: Result<StudentRecord, _> = serde_json::from_value(json!({"name": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_detail_fields_order_and_placeholder() {
        let record = StudentRecord::new(7, "Ravi");
        let fields = record.detail_fields();
        assert_eq!(fields[0], ("ID", Cow::Borrowed("7")));
        assert_eq!(fields[1], ("Name", Cow::Borrowed("Ravi")));
        assert_eq!(fields[2], ("Father's Name", Cow::Borrowed("-")));
        assert_eq!(fields.len(), 13);
    }
}
