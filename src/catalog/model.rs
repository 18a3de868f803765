//! Catalog entity records and the resource type tag.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Closed set of resource type tags stored in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Unit-wise study notes.
    Notes,
    /// CIE-1 question papers.
    Cie1,
    /// CIE-2 question papers.
    Cie2,
    /// CIE-3 question papers.
    Cie3,
    /// Semester End Examination papers.
    See,
    /// Reference books / question banks.
    Book,
}

impl ResourceType {
    /// Returns the database string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Cie1 => "cie1",
            Self::Cie2 => "cie2",
            Self::Cie3 => "cie3",
            Self::See => "see",
            Self::Book => "book",
        }
    }

    /// All variants, in display order.
    pub const ALL: [Self; 6] = [
        Self::Notes,
        Self::Cie1,
        Self::Cie2,
        Self::Cie3,
        Self::See,
        Self::Book,
    ];
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notes" => Ok(Self::Notes),
            "cie1" => Ok(Self::Cie1),
            "cie2" => Ok(Self::Cie2),
            "cie3" => Ok(Self::Cie3),
            "see" => Ok(Self::See),
            "book" => Ok(Self::Book),
            _ => Err(format!("invalid resource type: {s}")),
        }
    }
}

/// An academic semester. `sort_order` defines display sequence and is
/// unique per semester.
#[derive(Debug, Clone, FromRow)]
pub struct Semester {
    /// Unique identifier.
    pub id: i64,
    /// Display name (e.g. "Semester 3").
    pub name: String,
    /// Display position, unique across semesters.
    pub sort_order: i64,
}

/// A subject belonging to exactly one semester.
#[derive(Debug, Clone, FromRow)]
pub struct Subject {
    /// Unique identifier.
    pub id: i64,
    /// Subject name (e.g. "Engineering Mathematics II").
    pub name: String,
    /// Subject code (e.g. "21MA21").
    pub code: String,
    /// Owning semester.
    pub semester_id: i64,
    /// Whether this is a lab subject.
    pub is_lab: bool,
}

/// A syllabus subdivision within a subject, used to group notes.
///
/// Subjects with zero units use the flat display path instead of the
/// unit-grouped layout.
#[derive(Debug, Clone, FromRow)]
pub struct Unit {
    /// Unique identifier.
    pub id: i64,
    /// Unit number within the subject (1-5 conventionally).
    pub unit_number: i64,
    /// Unit title from the syllabus.
    pub unit_name: String,
    /// Owning subject.
    pub subject_id: i64,
}

/// A single study-material record.
///
/// The `unit` column is populated only when the type is `notes`; other
/// types ignore it. `file_url` is opaque except for preview pattern
/// matching.
#[derive(Debug, Clone, FromRow)]
pub struct Resource {
    /// Unique identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// External URL of the file.
    pub file_url: String,
    /// Raw type tag (stored as text, parsed via `resource_type()`).
    #[sqlx(rename = "type")]
    pub type_str: String,
    /// Unit label in `"Unit N"` format, only for notes.
    pub unit: Option<String>,
    /// Publication/exam year when known.
    pub year: Option<i64>,
    /// Owning subject.
    pub subject_id: i64,
}

impl Resource {
    /// Returns the parsed type tag, or `None` for tags outside the
    /// closed set (rendered into the unknown bucket, never an error).
    #[must_use]
    pub fn resource_type(&self) -> Option<ResourceType> {
        self.type_str.parse().ok()
    }

    /// True when this record carries the given parsed type.
    #[must_use]
    pub fn is_type(&self, resource_type: ResourceType) -> bool {
        self.resource_type() == Some(resource_type)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Resource {{ id: {}, title: {}, type: {} }}",
            self.id, self.title, self.type_str
        )
    }
}

/// Fields for inserting a new resource record.
#[derive(Debug, Clone)]
pub struct NewResource {
    /// Display title.
    pub title: String,
    /// External URL of the file.
    pub file_url: String,
    /// Type tag.
    pub resource_type: ResourceType,
    /// Unit label in `"Unit N"` format; only meaningful for notes.
    pub unit: Option<String>,
    /// Publication/exam year when known.
    pub year: Option<i64>,
    /// Owning subject.
    pub subject_id: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn resource(type_str: &str, unit: Option<&str>) -> Resource {
        Resource {
            id: 1,
            title: "Unit 1 Notes".to_string(),
            file_url: "https://example.com/notes.pdf".to_string(),
            type_str: type_str.to_string(),
            unit: unit.map(ToString::to_string),
            year: None,
            subject_id: 7,
        }
    }

    #[test]
    fn test_resource_type_as_str() {
        assert_eq!(ResourceType::Notes.as_str(), "notes");
        assert_eq!(ResourceType::Cie1.as_str(), "cie1");
        assert_eq!(ResourceType::Cie2.as_str(), "cie2");
        assert_eq!(ResourceType::Cie3.as_str(), "cie3");
        assert_eq!(ResourceType::See.as_str(), "see");
        assert_eq!(ResourceType::Book.as_str(), "book");
    }

    #[test]
    fn test_resource_type_from_str_valid() {
        for variant in ResourceType::ALL {
            assert_eq!(variant.as_str().parse::<ResourceType>().unwrap(), variant);
        }
    }

    #[test]
    fn test_resource_type_from_str_invalid() {
        let result = "quiz".parse::<ResourceType>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid resource type"));
    }

    #[test]
    fn test_resource_type_serde_roundtrip() {
        let json = serde_json::to_string(&ResourceType::Cie2).unwrap();
        assert_eq!(json, "\"cie2\"");
        let parsed: ResourceType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ResourceType::Cie2);
    }

    #[test]
    fn test_resource_parses_known_type() {
        let r = resource("notes", Some("Unit 1"));
        assert_eq!(r.resource_type(), Some(ResourceType::Notes));
        assert!(r.is_type(ResourceType::Notes));
        assert!(!r.is_type(ResourceType::Book));
    }

    #[test]
    fn test_resource_unknown_type_is_none_not_error() {
        let r = resource("flashcards", None);
        assert_eq!(r.resource_type(), None);
        assert!(!r.is_type(ResourceType::Notes));
    }

    #[test]
    fn test_resource_display() {
        let r = resource("see", None);
        let display = r.to_string();
        assert!(display.contains("Unit 1 Notes"));
        assert!(display.contains("see"));
    }
}
