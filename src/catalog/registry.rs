//! Resource Type Registry: the fixed type -> display metadata table.
//!
//! Every type tag ever stored in a resource must resolve here; tags
//! outside the closed set resolve to the unknown-bucket entry so
//! rendering fails soft instead of crashing. Adding a resource type is a
//! single-point change: extend [`ResourceType`] and this table.

use super::model::ResourceType;

/// How a section renders resources of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionBehavior {
    /// Grouped into collapsible per-unit sections (notes).
    UnitGrouped,
    /// One column per exam in the CIE grid.
    ExamColumn,
    /// A single flat list (SEE papers).
    FlatList,
    /// The books / question-bank shelf.
    BookShelf,
}

/// Display metadata for one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Human-readable label.
    pub label: &'static str,
    /// Icon identifier for the rendering layer.
    pub icon: &'static str,
    /// Which section shape renders this type.
    pub behavior: SectionBehavior,
}

/// Fallback entry for tags outside the closed set.
pub const UNKNOWN_TYPE_INFO: TypeInfo = TypeInfo {
    label: "Other",
    icon: "file",
    behavior: SectionBehavior::FlatList,
};

/// Returns display metadata for a parsed resource type. Total over the enum.
#[must_use]
pub fn type_info(resource_type: ResourceType) -> TypeInfo {
    match resource_type {
        ResourceType::Notes => TypeInfo {
            label: "Notes",
            icon: "book-open",
            behavior: SectionBehavior::UnitGrouped,
        },
        ResourceType::Cie1 => TypeInfo {
            label: "CIE-1 Question Papers",
            icon: "file-check",
            behavior: SectionBehavior::ExamColumn,
        },
        ResourceType::Cie2 => TypeInfo {
            label: "CIE-2 Question Papers",
            icon: "file-check",
            behavior: SectionBehavior::ExamColumn,
        },
        ResourceType::Cie3 => TypeInfo {
            label: "CIE-3 Question Papers",
            icon: "file-check",
            behavior: SectionBehavior::ExamColumn,
        },
        ResourceType::See => TypeInfo {
            label: "SEE Papers",
            icon: "graduation-cap",
            behavior: SectionBehavior::FlatList,
        },
        ResourceType::Book => TypeInfo {
            label: "Books",
            icon: "library",
            behavior: SectionBehavior::BookShelf,
        },
    }
}

/// Returns display metadata for a raw type tag, falling back to the
/// unknown bucket for unrecognized tags.
#[must_use]
pub fn type_info_for_tag(tag: &str) -> TypeInfo {
    tag.parse::<ResourceType>()
        .map_or(UNKNOWN_TYPE_INFO, type_info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_nonempty_metadata() {
        for variant in ResourceType::ALL {
            let info = type_info(variant);
            assert!(!info.label.is_empty(), "label for {variant}");
            assert!(!info.icon.is_empty(), "icon for {variant}");
        }
    }

    #[test]
    fn test_notes_are_unit_grouped() {
        assert_eq!(
            type_info(ResourceType::Notes).behavior,
            SectionBehavior::UnitGrouped
        );
    }

    #[test]
    fn test_cie_types_share_exam_column_behavior() {
        for exam in [ResourceType::Cie1, ResourceType::Cie2, ResourceType::Cie3] {
            assert_eq!(type_info(exam).behavior, SectionBehavior::ExamColumn);
        }
    }

    #[test]
    fn test_tag_lookup_resolves_known_tags() {
        assert_eq!(type_info_for_tag("see").label, "SEE Papers");
        assert_eq!(type_info_for_tag("book").behavior, SectionBehavior::BookShelf);
    }

    #[test]
    fn test_tag_lookup_falls_back_for_unknown_tags() {
        let info = type_info_for_tag("flashcards");
        assert_eq!(info, UNKNOWN_TYPE_INFO);
        // Never panics, always renders something
        assert_eq!(info.label, "Other");
    }
}
