//! Catalog Aggregator: pure grouping of a subject's flat resource list
//! into the sections a page renders.
//!
//! Every operation here is a pure transformation over already-fetched
//! records; no queries, no side effects. Empty groups are kept in the
//! output so the rendering layer shows an explicit empty state instead
//! of hiding the section.

use super::model::{Resource, ResourceType, Subject, Unit};
use super::registry::{self, TypeInfo};

/// Subject-name substrings that select the "Question Bank" books label.
/// A naming heuristic, not a taxonomy; kept behind [`book_section_label`]
/// so an explicit subject attribute can replace it in one place.
const MATH_KEYWORDS: [&str; 3] = ["math", "maths", "mathematics"];

/// Exam-paper subtypes accepted by [`exam_papers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamKind {
    /// First Continuous Internal Evaluation.
    Cie1,
    /// Second Continuous Internal Evaluation.
    Cie2,
    /// Third Continuous Internal Evaluation.
    Cie3,
    /// Semester End Examination.
    See,
}

impl ExamKind {
    /// The CIE exams, in display order.
    pub const CIES: [Self; 3] = [Self::Cie1, Self::Cie2, Self::Cie3];

    /// Maps the exam to its resource type tag.
    #[must_use]
    pub fn resource_type(self) -> ResourceType {
        match self {
            Self::Cie1 => ResourceType::Cie1,
            Self::Cie2 => ResourceType::Cie2,
            Self::Cie3 => ResourceType::Cie3,
            Self::See => ResourceType::See,
        }
    }

    /// Registry metadata for this exam's section.
    #[must_use]
    pub fn info(self) -> TypeInfo {
        registry::type_info(self.resource_type())
    }
}

/// Filters notes belonging to one unit.
///
/// Matches `type = "notes"` and `unit = "Unit {unit_number}"` exactly.
/// The result is always a (possibly empty) subset of the input.
#[must_use]
pub fn notes_for_unit(resources: &[Resource], unit_number: i64) -> Vec<&Resource> {
    let unit_label = format!("Unit {unit_number}");
    resources
        .iter()
        .filter(|r| r.is_type(ResourceType::Notes) && r.unit.as_deref() == Some(&unit_label))
        .collect()
}

/// Filters papers of one exam subtype by exact type equality.
#[must_use]
pub fn exam_papers(resources: &[Resource], exam: ExamKind) -> Vec<&Resource> {
    resources
        .iter()
        .filter(|r| r.is_type(exam.resource_type()))
        .collect()
}

/// Filters book / question-bank resources.
#[must_use]
pub fn books(resources: &[Resource]) -> Vec<&Resource> {
    resources
        .iter()
        .filter(|r| r.is_type(ResourceType::Book))
        .collect()
}

/// Resolves a unit's syllabus name, falling back to the literal
/// `"Unit {n}"` when the subject has no such unit row.
#[must_use]
pub fn resolve_unit_name(units: &[Unit], unit_number: i64) -> String {
    units
        .iter()
        .find(|u| u.unit_number == unit_number)
        .map_or_else(|| format!("Unit {unit_number}"), |u| u.unit_name.clone())
}

/// Whether the subject has any syllabus units.
///
/// Drives the structural branch between the unit-wise layout and the
/// flat fallback layout.
#[must_use]
pub fn has_units(units: &[Unit]) -> bool {
    !units.is_empty()
}

/// Case-insensitive substring match against the mathematics keywords.
///
/// Display-only: selects the "Question Bank" label for the books section.
#[must_use]
pub fn is_mathematics_subject(subject_name: &str) -> bool {
    let lowered = subject_name.to_lowercase();
    MATH_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Label for the books section of a subject.
#[must_use]
pub fn book_section_label(subject_name: &str) -> &'static str {
    if is_mathematics_subject(subject_name) {
        "Question Bank"
    } else {
        "Reference Books"
    }
}

/// One collapsible unit section of the unit-wise layout.
#[derive(Debug, Clone)]
pub struct UnitSection {
    /// Unit number from the units table.
    pub unit_number: i64,
    /// Resolved syllabus name (or the `"Unit {n}"` fallback).
    pub title: String,
    /// Notes filtered into this unit; may be empty (explicit empty state).
    pub notes: Vec<Resource>,
}

/// One exam column/list of the unit-wise layout.
#[derive(Debug, Clone)]
pub struct ExamSection {
    /// Which exam this section holds.
    pub exam: ExamKind,
    /// Registry label for the section heading.
    pub label: &'static str,
    /// Papers filtered into this exam; may be empty.
    pub papers: Vec<Resource>,
}

/// Structural branch of the subject page.
#[derive(Debug, Clone)]
pub enum SubjectLayout {
    /// Five-section layout for subjects with syllabus units.
    UnitWise {
        /// One section per unit the subject actually has, sorted by
        /// unit number (not a fixed 1-5 range).
        units: Vec<UnitSection>,
        /// CIE-1/2/3 columns, always all three.
        cie: Vec<ExamSection>,
        /// SEE papers list.
        see: ExamSection,
    },
    /// Flat fallback for subjects without units (e.g. final-semester
    /// electives): all notes-type resources in one list.
    Flat {
        /// Every notes-type resource for the subject.
        notes: Vec<Resource>,
    },
}

/// The fully aggregated subject page content.
#[derive(Debug, Clone)]
pub struct SubjectView {
    /// Unit-wise or flat, per [`has_units`].
    pub layout: SubjectLayout,
    /// Books section heading ("Question Bank" for mathematics subjects).
    pub books_label: &'static str,
    /// Book resources; may be empty.
    pub books: Vec<Resource>,
}

impl SubjectView {
    /// True when the view uses the unit-wise layout.
    #[must_use]
    pub fn is_unit_wise(&self) -> bool {
        matches!(self.layout, SubjectLayout::UnitWise { .. })
    }
}

/// Assembles the subject page view from already-fetched records.
///
/// Subjects with units get one section per distinct `unit_number`
/// present in the units table (sorted ascending), plus the CIE grid and
/// SEE list; subjects without units get the flat notes list. Books are
/// always appended, labeled per the subject-name heuristic.
#[must_use]
pub fn build_subject_view(subject: &Subject, units: &[Unit], resources: &[Resource]) -> SubjectView {
    let books_label = book_section_label(&subject.name);
    let books: Vec<Resource> = books(resources).into_iter().cloned().collect();

    let layout = if has_units(units) {
        let mut unit_numbers: Vec<i64> = units.iter().map(|u| u.unit_number).collect();
        unit_numbers.sort_unstable();
        unit_numbers.dedup();

        let unit_sections = unit_numbers
            .into_iter()
            .map(|unit_number| UnitSection {
                unit_number,
                title: resolve_unit_name(units, unit_number),
                notes: notes_for_unit(resources, unit_number)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();

        let cie = ExamKind::CIES
            .into_iter()
            .map(|exam| ExamSection {
                exam,
                label: exam.info().label,
                papers: exam_papers(resources, exam).into_iter().cloned().collect(),
            })
            .collect();

        let see = ExamSection {
            exam: ExamKind::See,
            label: ExamKind::See.info().label,
            papers: exam_papers(resources, ExamKind::See)
                .into_iter()
                .cloned()
                .collect(),
        };

        SubjectLayout::UnitWise {
            units: unit_sections,
            cie,
            see,
        }
    } else {
        SubjectLayout::Flat {
            notes: resources
                .iter()
                .filter(|r| r.is_type(ResourceType::Notes))
                .cloned()
                .collect(),
        }
    };

    SubjectView {
        layout,
        books_label,
        books,
    }
}
