//! Semester resolution for raw payload items.
//!
//! Chain, first hit wins:
//! 1. nested semester object (`semester_record`, `semesterRecord`, or
//!    `semester` when it is an object) carrying an `id`: the calendar entry
//!    with that id, else the nested object itself when it names a semester;
//! 2. `semester_id` / `semesterId` matched against the calendar;
//! 3. a free-text name (`semester_name`, `semesterName`, `semester` when it
//!    is a string, then the nested object's names) matched case-insensitively
//!    against either calendar name, alone or followed by the academic year;
//! 4. the unresolved bucket, keeping the first raw label and unmatched id.
//!
//! The calendar used for a batch is first extended with the named nested
//! semester objects whose id the fetched calendar lacks, so a bare
//! `semester_id` still finds them when the calendar fetch came back empty.

use std::cmp::Ordering;

use serde_json::Value;

use super::fields::{as_id, first_text, lookup};
use crate::core::models::{Semester, SemesterRef};

const NESTED: &[&str] = &["semester_record", "semesterRecord", "semester"];
const ID_REFS: &[&str] = &["semester_id", "semesterId"];
const NAME_REFS: &[&str] = &["semester_name", "semesterName", "semester"];
const NESTED_NAMES: &[&str] = &["name_en", "nameEn", "name", "name_ar", "nameAr"];

/// Read a semester object leniently.
///
/// Returns `None` for non-objects and for objects with neither an id nor a
/// name.
#[must_use]
pub fn semester_from_value(value: &Value) -> Option<Semester> {
    if !value.is_object() {
        return None;
    }
    let id = lookup(value, "id").and_then(as_id);
    let name_en = first_text(value, &["name_en", "nameEn", "name"]).unwrap_or_default();
    let name_ar = first_text(value, &["name_ar", "nameAr"]).unwrap_or_default();
    if id.is_none() && name_en.is_empty() && name_ar.is_empty() {
        return None;
    }
    let academic_year = first_text(value, &["academic_year", "academicYear"]).unwrap_or_default();
    let mut semester = Semester::new(id, name_en, name_ar, academic_year);
    semester.is_current = ["is_current", "isCurrent"]
        .iter()
        .find_map(|key| lookup(value, key).and_then(Value::as_bool))
        .unwrap_or(false);
    Some(semester)
}

/// Total order for choosing among competing calendar entries.
///
/// The later [`SemesterKey`](crate::core::SemesterKey) wins; remaining ties
/// prefer the smaller identity, then the smaller names and year.
#[must_use]
pub fn pick_order(a: &Semester, b: &Semester) -> Ordering {
    a.sort_key()
        .cmp(&b.sort_key())
        .then_with(|| b.identity_key().cmp(&a.identity_key()))
        .then_with(|| b.name_en.cmp(&a.name_en))
        .then_with(|| b.name_ar.cmp(&a.name_ar))
        .then_with(|| b.academic_year.cmp(&a.academic_year))
        .then_with(|| b.is_current.cmp(&a.is_current))
}

/// Extend a calendar with the nested semester objects found in `items`.
///
/// Only objects carrying both an id and a name, with an id absent from
/// `calendar`, are added. When several objects share an id the
/// [`pick_order`] maximum is kept.
#[must_use]
pub fn extend_calendar<'v>(
    calendar: &[Semester],
    items: impl IntoIterator<Item = &'v Value>,
) -> Vec<Semester> {
    let mut discovered: Vec<Semester> = items
        .into_iter()
        .filter_map(nested_semester)
        .filter_map(semester_from_value)
        .filter(|s| !s.name().trim().is_empty())
        .filter(|s| s.id.is_some_and(|id| !calendar.iter().any(|c| c.id == Some(id))))
        .collect();
    discovered.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| pick_order(b, a)));
    discovered.dedup_by_key(|s| s.id);

    calendar.iter().cloned().chain(discovered).collect()
}

fn nested_semester(item: &Value) -> Option<&Value> {
    NESTED
        .iter()
        .find_map(|key| lookup(item, key).filter(|v| v.is_object()))
}

/// Resolves raw items against the semester calendar
#[derive(Debug, Clone, Copy)]
pub struct SemesterResolver<'a> {
    calendar: &'a [Semester],
}

impl<'a> SemesterResolver<'a> {
    /// Create a resolver over a calendar
    #[must_use]
    pub const fn new(calendar: &'a [Semester]) -> Self {
        Self { calendar }
    }

    /// Resolve the semester of one raw item. Never fails.
    #[must_use]
    pub fn resolve(&self, item: &Value) -> SemesterRef {
        let nested = nested_semester(item);
        let mut unmatched_id = None;

        if let Some(nested) = nested {
            if let Some(id) = lookup(nested, "id").and_then(as_id) {
                if let Some(semester) = self.by_id(id) {
                    return SemesterRef::Resolved(semester.clone());
                }
                let named = semester_from_value(nested).filter(|s| !s.name().trim().is_empty());
                if let Some(semester) = named {
                    return SemesterRef::Resolved(semester);
                }
                unmatched_id = Some(id);
            }
        }

        if let Some(id) = ID_REFS.iter().find_map(|key| lookup(item, key).and_then(as_id)) {
            if let Some(semester) = self.by_id(id) {
                return SemesterRef::Resolved(semester.clone());
            }
            unmatched_id.get_or_insert(id);
        }

        let labels = Self::labels(item, nested);
        if let Some(semester) = labels.iter().find_map(|label| self.by_label(label)) {
            return SemesterRef::Resolved(semester.clone());
        }

        SemesterRef::Unresolved {
            label: labels.into_iter().next(),
            reference_id: unmatched_id,
        }
    }

    fn by_id(&self, id: u64) -> Option<&'a Semester> {
        self.calendar
            .iter()
            .filter(|s| s.id == Some(id))
            .max_by(|a, b| pick_order(a, b))
    }

    /// Calendar entry a free-text label resolves to, chosen by [`pick_order`]
    #[must_use]
    pub fn by_label(&self, label: &str) -> Option<&'a Semester> {
        self.calendar
            .iter()
            .filter(|s| s.matches_label(label))
            .max_by(|a, b| pick_order(a, b))
    }

    fn labels(item: &Value, nested: Option<&Value>) -> Vec<String> {
        let mut labels: Vec<String> = NAME_REFS
            .iter()
            .filter_map(|key| {
                lookup(item, key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect();
        if let Some(nested) = nested {
            labels.extend(NESTED_NAMES.iter().filter_map(|key| first_text(nested, &[*key])));
        }
        labels
    }
}
