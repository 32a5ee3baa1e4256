use serde::Serialize;
use std::collections::BTreeMap;

use crate::code::CourseCode;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub code: CourseCode,
    /// Display title, kept verbatim from the source.
    pub title: String,
    /// Prerequisite codes in source order. Duplicates and codes absent from
    /// the catalog are kept as-is.
    pub prerequisites: Vec<CourseCode>,
}

impl Course {
    #[must_use]
    pub fn new(code: CourseCode, title: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            prerequisites: Vec::new(),
        }
    }

    /// Append a prerequisite from raw text. Codes that normalize to empty are
    /// dropped.
    pub fn add_prerequisite(&mut self, raw: &str) {
        let code = CourseCode::normalize(raw);
        if !code.is_empty() {
            self.prerequisites.push(code);
        }
    }
}

/// The loaded course set, keyed and iterated by ascending [`CourseCode`].
///
/// A catalog is built once per load and then only read; reloading replaces
/// it entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: BTreeMap<CourseCode, Course>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a course, returning the entry it replaced (last write wins).
    pub fn insert(&mut self, course: Course) -> Option<Course> {
        self.courses.insert(course.code.clone(), course)
    }

    #[must_use]
    pub fn get(&self, code: &CourseCode) -> Option<&Course> {
        self.courses.get(code)
    }

    #[must_use]
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.courses.contains_key(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &CourseCode> {
        self.courses.keys()
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for course in iter {
            catalog.insert(course);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> CourseCode {
        CourseCode::normalize(raw)
    }

    #[test]
    fn empty_prerequisites_are_dropped() {
        let mut course = Course::new(code("CSCI200"), "Data Structures");
        course.add_prerequisite(" csci101 ");
        course.add_prerequisite("  ");
        course.add_prerequisite("--");
        course.add_prerequisite("csci101");
        assert_eq!(course.prerequisites, vec![code("CSCI101"), code("CSCI101")]);
    }

    #[test]
    fn insert_replaces_existing_code() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(Course::new(code("A"), "Title1")).is_none());
        let replaced = catalog.insert(Course::new(code("a"), "Title2"));
        assert_eq!(replaced.map(|c| c.title), Some("Title1".to_string()));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&code("A")).map(|c| c.title.as_str()), Some("Title2"));
    }

    #[test]
    fn iteration_is_sorted_by_code() {
        let catalog: Catalog = ["MATH201", "CSCI300", "CSCI100"]
            .into_iter()
            .map(|raw| Course::new(code(raw), raw))
            .collect();
        let codes: Vec<&str> = catalog.codes().map(CourseCode::as_str).collect();
        assert_eq!(codes, vec!["CSCI100", "CSCI300", "MATH201"]);
    }
}
