//! Read-only queries over a loaded catalog.
//!
//! Listing and detail read the catalog directly. Only
//! [`recommended_order`] builds the dependency graph.

use serde::Serialize;

use crate::code::CourseCode;
use crate::error::ErrorCode;
use crate::graph::{DependencyGraph, diagnose, study_order};
use crate::model::{Catalog, Course};

/// Informational query outcomes. Neither is fatal to a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("no catalog loaded")]
    EmptyCatalog,

    #[error("course {query} was not found")]
    NotFound { query: String },
}

impl QueryError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyCatalog => ErrorCode::CatalogNotLoaded,
            Self::NotFound { .. } => ErrorCode::CourseNotFound,
        }
    }
}

/// Code and title of one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub code: CourseCode,
    pub title: String,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            title: course.title.clone(),
        }
    }
}

/// All courses in ascending code order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseListing {
    pub courses: Vec<CourseSummary>,
}

/// A prerequisite as shown in a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrerequisiteView {
    /// The prerequisite is in the catalog.
    Resolved { code: CourseCode, title: String },
    /// The prerequisite is not in the catalog; its title is unavailable.
    Dangling { code: CourseCode },
}

impl PrerequisiteView {
    #[must_use]
    pub const fn code(&self) -> &CourseCode {
        match self {
            Self::Resolved { code, .. } | Self::Dangling { code } => code,
        }
    }

    #[must_use]
    pub const fn is_dangling(&self) -> bool {
        matches!(self, Self::Dangling { .. })
    }
}

/// One course with its prerequisites resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    pub code: CourseCode,
    pub title: String,
    pub prerequisites: Vec<PrerequisiteView>,
}

/// Recommended study order with course titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReport {
    pub steps: Vec<CourseSummary>,
    pub complete: bool,
    /// Cycles keeping courses out of `steps`. Empty when `complete`.
    pub cycles: Vec<Vec<CourseCode>>,
    /// Courses waiting on a cycle without being part of one.
    pub blocked: Vec<CourseCode>,
    /// Present only when a cycle kept the order from completing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<OrderWarning>,
}

/// The cycle warning attached to an incomplete order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderWarning {
    pub message: &'static str,
    pub error_code: &'static str,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl From<ErrorCode> for OrderWarning {
    fn from(code: ErrorCode) -> Self {
        Self {
            message: code.message(),
            error_code: code.tag(),
            code: code.code(),
            hint: code.hint(),
        }
    }
}

/// List every course by ascending code.
///
/// # Errors
///
/// Returns [`QueryError::EmptyCatalog`] when nothing is loaded.
pub fn sorted_listing(catalog: &Catalog) -> Result<CourseListing, QueryError> {
    ensure_loaded(catalog)?;
    Ok(CourseListing {
        courses: catalog.iter().map(CourseSummary::from).collect(),
    })
}

/// Look up one course by raw (un-normalized) query text.
///
/// # Errors
///
/// Returns [`QueryError::EmptyCatalog`] when nothing is loaded and
/// [`QueryError::NotFound`] on a miss.
pub fn course_detail(catalog: &Catalog, query: &str) -> Result<CourseDetail, QueryError> {
    ensure_loaded(catalog)?;

    let key = CourseCode::normalize(query);
    let course = catalog.get(&key).ok_or_else(|| QueryError::NotFound {
        query: query.trim().to_string(),
    })?;

    let prerequisites = course
        .prerequisites
        .iter()
        .map(|code| match catalog.get(code) {
            Some(found) => PrerequisiteView::Resolved {
                code: code.clone(),
                title: found.title.clone(),
            },
            None => PrerequisiteView::Dangling { code: code.clone() },
        })
        .collect();

    Ok(CourseDetail {
        code: course.code.clone(),
        title: course.title.clone(),
        prerequisites,
    })
}

/// Compute the recommended study order.
///
/// A cycle is not an error: the partial order comes back with
/// `complete == false` and the offending cycles named.
///
/// # Errors
///
/// Returns [`QueryError::EmptyCatalog`] when nothing is loaded.
pub fn recommended_order(catalog: &Catalog) -> Result<OrderReport, QueryError> {
    ensure_loaded(catalog)?;

    let graph = DependencyGraph::from_catalog(catalog);
    let order = study_order(&graph);
    let diagnosis = diagnose(&graph, &order);

    let steps = order
        .order
        .iter()
        .filter_map(|code| catalog.get(code))
        .map(CourseSummary::from)
        .collect();

    let complete = order.is_complete();
    Ok(OrderReport {
        steps,
        complete,
        cycles: diagnosis.cycles,
        blocked: diagnosis.blocked,
        warning: (!complete).then(|| OrderWarning::from(ErrorCode::CycleDetected)),
    })
}

fn ensure_loaded(catalog: &Catalog) -> Result<(), QueryError> {
    if catalog.is_empty() {
        Err(QueryError::EmptyCatalog)
    } else {
        Ok(())
    }
}
