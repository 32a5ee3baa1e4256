use std::fmt;

/// Machine-readable error codes surfaced in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    CatalogNotLoaded,
    CatalogReadFailed,
    CourseNotFound,
    CycleDetected,
    StoreOpenFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::CatalogNotLoaded => "E2001",
            Self::CatalogReadFailed => "E2002",
            Self::CourseNotFound => "E3001",
            Self::CycleDetected => "E3002",
            Self::StoreOpenFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::CatalogNotLoaded => "No catalog loaded",
            Self::CatalogReadFailed => "Catalog file could not be read",
            Self::CourseNotFound => "Course not found",
            Self::CycleDetected => "Circular prerequisite chain",
            Self::StoreOpenFailed => "Store could not be opened",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in courseplan.toml and retry."),
            Self::CatalogNotLoaded => Some("Load a catalog file first (menu option 1 or --file)."),
            Self::CatalogReadFailed => Some("Check the file path and read permissions."),
            Self::CourseNotFound => None,
            Self::CycleDetected => {
                Some("Remove one prerequisite link in each listed cycle to get a full order.")
            }
            Self::StoreOpenFailed => Some("Check that the store directory exists and is writable."),
        }
    }

    /// Snake-case tag used as `error_code` in CLI JSON errors.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ConfigParseError => "config_parse_error",
            Self::CatalogNotLoaded => "catalog_not_loaded",
            Self::CatalogReadFailed => "catalog_read_failed",
            Self::CourseNotFound => "course_not_found",
            Self::CycleDetected => "cycle_detected",
            Self::StoreOpenFailed => "store_open_failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
