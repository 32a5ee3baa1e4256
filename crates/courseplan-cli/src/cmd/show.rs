//! `cplan show` — one course with its prerequisites.
//!
//! Prerequisites found in the catalog are shown with their titles; dangling
//! ones are shown by code with a "title unavailable" marker.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use courseplan_core::config::EffectiveConfig;
use courseplan_core::report::{self, CourseDetail, PrerequisiteView};

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Course code to look up. Case, spaces, and punctuation are ignored.
    pub code: String,

    /// Catalog file to load. Defaults to `[catalog] path` in courseplan.toml.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Execute `cplan show <code>`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the course is missing,
/// or output fails.
pub fn run_show(
    args: &ShowArgs,
    output: OutputMode,
    project_root: &Path,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let catalog = super::load_catalog(args.file.as_deref(), output, project_root, config)?;
    match report::course_detail(&catalog, &args.code) {
        Ok(detail) => render(output, &detail, write_detail),
        Err(err) => super::fail_query(output, &err),
    }
}

/// Human rendering shared with the menu.
pub fn write_detail(detail: &CourseDetail, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}, {}", detail.code, detail.title)?;
    if detail.prerequisites.is_empty() {
        return writeln!(w, "Prerequisites: None");
    }

    write!(w, "Prerequisites: ")?;
    for (i, prereq) in detail.prerequisites.iter().enumerate() {
        if i > 0 {
            write!(w, "; ")?;
        }
        match prereq {
            PrerequisiteView::Resolved { code, title } => write!(w, "{code}, {title}")?,
            PrerequisiteView::Dangling { code } => write!(w, "{code} (title unavailable)")?,
        }
    }
    writeln!(w)
}
