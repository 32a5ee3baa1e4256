//! `cplan list` — every course in ascending code order.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use courseplan_core::config::EffectiveConfig;
use courseplan_core::report::{self, CourseListing};

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Catalog file to load. Defaults to `[catalog] path` in courseplan.toml.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Execute `cplan list`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, is empty, or output fails.
pub fn run_list(
    args: &ListArgs,
    output: OutputMode,
    project_root: &Path,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let catalog = super::load_catalog(args.file.as_deref(), output, project_root, config)?;
    match report::sorted_listing(&catalog) {
        Ok(listing) => render(output, &listing, write_listing),
        Err(err) => super::fail_query(output, &err),
    }
}

/// Human rendering shared with the menu.
pub fn write_listing(listing: &CourseListing, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "Course List:")?;
    for course in &listing.courses {
        writeln!(w, "{}, {}", course.code, course.title)?;
    }
    Ok(())
}
