//! `cplan order` — recommended study order.
//!
//! A prerequisite cycle does not fail the command: the partial order is
//! printed followed by a warning naming the cycles.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use courseplan_core::CourseCode;
use courseplan_core::config::EffectiveConfig;
use courseplan_core::report::{self, OrderReport};

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Catalog file to load. Defaults to `[catalog] path` in courseplan.toml.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Execute `cplan order`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, is empty, or output fails.
pub fn run_order(
    args: &OrderArgs,
    output: OutputMode,
    project_root: &Path,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let catalog = super::load_catalog(args.file.as_deref(), output, project_root, config)?;
    match report::recommended_order(&catalog) {
        Ok(order) => render(output, &order, write_order),
        Err(err) => super::fail_query(output, &err),
    }
}

/// Human rendering shared with the menu.
pub fn write_order(order: &OrderReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "Recommended Course Order:")?;
    for (i, step) in order.steps.iter().enumerate() {
        writeln!(w, "{}. {} - {}", i + 1, step.code, step.title)?;
    }

    if !order.complete {
        writeln!(w)?;
        writeln!(w, "Warning: Circular dependency detected.")?;
        for cycle in &order.cycles {
            writeln!(w, "  cycle: {}", join_codes(cycle))?;
        }
        if !order.blocked.is_empty() {
            writeln!(w, "  blocked by a cycle: {}", join_codes(&order.blocked))?;
        }
        if let Some(hint) = order.warning.as_ref().and_then(|warning| warning.hint) {
            writeln!(w, "  hint: {hint}")?;
        }
    }
    Ok(())
}

fn join_codes(codes: &[CourseCode]) -> String {
    codes
        .iter()
        .map(CourseCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
