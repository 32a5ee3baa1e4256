//! Interactive numbered menu.
//!
//! The loaded catalog lives in a [`Session`] owned by the menu loop. A load
//! builds a fresh catalog and swaps it in only when the file could be read,
//! so a failed load leaves the previous catalog active. Every outcome other
//! than `9` (or end of input) returns to the menu.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use courseplan_core::config::EffectiveConfig;
use courseplan_core::store::probe_store;
use courseplan_core::{Catalog, LoadError, LoadWarning, load_catalog_file, report};
use tracing::{debug, info};

use super::{list, order, query_message, show, store};

const MENU: &str = "\nMenu Options:
  1. Load Data Structure
  2. Print Course List
  3. Print Course Details
  4. Print Recommended Course Order
  5. Test Database Connection (SQLite)
  9. Exit
";

#[derive(Args, Debug, Default)]
pub struct MenuArgs {
    /// Catalog file to load before showing the menu.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    List,
    Detail,
    Order,
    CheckStore,
    Exit,
}

impl MenuChoice {
    /// Parse a trimmed selection. Only plain digit strings are accepted.
    pub fn parse(input: &str) -> Option<Self> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match input.parse::<u32>().ok()? {
            1 => Some(Self::Load),
            2 => Some(Self::List),
            3 => Some(Self::Detail),
            4 => Some(Self::Order),
            5 => Some(Self::CheckStore),
            9 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Menu state: the current catalog and where it came from.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    source: Option<PathBuf>,
    project_root: PathBuf,
    config: EffectiveConfig,
}

impl Session {
    pub fn new(project_root: PathBuf, config: EffectiveConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            source: None,
            project_root,
            config,
        }
    }

    #[cfg(test)]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[cfg(test)]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Load `path` and replace the catalog on success.
    ///
    /// # Errors
    ///
    /// Returns the load error and leaves the current catalog untouched.
    pub fn load(&mut self, path: &Path) -> Result<Vec<LoadWarning>, LoadError> {
        let loaded = load_catalog_file(path)?;
        if let Some(previous) = &self.source {
            debug!(previous = %previous.display(), "replacing catalog");
        }
        info!(path = %path.display(), courses = loaded.course_count(), "catalog loaded");
        self.catalog = loaded.catalog;
        self.source = Some(path.to_path_buf());
        Ok(loaded.warnings)
    }

    /// Run the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "Welcome to the course planner.")?;

        loop {
            write!(out, "{MENU}What would you like to do? ")?;
            out.flush()?;

            let Some(line) = read_line(&mut input)? else {
                writeln!(out)?;
                break;
            };
            let selection = line.trim();

            match MenuChoice::parse(selection) {
                Some(MenuChoice::Exit) => {
                    writeln!(out, "Thank you for using the course planner!")?;
                    break;
                }
                Some(choice) => {
                    debug!(?choice, "menu selection");
                    self.dispatch(choice, &mut input, out)?;
                }
                None => {
                    let shown = if selection.is_empty() { "(empty)" } else { selection };
                    writeln!(out, "{shown} is not a valid option.")?;
                }
            }
        }

        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        match choice {
            MenuChoice::Load => {
                write!(out, "Enter the name of the data file (e.g., courses.csv): ")?;
                out.flush()?;
                let name = read_line(input)?.unwrap_or_default();
                let name = name.trim();
                let explicit = (!name.is_empty()).then(|| Path::new(name));
                match self.config.catalog_path(&self.project_root, explicit) {
                    Some(path) => self.load_and_report(&path, out),
                    None => writeln!(out, "No file name provided."),
                }
            }
            MenuChoice::List => match report::sorted_listing(&self.catalog) {
                Ok(listing) => list::write_listing(&listing, out),
                Err(err) => writeln!(out, "{}", query_message(&err)),
            },
            MenuChoice::Detail => {
                if self.catalog.is_empty() {
                    return writeln!(out, "{}", super::EMPTY_CATALOG_MESSAGE);
                }
                write!(out, "What course do you want to know about? ")?;
                out.flush()?;
                let query = read_line(input)?.unwrap_or_default();
                match report::course_detail(&self.catalog, &query) {
                    Ok(detail) => show::write_detail(&detail, out),
                    Err(err) => writeln!(out, "{}", query_message(&err)),
                }
            }
            MenuChoice::Order => match report::recommended_order(&self.catalog) {
                Ok(report) => order::write_order(&report, out),
                Err(err) => writeln!(out, "{}", query_message(&err)),
            },
            MenuChoice::CheckStore => {
                match probe_store(&self.config.store_path(&self.project_root)) {
                    Ok(status) => store::write_store_status(&status, out),
                    Err(err) => writeln!(out, "Failed to connect to SQLite database: {err}"),
                }
            }
            MenuChoice::Exit => Ok(()),
        }
    }

    /// Load `path` and describe the outcome on `out`.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing fails.
    pub fn load_and_report<W: Write>(&mut self, path: &Path, out: &mut W) -> io::Result<()> {
        match self.load(path) {
            Ok(warnings) => {
                for warning in &warnings {
                    writeln!(out, "Warning: {warning}")?;
                }
                writeln!(
                    out,
                    "Loaded {} course(s) from \"{}\".",
                    self.catalog.len(),
                    path.display()
                )
            }
            Err(LoadError::Open { .. }) => {
                writeln!(out, "Error: Could not open \"{}\".", path.display())
            }
            Err(err) => writeln!(out, "Error: {err}"),
        }
    }
}

/// Execute `cplan menu` (also the default with no subcommand).
///
/// # Errors
///
/// Returns an error if terminal I/O fails.
pub fn run_menu(args: &MenuArgs, project_root: &Path, config: EffectiveConfig) -> anyhow::Result<()> {
    let mut session = Session::new(project_root.to_path_buf(), config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(file) = &args.file {
        session.load_and_report(&project_root.join(file), &mut out)?;
    }

    session.run(stdin.lock(), &mut out)?;
    Ok(())
}

/// Read one line, decoding invalid UTF-8 lossily. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
