//! `lin new` — start a tree file with its root person.

use clap::Args;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::cmd::PersonArgs;
use crate::output::{OutputMode, fail, render_json};
use lineage_core::{FamilyTree, save_to_path};

#[derive(Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub person: PersonArgs,

    /// Overwrite an existing tree file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct NewResult {
    id: usize,
    name: String,
    file: String,
}

/// Execute `lin new`.
///
/// # Errors
///
/// Fails when the file already exists without `--force`, on field
/// validation errors, or when the file cannot be written.
pub fn run_new(args: &NewArgs, output: OutputMode, path: &Path) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    let mut tree = FamilyTree::new();
    let root = match tree.add_root(&args.person.to_input()) {
        Ok(id) => id,
        Err(e) => return Err(fail(output, &e)),
    };

    if let Err(e) = save_to_path(&tree, path) {
        return Err(fail(output, &e));
    }

    let name = tree.person(root).map(lineage_core::Person::full_name)?;
    info!(%root, file = %path.display(), "tree created");

    if output.is_json() {
        render_json(&NewResult {
            id: root.index(),
            name,
            file: path.display().to_string(),
        })
    } else {
        println!("Created {} with root person {name} [{root}]", path.display());
        Ok(())
    }
}
