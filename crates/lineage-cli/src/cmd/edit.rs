//! `lin edit` — replace a person's descriptive details.

use clap::Args;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::cmd::DetailArgs;
use crate::output::{OutputMode, fail, render_json};
use lineage_core::{PersonId, load_from_path, save_to_path};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Id of the person to edit (see `lin show`).
    pub target: usize,

    #[command(flatten)]
    pub details: DetailArgs,
}

#[derive(Debug, Serialize)]
struct EditResult {
    id: usize,
    name: String,
}

/// Execute `lin edit`.
///
/// Gender and relationships are fixed at creation; only the descriptive
/// fields change. The whole detail set is replaced at once, so every
/// field must be supplied and must validate.
///
/// # Errors
///
/// Any field validation rejection, an unknown id, or a load/save failure.
pub fn run_edit(args: &EditArgs, output: OutputMode, path: &Path) -> anyhow::Result<()> {
    let mut tree = match load_from_path(path) {
        Ok(tree) => tree,
        Err(e) => return Err(fail(output, &e)),
    };

    let target = PersonId::new(args.target);
    if let Err(e) = tree.edit_details(target, &args.details.to_input()) {
        return Err(fail(output, &e));
    }

    if let Err(e) = save_to_path(&tree, path) {
        return Err(fail(output, &e));
    }

    let name = tree.person(target)?.full_name();
    info!(%target, "details updated");

    if output.is_json() {
        render_json(&EditResult {
            id: args.target,
            name,
        })
    } else {
        println!("Updated {name} [{target}]");
        Ok(())
    }
}
