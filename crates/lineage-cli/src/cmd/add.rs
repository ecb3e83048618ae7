//! `lin add` — attach a new relative to an existing person.

use clap::Args;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::cmd::{PersonArgs, RelationArg};
use crate::output::{OutputMode, fail, render_json};
use lineage_core::{PersonId, Relation, load_from_path, save_to_path};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Id of the person the new relative attaches to (see `lin show`).
    pub target: usize,

    /// Kind of relative to add.
    #[arg(long, value_enum)]
    pub relation: RelationArg,

    #[command(flatten)]
    pub person: PersonArgs,
}

#[derive(Debug, Serialize)]
struct AddResult {
    id: usize,
    name: String,
    role: String,
    target: usize,
}

/// Execute `lin add`.
///
/// Loads the tree, validates and applies the addition, and saves it back.
/// Rejections leave the file untouched.
///
/// # Errors
///
/// Any validation rejection from the core, or a load/save failure.
pub fn run_add(args: &AddArgs, output: OutputMode, path: &Path) -> anyhow::Result<()> {
    let mut tree = match load_from_path(path) {
        Ok(tree) => tree,
        Err(e) => return Err(fail(output, &e)),
    };

    let target = PersonId::new(args.target);
    let relation = Relation::from(args.relation);
    let id = match tree.add_relative(target, relation, &args.person.to_input()) {
        Ok(id) => id,
        Err(e) => return Err(fail(output, &e)),
    };

    if let Err(e) = save_to_path(&tree, path) {
        return Err(fail(output, &e));
    }

    let person = tree.person(id)?;
    let name = person.full_name();
    let role = person.role.to_string();
    info!(%id, %relation, target = %target, "relative added");

    if output.is_json() {
        render_json(&AddResult {
            id: id.index(),
            name,
            role,
            target: args.target,
        })
    } else {
        println!("Added {name} [{id}] as {role}");
        Ok(())
    }
}
