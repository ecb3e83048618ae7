//! `lin info` — everything known about one person.

use clap::Args;
use serde::Serialize;
use std::io;
use std::path::Path;

use crate::output::{OutputMode, fail, pretty_kv, pretty_section, render_json};
use lineage_core::{FamilyTree, PersonId, load_from_path, selectable_relations};

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Id of the person to describe (see `lin show`).
    pub target: usize,
}

#[derive(Debug, Serialize)]
struct InfoResult {
    id: usize,
    name: String,
    gender: String,
    role: String,
    life_description: String,
    address: String,
    father: Option<String>,
    mother: Option<String>,
    spouse: Option<String>,
    children: Vec<String>,
    grandchildren: Vec<String>,
    addable_relations: Vec<String>,
}

/// Execute `lin info`.
///
/// # Errors
///
/// A load failure or an unknown id.
pub fn run_info(args: &InfoArgs, output: OutputMode, path: &Path) -> anyhow::Result<()> {
    let tree = match load_from_path(path) {
        Ok(tree) => tree,
        Err(e) => return Err(fail(output, &e)),
    };

    let target = PersonId::new(args.target);
    let result = match collect(&tree, target) {
        Ok(result) => result,
        Err(e) => return Err(fail(output, &e)),
    };

    if output.is_json() {
        return render_json(&result);
    }

    let stdout = io::stdout();
    let mut w = stdout.lock();
    pretty_section(&mut w, &result.name)?;
    pretty_kv(&mut w, "Id", result.id.to_string())?;
    pretty_kv(&mut w, "Gender", &result.gender)?;
    pretty_kv(&mut w, "Role", &result.role)?;
    if !result.life_description.is_empty() {
        pretty_kv(&mut w, "Life description", &result.life_description)?;
    }
    pretty_kv(&mut w, "Address", &result.address)?;

    pretty_section(&mut w, "Relatives")?;
    pretty_kv(&mut w, "Father", result.father.as_deref().unwrap_or("-"))?;
    pretty_kv(&mut w, "Mother", result.mother.as_deref().unwrap_or("-"))?;
    pretty_kv(&mut w, "Spouse", result.spouse.as_deref().unwrap_or("-"))?;
    pretty_kv(&mut w, "Children", join_or_dash(&result.children))?;
    pretty_kv(&mut w, "Grandchildren", join_or_dash(&result.grandchildren))?;
    pretty_kv(
        &mut w,
        "Can add",
        join_or_dash(&result.addable_relations),
    )?;
    Ok(())
}

fn collect(tree: &FamilyTree, target: PersonId) -> Result<InfoResult, lineage_core::TreeError> {
    let person = tree.person(target)?;
    let summary = tree.relative_summary(target)?;
    let name_of = |id: PersonId| -> Result<String, lineage_core::TreeError> {
        Ok(tree.person(id)?.full_name())
    };

    let address = format!(
        "{} {}, {} {}",
        person.details.street_number,
        person.details.street_name,
        person.details.suburb,
        person.details.postcode
    );

    Ok(InfoResult {
        id: target.index(),
        name: person.full_name(),
        gender: person.gender.to_string(),
        role: person.role.to_string(),
        life_description: person.details.life_description.clone(),
        address,
        father: summary.father.map(name_of).transpose()?,
        mother: summary.mother.map(name_of).transpose()?,
        spouse: summary.spouse.map(name_of).transpose()?,
        children: summary
            .children
            .iter()
            .map(|&id| name_of(id))
            .collect::<Result<_, _>>()?,
        grandchildren: summary
            .grandchildren
            .iter()
            .map(|&id| name_of(id))
            .collect::<Result<_, _>>()?,
        addable_relations: selectable_relations(person.role)
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_owned()
    } else {
        items.join(", ")
    }
}
