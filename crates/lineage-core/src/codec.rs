//! Persistence boundary: the whole root-reachable graph as one opaque blob.
//!
//! The byte format is JSON over the arena representation, which preserves
//! shared-child-list identity between spouses structurally (both spouses
//! carry the same list id). Decoding re-verifies every structural invariant
//! before handing the tree back, so a tampered or truncated file surfaces
//! as [`TreeError::CorruptData`] instead of a malformed in-memory graph.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::TreeError;
use crate::model::{PersonId, Role};
use crate::tree::FamilyTree;

/// The single file extension convention the system recognizes.
pub const TREE_FILE_EXTENSION: &str = "dat";

/// Encode the tree as a persistent byte blob.
///
/// # Errors
///
/// Returns [`TreeError::NothingToSave`] for an empty (rootless) tree.
pub fn serialize(tree: &FamilyTree) -> Result<Vec<u8>, TreeError> {
    if tree.root().is_none() {
        return Err(TreeError::NothingToSave);
    }
    serde_json::to_vec_pretty(tree).map_err(|e| TreeError::CorruptData(e.to_string()))
}

/// Decode a byte blob back into a tree, verifying well-formedness.
///
/// # Errors
///
/// Returns [`TreeError::CorruptData`] if the bytes do not decode, or decode
/// to a graph that violates a structural invariant.
pub fn deserialize(bytes: &[u8]) -> Result<FamilyTree, TreeError> {
    let tree: FamilyTree =
        serde_json::from_slice(bytes).map_err(|e| TreeError::CorruptData(e.to_string()))?;
    verify_well_formed(&tree)?;
    Ok(tree)
}

/// Serialize the tree and write it to `path` in one blocking call.
///
/// # Errors
///
/// [`TreeError::NothingToSave`] for an empty tree, [`TreeError::Io`] if the
/// file cannot be written. The in-memory tree is unchanged either way.
pub fn save_to_path(tree: &FamilyTree, path: &Path) -> Result<(), TreeError> {
    let bytes = serialize(tree)?;
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), people = tree.person_count(), "tree saved");
    Ok(())
}

/// Read and decode a tree file in one blocking call.
///
/// # Errors
///
/// [`TreeError::Io`] if the file cannot be read, [`TreeError::CorruptData`]
/// if its contents do not form a valid tree.
pub fn load_from_path(path: &Path) -> Result<FamilyTree, TreeError> {
    let bytes = std::fs::read(path)?;
    let tree = deserialize(&bytes)?;
    info!(path = %path.display(), people = tree.person_count(), "tree loaded");
    Ok(tree)
}

fn corrupt(message: impl Into<String>) -> TreeError {
    TreeError::CorruptData(message.into())
}

/// Check every structural invariant of the decoded graph.
fn verify_well_formed(tree: &FamilyTree) -> Result<(), TreeError> {
    let Some(root) = tree.root else {
        return Err(corrupt("no root person"));
    };
    if root.index() >= tree.people.len() {
        return Err(corrupt(format!("root id {root} out of bounds")));
    }

    let roots = tree.people.iter().filter(|p| p.role == Role::Root).count();
    if roots != 1 || tree.people[root.index()].role != Role::Root {
        return Err(corrupt(format!("expected exactly one root person, found {roots}")));
    }

    // First pass: every handle must be in bounds before any link is
    // chased, so the cross-reference pass below can index freely.
    for (id, person) in tree.iter() {
        if person.children.index() >= tree.child_lists.len() {
            return Err(corrupt(format!("person {id} references a missing child list")));
        }
        if person.parents.len() > 2 {
            return Err(corrupt(format!("person {id} has more than two parents")));
        }
        for &parent in &person.parents {
            if parent.index() >= tree.people.len() {
                return Err(corrupt(format!("person {id} has out-of-bounds parent {parent}")));
            }
        }
        if let Some(spouse) = person.spouse {
            if spouse.index() >= tree.people.len() {
                return Err(corrupt(format!("person {id} has out-of-bounds spouse {spouse}")));
            }
        }
        for &child in tree.child_list(person.children) {
            if child.index() >= tree.people.len() {
                return Err(corrupt(format!("person {id} has out-of-bounds child {child}")));
            }
        }
    }

    // Second pass: link consistency across people.
    for (id, person) in tree.iter() {
        for &parent in &person.parents {
            let parent_person = &tree.people[parent.index()];
            if !tree.child_list(parent_person.children).contains(&id) {
                return Err(corrupt(format!(
                    "person {id} lists parent {parent}, who does not list them as a child"
                )));
            }
        }
        if let [a, b] = person.parents[..] {
            if tree.people[a.index()].gender == tree.people[b.index()].gender {
                return Err(corrupt(format!("person {id} has two parents of the same gender")));
            }
        }

        if let Some(spouse) = person.spouse {
            let other = &tree.people[spouse.index()];
            if other.spouse != Some(id) {
                return Err(corrupt(format!("spouse link {id} -> {spouse} is not symmetric")));
            }
            if other.gender == person.gender {
                return Err(corrupt(format!("couple {id}/{spouse} is not opposite-gender")));
            }
            if other.children != person.children {
                return Err(corrupt(format!(
                    "couple {id}/{spouse} does not share one child list"
                )));
            }
        }

        for &child in tree.child_list(person.children) {
            if !tree.people[child.index()].parents.contains(&id) {
                return Err(corrupt(format!(
                    "person {id} lists child {child}, who does not list them as a parent"
                )));
            }
        }

        // Only the root and persons who entered as a spouse or as a parent
        // of the root may lack recorded parents of their own.
        if person.role == Role::Child && person.parents.is_empty() {
            return Err(corrupt(format!("child {id} has no parents")));
        }
    }

    // Everything must be reachable from the root through parent, spouse
    // and child edges.
    let mut visited: HashSet<PersonId> = HashSet::new();
    let mut queue = vec![root];
    while let Some(id) = queue.pop() {
        if !visited.insert(id) {
            continue;
        }
        let person = &tree.people[id.index()];
        queue.extend(person.parents.iter().copied());
        queue.extend(person.spouse);
        queue.extend(tree.child_list(person.children).iter().copied());
    }
    if visited.len() != tree.people.len() {
        return Err(corrupt(format!(
            "{} of {} people are unreachable from the root",
            tree.people.len() - visited.len(),
            tree.people.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, PersonInput, Relation};

    fn family() -> FamilyTree {
        let mut tree = FamilyTree::new();
        let root = tree
            .add_root(&PersonInput::sample("Jane", "Doe", Gender::Female))
            .expect("root");
        tree.add_relative(
            root,
            Relation::Spouse,
            &PersonInput::sample("John", "Doe", Gender::Male),
        )
        .expect("spouse");
        tree.add_relative(
            root,
            Relation::Child,
            &PersonInput::sample("Amy", "Doe", Gender::Female),
        )
        .expect("child");
        tree
    }

    #[test]
    fn round_trip_reproduces_the_graph() {
        let tree = family();
        let bytes = serialize(&tree).expect("serialize");
        let decoded = deserialize(&bytes).expect("deserialize");
        assert_eq!(decoded, tree);
    }

    #[test]
    fn round_trip_keeps_shared_child_list_identity() {
        let tree = family();
        let decoded = deserialize(&serialize(&tree).expect("serialize")).expect("deserialize");

        let root = decoded.root().expect("root");
        let spouse = decoded.person(root).expect("root").spouse.expect("spouse");
        assert_eq!(
            decoded.person(root).expect("root").children,
            decoded.person(spouse).expect("spouse").children
        );
    }

    #[test]
    fn empty_tree_is_not_serializable() {
        let tree = FamilyTree::new();
        assert!(matches!(serialize(&tree).unwrap_err(), TreeError::NothingToSave));
    }

    #[test]
    fn garbage_bytes_are_corrupt_data() {
        let err = deserialize(b"not json at all").unwrap_err();
        assert!(matches!(err, TreeError::CorruptData(_)));
    }

    #[test]
    fn truncated_blob_is_corrupt_data() {
        let tree = family();
        let bytes = serialize(&tree).expect("serialize");
        let err = deserialize(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, TreeError::CorruptData(_)));
    }

    #[test]
    fn asymmetric_spouse_link_is_rejected() {
        let mut tree = family();
        let root = tree.root().expect("root");
        tree.people[root.index()].spouse = None; // break one direction

        let bytes = serde_json::to_vec(&tree).expect("encode");
        let err = deserialize(&bytes).unwrap_err();
        assert!(matches!(err, TreeError::CorruptData(_)));
    }

    #[test]
    fn split_child_list_between_spouses_is_rejected() {
        let mut tree = family();
        let root = tree.root().expect("root");
        let spouse = tree.people[root.index()].spouse.expect("spouse");
        let orphan = crate::model::ChildListId::new(tree.child_lists.len());
        tree.child_lists.push(Vec::new());
        tree.people[spouse.index()].children = orphan;

        let bytes = serde_json::to_vec(&tree).expect("encode");
        let err = deserialize(&bytes).unwrap_err();
        assert!(matches!(err, TreeError::CorruptData(_)));
    }

    #[test]
    fn parent_with_dangling_child_list_is_rejected() {
        let mut tree = family();
        let root = tree.root().expect("root");
        let father = tree
            .add_relative(
                root,
                Relation::Father,
                &PersonInput::sample("Tom", "Doe", Gender::Male),
            )
            .expect("father");
        // The root lists a parent whose own child-list id points nowhere.
        // The verifier must report this, not chase the dangling id.
        tree.people[father.index()].children = crate::model::ChildListId::new(99);

        let bytes = serde_json::to_vec(&tree).expect("encode");
        let err = deserialize(&bytes).unwrap_err();
        assert!(matches!(err, TreeError::CorruptData(_)));
    }

    #[test]
    fn unreachable_person_is_rejected() {
        let mut tree = family();
        // A person nothing points at.
        let stray_list = crate::model::ChildListId::new(tree.child_lists.len());
        tree.child_lists.push(Vec::new());
        tree.people.push(crate::model::Person {
            details: tree.people[0].details.clone(),
            gender: Gender::Male,
            role: crate::model::Role::Spouse,
            parents: Vec::new(),
            spouse: None,
            children: stray_list,
        });

        let bytes = serde_json::to_vec(&tree).expect("encode");
        let err = deserialize(&bytes).unwrap_err();
        assert!(matches!(err, TreeError::CorruptData(_)));
    }

    #[test]
    fn save_and_load_through_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(format!("family.{TREE_FILE_EXTENSION}"));

        let tree = family();
        save_to_path(&tree, &path).expect("save");
        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded, tree);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_from_path(&dir.path().join("absent.dat")).unwrap_err();
        assert!(matches!(err, TreeError::Io(_)));
    }

    #[test]
    fn failed_save_leaves_tree_usable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tree = family();
        // A directory path is not writable as a file.
        let err = save_to_path(&tree, dir.path()).unwrap_err();
        assert!(matches!(err, TreeError::Io(_)));
        assert_eq!(tree.person_count(), 3);
    }
}
