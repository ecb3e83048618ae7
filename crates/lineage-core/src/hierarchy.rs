//! Display hierarchy derived from the graph.
//!
//! [`build`] materializes a display-ready tree from `PersonRecord` state
//! alone: a "Parents" heading under the root (parents rendered flat, never
//! recursed), and per visited person a "Spouse" heading with the spouse as
//! a leaf and a "Children" heading that recurses. The graph is not a strict
//! tree — spouses and shared child lists introduce back-references — so
//! traversal keeps an identity-keyed visited set to guarantee termination.
//!
//! The output is ephemeral: rebuilt after every mutation, never persisted.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::TreeError;
use crate::model::PersonId;
use crate::tree::FamilyTree;

/// Heading label for the root's parents.
pub const PARENTS_HEADING: &str = "Parents";
/// Heading label for a person's spouse.
pub const SPOUSE_HEADING: &str = "Spouse";
/// Heading label for a person's children.
pub const CHILDREN_HEADING: &str = "Children";

/// One node of the rendered hierarchy: either a person (full name, with
/// their handle) or a grouping heading (`person` is `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<PersonId>,
    /// Every node starts expanded; a widget layer may collapse it.
    pub expanded: bool,
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    fn heading(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            person: None,
            expanded: true,
            children: Vec::new(),
        }
    }

    fn leaf(tree: &FamilyTree, id: PersonId) -> Result<Self, TreeError> {
        Ok(Self {
            label: tree.person(id)?.full_name(),
            person: Some(id),
            expanded: true,
            children: Vec::new(),
        })
    }

    /// True for grouping headings, false for person nodes.
    #[must_use]
    pub const fn is_heading(&self) -> bool {
        self.person.is_none()
    }
}

/// Build the display hierarchy for the whole tree.
///
/// Pure and deterministic: two calls on an unmodified tree yield
/// structurally equal results.
///
/// # Errors
///
/// Returns [`TreeError::NoRootPerson`] on an empty tree.
pub fn build(tree: &FamilyTree) -> Result<DisplayNode, TreeError> {
    let root = tree.root().ok_or(TreeError::NoRootPerson)?;

    let mut visited: HashSet<PersonId> = HashSet::new();
    visited.insert(root);

    let mut node = DisplayNode::leaf(tree, root)?;

    // Parents of the root are leaf-restricted, so they are rendered flat
    // under one heading and never recursed.
    let parents = tree.person(root)?.parents.clone();
    if !parents.is_empty() {
        let mut heading = DisplayNode::heading(PARENTS_HEADING);
        for parent in parents {
            visited.insert(parent);
            heading.children.push(DisplayNode::leaf(tree, parent)?);
        }
        node.children.push(heading);
    }

    visit(tree, root, &mut node, &mut visited)?;
    Ok(node)
}

/// Append the Spouse/Children headings for `id` to `node`, recursing into
/// children.
fn visit(
    tree: &FamilyTree,
    id: PersonId,
    node: &mut DisplayNode,
    visited: &mut HashSet<PersonId>,
) -> Result<(), TreeError> {
    if let Some(spouse) = tree.person(id)?.spouse {
        visited.insert(spouse);
        let mut heading = DisplayNode::heading(SPOUSE_HEADING);
        heading.children.push(DisplayNode::leaf(tree, spouse)?);
        node.children.push(heading);
    }

    let children = tree.children_of(id)?.to_vec();
    if !children.is_empty() {
        let mut heading = DisplayNode::heading(CHILDREN_HEADING);
        for child in children {
            // Shared child lists mean a child can be reachable through both
            // spouses; identity decides whether it was already rendered.
            if !visited.insert(child) {
                continue;
            }
            let mut child_node = DisplayNode::leaf(tree, child)?;
            visit(tree, child, &mut child_node, visited)?;
            heading.children.push(child_node);
        }
        node.children.push(heading);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, PersonInput, Relation};

    fn rooted() -> (FamilyTree, PersonId) {
        let mut tree = FamilyTree::new();
        let root = tree
            .add_root(&PersonInput::sample("Jane", "Doe", Gender::Female))
            .expect("add root");
        (tree, root)
    }

    fn heading_of<'a>(node: &'a DisplayNode, label: &str) -> &'a DisplayNode {
        node.children
            .iter()
            .find(|c| c.is_heading() && c.label == label)
            .unwrap_or_else(|| panic!("no {label} heading under {}", node.label))
    }

    #[test]
    fn empty_tree_has_no_hierarchy() {
        let tree = FamilyTree::new();
        assert!(matches!(build(&tree).unwrap_err(), TreeError::NoRootPerson));
    }

    #[test]
    fn lone_root_is_a_single_leaf() {
        let (tree, root) = rooted();
        let node = build(&tree).expect("build");
        assert_eq!(node.label, "Doe Jane");
        assert_eq!(node.person, Some(root));
        assert!(node.expanded);
        assert!(node.children.is_empty());
    }

    #[test]
    fn spouse_appears_under_spouse_heading() {
        let (mut tree, root) = rooted();
        tree.add_relative(
            root,
            Relation::Spouse,
            &PersonInput::sample("John", "Doe", Gender::Male),
        )
        .expect("spouse");

        let node = build(&tree).expect("build");
        let spouse = heading_of(&node, SPOUSE_HEADING);
        assert_eq!(spouse.children.len(), 1);
        assert_eq!(spouse.children[0].label, "Doe John");
        assert!(spouse.children[0].children.is_empty());
    }

    #[test]
    fn parents_of_root_are_flat() {
        let (mut tree, root) = rooted();
        let father = tree
            .add_relative(
                root,
                Relation::Father,
                &PersonInput::sample("Tom", "Doe", Gender::Male),
            )
            .expect("father");
        tree.add_relative(
            father,
            Relation::Spouse,
            &PersonInput::sample("May", "Doe", Gender::Female),
        )
        .expect("mother via spouse");

        let node = build(&tree).expect("build");
        let parents = heading_of(&node, PARENTS_HEADING);
        assert_eq!(parents.children.len(), 2);
        // Flat leaves: no Spouse/Children headings under a parent of root,
        // even though the couple has a child (the root itself).
        for parent in &parents.children {
            assert!(parent.children.is_empty(), "parent {} not flat", parent.label);
        }
    }

    #[test]
    fn children_recurse_and_grandchildren_render_once() {
        let (mut tree, root) = rooted();
        tree.add_relative(
            root,
            Relation::Spouse,
            &PersonInput::sample("John", "Doe", Gender::Male),
        )
        .expect("spouse");
        let amy = tree
            .add_relative(
                root,
                Relation::Child,
                &PersonInput::sample("Amy", "Doe", Gender::Female),
            )
            .expect("child");
        tree.add_relative(
            amy,
            Relation::Spouse,
            &PersonInput::sample("Ben", "Hall", Gender::Male),
        )
        .expect("amy's spouse");
        tree.add_relative(
            amy,
            Relation::Child,
            &PersonInput::sample("Eve", "Hall", Gender::Female),
        )
        .expect("grandchild");

        let node = build(&tree).expect("build");
        let children = heading_of(&node, CHILDREN_HEADING);
        assert_eq!(children.children.len(), 1);

        let amy_node = &children.children[0];
        assert_eq!(amy_node.label, "Doe Amy");
        let amy_spouse = heading_of(amy_node, SPOUSE_HEADING);
        assert_eq!(amy_spouse.children[0].label, "Hall Ben");
        let grandchildren = heading_of(amy_node, CHILDREN_HEADING);
        assert_eq!(grandchildren.children[0].label, "Hall Eve");

        // Eve is reachable through Amy and through Ben's shared list, but
        // renders exactly once.
        let mut labels = Vec::new();
        collect_labels(&node, &mut labels);
        assert_eq!(labels.iter().filter(|l| *l == "Hall Eve").count(), 1);
    }

    #[test]
    fn build_is_idempotent() {
        let (mut tree, root) = rooted();
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

        let first = build(&tree).expect("build");
        let second = build(&tree).expect("build again");
        assert_eq!(first, second);
    }

    fn collect_labels(node: &DisplayNode, out: &mut Vec<String>) {
        if !node.is_heading() {
            out.push(node.label.clone());
        }
        for child in &node.children {
            collect_labels(child, out);
        }
    }
}
