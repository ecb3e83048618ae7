//! The family graph arena and its mutation engine.
//!
//! `FamilyTree` owns every person and every couple-level child list; all
//! relationship pointers are arena handles, which keeps the spouse and
//! parent/child back-references free of ownership cycles. The tree is the
//! explicit session owner of the graph: created empty at session start,
//! [`reset`](FamilyTree::reset) on "new tree", replaced wholesale on load.
//!
//! Mutators run the validator first and touch nothing on rejection, so a
//! failed call always leaves the graph exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TreeError;
use crate::model::{
    ChildListId, DetailsInput, Gender, Person, PersonDetails, PersonId, PersonInput, Relation,
    Role,
};
use crate::validate;

/// The single-rooted family relationship graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyTree {
    pub(crate) people: Vec<Person>,
    pub(crate) child_lists: Vec<Vec<PersonId>>,
    pub(crate) root: Option<PersonId>,
}

impl FamilyTree {
    /// An empty, rootable tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The root person, if one has been added.
    #[must_use]
    pub const fn root(&self) -> Option<PersonId> {
        self.root
    }

    /// True when no root person exists yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of people in the graph.
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    /// Resolve a handle.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PersonNotFound`] for a handle that does not
    /// belong to this tree.
    pub fn person(&self, id: PersonId) -> Result<&Person, TreeError> {
        self.people
            .get(id.index())
            .ok_or(TreeError::PersonNotFound(id))
    }

    /// The children of a person, in insertion order.
    ///
    /// Both spouses of a couple resolve to the same sequence.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PersonNotFound`] for a dangling handle.
    pub fn children_of(&self, id: PersonId) -> Result<&[PersonId], TreeError> {
        let list = self.person(id)?.children;
        Ok(self.child_list(list))
    }

    /// Iterate over every person with its handle.
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.people
            .iter()
            .enumerate()
            .map(|(i, p)| (PersonId::new(i), p))
    }

    /// Create the root person from raw input.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::RootAlreadyExists`] if the tree already has a
    /// root, or a field validation error from the input.
    pub fn add_root(&mut self, input: &PersonInput) -> Result<PersonId, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::RootAlreadyExists);
        }
        let details = validate::validate_details(&input.details)?;
        let list = self.alloc_child_list();
        let id = self.alloc_person(details, input.gender, Role::Root, list);
        self.root = Some(id);
        debug!(%id, "root person added");
        Ok(id)
    }

    /// Validate and attach a new relative to `target`.
    ///
    /// Bidirectional consistency is maintained here: parent additions link
    /// parent and child both ways and marry a second parent to the first;
    /// spouse additions are symmetric, share the couple's child list and
    /// backfill the new spouse into every existing child's parent set;
    /// child additions record both members of a couple as parents.
    ///
    /// # Errors
    ///
    /// Any rejection from [`validate::validate_relative`]; nothing is
    /// mutated in that case.
    pub fn add_relative(
        &mut self,
        target: PersonId,
        relation: Relation,
        input: &PersonInput,
    ) -> Result<PersonId, TreeError> {
        let details = validate::validate_relative(self, target, relation, input)?;

        let id = match relation {
            Relation::Father | Relation::Mother => {
                self.attach_parent(target, relation, input.gender, details)
            }
            Relation::Spouse => self.attach_spouse(target, input.gender, details),
            Relation::Child => self.attach_child(target, input.gender, details),
        };
        debug!(%id, %relation, %target, "relative added");
        Ok(id)
    }

    /// Overwrite name, address and life-description fields in place.
    ///
    /// Gender, role and all relationship pointers are left untouched.
    ///
    /// # Errors
    ///
    /// A field validation error, or [`TreeError::PersonNotFound`] for a
    /// dangling handle.
    pub fn edit_details(
        &mut self,
        target: PersonId,
        input: &DetailsInput,
    ) -> Result<(), TreeError> {
        let details = validate::validate_details(input)?;
        self.person(target)?; // reject dangling handles before mutating
        self.people[target.index()].details = details;
        debug!(%target, "details edited");
        Ok(())
    }

    /// Discard the root and everything reachable from it, returning the
    /// tree to an empty, rootable state.
    pub fn reset(&mut self) {
        self.people.clear();
        self.child_lists.clear();
        self.root = None;
        debug!("tree reset");
    }

    /// Father, mother, spouse, children and grandchildren of a person,
    /// for the person-info display.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PersonNotFound`] for a dangling handle.
    pub fn relative_summary(&self, id: PersonId) -> Result<RelativeSummary, TreeError> {
        let person = self.person(id)?;

        let mut father = None;
        let mut mother = None;
        for &parent in &person.parents {
            match self.person(parent)?.gender {
                Gender::Male => father = Some(parent),
                Gender::Female => mother = Some(parent),
            }
        }

        let children = self.children_of(id)?.to_vec();
        let mut grandchildren = Vec::new();
        for &child in &children {
            grandchildren.extend_from_slice(self.children_of(child)?);
        }

        Ok(RelativeSummary {
            father,
            mother,
            spouse: person.spouse,
            children,
            grandchildren,
        })
    }

    // ------------------------------------------------------------------
    // Internal mutation helpers (inputs already validated)
    // ------------------------------------------------------------------

    fn attach_parent(
        &mut self,
        target: PersonId,
        relation: Relation,
        gender: Gender,
        details: PersonDetails,
    ) -> PersonId {
        let existing = self.people[target.index()].parents.first().copied();

        let id = if let Some(other) = existing {
            // Second parent: marry into the existing parent's couple and
            // adopt its child list (which already holds `target`).
            let shared = self.people[other.index()].children;
            let id = self.alloc_person(details, gender, relation.role(), shared);
            self.people[other.index()].spouse = Some(id);
            self.people[id.index()].spouse = Some(other);
            id
        } else {
            let list = self.alloc_child_list();
            let id = self.alloc_person(details, gender, relation.role(), list);
            self.child_lists[list.index()].push(target);
            id
        };

        self.people[target.index()].parents.push(id);
        id
    }

    fn attach_spouse(
        &mut self,
        target: PersonId,
        gender: Gender,
        details: PersonDetails,
    ) -> PersonId {
        let shared = self.people[target.index()].children;

        // A spouse added to a parent of the root is recorded as the other
        // parent, not as a generic spouse.
        let role = if self.child_list(shared).iter().any(|&c| Some(c) == self.root) {
            gender.parent_role()
        } else {
            Role::Spouse
        };

        let id = self.alloc_person(details, gender, role, shared);
        self.people[id.index()].spouse = Some(target);
        self.people[target.index()].spouse = Some(id);

        // Backfill the new spouse into every existing child's parent set.
        let children = self.child_list(shared).to_vec();
        for child in children {
            self.people[child.index()].parents.push(id);
        }
        id
    }

    fn attach_child(
        &mut self,
        target: PersonId,
        gender: Gender,
        details: PersonDetails,
    ) -> PersonId {
        let list = self.alloc_child_list();
        let id = self.alloc_person(details, gender, Role::Child, list);

        self.people[id.index()].parents.push(target);
        if let Some(spouse) = self.people[target.index()].spouse {
            self.people[id.index()].parents.push(spouse);
        }

        // One append covers both spouses: the list is couple-owned.
        let shared = self.people[target.index()].children;
        self.child_lists[shared.index()].push(id);
        id
    }

    fn alloc_person(
        &mut self,
        details: PersonDetails,
        gender: Gender,
        role: Role,
        children: ChildListId,
    ) -> PersonId {
        let id = PersonId::new(self.people.len());
        self.people.push(Person {
            details,
            gender,
            role,
            parents: Vec::new(),
            spouse: None,
            children,
        });
        id
    }

    fn alloc_child_list(&mut self) -> ChildListId {
        let id = ChildListId::new(self.child_lists.len());
        self.child_lists.push(Vec::new());
        id
    }

    pub(crate) fn child_list(&self, id: ChildListId) -> &[PersonId] {
        &self.child_lists[id.index()]
    }
}

/// The relatives of one person, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelativeSummary {
    pub father: Option<PersonId>,
    pub mother: Option<PersonId>,
    pub spouse: Option<PersonId>,
    pub children: Vec<PersonId>,
    pub grandchildren: Vec<PersonId>,
}
