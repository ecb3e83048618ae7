use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a person in the [`FamilyTree`](crate::tree::FamilyTree)
/// arena.
///
/// Handles compare by identity, never by the person's field values, and stay
/// valid for the lifetime of the tree (people are never removed individually,
/// only the whole tree is discarded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(usize);

impl PersonId {
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a children sequence owned at the couple level.
///
/// Two spouses hold the *same* `ChildListId`, which is what makes the
/// shared-children invariant structural: appending a child through either
/// spouse is immediately visible through the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildListId(usize);

impl ChildListId {
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The two genders the model supports. Fixed at creation; edits never
/// change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// The opposite gender, used by the spouse pairing rule.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }

    /// The parent role a person of this gender takes in a couple.
    #[must_use]
    pub const fn parent_role(self) -> Role {
        match self {
            Self::Male => Role::Father,
            Self::Female => Role::Mother,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a person entered the graph, and therefore which further relations
/// may be attached to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Root,
    Father,
    Mother,
    Spouse,
    Child,
}

impl Role {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Father => "father",
            Self::Mother => "mother",
            Self::Spouse => "spouse",
            Self::Child => "child",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of relative a new person is added as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Father,
    Mother,
    Spouse,
    Child,
}

impl Relation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Father => "father",
            Self::Mother => "mother",
            Self::Spouse => "spouse",
            Self::Child => "child",
        }
    }

    /// The role recorded on a person added through this relation.
    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            Self::Father => Role::Father,
            Self::Mother => Role::Mother,
            Self::Spouse => Role::Spouse,
            Self::Child => Role::Child,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The relative types that may be attached to a person with the given role.
///
/// Parents of the root and spouses of children are leaf-restricted: the
/// former may only gain a spouse, the latter only children. The restriction
/// is permanent; later edits never widen it.
#[must_use]
pub const fn selectable_relations(role: Role) -> &'static [Relation] {
    match role {
        Role::Root => &[
            Relation::Father,
            Relation::Mother,
            Relation::Spouse,
            Relation::Child,
        ],
        Role::Father | Role::Mother => &[Relation::Spouse],
        Role::Spouse => &[Relation::Child],
        Role::Child => &[Relation::Spouse, Relation::Child],
    }
}

/// Validated personal and address data. Produced only by the validator;
/// constructing one by hand bypasses the field rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub given_name: String,
    pub surname: String,
    /// Free text; may be empty.
    pub life_description: String,
    pub street_number: i32,
    pub street_name: String,
    pub suburb: String,
    pub postcode: i32,
}

impl PersonDetails {
    /// "Surname GivenName", the rendering the display layer uses.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.given_name)
    }
}

/// A node in the family graph: validated data plus relationship handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub details: PersonDetails,
    pub gender: Gender,
    pub role: Role,
    /// At most two entries, at most one per gender.
    pub parents: Vec<PersonId>,
    pub spouse: Option<PersonId>,
    /// Couple-level children sequence; shared with the spouse if one exists.
    pub children: ChildListId,
}

impl Person {
    #[must_use]
    pub fn full_name(&self) -> String {
        self.details.full_name()
    }

    #[must_use]
    pub const fn has_spouse(&self) -> bool {
        self.spouse.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_is_surname_first() {
        let details = PersonDetails {
            given_name: "Jane".into(),
            surname: "Doe".into(),
            life_description: String::new(),
            street_number: 12,
            street_name: "High Street".into(),
            suburb: "Carlton".into(),
            postcode: 3053,
        };
        assert_eq!(details.full_name(), "Doe Jane");
    }

    #[test]
    fn gender_opposite_round_trips() {
        assert_eq!(Gender::Male.opposite(), Gender::Female);
        assert_eq!(Gender::Female.opposite().opposite(), Gender::Female);
    }

    #[test]
    fn parent_role_follows_gender() {
        assert_eq!(Gender::Male.parent_role(), Role::Father);
        assert_eq!(Gender::Female.parent_role(), Role::Mother);
    }

    #[test]
    fn root_may_attach_every_relation() {
        let relations = selectable_relations(Role::Root);
        assert_eq!(relations.len(), 4);
    }

    #[test]
    fn parents_of_root_may_only_gain_a_spouse() {
        assert_eq!(selectable_relations(Role::Father), &[Relation::Spouse]);
        assert_eq!(selectable_relations(Role::Mother), &[Relation::Spouse]);
    }

    #[test]
    fn spouses_of_children_may_only_gain_children() {
        assert_eq!(selectable_relations(Role::Spouse), &[Relation::Child]);
    }

    #[test]
    fn children_may_gain_spouse_or_child() {
        assert_eq!(
            selectable_relations(Role::Child),
            &[Relation::Spouse, Relation::Child]
        );
    }

    #[test]
    fn person_id_serializes_transparently() {
        let id = PersonId::new(7);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "7");
    }
}
