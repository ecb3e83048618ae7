//! The node entity and its vocabulary: genders, roles, relations, and the
//! validated/raw shapes of a person's data.

mod input;
mod person;

pub use input::{DetailsInput, PersonInput};
pub use person::{
    ChildListId, Gender, Person, PersonDetails, PersonId, Relation, Role, selectable_relations,
};
