//! Pure rule engine for relationship additions and detail edits.
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. Name fields (given name, surname) and address text fields (street
//!    name, suburb) must be at least 2 characters, start with two letters,
//!    and contain only letters and spaces.
//! 2. Street number and postcode must parse as integers.
//! 3. A father must be male; a mother must be female.
//! 4. A spouse requires the target to be unmarried and of the opposite
//!    gender.
//! 5. A second parent must not repeat the gender of an existing one.
//! 6. The relation must be selectable for the target's role (parents of the
//!    root and spouses of children are leaf-restricted).
//!
//! Validation never mutates the tree. On acceptance the caller hands the
//! resulting [`PersonDetails`] to the mutator unchanged.

use crate::error::TreeError;
use crate::model::{
    DetailsInput, Gender, PersonDetails, PersonId, PersonInput, Relation, selectable_relations,
};
use crate::tree::FamilyTree;

/// True if `value` satisfies the letters-and-spaces rule shared by name and
/// address text fields.
fn text_field_ok(value: &str) -> bool {
    let mut chars = value.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return false;
    };
    if !first.is_alphabetic() || !second.is_alphabetic() {
        return false;
    }
    value.chars().all(|c| c.is_alphabetic() || c == ' ')
}

fn parse_numeric(field: &'static str, value: &str) -> Result<i32, TreeError> {
    value.trim().parse().map_err(|_| TreeError::InvalidNumericField {
        field,
        value: value.to_owned(),
    })
}

/// Check the field rules and produce validated details.
///
/// This is the whole contract for detail edits; relationship additions run
/// [`validate_relative`] instead, which starts with the same checks.
///
/// # Errors
///
/// Returns [`TreeError::InvalidNameFormat`], [`TreeError::InvalidAddressFormat`]
/// or [`TreeError::InvalidNumericField`] on the first field that breaks its
/// rule.
pub fn validate_details(input: &DetailsInput) -> Result<PersonDetails, TreeError> {
    for (field, value) in [
        ("given name", &input.given_name),
        ("surname", &input.surname),
    ] {
        if !text_field_ok(value) {
            return Err(TreeError::InvalidNameFormat {
                field,
                value: value.clone(),
            });
        }
    }

    for (field, value) in [("street name", &input.street_name), ("suburb", &input.suburb)] {
        if !text_field_ok(value) {
            return Err(TreeError::InvalidAddressFormat {
                field,
                value: value.clone(),
            });
        }
    }

    let street_number = parse_numeric("street number", &input.street_number)?;
    let postcode = parse_numeric("postcode", &input.postcode)?;

    Ok(PersonDetails {
        given_name: input.given_name.clone(),
        surname: input.surname.clone(),
        life_description: input.life_description.clone(),
        street_number,
        street_name: input.street_name.clone(),
        suburb: input.suburb.clone(),
        postcode,
    })
}

/// Decide whether `input` may be attached to `target` as `relation`.
///
/// Field rules run first, then the relationship rules in a fixed order. No
/// side effects on rejection; on acceptance the returned details are the
/// exact values the mutator will store.
///
/// # Errors
///
/// Any field rejection from [`validate_details`], or
/// [`TreeError::GenderMismatch`], [`TreeError::SpouseAlreadyExists`],
/// [`TreeError::ParentAlreadyExists`], [`TreeError::RoleNotPermitted`],
/// [`TreeError::PersonNotFound`] for a dangling target handle.
pub fn validate_relative(
    tree: &FamilyTree,
    target: PersonId,
    relation: Relation,
    input: &PersonInput,
) -> Result<PersonDetails, TreeError> {
    let details = validate_details(&input.details)?;
    let target_person = tree.person(target)?;

    match relation {
        Relation::Father => {
            if input.gender != Gender::Male {
                return Err(TreeError::GenderMismatch {
                    relation,
                    expected: Gender::Male,
                });
            }
        }
        Relation::Mother => {
            if input.gender != Gender::Female {
                return Err(TreeError::GenderMismatch {
                    relation,
                    expected: Gender::Female,
                });
            }
        }
        Relation::Spouse => {
            if target_person.has_spouse() {
                return Err(TreeError::SpouseAlreadyExists {
                    target: target_person.full_name(),
                });
            }
            if input.gender == target_person.gender {
                return Err(TreeError::GenderMismatch {
                    relation,
                    expected: target_person.gender.opposite(),
                });
            }
        }
        Relation::Child => {}
    }

    if matches!(relation, Relation::Father | Relation::Mother) {
        for &parent in &target_person.parents {
            if tree.person(parent)?.gender == input.gender {
                return Err(TreeError::ParentAlreadyExists { relation });
            }
        }
    }

    if !selectable_relations(target_person.role).contains(&relation) {
        return Err(TreeError::RoleNotPermitted {
            role: target_person.role,
            relation,
        });
    }

    Ok(details)
}
