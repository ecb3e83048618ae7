//! Command handlers. Each submodule owns one subcommand: its clap `Args`
//! struct, its JSON output shape, and its `run_*` entry point.

pub mod add;
pub mod completions;
pub mod edit;
pub mod info;
pub mod new;
pub mod show;

use clap::{Args, ValueEnum};
use lineage_core::{DetailsInput, Gender, PersonInput, Relation};

/// `--gender` values, mapped onto the core vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
        }
    }
}

/// `--relation` values, mapped onto the core vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RelationArg {
    Father,
    Mother,
    Spouse,
    Child,
}

impl From<RelationArg> for Relation {
    fn from(arg: RelationArg) -> Self {
        match arg {
            RelationArg::Father => Self::Father,
            RelationArg::Mother => Self::Mother,
            RelationArg::Spouse => Self::Spouse,
            RelationArg::Child => Self::Child,
        }
    }
}

/// The editable personal and address fields, shared by every form-like
/// command. Numbers stay raw strings so the core validator can reject them
/// with a proper error instead of clap aborting the parse.
#[derive(Args, Debug)]
pub struct DetailArgs {
    /// Given name (letters and spaces, at least 2 characters).
    #[arg(long)]
    pub given_name: String,

    /// Surname (letters and spaces, at least 2 characters).
    #[arg(long)]
    pub surname: String,

    /// Free-text life description; may be empty.
    #[arg(long, default_value = "")]
    pub life_description: String,

    /// Street number of the home address.
    #[arg(long)]
    pub street_number: String,

    /// Street name of the home address.
    #[arg(long)]
    pub street_name: String,

    /// Suburb of the home address.
    #[arg(long)]
    pub suburb: String,

    /// Postcode of the home address.
    #[arg(long)]
    pub postcode: String,
}

impl DetailArgs {
    pub fn to_input(&self) -> DetailsInput {
        DetailsInput {
            given_name: self.given_name.clone(),
            surname: self.surname.clone(),
            life_description: self.life_description.clone(),
            street_number: self.street_number.clone(),
            street_name: self.street_name.clone(),
            suburb: self.suburb.clone(),
            postcode: self.postcode.clone(),
        }
    }
}

/// Details plus a gender: the full form for creating a person.
#[derive(Args, Debug)]
pub struct PersonArgs {
    /// Gender of the new person.
    #[arg(long, value_enum)]
    pub gender: GenderArg,

    #[command(flatten)]
    pub details: DetailArgs,
}

impl PersonArgs {
    pub fn to_input(&self) -> PersonInput {
        PersonInput {
            gender: self.gender.into(),
            details: self.details.to_input(),
        }
    }
}
