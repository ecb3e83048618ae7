use crate::model::Gender;

/// Raw, unvalidated field values as collected by a form or command line.
///
/// Numeric fields are kept as strings so the validator can report
/// non-numeric input as a recoverable rejection rather than a parse panic
/// at the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsInput {
    pub given_name: String,
    pub surname: String,
    pub life_description: String,
    pub street_number: String,
    pub street_name: String,
    pub suburb: String,
    pub postcode: String,
}

/// A candidate person: raw details plus the gender picked for them.
///
/// Gender lives outside [`DetailsInput`] because detail edits never carry
/// one; only person creation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonInput {
    pub gender: Gender,
    pub details: DetailsInput,
}

#[cfg(test)]
impl DetailsInput {
    /// A well-formed input for tests, with the name fields overridden.
    #[must_use]
    pub fn sample(given_name: &str, surname: &str) -> Self {
        Self {
            given_name: given_name.to_owned(),
            surname: surname.to_owned(),
            life_description: String::new(),
            street_number: "12".to_owned(),
            street_name: "High Street".to_owned(),
            suburb: "Carlton".to_owned(),
            postcode: "3053".to_owned(),
        }
    }
}

#[cfg(test)]
impl PersonInput {
    #[must_use]
    pub fn sample(given_name: &str, surname: &str, gender: Gender) -> Self {
        Self {
            gender,
            details: DetailsInput::sample(given_name, surname),
        }
    }
}
