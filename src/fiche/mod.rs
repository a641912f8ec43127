//! Fiche data model, validation rules and the create-form builder.

pub mod builder;
pub mod model;

pub use builder::{FicheDraft, VariableDraft};
pub use model::{Destination, Fiche, FicheMeta, TrustScores, TrustTier, VarKind, Variable};

use thiserror::Error;

/// A fiche carries at most this many variables.
pub const MAX_VARIABLES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("fiche category is required")]
    EmptyCategory,
    #[error("fiche title is required")]
    EmptyTitle,
    #[error("fiche preprompt is required")]
    EmptyPreprompt,
    #[error("variable {index} needs both a label and an identifier")]
    IncompleteVariable { index: usize },
    #[error("duplicate variable identifier `{id}`")]
    DuplicateVariableId { id: String },
    #[error("fiche declares {count} variables, the limit is {MAX_VARIABLES}")]
    TooManyVariables { count: usize },
}

/// Enforced before any envelope is produced (create path) and again after a
/// fiche is parsed back from an envelope (read path).
pub fn validate(fiche: &Fiche) -> Result<(), ValidationError> {
    if fiche.meta.category.trim().is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    if fiche.meta.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if fiche.preprompt.trim().is_empty() {
        return Err(ValidationError::EmptyPreprompt);
    }
    if fiche.variables.len() > MAX_VARIABLES {
        return Err(ValidationError::TooManyVariables {
            count: fiche.variables.len(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for (index, variable) in fiche.variables.iter().enumerate() {
        if variable.label.trim().is_empty() || variable.id.trim().is_empty() {
            return Err(ValidationError::IncompleteVariable { index });
        }
        if !seen.insert(variable.id.as_str()) {
            return Err(ValidationError::DuplicateVariableId {
                id: variable.id.clone(),
            });
        }
    }

    Ok(())
}
