//! Coerces raw create-form state into a validated [`Fiche`].

use crate::fiche::model::{Fiche, FicheMeta, TrustScores, TrustTier, VarKind, Variable};
use crate::fiche::{validate, ValidationError};
use chrono::Local;

/// Raw form state, one string per input. Trust fields stay untyped so the
/// builder can apply `Number(...)`-like coercion.
#[derive(Debug, Clone, Default)]
pub struct FicheDraft {
    pub category: String,
    pub title: String,
    pub objective: String,
    pub author: String,
    pub date: String,
    pub version: String,
    pub trust_chatgpt: String,
    pub trust_perplexity: String,
    pub trust_mistral: String,
    pub variables: Vec<VariableDraft>,
    pub preprompt: String,
}

/// One variable row of the create form. The kind and required flag arrive
/// typed; the rendering layer owns the widget lookups.
#[derive(Debug, Clone, Default)]
pub struct VariableDraft {
    pub label: String,
    pub id: String,
    pub kind: VarKind,
    pub required: bool,
}

impl FicheDraft {
    /// Build and validate a fiche. Rows where both label and id are empty
    /// are unused and skipped; a half-filled row fails. An empty version
    /// field is stamped from today's date.
    pub fn build(self) -> Result<Fiche, ValidationError> {
        let mut variables = Vec::new();
        for (index, row) in self.variables.iter().enumerate() {
            let label = row.label.trim();
            let id = row.id.trim();
            if label.is_empty() && id.is_empty() {
                continue;
            }
            if label.is_empty() || id.is_empty() {
                return Err(ValidationError::IncompleteVariable { index });
            }
            variables.push(Variable {
                label: label.to_string(),
                id: id.to_string(),
                kind: row.kind,
                required: row.required,
            });
        }

        let version = match self.version.trim() {
            "" => version_stamp(),
            v => v.to_string(),
        };

        let fiche = Fiche {
            meta: FicheMeta {
                category: self.category.trim().to_string(),
                title: self.title.trim().to_string(),
                objective: self.objective.trim().to_string(),
                author: self.author.trim().to_string(),
                date: self.date.trim().to_string(),
                version,
            },
            trust: TrustScores {
                chatgpt: Some(TrustTier::from_raw(&self.trust_chatgpt)),
                perplexity: Some(TrustTier::from_raw(&self.trust_perplexity)),
                mistral: Some(TrustTier::from_raw(&self.trust_mistral)),
            },
            variables,
            preprompt: self.preprompt.trim().to_string(),
        };

        validate(&fiche)?;
        Ok(fiche)
    }
}

fn version_stamp() -> String {
    format!("V{}", Local::now().format("%Y.%m.%d"))
}
