//! Deterministic merge of preprompt template, bindings and free-text notes.

use crate::fiche::Fiche;
use crate::prompt::bindings::Bindings;
use crate::prompt::tokenizer::{tokenize, Token};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Recap block headers, byte-for-byte the format readers already rely on.
pub const RECAP_HEADER: &str = "\n\nVariables :\n";
pub const NOTES_HEADER: &str = "\nInformations complémentaires :\n";

/// The compiled prompt plus the gate the send surface consumes. Derived
/// and ephemeral: recomputed from scratch on every input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPrompt {
    pub text: String,
    pub missing_required: BTreeSet<String>,
}

impl CompiledPrompt {
    pub fn is_ready(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// Substitute every `{{id}}` occurrence of each declared variable with its
/// rendered value, then append the fixed recap block and the notes.
/// Placeholders naming no declared variable pass through untouched.
pub fn compile(fiche: &Fiche, bindings: &Bindings, notes: &str) -> CompiledPrompt {
    // every declared row contributes a value, empty when unbound; all rows
    // are evaluated so the missing set is complete
    let mut rendered: Vec<(&str, String)> = Vec::with_capacity(fiche.variables.len());
    let mut missing_required = BTreeSet::new();
    for variable in &fiche.variables {
        let value = bindings.render(&variable.id);
        if variable.required && value.is_empty() {
            missing_required.insert(variable.id.clone());
        }
        rendered.push((variable.id.as_str(), value));
    }

    let mut text = String::with_capacity(fiche.preprompt.len());
    for token in tokenize(&fiche.preprompt) {
        match token {
            Token::Text(literal) => text.push_str(literal),
            Token::Placeholder(name) => match rendered.iter().find(|(id, _)| *id == name) {
                Some((_, value)) => text.push_str(value),
                None => {
                    let _ = write!(text, "{token}");
                }
            },
        }
    }

    text.push_str(RECAP_HEADER);
    for (id, value) in &rendered {
        let _ = writeln!(text, "{id} = {value}");
    }
    text.push_str(NOTES_HEADER);
    text.push_str(notes);

    CompiledPrompt {
        text,
        missing_required,
    }
}
