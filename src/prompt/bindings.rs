//! Runtime values bound to fiche variables on the read side.

use std::collections::BTreeMap;

/// One bound value. Text and number inputs arrive as raw strings; a
/// geolocation slot carries the two coordinates separately so a partial
/// acquisition renders as unset.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Scalar(String),
    Position { lat: Option<f64>, lon: Option<f64> },
}

impl Binding {
    pub fn scalar(value: impl Into<String>) -> Binding {
        Binding::Scalar(value.into())
    }

    pub fn position(lat: f64, lon: f64) -> Binding {
        Binding::Position {
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    /// The value as it appears in the compiled prompt. Empty means unset.
    pub fn render(&self) -> String {
        match self {
            Binding::Scalar(value) => value.trim().to_string(),
            Binding::Position {
                lat: Some(lat),
                lon: Some(lon),
            } => format!("lat={lat:.6}, lon={lon:.6}"),
            Binding::Position { .. } => String::new(),
        }
    }
}

/// Variable id → bound value. Ids the fiche never declared are simply
/// ignored by the compiler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: BTreeMap<String, Binding>,
}

impl Bindings {
    pub fn new() -> Bindings {
        Bindings::default()
    }

    pub fn set(&mut self, id: impl Into<String>, binding: Binding) {
        self.values.insert(id.into(), binding);
    }

    pub fn unset(&mut self, id: &str) {
        self.values.remove(id);
    }

    pub fn get(&self, id: &str) -> Option<&Binding> {
        self.values.get(id)
    }

    /// Rendered value for `id`; an unbound variable renders empty, the
    /// same as an untouched form field.
    pub fn render(&self, id: &str) -> String {
        self.values.get(id).map(Binding::render).unwrap_or_default()
    }
}
