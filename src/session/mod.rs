//! Session-scoped read-path state: the decoded fiche, its bindings and the
//! free-text notes. Replaces the source's global `currentFiche`; the
//! surrounding surface owns one `Session` and calls typed operations.


use crate::codec::{self, DecodeError};
use crate::dispatch::{self, DestinationConfig, DispatchError};
use crate::external::{ClipboardSink, ExternalDeviceError, Position};
use crate::fiche::{Destination, Fiche};
use crate::prompt::{compile, Binding, Bindings, CompiledPrompt};
use crate::trust::{affordance, destination_affordances, DestinationAffordances};
use tracing::info;
use url::Url;

#[derive(Debug, Default)]
pub struct Session {
    fiche: Option<Fiche>,
    bindings: Bindings,
    notes: String,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /* ---------- 1.  LOAD ---------- */

    /// Decode scanned envelope text and make the fiche current. Bindings
    /// and notes from any previous fiche are discarded; on failure the
    /// previous state is kept untouched.
    pub fn load_scanned_text(&mut self, text: &str) -> Result<&Fiche, DecodeError> {
        let fiche = codec::decode(text)?;
        info!(title = %fiche.meta.title, variables = fiche.variables.len(), "fiche loaded");
        self.bindings = Bindings::new();
        self.notes.clear();
        Ok(self.fiche.insert(fiche))
    }

    pub fn fiche(&self) -> Option<&Fiche> {
        self.fiche.as_ref()
    }

    /* ---------- 2.  INPUTS ---------- */

    /// Bind a value to a declared variable. Returns false (and stores
    /// nothing) when no current fiche declares `id`.
    pub fn bind(&mut self, id: &str, binding: Binding) -> bool {
        let declared = self
            .fiche
            .as_ref()
            .is_some_and(|fiche| fiche.variables.iter().any(|v| v.id == id));
        if declared {
            self.bindings.set(id, binding);
        }
        declared
    }

    pub fn unbind(&mut self, id: &str) {
        self.bindings.unset(id);
    }

    /// Convenience for a completed geolocation acquisition.
    pub fn bind_position(&mut self, id: &str, position: Position) -> bool {
        self.bind(id, Binding::position(position.lat, position.lon))
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /* ---------- 3.  DERIVED OUTPUTS ---------- */

    /// Recompute the prompt from scratch. None until a fiche is loaded.
    pub fn compiled(&self) -> Option<CompiledPrompt> {
        self.fiche
            .as_ref()
            .map(|fiche| compile(fiche, &self.bindings, &self.notes))
    }

    /// Send affordances for the current fiche, with the global
    /// missing-required override applied.
    pub fn affordances(&self) -> Option<DestinationAffordances> {
        let fiche = self.fiche.as_ref()?;
        let compiled = compile(fiche, &self.bindings, &self.notes);
        Some(destination_affordances(
            &fiche.trust,
            &compiled.missing_required,
        ))
    }

    /// Build the outbound URL for one destination, enforcing the gates:
    /// a fiche must be loaded, no required variable may be missing, and
    /// the destination's affordance must be enabled.
    pub fn dispatch_url(
        &self,
        destination: Destination,
        config: &DestinationConfig,
    ) -> Result<Url, DispatchError> {
        let fiche = self.fiche.as_ref().ok_or(DispatchError::NoFiche)?;
        let compiled = compile(fiche, &self.bindings, &self.notes);
        if !compiled.is_ready() {
            return Err(DispatchError::MissingRequired(compiled.missing_required));
        }
        if !affordance(fiche.trust.tier(destination)).enabled {
            return Err(DispatchError::Blocked(destination));
        }
        dispatch::send_url(config, destination, &compiled.text)
    }

    /// Push the compiled prompt to a clipboard. Ok(false) when there is
    /// nothing to copy yet.
    pub async fn copy_prompt(
        &self,
        clipboard: &dyn ClipboardSink,
    ) -> Result<bool, ExternalDeviceError> {
        match self.compiled() {
            Some(compiled) => {
                clipboard.write(&compiled.text).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop the fiche, bindings and notes, as on page reset.
    pub fn reset(&mut self) {
        info!("session reset");
        *self = Session::default();
    }
}
