//! # memoqr
//!
//! Operational prompt fiches encoded to and decoded from compact,
//! scannable QR envelopes, plus the deterministic compiler that merges a
//! fiche template with runtime variable bindings.
//!
//! ```text
//! create: FicheDraft → Fiche → encode → envelope text → QR renderer
//! read:   scanned text → decode → Fiche → compile ⟳ bindings → affordances
//! ```
//!
//! The codec, compiler and trust mapper are synchronous pure functions.
//! Devices (camera, geolocation, clipboard, navigation) sit behind the
//! async traits in [`external`]; the read-side state lives in a
//! [`session::Session`] owned by the surrounding surface.

pub mod codec;
pub mod dispatch;
pub mod external;
pub mod fiche;
pub mod prompt;
pub mod session;
pub mod trust;

pub use codec::{decode, encode, DecodeError, EncodeError, FormatTag};
pub use fiche::{Fiche, FicheDraft, ValidationError};
pub use prompt::{compile, Binding, Bindings, CompiledPrompt};
pub use session::Session;
pub use trust::{affordance, destination_affordances, Affordance, AffordanceTier};
