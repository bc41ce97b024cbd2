//! Domain Model
//!
//! Client-side projections of the collaborative process entities as the remote
//! API serves them. Field names on the wire carry entity suffixes
//! (`name_process`, `id_activity`, ...); the Rust side uses plain names.

mod activity;
mod catalog;
pub mod draft;
mod process;
mod round;

pub use activity::Activity;
pub use catalog::{Pattern, Practice, Role, Thinklet};
pub use draft::{
    ActivityDraft, Draft, ImageSource, PatternDraft, PracticeDraft, ProcessDraft, RoleDraft,
    RoundDraft, ThinkletDraft,
};
pub use process::{FullProcess, Process};
pub use round::{Round, RoundStatus};

use serde::{Deserialize, Deserializer};

/// Common read access used by search, listings and the API client.
pub trait Entity {
    /// Singular, lower-case entity name used in messages.
    const KIND: &'static str;

    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
}

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn default_true() -> bool {
    true
}
