//! Endpoint mapping for each entity.

use crate::model::{
    Activity, ActivityDraft, Draft, Entity, Pattern, PatternDraft, Practice, PracticeDraft,
    Process, ProcessDraft, Role, RoleDraft, Round, RoundDraft, Thinklet, ThinkletDraft,
};
use serde::de::DeserializeOwned;

/// An entity served under `/api/<PATH>/{list, {id}, create, update/{id}, delete/{id}}`.
pub trait Resource: Entity + DeserializeOwned + Send + 'static {
    const PATH: &'static str;

    type Draft: Draft + Send + Sync;
}

impl Resource for Process {
    const PATH: &'static str = "colaborative_process";
    type Draft = ProcessDraft;
}

impl Resource for Round {
    const PATH: &'static str = "round";
    type Draft = RoundDraft;
}

impl Resource for Activity {
    const PATH: &'static str = "child_activity";
    type Draft = ActivityDraft;
}

impl Resource for Practice {
    const PATH: &'static str = "practice";
    type Draft = PracticeDraft;
}

impl Resource for Thinklet {
    const PATH: &'static str = "thinklet";
    type Draft = ThinkletDraft;
}

impl Resource for Pattern {
    const PATH: &'static str = "pattern";
    type Draft = PatternDraft;
}

impl Resource for Role {
    const PATH: &'static str = "role";
    type Draft = RoleDraft;
}
