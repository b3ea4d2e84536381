// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod request;
pub mod stage;

pub use request::{Directive, PipelineRequest};
pub use stage::{FilterArgument, SecondaryFilter, Stage, StageName};
