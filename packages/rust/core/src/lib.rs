//! Hook orchestration: the rewrite pipeline, hook installation, and
//! document scaffolding.

pub mod install;
pub mod new;
pub mod pipeline;
