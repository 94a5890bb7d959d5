//! Test-scaffold synthesis: rendering and insertion planning

pub mod insertion;
pub mod render;

pub use insertion::{plan_insertion, InsertionPlan};
pub use render::{render, render_spec};
