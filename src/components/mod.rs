//! Reusable UI components.

pub mod concept_graph;
