//! Configuration for dbml-codegen

pub mod defaults;
mod settings;

pub use settings::*;
