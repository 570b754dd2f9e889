//! Core building blocks: the parameter set consumed by the library API and the
//! staged load/header/render pipeline shared by the CLI and the embedding adapter.
pub mod params;
pub mod pipeline;
