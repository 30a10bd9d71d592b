//! Core building blocks: raw line splitting, the line-ending rewrite pass,
//! attribute manifest parsing, and marked-file discovery. These are internal
//! primitives consumed by the high-level `api` module.
pub mod lines;
pub mod manifest;
pub mod params;
pub mod rewrite;
pub mod select;
