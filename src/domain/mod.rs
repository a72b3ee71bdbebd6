//! Domain models for opencode-config
//!
//! Pure domain objects: component kinds and their layout, model tiers,
//! component manifests and detection results.

pub mod component;
pub mod detected;
pub mod manifest;
pub mod tier;

pub use component::{ComponentKind, Layout, SKILL_MANIFEST, Shape};
pub use detected::DetectedComponents;
pub use manifest::{ComponentManifest, DEFAULT_VERSION, SourceMapping};
pub use tier::ModelTier;
