// Statement composition: the pure core that turns intake answers into a
// Reasonable Adjustment Statement (personal letter or formal report).
// No I/O happens under this module apart from the HTTP handlers.

pub mod catalog;
pub mod categorizer;
pub mod composer;
pub mod formatting;
pub mod handlers;
pub mod model;
pub mod pronouns;
pub mod render;
pub mod sections;
pub mod variant;

pub use composer::{compose, RenderedDocument};
pub use model::{IntakeRecord, OutputFormat};
