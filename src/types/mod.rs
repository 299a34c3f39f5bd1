// fontsurvey shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod font;
pub mod review;
pub mod settings;
pub mod submission;
