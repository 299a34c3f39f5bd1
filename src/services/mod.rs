// fontsurvey services
// Services perform I/O: font enumeration, record rendering, repository submission, settings.

pub mod document;
pub mod font_source;
pub mod settings_engine;
pub mod submission_gateway;
