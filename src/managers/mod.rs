// fontsurvey state managers
// Managers hold in-memory UI-side state: the font review list and its flow.

pub mod font_reviewer;
