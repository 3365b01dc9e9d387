/**
 * Group Icons CLI
 *
 * Runs the label extraction and stylesheet generation over rendered documents
 * already on disk, for builds that do not go through a dev server.
 */
pub mod commands;
pub mod documents;

pub use commands::{generate, labels, load_options, resolve, LabelReport};
pub use documents::{collect_documents, extract_from_documents};
