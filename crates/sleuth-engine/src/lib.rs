//! # sleuth-engine
//!
//! The investigation orchestrator and its collaborator seams.
//!
//! [`Investigator`] drives one question through the full pipeline:
//! intent extraction, history retrieval, the hypothesis/query/analysis
//! loop with early exit, upstream-dependency tracing, correlation,
//! root-cause ranking, confidence scoring, and answer synthesis. The
//! out-of-scope collaborators (language-model services, the log store,
//! the vector store) sit behind the async traits in [`traits`]; the
//! [`offline`] module ships deterministic in-process implementations so
//! the engine runs end-to-end without any external service.

mod error;
mod fallback;
pub mod offline;
mod orchestrator;
mod settings;
pub mod traits;

pub use error::CollaboratorError;
pub use fallback::{generic_hypotheses, template_answer};
pub use orchestrator::{Collaborators, Investigator};
pub use settings::EngineSettings;
