//! Batch generation of UAST mapping files
//!
//! Drives the external draft producer over every grammar directory, runs
//! each draft through the `uastmap-core` pipeline and collects the outcome
//! of every language into a [`RunReport`].

pub mod audit;
pub mod drafter;
pub mod driver;
pub mod error;
pub mod report;

pub use audit::{audit_existing_maps, MapAudit};
pub use drafter::{CommandDrafter, DraftProducer, DraftRequest};
pub use driver::{DriverSettings, GenerationDriver};
pub use error::{DraftError, DriverError};
pub use report::{LanguageMessage, ProcessedLanguage, RunReport};
