//! Application layer (use-cases).
//!
//! The analysis menu, table browsing and the evaluation clock. Everything here
//! is expressed as SQL run through [`crate::infra::db::Database`].

pub mod catalog;
pub mod clock;
pub mod explore;

pub use catalog::AnalysisQuery;
pub use clock::{EvaluationClock, Timezone};
pub use explore::{DataTable, Exploration, table_counts};
