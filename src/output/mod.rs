//! Output handling: the aggregated text artifact and run statistics

mod stats;
mod writer;

pub use stats::{print_summary, CrawlRun, RunOutcome};
pub use writer::ArtifactWriter;
