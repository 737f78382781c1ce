// Weekly report generation
//
// Wires sources, prompt builder, summarizer and publisher into one run.

pub mod pipeline;
pub mod prompt;

pub use pipeline::{ReportPipeline, RunOptions, RunOutcome, Stage};
pub use prompt::build_prompt;
