//! Classify command implementation.

use crate::cli::Output;
use crate::intent::{classify, Route};
use anyhow::Result;

/// Print the intent a question is classified as and where it would be routed.
pub fn run_classify(question: &str) -> Result<()> {
    let intent = classify(question);

    let route = match intent.route() {
        Route::Retrieval => "retrieval + generation".to_string(),
        Route::Generation => "generation".to_string(),
        Route::Auxiliary(kind) => format!("{:?} responder", kind),
    };

    Output::kv("Intent", intent.as_str());
    Output::kv("Route", &route);

    Ok(())
}
