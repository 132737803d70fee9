//! Shared result type for translation passes.
//!
//! Every pass returns a `PassResult` containing the transformed tree and the
//! rewrites it performed.

use serde_json::Value;

use crate::report::{Report, Rewrite};

/// Result of a single translation pass.
#[derive(Debug)]
pub struct PassResult {
    /// The transformed tree.
    pub schema: Value,
    /// Rewrites performed by this pass, in visit order.
    pub rewrites: Vec<Rewrite>,
}

impl PassResult {
    /// Create a result with a schema and rewrites.
    pub fn with_rewrites(schema: Value, rewrites: Vec<Rewrite>) -> Self {
        Self { schema, rewrites }
    }

    /// Merge this pass's rewrites into a report accumulator.
    ///
    /// Consumes `self` and returns the tree for the next pass in the pipeline.
    pub fn merge_into_report(self, report: &mut Report) -> Value {
        report.rewrites.extend(self.rewrites);
        self.schema
    }
}
