//! The pipeline executor: a left-to-right fold of a recipe's steps over an input.
//!
//! It is deliberately non-strategic. It runs every step in order, feeds each
//! output to the next module, and stops at the first failure, tagging it with
//! the failing step's name and 1-based position. Nothing is written back to
//! any manager here; callers decide what to do with the final value.

use super::Step;
use crate::data::Data;
use crate::error::DecodexError;

pub(crate) fn execute_linear_pipeline(input: &Data, steps: &[Step]) -> Result<Data, DecodexError> {
    let mut current = input.clone();

    for (idx, step) in steps.iter().enumerate() {
        let position = idx + 1;
        let next = step
            .module()
            .apply(&current)
            .map_err(|source| DecodexError::PipelineError {
                stage: step.name().to_string(),
                position,
                source: Box::new(source),
            })?;

        log_metric!(
            "event" = "pipeline_step",
            "module" = step.name(),
            "position" = position,
            "in_len" = current.len(),
            "out_len" = next.len(),
        );
        current = next;
    }

    Ok(current)
}
