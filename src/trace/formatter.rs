use super::ReasoningStep;
use crate::data::Telemetry;
use crate::evaluator::{ConditionEvaluator, format_number};
use itertools::Itertools;

/// Formats reasoning steps and conditions into human-readable strings.
pub struct TraceFormatter;

impl TraceFormatter {
    /// Annotates every resolvable placeholder with its reading, e.g.
    /// `${h2} > 100` becomes `${h2} (was 150) > 100`.
    pub fn annotate_condition(condition: &str, telemetry: &Telemetry) -> String {
        ConditionEvaluator::map_placeholders(condition, |name, token| {
            telemetry
                .get(name)
                .map(|value| format!("{} (was {})", token, format_number(value)))
        })
        .into_owned()
    }

    /// One line for a single step.
    pub fn format_step(index: usize, step: &ReasoningStep) -> String {
        let gate = step
            .gate_type
            .map(|g| g.to_string())
            .unwrap_or_else(|| "?".to_string());
        let condition = match &step.resolved {
            Some(resolved) if resolved != &step.condition => {
                format!("{} => {}", step.condition, resolved)
            }
            _ => step.condition.clone(),
        };
        format!(
            "Step {} [{}] {} {} -> {}",
            index + 1,
            step.gate_id,
            gate,
            condition,
            step.state
        )
    }

    /// All steps, one per line.
    pub fn format_steps(steps: &[ReasoningStep]) -> String {
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| Self::format_step(i, step))
            .join("\n")
    }
}
