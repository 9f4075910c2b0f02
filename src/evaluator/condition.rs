use crate::data::Telemetry;
use crate::error::ConditionError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;

/// `${name}` or `$json.name`.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}]+)\}|\$json\.([A-Za-z0-9_]+)").expect("placeholder pattern is valid")
});

/// The first `<number> <op> <number>` in a string. Two-character operators are listed
/// first so `>=` is never read as `>`.
static COMPARISON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(-?\d+(?:\.\d+)?)\s*(==|!=|>=|<=|≥|≤|>|<)\s*(-?\d+(?:\.\d+)?)")
        .expect("comparison pattern is valid")
});

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Smaller,
    SmallerOrEqual,
}

impl ComparisonOp {
    /// Accepts the ASCII operators plus `≥`/`≤`, which the workflow parser emits for
    /// `largerEqual`/`smallerEqual`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "==" => Some(ComparisonOp::Equal),
            "!=" => Some(ComparisonOp::NotEqual),
            ">" => Some(ComparisonOp::Greater),
            ">=" | "≥" => Some(ComparisonOp::GreaterOrEqual),
            "<" => Some(ComparisonOp::Smaller),
            "<=" | "≤" => Some(ComparisonOp::SmallerOrEqual),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Equal => "==",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterOrEqual => ">=",
            ComparisonOp::Smaller => "<",
            ComparisonOp::SmallerOrEqual => "<=",
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> bool {
        match self {
            ComparisonOp::Equal => left == right,
            ComparisonOp::NotEqual => left != right,
            ComparisonOp::Greater => left > right,
            ComparisonOp::GreaterOrEqual => left >= right,
            ComparisonOp::Smaller => left < right,
            ComparisonOp::SmallerOrEqual => left <= right,
        }
    }
}

/// A single numeric comparison: left operand, operator, right operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub left: f64,
    pub op: ComparisonOp,
    pub right: f64,
}

impl Comparison {
    /// Finds the first comparison in an already substituted string.
    pub fn find(text: &str) -> Result<Self, ConditionError> {
        let caps = COMPARISON_RE
            .captures(text)
            .ok_or_else(|| ConditionError::NoComparison(text.to_string()))?;
        let left = parse_operand(&caps[1])?;
        let op = ComparisonOp::parse(&caps[2])
            .ok_or_else(|| ConditionError::NoComparison(text.to_string()))?;
        let right = parse_operand(&caps[3])?;
        Ok(Self { left, op, right })
    }

    pub fn holds(&self) -> bool {
        self.op.apply(self.left, self.right)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_number(self.left),
            self.op.symbol(),
            format_number(self.right)
        )
    }
}

fn parse_operand(token: &str) -> Result<f64, ConditionError> {
    token
        .parse::<f64>()
        .map_err(|_| ConditionError::InvalidNumber(token.to_string()))
}

/// Prints integral values without a fractional part, like the readings are written.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Evaluates condition strings of the form `${h2} > 100` against telemetry.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Replaces every placeholder whose name has a reading with that reading. Unknown
    /// placeholders are left untouched.
    pub fn substitute<'a>(condition: &'a str, telemetry: &Telemetry) -> Cow<'a, str> {
        Self::map_placeholders(condition, |name, _| telemetry.get(name).map(format_number))
    }

    /// Rewrites placeholders through `f`, called with the placeholder name and the full
    /// token. Returning `None` keeps the token as written.
    pub fn map_placeholders<'a, F>(condition: &'a str, mut f: F) -> Cow<'a, str>
    where
        F: FnMut(&str, &str) -> Option<String>,
    {
        PLACEHOLDER_RE.replace_all(condition, |caps: &Captures| {
            let token = &caps[0];
            f(placeholder_name(caps), token).unwrap_or_else(|| token.to_string())
        })
    }

    /// Strict evaluation. Fails on empty input, leftover placeholders or a missing
    /// comparison.
    pub fn try_evaluate(condition: &str, telemetry: &Telemetry) -> Result<bool, ConditionError> {
        Self::resolve(condition, telemetry).map(|c| c.holds())
    }

    /// Substitutes telemetry and extracts the comparison without evaluating it.
    pub fn resolve(condition: &str, telemetry: &Telemetry) -> Result<Comparison, ConditionError> {
        if condition.trim().is_empty() {
            return Err(ConditionError::EmptyCondition);
        }
        let substituted = Self::substitute(condition, telemetry);
        if let Some(caps) = PLACEHOLDER_RE.captures(&substituted) {
            return Err(ConditionError::UnresolvedPlaceholder {
                condition: condition.to_string(),
                placeholder: placeholder_name(&caps).to_string(),
            });
        }
        Comparison::find(&substituted)
    }

    /// Lenient evaluation: anything that cannot be evaluated is `false`.
    pub fn evaluate(condition: &str, telemetry: &Telemetry) -> bool {
        Self::try_evaluate(condition, telemetry).unwrap_or(false)
    }

    /// Names of every placeholder referenced by `condition`, in order of appearance.
    pub fn placeholders(condition: &str) -> Vec<String> {
        PLACEHOLDER_RE
            .captures_iter(condition)
            .map(|caps| placeholder_name(&caps).to_string())
            .collect()
    }
}

fn placeholder_name<'c>(caps: &'c Captures) -> &'c str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default()
}
