//! Long division problem and trace types
//!
//! A trace is the flat, ordered list of atomic steps a learner walks
//! through. Each step is anchored to a dividend column so the layout engine
//! can place digits without knowing anything about pixels.

use serde::{Deserialize, Serialize};
use crate::error::{DiagramError, Result};

/// What a single trace step does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Setup,
    Check,
    Divide,
    Multiply,
    Subtract,
    BringDown,
    Remainder,
    Complete,
}

impl StepKind {
    /// Kinds that make up one divide/multiply/subtract cycle
    pub fn is_cycle_kind(self) -> bool {
        matches!(
            self,
            StepKind::Divide | StepKind::Multiply | StepKind::Subtract | StepKind::BringDown
        )
    }

    /// Kinds that close a trace
    pub fn is_terminal(self) -> bool {
        matches!(self, StepKind::Remainder | StepKind::Complete)
    }

    /// Position within a cycle (divide → multiply → subtract → bring_down)
    pub fn cycle_order(self) -> Option<u8> {
        match self {
            StepKind::Divide => Some(0),
            StepKind::Multiply => Some(1),
            StepKind::Subtract => Some(2),
            StepKind::BringDown => Some(3),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Setup => "setup",
            StepKind::Check => "check",
            StepKind::Divide => "divide",
            StepKind::Multiply => "multiply",
            StepKind::Subtract => "subtract",
            StepKind::BringDown => "bring_down",
            StepKind::Remainder => "remainder",
            StepKind::Complete => "complete",
        }
    }
}

/// One atomic step of a worked long division
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionStep {
    /// Position in the full trace, strictly increasing from 0
    pub step_index: u32,

    pub kind: StepKind,

    /// Dividend column (0 = most significant digit) the result's last digit sits under
    pub column_position: i32,

    /// Present on `divide` steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotient_digit: Option<u8>,

    /// Present on `multiply` steps: quotient digit × divisor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<u32>,

    /// Present on `subtract` steps: working number − product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difference: Option<u32>,

    /// Present on `bring_down` steps: difference with the next digit appended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_number: Option<u32>,

    /// Present on `remainder` steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remainder: Option<u32>,
}

impl DivisionStep {
    /// A step with no kind-specific payload
    pub fn new(step_index: u32, kind: StepKind, column_position: i32) -> Self {
        Self {
            step_index,
            kind,
            column_position,
            quotient_digit: None,
            product: None,
            difference: None,
            working_number: None,
            remainder: None,
        }
    }

    pub fn divide(step_index: u32, column_position: i32, digit: u8) -> Self {
        Self {
            quotient_digit: Some(digit),
            ..Self::new(step_index, StepKind::Divide, column_position)
        }
    }

    pub fn multiply(step_index: u32, column_position: i32, product: u32) -> Self {
        Self {
            product: Some(product),
            ..Self::new(step_index, StepKind::Multiply, column_position)
        }
    }

    pub fn subtract(step_index: u32, column_position: i32, difference: u32) -> Self {
        Self {
            difference: Some(difference),
            ..Self::new(step_index, StepKind::Subtract, column_position)
        }
    }

    pub fn bring_down(step_index: u32, column_position: i32, working_number: u32) -> Self {
        Self {
            working_number: Some(working_number),
            ..Self::new(step_index, StepKind::BringDown, column_position)
        }
    }

    pub fn remainder(step_index: u32, column_position: i32, remainder: u32) -> Self {
        Self {
            remainder: Some(remainder),
            ..Self::new(step_index, StepKind::Remainder, column_position)
        }
    }

    /// True when the payload required by `kind` is present
    pub fn has_required_payload(&self) -> bool {
        match self.kind {
            StepKind::Divide => self.quotient_digit.is_some(),
            StepKind::Multiply => self.product.is_some(),
            StepKind::Subtract => self.difference.is_some(),
            StepKind::BringDown => self.working_number.is_some(),
            StepKind::Remainder => self.remainder.is_some(),
            StepKind::Setup | StepKind::Check | StepKind::Complete => true,
        }
    }
}

/// Problem constants: dividend ÷ divisor = quotient r remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProblemInput")]
pub struct DividendDivisor {
    pub dividend: u32,
    pub divisor: u32,
    pub quotient: u32,
    pub remainder: u32,
}

/// Wire form of a problem; quotient and remainder are always recomputed
#[derive(Deserialize)]
struct ProblemInput {
    dividend: u32,
    divisor: u32,
}

impl TryFrom<ProblemInput> for DividendDivisor {
    type Error = DiagramError;

    fn try_from(input: ProblemInput) -> Result<Self> {
        DividendDivisor::new(input.dividend, input.divisor)
    }
}

impl DividendDivisor {
    /// Fails with `InvalidDivisor` when `divisor` is 0
    pub fn new(dividend: u32, divisor: u32) -> Result<Self> {
        if divisor == 0 {
            return Err(DiagramError::InvalidDivisor);
        }
        Ok(Self {
            dividend,
            divisor,
            quotient: dividend / divisor,
            remainder: dividend % divisor,
        })
    }

    /// Decimal digits of the dividend, most significant first
    pub fn dividend_digits(&self) -> Vec<u8> {
        crate::division::columns::digits_of(self.dividend)
    }

    /// Number of dividend columns
    pub fn dividend_len(&self) -> usize {
        crate::division::columns::digit_count(self.dividend)
    }

    /// dividend = divisor × quotient + remainder, 0 ≤ remainder < divisor
    pub fn satisfies_identity(&self) -> bool {
        let rebuilt = self.divisor as u64 * self.quotient as u64 + self.remainder as u64;
        rebuilt == self.dividend as u64 && self.remainder < self.divisor
    }
}
