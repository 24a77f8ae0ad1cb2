// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::number::NumberKind;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error(
    "No numeric representation in the preference order matches operand kinds [{left}, {}]",
    display_kind(.right)
)]
pub struct NoMatchingRepresentationError {
    left: NumberKind,
    right: Option<NumberKind>,
}

fn display_kind(kind: &Option<NumberKind>) -> String {
    kind.map_or_else(|| "-".to_string(), |k| k.to_string())
}

impl NoMatchingRepresentationError {
    #[inline]
    pub fn new(left: NumberKind, right: Option<NumberKind>) -> Self {
        Self { left, right }
    }

    #[inline]
    pub fn left(&self) -> NumberKind {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<NumberKind> {
        self.right
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("Invalid conversion of {input} to {target}: {reason}")]
pub struct InvalidConversionError {
    target: NumberKind,
    input: String,
    reason: String,
}

impl InvalidConversionError {
    #[inline]
    pub fn new(target: NumberKind, input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target,
            input: input.into(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn target(&self) -> NumberKind {
        self.target
    }

    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("Arithmetic overflow in `{operation}` on {kind}")]
pub struct ArithmeticOverflowError {
    operation: &'static str,
    kind: NumberKind,
}

impl ArithmeticOverflowError {
    #[inline]
    pub fn new(operation: &'static str, kind: NumberKind) -> Self {
        Self { operation, kind }
    }

    /// The symbol of the failing operation, e.g. `+` or `neg`.
    #[inline]
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    #[inline]
    pub fn kind(&self) -> NumberKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("Division by zero on {kind}")]
pub struct DivisionByZeroError {
    kind: NumberKind,
}

impl DivisionByZeroError {
    #[inline]
    pub fn new(kind: NumberKind) -> Self {
        Self { kind }
    }

    #[inline]
    pub fn kind(&self) -> NumberKind {
        self.kind
    }
}

/// The exact quotient of two decimals has no finite representation within the
/// decimal precision, and no rounding was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("Quotient {dividend} / {divisor} is not representable exactly; configure a rounding scale")]
pub struct NonTerminatingDecimalError {
    dividend: Decimal,
    divisor: Decimal,
}

impl NonTerminatingDecimalError {
    #[inline]
    pub fn new(dividend: Decimal, divisor: Decimal) -> Self {
        Self { dividend, divisor }
    }

    #[inline]
    pub fn dividend(&self) -> Decimal {
        self.dividend
    }

    #[inline]
    pub fn divisor(&self) -> Decimal {
        self.divisor
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error(transparent)]
    NoMatchingRepresentation(#[from] NoMatchingRepresentationError),
    #[error(transparent)]
    InvalidConversion(#[from] InvalidConversionError),
    #[error(transparent)]
    Overflow(#[from] ArithmeticOverflowError),
    #[error(transparent)]
    DivisionByZero(#[from] DivisionByZeroError),
    #[error(transparent)]
    NonTerminatingDecimal(#[from] NonTerminatingDecimalError),
}

impl NumberError {
    /// Returns `true` for failures of the arithmetic itself, as opposed to
    /// failures to pick or convert into a representation.
    #[inline]
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            NumberError::Overflow(_)
                | NumberError::DivisionByZero(_)
                | NumberError::NonTerminatingDecimal(_)
        )
    }
}
