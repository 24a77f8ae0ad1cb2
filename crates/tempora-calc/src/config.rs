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

//! # Calculator Configuration
//!
//! A [`CalculatorConfig`] is built once and handed to a
//! [`NumberCalculator`](crate::calculator::NumberCalculator). It fixes the
//! promotion order of the numeric representations and how decimal quotients
//! are treated.
//!
//! ```
//! use rust_decimal::RoundingStrategy;
//! use tempora_calc::{
//!     calculator::{Calculator, NumberCalculator},
//!     config::{CalculatorConfig, DecimalDivision},
//!     number::{Number, NumberKind},
//! };
//!
//! let config = CalculatorConfig::default()
//!     .with_preference([NumberKind::F64, NumberKind::I64])
//!     .with_decimal_division(DecimalDivision::Rounded {
//!         scale: 2,
//!         strategy: RoundingStrategy::MidpointNearestEven,
//!     });
//! let calc = NumberCalculator::new(config);
//! assert_eq!(calc.plus(Number::I64(1), Number::F64(0.5)), Ok(Number::F64(1.5)));
//! assert!(calc.plus(Number::I32(1), Number::I32(2)).is_err());
//! ```

use crate::number::NumberKind;
use rust_decimal::RoundingStrategy;

/// How a decimal division whose quotient cannot be held exactly is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalDivision {
    /// The quotient must be exact. A quotient that does not terminate, or
    /// needs more than 28 fractional digits, is an error.
    #[default]
    Exact,
    /// The quotient is rounded to `scale` fractional digits.
    Rounded {
        scale: u32,
        strategy: RoundingStrategy,
    },
}

/// Settings of a [`NumberCalculator`](crate::calculator::NumberCalculator).
///
/// The default promotes along `decimal > f64 > f32 > i64 > i32` and divides
/// decimals exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// Representations in promotion order, most preferred first. Operands whose
    /// kinds are all missing from this list cannot be combined.
    pub preference: Vec<NumberKind>,
    pub decimal_division: DecimalDivision,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            preference: NumberKind::ALL.to_vec(),
            decimal_division: DecimalDivision::Exact,
        }
    }
}

impl CalculatorConfig {
    #[inline]
    pub fn with_decimal_division(mut self, decimal_division: DecimalDivision) -> Self {
        self.decimal_division = decimal_division;
        self
    }

    #[inline]
    pub fn with_preference(mut self, preference: impl IntoIterator<Item = NumberKind>) -> Self {
        self.preference = preference.into_iter().collect();
        self
    }
}
