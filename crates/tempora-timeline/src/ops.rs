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

//! Named operators backed by a [`Calculator`].
//!
//! The operator name is the symbol of the arithmetic operation, so two
//! operators built from different calculators still compare equal inside a
//! value function tree.

use crate::function::{NamedBinaryOperator, NamedUnaryOperator};
use std::sync::Arc;
use tempora_calc::calculator::{BinaryOperation, Calculator, UnaryOperation};

/// Wraps one binary calculator operation as a named operator.
pub fn binary<V, C>(calculator: &Arc<C>, operation: BinaryOperation) -> NamedBinaryOperator<V>
where
    C: Calculator<V> + Send + Sync + 'static,
    V: 'static,
{
    let calculator = Arc::clone(calculator);
    NamedBinaryOperator::new(operation.symbol(), move |lhs, rhs| match operation {
        BinaryOperation::Plus => calculator.plus(lhs, rhs),
        BinaryOperation::Minus => calculator.minus(lhs, rhs),
        BinaryOperation::Multiply => calculator.multiply(lhs, rhs),
        BinaryOperation::Divide => calculator.divide(lhs, rhs),
    })
}

/// Wraps one unary calculator operation as a named operator.
pub fn unary<V, C>(calculator: &Arc<C>, operation: UnaryOperation) -> NamedUnaryOperator<V>
where
    C: Calculator<V> + Send + Sync + 'static,
    V: 'static,
{
    let calculator = Arc::clone(calculator);
    NamedUnaryOperator::new(operation.symbol(), move |value| match operation {
        UnaryOperation::Abs => calculator.abs(value),
        UnaryOperation::Negate => calculator.negate(value),
    })
}

#[inline]
pub fn plus<V: 'static, C: Calculator<V> + Send + Sync + 'static>(
    calculator: &Arc<C>,
) -> NamedBinaryOperator<V> {
    binary(calculator, BinaryOperation::Plus)
}

#[inline]
pub fn minus<V: 'static, C: Calculator<V> + Send + Sync + 'static>(
    calculator: &Arc<C>,
) -> NamedBinaryOperator<V> {
    binary(calculator, BinaryOperation::Minus)
}

#[inline]
pub fn multiply<V: 'static, C: Calculator<V> + Send + Sync + 'static>(
    calculator: &Arc<C>,
) -> NamedBinaryOperator<V> {
    binary(calculator, BinaryOperation::Multiply)
}

#[inline]
pub fn divide<V: 'static, C: Calculator<V> + Send + Sync + 'static>(
    calculator: &Arc<C>,
) -> NamedBinaryOperator<V> {
    binary(calculator, BinaryOperation::Divide)
}

#[inline]
pub fn abs<V: 'static, C: Calculator<V> + Send + Sync + 'static>(
    calculator: &Arc<C>,
) -> NamedUnaryOperator<V> {
    unary(calculator, UnaryOperation::Abs)
}

#[inline]
pub fn negate<V: 'static, C: Calculator<V> + Send + Sync + 'static>(
    calculator: &Arc<C>,
) -> NamedUnaryOperator<V> {
    unary(calculator, UnaryOperation::Negate)
}

/// The full operator set of one calculator, built once and passed around.
///
/// # Examples
///
/// ```
/// use tempora_calc::{calculator::NumberCalculator, number::Number};
/// use tempora_timeline::ops::Operators;
///
/// let ops = Operators::new(NumberCalculator::default());
/// assert_eq!(ops.plus.name(), "+");
/// assert_eq!(ops.plus.apply(Number::I32(2), Number::I32(3)), Ok(Number::I32(5)));
/// ```
#[derive(Debug, Clone)]
pub struct Operators<V> {
    pub plus: NamedBinaryOperator<V>,
    pub minus: NamedBinaryOperator<V>,
    pub multiply: NamedBinaryOperator<V>,
    pub divide: NamedBinaryOperator<V>,
    pub abs: NamedUnaryOperator<V>,
    pub negate: NamedUnaryOperator<V>,
}

impl<V: 'static> Operators<V> {
    pub fn new<C>(calculator: C) -> Self
    where
        C: Calculator<V> + Send + Sync + 'static,
    {
        let calculator = Arc::new(calculator);
        Self {
            plus: plus(&calculator),
            minus: minus(&calculator),
            multiply: multiply(&calculator),
            divide: divide(&calculator),
            abs: abs(&calculator),
            negate: negate(&calculator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_calc::{
        calculator::NumberCalculator,
        config::{CalculatorConfig, DecimalDivision},
        err::NumberError,
        number::Number,
    };

    #[test]
    fn test_operator_names() {
        let ops: Operators<Number> = Operators::new(NumberCalculator::default());
        let names = [
            ops.plus.name(),
            ops.minus.name(),
            ops.multiply.name(),
            ops.divide.name(),
            ops.abs.name(),
            ops.negate.name(),
        ];
        assert_eq!(names, ["+", "-", "*", "/", "abs", "neg"]);
    }

    #[test]
    fn test_operators_delegate_to_calculator() {
        let ops: Operators<Number> = Operators::new(NumberCalculator::default());
        assert_eq!(ops.minus.apply(Number::I32(2), Number::F64(0.5)), Ok(Number::F64(1.5)));
        assert_eq!(ops.multiply.apply(Number::I64(6), Number::I32(7)), Ok(Number::I64(42)));
        assert_eq!(ops.divide.apply(Number::I32(7), Number::I32(2)), Ok(Number::I32(3)));
        assert_eq!(ops.abs.apply(Number::I32(-4)), Ok(Number::I32(4)));
        assert_eq!(ops.negate.apply(Number::F64(1.0)), Ok(Number::F64(-1.0)));
    }

    #[test]
    fn test_operator_errors_propagate() {
        let ops: Operators<Number> = Operators::new(NumberCalculator::default());
        assert!(matches!(
            ops.divide.apply(Number::I32(1), Number::I32(0)),
            Err(NumberError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_operators_from_different_calculators_are_equal() {
        let exact = Arc::new(NumberCalculator::default());
        let rounded = Arc::new(NumberCalculator::new(
            CalculatorConfig::default().with_decimal_division(DecimalDivision::Rounded {
                scale: 2,
                strategy: rust_decimal::RoundingStrategy::MidpointNearestEven,
            }),
        ));
        let a: NamedBinaryOperator<Number> = divide(&exact);
        let b: NamedBinaryOperator<Number> = divide(&rounded);
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_calculator() {
        struct Saturating;

        impl Calculator<i8> for Saturating {
            fn plus(&self, lhs: i8, rhs: i8) -> Result<i8, NumberError> {
                Ok(lhs.saturating_add(rhs))
            }
            fn minus(&self, lhs: i8, rhs: i8) -> Result<i8, NumberError> {
                Ok(lhs.saturating_sub(rhs))
            }
            fn multiply(&self, lhs: i8, rhs: i8) -> Result<i8, NumberError> {
                Ok(lhs.saturating_mul(rhs))
            }
            fn divide(&self, lhs: i8, rhs: i8) -> Result<i8, NumberError> {
                Ok(lhs.checked_div(rhs).unwrap_or(0))
            }
            fn abs(&self, value: i8) -> Result<i8, NumberError> {
                Ok(value.saturating_abs())
            }
            fn negate(&self, value: i8) -> Result<i8, NumberError> {
                Ok(value.saturating_neg())
            }
            fn convert_to_value(
                &self,
                _raw: tempora_calc::number::RawValue<'_>,
            ) -> Result<i8, NumberError> {
                Ok(0)
            }
        }

        let ops = Operators::new(Saturating);
        assert_eq!(ops.plus.apply(100, 100), Ok(i8::MAX));
        assert_eq!(ops.negate.apply(i8::MIN), Ok(i8::MAX));
    }
}
