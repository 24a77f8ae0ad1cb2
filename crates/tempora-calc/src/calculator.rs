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

//! # Calculators
//!
//! [`Calculator`] is the arithmetic capability a timeline operator is built on.
//! [`NumberCalculator`] implements it for [`Number`] by promoting both operands
//! to a common representation before the primitive operation runs.
//!
//! The representation is chosen per call: it is the first kind in the
//! configured preference order that matches the kind of either operand. With
//! the default order `decimal > f64 > f32 > i64 > i32`, adding an `i32` to an
//! `f64` yields an `f64`, and adding an `i32` to a decimal yields a decimal.
//!
//! Integer arithmetic is overflow-checked and division truncates toward zero.
//! Float arithmetic follows IEEE 754. Decimal division is exact unless the
//! configuration asks for rounding; see [`DecimalDivision`].

use crate::{
    config::{CalculatorConfig, DecimalDivision},
    err::{
        ArithmeticOverflowError, DivisionByZeroError, InvalidConversionError,
        NoMatchingRepresentationError, NonTerminatingDecimalError, NumberError,
    },
    number::{Number, NumberKind, RawValue, parse_decimal},
};
use rust_decimal::Decimal;
use std::fmt::{self, Display};
use tracing::trace;

/// Arithmetic over values of type `V`.
///
/// Every operation is fallible so that implementations can report overflow
/// and inexact division instead of silently producing a wrong value.
pub trait Calculator<V> {
    fn plus(&self, lhs: V, rhs: V) -> Result<V, NumberError>;

    fn minus(&self, lhs: V, rhs: V) -> Result<V, NumberError>;

    fn multiply(&self, lhs: V, rhs: V) -> Result<V, NumberError>;

    fn divide(&self, lhs: V, rhs: V) -> Result<V, NumberError>;

    fn abs(&self, value: V) -> Result<V, NumberError>;

    fn negate(&self, value: V) -> Result<V, NumberError>;

    /// Converts an external value into `V`.
    fn convert_to_value(&self, raw: RawValue<'_>) -> Result<V, NumberError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperation {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl BinaryOperation {
    #[inline]
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOperation::Plus => "+",
            BinaryOperation::Minus => "-",
            BinaryOperation::Multiply => "*",
            BinaryOperation::Divide => "/",
        }
    }
}

impl Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperation {
    Abs,
    Negate,
}

impl UnaryOperation {
    #[inline]
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOperation::Abs => "abs",
            UnaryOperation::Negate => "neg",
        }
    }
}

impl Display for UnaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Primitive arithmetic in one concrete representation.
trait Representation: Copy {
    const KIND: NumberKind;

    fn plus(self, rhs: Self) -> Result<Self, NumberError>;
    fn minus(self, rhs: Self) -> Result<Self, NumberError>;
    fn multiply(self, rhs: Self) -> Result<Self, NumberError>;
    fn divide(self, rhs: Self, division: DecimalDivision) -> Result<Self, NumberError>;
    fn abs(self) -> Result<Self, NumberError>;
    fn negate(self) -> Result<Self, NumberError>;
}

#[inline]
fn overflow(operation: &'static str, kind: NumberKind) -> NumberError {
    ArithmeticOverflowError::new(operation, kind).into()
}

macro_rules! integral_representation {
    ($t:ty, $kind:expr) => {
        impl Representation for $t {
            const KIND: NumberKind = $kind;

            #[inline]
            fn plus(self, rhs: Self) -> Result<Self, NumberError> {
                <$t>::checked_add(self, rhs).ok_or_else(|| overflow("+", Self::KIND))
            }

            #[inline]
            fn minus(self, rhs: Self) -> Result<Self, NumberError> {
                <$t>::checked_sub(self, rhs).ok_or_else(|| overflow("-", Self::KIND))
            }

            #[inline]
            fn multiply(self, rhs: Self) -> Result<Self, NumberError> {
                <$t>::checked_mul(self, rhs).ok_or_else(|| overflow("*", Self::KIND))
            }

            #[inline]
            fn divide(self, rhs: Self, _division: DecimalDivision) -> Result<Self, NumberError> {
                if rhs == 0 {
                    return Err(DivisionByZeroError::new(Self::KIND).into());
                }
                // Truncates toward zero; only `MIN / -1` can overflow here.
                <$t>::checked_div(self, rhs).ok_or_else(|| overflow("/", Self::KIND))
            }

            #[inline]
            fn abs(self) -> Result<Self, NumberError> {
                <$t>::checked_abs(self).ok_or_else(|| overflow("abs", Self::KIND))
            }

            #[inline]
            fn negate(self) -> Result<Self, NumberError> {
                <$t>::checked_neg(self).ok_or_else(|| overflow("neg", Self::KIND))
            }
        }
    };
}

integral_representation!(i64, NumberKind::I64);
integral_representation!(i32, NumberKind::I32);

macro_rules! float_representation {
    ($t:ty, $kind:expr) => {
        impl Representation for $t {
            const KIND: NumberKind = $kind;

            #[inline]
            fn plus(self, rhs: Self) -> Result<Self, NumberError> {
                Ok(self + rhs)
            }

            #[inline]
            fn minus(self, rhs: Self) -> Result<Self, NumberError> {
                Ok(self - rhs)
            }

            #[inline]
            fn multiply(self, rhs: Self) -> Result<Self, NumberError> {
                Ok(self * rhs)
            }

            #[inline]
            fn divide(self, rhs: Self, _division: DecimalDivision) -> Result<Self, NumberError> {
                Ok(self / rhs)
            }

            #[inline]
            fn abs(self) -> Result<Self, NumberError> {
                Ok(<$t>::abs(self))
            }

            #[inline]
            fn negate(self) -> Result<Self, NumberError> {
                Ok(-self)
            }
        }
    };
}

float_representation!(f64, NumberKind::F64);
float_representation!(f32, NumberKind::F32);

impl Representation for Decimal {
    const KIND: NumberKind = NumberKind::Decimal;

    #[inline]
    fn plus(self, rhs: Self) -> Result<Self, NumberError> {
        Decimal::checked_add(self, rhs).ok_or_else(|| overflow("+", Self::KIND))
    }

    #[inline]
    fn minus(self, rhs: Self) -> Result<Self, NumberError> {
        Decimal::checked_sub(self, rhs).ok_or_else(|| overflow("-", Self::KIND))
    }

    #[inline]
    fn multiply(self, rhs: Self) -> Result<Self, NumberError> {
        Decimal::checked_mul(self, rhs).ok_or_else(|| overflow("*", Self::KIND))
    }

    fn divide(self, rhs: Self, division: DecimalDivision) -> Result<Self, NumberError> {
        if rhs.is_zero() {
            return Err(DivisionByZeroError::new(Self::KIND).into());
        }
        match division {
            DecimalDivision::Exact => exact_quotient(self, rhs),
            DecimalDivision::Rounded { scale, strategy } => Decimal::checked_div(self, rhs)
                .map(|q| q.round_dp_with_strategy(scale, strategy))
                .ok_or_else(|| overflow("/", Self::KIND)),
        }
    }

    #[inline]
    fn abs(self) -> Result<Self, NumberError> {
        Ok(Decimal::abs(&self))
    }

    #[inline]
    fn negate(self) -> Result<Self, NumberError> {
        Ok(-self)
    }
}

/// Largest scale a decimal can carry.
const MAX_DECIMAL_SCALE: i64 = 28;

/// Divides without rounding. Fails unless the quotient terminates and fits
/// the decimal precision.
///
/// The quotient is built from the mantissas with integer arithmetic only.
/// `(ma / 10^sa) / (mb / 10^sb)` reduces to `n / d`. It terminates iff
/// `d = 2^x * 5^y`, and then equals `n * 2^(k - x) * 5^(k - y) / 10^(k + sa - sb)`
/// with `k = max(x, y)`.
fn exact_quotient(dividend: Decimal, divisor: Decimal) -> Result<Decimal, NumberError> {
    let inexact = || NumberError::from(NonTerminatingDecimalError::new(dividend, divisor));
    let too_large = || overflow("/", NumberKind::Decimal);

    let (ma, mb) = (dividend.mantissa(), divisor.mantissa());
    let negative = (ma < 0) != (mb < 0);
    let common = gcd(ma.unsigned_abs(), mb.unsigned_abs());
    let mut numerator = ma.unsigned_abs() / common;
    let (twos, rest) = strip_factor(mb.unsigned_abs() / common, 2);
    let (fives, rest) = strip_factor(rest, 5);
    if rest != 1 {
        return Err(inexact());
    }

    let k = twos.max(fives);
    let mut scale = i64::from(k) + i64::from(dividend.scale()) - i64::from(divisor.scale());
    for _ in twos..k {
        numerator = widen(numerator, 2, &mut scale).ok_or_else(too_large)?;
    }
    for _ in fives..k {
        numerator = widen(numerator, 5, &mut scale).ok_or_else(too_large)?;
    }
    while scale > 0 && numerator % 10 == 0 {
        numerator /= 10;
        scale -= 1;
    }
    if scale < 0 {
        let shift = u32::try_from(-scale).map_err(|_| too_large())?;
        numerator = 10u128
            .checked_pow(shift)
            .and_then(|factor| numerator.checked_mul(factor))
            .ok_or_else(too_large)?;
        scale = 0;
    }
    if scale > MAX_DECIMAL_SCALE {
        return Err(inexact());
    }

    let magnitude = i128::try_from(numerator).map_err(|_| too_large())?;
    let mantissa = if negative { -magnitude } else { magnitude };
    // Scale is within 0..=28 here.
    Decimal::try_from_i128_with_scale(mantissa, scale as u32).map_err(|_| {
        if scale == 0 { too_large() } else { inexact() }
    })
}

/// Multiplies `n` by `factor` (2 or 5), cancelling against the complementary
/// factor of `n` and one power of ten of the scale when possible.
fn widen(n: u128, factor: u128, scale: &mut i64) -> Option<u128> {
    let complement = 10 / factor;
    if *scale > 0 && n % complement == 0 {
        *scale -= 1;
        Some(n / complement)
    } else {
        n.checked_mul(factor)
    }
}

/// Splits `n` into the exponent of `factor` and the remaining cofactor.
fn strip_factor(mut n: u128, factor: u128) -> (u32, u128) {
    let mut exponent = 0;
    while n != 0 && n % factor == 0 {
        n /= factor;
        exponent += 1;
    }
    (exponent, n)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[inline]
fn apply_binary<R: Representation>(
    op: BinaryOperation,
    lhs: R,
    rhs: R,
    division: DecimalDivision,
) -> Result<R, NumberError> {
    match op {
        BinaryOperation::Plus => R::plus(lhs, rhs),
        BinaryOperation::Minus => R::minus(lhs, rhs),
        BinaryOperation::Multiply => R::multiply(lhs, rhs),
        BinaryOperation::Divide => R::divide(lhs, rhs, division),
    }
}

#[inline]
fn apply_unary<R: Representation>(op: UnaryOperation, value: R) -> Result<R, NumberError> {
    match op {
        UnaryOperation::Abs => R::abs(value),
        UnaryOperation::Negate => R::negate(value),
    }
}

/// A [`Calculator`] over [`Number`] that promotes mixed operands.
///
/// The calculator holds its [`CalculatorConfig`] for its whole lifetime; build
/// one per configuration and share it (it is `Send + Sync`).
///
/// # Examples
///
/// ```
/// use tempora_calc::{calculator::{Calculator, NumberCalculator}, number::Number};
///
/// let calc = NumberCalculator::default();
/// assert_eq!(calc.plus(Number::I32(2), Number::F64(3.0)).unwrap(), Number::F64(5.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberCalculator {
    config: CalculatorConfig,
}

impl NumberCalculator {
    #[inline]
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Picks the most preferred representation matching either operand kind.
    pub fn resolve(
        &self,
        left: NumberKind,
        right: Option<NumberKind>,
    ) -> Result<NumberKind, NoMatchingRepresentationError> {
        self.config
            .preference
            .iter()
            .copied()
            .find(|&kind| kind == left || Some(kind) == right)
            .ok_or_else(|| NoMatchingRepresentationError::new(left, right))
    }

    /// Converts an external value into the representation `kind`.
    ///
    /// Numbers are widened or narrowed; text is parsed as a decimal first.
    pub fn convert_to_kind(&self, raw: RawValue<'_>, kind: NumberKind) -> Result<Number, NumberError> {
        let value = self.convert_to_value(raw)?;
        Ok(value.convert(kind)?)
    }

    /// Applies a binary operation after promoting both operands.
    pub fn apply_binary(
        &self,
        op: BinaryOperation,
        lhs: Number,
        rhs: Number,
    ) -> Result<Number, NumberError> {
        let kind = self.resolve(lhs.kind(), Some(rhs.kind()))?;
        trace!(%op, %kind, lhs = %lhs, rhs = %rhs, "promoted operands");
        let division = self.config.decimal_division;
        match kind {
            NumberKind::Decimal => {
                apply_binary(op, lhs.to_decimal()?, rhs.to_decimal()?, division).map(Number::Decimal)
            }
            NumberKind::F64 => apply_binary(op, lhs.to_f64(), rhs.to_f64(), division).map(Number::F64),
            NumberKind::F32 => apply_binary(op, lhs.to_f32(), rhs.to_f32(), division).map(Number::F32),
            NumberKind::I64 => {
                apply_binary(op, lhs.to_i64()?, rhs.to_i64()?, division).map(Number::I64)
            }
            NumberKind::I32 => {
                apply_binary(op, lhs.to_i32()?, rhs.to_i32()?, division).map(Number::I32)
            }
        }
    }

    /// Applies a unary operation in the representation the operand resolves to.
    pub fn apply_unary(&self, op: UnaryOperation, value: Number) -> Result<Number, NumberError> {
        let kind = self.resolve(value.kind(), None)?;
        trace!(%op, %kind, value = %value, "resolved operand");
        match kind {
            NumberKind::Decimal => apply_unary(op, value.to_decimal()?).map(Number::Decimal),
            NumberKind::F64 => apply_unary(op, value.to_f64()).map(Number::F64),
            NumberKind::F32 => apply_unary(op, value.to_f32()).map(Number::F32),
            NumberKind::I64 => apply_unary(op, value.to_i64()?).map(Number::I64),
            NumberKind::I32 => apply_unary(op, value.to_i32()?).map(Number::I32),
        }
    }
}

impl Calculator<Number> for NumberCalculator {
    #[inline]
    fn plus(&self, lhs: Number, rhs: Number) -> Result<Number, NumberError> {
        self.apply_binary(BinaryOperation::Plus, lhs, rhs)
    }

    #[inline]
    fn minus(&self, lhs: Number, rhs: Number) -> Result<Number, NumberError> {
        self.apply_binary(BinaryOperation::Minus, lhs, rhs)
    }

    #[inline]
    fn multiply(&self, lhs: Number, rhs: Number) -> Result<Number, NumberError> {
        self.apply_binary(BinaryOperation::Multiply, lhs, rhs)
    }

    #[inline]
    fn divide(&self, lhs: Number, rhs: Number) -> Result<Number, NumberError> {
        self.apply_binary(BinaryOperation::Divide, lhs, rhs)
    }

    #[inline]
    fn abs(&self, value: Number) -> Result<Number, NumberError> {
        self.apply_unary(UnaryOperation::Abs, value)
    }

    #[inline]
    fn negate(&self, value: Number) -> Result<Number, NumberError> {
        self.apply_unary(UnaryOperation::Negate, value)
    }

    fn convert_to_value(&self, raw: RawValue<'_>) -> Result<Number, NumberError> {
        match raw {
            RawValue::Number(n) => Ok(n),
            RawValue::Text(text) => Ok(Number::Decimal(parse_decimal(&text)?)),
            other => Err(InvalidConversionError::new(
                NumberKind::Decimal,
                other.to_string(),
                "expected a number or decimal text",
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::RoundingStrategy;
    use static_assertions::assert_impl_all;
    use std::str::FromStr;

    assert_impl_all!(NumberCalculator: Send, Sync, Clone);

    fn dec(s: &str) -> Number {
        Number::Decimal(Decimal::from_str(s).unwrap())
    }

    fn calc() -> NumberCalculator {
        NumberCalculator::default()
    }

    #[test]
    fn test_int_plus_double_promotes_to_double() {
        assert_eq!(calc().plus(Number::I32(2), Number::F64(3.0)).unwrap(), Number::F64(5.0));
    }

    #[test]
    fn test_decimal_plus_int_promotes_to_decimal() {
        assert_eq!(calc().plus(dec("1.1"), Number::I32(2)).unwrap(), dec("3.1"));
    }

    #[test]
    fn test_promotion_order() {
        let c = calc();
        assert_eq!(c.resolve(NumberKind::I32, Some(NumberKind::I64)).unwrap(), NumberKind::I64);
        assert_eq!(c.resolve(NumberKind::I64, Some(NumberKind::F32)).unwrap(), NumberKind::F32);
        assert_eq!(c.resolve(NumberKind::F32, Some(NumberKind::F64)).unwrap(), NumberKind::F64);
        assert_eq!(c.resolve(NumberKind::F64, Some(NumberKind::Decimal)).unwrap(), NumberKind::Decimal);
        assert_eq!(c.resolve(NumberKind::I32, None).unwrap(), NumberKind::I32);
    }

    #[test]
    fn test_same_kind_stays_in_kind() {
        assert_eq!(calc().multiply(Number::I32(6), Number::I32(7)).unwrap(), Number::I32(42));
        assert_eq!(calc().minus(Number::F32(1.5), Number::F32(0.5)).unwrap(), Number::F32(1.0));
    }

    #[test]
    fn test_integer_division_truncates_toward_zero() {
        assert_eq!(calc().divide(Number::I64(7), Number::I64(2)).unwrap(), Number::I64(3));
        assert_eq!(calc().divide(Number::I64(-7), Number::I64(2)).unwrap(), Number::I64(-3));
    }

    #[test]
    fn test_integer_division_by_zero_fails() {
        let err = calc().divide(Number::I32(1), Number::I32(0)).unwrap_err();
        assert_eq!(err, NumberError::DivisionByZero(DivisionByZeroError::new(NumberKind::I32)));
    }

    #[test]
    fn test_integer_overflow_fails() {
        let err = calc().plus(Number::I64(i64::MAX), Number::I64(1)).unwrap_err();
        assert_eq!(err, NumberError::Overflow(ArithmeticOverflowError::new("+", NumberKind::I64)));
        assert!(err.is_arithmetic());
        assert!(calc().divide(Number::I32(i32::MIN), Number::I32(-1)).is_err());
    }

    #[test]
    fn test_abs_and_negate_are_checked_on_integers() {
        assert_eq!(calc().abs(Number::I32(-5)).unwrap(), Number::I32(5));
        assert_eq!(calc().negate(Number::I64(5)).unwrap(), Number::I64(-5));
        assert!(calc().abs(Number::I32(i32::MIN)).is_err());
        assert!(calc().negate(Number::I64(i64::MIN)).is_err());
    }

    #[test]
    fn test_float_semantics() {
        assert_eq!(
            calc().divide(Number::F64(1.0), Number::F64(0.0)).unwrap(),
            Number::F64(f64::INFINITY)
        );
        assert_eq!(calc().negate(Number::F64(2.5)).unwrap(), Number::F64(-2.5));
        assert_eq!(calc().abs(Number::F32(-2.5)).unwrap(), Number::F32(2.5));
    }

    #[test]
    fn test_decimal_exact_division() {
        assert_eq!(calc().divide(dec("1.1"), Number::I32(2)).unwrap(), dec("0.55"));
        assert_eq!(calc().divide(dec("10"), dec("0.25")).unwrap(), dec("40"));
    }

    #[test]
    fn test_decimal_non_terminating_division_fails() {
        let err = calc().divide(dec("1"), dec("3")).unwrap_err();
        assert!(matches!(err, NumberError::NonTerminatingDecimal(_)));
    }

    #[test]
    fn test_decimal_division_beyond_precision_fails() {
        // 1.25e-28 terminates but needs 30 fractional digits.
        let err = calc().divide(dec("0.0000000000000000000000000001"), dec("0.8")).unwrap_err();
        assert!(matches!(err, NumberError::NonTerminatingDecimal(_)));
        // 2^-40 terminates after 40 fractional digits.
        let err = calc().divide(dec("1"), dec("1099511627776")).unwrap_err();
        assert!(matches!(err, NumberError::NonTerminatingDecimal(_)));
    }

    #[test]
    fn test_decimal_exact_division_edge_cases() {
        assert_eq!(calc().divide(dec("1"), dec("1024")).unwrap(), dec("0.0009765625"));
        assert_eq!(calc().divide(dec("-3"), dec("0.06")).unwrap(), dec("-50"));
        assert_eq!(calc().divide(dec("0"), dec("7")).unwrap(), dec("0"));
        assert_eq!(
            calc().divide(dec("0.000000000000000000000000001"), dec("0.1")).unwrap(),
            dec("0.00000000000000000000000001")
        );
        assert!(matches!(
            calc().divide(dec("10000000000000000000000000000"), dec("0.01")),
            Err(NumberError::Overflow(_))
        ));
    }

    #[test]
    fn test_decimal_rounded_division() {
        let c = NumberCalculator::new(CalculatorConfig::default().with_decimal_division(
            DecimalDivision::Rounded {
                scale: 4,
                strategy: RoundingStrategy::MidpointAwayFromZero,
            },
        ));
        assert_eq!(c.divide(dec("2"), dec("3")).unwrap(), dec("0.6667"));
    }

    #[test]
    fn test_decimal_division_by_zero_fails() {
        let err = calc().divide(dec("1"), dec("0")).unwrap_err();
        assert!(matches!(err, NumberError::DivisionByZero(_)));
    }

    #[test]
    fn test_decimal_abs_negate() {
        assert_eq!(calc().abs(dec("-1.5")).unwrap(), dec("1.5"));
        assert_eq!(calc().negate(dec("1.5")).unwrap(), dec("-1.5"));
    }

    #[test]
    fn test_no_matching_representation() {
        let c = NumberCalculator::new(CalculatorConfig::default().with_preference([NumberKind::I64]));
        let err = c.plus(Number::F64(1.0), Number::F32(2.0)).unwrap_err();
        assert_eq!(
            err,
            NumberError::NoMatchingRepresentation(NoMatchingRepresentationError::new(
                NumberKind::F64,
                Some(NumberKind::F32)
            ))
        );
        // i32 still promotes into the configured i64.
        assert_eq!(c.plus(Number::I32(1), Number::I64(2)).unwrap(), Number::I64(3));
    }

    #[test]
    fn test_convert_to_value() {
        let c = calc();
        assert_eq!(c.convert_to_value(RawValue::from(4i64)).unwrap(), Number::I64(4));
        assert_eq!(c.convert_to_value(RawValue::from("2.50")).unwrap(), dec("2.5"));
        assert!(matches!(
            c.convert_to_value(RawValue::from(true)).unwrap_err(),
            NumberError::InvalidConversion(_)
        ));
        assert!(c.convert_to_value(RawValue::Missing).is_err());
        assert!(c.convert_to_value(RawValue::from("abc")).is_err());
    }

    #[test]
    fn test_convert_to_kind_narrows_and_widens() {
        let c = calc();
        assert_eq!(c.convert_to_kind(RawValue::from(2.9f64), NumberKind::I32).unwrap(), Number::I32(2));
        assert_eq!(c.convert_to_kind(RawValue::from("7"), NumberKind::F64).unwrap(), Number::F64(7.0));
        assert_eq!(c.convert_to_kind(RawValue::from(3i32), NumberKind::I32).unwrap(), Number::I32(3));
    }

    #[test]
    fn test_strip_factor() {
        assert_eq!(strip_factor(40, 2), (3, 5));
        assert_eq!(strip_factor(5, 5), (1, 1));
        assert_eq!(strip_factor(3, 2), (0, 3));
    }
}
