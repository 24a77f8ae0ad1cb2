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

//! # Numeric Representations
//!
//! [`Number`] is the closed set of numeric representations a timeline value can
//! take. [`NumberKind`] is its field-less tag, used to express promotion
//! preferences. [`RawValue`] is the untyped input accepted by
//! [`Calculator::convert_to_value`](crate::calculator::Calculator::convert_to_value).
//!
//! Conversions between representations follow ordinary numeric widening and
//! narrowing, except that a conversion which cannot represent the value fails
//! instead of wrapping or saturating.

use crate::err::InvalidConversionError;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::{
    borrow::Cow,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};

/// The tag of a [`Number`] representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumberKind {
    Decimal,
    F64,
    F32,
    I64,
    I32,
}

impl NumberKind {
    /// All kinds, most preferred first.
    pub const ALL: [NumberKind; 5] = [
        NumberKind::Decimal,
        NumberKind::F64,
        NumberKind::F32,
        NumberKind::I64,
        NumberKind::I32,
    ];

    #[inline]
    pub fn is_integral(self) -> bool {
        matches!(self, NumberKind::I64 | NumberKind::I32)
    }
}

impl Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumberKind::Decimal => "decimal",
            NumberKind::F64 => "f64",
            NumberKind::F32 => "f32",
            NumberKind::I64 => "i64",
            NumberKind::I32 => "i32",
        };
        f.write_str(name)
    }
}

/// A number in one of the supported representations.
///
/// Equality is structural and kind-sensitive: `I32(2)` and `I64(2)` are not
/// equal. Floats compare by bit pattern, so `NaN` equals itself and `0.0`
/// differs from `-0.0`. Decimals compare numerically (`2.0 == 2.00`).
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Decimal(Decimal),
    F64(f64),
    F32(f32),
    I64(i64),
    I32(i32),
}

impl Number {
    #[inline]
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::Decimal(_) => NumberKind::Decimal,
            Number::F64(_) => NumberKind::F64,
            Number::F32(_) => NumberKind::F32,
            Number::I64(_) => NumberKind::I64,
            Number::I32(_) => NumberKind::I32,
        }
    }

    /// Converts this number into the representation `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora_calc::number::{Number, NumberKind};
    ///
    /// assert_eq!(Number::I32(2).convert(NumberKind::F64).unwrap(), Number::F64(2.0));
    /// assert!(Number::I64(i64::MAX).convert(NumberKind::I32).is_err());
    /// ```
    pub fn convert(self, target: NumberKind) -> Result<Number, InvalidConversionError> {
        Ok(match target {
            NumberKind::Decimal => Number::Decimal(self.to_decimal()?),
            NumberKind::F64 => Number::F64(self.to_f64()),
            NumberKind::F32 => Number::F32(self.to_f32()),
            NumberKind::I64 => Number::I64(self.to_i64()?),
            NumberKind::I32 => Number::I32(self.to_i32()?),
        })
    }

    /// Converts into a decimal. Floats go through their shortest round-trip
    /// text form, so `0.1f64` becomes exactly `0.1`.
    pub fn to_decimal(self) -> Result<Decimal, InvalidConversionError> {
        match self {
            Number::Decimal(d) => Ok(d),
            Number::I64(v) => Ok(Decimal::from(v)),
            Number::I32(v) => Ok(Decimal::from(v)),
            Number::F64(v) => float_text_to_decimal(v.is_finite(), &v.to_string(), self),
            Number::F32(v) => float_text_to_decimal(v.is_finite(), &v.to_string(), self),
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Number::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
            Number::F64(v) => v,
            Number::F32(v) => f64::from(v),
            Number::I64(v) => v as f64,
            Number::I32(v) => f64::from(v),
        }
    }

    pub fn to_f32(self) -> f32 {
        match self {
            Number::Decimal(d) => d.to_f32().unwrap_or(f32::NAN),
            Number::F64(v) => v as f32,
            Number::F32(v) => v,
            Number::I64(v) => v as f32,
            Number::I32(v) => v as f32,
        }
    }

    /// Converts into an `i64`, truncating any fraction toward zero.
    pub fn to_i64(self) -> Result<i64, InvalidConversionError> {
        let converted = match self {
            Number::Decimal(d) => d.trunc().to_i64(),
            Number::F64(v) => v.trunc().to_i64(),
            Number::F32(v) => v.trunc().to_i64(),
            Number::I64(v) => Some(v),
            Number::I32(v) => Some(i64::from(v)),
        };
        converted.ok_or_else(|| {
            InvalidConversionError::new(NumberKind::I64, self.to_string(), "value out of range")
        })
    }

    /// Converts into an `i32`, truncating any fraction toward zero.
    pub fn to_i32(self) -> Result<i32, InvalidConversionError> {
        let converted = match self {
            Number::Decimal(d) => d.trunc().to_i32(),
            Number::F64(v) => v.trunc().to_i32(),
            Number::F32(v) => v.trunc().to_i32(),
            Number::I64(v) => i32::try_from(v).ok(),
            Number::I32(v) => Some(v),
        };
        converted.ok_or_else(|| {
            InvalidConversionError::new(NumberKind::I32, self.to_string(), "value out of range")
        })
    }
}

fn float_text_to_decimal(
    finite: bool,
    text: &str,
    source: Number,
) -> Result<Decimal, InvalidConversionError> {
    if !finite {
        return Err(InvalidConversionError::new(
            NumberKind::Decimal,
            source.to_string(),
            "not a finite number",
        ));
    }
    Decimal::from_str(text).map_err(|e| {
        InvalidConversionError::new(NumberKind::Decimal, source.to_string(), e.to_string())
    })
}

/// Parses decimal text, accepting plain and scientific notation.
pub(crate) fn parse_decimal(text: &str) -> Result<Decimal, InvalidConversionError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| InvalidConversionError::new(NumberKind::Decimal, text, e.to_string()))
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Decimal(a), Number::Decimal(b)) => a == b,
            (Number::F64(a), Number::F64(b)) => a.to_bits() == b.to_bits(),
            (Number::F32(a), Number::F32(b)) => a.to_bits() == b.to_bits(),
            (Number::I64(a), Number::I64(b)) => a == b,
            (Number::I32(a), Number::I32(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Number::Decimal(d) => d.hash(state),
            Number::F64(v) => v.to_bits().hash(state),
            Number::F32(v) => v.to_bits().hash(state),
            Number::I64(v) => v.hash(state),
            Number::I32(v) => v.hash(state),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Decimal(d) => write!(f, "{d}"),
            // Debug keeps the trailing `.0` so floats read as floats.
            Number::F64(v) => write!(f, "{v:?}"),
            Number::F32(v) => write!(f, "{v:?}f32"),
            Number::I64(v) => write!(f, "{v}"),
            Number::I32(v) => write!(f, "{v}i32"),
        }
    }
}

impl From<Decimal> for Number {
    #[inline]
    fn from(v: Decimal) -> Self {
        Number::Decimal(v)
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(v: f64) -> Self {
        Number::F64(v)
    }
}

impl From<f32> for Number {
    #[inline]
    fn from(v: f32) -> Self {
        Number::F32(v)
    }
}

impl From<i64> for Number {
    #[inline]
    fn from(v: i64) -> Self {
        Number::I64(v)
    }
}

impl From<i32> for Number {
    #[inline]
    fn from(v: i32) -> Self {
        Number::I32(v)
    }
}

/// An untyped external value handed to a calculator for conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<'a> {
    Number(Number),
    Text(Cow<'a, str>),
    Boolean(bool),
    Missing,
}

impl Display for RawValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(t) => write!(f, "{t:?}"),
            RawValue::Boolean(b) => write!(f, "{b}"),
            RawValue::Missing => f.write_str("<missing>"),
        }
    }
}

macro_rules! raw_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawValue<'_> {
                #[inline]
                fn from(v: $t) -> Self {
                    RawValue::Number(v.into())
                }
            }
        )*
    };
}

raw_from_number!(Number, Decimal, f64, f32, i64, i32);

impl<'a> From<&'a str> for RawValue<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        RawValue::Text(Cow::Borrowed(v))
    }
}

impl From<String> for RawValue<'_> {
    #[inline]
    fn from(v: String) -> Self {
        RawValue::Text(Cow::Owned(v))
    }
}

impl From<bool> for RawValue<'_> {
    #[inline]
    fn from(v: bool) -> Self {
        RawValue::Boolean(v)
    }
}

impl<T: Into<RawValue<'static>>> From<Option<T>> for RawValue<'static> {
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Missing, Into::into)
    }
}
