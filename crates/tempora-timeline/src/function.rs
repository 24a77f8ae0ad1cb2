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

//! # Value Functions
//!
//! A [`ValueFunction`] maps a key (a point in time) to a value. It is an
//! immutable expression tree of constants, keyed leaves, and named unary and
//! binary operator applications. Children are shared through `Arc`, so a leaf
//! may appear in many derived trees; nothing is ever mutated in place, which
//! also rules out cycles.
//!
//! Evaluation is lazy and not memoized: every [`ValueFunction::evaluate`] call
//! walks the whole tree again.
//!
//! Equality and hashing are structural. Operators compare by name only, so
//! `(2.0 + 5.0)` and `7.0` are different trees even though they evaluate to
//! the same value.

use std::{
    borrow::Cow,
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    sync::Arc,
};
use tempora_calc::err::NumberError;

type BinaryFn<V> = dyn Fn(V, V) -> Result<V, NumberError> + Send + Sync;
type UnaryFn<V> = dyn Fn(V) -> Result<V, NumberError> + Send + Sync;
type KeyFn<K, V> = dyn Fn(K) -> V + Send + Sync;

macro_rules! named_by_name {
    ($ty:ident < $($p:ident),+ >) => {
        impl<$($p),+> Clone for $ty<$($p),+> {
            #[inline]
            fn clone(&self) -> Self {
                Self {
                    name: self.name.clone(),
                    func: Arc::clone(&self.func),
                }
            }
        }

        impl<$($p),+> PartialEq for $ty<$($p),+> {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.name == other.name
            }
        }

        impl<$($p),+> Eq for $ty<$($p),+> {}

        impl<$($p),+> Hash for $ty<$($p),+> {
            #[inline]
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.name.hash(state);
            }
        }

        impl<$($p),+> Debug for $ty<$($p),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($ty)).field(&self.name).finish()
            }
        }

        impl<$($p),+> $ty<$($p),+> {
            #[inline]
            pub fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

/// A binary operator paired with the symbolic name that identifies it.
pub struct NamedBinaryOperator<V> {
    name: Cow<'static, str>,
    func: Arc<BinaryFn<V>>,
}

named_by_name!(NamedBinaryOperator<V>);

impl<V> NamedBinaryOperator<V> {
    /// # Examples
    ///
    /// ```
    /// use tempora_timeline::function::NamedBinaryOperator;
    ///
    /// let and = NamedBinaryOperator::new("and", |a: bool, b: bool| Ok(a && b));
    /// assert_eq!(and.apply(true, false), Ok(false));
    /// assert_eq!(and.name(), "and");
    /// ```
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(V, V) -> Result<V, NumberError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    #[inline]
    pub fn apply(&self, lhs: V, rhs: V) -> Result<V, NumberError> {
        (self.func)(lhs, rhs)
    }
}

/// A unary operator paired with the symbolic name that identifies it.
pub struct NamedUnaryOperator<V> {
    name: Cow<'static, str>,
    func: Arc<UnaryFn<V>>,
}

named_by_name!(NamedUnaryOperator<V>);

impl<V> NamedUnaryOperator<V> {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(V) -> Result<V, NumberError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    #[inline]
    pub fn apply(&self, value: V) -> Result<V, NumberError> {
        (self.func)(value)
    }
}

/// A named function of the key, e.g. a ramp that grows with time.
pub struct NamedKeyFunction<K, V> {
    name: Cow<'static, str>,
    func: Arc<KeyFn<K, V>>,
}

named_by_name!(NamedKeyFunction<K, V>);

impl<K, V> NamedKeyFunction<K, V> {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(K) -> V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    #[inline]
    pub fn apply(&self, key: K) -> V {
        (self.func)(key)
    }
}

/// A function from a key `K` to a value `V`, as an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueFunction<K, V> {
    Constant(V),
    Keyed(NamedKeyFunction<K, V>),
    Unary(NamedUnaryOperator<V>, Arc<ValueFunction<K, V>>),
    Binary(
        NamedBinaryOperator<V>,
        Arc<ValueFunction<K, V>>,
        Arc<ValueFunction<K, V>>,
    ),
}

impl<K, V> ValueFunction<K, V> {
    #[inline]
    pub fn constant(value: V) -> Self {
        ValueFunction::Constant(value)
    }

    #[inline]
    pub fn keyed<F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(K) -> V + Send + Sync + 'static,
    {
        ValueFunction::Keyed(NamedKeyFunction::new(name, func))
    }

    #[inline]
    pub fn unary(op: NamedUnaryOperator<V>, child: Arc<ValueFunction<K, V>>) -> Self {
        ValueFunction::Unary(op, child)
    }

    #[inline]
    pub fn binary(
        op: NamedBinaryOperator<V>,
        lhs: Arc<ValueFunction<K, V>>,
        rhs: Arc<ValueFunction<K, V>>,
    ) -> Self {
        ValueFunction::Binary(op, lhs, rhs)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            ValueFunction::Constant(_) | ValueFunction::Keyed(_) => 1,
            ValueFunction::Unary(_, child) => 1 + child.depth(),
            ValueFunction::Binary(_, lhs, rhs) => 1 + lhs.depth().max(rhs.depth()),
        }
    }

    /// Number of nodes in the tree, counting shared children once per use.
    pub fn node_count(&self) -> usize {
        match self {
            ValueFunction::Constant(_) | ValueFunction::Keyed(_) => 1,
            ValueFunction::Unary(_, child) => 1 + child.node_count(),
            ValueFunction::Binary(_, lhs, rhs) => 1 + lhs.node_count() + rhs.node_count(),
        }
    }

    /// Evaluates the tree at `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tempora_timeline::function::{NamedBinaryOperator, ValueFunction};
    ///
    /// let plus = NamedBinaryOperator::new("+", |a: f64, b: f64| Ok(a + b));
    /// let f: ValueFunction<i64, f64> = ValueFunction::binary(
    ///     plus,
    ///     Arc::new(ValueFunction::constant(2.0)),
    ///     Arc::new(ValueFunction::keyed("t", |t: i64| t as f64)),
    /// );
    /// assert_eq!(f.evaluate(10), Ok(12.0));
    /// ```
    pub fn evaluate(&self, key: K) -> Result<V, NumberError>
    where
        K: Copy,
        V: Clone,
    {
        match self {
            ValueFunction::Constant(value) => Ok(value.clone()),
            ValueFunction::Keyed(func) => Ok(func.apply(key)),
            ValueFunction::Unary(op, child) => op.apply(child.evaluate(key)?),
            ValueFunction::Binary(op, lhs, rhs) => {
                let lhs = lhs.evaluate(key)?;
                let rhs = rhs.evaluate(key)?;
                op.apply(lhs, rhs)
            }
        }
    }
}

impl<K, V: Display> Display for ValueFunction<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueFunction::Constant(value) => write!(f, "{value}"),
            ValueFunction::Keyed(func) => f.write_str(func.name()),
            ValueFunction::Unary(op, child) => write!(f, "{}({child})", op.name()),
            ValueFunction::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    type F = ValueFunction<i64, i64>;

    fn plus() -> NamedBinaryOperator<i64> {
        NamedBinaryOperator::new("+", |a: i64, b: i64| Ok(a + b))
    }

    fn times() -> NamedBinaryOperator<i64> {
        NamedBinaryOperator::new("*", |a: i64, b: i64| Ok(a * b))
    }

    fn neg() -> NamedUnaryOperator<i64> {
        NamedUnaryOperator::new("neg", |a: i64| Ok(-a))
    }

    fn c(v: i64) -> Arc<F> {
        Arc::new(ValueFunction::constant(v))
    }

    #[test]
    fn test_evaluate_nested() {
        let f: F = ValueFunction::unary(
            neg(),
            Arc::new(ValueFunction::binary(times(), c(3), c(4))),
        );
        assert_eq!(f.evaluate(0), Ok(-12));
    }

    #[test]
    fn test_keyed_leaf_varies_with_key() {
        let ramp: F = ValueFunction::keyed("ramp", |t: i64| t * 2);
        assert_eq!(ramp.evaluate(5), Ok(10));
        assert_eq!(ramp.evaluate(6), Ok(12));
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let f: F = ValueFunction::binary(plus(), c(1), Arc::new(ValueFunction::keyed("t", |t| t)));
        assert_eq!(f.evaluate(41), f.evaluate(41));
    }

    #[test]
    fn test_operator_error_propagates() {
        let failing = NamedBinaryOperator::new("fail", |_: i64, _: i64| {
            Err(NumberError::from(tempora_calc::err::DivisionByZeroError::new(
                tempora_calc::number::NumberKind::I64,
            )))
        });
        let f: F = ValueFunction::unary(neg(), Arc::new(ValueFunction::binary(failing, c(1), c(0))));
        assert!(matches!(f.evaluate(0), Err(NumberError::DivisionByZero(_))));
    }

    #[test]
    fn test_equality_is_structural_not_semantic() {
        let sum: F = ValueFunction::binary(plus(), c(2), c(5));
        let seven: F = ValueFunction::constant(7);
        assert_eq!(sum.evaluate(0), seven.evaluate(0));
        assert_ne!(sum, seven);

        let swapped: F = ValueFunction::binary(plus(), c(5), c(2));
        assert_ne!(sum, swapped);

        let product: F = ValueFunction::binary(times(), c(2), c(5));
        assert_ne!(sum, product);
    }

    #[test]
    fn test_operators_compare_by_name() {
        let a = NamedBinaryOperator::new("+", |a: i64, b: i64| Ok(a + b));
        let b = NamedBinaryOperator::new("+", |a: i64, b: i64| Ok(a.wrapping_add(b)));
        assert_eq!(a, b);
        let sum_a: F = ValueFunction::binary(a, c(2), c(5));
        let sum_b: F = ValueFunction::binary(b, c(2), c(5));
        assert_eq!(sum_a, sum_b);

        let mut set = HashSet::new();
        set.insert(sum_a);
        assert!(set.contains(&sum_b));
    }

    #[test]
    fn test_display_does_not_decide_equality() {
        let keyed: F = ValueFunction::keyed("7", |_| 7);
        let constant: F = ValueFunction::constant(7);
        assert_eq!(keyed.to_string(), constant.to_string());
        assert_ne!(keyed, constant);

        let negated: F = ValueFunction::unary(neg(), Arc::new(ValueFunction::keyed("x", |t| t)));
        assert_eq!(negated.to_string(), "neg(x)");
        let sum: F = ValueFunction::binary(plus(), c(2), c(5));
        assert_eq!(sum.to_string(), "(2 + 5)");
    }

    #[test]
    fn test_depth_and_node_count_share_leaves() {
        let leaf = c(1);
        let inner: Arc<F> = Arc::new(ValueFunction::binary(plus(), Arc::clone(&leaf), Arc::clone(&leaf)));
        let outer: F = ValueFunction::binary(plus(), Arc::clone(&inner), leaf);
        assert_eq!(outer.depth(), 3);
        assert_eq!(outer.node_count(), 5);
        assert_eq!(outer.evaluate(0), Ok(3));
    }
}
