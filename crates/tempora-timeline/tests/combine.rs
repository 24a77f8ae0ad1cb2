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

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use tempora_calc::{
    calculator::NumberCalculator,
    config::{CalculatorConfig, DecimalDivision},
    err::NumberError,
    number::Number,
};
use tempora_core::{
    algebra::is_disjoint_and_ordered,
    primitives::Interval,
    time::{MILLIS_PER_MINUTE, TimeDelta, TimeInterval, TimePoint},
};
use tempora_timeline::{
    function::{NamedBinaryOperator, ValueFunction},
    ops::Operators,
    segment::Timesegment,
    timeline::{InstantTimeline, Timeline},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_test_writer()
        .try_init();
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
}

#[test]
fn test_date_time_keys() {
    enable_tracing();
    let ops = Operators::new(NumberCalculator::default());
    let morning = Timesegment::constant(Interval::new(at(10, 0), at(12, 0)), Number::F64(2.0));
    let noon = Timesegment::constant(Interval::new(at(11, 0), at(13, 0)), Number::F64(5.0));
    let timeline = Timeline::of_unordered(&ops.plus, [morning, noon]);

    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.value_at(at(10, 30)), Ok(Some(Number::F64(2.0))));
    assert_eq!(timeline.value_at(at(11, 30)), Ok(Some(Number::F64(7.0))));
    assert_eq!(timeline.value_at(at(12, 30)), Ok(Some(Number::F64(5.0))));
    assert_eq!(timeline.value_at(at(13, 0)), Ok(None));
    assert_eq!(timeline.interval(), Ok(Interval::new(at(10, 0), at(13, 0))));
}

#[test]
fn test_keyed_ramp_over_date_times() {
    enable_tracing();
    let ops = Operators::new(NumberCalculator::default());
    let origin = at(8, 0);
    // One unit per elapsed minute.
    let ramp = ValueFunction::keyed("ramp", move |t: DateTime<Utc>| {
        Number::I64((t - origin).num_minutes())
    });
    let base = Timeline::empty()
        .add(Interval::new(origin, origin + Duration::hours(4)), ramp)
        .unwrap();
    let offset = Timeline::of_disjoint_and_ordered(vec![Timesegment::constant(
        Interval::new(at(9, 0), at(10, 0)),
        Number::Decimal(Decimal::new(5, 1)),
    )]);

    let combined = base.combine(&ops.plus, &offset);
    assert_eq!(combined.value_at(at(8, 30)), Ok(Some(Number::I64(30))));
    assert_eq!(
        combined.value_at(at(9, 15)),
        Ok(Some(Number::Decimal(Decimal::new(755, 1))))
    );
    assert_eq!(combined.segments()[1].function().to_string(), "(ramp + 0.5)");
}

#[test]
fn test_instant_keys() {
    let ops = Operators::new(NumberCalculator::default());
    let start = TimePoint::from_millis(0);
    let shift = start.span(TimeDelta::from_hours(8).unwrap()).unwrap();
    // Decays by one unit per elapsed minute.
    let decay = ValueFunction::keyed("decay", move |t: TimePoint| {
        let elapsed = t.duration_since(start).map_or(0, |d| d.as_millis());
        Number::I64(1_000 - elapsed / MILLIS_PER_MINUTE)
    });
    let penalty: TimeInterval = start
        .checked_add(TimeDelta::from_hours(4).unwrap())
        .and_then(|from| from.span(TimeDelta::from_hours(1)?))
        .unwrap();

    let timeline: InstantTimeline<Number> = Timeline::empty().add(shift, decay).unwrap().combine(
        &ops.minus,
        &Timeline::of_disjoint_and_ordered(vec![Timesegment::constant(penalty, Number::I32(7))]),
    );

    let minute = |m: i64| TimePoint::from_millis(m * MILLIS_PER_MINUTE);
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.value_at(minute(100)), Ok(Some(Number::I64(900))));
    assert_eq!(timeline.value_at(minute(250)), Ok(Some(Number::I64(743))));
    assert_eq!(timeline.value_at(minute(480)), Ok(None));
    assert_eq!(timeline.covered_length(), TimeDelta::from_hours(8));
    assert_eq!(timeline.segments()[1].length(), TimeDelta::from_hours(1));
}

#[test]
fn test_boolean_operator_timeline() {
    let and = NamedBinaryOperator::new("and", |a: bool, b: bool| Ok(a && b));
    let open = Timesegment::constant(Interval::new(0, 100), true);
    let maintenance = Timesegment::constant(Interval::new(40, 60), false);
    let available = Timeline::of_unordered(&and, [open, maintenance]);
    assert_eq!(available.value_at(10), Ok(Some(true)));
    assert_eq!(available.value_at(50), Ok(Some(false)));
    assert_eq!(available.value_at(80), Ok(Some(true)));
}

#[test]
fn test_exact_and_rounded_decimal_division() {
    let exact = Operators::new(NumberCalculator::default());
    let rounded = Operators::new(NumberCalculator::new(
        CalculatorConfig::default().with_decimal_division(DecimalDivision::Rounded {
            scale: 3,
            strategy: rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        }),
    ));
    let segments = || {
        [
            Timesegment::constant(Interval::new(0, 10), Number::Decimal(Decimal::ONE)),
            Timesegment::constant(Interval::new(0, 10), Number::Decimal(Decimal::new(3, 0))),
        ]
    };

    let inexact = Timeline::of_unordered(&exact.divide, segments());
    assert!(matches!(
        inexact.value_at(0),
        Err(NumberError::NonTerminatingDecimal(_))
    ));

    let third = Timeline::of_unordered(&rounded.divide, segments());
    assert_eq!(
        third.value_at(0),
        Ok(Some(Number::Decimal(Decimal::new(333, 3))))
    );
}

#[test]
fn test_restricted_view_shares_tree() {
    let ops = Operators::new(NumberCalculator::default());
    let timeline = Timeline::of_unordered(
        &ops.multiply,
        [
            Timesegment::constant(Interval::new(0, 10), Number::I32(3)),
            Timesegment::constant(Interval::new(0, 10), Number::I32(4)),
        ],
    );
    let window = timeline.restrict_to(Interval::new(2, 5));
    assert!(Arc::ptr_eq(
        timeline.segments()[0].function(),
        window.segments()[0].function()
    ));
    assert_eq!(window.value_at(3), Ok(Some(Number::I32(12))));
    assert_eq!(window.value_at(6), Ok(None));
}

fn segments_strategy() -> impl Strategy<Value = Vec<(i64, i64, i64)>> {
    prop::collection::vec((0i64..50, 1i64..20, -1_000i64..1_000), 0..12)
}

fn build(input: &[(i64, i64, i64)]) -> Vec<Timesegment<i64, Number>> {
    input
        .iter()
        .map(|&(start, len, value)| {
            Timesegment::constant(Interval::new(start, start + len), Number::I64(value))
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_combined_timeline_is_disjoint_and_ordered(input in segments_strategy()) {
        let ops = Operators::new(NumberCalculator::default());
        let timeline = Timeline::of_unordered(&ops.plus, build(&input));
        let intervals: Vec<_> = timeline.iter().map(Timesegment::interval).collect();
        prop_assert!(is_disjoint_and_ordered(&intervals));
    }

    #[test]
    fn prop_value_is_sum_of_covering_segments(input in segments_strategy()) {
        let ops = Operators::new(NumberCalculator::default());
        let timeline = Timeline::of_unordered(&ops.plus, build(&input));
        for key in 0..70i64 {
            let covering: Vec<i64> = input
                .iter()
                .filter(|&&(start, len, _)| start <= key && key < start + len)
                .map(|&(_, _, value)| value)
                .collect();
            let expected = (!covering.is_empty()).then(|| Number::I64(covering.iter().sum()));
            prop_assert_eq!(timeline.value_at(key), Ok(expected));
        }
    }

    #[test]
    fn prop_of_unordered_is_idempotent(input in segments_strategy()) {
        let ops = Operators::new(NumberCalculator::default());
        let once = Timeline::of_unordered(&ops.plus, build(&input));
        let twice = Timeline::of_unordered(&ops.plus, once.clone());
        prop_assert_eq!(once, twice);
    }
}
