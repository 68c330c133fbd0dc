//! Window policies of the diagonal adapter.
//!
//! A [`Side`] decides how a [`Diagonal`](super::Diagonal) turns one base
//! draw (or one batch of base draws) into its next output, using the
//! adapter's [`Window`] as scratch state.
//!
//! | Policy     | Window use                         | Guarantee on `D` consecutive outputs |
//! |------------|------------------------------------|--------------------------------------|
//! | [`Lower`]  | ring of the last `D` draws         | `sum(v - min) <= max - min`          |
//! | [`Upper`]  | ring of the last `D` draws         | `sum(v - min) >= max - min`          |
//! | [`Middle`] | precomputed batch of `D` gaps      | `sum(v - min) == max - min`          |

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use num_traits::Zero;

use super::{BaseDistribution, Interval, Scalar};
use crate::engine::Engine;
use crate::support::{bounded_differences, wrap_back};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Lower {}
    impl Sealed for super::Middle {}
    impl Sealed for super::Upper {}
}

/// Buffer and cursor carried by a diagonal adapter between draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<T, const D: usize> {
    pub(crate) buffer: [T; D],
    pub(crate) cursor: usize,
}

impl<T: Scalar, const D: usize> Window<T, D> {
    /// A window whose slots all hold `fill` and whose cursor is at zero.
    pub(crate) fn filled(fill: T) -> Self {
        Self {
            buffer: [fill; D],
            cursor: 0,
        }
    }

    /// Slot contents in storage order.
    #[inline]
    pub fn buffer(&self) -> &[T; D] {
        &self.buffer
    }

    /// Next slot to overwrite (ring policies) or remaining batch length
    /// (middle policy).
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Sum of `slot - min` over the `D - 1` slots behind the cursor, most
    /// recent first, in wide arithmetic.
    ///
    /// Accumulation stops as soon as the sum exceeds `span`, so the result
    /// stays below `2 * span` and compares with `span` exactly as the full
    /// sum would. A negative sum, possible only after the interval moved
    /// under a filled window, counts as nothing reserved.
    fn reserved(&self, min: T::Wide, span: T::Wide) -> T::Wide {
        let zero = <T::Wide as Zero>::zero();
        let mut total = zero;
        for back in 1..D {
            total = total + (self.buffer[wrap_back(self.cursor, back, D)].to_wide() - min);
            if total > span {
                return total;
            }
        }
        if total < zero {
            zero
        } else {
            total
        }
    }

    /// Stores `value` at the cursor and advances it around the ring.
    fn push(&mut self, value: T) -> T {
        self.buffer[self.cursor] = value;
        self.cursor = (self.cursor + 1) % D;
        value
    }
}

/// Strategy advancing a diagonal adapter by one output.
///
/// Implemented by the zero-sized [`Lower`], [`Middle`] and [`Upper`]
/// markers; dispatch is resolved at compile time.
pub trait Side: sealed::Sealed + Copy + Default + Debug + PartialEq + Eq + Hash + Send + Sync + 'static {
    /// Policy name, used in logs.
    const NAME: &'static str;

    /// Produces the next output, updating `window`.
    fn advance<B, E, const D: usize>(
        base: &B,
        window: &mut Window<B::Output, D>,
        engine: &mut E,
    ) -> B::Output
    where
        B: BaseDistribution,
        E: Engine;
}

/// Keeps every window of `D` outputs on or below the simplex.
///
/// Each draw is taken from `[min, max - reserved]`, where `reserved` is the
/// offset already spent by the previous `D - 1` outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Lower;

/// Produces `D` gap values per batch that partition `max - min` exactly.
///
/// A batch draws `D - 1` points, sorts them between the `min` and `max`
/// sentinels and emits the consecutive distances, shifted by `min`. This is
/// the stick-breaking construction of a uniform point on the simplex face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Middle;

/// Keeps every window of `D` outputs on or above the simplex.
///
/// Each draw is taken from `[max - reserved, max]` once the previous
/// `D - 1` outputs reserve anything; with nothing reserved the full
/// interval is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Upper;

impl Side for Lower {
    const NAME: &'static str = "lower";

    fn advance<B, E, const D: usize>(
        base: &B,
        window: &mut Window<B::Output, D>,
        engine: &mut E,
    ) -> B::Output
    where
        B: BaseDistribution,
        E: Engine,
    {
        let (min, max) = (base.min(), base.max());
        let (min_w, max_w) = (min.to_wide(), max.to_wide());
        let reserved = window.reserved(min_w, max_w - min_w);
        let ceiling = if reserved <= max_w - min_w {
            <B::Output as Scalar>::from_wide(max_w - reserved)
        } else {
            min
        };
        let value = base.sample_in(engine, Interval::new(min, ceiling));
        window.push(value)
    }
}

impl Side for Upper {
    const NAME: &'static str = "upper";

    fn advance<B, E, const D: usize>(
        base: &B,
        window: &mut Window<B::Output, D>,
        engine: &mut E,
    ) -> B::Output
    where
        B: BaseDistribution,
        E: Engine,
    {
        let (min, max) = (base.min(), base.max());
        let (min_w, max_w) = (min.to_wide(), max.to_wide());
        let reserved = window.reserved(min_w, max_w - min_w);
        let floor = if !reserved.is_zero() && reserved < max_w - min_w {
            <B::Output as Scalar>::from_wide(max_w - reserved)
        } else {
            min
        };
        let value = base.sample_in(engine, Interval::new(floor, max));
        window.push(value)
    }
}

impl Side for Middle {
    const NAME: &'static str = "middle";

    fn advance<B, E, const D: usize>(
        base: &B,
        window: &mut Window<B::Output, D>,
        engine: &mut E,
    ) -> B::Output
    where
        B: BaseDistribution,
        E: Engine,
    {
        if let Some(cursor) = window.cursor.checked_sub(1) {
            window.cursor = cursor;
            return window.buffer[cursor];
        }

        let (min_w, max_w) = (base.min().to_wide(), base.max().to_wide());
        let last = D - 1;
        let points = &mut window.buffer[..last];
        for point in points.iter_mut() {
            *point = base.sample(engine);
        }
        points.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        // Gaps can exceed the scalar range; each gap plus `min` cannot.
        let mut gaps = [min_w; D];
        for (gap, point) in gaps.iter_mut().zip(points.iter()) {
            *gap = point.to_wide();
        }
        bounded_differences(&mut gaps, min_w, max_w);
        for (slot, gap) in window.buffer.iter_mut().zip(gaps) {
            *slot = <B::Output as Scalar>::from_wide(gap + min_w);
        }

        tracing::trace!(policy = Self::NAME, dimensions = D, "regenerated simplex batch");
        window.cursor = last;
        window.buffer[last]
    }
}
