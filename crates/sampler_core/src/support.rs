//! Index and buffer helpers shared by the diagonal policies.

use std::ops::Sub;

/// Walks `steps` slots backward from `cursor` in a ring of `len` slots.
///
/// Both `cursor` and `steps` must be below `len`; the result is then in
/// `[0, len)` and no intermediate value can underflow.
///
/// ```
/// use sampler_core::support::wrap_back;
///
/// assert_eq!(wrap_back(2, 1, 4), 1);
/// assert_eq!(wrap_back(0, 1, 4), 3);
/// assert_eq!(wrap_back(1, 3, 4), 2);
/// ```
#[inline]
pub fn wrap_back(cursor: usize, steps: usize, len: usize) -> usize {
    debug_assert!(cursor < len && steps < len);
    if steps <= cursor {
        cursor - steps
    } else {
        len - (steps - cursor)
    }
}

/// Replaces `points` with the gaps of the sequence `lower, points..., upper`.
///
/// `points` holds `n - 1` meaningful values in its first `n - 1` slots; the
/// last slot is scratch. On return slot `i` holds the distance between the
/// `i`-th and `(i + 1)`-th element of the bounded sequence, so the `n` gaps
/// sum to `upper - lower` whenever the points are sorted and lie within the
/// bounds.
///
/// ```
/// use sampler_core::support::bounded_differences;
///
/// let mut points = [20, 50, 90, 0];
/// bounded_differences(&mut points, 0, 100);
/// assert_eq!(points, [20, 30, 40, 10]);
/// ```
pub fn bounded_differences<T>(points: &mut [T], lower: T, upper: T)
where
    T: Copy + Sub<Output = T>,
{
    let n = points.len();
    if n == 0 {
        return;
    }
    let last = n - 1;

    points[last] = match last.checked_sub(1) {
        Some(top) => upper - points[top],
        None => upper - lower,
    };
    for i in (1..last).rev() {
        points[i] = points[i] - points[i - 1];
    }
    if last > 0 {
        points[0] = points[0] - lower;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_back_covers_ring() {
        let len = 5;
        for cursor in 0..len {
            let mut seen: Vec<usize> = (0..len).map(|s| wrap_back(cursor, s, len)).collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_wrap_back_large_len() {
        assert_eq!(wrap_back(0, usize::MAX - 1, usize::MAX), 1);
    }

    #[test]
    fn test_bounded_differences_single_slot() {
        let mut points = [0.0];
        bounded_differences(&mut points, 0.25, 1.0);
        assert_eq!(points, [0.75]);
    }

    #[test]
    fn test_bounded_differences_two_slots() {
        let mut points = [7, 0];
        bounded_differences(&mut points, 5, 10);
        assert_eq!(points, [2, 3]);
    }

    #[test]
    fn test_bounded_differences_sum() {
        let mut points = [-3, 1, 4, 4, 0];
        bounded_differences(&mut points, -10, 10);
        assert_eq!(points, [7, 4, 3, 0, 6]);
        assert_eq!(points.iter().sum::<i32>(), 20);
    }

    #[test]
    fn test_bounded_differences_empty() {
        let mut points: [u8; 0] = [];
        bounded_differences(&mut points, 0, 1);
    }
}
