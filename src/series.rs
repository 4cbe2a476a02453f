use crate::Price;

/// An indicator series.
///
/// Always one entry per input bar. `None` marks an index without enough
/// history (or with a missing input somewhere in its window).
pub type Series = Vec<Option<Price>>;

/// The `length` values ending at `end` (inclusive).
///
/// `None` if the window reaches before the start of the series or holds a
/// missing value.
pub(crate) fn window(values: &[Option<Price>], end: usize, length: usize) -> Option<Vec<Price>> {
    let start = (end + 1).checked_sub(length)?;
    values.get(start..=end)?.iter().copied().collect()
}

/// Mean of the window ending at `end`, summed oldest first.
pub(crate) fn window_mean(values: &[Option<Price>], end: usize, length: usize) -> Option<Price> {
    #[allow(clippy::cast_precision_loss)]
    let length_f = length as f64;

    window(values, end, length).map(|w| w.iter().sum::<Price>() / length_f)
}

/// Present values only, in order.
pub(crate) fn compact(values: &[Option<Price>]) -> Vec<Price> {
    values.iter().flatten().copied().collect()
}
