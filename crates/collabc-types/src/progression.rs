//! Computed arithmetic sequence.

use collabc_core::sequence::{scan_contains, SeqIter};
use collabc_core::{CollError, Container, Iterable, Len, Result, Sequence};
use serde::{Deserialize, Serialize};

/// `start, start + step, start + 2*step, ...` for `len` terms.
///
/// Nothing is stored; every term comes from `get_item`, and iteration,
/// reversal, membership, `index` and `count` are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progression {
    start: i64,
    step: i64,
    len: usize,
}

impl Progression {
    /// At most `len` terms; the length is cut short where terms would leave
    /// the `i64` range.
    pub fn new(start: i64, step: i64, len: usize) -> Self {
        let representable = match step.signum() {
            0 => i128::MAX,
            1 => (i64::MAX as i128 - start as i128) / step as i128 + 1,
            _ => (start as i128 - i64::MIN as i128) / -(step as i128) + 1,
        };
        Self {
            start,
            step,
            len: len.min(saturate(representable)),
        }
    }

    /// Terms from `start` up to but excluding `stop`. `None` for a zero step.
    pub fn until(start: i64, stop: i64, step: i64) -> Option<Self> {
        if step == 0 {
            return None;
        }
        let span = if step > 0 {
            stop as i128 - start as i128
        } else {
            start as i128 - stop as i128
        };
        let stride = step.unsigned_abs() as i128;
        let len = if span <= 0 {
            0
        } else {
            saturate((span + stride - 1) / stride)
        };
        Some(Self::new(start, step, len))
    }
}

fn saturate(count: i128) -> usize {
    usize::try_from(count.max(0)).unwrap_or(usize::MAX)
}

impl Len for Progression {
    fn len(&self) -> usize {
        self.len
    }
}

impl Iterable for Progression {
    type Item = i64;
    type Iter<'a> = SeqIter<'a, Self>;

    fn iterate(&self) -> Self::Iter<'_> {
        SeqIter::new(self)
    }
}

impl Container<i64> for Progression {
    fn contains(&self, value: &i64) -> bool {
        scan_contains(self, value)
    }
}

impl Sequence for Progression {
    fn get_item(&self, index: usize) -> Result<i64> {
        if index >= self.len {
            return Err(CollError::IndexOutOfRange {
                index,
                length: self.len,
            });
        }
        let term = self.start as i128 + self.step as i128 * index as i128;
        i64::try_from(term).map_err(|_| CollError::IndexOutOfRange {
            index,
            length: self.len,
        })
    }
}
