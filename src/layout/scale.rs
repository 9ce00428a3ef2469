// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

/// Continuous linear mapping from a value domain onto a pixel range.
///
/// A degenerate domain (both ends equal) maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale over the min/max of `values`. Returns `None` when no finite value is present.
    pub fn from_extent(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Option<Self> {
        let (min, max) = extent(values)?;
        Some(Self::new((min, max), range))
    }

    /// Scale over `[min * low, max * high]`, the padded domain the distribution view uses.
    pub fn padded(
        values: impl IntoIterator<Item = f64>,
        low: f64,
        high: f64,
        range: (f64, f64),
    ) -> Option<Self> {
        let (min, max) = extent(values)?;
        Some(Self::new((min * low, max * high), range))
    }

    /// Extends the domain to round tick boundaries (roughly ten ticks).
    pub fn nice(self) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, 10.0);
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }

        let domain = if reversed { (stop, start) } else { (start, stop) };
        Self { domain, range: self.range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Maps a range position back into the domain.
    pub fn invert(&self, position: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (position - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Evenly spaced tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut start, mut stop) = self.domain;
        if stop < start {
            std::mem::swap(&mut start, &mut stop);
        }
        if count == 0 || !start.is_finite() || !stop.is_finite() {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let step = tick_increment(start, stop, count as f64);
        if step > 0.0 {
            let first = (start / step).ceil() as i64;
            let last = (stop / step).floor() as i64;
            (first..=last).map(|idx| idx as f64 * step).collect()
        } else if step < 0.0 {
            let inv = -step;
            let first = (start * inv).ceil() as i64;
            let last = (stop * inv).floor() as i64;
            (first..=last).map(|idx| idx as f64 / inv).collect()
        } else {
            Vec::new()
        }
    }
}

fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().filter(|value| value.is_finite()).fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
    })
}

/// Positive results are a step, negative results the inverse of a fractional step.
fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}
