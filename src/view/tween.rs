// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Default length of a highlight transition.
pub const TRANSITION: Duration = Duration::from_millis(200);

/// Visual attributes a highlight treatment can change.
///
/// `radius` is the unscaled mark size; the drawn extent is `radius * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementStyle {
    pub radius: f64,
    pub scale: f64,
    pub opacity: f64,
    pub stroke_width: f64,
}

impl ElementStyle {
    pub const fn new(radius: f64) -> Self {
        Self { radius, scale: 1.0, opacity: 1.0, stroke_width: 0.0 }
    }

    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub const fn with_stroke(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn extent(&self) -> f64 {
        self.radius * self.scale
    }

    fn lerp(from: Self, to: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            radius: mix(from.radius, to.radius),
            scale: mix(from.scale, to.scale),
            opacity: mix(from.opacity, to.opacity),
            stroke_width: mix(from.stroke_width, to.stroke_width),
        }
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Eased, time-bounded interpolation between two styles.
///
/// Re-targeting mid-flight starts the new interpolation from the value shown at that instant,
/// so a mark never jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleTween {
    from: ElementStyle,
    to: ElementStyle,
    started: Option<Instant>,
    duration: Duration,
}

impl StyleTween {
    pub fn settled(style: ElementStyle, duration: Duration) -> Self {
        Self { from: style, to: style, started: None, duration }
    }

    pub fn target(&self) -> ElementStyle {
        self.to
    }

    fn progress(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: Instant) -> ElementStyle {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        ElementStyle::lerp(self.from, self.to, ease_cubic_in_out(t))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.started.is_some() && self.progress(now) < 1.0
    }

    /// Points the tween at `target`; a no-op when it already heads there.
    pub fn retarget(&mut self, target: ElementStyle, now: Instant) {
        if target == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = target;
        self.started = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{ease_cubic_in_out, ElementStyle, StyleTween, TRANSITION};

    const BASE: ElementStyle = ElementStyle::new(6.0);
    const BIG: ElementStyle = ElementStyle::new(10.0);

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
    }

    #[test]
    fn tween_reaches_target_after_duration() {
        let start = Instant::now();
        let mut tween = StyleTween::settled(BASE, TRANSITION);
        tween.retarget(BIG, start);

        assert_eq!(tween.value_at(start), BASE);
        let mid = tween.value_at(start + Duration::from_millis(100));
        assert!((mid.radius - 8.0).abs() < 1e-9);
        assert!(tween.is_animating(start + Duration::from_millis(199)));
        assert_eq!(tween.value_at(start + TRANSITION), BIG);
        assert!(!tween.is_animating(start + TRANSITION));
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let start = Instant::now();
        let mut tween = StyleTween::settled(BASE, TRANSITION);
        tween.retarget(BIG, start);

        let halfway = start + Duration::from_millis(100);
        let shown = tween.value_at(halfway);
        tween.retarget(BASE, halfway);

        assert_eq!(tween.value_at(halfway), shown);
        assert_eq!(tween.target(), BASE);
        assert_eq!(tween.value_at(halfway + TRANSITION), BASE);
    }

    #[test]
    fn retarget_to_same_target_keeps_running_transition() {
        let start = Instant::now();
        let mut tween = StyleTween::settled(BASE, TRANSITION);
        tween.retarget(BIG, start);
        tween.retarget(BIG, start + Duration::from_millis(150));
        assert_eq!(tween.value_at(start + TRANSITION), BIG);
    }

    #[test]
    fn zero_duration_snaps() {
        let now = Instant::now();
        let mut tween = StyleTween::settled(BASE, Duration::ZERO);
        tween.retarget(BIG, now);
        assert_eq!(tween.value_at(now), BIG);
    }
}
