// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::highlight::{StylePolicy, ViewPolicy};
use super::scene::{Axis, Viewport, ViewScene};
use super::tween::ElementStyle;
use super::{conference_color, Point, ViewGeometry, ViewKind};
use crate::layout::LinearScale;
use crate::model::Metric;
use crate::store::EntityStore;

pub(crate) fn scatter_policy(geometry: &ViewGeometry) -> ViewPolicy {
    let dot = ElementStyle::new(geometry.point_radius);
    let label = ElementStyle::new(0.0).with_opacity(0.0);
    ViewPolicy {
        mark: StylePolicy {
            base: dot,
            highlighted: ElementStyle::new(geometry.highlight_radius).with_stroke(2.0),
            dimmed: dot.with_opacity(geometry.dimmed_opacity),
        },
        label: StylePolicy { base: label, highlighted: label, dimmed: label },
        transition: geometry.transition,
    }
}

/// Duration (x) against tempo (y). Only schools with both values strictly positive are drawn.
pub fn build_scatter_scene(store: &EntityStore, geometry: &ViewGeometry) -> ViewScene {
    let viewport = Viewport { width: geometry.width, height: geometry.chart_height };
    let mut scene = ViewScene::new(ViewKind::Scatter, viewport, scatter_policy(geometry));
    let padding = geometry.scatter_padding;

    let mut points = Vec::new();
    for entity in store.iter() {
        let tempo = Metric::Tempo.finite_value(entity).filter(|value| *value > 0.0);
        let duration = Metric::Duration.finite_value(entity).filter(|value| *value > 0.0);
        match tempo.zip(duration) {
            Some((tempo, duration)) => points.push((entity, duration, tempo)),
            None => scene.omit(entity.school().clone()),
        }
    }

    if points.is_empty() {
        log::warn!("event=view_build module=view status=empty view=scatter reason=no_points");
        return scene;
    }

    let max_duration = points.iter().map(|(_, duration, _)| *duration).fold(0.0, f64::max);
    let max_tempo = points.iter().map(|(_, _, tempo)| *tempo).fold(0.0, f64::max);
    let x_scale =
        LinearScale::new((0.0, max_duration), (padding.left, geometry.width - padding.right))
            .nice();
    let y_scale = LinearScale::new(
        (0.0, max_tempo * 1.05),
        (geometry.chart_height - padding.bottom, padding.top),
    );

    for (entity, duration, tempo) in &points {
        scene.push_mark(
            entity.school().clone(),
            Point::new(x_scale.apply(*duration), y_scale.apply(*tempo)),
            conference_color(entity.conference()),
        );
    }

    log::debug!(
        "event=view_build module=view status=ok view=scatter marks={} omitted={}",
        points.len(),
        scene.omitted().len()
    );
    scene.with_axes(
        Some(Axis::new("Song Length (Seconds)", x_scale)),
        Some(Axis::new("Tempo (BPM)", y_scale)),
    )
}
