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
use super::{conference_color, Point, ViewError, ViewGeometry, ViewKind};
use crate::layout::{layout_on_scale, LinearScale};
use crate::model::{Entity, Metric};
use crate::store::EntityStore;

/// Domain padding applied to the metric extent (`[min * 0.9, max * 1.05]`).
const DOMAIN_PAD: (f64, f64) = (0.9, 1.05);

pub(crate) fn distribution_policy(geometry: &ViewGeometry) -> ViewPolicy {
    let point = ElementStyle::new(geometry.point_radius);
    let label = ElementStyle::new(0.0).with_opacity(0.0);
    ViewPolicy {
        mark: StylePolicy {
            base: point,
            highlighted: ElementStyle::new(geometry.highlight_radius),
            dimmed: point.with_opacity(geometry.dimmed_opacity),
        },
        label: StylePolicy { base: label, highlighted: label, dimmed: label },
        transition: geometry.transition,
    }
}

pub(crate) fn view_kind(metric: Metric) -> ViewKind {
    match metric {
        Metric::Tempo => ViewKind::TempoDistribution,
        Metric::Duration => ViewKind::DurationDistribution,
    }
}

/// Beeswarm of one metric. Schools without a finite value are left out; the layout runs once,
/// here.
pub fn build_distribution_scene(
    store: &EntityStore,
    metric: Metric,
    geometry: &ViewGeometry,
) -> Result<ViewScene, ViewError> {
    let kind = view_kind(metric);
    let viewport = Viewport { width: geometry.width, height: geometry.chart_height };
    let mut scene = ViewScene::new(kind, viewport, distribution_policy(geometry));

    let (usable, skipped): (Vec<&Entity>, Vec<&Entity>) =
        store.iter().partition(|entity| metric.finite_value(entity).is_some());
    for entity in skipped {
        scene.omit(entity.school().clone());
    }

    let range = (geometry.margin.left, geometry.width - geometry.margin.right);
    let Some(scale) = LinearScale::padded(
        usable.iter().filter_map(|entity| metric.finite_value(entity)),
        DOMAIN_PAD.0,
        DOMAIN_PAD.1,
        range,
    ) else {
        log::warn!("event=view_build module=view status=empty view={kind} reason=no_finite_values");
        return Ok(scene);
    };

    let center_y = geometry.chart_height / 2.0;
    let nodes = layout_on_scale(
        &usable,
        |entity| metric.finite_value(entity).unwrap_or(f64::NAN),
        &scale,
        center_y,
        geometry.collide_radius * 2.0,
    )
    .map_err(|source| ViewError::Layout { view: kind, source })?;

    for (entity, node) in usable.iter().zip(&nodes) {
        scene.push_mark(
            node.id().clone(),
            Point::new(node.x(), node.y()),
            conference_color(entity.conference()),
        );
    }

    log::debug!(
        "event=view_build module=view status=ok view={kind} marks={} omitted={}",
        nodes.len(),
        scene.omitted().len()
    );
    Ok(scene.with_axes(Some(Axis::new(metric.axis_label(), scale)), None))
}
