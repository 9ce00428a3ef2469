// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Instant;

use serde::Serialize;

use super::highlight::{
    apply_highlight, ElementCollection, ElementRole, ElementSpec, Treatment, ViewPolicy,
};
use super::tween::ElementStyle;
use super::{Point, Rgb, ViewError, ViewKind};
use crate::layout::LinearScale;
use crate::model::SchoolId;
use crate::selection::{Notification, ObserverError, SelectionObserver, SelectionState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A labelled value axis with its tick values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    label: String,
    scale: LinearScale,
    ticks: Vec<f64>,
}

impl Axis {
    pub fn new(label: impl Into<String>, scale: LinearScale) -> Self {
        let ticks = scale.ticks(10);
        Self { label: label.into(), scale, ticks }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn scale(&self) -> &LinearScale {
        &self.scale
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }
}

/// Retained scene of one view: tagged elements plus the geometry they were laid out in.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewScene {
    kind: ViewKind,
    viewport: Viewport,
    policy: ViewPolicy,
    elements: ElementCollection,
    x_axis: Option<Axis>,
    y_axis: Option<Axis>,
    omitted: Vec<SchoolId>,
    applied_revision: u64,
}

impl ViewScene {
    pub fn new(kind: ViewKind, viewport: Viewport, policy: ViewPolicy) -> Self {
        Self {
            kind,
            viewport,
            policy,
            elements: ElementCollection::new(),
            x_axis: None,
            y_axis: None,
            omitted: Vec::new(),
            applied_revision: 0,
        }
    }

    pub fn with_axes(mut self, x_axis: Option<Axis>, y_axis: Option<Axis>) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    pub(crate) fn push_mark(&mut self, id: SchoolId, position: Point, fill: Rgb) {
        let style = self.policy.mark.base;
        self.elements.push(
            ElementSpec { id, role: ElementRole::Mark, position, fill, text: None, style },
            self.policy.transition,
        );
    }

    pub(crate) fn push_label(&mut self, id: SchoolId, position: Point, fill: Rgb, text: String) {
        let style = self.policy.label.base;
        self.elements.push(
            ElementSpec { id, role: ElementRole::Label, position, fill, text: Some(text), style },
            self.policy.transition,
        );
    }

    /// Records a school the view could not place (missing coordinate or metric).
    pub(crate) fn omit(&mut self, id: SchoolId) {
        self.omitted.push(id);
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn policy(&self) -> &ViewPolicy {
        &self.policy
    }

    pub fn elements(&self) -> &ElementCollection {
        &self.elements
    }

    pub fn x_axis(&self) -> Option<&Axis> {
        self.x_axis.as_ref()
    }

    pub fn y_axis(&self) -> Option<&Axis> {
        self.y_axis.as_ref()
    }

    pub fn omitted(&self) -> &[SchoolId] {
        &self.omitted
    }

    pub fn applied_revision(&self) -> u64 {
        self.applied_revision
    }

    pub fn apply(&mut self, state: &SelectionState, now: Instant) {
        apply_highlight(&mut self.elements, state, &self.policy, now);
    }

    /// School of the topmost mark under `point`.
    pub fn hit_test(&self, point: Point, now: Instant) -> Option<&SchoolId> {
        self.elements.hit_test(point, now).map(|element| element.id())
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.elements.is_animating(now)
    }

    pub fn snapshot(&self, now: Instant) -> SceneSnapshot<'_> {
        SceneSnapshot {
            kind: self.kind,
            viewport: self.viewport,
            x_axis: self.x_axis.as_ref(),
            y_axis: self.y_axis.as_ref(),
            omitted: &self.omitted,
            elements: self
                .elements
                .painted()
                .map(|element| ElementSnapshot {
                    school: element.id(),
                    role: element.role(),
                    position: element.position(),
                    fill: element.fill(),
                    text: element.text(),
                    treatment: element.treatment(),
                    style: element.style_at(now),
                })
                .collect(),
        }
    }
}

impl SelectionObserver for ViewScene {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn on_selection_change(&mut self, notification: &Notification) -> Result<(), ObserverError> {
        if notification.revision() < self.applied_revision {
            return Err(ViewError::StaleRevision {
                view: self.kind,
                applied: self.applied_revision,
                received: notification.revision(),
            }
            .into());
        }
        self.apply(notification.state(), notification.at());
        self.applied_revision = notification.revision();
        log::trace!(
            "event=view_restyle module=view status=ok view={} rev={} elements={}",
            self.kind,
            notification.revision(),
            self.elements.len()
        );
        Ok(())
    }
}

/// Serializable picture of a scene at one instant, elements back to front.
#[derive(Debug, Serialize)]
pub struct SceneSnapshot<'a> {
    kind: ViewKind,
    viewport: Viewport,
    x_axis: Option<&'a Axis>,
    y_axis: Option<&'a Axis>,
    omitted: &'a [SchoolId],
    elements: Vec<ElementSnapshot<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ElementSnapshot<'a> {
    school: &'a SchoolId,
    role: ElementRole,
    position: Point,
    fill: Rgb,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    treatment: Treatment,
    style: ElementStyle,
}
