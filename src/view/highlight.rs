// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::tween::{ElementStyle, StyleTween};
use super::{Point, Rgb};
use crate::model::SchoolId;
use crate::selection::SelectionState;

/// Highlight treatment currently applied to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Treatment {
    Base,
    Highlighted,
    Dimmed,
}

impl Treatment {
    /// The treatment an element with `id` gets under `state`. Nothing else is consulted.
    pub fn for_element(state: &SelectionState, id: &SchoolId) -> Self {
        match state.selected() {
            None => Self::Base,
            Some(selected) if selected == id => Self::Highlighted,
            Some(_) => Self::Dimmed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    Mark,
    Label,
}

/// Target styles for the highlighted and dimmed treatments of one element role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StylePolicy {
    pub base: ElementStyle,
    pub highlighted: ElementStyle,
    pub dimmed: ElementStyle,
}

impl StylePolicy {
    /// Target style; `Base` resolves to the style captured when the element was rendered.
    pub fn target(&self, treatment: Treatment, captured: ElementStyle) -> ElementStyle {
        match treatment {
            Treatment::Base => captured,
            Treatment::Highlighted => self.highlighted,
            Treatment::Dimmed => self.dimmed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewPolicy {
    pub mark: StylePolicy,
    pub label: StylePolicy,
    #[serde(skip)]
    pub transition: Duration,
}

impl ViewPolicy {
    pub fn for_role(&self, role: ElementRole) -> &StylePolicy {
        match role {
            ElementRole::Mark => &self.mark,
            ElementRole::Label => &self.label,
        }
    }
}

/// One drawn element, tagged with the school it represents.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedElement {
    id: SchoolId,
    role: ElementRole,
    position: Point,
    fill: Rgb,
    text: Option<String>,
    base: ElementStyle,
    treatment: Treatment,
    tween: StyleTween,
    render_order: usize,
}

impl RenderedElement {
    pub fn id(&self) -> &SchoolId {
        &self.id
    }

    pub fn role(&self) -> ElementRole {
        self.role
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn fill(&self) -> Rgb {
        self.fill
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn base_style(&self) -> ElementStyle {
        self.base
    }

    pub fn treatment(&self) -> Treatment {
        self.treatment
    }

    pub fn render_order(&self) -> usize {
        self.render_order
    }

    /// Style to draw at `now`, mid-transition values included.
    pub fn style_at(&self, now: Instant) -> ElementStyle {
        self.tween.value_at(now)
    }

    /// Style the element is heading to.
    pub fn target_style(&self) -> ElementStyle {
        self.tween.target()
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tween.is_animating(now)
    }

    pub fn contains(&self, point: Point, now: Instant) -> bool {
        self.role == ElementRole::Mark
            && self.position.distance(point) <= self.style_at(now).extent()
    }
}

/// The rendered elements of one view, plus their current paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementCollection {
    elements: Vec<RenderedElement>,
    paint_order: Vec<usize>,
}

pub struct ElementSpec {
    pub id: SchoolId,
    pub role: ElementRole,
    pub position: Point,
    pub fill: Rgb,
    pub text: Option<String>,
    pub style: ElementStyle,
}

impl ElementCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, spec: ElementSpec, transition: Duration) {
        let render_order = self.elements.len();
        self.elements.push(RenderedElement {
            id: spec.id,
            role: spec.role,
            position: spec.position,
            fill: spec.fill,
            text: spec.text,
            base: spec.style,
            treatment: Treatment::Base,
            tween: StyleTween::settled(spec.style, transition),
            render_order,
        });
        self.paint_order.push(render_order);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in render order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderedElement> + '_ {
        self.elements.iter()
    }

    /// Elements back to front.
    pub fn painted(&self) -> impl Iterator<Item = &RenderedElement> + '_ {
        self.paint_order.iter().map(|idx| &self.elements[*idx])
    }

    pub fn tagged(&self, id: &SchoolId) -> impl Iterator<Item = &RenderedElement> + '_ {
        let id = id.clone();
        self.elements.iter().filter(move |element| element.id == id)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.elements.iter().any(|element| element.is_animating(now))
    }

    /// Topmost mark under `point`.
    pub fn hit_test(&self, point: Point, now: Instant) -> Option<&RenderedElement> {
        self.paint_order
            .iter()
            .rev()
            .map(|idx| &self.elements[*idx])
            .find(|element| element.contains(point, now))
    }
}

/// Re-styles every element of a view for `state`.
///
/// `Selected(id)`: elements tagged `id` are highlighted and painted last, everything else is
/// dimmed. `Unselected`: every element returns to its captured base style and paint order goes
/// back to render order. Style changes start a transition at `now`; treatments switch at once.
pub fn apply_highlight(
    collection: &mut ElementCollection,
    state: &SelectionState,
    policy: &ViewPolicy,
    now: Instant,
) {
    for element in &mut collection.elements {
        let treatment = Treatment::for_element(state, &element.id);
        let target = policy.for_role(element.role).target(treatment, element.base);
        element.treatment = treatment;
        element.tween.retarget(target, now);
    }

    let (front, back): (Vec<usize>, Vec<usize>) = (0..collection.elements.len())
        .partition(|idx| collection.elements[*idx].treatment == Treatment::Highlighted);
    collection.paint_order = back;
    collection.paint_order.extend(front);
}
