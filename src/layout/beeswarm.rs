// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use super::scale::LinearScale;
use crate::model::{Entity, SchoolId};

/// Relaxation iterations per layout.
pub const ITERATIONS: usize = 150;
/// Weight of the pull toward the ideal x.
pub const X_STRENGTH: f64 = 1.0;
/// Weight of the pull toward the axis center.
pub const Y_STRENGTH: f64 = 0.1;
/// Upper bound on separation sweeps per iteration.
pub const MAX_SWEEPS: usize = 16;

const TIE_FRACTION: f64 = 1e-3;

/// Per-iteration cooling: alpha reaches 0.001 after 300 iterations.
fn alpha_decay() -> f64 {
    1.0 - 0.001f64.powf(1.0 / 300.0)
}

/// Pixel interval the value axis spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    start: f64,
    end: f64,
}

impl AxisRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start != self.end
    }
}

/// Placed position of one entity in a distribution view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    id: SchoolId,
    x: f64,
    y: f64,
    target_x: f64,
    target_y: f64,
}

impl LayoutNode {
    pub fn id(&self) -> &SchoolId {
        &self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn target_x(&self) -> f64 {
        self.target_x
    }

    pub fn target_y(&self) -> f64 {
        self.target_y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInputReason {
    Empty,
    NonFiniteValue { index: usize, school: SchoolId },
    Separation { value: f64 },
    AxisRange { start: f64, end: f64 },
    Center { value: f64 },
}

impl fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("no entities to lay out"),
            Self::NonFiniteValue { index, school } => {
                write!(f, "entity {index} ({school}) has a non-finite value")
            }
            Self::Separation { value } => {
                write!(f, "minimum separation must be positive and finite, got {value}")
            }
            Self::AxisRange { start, end } => {
                write!(f, "axis range must be finite and non-empty, got [{start}, {end}]")
            }
            Self::Center { value } => write!(f, "axis center must be finite, got {value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    InvalidInput { reason: InvalidInputReason },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "invalid layout input: {reason}"),
        }
    }
}

impl std::error::Error for LayoutError {}

fn invalid(reason: InvalidInputReason) -> LayoutError {
    LayoutError::InvalidInput { reason }
}

/// Collision-aware beeswarm layout along one axis.
///
/// Ideal x is a linear scale of `accessor` over the value extent into `axis`; every node starts
/// at its ideal x on `center_y` and is relaxed for [`ITERATIONS`] rounds so that no two centers
/// end up closer than `min_separation` (subject to residual overlap on very dense inputs).
/// Deterministic; output order is input order.
pub fn layout<E, F>(
    entities: &[E],
    accessor: F,
    axis: AxisRange,
    center_y: f64,
    min_separation: f64,
) -> Result<Vec<LayoutNode>, LayoutError>
where
    E: Borrow<Entity>,
    F: Fn(&Entity) -> f64,
{
    if !axis.is_valid() {
        return Err(invalid(InvalidInputReason::AxisRange { start: axis.start, end: axis.end }));
    }
    let values = accessor_values(entities, &accessor)?;
    let scale = LinearScale::from_extent(values.iter().copied(), (axis.start, axis.end))
        .ok_or_else(|| invalid(InvalidInputReason::Empty))?;
    place(entities, &values, &scale, center_y, min_separation)
}

/// Same as [`layout`], with an explicit value scale instead of the raw extent.
pub fn layout_on_scale<E, F>(
    entities: &[E],
    accessor: F,
    scale: &LinearScale,
    center_y: f64,
    min_separation: f64,
) -> Result<Vec<LayoutNode>, LayoutError>
where
    E: Borrow<Entity>,
    F: Fn(&Entity) -> f64,
{
    let (start, end) = scale.range();
    if !AxisRange::new(start, end).is_valid() {
        return Err(invalid(InvalidInputReason::AxisRange { start, end }));
    }
    let values = accessor_values(entities, &accessor)?;
    place(entities, &values, scale, center_y, min_separation)
}

fn accessor_values<E, F>(entities: &[E], accessor: &F) -> Result<Vec<f64>, LayoutError>
where
    E: Borrow<Entity>,
    F: Fn(&Entity) -> f64,
{
    if entities.is_empty() {
        return Err(invalid(InvalidInputReason::Empty));
    }
    entities
        .iter()
        .enumerate()
        .map(|(index, entity)| {
            let entity = entity.borrow();
            let value = accessor(entity);
            if value.is_finite() {
                Ok(value)
            } else {
                Err(invalid(InvalidInputReason::NonFiniteValue {
                    index,
                    school: entity.school().clone(),
                }))
            }
        })
        .collect()
}

fn place<E: Borrow<Entity>>(
    entities: &[E],
    values: &[f64],
    scale: &LinearScale,
    center_y: f64,
    min_separation: f64,
) -> Result<Vec<LayoutNode>, LayoutError> {
    if !min_separation.is_finite() || min_separation <= 0.0 {
        return Err(invalid(InvalidInputReason::Separation { value: min_separation }));
    }
    if !center_y.is_finite() {
        return Err(invalid(InvalidInputReason::Center { value: center_y }));
    }

    let mut nodes = entities
        .iter()
        .zip(values)
        .map(|(entity, value)| {
            let target_x = scale.apply(*value);
            LayoutNode {
                id: entity.borrow().school().clone(),
                x: target_x,
                y: center_y,
                target_x,
                target_y: center_y,
            }
        })
        .collect::<Vec<_>>();

    relax(&mut nodes, min_separation);

    log::debug!(
        "event=layout module=layout status=ok nodes={} min_separation={min_separation}",
        nodes.len()
    );
    Ok(nodes)
}

fn relax(nodes: &mut [LayoutNode], min_separation: f64) {
    let decay = alpha_decay();
    let mut alpha = 1.0;
    for _ in 0..ITERATIONS {
        for node in nodes.iter_mut() {
            node.x += (node.target_x - node.x) * X_STRENGTH * alpha;
            node.y += (node.target_y - node.y) * Y_STRENGTH * alpha;
        }
        if nodes.len() > 1 {
            for _ in 0..MAX_SWEEPS {
                if !separate(nodes, min_separation) {
                    break;
                }
            }
        }
        alpha *= 1.0 - decay;
    }
}

/// One pairwise separation sweep. Returns whether any pair overlapped.
fn separate(nodes: &mut [LayoutNode], min_separation: f64) -> bool {
    let min_sq = min_separation * min_separation;
    let tie = TIE_FRACTION * min_separation;
    let mut moved = false;

    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let mut dx = nodes[j].x - nodes[i].x;
            let mut dy = nodes[j].y - nodes[i].y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq >= min_sq {
                continue;
            }

            // Aligned pairs get a deterministic vertical bias: odd-indexed partners go to +y.
            if dy.abs() < tie {
                dy = if dy != 0.0 {
                    tie.copysign(dy)
                } else if j % 2 == 1 {
                    tie
                } else {
                    -tie
                };
            }
            if dx == 0.0 {
                dx = tie;
            }

            let norm = (dx * dx + dy * dy).sqrt();
            let (ux, uy) = (dx / norm, dy / norm);
            let push = (min_separation - dist_sq.sqrt()) * 0.5;

            nodes[i].x -= ux * push;
            nodes[i].y -= uy * push;
            nodes[j].x += ux * push;
            nodes[j].y += uy * push;
            moved = true;
        }
    }
    moved
}
