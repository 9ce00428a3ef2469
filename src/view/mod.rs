// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! View adapters.
//!
//! Every view computes a retained [`ViewScene`] once from the store: elements tagged with a
//! school id, in the view's own pixel geometry (origin top-left, y down). Selection changes only
//! re-style those elements through [`apply_highlight`]; geometry is never recomputed.

pub mod detail;
pub mod distribution;
pub mod highlight;
pub mod map;
pub mod scatter;
pub mod scene;
pub mod tween;


use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::layout::LayoutError;
use crate::model::Conference;
use crate::selection::ObserverError;

pub use detail::{DetailError, DetailPanel, DetailRecord, DetailView, RadarAxis, TropeRadar};
pub use distribution::build_distribution_scene;
pub use highlight::{
    apply_highlight, ElementCollection, ElementRole, ElementSpec, RenderedElement, StylePolicy,
    Treatment, ViewPolicy,
};
pub use map::{build_map_scene, AlbersUsa, Equirectangular, Projection};
pub use scatter::build_scatter_scene;
pub use scene::{Axis, ElementSnapshot, SceneSnapshot, ViewScene, Viewport};
pub use tween::{ElementStyle, StyleTween, TRANSITION};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fill color of a conference's marks.
pub fn conference_color(conference: &Conference) -> Rgb {
    match conference {
        Conference::Acc => Rgb(0x01, 0x3c, 0xa6),
        Conference::Big12 => Rgb(0xef, 0x47, 0x3e),
        Conference::BigTen => Rgb(0x00, 0x88, 0xce),
        Conference::Pac12 => Rgb(0x00, 0x27, 0x4d),
        Conference::Sec => Rgb(0xf1, 0xb8, 0x2d),
        Conference::Independent => Rgb(0x9a, 0xbd, 0x55),
        Conference::Other(_) => Rgb(0x99, 0x99, 0x99),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Map,
    TempoDistribution,
    DurationDistribution,
    Scatter,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Map,
        ViewKind::TempoDistribution,
        ViewKind::DurationDistribution,
        ViewKind::Scatter,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Map => "Map",
            Self::TempoDistribution => "Tempo",
            Self::DurationDistribution => "Duration",
            Self::Scatter => "Tempo vs Length",
        }
    }

    /// Short machine name, used in logs and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::TempoDistribution => "tempo",
            Self::DurationDistribution => "duration",
            Self::Scatter => "scatter",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Pixel geometry shared by all views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewGeometry {
    pub width: f64,
    pub map_height: f64,
    pub chart_height: f64,
    pub margin: Margin,
    pub scatter_padding: Margin,
    /// Collision radius of beeswarm points; centers stay twice this far apart.
    pub collide_radius: f64,
    pub point_radius: f64,
    pub highlight_radius: f64,
    pub icon_size: f64,
    pub dimmed_opacity: f64,
    #[serde(skip)]
    pub transition: Duration,
}

impl Default for ViewGeometry {
    fn default() -> Self {
        Self {
            width: 800.0,
            map_height: 500.0,
            chart_height: 350.0,
            margin: Margin { top: 30.0, right: 30.0, bottom: 40.0, left: 40.0 },
            scatter_padding: Margin { top: 20.0, right: 30.0, bottom: 50.0, left: 50.0 },
            collide_radius: 7.0,
            point_radius: 6.0,
            highlight_radius: 10.0,
            icon_size: 24.0,
            dimmed_opacity: 0.3,
            transition: TRANSITION,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    Layout { view: ViewKind, source: LayoutError },
    StaleRevision { view: ViewKind, applied: u64, received: u64 },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout { view, source } => write!(f, "cannot lay out {view} view: {source}"),
            Self::StaleRevision { view, applied, received } => write!(
                f,
                "{view} view already applied revision {applied}, refusing older revision {received}"
            ),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout { source, .. } => Some(source),
            Self::StaleRevision { .. } => None,
        }
    }
}

impl From<ViewError> for ObserverError {
    fn from(err: ViewError) -> Self {
        ObserverError::Failed { reason: err.to_string() }
    }
}
