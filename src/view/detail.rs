// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::f64::consts::TAU;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use super::{conference_color, Rgb};
use crate::model::{Entity, SchoolId, Trope};
use crate::selection::{Notification, ObserverError, SelectionObserver, SelectionState};
use crate::store::EntityStore;

pub const PLACEHOLDER: &str = "Click on any school icon or data point to see details.";
pub const NO_TRACK: &str = "No Spotify Track Available";
const UNKNOWN: &str = "Unknown";
const NO_STATE: &str = "USA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    NotFound { school: SchoolId },
}

impl fmt::Display for DetailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { school } => write!(f, "school not found in store: {school}"),
        }
    }
}

impl std::error::Error for DetailError {}

/// One spoke of the trope radar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    trope: Trope,
    label: &'static str,
    value: f64,
    /// Clockwise from 12 o'clock, in radians.
    angle: f64,
    /// `(x, y)` on a unit radius, y pointing down.
    point: (f64, f64),
}

impl RadarAxis {
    pub fn trope(&self) -> Trope {
        self.trope
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn point(&self) -> (f64, f64) {
        self.point
    }

    /// Spoke end at full radius, for grid lines and labels.
    pub fn rim(&self) -> (f64, f64) {
        (self.angle.sin(), -self.angle.cos())
    }
}

/// Seven-axis radar of the song's tropes; each axis is 0 or 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TropeRadar {
    axes: Vec<RadarAxis>,
}

impl TropeRadar {
    pub fn for_entity(entity: &Entity) -> Self {
        let slice = TAU / Trope::ALL.len() as f64;
        let axes = Trope::ALL
            .iter()
            .enumerate()
            .map(|(idx, trope)| {
                let value = if entity.tropes().contains(*trope) { 1.0 } else { 0.0 };
                let angle = idx as f64 * slice;
                RadarAxis {
                    trope: *trope,
                    label: trope.label(),
                    value,
                    angle,
                    point: (angle.sin() * value, -angle.cos() * value),
                }
            })
            .collect();
        Self { axes }
    }

    pub fn axes(&self) -> &[RadarAxis] {
        &self.axes
    }
}

/// Display-ready attributes of one school.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    school: SchoolId,
    state: String,
    conference: String,
    conference_color: Rgb,
    song_name: String,
    writers: String,
    year: String,
    tempo: String,
    length: String,
    student_writer: &'static str,
    number_fights: Option<u32>,
    spotify_url: Option<String>,
    radar: TropeRadar,
}

fn or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_owned()
    } else {
        value.to_owned()
    }
}

fn format_measure(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) if value.is_finite() && value.fract() == 0.0 => format!("{value:.0} {unit}"),
        Some(value) if value.is_finite() => format!("{value} {unit}"),
        _ => UNKNOWN.to_owned(),
    }
}

impl DetailRecord {
    pub fn from_entity(entity: &Entity) -> Self {
        Self {
            school: entity.school().clone(),
            state: entity.state().unwrap_or(NO_STATE).to_owned(),
            conference: entity.conference().to_string(),
            conference_color: conference_color(entity.conference()),
            song_name: or_unknown(entity.song_name()),
            writers: or_unknown(entity.writers()),
            year: entity.year().map_or_else(|| UNKNOWN.to_owned(), |year| year.to_string()),
            tempo: format_measure(entity.tempo(), "BPM"),
            length: format_measure(entity.duration(), "sec"),
            student_writer: entity.student_writer().label(),
            number_fights: entity.number_fights(),
            spotify_url: entity
                .spotify_id()
                .map(|id| format!("https://open.spotify.com/track/{id}")),
            radar: TropeRadar::for_entity(entity),
        }
    }

    pub fn school(&self) -> &SchoolId {
        &self.school
    }

    /// Campus state abbreviation, or `USA` when the dataset has none.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn conference(&self) -> &str {
        &self.conference
    }

    pub fn conference_color(&self) -> Rgb {
        self.conference_color
    }

    pub fn song_name(&self) -> &str {
        &self.song_name
    }

    pub fn writers(&self) -> &str {
        &self.writers
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn tempo(&self) -> &str {
        &self.tempo
    }

    pub fn length(&self) -> &str {
        &self.length
    }

    pub fn student_writer(&self) -> &'static str {
        self.student_writer
    }

    pub fn number_fights(&self) -> Option<u32> {
        self.number_fights
    }

    pub fn spotify_url(&self) -> Option<&str> {
        self.spotify_url.as_deref()
    }

    pub fn radar(&self) -> &TropeRadar {
        &self.radar
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailView {
    Placeholder,
    School(DetailRecord),
}

/// Shows the selected school, or a placeholder when nothing is selected.
#[derive(Debug, Clone)]
pub struct DetailPanel {
    store: Rc<EntityStore>,
    view: DetailView,
}

impl DetailPanel {
    pub fn new(store: Rc<EntityStore>) -> Self {
        Self { store, view: DetailView::Placeholder }
    }

    pub fn view(&self) -> &DetailView {
        &self.view
    }

    pub fn record(&self) -> Option<&DetailRecord> {
        match &self.view {
            DetailView::Placeholder => None,
            DetailView::School(record) => Some(record),
        }
    }

    pub fn lookup(&self, school: &SchoolId) -> Result<DetailRecord, DetailError> {
        self.store
            .get(school)
            .map(DetailRecord::from_entity)
            .ok_or_else(|| DetailError::NotFound { school: school.clone() })
    }

    /// A stale id degrades to the placeholder instead of failing the notification.
    pub fn show(&mut self, state: &SelectionState) {
        self.view = match state.selected() {
            None => DetailView::Placeholder,
            Some(school) => match self.lookup(school) {
                Ok(record) => DetailView::School(record),
                Err(err) => {
                    log::warn!("event=detail_lookup module=view status=degraded error={err}");
                    DetailView::Placeholder
                }
            },
        };
    }
}

impl SelectionObserver for DetailPanel {
    fn name(&self) -> &str {
        "detail"
    }

    fn on_selection_change(&mut self, notification: &Notification) -> Result<(), ObserverError> {
        self.show(notification.state());
        Ok(())
    }
}
