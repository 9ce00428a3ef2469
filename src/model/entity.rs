// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

use super::ids::SchoolId;
use super::trope::TropeFlags;

/// Athletic conference of a school.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Conference {
    Acc,
    Big12,
    BigTen,
    Pac12,
    Sec,
    Independent,
    Other(SmolStr),
}

impl Conference {
    pub const KNOWN: [Conference; 6] = [
        Conference::Acc,
        Conference::Big12,
        Conference::BigTen,
        Conference::Pac12,
        Conference::Sec,
        Conference::Independent,
    ];

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "ACC" => Self::Acc,
            "Big 12" => Self::Big12,
            "Big Ten" => Self::BigTen,
            "Pac-12" => Self::Pac12,
            "SEC" => Self::Sec,
            "Independent" => Self::Independent,
            other => Self::Other(SmolStr::new(other)),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Acc => "ACC",
            Self::Big12 => "Big 12",
            Self::BigTen => "Big Ten",
            Self::Pac12 => "Pac-12",
            Self::Sec => "SEC",
            Self::Independent => "Independent",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Conference {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Whether the song was written by a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum StudentWriter {
    Yes,
    No,
    #[default]
    Unknown,
}

impl StudentWriter {
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "Unknown",
        }
    }
}

/// Longitude/latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoord {
    lon: f64,
    lat: f64,
}

impl GeoCoord {
    /// Returns `None` for non-finite or out-of-range coordinates.
    pub fn new(lon: f64, lat: f64) -> Option<Self> {
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        Some(Self { lon, lat })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

/// Numeric song metric a distribution view lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Tempo,
    Duration,
}

impl Metric {
    /// Raw metric value; may be non-finite when the source said so.
    pub fn value(self, entity: &Entity) -> Option<f64> {
        match self {
            Self::Tempo => entity.tempo(),
            Self::Duration => entity.duration(),
        }
    }

    /// Metric value usable for layout (present and finite).
    pub fn finite_value(self, entity: &Entity) -> Option<f64> {
        self.value(entity).filter(|value| value.is_finite())
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Self::Tempo => "Beats Per Minute",
            Self::Duration => "Seconds",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Tempo => "BPM",
            Self::Duration => "sec",
        }
    }
}

/// One school and its fight song. Immutable once loaded into the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    school: SchoolId,
    conference: Conference,
    song_name: String,
    writers: String,
    year: Option<u16>,
    student_writer: StudentWriter,
    state: Option<SmolStr>,
    coord: Option<GeoCoord>,
    tempo: Option<f64>,
    duration: Option<f64>,
    tropes: TropeFlags,
    number_fights: Option<u32>,
    spotify_id: Option<String>,
}

impl Entity {
    pub fn new(school: SchoolId, conference: Conference) -> Self {
        Self {
            school,
            conference,
            song_name: String::new(),
            writers: String::new(),
            year: None,
            student_writer: StudentWriter::Unknown,
            state: None,
            coord: None,
            tempo: None,
            duration: None,
            tropes: TropeFlags::NONE,
            number_fights: None,
            spotify_id: None,
        }
    }

    pub fn with_song(mut self, song_name: impl Into<String>, writers: impl Into<String>) -> Self {
        self.song_name = song_name.into();
        self.writers = writers.into();
        self
    }

    pub fn with_year(mut self, year: Option<u16>) -> Self {
        self.year = year;
        self
    }

    pub fn with_student_writer(mut self, student_writer: StudentWriter) -> Self {
        self.student_writer = student_writer;
        self
    }

    /// Postal abbreviation of the campus state; blank values are dropped.
    pub fn with_state(mut self, state: Option<&str>) -> Self {
        self.state = state.map(str::trim).filter(|abbr| !abbr.is_empty()).map(SmolStr::new);
        self
    }

    pub fn with_coord(mut self, coord: Option<GeoCoord>) -> Self {
        self.coord = coord;
        self
    }

    pub fn with_metrics(mut self, tempo: Option<f64>, duration: Option<f64>) -> Self {
        self.tempo = tempo;
        self.duration = duration;
        self
    }

    pub fn with_tropes(mut self, tropes: TropeFlags) -> Self {
        self.tropes = tropes;
        self
    }

    pub fn with_number_fights(mut self, number_fights: Option<u32>) -> Self {
        self.number_fights = number_fights;
        self
    }

    pub fn with_spotify_id(mut self, spotify_id: Option<String>) -> Self {
        self.spotify_id = spotify_id;
        self
    }

    pub fn school(&self) -> &SchoolId {
        &self.school
    }

    pub fn conference(&self) -> &Conference {
        &self.conference
    }

    pub fn song_name(&self) -> &str {
        &self.song_name
    }

    pub fn writers(&self) -> &str {
        &self.writers
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn student_writer(&self) -> StudentWriter {
        self.student_writer
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn coord(&self) -> Option<GeoCoord> {
        self.coord
    }

    pub fn tempo(&self) -> Option<f64> {
        self.tempo
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn tropes(&self) -> TropeFlags {
        self.tropes
    }

    pub fn number_fights(&self) -> Option<u32> {
        self.number_fights
    }

    pub fn spotify_id(&self) -> Option<&str> {
        self.spotify_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::{Conference, Entity, GeoCoord, Metric};
    use crate::model::SchoolId;

    #[test]
    fn conference_labels_round_trip_and_keep_unknown_text() {
        for conference in Conference::KNOWN {
            assert_eq!(Conference::from_label(conference.label()), conference);
        }
        assert_eq!(Conference::from_label(" Mountain West ").label(), "Mountain West");
    }

    #[test]
    fn geo_coord_rejects_non_finite_and_out_of_range() {
        assert!(GeoCoord::new(f64::NAN, 40.0).is_none());
        assert!(GeoCoord::new(-200.0, 40.0).is_none());
        assert!(GeoCoord::new(-86.2, 91.0).is_none());
        assert!(GeoCoord::new(-86.2, 41.7).is_some());
    }

    #[test]
    fn finite_metric_value_filters_nan() {
        let school = SchoolId::new("Somewhere State").expect("school id");
        let entity = Entity::new(school, Conference::Independent)
            .with_metrics(Some(f64::NAN), Some(64.0));
        assert!(Metric::Tempo.value(&entity).is_some());
        assert_eq!(Metric::Tempo.finite_value(&entity), None);
        assert_eq!(Metric::Duration.finite_value(&entity), Some(64.0));
    }
}
