// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use ::csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::model::{
    Conference, Entity, GeoCoord, IdError, SchoolId, StudentWriter, Trope, TropeFlags,
};
use crate::store::{EntityStore, StoreError};

const DEMO_CSV: &str = include_str!("../../data/fight_songs_demo.csv");

#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    Csv { line: Option<u64>, source: ::csv::Error },
    InvalidSchool { line: u64, source: IdError },
    Store { source: StoreError },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Csv { line: Some(line), source } => {
                write!(f, "csv error at line {line}: {source}")
            }
            Self::Csv { line: None, source } => write!(f, "csv error: {source}"),
            Self::InvalidSchool { line, source } => {
                write!(f, "invalid school at line {line}: {source}")
            }
            Self::Store { source } => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::InvalidSchool { source, .. } => Some(source),
            Self::Store { source } => Some(source),
        }
    }
}

/// One CSV row as it appears on disk. Every column is optional so partial datasets load.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    school: String,
    conference: String,
    song_name: String,
    writers: String,
    year: Option<String>,
    student_writer: Option<String>,
    bpm: Option<String>,
    sec_duration: Option<String>,
    fight: Option<String>,
    victory: Option<String>,
    win_won: Option<String>,
    rah: Option<String>,
    nonsense: Option<String>,
    colors: Option<String>,
    spelling: Option<String>,
    number_fights: Option<String>,
    spotify_id: Option<String>,
    state: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

impl RawRow {
    fn flag(&self, trope: Trope) -> Option<&str> {
        match trope {
            Trope::Fight => self.fight.as_deref(),
            Trope::Victory => self.victory.as_deref(),
            Trope::WinWon => self.win_won.as_deref(),
            Trope::Rah => self.rah.as_deref(),
            Trope::Nonsense => self.nonsense.as_deref(),
            Trope::Colors => self.colors.as_deref(),
            Trope::Spelling => self.spelling.as_deref(),
        }
    }

    fn into_entity(self, line: u64) -> Result<Entity, LoadError> {
        let school =
            SchoolId::new(&self.school).map_err(|source| LoadError::InvalidSchool { line, source })?;

        let tropes = Trope::ALL
            .into_iter()
            .filter(|trope| self.flag(*trope).is_some_and(is_yes))
            .collect::<TropeFlags>();

        let coord = match (
            parse_number::<f64>(self.longitude.as_deref()),
            parse_number::<f64>(self.latitude.as_deref()),
        ) {
            (Some(lon), Some(lat)) => GeoCoord::new(lon, lat),
            _ => None,
        };

        let student_writer = match self.student_writer.as_deref().map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("yes") => StudentWriter::Yes,
            Some(value) if value.eq_ignore_ascii_case("no") => StudentWriter::No,
            _ => StudentWriter::Unknown,
        };

        let spotify_id = self
            .spotify_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned);

        Ok(Entity::new(school, Conference::from_label(&self.conference))
            .with_song(self.song_name.trim(), self.writers.trim())
            .with_year(parse_number::<u16>(self.year.as_deref()))
            .with_student_writer(student_writer)
            .with_state(self.state.as_deref())
            .with_coord(coord)
            .with_metrics(
                parse_number::<f64>(self.bpm.as_deref()),
                parse_number::<f64>(self.sec_duration.as_deref()),
            )
            .with_tropes(tropes)
            .with_number_fights(parse_number::<u32>(self.number_fights.as_deref()))
            .with_spotify_id(spotify_id))
    }
}

fn is_yes(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("yes")
}

/// Lenient numeric field: empty, "Unknown" or unparsable values become `None`.
fn parse_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("unknown") {
        return None;
    }
    raw.parse::<T>().ok()
}

/// Parses a header-addressed fight songs CSV into a store.
///
/// Unknown columns are ignored. Rows with an empty school abort the load, as do duplicate
/// schools.
pub fn parse_fight_songs_csv<R: Read>(reader: R) -> Result<EntityStore, LoadError> {
    let mut reader = ReaderBuilder::new().has_headers(true).trim(Trim::All).from_reader(reader);
    let headers = reader.headers().map_err(|source| LoadError::Csv { line: None, source })?.clone();

    let mut entities = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| LoadError::Csv {
            line: source.position().map(|pos| pos.line()),
            source,
        })?;
        let line = record.position().map_or(0, |pos| pos.line());
        let row = record
            .deserialize::<RawRow>(Some(&headers))
            .map_err(|source| LoadError::Csv { line: Some(line), source })?;
        entities.push(row.into_entity(line)?);
    }

    let store = EntityStore::new(entities).map_err(|source| LoadError::Store { source })?;
    log::debug!("event=dataset_parse module=format status=ok rows={}", store.len());
    Ok(store)
}

pub fn load_fight_songs(path: impl AsRef<Path>) -> Result<EntityStore, LoadError> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    match parse_fight_songs_csv(io::BufReader::new(file)) {
        Ok(store) => {
            log::info!(
                "event=dataset_load module=format status=ok path={} rows={}",
                path.display(),
                store.len()
            );
            Ok(store)
        }
        Err(err) => {
            log::error!(
                "event=dataset_load module=format status=error path={} error={err}",
                path.display()
            );
            Err(err)
        }
    }
}

/// The dataset bundled with the binary.
pub fn load_demo_store() -> Result<EntityStore, LoadError> {
    let store = parse_fight_songs_csv(DEMO_CSV.as_bytes())?;
    log::info!("event=dataset_load module=format status=ok source=demo rows={}", store.len());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::{load_demo_store, parse_fight_songs_csv, LoadError};
    use crate::model::{Conference, Metric, StudentWriter, Trope};
    use crate::store::StoreError;

    const HEADER: &str = "school,conference,song_name,writers,year,bpm,sec_duration\n";

    #[test]
    fn parses_rows_and_ignores_unknown_columns() {
        let csv = "school,conference,mystery,bpm,sec_duration,fight,colors,latitude,longitude\n\
                   Michigan,Big Ten,42,150,72,Yes,no,42.2780,-83.7382\n";
        let store = parse_fight_songs_csv(csv.as_bytes()).expect("store");
        let michigan = store.get_by_name("Michigan").expect("michigan");
        assert_eq!(michigan.conference(), &Conference::BigTen);
        assert_eq!(michigan.tempo(), Some(150.0));
        assert_eq!(michigan.duration(), Some(72.0));
        assert!(michigan.tropes().contains(Trope::Fight));
        assert!(!michigan.tropes().contains(Trope::Colors));
        let coord = michigan.coord().expect("coord");
        assert_eq!((coord.lon(), coord.lat()), (-83.7382, 42.2780));
    }

    #[test]
    fn lenient_fields_fall_back_to_none() {
        let csv = format!("{HEADER}Tennessee,SEC,Down the Field,Unknown,Unknown,,abc\n");
        let store = parse_fight_songs_csv(csv.as_bytes()).expect("store");
        let entity = store.get_by_name("Tennessee").expect("tennessee");
        assert_eq!(entity.year(), None);
        assert_eq!(entity.tempo(), None);
        assert_eq!(entity.duration(), None);
        assert_eq!(entity.coord(), None);
        assert_eq!(entity.student_writer(), StudentWriter::Unknown);
        assert_eq!(entity.tropes().count(), 0);
    }

    #[test]
    fn non_finite_tempo_is_kept_but_not_usable_for_layout() {
        let csv = format!("{HEADER}Hawaii,Mountain West,Co-Ed,Unknown,1950,NaN,90\n");
        let store = parse_fight_songs_csv(csv.as_bytes()).expect("store");
        let entity = store.get_by_name("Hawaii").expect("hawaii");
        assert!(entity.tempo().is_some_and(f64::is_nan));
        assert_eq!(Metric::Tempo.finite_value(entity), None);
        assert_eq!(entity.year(), Some(1950));
    }

    #[test]
    fn empty_school_reports_the_line() {
        let csv = format!("{HEADER}Alabama,SEC,Yea Alabama,Sykes,1926,76,64\n  ,SEC,x,y,1900,1,1\n");
        let err = parse_fight_songs_csv(csv.as_bytes()).expect_err("empty school");
        assert!(matches!(err, LoadError::InvalidSchool { line: 3, .. }), "{err}");
    }

    #[test]
    fn duplicate_school_is_rejected() {
        let csv = format!("{HEADER}Alabama,SEC,a,b,1,2,3\nAlabama,SEC,c,d,4,5,6\n");
        let err = parse_fight_songs_csv(csv.as_bytes()).expect_err("duplicate");
        assert!(matches!(
            err,
            LoadError::Store { source: StoreError::DuplicateSchool { first_row: 0, second_row: 1, .. } }
        ));
    }

    #[test]
    fn state_column_is_optional_and_blank_means_none() {
        let csv = "school,conference,state\nClemson,ACC,SC\nDuke,ACC,  \n";
        let store = parse_fight_songs_csv(csv.as_bytes()).expect("store");
        assert_eq!(store.get_by_name("Clemson").and_then(|entity| entity.state()), Some("SC"));
        assert_eq!(store.get_by_name("Duke").and_then(|entity| entity.state()), None);

        let store = parse_fight_songs_csv(format!("{HEADER}Duke,ACC,a,b,1,2,3\n").as_bytes())
            .expect("store without state column");
        assert_eq!(store.get_by_name("Duke").and_then(|entity| entity.state()), None);
    }

    #[test]
    fn demo_dataset_loads() {
        let store = load_demo_store().expect("demo store");
        assert!(store.len() >= 20);
        assert!(store.iter().all(|entity| entity.coord().is_some()));
        assert!(store.iter().all(|entity| entity.state().is_some_and(|abbr| abbr.len() == 2)));
        assert_eq!(store.get_by_name("Notre Dame").and_then(|entity| entity.state()), Some("IN"));
        for conference in Conference::KNOWN {
            assert!(store.iter().any(|entity| entity.conference() == &conference), "{conference}");
        }
    }
}
