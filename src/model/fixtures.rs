// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::entity::{Conference, Entity, GeoCoord, StudentWriter};
use super::ids::SchoolId;
use super::trope::{Trope, TropeFlags};
use crate::store::EntityStore;

pub(crate) fn sid(value: &str) -> SchoolId {
    SchoolId::new(value).expect("school id")
}

pub(crate) fn school(
    name: &str,
    conference: &str,
    lon_lat: Option<(f64, f64)>,
    tempo: Option<f64>,
    duration: Option<f64>,
) -> Entity {
    Entity::new(sid(name), Conference::from_label(conference))
        .with_coord(lon_lat.and_then(|(lon, lat)| GeoCoord::new(lon, lat)))
        .with_metrics(tempo, duration)
}

/// Entities carrying only a tempo value, for layout tests.
pub(crate) fn tempo_entities(values: &[f64]) -> Vec<Entity> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| school(&format!("School {idx}"), "Independent", None, Some(*value), None))
        .collect()
}

/// Small mixed dataset: one school without coordinates, one with a non-finite tempo and one
/// without a duration.
pub(crate) fn small_store() -> EntityStore {
    let entities = vec![
        school("Notre Dame", "Independent", Some((-86.2353, 41.7056)), Some(152.0), Some(64.0))
            .with_song("Victory March", "Michael J. Shea and John F. Shea")
            .with_year(Some(1908))
            .with_state(Some("IN"))
            .with_student_writer(StudentWriter::Yes)
            .with_tropes(
                [Trope::Fight, Trope::Victory, Trope::WinWon, Trope::Rah]
                    .into_iter()
                    .collect::<TropeFlags>(),
            )
            .with_spotify_id(Some("4VzYkFcc8u9Hzsk8bUOZI7".to_owned())),
        school("Georgia Tech", "ACC", Some((-84.3963, 33.7756)), Some(172.0), Some(69.0))
            .with_song("Ramblin' Wreck from Georgia Tech", "Frank Roman")
            .with_tropes(TropeFlags::NONE.with(Trope::Nonsense)),
        school("Alabama", "SEC", Some((-87.5692, 33.2098)), Some(76.0), Some(64.0))
            .with_song("Yea Alabama", "Ethelred Lundy Sykes")
            .with_tropes(TropeFlags::NONE.with(Trope::Fight).with(Trope::Victory)),
        school("Hawaii Test", "Independent", None, Some(f64::NAN), Some(90.0)),
        school("Minnesota", "Big Ten", Some((-93.2277, 44.9740)), Some(141.0), None)
            .with_tropes(TropeFlags::NONE.with(Trope::Rah).with(Trope::Spelling)),
    ];
    EntityStore::new(entities).expect("fixture store")
}
