// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use anthem::model::{Conference, Entity, GeoCoord, SchoolId, Trope, TropeFlags};
use anthem::store::EntityStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Size of the real dataset.
    Dataset,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Dataset => "dataset_65",
            Self::Medium => "medium_400",
            Self::Large => "large_2000",
        }
    }

    pub fn len(self) -> usize {
        match self {
            Self::Dataset => 65,
            Self::Medium => 400,
            Self::Large => 2000,
        }
    }
}

/// splitmix64 finaliser; a stable pseudo-random stream keyed by index.
fn mix(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9e37_79b9_7f4a_7c15);
    value = (value ^ (value >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    value ^ (value >> 31)
}

fn unit(seed: u64) -> f64 {
    (mix(seed) >> 11) as f64 / (1u64 << 53) as f64
}

pub fn entities(case: Case) -> Vec<Entity> {
    (0..case.len() as u64)
        .map(|idx| {
            let school = SchoolId::new(format!("Bench School {idx:04}")).expect("school id");
            let conference = Conference::KNOWN[(mix(idx) % 6) as usize].clone();
            // Tempo clusters around the two real modes (march ~150, slow ~75).
            let tempo = if unit(idx * 3) < 0.8 {
                130.0 + 45.0 * unit(idx * 5)
            } else {
                65.0 + 20.0 * unit(idx * 7)
            };
            let duration = 40.0 + 120.0 * unit(idx * 11);
            let coord = GeoCoord::new(-124.0 + 56.0 * unit(idx * 13), 26.0 + 22.0 * unit(idx * 17));
            let tropes = Trope::ALL
                .into_iter()
                .enumerate()
                .filter(|(bit, _)| mix(idx * 19 + *bit as u64) % 2 == 0)
                .map(|(_, trope)| trope)
                .collect::<TropeFlags>();
            Entity::new(school, conference)
                .with_coord(coord)
                .with_metrics(Some(tempo.round()), Some(duration.round()))
                .with_tropes(tropes)
        })
        .collect()
}

pub fn store(case: Case) -> EntityStore {
    EntityStore::new(entities(case)).expect("bench store")
}
