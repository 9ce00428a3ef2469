// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;

use crate::model::{Entity, SchoolId};

/// Immutable, keyed collection of every loaded school.
///
/// Iteration follows load order; lookups go through the school id.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    index: HashMap<SchoolId, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateSchool { school: SchoolId, first_row: usize, second_row: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSchool { school, first_row, second_row } => write!(
                f,
                "duplicate school {school:?} (entries {first_row} and {second_row})"
            ),
        }
    }
}

impl std::error::Error for StoreError {}

impl EntityStore {
    pub fn new(entities: Vec<Entity>) -> Result<Self, StoreError> {
        let mut index = HashMap::with_capacity(entities.len());
        for (idx, entity) in entities.iter().enumerate() {
            if let Some(first_row) = index.insert(entity.school().clone(), idx) {
                return Err(StoreError::DuplicateSchool {
                    school: entity.school().clone(),
                    first_row,
                    second_row: idx,
                });
            }
        }
        Ok(Self { entities, index })
    }

    pub fn get(&self, school: &SchoolId) -> Option<&Entity> {
        self.get_by_name(school.as_str())
    }

    /// Lookup by the raw school name (trimmed the same way ids are).
    pub fn get_by_name(&self, name: &str) -> Option<&Entity> {
        self.index.get(name.trim()).map(|idx| &self.entities[*idx])
    }

    pub fn contains(&self, school: &SchoolId) -> bool {
        self.index.contains_key(school)
    }

    /// Position of the school in load order.
    pub fn position(&self, school: &SchoolId) -> Option<usize> {
        self.index.get(school).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
