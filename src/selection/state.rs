// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Instant;

use serde::Serialize;

use crate::model::SchoolId;

/// The single cross-view selection: nothing, or exactly one school.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "kind", content = "school", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(SchoolId),
}

impl SelectionState {
    pub fn selected(&self) -> Option<&SchoolId> {
        match self {
            Self::Unselected => None,
            Self::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &SchoolId) -> bool {
        self.selected() == Some(id)
    }

    /// `Selected(id)` becomes `Unselected`; anything else becomes `Selected(id)`.
    pub fn toggled(&self, id: &SchoolId) -> Self {
        if self.is_selected(id) {
            Self::Unselected
        } else {
            Self::Selected(id.clone())
        }
    }
}

/// What every subscriber receives after a transition.
#[derive(Debug, Clone)]
pub struct Notification {
    state: SelectionState,
    revision: u64,
    at: Instant,
}

impl Notification {
    pub fn new(state: SelectionState, revision: u64, at: Instant) -> Self {
        Self { state, revision, at }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Time the transition started; views anchor their style interpolation here.
    pub fn at(&self) -> Instant {
        self.at
    }
}
