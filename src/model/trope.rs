// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

/// Lyrical tropes tracked per fight song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trope {
    Fight,
    Victory,
    WinWon,
    Rah,
    Nonsense,
    Colors,
    Spelling,
}

impl Trope {
    /// Radar axis order.
    pub const ALL: [Trope; 7] = [
        Trope::Fight,
        Trope::Victory,
        Trope::WinWon,
        Trope::Rah,
        Trope::Nonsense,
        Trope::Colors,
        Trope::Spelling,
    ];

    /// Column name in the dataset.
    pub fn column(self) -> &'static str {
        match self {
            Self::Fight => "fight",
            Self::Victory => "victory",
            Self::WinWon => "win_won",
            Self::Rah => "rah",
            Self::Nonsense => "nonsense",
            Self::Colors => "colors",
            Self::Spelling => "spelling",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Fight => "Fight",
            Self::Victory => "Victory",
            Self::WinWon => "Win",
            Self::Rah => "Rah",
            Self::Nonsense => "Nonsense",
            Self::Colors => "Colors",
            Self::Spelling => "Spell",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of tropes present in a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TropeFlags(u8);

impl TropeFlags {
    pub const NONE: Self = Self(0);

    pub fn contains(self, trope: Trope) -> bool {
        (self.0 & trope.bit()) != 0
    }

    pub fn with(self, trope: Trope) -> Self {
        Self(self.0 | trope.bit())
    }

    pub fn insert(&mut self, trope: Trope) {
        self.0 |= trope.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> impl Iterator<Item = Trope> {
        Trope::ALL.into_iter().filter(move |trope| self.contains(*trope))
    }
}

impl FromIterator<Trope> for TropeFlags {
    fn from_iter<I: IntoIterator<Item = Trope>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl Serialize for TropeFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
