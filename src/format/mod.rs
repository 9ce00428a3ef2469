// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dataset formats.
//!
//! Currently this module only reads the fight songs CSV layout.

pub mod csv;

pub use self::csv::{load_demo_store, load_fight_songs, parse_fight_songs_csv, LoadError};
