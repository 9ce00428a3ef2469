// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory entity store.
//!
//! Loaded once at startup and never mutated; every view and the detail panel read from it by id.

pub mod entity_store;

pub use entity_store::{EntityStore, StoreError};
