// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! One [`Entity`] per school/fight song, keyed by [`SchoolId`]. Views only ever hold ids.

pub mod entity;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod trope;

pub use entity::{Conference, Entity, GeoCoord, Metric, StudentWriter};
pub use ids::{Id, IdError, SchoolId};
pub use trope::{Trope, TropeFlags};
