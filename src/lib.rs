// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Anthem: a cross-view dashboard over the college fight songs dataset.
//!
//! One [`selection::SelectionCoordinator`] holds at most one selected school and fans every change
//! out to the map, the two beeswarm distributions, the scatter plot and the detail panel. The
//! terminal front-end lives in [`tui`]; everything else is usable headless.

pub mod dashboard;
pub mod format;
pub mod layout;
pub mod logging;
pub mod model;
pub mod search;
pub mod selection;
pub mod store;
pub mod tui;
pub mod view;
