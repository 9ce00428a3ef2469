// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout algorithms for the chart views.
//!
//! Linear value scales plus the collision-aware beeswarm used by the distribution view.

pub mod beeswarm;
pub mod scale;

pub use beeswarm::{
    layout, layout_on_scale, AxisRange, InvalidInputReason, LayoutError, LayoutNode, ITERATIONS,
    MAX_SWEEPS, X_STRENGTH, Y_STRENGTH,
};
pub use scale::LinearScale;
