// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cross-view selection.
//!
//! A [`SelectionCoordinator`] owns the one shared [`SelectionState`] and pushes every change to
//! its subscribers before returning. There is no global instance; the dashboard owns one.

pub mod coordinator;
pub mod state;

#[cfg(test)]
mod tests;

pub use coordinator::{
    ObserverError, ObserverFailure, Operation, ReentrancyPolicy, SelectionCoordinator,
    SelectionError, SelectionObserver, SubscriptionId, Transition,
};
pub use state::{Notification, SelectionState};
