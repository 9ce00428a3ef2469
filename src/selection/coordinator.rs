// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use crate::model::SchoolId;

use super::state::{Notification, SelectionState};

/// A party interested in selection changes (view adapters, the detail panel).
pub trait SelectionObserver {
    /// Name used in log lines and failure reports.
    fn name(&self) -> &str;

    fn on_selection_change(&mut self, notification: &Notification) -> Result<(), ObserverError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    /// The observer was already borrowed when fan-out reached it.
    Busy,
    Failed { reason: String },
}

impl fmt::Display for ObserverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("observer is busy"),
            Self::Failed { reason } => write!(f, "observer failed: {reason}"),
        }
    }
}

impl std::error::Error for ObserverError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Toggle,
    Clear,
    Subscribe,
    Unsubscribe,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toggle => "toggle",
            Self::Clear => "clear",
            Self::Subscribe => "subscribe",
            Self::Unsubscribe => "unsubscribe",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    ReentrantTransition { operation: Operation },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReentrantTransition { operation } => write!(
                f,
                "re-entrant {operation} rejected: a selection transition is already in progress"
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

/// What to do when a subscriber calls back into the coordinator during fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReentrancyPolicy {
    Panic,
    Reject,
}

impl Default for ReentrancyPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Panic
        } else {
            Self::Reject
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverFailure {
    subscription: SubscriptionId,
    observer: String,
    error: ObserverError,
}

impl ObserverFailure {
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    pub fn observer(&self) -> &str {
        &self.observer
    }

    pub fn error(&self) -> &ObserverError {
        &self.error
    }
}

/// Outcome of one completed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    previous: SelectionState,
    state: SelectionState,
    revision: u64,
    notified: usize,
    failures: Vec<ObserverFailure>,
}

impl Transition {
    pub fn previous(&self) -> &SelectionState {
        &self.previous
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of subscribers that were notified successfully.
    pub fn notified(&self) -> usize {
        self.notified
    }

    pub fn failures(&self) -> &[ObserverFailure] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Subscription {
    id: SubscriptionId,
    name: String,
    observer: Rc<RefCell<dyn SelectionObserver>>,
}

/// Owns the selection state and fans every transition out to all subscribers.
///
/// Fan-out is synchronous, in subscription order, and always reaches every subscriber: a
/// failing observer is logged and reported in the [`Transition`], never rolled back. While a
/// fan-out is running, any mutating call on the same coordinator is a re-entrant transition and
/// handled per [`ReentrancyPolicy`]. Reading [`SelectionCoordinator::state`] is always allowed.
pub struct SelectionCoordinator {
    state: RefCell<SelectionState>,
    revision: Cell<u64>,
    subscriptions: RefCell<Vec<Subscription>>,
    next_subscription: Cell<u64>,
    in_transition: Cell<bool>,
    policy: ReentrancyPolicy,
}

impl fmt::Debug for SelectionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionCoordinator")
            .field("state", &self.state.borrow())
            .field("revision", &self.revision.get())
            .field("subscribers", &self.subscriptions.borrow().len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Default for SelectionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the in-transition flag on every exit path, unwinding included.
struct TransitionGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::with_policy(ReentrancyPolicy::default())
    }

    pub fn with_policy(policy: ReentrancyPolicy) -> Self {
        Self {
            state: RefCell::new(SelectionState::Unselected),
            revision: Cell::new(0),
            subscriptions: RefCell::new(Vec::new()),
            next_subscription: Cell::new(1),
            in_transition: Cell::new(false),
            policy,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn policy(&self) -> ReentrancyPolicy {
        self.policy
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Registers an observer. It hears about the next transition, not the current state.
    pub fn subscribe(
        &self,
        observer: Rc<RefCell<dyn SelectionObserver>>,
    ) -> Result<SubscriptionId, SelectionError> {
        let _guard = self.begin(Operation::Subscribe)?;
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        let name = observer
            .try_borrow()
            .map(|observer| observer.name().to_owned())
            .unwrap_or_else(|_| "observer".to_owned());
        log::debug!("event=subscribe module=selection status=ok subscription={id} observer={name}");
        self.subscriptions.borrow_mut().push(Subscription { id, name, observer });
        Ok(id)
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<bool, SelectionError> {
        let _guard = self.begin(Operation::Unsubscribe)?;
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|subscription| subscription.id != id);
        Ok(subscriptions.len() != before)
    }

    pub fn toggle(&self, id: &SchoolId, now: Instant) -> Result<Transition, SelectionError> {
        self.transition(Operation::Toggle, |state| state.toggled(id), now)
    }

    /// Always notifies, even when nothing was selected.
    pub fn clear(&self, now: Instant) -> Result<Transition, SelectionError> {
        self.transition(Operation::Clear, |_| SelectionState::Unselected, now)
    }

    fn begin(&self, operation: Operation) -> Result<TransitionGuard<'_>, SelectionError> {
        if self.in_transition.get() {
            log::error!(
                "event=reentrant_transition module=selection status=rejected operation={operation}"
            );
            if self.policy == ReentrancyPolicy::Panic {
                panic!("re-entrant selection {operation} during notification fan-out");
            }
            return Err(SelectionError::ReentrantTransition { operation });
        }
        self.in_transition.set(true);
        Ok(TransitionGuard { flag: &self.in_transition })
    }

    fn transition(
        &self,
        operation: Operation,
        next: impl FnOnce(&SelectionState) -> SelectionState,
        now: Instant,
    ) -> Result<Transition, SelectionError> {
        let _guard = self.begin(operation)?;

        let previous = self.state.borrow().clone();
        let state = next(&previous);
        *self.state.borrow_mut() = state.clone();
        let revision = self.revision.get() + 1;
        self.revision.set(revision);

        let notification = Notification::new(state.clone(), revision, now);
        let targets = self
            .subscriptions
            .borrow()
            .iter()
            .map(|subscription| {
                (subscription.id, subscription.name.clone(), Rc::clone(&subscription.observer))
            })
            .collect::<Vec<_>>();

        let mut notified = 0;
        let mut failures = Vec::new();
        for (subscription, name, observer) in targets {
            let result = match observer.try_borrow_mut() {
                Ok(mut observer) => observer.on_selection_change(&notification),
                Err(_) => Err(ObserverError::Busy),
            };
            match result {
                Ok(()) => notified += 1,
                Err(error) => {
                    log::warn!(
                        "event=observer_failed module=selection status=continue rev={revision} subscription={subscription} observer={name} error={error}"
                    );
                    failures.push(ObserverFailure { subscription, observer: name, error });
                }
            }
        }

        log::debug!(
            "event=selection_transition module=selection status=ok operation={operation} rev={revision} selected={} notified={notified} failed={}",
            state.selected().map_or("-", SchoolId::as_str),
            failures.len()
        );
        Ok(Transition { previous, state, revision, notified, failures })
    }
}
