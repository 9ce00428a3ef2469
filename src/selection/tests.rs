// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;

use rstest::rstest;

use super::{
    Notification, ObserverError, Operation, ReentrancyPolicy, SelectionCoordinator,
    SelectionError, SelectionObserver, SelectionState,
};
use crate::model::fixtures::sid;
use crate::model::SchoolId;

#[derive(Default)]
struct Recorder {
    name: String,
    seen: Vec<(u64, SelectionState)>,
    fail: bool,
}

impl Recorder {
    fn named(name: &str) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { name: name.to_owned(), ..Self::default() }))
    }

    fn failing(name: &str) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { name: name.to_owned(), fail: true, ..Self::default() }))
    }

    fn last(&self) -> Option<&SelectionState> {
        self.seen.last().map(|(_, state)| state)
    }
}

impl SelectionObserver for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_selection_change(&mut self, notification: &Notification) -> Result<(), ObserverError> {
        self.seen.push((notification.revision(), notification.state().clone()));
        if self.fail {
            return Err(ObserverError::Failed { reason: "render surface gone".to_owned() });
        }
        Ok(())
    }
}

/// Calls back into the coordinator from inside its own notification.
struct Reentrant {
    coordinator: Weak<SelectionCoordinator>,
    target: SchoolId,
    outcome: Option<Result<(), SelectionError>>,
}

impl SelectionObserver for Reentrant {
    fn name(&self) -> &str {
        "reentrant"
    }

    fn on_selection_change(&mut self, notification: &Notification) -> Result<(), ObserverError> {
        if let Some(coordinator) = self.coordinator.upgrade() {
            self.outcome = Some(coordinator.toggle(&self.target, notification.at()).map(|_| ()));
        }
        Ok(())
    }
}

#[test]
fn starts_unselected() {
    let coordinator = SelectionCoordinator::new();
    assert_eq!(coordinator.state(), SelectionState::Unselected);
    assert_eq!(coordinator.revision(), 0);
}

#[rstest]
#[case(SelectionState::Unselected, "Alabama", SelectionState::Selected(sid("Alabama")))]
#[case(SelectionState::Selected(sid("Alabama")), "Alabama", SelectionState::Unselected)]
#[case(
    SelectionState::Selected(sid("Alabama")),
    "Auburn",
    SelectionState::Selected(sid("Auburn"))
)]
fn toggle_transitions(
    #[case] start: SelectionState,
    #[case] school: &str,
    #[case] expected: SelectionState,
) {
    assert_eq!(start.toggled(&sid(school)), expected);
}

#[test]
fn toggle_twice_restores_unselected_and_notifies_both_times() {
    let coordinator = SelectionCoordinator::new();
    let recorder = Recorder::named("map");
    coordinator.subscribe(recorder.clone()).expect("subscribe");

    let now = Instant::now();
    let first = coordinator.toggle(&sid("Notre Dame"), now).expect("toggle");
    assert_eq!(first.state(), &SelectionState::Selected(sid("Notre Dame")));
    let second = coordinator.toggle(&sid("Notre Dame"), now).expect("toggle");
    assert_eq!(second.previous(), &SelectionState::Selected(sid("Notre Dame")));
    assert_eq!(second.state(), &SelectionState::Unselected);

    let seen = &recorder.borrow().seen;
    assert_eq!(
        seen,
        &vec![(1, SelectionState::Selected(sid("Notre Dame"))), (2, SelectionState::Unselected)]
    );
}

#[test]
fn clear_notifies_even_when_already_unselected() {
    let coordinator = SelectionCoordinator::new();
    let recorder = Recorder::named("detail");
    coordinator.subscribe(recorder.clone()).expect("subscribe");

    let transition = coordinator.clear(Instant::now()).expect("clear");
    assert_eq!(transition.notified(), 1);
    assert_eq!(recorder.borrow().last(), Some(&SelectionState::Unselected));
}

#[test]
fn notifies_in_subscription_order_with_new_state() {
    let coordinator = SelectionCoordinator::new();
    let order = Rc::new(RefCell::new(Vec::<String>::new()));

    struct Ordered {
        name: &'static str,
        order: Rc<RefCell<Vec<String>>>,
    }
    impl SelectionObserver for Ordered {
        fn name(&self) -> &str {
            self.name
        }
        fn on_selection_change(&mut self, n: &Notification) -> Result<(), ObserverError> {
            let selected = n.state().selected().map_or("", SchoolId::as_str);
            self.order.borrow_mut().push(format!("{}:{selected}", self.name));
            Ok(())
        }
    }

    for name in ["map", "beeswarm", "scatter", "detail"] {
        coordinator
            .subscribe(Rc::new(RefCell::new(Ordered { name, order: order.clone() })))
            .expect("subscribe");
    }
    coordinator.toggle(&sid("Alabama"), Instant::now()).expect("toggle");
    assert_eq!(
        *order.borrow(),
        vec!["map:Alabama", "beeswarm:Alabama", "scatter:Alabama", "detail:Alabama"]
    );
}

#[test]
fn failing_observer_is_reported_and_fan_out_continues() {
    let coordinator = SelectionCoordinator::new();
    let before = Recorder::named("map");
    let broken = Recorder::failing("scatter");
    let after = Recorder::named("detail");
    coordinator.subscribe(before.clone()).expect("subscribe");
    let broken_id = coordinator.subscribe(broken.clone()).expect("subscribe");
    coordinator.subscribe(after.clone()).expect("subscribe");

    let transition = coordinator.toggle(&sid("Auburn"), Instant::now()).expect("toggle");

    assert_eq!(transition.notified(), 2);
    assert_eq!(transition.failures().len(), 1);
    assert_eq!(transition.failures()[0].subscription(), broken_id);
    assert_eq!(transition.failures()[0].observer(), "scatter");
    assert_eq!(coordinator.state(), SelectionState::Selected(sid("Auburn")));
    assert_eq!(after.borrow().last(), Some(&SelectionState::Selected(sid("Auburn"))));
    assert_eq!(before.borrow().last(), Some(&SelectionState::Selected(sid("Auburn"))));
}

#[test]
fn busy_observer_is_reported_not_skipped_silently() {
    let coordinator = SelectionCoordinator::new();
    let recorder = Recorder::named("map");
    coordinator.subscribe(recorder.clone()).expect("subscribe");

    let _held = recorder.borrow_mut();
    let transition = coordinator.toggle(&sid("Auburn"), Instant::now()).expect("toggle");
    assert_eq!(transition.failures()[0].error(), &ObserverError::Busy);
}

#[test]
fn reentrant_toggle_is_rejected_and_state_untouched() {
    let coordinator = Rc::new(SelectionCoordinator::with_policy(ReentrancyPolicy::Reject));
    let reentrant = Rc::new(RefCell::new(Reentrant {
        coordinator: Rc::downgrade(&coordinator),
        target: sid("Georgia"),
        outcome: None,
    }));
    let later = Recorder::named("detail");
    coordinator.subscribe(reentrant.clone()).expect("subscribe");
    coordinator.subscribe(later.clone()).expect("subscribe");

    let transition = coordinator.toggle(&sid("Alabama"), Instant::now()).expect("toggle");

    assert_eq!(
        reentrant.borrow().outcome,
        Some(Err(SelectionError::ReentrantTransition { operation: Operation::Toggle }))
    );
    assert_eq!(coordinator.state(), SelectionState::Selected(sid("Alabama")));
    assert_eq!(coordinator.revision(), 1);
    assert!(transition.is_clean());
    assert_eq!(later.borrow().last(), Some(&SelectionState::Selected(sid("Alabama"))));

    // The guard is released once fan-out returns.
    coordinator.clear(Instant::now()).expect("clear after fan-out");
}

#[test]
#[should_panic(expected = "re-entrant selection toggle")]
fn reentrant_toggle_panics_under_panic_policy() {
    let coordinator = Rc::new(SelectionCoordinator::with_policy(ReentrancyPolicy::Panic));
    let reentrant = Rc::new(RefCell::new(Reentrant {
        coordinator: Rc::downgrade(&coordinator),
        target: sid("Georgia"),
        outcome: None,
    }));
    coordinator.subscribe(reentrant).expect("subscribe");
    let _ = coordinator.toggle(&sid("Alabama"), Instant::now());
}

#[test]
fn unsubscribed_observer_is_not_notified() {
    let coordinator = SelectionCoordinator::new();
    let recorder = Recorder::named("map");
    let id = coordinator.subscribe(recorder.clone()).expect("subscribe");
    assert!(coordinator.unsubscribe(id).expect("unsubscribe"));
    assert!(!coordinator.unsubscribe(id).expect("unsubscribe twice"));

    coordinator.toggle(&sid("Alabama"), Instant::now()).expect("toggle");
    assert!(recorder.borrow().seen.is_empty());
    assert_eq!(coordinator.subscriber_count(), 0);
}

#[test]
fn coordinators_are_independent() {
    let left = SelectionCoordinator::new();
    let right = SelectionCoordinator::new();
    left.toggle(&sid("Alabama"), Instant::now()).expect("toggle");
    assert_eq!(right.state(), SelectionState::Unselected);
}

#[test]
fn subscription_order_does_not_change_final_observer_state() {
    let run = |reverse: bool| {
        let coordinator = SelectionCoordinator::new();
        let mut recorders = vec![Recorder::named("a"), Recorder::named("b"), Recorder::named("c")];
        if reverse {
            recorders.reverse();
        }
        for recorder in &recorders {
            coordinator.subscribe(recorder.clone()).expect("subscribe");
        }
        let now = Instant::now();
        coordinator.toggle(&sid("Alabama"), now).expect("toggle");
        coordinator.toggle(&sid("Auburn"), now).expect("toggle");
        let mut finals = recorders
            .iter()
            .map(|recorder| {
                let recorder = recorder.borrow();
                (recorder.name.clone(), recorder.last().cloned())
            })
            .collect::<Vec<_>>();
        finals.sort_by(|a, b| a.0.cmp(&b.0));
        finals
    };
    assert_eq!(run(false), run(true));
}

#[test]
fn selection_state_serializes_with_kind_tag() {
    let json = serde_json::to_string(&SelectionState::Selected(sid("LSU"))).expect("json");
    assert_eq!(json, r#"{"kind":"selected","school":"LSU"}"#);
    let json = serde_json::to_string(&SelectionState::Unselected).expect("json");
    assert_eq!(json, r#"{"kind":"unselected"}"#);
}
