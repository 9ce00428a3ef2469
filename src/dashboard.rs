// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The assembled dashboard.
//!
//! Owns the store, one selection coordinator, every view scene and the detail panel. Pointer
//! interaction arrives as view-space points and is forwarded to the coordinator as toggles.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use serde::Serialize;

use crate::model::{Metric, SchoolId};
use crate::search::{search_schools, SearchHit, SearchMode};
use crate::selection::{
    ReentrancyPolicy, SelectionCoordinator, SelectionError, SelectionState, SubscriptionId,
    Transition,
};
use crate::store::EntityStore;
use crate::view::{
    build_distribution_scene, build_map_scene, build_scatter_scene, AlbersUsa, DetailPanel,
    DetailView, Equirectangular, Point, Projection, SceneSnapshot, ViewError, ViewGeometry,
    ViewKind, ViewScene, Viewport,
};

/// Projection the map view is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapProjection {
    #[default]
    AlbersUsa,
    Equirectangular,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardConfig {
    pub geometry: ViewGeometry,
    pub projection: MapProjection,
    pub reentrancy: ReentrancyPolicy,
}

impl DashboardConfig {
    pub fn map_viewport(&self) -> Viewport {
        Viewport { width: self.geometry.width, height: self.geometry.map_height }
    }

    fn projection(&self) -> Box<dyn Projection> {
        match self.projection {
            MapProjection::AlbersUsa => Box::new(AlbersUsa::for_viewport(self.map_viewport())),
            MapProjection::Equirectangular => {
                Box::new(Equirectangular::contiguous_us(self.map_viewport()))
            }
        }
    }
}

#[derive(Debug)]
pub enum DashboardError {
    View { source: ViewError },
    Selection { source: SelectionError },
    UnknownSchool { name: String, suggestion: Option<SchoolId> },
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View { source } => write!(f, "{source}"),
            Self::Selection { source } => write!(f, "{source}"),
            Self::UnknownSchool { name, suggestion: Some(suggestion) } => {
                write!(f, "unknown school {name:?} (did you mean {suggestion:?}?)")
            }
            Self::UnknownSchool { name, suggestion: None } => write!(f, "unknown school {name:?}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::View { source } => Some(source),
            Self::Selection { source } => Some(source),
            Self::UnknownSchool { .. } => None,
        }
    }
}

impl From<SelectionError> for DashboardError {
    fn from(source: SelectionError) -> Self {
        Self::Selection { source }
    }
}

impl From<ViewError> for DashboardError {
    fn from(source: ViewError) -> Self {
        Self::View { source }
    }
}

struct ViewSlot {
    kind: ViewKind,
    scene: Rc<RefCell<ViewScene>>,
    subscription: SubscriptionId,
}

pub struct Dashboard {
    store: Rc<EntityStore>,
    coordinator: Rc<SelectionCoordinator>,
    views: Vec<ViewSlot>,
    detail: Rc<RefCell<DetailPanel>>,
    config: DashboardConfig,
    hovered: Option<(ViewKind, SchoolId)>,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("schools", &self.store.len())
            .field("selection", &self.coordinator.state())
            .field("views", &self.views.iter().map(|slot| slot.kind).collect::<Vec<_>>())
            .finish()
    }
}

impl Dashboard {
    /// Builds every view once (the beeswarm layouts run here) and subscribes them, then the
    /// detail panel, to a fresh coordinator.
    pub fn new(store: EntityStore, config: DashboardConfig) -> Result<Self, DashboardError> {
        let store = Rc::new(store);
        let geometry = &config.geometry;
        let coordinator = Rc::new(SelectionCoordinator::with_policy(config.reentrancy));

        let scenes = vec![
            build_map_scene(&store, config.projection().as_ref(), geometry),
            build_distribution_scene(&store, Metric::Tempo, geometry)?,
            build_distribution_scene(&store, Metric::Duration, geometry)?,
            build_scatter_scene(&store, geometry),
        ];

        let mut views = Vec::with_capacity(scenes.len());
        for scene in scenes {
            let kind = scene.kind();
            let scene = Rc::new(RefCell::new(scene));
            let subscription = coordinator.subscribe(scene.clone())?;
            views.push(ViewSlot { kind, scene, subscription });
        }
        let detail = Rc::new(RefCell::new(DetailPanel::new(Rc::clone(&store))));
        coordinator.subscribe(detail.clone())?;

        log::info!(
            "event=dashboard_ready module=dashboard status=ok schools={} views={}",
            store.len(),
            views.len()
        );
        Ok(Self { store, coordinator, views, detail, config, hovered: None })
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn coordinator(&self) -> &Rc<SelectionCoordinator> {
        &self.coordinator
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn selection(&self) -> SelectionState {
        self.coordinator.state()
    }

    pub fn view_kinds(&self) -> impl Iterator<Item = ViewKind> + '_ {
        self.views.iter().map(|slot| slot.kind)
    }

    /// Borrow of one view's scene. Panics only if called from inside a fan-out of this
    /// dashboard, which nothing in the crate does.
    pub fn view(&self, kind: ViewKind) -> Option<Ref<'_, ViewScene>> {
        self.views.iter().find(|slot| slot.kind == kind).map(|slot| slot.scene.borrow())
    }

    pub fn subscription(&self, kind: ViewKind) -> Option<SubscriptionId> {
        self.views.iter().find(|slot| slot.kind == kind).map(|slot| slot.subscription)
    }

    pub fn detail(&self) -> Ref<'_, DetailPanel> {
        self.detail.borrow()
    }

    pub fn toggle(&self, school: &SchoolId, now: Instant) -> Result<Transition, DashboardError> {
        Ok(self.coordinator.toggle(school, now)?)
    }

    pub fn clear(&self, now: Instant) -> Result<Transition, DashboardError> {
        Ok(self.coordinator.clear(now)?)
    }

    /// Toggles the school under `point` in `kind`. Clicking empty space changes nothing.
    pub fn click(
        &self,
        kind: ViewKind,
        point: Point,
        now: Instant,
    ) -> Result<Option<Transition>, DashboardError> {
        let hit = self.view(kind).and_then(|scene| scene.hit_test(point, now).cloned());
        let Some(school) = hit else {
            return Ok(None);
        };
        log::debug!("event=click module=dashboard status=hit view={kind} school={school}");
        Ok(Some(self.toggle(&school, now)?))
    }

    /// Tracks the school under the pointer; returns it for tooltip display.
    pub fn hover(&mut self, kind: ViewKind, point: Point, now: Instant) -> Option<&SchoolId> {
        let hit = self.view(kind).and_then(|scene| scene.hit_test(point, now).cloned());
        self.hovered = hit.map(|school| (kind, school));
        self.hovered.as_ref().map(|(_, school)| school)
    }

    pub fn hovered(&self) -> Option<(ViewKind, &SchoolId)> {
        self.hovered.as_ref().map(|(kind, school)| (*kind, school))
    }

    /// Exact school name first, then a case-insensitive match. Toggles like a click would.
    pub fn select_by_name(&self, name: &str, now: Instant) -> Result<Transition, DashboardError> {
        let school = self.resolve(name)?;
        self.toggle(&school, now)
    }

    pub fn resolve(&self, name: &str) -> Result<SchoolId, DashboardError> {
        if let Some(entity) = self.store.get_by_name(name) {
            return Ok(entity.school().clone());
        }
        let trimmed = name.trim();
        if let Some(entity) =
            self.store.iter().find(|entity| entity.school().as_str().eq_ignore_ascii_case(trimmed))
        {
            return Ok(entity.school().clone());
        }
        let suggestion =
            self.search(name, SearchMode::Fuzzy).first().map(|hit| hit.school().clone());
        Err(DashboardError::UnknownSchool { name: trimmed.to_owned(), suggestion })
    }

    pub fn search(&self, query: &str, mode: SearchMode) -> Vec<SearchHit> {
        search_schools(&self.store, query, mode)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.views.iter().any(|slot| slot.scene.borrow().is_animating(now))
    }

    /// Every view plus the detail panel, styles evaluated at `now`.
    pub fn snapshot_json(&self, now: Instant) -> Result<String, serde_json::Error> {
        let scenes = self.views.iter().map(|slot| slot.scene.borrow()).collect::<Vec<_>>();
        let detail = self.detail.borrow();
        let snapshot = DashboardSnapshot {
            selection: self.coordinator.state(),
            revision: self.coordinator.revision(),
            views: scenes.iter().map(|scene| scene.snapshot(now)).collect(),
            detail: detail.view(),
        };
        serde_json::to_string_pretty(&snapshot)
    }
}

#[derive(Serialize)]
struct DashboardSnapshot<'a> {
    selection: SelectionState,
    revision: u64,
    views: Vec<SceneSnapshot<'a>>,
    detail: &'a DetailView,
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::{Dashboard, DashboardConfig, DashboardError, MapProjection};
    use crate::model::fixtures::{sid, small_store};
    use crate::selection::{ReentrancyPolicy, SelectionState};
    use crate::view::{DetailView, Point, Treatment, ViewKind, TRANSITION};

    fn dashboard() -> Dashboard {
        Dashboard::new(small_store(), DashboardConfig::default()).expect("dashboard")
    }

    fn mark_position(dashboard: &Dashboard, kind: ViewKind, school: &str) -> Point {
        let scene = dashboard.view(kind).expect("view");
        let position = scene.elements().tagged(&sid(school)).next().map(|element| element.position());
        position.expect("mark")
    }

    #[test]
    fn builds_all_views_and_subscribes_detail_last() {
        let dashboard = dashboard();
        assert_eq!(dashboard.view_kinds().collect::<Vec<_>>(), ViewKind::ALL.to_vec());
        assert_eq!(dashboard.coordinator().subscriber_count(), 5);
        assert_eq!(dashboard.selection(), SelectionState::Unselected);
    }

    #[test]
    fn click_on_a_mark_toggles_its_school_everywhere() {
        let dashboard = dashboard();
        let now = Instant::now();
        let target = mark_position(&dashboard, ViewKind::Scatter, "Alabama");

        let transition =
            dashboard.click(ViewKind::Scatter, target, now).expect("click").expect("hit");
        assert_eq!(transition.state(), &SelectionState::Selected(sid("Alabama")));
        for kind in ViewKind::ALL {
            let scene = dashboard.view(kind).expect("view");
            for element in scene.elements().tagged(&sid("Alabama")) {
                assert_eq!(element.treatment(), Treatment::Highlighted, "{kind}");
            }
        }
        assert!(matches!(dashboard.detail().view(), DetailView::School(_)));
        assert!(dashboard.is_animating(now));
        assert!(!dashboard.is_animating(now + TRANSITION));

        let again = dashboard.click(ViewKind::Scatter, target, now).expect("click").expect("hit");
        assert_eq!(again.state(), &SelectionState::Unselected);
        assert_eq!(dashboard.detail().view(), &DetailView::Placeholder);
    }

    #[test]
    fn click_on_empty_space_is_ignored() {
        let dashboard = dashboard();
        let outcome = dashboard
            .click(ViewKind::Map, Point::new(-100.0, -100.0), Instant::now())
            .expect("click");
        assert!(outcome.is_none());
        assert_eq!(dashboard.selection(), SelectionState::Unselected);
    }

    #[test]
    fn hover_tracks_the_school_under_the_pointer() {
        let mut dashboard = dashboard();
        let now = Instant::now();
        let target = mark_position(&dashboard, ViewKind::TempoDistribution, "Notre Dame");
        assert_eq!(
            dashboard.hover(ViewKind::TempoDistribution, target, now).cloned(),
            Some(sid("Notre Dame"))
        );
        assert_eq!(dashboard.hovered().map(|(kind, _)| kind), Some(ViewKind::TempoDistribution));
        dashboard.hover(ViewKind::TempoDistribution, Point::new(0.0, 0.0), now);
        assert!(dashboard.hovered().is_none());
    }

    #[test]
    fn select_by_name_resolves_case_insensitively_and_suggests() {
        let dashboard = dashboard();
        let now = Instant::now();
        let transition = dashboard.select_by_name("notre dame", now).expect("select");
        assert_eq!(transition.state(), &SelectionState::Selected(sid("Notre Dame")));

        let err = dashboard.select_by_name("Alabma", now).expect_err("typo");
        match err {
            DashboardError::UnknownSchool { suggestion, .. } => {
                assert_eq!(suggestion, Some(sid("Alabama")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn snapshot_serializes_views_and_detail() {
        let dashboard = Dashboard::new(
            small_store(),
            DashboardConfig {
                projection: MapProjection::Equirectangular,
                reentrancy: ReentrancyPolicy::Reject,
                ..DashboardConfig::default()
            },
        )
        .expect("dashboard");
        let now = Instant::now();
        dashboard.select_by_name("Georgia Tech", now).expect("select");
        let json = dashboard.snapshot_json(now + TRANSITION).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["selection"]["school"], "Georgia Tech");
        assert_eq!(value["views"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["views"][0]["kind"], "map");
        assert_eq!(value["detail"]["kind"], "school");
        assert_eq!(value["detail"]["tempo"], "172 BPM");
    }
}
