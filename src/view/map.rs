// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::f64::consts::PI;

use super::highlight::{StylePolicy, ViewPolicy};
use super::scene::{Viewport, ViewScene};
use super::tween::ElementStyle;
use super::{conference_color, Point, ViewGeometry, ViewKind};
use crate::model::GeoCoord;
use crate::store::EntityStore;

/// Maps a geographic coordinate into view pixels; `None` when the point is clipped away.
pub trait Projection {
    fn project(&self, coord: GeoCoord) -> Option<Point>;
}

/// Albers equal-area conic tuned for the contiguous United States.
///
/// Standard parallels 29.5°N and 45.5°N, rotated 96°W, centered on 38.7°N. Points outside the
/// lower-48 frame (Alaska, Hawaii, anything abroad) are clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbersUsa {
    scale: f64,
    translate: Point,
    n: f64,
    c: f64,
    r0: f64,
    center: (f64, f64),
}

impl AlbersUsa {
    const PARALLELS: (f64, f64) = (29.5, 45.5);
    const ROTATE_LON: f64 = 96.0;
    const CENTER: (f64, f64) = (-0.6, 38.7);
    const CLIP_X: f64 = 0.455;
    const CLIP_Y: f64 = 0.238;

    pub fn new(scale: f64, translate: Point) -> Self {
        let phi0 = Self::PARALLELS.0.to_radians();
        let phi1 = Self::PARALLELS.1.to_radians();
        let sy0 = phi0.sin();
        let n = (sy0 + phi1.sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;
        let mut projection = Self { scale, translate, n, c, r0, center: (0.0, 0.0) };
        projection.center =
            projection.raw(Self::CENTER.0.to_radians(), Self::CENTER.1.to_radians());
        projection
    }

    /// Scale 1000 centered in the viewport, as the dashboard map uses.
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self::new(1000.0, Point::new(viewport.width / 2.0, viewport.height / 2.0))
    }

    fn raw(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let r = (self.c - 2.0 * self.n * phi.sin()).sqrt() / self.n;
        let x = lambda * self.n;
        (r * x.sin(), self.r0 - r * x.cos())
    }
}

impl Projection for AlbersUsa {
    fn project(&self, coord: GeoCoord) -> Option<Point> {
        let mut lambda = (coord.lon() + Self::ROTATE_LON).to_radians();
        if lambda > PI {
            lambda -= 2.0 * PI;
        } else if lambda < -PI {
            lambda += 2.0 * PI;
        }
        let (x, y) = self.raw(lambda, coord.lat().to_radians());
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let point = Point::new(
            self.translate.x + self.scale * (x - self.center.0),
            self.translate.y - self.scale * (y - self.center.1),
        );
        let half_w = Self::CLIP_X * self.scale;
        let half_h = Self::CLIP_Y * self.scale;
        let inside = (point.x - self.translate.x).abs() <= half_w
            && (point.y - self.translate.y).abs() <= half_h;
        inside.then_some(point)
    }
}

/// Plate carrée over a lon/lat bounding box stretched onto the viewport.
///
/// The terminal map draws coastlines in plain lon/lat, so marks projected with this stay aligned
/// with it; [`Equirectangular::invert`] goes back the other way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equirectangular {
    lon: (f64, f64),
    lat: (f64, f64),
    viewport: Viewport,
}

impl Equirectangular {
    pub fn new(lon: (f64, f64), lat: (f64, f64), viewport: Viewport) -> Self {
        Self { lon, lat, viewport }
    }

    pub fn contiguous_us(viewport: Viewport) -> Self {
        Self::new((-125.0, -66.0), (24.0, 50.0), viewport)
    }

    pub fn lon_bounds(&self) -> (f64, f64) {
        self.lon
    }

    pub fn lat_bounds(&self) -> (f64, f64) {
        self.lat
    }

    /// Longitude/latitude for a view position (no clipping).
    pub fn invert(&self, point: Point) -> (f64, f64) {
        let lon = self.lon.0 + point.x / self.viewport.width * (self.lon.1 - self.lon.0);
        let lat = self.lat.1 - point.y / self.viewport.height * (self.lat.1 - self.lat.0);
        (lon, lat)
    }
}

impl Projection for Equirectangular {
    fn project(&self, coord: GeoCoord) -> Option<Point> {
        let (lon, lat) = (coord.lon(), coord.lat());
        if lon < self.lon.0 || lon > self.lon.1 || lat < self.lat.0 || lat > self.lat.1 {
            return None;
        }
        Some(Point::new(
            (lon - self.lon.0) / (self.lon.1 - self.lon.0) * self.viewport.width,
            (self.lat.1 - lat) / (self.lat.1 - self.lat.0) * self.viewport.height,
        ))
    }
}

pub(crate) fn map_policy(geometry: &ViewGeometry) -> ViewPolicy {
    let icon = ElementStyle::new(geometry.icon_size / 2.0);
    let label = ElementStyle::new(0.0).with_opacity(0.0);
    ViewPolicy {
        mark: StylePolicy {
            base: icon,
            highlighted: icon.with_scale(2.0),
            dimmed: icon.with_opacity(geometry.dimmed_opacity),
        },
        label: StylePolicy { base: label, highlighted: label.with_opacity(1.0), dimmed: label },
        transition: geometry.transition,
    }
}

/// One stadium icon per school with a usable coordinate, plus a name label that only shows
/// while its school is highlighted.
pub fn build_map_scene(
    store: &EntityStore,
    projection: &dyn Projection,
    geometry: &ViewGeometry,
) -> ViewScene {
    let viewport = Viewport { width: geometry.width, height: geometry.map_height };
    let mut scene = ViewScene::new(ViewKind::Map, viewport, map_policy(geometry));

    let mut placed = Vec::new();
    for entity in store.iter() {
        match entity.coord().and_then(|coord| projection.project(coord)) {
            Some(position) => placed.push((entity, position)),
            None => scene.omit(entity.school().clone()),
        }
    }

    for (entity, position) in &placed {
        scene.push_mark(entity.school().clone(), *position, conference_color(entity.conference()));
    }
    for (entity, position) in &placed {
        let above = Point::new(position.x, position.y - geometry.icon_size);
        scene.push_label(
            entity.school().clone(),
            above,
            conference_color(entity.conference()),
            entity.school().to_string(),
        );
    }

    log::debug!(
        "event=view_build module=view status=ok view=map marks={} omitted={}",
        placed.len(),
        scene.omitted().len()
    );
    scene
}
