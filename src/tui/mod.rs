// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Draws every view of a [`Dashboard`] on braille canvases (ratatui + crossterm) next to the
//! detail panel and a searchable school list. Keys and mouse clicks become selection toggles.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Map, MapResolution, Points},
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
};
use smallvec::SmallVec;

use crate::dashboard::{Dashboard, MapProjection};
use crate::model::{Entity, Metric, SchoolId};
use crate::search::SearchMode;
use crate::selection::Transition;
use crate::view::{
    conference_color,
    detail::{NO_TRACK, PLACEHOLDER},
    DetailRecord, ElementRole, Equirectangular, Point, Treatment, ViewKind, ViewScene, Viewport,
};

mod theme;

use theme::TuiTheme;

const IDLE_POLL: Duration = Duration::from_millis(250);
const ANIMATION_POLL: Duration = Duration::from_millis(16);
const TICK_LABEL_WIDTH: u16 = 6;

include!("chrome.rs");

/// Runs the interactive terminal UI until the user quits.
pub fn run(dashboard: Dashboard) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(dashboard, theme);
    log::info!(
        "event=tui_start module=tui status=ok schools={} projection={:?}",
        app.dashboard.store().len(),
        app.dashboard.config().projection
    );

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        let timeout =
            if app.dashboard.is_animating(Instant::now()) { ANIMATION_POLL } else { IDLE_POLL };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    log::info!(
        "event=tui_stop module=tui status=ok revision={}",
        app.dashboard.coordinator().revision()
    );
    Ok(())
}

struct App {
    dashboard: Dashboard,
    theme: TuiTheme,
    /// Lon/lat frame of the map canvas; `None` when marks were projected with Albers.
    map_frame: Option<Equirectangular>,
    focus: Focus,
    listed: Vec<SchoolId>,
    list_cursor: usize,
    view_cursor: Option<SchoolId>,
    searching: bool,
    query: String,
    view_areas: SmallVec<[(ViewKind, Rect); 4]>,
    toast: Option<String>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    fn new(dashboard: Dashboard, theme: TuiTheme) -> Self {
        let config = dashboard.config();
        let map_frame = match config.projection {
            MapProjection::Equirectangular => {
                Some(Equirectangular::contiguous_us(config.map_viewport()))
            }
            MapProjection::AlbersUsa => None,
        };
        let listed = all_schools(&dashboard);
        Self {
            dashboard,
            theme,
            map_frame,
            focus: Focus::Schools,
            listed,
            list_cursor: 0,
            view_cursor: None,
            searching: false,
            query: String::new(),
            view_areas: SmallVec::new(),
            toast: None,
            show_help: false,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the key asks to quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        self.toast = None;
        if self.searching {
            self.handle_search_key(code);
            return false;
        }
        if self.show_help {
            self.show_help = false;
            return code == KeyCode::Char('q');
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('/') => self.start_search(),
            KeyCode::Esc | KeyCode::Char('c') => self.clear_selection(),
            KeyCode::Tab => self.set_focus(self.focus.cycle()),
            KeyCode::BackTab => self.set_focus(self.focus.cycle_back()),
            KeyCode::Char('0') => self.set_focus(Focus::Schools),
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => self.step(-1),
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
                self.step(1)
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_at_cursor(),
            KeyCode::Char(key) => {
                if let Some(kind) = view_for_key(key) {
                    self.set_focus(Focus::View(kind));
                }
            }
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.end_search(),
            KeyCode::Enter => {
                let picked = self.listed.get(self.list_cursor).cloned();
                self.end_search();
                if let Some(school) = picked {
                    self.reveal(&school);
                    self.toggle(&school);
                }
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
            }
            KeyCode::Up => self.move_list_cursor(-1),
            KeyCode::Down => self.move_list_cursor(1),
            KeyCode::Char(ch) => {
                self.query.push(ch);
                self.refilter();
            }
            _ => {}
        }
    }

    fn start_search(&mut self) {
        self.searching = true;
        self.focus = Focus::Schools;
        self.query.clear();
        self.refilter();
    }

    fn end_search(&mut self) {
        self.searching = false;
        self.query.clear();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.listed = if self.query.trim().is_empty() {
            all_schools(&self.dashboard)
        } else {
            self.dashboard
                .search(&self.query, SearchMode::Fuzzy)
                .into_iter()
                .map(|hit| hit.school().clone())
                .collect()
        };
        self.list_cursor = 0;
    }

    fn reveal(&mut self, school: &SchoolId) {
        if let Some(idx) = self.listed.iter().position(|listed| listed == school) {
            self.list_cursor = idx;
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        let Some(kind) = focus.view() else {
            return;
        };
        let marks = self.marks_by_x(kind);
        let cursor_visible = self
            .view_cursor
            .as_ref()
            .is_some_and(|cursor| marks.iter().any(|(school, _)| school == cursor));
        if !cursor_visible {
            let selected = self.dashboard.selection().selected().cloned();
            self.view_cursor =
                selected.filter(|selected| marks.iter().any(|(school, _)| school == selected));
        }
    }

    fn step(&mut self, delta: isize) {
        match self.focus {
            Focus::Schools => self.move_list_cursor(delta),
            Focus::View(kind) => self.step_view_cursor(kind, delta),
        }
    }

    fn move_list_cursor(&mut self, delta: isize) {
        if self.listed.is_empty() {
            return;
        }
        let last = self.listed.len() as isize - 1;
        self.list_cursor = (self.list_cursor as isize + delta).clamp(0, last) as usize;
    }

    fn step_view_cursor(&mut self, kind: ViewKind, delta: isize) {
        let marks = self.marks_by_x(kind);
        if marks.is_empty() {
            return;
        }
        let last = marks.len() as isize - 1;
        let current =
            self.view_cursor.as_ref().and_then(|cursor| marks.iter().position(|(s, _)| s == cursor));
        let next = match current {
            Some(idx) => (idx as isize + delta).clamp(0, last) as usize,
            None if delta < 0 => last as usize,
            None => 0,
        };
        let (school, position) = marks[next].clone();
        self.dashboard.hover(kind, position, Instant::now());
        self.view_cursor = Some(school);
    }

    /// Marks of `kind`, left to right.
    fn marks_by_x(&self, kind: ViewKind) -> Vec<(SchoolId, Point)> {
        let Some(scene) = self.dashboard.view(kind) else {
            return Vec::new();
        };
        let mut marks = scene
            .elements()
            .iter()
            .filter(|element| element.role() == ElementRole::Mark)
            .map(|element| (element.id().clone(), element.position()))
            .collect::<Vec<_>>();
        marks.sort_by(|a, b| a.1.x.total_cmp(&b.1.x).then(a.1.y.total_cmp(&b.1.y)));
        marks
    }

    fn toggle_at_cursor(&mut self) {
        let target = match self.focus {
            Focus::Schools => self.listed.get(self.list_cursor).cloned(),
            Focus::View(_) => self.view_cursor.clone(),
        };
        if let Some(school) = target {
            self.toggle(&school);
        }
    }

    fn toggle(&mut self, school: &SchoolId) {
        let result = self.dashboard.toggle(school, Instant::now());
        self.report(result);
    }

    fn clear_selection(&mut self) {
        let result = self.dashboard.clear(Instant::now());
        self.report(result);
    }

    fn report<E: std::fmt::Display>(&mut self, result: Result<Transition, E>) {
        match result {
            Ok(transition) if transition.is_clean() => {}
            Ok(transition) => {
                let failed = transition
                    .failures()
                    .iter()
                    .map(|failure| failure.observer())
                    .collect::<Vec<_>>()
                    .join(", ");
                log::warn!(
                    "event=selection_partial module=tui status=degraded revision={} failed={failed}",
                    transition.revision()
                );
                self.toast = Some(format!("Some views failed to update: {failed}"));
            }
            Err(err) => {
                log::warn!("event=selection_failed module=tui status=error error={err}");
                self.toast = Some(err.to_string());
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let now = Instant::now();
        let Some((kind, point, span)) = self.locate(mouse.column, mouse.row) else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.focus = Focus::View(kind);
                let Some((school, position)) = self.pick(kind, point, span, now) else {
                    return;
                };
                self.view_cursor = Some(school.clone());
                self.reveal(&school);
                match self.dashboard.click(kind, position, now) {
                    Ok(Some(transition)) => self.report::<String>(Ok(transition)),
                    Ok(None) => {}
                    Err(err) => self.report::<String>(Err(err.to_string())),
                }
            }
            MouseEventKind::Moved => {
                let target = self.pick(kind, point, span, now).map_or(point, |(_, at)| at);
                self.dashboard.hover(kind, target, now);
            }
            _ => {}
        }
    }

    /// View, view-space point and cell span under a terminal cell.
    fn locate(&self, column: u16, row: u16) -> Option<(ViewKind, Point, CellSpan)> {
        self.view_areas.iter().find_map(|(kind, inner)| {
            let viewport = self.dashboard.view(*kind).map(|scene| scene.viewport())?;
            let point = cell_to_view_point(*inner, viewport, column, row)?;
            Some((*kind, point, CellSpan::of(*inner, viewport)))
        })
    }

    /// Exact hit first, otherwise the nearest mark within one cell on each axis.
    fn pick(
        &self,
        kind: ViewKind,
        point: Point,
        span: CellSpan,
        now: Instant,
    ) -> Option<(SchoolId, Point)> {
        let scene = self.dashboard.view(kind)?;
        let elements = scene.elements();
        let picked = elements
            .hit_test(point, now)
            .or_else(|| {
                elements
                    .painted()
                    .filter(|element| element.role() == ElementRole::Mark)
                    .filter(|element| span.reaches(point, element.position()))
                    .map(|element| (element, element.position().distance(point)))
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(element, _)| element)
            })
            .map(|element| (element.id().clone(), element.position()));
        picked
    }

    fn view_tail(&self, scene: &ViewScene) -> Option<String> {
        let kind = scene.kind();
        let mut parts = Vec::new();
        if let Some(axis) = scene.x_axis() {
            parts.push(format!("({})", axis.label()));
        }
        let pointed = self
            .dashboard
            .hovered()
            .filter(|(hovered_kind, _)| *hovered_kind == kind)
            .map(|(_, school)| school.clone())
            .or_else(|| {
                if self.focus == Focus::View(kind) {
                    self.view_cursor.clone()
                } else {
                    None
                }
            });
        if let Some(school) = pointed {
            parts.push(format!("▸ {school}"));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

fn all_schools(dashboard: &Dashboard) -> Vec<SchoolId> {
    dashboard.store().iter().map(|entity| entity.school().clone()).collect()
}

/// One mark as drawn on a canvas, already in canvas coordinates.
struct MarkGlyph {
    x: f64,
    y: f64,
    radius: f64,
    color: Color,
    highlighted: bool,
}

struct TextGlyph {
    x: f64,
    y: f64,
    text: String,
    style: Style,
}

/// Maps view-space points onto the canvas coordinate system.
#[derive(Clone, Copy)]
enum CanvasFrame {
    View(Viewport),
    LonLat(Equirectangular, Viewport),
}

impl CanvasFrame {
    fn x_bounds(self) -> [f64; 2] {
        match self {
            Self::View(viewport) => [0.0, viewport.width],
            Self::LonLat(frame, _) => [frame.lon_bounds().0, frame.lon_bounds().1],
        }
    }

    fn y_bounds(self) -> [f64; 2] {
        match self {
            Self::View(viewport) => [0.0, viewport.height],
            Self::LonLat(frame, _) => [frame.lat_bounds().0, frame.lat_bounds().1],
        }
    }

    /// Canvas y grows upwards, view y grows downwards.
    fn point(self, point: Point) -> (f64, f64) {
        match self {
            Self::View(viewport) => (point.x, viewport.height - point.y),
            Self::LonLat(frame, _) => frame.invert(point),
        }
    }

    fn length(self, length: f64) -> f64 {
        match self {
            Self::View(_) => length,
            Self::LonLat(frame, viewport) => {
                let (west, east) = frame.lon_bounds();
                length * (east - west) / viewport.width
            }
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let now = Instant::now();
    let area = frame.size();
    let areas = DashboardAreas::split(area);

    app.view_areas.clear();
    for kind in app.dashboard.view_kinds().collect::<Vec<_>>() {
        if let Some(inner) = draw_view(frame, app, kind, areas.view(kind), now) {
            app.view_areas.push((kind, inner));
        }
    }
    draw_detail(frame, app, areas.detail);
    draw_schools(frame, app, areas.schools);
    draw_footer(frame, app, areas.footer);

    if app.show_help {
        let popup = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup);
        let help = Paragraph::new(help_lines())
            .style(app.theme.base_style())
            .block(Block::default().borders(Borders::ALL).title(" Help "));
        frame.render_widget(help, popup);
    }
}

/// Draws one view and returns the inner area the marks occupy.
fn draw_view(
    frame: &mut Frame<'_>,
    app: &App,
    kind: ViewKind,
    area: Rect,
    now: Instant,
) -> Option<Rect> {
    let scene = app.dashboard.view(kind)?;
    let focused = app.focus == Focus::View(kind);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(focused))
        .title(view_title(kind.title(), view_key(kind), app.view_tail(&scene).as_deref()));
    let inner = block.inner(area);

    let canvas_frame = match (kind, app.map_frame) {
        (ViewKind::Map, Some(map_frame)) => CanvasFrame::LonLat(map_frame, scene.viewport()),
        _ => CanvasFrame::View(scene.viewport()),
    };

    let mut marks = Vec::new();
    let mut texts = axis_tick_glyphs(&scene, canvas_frame, inner, &app.theme);
    for element in scene.elements().painted() {
        let style = element.style_at(now);
        let (x, y) = canvas_frame.point(element.position());
        match element.role() {
            ElementRole::Mark => marks.push(MarkGlyph {
                x,
                y,
                radius: canvas_frame.length(style.extent()),
                color: app.theme.mark_color(element.fill(), &style),
                highlighted: element.treatment() == Treatment::Highlighted,
            }),
            ElementRole::Label if style.opacity >= 0.5 => {
                if let Some(text) = element.text() {
                    texts.push(TextGlyph {
                        x,
                        y,
                        text: text.to_owned(),
                        style: app.theme.label_style(element.fill(), element.treatment()),
                    });
                }
            }
            ElementRole::Label => {}
        }
    }
    drop(scene);

    let coastline = match canvas_frame {
        CanvasFrame::LonLat(..) => Some(app.theme.coastline_color()),
        CanvasFrame::View(_) => None,
    };
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(canvas_frame.x_bounds())
        .y_bounds(canvas_frame.y_bounds())
        .paint(|ctx| {
            if let Some(color) = coastline {
                ctx.draw(&Map { resolution: MapResolution::High, color });
                ctx.layer();
            }
            for mark in marks.iter().filter(|mark| !mark.highlighted) {
                ctx.draw(&Points { coords: &[(mark.x, mark.y)], color: mark.color });
            }
            ctx.layer();
            for mark in marks.iter().filter(|mark| mark.highlighted) {
                ctx.draw(&Circle { x: mark.x, y: mark.y, radius: mark.radius, color: mark.color });
                ctx.draw(&Points { coords: &[(mark.x, mark.y)], color: mark.color });
            }
            for text in &texts {
                ctx.print(text.x, text.y, Line::styled(text.text.clone(), text.style));
            }
        });
    frame.render_widget(canvas, area);
    Some(inner)
}

/// Tick labels along the bottom (x axis) and left edge (y axis), thinned to fit.
fn axis_tick_glyphs(
    scene: &ViewScene,
    canvas_frame: CanvasFrame,
    inner: Rect,
    theme: &TuiTheme,
) -> Vec<TextGlyph> {
    let mut glyphs = Vec::new();
    let [left, _] = canvas_frame.x_bounds();
    let [bottom, _] = canvas_frame.y_bounds();
    if let Some(axis) = scene.x_axis() {
        let room = usize::from((inner.width / TICK_LABEL_WIDTH).max(1));
        let step = ((axis.ticks().len() + room - 1) / room).max(1);
        for tick in axis.ticks().iter().step_by(step) {
            let (x, _) = canvas_frame.point(Point::new(axis.scale().apply(*tick), 0.0));
            glyphs.push(TextGlyph { x, y: bottom, text: format_tick(*tick), style: theme.muted_style() });
        }
    }
    if let Some(axis) = scene.y_axis() {
        let room = usize::from((inner.height / 2).max(1));
        let step = ((axis.ticks().len() + room - 1) / room).max(1);
        for tick in axis.ticks().iter().step_by(step) {
            let (_, y) = canvas_frame.point(Point::new(0.0, axis.scale().apply(*tick)));
            glyphs.push(TextGlyph { x: left, y, text: format_tick(*tick), style: theme.muted_style() });
        }
    }
    glyphs
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn draw_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let detail = app.dashboard.detail();
    let block = Block::default().borders(Borders::ALL).title(" Details ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(record) = detail.record() else {
        let placeholder = Paragraph::new(PLACEHOLDER)
            .style(app.theme.muted_style())
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, inner);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);
    let facts = Paragraph::new(detail_lines(record, &app.theme)).wrap(Wrap { trim: true });
    frame.render_widget(facts, columns[0]);
    draw_radar(frame, record, &app.theme, columns[1]);
}

fn detail_lines(record: &DetailRecord, theme: &TuiTheme) -> Vec<Line<'static>> {
    let fights =
        record.number_fights().map_or_else(|| "Unknown".to_owned(), |count| count.to_string());
    let spotify = record.spotify_url().unwrap_or(NO_TRACK).to_owned();
    let mut lines = vec![Line::styled(
        record.school().as_str().to_owned(),
        theme.label_style(record.conference_color(), Treatment::Highlighted),
    )];
    let fields = [
        ("State", record.state().to_owned()),
        ("Conference", record.conference().to_owned()),
        ("Song", record.song_name().to_owned()),
        ("Writers", record.writers().to_owned()),
        ("Year", record.year().to_owned()),
        ("Tempo", record.tempo().to_owned()),
        ("Length", record.length().to_owned()),
        ("Student writer", record.student_writer().to_owned()),
        ("Fights", fights),
        ("Spotify", spotify),
    ];
    lines.extend(fields.into_iter().map(|(label, value)| {
        Line::from(vec![Span::styled(format!("{label}: "), theme.muted_style()), Span::raw(value)])
    }));
    lines
}

fn draw_radar(frame: &mut Frame<'_>, record: &DetailRecord, theme: &TuiTheme, area: Rect) {
    let color = theme.fill_color(record.conference_color());
    let muted = theme.coastline_color();
    let axes = record.radar().axes();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.5, 1.5])
        .y_bounds([-1.5, 1.5])
        .paint(|ctx| {
            for axis in axes {
                let (rim_x, rim_y) = axis.rim();
                ctx.draw(&CanvasLine { x1: 0.0, y1: 0.0, x2: rim_x, y2: -rim_y, color: muted });
                ctx.print(rim_x * 1.2, -rim_y * 1.2, Line::styled(axis.label(), theme.muted_style()));
            }
            ctx.layer();
            for (from, to) in axes.iter().zip(axes.iter().cycle().skip(1)) {
                let (x1, y1) = from.point();
                let (x2, y2) = to.point();
                ctx.draw(&CanvasLine { x1, y1: -y1, x2, y2: -y2, color });
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_schools(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let selection = app.dashboard.selection();
    let store = app.dashboard.store();
    let items = app
        .listed
        .iter()
        .map(|school| {
            let swatch = store
                .get(school)
                .map(|entity| app.theme.fill_color(conference_color(entity.conference())))
                .unwrap_or(Color::Reset);
            let name_style = if selection.is_selected(school) {
                app.theme.selected_style()
            } else {
                app.theme.base_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(swatch)),
                Span::styled(school.as_str().to_owned(), name_style),
            ]))
        })
        .collect::<Vec<_>>();

    let title = if app.searching {
        format!(" Search: {}▏", app.query)
    } else {
        format!(" Schools ({}) ", app.listed.len())
    };
    let focused = app.focus == Focus::Schools;
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.panel_border_style(focused))
                .title(title),
        )
        .highlight_style(app.theme.cursor_style());
    let mut state = ListState::default();
    if focused && !app.listed.is_empty() {
        state.select(Some(app.list_cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut spans = match &app.toast {
        Some(toast) => vec![Span::styled(toast.clone(), app.theme.error_style())],
        None => footer_hints(&app.theme, app.searching),
    };
    if let Some((kind, entity)) = app
        .dashboard
        .hovered()
        .and_then(|(kind, school)| Some((kind, app.dashboard.store().get(school)?)))
    {
        let readout = hover_readout(kind, entity);
        spans.push(Span::styled(format!("│ {kind}: {readout}"), app.theme.selected_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{draw, App, Focus, TuiTheme};
    use crate::dashboard::Dashboard;
    use crate::model::SchoolId;
    use crate::view::ViewKind;
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::{backend::TestBackend, layout::Rect, Terminal};

    pub(crate) struct HeadlessTui {
        app: App,
        terminal: Terminal<TestBackend>,
    }

    impl HeadlessTui {
        pub(crate) fn new(dashboard: Dashboard, width: u16, height: u16) -> Self {
            let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
            Self { app: App::new(dashboard, TuiTheme::default()), terminal }
        }

        pub(crate) fn press(&mut self, code: KeyCode) -> bool {
            self.app.handle_key_code(code)
        }

        pub(crate) fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.app.handle_key_code(KeyCode::Char(ch));
            }
        }

        /// Draws one frame and returns the screen as text rows.
        pub(crate) fn render(&mut self) -> String {
            let app = &mut self.app;
            self.terminal.draw(|frame| draw(frame, app)).expect("draw");
            let buffer = self.terminal.backend().buffer();
            (0..buffer.area.height)
                .map(|y| {
                    (0..buffer.area.width).map(|x| buffer.get(x, y).symbol()).collect::<String>()
                })
                .collect::<Vec<_>>()
                .join("\n")
        }

        pub(crate) fn click(&mut self, column: u16, row: u16) {
            self.app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            });
        }

        pub(crate) fn hover(&mut self, column: u16, row: u16) {
            self.app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Moved,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            });
        }

        pub(crate) fn dashboard(&self) -> &Dashboard {
            &self.app.dashboard
        }

        pub(crate) fn listed(&self) -> Vec<String> {
            self.app.listed.iter().map(|school| school.as_str().to_owned()).collect()
        }

        pub(crate) fn focused_view(&self) -> Option<ViewKind> {
            match self.app.focus {
                Focus::Schools => None,
                Focus::View(kind) => Some(kind),
            }
        }

        pub(crate) fn view_cursor(&self) -> Option<SchoolId> {
            self.app.view_cursor.clone()
        }

        /// Inner area of a view as of the last [`HeadlessTui::render`].
        pub(crate) fn view_area(&self, kind: ViewKind) -> Option<Rect> {
            self.app.view_areas.iter().find(|(view, _)| *view == kind).map(|(_, area)| *area)
        }

        pub(crate) fn toast(&self) -> Option<&str> {
            self.app.toast.as_deref()
        }
    }
}
