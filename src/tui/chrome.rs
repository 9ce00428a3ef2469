// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Panel layout, titles, footer and help helpers used by TUI rendering.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Schools,
    View(ViewKind),
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Schools,
        Focus::View(ViewKind::Map),
        Focus::View(ViewKind::TempoDistribution),
        Focus::View(ViewKind::DurationDistribution),
        Focus::View(ViewKind::Scatter),
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|focus| *focus == self).unwrap_or(0)
    }

    fn cycle(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn cycle_back(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn view(self) -> Option<ViewKind> {
        match self {
            Self::Schools => None,
            Self::View(kind) => Some(kind),
        }
    }
}

fn view_key(kind: ViewKind) -> char {
    match kind {
        ViewKind::Map => '1',
        ViewKind::TempoDistribution => '2',
        ViewKind::DurationDistribution => '3',
        ViewKind::Scatter => '4',
    }
}

fn view_for_key(key: char) -> Option<ViewKind> {
    ViewKind::ALL.into_iter().find(|kind| view_key(*kind) == key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DashboardAreas {
    map: Rect,
    detail: Rect,
    tempo: Rect,
    duration: Rect,
    scatter: Rect,
    schools: Rect,
    footer: Rect,
}

impl DashboardAreas {
    fn split(area: Rect) -> Self {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(30),
                Constraint::Percentage(25),
            ])
            .split(outer[0]);
        let pair = |rect: Rect, left: u16| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(left), Constraint::Percentage(100 - left)])
                .split(rect)
        };
        let top = pair(rows[0], 60);
        let middle = pair(rows[1], 50);
        let bottom = pair(rows[2], 65);
        Self {
            map: top[0],
            detail: top[1],
            tempo: middle[0],
            duration: middle[1],
            scatter: bottom[0],
            schools: bottom[1],
            footer: outer[1],
        }
    }

    fn view(&self, kind: ViewKind) -> Rect {
        match kind {
            ViewKind::Map => self.map,
            ViewKind::TempoDistribution => self.tempo,
            ViewKind::DurationDistribution => self.duration,
            ViewKind::Scatter => self.scatter,
        }
    }
}

fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail.map(str::trim).filter(|tail| !tail.is_empty()) {
        title.push(' ');
        title.push_str(tail);
    }
    title.push(' ');
    title
}

fn metric_text(value: Option<f64>) -> String {
    match value.filter(|value| value.is_finite()) {
        Some(value) if value.fract() == 0.0 => format!("{value:.0}"),
        Some(value) => format!("{value}"),
        None => "?".to_owned(),
    }
}

/// Footer readout for a hovered mark: the school plus the values the view plots.
fn hover_readout(kind: ViewKind, entity: &Entity) -> String {
    let school = entity.school();
    match kind {
        ViewKind::Map => school.to_string(),
        ViewKind::TempoDistribution | ViewKind::DurationDistribution => {
            let metric =
                if kind == ViewKind::TempoDistribution { Metric::Tempo } else { Metric::Duration };
            format!("{school} {} {}", metric_text(metric.value(entity)), metric.unit())
        }
        ViewKind::Scatter => format!(
            "{school} BPM: {} Sec: {}",
            metric_text(entity.tempo()),
            metric_text(entity.duration())
        ),
    }
}

/// Maps a terminal cell inside `inner` to the view-space point at the cell center.
fn cell_to_view_point(inner: Rect, viewport: Viewport, column: u16, row: u16) -> Option<Point> {
    let inside = column >= inner.x
        && column < inner.x.saturating_add(inner.width)
        && row >= inner.y
        && row < inner.y.saturating_add(inner.height);
    if !inside {
        return None;
    }
    let x = (f64::from(column - inner.x) + 0.5) / f64::from(inner.width) * viewport.width;
    let y = (f64::from(row - inner.y) + 0.5) / f64::from(inner.height) * viewport.height;
    Some(Point::new(x, y))
}

/// View-space size of one terminal cell. Cells are much taller than wide, so each axis keeps
/// its own reach.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellSpan {
    width: f64,
    height: f64,
}

impl CellSpan {
    fn of(inner: Rect, viewport: Viewport) -> Self {
        Self {
            width: viewport.width / f64::from(inner.width.max(1)),
            height: viewport.height / f64::from(inner.height.max(1)),
        }
    }

    /// True when `mark` lies within one cell of `point` on both axes.
    fn reaches(self, point: Point, mark: Point) -> bool {
        (mark.x - point.x).abs() <= self.width && (mark.y - point.y).abs() <= self.height
    }
}

fn footer_hint(theme: &TuiTheme, key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [Span::styled(key, theme.key_style()), Span::styled(format!(" {label}  "), theme.muted_style())]
}

fn footer_hints(theme: &TuiTheme, searching: bool) -> Vec<Span<'static>> {
    let hints: &[(&'static str, &'static str)] = if searching {
        &[("Enter", "select"), ("Esc", "cancel"), ("↑↓", "move")]
    } else {
        &[
            ("Tab", "focus"),
            ("1-4", "view"),
            ("Enter", "toggle"),
            ("/", "search"),
            ("Esc", "clear"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };
    hints.iter().flat_map(|&(key, label)| footer_hint(theme, key, label)).collect()
}

fn help_lines() -> Vec<Line<'static>> {
    [
        "Anthem: college fight songs",
        "",
        "Tab / Shift-Tab   cycle focus between the school list and the views",
        "1 2 3 4 / 0       focus map, tempo, duration, scatter / school list",
        "↑↓ or j k         move in the school list",
        "←→ or h l         step through the marks of the focused view",
        "Enter / Space     toggle the school under the cursor",
        "click             toggle the school under the mouse",
        "/                 fuzzy search schools",
        "Esc / c           clear the selection",
        "q                 quit",
    ]
    .into_iter()
    .map(Line::from)
    .collect()
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
