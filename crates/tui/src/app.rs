use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hotseat_core::model::{DiffClass, SortDirection, SortKey, SortSpec, TableDataset, ValueUnit};
use hotseat_core::views::{RankedView, bar_width, ranked_view};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, TableState},
};

/// Character cells available for a proportional cost bar.
const BAR_CELLS: f64 = 12.0;

/// Interactive table state. The app owns what the core deliberately does not:
/// the current sort spec, filter keyword, and selection. Every change
/// recomputes the ranked view from the dataset snapshot.
pub struct App {
    title: String,
    dataset: TableDataset,
    dropped: usize,
    compared: bool,
    filter: String,
    spec: SortSpec,
    selected: usize,
    entering_filter: bool,
    view: RankedView,
    table_state: TableState,
}

enum Action {
    Continue,
    Quit,
}

impl App {
    pub fn new(title: String, dataset: TableDataset, dropped: usize, compared: bool) -> Self {
        // A fresh dataset always starts in natural order, like a fresh query
        // result in the web UI.
        let spec = SortSpec::unsorted();
        let view = ranked_view(&dataset, "", spec);
        Self {
            title,
            dataset,
            dropped,
            compared,
            filter: String::new(),
            spec,
            selected: 0,
            entering_filter: false,
            view,
            table_state: TableState::default(),
        }
    }

    fn recompute(&mut self) {
        self.view = ranked_view(&self.dataset, &self.filter, self.spec);
        if self.selected >= self.view.rows.len() {
            self.selected = self.view.rows.len().saturating_sub(1);
        }
    }

    fn click(&mut self, key: SortKey) {
        self.spec.click(key);
        self.recompute();
    }

    fn on_key(&mut self, code: KeyCode) -> Action {
        if self.entering_filter {
            match code {
                KeyCode::Enter | KeyCode::Esc => self.entering_filter = false,
                KeyCode::Backspace => {
                    self.filter.pop();
                    self.recompute();
                }
                KeyCode::Char(c) => {
                    self.filter.push(c);
                    self.recompute();
                }
                _ => {}
            }
            return Action::Continue;
        }

        match code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Esc => {
                if self.filter.is_empty() {
                    return Action::Quit;
                }
                self.filter.clear();
                self.recompute();
            }
            KeyCode::Char('/') => self.entering_filter = true,
            KeyCode::Char('n') => self.click(SortKey::Name),
            KeyCode::Char('s') => self.click(SortKey::SelfValue),
            KeyCode::Char('t') => self.click(SortKey::Total),
            KeyCode::Char('b') if self.compared => self.click(SortKey::Baseline),
            KeyCode::Char('c') if self.compared => self.click(SortKey::Comparison),
            KeyCode::Char('d') if self.compared => self.click(SortKey::Diff),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.view.rows.len() {
                    self.selected += 1;
                }
            }
            _ => {}
        }
        Action::Continue
    }
}

pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && matches!(app.on_key(key.code), Action::Quit)
        {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &mut App) {
    let [header_area, table_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    // Status line
    let mut status = format!(
        " hotseat — {} · {} · {}/{} rows",
        app.title,
        unit_label(app.view.unit),
        app.view.rows.len(),
        app.dataset.len(),
    );
    if app.dropped > 0 {
        status.push_str(&format!(" · {} dropped", app.dropped));
    }
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        header_area,
    );

    // Table
    let header = if app.compared {
        Row::new(vec![
            header_cell(app, "Location", SortKey::Name),
            header_cell(app, "Baseline", SortKey::Baseline),
            header_cell(app, "Comparison", SortKey::Comparison),
            header_cell(app, "Diff", SortKey::Diff),
        ])
    } else {
        Row::new(vec![
            header_cell(app, "Location", SortKey::Name),
            header_cell(app, "Self", SortKey::SelfValue),
            header_cell(app, "Total", SortKey::Total),
        ])
    };

    let rows: Vec<Row> = app.view.rows.iter().map(|row| data_row(app, row)).collect();
    let widths: Vec<Constraint> = if app.compared {
        vec![
            Constraint::Fill(1),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
        ]
    } else {
        vec![
            Constraint::Fill(1),
            Constraint::Length(23),
            Constraint::Length(23),
        ]
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::bordered())
        .row_highlight_style(Style::default().bg(Color::DarkGray));
    app.table_state
        .select((!app.view.rows.is_empty()).then_some(app.selected));
    frame.render_stateful_widget(table, table_area, &mut app.table_state);

    // Detail + key hints
    let detail = match app.view.summary(app.selected) {
        Some(s) if app.compared => format!(
            " {} — baseline {} · comparison {} · diff {}",
            s.name,
            s.baseline_text.as_deref().unwrap_or("-"),
            s.comparison_text.as_deref().unwrap_or("-"),
            s.diff_label,
        ),
        Some(s) => format!(
            " {} — self {} ({}) · total {} ({})",
            s.name, s.self_text, s.self_percent, s.total_text, s.total_percent,
        ),
        None => " no rows match".to_string(),
    };

    let hints = if app.entering_filter {
        format!(" filter: {}▏ (Enter to apply, Esc to cancel)", app.filter)
    } else {
        let sort_keys = if app.compared { "n/b/c/d" } else { "n/s/t" };
        let mut hints = format!(" {sort_keys} sort · / filter · ↑↓ select · q quit");
        if !app.filter.is_empty() {
            hints = format!(" filter: {} · Esc clear ·{hints}", app.filter);
        }
        hints
    };

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(detail),
            Line::from(Span::styled(hints, Style::default().fg(Color::Gray))),
        ]),
        footer_area,
    );
}

fn header_cell(app: &App, label: &str, key: SortKey) -> Cell<'static> {
    let marker = if app.spec.key == key {
        match app.spec.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
            SortDirection::None => "",
        }
    } else {
        ""
    };
    Cell::from(format!("{label}{marker}")).style(Style::default().add_modifier(Modifier::BOLD))
}

fn data_row(app: &App, row: &hotseat_core::TableRow) -> Row<'static> {
    let swatch = row
        .color
        .map(|c| Color::Rgb(c.r, c.g, c.b))
        .unwrap_or(Color::Gray);
    let location = Cell::from(Line::from(vec![
        Span::styled("■ ", Style::default().fg(swatch)),
        Span::raw(row.name.clone()),
    ]));

    if app.compared {
        let diff_style = Style::default().fg(diff_color(row.diff_class()));
        Row::new(vec![
            location,
            Cell::from(app.view.unit.format_value(row.baseline.unwrap_or(0.0))),
            Cell::from(app.view.unit.format_value(row.comparison.unwrap_or(0.0))),
            Cell::from(Span::styled(row.diff_label(), diff_style)),
        ])
    } else {
        Row::new(vec![
            location,
            bar_cell(
                app.view.unit.format_value(row.self_value),
                row.self_value,
                app.view.max_self,
                swatch,
            ),
            bar_cell(
                app.view.unit.format_value(row.total),
                row.total,
                app.view.max_total,
                swatch,
            ),
        ])
    }
}

/// A cost cell: right-aligned value text plus a proportional bar in the
/// row's palette color.
fn bar_cell(text: String, value: f64, max: f64, color: Color) -> Cell<'static> {
    let cells = bar_width(value, max, BAR_CELLS).round() as usize;
    Cell::from(Line::from(vec![
        Span::raw(format!("{text:>9} ")),
        Span::styled("▆".repeat(cells), Style::default().fg(color)),
    ]))
}

fn diff_color(class: DiffClass) -> Color {
    match class {
        DiffClass::Regression | DiffClass::Removed => Color::Red,
        DiffClass::Improvement | DiffClass::Added => Color::Green,
        DiffClass::Unchanged => Color::DarkGray,
    }
}

fn unit_label(unit: ValueUnit) -> &'static str {
    match unit {
        ValueUnit::Nanoseconds => "nanoseconds",
        ValueUnit::Microseconds => "microseconds",
        ValueUnit::Milliseconds => "milliseconds",
        ValueUnit::Seconds => "seconds",
        ValueUnit::Count => "count",
        ValueUnit::Bytes => "bytes",
        ValueUnit::Weight => "weight",
    }
}
