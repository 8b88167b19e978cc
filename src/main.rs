use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use transfer_window::config::AppConfig;
use transfer_window::controller::{Controller, Screen};
use transfer_window::render::{
    Badge, BadgeTone, FilterButton, MessagePanel, RenderedScreen, ScoreboardRow, TimelineCard,
    ViewBody,
};
use transfer_window::state::{SelectionEvent, view_label};

struct App {
    controller: Controller,
    should_quit: bool,
    help_overlay: bool,
    scroll: usize,
}

impl App {
    fn new(controller: Controller) -> Self {
        Self {
            controller,
            should_quit: false,
            help_overlay: false,
            scroll: 0,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_overlay = !self.help_overlay,
            KeyCode::Esc => self.help_overlay = false,
            KeyCode::Char(c @ '1'..='9') => {
                let shortcut = c.to_digit(10).unwrap_or(0) as usize;
                self.controller.select_league_at(shortcut);
                self.scroll = 0;
            }
            KeyCode::Char(']') | KeyCode::Right => {
                self.controller.select_next_league();
                self.scroll = 0;
            }
            KeyCode::Char('[') | KeyCode::Left => {
                self.controller.select_prev_league();
                self.scroll = 0;
            }
            KeyCode::Char('s') => self.select(SelectionEvent::CycleStatus),
            KeyCode::Char('t') => self.select(SelectionEvent::CycleType),
            KeyCode::Char('v') => self.select(SelectionEvent::ToggleView),
            KeyCode::Char('r') => {
                self.controller.reload();
                self.scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn select(&mut self, event: SelectionEvent) {
        self.controller.dispatch(event);
        self.scroll = 0;
    }

    fn scroll_down(&mut self) {
        let total = match self.controller.view() {
            Screen::Ready(screen) => screen.body.item_count(),
            Screen::LoadFailed(_) => 0,
        };
        if self.scroll + 1 < total {
            self.scroll += 1;
        }
    }
}

fn main() -> io::Result<()> {
    let cfg = AppConfig::from_env();
    // The initial load blocks before the first frame is drawn.
    let controller = Controller::new(&cfg);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(controller);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(5),
        ])
        .split(frame.size());

    match app.controller.view() {
        Screen::Ready(screen) => {
            let header = Paragraph::new(header_lines(screen))
                .block(Block::default().borders(Borders::BOTTOM));
            frame.render_widget(header, chunks[0]);
            render_body(frame, chunks[1], &screen.body, app.scroll);
        }
        Screen::LoadFailed(panel) => {
            let header = Paragraph::new("  TRANSFER WINDOW")
                .block(Block::default().borders(Borders::BOTTOM));
            frame.render_widget(header, chunks[0]);
            render_message_panel(frame, chunks[1], panel, Color::Red);
        }
    }

    let footer = Paragraph::new(footer_text(&app.controller))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_lines(screen: &RenderedScreen) -> Vec<Line<'static>> {
    let title = Line::from(vec![
        Span::styled(
            "  TRANSFER WINDOW",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " | {} | {} | {}",
            screen.league_label,
            screen.count_label,
            view_label(screen.view)
        )),
    ]);

    let mut leagues = vec![Span::raw("  ")];
    for (idx, league) in screen.leagues.iter().enumerate() {
        let text = format!(" {} {} {} ", idx + 1, league.short_name, league.country);
        leagues.push(Span::styled(text, active_style(league.active)));
        leagues.push(Span::raw(" "));
    }

    let mut filters = vec![Span::raw("  Status:")];
    push_filter_spans(&mut filters, &screen.status_filters);
    filters.push(Span::raw("   Type:"));
    push_filter_spans(&mut filters, &screen.type_filters);

    vec![title, Line::from(leagues), Line::from(filters)]
}

fn push_filter_spans(spans: &mut Vec<Span<'static>>, buttons: &[FilterButton]) {
    for button in buttons {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} ", button.label),
            active_style(button.active),
        ));
    }
}

fn active_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_body(frame: &mut Frame, area: Rect, body: &ViewBody, scroll: usize) {
    match body {
        ViewBody::NoResults(panel) => render_message_panel(frame, area, panel, Color::DarkGray),
        ViewBody::Timeline(cards) => render_timeline(frame, area, cards, scroll),
        ViewBody::Scoreboard(rows) => render_scoreboard(frame, area, rows, scroll),
    }
}

fn render_message_panel(frame: &mut Frame, area: Rect, panel: &MessagePanel, color: Color) {
    let popup = centered_rect(60, 40, area);
    let text = vec![
        Line::from(Span::styled(
            panel.title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(panel.subtitle),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, popup);
}

fn render_timeline(frame: &mut Frame, area: Rect, cards: &[TimelineCard], scroll: usize) {
    const CARD_HEIGHT: u16 = 5;
    if area.height < CARD_HEIGHT {
        let empty = Paragraph::new("Timeline needs more height")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let visible = (area.height / CARD_HEIGHT) as usize;
    let (start, end) = visible_window(scroll, cards.len(), visible);

    for (i, card) in cards[start..end].iter().enumerate() {
        let card_area = Rect {
            x: area.x,
            y: area.y + (i as u16) * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT,
        };
        let paragraph = Paragraph::new(card_lines(card))
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(paragraph, card_area);
    }
}

fn card_lines(card: &TimelineCard) -> Vec<Line<'static>> {
    let muted = Style::default().fg(Color::DarkGray);
    vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", card.player_name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            badge_span(&card.status),
            Span::raw(" "),
            badge_span(&card.kind),
        ]),
        Line::from(Span::styled(format!(" {}", card.details), muted)),
        Line::from(vec![
            Span::styled(" FROM ", muted),
            Span::raw(card.from_team.clone()),
            Span::styled("  →  TO ", muted),
            Span::styled(
                card.to_team.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" FEE ", muted),
            Span::raw(card.fee.clone()),
            Span::styled("   DATE ", muted),
            Span::raw(card.date.clone()),
        ]),
    ]
}

fn badge_span(badge: &Badge) -> Span<'static> {
    Span::styled(
        format!("[{}]", badge.label),
        Style::default()
            .fg(tone_color(badge.tone))
            .add_modifier(Modifier::BOLD),
    )
}

fn tone_color(tone: BadgeTone) -> Color {
    match tone {
        BadgeTone::Done => Color::Green,
        BadgeTone::Waiting => Color::Yellow,
        BadgeTone::Speculative => Color::Magenta,
        BadgeTone::Primary => Color::Cyan,
        BadgeTone::Secondary => Color::Blue,
    }
}

fn render_scoreboard(frame: &mut Frame, area: Rect, rows: &[ScoreboardRow], scroll: usize) {
    // Header row plus its bottom margin.
    let visible = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_window(scroll, rows.len(), visible);

    let header = Row::new(["PLAYER", "FROM", "TO", "FEE", "STATUS", "TYPE", "DATE"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);
    let body = rows[start..end].iter().map(|r| {
        Row::new(vec![
            Cell::from(r.player.clone()),
            Cell::from(r.from.clone()),
            Cell::from(r.to.clone()),
            Cell::from(r.fee.clone()),
            Cell::from(r.status.clone()),
            Cell::from(r.kind.clone()),
            Cell::from(r.date.clone()),
        ])
    });
    let widths = [
        Constraint::Min(18),
        Constraint::Min(14),
        Constraint::Min(14),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
    ];
    let table = Table::new(body, widths).header(header).column_spacing(1);
    frame.render_widget(table, area);
}

fn visible_window(scroll: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    let max_start = total.saturating_sub(visible);
    let start = scroll.min(max_start);
    (start, (start + visible).min(total))
}

fn footer_text(controller: &Controller) -> String {
    let mut lines = console_lines(controller);
    lines.push(
        "1-9 League | [/] Prev/Next | s Status | t Type | v View | r Reload | ? Help | q Quit"
            .to_string(),
    );
    lines.join("\n")
}

fn console_lines(controller: &Controller) -> Vec<String> {
    if controller.logs.is_empty() {
        return vec!["No alerts yet".to_string()];
    }
    let start = controller.logs.len().saturating_sub(3);
    controller.logs.iter().skip(start).cloned().collect()
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Transfer Window - Help",
        "",
        "Leagues:",
        "  1-9          Select league by position",
        "  [ / ]        Previous / next league",
        "",
        "Filters:",
        "  s            Cycle status (all, completed, pending, rumored)",
        "  t            Cycle type (all, permanent, loan)",
        "  v            Toggle timeline / scoreboard",
        "",
        "General:",
        "  j/k or ↑/↓   Scroll",
        "  r            Reload data",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
