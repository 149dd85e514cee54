use std::{collections::HashSet, io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use nextwave_core::{
    landing::{self, Section, TextBlock},
    platform::Platform,
    privacy,
    rules::{
        CardBlock, ContentError, ContentSource, ResolvedContent, RuleCard, RulesPage, RulesState,
        RulesView,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::{spawn, sync::mpsc};
use tracing::{debug, error, info, warn};

use crate::banner;

const TICK_RATE: Duration = Duration::from_millis(250);
const SCROLL_PAGE: i32 = 10;

#[derive(Debug, Clone)]
struct Theme {
    fg: Color,
    accent: Color,
    accent_alt: Color,
    muted: Color,
    success: Color,
    warning: Color,
    danger: Color,
    on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            accent_alt: Color::Blue,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            on_accent: Color::Black,
        }
    }
}

impl Theme {
    fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    fn heading(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    fn strong(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    fn selected(&self) -> Style {
        Style::default()
            .fg(self.on_accent)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Landing,
    Privacy,
}

enum AppEvent {
    Input(Event),
    Tick,
    RulesResolved(Result<ResolvedContent, ContentError>),
}

/// Terminal rendition of the NextWave landing page.
pub struct NextWaveApp {
    source: ContentSource,
    rules: RulesView,
    state: UiState,
    theme: Theme,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    resolve_started: bool,
}

impl NextWaveApp {
    pub fn new(platform: Platform, source: ContentSource, rules: RulesView) -> Self {
        Self {
            source,
            rules,
            state: UiState::new(platform),
            theme: Theme::default(),
            event_tx: None,
            resolve_started: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);
        self.start_rules_resolve();

        loop {
            terminal.draw(|frame| draw(frame, &self.state, &self.rules, &self.theme))?;
            if self.state.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }

            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        info!("nextwave closed");
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(Event::Key(key))) => {
                if key.kind == KeyEventKind::Press {
                    self.state.handle_key(key);
                }
                true
            }
            Some(AppEvent::Input(_)) | Some(AppEvent::Tick) => true,
            Some(AppEvent::RulesResolved(result)) => {
                self.apply_rules_result(result);
                true
            }
            None => false,
        }
    }

    fn apply_rules_result(&mut self, result: Result<ResolvedContent, ContentError>) {
        if !self.rules.settle(result) {
            return;
        }
        let message = match self.rules.state() {
            RulesState::Ready(page) => {
                info!(origin = ?page.origin, cards = page.cards.len(), "rules ready");
                format!("Rules loaded ({})", page.origin.label())
            }
            RulesState::Error(reason) => {
                error!(%reason, "rules unavailable");
                "Rules could not be loaded".to_string()
            }
            RulesState::LanguageError(err) => {
                error!(error = %err, "rules language data invalid");
                format!("Rules language data error ({})", self.rules.language())
            }
            RulesState::Loading => return,
        };
        self.state.set_status(message);
    }

    /// Spawn the single resolution task for this run.
    fn start_rules_resolve(&mut self) {
        if self.resolve_started {
            return;
        }
        let Some(sender) = self.event_tx.clone() else {
            error!("event_channel_missing");
            self.state
                .set_status("Internal error: event channel unavailable".to_string());
            return;
        };

        self.resolve_started = true;
        info!(
            primary = %self.source.primary(),
            secondary = %self.source.secondary(),
            "resolving rules"
        );
        let source = self.source.clone();
        spawn(async move {
            let result = source.resolve().await;
            if sender.send(AppEvent::RulesResolved(result)).await.is_err() {
                debug!("app closed before rules resolved");
            }
        });
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "terminal read failed");
                    break;
                }
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(err) => {
                warn!(error = %err, "terminal poll failed");
                break;
            }
        }
    });
}

/// Everything the draw functions need besides the rules view.
struct UiState {
    platform: Platform,
    section: Section,
    screen: Screen,
    faq_cursor: usize,
    /// Expanded FAQ entries, keyed by question.
    open_faqs: HashSet<&'static str>,
    scroll: u16,
    status: String,
    should_quit: bool,
}

impl UiState {
    fn new(platform: Platform) -> Self {
        Self {
            platform,
            section: Section::Home,
            screen: Screen::Landing,
            faq_cursor: 0,
            open_faqs: HashSet::new(),
            scroll: 0,
            status: "Ready".to_string(),
            should_quit: false,
        }
    }

    fn set_status(&mut self, status: String) {
        self.status = status;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') = key.code {
                self.should_quit = true;
            }
            return;
        }
        match self.screen {
            Screen::Landing => self.handle_landing_key(key),
            Screen::Privacy => self.handle_privacy_key(key),
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.select_section(self.section.offset(1)),
            KeyCode::BackTab | KeyCode::Left => self.select_section(self.section.offset(-1)),
            KeyCode::Char(ch @ '1'..='9') => {
                let idx = ch as usize - '1' as usize;
                if let Some(section) = Section::ALL.get(idx) {
                    self.select_section(*section);
                }
            }
            KeyCode::Char('i') => self.set_platform(Platform::Ios),
            KeyCode::Char('a') => self.set_platform(Platform::Android),
            KeyCode::Char('o') => self.set_platform(self.platform.toggle()),
            KeyCode::Up | KeyCode::Char('k') => self.move_or_scroll(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_or_scroll(1),
            KeyCode::PageUp => self.scroll_by(-SCROLL_PAGE),
            KeyCode::PageDown => self.scroll_by(SCROLL_PAGE),
            KeyCode::Enter | KeyCode::Char(' ') if self.section == Section::Faq => {
                self.toggle_current_faq();
            }
            KeyCode::Char('p') => {
                self.screen = Screen::Privacy;
                self.scroll = 0;
                self.set_status(privacy::TITLE.to_string());
            }
            KeyCode::Esc | KeyCode::Char('b') => self.select_section(Section::Home),
            _ => {}
        }
    }

    fn handle_privacy_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Char('b') => {
                self.screen = Screen::Landing;
                self.scroll = 0;
                self.set_status("Returned to the landing page".to_string());
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-SCROLL_PAGE),
            KeyCode::PageDown => self.scroll_by(SCROLL_PAGE),
            _ => {}
        }
    }

    fn select_section(&mut self, section: Section) {
        if self.section != section {
            debug!(section = section.nav_label(), "section selected");
        }
        self.section = section;
        self.scroll = 0;
    }

    fn set_platform(&mut self, platform: Platform) {
        if self.platform == platform {
            return;
        }
        self.platform = platform;
        let count = landing::faqs(platform).len();
        self.faq_cursor = self.faq_cursor.min(count.saturating_sub(1));
        info!(platform = platform.label(), "platform switched");
        self.set_status(format!("Showing {} content", platform.label()));
    }

    fn move_or_scroll(&mut self, delta: i32) {
        if self.section != Section::Faq {
            self.scroll_by(delta);
            return;
        }
        let count = landing::faqs(self.platform).len();
        if count == 0 {
            return;
        }
        let next = (self.faq_cursor as i32 + delta).clamp(0, count as i32 - 1);
        self.faq_cursor = next as usize;
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(u16::MAX));
        self.scroll = next as u16;
    }

    fn toggle_current_faq(&mut self) {
        let Some(faq) = landing::faqs(self.platform).get(self.faq_cursor).copied() else {
            return;
        };
        if !self.open_faqs.remove(faq.question) {
            self.open_faqs.insert(faq.question);
        }
    }

    fn faq_is_open(&self, question: &str) -> bool {
        self.open_faqs.contains(question)
    }
}

fn draw(frame: &mut Frame, state: &UiState, rules: &RulesView, theme: &Theme) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    match state.screen {
        Screen::Landing => {
            render_nav(frame, chunks[0], state, theme);
            render_section(frame, chunks[1], state, rules, theme);
        }
        Screen::Privacy => render_privacy(frame, chunks[0], chunks[1], state, theme),
    }

    render_status(frame, chunks[2], state, rules, theme);
}

fn render_nav(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let mut spans = Vec::new();
    for (idx, section) in Section::ALL.iter().enumerate() {
        let style = if *section == state.section {
            theme.selected()
        } else {
            theme.text()
        };
        spans.push(Span::styled(
            format!(" {} {} ", idx + 1, section.nav_label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    let nav = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} · {} ", landing::APP_NAME, state.platform.label())),
    );
    frame.render_widget(nav, area);
}

fn render_section(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    rules: &RulesView,
    theme: &Theme,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = section_lines(state, rules, theme, inner_width);
    let alignment = if state.section == Section::Home {
        Alignment::Center
    } else {
        Alignment::Left
    };
    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(state.section.nav_label()),
        )
        .alignment(alignment)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    frame.render_widget(body, area);
}

fn render_privacy(frame: &mut Frame, header: Rect, body: Rect, state: &UiState, theme: &Theme) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(privacy::TITLE, theme.heading()),
        Span::styled(
            format!("  Effective date: {}", privacy::EFFECTIVE_DATE),
            theme.dim(),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, header);

    let mut lines = Vec::new();
    for (heading, section) in privacy::numbered_headings()
        .into_iter()
        .zip(privacy::SECTIONS)
    {
        lines.push(Line::from(Span::styled(heading, theme.heading())));
        lines.extend(text_block_lines(section.body, theme, ""));
        lines.push(Line::default());
    }

    let policy = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Esc to return"))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    frame.render_widget(policy, body);
}

fn render_status(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    rules: &RulesView,
    theme: &Theme,
) {
    let rules_label = match rules.state() {
        RulesState::Loading => Span::styled("rules: loading", theme.dim()),
        RulesState::Ready(page) => {
            let label = if page.header.version.is_empty() {
                format!("rules: {}", page.origin.label())
            } else {
                format!("rules: {} v{}", page.origin.label(), page.header.version)
            };
            Span::styled(label, Style::default().fg(theme.success))
        }
        RulesState::Error(_) => {
            Span::styled("rules: unavailable", Style::default().fg(theme.danger))
        }
        RulesState::LanguageError(_) => {
            Span::styled("rules: language error", Style::default().fg(theme.warning))
        }
    };

    let line = Line::from(vec![
        Span::styled(state.platform.label(), theme.heading()),
        Span::styled(" │ ", theme.dim()),
        rules_label,
        Span::styled(" │ ", theme.dim()),
        Span::styled(state.status.clone(), theme.text()),
    ]);
    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Tab sections · i/a platform · p privacy · q quit "),
    );
    frame.render_widget(status, area);
}

fn section_lines(
    state: &UiState,
    rules: &RulesView,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some((title, lead)) = state.section.heading() {
        lines.push(Line::from(Span::styled(title, theme.heading())));
        lines.push(Line::from(Span::styled(lead, theme.dim())));
        lines.push(Line::default());
    }

    match state.section {
        Section::Home => lines.extend(home_lines(state.platform, theme, width)),
        Section::Features => {
            for feature in landing::features(state.platform) {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ", feature.glyph),
                        Style::default().fg(theme.accent_alt),
                    ),
                    Span::styled(feature.title, theme.strong()),
                ]));
                lines.push(indented(feature.description.to_string(), theme.text()));
                lines.push(Line::default());
            }
        }
        Section::Screenshots => {
            let shot = landing::screenshot(state.platform);
            lines.push(Line::from(Span::styled(
                format!("[ {} ]", shot.alt),
                theme.strong(),
            )));
            lines.push(Line::from(Span::styled(shot.asset, theme.dim())));
        }
        Section::Rules => lines.extend(rules_lines(rules, theme)),
        Section::Faq => lines.extend(faq_lines(state, theme)),
        Section::Download => lines.extend(download_lines(state.platform, theme)),
    }
    lines
}

fn home_lines(platform: Platform, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let hero = landing::hero();
    let mut lines = vec![Line::default()];

    if banner::width(hero.name) <= width {
        lines.extend(
            banner::render(hero.name)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, theme.heading()))),
        );
    } else {
        lines.push(Line::from(Span::styled(hero.name, theme.heading())));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(hero.tagline, theme.text())));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(hero.switch_prompt, theme.dim())));

    let mut switch = Vec::new();
    for candidate in Platform::ALL {
        let style = if candidate == platform {
            theme.selected()
        } else {
            theme.dim()
        };
        switch.push(Span::styled(format!(" {} ", candidate.label()), style));
        switch.push(Span::raw("  "));
    }
    lines.push(Line::from(switch));
    lines
}

fn faq_lines(state: &UiState, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (idx, faq) in landing::faqs(state.platform).into_iter().enumerate() {
        let open = state.faq_is_open(faq.question);
        let marker = if open { "▼" } else { "▶" };
        let style = if idx == state.faq_cursor {
            theme.selected()
        } else {
            theme.strong()
        };
        lines.push(Line::from(Span::styled(
            format!("{marker} {}", faq.question),
            style,
        )));
        if open {
            lines.extend(text_block_lines(faq.answer, theme, "  "));
        }
        lines.push(Line::default());
    }
    lines
}

fn download_lines(platform: Platform, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for link in landing::downloads(platform) {
        let style = if link.highlighted {
            theme.heading()
        } else {
            theme.dim()
        };
        let mut spans = vec![Span::styled(format!("[ {} ]", link.label), style)];
        if link.coming_soon {
            spans.push(Span::styled(
                " coming soon",
                Style::default().fg(theme.warning),
            ));
        } else {
            spans.push(Span::styled(format!(" {}", link.url), theme.dim()));
        }
        lines.push(Line::from(spans));
    }

    let support = landing::support();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(support.text, theme.text())));
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", support.link_label), theme.strong()),
        Span::styled(support.url, theme.dim()),
    ]));

    let footer = landing::footer();
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(
            format!("{} (p)", footer.privacy_label),
            Style::default().fg(theme.accent_alt),
        ),
        Span::styled(format!("  {}", footer.credit), theme.dim()),
    ]));
    lines
}

fn rules_lines(rules: &RulesView, theme: &Theme) -> Vec<Line<'static>> {
    match rules.state() {
        RulesState::Loading => vec![Line::from(Span::styled("Loading rules…", theme.dim()))],
        RulesState::Error(reason) => vec![
            Line::from(Span::styled(
                "Failed to load the wakethieving rules. Please try again later.",
                Style::default().fg(theme.danger),
            )),
            Line::from(Span::styled(reason.clone(), theme.dim())),
        ],
        RulesState::LanguageError(err) => vec![
            Line::from(Span::styled(
                "Language data error: the rules cannot be shown in this language.",
                Style::default().fg(theme.warning),
            )),
            Line::from(Span::styled(err.to_string(), theme.dim())),
        ],
        RulesState::Ready(page) => page_lines(page, theme),
    }
}

fn page_lines(page: &RulesPage, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        page.header.title.clone(),
        theme.heading(),
    ))];
    if let Some(subtitle) = &page.header.subtitle {
        lines.push(Line::from(Span::styled(subtitle.clone(), theme.text())));
    }
    let mut meta = Vec::new();
    if let Some(updated) = &page.header.last_update {
        meta.push(format!("Last updated {updated}"));
    }
    if !page.header.version.is_empty() {
        meta.push(format!("v{}", page.header.version));
    }
    if let Some(published) = page.header.published {
        meta.push(format!("published {}", published.format("%Y-%m-%d")));
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(meta.join(" · "), theme.dim())));
    }
    lines.push(Line::default());

    for card in &page.cards {
        lines.extend(card_lines(card, theme));
        lines.push(Line::default());
    }

    if let Some(message) = &page.footer.message {
        lines.push(Line::from(Span::styled(message.clone(), theme.strong())));
    }
    if let Some(attribution) = &page.footer.attribution {
        lines.push(Line::from(Span::styled(attribution.clone(), theme.dim())));
    }
    let source = match &page.footer.api_source {
        Some(api_source) => format!("Source: {api_source} ({})", page.origin.label()),
        None => format!("Source: {}", page.origin.label()),
    };
    lines.push(Line::from(Span::styled(source, theme.dim())));
    lines
}

// SVG paths cannot be drawn in a terminal; known icon keys get a glyph.
fn icon_glyph(card: &RuleCard) -> &'static str {
    if card.icon.is_none() {
        return "";
    }
    match card.icon_key.as_str() {
        "distance" => "↔",
        "eye" => "◉",
        "warning" => "⚠",
        "shield" => "⛨",
        "info" => "ℹ",
        "heart" => "♥",
        _ => "◆",
    }
}

fn card_lines(card: &RuleCard, theme: &Theme) -> Vec<Line<'static>> {
    let glyph = icon_glyph(card);
    let mut heading = Vec::new();
    if !glyph.is_empty() {
        heading.push(Span::styled(
            format!("{glyph} "),
            Style::default().fg(theme.accent_alt),
        ));
    }
    heading.push(Span::styled(card.title.clone(), theme.heading()));
    let mut lines = vec![Line::from(heading)];
    let note = Style::default().fg(theme.accent_alt);

    for block in &card.blocks {
        match block {
            CardBlock::Main { title, text } => {
                if let Some(title) = title {
                    lines.push(indented(title.clone(), theme.strong()));
                }
                lines.push(indented(text.clone(), theme.text()));
            }
            CardBlock::Intro(text) | CardBlock::Description(text) => {
                lines.push(indented(text.clone(), theme.text()));
            }
            CardBlock::Day(item) => {
                lines.push(titled_line("☀", &item.title, &item.description, theme))
            }
            CardBlock::Night(item) => {
                lines.push(titled_line("☾", &item.title, &item.description, theme))
            }
            CardBlock::RuleList(items) | CardBlock::EquipmentList(items) => {
                for item in items {
                    lines.push(indented(format!("• {}", item.title), theme.strong()));
                    if !item.description.is_empty() {
                        lines.push(indented(format!("  {}", item.description), theme.text()));
                    }
                }
            }
            CardBlock::Info(info) => {
                lines.push(indented(format!("ℹ {}", info.text), note));
                if let Some(link) = &info.link {
                    lines.push(indented(format!("  {} {}", link.text, link.url), theme.dim()));
                }
            }
            CardBlock::Supplementary(extra) => {
                lines.push(indented(format!("ℹ {}", extra.text), note));
                lines.push(indented(format!("  {}", extra.url), theme.dim()));
            }
            CardBlock::Warning(text) => {
                lines.push(indented(
                    format!("⚠ {text}"),
                    Style::default().fg(theme.warning),
                ));
            }
            CardBlock::Community(community) => {
                if let Some(text) = &community.text {
                    lines.push(indented(text.clone(), theme.text()));
                }
                if let Some(link) = &community.link {
                    lines.push(indented(format!("→ {}", link.title), theme.strong()));
                    if let Some(subtitle) = &link.subtitle {
                        lines.push(indented(format!("  {subtitle}"), theme.dim()));
                    }
                    lines.push(indented(format!("  {}", link.url), theme.dim()));
                }
            }
        }
    }
    lines
}

fn indented(text: String, style: Style) -> Line<'static> {
    Line::from(Span::styled(format!("  {text}"), style))
}

fn titled_line(glyph: &str, title: &str, text: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {glyph} {title} "), theme.strong()),
        Span::styled(text.to_string(), theme.text()),
    ])
}

fn text_block_lines(blocks: &[TextBlock], theme: &Theme, indent: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            TextBlock::Paragraph(text) => {
                lines.push(Line::from(Span::styled(
                    format!("{indent}{text}"),
                    theme.text(),
                )));
            }
            TextBlock::Bullets(items) => lines.extend(items.iter().map(|item| {
                Line::from(Span::styled(format!("{indent}• {item}"), theme.text()))
            })),
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use nextwave_core::rules::{ContentLocation, ContentOrigin, RulesDocument};
    use ratatui::backend::TestBackend;
    use serde_json::json;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rendered(state: &UiState, rules: &RulesView) -> Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(120, 60))?;
        terminal.draw(|frame| draw(frame, state, rules, &Theme::default()))?;
        let buffer = terminal.backend().buffer();
        Ok(buffer.content.iter().map(|cell| cell.symbol()).collect())
    }

    fn resolved(document: serde_json::Value) -> Result<ResolvedContent> {
        Ok(ResolvedContent {
            document: serde_json::from_value::<RulesDocument>(document)?,
            origin: ContentOrigin::Secondary,
            location: ContentLocation::Local("data/wakethieving-rules.json".into()),
        })
    }

    #[test]
    fn tab_and_number_keys_select_sections() {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Tab));
        assert_eq!(state.section, Section::Features);
        state.handle_key(press(KeyCode::Left));
        state.handle_key(press(KeyCode::Left));
        assert_eq!(state.section, Section::Download);
        state.handle_key(press(KeyCode::Char('4')));
        assert_eq!(state.section, Section::Rules);
        state.handle_key(press(KeyCode::Char('9')));
        assert_eq!(state.section, Section::Rules);
        state.handle_key(press(KeyCode::Esc));
        assert_eq!(state.section, Section::Home);
    }

    #[test]
    fn switching_platform_clamps_faq_cursor() {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Char('5')));
        for _ in 0..20 {
            state.handle_key(press(KeyCode::Down));
        }
        assert_eq!(state.faq_cursor, landing::faqs(Platform::Ios).len() - 1);

        state.handle_key(press(KeyCode::Char('a')));
        assert_eq!(state.platform, Platform::Android);
        assert_eq!(state.faq_cursor, landing::faqs(Platform::Android).len() - 1);

        state.handle_key(press(KeyCode::Char('o')));
        assert_eq!(state.platform, Platform::Ios);
    }

    #[test]
    fn enter_toggles_the_faq_under_the_cursor() {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Char('5')));
        let first = landing::faqs(Platform::Ios)[0].question;

        state.handle_key(press(KeyCode::Enter));
        assert!(state.faq_is_open(first));
        state.handle_key(press(KeyCode::Char(' ')));
        assert!(!state.faq_is_open(first));

        // Enter is a no-op outside the FAQ.
        state.handle_key(press(KeyCode::Char('1')));
        state.handle_key(press(KeyCode::Enter));
        assert!(state.open_faqs.is_empty());
    }

    #[test]
    fn privacy_screen_opens_and_returns() {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Char('3')));
        state.handle_key(press(KeyCode::Char('p')));
        assert_eq!(state.screen, Screen::Privacy);
        state.handle_key(press(KeyCode::Down));
        assert_eq!(state.scroll, 1);
        state.handle_key(press(KeyCode::Char('b')));
        assert_eq!(state.screen, Screen::Landing);
        assert_eq!(state.section, Section::Screenshots);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn quit_keys() {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Char('q')));
        assert!(state.should_quit);

        let mut state = UiState::new(Platform::Ios);
        state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }

    #[test]
    fn rules_tab_draws_one_state_at_a_time() -> Result<()> {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Char('4')));

        let mut rules = RulesView::new("en");
        let screen = rendered(&state, &rules)?;
        assert!(screen.contains("Loading rules"));
        assert!(!screen.contains("Failed to load"));

        rules.settle(Ok(resolved(json!({
            "api": { "version": "1.0" },
            "languages": { "en": {
                "content": { "title": "Wakethieving Rules" },
                "rules": [{ "id": "why", "title": "Why This Matters",
                            "content": { "warning": "Keep it legal" } }]
            } }
        }))?));
        let screen = rendered(&state, &rules)?;
        assert!(screen.contains("Why This Matters"));
        assert!(screen.contains("Keep it legal"));
        assert!(screen.contains("offline copy v1.0"));
        assert!(!screen.contains("Loading rules"));
        Ok(())
    }

    #[test]
    fn rules_header_shows_publication_date_and_source() -> Result<()> {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Char('4')));

        let mut rules = RulesView::new("en");
        rules.settle(Ok(resolved(json!({
            "api": { "version": "2.1", "lastUpdated": "2025-05-01T00:00:00Z" },
            "languages": { "en": {
                "content": { "title": "Wakethieving Rules" },
                "ui": { "apiSource": "NextWave API" }
            } }
        }))?));
        let screen = rendered(&state, &rules)?;
        assert!(screen.contains("v2.1 · published 2025-05-01"));
        assert!(screen.contains("Source: NextWave API (offline copy)"));
        Ok(())
    }

    #[test]
    fn missing_version_and_api_source_leave_no_dangling_labels() -> Result<()> {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Char('4')));

        let mut rules = RulesView::new("en");
        rules.settle(Ok(resolved(json!({
            "languages": { "en": { "content": { "title": "Wakethieving Rules" } } }
        }))?));
        let screen = rendered(&state, &rules)?;
        assert!(screen.contains("rules: offline copy"));
        assert!(!screen.contains("offline copy v"));
        assert!(screen.contains("Source: offline copy"));
        assert!(!screen.contains("(offline copy)"));
        Ok(())
    }

    #[test]
    fn unknown_icon_draws_title_without_marker() -> Result<()> {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Char('4')));

        let mut rules = RulesView::new("en");
        rules.settle(Ok(resolved(json!({
            "languages": { "en": {
                "content": { "title": "Wakethieving Rules" },
                "rules": [{ "id": "why", "title": "Why This Matters", "icon": "nope",
                            "content": { "main": "Boats share the lake" } }]
            } },
            "icons": { "distance": "M0 0h24v24H0z" }
        }))?));
        let screen = rendered(&state, &rules)?;
        assert!(screen.contains("│Why This Matters"));
        assert!(!screen.contains("• Why This Matters"));
        assert!(!screen.contains("◆ Why This Matters"));
        Ok(())
    }

    #[test]
    fn missing_language_draws_language_error() -> Result<()> {
        let mut state = UiState::new(Platform::Ios);
        state.handle_key(press(KeyCode::Char('4')));

        let mut rules = RulesView::new("de");
        rules.settle(Ok(resolved(json!({ "languages": { "en": {} } }))?));
        let screen = rendered(&state, &rules)?;
        assert!(screen.contains("Language data error"));
        assert!(!screen.contains("Loading rules"));
        Ok(())
    }

    #[test]
    fn download_tab_marks_google_play_as_coming_soon() -> Result<()> {
        let mut state = UiState::new(Platform::Android);
        state.handle_key(press(KeyCode::Char('6')));
        let screen = rendered(&state, &RulesView::new("en"))?;
        assert!(screen.contains("Get it on Google Play"));
        assert!(screen.contains("coming soon"));
        assert!(screen.contains("Download on the App Store"));
        Ok(())
    }
}
