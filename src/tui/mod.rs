// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, focus changes, timer ticks)
// - Rendering the dashboard
//
// Feed data arrives through watch channels owned by each panel; the tick
// pulls the latest snapshots and fires paging timers.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod items;
pub mod panel;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::feeds::FeedClient;
use crate::logging::LogBuffer;
use crate::paging::NavAction;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until quit, then restores the
/// terminal and stops every feed task.
pub async fn run_tui(config: Config, log_buffer: LogBuffer, client: FeedClient) -> Result<()> {
    // Panels first, so a bad config fails before the screen is taken over
    let mut app = App::new(&config, &client, log_buffer)?;

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    tracing::info!(
        backend = %config.backend_url,
        demo = config.demo_mode,
        "dashboard started"
    );

    let tick = Duration::from_millis(config.tick_ms);
    let result = run_event_loop(&mut terminal, &mut app, tick).await;

    app.shutdown();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on either terminal input or the periodic tick. The tick drives
/// everything time-based: snapshot sync, rotation, transitions and toast
/// expiry.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);
    app.tick(Instant::now());

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input and focus changes
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event, Instant::now()),
                        Ok(Event::FocusGained) => app.focus_gained(),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
///
/// Global keys first, then actions on the focused panel.
fn handle_key_event(app: &mut App, key_event: KeyEvent, now: Instant) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Focus
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),

        // Paging
        KeyCode::Left | KeyCode::Char('h') => {
            app.navigate(NavAction::Previous, now);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.navigate(NavAction::Next, now);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.navigate(NavAction::First, now);
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.navigate(NavAction::Last, now);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let page = c.to_digit(10).map_or(1, |d| d as usize);
            app.navigate(NavAction::Goto(page), now);
        }

        // Row selection
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),

        // Actions
        KeyCode::Char('y') | KeyCode::Enter => app.copy_selected_link(now),
        KeyCode::Char('r') => app.refresh_focused(),
        KeyCode::Char('R') => app.reconnect_all(now),
        KeyCode::Char('v') => {
            if !app.toggle_ticker_layout(now) {
                tracing::trace!("layout toggle ignored: no card layout");
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BACKEND_URL;
    use crate::feeds::FeedKind;
    use crate::tui::panel::PanelLayout;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn ready_app() -> App {
        let client = FeedClient::new(DEFAULT_BACKEND_URL, true).unwrap();
        let config = Config {
            demo_mode: true,
            ..Config::default()
        };
        let mut app = App::new(&config, &client, LogBuffer::new()).unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        app.tick(Instant::now());
        app
    }

    #[tokio::test(start_paused = true)]
    async fn test_arrow_keys_page_the_focused_panel() {
        let mut app = ready_app().await;
        let now = Instant::now();

        handle_key_event(&mut app, press(KeyCode::Right), now);
        assert_eq!(app.tickers.state().current_page, 2);
        assert_eq!(app.news.state().current_page, 1);

        // Already on the last page
        handle_key_event(&mut app, press(KeyCode::Right), now);
        assert_eq!(app.tickers.state().current_page, 2);

        handle_key_event(&mut app, press(KeyCode::Home), now);
        assert_eq!(app.tickers.state().current_page, 1);
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_digit_jumps_and_clamps() {
        let mut app = ready_app().await;
        let now = Instant::now();
        app.focused = FeedKind::News;

        // 12 stories, 5 per page
        handle_key_event(&mut app, press(KeyCode::Char('9')), now);
        assert_eq!(app.news.state().current_page, 3);
        handle_key_event(&mut app, press(KeyCode::Char('2')), now);
        assert_eq!(app.news.state().current_page, 2);
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_cycles_focus() {
        let mut app = ready_app().await;
        let now = Instant::now();
        assert_eq!(app.focused, FeedKind::Tickers);

        for expected in [
            FeedKind::News,
            FeedKind::Github,
            FeedKind::HackerNews,
            FeedKind::Tickers,
        ] {
            handle_key_event(&mut app, press(KeyCode::Tab), now);
            assert_eq!(app.focused, expected);
        }
        handle_key_event(&mut app, press(KeyCode::BackTab), now);
        assert_eq!(app.focused, FeedKind::HackerNews);
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_layout_toggle_keeps_page() {
        let mut app = ready_app().await;
        let now = Instant::now();

        handle_key_event(&mut app, press(KeyCode::Right), now);
        handle_key_event(&mut app, press(KeyCode::Char('v')), now);
        assert_eq!(app.tickers.layout(), PanelLayout::Cards);
        assert_eq!(app.tickers.state().current_page, 2);

        handle_key_event(&mut app, press(KeyCode::Char('v')), now);
        assert_eq!(app.tickers.layout(), PanelLayout::List);
        assert_eq!(app.tickers.state().current_page, 2);
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cursor_resets_on_page_change() {
        let mut app = ready_app().await;
        let now = Instant::now();

        handle_key_event(&mut app, press(KeyCode::Down), now);
        handle_key_event(&mut app, press(KeyCode::Down), now);
        assert_eq!(app.tickers.cursor(), 2);
        assert_eq!(app.tickers.selected().map(|t| t.ticker.as_str()), Some("VTI"));

        handle_key_event(&mut app, press(KeyCode::Right), now);
        assert_eq!(app.tickers.cursor(), 0);
        // Page 2 holds two tickers; the cursor cannot leave it
        for _ in 0..5 {
            handle_key_event(&mut app, press(KeyCode::Down), now);
        }
        assert_eq!(app.tickers.cursor(), 1);
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_events_are_ignored() {
        let mut app = ready_app().await;
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;

        handle_key_event(&mut app, key, Instant::now());
        assert!(!app.should_quit);

        handle_key_event(&mut app, press(KeyCode::Char('q')), Instant::now());
        assert!(app.should_quit);
        app.shutdown();
    }
}
