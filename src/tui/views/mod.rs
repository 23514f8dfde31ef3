// Views module - screen-level rendering
//
// The dashboard is a single screen: title bar, a 2x2 grid of feed panels,
// and the status bar. The toast draws last so it sits on top.

use super::app::App;
use crate::feeds::FeedKind;
use crate::tui::components;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let screen = f.area();
    let [title_area, grid_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(3),
    ])
    .areas(screen);

    components::render_title(f, title_area, app);
    render_grid(f, grid_area, app);
    components::render_status(f, status_area, app);

    if let Some(toast) = &app.toast {
        toast.render(f, screen, &app.theme);
    }
}

/// Tickers and news on top, GitHub and Hacker News below
fn render_grid(f: &mut Frame, area: Rect, app: &mut App) {
    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let halves = || Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]);
    let [top_left, top_right] = halves().areas(top);
    let [bottom_left, bottom_right] = halves().areas(bottom);

    let clock = app.clock();
    let focused = app.focused;
    let theme = app.theme.clone();

    app.tickers.render(
        f,
        top_left,
        focused == FeedKind::Tickers,
        &theme,
        &clock,
    );
    app.news
        .render(f, top_right, focused == FeedKind::News, &theme, &clock);
    app.github
        .render(f, bottom_left, focused == FeedKind::Github, &theme, &clock);
    app.hackernews.render(
        f,
        bottom_right,
        focused == FeedKind::HackerNews,
        &theme,
        &clock,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DEFAULT_BACKEND_URL};
    use crate::feeds::FeedClient;
    use crate::logging::LogBuffer;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    async fn demo_app() -> App {
        let client = FeedClient::new(DEFAULT_BACKEND_URL, true).unwrap();
        let config = Config {
            demo_mode: true,
            ..Config::default()
        };
        App::new(&config, &client, LogBuffer::new()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_shows_loading_before_first_fetch() {
        let mut app = demo_app().await;
        app.tick(Instant::now());

        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("tickerdash"));
        assert!(text.contains("[DEMO]"));
        assert!(text.contains("Loading Markets"));
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_shows_first_page_with_controls() {
        let mut app = demo_app().await;
        tokio::time::sleep(Duration::from_millis(600)).await;
        app.tick(Instant::now());

        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("SPY"));
        assert!(!text.contains("IAU"));
        assert!(text.contains("Page 1 of 2"));
        assert!(text.contains("market bullish"));
        app.shutdown();
    }
}
