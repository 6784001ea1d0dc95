use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{FrameBody, FrameList, FrameListItem, TitleBar};
use crate::tui::host::TerminalFullscreen;

const HELP_TEXT: &str =
    "↑↓ select  PgUp/Dn scroll  f full  e edit  c fold  d discard  Enter use  q quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, host: &TerminalFullscreen) {
    // A fullscreen surface covers the whole terminal
    if let Some(surface) = host.active_surface()
        && let Some(idx) = tui.frame_list.index_of_surface(surface)
        && let Some(data) = app.frames.get(idx)
    {
        let area = frame.area();
        let collapsed = tui.frame_list.is_collapsed(&data.id);
        if let Some(item) = tui.frame_list.item_by_instance_mut(surface.instance()) {
            let (content, visible) = if collapsed {
                (0, 0)
            } else {
                (
                    FrameBody::calculate_height(data, area.width.saturating_sub(2)),
                    area.height.saturating_sub(3),
                )
            };
            item.set_body_extent(content, visible);
        }
        let item = &tui.frame_list.items()[idx];
        frame.render_widget(FrameListItem::with_body(item, data, collapsed), area);
        return;
    }

    use Constraint::{Length, Min};
    let [title_area, list_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar::new(
        app.frames.len(),
        app.status_message.clone(),
        app.selected_query.clone(),
    )
    .render(frame, title_area);

    FrameList::new(&mut tui.frame_list, &app.frames).render(frame, list_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frame::QueryFrame;
    use crate::core::fullscreen::{FullscreenControl, FullscreenRegistry};
    use crate::test_support::{buffer_text, sample_frames};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState, host: &TerminalFullscreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, host)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn draws_title_list_and_help() {
        let registry = FullscreenRegistry::new();
        let app = App::new(sample_frames());
        let mut tui = TuiState::new();
        tui.frame_list.sync_items(&app.frames, &registry);

        let text = draw(&app, &mut tui, &TerminalFullscreen::new(true));

        assert!(text.contains("framedeck (3 frames)"));
        assert!(text.contains("people(func: has(name))"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn fullscreen_body_scrolls_past_terminal_height() {
        let registry = FullscreenRegistry::new();
        let response = (1..=40).map(|n| format!("row {n}")).collect::<Vec<_>>().join("\n");
        let frames = vec![QueryFrame {
            id: "tall".to_string(),
            response: Some(response),
            ..QueryFrame::new("{ tall }")
        }];
        let app = App::new(frames);
        let mut tui = TuiState::new();
        tui.frame_list.sync_items(&app.frames, &registry);
        let mut host = TerminalFullscreen::new(true);
        host.request(tui.frame_list.items()[0].surface());

        let text = draw(&app, &mut tui, &host);
        assert!(text.contains("row 1 "));
        assert!(!text.contains("row 40"));

        // 24 rows: border + header leave 21 visible, 19 hidden
        for _ in 0..3 {
            if let Some(item) = tui.frame_list.selected_item_mut() {
                item.scroll_body_down();
            }
        }
        let text = draw(&app, &mut tui, &host);
        assert!(text.contains("row 40"));
        assert!(!text.contains("row 1 "));
        assert_eq!(tui.frame_list.items()[0].body_scroll(), 19);
    }

    #[test]
    fn fullscreen_surface_hides_everything_else() {
        let registry = FullscreenRegistry::new();
        let app = App::new(sample_frames());
        let mut tui = TuiState::new();
        tui.frame_list.sync_items(&app.frames, &registry);
        let mut host = TerminalFullscreen::new(true);
        host.request(tui.frame_list.items()[2].surface());

        let text = draw(&app, &mut tui, &host);

        assert!(text.contains("Success"));
        assert!(!text.contains("framedeck ("));
        assert!(!text.contains("people(func: has(name))"));
    }
}
