pub mod bars;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use brewguide::{cue::SoundMode, input, session::Session, text};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 3;
const VERTICAL_MARGIN: u16 = 1;

/// Frame title: the chosen path and its parameters so far.
pub fn header(session: &Session) -> String {
    let Some(method) = session.method() else {
        return " brewguide ".to_string();
    };

    let mut parts = vec![text::method_label(method).to_string()];
    if let Some(shot) = session.shot_size() {
        parts.push(text::shot_label(shot).to_string());
    }
    if session.gram_range().is_some() {
        if method == brewguide::recipe::Method::Filter {
            parts.push(text::cups_label(session.cup_count()));
        }
        parts.push(format!("{} г", session.grams()));
    }
    format!(" brewguide · {} ", parts.join(" · "))
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.guide.session();
        let step = session.step();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let title_style = Style::default()
            .patch(bold_style)
            .fg(Color::Rgb(67, 40, 24));
        let italic_style = Style::default()
            .add_modifier(Modifier::ITALIC)
            .add_modifier(Modifier::DIM);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(header(session))
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        block.render(area, buf);

        let screen = screen::current_screen(step);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),                   // title
                Constraint::Min(1),                      // instructions
                Constraint::Length(screen.height(self)), // step controls
                Constraint::Length(1),                   // padding
                Constraint::Length(1),                   // legend
            ])
            .split(inner);

        Paragraph::new(Span::styled(text::title(step), title_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        let body = text::body(session)
            .into_iter()
            .flat_map(|para| [Line::from(para), Line::default()])
            .collect::<Vec<_>>();
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        screen.render(self, chunks[2], buf);

        let legend = if self.sound == SoundMode::Off {
            format!("{} · звук выкл.", input::legend(step))
        } else {
            input::legend(step).to_string()
        };
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewguide::{
        cue::NullCueSink,
        guide::Guide,
        recipe::{Method, ShotSize},
        scheduler::IntervalScheduler,
    };
    use ratatui::{buffer::Buffer, layout::Rect};

    fn create_test_app() -> App {
        App {
            guide: Guide::new(IntervalScheduler::every_second(), Box::new(NullCueSink)),
            sound: SoundMode::Finish,
        }
    }

    fn rendered(app: &App) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_start_screen_lists_methods() {
        let app = create_test_app();
        let out = rendered(&app);
        assert!(out.contains("brewguide"));
        assert!(out.contains("Эспрессо"));
        assert!(out.contains("Колд-брю"));
    }

    #[test]
    fn test_slider_screen_shows_bounds() {
        let mut app = create_test_app();
        app.guide.select_method(Method::Filter);
        app.guide.select_cup_count(2);
        let out = rendered(&app);
        assert!(out.contains("20 г … 40 г"));
        assert!(out.contains("320 мл"));
    }

    #[test]
    fn test_countdown_shows_progress() {
        let mut app = create_test_app();
        app.guide.select_method(Method::Espresso);
        app.guide.select_shot(ShotSize::Double);
        app.guide.confirm_and_brew();
        app.guide.tick();
        let out = rendered(&app);
        assert!(out.contains("0:29"));
        assert!(out.contains('░'));
    }

    #[test]
    fn test_small_area_does_not_panic() {
        let mut app = create_test_app();
        app.guide.select_method(Method::ColdBrew);
        let area = Rect::new(0, 0, 12, 4);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert!(*buffer.area() == area);
    }

    #[test]
    fn test_header_describes_choices() {
        let mut app = create_test_app();
        assert_eq!(header(app.guide.session()), " brewguide ");
        app.guide.select_method(Method::Filter);
        app.guide.select_cup_count(3);
        assert_eq!(
            header(app.guide.session()),
            " brewguide · Фильтр · 3 чашки · 20 г "
        );
    }
}
