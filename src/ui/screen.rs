use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use brewguide::{
    session::{Phase, Step},
    text,
};

use crate::{ui::bars, App};

/// The interactive part of a step, drawn between the instructions and the
/// key legend.
pub trait Screen {
    /// Rows this screen needs for the current session.
    fn height(&self, app: &App) -> u16;
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Numbered choices: methods, shot sizes, cup counts.
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn height(&self, app: &App) -> u16 {
        text::options(app.guide.session().step()).len() as u16
    }

    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = app.guide.session();
        let step = session.step();
        let chosen = (step == Step::FilterCups).then_some(session.cup_count());
        let dim = Style::default().add_modifier(Modifier::DIM);

        let lines = text::options(step)
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let number = idx + 1;
                let style = if chosen.map(usize::from) == Some(number) {
                    Style::default()
                        .fg(Color::Rgb(156, 102, 68))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Line::from(vec![
                    Span::styled(format!("({number}) "), dim),
                    Span::styled(label.to_string(), style),
                ])
            })
            .collect::<Vec<_>>();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Gram slider for the filter and cold brew paths.
pub struct SliderScreen;

impl Screen for SliderScreen {
    fn height(&self, _app: &App) -> u16 {
        2
    }

    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = app.guide.session();
        let Some(range) = session.gram_range() else {
            return;
        };

        let width = area.width.min(40);
        let track = bars::slider_line(range.fraction(session.grams()), width);
        let bounds = format!("{} г … {} г", range.min, range.max);

        let track_style = Style::default().fg(Color::Rgb(127, 85, 57));
        let bounds_style = Style::default().add_modifier(Modifier::DIM);

        Paragraph::new(vec![
            Line::from(Span::styled(track, track_style)),
            Line::from(Span::styled(bounds, bounds_style)),
        ])
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

/// Progress bar while a countdown runs; empty otherwise.
pub struct CountdownScreen;

impl Screen for CountdownScreen {
    fn height(&self, app: &App) -> u16 {
        match app.guide.session().phase() {
            Phase::Brewing { .. } => 2,
            Phase::Prepare | Phase::Done => 0,
        }
    }

    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let Phase::Brewing { remaining, progress } = app.guide.session().phase() else {
            return;
        };

        let width = area.width.min(40);
        Paragraph::new(vec![
            Line::from(Span::styled(
                bars::progress_line(progress, width),
                Style::default().fg(Color::Rgb(156, 102, 68)),
            )),
            Line::from(Span::styled(
                bars::format_seconds(remaining),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

/// Steps with nothing to interact with.
pub struct StaticScreen;

impl Screen for StaticScreen {
    fn height(&self, _app: &App) -> u16 {
        0
    }

    fn render(&self, _app: &App, _area: Rect, _buf: &mut Buffer) {}
}

/// Helper to construct the appropriate screen for the current step
pub fn current_screen(step: Step) -> Box<dyn Screen> {
    match step {
        Step::Start | Step::EspressoShot | Step::FilterCups => Box::new(MenuScreen),
        Step::FilterSlider | Step::ColdbrewGrams => Box::new(SliderScreen),
        Step::EspressoInstruction | Step::FilterBrew => Box::new(CountdownScreen),
        Step::FilterReady | Step::ColdbrewInstruction => Box::new(StaticScreen),
    }
}
