use crate::action::Action;
use greeter_core::Component;
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// The committed greeting, large and centered
pub struct GreetingHeading;

pub struct GreetingHeadingProps<'a> {
    pub greeting: &'a str,
}

impl GreetingHeading {
    pub const HEIGHT: u16 = 1;
}

impl Component<Action> for GreetingHeading {
    type Props<'a> = GreetingHeadingProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = Line::from(props.greeting)
            .style(Style::default().fg(Color::White).bold())
            .centered();
        frame.render_widget(Paragraph::new(line), area);
    }
}
