use crossterm::event::KeyCode;
use greeter_core::{Component, EventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const LABEL: &str = "Change greeting";

pub struct CommitButtonProps<A> {
    pub is_focused: bool,
    /// Whether the staged greeting differs from the committed one
    pub is_armed: bool,
    /// Action for a press (Enter/Space when focused, or a click)
    pub on_press: A,
}

/// Push button that commits the staged greeting
///
/// Remembers where it was last drawn so mouse clicks can be hit-tested.
#[derive(Debug, Default)]
pub struct CommitButton {
    area: Option<Rect>,
}

impl CommitButton {
    pub const HEIGHT: u16 = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Width that fits the label plus borders and padding
    pub fn width() -> u16 {
        LABEL.len() as u16 + 4
    }

    /// Area of the last render, if rendered
    pub fn area(&self) -> Option<Rect> {
        self.area
    }
}

impl<A> Component<A> for CommitButton {
    type Props<'a> = CommitButtonProps<A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let pressed = match event {
            EventKind::Key(key) if props.is_focused => {
                matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            }
            EventKind::Mouse(_) => self.area.is_some_and(|area| event.is_click_in(area)),
            _ => false,
        };

        pressed.then_some(props.on_press)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.area = Some(area);

        let (label_style, border_style) = match (props.is_focused, props.is_armed) {
            (true, _) => (
                Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
                Style::default().fg(Color::Cyan),
            ),
            (false, true) => (
                Style::default().fg(Color::Cyan).bold(),
                Style::default().fg(Color::Blue),
            ),
            (false, false) => (
                Style::default().fg(Color::Gray),
                Style::default().fg(Color::DarkGray),
            ),
        };

        let button = Paragraph::new(LABEL)
            .style(label_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        frame.render_widget(button, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_core::testing::{char_key, click, key, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Press,
    }

    fn props(is_focused: bool) -> CommitButtonProps<TestAction> {
        CommitButtonProps {
            is_focused,
            is_armed: true,
            on_press: TestAction::Press,
        }
    }

    fn handle(button: &mut CommitButton, event: EventKind, is_focused: bool) -> Vec<TestAction> {
        button
            .handle_event(&event, props(is_focused))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_enter_and_space_press_when_focused() {
        let mut button = CommitButton::new();

        assert_eq!(
            handle(&mut button, EventKind::Key(key("enter")), true),
            vec![TestAction::Press]
        );
        assert_eq!(
            handle(&mut button, EventKind::Key(key("space")), true),
            vec![TestAction::Press]
        );
        assert!(handle(&mut button, EventKind::Key(char_key('x')), true).is_empty());
    }

    #[test]
    fn test_keys_ignored_when_unfocused() {
        let mut button = CommitButton::new();
        assert!(handle(&mut button, EventKind::Key(key("enter")), false).is_empty());
    }

    #[test]
    fn test_click_inside_last_area() {
        let mut button = CommitButton::new();
        let mut render = RenderHarness::new(40, 6);
        render.render(|frame| {
            button.render(frame, Rect::new(5, 2, CommitButton::width(), 3), props(false));
        });

        assert_eq!(
            handle(&mut button, EventKind::Mouse(click(6, 3)), false),
            vec![TestAction::Press]
        );
        assert!(handle(&mut button, EventKind::Mouse(click(1, 1)), false).is_empty());
    }

    #[test]
    fn test_click_before_first_render_ignored() {
        let mut button = CommitButton::new();
        assert!(handle(&mut button, EventKind::Mouse(click(0, 0)), true).is_empty());
    }

    #[test]
    fn test_renders_label() {
        let mut button = CommitButton::new();
        let mut render = RenderHarness::new(CommitButton::width(), CommitButton::HEIGHT);

        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            button.render(frame, area, props(true));
        });

        assert!(output.contains(LABEL));
    }
}
