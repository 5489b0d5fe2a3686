//! Single-line text input bound to the staged greeting

use crossterm::event::{KeyCode, KeyModifiers};
use greeter_core::{Component, EventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const PLACEHOLDER: &str = "Greeting...";

/// Props for GreetingInput
pub struct GreetingInputProps<'a, A> {
    /// Current input value (the staged greeting)
    pub value: &'a str,
    /// Placeholder text when empty
    pub placeholder: &'a str,
    /// Whether this component has focus
    pub is_focused: bool,
    /// Builds the action for an edited value
    pub on_change: fn(String) -> A,
    /// Action for Enter
    pub on_submit: A,
}

/// A single-line text input with cursor
///
/// Every edit emits `on_change` with the whole new value, so the store always
/// holds what is on screen. Enter emits `on_submit`.
#[derive(Debug, Default)]
pub struct GreetingInput {
    /// Cursor position (byte index into the value)
    cursor: usize,
}

impl GreetingInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the cursor after the last character of `value`
    pub fn at_end(value: &str) -> Self {
        Self {
            cursor: value.len(),
        }
    }

    /// Cursor position as a byte index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Keep the cursor on a char boundary inside `value`
    fn clamp_cursor(&mut self, value: &str) {
        if self.cursor > value.len() || !value.is_char_boundary(self.cursor) {
            self.cursor = value.len();
        }
    }

    fn move_cursor_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_cursor_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    /// Backspace
    fn delete_char_before(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let new_value = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(new_value)
    }

    /// Delete
    fn delete_char_at(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }
}

impl<A: Clone> Component<A> for GreetingInput {
    type Props<'a> = GreetingInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }

        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                // Ctrl+U: clear line
                KeyCode::Char('u') if !props.value.is_empty() => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let new_value = self.insert_char(props.value, c);
                Some((props.on_change)(new_value))
            }
            KeyCode::Backspace => self
                .delete_char_before(props.value)
                .map(props.on_change),
            KeyCode::Delete => self.delete_char_at(props.value).map(props.on_change),
            KeyCode::Left => {
                self.move_cursor_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_cursor_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter => Some(props.on_submit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        // Scroll so the cursor stays inside the borders
        let inner_width = usize::from(area.width.saturating_sub(2));
        let column = props.value[..self.cursor].chars().count();
        let scroll = column.saturating_sub(inner_width.saturating_sub(1));

        let visible: String;
        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            visible = props.value.chars().skip(scroll).collect();
            (visible.as_str(), Style::default())
        };

        let border_style = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let paragraph = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        frame.render_widget(paragraph, area);

        if props.is_focused && inner_width > 0 {
            let offset = u16::try_from(column - scroll).unwrap_or(u16::MAX);
            let cursor_x = area.x.saturating_add(1).saturating_add(offset);
            let cursor_y = area.y.saturating_add(1);
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}
