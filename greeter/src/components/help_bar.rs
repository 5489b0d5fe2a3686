use crate::action::Action;
use greeter_core::{format_key_for_display, Component, Keybindings};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Commands shown in the help bar, with their labels
const HINTS: &[(&str, &str)] = &[
    ("focus_next", "switch"),
    ("commit", "change greeting"),
    ("quit", "quit"),
];

pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub keybindings: &'a Keybindings,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let spans: Vec<Span> = HINTS
            .iter()
            .filter_map(|(command, label)| {
                let key = props.keybindings.get_first_keybinding(command)?;
                Some([
                    Span::styled(
                        format!(" {}", format_key_for_display(key)),
                        Style::default().fg(Color::Cyan).bold(),
                    ),
                    Span::styled(format!(" {} ", label), Style::default().fg(Color::DarkGray)),
                ])
            })
            .flatten()
            .collect();

        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_core::testing::RenderHarness;

    #[test]
    fn test_shows_bound_commands() {
        let bindings = Keybindings::new()
            .with("quit", &["esc"])
            .with("commit", &["ctrl+s"])
            .with("focus_next", &["tab"]);
        let mut help = HelpBar;
        let mut render = RenderHarness::new(60, 1);

        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            help.render(
                frame,
                area,
                HelpBarProps {
                    keybindings: &bindings,
                },
            );
        });

        assert!(output.contains("Tab switch"));
        assert!(output.contains("^S change greeting"));
        assert!(output.contains("Esc quit"));
    }

    #[test]
    fn test_skips_unbound_commands() {
        let bindings = Keybindings::new().with("quit", &["esc"]);
        let mut help = HelpBar;
        let mut render = RenderHarness::new(60, 1);

        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            help.render(
                frame,
                area,
                HelpBarProps {
                    keybindings: &bindings,
                },
            );
        });

        assert!(output.contains("Esc quit"));
        assert!(!output.contains("switch"));
    }
}
