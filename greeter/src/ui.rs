//! Screen layout, focus and event routing
//!
//! Focus is UI-local: it changes what receives keys and how things are drawn,
//! but it is not part of `GreetingState`. Focus changes request a render
//! through `EventOutcome::needs_render` instead of going through the store.

use greeter_core::{EventKind, EventOutcome, Keybindings};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    Frame,
};
use tracing::debug;

use crate::action::Action;
use crate::components::{
    CommitButton, CommitButtonProps, Component, GreetingHeading, GreetingHeadingProps,
    GreetingInput, GreetingInputProps, HelpBar, HelpBarProps, PLACEHOLDER,
};
use crate::state::GreetingState;

/// Width of the centered column holding heading, input and button
const CONTENT_WIDTH: u16 = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    Button,
}

impl Focus {
    /// Two targets, so next and previous are the same move
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::Button,
            Focus::Button => Focus::Input,
        }
    }
}

pub struct GreeterUi {
    focus: Focus,
    keybindings: Keybindings,
    heading: GreetingHeading,
    input: GreetingInput,
    input_area: Option<Rect>,
    button: CommitButton,
    help: HelpBar,
}

impl GreeterUi {
    pub fn new(state: &GreetingState, keybindings: Keybindings) -> Self {
        Self {
            focus: Focus::default(),
            keybindings,
            heading: GreetingHeading,
            input: GreetingInput::at_end(&state.proposed_greeting),
            input_area: None,
            button: CommitButton::new(),
            help: HelpBar,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &GreetingState) {
        let [main, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let [column] = Layout::horizontal([Constraint::Length(CONTENT_WIDTH)])
            .flex(Flex::Center)
            .areas(main);

        let [heading_area, _, input_area, _, button_row] = Layout::vertical([
            Constraint::Length(GreetingHeading::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(CommitButton::HEIGHT),
        ])
        .flex(Flex::Center)
        .areas(column);

        let [button_area] = Layout::horizontal([Constraint::Length(CommitButton::width())])
            .flex(Flex::Center)
            .areas(button_row);

        self.heading.render(
            frame,
            heading_area,
            GreetingHeadingProps {
                greeting: &state.greeting,
            },
        );

        self.input_area = Some(input_area);
        let input_props = self.input_props(state);
        self.input.render(frame, input_area, input_props);

        let button_props = self.button_props(state);
        self.button.render(frame, button_area, button_props);

        self.help.render(
            frame,
            help_area,
            HelpBarProps {
                keybindings: &self.keybindings,
            },
        );
    }

    pub fn map_event(&mut self, event: &EventKind, state: &GreetingState) -> EventOutcome<Action> {
        match event {
            EventKind::Resize(_, _) => return EventOutcome::needs_render(),
            // Ctrl+C quits even when the quit binding was changed
            EventKind::Key(_) if event.is_global() => return EventOutcome::action(Action::Quit),
            EventKind::Key(key) => {
                if let Some(outcome) = self.handle_command(*key) {
                    return outcome;
                }
            }
            EventKind::Mouse(_) => return self.handle_mouse(event, state),
        }

        match self.focus {
            Focus::Input => {
                let props = self.input_props(state);
                EventOutcome::from_actions(self.input.handle_event(event, props))
                    // Cursor movement emits nothing but still moves the cursor
                    .with_render()
            }
            Focus::Button => {
                let props = self.button_props(state);
                EventOutcome::from_actions(self.button.handle_event(event, props))
            }
        }
    }

    fn handle_command(&mut self, key: crossterm::event::KeyEvent) -> Option<EventOutcome<Action>> {
        let command = self.keybindings.get_command(key)?;
        debug!(command, "Keybinding matched");

        let outcome = match command {
            "quit" => EventOutcome::action(Action::Quit),
            "commit" => EventOutcome::action(Action::GreetingCommit),
            "focus_next" | "focus_prev" => {
                self.focus = self.focus.toggle();
                EventOutcome::needs_render()
            }
            _ => return None,
        };
        Some(outcome)
    }

    fn handle_mouse(&mut self, event: &EventKind, state: &GreetingState) -> EventOutcome<Action> {
        let props = self.button_props(state);
        let actions: Vec<Action> = self.button.handle_event(event, props).into_iter().collect();
        if !actions.is_empty() {
            self.focus = Focus::Button;
            return EventOutcome::from_actions(actions).with_render();
        }

        if self.input_area.is_some_and(|area| event.is_click_in(area)) {
            self.focus = Focus::Input;
            return EventOutcome::needs_render();
        }

        EventOutcome::ignored()
    }

    fn input_props<'a>(&self, state: &'a GreetingState) -> GreetingInputProps<'a, Action> {
        GreetingInputProps {
            value: &state.proposed_greeting,
            placeholder: PLACEHOLDER,
            is_focused: self.focus == Focus::Input,
            on_change: |greeting| Action::GreetingStage { greeting },
            on_submit: Action::GreetingCommit,
        }
    }

    fn button_props(&self, state: &GreetingState) -> CommitButtonProps<Action> {
        CommitButtonProps {
            is_focused: self.focus == Focus::Button,
            is_armed: state.has_pending_change(),
            on_press: Action::GreetingCommit,
        }
    }
}
