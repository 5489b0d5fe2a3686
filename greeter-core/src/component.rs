//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and turns events into actions
///
/// Components follow these rules:
/// 1. Props carry all read-only data needed for rendering
/// 2. `handle_event` returns actions and never touches the store
/// 3. `render` is a function of props plus internal UI state
///
/// Internal UI state (cursor position, last rendered area) can live in
/// `&mut self`. Anything the rest of the app reads goes through actions.
///
/// Focus is passed through `Props`, so components stay independent of how the
/// application tracks it.
///
/// # Example
///
/// ```ignore
/// struct Title;
///
/// struct TitleProps<'a> {
///     text: &'a str,
/// }
///
/// impl Component<Action> for Title {
///     type Props<'a> = TitleProps<'a>;
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(props.text), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any `IntoIterator<Item = A>`: `None`, `Some(action)`, or a
    /// collection. The default returns nothing (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
