//! Interactive widget trait extending ratatui's `StatefulWidget`.

use ratatui::widgets::StatefulWidget;

use super::KeyEvent;

/// A `StatefulWidget` whose state can also react to key presses.
///
/// The widget value is rebuilt every frame from borrowed app data; the state
/// lives in the app and survives between frames.
///
/// ```ignore
/// impl InteractiveStatefulWidget for SearchBarWidget<'_> {
///     fn handle_key(state: &mut SearchBar, key: KeyEvent) -> bool {
///         // edit the query, return true if the key was consumed
///     }
/// }
/// ```
pub trait InteractiveStatefulWidget: StatefulWidget {
    /// Handle a key press. Returns true if the key was consumed.
    fn handle_key(_state: &mut Self::State, _key: KeyEvent) -> bool {
        false
    }
}
