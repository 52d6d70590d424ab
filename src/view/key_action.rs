//! Viewer actions independent of key bindings.

/// What the user wants the feed viewer to do.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `FeedAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedAction {
    // Scrolling
    /// Scroll up one row. Default: k/↑
    ScrollUp,
    /// Scroll down one row; at the bottom this loads the next page. Default: j/↓
    ScrollDown,
    /// Scroll up one viewport. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down one viewport. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first row. Default: g/Home
    ScrollToTop,
    /// Jump to the last row. Default: G/End
    ScrollToBottom,

    // Selection
    /// Select the next card in feed order. Default: Tab/n
    SelectNext,
    /// Select the previous card in feed order. Default: Shift+Tab/p
    SelectPrev,

    // Feed
    /// Re-read the feed file and go back to the first page. Default: r
    Refresh,
    /// Reveal the next page of cards. Default: L
    LoadMore,

    // Layout
    /// Add a column. Default: +/=
    MoreColumns,
    /// Remove a column (never below one). Default: -
    FewerColumns,

    /// Exit the viewer. Default: q
    Quit,
}
