//! Terminal feed viewer (impure shell)
//!
//! [`FeedApp`] owns the terminal and forwards keyboard, mouse and resize
//! events to [`FeedViewState`], which holds everything testable.

pub mod key_action;
pub mod keybindings;
pub mod provider;
pub mod render;
pub mod state;

pub use key_action::FeedAction;
pub use keybindings::KeyBindings;
pub use provider::FeedMetrics;
pub use render::{ColorConfig, FeedStyles, STATUS_ROWS};
pub use state::{FeedViewState, ViewSettings};

use crate::config::ResolvedConfig;
use crate::error::AppError;
use crate::feed::{load_feed, FeedCard};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: isize = 3;

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct FeedApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: FeedViewState,
    key_bindings: KeyBindings,
    styles: FeedStyles,
    feed_path: Option<PathBuf>,
}

impl FeedApp<CrosstermBackend<Stdout>> {
    /// Create and initialize the viewer on stdout
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(
        cards: Vec<FeedCard>,
        settings: ViewSettings,
        feed_path: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Self::with_terminal(terminal, cards, settings, feed_path, FeedStyles::default())
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.draw()?;

        loop {
            let redraw = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    true
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    self.handle_resize(width, height);
                    true
                }
                _ => false,
            };

            if redraw {
                self.draw()?;
            }
        }
    }
}

impl<B> FeedApp<B>
where
    B: Backend,
{
    /// Create the viewer on an already set up terminal.
    ///
    /// The card area is the terminal minus the status bar.
    pub fn with_terminal(
        terminal: Terminal<B>,
        cards: Vec<FeedCard>,
        settings: ViewSettings,
        feed_path: Option<PathBuf>,
        styles: FeedStyles,
    ) -> Result<Self, AppError> {
        let size = terminal.size()?;
        let (width, height) = card_area(size.width, size.height);
        let state = FeedViewState::new(cards, settings, width, height);

        Ok(Self {
            terminal,
            state,
            key_bindings: KeyBindings::default(),
            styles,
            feed_path,
        })
    }

    /// Handle a key press. Returns `true` when the user quits.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "Key action");

        match action {
            FeedAction::Quit => return true,
            FeedAction::ScrollUp => self.state.scroll_by(-1),
            FeedAction::ScrollDown => self.state.scroll_by(1),
            FeedAction::PageUp => self.state.page_up(),
            FeedAction::PageDown => self.state.page_down(),
            FeedAction::ScrollToTop => self.state.scroll_to_top(),
            FeedAction::ScrollToBottom => self.state.scroll_to_bottom(),
            FeedAction::SelectNext => self.state.select_next(),
            FeedAction::SelectPrev => self.state.select_prev(),
            FeedAction::Refresh => self.refresh(),
            FeedAction::LoadMore => {
                self.state.load_more();
            }
            FeedAction::MoreColumns => self.state.more_columns(),
            FeedAction::FewerColumns => self.state.fewer_columns(),
        }
        false
    }

    /// Handle a mouse event. Returns `true` when the screen changed.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if f64::from(mouse.row) >= self.state.layout().bounds().height {
                    return false;
                }
                self.state.select_at(mouse.column, mouse.row);
                true
            }
            MouseEventKind::ScrollDown => {
                self.state.scroll_by(WHEEL_ROWS);
                true
            }
            MouseEventKind::ScrollUp => {
                self.state.scroll_by(-WHEEL_ROWS);
                true
            }
            _ => false,
        }
    }

    /// Handle a terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "Terminal resized");
        let (width, height) = card_area(width, height);
        self.state.resize(width, height);
    }

    /// Re-read the feed file and show its first page.
    ///
    /// Without a feed file, or when reading fails, the current cards are
    /// kept and only the view returns to the first page.
    pub fn refresh(&mut self) {
        let Some(path) = &self.feed_path else {
            self.state.refresh();
            return;
        };

        match load_feed(path) {
            Ok(cards) => {
                info!(cards = cards.len(), path = %path.display(), "Feed reloaded");
                self.state.replace_cards(cards);
            }
            Err(err) => {
                warn!(error = %err, "Feed reload failed");
                self.state.refresh();
                self.state.set_status(format!("Reload failed: {err}"));
            }
        }
    }

    /// Render the current frame.
    pub fn draw(&mut self) -> Result<(), AppError> {
        self.terminal
            .draw(|frame| render::render(frame, &self.state, &self.styles))?;
        Ok(())
    }

    /// Viewer state.
    pub fn state(&self) -> &FeedViewState {
        &self.state
    }

    /// The terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Card area of a terminal of the given size.
fn card_area(width: u16, height: u16) -> (u16, u16) {
    let width = if width > 0 { width } else { 80 };
    (width, height.saturating_sub(STATUS_ROWS))
}

/// Load the feed and run the viewer until the user quits.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(config: &ResolvedConfig, feed_path: PathBuf) -> Result<(), AppError> {
    let settings = ViewSettings::try_from(config)?;
    let cards = load_feed(&feed_path)?;
    info!(cards = cards.len(), path = %feed_path.display(), "Feed loaded");

    let mut app = FeedApp::new(cards, settings, Some(feed_path))?;
    let result = app.run();

    restore_terminal()?;
    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), AppError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
