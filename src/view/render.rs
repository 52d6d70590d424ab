//! Drawing the feed.
//!
//! Each visible element is drawn at full size into its own scratch
//! [`Buffer`] and then copied into the frame row by row, so a card cut by
//! the top or bottom edge of the viewport is clipped instead of squashed.

use super::state::FeedViewState;
use crate::card::CardLayout;
use crate::layout::{ElementKind, LayoutAttributes};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect as CellRect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};
use ratatui::Frame;

/// Rows reserved for the status bar.
pub const STATUS_ROWS: u16 = 1;

const HINT: &str = "j/k scroll · click/Tab select · r refresh · L more · +/- columns · q quit";

/// Whether colors are used.
///
/// Disabled by the `NO_COLOR` environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Colors on unless `NO_COLOR` is set.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicit setting.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

/// Styles of the feed viewer.
#[derive(Debug, Clone, Copy)]
pub struct FeedStyles {
    border: Style,
    selected_border: Style,
    title: Style,
    chip: Style,
    date: Style,
    banner: Style,
    status: Style,
}

impl FeedStyles {
    /// Styles for the given color setting.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.enabled {
            Self {
                border: Style::default().fg(Color::DarkGray),
                selected_border: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                title: bold,
                chip: Style::default().fg(Color::Black).bg(Color::Cyan),
                date: Style::default().fg(Color::Gray),
                banner: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                status: Style::default().add_modifier(Modifier::REVERSED),
            }
        } else {
            Self {
                border: Style::default(),
                selected_border: bold,
                title: bold,
                chip: Style::default().add_modifier(Modifier::REVERSED),
                date: Style::default(),
                banner: bold,
                status: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for FeedStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }
}

/// Split the terminal area into the card area and the status bar.
pub fn split(area: CellRect) -> (CellRect, CellRect) {
    let [cards, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_ROWS)]).areas(area);
    (cards, status)
}

/// Draw the whole viewer into `frame`.
pub fn render(frame: &mut Frame, state: &FeedViewState, styles: &FeedStyles) {
    let (cards, status) = split(frame.area());
    render_feed(frame.buffer_mut(), cards, state, styles);
    render_status(frame.buffer_mut(), status, state, styles);
}

/// Draw the visible elements into `area` of `buf`.
pub fn render_feed(buf: &mut Buffer, area: CellRect, state: &FeedViewState, styles: &FeedStyles) {
    let scroll = state.scroll_offset() as f64;
    let card_width = state.card_width();

    for element in state.visible_elements() {
        let Some((x, width, height)) = cell_extent(element, card_width) else {
            continue;
        };
        let top = (element.frame.y - scroll).round() as i64;

        let mut scratch = Buffer::empty(CellRect::new(0, 0, width, height));
        match element.kind {
            ElementKind::Item => {
                let Some(index) = element.item else { continue };
                let Some(card) = state.card_layout(index) else { continue };
                let selected = state.selected() == Some(index);
                draw_card(&mut scratch, &card, selected, styles);
            }
            ElementKind::Header => draw_banner(&mut scratch, &state.header_text(), styles),
            ElementKind::Footer => draw_banner(&mut scratch, state.footer_text(), styles),
        }

        blit(&scratch, buf, area, x, top);
    }
}

/// Horizontal start, width and height of an element in cells.
///
/// Cards are drawn `card_width` wide, the width their content was wrapped
/// for, so only their start column is rounded.
fn cell_extent(element: &LayoutAttributes, card_width: u16) -> Option<(u16, u16, u16)> {
    let x0 = element.frame.min_x().round();
    let width = match element.kind {
        ElementKind::Item => f64::from(card_width),
        ElementKind::Header | ElementKind::Footer => element.frame.width.floor(),
    };
    let height = element.frame.height.round();
    if width <= 0.0 || height <= 0.0 || x0 > f64::from(u16::MAX) {
        return None;
    }
    let clamp = |v: f64| v.min(f64::from(u16::MAX)) as u16;
    Some((clamp(x0), clamp(width), clamp(height)))
}

/// Copy `src` into `area` of `dst`, its top-left at (`x`, `top`) relative to
/// `area`. Rows and columns outside `area` are dropped.
fn blit(src: &Buffer, dst: &mut Buffer, area: CellRect, x: u16, top: i64) {
    for row in 0..src.area.height {
        let y = top + i64::from(row);
        if y < 0 || y >= i64::from(area.height) {
            continue;
        }
        let y = area.y + y as u16;

        for col in 0..src.area.width {
            let dx = u32::from(x) + u32::from(col);
            if dx >= u32::from(area.width) {
                break;
            }
            let target = (area.x + dx as u16, y);
            if let (Some(cell), Some(slot)) = (src.cell((col, row)), dst.cell_mut(target)) {
                *slot = cell.clone();
            }
        }
    }
}

fn put(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style) {
    let area = buf.area;
    if y >= area.bottom() || x >= area.right() {
        return;
    }
    let room = usize::from(area.right() - x);
    buf.set_stringn(x, y, text, room, style);
}

fn draw_card(buf: &mut Buffer, card: &CardLayout, selected: bool, styles: &FeedStyles) {
    let area = buf.area;
    let border = if selected {
        styles.selected_border
    } else {
        styles.border
    };
    let block = Block::bordered().border_style(border);
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.width == 0 {
        return;
    }

    let mut y = inner.y;
    for line in &card.title {
        put(buf, inner.x, y, line, styles.title);
        y += 1;
    }

    let chips_top = y;
    for (label, frame) in card.labels.iter().zip(&card.chips.frames) {
        let cx = inner.x.saturating_add(frame.x as u16);
        let cy = chips_top.saturating_add(frame.y as u16);
        if cx >= inner.right() || cy >= inner.bottom() {
            continue;
        }
        let chip = format!(" {label} ");
        let room = usize::from(inner.right() - cx);
        buf.set_stringn(cx, cy, chip, room, styles.chip);
    }

    y = chips_top + card.chip_rows();
    if y < inner.bottom() {
        let room = usize::from(inner.width);
        buf.set_stringn(inner.x, y, &card.date, room, styles.date);
    }
}

fn draw_banner(buf: &mut Buffer, text: &str, styles: &FeedStyles) {
    let area = buf.area;
    Paragraph::new(Line::from(text))
        .alignment(Alignment::Center)
        .style(styles.banner)
        .render(area, buf);
}

/// Draw the status bar: the last status message, else the selected card's
/// URL, else the key hint.
pub fn render_status(buf: &mut Buffer, area: CellRect, state: &FeedViewState, styles: &FeedStyles) {
    let text = match (state.status(), state.selected_url()) {
        (Some(status), Some(url)) => format!("{status} · {url}"),
        (Some(status), None) => status.to_string(),
        (None, Some(url)) => url,
        (None, None) => HINT.to_string(),
    };
    Paragraph::new(Line::from(text))
        .style(styles.status)
        .render(area, buf);
}
