//! Drawing the stack and the status bar.

use super::constants::{
    CARD_MARGIN_COLUMNS, CARD_MARGIN_ROWS, CELL_HEIGHT_POINTS, CELL_WIDTH_POINTS,
    ROUNDED_CORNER_POINTS, STRONG_STAMP, THICK_BORDER_POINTS,
};
use crate::model::{CardLayout, Decoration, SwipeDirection};
use crate::source::{Stamp, TextCardView};
use crate::state::EnginePhase;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthChar;

/// One card as it should appear this frame.
#[derive(Debug, Clone, Copy)]
pub struct CardFrame<'a> {
    /// Presentation layout (animated or model).
    pub layout: CardLayout,
    /// View holding the card's text and stamp.
    pub view: &'a TextCardView,
}

/// What the status bar reports.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    /// Materialized cards.
    pub rendered: usize,
    /// Items still waiting in the queue.
    pub queued: usize,
    /// Engine phase this frame.
    pub phase: EnginePhase,
    /// Whether a frozen dismissal blocks interaction.
    pub frozen: bool,
    /// Direction and title of the most recent swipe.
    pub last_swipe: Option<(SwipeDirection, String)>,
}

/// Cell rectangle covered by a card with `layout` inside `area`.
///
/// The layout center is in points relative to `area`. A resting card at
/// unit scale fills `area` minus the card margins; the rectangle is clipped
/// to `area` and `None` once nothing of it is left.
pub fn card_rect(area: Rect, layout: &CardLayout) -> Option<Rect> {
    let scale = layout.transform.scale.max(0.0);
    let width = (f64::from(area.width.saturating_sub(2 * CARD_MARGIN_COLUMNS)) * scale).round();
    let height = (f64::from(area.height.saturating_sub(2 * CARD_MARGIN_ROWS)) * scale).round();
    let center_x = f64::from(area.x) + layout.center.x / CELL_WIDTH_POINTS;
    let center_y = f64::from(area.y) + layout.center.y / CELL_HEIGHT_POINTS;

    let left = (center_x - width / 2.0).round();
    let top = (center_y - height / 2.0).round();
    let clipped_left = left.max(f64::from(area.left()));
    let clipped_top = top.max(f64::from(area.top()));
    let clipped_right = (left + width).min(f64::from(area.right()));
    let clipped_bottom = (top + height).min(f64::from(area.bottom()));

    if !(clipped_right > clipped_left && clipped_bottom > clipped_top) {
        return None;
    }

    Some(Rect::new(
        clipped_left as u16,
        clipped_top as u16,
        (clipped_right - clipped_left) as u16,
        (clipped_bottom - clipped_top) as u16,
    ))
}

/// Terminal border for a decoration.
pub fn border_type(decoration: &Decoration) -> BorderType {
    if decoration.border_width >= THICK_BORDER_POINTS {
        BorderType::Thick
    } else if decoration.corner_radius >= ROUNDED_CORNER_POINTS {
        BorderType::Rounded
    } else {
        BorderType::Plain
    }
}

/// Draw `cards` into `area`, topmost first in the slice.
pub fn render_cards(frame: &mut Frame, area: Rect, cards: &[CardFrame<'_>]) {
    // Bottom card first so the top card ends up above the rest.
    for card in cards.iter().rev() {
        if let Some(rect) = card_rect(area, &card.layout) {
            render_card(frame, rect, card);
        }
    }
}

fn render_card(frame: &mut Frame, rect: Rect, card: &CardFrame<'_>) {
    let decoration = card.layout.decoration;
    let border_style = if decoration.is_plain() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let title_width = rect.width.saturating_sub(4) as usize;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type(&decoration))
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ", truncate_to_width(card.view.title(), title_width)),
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let mut lines = Vec::new();
    if let Some(stamp) = card.view.stamp() {
        lines.push(stamp_line(stamp, card.view.stamp_strength()));
        lines.push(Line::default());
    }
    lines.push(Line::from(card.view.body().to_string()));

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        rect,
    );
}

fn stamp_line(stamp: Stamp, strength: f64) -> Line<'static> {
    let (color, alignment) = match stamp {
        Stamp::Like => (Color::Green, Alignment::Left),
        Stamp::Nope => (Color::Red, Alignment::Right),
    };
    let mut style = Style::default().fg(color);
    if strength >= STRONG_STAMP {
        style = style.add_modifier(Modifier::BOLD);
    }
    Line::from(Span::styled(format!("[ {} ]", stamp.label()), style)).alignment(alignment)
}

/// Cut `text` to at most `max_width` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let full: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
    if full <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width + 1 > max_width {
            break;
        }
        out.push(ch);
        used += width;
    }
    out.push('…');
    out
}

fn phase_label(phase: EnginePhase) -> &'static str {
    match phase {
        EnginePhase::Idle => "idle",
        EnginePhase::Dragging => "dragging",
        EnginePhase::SnappingBack => "snapping back",
        EnginePhase::Dismissing => "dismissing",
        EnginePhase::Refilling => "refilling",
    }
}

/// One-line status bar.
pub fn render_status(frame: &mut Frame, area: Rect, status: &StatusLine) {
    let muted = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::raw(format!(" {} shown, {} queued", status.rendered, status.queued)),
        Span::styled(" | ", muted),
        Span::raw(phase_label(status.phase)),
    ];
    if status.frozen {
        spans.push(Span::styled(" (frozen)", Style::default().fg(Color::Yellow)));
    }
    if let Some((direction, title)) = &status.last_swipe {
        let color = match direction {
            SwipeDirection::Right | SwipeDirection::Up => Color::Green,
            SwipeDirection::Left | SwipeDirection::Down => Color::Red,
        };
        spans.push(Span::styled(" | ", muted));
        spans.push(Span::styled(
            format!("{} {}", direction, title),
            Style::default().fg(color),
        ));
    }
    spans.push(Span::styled(" | t new  u undo  q quit", muted));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
