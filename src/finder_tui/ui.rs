//! Drawing helpers for the finder screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::finder::{
    form::TextInput,
    notification::{Notification, NotificationKind},
    render::StationCard,
};
use crate::models::ChargingType;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn station_name() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }
}

/// Render a labelled text input, placing the cursor when focused
pub fn render_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    placeholder: &str,
    input: &TextInput,
    is_focused: bool,
) {
    let (display_text, input_style) = if input.value.is_empty() {
        (placeholder, Styles::inactive())
    } else {
        (input.value.as_str(), Styles::default())
    };

    let border_style = if is_focused {
        Styles::active_border()
    } else {
        Styles::inactive_border()
    };

    let paragraph = Paragraph::new(display_text.to_string())
        .style(input_style)
        .block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    f.render_widget(paragraph, area);

    if is_focused {
        let before_cursor: String = input.value.chars().take(input.cursor_position).collect();
        let cursor_x = area.x + 1 + before_cursor.width() as u16;
        let cursor_y = area.y + 1;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            f.set_cursor(cursor_x, cursor_y);
        }
    }
}

/// Render the connector type selector as `< label >`
pub fn render_selector(f: &mut Frame, area: Rect, selected: ChargingType, is_focused: bool) {
    let border_style = if is_focused {
        Styles::active_border()
    } else {
        Styles::inactive_border()
    };

    let line = Line::from(vec![
        Span::styled("< ", Styles::inactive()),
        Span::raw(selected.label().to_string()),
        Span::styled(" >", Styles::inactive()),
    ]);

    let field = Paragraph::new(line).block(
        Block::default()
            .title("Charging Type (←/→ to change)")
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    f.render_widget(field, area);
}

/// Render the submit control; greyed out while disabled
pub fn render_submit(f: &mut Frame, area: Rect, enabled: bool) {
    let style = if enabled {
        Styles::success().add_modifier(Modifier::BOLD)
    } else {
        Styles::inactive()
    };

    let button = Paragraph::new(Line::from(Span::styled("[ Find Stations ]", style)))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));

    f.render_widget(button, area);
}

/// Text lines for the station cards, truncated to `width` columns
pub fn card_lines(cards: &[StationCard], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, card) in cards.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            truncate_to_width(&card.name, width),
            Styles::station_name(),
        )));
        for detail in card.detail_lines() {
            lines.push(Line::from(truncate_to_width(detail, width)));
        }
    }
    lines
}

/// Render the result list with a vertical scroll offset
pub fn render_results(f: &mut Frame, area: Rect, cards: &[StationCard], scroll_offset: usize) {
    let title = format!("Stations ({})", cards.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Styles::inactive_border());

    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = if cards.is_empty() {
        vec![Line::from(Span::styled(
            "No stations yet. Enter coordinates and press Enter.",
            Styles::inactive(),
        ))]
    } else {
        card_lines(cards, inner_width)
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll_offset.min(u16::MAX as usize) as u16, 0));

    f.render_widget(paragraph, area);
}

/// Render a modal dialog centered on `area`
pub fn render_notification(f: &mut Frame, area: Rect, notification: &Notification, tick: usize) {
    let popup_area = centered_rect(60, 30, area);
    f.render_widget(Clear, popup_area);

    let style = match notification.kind {
        NotificationKind::Warning => Styles::warning(),
        NotificationKind::Error => Styles::error(),
        NotificationKind::Progress => Styles::info(),
    };

    let title = match notification.kind {
        NotificationKind::Progress => {
            format!("{} {}", SPINNER[tick % SPINNER.len()], notification.title)
        }
        _ => notification.title.clone(),
    };

    let mut lines = vec![Line::from(notification.text.clone()), Line::from("")];
    if notification.is_dismissible() {
        let footer = format!(
            "[{}] Enter/Esc: OK",
            notification.timestamp.format("%H:%M:%S")
        );
        lines.push(Line::from(Span::styled(footer, Styles::inactive())));
    }

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(title, style.add_modifier(Modifier::BOLD)))
                .borders(Borders::ALL)
                .border_style(style),
        );

    f.render_widget(popup, popup_area);
}

/// Truncate to a display width, marking the cut with an ellipsis
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let target_width = max_width.saturating_sub(1);
    let mut truncated = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        truncated.push(ch);
        current_width += ch_width;
    }

    if max_width > 0 {
        truncated.push('…');
    }
    truncated
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Civic Center", 20), "Civic Center");
        assert_eq!(truncate_to_width("Civic Center", 6), "Civic…");
        assert_eq!(truncate_to_width("充電ステーション", 5), "充電…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 30, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
        assert!(inner.width > 0 && inner.width <= 60);
    }
}
