use crate::layout::wrap_text;
use crate::render::context::TextStyle;
use crate::render::surface::{Element, Surface, LINE_HEIGHT};
use crate::style::Rgb;

/// A vertical flow region. Content is appended top to bottom and `y` tracks
/// the next free position.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub x: f32,
    pub width: f32,
    pub y: f32,
}

impl Column {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, width, y }
    }

    pub fn gap(&mut self, px: f32) {
        self.y += px;
    }

    /// Wrapped text across the full column width.
    pub fn text(&mut self, surface: &mut Surface, text: &str, style: TextStyle) {
        self.text_within(surface, text, style, 0.0, self.width);
    }

    /// Wrapped text starting `indent` px in, limited to `width`.
    pub fn text_within(
        &mut self,
        surface: &mut Surface,
        text: &str,
        style: TextStyle,
        indent: f32,
        width: f32,
    ) {
        let line_height = style.size * LINE_HEIGHT;
        for line in wrap_text(text, style.family, style.weight, style.size, width) {
            push_line(surface, self.x + indent, self.y, line, style);
            self.y += line_height;
        }
    }

    /// Wrapped text with every line centered in the column.
    pub fn centered(&mut self, surface: &mut Surface, text: &str, style: TextStyle) {
        let line_height = style.size * LINE_HEIGHT;
        for line in wrap_text(text, style.family, style.weight, style.size, self.width) {
            let x = self.x + ((self.width - style.width_of(&line)) / 2.0).max(0.0);
            push_line(surface, x, self.y, line, style);
            self.y += line_height;
        }
    }

    /// Left and right text on the same row; the left side wraps in the space
    /// the right side leaves.
    pub fn split_row(
        &mut self,
        surface: &mut Surface,
        left: &str,
        left_style: TextStyle,
        right: &str,
        right_style: TextStyle,
    ) {
        let right_w = if right.is_empty() {
            0.0
        } else {
            right_style.width_of(right)
        };
        if !right.is_empty() {
            let x = (self.x + self.width - right_w).max(self.x);
            push_line(surface, x, self.y, right.to_string(), right_style);
        }
        let left_width = (self.width - right_w - 8.0).max(self.width * 0.4);
        let start = self.y;
        self.text_within(surface, left, left_style, 0.0, left_width);
        if self.y == start && !right.is_empty() {
            self.y += right_style.size * LINE_HEIGHT;
        }
    }

    /// Bulleted list item with a small square marker.
    pub fn bullet(&mut self, surface: &mut Surface, text: &str, style: TextStyle, marker: Rgb) {
        let dot = (style.size * 0.3).max(3.0);
        let line_height = style.size * LINE_HEIGHT;
        surface.rounded_rect(
            self.x + 4.0,
            self.y + (line_height - dot) / 2.0,
            dot,
            dot,
            marker,
            dot / 2.0,
        );
        let indent = 16.0;
        self.text_within(surface, text, style, indent, self.width - indent);
    }

    /// Horizontal rule across the column.
    pub fn rule(&mut self, surface: &mut Surface, thickness: f32, color: Rgb) {
        surface.rect(self.x, self.y, self.width, thickness, color);
        self.y += thickness;
    }

    /// Proportional bar: a track with a filled portion of `fraction`.
    pub fn bar(&mut self, surface: &mut Surface, fraction: f32, height: f32, fill: Rgb) {
        let radius = height / 2.0;
        surface.rounded_rect(self.x, self.y, self.width, height, Rgb::TRACK, radius);
        let filled = self.width * fraction.clamp(0.0, 1.0);
        if filled > 0.0 {
            surface.rounded_rect(self.x, self.y, filled, height, fill, radius);
        }
        self.y += height;
    }

    /// `count` dots, the first `active` in `fill`, right-aligned on the current row.
    pub fn dots_right(&self, surface: &mut Surface, active: u8, count: u8, size: f32, fill: Rgb) {
        let spacing = size * 0.5;
        let total = count as f32 * size + (count.saturating_sub(1)) as f32 * spacing;
        let mut x = self.x + self.width - total;
        for i in 0..count {
            let color = if i < active { fill } else { Rgb::INACTIVE };
            surface.rounded_rect(x, self.y, size, size, color, size / 2.0);
            x += size + spacing;
        }
    }
}

fn push_line(surface: &mut Surface, x: f32, y: f32, text: String, style: TextStyle) {
    surface.push(Element::Text {
        x,
        y,
        text,
        size: style.size,
        family: style.family,
        weight: style.weight,
        color: style.color,
    });
}
