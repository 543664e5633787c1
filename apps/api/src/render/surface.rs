//! The rendered page: an ordered display list in CSS pixels.

use serde::Serialize;

use crate::layout::page::{PAGE_HEIGHT_PX, PAGE_WIDTH_PX};
use crate::layout::{FontFamily, FontWeight};
use crate::models::TemplateKind;
use crate::style::Rgb;

/// Line box height as a multiple of the font size.
pub const LINE_HEIGHT: f32 = 1.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// Filled rectangle; `radius` rounds the corners (half the height makes a pill).
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb,
        radius: f32,
    },
    /// One already-wrapped line. `y` is the top of the line box.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        family: FontFamily,
        weight: FontWeight,
        color: Rgb,
    },
    /// Inline image from a `data:` URI, optionally clipped to a circle.
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        source: String,
        circular: bool,
    },
}

/// Body sections a template can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Contact,
    Profile,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
}

#[derive(Debug, Clone, Serialize)]
pub struct Surface {
    pub template: TemplateKind,
    pub width: f32,
    pub height: f32,
    pub background: Rgb,
    elements: Vec<Element>,
    sections: Vec<Section>,
}

impl Surface {
    /// An empty A4 page.
    pub fn new(template: TemplateKind, background: Rgb) -> Self {
        Self {
            template,
            width: PAGE_WIDTH_PX,
            height: PAGE_HEIGHT_PX,
            background,
            elements: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgb) {
        self.push(Element::Rect {
            x,
            y,
            width,
            height,
            fill,
            radius: 0.0,
        });
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgb, radius: f32) {
        self.push(Element::Rect {
            x,
            y,
            width,
            height,
            fill,
            radius,
        });
    }

    pub fn mark_section(&mut self, section: Section) {
        if !self.sections.contains(&section) {
            self.sections.push(section);
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Sections that produced output, in placement order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }

    /// All text lines, in draw order.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_lines().any(|line| line.contains(needle))
    }

    /// Grows the page so content ending at `bottom` keeps `padding` below it.
    /// The page never shrinks below A4.
    pub fn fit_to(&mut self, bottom: f32, padding: f32) {
        self.height = self.height.max(bottom + padding).ceil();
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.ceil() as u32, self.height.ceil() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_a4_and_empty() {
        let s = Surface::new(TemplateKind::Classic, Rgb::WHITE);
        assert_eq!(s.pixel_size(), (794, 1123));
        assert!(s.elements().is_empty());
        assert!(s.sections().is_empty());
    }

    #[test]
    fn test_fit_to_only_grows() {
        let mut s = Surface::new(TemplateKind::Modern, Rgb::WHITE);
        s.fit_to(200.0, 24.0);
        assert_eq!(s.height, 1123.0);
        s.fit_to(1500.5, 24.0);
        assert_eq!(s.height, 1525.0);
    }

    #[test]
    fn test_sections_are_recorded_once() {
        let mut s = Surface::new(TemplateKind::Creative, Rgb::WHITE);
        s.mark_section(Section::Skills);
        s.mark_section(Section::Skills);
        assert_eq!(s.sections(), &[Section::Skills]);
    }
}
