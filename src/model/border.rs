//! Table border configuration.
//!
//! Borders are described declaratively: a [`TableBorders`] value maps each of
//! the six [`BorderPosition`]s to a [`BorderStyle`]. The renderer turns this
//! into the `w:tblBorders` element of the table properties.

use serde::Serialize;
use std::fmt;

/// Line style of a border (`w:val`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderLineStyle {
    /// No border
    None,
    /// Single thin line
    #[default]
    Single,
    /// Single thick line
    Thick,
    /// Double line
    Double,
    /// Dotted line
    Dotted,
    /// Dashed line
    Dashed,
}

impl BorderLineStyle {
    /// WordprocessingML value for this style.
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderLineStyle::None => "nil",
            BorderLineStyle::Single => "single",
            BorderLineStyle::Thick => "thick",
            BorderLineStyle::Double => "double",
            BorderLineStyle::Dotted => "dotted",
            BorderLineStyle::Dashed => "dashed",
        }
    }

    /// Parse a WordprocessingML `w:val` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "nil" | "none" => Some(BorderLineStyle::None),
            "single" => Some(BorderLineStyle::Single),
            "thick" => Some(BorderLineStyle::Thick),
            "double" => Some(BorderLineStyle::Double),
            "dotted" => Some(BorderLineStyle::Dotted),
            "dashed" => Some(BorderLineStyle::Dashed),
            _ => None,
        }
    }
}

impl fmt::Display for BorderLineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appearance of a single border line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorderStyle {
    /// Line style
    pub line_style: BorderLineStyle,

    /// Line width in eighths of a point (`w:sz`)
    pub size_eighths: u32,

    /// Spacing between border and content, in points
    pub spacing: u32,

    /// Color as six hex digits, without `#`
    pub color: String,
}

impl BorderStyle {
    /// Create a border style.
    pub fn new(line_style: BorderLineStyle, size_eighths: u32, color: impl Into<String>) -> Self {
        Self {
            line_style,
            size_eighths,
            spacing: 0,
            color: color.into(),
        }
    }

    /// Uniform thin black line used for GOST-style tables:
    /// single, size 8, spacing 0, color `000000`.
    pub fn gost() -> Self {
        Self::new(BorderLineStyle::Single, 8, "000000")
    }

    /// Check that the color is six hex digits.
    pub fn has_valid_color(&self) -> bool {
        self.color.len() == 6 && self.color.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self::gost()
    }
}

/// Position of a border within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BorderPosition {
    /// Outer top edge
    Top,
    /// Outer left edge
    Left,
    /// Outer bottom edge
    Bottom,
    /// Outer right edge
    Right,
    /// Horizontal dividers between rows
    InsideHorizontal,
    /// Vertical dividers between columns
    InsideVertical,
}

impl BorderPosition {
    /// All positions, in the order they appear inside `w:tblBorders`.
    pub const ALL: [BorderPosition; 6] = [
        BorderPosition::Top,
        BorderPosition::Left,
        BorderPosition::Bottom,
        BorderPosition::Right,
        BorderPosition::InsideHorizontal,
        BorderPosition::InsideVertical,
    ];

    /// Local element name inside `w:tblBorders`.
    pub fn element_name(&self) -> &'static str {
        match self {
            BorderPosition::Top => "top",
            BorderPosition::Left => "left",
            BorderPosition::Bottom => "bottom",
            BorderPosition::Right => "right",
            BorderPosition::InsideHorizontal => "insideH",
            BorderPosition::InsideVertical => "insideV",
        }
    }

    /// Map an element name back to a position.
    ///
    /// `start`/`end` are the bidi-aware aliases of `left`/`right`.
    pub fn from_element_name(name: &[u8]) -> Option<Self> {
        match name {
            b"top" => Some(BorderPosition::Top),
            b"left" | b"start" => Some(BorderPosition::Left),
            b"bottom" => Some(BorderPosition::Bottom),
            b"right" | b"end" => Some(BorderPosition::Right),
            b"insideH" => Some(BorderPosition::InsideHorizontal),
            b"insideV" => Some(BorderPosition::InsideVertical),
            _ => None,
        }
    }
}

/// Borders for all six positions of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableBorders {
    pub top: Option<BorderStyle>,
    pub left: Option<BorderStyle>,
    pub bottom: Option<BorderStyle>,
    pub right: Option<BorderStyle>,
    pub inside_h: Option<BorderStyle>,
    pub inside_v: Option<BorderStyle>,
}

impl TableBorders {
    /// Same style on every position.
    pub fn uniform(style: BorderStyle) -> Self {
        let mut borders = Self::default();
        for position in BorderPosition::ALL {
            borders.set(position, style.clone());
        }
        borders
    }

    /// GOST-style borders: [`BorderStyle::gost`] everywhere.
    pub fn gost() -> Self {
        Self::uniform(BorderStyle::gost())
    }

    /// Get the style at a position.
    pub fn get(&self, position: BorderPosition) -> Option<&BorderStyle> {
        match position {
            BorderPosition::Top => self.top.as_ref(),
            BorderPosition::Left => self.left.as_ref(),
            BorderPosition::Bottom => self.bottom.as_ref(),
            BorderPosition::Right => self.right.as_ref(),
            BorderPosition::InsideHorizontal => self.inside_h.as_ref(),
            BorderPosition::InsideVertical => self.inside_v.as_ref(),
        }
    }

    /// Set the style at a position.
    pub fn set(&mut self, position: BorderPosition, style: BorderStyle) {
        let slot = match position {
            BorderPosition::Top => &mut self.top,
            BorderPosition::Left => &mut self.left,
            BorderPosition::Bottom => &mut self.bottom,
            BorderPosition::Right => &mut self.right,
            BorderPosition::InsideHorizontal => &mut self.inside_h,
            BorderPosition::InsideVertical => &mut self.inside_v,
        };
        *slot = Some(style);
    }

    /// Iterate over the positions that have a style, in element order.
    pub fn iter(&self) -> impl Iterator<Item = (BorderPosition, &BorderStyle)> {
        BorderPosition::ALL
            .into_iter()
            .filter_map(move |pos| self.get(pos).map(|style| (pos, style)))
    }

    /// Check if no position has a style.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Check if all six positions carry the given style.
    pub fn is_uniform(&self, style: &BorderStyle) -> bool {
        BorderPosition::ALL
            .iter()
            .all(|pos| self.get(*pos) == Some(style))
    }
}
