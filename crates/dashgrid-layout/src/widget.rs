#![forbid(unsafe_code)]

//! Widget identity and records.

use std::fmt;

use dashgrid_core::GridPosition;
use serde::{Deserialize, Serialize};

use crate::content::{WidgetContent, WidgetKind};

/// Default palette footprint width in cells.
pub const DEFAULT_WIDGET_WIDTH: u32 = 4;

/// Default palette footprint height in cells.
pub const DEFAULT_WIDGET_HEIGHT: u32 = 3;

/// Stable identifier for widgets on one canvas.
///
/// `0` is reserved/invalid so IDs are always non-zero. IDs are assigned by
/// [`crate::WidgetSet`] and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct WidgetId(u64);

impl WidgetId {
    /// Lowest valid widget ID.
    pub const MIN: Self = Self(1);

    /// Create a widget ID, rejecting 0.
    #[must_use]
    pub const fn new(raw: u64) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The next ID, or `None` on overflow.
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget-{}", self.0)
    }
}

impl TryFrom<u64> for WidgetId {
    type Error = String;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| "widget id must be non-zero".to_string())
    }
}

impl From<WidgetId> for u64 {
    fn from(id: WidgetId) -> Self {
        id.0
    }
}

/// Presentation hints carried opaquely with a widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<u16>,
    #[serde(default)]
    pub shadow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

const fn visible_by_default() -> bool {
    true
}

/// A placed widget.
///
/// `position` is the only field the layout engine mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub position: GridPosition,
    pub content: WidgetContent,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<WidgetStyle>,
}

/// A widget that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDraft {
    pub title: Option<String>,
    pub position: GridPosition,
    pub content: WidgetContent,
    pub visible: bool,
    pub style: Option<WidgetStyle>,
}

impl WidgetDraft {
    #[must_use]
    pub fn new(position: GridPosition, content: WidgetContent) -> Self {
        Self {
            title: None,
            position,
            content,
            visible: true,
            style: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn style(mut self, style: WidgetStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub(crate) fn into_widget(self, id: WidgetId) -> Widget {
        Widget {
            id,
            title: self.title,
            position: self.position,
            content: self.content,
            visible: self.visible,
            style: self.style,
        }
    }
}

/// A palette entry: what a new-widget insert gesture drops onto the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteItem {
    pub kind: WidgetKind,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub content: WidgetContent,
}

impl PaletteItem {
    /// Palette entry with the kind's default title, content and a 4x3
    /// footprint.
    #[must_use]
    pub fn for_kind(kind: WidgetKind) -> Self {
        Self {
            kind,
            title: kind.default_title().to_string(),
            width: DEFAULT_WIDGET_WIDTH,
            height: DEFAULT_WIDGET_HEIGHT,
            content: kind.default_content(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Footprint anchored at `(x, y)`.
    #[must_use]
    pub const fn footprint_at(&self, x: u32, y: u32) -> GridPosition {
        GridPosition::new(x, y, self.width, self.height)
    }

    /// Draft for inserting this item at `position`.
    #[must_use]
    pub fn draft_at(&self, position: GridPosition) -> WidgetDraft {
        WidgetDraft::new(position, self.content.clone()).title(self.title.clone())
    }
}
