#![forbid(unsafe_code)]

//! Widget content descriptors.
//!
//! Content is carried alongside each widget but is opaque to the layout
//! engine: collision, placement and gestures only ever look at
//! [`crate::collision::Footprint`]. Rendering hosts match on
//! [`WidgetContent`] to decide what to draw.

use serde::{Deserialize, Serialize};

use crate::widget::WidgetId;

/// Palette entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Chart,
    Text,
    Image,
    Iframe,
    Filter,
    Metric,
    Table,
    Markdown,
}

impl WidgetKind {
    /// Every kind, in palette order.
    pub const ALL: [Self; 8] = [
        Self::Chart,
        Self::Metric,
        Self::Table,
        Self::Text,
        Self::Image,
        Self::Iframe,
        Self::Filter,
        Self::Markdown,
    ];

    /// Title given to a freshly dropped widget.
    #[must_use]
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Chart => "Chart Widget",
            Self::Text => "Text Widget",
            Self::Image => "Image Widget",
            Self::Iframe => "IFrame Widget",
            Self::Filter => "Filter Widget",
            Self::Metric => "Metric Widget",
            Self::Table => "Table Widget",
            Self::Markdown => "Markdown Widget",
        }
    }

    /// Content descriptor given to a freshly dropped widget.
    #[must_use]
    pub fn default_content(self) -> WidgetContent {
        match self {
            Self::Chart => WidgetContent::Chart { data_binding: None },
            Self::Text => WidgetContent::Text {
                config: TextConfig {
                    content: "Enter your text here...".to_string(),
                    ..TextConfig::default()
                },
            },
            Self::Image => WidgetContent::Image {
                config: ImageConfig::default(),
            },
            Self::Iframe => WidgetContent::Iframe {
                config: IframeConfig::default(),
            },
            Self::Filter => WidgetContent::Filter {
                config: FilterConfig::default(),
            },
            Self::Metric => WidgetContent::Metric {
                config: MetricConfig {
                    title: "Metric".to_string(),
                    value: MetricValue::Number(0.0),
                    ..MetricConfig::default()
                },
            },
            Self::Table => WidgetContent::Table {
                config: TableConfig {
                    columns: vec![
                        TableColumn::sortable("name", "Name"),
                        TableColumn::sortable("value", "Value"),
                    ],
                    ..TableConfig::default()
                },
            },
            Self::Markdown => WidgetContent::Markdown {
                config: MarkdownConfig::default(),
            },
        }
    }
}

/// Tagged content descriptor, one variant per widget kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetContent {
    Chart {
        #[serde(default, rename = "dataBinding", skip_serializing_if = "Option::is_none")]
        data_binding: Option<DataBinding>,
    },
    Text { config: TextConfig },
    Image { config: ImageConfig },
    Iframe { config: IframeConfig },
    Filter { config: FilterConfig },
    Metric { config: MetricConfig },
    Table { config: TableConfig },
    Markdown { config: MarkdownConfig },
}

impl WidgetContent {
    #[must_use]
    pub const fn kind(&self) -> WidgetKind {
        match self {
            Self::Chart { .. } => WidgetKind::Chart,
            Self::Text { .. } => WidgetKind::Text,
            Self::Image { .. } => WidgetKind::Image,
            Self::Iframe { .. } => WidgetKind::Iframe,
            Self::Filter { .. } => WidgetKind::Filter,
            Self::Metric { .. } => WidgetKind::Metric,
            Self::Table { .. } => WidgetKind::Table,
            Self::Markdown { .. } => WidgetKind::Markdown,
        }
    }
}

/// Query binding for chart widgets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBinding {
    pub data_source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_column: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub y_axis_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextConfig {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFit {
    #[default]
    Contain,
    Cover,
    Fill,
    None,
    ScaleDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default)]
    pub fit: ImageFit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IframeConfig {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub allow_fullscreen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterControl {
    #[default]
    Dropdown,
    Multiselect,
    Daterange,
    Slider,
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    #[serde(default)]
    pub control: FilterControl,
    pub label: String,
    pub parameter: String,
    #[serde(default)]
    pub required: bool,
    /// Widgets whose queries receive this filter's value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_widget_ids: Vec<WidgetId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl Default for MetricValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricConfig {
    pub title: String,
    pub value: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub sortable: bool,
}

impl TableColumn {
    #[must_use]
    pub fn sortable(key: &str, title: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            sortable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub columns: Vec<TableColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub striped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownConfig {
    pub content: String,
    #[serde(default)]
    pub allow_html: bool,
}
