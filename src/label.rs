use crate::config::{LabelConfig, StyleSheet};
use crate::feature::{Feature, GeometryKind};
use crate::style::{Circle, Fill, Stroke, Style, TextStyle};
use crate::text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a feature's name becomes its label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    Normal,
    Hide,
    Shorten,
    Wrap,
}

impl fmt::Display for LabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LabelMode::Normal => "normal",
            LabelMode::Hide => "hide",
            LabelMode::Shorten => "shorten",
            LabelMode::Wrap => "wrap",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LabelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(LabelMode::Normal),
            "hide" => Ok(LabelMode::Hide),
            "shorten" => Ok(LabelMode::Shorten),
            "wrap" => Ok(LabelMode::Wrap),
            other => Err(format!("unknown label mode: {}", other)),
        }
    }
}

/// Resolve the label text for a feature at the given view resolution.
///
/// Labels are culled entirely above `max_resolution`; otherwise the
/// configured mode decides between the raw name, nothing, a truncated
/// name, or a wrapped one.
pub fn label_text(feature: &Feature, resolution: f64, config: &LabelConfig) -> String {
    if resolution > config.max_resolution {
        return String::new();
    }

    match config.mode {
        LabelMode::Normal => feature.name.clone(),
        LabelMode::Hide => String::new(),
        LabelMode::Shorten => text::truncate(
            &feature.name,
            config.shorten_length as usize,
            &config.ellipsis,
        ),
        LabelMode::Wrap => text::wrap(
            &feature.name,
            config.wrap_width as usize,
            &config.separator,
        ),
    }
}

/// Build the text portion of a feature's style from one config section.
pub fn text_style(feature: &Feature, resolution: f64, config: &LabelConfig) -> TextStyle {
    TextStyle {
        align: config.align,
        baseline: config.baseline,
        font: format!("{} {}px {}", config.weight, config.size, config.font_family),
        text: label_text(feature, resolution, config),
        fill: Fill {
            color: config.color.clone(),
        },
        stroke: Stroke {
            color: config.outline_color.clone(),
            width: config.outline_width,
        },
    }
}

pub fn point_style(feature: &Feature, resolution: f64, config: &LabelConfig) -> Style {
    Style {
        stroke: None,
        fill: None,
        image: Some(Circle {
            radius: 10,
            fill: Fill {
                color: "rgba(255, 0, 0, 0.1)".to_string(),
            },
            stroke: Stroke {
                color: "red".to_string(),
                width: 1,
            },
        }),
        text: Some(text_style(feature, resolution, config)),
    }
}

pub fn line_style(feature: &Feature, resolution: f64, config: &LabelConfig) -> Style {
    Style {
        stroke: Some(Stroke {
            color: "green".to_string(),
            width: 2,
        }),
        fill: None,
        image: None,
        text: Some(text_style(feature, resolution, config)),
    }
}

pub fn polygon_style(feature: &Feature, resolution: f64, config: &LabelConfig) -> Style {
    Style {
        stroke: Some(Stroke {
            color: "blue".to_string(),
            width: 1,
        }),
        fill: Some(Fill {
            color: "rgba(0, 0, 255, 0.1)".to_string(),
        }),
        image: None,
        text: Some(text_style(feature, resolution, config)),
    }
}

/// Style a feature using the sheet section matching its geometry kind.
pub fn styled(feature: &Feature, resolution: f64, sheet: &StyleSheet) -> Style {
    match feature.kind {
        GeometryKind::Point => point_style(feature, resolution, &sheet.points),
        GeometryKind::Line => line_style(feature, resolution, &sheet.lines),
        GeometryKind::Polygon => polygon_style(feature, resolution, &sheet.polygons),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleSheet;

    fn test_feature(name: &str, kind: GeometryKind) -> Feature {
        Feature::new(name.to_string(), kind)
    }

    #[test]
    fn test_label_text_normal() {
        let config = LabelConfig::default();
        let feature = test_feature("Newcastle upon Tyne", GeometryKind::Point);
        assert_eq!(label_text(&feature, 100.0, &config), "Newcastle upon Tyne");
    }

    #[test]
    fn test_label_text_culled_above_max_resolution() {
        let config = LabelConfig::default();
        let feature = test_feature("Newcastle upon Tyne", GeometryKind::Point);
        assert_eq!(label_text(&feature, config.max_resolution + 1.0, &config), "");
    }

    #[test]
    fn test_label_text_hide() {
        let config = LabelConfig {
            mode: LabelMode::Hide,
            ..LabelConfig::default()
        };
        let feature = test_feature("Newcastle upon Tyne", GeometryKind::Point);
        assert_eq!(label_text(&feature, 100.0, &config), "");
    }

    #[test]
    fn test_label_text_shorten() {
        let config = LabelConfig {
            mode: LabelMode::Shorten,
            ..LabelConfig::default()
        };
        let feature = test_feature("Newcastle upon Tyne", GeometryKind::Point);
        // Default shorten length is 12: eleven chars kept plus the marker.
        assert_eq!(label_text(&feature, 100.0, &config), "Newcastle u...");
    }

    #[test]
    fn test_label_text_wrap() {
        let config = LabelConfig {
            mode: LabelMode::Wrap,
            ..LabelConfig::default()
        };
        let feature = test_feature("Newcastle upon Tyne", GeometryKind::Point);
        assert_eq!(label_text(&feature, 100.0, &config), "Newcastle upon\nTyne");
    }

    #[test]
    fn test_text_style_assembles_font() {
        let config = LabelConfig::default();
        let feature = test_feature("Oslo", GeometryKind::Point);
        let style = text_style(&feature, 100.0, &config);
        assert_eq!(style.font, "bold 12px Verdana");
        assert_eq!(style.text, "Oslo");
        assert_eq!(style.fill.color, config.color);
        assert_eq!(style.stroke.color, config.outline_color);
        assert_eq!(style.stroke.width, config.outline_width);
    }

    #[test]
    fn test_polygon_style_defaults() {
        let sheet = StyleSheet::default();
        let feature = test_feature("Lake District", GeometryKind::Polygon);
        let style = styled(&feature, 100.0, &sheet);

        let stroke = style.stroke.expect("polygon style should have a stroke");
        assert_eq!(stroke.color, "blue");
        assert_eq!(stroke.width, 1);
        let fill = style.fill.expect("polygon style should have a fill");
        assert_eq!(fill.color, "rgba(0, 0, 255, 0.1)");
        assert!(style.image.is_none());
        assert!(style.text.is_some());
    }

    #[test]
    fn test_line_style_defaults() {
        let sheet = StyleSheet::default();
        let feature = test_feature("River Tyne", GeometryKind::Line);
        let style = styled(&feature, 100.0, &sheet);

        let stroke = style.stroke.expect("line style should have a stroke");
        assert_eq!(stroke.color, "green");
        assert_eq!(stroke.width, 2);
        assert!(style.fill.is_none());
        assert!(style.image.is_none());
    }

    #[test]
    fn test_point_style_defaults() {
        let sheet = StyleSheet::default();
        let feature = test_feature("Oslo", GeometryKind::Point);
        let style = styled(&feature, 100.0, &sheet);

        assert!(style.stroke.is_none());
        assert!(style.fill.is_none());
        let image = style.image.expect("point style should have an image");
        assert_eq!(image.radius, 10);
        assert_eq!(image.stroke.color, "red");
        assert_eq!(image.fill.color, "rgba(255, 0, 0, 0.1)");
    }

    #[test]
    fn test_styled_uses_matching_sheet_section() {
        let mut sheet = StyleSheet::default();
        sheet.points.mode = LabelMode::Hide;

        let point = test_feature("Oslo", GeometryKind::Point);
        let line = test_feature("River Tyne", GeometryKind::Line);

        let point_text = styled(&point, 100.0, &sheet).text.unwrap();
        let line_text = styled(&line, 100.0, &sheet).text.unwrap();

        assert_eq!(point_text.text, "");
        assert_eq!(line_text.text, "River Tyne");
    }
}
