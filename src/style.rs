//! Plain-data style graph handed to a renderer. Nothing here draws; color
//! values are kept as opaque strings for the consumer to interpret.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Start,
    End,
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
            TextAlign::Start => "start",
            TextAlign::End => "end",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(TextAlign::Left),
            "right" => Ok(TextAlign::Right),
            "center" => Ok(TextAlign::Center),
            "start" => Ok(TextAlign::Start),
            "end" => Ok(TextAlign::End),
            other => Err(format!("unknown text align: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
    Alphabetic,
    Hanging,
    Ideographic,
}

impl fmt::Display for TextBaseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Hanging => "hanging",
            TextBaseline::Ideographic => "ideographic",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TextBaseline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(TextBaseline::Top),
            "middle" => Ok(TextBaseline::Middle),
            "bottom" => Ok(TextBaseline::Bottom),
            "alphabetic" => Ok(TextBaseline::Alphabetic),
            "hanging" => Ok(TextBaseline::Hanging),
            "ideographic" => Ok(TextBaseline::Ideographic),
            other => Err(format!("unknown text baseline: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for FontWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(FontWeight::Normal),
            "bold" => Ok(FontWeight::Bold),
            other => Err(format!("unknown font weight: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: u32,
}

/// Circle placemark drawn at point features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: u32,
    pub fill: Fill,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub font: String,
    pub text: String,
    pub fill: Fill,
    pub stroke: Stroke,
}

/// Complete style for one feature. Optional parts are simply absent for
/// geometry kinds that do not use them (lines have no fill, only points
/// carry an image).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Option<Stroke>,
    pub fill: Option<Fill>,
    pub image: Option<Circle>,
    pub text: Option<TextStyle>,
}
