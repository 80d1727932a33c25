use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

impl FromStr for GeometryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "point" | "points" => Ok(GeometryKind::Point),
            "line" | "lines" => Ok(GeometryKind::Line),
            "polygon" | "polygons" => Ok(GeometryKind::Polygon),
            other => Err(format!("unknown geometry kind: {}", other)),
        }
    }
}

/// A labeled map feature: the display name pulled from the feature's
/// attributes plus the geometry kind that picks its style section.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub kind: GeometryKind,
}

impl Feature {
    pub fn new(name: String, kind: GeometryKind) -> Self {
        Self { name, kind }
    }
}
