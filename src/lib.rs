pub mod config;
pub mod errors;
pub mod feature;
pub mod label;
pub mod style;
pub mod text;

// Re-export commonly used types
pub use config::{CliArgs, LabelConfig, StyleSheet};
pub use feature::{Feature, GeometryKind};
pub use label::LabelMode;
pub use style::{Style, TextStyle};
