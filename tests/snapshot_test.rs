use insta::assert_snapshot;
use maplabel_rs::config::{LabelConfig, StyleSheet};
use maplabel_rs::feature::{Feature, GeometryKind};
use maplabel_rs::label::{self, LabelMode};
use maplabel_rs::text::{truncate, wrap};

#[test]
fn test_wrap_snapshot_place_name() {
    assert_snapshot!(wrap("Newcastle upon Tyne", 9, "\n"), @r"
    Newcastle
    upon Tyne
    ");
}

#[test]
fn test_wrap_snapshot_hyphenated() {
    assert_snapshot!(wrap("well-known-example", 7, "\n"), @r"
    well-
    known-
    example
    ");
}

#[test]
fn test_truncate_snapshot() {
    assert_snapshot!(truncate("Newcastle upon Tyne", 12, "..."), @"Newcastle u...");
}

#[test]
fn test_rendered_label_snapshot() {
    let sheet = StyleSheet {
        lines: LabelConfig {
            mode: LabelMode::Wrap,
            wrap_width: 12,
            ..LabelConfig::default()
        },
        ..StyleSheet::default()
    };
    let feature = Feature::new("Kingston upon Hull".to_string(), GeometryKind::Line);

    let style = label::styled(&feature, 100.0, &sheet);
    let text_style = style.text.expect("line style should carry text");

    assert_snapshot!(format!("{}\n{}", text_style.font, text_style.text), @r"
    bold 12px Verdana
    Kingston
    upon Hull
    ");
}
