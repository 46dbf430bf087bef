//! End-to-end rendering from CSV datasets on disk

use catalog::{DatasetPaths, SkyDatasets};
use skymap::render::{DEC_GRID_LINES, RA_GRID_LINES};
use skymap::svg::Element;
use skymap::{MapStyle, SkyMapConfig, SkyMapRenderer};
use test_helpers::{output_path, DatasetFixture};

fn load(fixture: &DatasetFixture) -> (tempfile::TempDir, SkyDatasets) {
    let dir = tempfile::tempdir().unwrap();
    let paths: DatasetPaths = fixture.write_to(dir.path()).unwrap();
    let datasets = SkyDatasets::load(&paths).expect("fixture datasets should load");
    (dir, datasets)
}

fn parse_svg(markup: &str) -> usvg::Tree {
    usvg::Tree::from_str(markup, &usvg::Options::default()).expect("output should be valid SVG")
}

#[test]
fn test_empty_datasets_produce_grid_only_document() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (_dir, datasets) = load(&DatasetFixture::new());
    let renderer = SkyMapRenderer::new(&SkyMapConfig::default(), MapStyle::default());
    let map = renderer.render(&datasets);

    let grid = RA_GRID_LINES + DEC_GRID_LINES;
    assert_eq!(map.document.count("rect"), 1);
    assert_eq!(map.document.count("line"), grid);
    assert_eq!(map.document.count("text"), grid);
    assert_eq!(map.document.len(), 1 + 2 * grid);

    let markup = map.document.to_string();
    let tree = parse_svg(&markup);
    assert_eq!(tree.size().width(), 1460.0);
    assert_eq!(tree.size().height(), 500.0);
}

#[test]
fn test_sample_sky_renders() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (_dir, datasets) = load(&DatasetFixture::sample_sky());
    let renderer = SkyMapRenderer::new(&SkyMapConfig::default(), MapStyle::default());
    let map = renderer.render(&datasets);
    let summary = &map.summary;

    assert_eq!(summary.boundaries, 2);
    assert_eq!(summary.wrapped_boundaries, 1);
    assert_eq!(summary.asterisms, 4);
    assert_eq!(summary.wrapped_asterisms, 1);
    assert_eq!(summary.skipped_asterisms, 0);

    // Polaris is above the band, everything else gets a marker
    assert_eq!(summary.stars, 8);
    assert_eq!(summary.stars_outside_band, 1);

    // Ori and And labelled, UMi anchored on Polaris, Oct without anchor
    assert_eq!(summary.labels, 2);
    assert_eq!(summary.labels_outside_band, 1);
    assert_eq!(summary.missing_labels, 1);

    let labels: Vec<&str> = map
        .document
        .elements()
        .iter()
        .filter_map(|e| match e {
            Element::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels[labels.len() - 2..], ["Ori", "And"]);

    let markup = map.document.to_string();
    parse_svg(&markup);

    let artifact = output_path("skymaps/sample_sky.svg");
    map.document.write_to(&artifact).unwrap();
    assert!(artifact.exists());
}

#[test]
fn test_missing_anchor_star_does_not_abort() {
    let fixture = DatasetFixture::new()
        .star(677, 2.07, 2.09653, 29.09043)
        .constellation("And", Some(677))
        .constellation("Peg", Some(113881));

    let (_dir, datasets) = load(&fixture);
    let renderer = SkyMapRenderer::new(&SkyMapConfig::default(), MapStyle::default());
    let map = renderer.render(&datasets);

    assert_eq!(map.summary.labels, 1);
    assert_eq!(map.summary.missing_labels, 1);
    assert!(!map.document.to_string().contains(">Peg<"));
}

#[test]
fn test_custom_scale_changes_canvas() {
    let config = SkyMapConfig {
        scale: 2.0,
        margin: 5.0,
        ..Default::default()
    };
    let (_dir, datasets) = load(&DatasetFixture::sample_sky());
    let map = SkyMapRenderer::new(&config, MapStyle::default()).render(&datasets);

    assert_eq!(map.document.width(), 730.0);
    assert_eq!(map.document.height(), 250.0);
    parse_svg(&map.document.to_string());
}
