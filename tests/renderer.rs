mod common;

use common::{Fixture, solid};
use jtiles::canvas::CanvasConfig;
use jtiles::error::{Error, ManifestLoadError, MalformedLevel};
use jtiles::grid::Grid;
use jtiles::manifest::TileRegistry;
use jtiles::renderer::{DrawCall, DrawRecorder, Rect, draw_grid};
use jtiles::scene::Scene;
use jtiles::EngineBuilder;

fn registry() -> TileRegistry {
    [
        ("grassTile", solid(4, 4, [0, 200, 0, 255])),
        ("waterTile", solid(4, 4, [0, 0, 200, 255])),
        ("topLeft", solid(4, 4, [200, 180, 120, 255])),
    ]
    .into_iter()
    .collect()
}

fn record(grid: &Grid, registry: &TileRegistry) -> Vec<DrawCall> {
    let mut recorder = DrawRecorder::new();
    draw_grid(grid, registry, &mut recorder);
    recorder.calls
}

// ── Draw order and placement ────────────────────────────────────────────────

#[test]
fn draws_every_mapped_tile_in_row_major_order() {
    let grid = Grid::build(&["GW", "WG"], &CanvasConfig::REFERENCE).unwrap();
    let calls = record(&grid, &registry());

    let rect = |x: f32, y: f32| Rect { x, y, width: 375.0, height: 281.5 };
    assert_eq!(
        calls,
        vec![
            DrawCall { name: "grassTile", rect: rect(0.0, 0.0) },
            DrawCall { name: "waterTile", rect: rect(375.0, 0.0) },
            DrawCall { name: "waterTile", rect: rect(0.0, 281.5) },
            DrawCall { name: "grassTile", rect: rect(375.0, 281.5) },
        ]
    );
}

#[test]
fn unknown_code_skips_only_that_cell() {
    let grid = Grid::build(&["GZW"], &CanvasConfig::new(300, 100)).unwrap();
    let mut recorder = DrawRecorder::new();
    let drawn = draw_grid(&grid, &registry(), &mut recorder);

    assert_eq!(drawn, 2);
    assert_eq!(recorder.calls.len(), 2);
    assert_eq!(recorder.calls[0].name, "grassTile");
    assert_eq!(recorder.calls[0].rect.x, 0.0);
    assert_eq!(recorder.calls[1].name, "waterTile");
    assert_eq!(recorder.calls[1].rect.x, 200.0);
    assert!(recorder.calls.iter().all(|c| c.rect.x != 100.0));
}

#[test]
fn resolved_name_missing_from_registry_is_not_drawn() {
    // '9' resolves to "topRight", which this registry does not carry.
    let grid = Grid::build(&["79"], &CanvasConfig::new(20, 10)).unwrap();
    let calls = record(&grid, &registry());
    assert_eq!(calls, vec![DrawCall {
        name: "topLeft",
        rect: Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
    }]);
}

#[test]
fn empty_registry_draws_nothing() {
    let grid = Grid::build(&["GW", "WG"], &CanvasConfig::REFERENCE).unwrap();
    assert!(record(&grid, &TileRegistry::new()).is_empty());
}

#[test]
fn rendering_is_identical_every_frame() {
    let grid = Grid::build(&["G7W", "WZG", "777"], &CanvasConfig::REFERENCE).unwrap();
    let registry = registry();
    let first = record(&grid, &registry);
    for _ in 0..5 {
        assert_eq!(record(&grid, &registry), first);
    }
}

// ── Scene ───────────────────────────────────────────────────────────────────

fn write_assets(fx: &Fixture, level: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    fx.png("tiles/grass.png", 4, 4, [0, 200, 0, 255]);
    fx.png("tiles/water.png", 4, 4, [0, 0, 200, 255]);
    let manifest = fx.write(
        "tiles.json",
        r#"{ "grassTile": "tiles/grass.png", "waterTile": "tiles/water.png" }"#,
    );
    let level = fx.write("level.txt", level);
    (manifest, level)
}

#[test]
fn scene_loads_and_renders_from_disk() {
    let fx = Fixture::new("scene-ok");
    let (manifest, level) = write_assets(&fx, "GW\nWG\n");

    let scene = Scene::load(&manifest, &level, &CanvasConfig::REFERENCE).unwrap();
    assert_eq!(scene.grid().rows(), 2);
    assert_eq!(scene.registry().len(), 2);

    let mut recorder = DrawRecorder::new();
    assert_eq!(scene.render(&mut recorder), 4);
    assert_eq!(recorder.calls[1].name, "waterTile");
    assert_eq!(recorder.calls[1].rect, Rect { x: 375.0, y: 0.0, width: 375.0, height: 281.5 });
}

#[test]
fn scene_with_bad_image_fails_before_any_frame() {
    let fx = Fixture::new("scene-bad-image");
    let manifest = fx.write("tiles.json", r#"{ "grassTile": "missing.png" }"#);
    let level = fx.write("level.txt", "GG\n");

    let err = EngineBuilder::new()
        .with_manifest(&manifest)
        .with_level(&level)
        .load_scene()
        .unwrap_err();
    assert!(matches!(err, Error::Manifest(ManifestLoadError::Image { .. })));
}

#[test]
fn scene_with_ragged_level_is_malformed() {
    let fx = Fixture::new("scene-ragged");
    let (manifest, level) = write_assets(&fx, "GGGGG\nGGG\n");

    let err = Scene::load(&manifest, &level, &CanvasConfig::REFERENCE).unwrap_err();
    assert!(matches!(
        err,
        Error::Malformed(MalformedLevel::Ragged { row: 1, expected: 5, found: 3 })
    ));
}

#[test]
fn scene_with_empty_level_is_malformed() {
    let fx = Fixture::new("scene-empty");
    let (manifest, level) = write_assets(&fx, "");
    let err = Scene::load(&manifest, &level, &CanvasConfig::REFERENCE).unwrap_err();
    assert!(matches!(err, Error::Malformed(MalformedLevel::Empty)));
}

#[test]
fn scene_with_missing_level_is_a_level_error() {
    let fx = Fixture::new("scene-no-level");
    let (manifest, _) = write_assets(&fx, "GG\n");
    let err = Scene::load(&manifest, fx.path("absent.txt"), &CanvasConfig::REFERENCE).unwrap_err();
    assert!(matches!(err, Error::Level(_)));
}

#[test]
fn bundled_assets_load_cleanly() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let scene = Scene::load(
        root.join("tiles.json"),
        root.join("level.txt"),
        &CanvasConfig::REFERENCE,
    )
    .unwrap();

    let mut recorder = DrawRecorder::new();
    let drawn = scene.render(&mut recorder);
    // Every cell of the bundled level maps to a bundled image.
    assert_eq!(drawn, scene.grid().rows() * scene.grid().columns());
}
