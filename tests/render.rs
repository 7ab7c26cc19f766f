use cairo::{Context, ImageSurface};
use lanternpost::card::{CardName, CardRenderer, CardSession, RenderConfig, SessionError};
use lanternpost::config::Config;
use lanternpost::draw::border::{Edge, TILE_SIZE, plan_border};
use lanternpost::draw::celestial::{crescent_area, paint_moon};
use lanternpost::draw::{Palette, Surface};
use lanternpost::export::{download_filename, share::share_caption};
use std::sync::Arc;

fn small_config() -> Arc<RenderConfig> {
    let mut config = Config::default();
    config.canvas.width = 360.0;
    config.canvas.height = 640.0;
    config.fonts.timeout_ms = 200;
    Arc::new(RenderConfig::from_config(&config))
}

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

fn surface_has_pixels(surface: &mut ImageSurface) -> bool {
    surface
        .data()
        .map(|data| data.iter().any(|byte| *byte != 0))
        .unwrap_or(false)
}

#[test]
fn any_non_empty_name_renders_and_names_the_file() {
    let mut renderer = CardRenderer::new(small_config()).unwrap();
    for raw in ["Ahmed", "عبد الرحمن", "e\u{301}\u{327}", "🌙✨", "Ahmed محمد 123"] {
        let name = CardName::parse(raw).unwrap();
        renderer.render(&name).unwrap();
        assert_eq!(download_filename(&name), format!("Ramadan_{}.png", raw));
    }
}

#[test]
fn ahmed_card_has_expected_export_metadata() {
    let name = CardName::parse("Ahmed").unwrap();
    assert_eq!(download_filename(&name), "Ramadan_Ahmed.png");
    let caption = share_caption(&Config::default().share, &name);
    assert!(caption.contains("Ahmed"));
    assert!(caption.contains("https://i3j.io"));
}

#[test]
fn same_name_twice_is_pixel_identical() {
    let name = CardName::parse("Ahmed").unwrap();
    let mut first = CardRenderer::new(small_config()).unwrap();
    first.render(&name).unwrap();
    let mut second = CardRenderer::new(small_config()).unwrap();
    second.render(&name).unwrap();
    second.render(&name).unwrap();
    assert_eq!(first.pixels().unwrap(), second.pixels().unwrap());
}

#[test]
fn different_names_change_only_the_picture_not_the_size() {
    let mut renderer = CardRenderer::new(small_config()).unwrap();
    renderer.render(&CardName::parse("Ahmed").unwrap()).unwrap();
    let ahmed = renderer.pixels().unwrap();
    renderer.render(&CardName::parse("Fatima Zahra").unwrap()).unwrap();
    let fatima = renderer.pixels().unwrap();
    assert_eq!(ahmed.len(), fatima.len());
    assert_ne!(ahmed, fatima);
}

#[test]
fn setup_twice_keeps_logical_area() {
    let mut surface = Surface::setup(1080.0, 1920.0, 2.0).unwrap();
    surface.reset(1080.0, 1920.0, 2.0).unwrap();
    surface.reset(1080.0, 1920.0, 2.0).unwrap();
    let (w, h) = surface.drawable_area();
    assert!((w - 1080.0).abs() < 1e-9);
    assert!((h - 1920.0).abs() < 1e-9);
    assert_eq!(surface.pixel_size(), (2160, 3840));
}

#[test]
fn border_counts_and_alternation_on_stock_card() {
    let palette = Palette::default();
    let motifs = plan_border(1080.0, 1920.0, TILE_SIZE, &palette);
    for (edge, expected) in [(Edge::Top, 27), (Edge::Bottom, 27), (Edge::Left, 46), (Edge::Right, 46)] {
        let tiles: Vec<_> = motifs.iter().filter(|m| m.edge == edge).collect();
        assert_eq!(tiles.len(), expected, "{:?}", edge);
        assert!(tiles.windows(2).all(|w| w[0].primary != w[1].primary));
    }
}

#[test]
fn crescent_is_partial_disc() {
    for radius in [1.0, 100.0, 250.0] {
        let area = crescent_area(radius);
        assert!(area > 0.0 && area < std::f64::consts::PI * radius * radius);
    }
}

#[test]
fn moon_paints_onto_plain_surface() {
    let (mut surface, ctx) = surface_with_context(200, 200);
    paint_moon(&ctx, 100.0, 100.0, 50.0, &Palette::default()).unwrap();
    drop(ctx);
    assert!(surface_has_pixels(&mut surface));
}

#[test]
fn top_left_corner_shows_border_fill() {
    let config = small_config();
    let mut renderer = CardRenderer::new(config.clone()).unwrap();
    renderer.render(&CardName::parse("Ahmed").unwrap()).unwrap();
    let pixels = renderer.pixels().unwrap();
    let width = 360;
    // Bottom row of the first top tile is solid accent red (BGRA in memory).
    let px = &pixels[(38 * width + 20) * 4..(38 * width + 20) * 4 + 4];
    assert!(px[2] > 180, "red channel {:?}", px);
    assert!(px[1] < 40, "green channel {:?}", px);
}

#[tokio::test]
async fn session_rejects_blank_and_renders_valid_names() {
    let session = CardSession::new(small_config()).unwrap();
    assert!(matches!(session.generate("\t").await, Err(SessionError::Validation(_))));
    assert!(session.state().is_empty());

    let name = session.generate("Ahmed").await.unwrap();
    assert_eq!(session.state().name(), Some(&name));
}
