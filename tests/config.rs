use reactor_story::config::{SceneConfig, VignetteConfig};
use reactor_story::{Scene, VizError};

#[test]
fn defaults_are_the_authored_values() {
    let config = SceneConfig::default();
    assert_eq!(config.seed, None);
    assert_eq!((config.scroll.pages, config.scroll.damping), (5.0, 0.3));
    assert_eq!(config.camera.position, [0.0, 0.0, 20.0]);
    assert_eq!(config.camera.fov, 50.0);
    assert_eq!(config.render.background, "#050510");
    assert_eq!(config.core.displacement_strength, 0.8);
    assert_eq!(config.core.glow, "#ff3300");
    assert_eq!(config.counts.shell_rocks, 80);
    assert_eq!(config.counts.tunnel_rocks, 100);
    assert_eq!(config.counts.rays, 60);
    assert_eq!(config.counts.stars, 600);
    assert_eq!(config.post.bloom_threshold, 0.2);
    assert_eq!(config.post.bloom_intensity, 1.5);
    assert_eq!(config.post.noise_opacity, 0.02);
    assert_eq!(
        config.post.vignette,
        Some(VignetteConfig {
            offset: 0.1,
            darkness: 0.9
        })
    );
    assert_eq!(config.audio.frequency, 60.0);
}

#[test]
fn empty_object_is_default() {
    assert_eq!(SceneConfig::from_json("{}").unwrap(), SceneConfig::default());
}

#[test]
fn partial_json_overrides_only_what_it_names() {
    let config = SceneConfig::from_json(
        r##"{
            "seed": 7,
            "counts": { "stars": 50 },
            "post": { "vignette": null },
            "render": { "background": "#000000" }
        }"##,
    )
    .unwrap();

    assert_eq!(config.seed, Some(7));
    assert_eq!(config.counts.stars, 50);
    assert_eq!(config.counts.shell_rocks, 80);
    assert_eq!(config.post.vignette, None);
    assert!(config.post.enabled);
    assert_eq!(config.render.background, "#000000");
    assert_eq!(config.render.max_pixel_ratio, 1.5);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = SceneConfig::from_json("{ \"seed\": \"many\" }").unwrap_err();
    assert!(matches!(err, VizError::Config(_)), "{err}");
}

#[test]
fn pixel_ratio_is_clamped_per_breakpoint() {
    let render = SceneConfig::default().render;
    assert_eq!(render.pixel_ratio(3.0, 1440.0), 1.5);
    assert_eq!(render.pixel_ratio(3.0, 390.0), 1.2);
    assert_eq!(render.pixel_ratio(0.5, 1440.0), 1.0);
    assert_eq!(render.pixel_ratio(1.25, 1440.0), 1.25);
    assert_eq!(render.pixel_ratio(f32::NAN, 1440.0), 1.0);
}

#[test]
fn bad_colour_fails_scene_construction() {
    let mut config = SceneConfig::default();
    config.core.glow = "orange".into();
    match Scene::new(&config) {
        Err(VizError::InvalidColor(c)) => assert_eq!(c, "orange"),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("scene accepted a bad colour"),
    }
}
