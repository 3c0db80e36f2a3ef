use lignee_core::{Generation, PersonData};
use lignee_layout::color::{Rgb, mean_hue};
use lignee_layout::{DEFAULT_PALETTE, LayoutOptions, PaletteError, blend_colors, is_light, layout};

fn tree(generations: &[&[(&str, &[&str])]]) -> Vec<Generation> {
    generations
        .iter()
        .map(|people| {
            people
                .iter()
                .map(|(name, children)| {
                    (name.to_string(), PersonData::new(children.iter().copied()))
                })
                .collect()
        })
        .collect()
}

#[test]
fn rgb_from_hex_accepts_optional_hash_only() {
    assert_eq!(
        Rgb::from_hex("#ff0000"),
        Some(Rgb {
            r: 1.0,
            g: 0.0,
            b: 0.0
        })
    );
    assert!(Rgb::from_hex("00FF00").is_some());
    assert_eq!(Rgb::from_hex("#fff"), None);
    assert_eq!(Rgb::from_hex("red"), None);
    assert_eq!(Rgb::from_hex("#gg0000"), None);
}

#[test]
fn hsv_conversion_preserves_palette_colors() {
    let rgb = Rgb::from_hex("#4ECDC4").unwrap();
    assert_eq!(rgb.to_hsv().to_rgb().to_hex(), "#4ecdc4");
}

#[test]
fn mean_hue_wraps_only_for_two_distant_hues() {
    assert!((mean_hue(&[0.1, 0.95]) - 0.025).abs() < 1e-12);
    assert!((mean_hue(&[0.2, 0.4]) - 0.3).abs() < 1e-12);
    // Three hues average arithmetically even across the wrap point.
    let three = mean_hue(&[0.1, 0.95, 0.5]);
    assert!((three - (0.1 + 0.95 + 0.5) / 3.0).abs() < 1e-12);
}

#[test]
fn blend_of_a_single_color_is_untouched() {
    assert_eq!(blend_colors(&["#FF6B6B"]).as_deref(), Some("#FF6B6B"));
}

#[test]
fn blend_counts_identical_colors_once() {
    assert_eq!(
        blend_colors(&["#FF6B6B", "#FF6B6B"]).as_deref(),
        Some("#ff6b6b")
    );
}

#[test]
fn blend_averages_hue_across_red() {
    // Hues 0.1 and ~0.95 meet just past red, not in the cyan half of the wheel.
    let out = blend_colors(&["#ff9900", "#ff004d"]).unwrap();
    assert_eq!(out.len(), 7);
    assert_eq!(out, out.to_lowercase());
    let hue = Rgb::from_hex(&out).unwrap().to_hsv().h;
    assert!((hue - 0.025).abs() < 0.005, "{out} has hue {hue}");
}

#[test]
fn blend_ignores_unparseable_entries() {
    assert_eq!(blend_colors(&[]), None);
    assert_eq!(blend_colors(&["nope", "nada"]), None);
}

#[test]
fn is_light_uses_luminance_threshold() {
    assert!(is_light("#FFEAA7"));
    assert!(is_light("#45B7D1"));
    assert!(!is_light("#000000"));
    assert!(!is_light("#1F2A44"));
}

#[test]
fn layout_options_validate_palette() {
    assert_eq!(LayoutOptions::default().validate(), Ok(()));
    assert_eq!(LayoutOptions::default().palette.len(), DEFAULT_PALETTE.len());

    let empty = LayoutOptions { palette: vec![] };
    assert_eq!(empty.validate(), Err(PaletteError::Empty));

    let bad = LayoutOptions {
        palette: vec!["#000000".into(), "teal".into()],
    };
    assert_eq!(
        bad.validate(),
        Err(PaletteError::InvalidColor {
            color: "teal".into()
        })
    );
}

#[test]
fn layout_options_deserialize_with_defaults() {
    let opts: LayoutOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, LayoutOptions::default());

    let opts: LayoutOptions = serde_json::from_str(r##"{"palette":["#123456"]}"##).unwrap();
    assert_eq!(opts.palette, vec!["#123456"]);
}

#[test]
fn roots_take_palette_colors_and_children_inherit() {
    let g = layout(
        &tree(&[
            &[("A", &["X"])],
            &[("X", &["P"]), ("O", &["Q", "R"])],
            &[("P", &[]), ("Q", &[]), ("R", &[])],
        ]),
        &LayoutOptions::default(),
    );
    let color = |r#gen: usize, name: &str| g[g.find(r#gen, name).unwrap()].color.clone().unwrap();

    // The palette counter starts past the first generation.
    assert_eq!(color(0, "A"), "#4ECDC4");
    assert_eq!(color(1, "O"), "#45B7D1");
    assert_eq!(color(1, "X"), "#4ECDC4");
    assert_eq!(color(2, "P"), "#4ECDC4");
    assert_eq!(color(2, "Q"), "#45B7D1");
}

#[test]
fn first_root_color_skips_one_slot_per_first_generation_person() {
    let palette: Vec<String> = ["#000000", "#111111", "#222222", "#333333", "#444444"]
        .map(String::from)
        .to_vec();
    let g = layout(
        &tree(&[&[("A", &[]), ("B", &[]), ("C", &[])]]),
        &LayoutOptions {
            palette: palette.clone(),
        },
    );

    let colors: Vec<String> = g
        .generation(0)
        .iter()
        .map(|&id| g[id].color.clone().unwrap())
        .collect();
    assert_eq!(colors, vec!["#333333", "#444444", "#000000"]);
}

#[test]
fn children_of_two_colored_parents_get_a_blend() {
    let g = layout(
        &tree(&[&[("A", &["X"]), ("B", &["X"])], &[("X", &[])]]),
        &LayoutOptions::default(),
    );
    let a = g[g.find(0, "A").unwrap()].color.clone().unwrap();
    let b = g[g.find(0, "B").unwrap()].color.clone().unwrap();
    let x = g[g.find(1, "X").unwrap()].color.clone().unwrap();

    assert_eq!(a, "#45B7D1");
    assert_eq!(b, "#96CEB4");
    assert_eq!(Some(x), blend_colors(&["#45B7D1", "#96CEB4"]));
}

#[test]
fn every_person_gets_a_color() {
    let g = layout(
        &tree(&[
            &[("A", &["X", "Y"]), ("B", &["Y"]), ("C", &[])],
            &[("X", &[]), ("Y", &["Z"]), ("W", &["Z"])],
            &[("Z", &[])],
        ]),
        &LayoutOptions::default(),
    );
    for (_, p) in g.people() {
        assert!(p.color.is_some(), "{} has no color", p.name);
    }
}
