use super::*;

#[test]
fn opacity_scales_alpha() {
    let c = Rgba::WHITE.opacity(0.7);
    assert_eq!((c.r, c.g, c.b), (255, 255, 255));
    assert!((c.a - 0.7).abs() < 1e-12);

    let half = c.opacity(0.5);
    assert!((half.a - 0.35).abs() < 1e-12);
}

#[test]
fn translucent_white_over_black_is_gray() {
    let c = Rgba::WHITE.opacity(0.7).over(Rgba::BLACK);
    assert!((178..=179).contains(&c.r));
    assert_eq!((c.r, c.r), (c.g, c.b));
    assert!((c.a - 1.0).abs() < 1e-9);
}

#[test]
fn clear_over_anything_leaves_backdrop() {
    assert_eq!(Rgba::CLEAR.over(Rgba::BLUE), Rgba::BLUE);
}

#[test]
fn opaque_source_replaces_backdrop() {
    assert_eq!(Rgba::YELLOW.over(Rgba::BLUE), Rgba::YELLOW);
}

#[test]
fn lerp_from_clear_keeps_hue() {
    // Premultiplied: halfway from clear to white is still white, half as opaque.
    let mid = Rgba::CLEAR.lerp(Rgba::WHITE, 0.5);
    assert_eq!((mid.r, mid.g, mid.b), (255, 255, 255));
    assert!((mid.a - 0.5).abs() < 1e-12);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(Rgba::RED.lerp(Rgba::BLUE, 0.0), Rgba::RED);
    assert_eq!(Rgba::RED.lerp(Rgba::BLUE, 1.0), Rgba::BLUE);
    // Out-of-range t is clamped.
    assert_eq!(Rgba::RED.lerp(Rgba::BLUE, 4.0), Rgba::BLUE);
}

#[test]
fn parses_names_case_insensitively() {
    assert_eq!("black".parse::<Rgba>().unwrap(), Rgba::BLACK);
    assert_eq!("Yellow".parse::<Rgba>().unwrap(), Rgba::YELLOW);
    assert_eq!("transparent".parse::<Rgba>().unwrap(), Rgba::CLEAR);
    assert_eq!("clear".parse::<Rgba>().unwrap(), Rgba::CLEAR);
}

#[test]
fn parses_hex() {
    assert_eq!("#102030".parse::<Rgba>().unwrap(), Rgba::rgb(0x10, 0x20, 0x30));

    let c: Rgba = "#ffffff80".parse().unwrap();
    assert_eq!((c.r, c.g, c.b), (255, 255, 255));
    assert!((c.a - 128.0 / 255.0).abs() < 1e-12);
}

#[test]
fn parses_opacity_suffix() {
    let c: Rgba = "white@0.7".parse().unwrap();
    assert_eq!(c, Rgba::WHITE.opacity(0.7));

    let c: Rgba = " #000000 @ 0.5 ".parse().unwrap();
    assert!((c.a - 0.5).abs() < 1e-12);
}

#[test]
fn rejects_bad_input() {
    assert!("mauve".parse::<Rgba>().is_err());
    assert!("#12345".parse::<Rgba>().is_err());
    assert!("#gg0000".parse::<Rgba>().is_err());
    assert!("#+1+2+3".parse::<Rgba>().is_err());
    assert!("#-1-2-3".parse::<Rgba>().is_err());
    assert!("white@1.5".parse::<Rgba>().is_err());
    assert!("white@lots".parse::<Rgba>().is_err());
}

#[test]
fn unknown_name_error_mentions_input() {
    let err = "mauve".parse::<Rgba>().unwrap_err();
    assert!(err.to_string().contains("mauve"));
}

#[test]
fn terminal_round_trip_for_rgb() {
    let c = Rgba::rgb(1, 2, 3);
    assert_eq!(Rgba::from_terminal(c.to_terminal()), Some(c));
    assert_eq!(Rgba::from_terminal(Color::Reset), None);
}
