use formwork::color::{Color, StyleColor};
use formwork::theme::{DefaultTheme, Theme, resolve_color, resolve_style_color};

#[test]
fn test_default_theme_resolves_colors() {
    let theme = DefaultTheme::dark();

    assert!(theme.resolve("primary").is_some());
    assert!(theme.resolve("error").is_some());
    assert!(theme.resolve("highlight").is_some());
    assert!(theme.resolve("unknown_color").is_none());
}

#[test]
fn test_default_theme_aliases() {
    let theme = DefaultTheme::dark();

    assert_eq!(theme.resolve("fg"), theme.resolve("text"));
    assert_eq!(theme.resolve("muted"), theme.resolve("text_muted"));
    assert_eq!(theme.resolve("danger"), theme.resolve("error"));
}

#[test]
fn test_light_theme_differs_from_dark() {
    let dark = DefaultTheme::dark();
    let light = DefaultTheme::light();
    assert_ne!(dark.resolve("background"), light.resolve("background"));
    assert_ne!(dark.resolve("text"), light.resolve("text"));
}

#[test]
fn test_resolve_color_concrete_passthrough() {
    let theme = DefaultTheme::dark();
    let literal = StyleColor::Concrete(Color::CYAN);
    assert_eq!(resolve_color(&literal, &theme), Color::CYAN);
}

#[test]
fn test_resolve_color_named_lookup() {
    let theme = DefaultTheme::dark();
    let named = StyleColor::named("error");
    assert_eq!(resolve_color(&named, &theme), Color::RED);
}

#[test]
fn test_resolve_color_unknown_falls_back() {
    let theme = DefaultTheme::dark();
    let named = StyleColor::named("no_such_color");
    assert_eq!(resolve_color(&named, &theme), Color::GRAY);
    assert_eq!(resolve_style_color(&named, &theme), None);
}

#[test]
fn test_color_names_cover_every_resolvable_name() {
    let theme = DefaultTheme::dark();
    for name in theme.color_names() {
        assert!(theme.resolve(name).is_some(), "{name} listed but unresolvable");
    }
}
