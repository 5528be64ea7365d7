use formwork::outside::Boundary;
use ratatui::layout::Rect;

#[test]
fn test_pointer_inside_region_does_not_dismiss() {
    let boundary = Boundary::new();
    boundary.register_region(Rect::new(5, 5, 20, 1));
    assert!(!boundary.pointer_down(5, 5));
    assert!(!boundary.pointer_down(24, 5));
}

#[test]
fn test_pointer_outside_every_region_dismisses() {
    let boundary = Boundary::new();
    boundary.register_region(Rect::new(5, 5, 20, 1));
    boundary.register_region(Rect::new(5, 6, 20, 4));
    assert!(boundary.pointer_down(0, 0));
    assert!(boundary.pointer_down(25, 5));
    assert!(boundary.pointer_down(5, 10));
}

#[test]
fn test_pointer_inside_popup_region_does_not_dismiss() {
    let boundary = Boundary::new();
    boundary.register_region(Rect::new(5, 5, 20, 1)); // trigger
    boundary.register_region(Rect::new(5, 6, 20, 4)); // open popup
    assert!(!boundary.pointer_down(10, 8));
}

#[test]
fn test_reset_regions_forgets_popup() {
    let boundary = Boundary::new();
    boundary.register_region(Rect::new(5, 6, 20, 4));
    assert!(!boundary.pointer_down(10, 8));

    boundary.reset_regions();
    boundary.register_region(Rect::new(5, 5, 20, 1));
    assert!(boundary.pointer_down(10, 8));
}

#[test]
fn test_focus_moving_within_subtree_does_not_dismiss() {
    let boundary = Boundary::new();
    boundary.register_member("__autocomplete_0");
    boundary.register_member("__autocomplete_0_list");
    assert!(!boundary.focus_moved(Some("__autocomplete_0_list")));
    assert!(!boundary.focus_moved(Some("__autocomplete_0")));
}

#[test]
fn test_focus_moving_outside_subtree_dismisses() {
    let boundary = Boundary::new();
    boundary.register_member("__autocomplete_0");
    assert!(boundary.focus_moved(Some("__input_3")));
    assert!(boundary.focus_moved(None));
}
