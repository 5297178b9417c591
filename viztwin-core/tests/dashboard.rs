use viztwin_core::picking::{GROUND_FLOOR_SLAB, MAIN_ENTRANCE_DOOR};
use viztwin_core::scene::Shape;
use viztwin_core::{
    App, GroupId, History, Layer, MemoryHistory, Page, PointerEvent, Tick, ViewerConfig,
};

fn app_at(path: &str) -> App<MemoryHistory> {
    App::new(MemoryHistory::new(path), ViewerConfig::default())
}

#[test]
fn drag_then_click_on_dashboard() {
    let mut app = app_at("/dashboard");
    assert_eq!(app.page(), Page::Dashboard);

    let before = app.viewer.frame();
    let _ = app.viewer.handle_pointer(PointerEvent::Down { x: 200.0, y: 200.0 });
    let update = app.viewer.handle_pointer(PointerEvent::Move { x: 260.0, y: 230.0 });
    assert!(update.needs_redraw());
    let _ = app.viewer.handle_pointer(PointerEvent::Up);
    let after = app.viewer.frame();

    // faces moved, screen-space overlays did not
    assert_ne!(before.commands[..6], after.commands[..6]);
    assert_eq!(before.commands[6..], after.commands[6..]);

    let _ = app.viewer.handle_pointer(PointerEvent::Click { x: 520.0, y: 480.0 });
    assert_eq!(app.viewer.selected(), Some(&MAIN_ENTRANCE_DOOR));
    let _ = app.viewer.handle_pointer(PointerEvent::Click { x: 900.0, y: 690.0 });
    assert_eq!(app.viewer.selected(), Some(&GROUND_FLOOR_SLAB));
}

#[test]
fn hidden_group_never_draws_children() {
    let mut app = app_at("/dashboard");
    let _ = app.viewer.toggle_visibility(GroupId::Structure);
    // toggling a child under a hidden group changes nothing on screen
    let _ = app.viewer.toggle_visibility(Layer::Walls);
    let _ = app.viewer.toggle_visibility(Layer::Walls);

    let frame = app.viewer.frame();
    assert!(frame
        .commands
        .iter()
        .all(|c| !matches!(c.layer, Layer::Walls | Layer::Floors | Layer::Ceilings | Layer::Columns)));

    let _ = app.viewer.toggle_visibility(GroupId::Structure);
    let frame = app.viewer.frame();
    let faces = frame
        .commands
        .iter()
        .filter(|c| matches!(c.shape, Shape::Polygon(_)))
        .count();
    assert_eq!(faces, 6);
}

#[test]
fn library_flow() {
    let mut app = app_at("/library");
    app.library.begin_rename("5").unwrap();
    app.library.edit_draft("Old Town Hall").unwrap();
    app.library.save_rename().unwrap();
    assert_eq!(app.library.get("5").unwrap().name, "Old Town Hall");
    assert_eq!(app.library.get("5").unwrap().date, "Sep 20, 2025");

    app.library.delete("5").unwrap();
    assert_eq!(app.library.len(), 5);

    app.open_dashboard();
    assert_eq!(app.router.history().location(), "/dashboard");
}

#[test]
fn unknown_start_path_is_home() {
    let app = app_at("/does-not-exist");
    assert_eq!(app.page(), Page::Home);
}

#[test]
fn upload_from_dashboard() {
    let mut app = app_at("/dashboard");
    assert!(app.start_upload());
    let progress: Vec<u8> = std::iter::from_fn(|| match app.upload_tick() {
        Tick::Advanced(p) => Some(p),
        _ => None,
    })
    .collect();
    assert_eq!(progress, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    assert!(!app.upload.is_processing());
}
