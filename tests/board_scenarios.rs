//! End-to-end board behavior through the public API, without a terminal.

use stickies::prelude::*;
use stickies::store::{parse_board, render_board};

fn note(id: &str, top: i32, left: i32) -> Note {
    Note {
        id: NoteId::from(id),
        position: Position { top, left },
        scale: Scale {
            width: 200,
            height: 150,
        },
        theme: Theme::Pink,
        title: format!("title {id}"),
        content: format!("content {id}"),
    }
}

fn board() -> NoteRegistry {
    NoteRegistry::new().add(note("n1", 50, 50)).add(note("n2", 300, 400))
}

#[test]
fn test_move_resize_and_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("data").join("sticky-notes.json"));
    store.save(&board()).unwrap();

    let mut registry = store.load();
    let mut controller = InteractionController::new(0);
    let id = NoteId::from("n1");

    // Move by (+30, +20).
    assert!(controller.on_press(&mut registry, &id, Pointer::new(150, 120)));
    controller.on_pointer_move(Pointer::new(170, 130));
    controller.on_pointer_move(Pointer::new(180, 140));
    let outcome = controller.on_pointer_release(&mut registry, &ReleaseTarget::Surface);
    assert_eq!(outcome, ReleaseOutcome::Committed(id.clone()));

    // Widen from the right edge by 40.
    let right_edge = Pointer::new(80 + 200 - 2, 140);
    assert_eq!(
        controller.on_pointer_hover(&id, registry.find_by_id(&id).unwrap().note_box(), right_edge),
        Zone::ResizeRight
    );
    assert!(controller.on_press(&mut registry, &id, right_edge));
    controller.on_pointer_move(Pointer::new(right_edge.x + 40, 140));
    controller.on_pointer_release(&mut registry, &ReleaseTarget::Surface);

    store.save(&registry).unwrap();
    let reloaded = JsonFileStore::new(store.path()).load();
    let n1 = reloaded.find_by_id(&id).unwrap();
    assert_eq!(n1.position, Position { top: 70, left: 80 });
    assert_eq!(
        n1.scale,
        Scale {
            width: 240,
            height: 150
        }
    );
    // n1 was raised, so it is now last.
    assert_eq!(reloaded.ids(), vec![NoteId::from("n2"), id]);
}

#[test]
fn test_delete_on_release_survives_reload() {
    let store = MemoryStore::new();
    store.save(&board()).unwrap();
    let mut registry = store.load();
    let mut controller = InteractionController::new(0);
    let id = NoteId::from("n2");

    controller.on_press(&mut registry, &id, Pointer::new(450, 350));
    let outcome = controller.on_pointer_release(&mut registry, &ReleaseTarget::Delete(id.clone()));
    assert_eq!(outcome, ReleaseOutcome::Deleted(id));
    store.save(&registry).unwrap();

    assert_eq!(store.load().ids(), vec![NoteId::from("n1")]);
}

#[test]
fn test_corrupt_board_loads_empty() {
    let store = MemoryStore::with_blob("{ not json");
    assert!(store.try_load().is_err());
    assert!(store.load().is_empty());
}

#[test]
fn test_board_json_shape() {
    let text = render_board(&NoteRegistry::new().add(note("n1", 5, 6))).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["id"], "n1");
    assert_eq!(value[0]["position"]["top"], 5);
    assert_eq!(value[0]["scale"]["width"], 200);
    assert_eq!(value[0]["theme"], "pink");
    assert_eq!(parse_board(&text).unwrap().len(), 1);
}
