//! Pointer interaction state machine.
//!
//! `Idle → Dragging(zone) → Idle`. Hovering an idle note re-detects its zone
//! on every movement and arms it; a press opens a [`DragSession`] with the
//! armed zone and raises the note; moves update the session's live box; a
//! release classifies its target and commits.

use crate::interaction::session::DragSession;
use crate::interaction::zone::{Zone, detect_zone};
use crate::note::{NoteBox, NoteId, Pointer};
use crate::registry::{NotePatch, NoteRegistry};

/// Control a pointer can be released over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTarget {
    /// Delete marker of the given note.
    Delete(NoteId),
    /// Edit marker of the given note.
    Edit(NoteId),
    /// Anything else.
    Surface,
}

/// What a release resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Final geometry written back to the registry.
    Committed(NoteId),
    /// Note removed from the registry.
    Deleted(NoteId),
    /// Geometry committed and the note's edit form should open.
    EditRequested(NoteId),
    /// No session was open.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReleaseAction {
    Delete,
    Edit,
    Commit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Armed {
    note_id: NoteId,
    zone: Zone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionController {
    surface_offset: i32,
    armed: Option<Armed>,
    session: Option<DragSession>,
}

impl InteractionController {
    /// `surface_offset` is the page height above the note surface.
    pub const fn new(surface_offset: i32) -> Self {
        Self {
            surface_offset,
            armed: None,
            session: None,
        }
    }

    pub const fn surface_offset(&self) -> i32 {
        self.surface_offset
    }

    pub const fn set_surface_offset(&mut self, offset: i32) {
        self.surface_offset = offset;
    }

    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Zone armed for `note_id` by the latest hover, if any.
    pub fn armed_zone(&self, note_id: &NoteId) -> Option<Zone> {
        self.armed
            .as_ref()
            .filter(|armed| &armed.note_id == note_id)
            .map(|armed| armed.zone)
    }

    /// Note currently under an idle pointer, with its zone.
    pub fn hovered(&self) -> Option<(&NoteId, Zone)> {
        self.armed.as_ref().map(|armed| (&armed.note_id, armed.zone))
    }

    /// Box to draw for `note_id`: the live one while it is being dragged.
    pub fn live_box(&self, note_id: &NoteId) -> Option<NoteBox> {
        self.session
            .as_ref()
            .filter(|session| session.note_id() == note_id)
            .map(DragSession::live_box)
    }

    /// Re-detect and arm the zone under the pointer.
    ///
    /// While a drag is in progress hovering changes nothing and the
    /// session's zone is reported.
    pub fn on_pointer_hover(
        &mut self,
        note_id: &NoteId,
        note_box: NoteBox,
        pointer: Pointer,
    ) -> Zone {
        if let Some(session) = &self.session {
            return session.zone();
        }
        let zone = detect_zone(pointer, note_box, self.surface_offset);
        self.armed = Some(Armed {
            note_id: note_id.clone(),
            zone,
        });
        zone
    }

    /// Pointer left every note while idle.
    pub fn clear_hover(&mut self) {
        if self.session.is_none() {
            self.armed = None;
        }
    }

    /// Open a drag on `note_id` and raise it to the top.
    ///
    /// Returns false without touching anything when a session is already
    /// open or the note is not in the registry.
    pub fn on_press_start(
        &mut self,
        registry: &mut NoteRegistry,
        note_id: &NoteId,
        pointer: Pointer,
        zone: Zone,
    ) -> bool {
        if self.session.is_some() {
            tracing::debug!(note = %note_id, "press ignored, drag already open");
            return false;
        }
        let Some(note) = registry.find_by_id(note_id) else {
            tracing::debug!(note = %note_id, "press on unknown note");
            return false;
        };
        let live_box = note.note_box();
        *registry = std::mem::take(registry).raise_to_top(note_id);
        self.session = Some(DragSession::open(
            note_id.clone(),
            zone,
            pointer,
            live_box,
            self.surface_offset,
        ));
        tracing::debug!(note = %note_id, ?zone, x = pointer.x, y = pointer.y, "drag opened");
        true
    }

    /// Press using the armed zone, or detecting one at the press position
    /// when the pointer never hovered this note.
    pub fn on_press(
        &mut self,
        registry: &mut NoteRegistry,
        note_id: &NoteId,
        pointer: Pointer,
    ) -> bool {
        let zone = match self.armed_zone(note_id) {
            Some(zone) => zone,
            None => match registry.find_by_id(note_id) {
                Some(note) => detect_zone(pointer, note.note_box(), self.surface_offset),
                None => return false,
            },
        };
        self.on_press_start(registry, note_id, pointer, zone)
    }

    /// Feed one pointer move to the open session. Ignored when idle.
    pub fn on_pointer_move(&mut self, pointer: Pointer) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.apply_move(pointer);
        true
    }

    /// Close the session and resolve the release.
    pub fn on_pointer_release(
        &mut self,
        registry: &mut NoteRegistry,
        target: &ReleaseTarget,
    ) -> ReleaseOutcome {
        let Some(session) = self.session.take() else {
            return ReleaseOutcome::Ignored;
        };
        self.armed = None;
        let note_id = session.note_id().clone();

        match classify(target, &note_id) {
            ReleaseAction::Delete => {
                *registry = std::mem::take(registry).remove(&note_id);
                tracing::debug!(note = %note_id, "note deleted on release");
                ReleaseOutcome::Deleted(note_id)
            }
            ReleaseAction::Edit => {
                commit(registry, &session);
                ReleaseOutcome::EditRequested(note_id)
            }
            ReleaseAction::Commit => {
                commit(registry, &session);
                ReleaseOutcome::Committed(note_id)
            }
        }
    }

    /// The pointer left the surface or the terminal lost focus.
    ///
    /// An open session is committed as if released on the surface, so a
    /// release that never arrives cannot leave the drag open.
    pub fn on_surface_leave(&mut self, registry: &mut NoteRegistry) -> ReleaseOutcome {
        self.armed = None;
        if self.session.is_none() {
            return ReleaseOutcome::Ignored;
        }
        tracing::debug!("surface left during drag, committing");
        self.on_pointer_release(registry, &ReleaseTarget::Surface)
    }
}

fn classify(target: &ReleaseTarget, note_id: &NoteId) -> ReleaseAction {
    match target {
        ReleaseTarget::Delete(id) if id == note_id => ReleaseAction::Delete,
        ReleaseTarget::Edit(id) if id == note_id => ReleaseAction::Edit,
        _ => ReleaseAction::Commit,
    }
}

fn commit(registry: &mut NoteRegistry, session: &DragSession) {
    let live = session.live_box();
    let note_id = session.note_id();
    if !registry.contains(note_id) {
        tracing::debug!(note = %note_id, "commit skipped, note is gone");
        return;
    }
    *registry = std::mem::take(registry).update(
        note_id,
        NotePatch::geometry(live.position(), live.scale()),
    );
    tracing::debug!(
        note = %note_id,
        top = live.top,
        left = live.left,
        width = live.width,
        height = live.height,
        "geometry committed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{Note, Position, Scale, Theme};
    use proptest::prelude::*;

    fn note(id: &str, top: i32, left: i32, width: i32, height: i32) -> Note {
        Note {
            id: NoteId::from(id),
            position: Position { top, left },
            scale: Scale { width, height },
            theme: Theme::Blue,
            title: id.to_string(),
            content: String::new(),
        }
    }

    fn board() -> NoteRegistry {
        NoteRegistry::new()
            .add(note("n1", 50, 50, 200, 150))
            .add(note("n2", 300, 300, 120, 120))
    }

    fn n1() -> NoteId {
        NoteId::from("n1")
    }

    #[test]
    fn test_move_scenario_commits_final_position() {
        let mut registry = NoteRegistry::new().add(note("n1", 50, 50, 200, 150));
        let mut ctl = InteractionController::new(0);

        assert!(ctl.on_press_start(&mut registry, &n1(), Pointer::new(60, 60), Zone::Move));
        assert!(ctl.on_pointer_move(Pointer::new(70, 55)));
        let outcome = ctl.on_pointer_release(&mut registry, &ReleaseTarget::Surface);

        assert_eq!(outcome, ReleaseOutcome::Committed(n1()));
        let committed = registry.find_by_id(&n1()).unwrap();
        assert_eq!(committed.position, Position { top: 45, left: 60 });
        assert_eq!(
            committed.scale,
            Scale {
                width: 200,
                height: 150
            }
        );
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_press_raises_note_to_top() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        ctl.on_press_start(&mut registry, &n1(), Pointer::new(100, 100), Zone::Move);
        assert_eq!(registry.top().unwrap().id, n1());
    }

    #[test]
    fn test_moves_do_not_touch_registry_until_release() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        ctl.on_press_start(&mut registry, &n1(), Pointer::new(100, 100), Zone::Move);
        let raised = registry.clone();

        ctl.on_pointer_move(Pointer::new(150, 160));
        ctl.on_pointer_move(Pointer::new(10, 20));
        assert_eq!(registry, raised);
        assert_eq!(
            ctl.live_box(&n1()),
            Some(NoteBox {
                top: -30,
                left: -40,
                width: 200,
                height: 150
            })
        );
        assert_eq!(ctl.live_box(&NoteId::from("n2")), None);
    }

    #[test]
    fn test_move_without_session_is_ignored() {
        let mut ctl = InteractionController::new(0);
        assert!(!ctl.on_pointer_move(Pointer::new(5, 5)));
        let mut registry = board();
        assert_eq!(
            ctl.on_pointer_release(&mut registry, &ReleaseTarget::Surface),
            ReleaseOutcome::Ignored
        );
        assert_eq!(registry, board());
    }

    #[test]
    fn test_second_press_is_ignored_while_dragging() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        ctl.on_press_start(&mut registry, &n1(), Pointer::new(100, 100), Zone::Move);
        assert!(!ctl.on_press_start(
            &mut registry,
            &NoteId::from("n2"),
            Pointer::new(310, 310),
            Zone::Move
        ));
        assert_eq!(ctl.session().unwrap().note_id(), &n1());
        assert_eq!(registry.top().unwrap().id, n1());
    }

    #[test]
    fn test_press_on_unknown_note_opens_nothing() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        assert!(!ctl.on_press(&mut registry, &NoteId::from("ghost"), Pointer::new(1, 1)));
        assert!(!ctl.is_dragging());
        assert_eq!(registry, board());
    }

    #[test]
    fn test_hover_arms_zone_for_press() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        let b = registry.find_by_id(&n1()).unwrap().note_box();

        assert_eq!(ctl.on_pointer_hover(&n1(), b, Pointer::new(248, 120)), Zone::ResizeRight);
        // Hover is re-run on every movement.
        assert_eq!(ctl.on_pointer_hover(&n1(), b, Pointer::new(150, 120)), Zone::Move);
        assert_eq!(ctl.on_pointer_hover(&n1(), b, Pointer::new(51, 120)), Zone::ResizeLeft);

        // The press uses the armed zone even if it lands elsewhere.
        assert!(ctl.on_press(&mut registry, &n1(), Pointer::new(150, 120)));
        assert_eq!(ctl.session().unwrap().zone(), Zone::ResizeLeft);
    }

    #[test]
    fn test_press_without_hover_detects_at_press_point() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        assert!(ctl.on_press(&mut registry, &n1(), Pointer::new(150, 197)));
        assert_eq!(ctl.session().unwrap().zone(), Zone::ResizeBottom);
    }

    #[test]
    fn test_hover_during_drag_keeps_session_zone() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        ctl.on_press_start(&mut registry, &n1(), Pointer::new(52, 100), Zone::ResizeLeft);
        let n2 = registry.find_by_id(&NoteId::from("n2")).unwrap().note_box();
        assert_eq!(
            ctl.on_pointer_hover(&NoteId::from("n2"), n2, Pointer::new(350, 350)),
            Zone::ResizeLeft
        );
        assert_eq!(ctl.armed_zone(&NoteId::from("n2")), None);
    }

    #[test]
    fn test_release_on_own_delete_marker_removes_note() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        ctl.on_press_start(&mut registry, &n1(), Pointer::new(240, 52), Zone::Move);
        let outcome = ctl.on_pointer_release(&mut registry, &ReleaseTarget::Delete(n1()));
        assert_eq!(outcome, ReleaseOutcome::Deleted(n1()));
        assert!(registry.find_by_id(&n1()).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_release_on_other_notes_marker_only_commits() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        ctl.on_press_start(&mut registry, &n1(), Pointer::new(100, 100), Zone::Move);
        ctl.on_pointer_move(Pointer::new(110, 100));
        let outcome = ctl.on_pointer_release(
            &mut registry,
            &ReleaseTarget::Delete(NoteId::from("n2")),
        );
        assert_eq!(outcome, ReleaseOutcome::Committed(n1()));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find_by_id(&n1()).unwrap().position.left, 60);
    }

    #[test]
    fn test_release_on_edit_marker_commits_then_requests_edit() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        ctl.on_press_start(&mut registry, &n1(), Pointer::new(100, 100), Zone::Move);
        ctl.on_pointer_move(Pointer::new(100, 90));
        let outcome = ctl.on_pointer_release(&mut registry, &ReleaseTarget::Edit(n1()));
        assert_eq!(outcome, ReleaseOutcome::EditRequested(n1()));
        assert_eq!(registry.find_by_id(&n1()).unwrap().position.top, 40);
    }

    #[test]
    fn test_commit_to_missing_note_is_silent() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        ctl.on_press_start(&mut registry, &n1(), Pointer::new(100, 100), Zone::Move);
        registry = registry.remove(&n1());
        let before = registry.clone();
        ctl.on_pointer_move(Pointer::new(0, 0));
        ctl.on_pointer_release(&mut registry, &ReleaseTarget::Surface);
        assert_eq!(registry, before);
    }

    #[test]
    fn test_surface_leave_commits_open_drag() {
        let mut registry = board();
        let mut ctl = InteractionController::new(0);
        ctl.on_press_start(&mut registry, &n1(), Pointer::new(248, 100), Zone::ResizeRight);
        ctl.on_pointer_move(Pointer::new(268, 100));

        assert_eq!(ctl.on_surface_leave(&mut registry), ReleaseOutcome::Committed(n1()));
        assert!(!ctl.is_dragging());
        assert_eq!(registry.find_by_id(&n1()).unwrap().scale.width, 220);
        assert_eq!(ctl.on_surface_leave(&mut registry), ReleaseOutcome::Ignored);
    }

    proptest! {
        #[test]
        fn prop_commit_matches_final_live_box(
            zone_idx in 0usize..5,
            moves in proptest::collection::vec((-400i32..800, -400i32..800), 0..24),
        ) {
            let zone = [
                Zone::Move,
                Zone::ResizeLeft,
                Zone::ResizeRight,
                Zone::ResizeTop,
                Zone::ResizeBottom,
            ][zone_idx];
            let mut registry = board();
            let mut ctl = InteractionController::new(20);
            ctl.on_press_start(&mut registry, &n1(), Pointer::new(120, 120), zone);
            for (x, y) in moves {
                ctl.on_pointer_move(Pointer::new(x, y));
            }
            let live = ctl.live_box(&n1()).unwrap();
            ctl.on_pointer_release(&mut registry, &ReleaseTarget::Surface);

            let committed = registry.find_by_id(&n1()).unwrap();
            prop_assert_eq!(committed.note_box(), live);
            prop_assert_eq!(&registry.top().unwrap().id, &n1());
        }
    }
}
