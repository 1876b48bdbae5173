//! A single press-move-release interaction.

use crate::interaction::zone::Zone;
use crate::note::{NoteBox, NoteId, Pointer};

/// Live state of one drag.
///
/// The session owns the on-screen box of the note being dragged. The
/// registry keeps the geometry from before the press until the session is
/// committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    note_id: NoteId,
    zone: Zone,
    start: Pointer,
    last: Pointer,
    live_box: NoteBox,
    surface_offset: i32,
}

impl DragSession {
    pub const fn open(
        note_id: NoteId,
        zone: Zone,
        pointer: Pointer,
        live_box: NoteBox,
        surface_offset: i32,
    ) -> Self {
        Self {
            note_id,
            zone,
            start: pointer,
            last: pointer,
            live_box,
            surface_offset,
        }
    }

    pub const fn note_id(&self) -> &NoteId {
        &self.note_id
    }

    pub const fn zone(&self) -> Zone {
        self.zone
    }

    pub const fn start(&self) -> Pointer {
        self.start
    }

    pub const fn last(&self) -> Pointer {
        self.last
    }

    pub const fn live_box(&self) -> NoteBox {
        self.live_box
    }

    /// Apply one pointer move.
    ///
    /// Deltas are last-minus-current, so a pointer moving right gives a
    /// negative `delta_x`. Left and top resizes pin the edge to the pointer;
    /// the others accumulate deltas. Sizes stop at zero and every sum
    /// saturates at the `i32` bounds.
    pub fn apply_move(&mut self, pointer: Pointer) {
        let delta_x = self.last.x.saturating_sub(pointer.x);
        let delta_y = self.last.y.saturating_sub(pointer.y);
        self.last = pointer;

        let b = &mut self.live_box;
        match self.zone {
            Zone::ResizeLeft => {
                b.left = pointer.x;
                b.width = b.width.saturating_add(delta_x).max(0);
            }
            Zone::ResizeRight => {
                b.width = b.width.saturating_sub(delta_x).max(0);
            }
            Zone::ResizeTop => {
                b.top = pointer.y.saturating_sub(self.surface_offset);
                b.height = b.height.saturating_add(delta_y).max(0);
            }
            Zone::ResizeBottom => {
                b.height = b.height.saturating_sub(delta_y).max(0);
            }
            Zone::Move => {
                b.top = b.top.saturating_sub(delta_y);
                b.left = b.left.saturating_sub(delta_x);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: NoteBox = NoteBox {
        top: 50,
        left: 50,
        width: 200,
        height: 150,
    };

    fn session(zone: Zone, press: Pointer) -> DragSession {
        DragSession::open(NoteId::from("n1"), zone, press, START, 0)
    }

    #[test]
    fn test_move_shifts_origin_by_pointer_travel() {
        let mut s = session(Zone::Move, Pointer::new(60, 60));
        s.apply_move(Pointer::new(70, 55));
        assert_eq!(
            s.live_box(),
            NoteBox {
                top: 45,
                left: 60,
                ..START
            }
        );
        assert_eq!(s.last(), Pointer::new(70, 55));
        assert_eq!(s.start(), Pointer::new(60, 60));
    }

    #[test]
    fn test_resize_left_pins_edge_to_pointer() {
        let mut s = session(Zone::ResizeLeft, Pointer::new(52, 100));
        s.apply_move(Pointer::new(40, 100));
        assert_eq!(s.live_box().left, 40);
        assert_eq!(s.live_box().width, 212);
        assert_eq!(s.live_box().top, 50);
    }

    #[test]
    fn test_resize_right_grows_with_pointer() {
        let mut s = session(Zone::ResizeRight, Pointer::new(248, 100));
        s.apply_move(Pointer::new(260, 130));
        assert_eq!(s.live_box().width, 212);
        assert_eq!(s.live_box().height, 150);
        assert_eq!(s.live_box().left, 50);
    }

    #[test]
    fn test_resize_top_uses_surface_offset() {
        let mut s = DragSession::open(
            NoteId::from("n1"),
            Zone::ResizeTop,
            Pointer::new(100, 82),
            START,
            30,
        );
        s.apply_move(Pointer::new(100, 72));
        assert_eq!(s.live_box().top, 42);
        assert_eq!(s.live_box().height, 160);
    }

    #[test]
    fn test_resize_bottom_shrinks_below_minimum() {
        let mut s = session(Zone::ResizeBottom, Pointer::new(100, 198));
        s.apply_move(Pointer::new(100, 98));
        assert_eq!(s.live_box().height, 50);
        assert!(s.live_box().height < crate::note::MIN_NOTE_SIDE);
    }

    #[test]
    fn test_size_never_goes_negative() {
        let mut s = session(Zone::ResizeRight, Pointer::new(248, 100));
        s.apply_move(Pointer::new(-400, 100));
        assert_eq!(s.live_box().width, 0);
    }

    #[test]
    fn test_extreme_moves_saturate() {
        let huge = NoteBox {
            width: i32::MAX,
            ..START
        };
        let mut s = DragSession::open(
            NoteId::from("n1"),
            Zone::ResizeRight,
            Pointer::new(0, 0),
            huge,
            0,
        );
        s.apply_move(Pointer::new(i32::MIN, 0));
        assert_eq!(s.live_box().width, 0);
        s.apply_move(Pointer::new(i32::MAX, 0));
        assert_eq!(s.live_box().width, i32::MAX);

        let mut s = session(Zone::Move, Pointer::new(i32::MIN, i32::MIN));
        s.apply_move(Pointer::new(i32::MAX, i32::MAX));
        assert_eq!(s.live_box().left, i32::MAX);
        assert_eq!(s.live_box().top, i32::MAX);
    }
}
