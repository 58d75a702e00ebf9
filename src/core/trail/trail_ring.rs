//=========================================================================
// Trail Ring
//=========================================================================
//
// Fixed-capacity rolling buffer of trail sprites, oldest first.
//
// Architecture:
// ```text
//   entries: [ e3 | e4 | e0 | e1 | e2 ]      capacity = 5
//                       ↑
//                      head (oldest)
//
//   advance(): overwrite entries[head], head = (head + 1) % capacity
//   iter():    entries[head..] ++ entries[..head]   (oldest → newest)
// ```
//
// Replacing the oldest entry in place keeps `advance` O(1) while the
// observable order stays "index 0 is the oldest".
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::render::{Rect, RenderSurface, Sprite, TextureId};

//=== TrailRing ===========================================================

/// Ordered, fixed-size sequence of trail entries.
///
/// Always holds exactly `capacity` entries. Fresh entries start at
/// [`Rect::ZERO`] and stay invisible until they are first advanced.
#[derive(Debug, Clone)]
pub struct TrailRing {
    entries: Vec<Sprite>,
    /// Slot of the oldest entry.
    head: usize,
}

impl TrailRing {
    //--- Construction -----------------------------------------------------

    /// Creates a ring of `capacity` placeholder entries sharing `texture`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize, texture: Option<TextureId>) -> Self {
        assert!(capacity > 0, "Trail capacity must be positive");

        Self {
            entries: vec![Sprite::new(texture, Rect::ZERO); capacity],
            head: 0,
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Drops the oldest entry and appends a new one centered on `(x, y)`.
    ///
    /// Returns the rectangle of the evicted entry.
    pub fn advance(&mut self, x: i32, y: i32, size: u32) -> Rect {
        let slot = &mut self.entries[self.head];
        let evicted = slot.rect;
        slot.rect = Rect::centered(x, y, size);

        self.head = (self.head + 1) % self.entries.len();

        trace!(target: "core::trail", "Trail advanced to ({}, {}), evicted {:?}", x, y, evicted);
        evicted
    }

    //--- Queries ----------------------------------------------------------

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sprite> + '_ {
        let (newer, older) = self.entries.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Entry at logical `index` (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Sprite> {
        if index >= self.entries.len() {
            return None;
        }
        Some(&self.entries[(self.head + index) % self.entries.len()])
    }

    pub fn oldest(&self) -> &Sprite {
        &self.entries[self.head]
    }

    pub fn newest(&self) -> &Sprite {
        let len = self.entries.len();
        &self.entries[(self.head + len - 1) % len]
    }

    /// Number of entries (always the capacity).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a ring holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    //--- Rendering --------------------------------------------------------

    /// Draws every entry, oldest first, so newer marks land on top.
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        for entry in self.iter() {
            entry.display(surface);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
