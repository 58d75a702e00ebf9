//=========================================================================
// Trail
//=========================================================================
//
// Afterimages left behind by the cursor.
//
// Components:
// - `trail_ring`: fixed-capacity, oldest-first ring of trail sprites
//
//=========================================================================

//=== Module Declarations =================================================

mod trail_ring;

//=== Public API ==========================================================

pub use trail_ring::TrailRing;
