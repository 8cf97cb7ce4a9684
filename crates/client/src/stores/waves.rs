//! Store for the rendered wave list.
//!
//! Only the feed reducer writes here (see [`crate::feed::run_reducer`]);
//! components read it reactively.

use dioxus::prelude::*;
use wave_portal_shared::WaveCollection;

/// Every wave known to the view, in arrival order.
pub static WAVES: GlobalSignal<WaveCollection> = Signal::global(WaveCollection::new);

/// Replace the rendered list with the reducer's accumulator.
pub fn publish_waves(waves: &WaveCollection) {
    *WAVES.write() = waves.clone();
}
