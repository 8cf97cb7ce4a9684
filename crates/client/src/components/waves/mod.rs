//! Wave list components.

pub mod wave_card;
pub mod wave_list;

pub use wave_card::{format_wave_time, WaveCard};
pub use wave_list::WaveList;
