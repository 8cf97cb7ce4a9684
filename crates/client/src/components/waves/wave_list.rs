use dioxus::prelude::*;

use super::WaveCard;
use crate::stores::WAVES;

/// Every wave in the store, oldest first as they arrived.
#[component]
pub fn WaveList() -> Element {
    let waves = WAVES.read();

    rsx! {
        div { class: "wave-list",
            for (index, wave) in waves.iter().enumerate() {
                WaveCard { key: "{index}", wave: wave.clone() }
            }
        }
    }
}
