use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;
use wave_portal_shared::WaveRecord;

/// Render a wave timestamp in the viewer's local time zone.
pub fn format_wave_time(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%a %b %d %Y %H:%M:%S %Z")
        .to_string()
}

/// A single wave: who, when, and what they said.
#[component]
pub fn WaveCard(wave: WaveRecord) -> Element {
    let time = format_wave_time(wave.timestamp);

    rsx! {
        div { class: "wave-card",
            div { "Address: {wave.address}" }
            div { "Time: {time}" }
            div { "Message: {wave.message}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_in_local_time() {
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let local = ts.with_timezone(&Local);
        let formatted = format_wave_time(ts);
        assert!(formatted.contains(&local.format("%H:%M:%S").to_string()));
        assert!(formatted.contains(&local.format("%Y").to_string()));
    }
}
