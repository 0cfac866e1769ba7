//! Instrument labels indexed by the id a client reports.

/// Labels in id order.
const INSTRUMENT_NAMES: [&str; 50] = [
    "None",
    "Drum Set",
    "Djembe",
    "Electric Guitar",
    "Acoustic Guitar",
    "Bass Guitar",
    "Keyboard",
    "Synthesizer",
    "Grand Piano",
    "Accordion",
    "Vocal",
    "Microphone",
    "Harmonica",
    "Trumpet",
    "Trombone",
    "French Horn",
    "Tuba",
    "Saxophone",
    "Clarinet",
    "Flute",
    "Violin",
    "Cello",
    "Double Bass",
    "Recorder",
    "Streamer",
    "Listener",
    "Guitar+Vocal",
    "Keyboard+Vocal",
    "Bodhran",
    "Bassoon",
    "Oboe",
    "Harp",
    "Viola",
    "Congas",
    "Bongo",
    "Vocal Bass",
    "Vocal Tenor",
    "Vocal Alto",
    "Vocal Soprano",
    "Banjo",
    "Mandolin",
    "Ukulele",
    "Bass Ukulele",
    "Vocal Baritone",
    "Vocal Lead",
    "Mountain Dulcimer",
    "Scratching",
    "Rapping",
    "Vibraphone",
    "Conductor",
];

/// Label shown when an id has no entry.
pub const UNKNOWN_INSTRUMENT: &str = "Unknown";

/// Looks up the label for `id`. Negative and out-of-range ids yield `None`.
pub fn instrument_name(id: i64) -> Option<&'static str> {
    usize::try_from(id)
        .ok()
        .and_then(|index| INSTRUMENT_NAMES.get(index))
        .copied()
}

/// Label for `id`, falling back to [`UNKNOWN_INSTRUMENT`].
pub fn instrument_label(id: i64) -> &'static str {
    instrument_name(id).unwrap_or(UNKNOWN_INSTRUMENT)
}
