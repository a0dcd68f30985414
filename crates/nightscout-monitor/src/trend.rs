//! Trend arrows for Nightscout direction codes

/// Glyph used for missing or unrecognised direction codes
pub const UNKNOWN_GLYPH: &str = "❔";

const GLYPHS: &[(&str, &str)] = &[
    ("DoubleUp", "⬆️⬆️"),
    ("SingleUp", "⬆️"),
    ("FortyFiveUp", "↗️"),
    ("Flat", "➡️"),
    ("FortyFiveDown", "↘️"),
    ("SingleDown", "⬇️"),
    ("DoubleDown", "⬇️⬇️"),
    ("NOT COMPUTABLE", "❓"),
    ("RATE OUT OF RANGE", "⚠️"),
];

/// Map a direction code to its display glyph
pub fn glyph(code: Option<&str>) -> &'static str {
    code.and_then(|code| {
        GLYPHS
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, glyph)| *glyph)
    })
    .unwrap_or(UNKNOWN_GLYPH)
}
