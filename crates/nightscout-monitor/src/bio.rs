//! Inline bio card: a picture with link buttons

use crate::config::{BioConfig, LinkButton};
use crate::interface::{Attachment, BotResponse, SuggestedAction};

/// Buttons per keyboard row
pub const BUTTONS_PER_ROW: usize = 2;

/// Lay buttons out in rows of [`BUTTONS_PER_ROW`]; the last row may be short
pub fn button_rows(buttons: &[LinkButton]) -> Vec<Vec<SuggestedAction>> {
    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            row.iter()
                .map(|button| SuggestedAction::link(&button.text, &button.url))
                .collect()
        })
        .collect()
}

/// Build the bio card reply
pub fn inline_bio(config: &BioConfig) -> BotResponse {
    button_rows(&config.buttons).into_iter().fold(
        BotResponse::interactive("").with_attachment(Attachment::image_url(&config.image_url)),
        BotResponse::with_action_row,
    )
}
