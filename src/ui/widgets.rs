use iced::widget::{button, column, container, row, text};
use iced::widget::text_input;
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::data::Asset;

/// A labelled text input with an inline validation message.
///
/// Validation is advisory: the input never blocks typing, it only
/// shows `error` below the field while `valid` is false.
pub fn validated_input<'a, Message: Clone + 'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    valid: bool,
    error: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let mut content = column![
        text(label).size(14),
        text_input(placeholder, value).on_input(on_input).padding(8),
    ]
    .spacing(5);

    if !valid {
        content = content.push(text(error).size(12).style(text::danger));
    }

    content.into()
}

/// One asset card: media kind, URL, a remove button, and a warning
/// badge when the asset does not come from AEM.
pub fn asset_card<'a, Message: Clone + 'a>(
    asset: &'a Asset,
    on_remove: Message,
) -> Element<'a, Message> {
    let mut header = row![
        text(media_icon(&asset.kind)).size(24),
        button(text("✕").size(12))
            .on_press(on_remove)
            .padding(4)
            .style(button::secondary),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    if !asset.from_aem() {
        header = header.push(text("⚠").size(16).style(text::danger));
    }

    container(
        column![header, text(&asset.url).size(12)]
            .spacing(5)
            .width(Length::Fixed(180.0)),
    )
    .padding(10)
    .style(container::rounded_box)
    .into()
}

/// The row of currently attached assets, wrapping as needed.
pub fn asset_row<'a, Message: Clone + 'a>(
    assets: &'a [Asset],
    on_remove: impl Fn(String) -> Message,
) -> Element<'a, Message> {
    let cards: Vec<Element<'a, Message>> = assets
        .iter()
        .map(|asset| asset_card(asset, on_remove(asset.url.clone())))
        .collect();

    Wrap::with_elements(cards).spacing(10.0).line_spacing(10.0).into()
}

/// Centered notice for states with nothing else to show
/// (e.g. app configuration incomplete).
pub fn empty_state<'a, Message: 'a>(heading: &'a str, body: &'a str) -> Element<'a, Message> {
    container(
        column![text(heading).size(24), text(body).size(14)]
            .spacing(10)
            .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(40)
    .center_x(Length::Fill)
    .into()
}

/// A small pictogram for the media type reported by AEM
fn media_icon(kind: &str) -> &'static str {
    match kind {
        "image" => "🖼",
        "video" => "🎞",
        "audio" => "🎵",
        _ => "📄",
    }
}
