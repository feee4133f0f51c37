//! Search form: text input plus a submit button

use iced::widget::{button, container, row, text, text_input};
use iced::{Alignment, Background, Border, Color, Element, Length, Padding};

use super::theme::DarkTheme;

pub const PLACEHOLDER: &str = "Title, author or keyword...";

/// Search bar component. Enter and the button both submit.
pub fn view<'a, Message: Clone + 'a>(
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
) -> Element<'a, Message> {
    let input = text_input(PLACEHOLDER, value)
        .on_input(on_input)
        .on_submit(on_submit.clone())
        .padding(Padding::new(14.0))
        .size(18)
        .style(|_theme, _status| text_input::Style {
            background: Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            icon: DarkTheme::TEXT_MUTED,
            placeholder: DarkTheme::TEXT_PLACEHOLDER,
            value: DarkTheme::TEXT,
            selection: DarkTheme::PRIMARY,
        });

    let submit = button(text("Search").size(16))
        .on_press(on_submit)
        .padding(Padding::from([10.0, 18.0]))
        .style(|_theme, status| {
            let background = match status {
                button::Status::Hovered | button::Status::Pressed => DarkTheme::SURFACE_HIGHLIGHT,
                _ => DarkTheme::PRIMARY,
            };
            button::Style {
                background: Some(Background::Color(background)),
                text_color: DarkTheme::TEXT,
                border: Border::default().rounded(8),
                ..Default::default()
            }
        });

    container(
        row![input, submit]
            .spacing(8)
            .align_y(Alignment::Center),
    )
    .padding(Padding::from([6.0, 12.0]))
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(DarkTheme::SURFACE)),
        border: Border {
            color: DarkTheme::BORDER,
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    })
    .into()
}
