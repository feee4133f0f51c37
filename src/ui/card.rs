//! Result cards
//!
//! `BookCard` holds the display strings for one record with all defaults
//! applied. It renders either as an iced widget or as plain text for the CLI.

use std::fmt;

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Background, Border, ContentFit, Element, Length, Padding};

use super::theme::DarkTheme;
use crate::catalog::{cover_url, BookDoc};
use crate::config::Links;

pub const UNKNOWN_TITLE: &str = "Unknown title";
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const NO_COVER: &str = "No cover";
pub const DETAIL_LINK_LABEL: &str = "View on Open Library";
pub const DELIMITER: &str = " • ";

const COVER_WIDTH: f32 = 80.0;
const COVER_HEIGHT: f32 = 120.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub title: String,
    pub author: String,
    /// Publisher, then " • year" when known
    pub info: String,
    pub cover_url: Option<String>,
    pub detail_url: Option<String>,
}

impl BookCard {
    pub fn new(doc: &BookDoc, links: &Links) -> Self {
        let title = doc
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();

        let author = if doc.author_name.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            doc.author_name.join(", ")
        };

        let publisher = doc.publisher.first().map(String::as_str).unwrap_or("");
        let info = match doc.first_publish_year {
            Some(year) => format!("{publisher}{DELIMITER}{year}"),
            None => publisher.to_string(),
        };

        let detail_url = doc
            .key
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(|key| format!("{}{}", links.site_origin, key));

        Self {
            title,
            author,
            info,
            cover_url: cover_url(doc, &links.covers_base),
            detail_url,
        }
    }
}

impl fmt::Display for BookCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  {}", self.author)?;
        if !self.info.is_empty() {
            writeln!(f, "  {}", self.info)?;
        }
        match &self.cover_url {
            Some(url) => writeln!(f, "  cover: {url}")?,
            None => writeln!(f, "  [{NO_COVER}]")?,
        }
        if let Some(url) = &self.detail_url {
            write!(f, "  {DETAIL_LINK_LABEL}: {url}")?;
        }
        Ok(())
    }
}

/// Render one card. `cover` is the decoded image, if it has arrived.
pub fn view<'a, Message: Clone + 'a>(
    card: BookCard,
    cover: Option<image::Handle>,
    on_open: impl Fn(String) -> Message,
) -> Element<'a, Message> {
    let cover_element: Element<'a, Message> = match cover {
        Some(handle) => image(handle)
            .width(COVER_WIDTH)
            .height(COVER_HEIGHT)
            .content_fit(ContentFit::Cover)
            .into(),
        None => cover_placeholder(),
    };

    let link = button(text(DETAIL_LINK_LABEL).size(13))
        .on_press_maybe(card.detail_url.map(on_open))
        .padding(0)
        .style(|_theme, status| button::Style {
            background: None,
            text_color: match status {
                button::Status::Disabled => DarkTheme::TEXT_PLACEHOLDER,
                _ => DarkTheme::PRIMARY,
            },
            ..Default::default()
        });

    let meta = column![
        text(card.title).size(17).color(DarkTheme::TEXT),
        text(card.author).size(14).color(DarkTheme::TEXT_MUTED),
        text(card.info).size(13).color(DarkTheme::TEXT_MUTED),
        link,
    ]
    .spacing(6)
    .width(Length::Fill);

    container(
        row![cover_element, meta]
            .spacing(12)
            .align_y(Alignment::Center),
    )
    .padding(Padding::new(8.0))
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(DarkTheme::SURFACE)),
        border: Border {
            color: DarkTheme::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    })
    .into()
}

fn cover_placeholder<'a, Message: 'a>() -> Element<'a, Message> {
    container(text(NO_COVER).size(10).color(DarkTheme::COVER_PLACEHOLDER_TEXT))
        .width(COVER_WIDTH)
        .height(COVER_HEIGHT)
        .center_x(COVER_WIDTH)
        .center_y(COVER_HEIGHT)
        .style(|_theme| container::Style {
            background: Some(Background::Color(DarkTheme::COVER_PLACEHOLDER)),
            ..Default::default()
        })
        .into()
}
