//! Core application state and Iced Application implementation
//!
//! The window is a search bar, a message line and a scrollable list of
//! result cards. All search state lives in the `SearchController`; this
//! module wires it to iced messages and loads cover thumbnails.

use std::collections::HashMap;
use std::sync::Arc;

use iced::keyboard::{self, Key};
use iced::widget::{column, container, image, scrollable, text, Space};
use iced::{Background, Border, Element, Event, Length, Subscription, Task, Theme};

use crate::catalog::OpenLibraryClient;
use crate::config::{Config, Links};
use crate::controller::{SearchController, Settled, ViewState};
use crate::error::{Result, SearchError};
use crate::ui::card::{self, BookCard};
use crate::ui::search_bar;
use crate::ui::theme::DarkTheme;

pub const TITLE: &str = "Bookfinder";

/// Cover thumbnail for one URL of the current result set
#[derive(Debug, Clone)]
enum Cover {
    Loading,
    Loaded(image::Handle),
    Missing,
}

pub struct BookFinder {
    input: String,
    controller: SearchController<OpenLibraryClient>,
    catalog: Arc<OpenLibraryClient>,
    links: Links,
    covers: HashMap<String, Cover>,
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Submit,
    SearchSettled(Settled),
    CoverLoaded(String, std::result::Result<image::Handle, Arc<SearchError>>),
    OpenDetail(String),
    IcedEvent(Event),
}

impl BookFinder {
    pub fn new(config: &Config) -> Result<Self> {
        let catalog = Arc::new(OpenLibraryClient::new(config)?);
        Ok(Self {
            input: String::new(),
            controller: SearchController::new(Arc::clone(&catalog)),
            catalog,
            links: config.links.clone(),
            covers: HashMap::new(),
        })
    }

    pub fn title(&self) -> String {
        String::from(TITLE)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.input = value;
                Task::none()
            }

            Message::Submit => {
                self.covers.clear();
                match self.controller.on_submit(&self.input) {
                    Some(pending) => Task::perform(pending, Message::SearchSettled),
                    None => Task::none(),
                }
            }

            Message::SearchSettled(settled) => {
                if self.controller.on_settled(settled) {
                    self.load_covers()
                } else {
                    Task::none()
                }
            }

            Message::CoverLoaded(url, result) => {
                // Entries vanish when a new search starts; late arrivals are ignored
                if let Some(entry) = self.covers.get_mut(&url) {
                    *entry = match result {
                        Ok(handle) => Cover::Loaded(handle),
                        Err(e) => {
                            tracing::debug!("Cover {} unavailable: {}", url, e);
                            Cover::Missing
                        }
                    };
                }
                Task::none()
            }

            Message::OpenDetail(url) => {
                tracing::info!("Opening {}", url);
                if let Err(e) = open::that_detached(&url) {
                    tracing::error!("Could not open {}: {}", url, e);
                }
                Task::none()
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed {
                    key: Key::Named(keyboard::key::Named::Escape),
                    ..
                }) = event
                {
                    self.input.clear();
                }
                Task::none()
            }
        }
    }

    /// Start one download per distinct cover URL in the current results
    fn load_covers(&mut self) -> Task<Message> {
        let mut tasks = Vec::new();

        for doc in self.controller.state().books() {
            let Some(url) = BookCard::new(doc, &self.links).cover_url else {
                continue;
            };
            if self.covers.contains_key(&url) {
                continue;
            }
            self.covers.insert(url.clone(), Cover::Loading);

            let catalog = Arc::clone(&self.catalog);
            let target = url.clone();
            tasks.push(Task::perform(
                async move {
                    catalog
                        .fetch_cover(&target)
                        .await
                        .map(image::Handle::from_bytes)
                        .map_err(Arc::new)
                },
                move |result| Message::CoverLoaded(url.clone(), result),
            ));
        }

        tracing::debug!("Loading {} covers", tasks.len());
        Task::batch(tasks)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let state = self.controller.state();

        let message = text(state.message()).size(14).color(if state.is_error() {
            DarkTheme::ERROR
        } else {
            DarkTheme::TEXT_MUTED
        });

        let mut content = column![
            search_bar::view(&self.input, Message::InputChanged, Message::Submit),
            Space::with_height(12),
            container(message).width(Length::Fill).center_x(Length::Fill),
        ]
        .spacing(0);

        if let ViewState::Populated(_) = state {
            content = content
                .push(Space::with_height(12))
                .push(self.view_results());
        }

        container(
            container(content)
                .padding(16)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(DarkTheme::BACKGROUND)),
            border: Border {
                color: DarkTheme::BORDER,
                width: 1.0,
                radius: 16.0.into(),
            },
            ..Default::default()
        })
        .into()
    }

    fn view_results(&self) -> Element<'_, Message> {
        let cards: Vec<Element<'_, Message>> = self
            .controller
            .state()
            .books()
            .iter()
            .map(|doc| {
                let card = BookCard::new(doc, &self.links);
                let cover = card.cover_url.as_ref().and_then(|url| match self.covers.get(url) {
                    Some(Cover::Loaded(handle)) => Some(handle.clone()),
                    _ => None,
                });
                card::view(card, cover, Message::OpenDetail)
            })
            .collect();

        container(scrollable(column(cards).spacing(8)).height(Length::Fill))
            .height(Length::FillPortion(1))
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    #[cfg(test)]
    fn covers_pending(&self) -> usize {
        self.covers
            .values()
            .filter(|c| matches!(c, Cover::Loading))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BookDoc, ResultSet};
    use crate::controller::{IDLE_MESSAGE, NO_RESULTS_MESSAGE};

    fn app() -> BookFinder {
        BookFinder::new(&Config::default()).unwrap()
    }

    fn settled(generation: u64, books: Vec<BookDoc>) -> Settled {
        Settled {
            generation,
            outcome: Ok(ResultSet { total: books.len() as u64, books }),
        }
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert_eq!(app.controller.state().message(), IDLE_MESSAGE);
        assert_eq!(app.title(), TITLE);
    }

    #[test]
    fn test_blank_submit_stays_local() {
        let mut app = app();
        let _ = app.update(Message::InputChanged("   ".into()));
        let _ = app.update(Message::Submit);
        assert!(app.controller.state().is_error());
    }

    #[test]
    fn test_settled_results_queue_distinct_covers() {
        let mut app = app();
        let _ = app.update(Message::InputChanged("dune".into()));
        let _ = app.update(Message::Submit);
        assert_eq!(app.controller.state(), &ViewState::Loading);

        let books = vec![
            BookDoc { cover_i: Some(1), ..Default::default() },
            BookDoc { cover_i: Some(1), ..Default::default() },
            BookDoc { isbn: vec!["0441013597".into()], ..Default::default() },
            BookDoc::default(),
        ];
        let generation = app.controller.generation();
        let _ = app.update(Message::SearchSettled(settled(generation, books)));

        assert_eq!(app.controller.state().books().len(), 4);
        assert_eq!(app.covers_pending(), 2);
    }

    #[test]
    fn test_cover_results_for_old_search_are_ignored() {
        let mut app = app();
        let _ = app.update(Message::InputChanged("dune".into()));
        let _ = app.update(Message::Submit);
        let generation = app.controller.generation();
        let books = vec![BookDoc { cover_i: Some(7), ..Default::default() }];
        let _ = app.update(Message::SearchSettled(settled(generation, books)));

        let url = "https://covers.openlibrary.org/b/id/7-M.jpg".to_string();
        let _ = app.update(Message::Submit);
        assert!(app.covers.is_empty());

        let handle = image::Handle::from_bytes(vec![0u8; 4]);
        let _ = app.update(Message::CoverLoaded(url, Ok(handle)));
        assert!(app.covers.is_empty());
    }

    #[test]
    fn test_empty_results_load_nothing() {
        let mut app = app();
        let _ = app.update(Message::InputChanged("zzzz".into()));
        let _ = app.update(Message::Submit);
        let generation = app.controller.generation();
        let _ = app.update(Message::SearchSettled(settled(generation, vec![])));

        assert_eq!(app.controller.state().message(), NO_RESULTS_MESSAGE);
        assert!(app.covers.is_empty());
    }
}
