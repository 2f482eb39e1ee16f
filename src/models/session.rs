use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Screen a session is currently looking at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Screen {
    /// Movie selector with trending and popular rows
    Main,
    /// Top matches for a selected movie
    Recommendations { query: String },
    /// Metadata card for a single title
    Detail { title: String },
    Favourites,
}

/// User interaction that may move a session to another screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionEvent {
    Recommend { title: String },
    Select { title: String },
    Back,
    ShowFavourites,
}

/// A saved title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favourite {
    pub title: String,
    pub added_at: DateTime<Utc>,
}

/// Navigation state and favourites for one user session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub screen: Screen,
    /// Query of the most recent recommendation, restored by `Back` from a detail view
    pub last_recommended: Option<String>,
    pub favourites: Vec<Favourite>,
    /// Seed for the trending row unless a page request overrides it
    pub trending_seed: u64,
    pub created_at: DateTime<Utc>,
    /// Last time the session was read or changed through the API
    pub last_active: DateTime<Utc>,
}

impl SessionState {
    /// Creates a session on the main screen
    pub fn new(trending_seed: u64) -> Self {
        let now = Utc::now();
        Self {
            screen: Screen::Main,
            last_recommended: None,
            favourites: Vec::new(),
            trending_seed,
            created_at: now,
            last_active: now,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active = self.last_active.max(now);
    }

    /// Whether the session has been idle for longer than `ttl`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now - self.last_active > ttl
    }

    /// Applies a navigation event
    ///
    /// Disallowed transitions fail with `InvalidTransition` and leave the
    /// session untouched. Recommend targets are not checked against the
    /// catalog here; callers resolve the title first.
    pub fn apply(&mut self, event: SessionEvent) -> AppResult<()> {
        let next = match (&self.screen, event) {
            (Screen::Main | Screen::Recommendations { .. }, SessionEvent::Recommend { title }) => {
                let title = non_blank(title)?;
                self.last_recommended = Some(title.clone());
                Screen::Recommendations { query: title }
            }
            (
                Screen::Main | Screen::Recommendations { .. } | Screen::Detail { .. },
                SessionEvent::Select { title },
            ) => Screen::Detail {
                title: non_blank(title)?,
            },
            (Screen::Detail { .. }, SessionEvent::Back) => match &self.last_recommended {
                Some(query) => Screen::Recommendations {
                    query: query.clone(),
                },
                None => Screen::Main,
            },
            (Screen::Recommendations { .. } | Screen::Favourites, SessionEvent::Back) => {
                Screen::Main
            }
            (_, SessionEvent::ShowFavourites) => Screen::Favourites,
            (screen, event) => {
                return Err(AppError::InvalidTransition(format!(
                    "{:?} is not allowed from {:?}",
                    event, screen
                )))
            }
        };

        self.screen = next;
        Ok(())
    }

    /// Adds a favourite, returning false if it was already saved
    pub fn add_favourite(&mut self, title: &str) -> AppResult<bool> {
        let title = non_blank(title.to_string())?;
        if self.is_favourite(&title) {
            return Ok(false);
        }
        self.favourites.push(Favourite {
            title,
            added_at: Utc::now(),
        });
        Ok(true)
    }

    /// Removes a favourite, returning false if it was not saved
    pub fn remove_favourite(&mut self, title: &str) -> bool {
        let before = self.favourites.len();
        self.favourites.retain(|f| f.title != title);
        self.favourites.len() != before
    }

    pub fn is_favourite(&self, title: &str) -> bool {
        self.favourites.iter().any(|f| f.title == title)
    }

    pub fn favourite_titles(&self) -> Vec<String> {
        self.favourites.iter().map(|f| f.title.clone()).collect()
    }
}

fn non_blank(title: String) -> AppResult<String> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }
    Ok(title)
}
