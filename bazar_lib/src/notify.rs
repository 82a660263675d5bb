//! Transient user-facing notifications (toasts).

use std::collections::VecDeque;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A single toast: a short title and an optional longer description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: &str, description: Option<&str>) -> Self {
        Self {
            level: Level::Success,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    pub fn error(title: &str, description: Option<&str>) -> Self {
        Self {
            level: Level::Error,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.title, description),
            None => write!(f, "{}", self.title),
        }
    }
}

/// FIFO queue of pending notifications. Views push; the front end drains.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        match notification.level {
            Level::Success => tracing::info!("{}", notification),
            Level::Error => tracing::warn!("{}", notification),
        }
        self.queue.push_back(notification);
    }

    pub fn success(&mut self, title: &str, description: Option<&str>) {
        self.push(Notification::success(title, description));
    }

    pub fn error(&mut self, title: &str, description: Option<&str>) {
        self.push(Notification::error(title, description));
    }

    /// Removes and returns every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }
}
