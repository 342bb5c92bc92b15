use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::todo::errors::TitleError;
use crate::domain::todo::errors::TodoIdError;

/// Todo aggregate entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: TodoId,
    pub title: Title,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Apply a partial update, touching `updated_at` only when something changed.
    pub fn apply(&mut self, command: UpdateTodoCommand, now: DateTime<Utc>) {
        let mut changed = false;

        if let Some(title) = command.title {
            self.title = title;
            changed = true;
        }

        if let Some(completed) = command.completed {
            self.completed = completed;
            changed = true;
        }

        if changed {
            self.updated_at = now;
        }
    }
}

/// Todo unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl TodoId {
    /// Generate a new random todo ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a todo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        Uuid::parse_str(s)
            .map(TodoId)
            .map_err(|_| TodoIdError::InvalidFormat(s.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo title value object.
///
/// Must contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    /// # Errors
    /// * `Empty` - Title is empty or only whitespace
    pub fn new(title: String) -> Result<Self, TitleError> {
        if title.trim().is_empty() {
            return Err(TitleError::Empty);
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a todo.
#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: Title,
}

/// Full replacement of a todo's editable fields (PUT).
#[derive(Debug)]
pub struct ReplaceTodoCommand {
    pub title: Title,
    pub completed: bool,
}

/// Partial update of a todo (PATCH).
///
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<Title>,
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn todo() -> Todo {
        let now = Utc::now();
        Todo {
            id: TodoId::new(),
            title: Title::new("Read book".to_string()).unwrap(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_title_rejects_blank() {
        assert_eq!(Title::new(String::new()), Err(TitleError::Empty));
        assert_eq!(Title::new("  ".to_string()), Err(TitleError::Empty));
        assert!(Title::new("Get laundry".to_string()).is_ok());
    }

    #[test]
    fn test_todo_id_from_string() {
        let id = TodoId::new();
        assert_eq!(TodoId::from_string(&id.to_string()), Ok(id));
        assert_eq!(
            TodoId::from_string("234567890987sdfgreg"),
            Err(TodoIdError::InvalidFormat("234567890987sdfgreg".to_string()))
        );
    }

    #[test]
    fn test_apply_partial_update() {
        let mut todo = todo();
        let later = todo.updated_at + Duration::seconds(5);

        todo.apply(
            UpdateTodoCommand {
                title: None,
                completed: Some(true),
            },
            later,
        );

        assert!(todo.completed);
        assert_eq!(todo.title.as_str(), "Read book");
        assert_eq!(todo.updated_at, later);
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let mut todo = todo();
        let before = todo.clone();

        todo.apply(UpdateTodoCommand::default(), before.updated_at + Duration::seconds(5));

        assert_eq!(todo, before);
    }
}
