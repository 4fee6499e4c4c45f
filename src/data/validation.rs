//! Name checks applied by the caller before it touches a store

use thiserror::Error;

use super::{ListId, TodoList};

/// Longest accepted list or item name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// A rejected name; the message is shown to the user as-is
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("List name must be between 1 and 100 characters.")]
    ListNameLength,
    #[error("List name must be unique.")]
    ListNameTaken,
    #[error("Todo must be between 1 and 100 characters.")]
    ItemNameLength,
}

fn length_ok(name: &str) -> bool {
    (1..=MAX_NAME_LEN).contains(&name.chars().count())
}

/// Check a (trimmed) list name against the existing lists.
///
/// When renaming, pass the list's own id so its current name is not
/// reported as a clash with itself.
pub fn validate_list_name(
    name: &str,
    existing: &[TodoList],
    renaming: Option<ListId>,
) -> Result<(), ValidationError> {
    if !length_ok(name) {
        return Err(ValidationError::ListNameLength);
    }

    let taken = existing
        .iter()
        .any(|l| l.name == name && Some(l.id) != renaming);
    if taken {
        return Err(ValidationError::ListNameTaken);
    }

    Ok(())
}

/// Check a (trimmed) item name
pub fn validate_item_name(name: &str) -> Result<(), ValidationError> {
    if length_ok(name) {
        Ok(())
    } else {
        Err(ValidationError::ItemNameLength)
    }
}
