//! The to-do list and the draft for the next entry.

use axum_live::State;

/// Stable identity of an entry, used to keep per-item view state attached
/// to the right row. Store operations still match entries by text.
pub type TodoId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
}

/// Owns the entries and the input buffer.
///
/// Every mutator returns `true` when it changed state. The list is rebuilt
/// rather than edited in place.
#[derive(Debug, Default)]
pub struct TodoStore {
    items: State<Vec<Todo>>,
    draft: State<String>,
    next_id: TodoId,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    /// Entry texts in list order.
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|todo| todo.text.as_str()).collect()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, value: impl Into<String>) -> bool {
        self.draft.set(value.into())
    }

    /// Append the draft as a new entry and clear it. No-op on an empty draft.
    pub fn add_item(&mut self) -> bool {
        if self.draft.is_empty() {
            return false;
        }

        let todo = Todo {
            id: self.next_id,
            text: self.draft.get().clone(),
        };
        self.next_id += 1;

        self.items.replace_with(|items| {
            let mut next = items.clone();
            next.push(todo);
            next
        });
        self.draft.set(String::new());
        true
    }

    /// Drop every entry whose text equals `text`.
    pub fn remove_item(&mut self, text: &str) -> bool {
        self.items.replace_with(|items| {
            items
                .iter()
                .filter(|todo| todo.text != text)
                .cloned()
                .collect()
        })
    }

    /// Replace the text of every entry equal to `old`. An empty `new` cancels.
    pub fn update_item(&mut self, old: &str, new: &str) -> bool {
        if new.is_empty() {
            return false;
        }

        self.items.replace_with(|items| {
            items
                .iter()
                .map(|todo| {
                    if todo.text == old {
                        Todo {
                            id: todo.id,
                            text: new.to_string(),
                        }
                    } else {
                        todo.clone()
                    }
                })
                .collect()
        })
    }
}
