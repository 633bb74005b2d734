//! The to-do list with its input row.

use axum_live::html::{Node, br, button, div, h2, input, label, ul};
use axum_live::{Component, EventKind};

use crate::item::{ItemMsg, ItemView};
use crate::store::{TodoId, TodoStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMsg {
    Draft(String),
    Add,
    Item(TodoId, ItemMsg),
}

/// Owns the store and one [`ItemView`] per entry, in list order.
#[derive(Debug, Default)]
pub struct ListView {
    store: TodoStore,
    rows: Vec<(TodoId, ItemView)>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn item(&self, id: TodoId) -> Option<&ItemView> {
        self.rows.iter().find(|(row, _)| *row == id).map(|(_, view)| view)
    }

    // Keeps the view of every entry still listed, mounts views for new
    // entries and drops the rest.
    fn reconcile(&mut self) {
        let mut previous = std::mem::take(&mut self.rows);
        self.rows = self
            .store
            .items()
            .iter()
            .map(|todo| match previous.iter().position(|(id, _)| *id == todo.id) {
                Some(index) => {
                    let (id, mut view) = previous.swap_remove(index);
                    view.set_text(&todo.text);
                    (id, view)
                }
                None => (todo.id, ItemView::new(todo.text.as_str())),
            })
            .collect();

        if !previous.is_empty() {
            tracing::debug!(dropped = previous.len(), "unmounted item views");
        }
    }
}

impl Component for ListView {
    type Message = ListMsg;

    fn update(&mut self, msg: ListMsg) -> bool {
        let changed = match msg {
            ListMsg::Draft(value) => self.store.set_draft(value),
            ListMsg::Add => self.store.add_item(),
            ListMsg::Item(id, msg) => match self.rows.iter_mut().find(|(row, _)| *row == id) {
                Some((_, view)) => view.update(msg, &mut self.store),
                None => false,
            },
        };

        if changed {
            self.reconcile();
        }
        changed
    }

    fn view(&self) -> Node<ListMsg> {
        let items = self.rows.iter().map(|(id, view)| {
            let id = *id;
            view.view().map(move |msg| ListMsg::Item(id, msg))
        });

        div()
            .child(h2().text("ToDo:"))
            .child(ul().children(items))
            .child(br())
            .child(
                label()
                    .child(
                        button()
                            .text("New: ")
                            .on(EventKind::Click, |_| Some(ListMsg::Add)),
                    )
                    .child(
                        input()
                            .attr("value", self.store.draft())
                            .on(EventKind::Change, |e| {
                                Some(ListMsg::Draft(e.value_or_default()))
                            })
                            .on(EventKind::KeyPress, |e| {
                                e.is_key("Enter").then_some(ListMsg::Add)
                            }),
                    ),
            )
            .into()
    }
}
