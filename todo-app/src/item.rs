//! One row of the list: a display button or an inline edit form.

use axum_live::html::{Node, br, button, div, input, label, p};
use axum_live::{EventKind, State};

use crate::store::TodoStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMsg {
    /// The display button was clicked; `shift` enters edit mode.
    Clicked { shift: bool },
    /// The edit input changed.
    Pending(String),
    Save,
}

/// View state of a single entry. Lives as long as its entry is listed.
#[derive(Debug)]
pub struct ItemView {
    text: String,
    editing: State<bool>,
    pending: State<String>,
}

impl ItemView {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            editing: State::new(false),
            pending: State::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_editing(&self) -> bool {
        *self.editing
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Follow the entry's current text after the store changed.
    pub(crate) fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
        }
    }

    /// Apply `msg`, calling into `store` for removals and edits.
    pub fn update(&mut self, msg: ItemMsg, store: &mut TodoStore) -> bool {
        match msg {
            ItemMsg::Clicked { shift: true } => self.editing.set(true),
            ItemMsg::Clicked { shift: false } if !*self.editing => store.remove_item(&self.text),
            ItemMsg::Clicked { .. } => false,
            ItemMsg::Pending(value) => self.pending.set(value),
            ItemMsg::Save => self.save(store),
        }
    }

    // An empty pending text cancels the edit.
    fn save(&mut self, store: &mut TodoStore) -> bool {
        let mut changed = false;
        if !self.pending.is_empty() {
            changed |= store.update_item(&self.text, &self.pending);
        }
        changed |= self.pending.set(String::new());
        changed |= self.editing.set(false);
        changed
    }

    pub fn view(&self) -> Node<ItemMsg> {
        if !*self.editing {
            return p()
                .child(
                    button()
                        .text(self.text.as_str())
                        .on(EventKind::Click, |e| {
                            Some(ItemMsg::Clicked { shift: e.shift_key })
                        }),
                )
                .child(br())
                .into();
        }

        div()
            .child(
                label().text("Update: ").child(
                    input()
                        .attr("value", self.pending.as_str())
                        .on(EventKind::Change, |e| {
                            Some(ItemMsg::Pending(e.value_or_default()))
                        })
                        .on(EventKind::KeyPress, |e| {
                            e.is_key("Enter").then_some(ItemMsg::Save)
                        }),
                ),
            )
            .child(
                button()
                    .text("Save")
                    .on(EventKind::Click, |_| Some(ItemMsg::Save)),
            )
            .child(br())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(texts: &[&str]) -> TodoStore {
        let mut store = TodoStore::new();
        for text in texts {
            store.set_draft(*text);
            store.add_item();
        }
        store
    }

    #[test]
    fn plain_click_removes_item() {
        let mut store = setup(&["A", "B"]);
        let mut item = ItemView::new("A");

        assert!(item.update(ItemMsg::Clicked { shift: false }, &mut store));
        assert_eq!(store.texts(), ["B"]);
        assert!(!item.is_editing());
    }

    #[test]
    fn shift_click_enters_edit_mode_without_removing() {
        let mut store = setup(&["A", "B"]);
        let mut item = ItemView::new("A");

        assert!(item.update(ItemMsg::Clicked { shift: true }, &mut store));
        assert!(item.is_editing());
        assert_eq!(store.texts(), ["A", "B"]);
    }

    #[test]
    fn save_replaces_text_and_leaves_edit_mode() {
        let mut store = setup(&["A", "B"]);
        let mut item = ItemView::new("A");

        item.update(ItemMsg::Clicked { shift: true }, &mut store);
        item.update(ItemMsg::Pending("A2".into()), &mut store);
        assert_eq!(item.pending(), "A2");

        assert!(item.update(ItemMsg::Save, &mut store));
        assert_eq!(store.texts(), ["A2", "B"]);
        assert!(!item.is_editing());
        assert_eq!(item.pending(), "");
    }

    #[test]
    fn save_with_empty_pending_cancels() {
        let mut store = setup(&["A"]);
        let mut item = ItemView::new("A");

        item.update(ItemMsg::Clicked { shift: true }, &mut store);
        assert!(item.update(ItemMsg::Save, &mut store));

        assert_eq!(store.texts(), ["A"]);
        assert!(!item.is_editing());
    }

    #[test]
    fn click_while_editing_does_not_remove() {
        let mut store = setup(&["A"]);
        let mut item = ItemView::new("A");

        item.update(ItemMsg::Clicked { shift: true }, &mut store);
        assert!(!item.update(ItemMsg::Clicked { shift: false }, &mut store));
        assert_eq!(store.texts(), ["A"]);
    }

    #[test]
    fn renders_button_or_edit_form() {
        let mut store = setup(&["A"]);
        let mut item = ItemView::new("A");
        assert_eq!(
            item.view().to_html(),
            r#"<p><button data-live-on="click">A</button><br></p>"#
        );

        item.update(ItemMsg::Clicked { shift: true }, &mut store);
        item.update(ItemMsg::Pending("A2".into()), &mut store);
        assert_eq!(
            item.view().to_html(),
            concat!(
                r#"<div><label>Update: <input value="A2" data-live-on="change keypress"></label>"#,
                r#"<button data-live-on="click">Save</button><br></div>"#
            )
        );
    }

    #[test]
    fn enter_key_maps_to_save() {
        let mut store = setup(&["A"]);
        let mut item = ItemView::new("A");
        item.update(ItemMsg::Clicked { shift: true }, &mut store);

        let view = item.view();
        let input = view.find(&[0, 1]).and_then(Node::as_element).unwrap();
        let on_key = input.listener(EventKind::KeyPress).unwrap();

        assert_eq!(on_key(&axum_live::EventData::key("Enter")), Some(ItemMsg::Save));
        assert_eq!(on_key(&axum_live::EventData::key("a")), None);
    }
}
