//! Page header with a collapsible help section.

use axum_live::html::{Node, a, button, div, h1, h3, hr, p};
use axum_live::{Component, EventKind, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoMsg {
    Toggle,
}

#[derive(Debug)]
pub struct InfoPanel {
    visible: State<bool>,
}

impl Default for InfoPanel {
    fn default() -> Self {
        Self {
            visible: State::new(true),
        }
    }
}

impl InfoPanel {
    pub fn is_visible(&self) -> bool {
        *self.visible
    }
}

impl Component for InfoPanel {
    type Message = InfoMsg;

    fn update(&mut self, msg: InfoMsg) -> bool {
        match msg {
            InfoMsg::Toggle => {
                let next = !*self.visible;
                self.visible.set(next)
            }
        }
    }

    fn view(&self) -> Node<InfoMsg> {
        let display = if *self.visible { "block" } else { "none" };

        div()
            .child(h1().text("ReactPy ToDo"))
            .child(hr())
            .child(
                button()
                    .text("Toggle Info")
                    .on(EventKind::Click, |_| Some(InfoMsg::Toggle)),
            )
            .child(
                div()
                    .style(format!("display: {display}"))
                    .child(h3().text("Info"))
                    .child(
                        p().text("This is a simple ToDo app, demonstrating the capabilities of the ")
                            .child(a().attr("href", "https://reactpy.dev").text("ReactPy"))
                            .text(" python framework."),
                    )
                    .child(p().text(
                        "The ReactPy framework allows you to design web apps in python using \
                         react-like syntax and features (such as: use_state).",
                    ))
                    .child(p().text(
                        "It also means that the client will update automatically after server \
                         changes, which is pretty neat!",
                    ))
                    .child(p().text(
                        "As is the tradition when showcasing any new web-app framework, I have \
                         created a simple ToDo app.",
                    ))
                    .child(h3().text("Usage"))
                    .child(p().text(
                        "Click on an item to remove it from the list, or hold shift while \
                         clicking to edit.",
                    ))
                    .child(hr()),
            )
            .into()
    }
}
