//! The mounted root: header above the list.

use axum_live::Component;
use axum_live::html::{Node, div};

use crate::info::{InfoMsg, InfoPanel};
use crate::list::{ListMsg, ListView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    Info(InfoMsg),
    List(ListMsg),
}

#[derive(Debug, Default)]
pub struct AppRoot {
    info: InfoPanel,
    list: ListView,
}

impl AppRoot {
    pub fn info(&self) -> &InfoPanel {
        &self.info
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }
}

impl Component for AppRoot {
    type Message = AppMsg;

    fn update(&mut self, msg: AppMsg) -> bool {
        match msg {
            AppMsg::Info(msg) => self.info.update(msg),
            AppMsg::List(msg) => self.list.update(msg),
        }
    }

    fn view(&self) -> Node<AppMsg> {
        div()
            .child(self.info.view().map(AppMsg::Info))
            .child(self.list.view().map(AppMsg::List))
            .into()
    }
}
