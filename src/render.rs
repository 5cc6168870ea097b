//! Pure view models built from controller state. The egui host draws these
//! and nothing else.

use crate::catalog::Product;
use crate::controller::{AdvisorController, CatalogStatus};
use crate::conversation::format::format_for_display;
use crate::conversation::markup::Markup;
use crate::conversation::Role;
use std::sync::Arc;

pub const CATALOG_PLACEHOLDER: &str = "Select a category to view products";
pub const CATALOG_LOADING: &str = "Loading products...";
pub const CATALOG_UNAVAILABLE: &str = "Products are unavailable right now. Please try again.";
pub const TRAY_PLACEHOLDER: &str = "Drag products here to build your routine";
pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "AI Beauty Consultant";

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView {
    Placeholder(&'static str),
    Grid(Vec<Arc<Product>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrayView {
    Placeholder(&'static str),
    Cards(Vec<Arc<Product>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatBubble {
    pub speaker: Speaker,
    pub label: &'static str,
    pub body: Markup,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatView {
    Notice(&'static str),
    Conversation {
        bubbles: Vec<ChatBubble>,
        typing: bool,
    },
}

pub fn catalog_view(controller: &AdvisorController) -> CatalogView {
    if controller.active_category().is_none() {
        return match controller.catalog_status() {
            CatalogStatus::NotRequested => CatalogView::Placeholder(CATALOG_PLACEHOLDER),
            CatalogStatus::Loading => CatalogView::Placeholder(CATALOG_LOADING),
            CatalogStatus::Unavailable => CatalogView::Placeholder(CATALOG_UNAVAILABLE),
            CatalogStatus::Ready => CatalogView::Grid(Vec::new()),
        };
    }
    CatalogView::Grid(controller.visible_products())
}

pub fn tray_view(controller: &AdvisorController) -> TrayView {
    let selection = controller.selection();
    if selection.is_empty() {
        TrayView::Placeholder(TRAY_PLACEHOLDER)
    } else {
        TrayView::Cards(selection.list().to_vec())
    }
}

pub fn chat_view(controller: &AdvisorController) -> ChatView {
    if let Some(notice) = controller.chat_notice() {
        return ChatView::Notice(notice);
    }

    let bubbles = controller
        .transcript()
        .snapshot()
        .iter()
        .enumerate()
        .filter_map(|(index, turn)| {
            let content = controller.display_content(index)?;
            Some(match turn.role {
                Role::Assistant => ChatBubble {
                    speaker: Speaker::Assistant,
                    label: ASSISTANT_LABEL,
                    body: Markup::parse(&format_for_display(content)),
                },
                _ => ChatBubble {
                    speaker: Speaker::User,
                    label: USER_LABEL,
                    body: Markup::plain(content),
                },
            })
        })
        .collect();

    ChatView::Conversation {
        bubbles,
        typing: controller.is_awaiting_reply(),
    }
}
