use crate::catalog::{Catalog, Product, ProductId};
use crate::conversation::{ConversationTurn, Transcript};
use crate::dnd::{DragController, DropOutcome};
use crate::event::{AppEvent, RequestId};
use crate::gateway::routine::{build_routine_prompt, EMPTY_SELECTION_NOTICE, ROUTINE_PLACEHOLDER};
use crate::selection::SelectionSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Work the host has to run off the UI thread on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadCatalog {
        generation: u64,
        category: String,
    },
    SendTranscript {
        request_id: RequestId,
        messages: Vec<ConversationTurn>,
    },
}

/// Interactions the host rendering layer forwards to the controller.
pub trait AdvisorEvents {
    fn on_category_change(&mut self, category: &str) -> Option<Effect>;
    fn on_drag_start(&mut self, product_id: ProductId);
    fn on_drag_end(&mut self);
    fn on_drop(&mut self, payload: &str) -> DropOutcome;
    fn on_remove(&mut self, product_id: &ProductId) -> bool;
    fn on_chat_submit(&mut self, text: &str) -> Option<Effect>;
    fn on_generate_routine(&mut self) -> Option<Effect>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    NotRequested,
    Loading,
    Ready,
    Unavailable,
}

#[derive(Debug)]
struct InFlight {
    request_id: RequestId,
    /// Snapshot index of a turn shown as placeholder text until the reply
    /// lands.
    placeholder: Option<(usize, &'static str)>,
}

/// Owns every piece of session state: loaded catalog, active category,
/// selection, drag state, transcript and outstanding requests.
#[derive(Debug)]
pub struct AdvisorController {
    brand: String,
    catalog: Option<Catalog>,
    active_category: Option<String>,
    catalog_status: CatalogStatus,
    load_generation: u64,
    selection: SelectionSet,
    drag: DragController,
    transcript: Transcript,
    in_flight: Vec<InFlight>,
    next_request_id: u64,
    chat_notice: Option<&'static str>,
}

impl AdvisorController {
    pub fn new(brand: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            catalog: None,
            active_category: None,
            catalog_status: CatalogStatus::NotRequested,
            load_generation: 0,
            selection: SelectionSet::new(),
            drag: DragController::default(),
            transcript: Transcript::new(system_prompt),
            in_flight: Vec::new(),
            next_request_id: 0,
            chat_notice: None,
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn catalog_status(&self) -> CatalogStatus {
        self.catalog_status
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn chat_notice(&self) -> Option<&'static str> {
        self.chat_notice
    }

    pub fn is_awaiting_reply(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Products of the active category that are not in the selection, in
    /// catalog order.
    pub fn visible_products(&self) -> Vec<Arc<Product>> {
        match (&self.catalog, &self.active_category) {
            (Some(catalog), Some(category)) => catalog
                .filter_by_category(category)
                .into_iter()
                .filter(|product| !self.selection.contains(&product.id))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Text to show for the displayed turn at `index`, honoring in-flight
    /// placeholders.
    pub fn display_content(&self, index: usize) -> Option<&str> {
        let placeholder = self.in_flight.iter().find_map(|request| match request.placeholder {
            Some((turn, text)) if turn == index => Some(text),
            _ => None,
        });
        placeholder.or_else(|| {
            self.transcript
                .snapshot()
                .get(index)
                .map(|turn| turn.content.as_str())
        })
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded {
                generation,
                category,
                result,
            } => self.apply_catalog_loaded(generation, category, result),
            AppEvent::AssistantReplied { request_id, text } => {
                self.apply_assistant_reply(request_id, text)
            }
        }
    }

    fn apply_catalog_loaded(
        &mut self,
        generation: u64,
        category: String,
        result: Result<Catalog, crate::error::CatalogUnavailable>,
    ) {
        if generation != self.load_generation {
            debug!(generation, latest = self.load_generation, %category, "discarding stale catalog load");
            return;
        }

        match result {
            Ok(catalog) => {
                info!(%category, products = catalog.len(), "catalog view updated");
                self.catalog = Some(catalog);
                self.active_category = Some(category);
                self.catalog_status = CatalogStatus::Ready;
            }
            Err(err) => {
                warn!(%category, error = %err, "catalog unavailable, keeping last view");
                self.catalog_status = if self.catalog.is_some() {
                    CatalogStatus::Ready
                } else {
                    CatalogStatus::Unavailable
                };
            }
        }
    }

    fn apply_assistant_reply(&mut self, request_id: RequestId, text: String) {
        self.in_flight.retain(|request| request.request_id != request_id);
        self.transcript.append_assistant(text);
        self.chat_notice = None;
        debug!(%request_id, pending = self.in_flight.len(), "assistant reply appended");
    }

    fn dispatch(&mut self, placeholder: Option<&'static str>) -> Effect {
        self.next_request_id += 1;
        let request_id = RequestId(self.next_request_id);
        let placeholder = placeholder.map(|text| (self.transcript.snapshot().len() - 1, text));
        self.in_flight.push(InFlight {
            request_id,
            placeholder,
        });
        self.chat_notice = None;
        info!(%request_id, turns = self.transcript.len(), "dispatching transcript");
        Effect::SendTranscript {
            request_id,
            messages: self.transcript.to_payload().to_vec(),
        }
    }
}

impl AdvisorEvents for AdvisorController {
    fn on_category_change(&mut self, category: &str) -> Option<Effect> {
        self.load_generation += 1;
        if self.catalog.is_none() {
            self.catalog_status = CatalogStatus::Loading;
        }
        debug!(category, generation = self.load_generation, "category changed");
        Some(Effect::LoadCatalog {
            generation: self.load_generation,
            category: category.to_string(),
        })
    }

    fn on_drag_start(&mut self, product_id: ProductId) {
        self.drag.begin(product_id);
    }

    fn on_drag_end(&mut self) {
        self.drag.cancel();
    }

    fn on_drop(&mut self, payload: &str) -> DropOutcome {
        self.drag
            .drop_on_tray(payload, self.catalog.as_ref(), &mut self.selection)
    }

    fn on_remove(&mut self, product_id: &ProductId) -> bool {
        let removed = self.selection.remove(product_id);
        if removed {
            info!(%product_id, selected = self.selection.len(), "product removed from selection");
        }
        removed
    }

    fn on_chat_submit(&mut self, text: &str) -> Option<Effect> {
        if !self.transcript.append_user(text) {
            return None;
        }
        Some(self.dispatch(None))
    }

    fn on_generate_routine(&mut self) -> Option<Effect> {
        if self.selection.is_empty() {
            debug!("routine requested with empty selection");
            self.chat_notice = Some(EMPTY_SELECTION_NOTICE);
            return None;
        }

        let prompt = build_routine_prompt(&self.brand, self.selection.list());
        self.transcript.append_user(&prompt);
        Some(self.dispatch(Some(ROUTINE_PLACEHOLDER)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixture_catalog;
    use crate::conversation::Role;
    use crate::error::CatalogUnavailable;
    use crate::gateway::FALLBACK_REPLY;

    fn controller() -> AdvisorController {
        AdvisorController::new("L'Oréal", "system prompt")
    }

    fn load(controller: &mut AdvisorController, category: &str) {
        let Some(Effect::LoadCatalog {
            generation,
            category,
        }) = controller.on_category_change(category)
        else {
            panic!("category change should request a catalog load");
        };
        controller.apply(AppEvent::CatalogLoaded {
            generation,
            category,
            result: Ok(fixture_catalog()),
        });
    }

    fn visible_ids(controller: &AdvisorController) -> Vec<String> {
        controller
            .visible_products()
            .iter()
            .map(|product| product.id.to_string())
            .collect()
    }

    #[test]
    fn nothing_is_visible_before_a_category_is_chosen() {
        let controller = controller();
        assert!(controller.visible_products().is_empty());
        assert_eq!(controller.catalog_status(), CatalogStatus::NotRequested);
    }

    #[test]
    fn filter_then_drag_then_remove_round_trip() {
        let mut controller = controller();
        load(&mut controller, "cleanser");
        assert_eq!(visible_ids(&controller), vec!["1", "3"]);

        controller.on_drag_start(ProductId::new("3"));
        assert!(controller.is_dragging());
        let outcome = controller.on_drop("3");
        assert_eq!(outcome, DropOutcome::Added(ProductId::new("3")));
        assert!(!controller.is_dragging());
        assert_eq!(visible_ids(&controller), vec!["1"]);
        assert_eq!(controller.selection().len(), 1);

        assert!(controller.on_remove(&ProductId::new("3")));
        assert_eq!(visible_ids(&controller), vec!["1", "3"]);
        assert!(controller.selection().is_empty());
    }

    #[test]
    fn selection_survives_category_changes() {
        let mut controller = controller();
        load(&mut controller, "moisturizer");
        controller.on_drop("2");

        load(&mut controller, "cleanser");
        assert_eq!(visible_ids(&controller), vec!["1", "3"]);
        assert!(controller.selection().contains(&ProductId::new("2")));

        load(&mut controller, "moisturizer");
        assert!(visible_ids(&controller).is_empty());
    }

    #[test]
    fn invalid_drop_is_ignored() {
        let mut controller = controller();
        load(&mut controller, "cleanser");

        controller.on_drag_start(ProductId::new("1"));
        let outcome = controller.on_drop("not-a-product");
        assert!(matches!(outcome, DropOutcome::InvalidDrop(_)));
        assert!(controller.selection().is_empty());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn catalog_failure_keeps_last_view() {
        let mut controller = controller();
        load(&mut controller, "cleanser");

        let Some(Effect::LoadCatalog { generation, category }) =
            controller.on_category_change("moisturizer")
        else {
            panic!("category change should request a catalog load");
        };
        controller.apply(AppEvent::CatalogLoaded {
            generation,
            category,
            result: Err(CatalogUnavailable::Status {
                url: "http://catalog.test".to_string(),
                status: 500,
            }),
        });

        assert_eq!(controller.active_category(), Some("cleanser"));
        assert_eq!(visible_ids(&controller), vec!["1", "3"]);
        assert_eq!(controller.catalog_status(), CatalogStatus::Ready);
    }

    #[test]
    fn catalog_failure_without_prior_view_is_unavailable() {
        let mut controller = controller();
        let Some(Effect::LoadCatalog { generation, category }) =
            controller.on_category_change("cleanser")
        else {
            panic!("category change should request a catalog load");
        };
        assert_eq!(controller.catalog_status(), CatalogStatus::Loading);

        let malformed = serde_json::from_str::<serde_json::Value>("{").expect_err("should not parse");
        controller.apply(AppEvent::CatalogLoaded {
            generation,
            category,
            result: Err(CatalogUnavailable::Parse(malformed)),
        });

        assert_eq!(controller.catalog_status(), CatalogStatus::Unavailable);
        assert!(controller.visible_products().is_empty());
    }

    #[test]
    fn stale_catalog_load_is_discarded() {
        let mut controller = controller();
        let Some(Effect::LoadCatalog { generation: first, .. }) =
            controller.on_category_change("moisturizer")
        else {
            panic!("category change should request a catalog load");
        };
        load(&mut controller, "cleanser");

        controller.apply(AppEvent::CatalogLoaded {
            generation: first,
            category: "moisturizer".to_string(),
            result: Ok(fixture_catalog()),
        });

        assert_eq!(controller.active_category(), Some("cleanser"));
    }

    #[test]
    fn empty_chat_submit_leaves_transcript_unchanged() {
        let mut controller = controller();
        let before = controller.transcript().len();

        assert!(controller.on_chat_submit("   ").is_none());
        assert_eq!(controller.transcript().len(), before);
        assert!(!controller.is_awaiting_reply());
    }

    #[test]
    fn chat_submit_sends_full_transcript_with_system_turn() {
        let mut controller = controller();
        let Some(Effect::SendTranscript { request_id, messages }) =
            controller.on_chat_submit("Is retinol safe daily?")
        else {
            panic!("chat submit should dispatch");
        };

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1], ConversationTurn::new(Role::User, "Is retinol safe daily?"));
        assert!(controller.is_awaiting_reply());

        controller.apply(AppEvent::AssistantReplied {
            request_id,
            text: "Start slowly.".to_string(),
        });
        assert!(!controller.is_awaiting_reply());
        assert_eq!(controller.transcript().snapshot().len(), 2);
    }

    #[test]
    fn routine_with_empty_selection_makes_no_call() {
        let mut controller = controller();
        let before = controller.transcript().len();

        assert!(controller.on_generate_routine().is_none());
        assert_eq!(controller.chat_notice(), Some(EMPTY_SELECTION_NOTICE));
        assert_eq!(controller.transcript().len(), before);
        assert!(!controller.is_awaiting_reply());
    }

    #[test]
    fn routine_placeholder_is_displayed_but_never_sent() {
        let mut controller = controller();
        load(&mut controller, "cleanser");
        controller.on_drop("1");
        controller.on_drop("3");

        let Some(Effect::SendTranscript { request_id, messages }) = controller.on_generate_routine()
        else {
            panic!("routine should dispatch");
        };

        let sent = &messages.last().expect("prompt should be sent").content;
        assert!(sent.contains("- CeraVe Hydrating Facial Cleanser (cleanser)"));
        assert!(messages.iter().all(|turn| turn.content != ROUTINE_PLACEHOLDER));
        assert_eq!(controller.display_content(0), Some(ROUTINE_PLACEHOLDER));

        controller.apply(AppEvent::AssistantReplied {
            request_id,
            text: "Morning Routine: cleanse.".to_string(),
        });
        assert_eq!(controller.display_content(0), Some(sent.as_str()));
        assert!(controller
            .transcript()
            .to_payload()
            .iter()
            .all(|turn| turn.content != ROUTINE_PLACEHOLDER));
    }

    #[test]
    fn notice_clears_once_conversation_resumes() {
        let mut controller = controller();
        controller.on_generate_routine();
        assert!(controller.chat_notice().is_some());

        controller.on_chat_submit("hello");
        assert!(controller.chat_notice().is_none());
    }

    #[test]
    fn gateway_failure_appends_exactly_one_fallback_turn() {
        let mut controller = controller();
        let Some(Effect::SendTranscript { request_id, .. }) = controller.on_chat_submit("hi") else {
            panic!("chat submit should dispatch");
        };
        let before = controller.transcript().len();

        controller.apply(AppEvent::AssistantReplied {
            request_id,
            text: FALLBACK_REPLY.to_string(),
        });

        assert_eq!(controller.transcript().len(), before + 1);
        let last = controller
            .transcript()
            .snapshot()
            .last()
            .expect("fallback turn should exist");
        assert_eq!(last, &ConversationTurn::new(Role::Assistant, FALLBACK_REPLY));
    }

    #[test]
    fn overlapping_replies_append_in_completion_order() {
        let mut controller = controller();
        let Some(Effect::SendTranscript { request_id: first, .. }) =
            controller.on_chat_submit("first question")
        else {
            panic!("chat submit should dispatch");
        };
        let Some(Effect::SendTranscript { request_id: second, messages }) =
            controller.on_chat_submit("second question")
        else {
            panic!("chat submit should dispatch");
        };
        assert_eq!(messages.len(), 3);

        controller.apply(AppEvent::AssistantReplied {
            request_id: second,
            text: "second answer".to_string(),
        });
        assert!(controller.is_awaiting_reply());
        controller.apply(AppEvent::AssistantReplied {
            request_id: first,
            text: "first answer".to_string(),
        });
        assert!(!controller.is_awaiting_reply());

        let contents: Vec<&str> = controller
            .transcript()
            .snapshot()
            .iter()
            .map(|turn| turn.content.as_str())
            .collect();
        assert_eq!(
            contents,
            vec!["first question", "second question", "second answer", "first answer"]
        );
    }
}
