use crate::catalog::{Catalog, ProductId};
use crate::selection::SelectionSet;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { product_id: ProductId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Added(ProductId),
    AlreadySelected(ProductId),
    /// The payload did not name a product in the loaded catalog.
    InvalidDrop(String),
}

/// Tracks the single active drag and turns drops on the tray into
/// selection adds.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[cfg(test)]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn begin(&mut self, product_id: ProductId) {
        debug!(%product_id, "drag started");
        self.state = DragState::Dragging { product_id };
    }

    pub fn cancel(&mut self) {
        if let DragState::Dragging { product_id } = &self.state {
            debug!(%product_id, "drag ended without drop");
        }
        self.state = DragState::Idle;
    }

    /// Resolves `payload` against `catalog` and adds the product to
    /// `selection` when it is known and not yet selected. Always returns the
    /// controller to idle.
    pub fn drop_on_tray(
        &mut self,
        payload: &str,
        catalog: Option<&Catalog>,
        selection: &mut SelectionSet,
    ) -> DropOutcome {
        self.state = DragState::Idle;

        let id = ProductId::new(payload.trim());
        let Some(product) = catalog.and_then(|catalog| catalog.find(&id)) else {
            debug!(payload, "dropped identifier not in catalog, ignoring");
            return DropOutcome::InvalidDrop(payload.to_string());
        };

        if selection.add(product.clone()) {
            info!(product_id = %id, selected = selection.len(), "product added to selection");
            DropOutcome::Added(id)
        } else {
            debug!(product_id = %id, "product already selected");
            DropOutcome::AlreadySelected(id)
        }
    }
}
