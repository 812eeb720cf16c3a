//! Button actions sent to the orchestrator
//!
//! A key is marked in flight before its request goes out, so repeated clicks
//! cannot submit twice. Completion is not correlated per key: any new widget
//! event clears every pending entry. An action whose reply carries no widget
//! stays pending until some later widget arrives, or for the rest of the
//! session.

use crate::orchestrator::OrchestratorClient;
use crate::VoiceboardError;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// User-initiated request for the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRequest {
    ProductDetails { product_id: u64 },
    AddToCart { variant_id: u64, quantity: u32 },
    DeleteFromCart { variant_id: u64 },
    SubmitOrder,
    Custom {
        key: String,
        name: String,
        params: Map<String, Value>,
    },
}

impl ActionRequest {
    /// Action-scoped key used for the in-flight lock
    pub fn key(&self) -> String {
        match self {
            ActionRequest::ProductDetails { product_id } => format!("details-{}", product_id),
            ActionRequest::AddToCart { variant_id, .. } => format!("add-{}", variant_id),
            ActionRequest::DeleteFromCart { variant_id } => format!("delete-{}", variant_id),
            ActionRequest::SubmitOrder => "submit-order".to_string(),
            ActionRequest::Custom { key, .. } => key.clone(),
        }
    }

    /// Action name understood by the orchestrator
    pub fn name(&self) -> &str {
        match self {
            ActionRequest::ProductDetails { .. } => "get_product_details",
            ActionRequest::AddToCart { .. } => "add_item_to_cart",
            ActionRequest::DeleteFromCart { .. } => "delete_item_from_cart",
            ActionRequest::SubmitOrder => "submit_cart_for_order",
            ActionRequest::Custom { name, .. } => name,
        }
    }

    pub fn params(&self) -> Map<String, Value> {
        let value = match self {
            ActionRequest::ProductDetails { product_id } => json!({ "product_id": product_id }),
            ActionRequest::AddToCart {
                variant_id,
                quantity,
            } => json!({ "variant_id": variant_id, "quantity": quantity }),
            ActionRequest::DeleteFromCart { variant_id } => json!({ "variant_id": variant_id }),
            ActionRequest::SubmitOrder => json!({}),
            ActionRequest::Custom { params, .. } => return params.clone(),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// Pending entry for one action key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub key: String,
    pub in_flight: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Handed to the orchestrator; the key is now in flight
    Sent,
    /// The key was already in flight, nothing was sent
    AlreadyInFlight,
    /// The orchestrator rejected the request; the key was released
    Failed(VoiceboardError),
}

#[derive(Debug, Clone, Default)]
pub struct ActionDispatcher {
    pending: BTreeMap<String, PendingAction>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock `key`, then hand `request` to the orchestrator. Never retries.
    pub fn dispatch(
        &mut self,
        key: &str,
        request: &ActionRequest,
        client: &dyn OrchestratorClient,
    ) -> DispatchOutcome {
        if self.is_in_flight(key) {
            debug!("Action {} already in flight, ignoring", key);
            return DispatchOutcome::AlreadyInFlight;
        }

        self.pending.insert(
            key.to_string(),
            PendingAction {
                key: key.to_string(),
                in_flight: true,
            },
        );

        debug!("Dispatching {} as {}", request.name(), key);
        match client.send_action(request.name(), &request.params()) {
            Ok(()) => DispatchOutcome::Sent,
            Err(e) => {
                warn!("Action {} failed to send: {}", key, e);
                self.pending.remove(key);
                DispatchOutcome::Failed(e)
            }
        }
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.pending.get(key).is_some_and(|p| p.in_flight)
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingAction> {
        self.pending.values()
    }

    /// Drop every pending entry
    pub fn clear_all(&mut self) {
        if !self.pending.is_empty() {
            debug!("Clearing {} pending action(s)", self.pending.len());
        }
        self.pending.clear();
    }
}
