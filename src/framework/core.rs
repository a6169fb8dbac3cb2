//! # Core Actor Framework
//!
//! This module defines the generic building blocks the storefront backend is
//! assembled from.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all backend records (products, pickup slots, orders) implement.
//! - [`ResourceActor`]: The generic actor that owns a collection of entities.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Plumbing errors (e.g., ActorClosed, NotFound) plus boxed entity errors.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any backend record must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// Products, pickup slots and orders all share one message loop. The associated
/// types keep them apart at compile time: an order actor only accepts an
/// [`OrderRequest`](crate::model::OrderRequest) payload, a slot actor only a
/// [`SlotOpen`](crate::model::SlotOpen) payload.
///
/// # Identity
/// Unlike a plain counter, [`ActorEntity::assign_id`] sees the creation payload.
/// Orders and products take the sequence number; pickup slots derive their id
/// from the `(date, slot)` pair they describe, so a second create for the same
/// pair is rejected with [`FrameworkError::AlreadyExists`].
///
/// # Async & Context
/// Hooks receive the `Context` injected through [`ResourceActor::run`], which is
/// how the order actor reaches the catalog and slot actors.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this entity. Ordered so listings are stable.
    type Id: Ord + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Reserve`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity. Boxed into [`FrameworkError::EntityError`]
    /// on the way back to the caller.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Picks the id for a new entity. `seq` starts at 1 and increments on
    /// every create request the actor receives.
    fn assign_id(seq: u32, params: &Self::Create) -> Self::Id;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the entity is stored.
    /// An error here discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Borrows the typed entity error, if this is one of type `E`.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants are the CRUD lifecycle plus `List` for catalog-style reads and
/// `Action` for resource-specific logic such as reserving a pickup slot.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel. Messages are handled one at a time, so two
/// orders racing for the last cake in a pickup slot are serialized by the slot
/// actor without any lock.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_seq: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_seq: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to reach other actors whose clients were created *after* this actor.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "CakeOrder" instead of "acai_storefront::model::order::CakeOrder")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::assign_id(self.next_seq, &params);
                    self.next_seq = self.next_seq.wrapping_add(1);

                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Already exists");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, %id, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only the mailbox sender, so clones are cheap and can be handed to
/// other actors as context.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Derive would demand `T: Clone` bounds on every associated type.
impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update {
                id,
                update,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Voucher {
        code: String,
        balance_cents: i64,
    }

    #[derive(Debug)]
    struct VoucherIssue {
        code: String,
        balance_cents: i64,
    }

    #[derive(Debug)]
    struct VoucherTopUp(i64);

    #[derive(Debug)]
    enum VoucherAction {
        Redeem(i64),
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum VoucherError {
        #[error("insufficient balance")]
        Insufficient,
    }

    #[async_trait]
    impl ActorEntity for Voucher {
        type Id = String;
        type Create = VoucherIssue;
        type Update = VoucherTopUp;
        type Action = VoucherAction;
        type ActionResult = i64;
        type Context = ();
        type Error = VoucherError;

        // Natural key: the voucher code.
        fn assign_id(_seq: u32, params: &VoucherIssue) -> String {
            params.code.clone()
        }

        fn from_create_params(id: String, params: VoucherIssue) -> Result<Self, Self::Error> {
            Ok(Self {
                code: id,
                balance_cents: params.balance_cents,
            })
        }

        async fn on_update(&mut self, update: VoucherTopUp, _ctx: &()) -> Result<(), Self::Error> {
            self.balance_cents += update.0;
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: VoucherAction,
            _ctx: &(),
        ) -> Result<i64, Self::Error> {
            match action {
                VoucherAction::Redeem(amount) if amount <= self.balance_cents => {
                    self.balance_cents -= amount;
                    Ok(self.balance_cents)
                }
                VoucherAction::Redeem(_) => Err(VoucherError::Insufficient),
            }
        }
    }

    fn issue(code: &str, balance_cents: i64) -> VoucherIssue {
        VoucherIssue {
            code: code.to_string(),
            balance_cents,
        }
    }

    // --- Test ---

    #[tokio::test]
    async fn test_resource_actor_crud_and_actions() {
        let (actor, client) = ResourceActor::<Voucher>::new(10);
        tokio::spawn(actor.run(()));

        let id = client.create(issue("SPRING", 1_000)).await.unwrap();
        assert_eq!(id, "SPRING");

        let remaining = client
            .perform_action(id.clone(), VoucherAction::Redeem(400))
            .await
            .unwrap();
        assert_eq!(remaining, 600);

        let topped = client.update(id.clone(), VoucherTopUp(50)).await.unwrap();
        assert_eq!(topped.balance_cents, 650);

        client.delete(id.clone()).await.unwrap();
        assert!(client.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_natural_key_is_rejected() {
        let (actor, client) = ResourceActor::<Voucher>::new(10);
        tokio::spawn(actor.run(()));

        client.create(issue("GIFT", 500)).await.unwrap();
        let err = client.create(issue("GIFT", 900)).await.unwrap_err();
        assert!(matches!(err, FrameworkError::AlreadyExists(ref code) if code == "GIFT"));

        // The first voucher keeps its balance.
        let voucher = client.get("GIFT".to_string()).await.unwrap().unwrap();
        assert_eq!(voucher.balance_cents, 500);
    }

    #[tokio::test]
    async fn test_entity_error_downcasts() {
        let (actor, client) = ResourceActor::<Voucher>::new(10);
        tokio::spawn(actor.run(()));

        client.create(issue("TINY", 100)).await.unwrap();
        let err = client
            .perform_action("TINY".to_string(), VoucherAction::Redeem(500))
            .await
            .unwrap_err();

        assert_eq!(err.entity_error::<VoucherError>(), Some(&VoucherError::Insufficient));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let (actor, client) = ResourceActor::<Voucher>::new(10);
        tokio::spawn(actor.run(()));

        for code in ["C", "A", "B"] {
            client.create(issue(code, 1)).await.unwrap();
        }
        let codes: Vec<String> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.code)
            .collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_actor_closed() {
        let (actor, client) = ResourceActor::<Voucher>::new(10);
        drop(actor);

        let err = client.get("ANY".to_string()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::ActorClosed));
    }
}
