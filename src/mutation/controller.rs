use std::sync::{Arc, mpsc};

use super::{Collection, Draft, FlightKey, InFlight, Intent, Item, MutationError, Patch};
use crate::gateway::Gateway;
use crate::model::ItemId;
use crate::notify::{Notice, NoticeKind, Notifier};
use crate::remote::GatewayError;

#[derive(Debug)]
pub enum Reconciliation {
    /// The server confirmed; local state is authoritative.
    Committed,
    /// The server call failed; the pre-mutation snapshot was restored.
    RolledBack { error: GatewayError },
    /// The collection was detached while the call was in flight; nothing applied.
    Discarded,
}

impl Reconciliation {
    pub fn is_committed(&self) -> bool {
        matches!(self, Reconciliation::Committed)
    }

    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Reconciliation::RolledBack { .. })
    }

    pub fn error(&self) -> Option<&GatewayError> {
        match self {
            Reconciliation::RolledBack { error } => Some(error),
            _ => None,
        }
    }
}

/// What the server confirmed for a pending mutation.
#[derive(Debug)]
pub enum Confirmed<T> {
    Created(T),
    Updated(Option<T>),
    Removed,
}

pub type SendResult<T> = Result<Confirmed<T>, GatewayError>;

#[derive(Clone, Debug)]
struct Snapshot<T> {
    index: usize,
    item: T,
}

#[derive(Debug)]
enum Op<T, D> {
    Create {
        draft: D,
    },
    Update {
        id: ItemId,
        patch: Patch,
        before: Snapshot<T>,
    },
    Remove {
        before: Snapshot<T>,
    },
    RemoveAll {
        ids: Vec<ItemId>,
        /// Set when the ids were selected by a boolean field.
        matching: Option<String>,
        /// Ascending by index, as captured before removal.
        before: Vec<Snapshot<T>>,
    },
}

/// A mutation applied locally whose remote call has not been reconciled yet.
#[derive(Debug)]
pub struct Pending<T, D> {
    ticket: u64,
    epoch: u64,
    keys: Vec<FlightKey>,
    op: Op<T, D>,
}

impl<T: Item, D: Draft> Pending<T, D> {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn keys(&self) -> &[FlightKey] {
        &self.keys
    }

    /// The item this mutation targets, if it already exists.
    pub fn target(&self) -> Option<ItemId> {
        match &self.op {
            Op::Create { .. } | Op::RemoveAll { .. } => None,
            Op::Update { id, .. } => Some(*id),
            Op::Remove { before } => Some(before.item.id()),
        }
    }

    /// Items as they were before this mutation, with their positions.
    pub fn rollback_snapshot(&self) -> Vec<(usize, &T)> {
        match &self.op {
            Op::Create { .. } => Vec::new(),
            Op::Update { before, .. } | Op::Remove { before } => {
                vec![(before.index, &before.item)]
            }
            Op::RemoveAll { before, .. } => before.iter().map(|s| (s.index, &s.item)).collect(),
        }
    }

    /// Performs the remote call. Never touches local state.
    pub fn send<G>(&self, gateway: &G) -> SendResult<T>
    where
        G: Gateway<Item = T, Draft = D>,
    {
        match &self.op {
            Op::Create { draft } => gateway.create(draft).map(Confirmed::Created),
            Op::Update { id, patch, .. } => gateway.update(*id, patch).map(Confirmed::Updated),
            Op::Remove { before } => gateway
                .remove(before.item.id())
                .map(|()| Confirmed::Removed),
            Op::RemoveAll {
                ids,
                matching: Some(field),
                ..
            } => gateway
                .remove_matching(field, ids)
                .map(|()| Confirmed::Removed),
            Op::RemoveAll { ids, .. } => gateway.remove_all(ids).map(|()| Confirmed::Removed),
        }
    }

    fn describe(&self) -> String {
        match &self.op {
            Op::Create { .. } => "add".to_string(),
            Op::Update { id, .. } => format!("update #{}", id),
            Op::Remove { before } => format!("remove #{}", before.item.id()),
            Op::RemoveAll { ids, .. } => format!("remove {} items", ids.len()),
        }
    }
}

pub struct MutationController<G: Gateway> {
    gateway: G,
    filter: G::Filter,
    collection: Collection<G::Item>,
    in_flight: InFlight,
    notifier: Arc<dyn Notifier>,
    epoch: u64,
    next_ticket: u64,
}

impl<G: Gateway> MutationController<G> {
    /// Fetches the collection and starts tracking it.
    pub fn mount(
        gateway: G,
        filter: G::Filter,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, GatewayError> {
        let items = gateway.list(&filter)?;
        Ok(Self::with_items(gateway, filter, items, notifier))
    }

    pub fn with_items(
        gateway: G,
        filter: G::Filter,
        items: Vec<G::Item>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            filter,
            collection: Collection::from_items(items),
            in_flight: InFlight::default(),
            notifier,
            epoch: 0,
            next_ticket: 0,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn filter(&self) -> &G::Filter {
        &self.filter
    }

    pub fn collection(&self) -> &Collection<G::Item> {
        &self.collection
    }

    pub fn items(&self) -> &[G::Item] {
        self.collection.as_slice()
    }

    pub fn is_pending(&self, id: ItemId) -> bool {
        self.in_flight.contains(&FlightKey::Item(id))
    }

    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Replaces the collection with the server's listing. Items with a mutation
    /// in flight keep their optimistic state so the pending reconcile stays valid.
    pub fn refetch(&mut self) -> Result<(), GatewayError> {
        let fresh = self.gateway.list(&self.filter)?;
        let mut next = Collection::from_items(fresh);
        for id in self.in_flight.item_ids() {
            match self.collection.get(id) {
                Some(local) => {
                    next.replace(local.clone());
                }
                None => {
                    next.take(id);
                }
            }
        }
        tracing::debug!(
            resource = self.gateway.resource(),
            items = next.len(),
            "collection refetched"
        );
        self.collection = next;
        Ok(())
    }

    /// Stops tracking: the collection is cleared and results of calls still in
    /// flight are discarded when they arrive.
    pub fn detach(&mut self) {
        self.epoch += 1;
        self.collection = Collection::new();
        tracing::debug!(
            resource = self.gateway.resource(),
            epoch = self.epoch,
            "collection detached"
        );
    }

    /// Intent that flips a boolean field from its current local value.
    pub fn toggle_intent(
        &self,
        id: ItemId,
        field: &str,
    ) -> Result<Intent<G::Draft>, MutationError> {
        if self.is_pending(id) {
            return Err(MutationError::InFlight(id));
        }
        let item = self
            .collection
            .get(id)
            .ok_or(MutationError::UnknownItem(id))?;
        let current = item
            .field(field)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| MutationError::Field {
                field: field.to_string(),
                reason: "not a boolean field".to_string(),
            })?;
        Ok(Intent::update_field(id, field, !current))
    }

    /// Validates the intent, snapshots, applies it locally and claims its
    /// in-flight keys. Nothing changes when this returns an error.
    pub fn begin(
        &mut self,
        intent: Intent<G::Draft>,
    ) -> Result<Pending<G::Item, G::Draft>, MutationError> {
        let verb = intent.verb();
        let (keys, op) = match intent {
            Intent::Add(draft) => {
                draft.validate()?;
                let keys = match draft.dedup_key() {
                    Some(key) if self.collection.contains_dedup_key(&key) => {
                        return Err(MutationError::Conflict { key });
                    }
                    Some(key) => vec![FlightKey::Draft(key)],
                    None => Vec::new(),
                };
                self.claim(&keys)?;
                (keys, Op::Create { draft })
            }
            Intent::Remove(id) => {
                let keys = vec![FlightKey::Item(id)];
                self.claim(&keys)?;
                let Some((index, item)) = self.collection.take(id) else {
                    self.in_flight.release(&keys);
                    return Err(MutationError::UnknownItem(id));
                };
                (
                    keys,
                    Op::Remove {
                        before: Snapshot { index, item },
                    },
                )
            }
            Intent::Update { id, patch } => {
                if !self.gateway.supports_update() {
                    return Err(MutationError::Unsupported("update"));
                }
                if patch.is_empty() {
                    return Err(MutationError::NoChanges);
                }
                let keys = vec![FlightKey::Item(id)];
                if self.in_flight.contains(&keys[0]) {
                    return Err(MutationError::InFlight(id));
                }
                let index = self
                    .collection
                    .position(id)
                    .ok_or(MutationError::UnknownItem(id))?;
                let before = self.collection.as_slice()[index].clone();
                let mut after = before.clone();
                for (field, value) in patch.iter() {
                    after.set_field(field, value)?;
                }
                self.claim(&keys)?;
                self.collection.replace(after);
                (
                    keys,
                    Op::Update {
                        id,
                        patch,
                        before: Snapshot {
                            index,
                            item: before,
                        },
                    },
                )
            }
            Intent::RemoveAll(ids) => self.begin_remove_all(ids, None)?,
            Intent::RemoveWhere { field } => {
                let mut ids = Vec::new();
                for item in self.collection.iter() {
                    match item.field(&field).and_then(|v| v.as_bool()) {
                        Some(true) => ids.push(item.id()),
                        Some(false) => {}
                        None => {
                            return Err(MutationError::Field {
                                field,
                                reason: "not a boolean field".to_string(),
                            });
                        }
                    }
                }
                self.begin_remove_all(ids, Some(field))?
            }
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        tracing::debug!(
            resource = self.gateway.resource(),
            ticket,
            op = verb,
            "mutation pending"
        );
        Ok(Pending {
            ticket,
            epoch: self.epoch,
            keys,
            op,
        })
    }

    /// Finalizes a pending mutation with the result of its remote call.
    pub fn reconcile(
        &mut self,
        pending: Pending<G::Item, G::Draft>,
        result: SendResult<G::Item>,
    ) -> Reconciliation {
        self.in_flight.release(&pending.keys);
        let resource = self.gateway.resource();
        let what = pending.describe();

        if pending.epoch != self.epoch {
            tracing::debug!(
                resource,
                ticket = pending.ticket,
                "discarding result for a detached collection"
            );
            return Reconciliation::Discarded;
        }

        match result {
            Ok(confirmed) => {
                tracing::info!(resource, ticket = pending.ticket, op = %what, "mutation committed");
                self.commit(pending.op, confirmed);
                Reconciliation::Committed
            }
            Err(error) => {
                tracing::warn!(
                    resource,
                    ticket = pending.ticket,
                    op = %what,
                    error = %error,
                    "mutation rolled back"
                );
                let resync = matches!(error, GatewayError::NotFound { .. })
                    && !matches!(pending.op, Op::Create { .. });
                self.roll_back(pending.op);
                self.notify(
                    NoticeKind::Error,
                    format!("Could not {} in {}: {}", what, resource, error.user_message()),
                );
                if resync && let Err(err) = self.refetch() {
                    tracing::warn!(resource, error = %err, "resync after not-found failed");
                }
                Reconciliation::RolledBack { error }
            }
        }
    }

    /// `begin`, `send` and `reconcile` in sequence.
    pub fn apply(&mut self, intent: Intent<G::Draft>) -> Result<Reconciliation, MutationError> {
        let pending = self.begin(intent)?;
        let result = pending.send(&self.gateway);
        Ok(self.reconcile(pending, result))
    }

    pub fn toggle(&mut self, id: ItemId, field: &str) -> Result<Reconciliation, MutationError> {
        let intent = self.toggle_intent(id, field)?;
        self.apply(intent)
    }

    /// Begins every intent and runs the accepted ones concurrently. Once every
    /// call has returned, the results are reconciled in completion order.
    /// Outcomes are returned in intent order.
    pub fn apply_all(
        &mut self,
        intents: Vec<Intent<G::Draft>>,
    ) -> Vec<Result<Reconciliation, MutationError>>
    where
        G: Sync,
        G::Item: Send,
        G::Draft: Send + Sync,
    {
        let mut out: Vec<Option<Result<Reconciliation, MutationError>>> =
            (0..intents.len()).map(|_| None).collect();
        let mut pending = Vec::new();
        for (i, intent) in intents.into_iter().enumerate() {
            match self.begin(intent) {
                Ok(p) => pending.push((i, p)),
                Err(err) => out[i] = Some(Err(err)),
            }
        }

        let (tx, rx) = mpsc::channel();
        let gateway = &self.gateway;
        std::thread::scope(|s| {
            for (i, p) in pending {
                let tx = tx.clone();
                s.spawn(move || {
                    let result = p.send(gateway);
                    let _ = tx.send((i, p, result));
                });
            }
        });
        drop(tx);

        for (i, p, result) in rx {
            out[i] = Some(Ok(self.reconcile(p, result)));
        }
        out.into_iter().flatten().collect()
    }

    fn begin_remove_all(
        &mut self,
        mut ids: Vec<ItemId>,
        matching: Option<String>,
    ) -> Result<(Vec<FlightKey>, Op<G::Item, G::Draft>), MutationError> {
        ids.sort();
        ids.dedup();
        if ids.is_empty() {
            return Err(MutationError::Empty);
        }
        let keys = ids.iter().map(|id| FlightKey::Item(*id)).collect::<Vec<_>>();
        if let Some(missing) = ids.iter().find(|id| {
            self.collection.get(**id).is_none() && !self.in_flight.contains(&FlightKey::Item(**id))
        }) {
            return Err(MutationError::UnknownItem(*missing));
        }
        self.claim(&keys)?;

        let mut positions = ids
            .iter()
            .filter_map(|id| self.collection.position(*id))
            .collect::<Vec<_>>();
        positions.sort_unstable();
        let mut before = Vec::with_capacity(positions.len());
        for index in positions.iter().rev() {
            let item = self.collection.as_slice()[*index].clone();
            self.collection.take(item.id());
            before.push(Snapshot {
                index: *index,
                item,
            });
        }
        before.reverse();
        Ok((
            keys,
            Op::RemoveAll {
                ids,
                matching,
                before,
            },
        ))
    }

    fn claim(&mut self, keys: &[FlightKey]) -> Result<(), MutationError> {
        self.in_flight.try_claim(keys).map_err(|busy| match busy {
            FlightKey::Item(id) => MutationError::InFlight(id),
            FlightKey::Draft(key) => MutationError::DraftInFlight(key),
        })
    }

    fn commit(&mut self, op: Op<G::Item, G::Draft>, confirmed: Confirmed<G::Item>) {
        let resource = self.gateway.resource();
        match (op, confirmed) {
            (Op::Create { .. }, Confirmed::Created(item)) => match self.refetch() {
                Ok(()) => self.notify(NoticeKind::Success, format!("Added to {}", resource)),
                Err(err) => {
                    tracing::warn!(resource, error = %err, "refetch after add failed");
                    self.collection.push(item);
                    self.notify(
                        NoticeKind::Warning,
                        format!(
                            "Added to {}, but the list could not be refreshed: {}",
                            resource,
                            err.user_message()
                        ),
                    );
                }
            },
            (Op::Update { id, .. }, Confirmed::Updated(authoritative)) => {
                if let Some(item) = authoritative.filter(|i| i.id() == id) {
                    self.collection.replace(item);
                }
                self.notify(NoticeKind::Success, format!("Updated #{} in {}", id, resource));
            }
            (Op::Remove { before }, Confirmed::Removed) => {
                self.notify(
                    NoticeKind::Success,
                    format!("Removed #{} from {}", before.item.id(), resource),
                );
            }
            (Op::RemoveAll { ids, matching, .. }, Confirmed::Removed) => {
                // A bulk endpoint acts on the server's view, which may hold
                // matches this collection never saw.
                if matching.is_some()
                    && let Err(err) = self.refetch()
                {
                    tracing::warn!(resource, error = %err, "refetch after bulk remove failed");
                }
                self.notify(
                    NoticeKind::Success,
                    format!("Removed {} items from {}", ids.len(), resource),
                );
            }
            (op, confirmed) => {
                tracing::warn!(resource, ?op, ?confirmed, "confirmation does not match mutation");
            }
        }
    }

    fn roll_back(&mut self, op: Op<G::Item, G::Draft>) {
        match op {
            Op::Create { .. } => {}
            Op::Update { before, .. } => {
                self.collection.replace(before.item);
            }
            Op::Remove { before } => self.collection.restore(before.index, before.item),
            Op::RemoveAll { before, .. } => {
                for snap in before {
                    self.collection.restore(snap.index, snap.item);
                }
            }
        }
    }

    fn notify(&self, kind: NoticeKind, message: String) {
        self.notifier.notify(Notice::new(kind, message));
    }
}
