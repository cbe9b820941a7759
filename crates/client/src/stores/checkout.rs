//! Checkout store: the draft carried across the multi-step checkout flow.

use std::sync::Arc;

use boxoffice_core::{CheckoutDraft, CheckoutUpdate};
use tokio::sync::watch;

use super::{CHECKOUT_KEY, persist, rehydrate};
use crate::storage::Storage;

/// Persisted checkout draft. Holds at most one draft.
pub struct CheckoutStore {
    storage: Arc<dyn Storage>,
    draft: watch::Sender<Option<CheckoutDraft>>,
}

impl CheckoutStore {
    /// Rehydrate the draft from `storage`.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let draft: Option<CheckoutDraft> = rehydrate(storage.as_ref(), CHECKOUT_KEY);
        Self {
            storage,
            draft: watch::Sender::new(draft),
        }
    }

    /// Current draft, if a checkout is in progress.
    #[must_use]
    pub fn checkout(&self) -> Option<CheckoutDraft> {
        self.draft.borrow().clone()
    }

    /// Merge `update` onto the draft, starting one if none exists.
    ///
    /// Fields the update leaves as `Patch::Keep` keep their previous value.
    pub fn set_checkout(&self, update: CheckoutUpdate) {
        self.draft.send_modify(|draft| {
            draft.get_or_insert_with(CheckoutDraft::default).merge(update);
        });
        let draft = self.draft.borrow();
        tracing::debug!(step = ?Option::as_ref(&*draft).and_then(|d| d.step), "Checkout draft updated");
        persist(self.storage.as_ref(), CHECKOUT_KEY, Option::as_ref(&*draft));
    }

    /// Abandon or complete the checkout.
    pub fn empty_checkout(&self) {
        self.draft.send_replace(None);
        tracing::debug!("Checkout draft cleared");
        persist::<CheckoutDraft>(self.storage.as_ref(), CHECKOUT_KEY, None);
    }

    /// Receive every future draft change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<CheckoutDraft>> {
        self.draft.subscribe()
    }
}

impl std::fmt::Debug for CheckoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutStore")
            .field("draft", &*self.draft.borrow())
            .finish_non_exhaustive()
    }
}
