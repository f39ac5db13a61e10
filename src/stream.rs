//! A synchronous, single-threaded publish/subscribe channel.
//!
//! [`Stream`] is a cheap cloneable handle; every clone shares the same
//! subscriber list. Pushing an update calls each subscriber in registration
//! order before `next` returns. An update pushed from inside a subscriber is
//! queued and delivered once the current one has reached every subscriber,
//! so all subscribers observe the same order.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::update::UpdateSink;

/// Identifies a subscription for [`Stream::unsubscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<U> = Box<dyn FnMut(&U)>;

struct Inner<U> {
    subscribers: Vec<(SubscriptionId, Callback<U>)>,
    pending: VecDeque<U>,
    delivering: bool,
    next_id: u64,
    /// Ids whose callbacks are taken out of `subscribers` for delivery
    checked_out: Vec<SubscriptionId>,
    /// Checked-out ids unsubscribed during the current delivery
    removed: Vec<SubscriptionId>,
}

impl<U> Inner<U> {
    fn live_count(&self) -> usize {
        self.subscribers.len() + self.checked_out.len() - self.removed.len()
    }
}

pub struct Stream<U> {
    inner: Rc<RefCell<Inner<U>>>,
}

impl<U> Clone for Stream<U> {
    fn clone(&self) -> Self {
        Stream {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<U> Default for Stream<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for Stream<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Stream")
            .field("subscribers", &inner.live_count())
            .field("pending", &inner.pending.len())
            .finish()
    }
}

impl<U> Stream<U> {
    pub fn new() -> Self {
        Stream {
            inner: Rc::new(RefCell::new(Inner {
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                delivering: false,
                next_id: 0,
                checked_out: Vec::new(),
                removed: Vec::new(),
            })),
        }
    }

    /// Register a callback for every future update
    pub fn subscribe(&self, callback: impl FnMut(&U) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if let Some(pos) = inner.subscribers.iter().position(|(sid, _)| *sid == id) {
            inner.subscribers.remove(pos);
            return true;
        }
        // The callback may be checked out mid-delivery.
        if inner.checked_out.contains(&id) && !inner.removed.contains(&id) {
            inner.removed.push(id);
            return true;
        }
        false
    }

    /// Number of live subscriptions, including any being delivered to
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().live_count()
    }

    /// Deliver an update to every subscriber.
    pub fn next(&self, update: U) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.pending.push_back(update);
            if inner.delivering {
                return;
            }
            inner.delivering = true;
        }

        loop {
            let (update, mut subscribers) = {
                let mut inner = self.inner.borrow_mut();
                let Some(update) = inner.pending.pop_front() else {
                    inner.delivering = false;
                    break;
                };
                let subscribers = std::mem::take(&mut inner.subscribers);
                inner.checked_out = subscribers.iter().map(|(id, _)| *id).collect();
                (update, subscribers)
            };

            // Callbacks run without the borrow held so they may subscribe,
            // unsubscribe or push. One removed mid-delivery is skipped.
            for (id, callback) in subscribers.iter_mut() {
                if self.inner.borrow().removed.contains(id) {
                    continue;
                }
                callback(&update);
            }

            let mut inner = self.inner.borrow_mut();
            let removed = std::mem::take(&mut inner.removed);
            inner.checked_out.clear();
            subscribers.retain(|(id, _)| !removed.contains(id));
            // Subscribers added during delivery go after the existing ones.
            subscribers.append(&mut inner.subscribers);
            inner.subscribers = subscribers;
        }
    }
}

impl<U, T: Into<U>> UpdateSink<T> for Stream<U> {
    fn push(&mut self, update: T) {
        self.next(update.into());
    }
}
