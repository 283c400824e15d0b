//! Generic publish/subscribe hub
//!
//! Replacement for ad hoc string-keyed signal wiring: a hub is declared with
//! a fixed set of event kinds (an enum, not strings) and only those kinds can
//! be subscribed to or fired. Subscribers receive a reference to the emitting
//! object on every firing.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::core::error::NotifyError;

/// Callback registered on a hub channel, invoked with the emitting object
pub type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Publish/subscribe primitive with a declared, closed set of channels
///
/// `E` is the event-kind enum, `T` the payload type handed to subscribers
/// (by convention the object that owns the hub). Registration has set
/// semantics: subscribing the identical callback (`Rc`) twice is a no-op.
pub struct Hub<E, T>
where
    E: Copy + Eq + Hash + fmt::Debug,
{
    channels: HashMap<E, Vec<Subscriber<T>>>,
}

impl<E, T> Hub<E, T>
where
    E: Copy + Eq + Hash + fmt::Debug,
{
    /// Create a hub exposing exactly the given event kinds
    pub fn new(declared: &[E]) -> Self {
        let mut channels = HashMap::with_capacity(declared.len());
        for event in declared {
            channels.entry(*event).or_insert_with(Vec::new);
        }
        Self { channels }
    }

    /// Register a callback on a declared channel
    ///
    /// Fails with [`NotifyError::InvalidChannel`] if the event kind was not
    /// declared at construction time.
    pub fn subscribe(&mut self, event: E, subscriber: Subscriber<T>) -> Result<(), NotifyError> {
        let subscribers = self
            .channels
            .get_mut(&event)
            .ok_or_else(|| NotifyError::InvalidChannel(format!("{event:?}")))?;
        if !subscribers.iter().any(|s| Rc::ptr_eq(s, &subscriber)) {
            subscribers.push(subscriber);
        }
        Ok(())
    }

    /// Invoke every callback registered for each of the given events
    ///
    /// Invocation order within a channel is unspecified. The hub does not
    /// catch panics raised by a subscriber.
    pub fn notify(&self, events: &[E], payload: &T) {
        for event in events {
            debug_assert!(
                self.channels.contains_key(event),
                "fired undeclared channel {event:?}"
            );
            if let Some(subscribers) = self.channels.get(event) {
                for subscriber in subscribers {
                    subscriber(payload);
                }
            }
        }
    }

    /// Number of callbacks registered on a channel (0 for undeclared kinds)
    pub fn subscriber_count(&self, event: E) -> usize {
        self.channels.get(&event).map_or(0, Vec::len)
    }
}

impl<E, T> fmt::Debug for Hub<E, T>
where
    E: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.channels.iter().map(|(event, subs)| (event, subs.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestEvent {
        Ping,
        Pong,
    }

    #[test]
    fn test_subscribe_and_notify() {
        let mut hub: Hub<TestEvent, u32> = Hub::new(&[TestEvent::Ping, TestEvent::Pong]);
        let hits = Rc::new(Cell::new(0u32));

        let hits_clone = Rc::clone(&hits);
        hub.subscribe(
            TestEvent::Ping,
            Rc::new(move |payload: &u32| {
                hits_clone.set(hits_clone.get() + payload);
            }),
        )
        .unwrap();

        hub.notify(&[TestEvent::Ping], &5);
        hub.notify(&[TestEvent::Pong], &100);

        assert_eq!(hits.get(), 5);
    }

    #[test]
    fn test_undeclared_channel_is_rejected() {
        let mut hub: Hub<TestEvent, u32> = Hub::new(&[TestEvent::Ping]);
        let result = hub.subscribe(TestEvent::Pong, Rc::new(|_| {}));

        assert!(matches!(result, Err(NotifyError::InvalidChannel(_))));
    }

    #[test]
    fn test_duplicate_registration_has_no_extra_effect() {
        let mut hub: Hub<TestEvent, u32> = Hub::new(&[TestEvent::Ping]);
        let hits = Rc::new(Cell::new(0u32));

        let hits_clone = Rc::clone(&hits);
        let subscriber: Subscriber<u32> = Rc::new(move |_: &u32| {
            hits_clone.set(hits_clone.get() + 1);
        });

        hub.subscribe(TestEvent::Ping, Rc::clone(&subscriber)).unwrap();
        hub.subscribe(TestEvent::Ping, subscriber).unwrap();
        assert_eq!(hub.subscriber_count(TestEvent::Ping), 1);

        hub.notify(&[TestEvent::Ping], &0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_notify_fires_each_listed_event() {
        let mut hub: Hub<TestEvent, u32> = Hub::new(&[TestEvent::Ping, TestEvent::Pong]);
        let hits = Rc::new(Cell::new(0u32));

        for event in [TestEvent::Ping, TestEvent::Pong] {
            let hits_clone = Rc::clone(&hits);
            hub.subscribe(
                event,
                Rc::new(move |_: &u32| hits_clone.set(hits_clone.get() + 1)),
            )
            .unwrap();
        }

        hub.notify(&[TestEvent::Ping, TestEvent::Pong], &0);
        assert_eq!(hits.get(), 2);
    }
}
