//! Option-list models for discrete device settings
//!
//! An [`OptionListModel`] is a cursor over the ordered, finite set of legal
//! values for one camera setting (shutter speed, aperture, ISO, …). The
//! cursor can only be moved one step at a time, so it can never point at a
//! value outside the enumerated legal range. Every step fires change
//! notifications through the [`Hub`], whether or not the cursor moved —
//! boundary hits still notify, so UI widgets can redraw unconditionally.

use std::fmt;

use crate::core::error::{NotifyError, OptionModelError};
use crate::core::notify::{Hub, Subscriber};

/// Event kinds fired by an [`OptionListModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionEvent {
    /// `previous()` was called
    Previous,
    /// `next()` was called
    Next,
    /// The model was stepped in either direction
    Changed,
}

/// All event kinds an option-list model declares
const OPTION_EVENTS: [OptionEvent; 3] = [
    OptionEvent::Previous,
    OptionEvent::Next,
    OptionEvent::Changed,
];

/// A list model accessible through indexes or values
///
/// Invariant: `current` always satisfies `0 <= current < count()`. The list
/// is never empty and the cursor is only mutated by [`next`](Self::next) and
/// [`previous`](Self::previous), both bounded with no wraparound.
#[derive(Debug)]
pub struct OptionListModel<T> {
    values: Vec<T>,
    current: usize,
    hub: Hub<OptionEvent, OptionListModel<T>>,
}

impl<T> OptionListModel<T> {
    /// Create a model with the cursor at the first value
    pub fn new(values: Vec<T>) -> Result<Self, OptionModelError> {
        Self::with_index(values, 0)
    }

    /// Create a model with the cursor at an explicit index
    pub fn with_index(values: Vec<T>, index: usize) -> Result<Self, OptionModelError> {
        if values.is_empty() {
            return Err(OptionModelError::EmptyModel);
        }
        if index >= values.len() {
            return Err(OptionModelError::InvalidIndex {
                index,
                count: values.len(),
            });
        }
        Ok(Self {
            values,
            current: index,
            hub: Hub::new(&OPTION_EVENTS),
        })
    }

    /// Number of legal values in the model
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// The legal values, in order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Current cursor position
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The value the cursor points at
    pub fn value(&self) -> &T {
        &self.values[self.current]
    }

    /// Advance the cursor to the next value, stopping at the end
    ///
    /// Always fires `Next` and `Changed`, even when the cursor was already
    /// at the last value.
    pub fn next(&mut self) {
        if self.current < self.values.len() - 1 {
            self.current += 1;
        }
        self.notify(&[OptionEvent::Next, OptionEvent::Changed]);
    }

    /// Move the cursor to the previous value, stopping at the start
    ///
    /// Always fires `Previous` and `Changed`, even when the cursor was
    /// already at the first value.
    pub fn previous(&mut self) {
        if self.current > 0 {
            self.current -= 1;
        }
        self.notify(&[OptionEvent::Previous, OptionEvent::Changed]);
    }

    /// Register a callback for one of the model's event kinds
    pub fn subscribe(
        &mut self,
        event: OptionEvent,
        subscriber: Subscriber<Self>,
    ) -> Result<(), NotifyError> {
        self.hub.subscribe(event, subscriber)
    }

    fn notify(&self, events: &[OptionEvent]) {
        self.hub.notify(events, self);
    }
}

impl<T> OptionListModel<T>
where
    T: PartialEq + fmt::Display,
{
    /// Create a model with the cursor at the given starting value
    ///
    /// The value must be one of the legal values; anything else fails with
    /// [`OptionModelError::ValueNotInRange`] rather than silently picking an
    /// index.
    pub fn with_value(values: Vec<T>, value: &T) -> Result<Self, OptionModelError> {
        let index = values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| OptionModelError::ValueNotInRange(value.to_string()))?;
        Self::with_index(values, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn shutter_speeds() -> Vec<String> {
        ["1/500", "1/250", "1/125", "1/60", "1/30"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn test_new_starts_at_first_value() {
        let model = OptionListModel::new(shutter_speeds()).unwrap();
        assert_eq!(model.current_index(), 0);
        assert_eq!(model.value(), "1/500");
        assert_eq!(model.count(), 5);
    }

    #[test]
    fn test_with_index_reads_exact_value() {
        let model = OptionListModel::with_index(shutter_speeds(), 2).unwrap();
        assert_eq!(model.value(), "1/125");
    }

    #[test]
    fn test_with_index_out_of_range() {
        let result = OptionListModel::with_index(shutter_speeds(), 5);
        assert_eq!(
            result.err(),
            Some(OptionModelError::InvalidIndex { index: 5, count: 5 })
        );
    }

    #[test]
    fn test_with_value_resolves_index() {
        let model = OptionListModel::with_value(shutter_speeds(), &"1/60".to_string()).unwrap();
        assert_eq!(model.current_index(), 3);
    }

    #[test]
    fn test_with_value_not_in_list_fails() {
        let result = OptionListModel::with_value(shutter_speeds(), &"1/8000".to_string());
        assert_eq!(
            result.err(),
            Some(OptionModelError::ValueNotInRange("1/8000".to_string()))
        );
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let result = OptionListModel::<String>::new(Vec::new());
        assert_eq!(result.err(), Some(OptionModelError::EmptyModel));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut model = OptionListModel::new(shutter_speeds()).unwrap();
        for _ in 0..10 {
            model.next();
        }
        assert_eq!(model.current_index(), 4);

        for _ in 0..10 {
            model.previous();
        }
        assert_eq!(model.current_index(), 0);

        model.next();
        model.next();
        model.previous();
        assert_eq!(model.current_index(), 1);
        assert!(model.current_index() < model.count());
    }

    #[test]
    fn test_boundary_step_still_fires_changed() {
        let mut model = OptionListModel::with_index(shutter_speeds(), 4).unwrap();
        let changed = Rc::new(Cell::new(0u32));

        let changed_clone = Rc::clone(&changed);
        model
            .subscribe(
                OptionEvent::Changed,
                Rc::new(move |_: &OptionListModel<String>| {
                    changed_clone.set(changed_clone.get() + 1);
                }),
            )
            .unwrap();

        // Already at the last index: cursor must not move, event must fire.
        model.next();
        assert_eq!(model.current_index(), 4);
        assert_eq!(changed.get(), 1);

        let mut model = OptionListModel::new(shutter_speeds()).unwrap();
        let changed_clone = Rc::clone(&changed);
        model
            .subscribe(
                OptionEvent::Changed,
                Rc::new(move |_: &OptionListModel<String>| {
                    changed_clone.set(changed_clone.get() + 1);
                }),
            )
            .unwrap();
        model.previous();
        assert_eq!(model.current_index(), 0);
        assert_eq!(changed.get(), 2);
    }

    #[test]
    fn test_subscriber_sees_new_cursor_position() {
        let mut model = OptionListModel::new(shutter_speeds()).unwrap();
        let seen = Rc::new(Cell::new(usize::MAX));

        let seen_clone = Rc::clone(&seen);
        model
            .subscribe(
                OptionEvent::Next,
                Rc::new(move |m: &OptionListModel<String>| {
                    seen_clone.set(m.current_index());
                }),
            )
            .unwrap();

        model.next();
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_directional_events() {
        let mut model = OptionListModel::new(shutter_speeds()).unwrap();
        let nexts = Rc::new(Cell::new(0u32));
        let prevs = Rc::new(Cell::new(0u32));

        let nexts_clone = Rc::clone(&nexts);
        model
            .subscribe(
                OptionEvent::Next,
                Rc::new(move |_: &OptionListModel<String>| {
                    nexts_clone.set(nexts_clone.get() + 1);
                }),
            )
            .unwrap();
        let prevs_clone = Rc::clone(&prevs);
        model
            .subscribe(
                OptionEvent::Previous,
                Rc::new(move |_: &OptionListModel<String>| {
                    prevs_clone.set(prevs_clone.get() + 1);
                }),
            )
            .unwrap();

        model.next();
        model.next();
        model.previous();

        assert_eq!(nexts.get(), 2);
        assert_eq!(prevs.get(), 1);
    }
}
