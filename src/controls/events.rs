//! Control lifecycle notifications

use glam::Vec2;

/// Notification emitted by a control as its state changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// A touch was captured and the control became active
    FingerTouched,
    /// The captured touch ended or disappeared
    FingerLifted,
    /// The control produced a new axis value
    Moved(Vec2),
}

/// Observer for control notifications
///
/// All methods default to no-ops so observers implement only what they need.
pub trait ControlObserver {
    fn on_finger_touched(&mut self) {}

    fn on_finger_lifted(&mut self) {}

    fn on_moved(&mut self, _value: Vec2) {}
}

/// Registered observers of one control
///
/// Zero subscribers is the normal idle case; emitting to an empty list is
/// free.
#[derive(Default)]
pub struct Observers {
    list: Vec<Box<dyn ControlObserver>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer
    pub fn add(&mut self, observer: Box<dyn ControlObserver>) {
        self.list.push(observer);
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Deliver an event to every registered observer
    pub(crate) fn emit(&mut self, event: ControlEvent) {
        for observer in &mut self.list {
            match event {
                ControlEvent::FingerTouched => observer.on_finger_touched(),
                ControlEvent::FingerLifted => observer.on_finger_lifted(),
                ControlEvent::Moved(value) => observer.on_moved(value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        events: Rc<RefCell<Vec<ControlEvent>>>,
    }

    impl ControlObserver for Recorder {
        fn on_finger_touched(&mut self) {
            self.events.borrow_mut().push(ControlEvent::FingerTouched);
        }

        fn on_finger_lifted(&mut self) {
            self.events.borrow_mut().push(ControlEvent::FingerLifted);
        }

        fn on_moved(&mut self, value: Vec2) {
            self.events.borrow_mut().push(ControlEvent::Moved(value));
        }
    }

    #[test]
    fn test_emit_reaches_all_observers() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        observers.add(Box::new(Recorder {
            events: events.clone(),
        }));
        observers.add(Box::new(Recorder {
            events: events.clone(),
        }));

        observers.emit(ControlEvent::FingerTouched);
        observers.emit(ControlEvent::Moved(Vec2::new(1.0, 0.0)));

        let recorded = events.borrow();
        assert_eq!(recorded.len(), 4);
        assert_eq!(recorded[0], ControlEvent::FingerTouched);
        assert_eq!(recorded[2], ControlEvent::Moved(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_emit_with_no_observers_is_fine() {
        let mut observers = Observers::new();
        observers.emit(ControlEvent::FingerLifted);
        assert!(observers.is_empty());
    }
}
