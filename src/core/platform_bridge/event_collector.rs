//=========================================================================
// Event Collector
//=========================================================================
//
// Frame-loop side of the platform channel, exposed as an `InputSource`.
//
// Architecture:
//   Receiver<PlatformEvent> → collect() ─┬─ PointerMoved → pointer
//                                        └─ everything else → pending
//
// Draining is bounded and never blocks. A disconnected channel is turned
// into a single `Quit` so the loop can still tear down cleanly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::{InputEvent, InputSource};

//=== EventCollector ======================================================

/// Collects platform events and serves them to the frame loop.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    pointer: (f32, f32),
    pending: VecDeque<InputEvent>,
    disconnected: bool,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            pointer: (0.0, 0.0),
            pending: VecDeque::with_capacity(8),
            disconnected: false,
        }
    }

    /// Drains pending platform events (bounded to prevent starvation).
    fn collect(&mut self) {
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    drained += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        warn!(target: "platform::input", "Platform channel disconnected, requesting quit");
                        self.disconnected = true;
                        self.pending.push_back(InputEvent::Quit);
                    }
                    break;
                }
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "platform::input", "Event queue backlog: drained {} events this frame", drained);
        }
    }

    fn handle_event(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                self.pending.extend(discrete);
                for event in continuous {
                    match event {
                        InputEvent::PointerMoved { x, y } => self.pointer = (x, y),
                        other => self.pending.push_back(other),
                    }
                }
            }
            PlatformEvent::WindowClosed => self.pending.push_back(InputEvent::Quit),
        }
    }
}

//=== InputSource =========================================================

impl InputSource for EventCollector {
    fn pointer_position(&mut self) -> (i32, i32) {
        self.collect();
        (self.pointer.0 as i32, self.pointer.1 as i32)
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.collect();
        self.pending.pop_front()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn inputs(discrete: Vec<InputEvent>, continuous: Vec<InputEvent>) -> PlatformEvent {
        PlatformEvent::Inputs { discrete, continuous }
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.pointer_position(), (0, 0));
        assert!(collector.poll_event().is_none());
    }

    #[test]
    fn pointer_moves_update_position_without_queueing() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(inputs(vec![], vec![InputEvent::PointerMoved { x: 10.7, y: 20.2 }])).unwrap();

        assert_eq!(collector.pointer_position(), (10, 20), "Truncated to whole pixels");
        assert!(collector.poll_event().is_none(), "Pointer motion is not a queued event");
    }

    #[test]
    fn latest_pointer_batch_wins() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(inputs(vec![], vec![InputEvent::PointerMoved { x: 1.0, y: 1.0 }])).unwrap();
        tx.send(inputs(vec![], vec![InputEvent::PointerMoved { x: 5.0, y: 6.0 }])).unwrap();

        assert_eq!(collector.pointer_position(), (5, 6));
    }

    #[test]
    fn pointer_is_kept_between_frames() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(inputs(vec![], vec![InputEvent::PointerMoved { x: 3.0, y: 4.0 }])).unwrap();
        collector.pointer_position();

        assert_eq!(collector.pointer_position(), (3, 4));
    }

    #[test]
    fn window_closed_becomes_quit() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.poll_event(), Some(InputEvent::Quit));
        assert!(collector.poll_event().is_none());
    }

    #[test]
    fn events_keep_arrival_order() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(inputs(vec![], vec![InputEvent::Resized { width: 10, height: 20 }])).unwrap();
        tx.send(inputs(vec![InputEvent::Quit], vec![])).unwrap();

        match collector.poll_event() {
            Some(InputEvent::Resized { width, height }) => assert_eq!((width, height), (10, 20)),
            other => panic!("Expected Resized, got {:?}", other),
        }
        assert_eq!(collector.poll_event(), Some(InputEvent::Quit));
    }

    #[test]
    fn disconnect_requests_quit_once() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.poll_event(), Some(InputEvent::Quit));
        assert!(collector.poll_event().is_none(), "Disconnect reported only once");
    }
}
