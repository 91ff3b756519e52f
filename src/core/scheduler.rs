use std::cell::Cell;
use std::rc::Rc;

use super::clock::FrameClock;
use crate::frame::{FrameCounter, FrameInfo};

type TickFn = Box<dyn FnMut(&FrameInfo)>;

/// Running-loop token returned by [`FrameScheduler::start`]
///
/// Clones share the same flag, so a clone moved into the tick callback can
/// stop the loop from inside a tick.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    id: u64,
    running: Rc<Cell<bool>>,
}

impl SchedulerHandle {
    /// Prevent any further tick, the current one (if any) runs to completion
    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Drives one continuous update loop, one tick per display refresh
///
/// The host calls [`pump`](Self::pump) from its redraw hook. Ticks never
/// overlap: `pump` takes `&mut self` and runs the callback to completion.
pub struct FrameScheduler<C: FrameClock> {
    clock: C,
    counter: FrameCounter,
    on_tick: Option<TickFn>,
    handle: Option<SchedulerHandle>,
    next_id: u64,
}

impl<C: FrameClock> FrameScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            counter: FrameCounter::new(),
            on_tick: None,
            handle: None,
            next_id: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Begin ticking `on_tick`, replacing any loop already running
    pub fn start<F>(&mut self, on_tick: F) -> SchedulerHandle
    where
        F: FnMut(&FrameInfo) + 'static,
    {
        if let Some(previous) = self.handle.take() {
            log::debug!("Replacing running loop {}", previous.id);
            previous.stop();
        }

        let handle = SchedulerHandle {
            id: self.next_id,
            running: Rc::new(Cell::new(true)),
        };
        self.next_id += 1;
        self.counter.reset();
        self.on_tick = Some(Box::new(on_tick));
        self.handle = Some(handle.clone());

        log::info!("Frame loop {} started", handle.id);
        handle
    }

    /// Stop the loop `handle` refers to, stale handles are ignored
    pub fn stop(&mut self, handle: &SchedulerHandle) {
        handle.stop();
        if self.handle.as_ref().is_some_and(|current| current.id == handle.id) {
            self.release();
        }
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::info!("Frame loop {} stopped after {} frames", handle.id, self.counter.frame_number());
        }
        self.on_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(SchedulerHandle::is_running)
    }

    pub fn frame_count(&self) -> u64 {
        self.counter.frame_number()
    }

    /// Run one tick if the loop is live, returns whether a tick ran
    pub fn pump(&mut self) -> bool {
        if !self.is_running() {
            if self.handle.is_some() {
                self.release();
            }
            return false;
        }

        let frame = self.counter.next(self.clock.now());
        if let Some(on_tick) = self.on_tick.as_mut() {
            on_tick(&frame);
        }
        true
    }

    /// Pump up to `frames` times, stops early once the loop ends
    pub fn run_frames(&mut self, frames: usize) -> usize {
        (0..frames).take_while(|_| self.pump()).count()
    }
}
