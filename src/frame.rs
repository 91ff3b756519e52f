/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the loop started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Turns clock readings into consecutive [`FrameInfo`]s
#[derive(Debug, Clone, Default)]
pub struct FrameCounter {
    frame_number: u64,
    start_time: Option<f32>,
    last_time: f32,
}

impl FrameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Frame info for a clock reading, the first reading defines time zero
    pub fn next(&mut self, now: f32) -> FrameInfo {
        let start = *self.start_time.get_or_insert(now);
        let time = (now - start).max(0.0);
        let delta = if self.frame_number == 0 { 0.0 } else { (time - self.last_time).max(0.0) };

        let info = FrameInfo::new(self.frame_number, time, delta);
        self.frame_number += 1;
        self.last_time = time;
        info
    }

    /// Forget the start time, the next reading begins a new timeline
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
