//! Frame playback state for the time-lapse viewer. The view drives `tick`
//! from a timer loop; everything else is user input.

pub const DEFAULT_FPS: u32 = 10;

/// Selectable playback rates as `(frames per second, label)`.
pub const PLAYBACK_SPEEDS: [(u32, &str); 4] = [(5, "0.5x"), (10, "1x"), (20, "2x"), (40, "4x")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub frame_count: usize,
    pub playing: bool,
    pub frames_per_second: u32,
}

impl PlaybackState {
    pub fn new(frame_count: usize, frames_per_second: u32) -> Self {
        Self {
            current_index: 0,
            frame_count,
            playing: false,
            frames_per_second: frames_per_second.max(1),
        }
    }

    fn last_index(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    pub fn at_end(&self) -> bool {
        self.current_index >= self.last_index()
    }

    /// Advance one frame while playing. Reaching the last frame stops playback.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        if self.at_end() {
            self.playing = false;
            return;
        }
        self.current_index += 1;
        if self.at_end() {
            self.playing = false;
        }
    }

    /// Play from the start again if toggled while parked on the last frame.
    pub fn toggle(&mut self) {
        if self.playing {
            self.playing = false;
        } else if self.frame_count > 1 {
            if self.at_end() {
                self.current_index = 0;
            }
            self.playing = true;
        }
    }

    pub fn step_back(&mut self) {
        self.playing = false;
        self.current_index = self.current_index.saturating_sub(1);
    }

    pub fn step_forward(&mut self) {
        self.playing = false;
        self.current_index = (self.current_index + 1).min(self.last_index());
    }

    pub fn seek(&mut self, index: usize) {
        self.current_index = index.min(self.last_index());
    }

    pub fn set_speed(&mut self, frames_per_second: u32) {
        self.frames_per_second = frames_per_second.max(1);
    }

    pub fn tick_interval_ms(&self) -> u32 {
        1000 / self.frames_per_second.max(1)
    }

    pub fn speed_label(&self) -> &'static str {
        PLAYBACK_SPEEDS
            .iter()
            .find(|(fps, _)| *fps == self.frames_per_second)
            .map(|(_, label)| *label)
            .unwrap_or("custom")
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(0, DEFAULT_FPS)
    }
}
