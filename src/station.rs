/// Accumulated state of one contending station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    id: usize,
    backoff: u32,
    cw: u32,
    cw_min: u32,
    cw_max: u32,
    collisions: u64,
    frames_transmitted: u64,
    throughput_bytes: u64,
}

impl Station {
    pub fn new(id: usize, cw_min: u32, cw_max: u32) -> Station {
        Station {
            id,
            backoff: 0,
            cw: cw_min,
            cw_min,
            cw_max,
            collisions: 0,
            frames_transmitted: 0,
            throughput_bytes: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn backoff(&self) -> u32 {
        self.backoff
    }

    pub fn contention_window(&self) -> u32 {
        self.cw
    }

    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    pub fn frames_transmitted(&self) -> u64 {
        self.frames_transmitted
    }

    pub fn throughput_bytes(&self) -> u64 {
        self.throughput_bytes
    }

    pub fn is_backing_off(&self) -> bool {
        self.backoff > 0
    }

    pub fn start_backoff(&mut self, slots: u32) {
        self.backoff = slots;
    }

    /// Counts one backoff slot down. Returns `false` if the counter was already 0.
    pub fn count_down(&mut self) -> bool {
        if self.backoff == 0 {
            return false;
        }
        self.backoff -= 1;
        true
    }

    /// Doubles the contention window up to `cw_max`. The pending backoff is
    /// abandoned rather than resumed.
    pub fn record_collision(&mut self) {
        self.collisions += 1;
        self.cw = self.cw.saturating_mul(2).min(self.cw_max);
        self.backoff = 0;
    }

    pub fn record_success(&mut self, frame_size_bytes: u64) {
        self.frames_transmitted += 1;
        self.throughput_bytes += frame_size_bytes;
        self.cw = self.cw_min;
    }
}
