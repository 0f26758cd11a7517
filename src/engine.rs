//! Slotted contention loop for a single station.
//!
//! Each tick draws a frame arrival. An arrival draws a backoff from
//! `[0, CW]` and counts it down slot by slot; every counted slot may collide
//! with the topology's per-slot probability. A collision doubles the window
//! and drops the frame's remaining backoff, a clean countdown delivers the
//! frame and resets the window.

use tracing::{debug, trace};

use crate::config::{SimulationParameters, TimeAdvance, ARRIVAL_DRAW_SPACE};
use crate::random::RandomSource;
use crate::station::Station;

/// Result of one arrival-check tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    NoArrival,
    Transmitted,
    Collided,
}

pub struct ContentionEngine<'p, R> {
    params: &'p SimulationParameters,
    rng: R,
    station: Station,
    arrival_rate: u32,
    collision_percent: u32,
    total_duration_us: u64,
    elapsed_us: u64,
}

impl<'p, R: RandomSource> ContentionEngine<'p, R> {
    pub fn new(
        params: &'p SimulationParameters,
        station: Station,
        arrival_rate: u32,
        rng: R,
    ) -> ContentionEngine<'p, R> {
        ContentionEngine {
            params,
            rng,
            station,
            arrival_rate,
            collision_percent: params.collision_percent(),
            total_duration_us: params.total_duration_us(),
            elapsed_us: 0,
        }
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_us >= self.total_duration_us
    }

    /// Runs one tick. Returns `false` once the simulated duration is used up.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.tick();
        !self.is_finished()
    }

    /// Runs ticks until the simulated duration is used up and hands the
    /// station back.
    pub fn run(mut self) -> Station {
        let mut more_ticks = true;
        while more_ticks {
            more_ticks = self.step();
        }
        debug!(
            station = self.station.id(),
            rate = self.arrival_rate,
            frames = self.station.frames_transmitted(),
            collisions = self.station.collisions(),
            "station run complete"
        );
        self.station
    }

    #[cfg(test)]
    fn into_station(self) -> Station {
        self.station
    }

    fn tick(&mut self) -> TickOutcome {
        let slot = self.params.slot_duration_us;
        let mut slots_spent = 0u64;

        let outcome = if self.frame_arrived() {
            let draw = self.rng.uniform_int(0, self.station.contention_window());
            self.station.start_backoff(draw);

            let mut collided = false;
            while self.station.is_backing_off() {
                self.elapsed_us += slot;
                slots_spent += 1;
                let counted = self.station.count_down();
                debug_assert!(counted);

                if self.rng.bernoulli_percent(self.collision_percent) {
                    self.station.record_collision();
                    trace!(
                        station = self.station.id(),
                        cw = self.station.contention_window(),
                        elapsed_us = self.elapsed_us,
                        "collision"
                    );
                    collided = true;
                    break;
                }
            }

            if collided {
                TickOutcome::Collided
            } else {
                self.station.record_success(self.params.frame_size_bytes);
                TickOutcome::Transmitted
            }
        } else {
            TickOutcome::NoArrival
        };

        // Legacy adds this slot even when the countdown above already moved
        // the clock, so a tick with k backoff slots costs k + 1 slots. Whether
        // that double advance is intended is an open question. SingleSlot drops it.
        match self.params.time_advance {
            TimeAdvance::Legacy => self.elapsed_us += slot,
            TimeAdvance::SingleSlot => {
                if slots_spent == 0 {
                    self.elapsed_us += slot;
                }
            }
        }

        outcome
    }

    fn frame_arrived(&mut self) -> bool {
        self.rng.uniform_int(0, ARRIVAL_DRAW_SPACE - 1) < self.arrival_rate
    }
}

/// Runs `station` for the full simulated duration at `arrival_rate`.
pub fn simulate_station<R: RandomSource>(
    params: &SimulationParameters,
    station: Station,
    arrival_rate: u32,
    rng: R,
) -> Station {
    ContentionEngine::new(params, station, arrival_rate, rng).run()
}
