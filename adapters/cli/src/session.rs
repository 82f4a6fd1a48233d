//! Per-frame glue between the rendering backend and the simulation.

use std::time::Duration;

use katorga_core::Event;
use katorga_rendering::{FrameInput, Scene};
use katorga_simulation::{Simulation, TickClock};
use rand::Rng;

use crate::scene;

/// Owns the simulation for the lifetime of the window.
#[derive(Debug)]
pub(crate) struct Session<R> {
    simulation: Simulation<R>,
    clock: TickClock,
    events: Vec<Event>,
}

impl<R: Rng> Session<R> {
    pub(crate) fn new(simulation: Simulation<R>, clock: TickClock) -> Self {
        Self {
            simulation,
            clock,
            events: Vec::new(),
        }
    }

    /// Applies the frame's input, runs the ticks that are due and redraws the scene.
    pub(crate) fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        self.events.clear();

        for change in input.key_changes {
            self.simulation
                .key_changed(change.direction, change.pressed, &mut self.events);
        }
        if input.start_requested {
            self.simulation.start(&mut self.events);
        }

        let due = self.clock.advance(dt);
        for _ in 0..due {
            if !self.simulation.tick(&mut self.events) {
                break;
            }
        }

        scene::populate(scene, self.simulation.world());
    }

    #[cfg(test)]
    pub(crate) fn simulation(&self) -> &Simulation<R> {
        &self.simulation
    }
}
