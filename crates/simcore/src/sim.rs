//! The host-facing runtime: `Sim` owns one live `World` plus the
//! current frame's metadata and drives it forward one tick at a time.
//!
//! Converted from the teacher's `myq2-sys` bin: a thin top-level owner
//! that is constructed once and handed a run loop, with the renderer,
//! input, and clock kept as named collaborator interfaces rather than
//! concrete dependencies (§6 of the spec this crate implements).

use crate::config::SimConfig;
use crate::diag::{Level, Logger, StdoutLogger};
use simcore_ecs::EcsWorld;
use simcore_fixed::FP;

/// One tick's worth of simulation state: the live `World` plus the
/// bookkeeping spec.md §3 calls out as part of `Frame` (input,
/// timing, frame number).
pub struct Frame<W, I> {
    pub world: W,
    pub input: I,
    pub delta_time: f32,
    pub time: f64,
    pub frame_number: u64,
}

/// Read-only presentation consumer. Takes `&Frame`, never `&mut
/// Frame` — a renderer observes simulation state, it never mutates it.
pub trait Renderer<W, I> {
    fn present(&mut self, frame: &Frame<W, I>);
}

/// Produces one input record per tick. The core never interprets its
/// contents.
pub trait InputSource<I> {
    fn poll(&mut self) -> I;
}

/// Provides `(time, delta_time)` for a tick. The simulation never
/// reads a platform clock directly.
pub trait Clock {
    fn now(&mut self) -> (f64, f32);
}

/// Owns one simulation instance: its current `World`, frame metadata,
/// configuration, and diagnostic logger.
pub struct Sim<W, I> {
    frame: Frame<W, I>,
    config: SimConfig,
    logger: Box<dyn Logger>,
}

impl<W: EcsWorld, I> Sim<W, I> {
    /// One-time init: wraps `world` and the first tick's `input` with
    /// zeroed timing, using the default stdlib-backed logger.
    pub fn new(world: W, input: I, config: SimConfig) -> Self {
        Sim::with_logger(world, input, config, Box::new(StdoutLogger))
    }

    pub fn with_logger(world: W, input: I, config: SimConfig, logger: Box<dyn Logger>) -> Self {
        crate::diag::set_verbosity(config.diag.level);
        Sim {
            frame: Frame { world, input, delta_time: 0.0, time: 0.0, frame_number: 0 },
            config,
            logger,
        }
    }

    pub fn frame(&self) -> &Frame<W, I> {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame<W, I> {
        &mut self.frame
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Advances the simulation by one tick: records the new input and
    /// timing, runs `schedule` once against the live world in
    /// declaration order (§5's ordering guarantee), then increments
    /// `frame_number`.
    ///
    /// `delta_time` crosses from `f32` (the `Clock` collaborator's
    /// unit) into `FP` via the one sanctioned runtime-float
    /// conversion, at this single trust boundary — never inside a
    /// system.
    pub fn update(&mut self, schedule: &mut simcore_ecs::Schedule<W, I>, input: I, delta_time: f32, time: f64) {
        self.frame.input = input;
        self.frame.delta_time = delta_time;
        self.frame.time = time;

        let dt = unsafe { FP::from_f32_runtime(delta_time) };
        schedule.run_all(&mut self.frame.world, &self.frame.input, dt);

        self.frame.frame_number += 1;
        self.logger.log(
            Level::Trace,
            module_path!(),
            format_args!("advanced to frame {}", self.frame.frame_number),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcore_ecs::{add_component, create_entity, get_component};

    #[derive(Clone, Copy, PartialEq, Debug)]
    struct Position {
        x: FP,
        y: FP,
    }

    #[derive(Clone, Copy, PartialEq, Debug)]
    struct Velocity {
        dx: FP,
        dy: FP,
    }

    #[derive(Clone, Copy, PartialEq, Debug, Default)]
    struct ToyInput;

    simcore_ecs::define_world! {
        pub struct SimTestWorld {
            bits: simcore_bitset::BitSet64,
            capacity: 64,
            components: {
                position: Position,
                velocity: Velocity,
            }
        }
    }

    struct MoveSystem;

    impl simcore_ecs::System<SimTestWorld, ToyInput> for MoveSystem {
        fn name(&self) -> &'static str {
            "move"
        }

        fn run(&mut self, world: &mut SimTestWorld, _input: &ToyInput, dt: FP) {
            let moving: Vec<_> =
                simcore_ecs::run_query::<SimTestWorld, (Position, Velocity)>(world).collect();
            for e in moving {
                let v = *get_component::<SimTestWorld, Velocity>(world, e).unwrap();
                let p = simcore_ecs::get_component_mut::<SimTestWorld, Position>(world, e).unwrap();
                p.x = p.x.add(v.dx.mul(dt));
                p.y = p.y.add(v.dy.mul(dt));
            }
        }
    }

    #[test]
    fn update_advances_frame_number_and_runs_schedule() {
        let mut world = SimTestWorld::new();
        let e = create_entity(&mut world).unwrap();
        add_component(&mut world, e, Position { x: FP::ZERO, y: FP::ZERO }).unwrap();
        add_component(&mut world, e, Velocity { dx: FP::ONE, dy: FP::ZERO }).unwrap();

        let mut sim: Sim<SimTestWorld, ToyInput> = Sim::new(world, ToyInput, SimConfig::default());
        let mut schedule: simcore_ecs::Schedule<SimTestWorld, ToyInput> = simcore_ecs::Schedule::new();
        schedule.add(Box::new(MoveSystem));

        assert_eq!(sim.frame().frame_number, 0);
        sim.update(&mut schedule, ToyInput, 1.0, 0.0);
        assert_eq!(sim.frame().frame_number, 1);

        let p = get_component::<SimTestWorld, Position>(&sim.frame().world, e).unwrap();
        assert_eq!(p.x, FP::ONE);
    }

    #[test]
    fn frame_metadata_reflects_latest_update_call() {
        let world = SimTestWorld::new();
        let mut sim: Sim<SimTestWorld, ToyInput> = Sim::new(world, ToyInput, SimConfig::default());
        let mut schedule: simcore_ecs::Schedule<SimTestWorld, ToyInput> = simcore_ecs::Schedule::new();
        sim.update(&mut schedule, ToyInput, 0.5, 12.0);
        assert_eq!(sim.frame().delta_time, 0.5);
        assert_eq!(sim.frame().time, 12.0);
    }
}
