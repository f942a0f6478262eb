//! Declaration-order system execution.
//!
//! Converted from the teacher's per-frame think dispatch (`g_local.rs`
//! runs each edict's `think` callback in table order every server
//! frame): here a `Schedule` runs a fixed list of systems against a
//! `World` in the order they were registered, once per simulation step.
//! No dependency graph, no parallelism — determinism requires a single
//! fixed execution order, and `Schedule` is exactly that order made
//! explicit.

use simcore_fixed::FP;

/// One unit of per-step simulation logic over world `W`, given the
/// current tick's user-declared input record `I`.
pub trait System<W, I> {
    /// Used only in diagnostics (§7's "which system" context on a log
    /// line or panic).
    fn name(&self) -> &'static str;
    fn run(&mut self, world: &mut W, input: &I, dt: FP);
}

/// A fixed, ordered list of systems run every step in registration
/// order.
pub struct Schedule<W, I> {
    systems: Vec<Box<dyn System<W, I>>>,
}

impl<W, I> Schedule<W, I> {
    pub fn new() -> Self {
        Schedule { systems: Vec::new() }
    }

    pub fn add(&mut self, system: Box<dyn System<W, I>>) -> &mut Self {
        self.systems.push(system);
        self
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Runs every registered system once, in registration order.
    pub fn run_all(&mut self, world: &mut W, input: &I, dt: FP) {
        for system in self.systems.iter_mut() {
            system.run(world, input, dt);
        }
    }
}

impl<W, I> Default for Schedule<W, I> {
    fn default() -> Self {
        Schedule::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{add_component, create_entity, get_component, get_component_mut};

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
    struct NoInput;

    crate::define_world! {
        pub struct SysWorld {
            bits: simcore_bitset::BitSet64,
            capacity: 64,
            components: {
                position: Position,
                velocity: Velocity,
            }
        }
    }

    struct MoveSystem;

    impl System<SysWorld, NoInput> for MoveSystem {
        fn name(&self) -> &'static str {
            "move"
        }

        fn run(&mut self, world: &mut SysWorld, _input: &NoInput, dt: FP) {
            let moving: Vec<_> = crate::query::query::<SysWorld, (Position, Velocity)>(world).collect();
            for e in moving {
                let v = *get_component::<SysWorld, Velocity>(world, e).unwrap();
                let p = get_component_mut::<SysWorld, Position>(world, e).unwrap();
                p.x = p.x.add(v.dx.mul(dt));
                p.y = p.y.add(v.dy.mul(dt));
            }
        }
    }

    #[test]
    fn schedule_runs_systems_in_registration_order() {
        let mut w = SysWorld::new();
        let e = create_entity(&mut w).unwrap();
        add_component(&mut w, e, Position { x: FP::ZERO, y: FP::ZERO }).unwrap();
        add_component(&mut w, e, Velocity { dx: FP::from_int(1), dy: FP::from_int(2) }).unwrap();

        let mut schedule: Schedule<SysWorld, NoInput> = Schedule::new();
        schedule.add(Box::new(MoveSystem));
        schedule.run_all(&mut w, &NoInput, FP::from_int(1));

        let p = get_component::<SysWorld, Position>(&w, e).unwrap();
        assert_eq!(p.x, FP::from_int(1));
        assert_eq!(p.y, FP::from_int(2));
    }

    #[test]
    fn empty_schedule_leaves_world_unchanged() {
        let mut w = SysWorld::new();
        let e = create_entity(&mut w).unwrap();
        add_component(&mut w, e, Position { x: FP::from_int(5), y: FP::from_int(5) }).unwrap();

        let mut schedule: Schedule<SysWorld, NoInput> = Schedule::new();
        assert!(schedule.is_empty());
        schedule.run_all(&mut w, &NoInput, FP::from_int(1));

        let p = get_component::<SysWorld, Position>(&w, e).unwrap();
        assert_eq!(*p, Position { x: FP::from_int(5), y: FP::from_int(5) });
    }
}
