//! Minimal host: wires a toy schema, a scripted input source, a fixed-
//! step clock, and a stdout renderer through `Sim`, then runs the
//! rollback round trip (snapshot, advance, restore, re-advance,
//! compare) and prints whether it reproduced bit-identical state.
//!
//! Converted from the teacher's `myq2-sys::main.rs` top-level wiring
//! shape; the real client/server/renderer/audio subsystems it
//! constructs there are replaced here by the toy stand-ins below, since
//! those subsystems are out of scope for this crate.

use simcore::ecs::{add_component, create_entity, get_component, run_query, EntityId, Schedule, System};
use simcore::fixed::FP;
use simcore::rollback::RollbackRing;
use simcore::{Clock, Frame, InputSource, Renderer, Sim, SimConfig};

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

simcore::ecs::define_world! {
    pub struct DemoWorld {
        bits: simcore_bitset::BitSet64,
        capacity: 64,
        components: {
            position: Position,
            velocity: Velocity,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
struct DemoInput;

struct ScriptedInputSource;

impl InputSource<DemoInput> for ScriptedInputSource {
    fn poll(&mut self) -> DemoInput {
        DemoInput
    }
}

struct FixedStepClock {
    time: f64,
    step: f32,
}

impl Clock for FixedStepClock {
    fn now(&mut self) -> (f64, f32) {
        self.time += self.step as f64;
        (self.time, self.step)
    }
}

struct StdoutRenderer {
    every_n: u64,
}

impl Renderer<DemoWorld, DemoInput> for StdoutRenderer {
    fn present(&mut self, frame: &Frame<DemoWorld, DemoInput>) {
        if frame.frame_number % self.every_n != 0 {
            return;
        }
        let live = run_query::<DemoWorld, (Position,)>(&frame.world).count();
        println!("frame {}: {} entities with position", frame.frame_number, live);
    }
}

struct MoveSystem;

impl System<DemoWorld, DemoInput> for MoveSystem {
    fn name(&self) -> &'static str {
        "move"
    }

    fn run(&mut self, world: &mut DemoWorld, _input: &DemoInput, dt: FP) {
        let moving: Vec<EntityId> = run_query::<DemoWorld, (Position, Velocity)>(world).collect();
        for e in moving {
            let v = *get_component::<DemoWorld, Velocity>(world, e).unwrap();
            let p = simcore::ecs::get_component_mut::<DemoWorld, Position>(world, e).unwrap();
            p.x = p.x.add(v.dx.mul(dt));
            p.y = p.y.add(v.dy.mul(dt));
        }
    }
}

const ENTITY_COUNT: u32 = 5;
const TICKS: u64 = 60;

fn build_world() -> DemoWorld {
    let mut world = DemoWorld::new();
    for i in 0..ENTITY_COUNT {
        let e = create_entity(&mut world).unwrap();
        add_component(&mut world, e, Position { x: FP::ZERO, y: FP::ZERO }).unwrap();
        add_component(
            &mut world,
            e,
            Velocity { dx: FP::from_int(1), dy: FP::from_int(i as i32) },
        )
        .unwrap();
    }
    world
}

fn snapshot_positions(world: &DemoWorld) -> Vec<(EntityId, Position)> {
    run_query::<DemoWorld, (Position,)>(world)
        .map(|e| (e, *get_component::<DemoWorld, Position>(world, e).unwrap()))
        .collect()
}

fn run_ticks(
    sim: &mut Sim<DemoWorld, DemoInput>,
    schedule: &mut Schedule<DemoWorld, DemoInput>,
    input_source: &mut ScriptedInputSource,
    clock: &mut FixedStepClock,
    renderer: &mut StdoutRenderer,
    ticks: u64,
) {
    for _ in 0..ticks {
        let input = input_source.poll();
        let (time, dt) = clock.now();
        sim.update(schedule, input, dt, time);
        renderer.present(sim.frame());
    }
}

fn main() {
    let world = build_world();
    let mut sim: Sim<DemoWorld, DemoInput> = Sim::new(world, DemoInput, SimConfig::default());
    let mut schedule: Schedule<DemoWorld, DemoInput> = Schedule::new();
    schedule.add(Box::new(MoveSystem));

    let mut ring: RollbackRing<DemoWorld, 64, { 1 << 20 }> = RollbackRing::new(&sim.frame().world);
    ring.save(&sim.frame().world).expect("frame fits ring budget");

    let mut input_source = ScriptedInputSource;
    let mut clock = FixedStepClock { time: 0.0, step: 1.0 / 60.0 };
    let mut renderer = StdoutRenderer { every_n: 20 };

    run_ticks(&mut sim, &mut schedule, &mut input_source, &mut clock, &mut renderer, TICKS);
    let first_run = snapshot_positions(&sim.frame().world);

    // No further saves happened since the checkpoint above, so it is
    // still offset 0 (the most recent save) in head-relative terms.
    ring.restore(0, &mut sim.frame_mut().world).expect("checkpoint still in ring");
    sim.frame_mut().frame_number = 0;
    clock = FixedStepClock { time: 0.0, step: 1.0 / 60.0 };

    run_ticks(&mut sim, &mut schedule, &mut input_source, &mut clock, &mut renderer, TICKS);
    let second_run = snapshot_positions(&sim.frame().world);

    let matched = first_run == second_run;
    println!("rollback round trip over {TICKS} ticks: {}", if matched { "MATCH" } else { "MISMATCH" });
    if !matched {
        std::process::exit(1);
    }
}
