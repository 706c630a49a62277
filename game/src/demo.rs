//! The demo itself: state, frame tasks, and input handling.

use anyhow::Result;
use engine::{
    Clock, Flow, Game, InputEvent, MeshHandle, NodeId, Primitive, TaskInfo, TaskManager,
    TaskStatus, World,
};
use glam::Vec3;
use rand::Rng;

use crate::config::HomeBaseConfig;
use crate::controls::{Bindings, Command, KeyState};
use crate::movement::movement_delta;
use crate::orbit::OrbitRig;
use crate::ring::{ring_layout, spawn_ring};

/// Mutable state shared by the frame tasks.
#[derive(Debug, Clone)]
pub struct DemoState {
    pub keys: KeyState,
    pub rig: OrbitRig,
    pub speed: f32,
    pub player: Option<NodeId>,
}

pub struct HomeBase {
    config: HomeBaseConfig,
    bindings: Bindings,
    tasks: TaskManager<DemoState>,
    state: DemoState,
}

impl HomeBase {
    pub fn new(config: HomeBaseConfig) -> Self {
        let cam = &config.camera;
        let rig = OrbitRig::new(
            cam.distance,
            cam.height,
            cam.min_distance,
            cam.max_distance,
            cam.zoom_step,
            cam.orbit_rate,
        );
        let state = DemoState {
            keys: KeyState::default(),
            rig,
            speed: config.player.speed,
            player: None,
        };
        Self {
            config,
            bindings: Bindings::default(),
            tasks: TaskManager::new(),
            state,
        }
    }

    fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Move(direction, down) => self.state.keys.set(direction, down),
            Command::ZoomIn => {
                self.state.rig.zoom_in();
                log::debug!("Camera distance {}", self.state.rig.distance());
            }
            Command::ZoomOut => {
                self.state.rig.zoom_out();
                log::debug!("Camera distance {}", self.state.rig.distance());
            }
            Command::Quit => {
                log::info!("Exiting game...");
                return Flow::Exit;
            }
        }
        Flow::Continue
    }
}

/// Loads `path`, or falls back to a built-in primitive when the model is
/// missing or unreadable.
fn load_or_fallback(world: &mut World, path: &str, fallback: Primitive) -> MeshHandle {
    match world.assets.load_model(path) {
        Ok(handle) => handle,
        Err(e) => {
            log::warn!("{e}; using built-in {fallback:?}");
            world.assets.primitive(fallback)
        }
    }
}

fn orbit_camera_task(state: &mut DemoState, world: &mut World, task: &TaskInfo) -> TaskStatus {
    world.camera.set_pos(state.rig.position_at(task.time));
    if let Some(player) = state.player {
        world.camera.look_at(world.scene.world_pos(player));
    }
    TaskStatus::Continue
}

fn player_movement_task(state: &mut DemoState, world: &mut World, task: &TaskInfo) -> TaskStatus {
    let Some(player) = state.player else {
        return TaskStatus::Continue;
    };
    let delta = movement_delta(
        &state.keys,
        world.camera.forward(),
        world.camera.right(),
        state.speed,
        task.dt,
    );
    let pos = world.scene.pos(player);
    world.scene.set_pos(player, pos + delta);
    TaskStatus::Continue
}

impl Game for HomeBase {
    fn startup(&mut self, world: &mut World) -> Result<()> {
        let render = world.render();

        let player_mesh = load_or_fallback(world, &self.config.player.model, Primitive::Sphere);
        let player = world.scene.attach_model(render, "Player", player_mesh);
        world.scene.set_scale(player, self.config.player.scale);
        world.scene.set_pos(player, Vec3::ZERO);
        self.state.player = Some(player);

        let ring = &self.config.ring;
        let cube_mesh = load_or_fallback(world, &ring.model, Primitive::Cube);
        let cube_parent = world.scene.attach_new_node(render, "CubeParent");
        let mut rng = rand::thread_rng();
        let gap_index = match ring.gap_index {
            Some(gap) => gap,
            None if ring.count > 0 => rng.gen_range(0..ring.count),
            None => 0,
        };
        let layout = ring_layout(ring.count, ring.radius, gap_index, &mut rng);
        spawn_ring(world, cube_parent, cube_mesh, &layout, ring.model_scale);
        log::info!(
            "Home base ring: {} of {} slots, gap at {gap_index}",
            layout.len(),
            ring.count
        );

        self.tasks.add("orbit_camera", orbit_camera_task);
        self.tasks.add("player_movement", player_movement_task);
        Ok(())
    }

    fn input(&mut self, event: InputEvent, _world: &mut World) -> Flow {
        match self.bindings.command(event) {
            Some(command) => self.apply(command),
            None => Flow::Continue,
        }
    }

    fn frame(&mut self, world: &mut World, clock: &Clock) -> Flow {
        self.tasks.run(&mut self.state, world, clock);
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RingConfig;
    use engine::Key;
    use std::cell::RefCell;
    use std::sync::Once;

    // Records are kept per thread so parallel tests don't see each other.
    thread_local! {
        static RECORDS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            RECORDS.with(|r| r.borrow_mut().push(record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    fn capture_logs() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            log::set_logger(&LOGGER).expect("logger already installed");
            log::set_max_level(log::LevelFilter::Trace);
        });
        RECORDS.with(|r| r.borrow_mut().clear());
    }

    fn captured(message: &str) -> usize {
        RECORDS.with(|r| r.borrow().iter().filter(|m| m.as_str() == message).count())
    }

    fn started(config: HomeBaseConfig) -> (HomeBase, World) {
        let mut game = HomeBase::new(config);
        let mut world = World::new();
        game.startup(&mut world).unwrap();
        (game, world)
    }

    fn fixed_gap(gap: usize) -> HomeBaseConfig {
        HomeBaseConfig {
            ring: RingConfig {
                gap_index: Some(gap),
                model: "missing/cube.glb".to_string(),
                ..RingConfig::default()
            },
            ..HomeBaseConfig::default()
        }
    }

    #[test]
    fn startup_builds_scene_with_fallback_models() {
        let (game, world) = started(fixed_gap(5));
        let parent = world.scene.find("CubeParent").unwrap();
        assert_eq!(world.scene.children(parent).len(), 19);
        let player = world.scene.find("Player").unwrap();
        assert_eq!(world.scene.pos(player), Vec3::ZERO);
        // player + 19 cubes
        assert_eq!(world.scene.renderables().len(), 20);
        assert_eq!(
            game.tasks.names().collect::<Vec<_>>(),
            vec!["orbit_camera", "player_movement"]
        );
    }

    #[test]
    fn random_gap_always_leaves_one_slot_open() {
        for _ in 0..10 {
            let (_, world) = started(HomeBaseConfig::default());
            let parent = world.scene.find("CubeParent").unwrap();
            assert_eq!(world.scene.children(parent).len(), 19);
        }
    }

    #[test]
    fn first_frame_puts_camera_on_orbit_start_facing_player() {
        let (mut game, mut world) = started(fixed_gap(0));
        let mut clock = Clock::new();
        clock.advance(0.0);
        assert_eq!(game.frame(&mut world, &clock), Flow::Continue);

        assert_eq!(world.camera.position(), Vec3::new(25.0, 0.0, 15.0));
        let to_player = (Vec3::ZERO - world.camera.position()).normalize();
        assert!((world.camera.forward() - to_player).length() < 1e-5);
    }

    #[test]
    fn holding_w_moves_player_toward_camera_target() {
        let (mut game, mut world) = started(fixed_gap(0));
        let mut clock = Clock::new();
        clock.advance(0.0);
        game.frame(&mut world, &clock);

        game.input(InputEvent::KeyDown(Key::W), &mut world);
        assert!(game.state.keys.forward);
        let player = world.scene.find("Player").unwrap();

        clock.advance(0.1);
        game.frame(&mut world, &clock);
        // speed 10 for 0.1s, along the camera's flattened forward axis
        let moved = world.scene.pos(player);
        assert!((moved.length() - 1.0).abs() < 1e-4);
        let forward = world.camera.forward();
        let flat = Vec3::new(forward.x, forward.y, 0.0).normalize();
        assert!((moved - flat).length() < 1e-4);
        assert!(moved.z.abs() < 1e-6);

        game.input(InputEvent::KeyUp(Key::W), &mut world);
        clock.advance(0.1);
        game.frame(&mut world, &clock);
        assert_eq!(world.scene.pos(player), moved);
    }

    #[test]
    fn wheel_zooms_within_bounds() {
        let (mut game, mut world) = started(fixed_gap(0));
        for _ in 0..7 {
            game.input(InputEvent::WheelUp, &mut world);
        }
        assert_eq!(game.state.rig.distance(), 18.0);
        for _ in 0..100 {
            game.input(InputEvent::WheelDown, &mut world);
        }
        assert_eq!(game.state.rig.distance(), 60.0);
    }

    #[test]
    fn escape_requests_exit_once_per_press() {
        let (mut game, mut world) = started(fixed_gap(0));
        game.input(InputEvent::KeyDown(Key::W), &mut world);
        game.input(InputEvent::WheelUp, &mut world);

        let flows: Vec<Flow> = [
            InputEvent::KeyDown(Key::Escape),
            InputEvent::KeyUp(Key::Escape),
            InputEvent::KeyDown(Key::Space),
        ]
        .into_iter()
        .map(|e| game.input(e, &mut world))
        .collect();
        assert_eq!(flows, vec![Flow::Exit, Flow::Continue, Flow::Continue]);
    }

    #[test]
    fn escape_logs_exit_exactly_once() {
        let (mut game, mut world) = started(fixed_gap(0));
        capture_logs();
        game.input(InputEvent::KeyDown(Key::W), &mut world);
        game.input(InputEvent::WheelUp, &mut world);
        assert_eq!(captured("Exiting game..."), 0);

        let flow = game.input(InputEvent::KeyDown(Key::Escape), &mut world);
        game.input(InputEvent::KeyUp(Key::Escape), &mut world);
        assert_eq!(flow, Flow::Exit);
        assert_eq!(captured("Exiting game..."), 1);
    }

    #[test]
    fn orbit_returns_to_start_after_one_period() {
        let (mut game, mut world) = started(fixed_gap(0));
        let mut clock = Clock::new();
        clock.advance(0.0);
        game.frame(&mut world, &clock);
        let start = world.camera.position();

        clock.advance(std::f32::consts::TAU / 0.5);
        game.frame(&mut world, &clock);
        assert!((world.camera.position() - start).length() < 1e-3);
    }
}
