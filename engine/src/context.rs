use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::input::{self, InputEvent};
use crate::render::{create_graphics, Graphics, GraphicsResult};
use crate::scene::World;

/// Whether the loop should keep going after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Game logic hosted by the engine. All callbacks run on the event loop
/// thread, input between frames.
pub trait Game: 'static {
    /// Called once before the window opens.
    fn startup(&mut self, world: &mut World) -> anyhow::Result<()>;

    fn input(&mut self, event: InputEvent, world: &mut World) -> Flow;

    fn frame(&mut self, world: &mut World, clock: &Clock) -> Flow;
}

enum State {
    Ready(Graphics),
    Init(Option<EventLoopProxy<GraphicsResult>>),
}

struct App<G: Game> {
    state: State,
    config: EngineConfig,
    game: G,
    world: World,
    clock: Clock,
    error: Option<EngineError>,
}

impl<G: Game> App<G> {
    fn new(event_loop: &EventLoop<GraphicsResult>, config: EngineConfig, game: G) -> Self {
        Self {
            state: State::Init(Some(event_loop.create_proxy())),
            config,
            game,
            world: World::new(),
            clock: Clock::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn input(&mut self, event_loop: &ActiveEventLoop, event: InputEvent) {
        if self.game.input(event, &mut self.world) == Flow::Exit {
            event_loop.exit();
        }
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        if !matches!(self.state, State::Ready(_)) {
            return;
        }
        self.clock.tick();
        if self.game.frame(&mut self.world, &self.clock) == Flow::Exit {
            event_loop.exit();
            return;
        }
        if let State::Ready(gfx) = &mut self.state {
            gfx.draw(&self.world);
        }
    }

    fn resized(&mut self, size: PhysicalSize<u32>) {
        if let State::Ready(gfx) = &mut self.state {
            gfx.resize(size);
        }
    }
}

impl<G: Game> ApplicationHandler<GraphicsResult> for App<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let State::Init(proxy) = &mut self.state else {
            return;
        };
        let Some(proxy) = proxy.take() else {
            return;
        };
        let win_attr = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        match event_loop.create_window(win_attr) {
            Ok(window) => pollster::block_on(create_graphics(
                Arc::new(window),
                proxy,
                self.config.clear_color,
            )),
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, graphics: GraphicsResult) {
        match graphics {
            Ok(graphics) => {
                graphics.request_redraw();
                self.state = State::Ready(graphics);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(size) => self.resized(size),
            WindowEvent::RedrawRequested => self.draw(event_loop),
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(input) = input::translate_key_event(&event) {
                    self.input(event_loop, input);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(input) = input::translate_wheel(delta) {
                    self.input(event_loop, input);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let State::Ready(gfx) = &self.state {
            gfx.request_redraw();
        }
    }
}

/// Sets up `env_logger`. `RUST_LOG` overrides the default `info` filter.
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

pub struct EngineContext<G: Game> {
    event_loop: EventLoop<GraphicsResult>,
    app: App<G>,
}

impl<G: Game> EngineContext<G> {
    pub fn new(config: EngineConfig, game: G) -> Result<Self, EngineError> {
        let event_loop = EventLoop::<GraphicsResult>::with_user_event().build()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        let app = App::new(&event_loop, config, game);
        Ok(Self { event_loop, app })
    }

    /// Runs the game until it asks to exit or the window is closed.
    pub fn run(self) -> Result<(), EngineError> {
        let Self { event_loop, mut app } = self;
        app.game
            .startup(&mut app.world)
            .map_err(EngineError::Startup)?;
        log::info!(
            "Startup complete: {} scene nodes, {} meshes",
            app.world.scene.len(),
            app.world.assets.len()
        );
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
