use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use curve_nav::cli::Cli;
use curve_nav::config::NavigatorConfig;
use curve_nav::core::{
    FrameScheduler, InputOutcome, NavigationContext, SchedulerHandle, SystemClock, WinitInput,
};
use curve_nav::frame::FrameInfo;
use curve_nav::renderer::{FrameRenderer, Overlay, SurfacePresenter};

const FPS_UPDATE_INTERVAL: f32 = 1.0;

#[derive(Debug, Default)]
struct FpsMeter {
    fps: f32,
    frames: u32,
    elapsed: f32,
}

impl FpsMeter {
    fn update(&mut self, delta: f32) {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= FPS_UPDATE_INTERVAL {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            log::info!("FPS: {:.1}", self.fps);
        }
    }
}

/// State the frame callback and the event handlers share
struct Viewer {
    context: NavigationContext,
    presenter: Option<SurfacePresenter>,
    fps: FpsMeter,
    show_ui: bool,
}

impl Viewer {
    fn tick(&mut self, frame: &FrameInfo) {
        let camera = self.context.frame(frame);
        self.fps.update(frame.delta);

        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };
        let overlay = Overlay {
            fps: self.fps.fps,
            state: self.context.state(),
            selection: self.context.selection(),
            show_ui: self.show_ui,
        };
        if let Err(e) = presenter.render(self.context.scene(), &camera, &overlay) {
            log::error!("Render error: {e:#}");
        }
    }
}

struct App {
    config: NavigatorConfig,
    window: Option<Arc<Window>>,
    viewer: Rc<RefCell<Viewer>>,
    input: WinitInput,
    scheduler: FrameScheduler<SystemClock>,
    handle: Option<SchedulerHandle>,
}

impl App {
    fn new(config: NavigatorConfig, context: NavigationContext, show_ui: bool) -> Self {
        Self {
            config,
            window: None,
            viewer: Rc::new(RefCell::new(Viewer {
                context,
                presenter: None,
                fps: FpsMeter::default(),
                show_ui,
            })),
            input: WinitInput::new(),
            scheduler: FrameScheduler::new(SystemClock::new()),
            handle: None,
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.stop(&handle);
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Curve Navigator")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let presenter = match pollster::block_on(SurfacePresenter::new(window.clone())) {
            Ok(p) => p,
            Err(e) => {
                log::error!("Failed to initialize presenter: {e:#}");
                event_loop.exit();
                return;
            }
        };

        {
            let size = window.inner_size();
            let mut viewer = self.viewer.borrow_mut();
            viewer.context.resize(size.width, size.height);
            viewer.presenter = Some(presenter);
        }

        let viewer = self.viewer.clone();
        self.handle = Some(self.scheduler.start(move |frame| viewer.borrow_mut().tick(frame)));
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        {
            let mut viewer = self.viewer.borrow_mut();
            let consumed = viewer
                .presenter
                .as_mut()
                .is_some_and(|p| p.handle_event(&event));
            if consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                let mut viewer = self.viewer.borrow_mut();
                viewer.context.resize(size.width, size.height);
                if let Some(presenter) = viewer.presenter.as_mut() {
                    presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.scheduler.pump();
            }
            other => {
                if let Some(input) = self.input.process_event(&other) {
                    let outcome = self.viewer.borrow_mut().context.handle_input(input);
                    if outcome != InputOutcome::Missed {
                        log::debug!("{input:?} -> {outcome:?}");
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let context = config.build_context()?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, context, !cli.no_ui);

    log::info!("Curve Navigator - Controls: arrows move, +/- scale, click to pick, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
