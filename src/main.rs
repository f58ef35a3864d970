use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use dunes::cli::Cli;
use dunes::config::SceneConfig;
use dunes::frame::FrameClock;
use dunes::renderer::{Overlay, Renderer};
use dunes::rig::CameraHandle;
use dunes::scene::{DriveKeys, Scene};

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    cli: Cli,
    config: SceneConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: Option<Scene>,
    clock: FrameClock,
    keys: DriveKeys,
    mouse_left: bool,
    mouse_right: bool,
    frame_count: u32,
    fps: f32,
    fps_timer: f32,
}

impl App {
    fn new(cli: Cli, config: SceneConfig) -> Self {
        Self {
            cli,
            config,
            window: None,
            renderer: None,
            scene: None,
            clock: FrameClock::new(),
            keys: DriveKeys::default(),
            mouse_left: false,
            mouse_right: false,
            frame_count: 0,
            fps: 0.0,
            fps_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_timer += delta;

        if self.fps_timer >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.fps_timer;
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }
    }

    fn process_keyboard(&mut self, event: &KeyEvent) {
        let Some(scene) = &mut self.scene else { return };
        let is_pressed = event.state.is_pressed();

        let PhysicalKey::Code(keycode) = event.physical_key else { return };

        // Held directional keys; everything below is edge-triggered.
        match keycode {
            KeyCode::KeyW | KeyCode::ArrowUp => self.keys.up = is_pressed,
            KeyCode::KeyS | KeyCode::ArrowDown => self.keys.down = is_pressed,
            KeyCode::KeyA | KeyCode::ArrowLeft => self.keys.left = is_pressed,
            KeyCode::KeyD | KeyCode::ArrowRight => self.keys.right = is_pressed,
            _ => {}
        }

        if !is_pressed {
            return;
        }

        match keycode {
            KeyCode::KeyQ => scene.rig.cycle(-1),
            KeyCode::KeyE => scene.rig.cycle(1),
            KeyCode::Digit1 => scene.rig.select(0),
            KeyCode::Digit2 => scene.rig.select(1),
            KeyCode::Digit3 => scene.rig.select(2),
            KeyCode::KeyO => scene.rig.attach(CameraHandle::Player),
            KeyCode::KeyP => scene.rig.attach(CameraHandle::Patrol),
            KeyCode::KeyI => scene.rig.attach(CameraHandle::Spectate),
            KeyCode::F1 => scene.rig.toggle_free_move(),
            KeyCode::F2 => scene.rig.toggle_free_look(),
            _ => {}
        }
    }

    fn process_cursor(&mut self, x: f32, y: f32) {
        let (Some(scene), Some(window)) = (&mut self.scene, &self.window) else {
            return;
        };

        let size = window.inner_size();
        let (cx, cy) = (size.width as f32 / 2.0, size.height as f32 / 2.0);
        if x == cx && y == cy {
            return;
        }

        if self.mouse_left || self.mouse_right {
            scene.drag_move(
                x - cx,
                y - cy,
                self.mouse_left,
                self.mouse_right,
                self.clock.elapsed(),
            );
        } else {
            scene.look(x - cx, cy - y);
        }

        if scene.rig.can_look() {
            window
                .set_cursor_position(winit::dpi::PhysicalPosition::new(cx, cy))
                .ok();
        }
    }

    fn redraw(&mut self) {
        let frame = self.clock.tick();
        self.update_fps(frame.delta);

        let (Some(scene), Some(renderer), Some(window)) =
            (&mut self.scene, &mut self.renderer, &self.window)
        else {
            return;
        };

        scene.update(frame.time, &self.keys);

        let camera = scene.active_camera();
        let overlay_mode = scene.mode_label();
        let result = renderer.render(
            window,
            camera.view_matrix(),
            camera.position(),
            frame.time,
            &scene.draws(),
            &Overlay {
                fps: self.fps,
                mode: &overlay_mode,
            },
        );

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(window.inner_size());
            }
            Err(e) => log::error!("render error: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(self.config.window_title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                eprintln!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(window.clone(), !self.cli.no_ui)) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Failed to initialize renderer: {e:#}");
                event_loop.exit();
                return;
            }
        };

        let scene = match Scene::new(&self.config, &renderer) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to build scene: {e:#}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.scene = Some(scene);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see the event first.
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
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
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.process_keyboard(&event),
            WindowEvent::CursorMoved { position, .. } => {
                self.process_cursor(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => match button {
                MouseButton::Left => self.mouse_left = state.is_pressed(),
                MouseButton::Right => self.mouse_right = state.is_pressed(),
                MouseButton::Middle => {
                    if state.is_pressed() {
                        if let Some(scene) = &self.scene {
                            let camera = scene.active_camera();
                            log::info!(
                                "camera at {:?}, yaw {:.2} pitch {:.2}",
                                camera.position(),
                                camera.yaw(),
                                camera.pitch()
                            );
                        }
                    }
                }
                _ => {}
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                if notches != 0.0 {
                    if let Some(scene) = &mut self.scene {
                        scene.wheel_move(notches > 0.0, self.clock.elapsed());
                    }
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = SceneConfig::load_or_default(cli.config.as_deref());

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, config);

    println!(
        "dunes - WASD/arrows drive or fly, Q/E cycle cameras, 1-3 fixed views, \
         O/P/I car & spectate cameras, F1 free-move, F2 free-look, Escape quits"
    );
    event_loop.run_app(&mut app)?;

    Ok(())
}
