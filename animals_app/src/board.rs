//! The soundboard frame loop
//!
//! [`Soundboard::frame`] turns one frame of input into pixels and sounds
//! without touching the window; [`Soundboard::run`] drives it against a real
//! window and presenter.

use std::time::Instant;

use rand::Rng;

use soundboard_engine::audio::AudioBackend;
use soundboard_engine::config::{KeyBindings, SoundboardConfig};
use soundboard_engine::foundation::math::Vec4;
use soundboard_engine::foundation::time::{FpsCounter, Timer};
use soundboard_engine::input::{FrameInput, InputCollector};
use soundboard_engine::render::{
    random_unit_color, Canvas, FramePresenter, PresentError, PresentOutcome, WindowHandle,
};
use soundboard_engine::ui::ButtonRegistry;

/// Display flags plus the terminal `closed` state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardState {
    /// Outline every button in a random colour
    pub debug_overlay: bool,
    /// Window is on the primary monitor
    pub fullscreen: bool,
    /// The loop should stop
    pub closed: bool,
}

/// What a frame asks the window driver to do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// New fullscreen state, when it changed this frame
    pub fullscreen: Option<bool>,
    /// Sounds started this frame
    pub plays: usize,
}

/// Buttons, key bindings and display state
pub struct Soundboard {
    registry: ButtonRegistry,
    keys: KeyBindings,
    background: Vec4,
    outline_width: u32,
    title: String,
    state: BoardState,
}

impl Soundboard {
    /// Create a board over a loaded registry
    pub fn new(registry: ButtonRegistry, config: &SoundboardConfig) -> Self {
        Self {
            registry,
            keys: config.keys.clone(),
            background: Vec4::from(config.window.background),
            outline_width: config.window.debug_outline_width,
            title: config.window.title.clone(),
            state: BoardState::default(),
        }
    }

    /// Current display state
    pub fn state(&self) -> BoardState {
        self.state
    }

    /// Adopt the window's real fullscreen state after a switch was requested
    ///
    /// The switch fails without a primary monitor; the next toggle must then
    /// ask for fullscreen again rather than for windowed mode.
    pub fn sync_fullscreen(&mut self, fullscreen: bool) {
        if self.state.fullscreen != fullscreen {
            log::warn!("Window stayed {}", if fullscreen { "fullscreen" } else { "windowed" });
        }
        self.state.fullscreen = fullscreen;
    }

    /// Compose one frame into `canvas` and play whatever was clicked
    pub fn frame<R: Rng + ?Sized>(
        &mut self,
        input: &FrameInput,
        canvas: &mut Canvas,
        audio: &mut dyn AudioBackend,
        rng: &mut R,
    ) -> FrameReport {
        let mut report = FrameReport::default();

        if input.close_requested || input.just_pressed(self.keys.quit) {
            self.state.closed = true;
        }

        canvas.clear(self.background);
        for button in self.registry.iter() {
            canvas.draw_sprite_centered(button.image(), button.rect().center());
        }

        if input.just_pressed(self.keys.toggle_debug) {
            self.state.debug_overlay = !self.state.debug_overlay;
            log::debug!("Debug overlay {}", if self.state.debug_overlay { "on" } else { "off" });
        }

        if self.state.debug_overlay {
            for button in self.registry.iter() {
                canvas.stroke_rect(button.rect(), self.outline_width, random_unit_color(rng));
            }
        }

        if input.just_pressed(self.keys.toggle_fullscreen) {
            self.state.fullscreen = !self.state.fullscreen;
            report.fullscreen = Some(self.state.fullscreen);
        }

        for &click in &input.left_clicks {
            let Some(id) = self.registry.hit_test(click) else {
                continue;
            };
            match self.registry.play(id, audio) {
                Ok(_) => report.plays += 1,
                Err(e) => log::warn!("Could not play {}: {}", id, e),
            }
        }

        report
    }

    /// Run until the window closes or the quit key is pressed
    pub fn run(
        &mut self,
        window: &mut WindowHandle,
        presenter: &mut dyn FramePresenter,
        audio: &mut dyn AudioBackend,
    ) -> Result<(), PresentError> {
        let mut collector = InputCollector::new(window.get_size(), window.get_framebuffer_size());
        collector.set_cursor(window.get_cursor_pos());
        let (width, height) = window.get_framebuffer_size();
        let mut canvas = Canvas::new(width.max(1), height.max(1));
        let mut rng = rand::thread_rng();
        let mut timer = Timer::new();
        let mut fps = FpsCounter::default();

        log::info!("Entering frame loop with {} buttons", self.registry.len());

        while !self.state.closed && !window.should_close() {
            window.poll_events();
            let events: Vec<_> = window.event_iter().collect();
            for (_, event) in &events {
                collector.process_event(event);
            }
            let input = collector.take_frame();

            let framebuffer_size = window.get_framebuffer_size();
            if framebuffer_size.0 > 0 && framebuffer_size.1 > 0 {
                canvas.resize(framebuffer_size.0, framebuffer_size.1);
            }

            let report = self.frame(&input, &mut canvas, audio, &mut rng);

            if self.state.closed {
                window.set_should_close(true);
                break;
            }

            if let Some(fullscreen) = report.fullscreen {
                window.set_fullscreen(fullscreen);
                self.sync_fullscreen(window.is_fullscreen());
                collector.set_sizes(window.get_size(), window.get_framebuffer_size());
            }

            match presenter.present(&canvas, framebuffer_size)? {
                PresentOutcome::Presented | PresentOutcome::Skipped => {}
                PresentOutcome::Recreated => log::debug!("Frame dropped for swapchain rebuild"),
            }

            audio.update();

            timer.update();
            if let Some(sample) = fps.tick(Instant::now(), timer.delta_time()) {
                let title = format!("{} [ fps: {} | delta: {} ]", self.title, sample.frames, sample.delta);
                log::debug!("{}", title);
                window.set_title(&title);
            }
        }

        presenter.wait_idle();
        audio.stop_all();
        log::info!("Frame loop finished after {} frames", timer.frame_count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use soundboard_engine::assets::ImageData;
    use soundboard_engine::audio::backend::NullBackend;
    use soundboard_engine::audio::{AudioBackendConfig, AudioClip};
    use soundboard_engine::foundation::math::{Point2, Rect};
    use soundboard_engine::input::KeyCode;
    use soundboard_engine::ui::{Button, RegistryBuilder};
    use std::sync::Arc;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn button(id: &str, rect: Rect, samples: usize) -> Button {
        Button::new(
            id,
            rect,
            Arc::new(ImageData::solid_color(rect.width() as u32, rect.height() as u32, WHITE)),
            Arc::new(AudioClip::from_samples(vec![0.0; samples], 1, 8_000).unwrap()),
        )
    }

    fn board() -> Soundboard {
        let mut builder = RegistryBuilder::new();
        builder
            .push(button("cow", Rect::from_xywh(0.0, 0.0, 100.0, 100.0), 10))
            .unwrap()
            .push(button("horse", Rect::from_xywh(200.0, 0.0, 100.0, 100.0), 20))
            .unwrap();
        Soundboard::new(builder.build().unwrap(), &SoundboardConfig::default())
    }

    fn audio() -> NullBackend {
        let mut backend = NullBackend::new();
        backend.initialize(&AudioBackendConfig::default()).unwrap();
        backend
    }

    fn pressed(key: KeyCode) -> FrameInput {
        let mut input = FrameInput::default();
        input.press(key);
        input
    }

    fn pixel(canvas: &Canvas, x: u32, y: u32) -> [u8; 4] {
        canvas.pixels().get_pixel(x, y).0
    }

    #[test]
    fn test_clicks_play_what_they_hit() {
        let mut board = board();
        let mut backend = audio();
        let mut canvas = Canvas::new(400, 200);
        let mut rng = StdRng::seed_from_u64(1);

        let mut input = FrameInput::default();
        input.click(Point2::new(50.0, 50.0));
        input.click(Point2::new(250.0, 50.0));
        input.click(Point2::new(150.0, 50.0));

        let report = board.frame(&input, &mut canvas, &mut backend, &mut rng);

        assert_eq!(report.plays, 2);
        let plays: Vec<usize> = backend.plays().iter().map(|play| play.samples).collect();
        assert_eq!(plays, vec![10, 20]);
    }

    #[test]
    fn test_sprites_drawn_over_background() {
        let mut board = board();
        let mut canvas = Canvas::new(400, 200);
        let mut rng = StdRng::seed_from_u64(2);

        board.frame(&FrameInput::default(), &mut canvas, &mut audio(), &mut rng);

        assert_eq!(pixel(&canvas, 50, 50), WHITE);
        assert_eq!(pixel(&canvas, 0, 0), WHITE);
        assert_eq!(pixel(&canvas, 150, 50), BLACK);
        assert_eq!(pixel(&canvas, 50, 150), BLACK);
    }

    #[test]
    fn test_debug_toggle_twice_is_off() {
        let mut board = board();
        let mut backend = audio();
        let mut canvas = Canvas::new(400, 200);
        let mut rng = StdRng::seed_from_u64(3);
        let toggle = pressed(KeyCode::Equal);

        board.frame(&toggle, &mut canvas, &mut backend, &mut rng);
        assert!(board.state().debug_overlay);

        board.frame(&toggle, &mut canvas, &mut backend, &mut rng);
        assert!(!board.state().debug_overlay);
        assert_eq!(pixel(&canvas, 0, 0), WHITE);
    }

    #[test]
    fn test_overlay_outlines_change_every_frame() {
        let mut board = board();
        let mut backend = audio();
        let mut canvas = Canvas::new(400, 200);
        let mut rng = StdRng::seed_from_u64(4);

        board.frame(&pressed(KeyCode::Equal), &mut canvas, &mut backend, &mut rng);
        let first = pixel(&canvas, 0, 0);
        assert_ne!(first, WHITE);
        assert_ne!(first, BLACK);
        assert_eq!(pixel(&canvas, 50, 50), WHITE);

        board.frame(&FrameInput::default(), &mut canvas, &mut backend, &mut rng);
        let second = pixel(&canvas, 0, 0);
        assert_ne!(second, WHITE);
        assert_ne!(first, second);
    }

    #[test]
    fn test_fullscreen_toggle_reported() {
        let mut board = board();
        let mut backend = audio();
        let mut canvas = Canvas::new(400, 200);
        let mut rng = StdRng::seed_from_u64(5);

        let report = board.frame(&pressed(KeyCode::F), &mut canvas, &mut backend, &mut rng);
        assert_eq!(report.fullscreen, Some(true));

        let report = board.frame(&FrameInput::default(), &mut canvas, &mut backend, &mut rng);
        assert_eq!(report.fullscreen, None);

        let report = board.frame(&pressed(KeyCode::F), &mut canvas, &mut backend, &mut rng);
        assert_eq!(report.fullscreen, Some(false));
        assert!(!board.state().fullscreen);
    }

    #[test]
    fn test_failed_fullscreen_switch_retries_on_next_toggle() {
        let mut board = board();
        let mut backend = audio();
        let mut canvas = Canvas::new(400, 200);
        let mut rng = StdRng::seed_from_u64(8);

        let report = board.frame(&pressed(KeyCode::F), &mut canvas, &mut backend, &mut rng);
        assert_eq!(report.fullscreen, Some(true));

        board.sync_fullscreen(false);
        assert!(!board.state().fullscreen);

        let report = board.frame(&pressed(KeyCode::F), &mut canvas, &mut backend, &mut rng);
        assert_eq!(report.fullscreen, Some(true));
    }

    #[test]
    fn test_quit_key_and_close_request_close() {
        let mut backend = audio();
        let mut canvas = Canvas::new(400, 200);
        let mut rng = StdRng::seed_from_u64(6);

        let mut quit = board();
        quit.frame(&pressed(KeyCode::Escape), &mut canvas, &mut backend, &mut rng);
        assert!(quit.state().closed);

        let mut closing = board();
        let input = FrameInput {
            close_requested: true,
            ..FrameInput::default()
        };
        closing.frame(&input, &mut canvas, &mut backend, &mut rng);
        assert!(closing.state().closed);

        let mut running = board();
        running.frame(&FrameInput::default(), &mut canvas, &mut backend, &mut rng);
        assert!(!running.state().closed);
    }

    #[test]
    fn test_playback_failure_keeps_running() {
        let mut board = board();
        let mut backend = audio();
        let mut canvas = Canvas::new(400, 200);
        let mut rng = StdRng::seed_from_u64(7);

        let mut input = FrameInput::default();
        input.click(Point2::new(50.0, 50.0));

        backend.set_failing(true);
        let report = board.frame(&input, &mut canvas, &mut backend, &mut rng);
        assert_eq!(report.plays, 0);
        assert!(!board.state().closed);

        backend.set_failing(false);
        let report = board.frame(&input, &mut canvas, &mut backend, &mut rng);
        assert_eq!(report.plays, 1);
    }
}
