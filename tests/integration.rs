//! Integration tests for occupancy-gate host-testable logic.
//!
//! Drives the public API end to end: actors feed the pool and the command
//! queue, the dispatcher renders into in-memory surfaces.

use std::sync::atomic::{AtomicBool, Ordering};

use embassy_futures::block_on;
use embassy_futures::select::select;
use embassy_time::Timer;
use occupancy_gate::actors::{self, SharedBuzzer};
use occupancy_gate::config::{ALERT_TONE_HZ, CAPACITY, RESET_DEBOUNCE_MS};
use occupancy_gate::debounce::ResetLine;
use occupancy_gate::ui::dispatcher::{Dispatcher, RenderOutcome, SharedSurfaces, Surfaces};
use occupancy_gate::ui::glyphs::{self, MATRIX_PIXELS, PATTERN_X};
use occupancy_gate::ui::{Band, Buzzer, Indicator, IndicatorColor, PixelMatrix, Rgb, StatusSurface, UiMode};
use occupancy_gate::{CommandQueue, DisplayCommand, Error, OccupancyPool};

// ═══════════════════════════════════════════════════════════════════════════
// In-memory surfaces
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Screen {
    texts: Vec<String>,
    squares: usize,
}

impl StatusSurface for Screen {
    fn clear(&mut self) {
        self.texts.clear();
        self.squares = 0;
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32) {
        self.texts.push(text.to_string());
    }

    fn fill_rect(&mut self, _x: i32, _y: i32, _width: u32, _height: u32) {
        self.squares += 1;
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

#[derive(Default)]
struct Led(Option<IndicatorColor>);

impl Indicator for Led {
    fn set(&mut self, red: bool, green: bool, blue: bool) {
        self.0 = Some(IndicatorColor::new(red, green, blue));
    }
}

#[derive(Default)]
struct Pixels(Option<[Rgb; MATRIX_PIXELS]>);

impl PixelMatrix for Pixels {
    async fn write(&mut self, pixels: &[Rgb; MATRIX_PIXELS]) {
        self.0 = Some(*pixels);
    }
}

/// Records every pitch it is started at.
#[derive(Default)]
struct Beeper(Vec<u32>);

impl Buzzer for Beeper {
    fn start(&mut self, frequency_hz: u32) {
        self.0.push(frequency_hz);
    }

    fn stop(&mut self) {}
}

struct Rig {
    pool: OccupancyPool,
    queue: CommandQueue,
    mode: UiMode,
    surfaces: SharedSurfaces<Screen, Led, Pixels>,
    buzzer: SharedBuzzer<Beeper>,
}

impl Rig {
    fn new() -> Self {
        Self {
            pool: OccupancyPool::new(CAPACITY),
            queue: CommandQueue::new(),
            mode: UiMode::new(),
            surfaces: SharedSurfaces::new(Surfaces::new(
                Screen::default(),
                Led::default(),
                Pixels::default(),
            )),
            buzzer: SharedBuzzer::new(Beeper::default()),
        }
    }

    fn dispatcher(&self) -> Dispatcher<'_, Screen, Led, Pixels> {
        Dispatcher::new(&self.pool, &self.queue, &self.mode, &self.surfaces)
    }

    /// Handle every queued command, returning the last outcome.
    fn drain(&self) -> Option<RenderOutcome> {
        let dispatcher = self.dispatcher();
        let mut last = None;
        while let Some(cmd) = self.queue.try_dequeue() {
            last = Some(block_on(dispatcher.dispatch(cmd)));
        }
        last
    }

    fn admit(&self) -> bool {
        block_on(actors::admit(&self.pool, &self.queue, &self.buzzer))
    }

    fn fill_to(&self, used: u8) {
        for _ in 0..used {
            assert!(self.admit());
            self.drain();
        }
    }

    fn texts(&self) -> Vec<String> {
        self.surfaces.try_lock().unwrap().status.texts.clone()
    }

    fn led(&self) -> Option<IndicatorColor> {
        self.surfaces.try_lock().unwrap().indicator.0
    }

    fn matrix(&self) -> Option<[Rgb; MATRIX_PIXELS]> {
        self.surfaces.try_lock().unwrap().matrix.pixels().0
    }

    fn tones(&self) -> Vec<u32> {
        self.buzzer.lock(|b| b.0.clone())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Scenarios
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn room_fills_then_refuses_with_alert() {
    let rig = Rig::new();
    rig.fill_to(CAPACITY);
    assert_eq!(rig.pool.used(), 10);
    assert_eq!(rig.pool.available(), 0);
    assert!(rig.tones().is_empty());

    assert!(!rig.admit());
    assert_eq!(rig.pool.used(), 10);
    assert!(rig.queue.is_empty());
    assert_eq!(rig.tones(), [ALERT_TONE_HZ]);

    assert_eq!(rig.led(), Some(IndicatorColor::RED));
    assert_eq!(rig.matrix(), Some(glyphs::pattern_frame(&PATTERN_X, Rgb::RED)));
    assert!(rig.texts().iter().any(|t| t == "State: FULL"));
}

#[test]
fn exit_from_nearly_full_room() {
    let rig = Rig::new();
    rig.fill_to(9);
    assert_eq!(rig.led(), Some(IndicatorColor::YELLOW));

    actors::depart(&rig.pool, &rig.queue);
    assert_eq!(rig.drain(), Some(RenderOutcome::Rendered(Band::Normal)));
    assert_eq!(rig.pool.used(), 8);
    assert_eq!(rig.pool.available(), 2);
    assert!(rig.texts().iter().any(|t| t == "Users: 8/10"));
    assert_eq!(rig.led(), Some(IndicatorColor::GREEN));
}

#[test]
fn reset_clears_room_and_shows_banner() {
    let rig = Rig::new();
    rig.fill_to(7);
    let line = ResetLine::new(RESET_DEBOUNCE_MS);

    block_on(select(
        actors::reset_actor(&line, &rig.pool, &rig.queue, &rig.buzzer),
        async {
            assert!(line.on_edge(5_000));
            Timer::after_millis(500).await;
            rig.drain();
            assert!(rig.texts().iter().any(|t| t == "** RESET! **"));
            // A second press inside the debounce window is ignored.
            assert!(!line.on_edge(5_200));
            Timer::after_millis(2_000).await;
        },
    ));

    assert_eq!(rig.drain(), Some(RenderOutcome::Rendered(Band::Empty)));
    assert_eq!(rig.pool.used(), 0);
    assert_eq!(rig.pool.available(), CAPACITY);
    assert_eq!(rig.pool.total_resets(), 1);
    let texts = rig.texts();
    assert!(!texts.iter().any(|t| t == "** RESET! **"));
    assert!(texts.iter().any(|t| t == "Resets: 1"));
    assert_eq!(rig.led(), Some(IndicatorColor::BLUE));
    assert_eq!(rig.tones(), [ALERT_TONE_HZ; 2]);
}

#[test]
fn flooded_queue_keeps_five_and_renders_live_state() {
    let rig = Rig::new();
    let accepted = (0..6)
        .filter(|_| rig.queue.enqueue(DisplayCommand::Refresh))
        .count();
    assert_eq!(accepted, 5);
    assert_eq!(rig.queue.len(), 5);

    // State moves on while the commands wait.
    for _ in 0..3 {
        rig.pool.try_enter();
    }
    assert_eq!(rig.drain(), Some(RenderOutcome::Rendered(Band::Normal)));
    assert!(rig.texts().iter().any(|t| t == "Users: 3/10"));
    assert_eq!(rig.matrix(), Some(glyphs::digit_frame(3, glyphs::digit_color(3))));
}

#[test]
fn ticker_and_dispatcher_alternate_screens() {
    let rig = Rig::new();
    rig.fill_to(4);

    block_on(select(rig.dispatcher().run(), async {
        rig.queue.enqueue(DisplayCommand::ToggleScreen);
        Timer::after_millis(20).await;
    }));
    {
        let surfaces = rig.surfaces.try_lock().unwrap();
        assert!(surfaces.status.texts.is_empty());
        assert_eq!(surfaces.status.squares, 4);
    }

    rig.queue.enqueue(DisplayCommand::ToggleScreen);
    rig.drain();
    assert!(rig.texts().iter().any(|t| t == "Users: 4/10"));
}

#[test]
fn entry_button_press_is_debounced_end_to_end() {
    let rig = Rig::new();
    let pressed = AtomicBool::new(false);

    struct Line<'a>(&'a AtomicBool);
    impl occupancy_gate::debounce::ButtonLine for Line<'_> {
        fn is_pressed(&mut self) -> bool {
            self.0.load(Ordering::Relaxed)
        }
    }

    block_on(select(
        actors::entry_actor(Line(&pressed), &rig.pool, &rig.queue, &rig.buzzer),
        async {
            // Contact bounce: too short to survive the settle delay.
            for _ in 0..3 {
                pressed.store(true, Ordering::Relaxed);
                Timer::after_millis(5).await;
                pressed.store(false, Ordering::Relaxed);
                Timer::after_millis(5).await;
            }
            Timer::after_millis(100).await;
            pressed.store(true, Ordering::Relaxed);
            Timer::after_millis(150).await;
            pressed.store(false, Ordering::Relaxed);
            Timer::after_millis(30).await;
        },
    ));

    assert_eq!(rig.pool.used(), 1);
    assert_eq!(rig.drain(), Some(RenderOutcome::Rendered(Band::Normal)));
}

#[test]
fn concurrent_traffic_keeps_the_pool_consistent() {
    let pool = OccupancyPool::new(CAPACITY);
    let running = AtomicBool::new(true);

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                while running.load(Ordering::Relaxed) {
                    let _ = pool.try_enter();
                    let snap = pool.snapshot();
                    assert!(snap.used <= snap.capacity);
                    assert_eq!(snap.used + snap.available, snap.capacity);
                }
            });
        }
        s.spawn(|| {
            for _ in 0..10_000 {
                pool.exit();
            }
        });
        s.spawn(|| {
            for _ in 0..100 {
                pool.reset();
            }
            running.store(false, Ordering::Relaxed);
        });
    });

    assert_eq!(pool.total_resets(), 100);
    let snap = pool.snapshot();
    assert_eq!(snap.used + snap.available, CAPACITY);
}
