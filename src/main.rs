//! occupancy-gate firmware entry point.
//!
//! Runs on a BitDogLab RP2040 board. Three executors give the actors their
//! priorities:
//!
//! - **High** (`SWI_IRQ_1`, P1): reset edge watcher + reset actor
//! - **Medium** (`SWI_IRQ_0`, P2): entry, exit and the display dispatcher
//! - **Low** (thread mode): screen ticker
//!
//! All shared state lives in statics guarded by `CriticalSectionRawMutex`,
//! so it is safe to touch from any of the three.

#![no_std]
#![no_main]

mod hw;

use cortex_m_rt::entry;
use defmt::{error, info};
use embassy_executor::{Executor, InterruptExecutor, SendSpawner, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::AnyPin;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{self, Pwm};
use occupancy_gate::actors::{self, SharedBuzzer};
use occupancy_gate::command::CommandQueue;
use occupancy_gate::config::{CAPACITY, OLED_I2C_FREQUENCY, RESET_DEBOUNCE_MS};
use occupancy_gate::debounce::ResetLine;
use occupancy_gate::error::{Error, InitError};
use occupancy_gate::occupancy::OccupancyPool;
use occupancy_gate::ui::dispatcher::{Dispatcher, SharedSurfaces, Surfaces};
use occupancy_gate::ui::UiMode;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::hw::buttons::{self, ActiveLowButton};
use crate::hw::buzzer::PwmBuzzer;
use crate::hw::display::Oled;
use crate::hw::indicator::RgbLed;
use crate::hw::matrix::{LedMatrix, Ws2812};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

// ═══════════════════════════════════════════════════════════════════════════
// Shared state
// ═══════════════════════════════════════════════════════════════════════════

type StatusBus = I2c<'static, I2C1, i2c::Blocking>;
type BoardSurfaces = SharedSurfaces<Oled<StatusBus>, RgbLed, LedMatrix>;
type BoardBuzzer = SharedBuzzer<PwmBuzzer>;

static POOL: OccupancyPool = OccupancyPool::new(CAPACITY);
static COMMANDS: CommandQueue = CommandQueue::new();
static RESET_LINE: ResetLine = ResetLine::new(RESET_DEBOUNCE_MS);
static UI_MODE: UiMode = UiMode::new();

static SURFACES: StaticCell<BoardSurfaces> = StaticCell::new();
static BUZZER: StaticCell<BoardBuzzer> = StaticCell::new();

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_MED: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_MED.on_interrupt()
}

// ═══════════════════════════════════════════════════════════════════════════
// Tasks
// ═══════════════════════════════════════════════════════════════════════════

#[embassy_executor::task]
async fn reset_edge_task(pin: AnyPin) -> ! {
    buttons::watch_reset_edges(pin, &RESET_LINE).await
}

#[embassy_executor::task]
async fn reset_task(buzzer: &'static BoardBuzzer) -> ! {
    actors::reset_actor(&RESET_LINE, &POOL, &COMMANDS, buzzer).await
}

#[embassy_executor::task]
async fn entry_task(button: ActiveLowButton, buzzer: &'static BoardBuzzer) -> ! {
    actors::entry_actor(button, &POOL, &COMMANDS, buzzer).await
}

#[embassy_executor::task]
async fn exit_task(button: ActiveLowButton) -> ! {
    actors::exit_actor(button, &POOL, &COMMANDS).await
}

/// Draws the startup frame before it takes its first command.
#[embassy_executor::task]
async fn dispatcher_task(surfaces: &'static BoardSurfaces) -> ! {
    Dispatcher::new(&POOL, &COMMANDS, &UI_MODE, surfaces)
        .run()
        .await
}

#[embassy_executor::task]
async fn ticker_task() -> ! {
    actors::ticker_actor(&COMMANDS).await
}

// ═══════════════════════════════════════════════════════════════════════════
// Startup
// ═══════════════════════════════════════════════════════════════════════════

/// Everything the tasks need, built before any of them runs.
struct Board {
    entry: ActiveLowButton,
    exit: ActiveLowButton,
    reset: AnyPin,
    surfaces: &'static BoardSurfaces,
    buzzer: &'static BoardBuzzer,
}

struct LedPins {
    red: AnyPin,
    green: AnyPin,
    blue: AnyPin,
}

fn setup(
    bus: StatusBus,
    ws: Ws2812,
    pwm: Pwm<'static>,
    led: LedPins,
    entry: AnyPin,
    exit: AnyPin,
    reset: AnyPin,
) -> Result<Board, Error> {
    let oled = Oled::init(bus)?;
    let surfaces = Surfaces::new(
        oled,
        RgbLed::new(led.red, led.green, led.blue),
        LedMatrix::new(ws),
    );
    let surfaces = SURFACES
        .try_init(SharedSurfaces::new(surfaces))
        .ok_or(InitError::Surfaces)?;
    let buzzer = BUZZER
        .try_init(SharedBuzzer::new(PwmBuzzer::new(pwm)))
        .ok_or(InitError::Buzzer)?;

    Ok(Board {
        entry: ActiveLowButton::new(entry),
        exit: ActiveLowButton::new(exit),
        reset,
        surfaces,
        buzzer,
    })
}

fn spawn_priority_tasks(high: SendSpawner, medium: SendSpawner, board: Board) -> Result<(), Error> {
    high.spawn(reset_edge_task(board.reset))
        .map_err(|_| Error::Spawn)?;
    high.spawn(reset_task(board.buzzer))
        .map_err(|_| Error::Spawn)?;
    // Dispatcher first so its startup frame goes out before any input is read.
    medium
        .spawn(dispatcher_task(board.surfaces))
        .map_err(|_| Error::Spawn)?;
    medium
        .spawn(entry_task(board.entry, board.buzzer))
        .map_err(|_| Error::Spawn)?;
    medium.spawn(exit_task(board.exit)).map_err(|_| Error::Spawn)?;
    Ok(())
}

fn spawn_background_tasks(spawner: Spawner) {
    if spawner.spawn(ticker_task()).is_err() {
        error!("Failed to spawn ticker task");
    }
}

/// Log a fatal startup error and sleep forever.
fn halt(e: Error) -> ! {
    error!("Startup failed: {}", e);
    loop {
        cortex_m::asm::wfi();
    }
}

#[entry]
fn main() -> ! {
    info!("occupancy-gate starting");
    let p = embassy_rp::init(Default::default());

    // 5×5 matrix: PIO0 SM0 + DMA channel 0 on GPIO7
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);

    // OLED on I2C1 (SCL GPIO15, SDA GPIO14)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = OLED_I2C_FREQUENCY;
    let bus = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);

    // Buzzer on PWM slice 5 channel A (GPIO10)
    let pwm = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, pwm::Config::default());

    let led = LedPins {
        red: p.PIN_13.into(),
        green: p.PIN_11.into(),
        blue: p.PIN_12.into(),
    };

    let board = match setup(
        bus,
        ws,
        pwm,
        led,
        p.PIN_5.into(),
        p.PIN_6.into(),
        p.PIN_22.into(),
    ) {
        Ok(board) => board,
        Err(e) => halt(e),
    };

    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    interrupt::SWI_IRQ_0.set_priority(Priority::P2);
    let medium = EXECUTOR_MED.start(interrupt::SWI_IRQ_0);

    if let Err(e) = spawn_priority_tasks(high, medium, board) {
        halt(e);
    }
    info!("Actors running, capacity {}", CAPACITY);

    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(spawn_background_tasks)
}
