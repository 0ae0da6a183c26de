//! Display dispatcher - the single consumer of the command queue.
//!
//! Each command flips a UI flag (or not) and triggers one render pass. A
//! render pass locks the surfaces for at most [`RENDER_LOCK_TIMEOUT_MS`];
//! if the lock is not free by then the pass is skipped and never retried.
//! That is safe because the next command re-reads live state anyway.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{with_timeout, Duration};

use super::frame::{self, Frame, MatrixImage, Screen, AVATAR_SIDE, BANNER_POS, BANNER_TEXT};
use super::glyphs::Matrix;
use super::{Band, Indicator, PixelMatrix, StatusSurface, UiMode};
use crate::command::{CommandQueue, DisplayCommand};
use crate::config::RENDER_LOCK_TIMEOUT_MS;
use crate::error::Error;
use crate::occupancy::OccupancyPool;

/// The three render targets, always updated together.
pub struct Surfaces<S, I, P> {
    pub status: S,
    pub indicator: I,
    pub matrix: Matrix<P>,
}

/// Surfaces behind the render lock.
pub type SharedSurfaces<S, I, P> = Mutex<CriticalSectionRawMutex, Surfaces<S, I, P>>;

impl<S, I, P> Surfaces<S, I, P>
where
    S: StatusSurface,
    I: Indicator,
    P: PixelMatrix,
{
    pub fn new(status: S, indicator: I, pixels: P) -> Self {
        Self {
            status,
            indicator,
            matrix: Matrix::new(pixels),
        }
    }

    /// Push `frame` to all three surfaces.
    pub async fn apply(&mut self, frame: &Frame) {
        self.status.clear();
        match &frame.screen {
            Screen::Stats { lines, banner } => {
                for (i, line) in lines.iter().enumerate() {
                    let (x, y) = frame::stats_line_origin(i);
                    self.status.draw_text(line.as_str(), x, y);
                }
                if *banner {
                    self.status.draw_text(BANNER_TEXT, BANNER_POS.0, BANNER_POS.1);
                }
            }
            Screen::Avatars { count } => {
                for i in 0..*count {
                    let (x, y) = frame::avatar_origin(i);
                    self.status
                        .fill_rect(x, y, AVATAR_SIDE as u32, AVATAR_SIDE as u32);
                }
            }
        }
        if let Err(e) = self.status.flush() {
            warn!("Status display flush failed: {}", e);
        }

        let led = frame.indicator;
        self.indicator.set(led.red, led.green, led.blue);

        match frame.matrix {
            MatrixImage::Pattern(rows, color) => self.matrix.draw_pattern(&rows, color).await,
            MatrixImage::Digit(digit, color) => self.matrix.draw_digit(digit, color).await,
        }
    }
}

/// Result of one render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOutcome {
    /// All surfaces were updated for this band.
    Rendered(Band),
    /// The surfaces were busy past the timeout; nothing was drawn.
    Skipped,
}

pub struct Dispatcher<'a, S, I, P> {
    pool: &'a OccupancyPool,
    queue: &'a CommandQueue,
    mode: &'a UiMode,
    surfaces: &'a SharedSurfaces<S, I, P>,
}

impl<'a, S, I, P> Dispatcher<'a, S, I, P>
where
    S: StatusSurface,
    I: Indicator,
    P: PixelMatrix,
{
    pub fn new(
        pool: &'a OccupancyPool,
        queue: &'a CommandQueue,
        mode: &'a UiMode,
        surfaces: &'a SharedSurfaces<S, I, P>,
    ) -> Self {
        Self {
            pool,
            queue,
            mode,
            surfaces,
        }
    }

    /// Render the startup frame, then drain the queue forever.
    pub async fn run(&self) -> ! {
        if let RenderOutcome::Rendered(band) = self.render_pass().await {
            info!("Display dispatcher started, initial band {}", band);
        }
        loop {
            let cmd = self.queue.dequeue().await;
            self.dispatch(cmd).await;
        }
    }

    /// Apply one command's flag change, then render.
    pub async fn dispatch(&self, cmd: DisplayCommand) -> RenderOutcome {
        match cmd {
            DisplayCommand::Refresh => {}
            DisplayCommand::ShowResetBanner => self.mode.set_banner(true),
            DisplayCommand::HideResetBanner => self.mode.set_banner(false),
            DisplayCommand::ToggleScreen => {
                self.mode.toggle_screen();
            }
        }
        self.render_pass().await
    }

    /// Render the current state, or skip if the surfaces stay busy too long.
    pub async fn render_pass(&self) -> RenderOutcome {
        match self.try_render().await {
            Ok(band) => RenderOutcome::Rendered(band),
            Err(e) => {
                debug!("Render pass skipped: {}", e);
                RenderOutcome::Skipped
            }
        }
    }

    async fn try_render(&self) -> Result<Band, Error> {
        let timeout = Duration::from_millis(RENDER_LOCK_TIMEOUT_MS);
        let mut surfaces = with_timeout(timeout, self.surfaces.lock()).await?;

        // Read state only once the lock is ours so the frame is as fresh as possible.
        let frame = Frame::compose(&self.pool.snapshot(), self.mode.snapshot());
        surfaces.apply(&frame).await;
        Ok(frame.band)
    }
}
