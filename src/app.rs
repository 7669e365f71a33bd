use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing::{debug, info, warn};

use crate::event::{Redraw, Shutdown};
use crate::frame::{Frame, LayoutProfile};
use crate::frame::builder::FrameBuilder;
use crate::system::CaptureError;
use crate::system::aggregator::Aggregator;
use crate::system::provider::MetricsProvider;
use crate::system::snapshot::Snapshot;
use crate::ui::Renderer;

/// Sleep between ticks. Sampling time comes on top of this.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const SHUTDOWN_MESSAGE: &str = "Monitor stopped.";

/// Printed before the first frame.
pub fn startup_message(profile: LayoutProfile) -> &'static str {
    match profile {
        LayoutProfile::Plain | LayoutProfile::Bars => "Starting System Monitor...",
        LayoutProfile::ControlPanel => "Initializing System Control Panel...",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Drives sample, build, render, sleep until shutdown is requested.
pub struct RefreshLoop<P, R> {
    aggregator: Aggregator<P>,
    builder: FrameBuilder,
    renderer: R,
    period: Duration,
    state: LoopState,
    previous: Option<Frame>,
    redraw: Option<Redraw>,
    degraded: bool,
    frames_drawn: u64,
}

impl<P, R> RefreshLoop<P, R>
where
    P: MetricsProvider,
    R: Renderer,
{
    pub fn new(aggregator: Aggregator<P>, builder: FrameBuilder, renderer: R) -> Self {
        RefreshLoop {
            aggregator,
            builder,
            renderer,
            period: TICK_PERIOD,
            state: LoopState::Idle,
            previous: None,
            redraw: None,
            degraded: false,
            frames_drawn: 0,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Requests on `redraw` force the next frame to be drawn even if unchanged.
    pub fn with_redraw(mut self, redraw: Redraw) -> Self {
        self.redraw = Some(redraw);
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Frames handed to the renderer. Repeated identical frames are not counted.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Run until `shutdown` fires, then emit the shutdown message once.
    /// Capture failures never end the loop; a renderer error does.
    pub async fn run(&mut self, mut shutdown: Shutdown) -> Result<()> {
        if self.state != LoopState::Idle {
            return Err(eyre!("refresh loop already ran"));
        }
        self.state = LoopState::Running;
        info!(
            profile = self.builder.profile().label(),
            period_ms = self.period.as_millis() as u64,
            "refresh loop started"
        );

        let outcome = self.tick_until(&mut shutdown).await;

        self.state = LoopState::Stopped;
        let finished = self.renderer.finish(SHUTDOWN_MESSAGE);
        info!(frames = self.frames_drawn, "refresh loop stopped");
        outcome.and(finished)
    }

    async fn tick_until(&mut self, shutdown: &mut Shutdown) -> Result<()> {
        loop {
            if shutdown.is_triggered() {
                return Ok(());
            }

            let captured = tokio::select! {
                biased;
                _ = shutdown.wait() => return Ok(()),
                captured = self.aggregator.capture() => captured,
            };
            // A frame sampled before cancellation is still dropped.
            if shutdown.is_triggered() {
                return Ok(());
            }

            let frame = self.next_frame(captured);
            self.present(frame)?;

            tokio::select! {
                biased;
                _ = shutdown.wait() => return Ok(()),
                _ = tokio::time::sleep(self.period) => {}
            }
        }
    }

    fn next_frame(&mut self, captured: Result<Snapshot, CaptureError>) -> Frame {
        match captured {
            Ok(snapshot) => {
                if self.degraded {
                    info!("metrics available again");
                    self.degraded = false;
                }
                self.builder.build(&snapshot)
            }
            Err(err) => {
                if !self.degraded {
                    warn!(error = %err, "capture failed, showing degraded frame");
                    self.degraded = true;
                }
                self.builder.degraded(&err.to_string())
            }
        }
    }

    fn present(&mut self, frame: Frame) -> Result<()> {
        if self.redraw.as_mut().is_some_and(Redraw::take) {
            debug!("redraw requested");
            self.previous = None;
        }
        if self.previous.as_ref() == Some(&frame) {
            debug!("frame unchanged, redraw skipped");
            return Ok(());
        }
        self.renderer.draw(&frame)?;
        self.frames_drawn += 1;
        self.previous = Some(frame);
        Ok(())
    }
}
