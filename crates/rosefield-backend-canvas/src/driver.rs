//! Animation driver.
//!
//! [`Animator`] owns the configuration and the [`AnimationState`] and
//! renders one frame per call. [`Driver`] adds the frame-scheduling
//! lifecycle on top of a [`FrameHost`], which stands in for the display's
//! "request next frame" / "cancel frame" primitives and viewport queries.
//!
//! Everything runs on one thread. Configuration changes land between frames
//! and are picked up by the next one.

use std::thread;
use std::time::{Duration, Instant};

use rosefield_spec::{Oscillation, Quantity, RoseConfig};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::frame::{resolve_frame, FrameState};
use crate::surface::DrawSurface;
use crate::synth::{synthesize, Point, SynthStats};

/// Simulation seconds added per rendered frame.
pub const CLOCK_STEP: f64 = 0.016;
/// Radians of global rotation added per rendered frame.
pub const ROTATION_STEP: f64 = 0.01;

/// Clock and rotation threaded through consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AnimationState {
    /// Simulation clock driving every oscillator.
    pub clock: f64,
    /// Global rotation angle in radians.
    pub rotation: f64,
    /// Number of frames rendered so far.
    pub frame: u64,
}

impl AnimationState {
    /// State at the start of a session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps past one rendered frame.
    pub fn advance(&mut self) {
        self.clock += CLOCK_STEP;
        self.rotation += ROTATION_STEP;
        self.frame += 1;
    }

    /// Steps past `frames` frames, matching `frames` calls to [`advance`](Self::advance).
    pub fn advance_by(&mut self, frames: u64) {
        for _ in 0..frames {
            self.advance();
        }
    }
}

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Curve origin for this viewport.
    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// What one rendered frame looked like.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    /// Zero-based index of the frame.
    pub frame: u64,
    /// Clock value the frame was resolved at.
    pub clock: f64,
    /// Rotation angle the frame was drawn at.
    pub rotation: f64,
    /// Resolved parameters.
    pub state: FrameState,
    /// Counts of what was drawn.
    pub stats: SynthStats,
}

/// Renders frames from a configuration and advancing state.
#[derive(Debug, Clone)]
pub struct Animator {
    config: RoseConfig,
    state: AnimationState,
}

impl Animator {
    /// Creates an animator at the start of a session.
    pub fn new(config: RoseConfig) -> Self {
        Self {
            config,
            state: AnimationState::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RoseConfig {
        &self.config
    }

    /// The current animation state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Replaces the configuration; the next frame reads it.
    pub fn apply_config(&mut self, config: RoseConfig) {
        self.config = config;
    }

    /// Replaces one quantity's oscillation group; the next frame reads it.
    pub fn set_oscillation(&mut self, quantity: Quantity, oscillation: Oscillation) {
        self.config.set_oscillation(quantity, oscillation);
    }

    /// Advances the state as if `frames` frames had been rendered.
    pub fn skip_frames(&mut self, frames: u64) {
        self.state.advance_by(frames);
    }

    /// Starts a new session from a zero clock.
    pub fn reset(&mut self) {
        self.state = AnimationState::new();
    }

    /// Resolves the frame state for the current clock without drawing.
    pub fn peek_frame(&self) -> FrameState {
        resolve_frame(&self.config, self.state.clock)
    }

    /// Clears the surface, draws one frame, and advances the state.
    ///
    /// Without a surface the call is a no-op and the state does not advance.
    pub fn render_frame(
        &mut self,
        surface: Option<&mut dyn DrawSurface>,
        viewport: Viewport,
    ) -> Option<FrameReport> {
        let Some(surface) = surface else {
            warn!(frame = self.state.frame, "no drawing surface attached, skipping frame");
            return None;
        };
        Some(self.render_onto(surface, viewport))
    }

    /// Like [`render_frame`](Self::render_frame) with a surface that is always present.
    pub fn render_onto(&mut self, surface: &mut dyn DrawSurface, viewport: Viewport) -> FrameReport {
        let state = resolve_frame(&self.config, self.state.clock);
        surface.clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
        let stats = synthesize(&state, viewport.center(), self.state.rotation, surface);

        let report = FrameReport {
            frame: self.state.frame,
            clock: self.state.clock,
            rotation: self.state.rotation,
            state,
            stats,
        };
        trace!(
            frame = report.frame,
            clock = report.clock,
            shapes = stats.shapes_drawn,
            curves = stats.curves_drawn,
            "rendered frame"
        );

        self.state.advance();
        report
    }
}

/// Opaque token for a requested display refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The environment a [`Driver`] schedules frames against.
pub trait FrameHost {
    /// Surface type frames are drawn onto.
    type Surface: DrawSurface;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;
    /// Requests the next refresh. `None` means no further frames will come.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Yields until the requested refresh. Returns false if it will never fire.
    fn wait_for_frame(&mut self, handle: FrameHandle) -> bool;
    /// Cancels a requested refresh.
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Starts delivering viewport changes.
    fn observe_resize(&mut self);
    /// Stops delivering viewport changes.
    fn unobserve_resize(&mut self);
    /// The drawing surface, if one is attached.
    fn surface(&mut self) -> Option<&mut Self::Surface>;
}

/// Errors from driver lifecycle calls.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("animation loop is already running")]
    AlreadyRunning,
}

/// Per-frame decision returned from [`Driver::run`]'s callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Result of one [`Driver::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A frame was drawn.
    Rendered(FrameReport),
    /// The refresh fired but no surface was attached.
    Skipped,
    /// The host will not grant further frames.
    Exhausted,
    /// The driver is not running.
    NotRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Stopped,
}

/// Repeat-forever frame loop over a [`FrameHost`].
///
/// Lifecycle: idle, running, stopped. Stopping cancels the pending refresh
/// and detaches resize observation; starting again after a stop begins a new
/// session from a zero clock.
pub struct Driver<H: FrameHost> {
    host: H,
    animator: Animator,
    phase: Phase,
    pending: Option<FrameHandle>,
    viewport: Option<Viewport>,
}

impl<H: FrameHost> Driver<H> {
    /// Creates an idle driver.
    pub fn new(host: H, config: RoseConfig) -> Self {
        Self {
            host,
            animator: Animator::new(config),
            phase: Phase::Idle,
            pending: None,
            viewport: None,
        }
    }

    /// Begins scheduling frames.
    pub fn start(&mut self) -> Result<(), DriverError> {
        match self.phase {
            Phase::Running => return Err(DriverError::AlreadyRunning),
            Phase::Stopped => self.animator.reset(),
            Phase::Idle => {}
        }

        self.host.observe_resize();
        self.viewport = None;
        self.phase = Phase::Running;
        debug!("animation loop started");
        Ok(())
    }

    /// Stops scheduling, cancelling any pending refresh.
    pub fn stop(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        self.host.unobserve_resize();
        self.phase = Phase::Stopped;
        debug!(frames = self.animator.state().frame, "animation loop stopped");
    }

    /// Whether frames are being scheduled.
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Waits for one refresh, renders it, and requests the next.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::NotRunning;
        }

        let handle = match self.pending.take().or_else(|| self.host.request_frame()) {
            Some(handle) => handle,
            None => return TickOutcome::Exhausted,
        };
        if !self.host.wait_for_frame(handle) {
            self.host.cancel_frame(handle);
            return TickOutcome::Exhausted;
        }

        let viewport = self.host.viewport();
        let resized = self.viewport != Some(viewport);
        let surface = self.host.surface().map(|s| {
            if resized {
                s.resize(viewport.width, viewport.height);
            }
            s as &mut dyn DrawSurface
        });
        if surface.is_some() && resized {
            debug!(width = viewport.width, height = viewport.height, "viewport resized");
            self.viewport = Some(viewport);
        }
        let report = self.animator.render_frame(surface, viewport);

        self.pending = self.host.request_frame();

        match report {
            Some(report) => TickOutcome::Rendered(report),
            None => TickOutcome::Skipped,
        }
    }

    /// Runs frames until the host runs out or `on_frame` returns [`LoopControl::Stop`].
    ///
    /// Starts the loop if it is not already running. Returns the number of
    /// frames rendered. The loop is stopped on every exit path.
    pub fn run<F, E>(&mut self, mut on_frame: F) -> Result<u64, E>
    where
        F: FnMut(&mut H, &FrameReport) -> Result<LoopControl, E>,
        E: From<DriverError>,
    {
        if !self.is_running() {
            self.start()?;
        }

        let mut rendered = 0;
        loop {
            match self.tick() {
                TickOutcome::Rendered(report) => {
                    rendered += 1;
                    match on_frame(&mut self.host, &report) {
                        Ok(LoopControl::Continue) => {}
                        Ok(LoopControl::Stop) => break,
                        Err(err) => {
                            self.stop();
                            return Err(err);
                        }
                    }
                }
                TickOutcome::Skipped => {}
                TickOutcome::Exhausted | TickOutcome::NotRunning => break,
            }
        }

        self.stop();
        Ok(rendered)
    }

    /// The animator, for configuration changes between frames.
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// The animator, mutably.
    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the driver, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }
}

/// A host without a display: fixed viewport, optional frame budget, and
/// optional wall-clock pacing.
#[derive(Debug)]
pub struct HeadlessHost<S> {
    surface: Option<S>,
    viewport: Viewport,
    frame_limit: Option<u64>,
    granted: u64,
    interval: Option<Duration>,
    deadline: Option<Instant>,
    observing: bool,
    cancelled: u64,
}

impl<S: DrawSurface> HeadlessHost<S> {
    /// Creates a host drawing onto `surface`.
    pub fn new(surface: S, viewport: Viewport) -> Self {
        Self {
            surface: Some(surface),
            ..Self::detached(viewport)
        }
    }

    /// Creates a host with no surface attached.
    pub fn detached(viewport: Viewport) -> Self {
        Self {
            surface: None,
            viewport,
            frame_limit: None,
            granted: 0,
            interval: None,
            deadline: None,
            observing: false,
            cancelled: 0,
        }
    }

    /// Grants at most `frames` refresh requests.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Paces refreshes to `fps` frames per wall-clock second.
    pub fn with_pacing(mut self, fps: f64) -> Self {
        if fps.is_finite() && fps > 0.0 {
            self.interval = Some(Duration::from_secs_f64(1.0 / fps));
        }
        self
    }

    /// Changes the viewport, as a window resize would.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Attaches a surface.
    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    /// Detaches and returns the surface.
    pub fn detach(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// The attached surface.
    pub fn surface_ref(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Whether resize observation is active.
    pub fn is_observing_resize(&self) -> bool {
        self.observing
    }

    /// Number of refreshes granted so far.
    pub fn frames_granted(&self) -> u64 {
        self.granted
    }

    /// Number of refreshes cancelled so far.
    pub fn frames_cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl<S: DrawSurface> FrameHost for HeadlessHost<S> {
    type Surface = S;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        if self.frame_limit.is_some_and(|limit| self.granted >= limit) {
            return None;
        }
        self.granted += 1;
        Some(FrameHandle(self.granted))
    }

    fn wait_for_frame(&mut self, _handle: FrameHandle) -> bool {
        if let Some(interval) = self.interval {
            let now = Instant::now();
            let deadline = self.deadline.unwrap_or(now);
            if deadline > now {
                thread::sleep(deadline - now);
            }
            // Fall back to "now" when running behind so lag does not accumulate.
            let next = deadline + interval;
            self.deadline = Some(if next < now { now + interval } else { next });
        }
        true
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {
        self.cancelled += 1;
    }

    fn observe_resize(&mut self) {
        self.observing = true;
    }

    fn unobserve_resize(&mut self) {
        self.observing = false;
    }

    fn surface(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }
}
