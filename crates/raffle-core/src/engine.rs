use crate::constants::INLINE_FRAME_ROWS;
use crate::easing::CubicBezier;
use crate::error::SpinError;
use crate::participant::{Participant, SpinRequest};
use crate::reel::ReelWindow;
use crate::settings::{ReelLayout, SpinnerSettings, ThemeConfig};
use crate::ticket::TicketIndex;
use smallvec::SmallVec;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelState {
    Idle,
    Spinning,
    Landed,
    /// Passed through while a rejected spin reports its error; never a resting state.
    Error,
}

/// Result of one [`SpinEngine::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Nothing in flight; the host can stop scheduling frames.
    Idle,
    /// Frame belongs to a cancelled or superseded spin and was ignored.
    Stale,
    Running { progress: f64 },
    /// This frame landed the reel and `on_spin_complete` has fired.
    Landed,
}

/// What the paint callback draws for one frame.
///
/// `rows` run top to bottom. The first row's top edge sits at
/// `first_row_y_px` (zero or negative, overscan rows included) and each row
/// is `item_height_px` tall; `pointer_index` is the row under the pointer.
/// `first_row_distance` counts rows from the first row down to the winner
/// (negative once the first row is past it), which painters can use for
/// stripes that travel with the entries.
#[derive(Clone, Debug)]
pub struct ReelFrame<'a> {
    pub rows: SmallVec<[&'a Participant; INLINE_FRAME_ROWS]>,
    pub first_row_y_px: f64,
    pub first_row_distance: i64,
    pub item_height_px: f64,
    pub visible_rows: usize,
    pub pointer_index: usize,
    pub scroll_offset_px: f64,
    pub total_distance_px: f64,
    pub progress: f64,
    pub landed: bool,
}

impl<'a> ReelFrame<'a> {
    pub fn pointer_participant(&self) -> Option<&'a Participant> {
        self.rows.get(self.pointer_index).copied()
    }

    /// Top edge of row `i`, in viewport pixels.
    pub fn row_y_px(&self, i: usize) -> f64 {
        self.first_row_y_px + i as f64 * self.item_height_px
    }
}

type CompleteFn = Box<dyn FnMut(&Participant)>;
type ErrorFn = Box<dyn FnMut(&SpinError)>;
type FrameFn = Box<dyn FnMut(&ReelFrame<'_>, &ThemeConfig) -> anyhow::Result<()>>;
type StateFn = Box<dyn FnMut(WheelState)>;

struct SpinCallbacks {
    on_spin_complete: CompleteFn,
    on_error: ErrorFn,
    on_frame: FrameFn,
    on_state_change: StateFn,
}

impl Default for SpinCallbacks {
    fn default() -> Self {
        Self {
            on_spin_complete: Box::new(|_| {}),
            on_error: Box::new(|_| {}),
            on_frame: Box::new(|_, _| Ok(())),
            on_state_change: Box::new(|_| {}),
        }
    }
}

/// Transient state of the spin in flight. Dropped on landing, cancel or reset.
struct ActiveSpin {
    roster: Rc<[Participant]>,
    target: usize,
    window: ReelWindow,
    curve: CubicBezier,
    layout: ReelLayout,
    total_distance_px: f64,
    duration_ms: f64,
    start_ms: Option<f64>,
    frames: u64,
    render_faults: u32,
}

impl ActiveSpin {
    fn plan(
        roster: Rc<[Participant]>,
        target: usize,
        settings: &SpinnerSettings,
        layout: ReelLayout,
    ) -> Result<Self, SpinError> {
        let pointer_rows = layout.pointer_row();
        let total_rows = settings.spin_rotations as usize * layout.items_per_rotation() + pointer_rows;
        // Target plus every entry up to the top row of the starting viewport
        let window = ReelWindow::build(roster.len(), target, total_rows + pointer_rows + 1)
            .ok_or(SpinError::EmptyRoster)?;
        Ok(Self {
            roster,
            target,
            window,
            curve: CubicBezier::new(settings.bezier_curve),
            layout,
            total_distance_px: total_rows as f64 * layout.item_height_px,
            duration_ms: settings.duration_ms(),
            start_ms: None,
            frames: 0,
            render_faults: 0,
        })
    }

    /// Normalized time for a frame at `now_ms`; the first frame starts the clock.
    fn time_at(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        let elapsed = now_ms - start;
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration_ms).clamp(0.0, 1.0)
    }

    fn frame_at(&mut self, scroll_offset_px: f64, progress: f64, landed: bool) -> ReelFrame<'_> {
        let h = self.layout.item_height_px;
        let pointer = self.layout.pointer_row() as i64;
        let visible = self.layout.visible_rows as i64;
        let overscan = self.layout.overscan_rows as i64;

        let rows_to_land = ((self.total_distance_px - scroll_offset_px) / h).max(0.0);
        let base = rows_to_land.floor() as i64;
        let top = base + pointer + 1 + overscan;
        let bottom = base - (visible - 1 - pointer) - overscan;
        self.window.ensure_distance(top as usize);

        let under_pointer = (rows_to_land - 0.5).ceil() as i64;
        let roster: &[Participant] = &self.roster;
        let window = &self.window;
        let rows = (bottom..=top)
            .rev()
            .filter_map(|e| window.at_distance(e))
            .filter_map(|i| roster.get(i))
            .collect::<SmallVec<[&Participant; INLINE_FRAME_ROWS]>>();

        ReelFrame {
            rows,
            first_row_y_px: (pointer - top) as f64 * h + rows_to_land * h,
            first_row_distance: top,
            item_height_px: h,
            visible_rows: self.layout.visible_rows,
            pointer_index: (top - under_pointer).max(0) as usize,
            scroll_offset_px,
            total_distance_px: self.total_distance_px,
            progress,
            landed,
        }
    }

    /// Paint one frame, isolating paint failures. Returns the error to
    /// report, which is only the first fault of the spin.
    fn paint(
        &mut self,
        scroll_offset_px: f64,
        progress: f64,
        landed: bool,
        theme: &ThemeConfig,
        on_frame: &mut FrameFn,
    ) -> Option<SpinError> {
        self.frames += 1;
        let result = {
            let frame = self.frame_at(scroll_offset_px, progress, landed);
            on_frame(&frame, theme)
        };
        match result {
            Ok(()) => None,
            Err(e) => {
                self.render_faults += 1;
                log::warn!(
                    "[spin] paint failed on frame {} ({} so far): {:#}",
                    self.frames,
                    self.render_faults,
                    e
                );
                (self.render_faults == 1).then(|| SpinError::RenderCallbackFault(format!("{e:#}")))
            }
        }
    }
}

/// The reel engine: one per spinner, at most one spin in flight.
///
/// ```text
/// Idle --spin--> Spinning --t >= 1--> Landed --reset--> Idle
///   \--spin fails--> Error --> Idle      Spinning --cancel/reset--> Idle
/// ```
///
/// Callbacks run while the engine is mutably borrowed and must not call
/// back into it; queue the event and act after the call returns.
pub struct SpinEngine {
    settings: SpinnerSettings,
    theme: ThemeConfig,
    roster: Rc<[Participant]>,
    index: TicketIndex,
    state: WheelState,
    generation: u64,
    active: Option<ActiveSpin>,
    landed: Option<(Rc<[Participant]>, usize)>,
    callbacks: SpinCallbacks,
}

impl Default for SpinEngine {
    fn default() -> Self {
        Self::new(SpinnerSettings::default(), ThemeConfig::default())
    }
}

impl SpinEngine {
    pub fn new(settings: SpinnerSettings, theme: ThemeConfig) -> Self {
        Self {
            settings,
            theme: theme.sanitized(),
            roster: Rc::from(Vec::new()),
            index: TicketIndex::default(),
            state: WheelState::Idle,
            generation: 0,
            active: None,
            landed: None,
            callbacks: SpinCallbacks::default(),
        }
    }

    pub fn set_on_spin_complete(&mut self, f: impl FnMut(&Participant) + 'static) {
        self.callbacks.on_spin_complete = Box::new(f);
    }

    pub fn set_on_error(&mut self, f: impl FnMut(&SpinError) + 'static) {
        self.callbacks.on_error = Box::new(f);
    }

    pub fn set_on_frame(
        &mut self,
        f: impl FnMut(&ReelFrame<'_>, &ThemeConfig) -> anyhow::Result<()> + 'static,
    ) {
        self.callbacks.on_frame = Box::new(f);
    }

    pub fn set_on_state_change(&mut self, f: impl FnMut(WheelState) + 'static) {
        self.callbacks.on_state_change = Box::new(f);
    }

    /// Replace the roster. A spin already in flight keeps the list it started with.
    pub fn set_participants(&mut self, participants: impl Into<Rc<[Participant]>>) {
        let roster = participants.into();
        self.index = TicketIndex::build(&roster);
        log::info!(
            "[roster] {} participants, {} distinct tickets",
            roster.len(),
            self.index.len()
        );
        self.roster = roster;
    }

    /// Settings are checked when a spin starts, not here.
    pub fn set_settings(&mut self, settings: SpinnerSettings) {
        self.settings = settings;
    }

    /// Colors apply from the next frame; layout changes apply from the next spin.
    pub fn set_theme(&mut self, theme: ThemeConfig) {
        self.theme = theme.sanitized();
    }

    pub fn participants(&self) -> &Rc<[Participant]> {
        &self.roster
    }

    pub fn settings(&self) -> &SpinnerSettings {
        &self.settings
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == WheelState::Spinning
    }

    /// Token to capture when scheduling a frame and hand back to [`tick`](Self::tick).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Winner of the last landed spin, until reset.
    pub fn winner(&self) -> Option<&Participant> {
        self.landed
            .as_ref()
            .and_then(|(roster, i)| roster.get(*i))
    }

    /// Start a spin towards `raw_ticket`.
    ///
    /// Only accepted while `Idle`; otherwise nothing happens and
    /// `AlreadySpinning` is returned without firing any callback. Resolution
    /// and settings failures fire `on_error` before returning and leave the
    /// engine `Idle`. On success returns the generation of the new spin.
    pub fn spin(&mut self, raw_ticket: &str) -> Result<u64, SpinError> {
        if self.state != WheelState::Idle {
            log::debug!(
                "[spin] ignoring request for '{}' while {:?}",
                raw_ticket,
                self.state
            );
            return Err(SpinError::AlreadySpinning);
        }
        match self.plan(raw_ticket) {
            Ok(spin) => {
                self.generation += 1;
                log::info!(
                    "[spin] #{} -> {} (index {} of {}), {:.0}px over {:.0}ms, window {}",
                    self.generation,
                    spin.roster[spin.target],
                    spin.target,
                    spin.roster.len(),
                    spin.total_distance_px,
                    spin.duration_ms,
                    spin.window.len()
                );
                self.landed = None;
                self.active = Some(spin);
                self.set_state(WheelState::Spinning);
                Ok(self.generation)
            }
            Err(e) => {
                log::info!("[spin] rejected '{}': {}", raw_ticket, e);
                self.set_state(WheelState::Error);
                (self.callbacks.on_error)(&e);
                self.set_state(WheelState::Idle);
                Err(e)
            }
        }
    }

    /// Swap in the request's roster, then spin.
    pub fn spin_request(&mut self, request: SpinRequest) -> Result<u64, SpinError> {
        if self.state != WheelState::Idle {
            return Err(SpinError::AlreadySpinning);
        }
        self.set_participants(request.participants);
        self.spin(&request.target_ticket_number)
    }

    fn plan(&self, raw_ticket: &str) -> Result<ActiveSpin, SpinError> {
        let settings = self.settings.sanitized()?;
        if self.roster.is_empty() {
            return Err(SpinError::EmptyRoster);
        }
        let target = self.index.resolve(raw_ticket)?;
        ActiveSpin::plan(self.roster.clone(), target, &settings, self.theme.layout)
    }

    /// Advance the spin scheduled under `generation` to `now_ms`.
    pub fn tick(&mut self, generation: u64, now_ms: f64) -> TickOutcome {
        if generation != self.generation {
            return TickOutcome::Stale;
        }
        let Some(spin) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };

        let t = spin.time_at(now_ms);
        let landed = t >= 1.0;
        let (progress, offset) = if landed {
            // Snap exactly onto the winner
            (1.0, spin.total_distance_px)
        } else {
            let p = spin.curve.evaluate(t);
            (p, p * spin.total_distance_px)
        };

        let fault = spin.paint(
            offset,
            progress,
            landed,
            &self.theme,
            &mut self.callbacks.on_frame,
        );
        if let Some(err) = fault {
            (self.callbacks.on_error)(&err);
        }

        if landed {
            self.land()
        } else {
            TickOutcome::Running { progress }
        }
    }

    fn land(&mut self) -> TickOutcome {
        let Some(spin) = self.active.take() else {
            return TickOutcome::Idle;
        };
        log::info!(
            "[spin] #{} landed after {} frames, window {} entries",
            self.generation,
            spin.frames,
            spin.window.len()
        );
        self.landed = Some((spin.roster.clone(), spin.target));
        self.set_state(WheelState::Landed);
        if let Some(winner) = spin.roster.get(spin.target) {
            (self.callbacks.on_spin_complete)(winner);
        }
        TickOutcome::Landed
    }

    /// Abort the spin in flight without firing `on_spin_complete`.
    /// Returns whether there was anything to cancel.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        if self.active.take().is_none() {
            return false;
        }
        log::info!("[spin] cancelled; generation now {}", self.generation);
        self.set_state(WheelState::Idle);
        true
    }

    /// Back to `Idle`, discarding any spin in flight and the last winner.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.active = None;
        self.landed = None;
        self.set_state(WheelState::Idle);
    }

    fn set_state(&mut self, next: WheelState) {
        if self.state == next {
            return;
        }
        log::debug!("[spin] state {:?} -> {:?}", self.state, next);
        self.state = next;
        (self.callbacks.on_state_change)(next);
    }
}
