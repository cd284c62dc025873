//! Pain reflex arc
//!
//! "Apply stimulus" starts a timed run of the signal dot along the reflex
//! path. The run itself lives in [`ReflexArc`]; this module arms the dwell
//! timer it asks for and paints each frame.

use crate::dataflow::{Actor, relay};
use crate::dom::{self, MountedTarget, PageLookup};
use futures::future::{Fuse, FusedFuture, LocalBoxFuture};
use futures::{FutureExt, StreamExt, select};
use shared::{
    HighlightSet, MarkerState, ReflexArc, ReflexFrame, ReflexTarget, ReflexTiming, Scheduler,
    SetupError, StageTable, StageTarget, resolve_position,
};
use std::time::Duration;
use web_sys::{Element, HtmlButtonElement, HtmlElement, ResizeObserver};
use zoon::{MutableExt, Signal, SignalExt, Task, TaskHandle, Timer};

const SIMULATION: &str = "ReflexArc";

const PATH_ELEMENTS: [(ReflexTarget, &str); 5] = [
    (ReflexTarget::Stimulus, "stimulusPointEl"),
    (ReflexTarget::SensoryNeuron, "sensoryNeuronEl"),
    (ReflexTarget::SpinalCord, "spinalCordEl"),
    (ReflexTarget::MotorNeuron, "motorNeuronEl"),
    (ReflexTarget::EffectorMuscle, "effectorMuscleEl"),
];

/// [`Scheduler`] backed by a single pending `zoon::Timer`.
///
/// The actor loop selects on [`DwellTimer::elapsed`]; a terminated future is
/// skipped by `select!`, so an idle timer never fires.
struct DwellTimer {
    pending: Fuse<LocalBoxFuture<'static, ()>>,
}

impl DwellTimer {
    fn idle() -> Self {
        Self {
            pending: Fuse::terminated(),
        }
    }

    fn elapsed(&mut self) -> &mut Fuse<LocalBoxFuture<'static, ()>> {
        &mut self.pending
    }

    fn is_armed(&self) -> bool {
        !self.pending.is_terminated()
    }
}

impl Scheduler for DwellTimer {
    fn schedule_after(&mut self, delay: Duration) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        self.pending = Timer::sleep(millis).boxed_local().fuse();
    }
}

#[derive(Clone, Debug, Default)]
pub struct ReflexDisplay {
    pub frame: ReflexFrame,
    pub layout_epoch: u32,
}

pub struct Reflex {
    display: Actor<ReflexDisplay>,
    _render: TaskHandle,
    _resize_observer: ResizeObserver,
}

struct ReflexView {
    trigger: HtmlButtonElement,
    marker: HtmlElement,
    status: Element,
    container: HtmlElement,
    path: Vec<(ReflexTarget, MountedTarget)>,
}

impl ReflexView {
    fn bind(lookup: &PageLookup) -> Result<Self, SetupError> {
        let path = PATH_ELEMENTS
            .iter()
            .map(|(target, id)| Ok::<_, SetupError>((*target, MountedTarget::Rect(lookup.required(id)?))))
            .collect::<Result<Vec<_>, SetupError>>()?;
        Ok(ReflexView {
            trigger: lookup.required("applyStimulusBtn")?,
            marker: lookup.required("painSignalDot")?,
            status: lookup.required("painReactionStatus")?,
            container: lookup.required("reflex-arc-viz-container")?,
            path,
        })
    }

    fn target(&self, key: ReflexTarget) -> Option<&MountedTarget> {
        self.path
            .iter()
            .find(|(target, _)| *target == key)
            .map(|(_, mounted)| mounted)
    }

    fn render(&self, highlights: &mut HighlightSet<ReflexTarget>, frame: &ReflexFrame) {
        let toggles = if frame.active.is_none() {
            highlights.clear()
        } else {
            highlights.set_active(frame.active)
        };
        for toggle in toggles {
            if let Some(mounted) = self.target(toggle.key) {
                dom::toggle_class(mounted.element(), "active", toggle.active);
            }
        }

        match frame.marker {
            MarkerState::Over(target) => {
                let container = dom::client_rect(&self.container);
                let geometry = self.target(target).and_then(MountedTarget::geometry);
                let placement = resolve_position(
                    geometry.as_ref(),
                    Some(&container),
                    Some(dom::offset_size(&self.marker)),
                );
                if let Some(point) = placement.point() {
                    dom::set_px(&self.marker, "left", point.x);
                    dom::set_px(&self.marker, "top", point.y);
                }
                dom::set_style(&self.marker, "opacity", "1");
            }
            MarkerState::Hidden => dom::set_style(&self.marker, "opacity", "0"),
        }

        if let Some(status) = frame.status {
            dom::set_text(&self.status, status);
        }
        self.trigger.set_disabled(!frame.trigger_enabled);
    }
}

impl Reflex {
    pub fn mount(timing: ReflexTiming) -> Result<Self, SetupError> {
        let lookup = PageLookup::new(SIMULATION)?;
        let view = ReflexView::bind(&lookup)?;
        let trigger = view.trigger.clone();
        let container = view.container.clone();

        let (stimulus_applied_relay, mut stimulus_applied_stream) = relay::<()>();
        let (container_resized_relay, mut container_resized_stream) = relay::<()>();

        let display = Actor::new(ReflexDisplay::default(), async move |state| {
            let mut arc = ReflexArc::new(StageTable::reflex_arc(), timing);
            let mut timer = DwellTimer::idle();
            loop {
                select! {
                    event = stimulus_applied_stream.next() => {
                        match event {
                            Some(()) => match arc.trigger(&mut timer) {
                                Some(frame) => state.update_mut(|display| display.frame = frame),
                                None => zoon::println!("[{SIMULATION}] stimulus ignored, run in progress"),
                            },
                            None => {}
                        }
                    }
                    () = timer.elapsed() => {
                        let frame = arc.dwell_elapsed(&mut timer);
                        if !frame.phase.is_running() {
                            zoon::println!("[{SIMULATION}] run {} complete", arc.completed_runs());
                        }
                        debug_assert_eq!(frame.phase.is_running(), timer.is_armed());
                        state.update_mut(|display| display.frame = frame);
                    }
                    event = container_resized_stream.next() => {
                        match event {
                            Some(()) => state.update_mut(|display| {
                                dom::mark_layout_stale(&mut display.layout_epoch);
                            }),
                            None => {}
                        }
                    }
                }
            }
        });

        let mut highlights = HighlightSet::new(ReflexTarget::ALL.iter().copied());
        let render = Task::start_droppable(display.signal().for_each(move |current| {
            view.render(&mut highlights, &current.frame);
            async {}
        }));

        dom::on_event(&trigger, "click", move |_| {
            stimulus_applied_relay.send(());
        });

        let resize_observer = dom::observe_resize(&container, move || {
            container_resized_relay.send(());
        })
        .map_err(|_| SetupError::unsupported(SIMULATION, "ResizeObserver"))?;

        zoon::println!(
            "[{SIMULATION}] mounted, dwell {:?}, final hold {:?}",
            timing.dwell,
            timing.final_hold
        );
        Ok(Reflex {
            display,
            _render: render,
            _resize_observer: resize_observer,
        })
    }

    pub fn frame_signal(&self) -> impl Signal<Item = ReflexFrame> + use<> {
        self.display.signal_ref(|display| display.frame)
    }
}
