//! Cardiac circulation walkthrough
//!
//! A "next step" button moves the blood cell marker around the SVG heart and
//! the two conceptual organs. The first step is taken automatically once the
//! page has painted, so the marker never sits at the container origin.

use crate::dataflow::{Actor, relay};
use crate::dom::{self, MountedTarget, PageLookup};
use futures::{StreamExt, select};
use shared::stage::{CONCEPTUAL_ORGAN_CLASS, MARKER_STATE_CLASSES};
use shared::{
    CirculationTarget, HighlightSet, Rect, SetupError, StageTable, StageTarget, StepTimeline,
    TimelinePosition, resolve_center, resolve_position,
};
use web_sys::{Element, HtmlElement, ResizeObserver, SvgGraphicsElement};
use zoon::{MutableExt, Signal, SignalExt, Task, TaskHandle};

const SIMULATION: &str = "Circulation";

/// SVG chamber ids: group preferred, single path as fallback.
const CHAMBER_SELECTORS: [(CirculationTarget, [&str; 2]); 4] = [
    (CirculationTarget::RightAtrium, ["#RightAtrium_group", "#RA_path"]),
    (CirculationTarget::RightVentricle, ["#RightVentricle_group", "#RV_path"]),
    (CirculationTarget::LeftAtrium, ["#LeftAtrium_group", "#LA_path"]),
    (CirculationTarget::LeftVentricle, ["#LeftVentricle_group", "#LV_path"]),
];

const CHAMBER_LABELS: [(CirculationTarget, &str); 4] = [
    (CirculationTarget::RightAtrium, "label-ra"),
    (CirculationTarget::LeftAtrium, "label-la"),
    (CirculationTarget::RightVentricle, "label-rv"),
    (CirculationTarget::LeftVentricle, "label-lv"),
];

/// Actor state: the timeline plus a counter bumped whenever the layout must
/// be measured again.
#[derive(Clone, Debug)]
pub struct CirculationFrame {
    pub timeline: StepTimeline<CirculationTarget>,
    pub layout_epoch: u32,
}

pub struct Circulation {
    frame: Actor<CirculationFrame>,
    _render: TaskHandle,
    _resize_observer: ResizeObserver,
}

struct CirculationView {
    container: HtmlElement,
    marker: HtmlElement,
    status: Element,
    targets: Vec<(CirculationTarget, MountedTarget)>,
    /// Targets that take a highlight class, decided once at mount.
    highlight_classes: Vec<(CirculationTarget, &'static str)>,
    labels: Vec<(CirculationTarget, HtmlElement)>,
}

impl CirculationView {
    fn bind(lookup: &PageLookup) -> Result<(Self, HtmlElement), SetupError> {
        let next_step_button: HtmlElement = lookup.required("nextStepBtnSvgHeart")?;
        let marker = lookup.required("bloodCellSvg")?;
        let status = lookup.required("circulatoryStatusSvgHeart")?;
        let container = lookup.required("circulatory-viz-container")?;
        let graphic: Element = lookup.required("svg-heart-diagram")?;
        let lungs: Element = lookup.required("css-lungs")?;
        let body: Element = lookup.required("css-body-tissues")?;

        let mut targets = vec![
            (CirculationTarget::Lungs, MountedTarget::Rect(lungs)),
            (CirculationTarget::BodyTissues, MountedTarget::Rect(body)),
        ];
        for (target, selectors) in CHAMBER_SELECTORS {
            let shape: SvgGraphicsElement = lookup.required_within(&graphic, &selectors)?;
            targets.push((
                target,
                MountedTarget::Shape {
                    shape,
                    graphic: graphic.clone(),
                },
            ));
        }

        let highlight_classes = targets
            .iter()
            .filter_map(|(target, mounted)| {
                let conceptual_organ = mounted.element().class_list().contains(CONCEPTUAL_ORGAN_CLASS);
                Some((*target, target.kind().highlight_class(conceptual_organ)?))
            })
            .collect();

        let labels = CHAMBER_LABELS
            .iter()
            .filter_map(|(target, id)| Some((*target, lookup.optional::<HtmlElement>(id)?)))
            .collect();

        let view = CirculationView {
            container,
            marker,
            status,
            targets,
            highlight_classes,
            labels,
        };
        Ok((view, next_step_button))
    }

    fn target(&self, key: CirculationTarget) -> Option<&MountedTarget> {
        self.targets
            .iter()
            .find(|(target, _)| *target == key)
            .map(|(_, mounted)| mounted)
    }

    fn highlight_class(&self, key: CirculationTarget) -> Option<&'static str> {
        self.highlight_classes
            .iter()
            .find(|(target, _)| *target == key)
            .map(|(_, class)| *class)
    }

    fn render(&self, highlights: &mut HighlightSet<CirculationTarget>, frame: &CirculationFrame) {
        let container = dom::client_rect(&self.container);
        self.position_labels(&container);

        let Some(step) = frame.timeline.current() else {
            return;
        };
        let stage = step.stage;

        let geometry = self.target(stage.target).and_then(MountedTarget::geometry);
        let placement = resolve_position(
            geometry.as_ref(),
            Some(&container),
            Some(dom::offset_size(&self.marker)),
        );
        if let Some(point) = placement.point() {
            dom::set_px(&self.marker, "left", point.x);
            dom::set_px(&self.marker, "top", point.y);
        }

        let state_class = stage.visual_state.marker_class();
        for class in MARKER_STATE_CLASSES {
            dom::toggle_class(&self.marker, class, state_class == Some(class));
        }

        for toggle in highlights.set_active([stage.target]) {
            if let (Some(mounted), Some(class)) = (self.target(toggle.key), self.highlight_class(toggle.key)) {
                dom::toggle_class(mounted.element(), class, toggle.active);
            }
        }

        dom::write_status(&self.status, &step.status());
    }

    fn position_labels(&self, container: &Rect) {
        for (target, label) in &self.labels {
            let geometry = self.target(*target).and_then(MountedTarget::geometry);
            match resolve_center(geometry.as_ref(), Some(container)) {
                Some(center) => {
                    dom::set_px(label, "left", center.x);
                    dom::set_px(label, "top", center.y);
                    dom::set_style(label, "display", "block");
                }
                None => dom::set_style(label, "display", "none"),
            }
        }
    }
}

impl Circulation {
    pub fn mount() -> Result<Self, SetupError> {
        let lookup = PageLookup::new(SIMULATION)?;
        let (view, next_step_button) = CirculationView::bind(&lookup)?;

        let (next_step_clicked_relay, mut next_step_clicked_stream) = relay::<()>();
        let (first_frame_painted_relay, mut first_frame_painted_stream) = relay::<()>();
        let (container_resized_relay, mut container_resized_stream) = relay::<()>();

        let initial = CirculationFrame {
            timeline: StepTimeline::new(StageTable::circulation()),
            layout_epoch: 0,
        };
        let frame = Actor::new(initial, async move |state| {
            loop {
                select! {
                    event = next_step_clicked_stream.next() => {
                        match event {
                            Some(()) => state.update_mut(|frame| {
                                frame.timeline.advance();
                            }),
                            None => {}
                        }
                    }
                    event = first_frame_painted_stream.next() => {
                        // The relay is dropped after its one callback.
                        match event {
                            Some(()) => state.update_mut(|frame| {
                                frame.timeline.advance();
                                dom::mark_layout_stale(&mut frame.layout_epoch);
                            }),
                            None => {}
                        }
                    }
                    event = container_resized_stream.next() => {
                        match event {
                            Some(()) => state.update_mut(|frame| {
                                dom::mark_layout_stale(&mut frame.layout_epoch);
                            }),
                            None => {}
                        }
                    }
                }
            }
        });

        let container = view.container.clone();
        let mut highlights = HighlightSet::new(CirculationTarget::ALL.iter().copied());
        let render = Task::start_droppable(frame.signal().for_each(move |current| {
            view.render(&mut highlights, &current);
            async {}
        }));

        dom::on_event(&next_step_button, "click", move |_| {
            next_step_clicked_relay.send(());
        });
        dom::next_frame(move || first_frame_painted_relay.send(()));

        let resize_observer = dom::observe_resize(&container, move || {
            dom::next_frame({
                let container_resized_relay = container_resized_relay.clone();
                move || container_resized_relay.send(())
            });
        })
        .map_err(|_| SetupError::unsupported(SIMULATION, "ResizeObserver"))?;

        zoon::println!("[{SIMULATION}] mounted with {} stages", StageTable::circulation().len());
        Ok(Circulation {
            frame,
            _render: render,
            _resize_observer: resize_observer,
        })
    }

    pub fn position_signal(&self) -> impl Signal<Item = TimelinePosition> + use<> {
        self.frame.signal_ref(|frame| frame.timeline.position())
    }
}
