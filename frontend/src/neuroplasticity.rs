//! Neuroplasticity: practice strengthens a synapse, disuse weakens both

use crate::dataflow::{Actor, relay};
use crate::dom::{self, PageLookup};
use futures::{StreamExt, select};
use shared::plasticity::INITIAL_STATUS;
use shared::{
    Neuron, PlasticityAction, PlasticityConfig, PlasticityOutcome, SetupError, SynapseAppearance,
    SynapseId, SynapseNetwork, SynapseStrengths, connector_span,
};
use web_sys::{Element, HtmlElement, ResizeObserver};
use zoon::{Mutable, MutableExt, Signal, SignalExt, Task, TaskHandle, Timer};

const SIMULATION: &str = "Neuroplasticity";

#[derive(Clone, Debug)]
pub struct PlasticityFrame {
    pub network: SynapseNetwork,
    /// Most recent action result, numbered so each one animates exactly once.
    pub last_outcome: Option<(u32, PlasticityOutcome)>,
    pub status: &'static str,
    pub layout_epoch: u32,
}

pub struct Neuroplasticity {
    frame: Actor<PlasticityFrame>,
    _render: TaskHandle,
    _resize_observer: ResizeObserver,
}

struct SynapseView {
    /// Connector strip laid between the two neurons.
    container: HtmlElement,
    line: HtmlElement,
    strength_display: Element,
}

struct NetworkView {
    viz_container: HtmlElement,
    status: Element,
    neurons: [(Neuron, Element); 3],
    synapses: [(SynapseId, SynapseView); 2],
    flash_ms: u32,
}

impl NetworkView {
    fn bind(lookup: &PageLookup, flash_ms: u32) -> Result<Self, SetupError> {
        let synapse = |container_id: &str, line_id: &str, display_id: &str| {
            Ok::<_, SetupError>(SynapseView {
                container: lookup.required(container_id)?,
                line: lookup.required(line_id)?,
                strength_display: lookup.required(display_id)?,
            })
        };
        Ok(NetworkView {
            viz_container: lookup.required("neuroplasticity-viz-container")?,
            status: lookup.required("neuroplasticityStatus")?,
            neurons: [
                (Neuron::N1, lookup.required("neuron1")?),
                (Neuron::N2, lookup.required("neuron2")?),
                (Neuron::N3, lookup.required("neuron3")?),
            ],
            synapses: [
                (SynapseId::OneTwo, synapse("sContainer12", "synapse12", "strength12Display")?),
                (SynapseId::TwoThree, synapse("sContainer23", "synapse23", "strength23Display")?),
            ],
            flash_ms,
        })
    }

    fn neuron(&self, key: Neuron) -> Option<&Element> {
        self.neurons
            .iter()
            .find(|(neuron, _)| *neuron == key)
            .map(|(_, element)| element)
    }

    fn synapse(&self, key: SynapseId) -> Option<&SynapseView> {
        self.synapses
            .iter()
            .find(|(synapse, _)| *synapse == key)
            .map(|(_, view)| view)
    }

    fn render(&self, frame: &PlasticityFrame) {
        self.lay_out_connectors();
        for (id, synapse) in &self.synapses {
            let appearance = SynapseAppearance::for_strength(frame.network.strength(*id));
            dom::set_px(&synapse.line, "height", f64::from(appearance.height_px));
            dom::set_style(&synapse.line, "background-color", appearance.color);
            dom::set_text(&synapse.strength_display, &appearance.label);
        }
        dom::set_text(&self.status, frame.status);
    }

    fn lay_out_connectors(&self) {
        let container = dom::client_rect(&self.viz_container);
        for (id, synapse) in &self.synapses {
            let (from, to) = id.neurons();
            let (Some(start), Some(end)) = (self.neuron(from), self.neuron(to)) else {
                continue;
            };
            let height = f64::from(synapse.container.offset_height());
            let span = connector_span(
                &dom::client_rect(start),
                &dom::client_rect(end),
                &container,
                height,
            );
            if let Some(span) = span {
                dom::set_px(&synapse.container, "top", span.top);
                dom::set_px(&synapse.container, "left", span.left);
                dom::set_px(&synapse.container, "width", span.width);
            }
        }
    }

    fn animate(&self, outcome: &PlasticityOutcome) {
        let fired: Vec<Element> = outcome
            .fired
            .iter()
            .filter_map(|neuron| self.neuron(*neuron).cloned())
            .collect();
        if !fired.is_empty() {
            for neuron in &fired {
                dom::toggle_class(neuron, "active", true);
            }
            let flash_ms = self.flash_ms;
            Task::start(async move {
                Timer::sleep(flash_ms).await;
                for neuron in &fired {
                    dom::toggle_class(neuron, "active", false);
                }
            });
        }

        if let Some(synapse) = outcome.activity.and_then(|id| self.synapse(id)) {
            show_synaptic_activity(&synapse.container);
        }
    }
}

/// Transient dot travelling along a connector, removed when its CSS
/// animation ends.
fn show_synaptic_activity(connector: &Element) {
    let Some(document) = connector.owner_document() else {
        return;
    };
    let Ok(dot) = document.create_element("div") else {
        return;
    };
    dot.class_list().add_1("synaptic-activity-effect").ok();
    if connector.append_child(&dot).is_err() {
        return;
    }
    let finished = dot.clone();
    dom::on_event_once(&dot, "animationend", move || finished.remove());
}

fn apply_action(state: &Mutable<PlasticityFrame>, sequence: &mut u32, action: PlasticityAction) {
    *sequence = sequence.wrapping_add(1);
    let sequence = *sequence;
    state.update_mut(|frame| {
        let outcome = frame.network.apply(action);
        frame.status = outcome.status;
        frame.last_outcome = Some((sequence, outcome));
    });
}

impl Neuroplasticity {
    pub fn mount(config: &PlasticityConfig) -> Result<Self, SetupError> {
        let lookup = PageLookup::new(SIMULATION)?;
        let view = NetworkView::bind(&lookup, config.neuron_flash_ms)?;
        let buttons: [(PlasticityAction, HtmlElement); 3] = [
            (PlasticityAction::PracticeA, lookup.required("practiceTaskABtn")?),
            (PlasticityAction::PracticeB, lookup.required("practiceTaskBBtn")?),
            (PlasticityAction::Disuse, lookup.required("simulateDisuseBtn")?),
        ];
        let viz_container = view.viz_container.clone();

        let (practice_a_clicked_relay, mut practice_a_clicked_stream) = relay::<()>();
        let (practice_b_clicked_relay, mut practice_b_clicked_stream) = relay::<()>();
        let (disuse_clicked_relay, mut disuse_clicked_stream) = relay::<()>();
        let (container_resized_relay, mut container_resized_stream) = relay::<()>();

        let initial = PlasticityFrame {
            network: SynapseNetwork::new(config.clone()),
            last_outcome: None,
            status: INITIAL_STATUS,
            layout_epoch: 0,
        };
        let frame = Actor::new(initial, async move |state| {
            let mut sequence = 0u32;
            loop {
                select! {
                    event = practice_a_clicked_stream.next() => {
                        match event {
                            Some(()) => apply_action(&state, &mut sequence, PlasticityAction::PracticeA),
                            None => {}
                        }
                    }
                    event = practice_b_clicked_stream.next() => {
                        match event {
                            Some(()) => apply_action(&state, &mut sequence, PlasticityAction::PracticeB),
                            None => {}
                        }
                    }
                    event = disuse_clicked_stream.next() => {
                        match event {
                            Some(()) => apply_action(&state, &mut sequence, PlasticityAction::Disuse),
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

        let mut animated = None;
        let render = Task::start_droppable(frame.signal().for_each(move |current| {
            view.render(&current);
            if let Some((sequence, outcome)) = &current.last_outcome {
                if animated != Some(*sequence) {
                    animated = Some(*sequence);
                    view.animate(outcome);
                }
            }
            async {}
        }));

        for (action, button) in buttons {
            let relay = match action {
                PlasticityAction::PracticeA => practice_a_clicked_relay.clone(),
                PlasticityAction::PracticeB => practice_b_clicked_relay.clone(),
                PlasticityAction::Disuse => disuse_clicked_relay.clone(),
            };
            dom::on_event(&button, "click", move |_| relay.send(()));
        }

        let resize_observer = dom::observe_resize(&viz_container, move || {
            container_resized_relay.send(());
        })
        .map_err(|_| SetupError::unsupported(SIMULATION, "ResizeObserver"))?;

        zoon::println!(
            "[{SIMULATION}] mounted, strengths {}..={} starting at {}",
            config.min_strength,
            config.max_strength,
            config.initial_strength
        );
        Ok(Neuroplasticity {
            frame,
            _render: render,
            _resize_observer: resize_observer,
        })
    }

    pub fn strengths_signal(&self) -> impl Signal<Item = SynapseStrengths> + use<> {
        self.frame.signal_ref(|frame| frame.network.strengths())
    }
}
