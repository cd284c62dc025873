//! Atherosclerosis slider and hypertension factor controls

use crate::dataflow::{Actor, relay};
use crate::dom::{self, PageLookup};
use futures::{StreamExt, select};
use shared::presentation::MAX_PLAQUE_LEVEL;
use shared::{PlaquePresentation, PressureFactors, SetupError};
use web_sys::{Element, HtmlElement, HtmlInputElement};
use zoon::{MutableExt, Signal, SignalExt, Task, TaskHandle};

// ===== ATHEROSCLEROSIS =====

const ATHEROSCLEROSIS: &str = "Atherosclerosis";

/// Slider position as a plaque level; anything unreadable counts as healthy.
fn slider_level(slider: &HtmlInputElement) -> u8 {
    let value = slider.value_as_number();
    if value.is_finite() {
        value.round().clamp(0.0, f64::from(MAX_PLAQUE_LEVEL)) as u8
    } else {
        0
    }
}

pub struct Atherosclerosis {
    level: Actor<u8>,
    _render: TaskHandle,
}

struct ArteryView {
    level_display: Element,
    lumen: Element,
    top_plaque: HtmlElement,
    bottom_plaque: HtmlElement,
    flow_text: HtmlElement,
    status: Element,
}

impl ArteryView {
    fn render(&self, level: u8) {
        let presentation = PlaquePresentation::for_level(level);
        dom::set_text(&self.level_display, &presentation.level_text);

        let plaque_height = presentation.plaque_height_px(f64::from(self.lumen.client_height()));
        dom::set_px(&self.top_plaque, "height", plaque_height);
        dom::set_px(&self.bottom_plaque, "height", plaque_height);

        dom::set_text(&self.status, &presentation.status);
        dom::set_text(&self.flow_text, presentation.flow_text);
        dom::set_style(&self.flow_text, "opacity", &presentation.flow_opacity.to_string());
    }
}

impl Atherosclerosis {
    pub fn mount() -> Result<Self, SetupError> {
        let lookup = PageLookup::new(ATHEROSCLEROSIS)?;
        let slider: HtmlInputElement = lookup.required("plaqueLevelSlider")?;
        let view = ArteryView {
            level_display: lookup.required("plaqueLevelDisplay")?,
            lumen: lookup.required_selector(".artery-lumen-athero")?,
            top_plaque: lookup.required("topPlaque")?,
            bottom_plaque: lookup.required("bottomPlaque")?,
            flow_text: lookup.required("atheroBloodFlowText")?,
            status: lookup.required("atherosclerosisStatus")?,
        };

        let (plaque_level_changed_relay, mut plaque_level_changed_stream) = relay::<u8>();

        let level = Actor::new(slider_level(&slider), async move |state| {
            while let Some(level) = plaque_level_changed_stream.next().await {
                state.set(level.min(MAX_PLAQUE_LEVEL));
            }
        });

        let render = Task::start_droppable(level.signal().for_each(move |level| {
            view.render(level);
            async {}
        }));

        let input = slider.clone();
        dom::on_event(&slider, "input", move |_| {
            plaque_level_changed_relay.send(slider_level(&input));
        });

        zoon::println!("[{ATHEROSCLEROSIS}] mounted");
        Ok(Atherosclerosis {
            level,
            _render: render,
        })
    }

    pub fn level_signal(&self) -> impl Signal<Item = u8> + use<> {
        self.level.signal()
    }
}

// ===== HYPERTENSION =====

const HYPERTENSION: &str = "Hypertension";

#[derive(Clone, Copy, Debug)]
enum FactorControl {
    Constrict,
    IncreaseVolume,
    Reset,
}

pub struct Hypertension {
    factors: Actor<PressureFactors>,
    _render: TaskHandle,
}

struct VesselView {
    pressure_display: Element,
    lumen: HtmlElement,
    flow_text: Element,
    status: Element,
}

impl VesselView {
    fn render(&self, factors: PressureFactors) {
        let category = factors.category();
        dom::set_text(&self.pressure_display, &category.display_text());
        dom::set_style(
            &self.lumen,
            "width",
            &format!("{}%", category.lumen_width_percent()),
        );
        dom::set_style(&self.lumen, "background-color", category.lumen_color());
        dom::set_text(&self.flow_text, category.flow_description());
        dom::set_text(&self.status, &factors.status());
    }
}

impl Hypertension {
    pub fn mount() -> Result<Self, SetupError> {
        let lookup = PageLookup::new(HYPERTENSION)?;
        let controls: [(FactorControl, HtmlElement); 3] = [
            (FactorControl::Constrict, lookup.required("constrictVesselsBtn")?),
            (FactorControl::IncreaseVolume, lookup.required("increaseVolumeBtn")?),
            (FactorControl::Reset, lookup.required("resetPressureFactorsBtn")?),
        ];
        let view = VesselView {
            pressure_display: lookup.required("blood-pressure-value")?,
            lumen: lookup.required_selector(".vessel-lumen-hypertension")?,
            flow_text: lookup.required("hypertensionBloodFlowText")?,
            status: lookup.required("hypertensionStatus")?,
        };

        let (constrict_clicked_relay, mut constrict_clicked_stream) = relay::<()>();
        let (volume_clicked_relay, mut volume_clicked_stream) = relay::<()>();
        let (reset_clicked_relay, mut reset_clicked_stream) = relay::<()>();

        let factors = Actor::new(PressureFactors::default(), async move |state| {
            loop {
                select! {
                    event = constrict_clicked_stream.next() => {
                        match event {
                            Some(()) => state.update_mut(|factors| factors.constrict()),
                            None => {}
                        }
                    }
                    event = volume_clicked_stream.next() => {
                        match event {
                            Some(()) => state.update_mut(|factors| factors.increase_volume()),
                            None => {}
                        }
                    }
                    event = reset_clicked_stream.next() => {
                        match event {
                            Some(()) => state.update_mut(|factors| factors.reset()),
                            None => {}
                        }
                    }
                }
            }
        });

        let render = Task::start_droppable(factors.signal().for_each(move |factors| {
            view.render(factors);
            async {}
        }));

        for (control, button) in controls {
            let relay = match control {
                FactorControl::Constrict => constrict_clicked_relay.clone(),
                FactorControl::IncreaseVolume => volume_clicked_relay.clone(),
                FactorControl::Reset => reset_clicked_relay.clone(),
            };
            dom::on_event(&button, "click", move |_| relay.send(()));
        }

        zoon::println!("[{HYPERTENSION}] mounted");
        Ok(Hypertension {
            factors,
            _render: render,
        })
    }

    pub fn factors_signal(&self) -> impl Signal<Item = PressureFactors> + use<> {
        self.factors.signal()
    }
}
