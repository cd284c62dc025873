//! Physiology simulations entry point
//!
//! Binds each simulation to its section of the page. A section whose markup
//! is incomplete is reported and skipped; the others still run.

use shared::{ReflexTiming, SetupError};
use std::cell::RefCell;

mod cardiovascular;
mod circulation;
mod config;
mod dataflow;
mod dom;
mod neuroplasticity;
mod reflex_arc;
mod test_api;

use cardiovascular::{Atherosclerosis, Hypertension};
use circulation::Circulation;
use neuroplasticity::Neuroplasticity;
use reflex_arc::Reflex;

/// Every mounted simulation; dropping one stops its actor and render task.
#[derive(Default)]
struct Page {
    atherosclerosis: Option<Atherosclerosis>,
    hypertension: Option<Hypertension>,
    circulation: Option<Circulation>,
    reflex: Option<Reflex>,
    neuroplasticity: Option<Neuroplasticity>,
}

thread_local! {
    static PAGE: RefCell<Page> = RefCell::new(Page::default());
}

fn report<T>(mounted: Result<T, SetupError>) -> Option<T> {
    match mounted {
        Ok(simulation) => Some(simulation),
        Err(error) => {
            zoon::eprintln!("[{}] Initialization failed: {error}", error.simulation());
            None
        }
    }
}

impl Page {
    fn mount() -> Self {
        let config = config::load_simulation_config();
        Page {
            atherosclerosis: report(Atherosclerosis::mount()),
            hypertension: report(Hypertension::mount()),
            circulation: report(Circulation::mount()),
            reflex: report(Reflex::mount(ReflexTiming::from(&config.reflex))),
            neuroplasticity: report(Neuroplasticity::mount(&config.plasticity)),
        }
    }

    fn mirror_into_test_api(&self) {
        if let Some(atherosclerosis) = &self.atherosclerosis {
            test_api::mirror_plaque_level(atherosclerosis.level_signal());
        }
        if let Some(hypertension) = &self.hypertension {
            test_api::mirror_pressure(hypertension.factors_signal());
        }
        if let Some(circulation) = &self.circulation {
            test_api::mirror_circulation(circulation.position_signal());
        }
        if let Some(reflex) = &self.reflex {
            test_api::mirror_reflex(reflex.frame_signal());
        }
        if let Some(neuroplasticity) = &self.neuroplasticity {
            test_api::mirror_synapses(neuroplasticity.strengths_signal());
        }
    }
}

pub fn main() {
    let page = Page::mount();
    page.mirror_into_test_api();
    test_api::expose_physio_test_api();
    PAGE.with(|cell| *cell.borrow_mut() = page);
}
