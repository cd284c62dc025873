//! `window.__physio_test_api` for browser automation
//!
//! Getters are synchronous, so every simulation's state is mirrored into a
//! thread-local cache by a signal subscription as it changes.

use serde::Serialize;
use shared::{CirculationSnapshot, PressureFactors, PressureSnapshot, ReflexFrame, SynapseStrengths, TimelinePosition};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use zoon::{Signal, SignalExt, Task, TaskHandle};

#[derive(Default)]
struct TestApiCache {
    circulation: Option<CirculationSnapshot>,
    reflex: Option<ReflexFrame>,
    pressure: Option<PressureSnapshot>,
    synapses: Option<SynapseStrengths>,
    plaque_level: Option<u8>,
    subscriptions: Vec<TaskHandle>,
}

thread_local! {
    static TEST_API_CACHE: RefCell<TestApiCache> = RefCell::new(TestApiCache::default());
}

fn mirror<S>(signal: S, store: fn(&mut TestApiCache, S::Item))
where
    S: Signal + 'static,
{
    let handle = Task::start_droppable(signal.for_each(move |value| {
        TEST_API_CACHE.with(|cache| store(&mut *cache.borrow_mut(), value));
        async {}
    }));
    TEST_API_CACHE.with(|cache| cache.borrow_mut().subscriptions.push(handle));
}

pub fn mirror_circulation(signal: impl Signal<Item = TimelinePosition> + 'static) {
    mirror(signal, |cache, position| {
        cache.circulation = Some(CirculationSnapshot::from(position));
    });
}

pub fn mirror_reflex(signal: impl Signal<Item = ReflexFrame> + 'static) {
    mirror(signal, |cache, frame| cache.reflex = Some(frame));
}

pub fn mirror_pressure(signal: impl Signal<Item = PressureFactors> + 'static) {
    mirror(signal, |cache, factors| {
        cache.pressure = Some(PressureSnapshot::from(factors));
    });
}

pub fn mirror_synapses(signal: impl Signal<Item = SynapseStrengths> + 'static) {
    mirror(signal, |cache, strengths| cache.synapses = Some(strengths));
}

pub fn mirror_plaque_level(signal: impl Signal<Item = u8> + 'static) {
    mirror(signal, |cache, level| cache.plaque_level = Some(level));
}

/// `null` for a simulation that did not mount.
fn read<T: Serialize>(select: impl FnOnce(&TestApiCache) -> Option<&T>) -> JsValue {
    TEST_API_CACHE.with(|cache| {
        select(&*cache.borrow())
            .and_then(|value| serde_wasm_bindgen::to_value(value).ok())
            .unwrap_or(JsValue::NULL)
    })
}

fn get_circulation_step_impl() -> JsValue {
    read(|cache| cache.circulation.as_ref())
}

fn get_reflex_phase_impl() -> JsValue {
    read(|cache| cache.reflex.as_ref())
}

fn get_pressure_factors_impl() -> JsValue {
    read(|cache| cache.pressure.as_ref())
}

fn get_synapse_strengths_impl() -> JsValue {
    read(|cache| cache.synapses.as_ref())
}

fn get_plaque_level_impl() -> JsValue {
    read(|cache| cache.plaque_level.as_ref())
}

pub fn expose_physio_test_api() {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };

    let api = js_sys::Object::new();
    let getters: [(&str, fn() -> JsValue); 5] = [
        ("getCirculationStep", get_circulation_step_impl),
        ("getReflexPhase", get_reflex_phase_impl),
        ("getPressureFactors", get_pressure_factors_impl),
        ("getSynapseStrengths", get_synapse_strengths_impl),
        ("getPlaqueLevel", get_plaque_level_impl),
    ];
    for (name, getter) in getters {
        let closure = Closure::wrap(Box::new(getter) as Box<dyn Fn() -> JsValue>);
        js_sys::Reflect::set(&api, &name.into(), closure.as_ref().unchecked_ref()).ok();
        closure.forget();
    }

    js_sys::Reflect::set(&window, &"__physio_test_api".into(), &api).ok();

    zoon::println!("[Physio] Test API exposed on window.__physio_test_api");
}
