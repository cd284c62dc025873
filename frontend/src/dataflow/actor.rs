//! Single-value Actor owning one simulation's state

use std::future::Future;
use std::rc::Rc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// State container whose processing loop is the only writer.
///
/// Page callbacks never touch the state; they send into relays the loop
/// selects over. Render tasks subscribe to [`Actor::signal`].
///
/// ```rust
/// let (constrict_clicked_relay, mut constrict_stream) = relay::<()>();
/// let (reset_clicked_relay, mut reset_stream) = relay::<()>();
///
/// let factors = Actor::new(PressureFactors::default(), async move |state| {
///     loop {
///         select! {
///             event = constrict_stream.next() => match event {
///                 Some(()) => state.update_mut(|f| f.constrict()),
///                 None => {}
///             },
///             event = reset_stream.next() => match event {
///                 Some(()) => state.update_mut(|f| f.reset()),
///                 None => {}
///             },
///         }
///     }
/// });
/// ```
///
/// The loop runs on the page's single thread, so neither the state nor the
/// loop future has to be `Send`.
#[derive(Clone, Debug)]
pub struct Actor<T>
where
    T: Clone + 'static,
{
    state: Mutable<T>,
    #[allow(dead_code)]
    task_handle: Rc<TaskHandle>,
    #[cfg(debug_assertions)]
    #[allow(dead_code)]
    creation_location: &'static std::panic::Location<'static>,
}

impl<T> Actor<T>
where
    T: Clone + 'static,
{
    /// Start the processing loop with `initial_state`.
    ///
    /// The loop is cancelled when the last clone of the actor is dropped.
    #[track_caller]
    pub fn new<F, Fut>(initial_state: T, processor: F) -> Self
    where
        F: FnOnce(Mutable<T>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let state = Mutable::new(initial_state);
        let task_handle = Rc::new(Task::start_droppable(processor(state.clone())));

        Self {
            state,
            task_handle,
            #[cfg(debug_assertions)]
            creation_location: std::panic::Location::caller(),
        }
    }

    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }

    /// Derived signal without cloning the whole state on every change.
    pub fn signal_ref<U, F>(&self, f: F) -> impl Signal<Item = U> + use<T, U, F>
    where
        F: FnMut(&T) -> U + 'static,
        U: 'static,
    {
        self.state.signal_ref(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataflow::relay;
    use futures::{StreamExt, select};
    use shared::PressureFactors;
    use zoon::{MutableExt, SignalExt};

    async fn settle() {
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    }

    #[tokio::test]
    async fn test_actor_single_stream() {
        let (plaque_level_changed_relay, mut plaque_level_changed_stream) = relay::<u8>();

        let level = Actor::new(0u8, async move |state| {
            while let Some(level) = plaque_level_changed_stream.next().await {
                state.set(level);
            }
        });

        settle().await;

        for value in [20, 45] {
            plaque_level_changed_relay.send(value);
        }

        settle().await;

        let current = level.signal().to_stream().next().await.unwrap();
        assert_eq!(current, 45);
    }

    #[tokio::test]
    async fn test_actor_pressure_controls() {
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

        settle().await;

        constrict_clicked_relay.send(());
        volume_clicked_relay.send(());

        settle().await;

        let current = factors.signal().to_stream().next().await.unwrap();
        let mut expected = PressureFactors::default();
        expected.constrict();
        expected.increase_volume();
        assert_eq!(current, expected);
        assert!(current.total() > 0);

        reset_clicked_relay.send(());

        settle().await;

        let current = factors.signal().to_stream().next().await.unwrap();
        assert_eq!(current, PressureFactors::default());
    }

    #[tokio::test]
    async fn test_actor_outlives_a_dropped_relay() {
        let (first_frame_painted_relay, mut first_frame_painted_stream) = relay::<()>();
        let (next_step_clicked_relay, mut next_step_clicked_stream) = relay::<()>();

        let steps = Actor::new(0u32, async move |state| {
            loop {
                select! {
                    event = first_frame_painted_stream.next() => {
                        match event {
                            Some(()) => state.update_mut(|steps| *steps += 1),
                            None => {}
                        }
                    }
                    event = next_step_clicked_stream.next() => {
                        match event {
                            Some(()) => state.update_mut(|steps| *steps += 1),
                            None => {}
                        }
                    }
                }
            }
        });

        settle().await;

        first_frame_painted_relay.send(());
        drop(first_frame_painted_relay);

        settle().await;

        for _ in 0..2 {
            next_step_clicked_relay.send(());
        }

        settle().await;

        let current = steps.signal().to_stream().next().await.unwrap();
        assert_eq!(current, 3);
    }
}
