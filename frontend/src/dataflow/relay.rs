//! Event streaming Relay built on an unbounded channel

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::sync::{Arc, OnceLock};

/// Typed event stream from page callbacks to an [`Actor`](super::Actor).
///
/// Every relay has exactly one emitting call site. Debug builds record the
/// first caller of [`Relay::send`] and panic if another location sends into
/// the same relay later.
///
/// ```rust
/// let (stimulus_applied_relay, mut stimulus_applied_stream) = relay::<()>();
///
/// dom::on_event(&button, "click", move |_| stimulus_applied_relay.send(()));
///
/// while let Some(()) = stimulus_applied_stream.next().await {
///     // start a reflex run
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T>
where
    T: Clone + 'static,
{
    sender: UnboundedSender<T>,
    #[cfg(debug_assertions)]
    emit_location: Arc<OnceLock<&'static std::panic::Location<'static>>>,
}

#[derive(Debug, Clone)]
pub enum RelayError {
    /// The receiving actor is gone.
    ChannelClosed,
    #[cfg(debug_assertions)]
    MultipleEmitters {
        previous: &'static std::panic::Location<'static>,
        current: &'static std::panic::Location<'static>,
    },
}

impl<T> Relay<T>
where
    T: Clone + 'static,
{
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        (
            Relay {
                sender,
                #[cfg(debug_assertions)]
                emit_location: Arc::new(OnceLock::new()),
            },
            receiver,
        )
    }

    #[cfg(debug_assertions)]
    #[track_caller]
    fn check_single_source(&self) -> Result<(), RelayError> {
        let caller = std::panic::Location::caller();
        match self.emit_location.set(caller) {
            Ok(()) => Ok(()),
            Err(previous) if previous == caller => Ok(()),
            Err(previous) => Err(RelayError::MultipleEmitters {
                previous,
                current: caller,
            }),
        }
    }

    /// Send an event. Dropped silently when the actor no longer listens.
    ///
    /// Panics in debug builds when called from a second code location.
    #[track_caller]
    pub fn send(&self, value: T) {
        #[cfg(debug_assertions)]
        if let Err(e) = self.check_single_source() {
            panic!("{:?}", e);
        }

        let _ = self.sender.unbounded_send(value);
    }

    /// Like [`Relay::send`], but reports a closed channel or a second emitter
    /// instead of ignoring or panicking.
    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        #[cfg(debug_assertions)]
        self.check_single_source()?;

        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

/// Create a relay together with the stream its actor consumes.
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>)
where
    T: Clone + 'static,
{
    Relay::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_relay_delivers_in_order() {
        let (plaque_level_changed_relay, mut stream) = relay::<u8>();

        for level in [0, 35, 100] {
            plaque_level_changed_relay.send(level);
        }

        assert_eq!(stream.next().await, Some(0));
        assert_eq!(stream.next().await, Some(35));
        assert_eq!(stream.next().await, Some(100));
    }

    fn emit(relay: &Relay<()>) -> Result<(), RelayError> {
        relay.try_send(())
    }

    #[tokio::test]
    async fn test_relay_try_send() {
        let (stimulus_applied_relay, mut receiver) = relay::<()>();

        assert!(emit(&stimulus_applied_relay).is_ok());
        assert_eq!(receiver.next().await, Some(()));

        drop(receiver);

        assert!(matches!(
            emit(&stimulus_applied_relay),
            Err(RelayError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn test_relay_clones_share_the_stream() {
        let (next_step_clicked_relay, mut stream) = relay::<()>();
        let emitter = next_step_clicked_relay.clone();

        // Sends from one location through either clone count as one source.
        for relay in [&next_step_clicked_relay, &emitter] {
            relay.send(());
        }

        assert_eq!(stream.next().await, Some(()));
        assert_eq!(stream.next().await, Some(()));
    }

    #[cfg(debug_assertions)]
    #[tokio::test]
    async fn test_relay_rejects_second_emitter() {
        let (container_resized_relay, _stream) = relay::<()>();

        assert!(container_resized_relay.try_send(()).is_ok());
        assert!(matches!(
            container_resized_relay.try_send(()),
            Err(RelayError::MultipleEmitters { .. })
        ));
    }
}
