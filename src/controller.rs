//! Recognition controller
//!
//! Owns one capture session: the change listener on the drawing surface, the
//! recognition backend and the result display. Every completed stroke becomes
//! an independent, cancellable request task tagged with a sequence number.

use crate::capture::binding::CaptureBinding;
use crate::capture::surface::{ChangeEvent, ChangeReceiver, DrawingSurface, SharedSurface, SurfaceResult};
use crate::capture::types::Signature;
use crate::config::ClientConfig;
use crate::display::{DisplayState, ResponseOrdering, ResultDisplay};
use crate::recognizer::backend::RecognitionBackend;
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

struct DispatchState {
    /// Surface generation seen at the last reset
    generation: u64,
    next_sequence: u64,
    tasks: Vec<(u64, JoinHandle<()>)>,
    disposed: bool,
}

/// Turns change events into request tasks and routes their results to the display
struct Dispatcher {
    backend: Arc<dyn RecognitionBackend>,
    display: Arc<ResultDisplay>,
    ordering: ResponseOrdering,
    state: ParkingMutex<DispatchState>,
}

impl Dispatcher {
    async fn pump(self: Arc<Self>, mut events: ChangeReceiver) {
        while let Some(event) = events.recv().await {
            self.handle_change(event);
        }
        tracing::debug!("Change event stream closed");
    }

    fn handle_change(&self, event: ChangeEvent) {
        let mut state = self.state.lock();
        if state.disposed {
            return;
        }
        if event.generation < state.generation {
            tracing::debug!(
                "Dropping change event from surface generation {} (current {})",
                event.generation,
                state.generation
            );
            return;
        }
        self.submit_locked(&mut state, event.signature);
    }

    fn submit(&self, signature: Signature) -> Option<u64> {
        let mut state = self.state.lock();
        if state.disposed {
            return None;
        }
        Some(self.submit_locked(&mut state, signature))
    }

    fn submit_locked(&self, state: &mut DispatchState, signature: Signature) -> u64 {
        let sequence = state.next_sequence;
        state.next_sequence += 1;

        self.display.mark_pending(sequence);
        tracing::debug!(
            "Issuing recognition request #{} ({} strokes)",
            sequence,
            signature.len()
        );

        let backend = self.backend.clone();
        let display = self.display.clone();
        let ordering = self.ordering;
        let handle = tokio::spawn(async move {
            let result = backend.recognize(&signature).await;
            match &result {
                Ok(prediction) => {
                    tracing::debug!("Request #{} answered: {:?}", sequence, prediction.as_str())
                }
                Err(e) => {
                    tracing::warn!("Request #{} via {} failed: {}", sequence, backend.name(), e)
                }
            }
            if !display.apply(sequence, result, ordering) {
                tracing::debug!("Discarded stale response #{}", sequence);
            }
        });

        state.tasks.retain(|(_, task)| !task.is_finished());
        state.tasks.push((sequence, handle));
        sequence
    }

    /// Abort every in-flight request and clear the display. Returns the abort count.
    fn reset(&self, generation: u64) -> usize {
        let mut state = self.state.lock();
        state.generation = generation;
        let aborted = Self::abort_all(&mut state);
        self.display.clear(state.next_sequence);
        aborted
    }

    fn dispose(&self) {
        let mut state = self.state.lock();
        state.disposed = true;
        Self::abort_all(&mut state);
    }

    fn abort_all(state: &mut DispatchState) -> usize {
        let mut aborted = 0;
        for (_, task) in state.tasks.drain(..) {
            if !task.is_finished() {
                aborted += 1;
            }
            task.abort();
        }
        aborted
    }

    fn in_flight(&self) -> usize {
        self.state
            .lock()
            .tasks
            .iter()
            .filter(|(_, task)| !task.is_finished())
            .count()
    }

    fn issued(&self) -> u64 {
        self.state.lock().next_sequence - 1
    }
}

/// Controller for one drawing surface.
///
/// Must be created inside a tokio runtime. Dropping it disposes it.
pub struct RecognitionController<S: DrawingSurface + 'static> {
    id: Uuid,
    surface: SharedSurface<S>,
    binding: ParkingMutex<CaptureBinding>,
    dispatcher: Arc<Dispatcher>,
    pump: ParkingMutex<Option<JoinHandle<()>>>,
}

impl<S: DrawingSurface + 'static> RecognitionController<S> {
    /// Initialize the surface, bind the change listener and start the event pump
    pub fn new(
        surface: SharedSurface<S>,
        backend: Arc<dyn RecognitionBackend>,
        config: &ClientConfig,
    ) -> SurfaceResult<Self> {
        let (sender, events) = mpsc::unbounded_channel();
        let mut binding = CaptureBinding::new(sender);

        let generation = {
            let mut guard = surface.lock();
            guard.init(&config.surface)?;
            binding.bind(&mut *guard);
            guard.generation()
        };

        let dispatcher = Arc::new(Dispatcher {
            backend,
            display: Arc::new(ResultDisplay::default()),
            ordering: config.ordering,
            state: ParkingMutex::new(DispatchState {
                generation,
                next_sequence: 1,
                tasks: Vec::new(),
                disposed: false,
            }),
        });
        let pump = tokio::spawn(dispatcher.clone().pump(events));

        let id = Uuid::new_v4();
        tracing::info!(
            "Recognition controller {} started (backend={}, ordering={:?})",
            id,
            dispatcher.backend.name(),
            config.ordering
        );

        Ok(Self {
            id,
            surface,
            binding: ParkingMutex::new(binding),
            dispatcher,
            pump: ParkingMutex::new(Some(pump)),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn surface(&self) -> SharedSurface<S> {
        self.surface.clone()
    }

    pub fn display(&self) -> DisplayState {
        self.dispatcher.display.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.dispatcher.display.subscribe()
    }

    /// Send `signature` for recognition. Returns its sequence number, or
    /// `None` once the controller is disposed.
    pub fn on_change(&self, signature: Signature) -> Option<u64> {
        self.dispatcher.submit(signature)
    }

    /// Clear drawing and display without issuing a request.
    ///
    /// The listener is detached around the surface reset, and responses to
    /// requests issued before the reset are dropped.
    pub fn reset(&self) {
        let generation = {
            let mut binding = self.binding.lock();
            let mut surface = self.surface.lock();
            binding.while_unbound(&mut *surface, |surface| surface.reset());
            surface.generation()
        };
        let aborted = self.dispatcher.reset(generation);
        tracing::info!("Controller {} reset ({} requests aborted)", self.id, aborted);
    }

    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    /// Number of requests issued so far
    pub fn issued(&self) -> u64 {
        self.dispatcher.issued()
    }

    /// Wait until at least `expected` requests were issued and none is in
    /// flight. Returns false on timeout.
    pub async fn settle(&self, expected: u64, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            while self.issued() < expected || self.in_flight() > 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .is_ok()
    }

    pub fn is_disposed(&self) -> bool {
        self.dispatcher.state.lock().disposed
    }

    /// Detach from the surface and cancel all outstanding work. Idempotent.
    pub fn dispose(&self) {
        if self.is_disposed() {
            return;
        }
        {
            let mut binding = self.binding.lock();
            let mut surface = self.surface.lock();
            binding.unbind(&mut *surface);
        }
        if let Some(pump) = self.pump.lock().take() {
            pump.abort();
        }
        self.dispatcher.dispose();
        tracing::info!("Controller {} disposed", self.id);
    }
}

impl<S: DrawingSurface + 'static> Drop for RecognitionController<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
