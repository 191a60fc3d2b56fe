use crate::capture::surface::{ChangeSender, DrawingSurface, ListenerId};

/// Owns the single change listener a controller keeps on its surface.
///
/// Binding twice never registers a second listener, so unbind/rebind cycles
/// (as done around a reset) cannot multiply change events.
pub struct CaptureBinding {
    sender: ChangeSender,
    listener: Option<ListenerId>,
}

impl CaptureBinding {
    pub fn new(sender: ChangeSender) -> Self {
        Self {
            sender,
            listener: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.listener.is_some()
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn bind<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) -> ListenerId {
        if let Some(id) = self.listener {
            return id;
        }
        let id = surface.bind_change(self.sender.clone());
        tracing::debug!("Change listener {} bound", id);
        self.listener = Some(id);
        id
    }

    pub fn unbind<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        match self.listener.take() {
            Some(id) => {
                tracing::debug!("Change listener {} unbound", id);
                surface.unbind_change(id)
            }
            None => false,
        }
    }

    /// Run `f` with the listener detached, then reattach it.
    ///
    /// Only rebinds if the listener was bound on entry.
    pub fn while_unbound<S, R>(&mut self, surface: &mut S, f: impl FnOnce(&mut S) -> R) -> R
    where
        S: DrawingSurface + ?Sized,
    {
        let was_bound = self.unbind(surface);
        let result = f(surface);
        if was_bound {
            self.bind(surface);
        }
        result
    }
}
