use crate::capture::surface::{
    ChangeEvent, ChangeSender, DrawingSurface, ListenerId, SurfaceError, SurfaceOptions,
    SurfaceResult,
};
use crate::capture::types::{Point, Signature, Stroke};

/// In-memory drawing surface fed by pen events.
///
/// Mirrors the behaviour of a browser signature widget: each completed stroke
/// and each reset notify every bound listener with the full signature.
pub struct SignaturePad {
    options: Option<SurfaceOptions>,
    signature: Signature,
    active: Option<Stroke>,
    listeners: Vec<(ListenerId, ChangeSender)>,
    generation: u64,
}

impl SignaturePad {
    pub fn new() -> Self {
        Self {
            options: None,
            signature: Signature::new(),
            active: None,
            listeners: Vec::new(),
            generation: 0,
        }
    }

    pub fn options(&self) -> Option<&SurfaceOptions> {
        self.options.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn pen_down(&mut self, point: Point) -> SurfaceResult<()> {
        if self.options.is_none() {
            return Err(SurfaceError::NotInitialized);
        }
        if self.active.is_some() {
            return Err(SurfaceError::StrokeInProgress);
        }

        let mut stroke = Stroke::new();
        stroke.push(point);
        self.active = Some(stroke);
        Ok(())
    }

    pub fn pen_move(&mut self, point: Point) -> SurfaceResult<()> {
        match self.active.as_mut() {
            Some(stroke) => {
                stroke.push(point);
                Ok(())
            }
            None => Err(SurfaceError::NoActiveStroke),
        }
    }

    /// Finish the active stroke. Returns true if a change event fired.
    pub fn pen_up(&mut self) -> bool {
        let Some(stroke) = self.active.take() else {
            return false;
        };
        if stroke.is_empty() {
            return false;
        }

        self.signature.push(stroke);
        tracing::trace!(
            "Stroke {} completed ({} points total)",
            self.signature.len(),
            self.signature.point_count()
        );
        self.notify();
        true
    }

    fn notify(&mut self) {
        let event = ChangeEvent {
            signature: self.signature.clone(),
            generation: self.generation,
        };
        // Listeners whose receiver is gone are pruned
        self.listeners.retain(|(id, sender)| {
            let delivered = sender.send(event.clone()).is_ok();
            if !delivered {
                tracing::debug!("Dropping closed change listener {}", id);
            }
            delivered
        });
    }
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface for SignaturePad {
    fn init(&mut self, options: &SurfaceOptions) -> SurfaceResult<()> {
        options.validate()?;
        self.options = Some(options.clone());
        self.signature.clear();
        self.active = None;

        tracing::info!(
            "Signature pad initialized (element={}, {}x{}, line_width={})",
            options.element_id,
            options.width,
            options.height,
            options.line_width
        );
        Ok(())
    }

    fn data(&self) -> Signature {
        self.signature.clone()
    }

    fn reset(&mut self) {
        self.signature.clear();
        self.active = None;
        self.generation += 1;
        self.notify();
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn bind_change(&mut self, sender: ChangeSender) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.push((id, sender));
        id
    }

    fn unbind_change(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(bound, _)| *bound != id);
        self.listeners.len() != before
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn ready_pad() -> SignaturePad {
        let mut pad = SignaturePad::new();
        pad.init(&SurfaceOptions::default()).unwrap();
        pad
    }

    fn draw(pad: &mut SignaturePad, points: &[(i32, i32)]) {
        let (first, rest) = points.split_first().unwrap();
        pad.pen_down(Point::new(first.0, first.1)).unwrap();
        for &(x, y) in rest {
            pad.pen_move(Point::new(x, y)).unwrap();
        }
        pad.pen_up();
    }

    #[test]
    fn test_pen_input_requires_init() {
        let mut pad = SignaturePad::new();
        assert_eq!(pad.pen_down(Point::new(0, 0)), Err(SurfaceError::NotInitialized));
    }

    #[test]
    fn test_pen_move_without_stroke() {
        let mut pad = ready_pad();
        assert_eq!(pad.pen_move(Point::new(1, 1)), Err(SurfaceError::NoActiveStroke));
        assert!(!pad.pen_up());
    }

    #[test]
    fn test_double_pen_down_rejected() {
        let mut pad = ready_pad();
        pad.pen_down(Point::new(1, 1)).unwrap();
        assert_eq!(pad.pen_down(Point::new(2, 2)), Err(SurfaceError::StrokeInProgress));
        assert!(pad.is_drawing());
    }

    #[test]
    fn test_each_stroke_fires_cumulative_change() {
        let mut pad = ready_pad();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pad.bind_change(tx);

        draw(&mut pad, &[(10, 10), (20, 20)]);
        draw(&mut pad, &[(30, 10), (30, 40), (31, 50)]);

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert!(rx.try_recv().is_err());

        assert_eq!(first.signature.len(), 1);
        assert_eq!(second.signature.len(), 2);
        assert_eq!(second.signature.point_count(), 5);
        assert_eq!(second.signature, pad.data());
    }

    #[test]
    fn test_reset_notifies_bound_listeners() {
        let mut pad = ready_pad();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pad.bind_change(tx);

        draw(&mut pad, &[(1, 1)]);
        pad.reset();

        let _stroke = rx.try_recv().unwrap();
        let reset = rx.try_recv().unwrap();
        assert!(reset.signature.is_empty());
        assert_eq!(reset.generation, 1);
        assert!(pad.data().is_empty());
    }

    #[test]
    fn test_unbind_stops_notifications() {
        let mut pad = ready_pad();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = pad.bind_change(tx);

        assert!(pad.unbind_change(id));
        assert!(!pad.unbind_change(id));
        draw(&mut pad, &[(1, 1)]);

        assert!(rx.try_recv().is_err());
        assert_eq!(pad.listener_count(), 0);
    }

    #[test]
    fn test_closed_listener_pruned() {
        let mut pad = ready_pad();
        let (tx, rx) = mpsc::unbounded_channel();
        pad.bind_change(tx);
        drop(rx);

        draw(&mut pad, &[(1, 1)]);
        assert_eq!(pad.listener_count(), 0);
    }

    #[test]
    fn test_init_clears_previous_drawing() {
        let mut pad = ready_pad();
        draw(&mut pad, &[(1, 1), (2, 2)]);
        pad.init(&SurfaceOptions::default()).unwrap();
        assert!(pad.data().is_empty());
    }
}
