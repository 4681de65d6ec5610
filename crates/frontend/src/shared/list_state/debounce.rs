/// Milliseconds on whatever clock the caller drives (`Date.now()` in the browser)
pub type Millis = u64;

/// Cancel-and-restart debounce slot.
///
/// Each `push` supersedes the pending value and moves the deadline; `poll`
/// releases the value once the quiet window has elapsed. No timers live here,
/// the owner schedules a wake-up at [`Debouncer::deadline`].
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Millis,
    pending: Option<(Millis, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Millis) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Millis {
        self.window
    }

    pub fn push(&mut self, value: T, now: Millis) {
        self.pending = Some((now.saturating_add(self.window), value));
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its deadline has passed
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        let due = matches!(self.pending, Some((deadline, _)) if now >= deadline);
        if due {
            self.flush()
        } else {
            None
        }
    }

    /// Take the pending value regardless of the deadline
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
