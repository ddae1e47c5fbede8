use crate::Error;

/// What a price view currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(Error),
}

// Written out so `T` needs no `Default` of its own.
impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    /// A fetch has started. Allowed from every state.
    pub fn start(self) -> Self {
        ViewState::Loading
    }

    /// A fetch has finished. Results are only accepted while loading.
    pub fn finish(self, result: Result<T, Error>) -> Self {
        match (self, result) {
            (ViewState::Loading, Ok(data)) => ViewState::Loaded(data),
            (ViewState::Loading, Err(err)) => ViewState::Failed(err),
            (state, _) => state,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Identifies the fetch a result belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// A view state guarded by a generation counter, so that a slow fetch
/// cannot overwrite the result of a newer one.
#[derive(Debug)]
pub struct Board<T> {
    state: ViewState<T>,
    generation: u64,
}

impl<T> Default for Board<T> {
    fn default() -> Self {
        Board {
            state: ViewState::Idle,
            generation: 0,
        }
    }
}

impl<T> Board<T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new fetch, superseding any fetch still in flight.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = std::mem::take(&mut self.state).start();
        log::trace!("Fetch {} started", self.generation);
        Ticket(self.generation)
    }

    /// Apply the result of a fetch. Returns false if the fetch was superseded.
    pub fn complete(&mut self, ticket: Ticket, result: Result<T, Error>) -> bool {
        if ticket.0 != self.generation {
            log::debug!(
                "Discarding stale fetch {}, current is {}",
                ticket.0,
                self.generation
            );
            return false;
        }
        if let Err(err) = &result {
            log::error!("Fetch {} failed: {}", ticket.0, err);
        }
        self.state = std::mem::take(&mut self.state).finish(result);
        true
    }

    /// Invalidate every fetch in flight without touching the state.
    pub fn retire(&mut self) {
        self.generation += 1;
    }
}
