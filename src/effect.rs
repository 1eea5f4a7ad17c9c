//! Fetch-on-change bookkeeping for views.
//!
//! A view declares one dependency value (a page number, a product id).
//! Whenever that value changes the view starts a fetch and receives a
//! [`Ticket`]. Only the newest ticket of a live effect is accepted back,
//! so a slow response for an old value never overwrites a newer one and
//! nothing lands on a view that was torn down.

/// Stamp of one effect run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<D> {
    generation: u64,
    dependency: D,
}

impl<D> Ticket<D> {
    /// The dependency value this run was started for.
    pub fn dependency(&self) -> &D {
        &self.dependency
    }
}

#[derive(Debug)]
pub struct Effect<D> {
    current: Option<D>,
    generation: u64,
    torn_down: bool,
}

impl<D> Default for Effect<D> {
    fn default() -> Self {
        Self {
            current: None,
            generation: 0,
            torn_down: false,
        }
    }
}

impl<D: Clone + PartialEq> Effect<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `dependency` and returns a ticket if the effect has to run.
    ///
    /// The first call always runs; later calls run only when the value
    /// differs from the last one. A torn down effect never runs again.
    pub fn update(&mut self, dependency: D) -> Option<Ticket<D>> {
        if self.torn_down || self.current.as_ref() == Some(&dependency) {
            return None;
        }
        self.current = Some(dependency.clone());
        self.generation += 1;
        Some(Ticket {
            generation: self.generation,
            dependency,
        })
    }

    /// Whether the result of `ticket`'s run may be applied.
    pub fn accepts(&self, ticket: &Ticket<D>) -> bool {
        !self.torn_down && ticket.generation == self.generation
    }

    /// Invalidates every outstanding ticket for good.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
