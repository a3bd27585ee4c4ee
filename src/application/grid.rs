//! The grid holder: sole owner and writer of the matrix.

use std::cell::RefCell;
use std::rc::Rc;

use super::bus::{CELL_UPDATE, EventBus, Subscription};
use crate::domain::{CellChange, DomainResult, Matrix, UpdateEvent};

/// Event name used to notify views after a validated write.
pub const CELL_CHANGED: &str = "cell-changed";

/// Owns the matrix and applies validated updates received from the bus.
///
/// Mounting subscribes the holder to [`CELL_UPDATE`] on the injected bus;
/// dropping it unsubscribes. Views that need to refresh register through
/// [`GridHolder::observe`] and are told exactly which cell changed.
#[derive(Debug)]
pub struct GridHolder {
    matrix: Rc<RefCell<Matrix>>,
    observers: EventBus<CellChange>,
    _subscription: Subscription,
}

impl GridHolder {
    /// Creates an all-zero matrix and starts listening for update events.
    pub fn mount(bus: &EventBus<UpdateEvent>) -> Self {
        let matrix = Rc::new(RefCell::new(Matrix::default()));
        let observers = EventBus::new();

        let handler_matrix = Rc::clone(&matrix);
        let handler_observers = observers.clone();
        let subscription = bus.subscribe(CELL_UPDATE, move |event: &UpdateEvent| {
            if let Err(err) = apply(&handler_matrix, &handler_observers, event) {
                tracing::error!(
                    row = event.row,
                    col = event.col,
                    value = event.value,
                    "{err}"
                );
            }
        });
        tracing::debug!("grid mounted");

        Self {
            matrix,
            observers,
            _subscription: subscription,
        }
    }

    /// Validates and applies one update.
    ///
    /// On failure nothing is written and no observer is notified.
    pub fn apply_update(&self, event: &UpdateEvent) -> DomainResult<CellChange> {
        apply(&self.matrix, &self.observers, event)
    }

    /// Snapshot of the current matrix.
    pub fn values(&self) -> Matrix {
        *self.matrix.borrow()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<i64> {
        self.matrix.borrow().get(row, col)
    }

    /// Registers a view callback invoked after every applied update.
    pub fn observe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&CellChange) + 'static,
    {
        self.observers.subscribe(CELL_CHANGED, callback)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.subscriber_count(CELL_CHANGED)
    }
}

impl Drop for GridHolder {
    fn drop(&mut self) {
        tracing::debug!("grid unmounted");
    }
}

fn apply(
    matrix: &RefCell<Matrix>,
    observers: &EventBus<CellChange>,
    event: &UpdateEvent,
) -> DomainResult<CellChange> {
    let change = {
        let mut matrix = matrix.borrow_mut();
        let (row, col) = matrix.checked_position(event.row, event.col)?;
        matrix.set(row, col, event.value);
        CellChange {
            row,
            col,
            value: event.value,
        }
    };
    tracing::debug!(row = change.row, col = change.col, value = change.value, "matrix updated");
    observers.publish(CELL_CHANGED, &change);
    Ok(change)
}
