use super::bus::EventBus;
use super::cell::CellEditor;
use crate::domain::UpdateEvent;

/// Lays out one matrix row as cell editors.
///
/// Holds no state and does no validation: it only forwards the row index,
/// each column index and each value to the editor it creates.
pub struct RowPresenter;

impl RowPresenter {
    pub fn cells(row: usize, values: &[i64], bus: &EventBus<UpdateEvent>) -> Vec<CellEditor> {
        values
            .iter()
            .enumerate()
            .map(|(col, value)| CellEditor::new(row, col, *value, bus.clone()))
            .collect()
    }
}
