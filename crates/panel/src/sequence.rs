// Chunk: docs/chunks/cell_panel - Cell model, layout engine, and panel controller
//!
//! The ordered cell sequence and its structural invariants.
//!
//! Insertion order is chronological order is display order. The sequence
//! always ends with exactly one editable input cell; every earlier input
//! cell is frozen history. The cell a stream appends to is always the last
//! output cell - the one opened by the most recent exchange.
//!
//! Cells refer to nothing: routing works on indices into this sequence, so
//! there is no back-edge from a cell to its panel and no cycle to manage.

use crate::cell::{Cell, CellRole};

/// The ordered list of cells belonging to one panel.
#[derive(Debug)]
pub struct CellSequence {
    cells: Vec<Cell>,
    /// Index of the cell holding focus. Either the trailing input cell or
    /// one explicitly focused by pointer interaction.
    active: usize,
}

impl CellSequence {
    /// Creates the initial banner/input pair: output cell 0 seeded with
    /// `banner`, then editable input cell 1 holding focus.
    pub fn new(banner: &str) -> Self {
        Self {
            cells: vec![Cell::output(banner), Cell::input()],
            active: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Line count of every cell, in display order - the layout engine's input.
    pub fn line_counts(&self) -> Vec<usize> {
        self.cells.iter().map(Cell::line_count).collect()
    }

    /// Index of the cell currently holding focus.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Reassigns focus. Out-of-range indices are ignored.
    ///
    /// Focus only: sequence order and frozen state are untouched; a frozen
    /// cell can hold focus (for selection/copying) without becoming editable.
    pub fn set_active(&mut self, index: usize) {
        if index < self.cells.len() {
            self.active = index;
        }
    }

    /// Index of the output cell stream readers currently append to.
    pub fn trailing_output_index(&self) -> usize {
        // The sequence alternates O I O I ... so the trailing output is
        // always second-to-last.
        self.cells.len() - 2
    }

    /// Index of the single editable input cell.
    pub fn trailing_input_index(&self) -> usize {
        self.cells.len() - 1
    }

    /// The output cell stream readers currently append to.
    pub fn trailing_output_mut(&mut self) -> &mut Cell {
        let index = self.trailing_output_index();
        &mut self.cells[index]
    }

    /// The editable input cell, if focus is on it.
    ///
    /// Editing keys route here; when focus sits on a frozen cell they are
    /// dropped instead.
    pub fn focused_editable_mut(&mut self) -> Option<&mut Cell> {
        let active = self.active;
        let cell = &mut self.cells[active];
        cell.is_editable().then_some(cell)
    }

    /// Rotates the sequence for one exchange: freezes the current input,
    /// appends a fresh output/input pair, and moves focus to the new input.
    ///
    /// Returns the index of the new output cell (the reveal target).
    pub fn push_exchange(&mut self) -> usize {
        let input = self.trailing_input_index();
        self.cells[input].freeze();
        self.cells.push(Cell::output(""));
        self.cells.push(Cell::input());
        self.active = self.cells.len() - 1;
        self.cells.len() - 2
    }

    /// Checks the structural invariants. Test/debug support.
    pub fn validate(&self) -> Result<(), String> {
        if self.cells.len() < 2 {
            return Err("sequence must hold at least one output/input pair".into());
        }
        if self.active >= self.cells.len() {
            return Err(format!("active index {} out of range", self.active));
        }
        let last = self.cells.len() - 1;
        for (i, cell) in self.cells.iter().enumerate() {
            match (cell.role(), i == last) {
                (CellRole::Input, true) => {
                    if !cell.is_editable() {
                        return Err("trailing input cell must be editable".into());
                    }
                }
                (CellRole::Input, false) => {
                    if cell.is_editable() {
                        return Err(format!("input cell {i} should be frozen"));
                    }
                }
                (CellRole::Output, true) => {
                    return Err("sequence must end with an input cell".into());
                }
                (CellRole::Output, false) => {}
            }
        }
        let outputs = self
            .cells
            .iter()
            .filter(|c| c.role() == CellRole::Output)
            .count();
        let inputs = self.cells.len() - outputs;
        if outputs != inputs {
            return Err(format!("unbalanced cells: {outputs} outputs, {inputs} inputs"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sequence_is_banner_plus_input() {
        let seq = CellSequence::new("hi");
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.cell(0).unwrap().role(), CellRole::Output);
        assert_eq!(seq.cell(0).unwrap().content(), "hi");
        assert_eq!(seq.cell(1).unwrap().role(), CellRole::Input);
        assert_eq!(seq.active_index(), 1);
        seq.validate().unwrap();
    }

    #[test]
    fn push_exchange_grows_by_two_and_freezes() {
        let mut seq = CellSequence::new("");
        seq.trailing_output_mut().append_output("one");
        let reveal = seq.push_exchange();

        assert_eq!(seq.len(), 4);
        assert_eq!(reveal, 2);
        assert_eq!(seq.active_index(), 3);
        assert!(!seq.cell(1).unwrap().is_editable(), "old input frozen");
        assert_eq!(seq.trailing_output_index(), 2);
        seq.validate().unwrap();
    }

    #[test]
    fn prior_cells_unchanged_by_exchange() {
        let mut seq = CellSequence::new("banner");
        seq.trailing_output_mut().append_output("\nresult");
        if let Some(cell) = seq.focused_editable_mut() {
            cell.buffer_mut().unwrap().insert_str("first input");
        }
        let before: Vec<String> = seq.iter().map(Cell::content).collect();

        seq.push_exchange();

        for (i, content) in before.iter().enumerate() {
            assert_eq!(&seq.cell(i).unwrap().content(), content);
        }
    }

    #[test]
    fn focus_on_frozen_cell_routes_no_edits() {
        let mut seq = CellSequence::new("");
        seq.push_exchange();
        seq.set_active(1); // frozen input
        assert!(seq.focused_editable_mut().is_none());
        seq.set_active(3); // trailing input
        assert!(seq.focused_editable_mut().is_some());
    }

    #[test]
    fn set_active_ignores_out_of_range() {
        let mut seq = CellSequence::new("");
        seq.set_active(99);
        assert_eq!(seq.active_index(), 1);
    }

    #[test]
    fn output_count_tracks_submissions() {
        let mut seq = CellSequence::new("");
        for submissions in 1..=3 {
            seq.push_exchange();
            let outputs = seq
                .iter()
                .filter(|c| c.role() == CellRole::Output)
                .count();
            assert_eq!(outputs, submissions + 1);
        }
    }
}
