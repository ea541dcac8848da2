//! Read-only preview grid of the last exported table.

use eframe::egui;

use pdfscrape_core::{LineItemTable, SortOrder};

/// Last exported table plus the column the user sorted by, if any.
///
/// Nothing is shown until an export succeeds.
#[derive(Debug, Default)]
pub struct Preview {
    table: Option<LineItemTable>,
    sort: Option<(usize, SortOrder)>,
    order: Vec<usize>,
}

impl Preview {
    /// Replace the shown table; sorting is reset to table order.
    pub fn set_table(&mut self, table: LineItemTable) {
        self.order = (0..table.len()).collect();
        self.table = Some(table);
        self.sort = None;
    }

    /// Hide the grid until the next successful export.
    pub fn clear(&mut self) {
        self.table = None;
        self.sort = None;
        self.order.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.table.is_some()
    }

    pub fn sort(&self) -> Option<(usize, SortOrder)> {
        self.sort
    }

    /// Header click: ascending on a new column, flipped on the same one.
    pub fn toggle_sort(&mut self, column: usize) {
        let order = match self.sort {
            Some((current, order)) if current == column => order.toggled(),
            _ => SortOrder::Ascending,
        };
        let Some(table) = &self.table else {
            return;
        };
        self.sort = Some((column, order));
        self.order = table.sorted_indices(column, order);
    }

    /// Row indices in display order.
    pub fn display_order(&self) -> &[usize] {
        &self.order
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(table) = &self.table else {
            return;
        };
        let columns = table.columns();
        let mut clicked = None;

        egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            egui::Grid::new("line_items")
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for (index, name) in columns.iter().enumerate() {
                        let marker = match self.sort {
                            Some((col, SortOrder::Ascending)) if col == index => " ^",
                            Some((col, SortOrder::Descending)) if col == index => " v",
                            _ => "",
                        };
                        let label = egui::RichText::new(format!("{name}{marker}")).strong();
                        if ui.button(label).clicked() {
                            clicked = Some(index);
                        }
                    }
                    ui.end_row();

                    for &row in &self.order {
                        for value in table.items()[row].fields() {
                            ui.label(value);
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(column) = clicked {
            self.toggle_sort(column);
        }
    }
}
