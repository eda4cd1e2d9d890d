use eframe::egui::{Pos2, Ui};

/// Nearest node whose screen circle contains the pointer.
pub(in crate::app) fn hovered_entry(ui: &Ui, screen: &[(Pos2, f32)]) -> Option<usize> {
    let pointer = ui.input(|input| input.pointer.hover_pos())?;
    screen
        .iter()
        .enumerate()
        .filter_map(|(index, &(center, radius))| {
            let distance = center.distance(pointer);
            (distance <= radius).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
