use eframe::egui::{RichText, Ui};

use crate::data::relation_label;
use crate::util::{format_amount, format_variance};

use super::super::render_utils::variance_color;
use super::super::ViewModel;

struct ChildRow {
    id: String,
    label: String,
    variance: f64,
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("상세 정보");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected.clone() else {
            ui.label("그래프에서 노드를 선택하세요.");
            return;
        };

        let Some(node) = self.data.tree.find(&selected_id) else {
            ui.label("선택한 노드가 현재 데이터에 없습니다.");
            return;
        };

        let label = node.label.clone();
        let level_label = node.kind.level_label();
        let value = node.value;
        let variance = node.variance;
        let relation = node.relation.clone();
        let children: Vec<ChildRow> = node
            .children
            .iter()
            .map(|child| ChildRow {
                id: child.id.clone(),
                label: child.label.clone(),
                variance: child.variance,
            })
            .collect();

        ui.label(RichText::new(label).strong().size(16.0));
        ui.small(selected_id.as_str());
        ui.add_space(6.0);

        ui.label(format!("단계: {level_label}"));
        ui.label(format!("금액: {}", format_amount(value)));
        ui.horizontal(|ui| {
            ui.label("변동:");
            ui.colored_label(variance_color(variance), format_variance(variance));
        });
        if let Some(code) = &relation {
            ui.label(format!("관계: {}", relation_label(code)));
        }

        ui.separator();
        ui.label(RichText::new(format!("하위 항목 {}개", children.len())).strong());
        if children.is_empty() {
            ui.label("하위 항목이 없습니다.");
            return;
        }

        let mut clicked_child = None;
        for child in &children {
            let row = format!("{}  ({})", child.label, format_variance(child.variance));
            if ui.link(row).on_hover_text(child.id.as_str()).clicked() {
                clicked_child = Some(child.id.clone());
            }
        }

        if let Some(child_id) = clicked_child {
            // Reveal the child before jumping to it.
            if !self.expansion.contains(&selected_id) {
                self.expansion.toggle(&selected_id, &self.data.tree);
            }
            self.selected = Some(child_id);
        }
    }
}
