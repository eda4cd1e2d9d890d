use eframe::egui::{self, Color32, RichText, Sense, Ui, vec2};

use crate::data::{NodeKind, PRODUCT_CATALOG, REPORT_MONTHS};

use super::super::render_utils::{force_palette, variance_color};
use super::super::{ViewMode, ViewModel};

fn legend_dot(ui: &mut Ui, color: Color32, text: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::HOVER);
        ui.painter().circle_filled(rect.center(), 5.0, color);
        ui.label(text);
    });
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("보기");
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.view, ViewMode::Radial, "방사형 트리");
            ui.selectable_value(&mut self.view, ViewMode::Force, "인과 그래프");
        });

        ui.separator();
        ui.heading("조회 조건");
        let mut request_changed = false;
        egui::ComboBox::from_label("기간")
            .selected_text(self.yyyymm.clone())
            .show_ui(ui, |ui| {
                for month in REPORT_MONTHS {
                    if ui
                        .selectable_value(&mut self.yyyymm, month.to_owned(), month)
                        .changed()
                    {
                        request_changed = true;
                    }
                }
            });
        egui::ComboBox::from_label("제품")
            .selected_text(super::panels::product_label(&self.product_cd))
            .show_ui(ui, |ui| {
                for (code, label) in PRODUCT_CATALOG {
                    if ui
                        .selectable_value(
                            &mut self.product_cd,
                            code.to_owned(),
                            format!("{label} ({code})"),
                        )
                        .changed()
                    {
                        request_changed = true;
                    }
                }
            });
        if request_changed {
            self.reload_requested = Some((self.yyyymm.clone(), self.product_cd.clone()));
        }

        ui.separator();
        ui.heading("화면");
        let viewport = match self.view {
            ViewMode::Radial => &mut self.radial_viewport,
            ViewMode::Force => &mut self.force_viewport,
        };
        let mut reset_requested = false;
        ui.horizontal(|ui| {
            if ui.button("확대 +").clicked() {
                viewport.zoom_in();
            }
            if ui.button("축소 −").clicked() {
                viewport.zoom_out();
            }
            if ui.button("화면 맞춤").clicked() {
                viewport.reset();
            }
            if ui.button("초기화").clicked() {
                reset_requested = true;
            }
        });
        // Reset goes beyond fit: back to the initial expansion and no
        // selection.
        if reset_requested {
            viewport.reset();
            match self.view {
                ViewMode::Radial => {
                    let root_id = self.data.tree.id.clone();
                    self.expansion.reset_to_root(&root_id);
                }
                ViewMode::Force => self.force.collapse_all(),
            }
            self.selected = None;
        }

        ui.horizontal(|ui| match self.view {
            ViewMode::Radial => {
                if ui.button("전체 펼치기").clicked() {
                    self.expansion.expand_all(&self.data.tree);
                }
                if ui.button("전체 접기").clicked() {
                    let root_id = self.data.tree.id.clone();
                    self.expansion.reset_to_root(&root_id);
                }
            }
            ViewMode::Force => {
                if ui.button("전체 펼치기").clicked() {
                    self.force.expand_all(&self.data.graph);
                }
                if ui.button("전체 접기").clicked() {
                    self.force.collapse_all();
                }
            }
        });

        ui.separator();
        ui.heading("검색");
        ui.add(egui::TextEdit::singleline(&mut self.search).hint_text("노드 검색"));

        ui.separator();
        ui.heading("범례");
        ui.label(RichText::new("단계").strong());
        for kind in NodeKind::ALL {
            let (_, border, _) = force_palette(kind.wire_name());
            legend_dot(ui, border, kind.level_label());
        }

        ui.add_space(6.0);
        ui.label(RichText::new("원가 변동").strong());
        for (text, sample) in [
            ("+10억 초과", 15.0),
            ("+5억 ~ +10억", 7.0),
            ("0 ~ +5억", 2.0),
            ("-5억 ~ 0", -3.0),
            ("-5억 이하", -8.0),
        ] {
            legend_dot(ui, variance_color(sample), text);
        }
    }
}
