use eframe::egui::{self, Align, Color32, Context, Layout};

use crate::data::{PRODUCT_CATALOG, SourceData};

use super::super::expansion::ExpansionSet;
use super::super::force::ForceState;
use super::super::viewport::{DragState, Viewport};
use super::super::{ViewMode, ViewModel};

pub(in crate::app) fn product_label(code: &str) -> String {
    PRODUCT_CATALOG
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, label)| format!("{label} ({code})"))
        .unwrap_or_else(|| code.to_owned())
}

impl ViewModel {
    pub(in crate::app) fn new(data: SourceData, yyyymm: String, product_cd: String) -> Self {
        let expansion = ExpansionSet::with_root(&data.tree.id);
        Self {
            data,
            yyyymm,
            product_cd,
            view: ViewMode::Radial,
            search: String::new(),
            selected: None,
            expansion,
            radial_cache: None,
            radial_viewport: Viewport::default(),
            radial_drag: DragState::default(),
            force: ForceState::new(),
            force_cache: None,
            force_viewport: Viewport::default(),
            force_drag: DragState::default(),
            load_error: None,
            reload_requested: None,
            visible_node_count: 0,
            visible_edge_count: 0,
        }
    }

    /// Swaps in a freshly loaded dataset. Per-dataset view state resets;
    /// the chosen view mode survives.
    pub(in crate::app) fn adopt(&mut self, data: SourceData, yyyymm: String, product_cd: String) {
        self.expansion = ExpansionSet::with_root(&data.tree.id);
        self.force = ForceState::new();
        self.radial_cache = None;
        self.force_cache = None;
        self.radial_viewport.reset();
        self.force_viewport.reset();
        self.selected = None;
        self.load_error = None;
        self.data = data;
        self.yyyymm = yyyymm;
        self.product_cd = product_cd;
    }

    pub(in crate::app) fn set_load_error(&mut self, error: String) {
        self.load_error = Some(error);
    }

    pub(in crate::app) fn take_reload_request(&mut self) -> Option<(String, String)> {
        self.reload_requested.take()
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, source_label: &str, is_loading: bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("원가 변동 네트워크");
                    ui.separator();
                    ui.label(format!("제품: {}", product_label(&self.product_cd)));
                    ui.label(format!("기간: {}", self.yyyymm));
                    ui.label(format!("데이터: {source_label}"));
                    let refresh = ui.add_enabled(!is_loading, egui::Button::new("새로고침"));
                    if refresh.clicked() {
                        self.reload_requested =
                            Some((self.yyyymm.clone(), self.product_cd.clone()));
                    }
                    if is_loading {
                        ui.spinner();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "노드 {} · 연결 {}",
                            self.visible_node_count, self.visible_edge_count
                        ));
                        if let Some(error) = &self.load_error {
                            ui.colored_label(
                                Color32::from_rgb(220, 38, 38),
                                format!("갱신 실패: {error}"),
                            );
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            ViewMode::Radial => self.draw_radial(ui),
            ViewMode::Force => self.draw_force(ui),
        });
    }
}
