use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::data::{DataSource, HttpSource, SampleSource, SourceData};

mod expansion;
mod force;
mod graph;
mod radial;
mod render_utils;
mod ui;
mod viewport;

use expansion::ExpansionSet;
use force::ForceState;
use radial::Placed;
use viewport::{DragState, Viewport};

pub struct CostGraphApp {
    source: Arc<dyn DataSource>,
    yyyymm: String,
    product_cd: String,
    state: AppState,
    reload_rx: Option<Receiver<LoadReply>>,
    generation: u64,
}

/// Tagged with the request generation so a reply that was overtaken by
/// a newer request can be recognized and dropped instead of clobbering
/// fresher data.
struct LoadReply {
    generation: u64,
    yyyymm: String,
    product_cd: String,
    result: Result<SourceData, String>,
}

enum AppState {
    Loading { rx: Receiver<LoadReply> },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ViewMode {
    Radial,
    Force,
}

struct ViewModel {
    data: SourceData,
    yyyymm: String,
    product_cd: String,
    view: ViewMode,
    search: String,
    selected: Option<String>,
    expansion: ExpansionSet,
    radial_cache: Option<RadialCache>,
    radial_viewport: Viewport,
    radial_drag: DragState,
    force: ForceState,
    force_cache: Option<ForceCache>,
    force_viewport: Viewport,
    force_drag: DragState,
    load_error: Option<String>,
    reload_requested: Option<(String, String)>,
    visible_node_count: usize,
    visible_edge_count: usize,
}

/// Radial layout memoized per expansion revision.
struct RadialCache {
    revision: u64,
    placed: HashMap<String, Placed>,
}

/// Relaxed force layout memoized per force-view revision.
struct ForceCache {
    revision: u64,
    nodes: Vec<ForceDrawNode>,
    edges: Vec<(usize, usize, Option<String>)>,
    half_extents: Vec<Vec2>,
    positions: Vec<Vec2>,
}

struct ForceDrawNode {
    id: String,
    label: String,
    sublabel: Option<String>,
    kind: String,
    val: f64,
    level: u32,
    hidden_children: usize,
}

impl CostGraphApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        api_url: Option<String>,
        yyyymm: String,
        product_cd: String,
    ) -> Self {
        install_cjk_fonts(&cc.egui_ctx);

        let source: Arc<dyn DataSource> = match api_url {
            Some(url) => Arc::new(HttpSource::new(url)),
            None => Arc::new(SampleSource),
        };
        let generation = 1;
        let rx = spawn_load(
            Arc::clone(&source),
            generation,
            yyyymm.clone(),
            product_cd.clone(),
        );

        Self {
            source,
            yyyymm,
            product_cd,
            state: AppState::Loading { rx },
            reload_rx: None,
            generation,
        }
    }
}

fn spawn_load(
    source: Arc<dyn DataSource>,
    generation: u64,
    yyyymm: String,
    product_cd: String,
) -> Receiver<LoadReply> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = source
            .load(&yyyymm, &product_cd)
            .map_err(|error| error.to_string());
        let _ = tx.send(LoadReply {
            generation,
            yyyymm,
            product_cd,
            result,
        });
    });

    rx
}

impl eframe::App for CostGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let source_label = self.source.describe();

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(reply) = rx.try_recv()
                    && reply.generation == self.generation
                {
                    transition = Some(match reply.result {
                        Ok(data) => AppState::Ready(Box::new(ViewModel::new(
                            data,
                            reply.yyyymm,
                            reply.product_cd,
                        ))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("원가 변동 그래프를 불러오는 중...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("데이터 로딩 실패");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("다시 시도").clicked() {
                        self.generation += 1;
                        transition = Some(AppState::Loading {
                            rx: spawn_load(
                                Arc::clone(&self.source),
                                self.generation,
                                self.yyyymm.clone(),
                                self.product_cd.clone(),
                            ),
                        });
                    }
                });
            }
            AppState::Ready(model) => {
                let is_loading = self.reload_rx.is_some();
                model.show(ctx, &source_label, is_loading);

                // A newer request supersedes any in-flight one; the old
                // receiver is dropped and its reply goes nowhere.
                if let Some((yyyymm, product_cd)) = model.take_reload_request() {
                    self.yyyymm = yyyymm;
                    self.product_cd = product_cd;
                    self.generation += 1;
                    self.reload_rx = Some(spawn_load(
                        Arc::clone(&self.source),
                        self.generation,
                        self.yyyymm.clone(),
                        self.product_cd.clone(),
                    ));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(reply) if reply.generation == self.generation => match reply.result {
                            Ok(data) => model.adopt(data, reply.yyyymm, reply.product_cd),
                            Err(error) => model.set_load_error(error),
                        },
                        Ok(_) => {}
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            model.set_load_error("백그라운드 로딩 작업이 중단되었습니다".to_owned());
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

/// egui's bundled fonts carry no CJK glyphs, so the Korean labels need
/// a system font appended to the fallback chain. Missing fonts degrade
/// to the defaults silently.
fn install_cjk_fonts(ctx: &Context) {
    const CANDIDATES: [&str; 5] = [
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        "C:\\Windows\\Fonts\\malgun.ttf",
    ];

    for path in CANDIDATES {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };

        let mut fonts = egui::FontDefinitions::default();
        fonts.font_data.insert(
            "cjk".to_owned(),
            egui::FontData::from_owned(bytes).into(),
        );
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            if let Some(entries) = fonts.families.get_mut(&family) {
                entries.push("cjk".to_owned());
            }
        }
        ctx.set_fonts(fonts);
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, SampleSource};

    fn model() -> ViewModel {
        let data = SampleSource
            .load("202501", "HBM_001")
            .expect("sample load");
        ViewModel::new(data, "202501".to_owned(), "HBM_001".to_owned())
    }

    #[test]
    fn adopt_resets_per_dataset_state_but_keeps_view_mode() {
        let mut model = model();
        model.view = ViewMode::Force;
        model.selected = Some("p1".to_owned());
        model.expansion.toggle("p1", &model.data.tree.clone());
        model.load_error = Some("stale".to_owned());

        let fresh = SampleSource
            .load("202412", "NAND_001")
            .expect("sample load");
        model.adopt(fresh, "202412".to_owned(), "NAND_001".to_owned());

        assert_eq!(model.view, ViewMode::Force);
        assert!(model.selected.is_none());
        assert!(model.load_error.is_none());
        assert_eq!(model.expansion.len(), 1);
        assert_eq!(model.yyyymm, "202412");
        assert_eq!(model.data.tree.label, "NAND_001");
    }

    #[test]
    fn refresh_failure_keeps_the_previous_dataset() {
        let mut model = model();
        let node_count = model.data.tree.node_count();

        model.set_load_error("connection refused".to_owned());
        assert_eq!(model.data.tree.node_count(), node_count);
        assert_eq!(model.load_error.as_deref(), Some("connection refused"));
    }
}
