mod app;
mod data;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Backend base URL, e.g. http://localhost:8000. Without it the
    /// built-in sample dataset is used.
    #[arg(long)]
    api_url: Option<String>,

    /// Reporting period (yyyymm).
    #[arg(long, default_value = "202501")]
    yyyymm: String,

    /// Product code to open with.
    #[arg(long, default_value = "HBM_001")]
    product: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "costgraph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::CostGraphApp::new(
                cc,
                args.api_url.clone(),
                args.yyyymm.clone(),
                args.product.clone(),
            )))
        }),
    )
}
