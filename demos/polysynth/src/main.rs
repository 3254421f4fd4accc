//! Standalone PolySynth control surface.
//!
//! Runs the full surface under eframe against the loopback host, or fully
//! disconnected with `--disconnected` (outbound traffic is then dropped with
//! a log line, the degraded mode a browser-only session uses).

mod loopback;

use std::time::Duration;

use eframe::egui;
use fascia::prelude::*;
use loopback::{LoopbackHost, LoopbackLink};

struct PolySynthApp {
    surface: Surface,
    panel: SurfacePanel,
}

impl PolySynthApp {
    fn new(surface: Surface) -> Self {
        Self {
            surface,
            panel: SurfacePanel::new(),
        }
    }
}

impl eframe::App for PolySynthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let host_traffic = self.surface.pump_host_events();
        let animating = self.surface.tick_animations();
        if host_traffic || animating {
            ctx.request_repaint();
        }
        // Poll for host traffic even when the user is idle.
        ctx.request_repaint_after(Duration::from_millis(100));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.panel.ui(ui, &mut self.surface);
        });
    }
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let disconnected = std::env::args().any(|arg| arg == "--disconnected");

    let surface = if disconnected {
        log::info!("running disconnected; outbound messages will be dropped");
        let (bridge, _endpoint) = Bridge::disconnected();
        Surface::new(ParamRegistry::poly_synth(), bridge)
    } else {
        let host = LoopbackHost::new();
        let (bridge, endpoint) = Bridge::connect(LoopbackLink(host.clone()));
        host.attach(endpoint);
        Surface::new(ParamRegistry::poly_synth(), bridge)
    };
    let surface = surface.with_adsr_sources(SurfacePanel::ADSR_SOURCES);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 560.0])
            .with_title("PolySynth"),
        ..Default::default()
    };

    eframe::run_native(
        "PolySynth",
        options,
        Box::new(move |_cc| Box::new(PolySynthApp::new(surface))),
    )
}
