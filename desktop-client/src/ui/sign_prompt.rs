use eframe::egui;
use std::sync::{Arc, Mutex};
use tictactoe_common::Mark;

struct SignPromptApp {
    selected: Mark,
    result: Arc<Mutex<Option<Mark>>>,
}

impl SignPromptApp {
    fn new(initial: Mark, result: Arc<Mutex<Option<Mark>>>) -> Self {
        Self {
            selected: initial,
            result,
        }
    }

    fn submit(&mut self, ctx: &egui::Context) {
        if let Ok(mut slot) = self.result.lock() {
            *slot = Some(self.selected);
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for SignPromptApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading("Choose your sign:");
                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    ui.add_space(ui.available_width() / 2.0 - 60.0);
                    for mark in [Mark::X, Mark::O] {
                        let text = egui::RichText::new(mark.symbol()).size(32.0).strong();
                        ui.selectable_value(&mut self.selected, mark, text);
                        ui.add_space(20.0);
                    }
                });

                ui.add_space(15.0);
                let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Start (Enter)").clicked() || enter_pressed {
                    self.submit(ctx);
                }
            });
        });
    }
}

/// Shows the sign selection window. `None` means the window was closed
/// without pressing Start.
pub fn prompt_for_sign(initial: Mark) -> Option<Mark> {
    let result = Arc::new(Mutex::new(None));
    let result_clone = result.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([300.0, 200.0])
            .with_resizable(false)
            .with_title("Sign Selection"),
        ..Default::default()
    };

    let _ = eframe::run_native(
        "Sign Selection",
        options,
        Box::new(move |_cc| Ok(Box::new(SignPromptApp::new(initial, result_clone)))),
    );

    Arc::try_unwrap(result)
        .ok()
        .and_then(|mutex| mutex.into_inner().ok())
        .flatten()
}
