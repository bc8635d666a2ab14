use crate::CanvasApp;

/// The canvas fills whatever the other panels leave free.
pub fn central_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            app.canvas_frame(ctx, &response, painter);
        });
}
