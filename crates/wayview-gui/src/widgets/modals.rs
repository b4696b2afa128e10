use egui_modal::Modal;

/// The alert surface. Errors queue a dialog body; `show` keeps the
/// dialog on screen until the user dismisses it.
pub struct ErrorModal {
    modal: Modal,
}

impl ErrorModal {
    pub fn new(ctx: &egui::Context, id: impl std::fmt::Display) -> Self {
        Self {
            modal: Modal::new(ctx, id),
        }
    }

    pub fn alert(&self, body: &str) {
        self.modal
            .dialog()
            .with_title("Error")
            .with_icon(egui_modal::Icon::Error)
            .with_body(body)
            .open();
    }

    pub fn show(&mut self) {
        self.modal.show_dialog();
    }
}
