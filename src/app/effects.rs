use crate::app::{App, Message, Model, ToastLevel};

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Some(text) = model.pending_clipboard.take()
            && let Err(err) = model.clipboard.publish(&text)
        {
            tracing::warn!(error = %err, "clipboard publish failed");
            model.show_toast(ToastLevel::Warning, format!("Copy failed: {err}"));
        }

        if matches!(msg, Message::Save) {
            model.save();
        }
    }
}
