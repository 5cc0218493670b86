use parla_types::AppEvent;

use super::EffectContext;

pub fn handle_clipboard_write(ctx: &EffectContext, text: String) {
    let event_tx = ctx.event_tx.clone();

    tokio::spawn(async move {
        let success = match parla_io::clipboard::write_text(text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to write clipboard: {}", e);
                false
            }
        };

        let _ = event_tx.send(AppEvent::ClipboardWritten { success }).await;
    });
}
