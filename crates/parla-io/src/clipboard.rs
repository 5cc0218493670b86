use arboard::Clipboard;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),

    #[error("Clipboard task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Put `text` on the system clipboard.
///
/// arboard talks to the platform synchronously, so the write runs on the
/// blocking pool.
pub async fn write_text(text: String) -> Result<(), ClipboardError> {
    let chars = text.chars().count();

    tokio::task::spawn_blocking(move || -> Result<(), ClipboardError> {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    })
    .await??;

    tracing::debug!("Copied {} chars to clipboard", chars);
    Ok(())
}
