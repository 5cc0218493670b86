use parla_types::{AppEvent, TranslationOutcome, TranslationRequest};

use super::EffectContext;

/// Run one translation request and report it under its generation
pub fn handle_translate(ctx: &EffectContext, generation: u64, request: TranslationRequest) {
    let translator = ctx.services.translator.clone();
    let event_tx = ctx.event_tx.clone();
    let cancel = ctx.cancel.clone();

    tracing::debug!(
        "Translating #{}: {} chars, {} -> {}",
        generation,
        request.text.chars().count(),
        request.source.as_deref().unwrap_or("auto"),
        request.target
    );

    tokio::spawn(async move {
        let result = tokio::select! {
            result = translator.translate(&request) => result,
            _ = cancel.cancelled() => return,
        };

        let result = match result {
            Ok(translation) => {
                if let Some(detected) = &translation.detected_source {
                    tracing::debug!("Translation #{} detected {}", generation, detected);
                }
                Ok(TranslationOutcome {
                    text: translation.text,
                    detected_language: translation.detected_source,
                })
            }
            Err(e) => {
                tracing::error!("Translation #{} failed: {}", generation, e);
                Err(e.to_string())
            }
        };

        if let Err(e) = event_tx
            .send(AppEvent::TranslationFinished { generation, result })
            .await
        {
            tracing::debug!("Dropping translation #{}: {}", generation, e);
        }
    });
}
