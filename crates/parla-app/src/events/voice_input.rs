use parla_types::{AppEvent, RecognitionEvent};

use super::EffectContext;

/// Capture one utterance and feed its transcript back as recognition events
pub fn handle_voice_input(ctx: &EffectContext, locale: String) {
    let event_tx = ctx.event_tx.clone();

    let Some(recognizer) = ctx.services.recognizer.get().cloned() else {
        tracing::warn!("Voice input requested without a recognizer");
        tokio::spawn(async move {
            let _ = event_tx
                .send(AppEvent::Recognition(RecognitionEvent::Failed(
                    "unsupported".to_string(),
                )))
                .await;
        });
        return;
    };

    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if event_tx
            .send(AppEvent::Recognition(RecognitionEvent::Started))
            .await
            .is_err()
        {
            return;
        }

        let result = tokio::select! {
            result = recognizer.recognize(&locale) => result,
            _ = cancel.cancelled() => return,
        };

        let mut events = Vec::new();
        match result {
            Ok(Some(transcript)) => {
                tracing::info!("Heard {} chars in {}", transcript.chars().count(), locale);
                events.push(RecognitionEvent::Transcript(transcript));
                events.push(RecognitionEvent::Ended);
            }
            Ok(None) => {
                tracing::debug!("Voice input ended without speech");
                events.push(RecognitionEvent::Ended);
            }
            Err(e) => {
                tracing::error!("Voice input failed: {}", e);
                events.push(RecognitionEvent::Failed(e.to_string()));
            }
        }

        for event in events {
            if let Err(e) = event_tx.send(AppEvent::Recognition(event)).await {
                tracing::debug!("Dropping recognition event: {}", e);
                break;
            }
        }
    });
}
