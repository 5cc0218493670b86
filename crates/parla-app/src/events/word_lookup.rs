use parla_types::AppEvent;

use super::EffectContext;

/// Look a word up; failures surface as "no entry"
pub fn handle_word_lookup(ctx: &EffectContext, generation: u64, word: String) {
    let dictionary = ctx.services.dictionary.clone();
    let event_tx = ctx.event_tx.clone();
    let cancel = ctx.cancel.clone();

    tokio::spawn(async move {
        let result = tokio::select! {
            result = dictionary.lookup(&word) => result,
            _ = cancel.cancelled() => return,
        };

        let entry = match result {
            Ok(Some(entry)) => Some(entry),
            Ok(None) => {
                tracing::debug!("No dictionary entry for '{}'", word);
                None
            }
            Err(e) => {
                tracing::warn!("Dictionary lookup for '{}' failed: {}", word, e);
                None
            }
        };

        if let Err(e) = event_tx
            .send(AppEvent::DictionaryFinished { generation, entry })
            .await
        {
            tracing::debug!("Dropping lookup #{}: {}", generation, e);
        }
    });
}
