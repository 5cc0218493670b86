use super::EffectContext;

/// Play a pronunciation recording, cutting off the previous one
pub fn handle_play_audio(ctx: &mut EffectContext, url: String) {
    let Some(player) = ctx.services.audio_player.get().cloned() else {
        tracing::warn!("Pronunciation requested without an audio player");
        return;
    };

    let playing = ctx.cancel.child_token();
    if let Some(previous) = ctx.pronunciation.replace(playing.clone()) {
        previous.cancel();
    }

    tokio::spawn(async move {
        tokio::select! {
            result = player.play(&url) => {
                if let Err(e) = result {
                    tracing::error!("Pronunciation {} failed: {}", url, e);
                }
            }
            _ = playing.cancelled() => {
                tracing::debug!("Pronunciation {} stopped", url);
            }
        }
    });
}
