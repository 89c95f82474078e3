use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use polyglot_config::speech::SpeechConfig;
use polyglot_types::{LanguageCode, SpeechStatus};
use tokio::process::Command;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Words per minute at rate 1.0, espeak's default
const BASE_WPM: f32 = 175.0;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Failed to start speech command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Speech command exited with status {0:?}")]
    Exited(Option<i32>),
}

/// Something that can read text aloud until done or cancelled
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Returns once playback ends; cancellation counts as a normal end
    async fn say(
        &self,
        text: &str,
        tag: &str,
        rate: f32,
        cancel: CancellationToken,
    ) -> Result<(), SpeechError>;
}

/// Runs an external text-to-speech program per utterance
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
}

impl CommandBackend {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    pub fn render_args(&self, text: &str, tag: &str, rate: f32) -> Vec<String> {
        let wpm = (BASE_WPM * rate).round().max(1.0) as u32;
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{lang}", tag)
                    .replace("{rate}", &rate.to_string())
                    .replace("{wpm}", &wpm.to_string())
                    .replace("{text}", text)
            })
            .collect()
    }
}

#[async_trait]
impl SpeechBackend for CommandBackend {
    async fn say(
        &self,
        text: &str,
        tag: &str,
        rate: f32,
        cancel: CancellationToken,
    ) -> Result<(), SpeechError> {
        let mut child = Command::new(&self.program)
            .args(self.render_args(text, tag, rate))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        tokio::select! {
            status = child.wait() => {
                let status = status?;
                if status.success() {
                    Ok(())
                } else {
                    Err(SpeechError::Exited(status.code()))
                }
            }
            _ = cancel.cancelled() => {
                tracing::debug!("speech cancelled, stopping {}", self.program);
                child.kill().await?;
                Ok(())
            }
        }
    }
}

/// Single-utterance player publishing `Idle -> Speaking -> Idle` transitions.
///
/// A new [`Speaker::speak`] cancels the utterance in flight. Only the most
/// recent utterance may move the state, so a cancelled one never resets it.
pub struct Speaker {
    backend: Option<Arc<dyn SpeechBackend>>,
    rate: f32,
    state: Arc<watch::Sender<SpeechStatus>>,
    generation: Arc<AtomicU64>,
    current: Mutex<Option<CancellationToken>>,
}

impl Speaker {
    pub fn new(backend: Arc<dyn SpeechBackend>, rate: f32) -> Self {
        Self::with_backend(Some(backend), rate)
    }

    /// Speaker whose `speak` does nothing
    pub fn disabled() -> Self {
        Self::with_backend(None, 1.0)
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        if config.enabled {
            Self::new(Arc::new(CommandBackend::from_config(config)), config.rate)
        } else {
            Self::disabled()
        }
    }

    fn with_backend(backend: Option<Arc<dyn SpeechBackend>>, rate: f32) -> Self {
        let (state, _) = watch::channel(SpeechStatus::Idle);
        Self {
            backend,
            rate,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            current: Mutex::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<SpeechStatus> {
        self.state.subscribe()
    }

    pub fn status(&self) -> SpeechStatus {
        self.state.borrow().clone()
    }

    /// Stop whatever is playing and start `text`; must run inside a tokio runtime
    pub fn speak(&self, text: String, code: LanguageCode, tag: String) {
        let Some(backend) = self.backend.clone() else {
            tracing::debug!("speech disabled, ignoring request for {code}");
            return;
        };

        let token = self.replace_current();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);
        let rate = self.rate;

        tokio::spawn(async move {
            let is_latest = || latest.load(Ordering::SeqCst) == generation;

            if token.is_cancelled() {
                return;
            }
            state.send_if_modified(|s| {
                if !is_latest() {
                    return false;
                }
                *s = SpeechStatus::Speaking {
                    code: code.clone(),
                    tag: tag.clone(),
                };
                true
            });

            if let Err(e) = backend.say(&text, &tag, rate, token).await {
                tracing::warn!("speech for {code} failed: {e}");
            }

            state.send_if_modified(|s| {
                if !is_latest() || *s == SpeechStatus::Idle {
                    return false;
                }
                *s = SpeechStatus::Idle;
                true
            });
        });
    }

    /// Stop the utterance in flight, if any
    pub fn cancel(&self) {
        if let Some(token) = self.lock_current().take() {
            token.cancel();
        }
    }

    fn replace_current(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.lock_current().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::Notify;
    use tokio::time::timeout;

    use super::*;

    /// Plays until cancelled or released through `finish`
    #[derive(Default)]
    struct FakeBackend {
        finish: Notify,
        spoken: Mutex<Vec<(String, String)>>,
        cancelled: AtomicU64,
    }

    #[async_trait]
    impl SpeechBackend for FakeBackend {
        async fn say(
            &self,
            text: &str,
            tag: &str,
            _rate: f32,
            cancel: CancellationToken,
        ) -> Result<(), SpeechError> {
            self.spoken
                .lock()
                .unwrap()
                .push((text.to_string(), tag.to_string()));
            tokio::select! {
                _ = self.finish.notified() => Ok(()),
                _ = cancel.cancelled() => {
                    self.cancelled.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            }
        }
    }

    async fn wait_for(rx: &mut watch::Receiver<SpeechStatus>, want: SpeechStatus) {
        timeout(Duration::from_secs(2), rx.wait_for(|s| *s == want))
            .await
            .expect("state never reached")
            .expect("speaker dropped");
    }

    fn speaking(code: &str, tag: &str) -> SpeechStatus {
        SpeechStatus::Speaking {
            code: code.to_string(),
            tag: tag.to_string(),
        }
    }

    #[tokio::test]
    async fn speak_moves_to_speaking_then_idle() {
        let backend = Arc::new(FakeBackend::default());
        let speaker = Speaker::new(backend.clone(), 0.9);
        let mut rx = speaker.subscribe();

        speaker.speak("Hola".to_string(), "ES".to_string(), "es-ES".to_string());
        wait_for(&mut rx, speaking("ES", "es-ES")).await;

        backend.finish.notify_one();
        wait_for(&mut rx, SpeechStatus::Idle).await;
        assert_eq!(
            *backend.spoken.lock().unwrap(),
            vec![("Hola".to_string(), "es-ES".to_string())]
        );
    }

    #[tokio::test]
    async fn new_utterance_cancels_the_previous_one() {
        let backend = Arc::new(FakeBackend::default());
        let speaker = Speaker::new(backend.clone(), 0.9);
        let mut rx = speaker.subscribe();

        speaker.speak("Hola".to_string(), "ES".to_string(), "es-ES".to_string());
        wait_for(&mut rx, speaking("ES", "es-ES")).await;

        speaker.speak("Hallo".to_string(), "DE".to_string(), "de-DE".to_string());
        wait_for(&mut rx, speaking("DE", "de-DE")).await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(backend.cancelled.load(Ordering::SeqCst), 1);
        assert_eq!(speaker.status(), speaking("DE", "de-DE"));

        backend.finish.notify_one();
        wait_for(&mut rx, SpeechStatus::Idle).await;
    }

    #[tokio::test]
    async fn cancel_returns_to_idle() {
        let backend = Arc::new(FakeBackend::default());
        let speaker = Speaker::new(backend.clone(), 1.0);
        let mut rx = speaker.subscribe();

        speaker.speak("Ciao".to_string(), "IT".to_string(), "it-IT".to_string());
        wait_for(&mut rx, speaking("IT", "it-IT")).await;

        speaker.cancel();
        wait_for(&mut rx, SpeechStatus::Idle).await;
    }

    #[tokio::test]
    async fn disabled_speaker_stays_idle() {
        let speaker = Speaker::disabled();
        speaker.speak("Hej".to_string(), "SV".to_string(), "sv-SE".to_string());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(speaker.status(), SpeechStatus::Idle);
        assert!(!speaker.is_enabled());
    }

    #[test]
    fn command_arguments_are_templated() {
        let backend = CommandBackend::from_config(&SpeechConfig::default());
        assert_eq!(
            backend.render_args("Guten Tag", "de-DE", 1.2),
            vec!["-v", "de-DE", "-s", "210", "Guten Tag"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_command_reports_exit_status() {
        let backend = CommandBackend::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);
        let err = backend
            .say("x", "en-GB", 1.0, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::Exited(Some(3))));
    }
}
