use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Requests shutdown. Cloned into every listener that can stop the loop.
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

/// Observes shutdown. Once triggered it stays triggered.
#[derive(Clone, Debug)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown is requested. Never resolves if every handle
    /// was dropped without triggering.
    pub async fn wait(&mut self) {
        let closed = self.rx.wait_for(|triggered| *triggered).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}

pub fn shutdown_channel() -> (ShutdownHandle, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx: Arc::new(tx) }, Shutdown { rx })
}

/// Asks the refresh loop to repaint even when the next frame is unchanged,
/// e.g. after the terminal was resized and the old picture is gone.
#[derive(Clone, Debug)]
pub struct RedrawHandle {
    tx: Arc<watch::Sender<u64>>,
}

impl RedrawHandle {
    pub fn request(&self) {
        self.tx.send_modify(|requests| *requests = requests.wrapping_add(1));
    }
}

#[derive(Debug)]
pub struct Redraw {
    rx: watch::Receiver<u64>,
}

impl Redraw {
    /// True once per batch of requests made since the last call.
    pub fn take(&mut self) -> bool {
        match self.rx.has_changed() {
            Ok(true) => {
                self.rx.borrow_and_update();
                true
            }
            _ => false,
        }
    }
}

pub fn redraw_channel() -> (RedrawHandle, Redraw) {
    let (tx, rx) = watch::channel(0);
    (RedrawHandle { tx: Arc::new(tx) }, Redraw { rx })
}

/// Trigger shutdown on SIGINT / Ctrl+C delivered as a signal.
pub fn spawn_signal_listener(handle: ShutdownHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::debug!("interrupt signal received");
                handle.trigger();
            }
            Err(err) => tracing::warn!(error = %err, "cannot listen for interrupt signal"),
        }
    })
}

/// In raw mode Ctrl+C arrives as a key press, so the full-screen renderer
/// needs a key listener as well. Resizes are forwarded as redraw requests.
pub fn spawn_key_listener(
    handle: ShutdownHandle,
    redraw: RedrawHandle,
    mut shutdown: Shutdown,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if is_quit_key(&key) {
                                tracing::debug!(code = ?key.code, "quit key pressed");
                                handle.trigger();
                                break;
                            }
                        }
                        Some(Ok(Event::Resize(width, height))) => {
                            tracing::debug!(width, height, "terminal resized");
                            redraw.request();
                        }
                        Some(Ok(_)) => {}
                        Some(Err(err)) => {
                            tracing::warn!(error = %err, "terminal event stream failed");
                            break;
                        }
                        None => break,
                    }
                }
                _ = shutdown.wait() => break,
            }
        }
    })
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') => !key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Esc => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = key(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_quit_key(&release));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_resolves_after_trigger() {
        let (handle, mut shutdown) = shutdown_channel();
        assert!(!shutdown.is_triggered());
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            handle.trigger();
        });
        shutdown.wait().await;
        assert!(shutdown.is_triggered());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_never_resolves() {
        let (handle, mut shutdown) = shutdown_channel();
        drop(handle);
        let waited = tokio::time::timeout(Duration::from_secs(5), shutdown.wait()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }

    #[test]
    fn redraw_requests_are_taken_once() {
        let (handle, mut redraw) = redraw_channel();
        assert!(!redraw.take());
        handle.request();
        handle.request();
        assert!(redraw.take());
        assert!(!redraw.take());
        handle.clone().request();
        assert!(redraw.take());
    }

    #[test]
    fn dropped_redraw_handle_requests_nothing() {
        let (handle, mut redraw) = redraw_channel();
        drop(handle);
        assert!(!redraw.take());
    }

    #[tokio::test]
    async fn trigger_is_sticky_for_late_observers() {
        let (handle, shutdown) = shutdown_channel();
        handle.trigger();
        let mut late = shutdown.clone();
        late.wait().await;
        assert!(late.is_triggered());
    }
}
