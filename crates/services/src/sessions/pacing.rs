use std::time::Duration;

/// Defers the transition from a revealed answer to the next question.
///
/// This is the only place the session waits on time; selection and question
/// generation stay synchronous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pacer {
    /// Sleep on the tokio timer.
    #[default]
    Tokio,
    /// Return at once. For tests and headless drivers.
    Immediate,
}

impl Pacer {
    /// Wait `delay` before the caller schedules the next pick.
    pub async fn wait(&self, delay: Duration) {
        match self {
            Pacer::Tokio => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Pacer::Immediate => {}
        }
    }
}
