use crate::application_port::*;

/// Fire-and-forget warning delivery. Failures are logged by the caller and
/// never propagate into the refresh result.
#[async_trait::async_trait]
pub trait WarningNotifier: Send + Sync {
    async fn send_warning(&self, to_email: &str, subject: &str, body: &str)
    -> Result<(), AuthError>;
}
