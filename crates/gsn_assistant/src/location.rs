//! One-shot geolocation.

use crate::error::GeolocationError;
use crate::gemini::LatLng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Provides the current position.
pub trait LocationProvider: Send + Sync {
    /// Requests the current position once.
    fn current_position(&self) -> impl Future<Output = Result<LatLng, GeolocationError>> + Send;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub LatLng);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> impl Future<Output = Result<LatLng, GeolocationError>> + Send {
        std::future::ready(Ok(self.0))
    }
}

/// Always fails with the given error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoLocation(pub GeolocationError);

impl LocationProvider for NoLocation {
    fn current_position(&self) -> impl Future<Output = Result<LatLng, GeolocationError>> + Send {
        std::future::ready(Err(self.0.clone()))
    }
}

/// Requests the position, giving up after `timeout`.
pub async fn locate<L: LocationProvider>(
    provider: &L,
    timeout: Duration,
) -> Result<LatLng, GeolocationError> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(Ok(position)) => Ok(position),
        Ok(Err(e)) => {
            warn!(error = %e, "Geolocation failed");
            Err(e)
        }
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "Geolocation timed out");
            Err(GeolocationError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverAnswers;

    impl LocationProvider for NeverAnswers {
        fn current_position(
            &self,
        ) -> impl Future<Output = Result<LatLng, GeolocationError>> + Send {
            std::future::pending()
        }
    }

    #[tokio::test]
    async fn fixed_location_answers() {
        let leiria = LatLng::new(39.7436, -8.8071);
        let position = locate(&FixedLocation(leiria), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(position, leiria);
    }

    #[tokio::test]
    async fn denied_location_is_reported() {
        let err = locate(&NoLocation(GeolocationError::PermissionDenied), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err, GeolocationError::PermissionDenied);
    }

    #[tokio::test(start_paused = true)]
    async fn silent_provider_times_out() {
        let err = locate(&NeverAnswers, Duration::from_secs(10)).await.unwrap_err();
        assert_eq!(err, GeolocationError::Timeout);
    }
}
