//! Organizer payment dashboard.

use tracing::instrument;

use boxoffice_core::PaymentDashboard;

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Balances, sales totals and recent payouts for the signed-in organizer.
    ///
    /// `GET /organizer/payments/dashboard`
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_payment_dashboard(&self) -> Result<PaymentDashboard, ApiError> {
        self.get("/organizer/payments/dashboard").await
    }
}
