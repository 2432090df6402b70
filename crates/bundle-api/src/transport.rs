use crate::{BundleApiError, BundleRequest, BundleResponse};
use core::future::Future;

/// A trait for submitting simulation bundles.
///
/// Implementors must execute the simulations in submission order and return
/// exactly one result per simulation, in the same order.
pub trait BundleTransport: Sync {
    /// Submit a bundle.
    fn simulate_bundle(
        &self,
        bundle: BundleRequest,
    ) -> impl Future<Output = Result<BundleResponse, BundleApiError>> + Send;
}

impl<T: BundleTransport> BundleTransport for &T {
    fn simulate_bundle(
        &self,
        bundle: BundleRequest,
    ) -> impl Future<Output = Result<BundleResponse, BundleApiError>> + Send {
        T::simulate_bundle(self, bundle)
    }
}
