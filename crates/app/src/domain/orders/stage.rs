//! Checkout stages.

use std::fmt;

/// Progress of a single checkout. Anything that fails before
/// [`CheckoutStage::OrderCommitted`] leaves no trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    CartLoaded,
    CouponResolved,
    TotalComputed,
    CartRetired,
    OrderCommitted,
}

impl CheckoutStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CartLoaded => "cart_loaded",
            Self::CouponResolved => "coupon_resolved",
            Self::TotalComputed => "total_computed",
            Self::CartRetired => "cart_retired",
            Self::OrderCommitted => "order_committed",
        }
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
