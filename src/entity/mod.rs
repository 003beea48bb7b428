pub mod click;
pub mod commission;
pub mod conversion;
pub mod partner;
pub mod payout;

pub use commission::{CommissionStatus, CommissionType};
pub use conversion::ConversionStatus;
pub use partner::PartnerStatus;
pub use payout::PayoutStatus;
