//! Transfer Form Logic
//!
//! Amount/fee/balance arithmetic, the form state container, and the
//! pre-submit validation that turns a filled form into a `TransferRequest`.
//! Everything here is synchronous and free of I/O; callers resolve balances,
//! fees and prices first and pass them in through [`FormContext`].

pub mod calculator;
pub mod constants;
pub mod state;
pub mod validate;

pub use calculator::{
    canonical_amount, compare_to_max, fee_shortfall, format_base_units, format_display,
    format_input_display, format_usd, from_base_units, max_sendable, normalize_amount_input,
    shortfall, to_base_units, usd_estimate, MaxComparison,
};
pub use state::{FeeAsset, FormContext, FormView, MaxAction, TransferForm};
pub use validate::{remaining_balance, validate_transfer, TransferSummary, ValidatedTransfer};
