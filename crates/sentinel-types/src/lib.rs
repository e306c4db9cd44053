//! Shared type definitions for the Traffic Sentinel job.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries and the JSON document published for the dashboard. Types
//! defined here flow downstream to `TypeScript` via `ts-rs` so the dashboard
//! reads the same schema the job writes.
//!
//! # Modules
//!
//! - [`enums`] -- [`Classification`] tiers and their thresholds
//! - [`structs`] -- events, per-address summaries, the snapshot, and the
//!   invocation response

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CRITICAL_THRESHOLD, Classification, WARNING_THRESHOLD};
pub use structs::{
    AddressSummary, AddressedEvent, InvocationResponse, SUCCESS_BODY, Snapshot, TrafficEvent,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the dashboard.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::enums::Classification::export_all();
        let _ = crate::structs::TrafficEvent::export_all();
        let _ = crate::structs::AddressSummary::export_all();
        let _ = crate::structs::Snapshot::export_all();
        let _ = crate::structs::InvocationResponse::export_all();
    }
}
