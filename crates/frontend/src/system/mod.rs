pub mod entitlements;
