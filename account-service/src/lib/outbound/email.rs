pub mod relay;

pub use relay::RelayEmailNotifier;
