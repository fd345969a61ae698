pub mod engine;
pub mod fingerprint;
pub mod game;
pub mod hint;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "klondike"
    }

    pub const fn codename() -> &'static str {
        "Patience"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
