pub mod logging;
pub mod native_messaging;
