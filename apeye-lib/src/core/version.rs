pub fn app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// `User-Agent` sent on direct requests that do not set one.
pub fn user_agent() -> String {
    format!("apeye/{}", app_version())
}
