//! Blocking confirmation before destructive actions (delete, cancel).

/// Ask the user to confirm `message`. Without a browser window there is no
/// one to ask, so the action proceeds.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window().map_or(true, |window| window.confirm_with_message(message).unwrap_or(false))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        true
    }
}
