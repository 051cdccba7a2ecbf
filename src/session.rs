pub const COOKIE_SESSION: &str = "session_token";
pub const COOKIE_USERNAME: &str = "session_user";
