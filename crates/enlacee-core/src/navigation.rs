//! Client-side routes and the navigation seam.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The sign-in form
    Login,
    /// Account creation
    Register,
    /// Authenticated landing page
    Admin,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Admin => "/admin",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Receives navigation requests, possibly from a timer task
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Admin.path(), "/admin");
        assert_eq!(Route::Register.path(), "/register");
        assert_eq!(Route::Login.path(), "/");
        assert_eq!(Route::Admin.to_string(), "/admin");
    }
}
