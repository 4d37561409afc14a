use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The stats server the monitor talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// A server running on this machine on the default port.
    #[default]
    Local,
    /// Any other server, addressed by its base URL.
    Custom { server_url: String },
}

impl Environment {
    /// Returns the base URL of the stats server.
    pub fn server_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:5000".to_string(),
            Environment::Custom { server_url } => server_url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::Custom {
                server_url: trimmed.trim_end_matches('/').to_string(),
            });
        }
        Err(format!(
            "Invalid server '{}': expected 'local' or an http(s) URL",
            s
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { server_url } => write!(f, "Custom ({})", server_url),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.server_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_local_case_insensitively() {
        assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
    }

    #[test]
    fn parses_url_and_strips_trailing_slash() {
        let env: Environment = "http://10.0.0.5:8080/".parse().unwrap();
        assert_eq!(
            env,
            Environment::Custom {
                server_url: "http://10.0.0.5:8080".to_string()
            }
        );
        assert_eq!(env.server_url(), "http://10.0.0.5:8080");
    }

    #[test]
    fn rejects_bare_host() {
        assert!("10.0.0.5:8080".parse::<Environment>().is_err());
    }

    #[test]
    fn local_points_at_default_port() {
        assert_eq!(Environment::Local.server_url(), "http://localhost:5000");
    }
}
