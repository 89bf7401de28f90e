use std::time::Duration;

/// Settings shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, timeout: Duration) -> Self {
        Self { api_url, timeout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "https://api.example.tld".to_string(),
            Duration::from_secs(10),
        );
        assert_eq!(args.api_url, "https://api.example.tld");
        assert_eq!(args.timeout, Duration::from_secs(10));
    }
}
