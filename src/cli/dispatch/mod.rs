use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::Result;
use std::time::Duration;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let api_url = matches
        .get_one("api-url")
        .map(|s: &String| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --api-url"))?;

    let timeout = Duration::from_secs(matches.get_one::<u64>("timeout").copied().unwrap_or(10));

    let action = Action::Login {
        email: matches
            .get_one("email")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: email"))?,
        remember: matches.get_flag("remember"),
    };

    Ok((action, GlobalArgs::new(api_url, timeout)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn test_handler_builds_login_action() {
        let matches = commands::new().get_matches_from(vec![
            "sesame",
            "--api-url",
            "https://api.example.tld",
            "--remember",
            "a@b.com",
        ]);

        let (action, globals) = handler(&matches).expect("handler should succeed");

        let Action::Login { email, remember } = action;
        assert_eq!(email, "a@b.com");
        assert!(remember);
        assert_eq!(globals.api_url, "https://api.example.tld");
        assert_eq!(globals.timeout, Duration::from_secs(10));
    }
}
