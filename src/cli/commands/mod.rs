use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("sesame")
        .about("Passwordless email login client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("email")
                .help("Email address to sign in with")
                .required(true),
        )
        .arg(
            Arg::new("api-url")
                .short('u')
                .long("api-url")
                .help("Base URL of the authentication API, example: https://api.example.tld")
                .env("SESAME_API_URL")
                .required(true),
        )
        .arg(
            Arg::new("remember")
                .short('r')
                .long("remember")
                .help("Ask the server to remember this device")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("SESAME_TIMEOUT")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SESAME_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "sesame");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Passwordless email login client"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_email_and_api_url() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "sesame",
            "--api-url",
            "https://api.example.tld",
            "--timeout",
            "30",
            "a@b.com",
        ]);

        assert_eq!(
            matches.get_one::<String>("email").map(|s| s.to_string()),
            Some("a@b.com".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("api-url").map(|s| s.to_string()),
            Some("https://api.example.tld".to_string())
        );
        assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(30));
        assert!(!matches.get_flag("remember"));
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("SESAME_API_URL", Some("https://api.example.tld")),
                ("SESAME_TIMEOUT", Some("5")),
                ("SESAME_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["sesame", "a@b.com"]);
                assert_eq!(
                    matches.get_one::<String>("api-url").map(|s| s.to_string()),
                    Some("https://api.example.tld".to_string())
                );
                assert_eq!(matches.get_one::<u64>("timeout").copied(), Some(5));
                assert_eq!(matches.get_one::<u8>("verbosity").copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("SESAME_LOG_LEVEL", Some(level)),
                    ("SESAME_API_URL", Some("https://api.example.tld")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["sesame", "a@b.com"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").copied(),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("SESAME_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "sesame".to_string(),
                    "--api-url".to_string(),
                    "https://api.example.tld".to_string(),
                    "a@b.com".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();

                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").copied(),
                    Some(index as u8)
                );
            });
        }
    }
}
