pub mod login;

/// Actions the CLI can dispatch.
#[derive(Debug)]
pub enum Action {
    Login { email: String, remember: bool },
}
