use crate::{
    cli::{actions::Action, globals::GlobalArgs},
    client::ApiClient,
    flow::{FlowContext, FlowController, FlowState, NavigationHandoff, NotificationSink},
};
use anyhow::{anyhow, Result};
use tracing::info;

/// Console sink: success messages to stdout, errors to stderr.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn success(&mut self, message: &str) {
        println!("{message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Handoff for a terminal session: the next stage is a prompt, not a screen.
struct VerifyStage;

impl NavigationHandoff for VerifyStage {
    fn advance(&mut self, context: FlowContext) {
        info!("advancing to OTP verification for {}", context.email);
        println!("Enter the passcode sent to {} to finish signing in.", context.email);
    }
}

/// Handle the login action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let Action::Login { email, remember } = action;

    let client = ApiClient::with_timeout(&globals.api_url, globals.timeout)?;

    let mut flow = FlowController::new(client, ConsoleSink, VerifyStage);
    flow.set_email(&email);
    if remember {
        flow.toggle_remember();
    }

    match flow.submit().await {
        FlowState::Succeeded => Ok(()),
        state => Err(anyhow!("login flow ended in {state:?}")),
    }
}
