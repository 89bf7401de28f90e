//! Login-to-OTP flow state machine.
//!
//! The machine is data: a const transition table maps `(state, event)` pairs
//! to `(next state, effect)`, and the controller only executes effects and
//! feeds the resulting events back in. Collaborators sit behind the
//! [`NotificationSink`] and [`NavigationHandoff`] traits so the flow can run
//! against a terminal, a UI, or test doubles.
//!
//! Flow overview:
//! - `submit` is ignored while a call is in flight (`is_loading` guard).
//! - Validation failures never reach the network.
//! - The OTP request is issued only after a login response that echoes the
//!   submitted email.
//! - `Failed` returns control to the caller for resubmission; `Succeeded`
//!   ends the flow instance after the navigation handoff.

use crate::{
    client::{LoginApi, OtpReceipt},
    error::Error,
    validator::{self, Field, ValidationResult},
};
use tracing::{debug, error};

/// Success notification text, fixed by the wire contract with the user.
pub const OTP_SENT_MESSAGE: &str = "OTP has been sent to your email";

const OTP_FAILED_MESSAGE: &str = "Failed to send OTP.";
const LOGIN_MISMATCH_MESSAGE: &str = "Login failed.";

/// Form fields tracked for one login attempt session.
///
/// Mutated only by the controller; reset to initial values on success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub remember: bool,
    pub is_loading: bool,
}

/// Carries the submitted email from the login step into the OTP request
/// and the navigation handoff. Owned by the in-flight flow instance and
/// discarded when the flow terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowContext {
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Validating,
    SubmittingLogin,
    RequestingOtp,
    Succeeded,
    Failed,
}

/// Triggers fed into the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    Submit,
    FieldsValid,
    FieldsInvalid,
    LoginConfirmed,
    LoginRejected,
    OtpSent,
    OtpRejected,
}

/// Side effects the controller executes after entering a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Validate,
    CallLogin,
    CallOtp,
    ReportFailure,
    FinishSuccess,
}

/// The machine as data: `(from, trigger, to, effect)`.
const TRANSITIONS: &[(FlowState, FlowEvent, FlowState, Effect)] = &[
    (FlowState::Idle, FlowEvent::Submit, FlowState::Validating, Effect::Validate),
    (FlowState::Failed, FlowEvent::Submit, FlowState::Validating, Effect::Validate),
    (FlowState::Validating, FlowEvent::FieldsValid, FlowState::SubmittingLogin, Effect::CallLogin),
    (FlowState::Validating, FlowEvent::FieldsInvalid, FlowState::Failed, Effect::ReportFailure),
    (FlowState::SubmittingLogin, FlowEvent::LoginConfirmed, FlowState::RequestingOtp, Effect::CallOtp),
    (FlowState::SubmittingLogin, FlowEvent::LoginRejected, FlowState::Failed, Effect::ReportFailure),
    (FlowState::RequestingOtp, FlowEvent::OtpSent, FlowState::Succeeded, Effect::FinishSuccess),
    (FlowState::RequestingOtp, FlowEvent::OtpRejected, FlowState::Failed, Effect::ReportFailure),
];

/// Look up the `(next state, effect)` pair for `(state, event)`.
/// `None` means the trigger is not accepted in this state.
#[must_use]
pub fn transition(state: FlowState, event: FlowEvent) -> Option<(FlowState, Effect)> {
    TRANSITIONS
        .iter()
        .find(|(from, trigger, _, _)| *from == state && *trigger == event)
        .map(|(_, _, to, effect)| (*to, *effect))
}

/// Reports flow outcomes to the user.
pub trait NotificationSink {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Transfers control, with context, to the next stage.
pub trait NavigationHandoff {
    fn advance(&mut self, context: FlowContext);
}

/// Drives one login-to-OTP sequence at a time over injected collaborators.
pub struct FlowController<C, N, H> {
    client: C,
    notifier: N,
    handoff: H,
    form: FormState,
    state: FlowState,
    context: Option<FlowContext>,
    last_error: Option<Error>,
}

impl<C, N, H> FlowController<C, N, H>
where
    C: LoginApi,
    N: NotificationSink,
    H: NavigationHandoff,
{
    #[must_use]
    pub fn new(client: C, notifier: N, handoff: H) -> Self {
        Self {
            client,
            notifier,
            handoff,
            form: FormState::default(),
            state: FlowState::Idle,
            context: None,
            last_error: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> FlowState {
        self.state
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Record a change to the email field.
    pub fn set_email(&mut self, email: &str) {
        self.form.email = email.to_string();
    }

    pub fn toggle_remember(&mut self) {
        self.form.remember = !self.form.remember;
    }

    /// Current outcome of the email field rules, re-evaluated on every call
    /// so collaborators can render errors on change and on blur.
    #[must_use]
    pub fn email_validation(&self) -> ValidationResult {
        validator::validate_field(Field::Email, &self.form.email)
    }

    /// Drive one flow instance: validate, log in, request the OTP, hand off.
    ///
    /// A submit while a call is in flight is a no-op, as is a submit from a
    /// state that does not accept the trigger. Every error is converted to a
    /// notification and lands the machine in `Failed`; nothing escapes.
    pub async fn submit(&mut self) -> FlowState {
        if self.form.is_loading {
            debug!("submit ignored: a flow instance is already in flight");
            return self.state;
        }

        let Some((next, first_effect)) = transition(self.state, FlowEvent::Submit) else {
            return self.state;
        };

        self.form.is_loading = true;
        self.last_error = None;
        self.state = next;

        let mut effect = first_effect;
        loop {
            match self.run_effect(effect).await {
                Some(event) => {
                    let Some((next, next_effect)) = transition(self.state, event) else {
                        self.form.is_loading = false;
                        return self.state;
                    };
                    self.state = next;
                    effect = next_effect;
                }
                None => return self.state,
            }
        }
    }

    async fn run_effect(&mut self, effect: Effect) -> Option<FlowEvent> {
        match effect {
            Effect::Validate => match validator::first_failure(&self.form) {
                None => Some(FlowEvent::FieldsValid),
                Some((field, reason)) => {
                    self.last_error = Some(Error::Validation { field, reason });
                    Some(FlowEvent::FieldsInvalid)
                }
            },

            Effect::CallLogin => {
                let email = self.form.email.clone();
                match self.client.login(&email).await {
                    Ok(receipt) if receipt.email == email => {
                        debug!("login confirmed for {}", receipt.email);
                        self.context = Some(FlowContext { email: receipt.email });
                        Some(FlowEvent::LoginConfirmed)
                    }
                    Ok(receipt) => {
                        debug!("login response email mismatch: {}", receipt.email);
                        self.last_error = Some(Error::Login(LOGIN_MISMATCH_MESSAGE.to_string()));
                        Some(FlowEvent::LoginRejected)
                    }
                    Err(err) => {
                        self.last_error = Some(err);
                        Some(FlowEvent::LoginRejected)
                    }
                }
            }

            Effect::CallOtp => {
                let Some(context) = self.context.clone() else {
                    self.last_error = Some(Error::OtpRequest(OTP_FAILED_MESSAGE.to_string()));
                    return Some(FlowEvent::OtpRejected);
                };
                match self.client.request_otp(&context.email).await {
                    Ok(OtpReceipt { ok: true }) => Some(FlowEvent::OtpSent),
                    Ok(OtpReceipt { ok: false }) => {
                        self.last_error = Some(Error::OtpRequest(OTP_FAILED_MESSAGE.to_string()));
                        Some(FlowEvent::OtpRejected)
                    }
                    Err(err) => {
                        self.last_error = Some(err);
                        Some(FlowEvent::OtpRejected)
                    }
                }
            }

            Effect::ReportFailure => {
                self.form.is_loading = false;
                self.context = None;
                if let Some(err) = &self.last_error {
                    error!("login flow failed: {err}");
                    self.notifier.error(&err.to_string());
                }
                None
            }

            Effect::FinishSuccess => {
                self.form = FormState::default();
                self.notifier.success(OTP_SENT_MESSAGE);
                if let Some(context) = self.context.take() {
                    self.handoff.advance(context);
                }
                None
            }
        }
    }
}
