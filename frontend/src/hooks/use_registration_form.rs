use std::rc::Rc;
use yew::prelude::*;
use shared::{RegistrationForm, SubmitOutcome};
use crate::services::logging::Logger;

const COMPONENT: &str = "RegistrationForm";

/// Input events the registration form reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationAction {
    /// An input changed; `name` is the element's `name` attribute
    FieldChanged { name: String, value: String },
    Submit,
    /// Follows the `enable_debug_logging` config flag after mount
    SetDebugLogging(bool),
}

/// Reducer state wrapping the domain form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationFormState {
    pub form: RegistrationForm,
    pub enable_debug_logging: bool,
}

impl Reducible for RegistrationFormState {
    type Action = RegistrationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            RegistrationAction::FieldChanged { name, value } => {
                if let Err(e) = next.form.change_named_field(&name, value) {
                    // Unknown inputs leave the state as is
                    Logger::warn_with_component(COMPONENT, &e.to_string());
                    return self;
                }
                if next.enable_debug_logging {
                    Logger::debug_with_component(COMPONENT, &format!("{} changed", name));
                }
            }
            RegistrationAction::Submit => match next.form.submit() {
                SubmitOutcome::Submitted => {
                    Logger::info_with_component(COMPONENT, "Registration submitted");
                    // Snapshot carries personal data, debug only
                    if next.enable_debug_logging {
                        if let Some(record) = next.form.last_submitted() {
                            Logger::debug_snapshot(COMPONENT, "Submitted record:", record);
                        }
                    }
                }
                SubmitOutcome::Rejected { error_count } => {
                    if next.enable_debug_logging {
                        Logger::debug_with_component(
                            COMPONENT,
                            &format!("Submit rejected with {} field error(s)", error_count),
                        );
                    }
                }
            },
            RegistrationAction::SetDebugLogging(enabled) => {
                if next.enable_debug_logging == enabled {
                    return self;
                }
                next.enable_debug_logging = enabled;
            }
        }

        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
pub struct UseRegistrationFormActions {
    /// Takes the (name, value) pair of the changed input
    pub on_field_change: Callback<(String, String)>,
    pub on_submit: Callback<()>,
}

pub struct UseRegistrationFormResult {
    pub form: RegistrationForm,
    pub actions: UseRegistrationFormActions,
}

/// Hook owning the registration form state for the lifetime of the component
#[hook]
pub fn use_registration_form(enable_debug_logging: bool) -> UseRegistrationFormResult {
    let state = use_reducer(|| RegistrationFormState {
        form: RegistrationForm::new(),
        enable_debug_logging,
    });

    use_effect_with(enable_debug_logging, {
        let dispatcher = state.dispatcher();
        move |enabled| {
            dispatcher.dispatch(RegistrationAction::SetDebugLogging(*enabled));
            || ()
        }
    });

    let on_field_change = use_callback(
        state.dispatcher(),
        |(name, value): (String, String), dispatcher| {
            dispatcher.dispatch(RegistrationAction::FieldChanged { name, value });
        },
    );

    let on_submit = use_callback(state.dispatcher(), |_: (), dispatcher| {
        dispatcher.dispatch(RegistrationAction::Submit);
    });

    UseRegistrationFormResult {
        form: state.form.clone(),
        actions: UseRegistrationFormActions {
            on_field_change,
            on_submit,
        },
    }
}
