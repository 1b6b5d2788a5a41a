use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use shared::{GuestAttendance, RegistrationField, RegistrationForm, RegistrationFormConfig};
use crate::components::submission_summary::SubmissionSummary;
use crate::hooks::use_registration_form::use_registration_form;

#[derive(Properties, PartialEq)]
pub struct EventRegistrationFormProps {
    #[prop_or_default]
    pub config: RegistrationFormConfig,
}

/// Inline error paragraph, rendered only when the field failed the last submit
fn field_error(form: &RegistrationForm, field: RegistrationField) -> Html {
    match form.error_for(field) {
        Some(error) => html! { <p class="error">{error.to_string()}</p> },
        None => html! {},
    }
}

#[function_component(EventRegistrationForm)]
pub fn event_registration_form(props: &EventRegistrationFormProps) -> Html {
    let registration = use_registration_form(props.config.enable_debug_logging);
    let form = &registration.form;
    let draft = form.draft();

    // Every text input reports its own name, like a single shared change handler
    let on_input = {
        let on_field_change = registration.actions.on_field_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_field_change.emit((input.name(), input.value()));
        })
    };

    let on_select_change = {
        let on_field_change = registration.actions.on_field_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_field_change.emit((select.name(), select.value()));
        })
    };

    let on_submit = {
        let on_submit = registration.actions.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <div class="registration-section">
            <h1>{&props.config.form_title}</h1>
            <form class="registration-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="name">{"Name:"}</label>
                    <input
                        type="text"
                        id="name"
                        name={RegistrationField::Name.as_str()}
                        value={draft.name.clone()}
                        oninput={on_input.clone()}
                    />
                    {field_error(form, RegistrationField::Name)}
                </div>

                <div class="form-group">
                    <label for="email">{"Email:"}</label>
                    <input
                        type="email"
                        id="email"
                        name={RegistrationField::Email.as_str()}
                        value={draft.email.clone()}
                        oninput={on_input.clone()}
                    />
                    {field_error(form, RegistrationField::Email)}
                </div>

                <div class="form-group">
                    <label for="age">{"Age:"}</label>
                    <input
                        type="number"
                        id="age"
                        name={RegistrationField::Age.as_str()}
                        value={draft.age.clone()}
                        oninput={on_input.clone()}
                    />
                    {field_error(form, RegistrationField::Age)}
                </div>

                <div class="form-group">
                    <label for="attendingWithGuest">{"Are you attending with a guest?"}</label>
                    <select
                        id="attendingWithGuest"
                        name={RegistrationField::AttendingWithGuest.as_str()}
                        onchange={on_select_change}
                    >
                        {for GuestAttendance::ALL.iter().map(|option| {
                            html! {
                                <option
                                    value={option.as_str()}
                                    selected={*option == draft.attending_with_guest}
                                >
                                    {option.as_str()}
                                </option>
                            }
                        })}
                    </select>
                </div>

                {if form.guest_fields_visible() {
                    html! {
                        <div class="form-group">
                            <label for="guestName">{"Guest Name:"}</label>
                            <input
                                type="text"
                                id="guestName"
                                name={RegistrationField::GuestName.as_str()}
                                value={draft.guest_name.clone()}
                                oninput={on_input.clone()}
                            />
                            {field_error(form, RegistrationField::GuestName)}
                        </div>
                    }
                } else { html! {} }}

                <button type="submit" class="btn btn-primary">
                    {&props.config.submit_label}
                </button>
            </form>

            {if let Some(lines) = form.summary() {
                html! {
                    <SubmissionSummary title={props.config.summary_title.clone()} {lines} />
                }
            } else { html! {} }}
        </div>
    }
}
