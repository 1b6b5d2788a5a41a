pub mod use_registration_form;
