use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SubmissionSummaryProps {
    pub title: String,
    /// (label, value) pairs of the last submitted registration
    pub lines: Vec<(&'static str, String)>,
}

#[function_component(SubmissionSummary)]
pub fn submission_summary(props: &SubmissionSummaryProps) -> Html {
    html! {
        <div class="submission-summary">
            <h2>{&props.title}</h2>
            {for props.lines.iter().map(|(label, value)| {
                html! { <p>{format!("{}: {}", label, value)}</p> }
            })}
        </div>
    }
}
