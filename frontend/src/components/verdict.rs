use shared::Outcome;
use yew::prelude::*;

pub fn render_verdict(outcome: Option<&Outcome>) -> Html {
    match outcome {
        Some(outcome) => html! {
            <div class={classes!("verdict", outcome.severity().to_string())} role="status">
                <p>{ outcome.message() }</p>
            </div>
        },
        None => html! {},
    }
}
