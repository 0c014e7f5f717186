use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1>{"💳 Credit Card Fraud Detection Demo"}</h1>
            <p class="subtitle">
                {"This demo uses a machine learning model to predict if a credit card transaction is fraudulent. "}
                {"Input the transaction details below and click 'Predict' to get a result."}
            </p>
        </header>
    }
}
