use yew::prelude::*;

pub fn render_footer() -> Html {
    html! {
        <footer class="app-footer">
            <h3>{"How to run the demo"}</h3>
            <ol>
                <li>
                    {"Start the inference service from the workspace root: "}
                    <code>{"cargo run -p backend"}</code>
                    {" (it listens on 127.0.0.1:8000 and loads "}
                    <code>{"credit_card_fraud.onnx"}</code>
                    {")."}
                </li>
                <li>
                    {"In a second terminal, serve this page: "}
                    <code>{"cd frontend && trunk serve"}</code>
                </li>
            </ol>
        </footer>
    }
}
