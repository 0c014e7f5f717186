mod api;
mod components;

use shared::{Outcome, PredictionRequest};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::footer::render_footer;
use components::header::render_header;
use components::transaction_form::render_transaction_form;
use components::verdict::render_verdict;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Field {
    Amount,
    Age,
    Distance,
}

pub enum Msg {
    SetField(Field, f64),
    Predict,
    PredictionFinished(Outcome),
}

pub struct Model {
    request: PredictionRequest,
    loading: bool,
    outcome: Option<Outcome>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            request: PredictionRequest::default(),
            loading: false,
            outcome: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetField(field, value) => self.handle_set_field(field, value),
            Msg::Predict => self.handle_predict(ctx),
            Msg::PredictionFinished(outcome) => self.handle_prediction_finished(outcome),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_transaction_form(self, ctx) }
                    { render_verdict(self.outcome.as_ref()) }
                </main>

                { render_footer() }
            </div>
        }
    }
}

impl Model {
    fn handle_set_field(&mut self, field: Field, raw: f64) -> bool {
        let slot = match field {
            Field::Amount => &mut self.request.amt,
            Field::Age => &mut self.request.age,
            Field::Distance => &mut self.request.distance_km,
        };
        apply_input(slot, raw)
    }

    fn handle_predict(&mut self, ctx: &Context<Self>) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.outcome = None;

        let payload = self.request;
        let link = ctx.link().clone();
        spawn_local(async move {
            let outcome = api::request_prediction(payload).await;
            link.send_message(Msg::PredictionFinished(outcome));
        });

        true
    }

    fn handle_prediction_finished(&mut self, outcome: Outcome) -> bool {
        log::info!("Prediction outcome ({}): {}", outcome.severity(), outcome.message());
        self.loading = false;
        self.outcome = Some(outcome);
        true
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<Model>::new().render();
}

/// Stores `raw` clamped to the widget's `min=0`. Returns whether the form must
/// be re-rendered: the stored value changed, or the input box still shows a
/// value that was clamped away.
fn apply_input(slot: &mut f64, raw: f64) -> bool {
    let value = raw.max(0.0);
    let changed = *slot != value;
    *slot = value;
    changed || value != raw
}
