use super::super::{Field, Model, Msg};
use web_sys::HtmlInputElement;
use yew::prelude::*;

impl Field {
    const ALL: [Field; 3] = [Field::Amount, Field::Age, Field::Distance];

    fn id(self) -> &'static str {
        match self {
            Field::Amount => "amt",
            Field::Age => "age",
            Field::Distance => "distance_km",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::Amount => "Transaction Amount (amt)",
            Field::Age => "Customer Age (age)",
            Field::Distance => "Distance from Home (distance_km)",
        }
    }

    fn help(self) -> &'static str {
        match self {
            Field::Amount => "The amount of the transaction.",
            Field::Age => "The age of the cardholder.",
            Field::Distance => "The distance (in km) of the transaction from the cardholder's home.",
        }
    }

    fn value(self, model: &Model) -> f64 {
        match self {
            Field::Amount => model.request.amt,
            Field::Age => model.request.age,
            Field::Distance => model.request.distance_km,
        }
    }
}

pub fn render_transaction_form(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <section class="transaction-form">
            <h2>{"Transaction Details"}</h2>
            { for Field::ALL.iter().map(|&field| render_number_input(field, field.value(model), ctx)) }
            <button
                class="predict-btn"
                disabled={model.loading}
                onclick={link.callback(|_| Msg::Predict)}
            >
                { if model.loading { "Predicting..." } else { "Predict" } }
            </button>
        </section>
    }
}

fn render_number_input(field: Field, value: f64, ctx: &Context<Model>) -> Html {
    // Input that is not a number is ignored; clamping happens in the model.
    let oninput = ctx.link().batch_callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let value = input.value_as_number();
        (!value.is_nan()).then(|| Msg::SetField(field, value))
    });

    html! {
        <label class="form-field" title={field.help()}>
            <span>{ field.label() }</span>
            <input
                type="number"
                id={field.id()}
                min="0"
                step="0.01"
                value={value.to_string()}
                {oninput}
            />
            <small class="help">{ field.help() }</small>
        </label>
    }
}
