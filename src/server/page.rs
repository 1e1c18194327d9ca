use crate::quote::{build_quote, Quote};
use crate::server::routes::{accept, extracted};
use crate::state::{AppState, OptionSide, PerfCounters, PricingInput};
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::Html;
use std::sync::Arc;

/// Form fields as the page posts them. Rate and volatility arrive in percent.
#[derive(Debug, serde::Deserialize)]
pub struct CalculateForm {
    pub stock_price: f64,
    pub strike_price: f64,
    pub time_to_expiry: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    #[serde(default)]
    pub option_type: OptionSide,
}

impl CalculateForm {
    /// Percent display units to the decimals the core expects.
    pub fn to_input(&self) -> PricingInput {
        PricingInput {
            spot: self.stock_price,
            strike: self.strike_price,
            expiry_years: self.time_to_expiry,
            rate: self.risk_free_rate / 100.0,
            volatility: self.volatility / 100.0,
            side: self.option_type,
        }
    }
}

/// GET / -- input form
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /calculate -- htmx fragment: out-of-band price and Greek updates
/// plus an analysis card appended to #explanation.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    form: Result<Form<CalculateForm>, FormRejection>,
) -> Html<String> {
    // Rejection text carries raw field values; keep it out of the page.
    let Ok(Form(form)) = extracted(&state, form) else {
        return Html(render_error("Every field must be filled in with a number."));
    };
    let input = form.to_input();
    if let Err(e) = accept(&state, &input) {
        return Html(render_error(&e.to_string()));
    }

    let quote = build_quote(state.normal.as_ref(), &input);
    PerfCounters::bump(&state.counters.quotes_served);
    tracing::debug!(side = %quote.side, call = quote.call_price, put = quote.put_price, "rendered quote");

    Html(render_quote(&quote))
}

fn render_quote(q: &Quote) -> String {
    let g = &q.greeks;
    format!(
        r#"<p id="call_price" class="result-value" hx-swap-oob="innerHTML">${call:.2}</p>
<p id="put_price" class="result-value" hx-swap-oob="innerHTML">${put:.2}</p>
<div id="greeks_container" hx-swap-oob="innerHTML">
  <div class="greeks-grid">
    <div class="greek-card"><p class="greek-label">Delta</p><p class="greek-value">{delta:.4}</p></div>
    <div class="greek-card"><p class="greek-label">Gamma</p><p class="greek-value">{gamma:.4}</p></div>
    <div class="greek-card"><p class="greek-label">Theta</p><p class="greek-value">{theta:.4}</p></div>
    <div class="greek-card"><p class="greek-label">Vega</p><p class="greek-value">{vega:.4}</p></div>
    <div class="greek-card"><p class="greek-label">Rho</p><p class="greek-value">{rho:.4}</p></div>
  </div>
</div>
<div class="result-card analysis">
  <h3>Analysis of Your Option</h3>
  <p>This {side} option is currently {moneyness}.</p>
  <p>Delta is {delta:.4}: a $1 move in the stock shifts the option value by about ${abs_delta:.4}.</p>
  <p>Time decay (Theta) costs about ${abs_theta:.4} of value per day.</p>
  <p>A 1% rise in volatility changes the option value by about ${vega:.4} (Vega).</p>
</div>
"#,
        call = q.call_price,
        put = q.put_price,
        delta = g.delta,
        gamma = g.gamma,
        theta = g.theta,
        vega = g.vega,
        rho = g.rho,
        side = q.side,
        moneyness = q.moneyness,
        abs_delta = g.delta.abs(),
        abs_theta = g.theta.abs(),
    )
}

/// Message text comes from our own error Display, never from raw user input.
fn render_error(message: &str) -> String {
    format!(
        r#"<div class="result-card error"><h3>Cannot price this option</h3><p>{message}</p></div>
"#
    )
}

const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en" data-theme="dark">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Black-Scholes Options Pricer</title>
<script src="https://unpkg.com/htmx.org@2.0.4"></script>
<style>
  :root {
    --bg0: #282828; --bg1: #32302f; --bg2: #45403d; --bg3: #5a524c;
    --fg0: #e2cca9; --fg1: #c5b18d; --fg2: #a89984;
    --red: #ea6962; --green: #a9b665; --aqua: #89b482; --blue: #7daea3;
  }
  body { font-family: 'Inter', system-ui, sans-serif; color: var(--fg0); background: var(--bg0); line-height: 1.6; margin: 0 auto; max-width: 1100px; padding: 1rem; }
  h1 { color: var(--aqua); }
  p { color: var(--fg1); }
  label { font-weight: 600; display: block; margin-bottom: 0.5rem; }
  input, select { background: var(--bg2); color: var(--fg0); border: 1px solid var(--bg3); border-radius: 4px; padding: 0.5rem; width: 100%; box-sizing: border-box; }
  button { background: var(--blue); color: var(--bg0); border: 0; border-radius: 4px; padding: 0.6rem 1rem; font-weight: 600; cursor: pointer; }
  button:hover { background: var(--aqua); }
  .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
  .input-group { margin-bottom: 1rem; }
  .info-text { font-size: 0.85rem; color: var(--fg2); }
  .result-card { background: var(--bg1); border: 1px solid var(--bg3); border-radius: 8px; padding: 1.5rem; margin-bottom: 1.5rem; }
  .result-label { font-size: 0.9rem; color: var(--fg2); margin-bottom: 0.5rem; }
  .result-value { font-size: 2rem; font-weight: 700; }
  #call_price { color: var(--green); }
  #put_price { color: var(--red); }
  .greeks-grid { display: grid; grid-template-columns: repeat(5, 1fr); gap: 0.75rem; }
  .greek-card { background: var(--bg2); border-radius: 6px; padding: 0.75rem; text-align: center; }
  .greek-label { font-size: 0.8rem; color: var(--fg2); margin: 0; }
  .greek-value { font-weight: 700; margin: 0; }
  .error h3 { color: var(--red); }
</style>
</head>
<body>
<h1>Black-Scholes Options Pricer</h1>
<form hx-post="/calculate" hx-trigger="submit" hx-target="#explanation" hx-swap="beforeend">
  <div class="grid">
    <div>
      <h2>Input Parameters</h2>
      <div class="input-group"><label>Stock Price ($)
        <input type="number" name="stock_price" value="100" step="0.01" min="0.01" required></label></div>
      <div class="input-group"><label>Strike Price ($)
        <input type="number" name="strike_price" value="100" step="0.01" min="0.01" required></label></div>
      <div class="input-group"><label>Time to Expiration (years)
        <input type="number" name="time_to_expiry" value="1" step="0.01" min="0.01" max="30" required></label>
        <p class="info-text">E.g. 0.5 for six months, 0.25 for three months</p></div>
      <div class="input-group"><label>Risk-Free Interest Rate (%)
        <input type="number" name="risk_free_rate" value="5" step="0.1" min="0" max="100" required></label></div>
      <div class="input-group"><label>Volatility (%)
        <input type="number" name="volatility" value="20" step="0.1" min="0.1" max="200" required></label>
        <p class="info-text">Annual volatility, e.g. 20 for 20%</p></div>
      <div class="input-group"><label>Option Type
        <select name="option_type"><option value="call" selected>Call</option><option value="put">Put</option></select></label></div>
      <button type="submit">Calculate Option Price</button>
    </div>
    <div>
      <h2>Option Price</h2>
      <div class="result-card"><p class="result-label">Call Option Price</p><p id="call_price" class="result-value">$0.00</p></div>
      <div class="result-card"><p class="result-label">Put Option Price</p><p id="put_price" class="result-value">$0.00</p></div>
      <h3>Option Greeks</h3>
      <div id="greeks_container"></div>
      <p class="info-text">Greeks show how the option price reacts to each input.</p>
      <div id="explanation"></div>
    </div>
  </div>
</form>
<div class="result-card">
  <h3>Understanding the Results</h3>
  <p>Black-Scholes gives theoretical prices for European options, assuming log-normal stock prices and frictionless markets.</p>
  <ul>
    <li><b>Delta:</b> price change for a $1 move in the stock.</li>
    <li><b>Gamma:</b> change in Delta for a $1 move in the stock.</li>
    <li><b>Theta:</b> price change as one calendar day passes.</li>
    <li><b>Vega:</b> price change for a 1% move in volatility.</li>
    <li><b>Rho:</b> price change for a 1% move in interest rates.</li>
  </ul>
</div>
</body>
</html>
"##;
