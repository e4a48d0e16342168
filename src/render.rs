// HTML rendering for the form page, result table and bar chart.

use std::fmt::Write;

use crate::form::FormState;
use crate::predict::{Prediction, PredictionReport, METRIC_NAMES, PREDICTION_COLUMNS};
use crate::reference::{InjuryType, MAX_DAYS_INJURED, MIN_DAYS_INJURED};

/// Where the single-screen session currently is.
///
/// Idle -> PlayerChosen on player selection, PlayerChosen -> Predicted on the
/// predict action; a predicted page renders once and the next request is
/// back at PlayerChosen.
#[derive(Debug)]
pub enum Stage {
    Idle { message: String },
    PlayerChosen(FormState),
    Predicted {
        form: FormState,
        outcome: Result<PredictionReport, String>,
    },
}

const BAR_COLORS: [&str; 3] = ["#636efa", "#ef553b", "#00cc96"];

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;display:flex}\
aside{width:300px;padding:16px;background:#f0f2f6;min-height:100vh}\
main{padding:24px;flex:1}\
label{display:block;margin-top:12px;font-size:14px}\
input,select{width:100%;box-sizing:border-box}\
.error{color:#b00020;background:#fde8ea;padding:8px;border-radius:4px}\
.help{font-size:12px;color:#555}\
table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:6px 10px}";

pub fn page(players: &[String], stage: &Stage) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>NBA Player Performance Predictor</title><style>{STYLE}</style></head><body>"
    );

    html.push_str("<aside><h2>Player and Injury Input</h2>");
    match stage {
        Stage::Idle { message } => {
            let _ = write!(html, "<p class=\"error\">{}</p>", escape(message));
            if !players.is_empty() {
                html.push_str("<form method=\"get\" action=\"/\">");
                player_select(&mut html, players, None);
                html.push_str("</form>");
            }
        }
        Stage::PlayerChosen(form) | Stage::Predicted { form, .. } => {
            form_controls(&mut html, players, form);
        }
    }
    html.push_str("</aside>");

    html.push_str(
        "<main><h1>NBA Player Performance Predictor</h1>\
         <p>Predict how a player's performance metrics (e.g., points, rebounds, assists) \
         might change if a hypothetical injury occurs, based on their position and other \
         factors.</p>",
    );
    if let Stage::Predicted { outcome, .. } = stage {
        match outcome {
            Ok(report) => {
                html.push_str(
                    "<h3>Predicted Post-Injury Performance</h3>\
                     <p>Based on the inputs, here are the predicted metrics:</p>",
                );
                html.push_str(&results_table(&report.prediction));
                html.push_str(&bar_chart(&report.prediction));
            }
            Err(message) => {
                let _ = write!(html, "<p class=\"error\">{}</p>", escape(message));
            }
        }
    }
    html.push_str("</main></body></html>");
    html
}

fn player_select(html: &mut String, players: &[String], selected: Option<&str>) {
    html.push_str(
        "<label>Select Player<select name=\"player\" onchange=\"this.form.submit()\">",
    );
    for name in players {
        let sel = if Some(name.as_str()) == selected { " selected" } else { "" };
        let _ = write!(html, "<option{sel}>{}</option>", escape(name));
    }
    html.push_str("</select></label>");
}

fn form_controls(html: &mut String, players: &[String], form: &FormState) {
    let player = &form.player;
    html.push_str("<form method=\"get\" action=\"/\">");
    player_select(html, players, Some(&player.player_name));
    let _ = write!(
        html,
        "<p><b>Position</b>: {} (Numeric: {:.1})</p>\
         <input type=\"hidden\" name=\"stats_for\" value=\"{}\">\
         <input type=\"hidden\" name=\"days_for\" value=\"{}\">",
        escape(&player.position),
        form.position_numeric,
        escape(&player.player_name),
        escape(form.injury_type.label()),
    );

    for (field, value) in [
        ("age", form.age),
        ("player_height", form.player_height),
        ("player_weight", form.player_weight),
    ] {
        let _ = write!(
            html,
            "<label>{field}<input type=\"number\" step=\"any\" name=\"{field}\" value=\"{value}\"></label>"
        );
    }

    html.push_str(
        "<label>Select Hypothetical Injury\
         <select name=\"injury_type\" onchange=\"this.form.submit()\">",
    );
    for injury in InjuryType::ALL {
        let sel = if injury == form.injury_type { " selected" } else { "" };
        let _ = write!(html, "<option{sel}>{}</option>", escape(injury.label()));
    }
    html.push_str("</select></label>");

    let _ = write!(
        html,
        "<label>Estimated Days Injured: <output>{days}</output>\
         <input type=\"range\" name=\"days_injured\" min=\"{MIN_DAYS_INJURED}\" \
         max=\"{MAX_DAYS_INJURED}\" value=\"{days}\" \
         oninput=\"this.previousElementSibling.value=this.value\"></label>\
         <p class=\"help\">Default days for {label}: {default_days}</p>\
         <label>Injury Occurrences<input type=\"number\" name=\"injury_occurrences\" \
         min=\"0\" step=\"1\" value=\"{occ}\"></label>\
         <p><button type=\"submit\" formaction=\"/predict\" formmethod=\"post\">Predict</button></p>\
         </form>",
        days = form.days_injured,
        label = escape(form.injury_type.label()),
        default_days = form.injury_type.default_days(),
        occ = form.injury_occurrences,
    );
}

/// One-row table with the three labeled outputs.
pub fn results_table(prediction: &Prediction) -> String {
    let mut html = String::from("<table><thead><tr>");
    for col in PREDICTION_COLUMNS {
        let _ = write!(html, "<th>{col}</th>");
    }
    html.push_str("</tr></thead><tbody><tr>");
    for v in prediction.values() {
        let _ = write!(html, "<td>{v:.4}</td>");
    }
    html.push_str("</tr></tbody></table>");
    html
}

/// SVG bar chart, one bar per metric around a zero baseline.
pub fn bar_chart(prediction: &Prediction) -> String {
    const WIDTH: f32 = 420.0;
    const HEIGHT: f32 = 260.0;
    const PAD: f32 = 30.0;
    const BAR: f32 = 70.0;

    let values = prediction.values();
    let max_abs = values
        .iter()
        .fold(0.0_f32, |m, v| m.max(v.abs()))
        .max(f32::EPSILON);
    let half = (HEIGHT - 2.0 * PAD) / 2.0;
    let y0 = PAD + half;
    let slot = (WIDTH - 2.0 * PAD) / values.len() as f32;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         role=\"img\" aria-label=\"Predicted changes\">"
    );
    for (i, (name, v)) in METRIC_NAMES.iter().zip(values).enumerate() {
        let h = v.abs() / max_abs * half;
        let x = PAD + slot * i as f32 + (slot - BAR) / 2.0;
        let y = if v >= 0.0 { y0 - h } else { y0 };
        let label_y = if v >= 0.0 { y - 4.0 } else { y + h + 12.0 };
        let _ = write!(
            svg,
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{BAR}\" height=\"{h:.1}\" fill=\"{color}\">\
             <title>{name}: {v:.4}</title></rect>\
             <text x=\"{cx:.1}\" y=\"{label_y:.1}\" text-anchor=\"middle\" font-size=\"11\">{v:.2}</text>\
             <text x=\"{cx:.1}\" y=\"{ty:.1}\" text-anchor=\"middle\" font-size=\"12\">{name}</text>",
            color = BAR_COLORS[i % BAR_COLORS.len()],
            cx = x + BAR / 2.0,
            ty = HEIGHT - 6.0,
        );
    }
    let _ = write!(
        svg,
        "<line x1=\"{PAD}\" y1=\"{y0}\" x2=\"{x2}\" y2=\"{y0}\" stroke=\"#333\"/></svg>",
        x2 = WIDTH - PAD,
    );
    svg
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_hang_below_baseline() {
        let svg = bar_chart(&Prediction::from([2.0, -1.0, 0.5]));
        assert_eq!(svg.matches("<rect").count(), 3);
        // baseline at 130 with a 100px half-height; REB spans half of it downward
        assert!(svg.contains("y=\"130.0\" width=\"70\" height=\"50.0\""));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<b>\"O'Neal\" & co</b>"), "&lt;b&gt;&quot;O&#39;Neal&quot; &amp; co&lt;/b&gt;");
    }
}
