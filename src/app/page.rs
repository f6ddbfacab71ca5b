//! Server-rendered index page: a menu and one form per measure.

use crate::domain::units::Measure;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

const NUMBER_PATTERN: &str = r"^-?\d+(\.\d+)?$";

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
nav button { margin-right: .5rem; }
form { display: none; gap: .5rem; margin-top: 1rem; }
form.active { display: grid; grid-template-columns: 1fr 1fr; }
.number_field, .select_unit { padding: .25rem; }
"#;

// Posts the active form's values to its endpoint and writes the answer back.
const SCRIPT: &str = r#"
document.querySelectorAll("nav button").forEach(function (button) {
  button.addEventListener("click", function () {
    document.querySelectorAll("form").forEach(function (form) {
      form.classList.toggle("active", form.id === button.dataset.form);
    });
  });
});
document.querySelectorAll("form").forEach(function (form) {
  function convert() {
    var token = form.querySelector("input[name=csrf_token]").value;
    fetch(form.dataset.endpoint, {
      method: "POST",
      headers: { "Content-Type": "application/json", "X-CSRFToken": token },
      body: JSON.stringify({
        value: form.querySelector("input[name=from_number]").value,
        from_unit: form.querySelector("select[name=from_unit]").value,
        to_unit: form.querySelector("select[name=to_unit]").value
      })
    })
      .then(function (response) { return response.json(); })
      .then(function (data) {
        if (data.converted_value !== undefined) {
          form.querySelector("input[name=to_number]").value = data.converted_value;
        }
      });
  }
  form.addEventListener("input", convert);
  form.addEventListener("submit", function (event) { event.preventDefault(); convert(); });
});
"#;

fn form_id(measure: Measure) -> String {
    format!("{}_form", measure)
}

/// Renders the page. `csrf_token` is embedded in every form.
pub fn render_index(csrf_token: &str) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Unit Converter</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    html.push_str("<nav>\n");
    for measure in Measure::ALL {
        html.push_str(&format!(
            "<button type=\"button\" data-form=\"{}\">{}</button>\n",
            attr(&form_id(measure)),
            text(measure.label())
        ));
    }
    html.push_str("</nav>\n");

    for (index, measure) in Measure::ALL.into_iter().enumerate() {
        render_form(&mut html, measure, csrf_token, index == 0);
    }

    html.push_str(&format!("<script>{SCRIPT}</script>\n</body>\n</html>\n"));
    html
}

fn render_form(html: &mut String, measure: Measure, csrf_token: &str, active: bool) {
    let (from_default, to_default) = measure.default_units();
    html.push_str(&format!(
        "<form id=\"{}\" data-endpoint=\"{}\"{}>\n",
        attr(&form_id(measure)),
        attr(measure.endpoint()),
        if active { " class=\"active\"" } else { "" }
    ));
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"csrf_token\" value=\"{}\">\n",
        attr(csrf_token)
    ));
    render_number_field(html, "from_number");
    render_select(html, measure, "from_unit", from_default);
    render_number_field(html, "to_number");
    render_select(html, measure, "to_unit", to_default);
    html.push_str("</form>\n");
}

fn render_number_field(html: &mut String, name: &str) {
    html.push_str(&format!(
        "<input type=\"text\" name=\"{0}\" id=\"{0}\" value=\"0\" required pattern=\"{1}\" class=\"number_field\">\n",
        attr(name),
        attr(NUMBER_PATTERN)
    ));
}

fn render_select(html: &mut String, measure: Measure, name: &str, selected: &str) {
    html.push_str(&format!(
        "<select name=\"{0}\" id=\"{0}\" class=\"select_unit\">\n",
        attr(name)
    ));
    for (code, label) in measure.choices() {
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            attr(code),
            if code == selected { " selected" } else { "" },
            text(label)
        ));
    }
    html.push_str("</select>\n");
}
