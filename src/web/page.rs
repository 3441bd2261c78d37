//! Server-rendered landing page
//!
//! Markup is static apart from the site copy, the contact form's field
//! values, and the banner for the form's current state. Every dynamic value
//! goes through `escape_html`.

use crate::config::SiteConfig;
use crate::submission::{FormState, FormView};
use crate::util::escape_html;

const STYLE: &str = r#"
:root { --sand: #f4efe6; --sage: #596c68; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--sand); color: var(--sage); }
header, section, footer { max-width: 72rem; margin: 0 auto; padding: 1.5rem; }
header { display: flex; justify-content: space-between; align-items: center; }
nav a { margin-left: 1.5rem; color: inherit; text-decoration: none; font-size: .9rem; }
.pill { display: inline-block; border: 1px solid rgba(0,0,0,.1); border-radius: 999px; padding: .25rem .75rem; font-size: .75rem; background: rgba(255,255,255,.35); }
h1 { font-size: 2.5rem; letter-spacing: -.02em; }
.card { background: rgba(255,255,255,.6); border: 1px solid rgba(0,0,0,.08); border-radius: 1.5rem; padding: 2rem; }
.steps { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); }
form { display: grid; gap: .75rem; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); margin-top: 1.5rem; }
.input { width: 100%; padding: .75rem 1rem; border-radius: .75rem; border: 1px solid rgba(0,0,0,.15); font: inherit; }
textarea.input, form button { grid-column: 1 / -1; }
.btn-primary { background: var(--sage); color: #fff; border: 0; border-radius: .75rem; padding: .75rem 1.25rem; font: inherit; cursor: pointer; text-decoration: none; }
.btn-primary:disabled { opacity: .6; cursor: default; }
.btn-secondary { color: inherit; border: 1px solid rgba(0,0,0,.15); border-radius: .75rem; padding: .75rem 1.25rem; text-decoration: none; margin-left: .5rem; }
.split { display: grid; gap: 2rem; grid-template-columns: repeat(auto-fit, minmax(20rem, 1fr)); align-items: center; }
.tiles { display: grid; gap: .75rem; grid-template-columns: repeat(3, 1fr); margin-top: 1rem; }
.tile { display: flex; flex-direction: column; padding: .75rem; border-radius: 1rem; border: 1px solid rgba(0,0,0,.08); background: rgba(255,255,255,.6); }
.panel { border: 1px solid rgba(0,0,0,.1); border-radius: 1rem; background: rgba(255,255,255,.7); padding: 1rem; margin-top: 1rem; }
.row { display: flex; justify-content: space-between; padding: .5rem 0; }
.banner-success { color: #047857; }
.banner-error { color: #b91c1c; }
.fine { font-size: .75rem; opacity: .75; }
"#;

// Disables the button on the first submit so one click sends one request
const DISABLE_ON_SUBMIT: &str =
    "var b=this.querySelector('button[type=submit]');b.disabled=true;b.textContent='Submitting...';";

/// Example signals shown in the insights panel
const SIGNALS: &[(&str, &str)] = &[
    ("Time since last transaction", "High signal"),
    ("Owner entity complexity", "Medium signal"),
    ("Recent permit activity", "Low signal"),
    ("Portfolio behavior", "High signal"),
];

/// Render the full page for a form snapshot
pub fn render(site: &SiteConfig, view: &FormView, year: i32) -> String {
    let name = escape_html(&site.name);
    let signals: String = SIGNALS
        .iter()
        .map(|(signal, weight)| {
            format!(
                r#"      <div class="row"><span>{}</span><strong>{}</strong></div>"#,
                signal, weight
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{name}</title>
<meta name="description" content="The AI Broker for off-market land: discover, enrich, prioritize.">
<style>{style}</style>
</head>
<body>
<header>
  <a href="#top" aria-label="{name} home"><strong>{name}</strong></a>
  <nav aria-label="Main navigation">
    <a href="#problem">Problem</a>
    <a href="#how">How it works</a>
    <a href="#insights">Data &amp; insights</a>
    <a href="#contact">Contact</a>
  </nav>
  <a href="#contact" class="btn-primary">Get early access</a>
</header>

<section id="top" class="split">
  <div>
    <span class="pill">{tagline}</span>
    <h1>{headline}</h1>
    <p>{summary}</p>
    <p>
      <a href="#contact" class="btn-primary">Join the waitlist</a>
      <a href="#how" class="btn-secondary">See how it works</a>
    </p>
    <p class="fine">Early access • No spam • Product updates only</p>
    <div class="tiles">
      <div class="tile"><span class="fine">Discover</span><strong>Signals</strong></div>
      <div class="tile"><span class="fine">Enrich</span><strong>Context</strong></div>
      <div class="tile"><span class="fine">Prioritize</span><strong>Leads</strong></div>
    </div>
  </div>
  <div class="card">
    <p class="fine">Example <span class="pill">Austin, TX</span></p>
    <h3>Ask in plain English</h3>
    <p>“Show parcels likely to sell in 6–12 months, with large lots and low recent activity.”</p>
    <div class="tiles">
      <div class="tile"><span class="fine">Ownership</span><strong>LLC / Trust</strong></div>
      <div class="tile"><span class="fine">Activity</span><strong>Low</strong></div>
      <div class="tile"><span class="fine">Score</span><strong>High</strong></div>
    </div>
    <div class="panel">
      <p class="fine">Output</p>
      <div class="row"><span>Prioritized parcels</span><strong>42</strong></div>
      <div class="row"><span>Ready-to-contact owners</span><strong>18</strong></div>
      <div class="row"><span>Notes + outreach pack</span><strong>Included</strong></div>
    </div>
    <p class="fine">This is a preview mock. Your real workflow will plug into data sources.</p>
  </div>
</section>

<section id="problem" class="split">
  <div class="card">
    <h2>The problem</h2>
    <p>Off-market land discovery is fragmented: scattered public records, outdated lists, and endless manual research. The best deals get missed because prioritization is hard.</p>
  </div>
  <div class="card">
    <h3>What {name} changes</h3>
    <ul>
      <li>One place to explore parcels + signals</li>
      <li>Consistent enrichment: owner, entity, risk flags</li>
      <li>A clear ranking of “who to call first”</li>
    </ul>
  </div>
</section>

<section id="how">
  <h2>How it works</h2>
  <p>A simple pipeline: discover → enrich → prioritize → act.</p>
  <div class="steps">
    <div class="card"><strong>1) Discover</strong><p>Aggregate public signals and parcel attributes into one clean view.</p>
      <span class="pill">Assessor data</span> <span class="pill">Ownership</span> <span class="pill">Zoning</span></div>
    <div class="card"><strong>2) Enrich</strong><p>Add context: entity type, portfolio hints, and quality checks.</p>
      <span class="pill">Entity graph</span> <span class="pill">Risk flags</span> <span class="pill">Context</span></div>
    <div class="card"><strong>3) Act</strong><p>Generate outreach lists, track outcomes, and iterate what works.</p>
      <span class="pill">Lead list</span> <span class="pill">Notes</span> <span class="pill">CRM export</span></div>
  </div>
</section>

<section id="insights">
  <div class="card split">
    <div>
      <h2>Data &amp; insights that feel explainable</h2>
      <p>{name} isn’t a “black box.” Every score is backed by signals you can understand, so you can defend decisions and refine strategies.</p>
      <div class="steps">
        <div><strong>Transparent ranking</strong><p class="fine">See why a parcel is prioritized.</p></div>
        <div><strong>Quality checks</strong><p class="fine">Catch duplicates + bad records.</p></div>
        <div><strong>Saved searches</strong><p class="fine">Reusable filters for your market.</p></div>
        <div><strong>Exportable leads</strong><p class="fine">Hand off to your workflow.</p></div>
      </div>
    </div>
    <div class="panel">
      <p class="fine">Example signals</p>
{signals}
      <p class="fine">These are examples. You’ll define what matters for your strategy.</p>
    </div>
  </div>
</section>

<section id="contact">
  <div class="card">
    <h2>Get early access</h2>
    <p>Leave your email and we'll reach out when the product is ready.</p>
{form}
{banner}
    <p class="fine">We'll only use this for product updates.</p>
  </div>
</section>

<footer>
  <span>© {year} {name}. All rights reserved.</span>
  <a href="#top">Back to top</a>
</footer>
</body>
</html>
"##,
        name = name,
        style = STYLE,
        tagline = escape_html(&site.tagline),
        headline = escape_html(&site.headline),
        summary = escape_html(&site.summary),
        signals = signals,
        form = render_form(view),
        banner = render_banner(&view.state),
        year = year,
    )
}

fn render_form(view: &FormView) -> String {
    let fields = &view.fields;
    let submitting = view.state.is_submitting();

    format!(
        r#"    <form method="post" action="/leads#contact" onsubmit="{script}">
      <input class="input" placeholder="Full name" name="name" value="{name}">
      <input class="input" placeholder="Work email*" name="email" value="{email}" required>
      <input class="input" placeholder="Company" name="company" value="{company}">
      <textarea class="input" placeholder="What are you looking for? (optional)" name="message" rows="4">{message}</textarea>
      <button type="submit" class="btn-primary"{disabled}>{label}</button>
    </form>"#,
        script = DISABLE_ON_SUBMIT,
        name = escape_html(&fields.name),
        email = escape_html(&fields.email),
        company = escape_html(&fields.company),
        message = escape_html(&fields.message),
        disabled = if submitting { " disabled" } else { "" },
        label = if submitting { "Submitting..." } else { "Submit" },
    )
}

fn render_banner(state: &FormState) -> String {
    let class = match state {
        FormState::Success => "banner-success",
        FormState::Error(_) => "banner-error",
        FormState::Idle | FormState::Submitting => return String::new(),
    };
    match state.banner() {
        Some(text) => format!(
            r#"    <p class="{}" role="status">{}</p>"#,
            class,
            escape_html(&text)
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::{LeadFields, SubmitError};

    fn view(state: FormState, fields: LeadFields) -> FormView {
        FormView { fields, state }
    }

    #[test]
    fn test_idle_page_has_required_email_and_no_banner() {
        let html = render(&SiteConfig::default(), &FormView::default(), 2025);
        assert!(html.contains(r#"name="email" value="" required"#));
        assert!(html.contains("© 2025 Landify"));
        assert!(!html.contains("banner-success"));
        assert!(!html.contains("banner-error"));
        assert!(html.contains(">Submit</button>"));
    }

    #[test]
    fn test_field_values_are_escaped() {
        let fields = LeadFields {
            name: r#""><script>alert(1)</script>"#.to_string(),
            message: "</textarea>".to_string(),
            ..Default::default()
        };
        let html = render(
            &SiteConfig::default(),
            &view(FormState::Error(SubmitError::Validation), fields),
            2025,
        );
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(html.contains("&lt;/textarea&gt;</textarea>"));
    }

    #[test]
    fn test_banners_follow_state() {
        let success = render(
            &SiteConfig::default(),
            &view(FormState::Success, LeadFields::default()),
            2025,
        );
        assert!(success.contains("banner-success"));
        assert!(success.contains("Thanks! We&#39;ll be in touch soon."));

        let failed = render(
            &SiteConfig::default(),
            &view(FormState::Error(SubmitError::Persistence), LeadFields::default()),
            2025,
        );
        assert!(failed.contains("banner-error"));
        assert!(failed.contains("Something went wrong. Please try again."));
    }

    #[test]
    fn test_submitting_disables_button() {
        let html = render(
            &SiteConfig::default(),
            &view(FormState::Submitting, LeadFields::default()),
            2025,
        );
        assert!(html.contains(r#"class="btn-primary" disabled>Submitting...</button>"#));
    }

    #[test]
    fn test_every_nav_target_exists() {
        let html = render(&SiteConfig::default(), &FormView::default(), 2025);
        for id in ["top", "problem", "how", "insights", "contact"] {
            assert!(html.contains(&format!(r##"href="#{}""##, id)));
            assert!(html.contains(&format!(r#"<section id="{}""#, id)));
        }
        assert!(html.contains("What Landify changes"));
        assert!(html.contains("Portfolio behavior"));
        assert!(html.contains("Ready-to-contact owners"));
    }

    #[test]
    fn test_site_copy_is_configurable() {
        let site = SiteConfig {
            name: "Acre & Co".to_string(),
            ..SiteConfig::default()
        };
        let html = render(&site, &FormView::default(), 2025);
        assert!(html.contains("<title>Acre &amp; Co</title>"));
    }
}
