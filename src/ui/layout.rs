//! Root layout shared by every server-rendered page.
//!
//! Pages never read theme or identity from ambient state; the handler
//! builds a [`LayoutContext`] for the request and passes it down.

use crate::services::identity::IdentityUser;
use crate::ui::reveal::{RevealOptions, RevealState};
use crate::ui::theme::ThemeContext;
use minijinja::{Environment, Value, context};
use serde::Serialize;

pub const FONT_SANS: &str = "\"Inter\", ui-sans-serif, system-ui, sans-serif";
pub const FONT_MONO: &str = "\"JetBrains Mono\", ui-monospace, monospace";

const LAYOUT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{ theme.theme }}" style="--font-sans: {{ fonts.sans }}; --font-mono: {{ fonts.mono }};">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{% block title %}{% endblock %} | Webinar Studio</title>
</head>
<body class="antialiased"{% if identity.user %} data-user-id="{{ identity.user.id }}"{% endif %} data-authenticated="{{ identity.user is not none }}">
<main>{% block content %}{% endblock %}</main>
<div id="toaster" role="status" aria-live="polite"></div>
<script>
(function () {
  var targets = document.querySelectorAll("[data-reveal]");
  targets.forEach(function (el) {
    var show = function () {
      el.classList.remove.apply(el.classList, el.dataset.revealHidden.split(" "));
      el.classList.add.apply(el.classList, el.dataset.revealShown.split(" "));
    };
    if (!("IntersectionObserver" in window)) {
      show();
      return;
    }
    var threshold = parseFloat(el.dataset.revealThreshold);
    var observer = new IntersectionObserver(function (entries) {
      entries.forEach(function (entry) {
        if (!entry.isIntersecting || entry.intersectionRatio < threshold) return;
        show();
        observer.unobserve(el);
        observer.disconnect();
      });
    }, { threshold: threshold, rootMargin: el.dataset.revealMargin });
    observer.observe(el);
  });
})();
</script>
</body>
</html>
"#;

const ONBOARDING_TEMPLATE: &str = r#"{% extends "layout.html" %}
{% block title %}Get started{% endblock %}
{% block content %}
<h1>Welcome{% if identity.user and identity.user.given_name %}, {{ identity.user.given_name }}{% endif %}</h1>
{% for step in steps %}
<section data-reveal data-reveal-threshold="{{ reveal.threshold }}" data-reveal-margin="{{ reveal.root_margin }}" data-reveal-hidden="{{ reveal.hidden_class }}" data-reveal-shown="{{ reveal.revealed_class }}" class="{{ reveal.hidden_class }}">
<h2>{{ loop.index }}. {{ step.title }}</h2>
<p>{{ step.description }}</p>
</section>
{% endfor %}
{% endblock %}
"#;

const HOME_TEMPLATE: &str = r#"{% extends "layout.html" %}
{% block title %}Home{% endblock %}
{% block content %}
<h1>Your webinars</h1>
<p>Signed in as {{ identity.user.email or identity.user.id }}.</p>
{% endblock %}
"#;

const SIGN_IN_TEMPLATE: &str = r#"{% extends "layout.html" %}
{% block title %}Sign in{% endblock %}
{% block content %}
<h1>Sign in</h1>
<p>Sign-in is handled by the identity provider. Ask an administrator for access.</p>
{% endblock %}
"#;

/// Identity visible to templates; `None` for anonymous visitors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IdentityContext {
    pub user: Option<IdentityUser>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutContext {
    pub theme: ThemeContext,
    pub identity: IdentityContext,
}

impl LayoutContext {
    pub fn new(theme: ThemeContext, user: Option<IdentityUser>) -> Self {
        Self {
            theme,
            identity: IdentityContext { user },
        }
    }
}

#[derive(Serialize)]
struct RevealAttrs {
    threshold: f64,
    root_margin: String,
    hidden_class: &'static str,
    revealed_class: &'static str,
}

/// Page templates, parsed once at startup.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("layout.html", LAYOUT_TEMPLATE)?;
        env.add_template("onboarding.html", ONBOARDING_TEMPLATE)?;
        env.add_template("home.html", HOME_TEMPLATE)?;
        env.add_template("sign_in.html", SIGN_IN_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders `page` inside the root layout. `extra` is merged into the
    /// template context next to the layout values.
    pub fn render(
        &self,
        page: &str,
        layout: &LayoutContext,
        extra: Value,
    ) -> Result<String, minijinja::Error> {
        let options = RevealOptions::default();
        let reveal = RevealAttrs {
            threshold: options.threshold,
            root_margin: options.root_margin(),
            hidden_class: RevealState::Hidden.css_class(),
            revealed_class: RevealState::Revealed.css_class(),
        };

        let ctx = context! {
            theme => layout.theme,
            identity => &layout.identity,
            fonts => context! { sans => FONT_SANS, mono => FONT_MONO },
            reveal => reveal,
            ..extra
        };

        self.env.get_template(page)?.render(ctx)
    }
}
