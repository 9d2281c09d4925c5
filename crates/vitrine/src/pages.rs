// File: src/pages.rs
// Purpose: Maud templates for the site pages

use crate::config::Config;
use crate::contact::HONEYPOT_FIELD;
use crate::form_context::FormContext;
use crate::helpers::active_class;
use maud::{html, Markup, DOCTYPE};

const NAV: [(&str, &str); 2] = [("/", "Home"), ("/contact", "Contact")];

/// Page shell with metadata, navigation and footer
pub fn layout(config: &Config, current_path: &str, title: &str, assets: &Markup, body: Markup) -> Markup {
    let site = &config.site;
    let full_title = if title.is_empty() {
        format!("{} | {}", site.name, site.slogan)
    } else {
        format!("{} | {}", title, site.name)
    };
    let social_img = format!(
        "{}/img/{}.jpg",
        site.url.trim_end_matches('/'),
        site.social_img_name
    );

    html! {
        (DOCTYPE)
        html lang=(config.language()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (full_title) }
                meta name="description" content=(site.description);
                meta property="og:title" content=(full_title);
                meta property="og:url" content=(site.url);
                meta property="og:image" content=(social_img);
                (assets)
            }
            body {
                header {
                    a.brand href="/" { (site.name) }
                    nav {
                        @for (link, label) in NAV {
                            a class=(active_class(current_path, link)) href=(link) { (label) }
                        }
                    }
                }
                main { (body) }
                footer {
                    p { (config.company.name) " - " (config.company.address) }
                    p.credits { "Design: " (site.designer) }
                }
            }
        }
    }
}

pub fn home_page(config: &Config, assets: &Markup) -> Markup {
    let body = html! {
        section.hero {
            h1 { (config.site.name) }
            p.slogan { (config.site.slogan) }
            p { (config.site.description) }
            a.button href="/contact" { "Get in touch" }
        }
    };
    layout(config, "/", "", assets, body)
}

pub fn contact_page(config: &Config, assets: &Markup, form: &FormContext) -> Markup {
    let body = html! {
        h1 { "Contact" }
        p { (config.company.name) br; (config.company.address) }

        @if let Some(success) = &form.success {
            p.alert.alert-success role="status" { (success) }
        }
        @if form.has_errors() {
            p.alert.alert-danger role="alert" { "Please correct the errors below." }
        }

        form method="post" action="/contact" novalidate {
            (text_field(form, "name", "Name", "text"))
            (text_field(form, "email", "Email", "email"))
            div.field {
                label for="message" { "Message" }
                textarea id="message" name="message" rows="6" { (form.get_value("message")) }
                (field_error(form, "message"))
            }
            // Honeypot: hidden from humans, filled in by bots
            div.field.hp aria-hidden="true" {
                label for=(HONEYPOT_FIELD) { "Website" }
                input id=(HONEYPOT_FIELD) name=(HONEYPOT_FIELD) type="text" tabindex="-1" autocomplete="off" value="";
            }
            button type="submit" { "Send" }
        }
    };
    layout(config, "/contact", "Contact", assets, body)
}

fn text_field(form: &FormContext, name: &str, label: &str, input_type: &str) -> Markup {
    html! {
        div.field {
            label for=(name) { (label) }
            input id=(name) name=(name) type=(input_type) value=(form.get_value(name))
                aria-invalid=[form.has_error(name).then_some("true")];
            (field_error(form, name))
        }
    }
}

fn field_error(form: &FormContext, name: &str) -> Markup {
    html! {
        @if let Some(message) = form.get_error(name) {
            p.field-error { (message) }
        }
    }
}
