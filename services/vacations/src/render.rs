//! Minimal HTML pages for browser callers

use crate::models::VacationSummary;

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, flash: Option<&str>, body: &str) -> String {
    let notice = flash
        .map(|message| format!("<p class=\"flash\">{}</p>\n", escape_html(message)))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}{}</body>\n</html>\n",
        escape_html(title),
        notice,
        body
    )
}

pub fn login_page(flash: Option<&str>) -> String {
    layout(
        "Log in",
        flash,
        "<h1>Log in</h1>\n\
         <form method=\"post\" action=\"/auth/login\">\n\
         <input type=\"email\" name=\"email\" placeholder=\"Email\">\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\">\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <a href=\"/auth/signup\">Sign up</a>\n",
    )
}

pub fn signup_page(flash: Option<&str>) -> String {
    layout(
        "Sign up",
        flash,
        "<h1>Sign up</h1>\n\
         <form method=\"post\" action=\"/auth/signup\">\n\
         <input type=\"text\" name=\"first_name\" placeholder=\"First name\">\n\
         <input type=\"text\" name=\"last_name\" placeholder=\"Last name\">\n\
         <input type=\"email\" name=\"email\" placeholder=\"Email\">\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\">\n\
         <button type=\"submit\">Sign up</button>\n\
         </form>\n\
         <a href=\"/auth/login\">Log in</a>\n",
    )
}

/// Vacation listing with like buttons; administrators also get delete buttons
pub fn vacations_page(
    display_name: &str,
    is_admin: bool,
    vacations: &[VacationSummary],
    flash: Option<&str>,
) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>Hello {}</h1>\n", escape_html(display_name)));
    body.push_str("<form method=\"post\" action=\"/auth/logout\"><button type=\"submit\">Log out</button></form>\n");

    if vacations.is_empty() {
        body.push_str("<p>No vacations yet.</p>\n");
    }

    body.push_str("<ul class=\"vacations\">\n");
    for summary in vacations {
        let vacation = &summary.listing.vacation;
        body.push_str(&format!(
            "<li>\n<h2>{}</h2>\n<p>{}</p>\n<p>{} to {}</p>\n<p>${}</p>\n",
            escape_html(&summary.listing.country_name),
            escape_html(&vacation.vacation_description),
            vacation.arrival,
            vacation.departure,
            vacation.price
        ));
        body.push_str(&format!(
            "<form method=\"post\" action=\"/vacations/{}/like\"><button type=\"submit\">{} ({})</button></form>\n",
            vacation.id,
            if summary.user_liked { "Unlike" } else { "Like" },
            summary.likes_count
        ));
        if is_admin {
            body.push_str(&format!(
                "<form method=\"post\" action=\"/vacations/{}/delete\"><button type=\"submit\">Delete</button></form>\n",
                vacation.id
            ));
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");

    layout("Vacations", flash, &body)
}
