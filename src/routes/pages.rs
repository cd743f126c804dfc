// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-rendered pages (home and profile).

use axum::{
    extract::State,
    response::Html,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use html_escape::encode_text;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::session::resolve_session;
use crate::models::{Match, Prediction, User};
use crate::AppState;

/// Home page. Shows a login link for anonymous visitors, a link to the
/// profile otherwise.
pub async fn home(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    let body = match resolve_session(&state, &jar).await {
        Some(user) => format!(
            "<p>Hello, {}.</p>\n\
             <p><a href=\"/profile\">Your matches and predictions</a></p>\n\
             <p><a href=\"/logout\">Log out</a></p>",
            encode_text(&user.display_name)
        ),
        None => "<p><a href=\"/auth/start\">Log in with Google</a></p>".to_string(),
    };

    Html(page("Matchday", &body))
}

/// Profile page: the match catalog with the user's predictions and a
/// submission form per match.
///
/// Requires an authenticated session (enforced by the router); a store
/// failure surfaces as a server error.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Html<String>> {
    let predictions = state.store.get_predictions_for_user(user.id).await?;

    let mut body = format!("<p>Hello, {}.</p>\n", encode_text(&user.display_name));
    body.push_str("<table>\n<tr><th>Match</th><th>Kickoff</th><th>Your prediction</th><th></th></tr>\n");

    for m in state.catalog.list() {
        let prediction = predictions.iter().find(|p| p.match_id == m.id);
        let _ = write!(body, "{}", match_row(m, prediction));
    }

    body.push_str("</table>\n<p><a href=\"/logout\">Log out</a></p>");

    Ok(Html(page("Your predictions", &body)))
}

/// One table row: fixture, kickoff, current prediction, submission form.
fn match_row(m: &Match, prediction: Option<&Prediction>) -> String {
    let predicted = match prediction {
        Some(p) => format!("{} : {}", p.team1_score, p.team2_score),
        None => "&mdash;".to_string(),
    };

    let (team1_value, team2_value) = match prediction {
        Some(p) => (p.team1_score.to_string(), p.team2_score.to_string()),
        None => (String::new(), String::new()),
    };

    format!(
        "<tr><td>{team1} &ndash; {team2}</td><td>{date} {time}</td><td>{predicted}</td>\n\
         <td><form method=\"post\" action=\"/submit-prediction\">\n\
         <input type=\"hidden\" name=\"matchId\" value=\"{id}\">\n\
         <input type=\"number\" name=\"team1_score\" value=\"{t1}\" required>\n\
         <input type=\"number\" name=\"team2_score\" value=\"{t2}\" required>\n\
         <button type=\"submit\">Save</button>\n\
         </form></td></tr>\n",
        team1 = encode_text(&m.team1),
        team2 = encode_text(&m.team2),
        date = encode_text(&m.date),
        time = encode_text(&m.time),
        predicted = predicted,
        id = m.id,
        t1 = team1_value,
        t2 = team2_value,
    )
}

/// Minimal page shell shared by all rendered pages.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        encode_text(title),
        encode_text(title),
        body
    )
}
