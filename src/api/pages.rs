//! Server-rendered HTML pages.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{DOCTYPE, Markup, html};
use serde_json::Value;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::info;

use super::csrf;
use super::validation::{FieldErrors, validate_new_cafe};
use super::{ApiError, AppState, CafeForm};
use crate::models::cafe::Cafe;
use crate::services::CafeError;

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Coffee & Wifi" }
            }
            body {
                nav {
                    a href="/" { "Home" } " | "
                    a href="/cafes" { "Cafes" } " | "
                    a href="/add" { "Add a cafe" }
                }
                main { (content) }
            }
        }
    }
}

pub async fn home() -> Markup {
    layout(
        "Home",
        html! {
            h1 { "☕️ Coffee & Wifi 💻" }
            p { "Want to work in a cafe but need power and wifi?" }
            p {
                "You've found the right place! Checkout my collection of cafes with data on "
                "power socket availability, wifi speed and coffee quality."
            }
            a href="/cafes" { "Show Me!" }
        },
    )
}

fn render_value(field: &str, value: &Value) -> Markup {
    match value {
        Value::Bool(true) => html! { "✔" },
        Value::Bool(false) => html! { "✘" },
        Value::Null => html! {},
        Value::String(s) if field.ends_with("_url") => {
            let label = if field == "map_url" { "Maps Link" } else { "Image" };
            html! { a href=(s) { (label) } }
        }
        Value::String(s) => html! { (s) },
        other => html! { (other.to_string()) },
    }
}

fn cafes_table(cafes: &[Cafe]) -> Markup {
    html! {
        h1 { "All Cafes" }
        @if cafes.is_empty() {
            p { "No cafes yet. " a href="/add" { "Add the first one." } }
        } @else {
            table {
                thead {
                    tr {
                        @for field in &Cafe::FIELDS[1..] {
                            th { (field) }
                        }
                    }
                }
                tbody {
                    @for cafe in cafes {
                        @let row = cafe.to_map();
                        tr {
                            @for field in &Cafe::FIELDS[1..] {
                                td { (render_value(field, &row[*field])) }
                            }
                        }
                    }
                }
            }
        }
        p { a href="/" { "Return to index page" } }
    }
}

pub async fn list_cafes(State(state): State<Arc<AppState>>) -> Result<Markup, ApiError> {
    let cafes = state.cafes().list_cafes().await?;
    Ok(layout("Cafes", cafes_table(&cafes)))
}

fn text_input(
    label: &str,
    field: &'static str,
    value: Option<&str>,
    errors: &FieldErrors,
) -> Markup {
    html! {
        p {
            label for=(field) { (label) }
            br;
            input
                type="text"
                id=(field)
                name=(field)
                value=(value.unwrap_or_default())
                class=[errors.contains(field).then_some("invalid")];
            @for message in errors.get(field) {
                br;
                span class="error" { (message) }
            }
        }
    }
}

fn checkbox(label: &str, field: &'static str, checked: bool) -> Markup {
    html! {
        p {
            input type="checkbox" id=(field) name=(field) value="y" checked[checked];
            " "
            label for=(field) { (label) }
        }
    }
}

fn add_form(form: &CafeForm, token: &str, errors: &FieldErrors, notice: Option<&str>) -> Markup {
    let cafe = form.to_new_cafe();
    html! {
        h1 { "Add a new cafe into the database" }
        @if let Some(notice) = notice {
            p class="error" { (notice) }
        }
        form method="post" action="/add" novalidate {
            input type="hidden" name="csrf_token" value=(token);
            (text_input("Cafe Name", "name", form.name.as_deref(), errors))
            (text_input("Maps URL", "map_url", form.map_url.as_deref(), errors))
            (text_input("Image URL", "img_url", form.img_url.as_deref(), errors))
            (text_input("Location Name", "location", form.location.as_deref(), errors))
            (text_input("Seats", "seats", form.seats.as_deref(), errors))
            (checkbox("Washrooms", "has_toilet", cafe.has_toilet))
            (checkbox("Wifi", "has_wifi", cafe.has_wifi))
            (checkbox("Power", "has_sockets", cafe.has_sockets))
            (checkbox("Takes Calls", "can_take_calls", cafe.can_take_calls))
            (text_input("Coffee Price", "coffee_price", form.coffee_price.as_deref(), errors))
            button type="submit" { "Submit" }
        }
        p { a href="/cafes" { "See all cafes" } }
    }
}

pub async fn add_page(session: Session) -> Result<Markup, ApiError> {
    let token = csrf::issue_token(&session).await?;
    Ok(layout(
        "Add",
        add_form(&CafeForm::default(), &token, &FieldErrors::new(), None),
    ))
}

fn rerender(
    status: StatusCode,
    form: &CafeForm,
    token: &str,
    errors: &FieldErrors,
    notice: Option<&str>,
) -> Response {
    (status, layout("Add", add_form(form, token, errors, notice))).into_response()
}

/// POST /add
/// On success redirects to the list page; otherwise re-renders the form with
/// the submitted values and per-field errors. Nothing is persisted on failure.
pub async fn submit_add(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<CafeForm>,
) -> Result<Response, ApiError> {
    if !csrf::verify_token(&session, form.csrf_token.as_deref()).await? {
        let token = csrf::issue_token(&session).await?;
        return Ok(rerender(
            StatusCode::BAD_REQUEST,
            &form,
            &token,
            &FieldErrors::new(),
            Some("The CSRF token is missing or invalid. Please submit the form again."),
        ));
    }

    let token = csrf::issue_token(&session).await?;
    let new_cafe = form.to_new_cafe();

    if let Err(errors) = validate_new_cafe(&new_cafe) {
        return Ok(rerender(
            StatusCode::UNPROCESSABLE_ENTITY,
            &form,
            &token,
            &errors,
            None,
        ));
    }

    match state.cafes().add_cafe(new_cafe).await {
        Ok(cafe) => {
            info!(cafe_id = %cafe.cafe_id(), "Cafe added from form");
            Ok(Redirect::to("/cafes").into_response())
        }
        Err(CafeError::Duplicate(_)) => {
            let mut errors = FieldErrors::new();
            errors.add("name", "A cafe with this name already exists.");
            Ok(rerender(
                StatusCode::UNPROCESSABLE_ENTITY,
                &form,
                &token,
                &errors,
                None,
            ))
        }
        Err(e) => Err(e.into()),
    }
}
