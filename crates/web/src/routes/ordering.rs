//! Ordering screen handlers.
//!
//! The customer enters a name, ticks up to five fruits, and submits. The
//! submission is validated before anything is written; both outcomes redirect
//! back to the form with a flash message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{RawForm, State},
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;

use smoothies_core::{IngredientSelection, MAX_INGREDIENTS, OrderDraft, OrderDraftError};

use crate::error::{Result, add_breadcrumb, report_error};
use crate::filters;
use crate::middleware::{set_flash, take_flash};
use crate::models::Flash;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Ordering form data.
///
/// Parsed from the raw body because the checkbox list repeats the
/// `ingredients` key once per ticked fruit, in document order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl OrderForm {
    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// Unknown keys are ignored; a repeated `name` keeps the last value.
    #[must_use]
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "name" => form.name = value.into_owned(),
                "ingredients" => form.ingredients.push(value.into_owned()),
                _ => {}
            }
        }
        form
    }

    /// Validate into an insertable draft.
    ///
    /// # Errors
    ///
    /// Returns the first `OrderDraftError` found (name before ingredients).
    pub fn into_draft(self) -> std::result::Result<OrderDraft, OrderDraftError> {
        OrderDraft::parse(&self.name, &self.ingredients)
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Ordering form page.
#[derive(Template, WebTemplate)]
#[template(path = "ordering/index.html")]
pub struct OrderingTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    /// Fruit names offered as checkboxes, sorted.
    pub fruits: Vec<String>,
    pub max_ingredients: usize,
    /// The fruit options could not be read.
    pub unavailable: bool,
}

/// Ingredient preview fragment (replaces `#ingredient-preview` via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "ordering/preview.html")]
pub struct PreviewTemplate {
    /// Joined ingredient string, when the selection is valid.
    pub ingredients: Option<String>,
    /// Why the selection cannot be ordered as-is.
    pub error: Option<String>,
}

impl PreviewTemplate {
    /// Build the preview for a raw selection.
    ///
    /// An empty selection renders nothing rather than an error, since the
    /// customer simply has not started picking yet.
    #[must_use]
    pub fn for_selection(items: &[String]) -> Self {
        match IngredientSelection::new(items) {
            Ok(selection) => Self {
                ingredients: Some(selection.joined()),
                error: None,
            },
            Err(OrderDraftError::NoIngredients) => Self {
                ingredients: None,
                error: None,
            },
            Err(e) => Self {
                ingredients: None,
                error: Some(e.to_string()),
            },
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Ordering form page.
///
/// A failed fruit option read still renders the form, so a pending flash is
/// not lost.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> OrderingTemplate {
    let (fruits, unavailable) = match state.fruits().list().await {
        Ok(fruits) => (fruits.into_iter().map(|fruit| fruit.name).collect(), false),
        Err(e) => {
            report_error(&e, "Failed to load fruit options");
            (Vec::new(), true)
        }
    };

    OrderingTemplate {
        current_path: "/",
        flash: take_flash(&session).await,
        fruits,
        max_ingredients: MAX_INGREDIENTS,
        unavailable,
    }
}

/// Live ingredient preview (HTMX).
pub async fn preview(RawForm(body): RawForm) -> PreviewTemplate {
    let form = OrderForm::from_urlencoded(&body);
    PreviewTemplate::for_selection(&form.ingredients)
}

/// Submit an order.
///
/// Invalid submissions are rejected before any write and the reason is
/// flashed back onto the form.
#[instrument(skip(state, session, body))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    RawForm(body): RawForm,
) -> Result<Redirect> {
    let draft = match OrderForm::from_urlencoded(&body).into_draft() {
        Ok(draft) => draft,
        Err(e) => {
            tracing::info!(reason = %e, "Rejected order submission");
            set_flash(&session, Flash::error(e.to_string())).await?;
            return Ok(Redirect::to("/"));
        }
    };

    let order = state.orders().create(&draft).await?;

    let order_id = order.id.to_string();
    add_breadcrumb("order", "Smoothie ordered", Some(&[("order_id", &order_id)]));
    tracing::info!(
        order_id = %order.id,
        ingredients = %order.ingredients,
        "Smoothie ordered"
    );

    set_flash(
        &session,
        Flash::success(format!("Your Smoothie is ordered for {}!", order.name)),
    )
    .await?;
    Ok(Redirect::to("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_form_keeps_ingredient_order() {
        let form = OrderForm::from_urlencoded(
            b"name=Sam+Lee&ingredients=Kiwi&ingredients=Dragon+Fruit&ingredients=Apples",
        );
        assert_eq!(form.name, "Sam Lee");
        assert_eq!(form.ingredients, ["Kiwi", "Dragon Fruit", "Apples"]);
    }

    #[test]
    fn test_form_ignores_unknown_keys() {
        let form = OrderForm::from_urlencoded(b"name=Ana&submit=Submit+Order&csrf=abc");
        assert_eq!(
            form,
            OrderForm {
                name: "Ana".to_string(),
                ingredients: Vec::new(),
            }
        );
    }

    #[test]
    fn test_form_decodes_percent_escapes() {
        let form = OrderForm::from_urlencoded(b"name=Zo%C3%AB&ingredients=Ugli%20Fruit");
        assert_eq!(form.name, "Zoë");
        assert_eq!(form.ingredients, ["Ugli Fruit"]);
    }

    #[test]
    fn test_into_draft_rejects_missing_fields() {
        let empty_name = OrderForm::from_urlencoded(b"name=&ingredients=Kiwi");
        assert_eq!(empty_name.into_draft(), Err(OrderDraftError::EmptyName));

        let no_fruit = OrderForm::from_urlencoded(b"name=Kai");
        assert_eq!(no_fruit.into_draft(), Err(OrderDraftError::NoIngredients));
    }

    #[test]
    fn test_into_draft_joins_ingredients() {
        let form = OrderForm::from_urlencoded(b"name=Kai&ingredients=Kiwi&ingredients=Lime");
        let draft = form.into_draft().unwrap();
        assert_eq!(draft.name(), "Kai");
        assert_eq!(draft.ingredients().joined(), "Kiwi, Lime");
    }

    #[test]
    fn test_preview_states() {
        let empty = PreviewTemplate::for_selection(&[]);
        assert!(empty.ingredients.is_none() && empty.error.is_none());

        let ok = PreviewTemplate::for_selection(&["Kiwi".to_string(), "Lime".to_string()]);
        assert_eq!(ok.ingredients.as_deref(), Some("Kiwi, Lime"));

        let too_many: Vec<String> = (1..=6).map(|i| format!("Fruit {i}")).collect();
        let over = PreviewTemplate::for_selection(&too_many);
        assert!(over.ingredients.is_none());
        assert_eq!(
            over.error.as_deref(),
            Some("Choose up to 5 ingredients (you picked 6).")
        );
    }

    #[test]
    fn test_unavailable_form_keeps_flash() {
        let html = OrderingTemplate {
            current_path: "/",
            flash: Some(Flash::error("Please enter a name for the order.")),
            fruits: Vec::new(),
            max_ingredients: MAX_INGREDIENTS,
            unavailable: true,
        }
        .render()
        .unwrap();

        assert!(html.contains("Please enter a name for the order."));
        assert!(html.contains("Fruit options are unavailable right now."));
        assert!(!html.contains("No fruit options are available yet."));
    }

    #[test]
    fn test_preview_renders_joined_list() {
        let html = PreviewTemplate::for_selection(&["Kiwi".to_string(), "Lime".to_string()])
            .render()
            .unwrap();
        assert!(html.contains("Ingredients:"));
        assert!(html.contains("Kiwi, Lime"));
    }
}
