//! Kitchen view: pending orders with an editable `filled` checkbox.
//!
//! `GET /kitchen` stores the rows it rendered in the session. `POST /kitchen`
//! rebuilds the edited copy from the ticked checkboxes, diffs it against that
//! snapshot, and writes back only the rows that changed.

use std::collections::HashSet;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{RawForm, State},
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;

use smoothies_core::{Order, OrderId, PendingOrder, detect_changes, edited_from_checked};

use crate::error::{Result, add_breadcrumb, report_error};
use crate::filters;
use crate::middleware::{set_flash, take_flash};
use crate::models::Flash;
use crate::models::session::keys;
use crate::state::AppState;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

// =============================================================================
// View Types
// =============================================================================

/// One row of the pending orders table.
#[derive(Debug, Clone)]
pub struct PendingOrderView {
    pub id: OrderId,
    pub filled: bool,
    pub name: String,
    pub ingredients: String,
    pub ordered_at: String,
}

impl From<&Order> for PendingOrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            filled: order.filled,
            name: order.name.clone(),
            ingredients: order.ingredients.clone(),
            ordered_at: order.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Pending orders page.
#[derive(Template, WebTemplate)]
#[template(path = "kitchen/index.html")]
pub struct KitchenTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub orders: Vec<PendingOrderView>,
    /// The store could not be read; the table is not shown.
    pub unavailable: bool,
}

/// Collect the order ids ticked in a submitted kitchen form.
///
/// Each ticked checkbox sends `filled=<order id>`. Values that are not order
/// ids are skipped.
#[must_use]
pub fn checked_ids(body: &[u8]) -> HashSet<OrderId> {
    url::form_urlencoded::parse(body)
        .filter(|(key, _)| key == "filled")
        .filter_map(|(_, value)| match value.parse::<OrderId>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!(value = %value, "Ignoring malformed order id in kitchen form");
                None
            }
        })
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// Pending orders page.
///
/// The flash is taken only after the store read. If the read fails, the page
/// still renders with the pending flash (often the `Save failed` message that
/// brought the kitchen here) and no table.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<KitchenTemplate> {
    let pending = match state.orders().list_pending().await {
        Ok(pending) => pending,
        Err(e) => {
            report_error(&e, "Failed to load pending orders");
            session
                .remove::<Vec<PendingOrder>>(keys::PENDING_SNAPSHOT)
                .await?;
            return Ok(KitchenTemplate {
                current_path: "/kitchen",
                flash: take_flash(&session).await,
                orders: Vec::new(),
                unavailable: true,
            });
        }
    };

    let snapshot: Vec<PendingOrder> = pending.iter().map(PendingOrder::from).collect();
    session.insert(keys::PENDING_SNAPSHOT, snapshot).await?;

    Ok(KitchenTemplate {
        current_path: "/kitchen",
        flash: take_flash(&session).await,
        orders: pending.iter().map(PendingOrderView::from).collect(),
        unavailable: false,
    })
}

/// Save ticked `filled` flags.
///
/// Always redirects back to `GET /kitchen`, which re-reads the store.
#[instrument(skip(state, session, body))]
pub async fn save(
    State(state): State<AppState>,
    session: Session,
    RawForm(body): RawForm,
) -> Result<Redirect> {
    let redirect = Redirect::to("/kitchen");

    let Some(snapshot) = session
        .remove::<Vec<PendingOrder>>(keys::PENDING_SNAPSHOT)
        .await?
    else {
        tracing::info!("Kitchen save without a snapshot");
        set_flash(
            &session,
            Flash::error("Pending orders changed, reload and try again."),
        )
        .await?;
        return Ok(redirect);
    };

    let edited = edited_from_checked(&snapshot, &checked_ids(&body));
    let changes = match detect_changes(&snapshot, &edited) {
        Ok(changes) => changes,
        Err(e) => {
            tracing::warn!(error = %e, "Kitchen change detection failed");
            set_flash(&session, Flash::error(format!("Save failed: {e}"))).await?;
            return Ok(redirect);
        }
    };

    if changes.is_empty() {
        set_flash(&session, Flash::info("No changes to save.")).await?;
        return Ok(redirect);
    }

    let flash = match state.orders().apply_fulfillment(&changes).await {
        Ok(updated) => {
            let count = changes.len().to_string();
            add_breadcrumb("kitchen", "Saved fulfillment", Some(&[("changes", &count)]));
            tracing::info!(changes = changes.len(), updated, "Saved fulfillment changes");
            Flash::success(format!("Saved {} change(s)!", changes.len()))
        }
        Err(e) => {
            report_error(&e, "Failed to save fulfillment changes");
            Flash::error(format!("Save failed: {e}"))
        }
    };

    set_flash(&session, flash).await?;
    Ok(redirect)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_checked_ids_collects_filled_values() {
        let ids = checked_ids(b"filled=3&filled=7&save=Submit");
        assert_eq!(ids, [OrderId::new(3), OrderId::new(7)].into_iter().collect());
    }

    #[test]
    fn test_checked_ids_skips_garbage() {
        let ids = checked_ids(b"filled=abc&filled=&filled=%2012&other=4");
        assert_eq!(ids, std::iter::once(OrderId::new(12)).collect());
    }

    #[test]
    fn test_view_formats_timestamp() {
        let order = Order {
            id: OrderId::new(9),
            filled: false,
            name: "Mia".to_string(),
            ingredients: "Kiwi, Lime".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).unwrap(),
        };

        let view = PendingOrderView::from(&order);

        assert_eq!(view.id, OrderId::new(9));
        assert_eq!(view.ordered_at, "2024-03-01 14:05:09 UTC");
    }

    #[test]
    fn test_empty_kitchen_renders_celebration() {
        let html = KitchenTemplate {
            current_path: "/kitchen",
            flash: None,
            orders: Vec::new(),
            unavailable: false,
        }
        .render()
        .unwrap();

        assert!(html.contains("No pending orders 🎉"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_unavailable_kitchen_keeps_flash_and_hides_table() {
        let html = KitchenTemplate {
            current_path: "/kitchen",
            flash: Some(Flash::error("Save failed: database error: pool timed out")),
            orders: Vec::new(),
            unavailable: true,
        }
        .render()
        .unwrap();

        assert!(html.contains("Save failed: database error: pool timed out"));
        assert!(html.contains("Pending orders are unavailable right now."));
        assert!(!html.contains("No pending orders"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_kitchen_renders_rows_and_count() {
        let html = KitchenTemplate {
            current_path: "/kitchen",
            flash: Some(Flash::success("Saved 1 change(s)!")),
            orders: vec![PendingOrderView {
                id: OrderId::new(4),
                filled: false,
                name: "Ravi".to_string(),
                ingredients: "Apples, Kiwi".to_string(),
                ordered_at: "2024-03-01 14:05:09 UTC".to_string(),
            }],
            unavailable: false,
        }
        .render()
        .unwrap();

        assert!(html.contains("Pending orders: 1"));
        assert!(html.contains(r#"name="filled" value="4""#));
        assert!(html.contains("Apples, Kiwi"));
        assert!(html.contains("(2)"));
        assert!(html.contains("Saved 1 change(s)!"));
    }
}
