//! Order inspection commands.

use smoothies_core::{Order, OrderId};
use smoothies_web::db::OrderRepository;

use super::{CliError, connect};

/// Print unfilled orders, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn pending() -> Result<(), CliError> {
    let pool = connect().await?;
    let orders = OrderRepository::new(&pool).list_pending().await?;

    #[allow(clippy::print_stdout)]
    {
        if orders.is_empty() {
            println!("No pending orders");
            return Ok(());
        }

        println!("Pending orders: {}", orders.len());
        for order in &orders {
            println!("{}", format_row(order));
        }
    }
    Ok(())
}

/// Print a single order.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` (wrapped) if the order does not exist.
pub async fn show(id: OrderId) -> Result<(), CliError> {
    let pool = connect().await?;
    let order = OrderRepository::new(&pool).get(id).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Order:       {}", order.id);
        println!("Name:        {}", order.name);
        println!("Ingredients: {}", order.ingredients);
        println!("Filled:      {}", if order.filled { "yes" } else { "no" });
        println!("Ordered at:  {}", format_timestamp(&order));
    }
    Ok(())
}

fn format_timestamp(order: &Order) -> String {
    order.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn format_row(order: &Order) -> String {
    format!(
        "#{:<6} {}  {:<20} {}",
        order.id.as_i32(),
        format_timestamp(order),
        order.name,
        order.ingredients
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_format_row() {
        let order = Order {
            id: OrderId::new(7),
            filled: false,
            name: "Noor".to_string(),
            ingredients: "Kiwi, Lime".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
        };

        assert_eq!(
            format_row(&order),
            "#7      2024-05-02 09:30:00 UTC  Noor                 Kiwi, Lime"
        );
    }
}
