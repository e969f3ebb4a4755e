use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cupcake_order::app::{CupcakeApp, OrderSharer, TracingSharer};
use cupcake_order::config::OrderConfig;
use cupcake_order::domain::order::OrderState;

// Headless walk through the wizard, standing in for a real presentation layer.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, can be overridden with RUST_LOG
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,cupcake_order=debug"))
        )
        .init();

    tracing::info!("🧁 Starting cupcake order walkthrough");

    let config = OrderConfig::from_env()?;
    let mut app = CupcakeApp::with_system_clock(config)?;

    // === 1. Observer that re-renders on every published snapshot ===
    let mut snapshots = app.subscribe();
    let observer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let order = snapshots.borrow_and_update().clone();
            tracing::info!(
                quantity = order.quantity,
                flavor = %order.flavor,
                pickup_date = %order.pickup_date,
                price = %order.price,
                "🔄 Snapshot published"
            );
        }
    });

    // === 2. Start: choose a quantity ===
    let screen = app.screen();
    tracing::info!(title = screen.title, options = ?screen.options, "Showing screen");
    app.start_order(6)?;

    // === 3. Flavor ===
    app.select_flavor("Red Velvet")?;
    app.next()?;

    // === 4. Pickup: tomorrow, so no same-day surcharge ===
    let screen = app.screen();
    tracing::info!(title = screen.title, options = ?screen.options, "Showing screen");
    let tomorrow = screen
        .order
        .pickup_options
        .get(1)
        .cloned()
        .unwrap_or_default();
    app.select_pickup_date(tomorrow)?;
    app.next()?;

    // === 5. Summary: compose text and hand it off ===
    let screen = app.screen();
    tracing::info!(
        title = screen.title,
        price = %screen.order.price,
        same_day = screen.same_day_pickup,
        "Showing screen"
    );
    let sharer: Box<dyn OrderSharer> = Box::new(TracingSharer);
    app.send_order(sharer.as_ref(), "New Cupcake Order", order_summary(app.state()))
        .await?;

    tracing::debug!(history = %app.store().history_json()?, "Order event log");

    // === 6. Cancel returns to start with a fresh order ===
    app.cancel()?;
    tracing::info!(step = %app.step(), price = %app.state().price, "Order reset");

    drop(app);
    observer.await?;

    tracing::info!("🎉 Walkthrough complete!");
    Ok(())
}

fn order_summary(order: &OrderState) -> String {
    format!(
        "Quantity: {} cupcakes\nFlavor: {}\nPickup date: {}\nTotal: {}",
        order.quantity, order.flavor, order.pickup_date, order.price
    )
}
