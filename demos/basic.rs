//! Basic example demonstrating the Harvest API client.
//!
//! Run with:
//! ```
//! HARVEST_ACCESS_TOKEN=your-token HARVEST_ACCOUNT_ID=123456 cargo run --example basic
//! ```

use chrono::{Datelike, Utc};
use harvestapi::{
    time_report, Client, ClientListQuery, Expense, ExpenseListQuery, Get, HarvestClient, List,
    Role, NoFilter, TimeReportGrouping, TimeReportQuery,
};

#[tokio::main]
async fn main() -> harvestapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating Harvest client...");
    let client = HarvestClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Listing Active Clients (first page) ---");
    let query = ClientListQuery {
        is_active: Some(true),
        ..Default::default()
    };
    let clients_page = Client::list_page(&client, &query, 1, 10).await?;
    println!(
        "Found {} clients (total: {})",
        clients_page.len(),
        clients_page.total_entries
    );
    for c in &clients_page {
        println!("  - {} ({})", c.name, c.id);
    }

    if let Some(first) = clients_page.items.first() {
        println!("\n--- Client Details ---");
        let detail = Client::get(&client, first.id).await?;
        println!("Client: {}", detail.name);
        println!("  Currency: {}", detail.currency.as_deref().unwrap_or("unknown"));

        println!("\n--- Unbilled Expenses ---");
        let expenses = Expense::list_all(
            &client,
            &ExpenseListQuery {
                client_id: Some(detail.id),
                is_billed: Some(false),
                ..Default::default()
            },
        )
        .await?;
        let total: f64 = expenses.iter().map(|e| e.total_cost).sum();
        println!("{} expenses, {:.2} total", expenses.len(), total);
    }

    println!("\n--- Roles ---");
    for role in Role::list_all(&client, &NoFilter {}).await? {
        println!("  - {} ({} users)", role.name, role.user_ids.len());
    }

    println!("\n--- Hours This Month By Project ---");
    let today = Utc::now().date_naive();
    let rows = time_report(
        &client,
        TimeReportQuery {
            grouping: TimeReportGrouping::Projects,
            from: today.with_day(1).unwrap_or(today),
            to: today,
            include_fixed_fee: None,
        },
    )
    .await?;
    for row in rows.iter().take(10) {
        println!("  {:<40} {:>8.2}h", row.label(), row.total_hours);
    }

    println!("\nDone!");
    Ok(())
}
