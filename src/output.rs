//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{Client, CostRate, Expense, Role, Task};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl PrettyPrint for Client {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Client #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("Active:         {}", yes_no(self.is_active)));

        if let Some(ref currency) = self.currency {
            lines.push(format!("Currency:       {}", currency));
        }

        if let Some(ref address) = self.address {
            // Multi-line addresses are indented under the label.
            let address = address.replace('\n', "\n                ");
            lines.push(format!("Address:        {}", address));
        }

        if let Some(ref updated) = self.updated_at {
            lines.push(format!("Updated:        {}", timestamp(updated)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Role {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Role #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("Users:          {}", self.user_ids.len()));

        if let Some(ref updated) = self.updated_at {
            lines.push(format!("Updated:        {}", timestamp(updated)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Task {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Task #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("Active:         {}", yes_no(self.is_active)));
        lines.push(format!("Billable:       {}", yes_no(self.billable_by_default)));

        if let Some(rate) = self.default_hourly_rate {
            lines.push(format!("Hourly Rate:    {:.2}", rate));
        }

        if self.is_default {
            lines.push("Default:        added to new projects".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Expense {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Expense #{}", self.id));
        lines.push(format!("Date:           {}", self.spent_date));
        lines.push(format!("Total:          {:.2}", self.total_cost));

        if let Some(project) = self.project_name() {
            lines.push(format!("Project:        {}", project));
        }

        if let Some(category) = self.category_name() {
            lines.push(format!("Category:       {}", category));
        }

        if let Some(ref user) = self.user {
            lines.push(format!("User:           {}", user.name));
        }

        let billing = match (self.billable, self.is_billed) {
            (_, true) => "billed",
            (true, false) => "billable",
            (false, false) => "not billable",
        };
        lines.push(format!("Billing:        {}", billing));

        if let Some(ref reason) = self.locked_reason {
            lines.push(format!("Locked:         {}", reason));
        }

        if let Some(ref notes) = self.notes {
            lines.push(format!("Notes:          {}", notes));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for CostRate {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Cost Rate #{}", self.id));
        lines.push(format!("Amount:         {:.2}", self.amount));

        let start = self
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let end = self
            .end_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "current".to_string());
        lines.push(format!("Applies:        {} to {}", start, end));

        lines.join("\n")
    }
}
