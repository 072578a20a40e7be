//! CLI argument parsing tests.

use chrono::NaiveDate;
use clap::Parser;
use harvestapi::cli::{update_params, Cli, Command, Entity, ReportKind, UpdateParams};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["harvest", "get", "client", "5735776"]);

    assert!(!cli.json);
    assert!(!cli.verbose);
    match cli.command {
        Command::Get { entity, id, user } => {
            assert_eq!(entity, Entity::Client);
            assert_eq!(id, 5735776);
            assert_eq!(user, None);
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["harvest", "list", "expenses", "--user", "1782959"]);

    match cli.command {
        Command::List { entity, user, .. } => {
            assert_eq!(entity, Entity::Expense);
            assert_eq!(user, Some(1782959));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_update_subcommand() {
    let cli = Cli::parse_from([
        "harvest", "update", "task", "8083800", "--name", "Research", "--active", "false",
    ]);

    match cli.command {
        Command::Update {
            entity,
            id,
            name,
            active,
            notes,
        } => {
            assert_eq!(entity, Entity::Task);
            assert_eq!(id, 8083800);
            assert_eq!(name.as_deref(), Some("Research"));
            assert_eq!(active, Some(false));
            assert_eq!(notes, None);
        }
        _ => panic!("Expected Update command"),
    }
}

#[test]
fn test_cli_parses_delete_subcommand() {
    let cli = Cli::parse_from(["harvest", "delete", "roles", "617670"]);

    assert!(matches!(
        cli.command,
        Command::Delete {
            entity: Entity::Role,
            id: 617670
        }
    ));
}

#[test]
fn test_cli_parses_report_subcommand() {
    let cli = Cli::parse_from([
        "harvest", "report", "time", "--group", "team", "--from", "2023-04-01", "--to",
        "2023-04-30",
    ]);

    match cli.command {
        Command::Report {
            kind,
            group,
            from,
            to,
        } => {
            assert_eq!(kind, ReportKind::Time);
            assert_eq!(group, "team");
            assert_eq!(from, NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
            assert_eq!(to, NaiveDate::from_ymd_opt(2023, 4, 30).unwrap());
        }
        _ => panic!("Expected Report command"),
    }
}

#[test]
fn test_report_rejects_bad_date() {
    let result = Cli::try_parse_from([
        "harvest", "report", "expenses", "--from", "April", "--to", "2023-04-30",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_global_flags() {
    // --json before subcommand
    let cli = Cli::parse_from(["harvest", "--json", "list", "clients"]);
    assert!(cli.json);

    // --json and --verbose after subcommand (global flags)
    let cli = Cli::parse_from(["harvest", "list", "clients", "--json", "--verbose"]);
    assert!(cli.json);
    assert!(cli.verbose);
}

#[test]
fn test_list_pagination_args() {
    let cli = Cli::parse_from(["harvest", "list", "roles", "--page", "2", "--per-page", "50"]);

    match cli.command {
        Command::List { page, per_page, .. } => {
            assert_eq!(page, Some(2));
            assert_eq!(per_page, Some(50));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_entity_variants() {
    for (arg, expected) in [
        ("client", Entity::Client),
        ("roles", Entity::Role),
        ("task", Entity::Task),
        ("expense", Entity::Expense),
        ("cost-rate", Entity::CostRate),
        ("cost-rates", Entity::CostRate),
    ] {
        let cli = Cli::parse_from(["harvest", "get", arg, "1"]);
        match cli.command {
            Command::Get { entity, .. } => assert_eq!(entity, expected, "for {arg}"),
            _ => panic!("Expected Get command"),
        }
    }
}

fn parse_update(args: &[&str]) -> Result<UpdateParams, String> {
    let cli = Cli::parse_from(["harvest", "update"].iter().chain(args));
    match cli.command {
        Command::Update {
            entity,
            name,
            active,
            notes,
            ..
        } => update_params(entity, name, active, notes),
        _ => panic!("Expected Update command"),
    }
}

#[test]
fn test_update_builds_params_for_entity() {
    match parse_update(&["task", "8083800", "--name", "Research", "--active", "false"]) {
        Ok(UpdateParams::Task(params)) => {
            assert_eq!(params.name.as_deref(), Some("Research"));
            assert_eq!(params.is_active, Some(false));
        }
        other => panic!("Expected task params, got {other:?}"),
    }

    match parse_update(&["expense", "15296442", "--notes", "Dinner"]) {
        Ok(UpdateParams::Expense(params)) => assert_eq!(params.notes.as_deref(), Some("Dinner")),
        other => panic!("Expected expense params, got {other:?}"),
    }

    assert!(matches!(
        parse_update(&["role", "617670", "--name", "Lead"]),
        Ok(UpdateParams::Role(_))
    ));
}

#[test]
fn test_update_rejects_flags_for_other_entities() {
    for (args, flag) in [
        (&["expense", "5", "--name", "X"][..], "--name"),
        (&["role", "5", "--active", "false"][..], "--active"),
        (&["client", "5", "--notes", "hello"][..], "--notes"),
    ] {
        let err = parse_update(args).unwrap_err();
        assert!(err.contains(flag), "{err} should name {flag}");
    }
}

#[test]
fn test_update_requires_a_flag() {
    let err = parse_update(&["client", "5"]).unwrap_err();
    assert!(err.contains("nothing to update"));
    assert!(err.contains("--name"));
}

#[test]
fn test_update_cost_rate_is_rejected() {
    let err = parse_update(&["cost-rate", "5", "--name", "X"]).unwrap_err();
    assert!(err.contains("cannot be updated"));
}
