use super::*;

#[test]
fn parses_generate_command() {
    let cli = Cli::try_parse_from(["repsim", "generate", "Joe's Cafe", "Austin"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Generate {
            ref name,
            ref location,
            refresh_headline: false,
        } if name == "Joe's Cafe" && location == "Austin"
    ));
}

#[test]
fn parses_generate_with_refresh_headline() {
    let cli = Cli::try_parse_from([
        "repsim",
        "generate",
        "Acme Tech Solutions",
        "Denver",
        "--refresh-headline",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Generate {
            refresh_headline: true,
            ..
        }
    ));
}

#[test]
fn parses_list_command() {
    let cli = Cli::try_parse_from(["repsim", "list"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::List));
}

#[test]
fn parses_delete_with_a_uuid() {
    let cli = Cli::try_parse_from([
        "repsim",
        "delete",
        "7f8cba17-2f2e-4f26-8e96-33b2c34d04a4",
    ])
    .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::Delete { .. }));
}

#[test]
fn rejects_a_malformed_uuid() {
    let result = Cli::try_parse_from(["repsim", "show", "not-a-uuid"]);
    assert!(result.is_err());
}

#[test]
fn rejects_a_missing_subcommand() {
    let result = Cli::try_parse_from(["repsim"]);
    assert!(result.is_err());
}
