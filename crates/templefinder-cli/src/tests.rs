use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["templefinder"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!((cli.radius_km - 5.0).abs() < f64::EPSILON);
    assert!(cli.select.is_none());
}

#[test]
fn parses_search_with_multi_word_query() {
    let cli = Cli::try_parse_from(["templefinder", "search", "Bodh", "Gaya"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search { ref query }) if query.join(" ") == "Bodh Gaya"
    ));
}

#[test]
fn search_without_query_parses_to_empty() {
    let cli = Cli::try_parse_from(["templefinder", "search"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Search { ref query }) if query.is_empty()));
}

#[test]
fn parses_near_with_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "templefinder",
        "near",
        "--lat",
        "-33.8688",
        "--lon",
        "151.2093",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Near {
            lat: Some(lat),
            lon: Some(lon)
        }) if (lat + 33.8688).abs() < 1e-9 && (lon - 151.2093).abs() < 1e-9
    ));
}

#[test]
fn near_lat_without_lon_is_rejected() {
    assert!(Cli::try_parse_from(["templefinder", "near", "--lat", "10"]).is_err());
}

#[test]
fn global_flags_apply_after_subcommand() {
    let cli = Cli::try_parse_from([
        "templefinder",
        "search",
        "Varanasi",
        "--radius-km",
        "12.5",
        "--select",
        "2",
        "--server",
        "http://finder.local:8080",
    ])
    .expect("expected valid cli args");
    assert!((cli.radius_km - 12.5).abs() < f64::EPSILON);
    assert_eq!(cli.select, Some(2));
    assert_eq!(cli.server, "http://finder.local:8080");
}

#[test]
fn location_from_validates_range() {
    assert!(location_from(Some(91.0), Some(0.0)).is_err());
    assert!(location_from(Some(12.0), Some(77.0)).is_ok());
    assert!(location_from(None, None).is_ok());
}
